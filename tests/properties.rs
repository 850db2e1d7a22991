//! Property-based tests for the solver stages.

use proptest::collection::vec as prop_vec;
use proptest::prelude::*;

use weightdriver::matrix::{Matrix, MatrixError};
use weightdriver::rbf::impl_generic::{pose_distances, rbf_activation};
use weightdriver::rbf::{DistanceType, InferenceParams, RbfKernel, fit_poses, pose_weights};
use weightdriver::shaping::apply_bias;

// =============================================================================
// Strategies
// =============================================================================

/// Diagonally dominant `n x n` system and a known solution.
fn arb_system() -> impl Strategy<Value = (Matrix, Vec<f64>)> {
    (1usize..7).prop_flat_map(|n| {
        (
            prop_vec(prop_vec(-1.0f64..1.0, n), n),
            prop_vec(-10.0f64..10.0, n),
        )
            .prop_map(move |(mut rows, x)| {
                for (i, row) in rows.iter_mut().enumerate() {
                    row[i] += (n + 1) as f64;
                }
                (Matrix::from_rows(rows).unwrap(), x)
            })
    })
}

/// `n` poses of dimension `d`.
fn arb_poses() -> impl Strategy<Value = Matrix> {
    (1usize..7, 1usize..5).prop_flat_map(|(n, d)| {
        prop_vec(prop_vec(-5.0f64..5.0, d), n).prop_map(|rows| Matrix::from_rows(rows).unwrap())
    })
}

/// Poses spread along the x axis with jitter, and one target value each.
fn arb_training_set() -> impl Strategy<Value = (Matrix, Matrix)> {
    (1usize..6).prop_flat_map(|n| {
        (
            prop_vec((0.0f64..0.3, -0.3f64..0.3), n),
            prop_vec(-1.0f64..1.0, n),
        )
            .prop_map(|(jitter, targets)| {
                let poses = jitter
                    .iter()
                    .enumerate()
                    .map(|(i, &(dx, y))| vec![i as f64 + dx, y])
                    .collect();
                let values = targets.into_iter().map(|v| vec![v]).collect();
                (
                    Matrix::from_rows(poses).unwrap(),
                    Matrix::from_rows(values).unwrap(),
                )
            })
    })
}

fn matrix_vector(a: &Matrix, x: &[f64]) -> Vec<f64> {
    (0..a.rows())
        .map(|i| a.row(i).iter().zip(x).map(|(a, x)| a * x).sum())
        .collect()
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Elimination recovers the solution of a well-conditioned system.
    #[test]
    fn solve_recovers_known_solution((a, x) in arb_system()) {
        let b = matrix_vector(&a, &x);
        let mut system = a.clone();
        let solved = system.solve(&b).unwrap();

        prop_assert_eq!(solved.len(), x.len());
        for (s, e) in solved.iter().zip(&x) {
            prop_assert!(
                (s - e).abs() <= 1e-9 * e.abs().max(1.0),
                "solved {} expected {}", s, e
            );
        }
    }

    /// A zero column is reported as singular instead of producing NaNs.
    #[test]
    fn solve_zero_column_is_singular((a, x) in arb_system(), col in 0usize..7) {
        let n = a.rows();
        let col = col % n;
        let mut rows: Vec<Vec<f64>> = a.iter_rows().map(<[f64]>::to_vec).collect();
        for row in rows.iter_mut() {
            row[col] = 0.0;
        }
        let mut system = Matrix::from_rows(rows).unwrap();
        let err = system.solve(&x).unwrap_err();
        let is_singular = matches!(err, MatrixError::Singular { .. });
        prop_assert!(is_singular);
    }

    /// Distance matrices are symmetric with a zero diagonal, and the mean
    /// covers every cell.
    #[test]
    fn distance_matrix_shape(poses in arb_poses(), angle in any::<bool>()) {
        let distance = if angle { DistanceType::Angle } else { DistanceType::Euclidean };
        let (dist, mean) = pose_distances(&poses, distance);
        let n = poses.rows();

        prop_assert_eq!(dist.rows(), n);
        prop_assert_eq!(dist.cols(), n);
        for i in 0..n {
            prop_assert_eq!(dist[(i, i)], 0.0);
            for j in 0..n {
                prop_assert_eq!(dist[(i, j)], dist[(j, i)]);
                prop_assert!(dist[(i, j)] >= 0.0);
            }
        }
        let expected = dist.sum() / (n * n) as f64;
        prop_assert!((mean - expected).abs() <= 1e-12 * expected.max(1.0));
    }

    /// Zero distance activates fully under the Gaussian kernel and not at all
    /// under the linear one.
    #[test]
    fn kernel_at_zero_distance(width in 1e-3f64..1e3) {
        prop_assert_eq!(rbf_activation(0.0, width, RbfKernel::Gaussian), 1.0);
        prop_assert_eq!(rbf_activation(0.0, width, RbfKernel::Linear), 0.0);
    }

    /// A zero bias leaves weights in the unit range unchanged.
    #[test]
    fn zero_bias_is_identity(v in 0.0f64..=1.0) {
        prop_assert_eq!(apply_bias(v, 0.0), v);
    }

    /// Inference at a training pose reproduces that pose's value.
    #[test]
    fn fit_is_exact_at_training_poses((poses, values) in arb_training_set()) {
        let fit = fit_poses(&poses, &values, 1, DistanceType::Euclidean, RbfKernel::Gaussian).unwrap();
        let params = InferenceParams {
            mean_distance: fit.mean_distance,
            distance: DistanceType::Euclidean,
            kernel: RbfKernel::Gaussian,
        };
        for i in 0..poses.rows() {
            let out = pose_weights(&poses, poses.row(i), &[], &fit.weights, 1, params).unwrap();
            prop_assert!(
                (out[0] - values[(i, 0)]).abs() < 1e-8,
                "pose {}: got {} expected {}", i, out[0], values[(i, 0)]
            );
        }
    }
}
