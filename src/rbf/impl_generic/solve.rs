//! Fitting the weight matrix: distances, activations, one solve per output.

use crate::matrix::Matrix;
use crate::rbf::error::{RbfError, RbfResult};
use crate::rbf::impl_generic::distance::pose_distances;
use crate::rbf::impl_generic::kernel::apply_activations;
use crate::rbf::traits::{DistanceType, RbfKernel};

/// Everything produced by a full fit. The intermediate matrices are kept for
/// diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct PoseFit {
    /// Pose-to-pose distances, `n x n`.
    pub distances: Matrix,
    /// Kernel activations of `distances`, `n x n`.
    pub activations: Matrix,
    /// Solved weights, `n x solve_count`.
    pub weights: Matrix,
    /// Mean distance, used as the kernel width.
    pub mean_distance: f64,
}

/// Solve `activations * W = values` column by column for the first
/// `solve_count` value columns.
///
/// Each column solves on its own copy of `activations` because elimination is
/// destructive. The first failing column aborts the whole fit.
pub fn solve_weight_matrix(
    activations: &Matrix,
    values: &Matrix,
    solve_count: usize,
) -> RbfResult<Matrix> {
    let pose_count = activations.rows();
    if values.rows() != pose_count {
        return Err(RbfError::ShapeMismatch {
            expected: pose_count,
            actual: values.rows(),
            context: "solve_weight_matrix (value rows)".to_string(),
        });
    }
    if solve_count > values.cols() {
        return Err(RbfError::ShapeMismatch {
            expected: solve_count,
            actual: values.cols(),
            context: "solve_weight_matrix (value columns)".to_string(),
        });
    }

    let mut weights = Matrix::zeros(pose_count, solve_count);
    for c in 0..solve_count {
        let y = values.column_vector(c);
        let mut system = activations.clone();
        let w = system
            .solve(&y)
            .map_err(|source| RbfError::Decomposition { output: c, source })?;
        for (i, wi) in w.into_iter().enumerate() {
            weights[(i, c)] = wi;
        }
    }
    Ok(weights)
}

/// Run distances, activations and the per-output solve for a pose set.
pub fn fit_poses(
    poses: &Matrix,
    values: &Matrix,
    solve_count: usize,
    distance: DistanceType,
    kernel: RbfKernel,
) -> RbfResult<PoseFit> {
    let (distances, mean_distance) = pose_distances(poses, distance);
    let mut activations = distances.clone();
    apply_activations(&mut activations, mean_distance, kernel);
    let weights = solve_weight_matrix(&activations, values, solve_count)?;
    Ok(PoseFit {
        distances,
        activations,
        weights,
        mean_distance,
    })
}
