//! Raw output weights for a driver sample.

use crate::matrix::Matrix;
use crate::rbf::impl_generic::distance::pose_delta;
use crate::rbf::impl_generic::kernel::rbf_activation;
use crate::rbf::traits::{DistanceType, PoseMode, RbfKernel};

/// Components per transform driver: three vector components and the twist.
pub const DRIVER_STRIDE: usize = 4;

/// Driver sample as seen by a pose with the given mode.
///
/// Only the first driver block is masked: `RotateOnly` zeroes its twist,
/// `TwistOnly` zeroes its vector components. Further drivers are compared in
/// full whatever the mode.
pub fn masked_driver(driver: &[f64], mode: PoseMode) -> Vec<f64> {
    let mut dv = driver.to_vec();
    let head = dv.len().min(DRIVER_STRIDE);
    match mode {
        PoseMode::Both => {}
        PoseMode::RotateOnly => {
            if let Some(twist) = dv[..head].get_mut(3) {
                *twist = 0.0;
            }
        }
        PoseMode::TwistOnly => {
            let n = head.min(3);
            dv[..n].fill(0.0);
        }
    }
    dv
}

/// Inputs shared by every inference call of one evaluation.
#[derive(Debug, Clone, Copy)]
pub struct InferenceParams {
    pub mean_distance: f64,
    pub distance: DistanceType,
    pub kernel: RbfKernel,
}

/// Accumulate `out[j] += weights[i][j] * kernel(dist(driver_i, pose_i))` over
/// every pose `i`.
///
/// Returns `None` without touching anything if `weights` is not
/// `poses.rows() x value_count`, which happens when the output layout changed
/// but no new fit ran.
pub fn pose_weights(
    poses: &Matrix,
    driver: &[f64],
    modes: &[PoseMode],
    weights: &Matrix,
    value_count: usize,
    params: InferenceParams,
) -> Option<Vec<f64>> {
    let pose_count = poses.rows();
    if weights.rows() != pose_count || weights.cols() != value_count {
        return None;
    }

    let mut out = vec![0.0; value_count];
    for i in 0..pose_count {
        let mode = modes.get(i).copied().unwrap_or_default();
        let dv = masked_driver(driver, mode);
        let dist = pose_delta(&dv, poses.row(i), params.distance);
        let activation = rbf_activation(dist, params.mean_distance, params.kernel);
        for (j, o) in out.iter_mut().enumerate() {
            *o += weights[(i, j)] * activation;
        }
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rbf::impl_generic::solve::fit_poses;
    use approx::assert_abs_diff_eq;

    fn params(mean_distance: f64) -> InferenceParams {
        InferenceParams {
            mean_distance,
            distance: DistanceType::Euclidean,
            kernel: RbfKernel::Gaussian,
        }
    }

    #[test]
    fn test_masked_driver_first_block_only() {
        let driver = [1.0, 2.0, 3.0, 0.5, 4.0, 5.0, 6.0, 0.7];
        assert_eq!(masked_driver(&driver, PoseMode::Both), driver.to_vec());
        assert_eq!(
            masked_driver(&driver, PoseMode::RotateOnly),
            vec![1.0, 2.0, 3.0, 0.0, 4.0, 5.0, 6.0, 0.7]
        );
        assert_eq!(
            masked_driver(&driver, PoseMode::TwistOnly),
            vec![0.0, 0.0, 0.0, 0.5, 4.0, 5.0, 6.0, 0.7]
        );
        assert_eq!(masked_driver(&[0.2, 0.4], PoseMode::TwistOnly), vec![0.0, 0.0]);
        assert_eq!(masked_driver(&[0.2, 0.4], PoseMode::RotateOnly), vec![0.2, 0.4]);
    }

    #[test]
    fn test_second_driver_twist_counts_for_rotate_only() {
        let poses = Matrix::from_rows(vec![vec![1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0]]).unwrap();
        let weights = Matrix::from_rows(vec![vec![1.0]]).unwrap();
        let driver = [1.0, 0.0, 0.0, 0.3, 1.0, 0.0, 0.0, 0.3];

        let out =
            pose_weights(&poses, &driver, &[PoseMode::RotateOnly], &weights, 1, params(1.0)).unwrap();
        assert_abs_diff_eq!(out[0], (-0.3_f64).exp(), epsilon = 1e-12);
    }

    #[test]
    fn test_scalar_scenario() {
        let poses = Matrix::from_rows(vec![vec![0.0], vec![1.0]]).unwrap();
        let values = Matrix::from_rows(vec![vec![0.0], vec![1.0]]).unwrap();
        let fit = fit_poses(&poses, &values, 1, DistanceType::Euclidean, RbfKernel::Gaussian).unwrap();
        let p = params(fit.mean_distance);

        let at = |x: f64| pose_weights(&poses, &[x], &[], &fit.weights, 1, p).unwrap()[0];
        assert_abs_diff_eq!(at(0.0), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(at(1.0), 1.0, epsilon = 1e-12);
        let mid = at(0.5);
        assert!(mid > 0.0 && mid < 1.0, "mid = {mid}");
    }

    #[test]
    fn test_shape_guard() {
        let poses = Matrix::zeros(2, 1);
        let weights = Matrix::zeros(2, 1);
        assert!(pose_weights(&poses, &[0.0], &[], &weights, 2, params(1.0)).is_none());
        assert!(pose_weights(&Matrix::zeros(3, 1), &[0.0], &[], &weights, 1, params(1.0)).is_none());
    }

    #[test]
    fn test_mode_changes_distance() {
        // One pose at twist 0 with a vector; driver differs only in twist.
        let poses = Matrix::from_rows(vec![vec![1.0, 0.0, 0.0, 0.0]]).unwrap();
        let weights = Matrix::from_rows(vec![vec![1.0]]).unwrap();
        let driver = [1.0, 0.0, 0.0, 0.3];

        let both = pose_weights(&poses, &driver, &[PoseMode::Both], &weights, 1, params(1.0)).unwrap();
        let rotate =
            pose_weights(&poses, &driver, &[PoseMode::RotateOnly], &weights, 1, params(1.0)).unwrap();
        assert_abs_diff_eq!(both[0], (-0.3_f64).exp(), epsilon = 1e-12);
        assert_abs_diff_eq!(rotate[0], 1.0, epsilon = 1e-12);
    }
}
