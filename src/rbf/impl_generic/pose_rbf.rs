//! Pose RBF on tensors.
//!
//! The solver is a sequence of small dense eliminations with data-dependent
//! pivoting, so both operations download to host, run the same routines the
//! weight driver uses and upload the result.

use crate::matrix::Matrix;
use crate::rbf::error::{RbfError, RbfResult};
use crate::rbf::impl_generic::inference::{InferenceParams, pose_weights};
use crate::rbf::impl_generic::solve::fit_poses;
use crate::rbf::traits::{DistanceType, PoseRbfModel, RbfKernel};
use crate::rbf::validation::{validate_2d, validate_f64, validate_matching_axis};
use numr::dtype::DType;
use numr::runtime::{Runtime, RuntimeClient};
use numr::tensor::Tensor;

/// Fit pose weights for every value column.
pub fn pose_rbf_fit_impl<R, C>(
    client: &C,
    poses: &Tensor<R>,
    values: &Tensor<R>,
    kernel: RbfKernel,
    distance: DistanceType,
) -> RbfResult<PoseRbfModel<R>>
where
    R: Runtime<DType = DType>,
    C: RuntimeClient<R>,
{
    validate_f64(poses.dtype(), "poses")?;
    validate_f64(values.dtype(), "values")?;
    validate_2d(poses.shape(), "poses")?;
    validate_2d(values.shape(), "values")?;
    validate_matching_axis(poses.shape(), values.shape(), 0, "pose_rbf_fit (pose count)")?;

    let pose_matrix = Matrix::from_tensor(poses)?;
    let value_matrix = Matrix::from_tensor(values)?;
    let fit = fit_poses(
        &pose_matrix,
        &value_matrix,
        value_matrix.cols(),
        distance,
        kernel,
    )?;

    let device = client.device();
    Ok(PoseRbfModel {
        poses: pose_matrix.to_tensor::<R>(device),
        weights: fit.weights.to_tensor::<R>(device),
        mean_distance: fit.mean_distance,
        kernel,
        distance,
    })
}

/// Evaluate raw output weights for each row of `drivers`.
pub fn pose_rbf_evaluate_impl<R, C>(
    client: &C,
    model: &PoseRbfModel<R>,
    drivers: &Tensor<R>,
) -> RbfResult<Tensor<R>>
where
    R: Runtime<DType = DType>,
    C: RuntimeClient<R>,
{
    validate_f64(drivers.dtype(), "drivers")?;
    validate_2d(drivers.shape(), "drivers")?;
    validate_matching_axis(
        model.poses.shape(),
        drivers.shape(),
        1,
        "pose_rbf_evaluate (driver dimension)",
    )?;

    let poses = Matrix::from_tensor(&model.poses)?;
    let weights = Matrix::from_tensor(&model.weights)?;
    let samples = Matrix::from_tensor(drivers)?;
    let params = InferenceParams {
        mean_distance: model.mean_distance,
        distance: model.distance,
        kernel: model.kernel,
    };

    validate_matching_axis(
        &[poses.rows()],
        &[weights.rows()],
        0,
        "pose_rbf_evaluate (weight rows)",
    )?;

    let value_count = weights.cols();
    let mut out = Matrix::zeros(samples.rows(), value_count);
    for (k, sample) in samples.iter_rows().enumerate() {
        let row = pose_weights(&poses, sample, &[], &weights, value_count, params).ok_or_else(
            || RbfError::ShapeMismatch {
                expected: poses.rows(),
                actual: weights.rows(),
                context: "pose_rbf_evaluate (weights)".to_string(),
            },
        )?;
        for (j, v) in row.into_iter().enumerate() {
            out[(k, j)] = v;
        }
    }

    Ok(out.to_tensor::<R>(client.device()))
}
