//! Pose-space RBF algorithm trait and the types shared by the solver stages.

use crate::rbf::error::RbfResult;
use numr::dtype::DType;
use numr::runtime::Runtime;
use numr::tensor::Tensor;
use serde::{Deserialize, Serialize};

/// Kernel turning a pose distance into an activation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RbfKernel {
    /// `exp(-(1/width)^2 * r)`, width defaulting to 1 when zero.
    #[default]
    Gaussian,
    /// `r`
    Linear,
}

/// How two pose vectors are compared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DistanceType {
    /// Square root of the summed squared component differences.
    #[default]
    Euclidean,
    /// Angle between two 3-vectors. Vectors of any other length fall back to
    /// Euclidean.
    Angle,
}

/// Which parts of a transform pose take part in the comparison.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PoseMode {
    /// Reference vector and twist.
    #[default]
    Both,
    /// Reference vector only; twist is zeroed.
    RotateOnly,
    /// Twist only; the reference vector is zeroed.
    TwistOnly,
}

/// A fitted pose interpolator on tensors.
#[derive(Debug, Clone)]
pub struct PoseRbfModel<R: Runtime> {
    /// Training poses, shape [n, d].
    pub poses: Tensor<R>,
    /// Solved weights, shape [n, m].
    pub weights: Tensor<R>,
    /// Mean pose distance, used as the kernel width.
    pub mean_distance: f64,
    /// Kernel function.
    pub kernel: RbfKernel,
    /// Distance function.
    pub distance: DistanceType,
}

/// Pose-space radial basis function algorithms.
///
/// Both operations run the same pipeline as the weight driver node: pairwise
/// distances, kernel activations, one Gaussian elimination per output column,
/// and weighted reconstruction.
pub trait PoseRbfAlgorithms<R: Runtime<DType = DType>> {
    /// Fit weights mapping poses to values.
    ///
    /// # Arguments
    /// * `poses` - Pose vectors, shape [n, d] (F64)
    /// * `values` - Target values per pose, shape [n, m] (F64)
    /// * `kernel` - Kernel function
    /// * `distance` - Distance function
    fn pose_rbf_fit(
        &self,
        poses: &Tensor<R>,
        values: &Tensor<R>,
        kernel: RbfKernel,
        distance: DistanceType,
    ) -> RbfResult<PoseRbfModel<R>>;

    /// Evaluate raw (unshaped) output weights for a batch of driver samples.
    ///
    /// # Arguments
    /// * `model` - Fitted model
    /// * `drivers` - Driver samples, shape [k, d]
    ///
    /// Returns a tensor of shape [k, m].
    fn pose_rbf_evaluate(
        &self,
        model: &PoseRbfModel<R>,
        drivers: &Tensor<R>,
    ) -> RbfResult<Tensor<R>>;
}
