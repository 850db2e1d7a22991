//! weightdriver - Pose-Space RBF Weight Driver for Animation Rigs
//!
//! weightdriver turns driver inputs (scalar channels or joint transforms) into
//! blend weights by interpolating between stored poses with a radial basis
//! function solver. Built on numr, whose tensors back the runtime-generic
//! fit/evaluate surface.
//!
//! # Pipeline
//!
//! ```text
//! DriverSource ──► pose collector ──► distances ──► activations ──► solve
//!  (generic or        (poses, values)    (mean = width)              │
//!   transform)                                                      ▼
//!                  output weights ◄── shaping ◄── inference ◄── weight matrix
//! ```
//!
//! A change gate skips the distance/activation/solve stages while the pose
//! structure is unchanged; only inference and shaping run on every
//! evaluation.
//!
//! # Modules
//!
//! - [`matrix`] - Dense matrix and Gaussian elimination with partial pivoting
//! - [`spatial`] - Vectors, row-vector transforms, quaternions and twist
//! - [`rbf`] - Distances, kernels, per-output solve, inference, tensor surface
//! - [`pose`] - Pose collection for generic and transform inputs
//! - [`shaping`] - Negative clamp, bias, interpolation curves
//! - [`driver`] - The node instance with its cache and outputs
//! - [`config`] - Per-evaluation configuration
//!
//! # Example
//!
//! ```ignore
//! use weightdriver::{DriverConfig, DriverSource, OutputPlugs, OutputRequest, WeightDriver};
//!
//! let mut node = WeightDriver::new("elbow_rbf");
//! let mut outputs = OutputPlugs::default();
//! node.evaluate(&source, &DriverConfig::default(), OutputRequest::Weights, &mut outputs)?;
//! println!("{:?}", outputs.weight_vec());
//! ```

pub mod config;
pub mod driver;
pub mod matrix;
pub mod pose;
pub mod rbf;
pub mod shaping;
pub mod spatial;

// Re-export main types for convenience
pub use config::{DriverConfig, ExposeData};
pub use driver::{Evaluation, OutputPlugs, OutputRequest, SkipReason, WeightDriver};
pub use matrix::{Matrix, MatrixError, MatrixResult};
pub use pose::{DriverSource, GenericInputs, GenericPose, TransformDriver, TransformInputs};
pub use rbf::{
    DistanceType, PoseMode, PoseRbfAlgorithms, PoseRbfModel, RbfError, RbfKernel, RbfResult,
};
pub use shaping::{BlendCurve, Interpolation, RampCurve};
pub use spatial::{Mat4, Quat, TwistAxis, Vec3};

// Re-export numr types that users will commonly need
pub use numr::dtype::DType;
pub use numr::runtime::{Runtime, RuntimeClient};
pub use numr::tensor::Tensor;
