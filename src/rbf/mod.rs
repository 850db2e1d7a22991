//! Pose-space radial basis function solver.
//!
//! The solver maps a driver sample onto a set of stored poses:
//!
//! 1. pairwise pose distances (Euclidean or vector angle) and their mean,
//! 2. kernel activations with the mean distance as width,
//! 3. one Gaussian elimination per output column for the weight matrix,
//! 4. weighted reconstruction for a new driver sample.
//!
//! # Module Organization
//!
//! - [`traits`] - Kernel, distance and pose mode enums plus [`PoseRbfAlgorithms`]
//! - [`impl_generic`] - The solver stages on [`Matrix`](crate::matrix::Matrix)
//!   and their tensor wrappers
//! - `cpu` - [`PoseRbfAlgorithms`] for `CpuClient`
//!
//! # Example
//!
//! ```ignore
//! use weightdriver::rbf::{DistanceType, PoseRbfAlgorithms, RbfKernel};
//! use numr::runtime::cpu::{CpuClient, CpuDevice};
//!
//! let device = CpuDevice::new();
//! let client = CpuClient::new(device.clone());
//!
//! let poses = Tensor::from_slice(&[0.0, 1.0], &[2, 1], &device);
//! let values = Tensor::from_slice(&[0.0, 1.0], &[2, 1], &device);
//! let model = client.pose_rbf_fit(&poses, &values, RbfKernel::Gaussian, DistanceType::Euclidean)?;
//!
//! let drivers = Tensor::from_slice(&[0.5], &[1, 1], &device);
//! let weights = client.pose_rbf_evaluate(&model, &drivers)?;
//! ```

mod cpu;
mod error;
pub mod impl_generic;
pub mod traits;
pub mod validation;

pub use error::{RbfError, RbfResult};
pub use impl_generic::{InferenceParams, PoseFit, fit_poses, pose_weights};
pub use traits::{DistanceType, PoseMode, PoseRbfAlgorithms, PoseRbfModel, RbfKernel};
