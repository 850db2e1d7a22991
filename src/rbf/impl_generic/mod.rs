//! Generic implementations of the pose solver stages.

pub mod distance;
pub mod inference;
pub mod kernel;
pub mod pose_rbf;
pub mod solve;

pub use distance::{pose_delta, pose_distances, radius, vector_angle};
pub use inference::{DRIVER_STRIDE, InferenceParams, masked_driver, pose_weights};
pub use kernel::{apply_activations, rbf_activation};
pub use pose_rbf::{pose_rbf_evaluate_impl, pose_rbf_fit_impl};
pub use solve::{PoseFit, fit_poses, solve_weight_matrix};
