//! Spatial helpers for transform-driven poses.
//!
//! The host hands transform-mode drivers and poses over as 4x4 matrices and
//! joint orientations as quaternions. This module turns those into the
//! reference vectors and twist angles the pose collector works with:
//!
//! - [`Vec3`] - directions, angles between directions
//! - [`Mat4`] - row-vector affine transforms (product, inverse, rotation block)
//! - [`Quat`] - rotations, Shepperd extraction, twist about a [`TwistAxis`]

mod rotation;
mod transform;
mod vector;

pub use rotation::{Quat, TwistAxis};
pub use transform::Mat4;
pub use vector::Vec3;
