//! Pose collection.
//!
//! Turns one of the two host input shapes into the dense pose and value
//! matrices the solver works on:
//!
//! - [`DriverSource::Generic`]: scalar inputs, poses in sparse host slots
//!   mapped to rows by a [`PoseEnumeration`]
//! - [`DriverSource::Transform`]: driver transforms, four dimensions per
//!   driver (reference vector and twist), one output per pose

mod enumeration;
mod generic;
mod source;
mod transform;
mod types;

pub use enumeration::{DenseEnumeration, HostArrayEnumeration, PoseEnumeration};
pub use generic::{GenericDriver, generic_driver, generic_poses};
pub use source::{
    DriverConnection, DriverSource, GenericInputs, GenericPose, TransformDriver, TransformInputs,
    TransformPose,
};
pub use transform::{TransformCollection, TransformSample, TransformSettings, collect_transform};
pub use types::{PoseDrawData, PoseSet, RbfMode};
