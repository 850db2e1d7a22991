//! Inputs a host hands to the pose collector.

use crate::rbf::PoseMode;
use crate::spatial::{Mat4, Quat};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One pose of the generic shape: sparse per-dimension inputs and values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenericPose {
    /// Pose input per driver dimension, keyed by logical index.
    pub inputs: BTreeMap<usize, f64>,
    /// Target value per output, keyed by logical index.
    pub values: BTreeMap<usize, f64>,
}

impl GenericPose {
    /// Dense helper: inputs at `0..inputs.len()`, values at `0..values.len()`.
    pub fn new(inputs: &[f64], values: &[f64]) -> Self {
        Self {
            inputs: inputs.iter().copied().enumerate().collect(),
            values: values.iter().copied().enumerate().collect(),
        }
    }
}

/// Generic-shape inputs: scalar driver values and sparse pose slots.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenericInputs {
    /// Connected driver values in slot order.
    pub inputs: Vec<f64>,
    /// Rest values in slot order. Missing entries count as 0.
    pub rest: Vec<f64>,
    /// Pose slots by logical index, as the host array holds them.
    pub poses: BTreeMap<usize, GenericPose>,
    /// Logical indices of the connected outputs.
    pub outputs: Vec<usize>,
    /// True when any pose attribute is driven by a live connection.
    pub poses_connected: bool,
}

/// The parent space of a connected driver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DriverConnection {
    /// Inverse of the driver's parent world matrix.
    pub parent_inverse: Mat4,
    /// Joint orientation, for joint drivers.
    pub joint_orient: Option<Quat>,
}

impl Default for DriverConnection {
    fn default() -> Self {
        Self {
            parent_inverse: Mat4::IDENTITY,
            joint_orient: None,
        }
    }
}

/// One stored pose of a transform driver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TransformPose {
    /// World matrix of the driver at the pose.
    pub matrix: Mat4,
    /// World matrix of the driver's parent at the pose.
    pub parent_matrix: Mat4,
    pub mode: PoseMode,
}

/// A driver transform and its poses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransformDriver {
    /// Current world matrix.
    pub matrix: Mat4,
    /// `None` while the driver input has no upstream source.
    pub connection: Option<DriverConnection>,
    /// Poses by logical index.
    pub poses: BTreeMap<usize, TransformPose>,
}

/// Transform-shape inputs, drivers in slot order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransformInputs {
    pub drivers: Vec<TransformDriver>,
}

/// The two input shapes sharing one solve pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DriverSource {
    Generic(GenericInputs),
    Transform(TransformInputs),
}

impl DriverSource {
    /// Pick the shape the host wiring implies: generic as soon as any scalar
    /// input is connected.
    pub fn select(generic: GenericInputs, transform: TransformInputs) -> Self {
        if generic.inputs.is_empty() {
            DriverSource::Transform(transform)
        } else {
            DriverSource::Generic(generic)
        }
    }
}
