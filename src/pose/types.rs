//! Collected pose data.

use crate::matrix::Matrix;
use crate::rbf::PoseMode;
use crate::spatial::Vec3;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Which input shape produced the pose set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RbfMode {
    /// Per-scalar inputs, outputs at sequential slots.
    #[default]
    Generic,
    /// Per-driver transforms, one output per pose.
    Matrix,
}

/// Training poses in the dense layout the solver consumes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PoseSet {
    /// One row per pose, one column per driver dimension.
    pub poses: Matrix,
    /// One row per pose, one column per output.
    pub values: Matrix,
    /// Mode of each pose. Always `Both` for generic poses.
    pub modes: Vec<PoseMode>,
    /// Logical index of each pose.
    pub ids: Vec<usize>,
}

impl PoseSet {
    pub fn len(&self) -> usize {
        self.poses.rows()
    }

    pub fn is_empty(&self) -> bool {
        self.poses.rows() == 0
    }

    /// Number of value columns per pose.
    pub fn value_count(&self) -> usize {
        self.values.cols()
    }
}

/// World-space pose vectors and twist values for a viewport.
///
/// Keyed by pose logical index. The driver itself is stored one slot past
/// the last pose.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PoseDrawData {
    pub vectors: BTreeMap<usize, Vec3>,
    pub twist: BTreeMap<usize, f64>,
}

impl PoseDrawData {
    /// Slot holding the driver, if any pose was recorded.
    pub fn driver_slot(&self) -> Option<usize> {
        self.vectors.keys().next_back().copied()
    }
}
