//! Decides whether cached fit results are still valid.

use crate::rbf::PoseMode;

/// Pose structure seen by the last successful evaluation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangeGate {
    pose_count: usize,
    modes: Vec<PoseMode>,
}

impl ChangeGate {
    /// Pose count of the last committed evaluation.
    pub fn pose_count(&self) -> usize {
        self.pose_count
    }

    pub fn modes(&self) -> &[PoseMode] {
        &self.modes
    }

    /// Generic shape: a live pose connection, a new pose count or a forced
    /// evaluation invalidates the fit.
    pub fn generic_dirty(&self, pose_count: usize, poses_connected: bool, force: bool) -> bool {
        force || poses_connected || pose_count != self.pose_count
    }

    /// Transform shape: a new pose count, a changed pose mode or a forced
    /// evaluation invalidates the fit. Modes only compare once recorded.
    pub fn transform_dirty(&self, pose_count: usize, modes: &[PoseMode], force: bool) -> bool {
        if force || pose_count != self.pose_count {
            return true;
        }
        pose_count != 0 && !self.modes.is_empty() && self.modes != modes
    }

    pub(crate) fn commit_count(&mut self, pose_count: usize) {
        self.pose_count = pose_count;
    }

    pub(crate) fn commit_modes(&mut self, modes: &[PoseMode]) {
        self.modes.clear();
        self.modes.extend_from_slice(modes);
    }
}
