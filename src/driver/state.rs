//! Per-instance solver cache.

use crate::driver::gate::ChangeGate;
use crate::matrix::Matrix;
use crate::pose::PoseSet;

/// Everything a weight driver keeps between evaluations.
///
/// Only a successful evaluation writes to it; a failed solve leaves the
/// previous fit and gate in place so the next evaluation solves again.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolverState {
    pub gate: ChangeGate,
    /// Pose set of the last evaluation. Reused as is while a generic gate is
    /// clean.
    pub poses: PoseSet,
    /// Fitted weights, `poses x outputs`.
    pub weights: Matrix,
    /// Kernel width of the fit.
    pub mean_distance: f64,
    /// Output slots of the last transform evaluation.
    pub pose_ids: Vec<usize>,
}
