//! Expose-data logging of intermediate solver data.

use crate::config::ExposeData;
use crate::pose::PoseSet;
use crate::rbf::PoseFit;
use tracing::info;

pub(crate) fn expose_pose_set(node: &str, level: ExposeData, set: &PoseSet) {
    if level.shows_poses() {
        info!(target: "weightdriver::expose", node, "Poses:\n{}", set.poses);
        info!(target: "weightdriver::expose", node, "Values:\n{}", set.values);
    }
}

pub(crate) fn expose_fit(node: &str, level: ExposeData, fit: &PoseFit) {
    if level.shows_matrices() {
        info!(target: "weightdriver::expose", node, "Distance matrix:\n{}", fit.distances);
        info!(target: "weightdriver::expose", node, "Activations:\n{}", fit.activations);
        info!(target: "weightdriver::expose", node, "Weight matrix:\n{}", fit.weights);
    }
}

pub(crate) fn expose_raw_weights(node: &str, level: ExposeData, weights: &[f64]) {
    if level.shows_weights() {
        let line: String = weights.iter().map(|w| format!(" {w}")).collect();
        info!(target: "weightdriver::expose", node, "RBF Weights:\n{line}");
    }
}
