//! What an evaluation writes back to the host.

use crate::pose::{PoseDrawData, RbfMode};
use std::collections::BTreeMap;

/// Which output the host asked for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputRequest {
    /// The per-pose / per-output weight array.
    #[default]
    Weights,
    /// The single legacy weight of the cone-angle mode.
    LegacyWeight,
}

/// Host-visible outputs of a weight driver.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutputPlugs {
    /// Legacy single weight. RBF evaluations never write it.
    pub weight: f64,
    /// Output weights by slot.
    pub weights: BTreeMap<usize, f64>,
    pub rbf_mode: RbfMode,
    pub draw: Option<PoseDrawData>,
}

impl OutputPlugs {
    /// Replace the weight array with `weights` placed at `slots`.
    ///
    /// A single weight is the default full weight; it goes to the first slot
    /// and every other slot gets 0. Slots past the end of `weights` get 0.
    pub fn write_weights(&mut self, slots: &[usize], weights: &[f64]) {
        self.weights.clear();
        let single = weights.len() == 1;
        for (i, &slot) in slots.iter().enumerate() {
            let value = if single && i > 0 {
                0.0
            } else {
                weights.get(i).copied().unwrap_or(0.0)
            };
            self.weights.insert(slot, value);
        }
    }

    /// Dense view of the weight array up to the highest written slot.
    pub fn weight_vec(&self) -> Vec<f64> {
        let len = self.weights.keys().next_back().map_or(0, |&last| last + 1);
        let mut out = vec![0.0; len];
        for (&slot, &value) in &self.weights {
            out[slot] = value;
        }
        out
    }
}
