//! Pose collection for generic scalar inputs.

use crate::matrix::Matrix;
use crate::pose::enumeration::PoseEnumeration;
use crate::pose::source::GenericInputs;
use crate::pose::types::PoseSet;
use crate::rbf::{DistanceType, PoseMode};

/// Driver sample and rest offsets of a generic evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct GenericDriver {
    /// Current inputs, rest-relative under `Angle` distance.
    pub driver: Vec<f64>,
    /// Rest offset per dimension. All zero unless the distance is `Angle`.
    pub rest: Vec<f64>,
}

/// Build the driver sample.
///
/// The rest values only act as origin under `Angle` distance; for
/// `Euclidean` they are forced to zero.
pub fn generic_driver(inputs: &GenericInputs, distance: DistanceType) -> GenericDriver {
    let dim = inputs.inputs.len();
    let mut driver = inputs.inputs.clone();
    let mut rest = vec![0.0; dim];

    if distance == DistanceType::Angle {
        for (i, (d, r)) in driver.iter_mut().zip(rest.iter_mut()).enumerate() {
            *r = inputs.rest.get(i).copied().unwrap_or(0.0);
            *d -= *r;
        }
    }

    GenericDriver { driver, rest }
}

/// Build the `count x dim` pose matrix and `count x outputs` value matrix.
///
/// Rows without a backing slot, and dimensions a slot does not hold, start
/// at `-rest`. Values a slot does not hold are 0.
pub fn generic_poses(
    inputs: &GenericInputs,
    rest: &[f64],
    enumeration: &dyn PoseEnumeration,
) -> PoseSet {
    let count = enumeration.pose_count(&inputs.poses);
    let dim = rest.len();
    let solve_count = inputs.outputs.len();

    let mut poses = Matrix::zeros(count, dim);
    let mut values = Matrix::zeros(count, solve_count);

    for i in 0..count {
        for (j, r) in rest.iter().enumerate() {
            poses[(i, j)] = 0.0 - r;
        }

        let Some(slot) = enumeration.pose_at(&inputs.poses, i) else {
            continue;
        };
        if !slot.inputs.is_empty() {
            for (j, r) in rest.iter().enumerate() {
                if let Some(v) = slot.inputs.get(&j) {
                    poses[(i, j)] = v - r;
                }
            }
        }
        for j in 0..solve_count {
            if let Some(v) = slot.values.get(&j) {
                values[(i, j)] = *v;
            }
        }
    }

    PoseSet {
        poses,
        values,
        modes: vec![PoseMode::Both; count],
        ids: (0..count).collect(),
    }
}
