//! Pose collection for transform drivers.
//!
//! Each driver contributes four dimensions: the reference axis carried into
//! the driver's parent-relative space, and the twist about that axis.

use crate::matrix::Matrix;
use crate::pose::source::{TransformDriver, TransformInputs};
use crate::pose::types::{PoseDrawData, PoseSet};
use crate::rbf::PoseMode;
use crate::rbf::impl_generic::DRIVER_STRIDE;
use crate::spatial::{Mat4, Quat, TwistAxis, Vec3};
use tracing::{debug, warn};

/// Driver sample, poses and draw data of a transform evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformSample {
    pub driver: Vec<f64>,
    /// Poses with identity values, one output per pose.
    pub poses: PoseSet,
    pub draw: Option<PoseDrawData>,
}

/// Result of collecting transform inputs.
#[derive(Debug, Clone, PartialEq)]
pub enum TransformCollection {
    Ready(TransformSample),
    /// A driver input has no upstream source yet.
    MissingConnection { driver: usize },
}

/// Axis and draw settings of the transform collector.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TransformSettings {
    pub twist_axis: TwistAxis,
    pub invert_axes: bool,
    /// Driver whose poses feed the draw data.
    pub draw_driver: usize,
}

fn joint_orient_inverse(joint_orient: Option<Quat>) -> Mat4 {
    joint_orient.map_or(Mat4::IDENTITY, |q| Mat4::from_quat(q.normalized().conjugate()))
}

fn parent_inverse(parent: &Mat4, pose: usize) -> Mat4 {
    parent.inverse().unwrap_or_else(|| {
        warn!(pose, "singular pose parent matrix, using identity");
        Mat4::IDENTITY
    })
}

/// Reference vector and twist of a parent-relative transform.
fn vector_and_twist(local: &Mat4, base: Vec3, axis: TwistAxis) -> (Vec3, f64) {
    (local.transform_vector(base), local.rotation().twist_angle(axis))
}

/// Collect the driver sample and pose set.
///
/// Pose slots and logical ids come from the first driver. A driver with fewer
/// poses than the first one keeps zero pose columns. The mode of a pose is
/// taken from the last driver holding it.
pub fn collect_transform(inputs: &TransformInputs, settings: TransformSettings) -> TransformCollection {
    let Some(first) = inputs.drivers.first() else {
        debug!("no drivers connected");
        return TransformCollection::MissingConnection { driver: 0 };
    };

    let axis = settings.twist_axis;
    let base = axis.base_vector(settings.invert_axes);
    let dim = DRIVER_STRIDE * inputs.drivers.len();

    let ids: Vec<usize> = first.poses.keys().copied().collect();
    let pose_count = ids.len();

    let mut driver = vec![0.0; dim];
    let mut poses = Matrix::zeros(pose_count, dim);
    let mut modes = vec![PoseMode::Both; pose_count];
    let mut draw = None;

    for (d, td) in inputs.drivers.iter().enumerate() {
        let Some(connection) = td.connection.as_ref() else {
            debug!(driver = d, "driver input not connected");
            return TransformCollection::MissingConnection { driver: d };
        };

        let joint_inv = joint_orient_inverse(connection.joint_orient);
        let local = td.matrix * connection.parent_inverse * joint_inv;
        let (vector, twist) = vector_and_twist(&local, base, axis);

        let offset = d * DRIVER_STRIDE;
        driver[offset..offset + 3].copy_from_slice(&vector.to_array());
        driver[offset + 3] = twist;

        if pose_count == 0 {
            continue;
        }
        if td.poses.len() < pose_count {
            warn!(
                driver = d,
                poses = td.poses.len(),
                expected = pose_count,
                "driver has fewer poses than the first driver, skipped"
            );
            continue;
        }

        let world = collect_driver_poses(td, &mut poses, &mut modes, offset, base, axis, joint_inv);

        if d == settings.draw_driver {
            draw = Some(draw_data(td, &ids, &world, &poses, offset, base, twist));
        }
    }

    TransformCollection::Ready(TransformSample {
        driver,
        poses: PoseSet {
            poses,
            values: Matrix::identity(pose_count),
            modes,
            ids,
        },
        draw,
    })
}

/// Fill one driver's pose columns. Returns the world-space pose vectors.
fn collect_driver_poses(
    td: &TransformDriver,
    poses: &mut Matrix,
    modes: &mut [PoseMode],
    offset: usize,
    base: Vec3,
    axis: TwistAxis,
    joint_inv: Mat4,
) -> Vec<Vec3> {
    let mut world = Vec::with_capacity(modes.len());
    for (i, pose) in td.poses.values().take(modes.len()).enumerate() {
        let relative = pose.matrix * parent_inverse(&pose.parent_matrix, i) * joint_inv;
        let (vector, twist) = vector_and_twist(&relative, base, axis);
        modes[i] = pose.mode;

        if pose.mode != PoseMode::TwistOnly {
            poses[(i, offset)] = vector.x;
            poses[(i, offset + 1)] = vector.y;
            poses[(i, offset + 2)] = vector.z;
        }
        poses[(i, offset + 3)] = if pose.mode != PoseMode::RotateOnly {
            twist
        } else {
            0.0
        };

        world.push(pose.matrix.transform_vector(base));
    }
    world
}

fn draw_data(
    td: &TransformDriver,
    ids: &[usize],
    world: &[Vec3],
    poses: &Matrix,
    offset: usize,
    base: Vec3,
    driver_twist: f64,
) -> PoseDrawData {
    let mut data = PoseDrawData::default();
    for (i, (&id, &v)) in ids.iter().zip(world).enumerate() {
        data.vectors.insert(id, v);
        data.twist.insert(id, poses[(i, offset + 3)]);
    }
    if let Some(&last) = ids.last() {
        data.vectors.insert(last + 1, td.matrix.transform_vector(base));
        data.twist.insert(last + 1, driver_twist);
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::source::{DriverConnection, TransformPose};
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_2;

    fn rot_z(angle: f64) -> Mat4 {
        Mat4::from_quat(Quat::from_axis_angle(Vec3::Z, angle))
    }

    fn rot_x(angle: f64) -> Mat4 {
        Mat4::from_quat(Quat::from_axis_angle(Vec3::X, angle))
    }

    fn pose(matrix: Mat4, mode: PoseMode) -> TransformPose {
        TransformPose {
            matrix,
            parent_matrix: Mat4::IDENTITY,
            mode,
        }
    }

    fn driver(matrix: Mat4, poses: &[(usize, TransformPose)]) -> TransformDriver {
        TransformDriver {
            matrix,
            connection: Some(DriverConnection::default()),
            poses: poses.iter().copied().collect(),
        }
    }

    fn ready(c: TransformCollection) -> TransformSample {
        match c {
            TransformCollection::Ready(s) => s,
            other => panic!("expected samples, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_connection() {
        let inputs = TransformInputs {
            drivers: vec![TransformDriver::default()],
        };
        assert_eq!(
            collect_transform(&inputs, TransformSettings::default()),
            TransformCollection::MissingConnection { driver: 0 }
        );
        assert!(matches!(
            collect_transform(&TransformInputs::default(), TransformSettings::default()),
            TransformCollection::MissingConnection { .. }
        ));
    }

    #[test]
    fn test_driver_vector_and_twist() {
        let inputs = TransformInputs {
            drivers: vec![driver(rot_x(0.4) * rot_z(FRAC_PI_2), &[])],
        };
        // Row vectors: the x rotation applies first and leaves the X axis in place.
        let s = ready(collect_transform(&inputs, TransformSettings::default()));
        assert_eq!(s.driver.len(), 4);
        assert_abs_diff_eq!(s.driver[0], 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(s.driver[1], 1.0, epsilon = 1e-12);
        assert!(s.poses.is_empty());
        assert!(s.draw.is_none());
    }

    #[test]
    fn test_pose_modes_mask_columns() {
        let twisted = rot_x(0.5);
        let inputs = TransformInputs {
            drivers: vec![driver(
                Mat4::IDENTITY,
                &[
                    (0, pose(twisted, PoseMode::Both)),
                    (1, pose(twisted, PoseMode::RotateOnly)),
                    (3, pose(twisted, PoseMode::TwistOnly)),
                ],
            )],
        };
        let s = ready(collect_transform(&inputs, TransformSettings::default()));
        assert_eq!(s.poses.ids, vec![0, 1, 3]);
        assert_eq!(s.poses.values, Matrix::identity(3));

        assert_abs_diff_eq!(s.poses.poses[(0, 0)], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(s.poses.poses[(0, 3)], 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(s.poses.poses[(1, 0)], 1.0, epsilon = 1e-12);
        assert_eq!(s.poses.poses[(1, 3)], 0.0);
        assert_eq!(s.poses.poses.row(2)[..3], [0.0, 0.0, 0.0]);
        assert_abs_diff_eq!(s.poses.poses[(2, 3)], 0.5, epsilon = 1e-12);
        assert_eq!(
            s.poses.modes,
            vec![PoseMode::Both, PoseMode::RotateOnly, PoseMode::TwistOnly]
        );
    }

    #[test]
    fn test_parent_space_and_joint_orient() {
        let mut td = driver(rot_z(FRAC_PI_2), &[]);
        td.connection = Some(DriverConnection {
            parent_inverse: rot_z(-FRAC_PI_2),
            joint_orient: None,
        });
        let s = ready(collect_transform(
            &TransformInputs { drivers: vec![td.clone()] },
            TransformSettings::default(),
        ));
        assert_abs_diff_eq!(s.driver[0], 1.0, epsilon = 1e-12);

        td.connection = Some(DriverConnection {
            parent_inverse: Mat4::IDENTITY,
            joint_orient: Some(Quat::from_axis_angle(Vec3::Z, FRAC_PI_2)),
        });
        let s = ready(collect_transform(
            &TransformInputs { drivers: vec![td] },
            TransformSettings::default(),
        ));
        assert_abs_diff_eq!(s.driver[0], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(s.driver[1], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_two_drivers_and_short_driver() {
        let poses = [
            (0, pose(Mat4::IDENTITY, PoseMode::Both)),
            (1, pose(rot_z(FRAC_PI_2), PoseMode::Both)),
        ];
        let inputs = TransformInputs {
            drivers: vec![
                driver(Mat4::IDENTITY, &poses),
                driver(Mat4::IDENTITY, &poses[..1]),
            ],
        };
        let s = ready(collect_transform(&inputs, TransformSettings::default()));
        assert_eq!(s.driver.len(), 8);
        assert_eq!(s.poses.poses.cols(), 8);
        assert_abs_diff_eq!(s.poses.poses[(1, 1)], 1.0, epsilon = 1e-12);
        // Second driver has too few poses: its columns stay zero.
        assert_eq!(s.poses.poses.row(0)[4..], [0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_draw_data_for_selected_driver() {
        let inputs = TransformInputs {
            drivers: vec![driver(
                rot_z(FRAC_PI_2),
                &[
                    (2, pose(Mat4::IDENTITY, PoseMode::Both)),
                    (5, pose(rot_z(FRAC_PI_2), PoseMode::Both)),
                ],
            )],
        };
        let s = ready(collect_transform(&inputs, TransformSettings::default()));
        let draw = s.draw.unwrap();
        assert_eq!(draw.vectors.keys().copied().collect::<Vec<_>>(), vec![2, 5, 6]);
        assert_eq!(draw.driver_slot(), Some(6));
        assert_abs_diff_eq!(draw.vectors[&6].y, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(draw.vectors[&5].y, 1.0, epsilon = 1e-12);

        let hidden = collect_transform(
            &inputs,
            TransformSettings {
                draw_driver: 3,
                ..Default::default()
            },
        );
        assert!(ready(hidden).draw.is_none());
    }

    #[test]
    fn test_inverted_axis() {
        let inputs = TransformInputs {
            drivers: vec![driver(Mat4::IDENTITY, &[])],
        };
        let s = ready(collect_transform(
            &inputs,
            TransformSettings {
                twist_axis: TwistAxis::Y,
                invert_axes: true,
                draw_driver: 0,
            },
        ));
        assert_eq!(&s.driver[..3], &[0.0, -1.0, 0.0]);
    }
}
