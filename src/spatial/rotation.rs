//! Quaternion rotations and twist extraction.
//!
//! Matrices follow the row-vector convention (`v' = v * M`), so the rotation
//! block of a transform is the transpose of the textbook column-vector form.

use crate::spatial::vector::Vec3;
use serde::{Deserialize, Serialize};

/// Local axis used as the reference direction and the twist axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TwistAxis {
    #[default]
    X,
    Y,
    Z,
}

impl TwistAxis {
    /// Unit vector along the axis, negated when `invert` is set.
    pub fn base_vector(self, invert: bool) -> Vec3 {
        let v = match self {
            TwistAxis::X => Vec3::X,
            TwistAxis::Y => Vec3::Y,
            TwistAxis::Z => Vec3::Z,
        };
        if invert { -v } else { v }
    }
}

/// Unit quaternion `(x, y, z, w)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quat {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quat {
    pub const IDENTITY: Quat = Quat::new(0.0, 0.0, 0.0, 1.0);

    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    /// Rotation of `angle` radians about a unit `axis`.
    pub fn from_axis_angle(axis: Vec3, angle: f64) -> Self {
        let axis = axis.normalized();
        let (s, c) = (angle * 0.5).sin_cos();
        Self::new(axis.x * s, axis.y * s, axis.z * s, c)
    }

    /// Quaternion from an orthonormal row-vector rotation block using
    /// Shepperd's method.
    pub fn from_rotation_rows(m: [[f64; 3]; 3]) -> Self {
        // Column-vector form: r[i][j] = m[j][i].
        let (m00, m01, m02) = (m[0][0], m[1][0], m[2][0]);
        let (m10, m11, m12) = (m[0][1], m[1][1], m[2][1]);
        let (m20, m21, m22) = (m[0][2], m[1][2], m[2][2]);

        let trace = m00 + m11 + m22;

        let (w, x, y, z) = if trace > 0.0 {
            let s = 0.5 / (trace + 1.0).sqrt();
            (0.25 / s, (m21 - m12) * s, (m02 - m20) * s, (m10 - m01) * s)
        } else if m00 > m11 && m00 > m22 {
            let s = 2.0 * (1.0 + m00 - m11 - m22).sqrt();
            ((m21 - m12) / s, 0.25 * s, (m01 + m10) / s, (m02 + m20) / s)
        } else if m11 > m22 {
            let s = 2.0 * (1.0 + m11 - m00 - m22).sqrt();
            ((m02 - m20) / s, (m01 + m10) / s, 0.25 * s, (m12 + m21) / s)
        } else {
            let s = 2.0 * (1.0 + m22 - m00 - m11).sqrt();
            ((m10 - m01) / s, (m02 + m20) / s, (m12 + m21) / s, 0.25 * s)
        };

        Self::new(x, y, z, w).normalized()
    }

    pub fn normalized(self) -> Self {
        let len = (self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w).sqrt();
        if len == 0.0 {
            return Self::IDENTITY;
        }
        Self::new(self.x / len, self.y / len, self.z / len, self.w / len)
    }

    pub fn conjugate(self) -> Self {
        Self::new(-self.x, -self.y, -self.z, self.w)
    }

    /// Row-vector rotation block.
    pub fn to_rotation_rows(self) -> [[f64; 3]; 3] {
        let Quat { x, y, z, w } = self.normalized();
        let (xx, yy, zz) = (x * x, y * y, z * z);
        let (xy, xz, yz) = (x * y, x * z, y * z);
        let (wx, wy, wz) = (w * x, w * y, w * z);
        // Transpose of the column-vector matrix.
        [
            [1.0 - 2.0 * (yy + zz), 2.0 * (xy + wz), 2.0 * (xz - wy)],
            [2.0 * (xy - wz), 1.0 - 2.0 * (xx + zz), 2.0 * (yz + wx)],
            [2.0 * (xz + wy), 2.0 * (yz - wx), 1.0 - 2.0 * (xx + yy)],
        ]
    }

    /// Twist angle in radians about `axis`: `2 * atan2(q_axis, q_w)`.
    pub fn twist_angle(self, axis: TwistAxis) -> f64 {
        let component = match axis {
            TwistAxis::X => self.x,
            TwistAxis::Y => self.y,
            TwistAxis::Z => self.z,
        };
        2.0 * component.atan2(self.w)
    }
}
