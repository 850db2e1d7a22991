//! 4x4 affine transforms in row-vector convention.

use crate::spatial::rotation::Quat;
use crate::spatial::vector::Vec3;
use serde::{Deserialize, Serialize};
use std::ops::Mul;

const INVERSE_EPSILON: f64 = 1e-12;

/// Row-major 4x4 transform. Points and vectors multiply from the left
/// (`v' = v * M`) and the translation sits in the last row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mat4 {
    pub rows: [[f64; 4]; 4],
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat4 {
    pub const IDENTITY: Mat4 = Mat4 {
        rows: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    pub const fn from_rows(rows: [[f64; 4]; 4]) -> Self {
        Self { rows }
    }

    /// Pure rotation transform.
    pub fn from_quat(q: Quat) -> Self {
        let r = q.to_rotation_rows();
        let mut m = Self::IDENTITY;
        for (i, row) in r.iter().enumerate() {
            m.rows[i][..3].copy_from_slice(row);
        }
        m
    }

    /// Rotation followed by a translation.
    pub fn from_rotation_translation(q: Quat, t: Vec3) -> Self {
        let mut m = Self::from_quat(q);
        m.rows[3] = [t.x, t.y, t.z, 1.0];
        m
    }

    pub fn translation(&self) -> Vec3 {
        Vec3::new(self.rows[3][0], self.rows[3][1], self.rows[3][2])
    }

    /// Transform a direction (translation ignored).
    pub fn transform_vector(&self, v: Vec3) -> Vec3 {
        let m = &self.rows;
        Vec3::new(
            v.x * m[0][0] + v.y * m[1][0] + v.z * m[2][0],
            v.x * m[0][1] + v.y * m[1][1] + v.z * m[2][1],
            v.x * m[0][2] + v.y * m[1][2] + v.z * m[2][2],
        )
    }

    /// Inverse via Gauss-Jordan elimination, or `None` when singular.
    pub fn inverse(&self) -> Option<Mat4> {
        let mut a = self.rows;
        let mut inv = Self::IDENTITY.rows;

        for col in 0..4 {
            let pivot = (col..4).max_by(|&i, &j| a[i][col].abs().total_cmp(&a[j][col].abs()))?;
            if a[pivot][col].abs() < INVERSE_EPSILON {
                return None;
            }
            a.swap(col, pivot);
            inv.swap(col, pivot);

            let d = a[col][col];
            for k in 0..4 {
                a[col][k] /= d;
                inv[col][k] /= d;
            }
            for row in 0..4 {
                if row == col {
                    continue;
                }
                let f = a[row][col];
                if f == 0.0 {
                    continue;
                }
                for k in 0..4 {
                    a[row][k] -= f * a[col][k];
                    inv[row][k] -= f * inv[col][k];
                }
            }
        }

        Some(Mat4::from_rows(inv))
    }

    /// Rotation of the upper 3x3 block with scale removed.
    ///
    /// Each basis row is normalized before extraction; a degenerate (zero)
    /// row yields the identity rotation.
    pub fn rotation(&self) -> Quat {
        let mut r = [[0.0; 3]; 3];
        for i in 0..3 {
            let axis = Vec3::new(self.rows[i][0], self.rows[i][1], self.rows[i][2]);
            let len = axis.length();
            if len == 0.0 {
                return Quat::IDENTITY;
            }
            r[i] = (axis * (1.0 / len)).to_array();
        }
        Quat::from_rotation_rows(r)
    }
}

impl Mul for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Mat4 {
        let mut out = [[0.0; 4]; 4];
        for (i, out_row) in out.iter_mut().enumerate() {
            for (j, cell) in out_row.iter_mut().enumerate() {
                *cell = (0..4).map(|k| self.rows[i][k] * rhs.rows[k][j]).sum();
            }
        }
        Mat4::from_rows(out)
    }
}
