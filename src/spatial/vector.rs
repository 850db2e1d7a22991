//! Three-component vectors.

use serde::{Deserialize, Serialize};
use std::ops::{Mul, Neg, Sub};

/// A 3D vector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3::new(0.0, 0.0, 0.0);
    pub const X: Vec3 = Vec3::new(1.0, 0.0, 0.0);
    pub const Y: Vec3 = Vec3::new(0.0, 1.0, 0.0);
    pub const Z: Vec3 = Vec3::new(0.0, 0.0, 1.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Build from the first three entries of a slice.
    ///
    /// Returns `None` if the slice is shorter than three.
    pub fn from_slice(values: &[f64]) -> Option<Self> {
        match values {
            [x, y, z, ..] => Some(Self::new(*x, *y, *z)),
            _ => None,
        }
    }

    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    pub fn dot(self, other: Vec3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Vec3) -> Vec3 {
        Vec3::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Unit vector in the same direction, or zero for a zero vector.
    pub fn normalized(self) -> Vec3 {
        let len = self.length();
        if len == 0.0 { self } else { self * (1.0 / len) }
    }

    /// Angle in radians between two vectors, in `[0, pi]`.
    ///
    /// A zero-length operand yields 0. Parallel vectors give exactly 0.
    /// Computed as `atan2(|u x v|, u . v)`; for nearly parallel vectors this
    /// differs from an `acos` of the normalized dot product by up to ~1e-8.
    pub fn angle(self, other: Vec3) -> f64 {
        if self.length() == 0.0 || other.length() == 0.0 {
            return 0.0;
        }
        self.cross(other).length().atan2(self.dot(other))
    }
}

impl Mul<f64> for Vec3 {
    type Output = Vec3;

    fn mul(self, s: f64) -> Vec3 {
        Vec3::new(self.x * s, self.y * s, self.z * s)
    }
}

impl Neg for Vec3 {
    type Output = Vec3;

    fn neg(self) -> Vec3 {
        self * -1.0
    }
}

impl Sub for Vec3 {
    type Output = Vec3;

    fn sub(self, other: Vec3) -> Vec3 {
        Vec3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_angle_between_axes() {
        assert_abs_diff_eq!(Vec3::X.angle(Vec3::Y), FRAC_PI_2, epsilon = 1e-12);
        assert_abs_diff_eq!(Vec3::X.angle(-Vec3::X), PI, epsilon = 1e-12);
        assert_abs_diff_eq!(Vec3::Z.angle(Vec3::Z * 3.0), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_angle_resolves_nearly_parallel_vectors() {
        let tilted = Vec3::new(1.0, 1e-9, 0.0);
        assert_abs_diff_eq!(Vec3::X.angle(tilted), 1e-9, epsilon = 1e-20);
        assert_eq!(tilted.angle(tilted), 0.0);
    }

    #[test]
    fn test_angle_with_zero_vector() {
        assert_eq!(Vec3::ZERO.angle(Vec3::X), 0.0);
    }

    #[test]
    fn test_from_slice() {
        assert_eq!(Vec3::from_slice(&[1.0, 2.0, 3.0, 4.0]), Some(Vec3::new(1.0, 2.0, 3.0)));
        assert_eq!(Vec3::from_slice(&[1.0, 2.0]), None);
    }
}
