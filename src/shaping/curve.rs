//! Blend curves sampled by the `Curve` interpolation family.

use serde::{Deserialize, Serialize};

/// A host-authored curve mapping a weight in `[0, 1]` to a new weight.
pub trait BlendCurve {
    /// Sample the curve at `position`.
    fn value_at(&self, position: f64) -> f64;
}

impl<F> BlendCurve for F
where
    F: Fn(f64) -> f64,
{
    fn value_at(&self, position: f64) -> f64 {
        self(position)
    }
}

/// How a ramp segment blends from its starting key to the next one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RampInterpolation {
    /// Hold the starting key's value.
    None,
    /// Straight line between the keys.
    Linear,
    /// Smoothstep between the keys.
    Smooth,
    /// Catmull-Rom spline through the neighbouring keys.
    #[default]
    Spline,
}

/// One ramp control point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RampKey {
    pub position: f64,
    pub value: f64,
    #[serde(default)]
    pub interpolation: RampInterpolation,
}

impl RampKey {
    pub const fn new(position: f64, value: f64, interpolation: RampInterpolation) -> Self {
        Self {
            position,
            value,
            interpolation,
        }
    }
}

/// Piecewise curve over sorted keys.
///
/// Positions before the first key or after the last key take that key's
/// value. A NaN position takes the first key's value. The interpolation of a
/// key governs the segment that starts at it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RampCurve {
    keys: Vec<RampKey>,
}

impl Default for RampCurve {
    /// Keys `(0, 0)` and `(1, 1)` with spline interpolation.
    fn default() -> Self {
        Self {
            keys: vec![
                RampKey::new(0.0, 0.0, RampInterpolation::Spline),
                RampKey::new(1.0, 1.0, RampInterpolation::Spline),
            ],
        }
    }
}

impl RampCurve {
    /// Build a ramp from keys in any order. Keys with non-finite positions are
    /// dropped.
    pub fn new(keys: impl IntoIterator<Item = RampKey>) -> Self {
        let mut keys: Vec<RampKey> = keys.into_iter().filter(|k| k.position.is_finite()).collect();
        keys.sort_by(|a, b| a.position.total_cmp(&b.position));
        Self { keys }
    }

    pub fn keys(&self) -> &[RampKey] {
        &self.keys
    }

    /// Index `i` with `keys[i].position <= x < keys[i + 1].position`.
    fn find_interval(&self, x: f64) -> usize {
        let mut lo = 0;
        let mut hi = self.keys.len().saturating_sub(1);

        while lo + 1 < hi {
            let mid = (lo + hi) / 2;
            if self.keys[mid].position <= x {
                lo = mid;
            } else {
                hi = mid;
            }
        }

        lo
    }

    fn spline(&self, idx: usize, t: f64) -> f64 {
        let n = self.keys.len();
        let i0 = idx.saturating_sub(1);
        let i1 = idx;
        let i2 = idx + 1;
        let i3 = (idx + 2).min(n - 1);

        let (x0, y0) = (self.keys[i0].position, self.keys[i0].value);
        let (x1, y1) = (self.keys[i1].position, self.keys[i1].value);
        let (x2, y2) = (self.keys[i2].position, self.keys[i2].value);
        let (x3, y3) = (self.keys[i3].position, self.keys[i3].value);

        let h0 = x1 - x0;
        let h1 = x2 - x1;
        let h2 = x3 - x2;

        let m1 = if i0 == i1 || h0 == 0.0 {
            (y2 - y1) / h1
        } else {
            0.5 * ((y2 - y1) / h1 + (y1 - y0) / h0)
        };
        let m2 = if i2 == i3 || h2 == 0.0 {
            (y2 - y1) / h1
        } else {
            0.5 * ((y3 - y2) / h2 + (y2 - y1) / h1)
        };

        let t2 = t * t;
        let t3 = t2 * t;
        let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
        let h10 = t3 - 2.0 * t2 + t;
        let h01 = -2.0 * t3 + 3.0 * t2;
        let h11 = t3 - t2;

        h00 * y1 + h10 * h1 * m1 + h01 * y2 + h11 * h1 * m2
    }
}

impl BlendCurve for RampCurve {
    fn value_at(&self, position: f64) -> f64 {
        let (first, last) = match (self.keys.first(), self.keys.last()) {
            (Some(f), Some(l)) => (f, l),
            _ => return 0.0,
        };
        if position.is_nan() || position <= first.position {
            return first.value;
        }
        if position >= last.position {
            return last.value;
        }

        let idx = self.find_interval(position);
        let k0 = &self.keys[idx];
        let k1 = &self.keys[idx + 1];
        let span = k1.position - k0.position;
        if span <= 0.0 {
            return k1.value;
        }
        let t = (position - k0.position) / span;

        match k0.interpolation {
            RampInterpolation::None => k0.value,
            RampInterpolation::Linear => k0.value + t * (k1.value - k0.value),
            RampInterpolation::Smooth => {
                let s = t * t * (3.0 - 2.0 * t);
                k0.value + s * (k1.value - k0.value)
            }
            RampInterpolation::Spline => self.spline(idx, t),
        }
    }
}
