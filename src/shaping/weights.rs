//! Post-processing of raw RBF weights.

use crate::shaping::curve::BlendCurve;
use serde::{Deserialize, Serialize};

/// Base magnitude below which a negative bias saturates to 1.
pub const BIAS_EPSILON: f64 = f64::EPSILON;

/// Curve family applied to a weight after bias.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Interpolation {
    /// `v`
    #[default]
    Linear,
    /// `1 - (1 - v)^2`
    Slow,
    /// `1 - (1 - v)^0.5`
    Fast,
    /// Smoothstep, `v^2 (3 - 2v)`
    Smooth1,
    /// Smootherstep, `v^3 (v (6v - 15) + 10)`
    Smooth2,
    /// Sample the injected [`BlendCurve`].
    Curve,
}

/// Clamp a negative weight to zero unless negatives are allowed.
pub fn clamp_negative(value: f64, allow_negative: bool) -> f64 {
    if value < 0.0 && !allow_negative {
        0.0
    } else {
        value
    }
}

/// Shift a weight towards the lower (`bias > 0`) or upper (`bias < 0`) end of
/// the range.
pub fn apply_bias(value: f64, bias: f64) -> f64 {
    if bias >= 0.0 {
        value.abs() * value.abs().powf(bias)
    } else {
        let base = 1.0 - value.abs();
        // pow(0, x) at |v| == 1
        if base.abs() > BIAS_EPSILON {
            1.0 - base.powf(1.0 + bias.abs())
        } else {
            1.0
        }
    }
}

/// Map a weight through the selected curve family.
pub fn interpolate_weight(value: f64, interpolation: Interpolation, curve: &dyn BlendCurve) -> f64 {
    match interpolation {
        Interpolation::Linear => value,
        Interpolation::Slow => 1.0 - (1.0 - value).powf(2.0),
        Interpolation::Fast => 1.0 - (1.0 - value).powf(0.5),
        Interpolation::Smooth1 => value * value * (3.0 - 2.0 * value),
        Interpolation::Smooth2 => value * value * value * (value * (value * 6.0 - 15.0) + 10.0),
        Interpolation::Curve => curve.value_at(value),
    }
}

/// The shaping knobs read each evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shaping {
    pub allow_negative: bool,
    pub bias: f64,
    pub use_interpolation: bool,
    pub interpolation: Interpolation,
    pub scale: f64,
}

impl Default for Shaping {
    fn default() -> Self {
        Self {
            allow_negative: true,
            bias: 0.0,
            use_interpolation: false,
            interpolation: Interpolation::Linear,
            scale: 1.0,
        }
    }
}

impl Shaping {
    /// Clamp, bias, interpolate, then scale a single raw weight.
    pub fn apply(&self, raw: f64, curve: &dyn BlendCurve) -> f64 {
        let mut value = clamp_negative(raw, self.allow_negative);
        if self.bias != 0.0 {
            value = apply_bias(value, self.bias);
        }
        if self.use_interpolation {
            value = interpolate_weight(value, self.interpolation, curve);
        }
        value * self.scale
    }
}

/// Shape every raw weight in place.
pub fn finalize_weights(weights: &mut [f64], shaping: &Shaping, curve: &dyn BlendCurve) {
    for w in weights.iter_mut() {
        *w = shaping.apply(*w, curve);
    }
}
