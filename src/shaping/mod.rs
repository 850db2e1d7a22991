//! Weight shaping applied after inference.
//!
//! Every raw weight passes through, in order: negative clamp, bias,
//! interpolation curve and scale. See [`Shaping::apply`].

mod curve;
mod weights;

pub use curve::{BlendCurve, RampCurve, RampInterpolation, RampKey};
pub use weights::{
    BIAS_EPSILON, Interpolation, Shaping, apply_bias, clamp_negative, finalize_weights,
    interpolate_weight,
};
