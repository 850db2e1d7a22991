//! Per-evaluation configuration of a weight driver.
//!
//! Every knob is read fresh on each evaluation. Configurations deserialize
//! from JSON with every field optional:
//!
//! ```ignore
//! let config = DriverConfig::from_json(r#"{ "kernel": "Linear", "bias": 0.25 }"#)?;
//! assert!(config.active);
//! ```

use crate::rbf::{DistanceType, RbfError, RbfKernel, RbfResult};
use crate::shaping::{Interpolation, Shaping};
use crate::spatial::TwistAxis;
use serde::{Deserialize, Serialize};

/// Diagnostic level controlling which intermediate data is logged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ExposeData(u8);

impl ExposeData {
    pub const OFF: ExposeData = ExposeData(0);
    pub const MAX: u8 = 4;

    pub fn new(level: u8) -> RbfResult<Self> {
        if level > Self::MAX {
            return Err(RbfError::InvalidConfig {
                field: "expose_data".to_string(),
                message: format!("level must be in 0..={}, got {level}", Self::MAX),
            });
        }
        Ok(Self(level))
    }

    pub fn level(self) -> u8 {
        self.0
    }

    /// Poses and values matrices (levels 1 and 4).
    pub fn shows_poses(self) -> bool {
        matches!(self.0, 1 | 4)
    }

    /// Raw RBF weights before shaping (levels 2 and 4).
    pub fn shows_weights(self) -> bool {
        matches!(self.0, 2 | 4)
    }

    /// Distance, activation and weight matrices of a solve (levels 3 and 4).
    pub fn shows_matrices(self) -> bool {
        self.0 > 2
    }
}

impl TryFrom<u8> for ExposeData {
    type Error = RbfError;

    fn try_from(level: u8) -> RbfResult<Self> {
        Self::new(level)
    }
}

impl From<ExposeData> for u8 {
    fn from(value: ExposeData) -> u8 {
        value.0
    }
}

/// Configuration knobs of a weight driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    /// When false every output is written as 0 and nothing is solved.
    pub active: bool,
    /// Force a full re-solve on every evaluation.
    pub evaluate: bool,
    pub distance_type: DistanceType,
    pub kernel: RbfKernel,
    pub bias: f64,
    pub allow_negative_weights: bool,
    pub scale: f64,
    pub interpolation: Interpolation,
    pub use_interpolation: bool,
    pub twist_axis: TwistAxis,
    /// Negate the reference axis.
    pub invert_axes: bool,
    /// Driver whose pose vectors are published as draw data.
    pub driver_index: usize,
    pub expose_data: ExposeData,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            active: true,
            evaluate: false,
            distance_type: DistanceType::Euclidean,
            kernel: RbfKernel::Gaussian,
            bias: 0.0,
            allow_negative_weights: true,
            scale: 1.0,
            interpolation: Interpolation::Linear,
            use_interpolation: false,
            twist_axis: TwistAxis::X,
            invert_axes: false,
            driver_index: 0,
            expose_data: ExposeData::OFF,
        }
    }
}

impl DriverConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> RbfResult<Self> {
        let config: DriverConfig =
            serde_json::from_str(json).map_err(|e| RbfError::InvalidConfig {
                field: "json".to_string(),
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> RbfResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| RbfError::InvalidConfig {
            field: "json".to_string(),
            message: e.to_string(),
        })
    }

    pub fn validate(&self) -> RbfResult<()> {
        if !self.scale.is_finite() {
            return Err(RbfError::InvalidConfig {
                field: "scale".to_string(),
                message: format!("must be finite, got {}", self.scale),
            });
        }
        if !self.bias.is_finite() {
            return Err(RbfError::InvalidConfig {
                field: "bias".to_string(),
                message: format!("must be finite, got {}", self.bias),
            });
        }
        Ok(())
    }

    /// The shaping stage's view of this configuration.
    pub fn shaping(&self) -> Shaping {
        Shaping {
            allow_negative: self.allow_negative_weights,
            bias: self.bias,
            use_interpolation: self.use_interpolation,
            interpolation: self.interpolation,
            scale: self.scale,
        }
    }
}
