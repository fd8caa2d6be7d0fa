//! # Engine Settings
//!
//! Tunable limits and safety factors. Defaults reproduce the values the
//! calculator has always shipped with; schedules and the CLI may override
//! them (for example raising `max_voltage_v` to 60 V for telecom plant).

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Limits and safety factors applied by the sizing engine.
///
/// ## JSON Example
///
/// ```json
/// {
///   "max_voltage_v": 50.0,
///   "default_drop_percent": 3.0,
///   "max_drop_percent": 10.0,
///   "fuse_safety_factor": 0.85,
///   "ampacity_safety_margin": 1.1,
///   "caution_ratio": 0.9
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Highest accepted system voltage (V)
    pub max_voltage_v: f64,

    /// Voltage drop used when the caller does not give one (%)
    pub default_drop_percent: f64,

    /// Highest accepted voltage drop (%)
    pub max_drop_percent: f64,

    /// Fuse must not exceed `ampacity × fuse_safety_factor`
    pub fuse_safety_factor: f64,

    /// Minimum safe size must carry `current × ampacity_safety_margin`
    pub ampacity_safety_margin: f64,

    /// Fraction of the insulation rating above which operation is flagged
    pub caution_ratio: f64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            max_voltage_v: 50.0,
            default_drop_percent: 3.0,
            max_drop_percent: 10.0,
            fuse_safety_factor: 0.85,
            ampacity_safety_margin: 1.1,
            caution_ratio: 0.9,
        }
    }
}

impl EngineSettings {
    /// Override the voltage ceiling
    pub fn with_max_voltage(mut self, max_voltage_v: f64) -> Self {
        self.max_voltage_v = max_voltage_v;
        self
    }

    /// Validate settings.
    pub fn validate(&self) -> CalcResult<()> {
        let positive = [
            ("max_voltage_v", self.max_voltage_v),
            ("max_drop_percent", self.max_drop_percent),
            ("ampacity_safety_margin", self.ampacity_safety_margin),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(CalcError::invalid_input(field, value.to_string(), "Must be a positive number"));
            }
        }
        if !(self.default_drop_percent > 0.0 && self.default_drop_percent <= self.max_drop_percent) {
            return Err(CalcError::invalid_input(
                "default_drop_percent",
                self.default_drop_percent.to_string(),
                format!("Must be between 0 and {}%", self.max_drop_percent),
            ));
        }
        let fractions = [
            ("fuse_safety_factor", self.fuse_safety_factor),
            ("caution_ratio", self.caution_ratio),
        ];
        for (field, value) in fractions {
            if !(value > 0.0 && value <= 1.0) {
                return Err(CalcError::invalid_input(field, value.to_string(), "Must be in (0, 1]"));
            }
        }
        Ok(())
    }
}
