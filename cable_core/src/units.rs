//! # Unit Types
//!
//! Type-safe wrappers for the temperature scales accepted at the engine
//! boundary. The engine itself works in SI-style units throughout:
//! - Voltage: volts (V)
//! - Current: amperes (A)
//! - Length: metres (m)
//! - Area: square millimetres (mm²)
//! - Resistivity: Ω·mm²/m
//! - Temperature: degrees Celsius (°C)
//!
//! Callers may collect ambient temperature in Fahrenheit; it is converted
//! once, with `C = (F − 32) × 5/9`, before any calculation runs.
//!
//! ## Example
//!
//! ```rust
//! use cable_core::units::{Celsius, Fahrenheit};
//!
//! let ambient: Celsius = Fahrenheit(212.0).into();
//! assert!((ambient.0 - 100.0).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

use crate::errors::{CalcError, CalcResult};

/// Temperature in degrees Celsius
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Celsius(pub f64);

/// Temperature in degrees Fahrenheit
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fahrenheit(pub f64);

impl From<Fahrenheit> for Celsius {
    fn from(f: Fahrenheit) -> Self {
        Celsius((f.0 - 32.0) * 5.0 / 9.0)
    }
}

impl From<Celsius> for Fahrenheit {
    fn from(c: Celsius) -> Self {
        Fahrenheit(c.0 * 9.0 / 5.0 + 32.0)
    }
}

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add<f64> for $type {
            type Output = Self;
            fn add(self, rhs: f64) -> Self::Output {
                Self(self.0 + rhs)
            }
        }

        impl Sub for $type {
            type Output = f64;
            fn sub(self, rhs: Self) -> Self::Output {
                self.0 - rhs.0
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }
        }
    };
}

impl_arithmetic!(Celsius);
impl_arithmetic!(Fahrenheit);

/// Scale an ambient temperature reading was taken in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TemperatureUnit {
    #[default]
    #[serde(rename = "C")]
    Celsius,
    #[serde(rename = "F")]
    Fahrenheit,
}

impl TemperatureUnit {
    /// Short symbol used in reports ("C" or "F")
    pub fn symbol(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "C",
            TemperatureUnit::Fahrenheit => "F",
        }
    }

    /// Parse "C"/"F" (any case, optional degree sign or full name)
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.trim().trim_start_matches('°').to_uppercase().as_str() {
            "C" | "CELSIUS" => Ok(TemperatureUnit::Celsius),
            "F" | "FAHRENHEIT" => Ok(TemperatureUnit::Fahrenheit),
            _ => Err(CalcError::unknown_key("temperature unit", s, &["C", "F"])),
        }
    }
}

/// An ambient temperature reading together with its scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmbientTemperature {
    /// Reading as entered by the user
    pub value: f64,
    /// Scale of `value`
    #[serde(default)]
    pub unit: TemperatureUnit,
}

impl AmbientTemperature {
    pub fn celsius(value: f64) -> Self {
        AmbientTemperature {
            value,
            unit: TemperatureUnit::Celsius,
        }
    }

    pub fn fahrenheit(value: f64) -> Self {
        AmbientTemperature {
            value,
            unit: TemperatureUnit::Fahrenheit,
        }
    }

    /// The reading converted to Celsius
    pub fn to_celsius(&self) -> Celsius {
        match self.unit {
            TemperatureUnit::Celsius => Celsius(self.value),
            TemperatureUnit::Fahrenheit => Fahrenheit(self.value).into(),
        }
    }
}

impl Default for AmbientTemperature {
    fn default() -> Self {
        AmbientTemperature::celsius(20.0)
    }
}
