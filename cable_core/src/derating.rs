//! # Derating Factors
//!
//! Installation and temperature adjustments applied to a conductor's base
//! current rating.
//!
//! ## Overview
//!
//! A cable's continuous current rating is tabulated for a single conductor in
//! free air at 30 °C. The derated ampacity multiplies that base value by each
//! applicable factor, in this order:
//!
//! ```text
//! I' = I_base × k_material × k_temp(T_ambient) × k_install × k_thermal(T_eff)
//! ```
//!
//! | Factor     | Description                         | Typical Values |
//! |------------|-------------------------------------|----------------|
//! | k_material | Conductivity relative to copper     | 0.61 - 1.0     |
//! | k_temp     | Ambient temperature (interpolated)  | 0.41 - 1.15    |
//! | k_install  | Installation method                 | 0.70 - 1.0     |
//! | k_thermal  | Proximity to insulation rating      | 0.5 - 1.0      |
//!
//! ## Reference
//!
//! Table values follow the automotive wiring practice of ISO 6722 / SAE J1128
//! and are reproduced as data, not derived.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// How the cable is run, which governs how well it sheds heat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum InstallationMethod {
    /// Free air: good cooling, no temperature rise
    #[default]
    #[serde(rename = "air")]
    InAir,

    /// Enclosed in conduit: +10 °C
    #[serde(rename = "conduit")]
    Conduit,

    /// Thermally isolated (insulated wall, bundled loom): +20 °C
    #[serde(rename = "isolated")]
    Isolated,
}

impl InstallationMethod {
    /// All installation methods, best cooling first
    pub const ALL: [InstallationMethod; 3] = [
        InstallationMethod::InAir,
        InstallationMethod::Conduit,
        InstallationMethod::Isolated,
    ];

    /// Temperature rise above ambient (°C)
    pub fn temp_adjustment_c(&self) -> f64 {
        match self {
            InstallationMethod::InAir => 0.0,
            InstallationMethod::Conduit => 10.0,
            InstallationMethod::Isolated => 20.0,
        }
    }

    /// Ampacity derating factor k_install
    pub fn ampacity_factor(&self) -> f64 {
        match self {
            InstallationMethod::InAir => 1.0,
            InstallationMethod::Conduit => 0.8,
            InstallationMethod::Isolated => 0.7,
        }
    }

    /// Lookup key
    pub fn key(&self) -> &'static str {
        match self {
            InstallationMethod::InAir => "air",
            InstallationMethod::Conduit => "conduit",
            InstallationMethod::Isolated => "isolated",
        }
    }

    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            InstallationMethod::InAir => "In air",
            InstallationMethod::Conduit => "In conduit",
            InstallationMethod::Isolated => "Isolated/Insulated",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            InstallationMethod::InAir => "Best cooling, minimal temperature rise",
            InstallationMethod::Conduit => "Reduced cooling, +10°C adjustment",
            InstallationMethod::Isolated => "Poor cooling, +20°C adjustment",
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.trim().to_lowercase().replace([' ', '_'], "-").as_str() {
            "air" | "in-air" | "free-air" => Ok(InstallationMethod::InAir),
            "conduit" | "in-conduit" => Ok(InstallationMethod::Conduit),
            "isolated" | "insulated" => Ok(InstallationMethod::Isolated),
            _ => Err(CalcError::unknown_key(
                "installation method",
                s,
                &["air", "conduit", "isolated"],
            )),
        }
    }
}

impl std::fmt::Display for InstallationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A `(x, y)` breakpoint in a piecewise-linear table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Breakpoint {
    pub x: f64,
    pub y: f64,
}

impl Breakpoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Breakpoint { x, y }
    }
}

/// Linear interpolation in an ascending table, clamped to the end values.
///
/// Outside the table's range the nearest endpoint's `y` is returned rather
/// than extending the first or last segment. An empty table yields 1.0.
pub fn interpolate_clamped(table: &[Breakpoint], x: f64) -> f64 {
    let (first, last) = match (table.first(), table.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return 1.0,
    };
    if x <= first.x {
        return first.y;
    }
    if x >= last.x {
        return last.y;
    }
    for pair in table.windows(2) {
        let (lo, hi) = (pair[0], pair[1]);
        if x <= hi.x {
            let t = (x - lo.x) / (hi.x - lo.x);
            return lo.y + t * (hi.y - lo.y);
        }
    }
    last.y
}

/// Thermal penalty k_thermal for running close to the insulation rating.
///
/// 1.0 up to `threshold_ratio × max_temp_c`; from there it falls linearly to
/// 0.5 at the rating and stays at 0.5 beyond it.
pub fn thermal_penalty_factor(effective_temp_c: f64, max_temp_c: f64, threshold_ratio: f64) -> f64 {
    let threshold = max_temp_c * threshold_ratio;
    if effective_temp_c <= threshold {
        return 1.0;
    }
    let span = max_temp_c - threshold;
    if span <= 0.0 {
        return 0.5;
    }
    let progress = (effective_temp_c - threshold) / span;
    (1.0 - 0.5 * progress).max(0.5)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: [Breakpoint; 3] = [
        Breakpoint::new(10.0, 1.2),
        Breakpoint::new(30.0, 1.0),
        Breakpoint::new(50.0, 0.6),
    ];

    #[test]
    fn test_installation_values() {
        assert_eq!(InstallationMethod::InAir.temp_adjustment_c(), 0.0);
        assert_eq!(InstallationMethod::Conduit.temp_adjustment_c(), 10.0);
        assert_eq!(InstallationMethod::Isolated.temp_adjustment_c(), 20.0);
    }

    #[test]
    fn test_installation_monotonic() {
        for pair in InstallationMethod::ALL.windows(2) {
            assert!(pair[0].temp_adjustment_c() <= pair[1].temp_adjustment_c());
            assert!(pair[0].ampacity_factor() >= pair[1].ampacity_factor());
        }
    }

    #[test]
    fn test_installation_parse_and_serde() {
        assert_eq!(
            InstallationMethod::from_str_flexible("In Air").unwrap(),
            InstallationMethod::InAir
        );
        assert!(InstallationMethod::from_str_flexible("buried").is_err());
        let json = serde_json::to_string(&InstallationMethod::Conduit).unwrap();
        assert_eq!(json, "\"conduit\"");
    }

    #[test]
    fn test_interpolation_inside() {
        assert!((interpolate_clamped(&TABLE, 20.0) - 1.1).abs() < 1e-12);
        assert!((interpolate_clamped(&TABLE, 40.0) - 0.8).abs() < 1e-12);
        assert_eq!(interpolate_clamped(&TABLE, 30.0), 1.0);
    }

    #[test]
    fn test_interpolation_clamps() {
        assert_eq!(interpolate_clamped(&TABLE, -20.0), 1.2);
        assert_eq!(interpolate_clamped(&TABLE, 120.0), 0.6);
        assert_eq!(interpolate_clamped(&[], 5.0), 1.0);
    }

    #[test]
    fn test_thermal_penalty() {
        // 90°C rating, threshold 81°C
        assert_eq!(thermal_penalty_factor(80.0, 90.0, 0.9), 1.0);
        assert!((thermal_penalty_factor(85.5, 90.0, 0.9) - 0.75).abs() < 1e-9);
        assert!((thermal_penalty_factor(90.0, 90.0, 0.9) - 0.5).abs() < 1e-9);
        assert_eq!(thermal_penalty_factor(150.0, 90.0, 0.9), 0.5);
    }
}
