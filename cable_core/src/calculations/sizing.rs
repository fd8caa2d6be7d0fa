//! # DC Cable Sizing
//!
//! Sizes a conductor for a low-voltage DC circuit so the voltage drop stays
//! within a limit, then resolves the result onto metric and AWG tables and
//! checks ampacity, fuse protection and insulation temperature.
//!
//! ## Method
//!
//! ```text
//! T_eff = T_ambient + ΔT_install
//! ρ     = ρ_20 × [1 + α × (T_eff − 20)]
//! A     = I × ρ × L × d / (V × p / 100)        d = 2 round trip, else 1
//! D     = 2 × √(A / π)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use cable_core::calculations::sizing::{calculate, SizingInput};
//! use cable_core::catalog::Catalog;
//! use cable_core::settings::EngineSettings;
//!
//! let input = SizingInput::new("House bank feed", 12.0, 10.0, 5.0);
//! let result = calculate(&input, &EngineSettings::default(), Catalog::builtin()).unwrap();
//!
//! assert!((result.required_area_mm2 - 2.4306).abs() < 1e-3);
//! assert_eq!(result.metric.size.area_mm2(), 2.5);
//! ```

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::calculations::ampacity::{
    ampacity, find_minimum_safe_size, recommend_fuse, AmpacityConditions, FuseRecommendation, SafeSizeSelection,
};
use crate::calculations::standard_size::{actual_drop, resolve_standard, VoltageDrop};
use crate::calculations::temperature_check::{validate_wire_temperature, TemperatureCheck, TemperatureStatus};
use crate::calculations::thermal::{effective_temperature, resistivity_at};
use crate::catalog::Catalog;
use crate::derating::InstallationMethod;
use crate::errors::{CalcError, CalcResult};
use crate::materials::{ConductorMaterial, SizeSystem, StandardSize, WireType};
use crate::settings::EngineSettings;
use crate::units::AmbientTemperature;

fn default_drop_percent() -> f64 {
    3.0
}

/// One DC circuit to size.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Bilge pump",
///   "voltage_v": 24.0,
///   "current_a": 20.0,
///   "length_m": 10.0,
///   "max_drop_percent": 5.0,
///   "round_trip": false,
///   "material": "copper",
///   "ambient": { "value": 40.0, "unit": "C" },
///   "installation": "conduit",
///   "wire_type": "flry"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizingInput {
    /// User label (e.g., "Nav lights", "Inverter feed")
    #[serde(default)]
    pub label: String,

    /// System voltage (V)
    pub voltage_v: f64,

    /// Load current (A)
    pub current_a: f64,

    /// One-way cable length (m)
    pub length_m: f64,

    /// Maximum allowed voltage drop (%)
    #[serde(default = "default_drop_percent")]
    pub max_drop_percent: f64,

    /// Count both conductors of the loop (doubles the path length)
    #[serde(default)]
    pub round_trip: bool,

    #[serde(default)]
    pub material: ConductorMaterial,

    #[serde(default)]
    pub ambient: AmbientTemperature,

    #[serde(default)]
    pub installation: InstallationMethod,

    #[serde(default)]
    pub wire_type: WireType,
}

impl SizingInput {
    /// Circuit with the usual defaults: 3% drop, one-way, copper, 20°C, in air, generic insulation.
    pub fn new(label: impl Into<String>, voltage_v: f64, current_a: f64, length_m: f64) -> Self {
        SizingInput {
            label: label.into(),
            voltage_v,
            current_a,
            length_m,
            max_drop_percent: default_drop_percent(),
            round_trip: false,
            material: ConductorMaterial::default(),
            ambient: AmbientTemperature::default(),
            installation: InstallationMethod::default(),
            wire_type: WireType::default(),
        }
    }

    /// Validate input parameters against engine limits.
    pub fn validate(&self, settings: &EngineSettings) -> CalcResult<()> {
        if !self.voltage_v.is_finite() || self.voltage_v <= 0.0 {
            return Err(CalcError::invalid_input(
                "voltage_v",
                self.voltage_v.to_string(),
                "Voltage must be positive",
            ));
        }
        if self.voltage_v > settings.max_voltage_v {
            return Err(CalcError::invalid_input(
                "voltage_v",
                self.voltage_v.to_string(),
                format!("Voltage exceeds the {} V low-voltage limit", settings.max_voltage_v),
            ));
        }
        if !self.current_a.is_finite() || self.current_a <= 0.0 {
            return Err(CalcError::invalid_input(
                "current_a",
                self.current_a.to_string(),
                "Current must be positive",
            ));
        }
        if !self.length_m.is_finite() || self.length_m <= 0.0 {
            return Err(CalcError::invalid_input(
                "length_m",
                self.length_m.to_string(),
                "Length must be positive",
            ));
        }
        if !(self.max_drop_percent > 0.0 && self.max_drop_percent <= settings.max_drop_percent) {
            return Err(CalcError::invalid_input(
                "max_drop_percent",
                self.max_drop_percent.to_string(),
                format!("Voltage drop must be between 0 and {}%", settings.max_drop_percent),
            ));
        }
        if !self.ambient.value.is_finite() {
            return Err(CalcError::invalid_input(
                "ambient",
                self.ambient.value.to_string(),
                "Ambient temperature must be a number",
            ));
        }
        Ok(())
    }

    /// Ambient temperature in Celsius
    pub fn ambient_c(&self) -> f64 {
        self.ambient.to_celsius().value()
    }

    /// Effective conductor temperature (°C)
    pub fn effective_temp_c(&self) -> f64 {
        effective_temperature(self.ambient_c(), self.installation)
    }

    /// Resistivity at the effective temperature (Ω·mm²/m)
    pub fn resistivity(&self) -> f64 {
        resistivity_at(self.material, self.effective_temp_c())
    }

    /// Path multiplier: 2 for round trip, 1 otherwise
    pub fn distance_factor(&self) -> f64 {
        if self.round_trip {
            2.0
        } else {
            1.0
        }
    }

    /// Maximum allowed drop (V)
    pub fn max_drop_v(&self) -> f64 {
        self.voltage_v * self.max_drop_percent / 100.0
    }

    /// I × ρ × L × d (V·mm²); divide by an area to get the drop
    pub fn path_resistance_factor(&self) -> f64 {
        self.current_a * self.resistivity() * self.length_m * self.distance_factor()
    }

    /// Ampacity conditions for this circuit
    pub fn ampacity_conditions(&self, settings: &EngineSettings) -> AmpacityConditions {
        AmpacityConditions {
            material: self.material,
            installation: self.installation,
            ambient_c: self.ambient_c(),
            wire_type: self.wire_type,
            caution_ratio: settings.caution_ratio,
        }
    }
}

/// Minimum cross-section (mm²) that keeps the drop within the limit.
///
/// Errors with [`CalcError::UndefinedVoltageDrop`] when the allowed drop is
/// zero or otherwise unusable, rather than returning infinity.
pub fn required_area(input: &SizingInput) -> CalcResult<f64> {
    let allowed_v = input.max_drop_v();
    if !allowed_v.is_finite() || allowed_v <= 0.0 {
        return Err(CalcError::UndefinedVoltageDrop {
            voltage_v: input.voltage_v,
            max_drop_percent: input.max_drop_percent,
        });
    }
    let area = input.path_resistance_factor() / allowed_v;
    if !area.is_finite() {
        return Err(CalcError::Internal {
            message: format!("required area is not finite ({area})"),
        });
    }
    Ok(area)
}

/// Diameter (mm) of a round conductor of `area_mm2`.
pub fn area_to_diameter(area_mm2: f64) -> f64 {
    2.0 * (area_mm2 / PI).sqrt()
}

/// Recommendation for one sizing system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeRecommendation {
    pub size: StandardSize,

    /// Buffer over the required area, or the deficit when `fits` is false (mm²)
    pub margin_mm2: f64,

    /// Whether `size` covers the required area
    pub fits: bool,

    /// Conductor diameter (mm)
    pub diameter_mm: f64,

    /// Drop with this size
    pub voltage_drop: VoltageDrop,

    /// Derated ampacity (A)
    pub ampacity_a: f64,

    /// Whether `ampacity_a` covers the load current
    pub carries_load: bool,

    pub fuse: FuseRecommendation,

    /// Copper/aluminium mass over the whole conductor path (kg)
    pub conductor_mass_kg: f64,
}

/// Complete output for one circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizingResult {
    pub label: String,
    pub ambient_temp_c: f64,
    pub effective_temp_c: f64,
    pub resistivity_ohm_mm2_per_m: f64,
    pub max_drop_v: f64,
    pub required_area_mm2: f64,
    pub required_diameter_mm: f64,
    pub metric: SizeRecommendation,
    pub awg: SizeRecommendation,
    /// Smallest metric size that carries the load with margin
    pub min_safe_metric: SafeSizeSelection,
    /// Smallest AWG size that carries the load with margin
    pub min_safe_awg: SafeSizeSelection,
    pub temperature: TemperatureCheck,
}

impl SizingResult {
    /// Everything the user should be told about, in display order.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if let Some(message) = &self.temperature.message {
            warnings.push(message.clone());
        }
        for rec in [&self.metric, &self.awg] {
            let system = rec.size.system().display_name();
            if !rec.fits {
                warnings.push(format!(
                    "{}: required area exceeds the largest standard size ({}) by {:.2} mm²; use parallel conductors",
                    system, rec.size, rec.margin_mm2
                ));
            }
            if !rec.carries_load {
                warnings.push(format!(
                    "{}: {} is rated {:.1} A after derating, below the load current",
                    system, rec.size, rec.ampacity_a
                ));
            }
            if rec.fuse.exceeds_limit {
                warnings.push(format!(
                    "{}: smallest standard fuse ({} A) exceeds the {:.1} A protection limit",
                    system, rec.fuse.rating_a, rec.fuse.limit_a
                ));
            }
        }
        for pick in [&self.min_safe_metric, &self.min_safe_awg] {
            if !pick.safe {
                warnings.push(format!(
                    "No {} size carries {:.1} A; largest available is {}",
                    pick.size.system().display_name(),
                    pick.required_a,
                    pick.size
                ));
            }
        }
        warnings
    }
}

fn recommend(
    required_mm2: f64,
    system: SizeSystem,
    input: &SizingInput,
    settings: &EngineSettings,
    catalog: &Catalog,
) -> CalcResult<SizeRecommendation> {
    let resolution = resolve_standard(required_mm2, catalog.sizes(system))?;
    let area = resolution.size.area_mm2();
    let ampacity_a = ampacity(area, &input.ampacity_conditions(settings), catalog)?;
    let fuse = recommend_fuse(ampacity_a, settings.fuse_safety_factor, catalog)?;
    let mass_g = area * input.length_m * input.distance_factor() * input.material.properties().mass_g_per_m_mm2;

    Ok(SizeRecommendation {
        diameter_mm: area_to_diameter(area),
        voltage_drop: actual_drop(
            area,
            input.path_resistance_factor(),
            input.voltage_v,
            input.max_drop_percent,
        ),
        ampacity_a,
        carries_load: ampacity_a >= input.current_a,
        fuse,
        conductor_mass_kg: mass_g / 1000.0,
        margin_mm2: resolution.margin_mm2,
        fits: resolution.fits,
        size: resolution.size,
    })
}

/// Size a DC circuit.
///
/// # Arguments
///
/// * `input` - Circuit parameters
/// * `settings` - Engine limits and safety factors
/// * `catalog` - Reference tables (usually [`Catalog::builtin`])
///
/// # Returns
///
/// * `Ok(SizingResult)` - Sizes, drops, ampacity, fuses and temperature verdict
/// * `Err(CalcError)` - Invalid input or unusable drop limit
///
/// Oversize requirements, unsafe temperatures and overloaded cables are
/// flags on the result, not errors.
pub fn calculate(input: &SizingInput, settings: &EngineSettings, catalog: &Catalog) -> CalcResult<SizingResult> {
    input.validate(settings)?;

    let ambient_temp_c = input.ambient_c();
    let effective_temp_c = input.effective_temp_c();
    let resistivity = input.resistivity();
    let required_area_mm2 = required_area(input)?;
    debug!(
        label = %input.label,
        ambient_temp_c,
        effective_temp_c,
        resistivity,
        required_area_mm2,
        "computed required area"
    );

    let metric = recommend(required_area_mm2, SizeSystem::Metric, input, settings, catalog)?;
    let awg = recommend(required_area_mm2, SizeSystem::Awg, input, settings, catalog)?;

    let conditions = input.ampacity_conditions(settings);
    let min_safe_metric = find_minimum_safe_size(
        input.current_a,
        &conditions,
        catalog.metric_sizes(),
        settings.ampacity_safety_margin,
        catalog,
    )?;
    let min_safe_awg = find_minimum_safe_size(
        input.current_a,
        &conditions,
        catalog.awg_sizes(),
        settings.ampacity_safety_margin,
        catalog,
    )?;

    let temperature = validate_wire_temperature(effective_temp_c, input.wire_type, settings.caution_ratio);
    if temperature.status != TemperatureStatus::Safe {
        warn!(
            label = %input.label,
            effective_temp_c,
            max_temp_c = temperature.max_temp_c,
            status = ?temperature.status,
            "operating temperature close to or above insulation rating"
        );
    }

    Ok(SizingResult {
        label: input.label.clone(),
        ambient_temp_c,
        effective_temp_c,
        resistivity_ohm_mm2_per_m: resistivity,
        max_drop_v: input.max_drop_v(),
        required_area_mm2,
        required_diameter_mm: area_to_diameter(required_area_mm2),
        metric,
        awg,
        min_safe_metric,
        min_safe_awg,
        temperature,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn size(input: &SizingInput) -> SizingResult {
        calculate(input, &EngineSettings::default(), Catalog::builtin()).unwrap()
    }

    #[test]
    fn test_basic_copper_12v() {
        let result = size(&SizingInput::new("", 12.0, 10.0, 5.0));
        assert_relative_eq!(result.required_area_mm2, 2.430556, epsilon = 1e-5);
        assert_relative_eq!(result.resistivity_ohm_mm2_per_m, 0.0175, epsilon = 1e-12);
        assert_relative_eq!(result.max_drop_v, 0.36, epsilon = 1e-12);
        assert_eq!(result.metric.size.area_mm2(), 2.5);
        assert_eq!(result.awg.size.label(), Some("12"));
        assert!(result.metric.voltage_drop.within_limit);
        assert_eq!(result.temperature.status, TemperatureStatus::Safe);
    }

    #[test]
    fn test_round_trip_doubles_area() {
        let mut input = SizingInput::new("", 12.0, 10.0, 5.0);
        let one_way = required_area(&input).unwrap();
        input.round_trip = true;
        let round = required_area(&input).unwrap();
        assert_relative_eq!(round, 2.0 * one_way, epsilon = 1e-12);
        assert_relative_eq!(round, 4.861111, epsilon = 1e-5);
    }

    #[test]
    fn test_aluminum_48v() {
        let mut input = SizingInput::new("", 48.0, 15.0, 20.0);
        input.material = ConductorMaterial::Aluminum;
        let result = size(&input);
        // 15 × 0.0283 × 20 / (48 × 0.03)
        assert_relative_eq!(result.required_area_mm2, 5.895833, epsilon = 1e-5);
        assert_eq!(result.metric.size.area_mm2(), 6.0);
    }

    #[test]
    fn test_conduit_raises_temperature() {
        let mut input = SizingInput::new("", 12.0, 10.0, 5.0);
        input.installation = InstallationMethod::Conduit;
        input.ambient = AmbientTemperature::celsius(40.0);
        let result = size(&input);
        assert_eq!(result.effective_temp_c, 50.0);
        // ρ(50) = 0.01956325
        assert_relative_eq!(result.required_area_mm2, 10.0 * 0.01956325 * 5.0 / 0.36, epsilon = 1e-9);
    }

    #[test]
    fn test_fahrenheit_ambient() {
        let mut input = SizingInput::new("", 12.0, 10.0, 5.0);
        input.ambient = AmbientTemperature::fahrenheit(68.0);
        let result = size(&input);
        assert_relative_eq!(result.ambient_temp_c, 20.0, epsilon = 1e-9);
        assert_relative_eq!(result.required_area_mm2, 2.430556, epsilon = 1e-5);
    }

    #[test]
    fn test_diameter() {
        assert_eq!(area_to_diameter(0.0), 0.0);
        assert_relative_eq!(area_to_diameter(1.0), 1.128379, epsilon = 1e-6);
        assert_relative_eq!(area_to_diameter(2.5), 1.784124, epsilon = 1e-6);
        assert_relative_eq!(area_to_diameter(25.0), 5.641896, epsilon = 1e-6);
    }

    #[test]
    fn test_zero_drop_is_undefined() {
        let mut input = SizingInput::new("", 12.0, 10.0, 5.0);
        input.max_drop_percent = 0.0;
        let err = required_area(&input).unwrap_err();
        assert_eq!(err.error_code(), "UNDEFINED_VOLTAGE_DROP");
        // validate rejects it before the formula runs
        let err = calculate(&input, &EngineSettings::default(), Catalog::builtin()).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_validation() {
        let settings = EngineSettings::default();
        assert!(SizingInput::new("", 51.0, 10.0, 5.0).validate(&settings).is_err());
        assert!(SizingInput::new("", 51.0, 10.0, 5.0)
            .validate(&settings.with_max_voltage(60.0))
            .is_ok());
        assert!(SizingInput::new("", 12.0, 0.0, 5.0).validate(&settings).is_err());
        assert!(SizingInput::new("", 12.0, 10.0, -1.0).validate(&settings).is_err());
        assert!(SizingInput::new("", 12.0, f64::NAN, 1.0).validate(&settings).is_err());

        let mut input = SizingInput::new("", 12.0, 10.0, 5.0);
        input.max_drop_percent = 10.5;
        let err = input.validate(&settings).unwrap_err();
        assert!(err.to_string().contains("max_drop_percent"));
    }

    #[test]
    fn test_oversize_requirement_flags() {
        // 300 A over 30 m at 12 V needs far more than 240 mm²
        let result = size(&SizingInput::new("Windlass", 12.0, 300.0, 30.0));
        assert!(!result.metric.fits);
        assert!(!result.awg.fits);
        assert_eq!(result.metric.size.area_mm2(), 240.0);
        assert!(!result.metric.voltage_drop.within_limit);
        assert!(result.warnings().iter().any(|w| w.contains("parallel conductors")));
    }

    #[test]
    fn test_recommendation_details() {
        let result = size(&SizingInput::new("", 12.0, 10.0, 5.0));
        let metric = &result.metric;
        assert_relative_eq!(metric.margin_mm2, 2.5 - 2.430556, epsilon = 1e-5);
        assert_relative_eq!(metric.diameter_mm, 1.784124, epsilon = 1e-6);
        // 20°C ambient in air: 27 A × 1.08
        assert_relative_eq!(metric.ampacity_a, 29.16, epsilon = 1e-9);
        assert!(metric.carries_load);
        assert_eq!(metric.fuse.rating_a, 20.0);
        // 2.5 mm² × 5 m × 8.96 g
        assert_relative_eq!(metric.conductor_mass_kg, 0.112, epsilon = 1e-9);
        assert_relative_eq!(metric.voltage_drop.volts, 0.875 / 2.5, epsilon = 1e-12);
    }

    #[test]
    fn test_min_safe_size_uses_current() {
        // 48 V keeps the drop-driven size small; 40 A still needs ampacity
        let result = size(&SizingInput::new("", 48.0, 40.0, 1.0));
        assert_eq!(result.metric.size.area_mm2(), 0.5);
        assert!(!result.metric.carries_load);
        // 44 A: 4 mm² = 38.88 A, 6 mm² = 49.68 A
        assert_eq!(result.min_safe_metric.size.area_mm2(), 6.0);
        assert!(result.min_safe_metric.safe);
        assert!(result.warnings().iter().any(|w| w.contains("below the load current")));
    }

    #[test]
    fn test_temperature_verdict_travels_with_result() {
        let mut input = SizingInput::new("", 12.0, 10.0, 5.0);
        input.wire_type = WireType::Pvc;
        input.installation = InstallationMethod::Isolated;
        input.ambient = AmbientTemperature::celsius(60.0);
        let result = size(&input);
        assert_eq!(result.temperature.status, TemperatureStatus::Unsafe);
        assert!(result.metric.fits);
        assert!(result.warnings()[0].starts_with("WARNING"));
    }

    #[test]
    fn test_input_json_defaults() {
        let input: SizingInput =
            serde_json::from_str(r#"{"voltage_v": 24.0, "current_a": 20.0, "length_m": 10.0}"#).unwrap();
        assert_eq!(input.max_drop_percent, 3.0);
        assert!(!input.round_trip);
        assert_eq!(input.material, ConductorMaterial::Copper);
        assert_eq!(input.installation, InstallationMethod::InAir);
        assert_eq!(input.wire_type, WireType::Generic);
        assert_eq!(input.ambient_c(), 20.0);
    }
}
