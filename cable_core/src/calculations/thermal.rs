//! # Thermal Model
//!
//! Operating temperature of the conductor and its effect on resistivity.
//!
//! ```text
//! T_eff = T_ambient + ΔT_install
//! ρ(T)  = ρ_20 × [1 + α × (T − 20)]
//! ```
//!
//! Resistivity is not clamped: far below the reference temperature it keeps
//! falling linearly. That is outside the intended 0-200 °C band but is left
//! to the caller to reject.

use crate::derating::InstallationMethod;
use crate::materials::{ConductorMaterial, REFERENCE_TEMP_C};

/// Effective operating temperature (°C) for an installation method.
pub fn effective_temperature(ambient_c: f64, installation: InstallationMethod) -> f64 {
    ambient_c + installation.temp_adjustment_c()
}

/// Resistivity (Ω·mm²/m) of `material` at `temp_c`.
///
/// # Example
///
/// ```rust
/// use cable_core::calculations::thermal::resistivity_at;
/// use cable_core::materials::ConductorMaterial;
///
/// let rho = resistivity_at(ConductorMaterial::Copper, 50.0);
/// assert!((rho - 0.01956325).abs() < 1e-9);
/// ```
pub fn resistivity_at(material: ConductorMaterial, temp_c: f64) -> f64 {
    let props = material.properties();
    props.resistivity_20c * (1.0 + props.temp_coefficient * (temp_c - REFERENCE_TEMP_C))
}
