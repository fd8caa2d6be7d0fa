//! Conductor Materials
//!
//! Electrical and physical constants for the conductor metals the engine
//! supports. Resistivity values are published at 20 °C, which is also the
//! reference temperature used for temperature compensation.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Reference temperature for the tabulated resistivities (°C)
pub const REFERENCE_TEMP_C: f64 = 20.0;

/// Conductor metal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ConductorMaterial {
    #[default]
    Copper,
    Aluminum,
}

/// Constants for one conductor metal
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConductorProperties {
    /// Display name
    pub name: &'static str,
    /// Resistivity at 20 °C (Ω·mm²/m)
    pub resistivity_20c: f64,
    /// Temperature coefficient of resistance (per °C)
    pub temp_coefficient: f64,
    /// Conductor mass per metre per mm² of cross-section (g/m·mm²)
    pub mass_g_per_m_mm2: f64,
    /// Current-carrying capacity relative to copper of the same area
    pub ampacity_factor: f64,
}

impl ConductorMaterial {
    /// All materials for UI selection
    pub const ALL: [ConductorMaterial; 2] = [ConductorMaterial::Copper, ConductorMaterial::Aluminum];

    /// Lookup key ("copper", "aluminum")
    pub fn key(&self) -> &'static str {
        match self {
            ConductorMaterial::Copper => "copper",
            ConductorMaterial::Aluminum => "aluminum",
        }
    }

    pub fn properties(&self) -> ConductorProperties {
        match self {
            ConductorMaterial::Copper => ConductorProperties {
                name: "Copper",
                resistivity_20c: 0.0175,
                temp_coefficient: 0.00393,
                mass_g_per_m_mm2: 8.96,
                ampacity_factor: 1.0,
            },
            ConductorMaterial::Aluminum => ConductorProperties {
                name: "Aluminum",
                resistivity_20c: 0.0283,
                temp_coefficient: 0.00403,
                mass_g_per_m_mm2: 2.70,
                ampacity_factor: 0.61,
            },
        }
    }

    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        self.properties().name
    }

    /// Short description for selection lists
    pub fn description(&self) -> &'static str {
        match self {
            ConductorMaterial::Copper => "Lower resistance, better conductivity",
            ConductorMaterial::Aluminum => "Higher resistance, lighter weight",
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "copper" | "cu" => Ok(ConductorMaterial::Copper),
            "aluminum" | "aluminium" | "al" => Ok(ConductorMaterial::Aluminum),
            _ => Err(CalcError::unknown_key("material", s, &["copper", "aluminum"])),
        }
    }
}

impl std::fmt::Display for ConductorMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
