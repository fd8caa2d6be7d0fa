//! Insulation (Wire) Types
//!
//! Maximum continuous operating temperature for common automotive and
//! building-wire insulations.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Wire insulation type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum WireType {
    /// Automotive thin-wall PVC (FLRY-A/B)
    Flry,
    FlryA,
    FlryB,
    Thhn,
    Thwn,
    Xlpe,
    Pvc,
    #[serde(alias = "silicon")]
    Silicone,
    #[default]
    Generic,
}

impl WireType {
    /// All wire types in selection order
    pub const ALL: [WireType; 9] = [
        WireType::Flry,
        WireType::FlryA,
        WireType::FlryB,
        WireType::Thhn,
        WireType::Thwn,
        WireType::Xlpe,
        WireType::Pvc,
        WireType::Silicone,
        WireType::Generic,
    ];

    /// Lookup key
    pub fn key(&self) -> &'static str {
        match self {
            WireType::Flry => "flry",
            WireType::FlryA => "flry-a",
            WireType::FlryB => "flry-b",
            WireType::Thhn => "thhn",
            WireType::Thwn => "thwn",
            WireType::Xlpe => "xlpe",
            WireType::Pvc => "pvc",
            WireType::Silicone => "silicone",
            WireType::Generic => "generic",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            WireType::Flry => "FLRY",
            WireType::FlryA => "FLRY-A",
            WireType::FlryB => "FLRY-B",
            WireType::Thhn => "THHN",
            WireType::Thwn => "THWN",
            WireType::Xlpe => "XLPE",
            WireType::Pvc => "PVC",
            WireType::Silicone => "Silicone",
            WireType::Generic => "Generic",
        }
    }

    /// Maximum rated conductor temperature (°C)
    pub fn max_temp_c(&self) -> f64 {
        match self {
            WireType::Flry | WireType::FlryA | WireType::FlryB => 105.0,
            WireType::Thhn | WireType::Xlpe | WireType::Generic => 90.0,
            WireType::Thwn => 75.0,
            WireType::Pvc => 70.0,
            WireType::Silicone => 200.0,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            WireType::Flry => "Automotive thin-wall PVC (FLRY-A/B), stranded copper",
            WireType::FlryA => "Automotive thin-wall PVC, flexible stranded",
            WireType::FlryB => "Automotive thin-wall PVC, symmetrical stranded",
            WireType::Thhn => "Thermoplastic, high heat, nylon coated",
            WireType::Thwn => "Thermoplastic, heat/water resistant, nylon coated",
            WireType::Xlpe => "Cross-linked polyethylene insulation",
            WireType::Pvc => "Standard PVC insulation",
            WireType::Silicone => "Silicone rubber insulation, high temperature",
            WireType::Generic => "Generic wire type (assumes 90°C rating)",
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        let normalized = s.trim().to_lowercase().replace([' ', '_'], "-");
        match normalized.as_str() {
            "flry" => Ok(WireType::Flry),
            "flry-a" | "flrya" => Ok(WireType::FlryA),
            "flry-b" | "flryb" => Ok(WireType::FlryB),
            "thhn" => Ok(WireType::Thhn),
            "thwn" => Ok(WireType::Thwn),
            "xlpe" => Ok(WireType::Xlpe),
            "pvc" => Ok(WireType::Pvc),
            "silicon" | "silicone" => Ok(WireType::Silicone),
            "generic" => Ok(WireType::Generic),
            _ => {
                let keys: Vec<&str> = WireType::ALL.iter().map(|w| w.key()).collect();
                Err(CalcError::unknown_key("wire type", s, &keys))
            }
        }
    }
}

impl std::fmt::Display for WireType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({:.0}°C max)", self.display_name(), self.max_temp_c())
    }
}
