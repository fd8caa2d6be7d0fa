//! Standard Cable Sizes
//!
//! Commercial conductor cross-sections in the two sizing systems the engine
//! resolves against: metric (IEC 60228 nominal mm²) and American Wire Gauge.
//!
//! ## Ordering
//!
//! Both tables are listed ascending by area. The resolver and the safe-size
//! search scan front to back and stop at the first fit, so the ordering is
//! checked when a [`Catalog`](crate::catalog::Catalog) is built.

use serde::{Deserialize, Serialize};

/// Metric nominal sizes (mm²)
pub const METRIC_SIZES_MM2: [f64; 18] = [
    0.5, 0.75, 1.0, 1.5, 2.5, 4.0, 6.0, 10.0, 16.0, 25.0, 35.0, 50.0, 70.0, 95.0, 120.0, 150.0,
    185.0, 240.0,
];

/// AWG label and equivalent area (mm²)
pub const AWG_SIZES: [(&str, f64); 14] = [
    ("18", 0.823),
    ("16", 1.309),
    ("14", 2.081),
    ("12", 3.309),
    ("10", 5.261),
    ("8", 8.367),
    ("6", 13.30),
    ("4", 21.15),
    ("2", 33.62),
    ("1", 42.41),
    ("1/0", 53.49),
    ("2/0", 67.43),
    ("3/0", 85.01),
    ("4/0", 107.2),
];

/// Sizing system a table belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SizeSystem {
    Metric,
    Awg,
}

impl SizeSystem {
    pub fn display_name(&self) -> &'static str {
        match self {
            SizeSystem::Metric => "Metric",
            SizeSystem::Awg => "AWG",
        }
    }
}

/// One entry of a standard size table.
///
/// ## JSON Serialization
///
/// ```json
/// { "system": "Metric", "area_mm2": 4.0 }
/// { "system": "Awg", "label": "12", "area_mm2": 3.309 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "system")]
pub enum StandardSize {
    Metric { area_mm2: f64 },
    Awg { label: String, area_mm2: f64 },
}

impl StandardSize {
    pub fn metric(area_mm2: f64) -> Self {
        StandardSize::Metric { area_mm2 }
    }

    pub fn awg(label: impl Into<String>, area_mm2: f64) -> Self {
        StandardSize::Awg {
            label: label.into(),
            area_mm2,
        }
    }

    /// Conductor cross-section (mm²)
    pub fn area_mm2(&self) -> f64 {
        match self {
            StandardSize::Metric { area_mm2 } | StandardSize::Awg { area_mm2, .. } => *area_mm2,
        }
    }

    pub fn system(&self) -> SizeSystem {
        match self {
            StandardSize::Metric { .. } => SizeSystem::Metric,
            StandardSize::Awg { .. } => SizeSystem::Awg,
        }
    }

    /// AWG label, if this is an AWG entry
    pub fn label(&self) -> Option<&str> {
        match self {
            StandardSize::Metric { .. } => None,
            StandardSize::Awg { label, .. } => Some(label.as_str()),
        }
    }
}

impl std::fmt::Display for StandardSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StandardSize::Metric { area_mm2 } => write!(f, "{:.2} mm²", area_mm2),
            StandardSize::Awg { label, area_mm2 } => write!(f, "AWG {} ({:.2} mm²)", label, area_mm2),
        }
    }
}

/// Build the metric table entries
pub fn metric_table() -> Vec<StandardSize> {
    METRIC_SIZES_MM2.iter().map(|&a| StandardSize::metric(a)).collect()
}

/// Build the AWG table entries
pub fn awg_table() -> Vec<StandardSize> {
    AWG_SIZES
        .iter()
        .map(|&(label, area)| StandardSize::awg(label, area))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_ascending() {
        assert!(METRIC_SIZES_MM2.windows(2).all(|w| w[0] < w[1]));
        assert!(AWG_SIZES.windows(2).all(|w| w[0].1 < w[1].1));
    }

    #[test]
    fn test_accessors() {
        let awg = StandardSize::awg("1/0", 53.49);
        assert_eq!(awg.area_mm2(), 53.49);
        assert_eq!(awg.label(), Some("1/0"));
        assert_eq!(awg.system(), SizeSystem::Awg);
        assert_eq!(StandardSize::metric(4.0).label(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(StandardSize::metric(2.5).to_string(), "2.50 mm²");
        assert_eq!(StandardSize::awg("12", 3.309).to_string(), "AWG 12 (3.31 mm²)");
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&StandardSize::awg("12", 3.309)).unwrap();
        assert_eq!(json, r#"{"system":"Awg","label":"12","area_mm2":3.309}"#);
        let parsed: StandardSize = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, StandardSize::awg("12", 3.309));
    }
}
