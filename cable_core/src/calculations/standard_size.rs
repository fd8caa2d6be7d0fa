//! # Standard Size Resolver
//!
//! Maps a required cross-section onto a commercial size and recomputes the
//! voltage drop the chosen size actually gives.
//!
//! ## Policy
//!
//! Always round **up**: the chosen size is the first table entry whose area
//! is at least the required area. Choosing the nearest entry instead can
//! round down (8.0 mm² against {6, 10} would pick 6) and undersize the cable,
//! so that policy is not offered.
//!
//! When the requirement exceeds the whole table the largest entry is
//! returned with `fits = false`, and `margin_mm2` then holds the deficit
//! (`required − largest`) rather than a buffer.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::{CalcError, CalcResult};
use crate::materials::StandardSize;

/// A standard size chosen for a required area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    /// Chosen table entry
    pub size: StandardSize,

    /// `chosen − required` when `fits`; `required − chosen` (deficit) otherwise
    pub margin_mm2: f64,

    /// Whether the chosen size actually covers the required area
    pub fits: bool,
}

impl Resolution {
    /// Margin with its sign restored: negative means undersized
    pub fn signed_margin_mm2(&self) -> f64 {
        if self.fits {
            self.margin_mm2
        } else {
            -self.margin_mm2
        }
    }
}

/// Round `required_area_mm2` up to the first entry of `table` that covers it.
///
/// `table` must be ascending by area.
///
/// # Example
///
/// ```rust
/// use cable_core::calculations::standard_size::resolve_standard;
/// use cable_core::catalog::Catalog;
///
/// let resolution = resolve_standard(3.5, Catalog::builtin().metric_sizes()).unwrap();
/// assert_eq!(resolution.size.area_mm2(), 4.0);
/// assert!((resolution.margin_mm2 - 0.5).abs() < 1e-9);
/// ```
pub fn resolve_standard(required_area_mm2: f64, table: &[StandardSize]) -> CalcResult<Resolution> {
    if let Some(size) = table.iter().find(|s| s.area_mm2() >= required_area_mm2) {
        return Ok(Resolution {
            margin_mm2: size.area_mm2() - required_area_mm2,
            size: size.clone(),
            fits: true,
        });
    }

    let largest = table
        .last()
        .ok_or_else(|| CalcError::invalid_catalog("sizes", "table is empty"))?;
    warn!(
        required_area_mm2,
        largest = %largest,
        "required area exceeds every standard size, falling back to largest"
    );
    Ok(Resolution {
        margin_mm2: required_area_mm2 - largest.area_mm2(),
        size: largest.clone(),
        fits: false,
    })
}

/// Voltage drop across a conductor of a given size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VoltageDrop {
    /// Drop across the conductor path (V)
    pub volts: f64,
    /// Drop as a share of system voltage (%)
    pub percent: f64,
    /// Whether `percent` stays within the requested maximum
    pub within_limit: bool,
}

/// Tolerance for comparing a recomputed drop with the requested maximum
const DROP_TOLERANCE_PERCENT: f64 = 1e-9;

/// Voltage drop for `area_mm2`.
///
/// `path_resistance_factor` is `I × ρ(T) × L × d` (V·mm²), the numerator of
/// the voltage-drop equation; the drop is that divided by the area.
pub fn actual_drop(
    area_mm2: f64,
    path_resistance_factor: f64,
    voltage_v: f64,
    max_drop_percent: f64,
) -> VoltageDrop {
    let volts = path_resistance_factor / area_mm2;
    let percent = volts / voltage_v * 100.0;
    VoltageDrop {
        volts,
        percent,
        within_limit: percent <= max_drop_percent + DROP_TOLERANCE_PERCENT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn metric() -> &'static [StandardSize] {
        Catalog::builtin().metric_sizes()
    }

    fn awg() -> &'static [StandardSize] {
        Catalog::builtin().awg_sizes()
    }

    #[test]
    fn test_round_up_metric() {
        let cases = [
            (2.5, 2.5),
            (1.4, 1.5),
            (3.5, 4.0),
            (8.0, 10.0),
            (0.1, 0.5),
            (200.0, 240.0),
        ];
        for (required, expected) in cases {
            let r = resolve_standard(required, metric()).unwrap();
            assert_eq!(r.size.area_mm2(), expected, "required {required}");
            assert!(r.fits);
            assert!(r.margin_mm2 >= 0.0);
        }
    }

    #[test]
    fn test_round_up_awg() {
        let r = resolve_standard(3.309, awg()).unwrap();
        assert_eq!(r.size.label(), Some("12"));
        assert_eq!(r.margin_mm2, 0.0);

        let r = resolve_standard(45.0, awg()).unwrap();
        assert_eq!(r.size.label(), Some("1/0"));

        let r = resolve_standard(0.5, awg()).unwrap();
        assert_eq!(r.size.label(), Some("18"));
    }

    #[test]
    fn test_exceeds_table_reports_deficit() {
        let r = resolve_standard(300.0, metric()).unwrap();
        assert_eq!(r.size.area_mm2(), 240.0);
        assert!(!r.fits);
        assert!((r.margin_mm2 - 60.0).abs() < 1e-9);
        assert!((r.signed_margin_mm2() + 60.0).abs() < 1e-9);

        let r = resolve_standard(150.0, awg()).unwrap();
        assert_eq!(r.size.label(), Some("4/0"));
        assert!(!r.fits);
    }

    #[test]
    fn test_empty_table_is_error() {
        assert!(resolve_standard(1.0, &[]).is_err());
    }

    #[test]
    fn test_actual_drop() {
        // 10 A × 0.0175 × 5 m × 1 = 0.875 V·mm²
        let drop = actual_drop(4.0, 0.875, 12.0, 3.0);
        assert!((drop.volts - 0.21875).abs() < 1e-12);
        assert!((drop.percent - 1.8229166).abs() < 1e-6);
        assert!(drop.within_limit);

        let drop = actual_drop(2.5, 0.875, 12.0, 2.0);
        assert!(!drop.within_limit);
    }

    #[test]
    fn test_drop_at_required_area_equals_limit() {
        let factor = 10.0 * 0.0175 * 5.0;
        let required = factor / (12.0 * 0.03);
        let drop = actual_drop(required, factor, 12.0, 3.0);
        assert!((drop.percent - 3.0).abs() < 1e-9);
        assert!(drop.within_limit);
    }
}
