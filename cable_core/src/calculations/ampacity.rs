//! # Ampacity & Fuse Advisor
//!
//! Derated current-carrying capacity of a conductor, the fuse that protects
//! it, and the smallest cable that carries a given load.
//!
//! ## Derating Order
//!
//! ```text
//! I' = I_base(A) × k_material × k_temp(T_ambient) × k_install × k_thermal(T_eff)
//! ```
//!
//! `I_base` comes from the smallest base-table entry at or above the area
//! (linear extrapolation along the last segment past the table). `k_temp` is
//! interpolated in the derating table and clamped at its ends. See
//! [`crate::derating`] for the factor tables.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::calculations::thermal::effective_temperature;
use crate::catalog::Catalog;
use crate::derating::{interpolate_clamped, thermal_penalty_factor, Breakpoint, InstallationMethod};
use crate::errors::{CalcError, CalcResult};
use crate::materials::{ConductorMaterial, StandardSize, WireType};

/// Conditions a conductor operates under.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmpacityConditions {
    pub material: ConductorMaterial,
    pub installation: InstallationMethod,
    /// Ambient temperature (°C)
    pub ambient_c: f64,
    pub wire_type: WireType,
    /// Fraction of the insulation rating where the thermal penalty starts
    pub caution_ratio: f64,
}

impl AmpacityConditions {
    pub fn new(
        material: ConductorMaterial,
        installation: InstallationMethod,
        ambient_c: f64,
        wire_type: WireType,
    ) -> Self {
        AmpacityConditions {
            material,
            installation,
            ambient_c,
            wire_type,
            caution_ratio: 0.9,
        }
    }

    /// Effective operating temperature (°C)
    pub fn effective_temp_c(&self) -> f64 {
        effective_temperature(self.ambient_c, self.installation)
    }
}

/// Base (un-derated) rating for `area_mm2` from an ascending table.
fn base_rating(area_mm2: f64, table: &[Breakpoint]) -> CalcResult<f64> {
    if let Some(entry) = table.iter().find(|b| b.x >= area_mm2) {
        return Ok(entry.y);
    }
    match table {
        [.., lo, hi] => {
            let slope = (hi.y - lo.y) / (hi.x - lo.x);
            Ok(hi.y + slope * (area_mm2 - hi.x))
        }
        [only] => Ok(only.y * area_mm2 / only.x),
        [] => Err(CalcError::invalid_catalog("base_ampacity", "table is empty")),
    }
}

/// Derated ampacity (A) of a conductor of `area_mm2` under `conditions`.
///
/// # Example
///
/// ```rust
/// use cable_core::calculations::ampacity::{ampacity, AmpacityConditions};
/// use cable_core::catalog::Catalog;
/// use cable_core::derating::InstallationMethod;
/// use cable_core::materials::{ConductorMaterial, WireType};
///
/// let conditions = AmpacityConditions::new(
///     ConductorMaterial::Copper,
///     InstallationMethod::InAir,
///     30.0,
///     WireType::Generic,
/// );
/// let amps = ampacity(4.0, &conditions, Catalog::builtin()).unwrap();
/// assert!((amps - 36.0).abs() < 1e-9);
/// ```
pub fn ampacity(area_mm2: f64, conditions: &AmpacityConditions, catalog: &Catalog) -> CalcResult<f64> {
    let base = base_rating(area_mm2, catalog.base_ampacity())?;
    let k_material = conditions.material.properties().ampacity_factor;
    let k_temp = interpolate_clamped(catalog.temperature_derating(), conditions.ambient_c);
    let k_install = conditions.installation.ampacity_factor();
    let k_thermal = thermal_penalty_factor(
        conditions.effective_temp_c(),
        conditions.wire_type.max_temp_c(),
        conditions.caution_ratio,
    );
    Ok(base * k_material * k_temp * k_install * k_thermal)
}

/// Fuse chosen to protect a conductor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FuseRecommendation {
    /// Standard fuse rating (A)
    pub rating_a: f64,
    /// Highest acceptable rating, `ampacity × safety_factor` (A)
    pub limit_a: f64,
    /// True when even the smallest standard fuse is above `limit_a`
    pub exceeds_limit: bool,
}

/// Largest standard fuse not above `ampacity_a × safety_factor`.
///
/// Never returns "no fuse": when nothing fits, the smallest standard rating
/// is returned with `exceeds_limit` set.
pub fn recommend_fuse(ampacity_a: f64, safety_factor: f64, catalog: &Catalog) -> CalcResult<FuseRecommendation> {
    let ratings = catalog.fuse_ratings_a();
    let limit_a = ampacity_a * safety_factor;

    match ratings.iter().rev().copied().find(|&rating| rating <= limit_a) {
        Some(rating_a) => Ok(FuseRecommendation {
            rating_a,
            limit_a,
            exceeds_limit: false,
        }),
        None => {
            let smallest = ratings
                .first()
                .copied()
                .ok_or_else(|| CalcError::invalid_catalog("fuse_ratings_a", "table is empty"))?;
            Ok(FuseRecommendation {
                rating_a: smallest,
                limit_a,
                exceeds_limit: true,
            })
        }
    }
}

/// Smallest cable that carries a load with margin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafeSizeSelection {
    pub size: StandardSize,
    /// Derated ampacity of `size` (A)
    pub ampacity_a: f64,
    /// Load current × safety margin (A)
    pub required_a: f64,
    /// False when no size qualified and the largest was returned instead
    pub safe: bool,
}

/// First size in `table` whose derated ampacity reaches
/// `required_current_a × safety_margin`.
///
/// Falls back to the largest size, flagged unsafe, if none qualifies.
pub fn find_minimum_safe_size(
    required_current_a: f64,
    conditions: &AmpacityConditions,
    table: &[StandardSize],
    safety_margin: f64,
    catalog: &Catalog,
) -> CalcResult<SafeSizeSelection> {
    let required_a = required_current_a * safety_margin;

    for size in table {
        let ampacity_a = ampacity(size.area_mm2(), conditions, catalog)?;
        if ampacity_a >= required_a {
            return Ok(SafeSizeSelection {
                size: size.clone(),
                ampacity_a,
                required_a,
                safe: true,
            });
        }
    }

    let largest = table
        .last()
        .ok_or_else(|| CalcError::invalid_catalog("sizes", "table is empty"))?;
    let ampacity_a = ampacity(largest.area_mm2(), conditions, catalog)?;
    warn!(
        required_a,
        largest = %largest,
        ampacity_a,
        "no standard size carries the load, falling back to largest"
    );
    Ok(SafeSizeSelection {
        size: largest.clone(),
        ampacity_a,
        required_a,
        safe: false,
    })
}
