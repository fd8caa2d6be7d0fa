//! # Catalog
//!
//! The immutable reference tables every sizing call reads: standard size
//! tables, the base ampacity table, the ambient temperature derating table
//! and the standard fuse ratings.
//!
//! The built-in catalog is constructed once per process and only borrowed
//! afterwards, so concurrent calculations share it without locking. Custom
//! catalogs go through [`Catalog::new`], which checks the ordering invariants
//! the resolver relies on.
//!
//! ## Example
//!
//! ```rust
//! use cable_core::catalog::Catalog;
//!
//! let catalog = Catalog::builtin();
//! assert_eq!(catalog.metric_sizes().first().unwrap().area_mm2(), 0.5);
//! assert_eq!(catalog.fuse_ratings_a().last(), Some(&500.0));
//! ```

use std::cmp::Ordering;

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::derating::Breakpoint;
use crate::errors::{CalcError, CalcResult};
use crate::materials::cable_sizes::{awg_table, metric_table};
use crate::materials::{SizeSystem, StandardSize};

/// Base ampacity, copper, single conductor in free air at 30 °C: (mm², A)
pub const BASE_AMPACITY: [Breakpoint; 18] = [
    Breakpoint::new(0.5, 9.0),
    Breakpoint::new(0.75, 12.0),
    Breakpoint::new(1.0, 15.0),
    Breakpoint::new(1.5, 20.0),
    Breakpoint::new(2.5, 27.0),
    Breakpoint::new(4.0, 36.0),
    Breakpoint::new(6.0, 46.0),
    Breakpoint::new(10.0, 63.0),
    Breakpoint::new(16.0, 85.0),
    Breakpoint::new(25.0, 112.0),
    Breakpoint::new(35.0, 138.0),
    Breakpoint::new(50.0, 168.0),
    Breakpoint::new(70.0, 213.0),
    Breakpoint::new(95.0, 258.0),
    Breakpoint::new(120.0, 299.0),
    Breakpoint::new(150.0, 344.0),
    Breakpoint::new(185.0, 392.0),
    Breakpoint::new(240.0, 461.0),
];

/// Ambient temperature derating: (°C, factor)
pub const TEMPERATURE_DERATING: [Breakpoint; 8] = [
    Breakpoint::new(10.0, 1.15),
    Breakpoint::new(20.0, 1.08),
    Breakpoint::new(30.0, 1.00),
    Breakpoint::new(40.0, 0.91),
    Breakpoint::new(50.0, 0.82),
    Breakpoint::new(60.0, 0.71),
    Breakpoint::new(70.0, 0.58),
    Breakpoint::new(80.0, 0.41),
];

/// Standard fuse ratings (A)
pub const FUSE_RATINGS_A: [f64; 27] = [
    1.0, 2.0, 3.0, 5.0, 7.5, 10.0, 15.0, 20.0, 25.0, 30.0, 35.0, 40.0, 50.0, 60.0, 70.0, 80.0,
    100.0, 125.0, 150.0, 175.0, 200.0, 225.0, 250.0, 300.0, 350.0, 400.0, 500.0,
];

static BUILTIN: Lazy<Catalog> = Lazy::new(|| Catalog {
    metric_sizes: metric_table(),
    awg_sizes: awg_table(),
    base_ampacity: BASE_AMPACITY.to_vec(),
    temperature_derating: TEMPERATURE_DERATING.to_vec(),
    fuse_ratings_a: FUSE_RATINGS_A.to_vec(),
});

/// Read-only reference tables for the sizing engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Catalog {
    metric_sizes: Vec<StandardSize>,
    awg_sizes: Vec<StandardSize>,
    base_ampacity: Vec<Breakpoint>,
    temperature_derating: Vec<Breakpoint>,
    fuse_ratings_a: Vec<f64>,
}

impl Catalog {
    /// The built-in catalog, shared process-wide.
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    /// Build a custom catalog, validating every table.
    pub fn new(
        metric_sizes: Vec<StandardSize>,
        awg_sizes: Vec<StandardSize>,
        base_ampacity: Vec<Breakpoint>,
        temperature_derating: Vec<Breakpoint>,
        fuse_ratings_a: Vec<f64>,
    ) -> CalcResult<Self> {
        check_sizes("metric_sizes", &metric_sizes, SizeSystem::Metric)?;
        check_sizes("awg_sizes", &awg_sizes, SizeSystem::Awg)?;
        check_ascending("base_ampacity", base_ampacity.iter().map(|b| b.x))?;
        check_ascending("temperature_derating", temperature_derating.iter().map(|b| b.x))?;
        check_ascending("fuse_ratings_a", fuse_ratings_a.iter().copied())?;
        if base_ampacity.iter().any(|b| b.y <= 0.0) {
            return Err(CalcError::invalid_catalog("base_ampacity", "ratings must be positive"));
        }
        if fuse_ratings_a.first().is_some_and(|&f| f <= 0.0) {
            return Err(CalcError::invalid_catalog("fuse_ratings_a", "ratings must be positive"));
        }
        Ok(Catalog {
            metric_sizes,
            awg_sizes,
            base_ampacity,
            temperature_derating,
            fuse_ratings_a,
        })
    }

    /// Metric sizes, ascending by area
    pub fn metric_sizes(&self) -> &[StandardSize] {
        &self.metric_sizes
    }

    /// AWG sizes, ascending by area
    pub fn awg_sizes(&self) -> &[StandardSize] {
        &self.awg_sizes
    }

    /// Table for a sizing system
    pub fn sizes(&self, system: SizeSystem) -> &[StandardSize] {
        match system {
            SizeSystem::Metric => &self.metric_sizes,
            SizeSystem::Awg => &self.awg_sizes,
        }
    }

    /// Base ampacity breakpoints (mm², A)
    pub fn base_ampacity(&self) -> &[Breakpoint] {
        &self.base_ampacity
    }

    /// Ambient temperature derating breakpoints (°C, factor)
    pub fn temperature_derating(&self) -> &[Breakpoint] {
        &self.temperature_derating
    }

    /// Standard fuse ratings, ascending (A)
    pub fn fuse_ratings_a(&self) -> &[f64] {
        &self.fuse_ratings_a
    }
}

fn check_sizes(table: &str, sizes: &[StandardSize], system: SizeSystem) -> CalcResult<()> {
    if let Some(stray) = sizes.iter().find(|s| s.system() != system) {
        return Err(CalcError::invalid_catalog(
            table,
            format!("entry {} is not a {} size", stray, system.display_name()),
        ));
    }
    if sizes.first().is_some_and(|s| s.area_mm2() <= 0.0) {
        return Err(CalcError::invalid_catalog(table, "areas must be positive"));
    }
    check_ascending(table, sizes.iter().map(|s| s.area_mm2()))
}

fn check_ascending(table: &str, values: impl Iterator<Item = f64>) -> CalcResult<()> {
    let values: Vec<f64> = values.collect();
    if values.is_empty() {
        return Err(CalcError::invalid_catalog(table, "table is empty"));
    }
    if let Some(pair) = values.windows(2).find(|w| w[1].partial_cmp(&w[0]) != Some(Ordering::Greater)) {
        return Err(CalcError::invalid_catalog(
            table,
            format!("not strictly ascending at {} -> {}", pair[0], pair[1]),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rebuild(metric: Vec<StandardSize>) -> CalcResult<Catalog> {
        let builtin = Catalog::builtin();
        Catalog::new(
            metric,
            builtin.awg_sizes().to_vec(),
            builtin.base_ampacity().to_vec(),
            builtin.temperature_derating().to_vec(),
            builtin.fuse_ratings_a().to_vec(),
        )
    }

    #[test]
    fn test_builtin_tables() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.metric_sizes().len(), 18);
        assert_eq!(catalog.awg_sizes().len(), 14);
        assert_eq!(catalog.awg_sizes()[3].label(), Some("12"));
        assert_eq!(catalog.sizes(SizeSystem::Awg).last().unwrap().area_mm2(), 107.2);
    }

    #[test]
    fn test_builtin_passes_validation() {
        let builtin = Catalog::builtin();
        let rebuilt = rebuild(builtin.metric_sizes().to_vec()).unwrap();
        assert_eq!(&rebuilt, builtin);
    }

    #[test]
    fn test_rejects_unordered_table() {
        let metric = vec![StandardSize::metric(4.0), StandardSize::metric(2.5)];
        let err = rebuild(metric).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_CATALOG");
    }

    #[test]
    fn test_rejects_mixed_systems() {
        let metric = vec![StandardSize::metric(1.0), StandardSize::awg("12", 3.309)];
        assert!(rebuild(metric).is_err());
        assert!(rebuild(Vec::new()).is_err());
    }

    #[test]
    fn test_derating_table_non_increasing() {
        let table = Catalog::builtin().temperature_derating();
        assert!(table.windows(2).all(|w| w[0].y >= w[1].y));
    }
}
