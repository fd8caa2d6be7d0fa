//! # cable_core - DC Cable Sizing Engine
//!
//! `cable_core` sizes conductors for low-voltage DC circuits (marine,
//! automotive, solar, telecom). Given a circuit it computes the cross-section
//! that keeps the voltage drop within a limit, resolves it onto metric and
//! AWG tables, and reports derated ampacity, a protecting fuse and an
//! insulation temperature verdict. All inputs and outputs are
//! JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results, no I/O
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Flags, not failures**: Oversize or overheated results are flagged on the result
//!
//! ## Quick Start
//!
//! ```rust
//! use cable_core::{calculate, Catalog, EngineSettings, SizingInput};
//! use cable_core::derating::InstallationMethod;
//! use cable_core::materials::ConductorMaterial;
//!
//! let mut input = SizingInput::new("Solar feed", 24.0, 20.0, 10.0);
//! input.max_drop_percent = 5.0;
//! input.material = ConductorMaterial::Copper;
//! input.installation = InstallationMethod::InAir;
//!
//! let result = calculate(&input, &EngineSettings::default(), Catalog::builtin()).unwrap();
//! assert_eq!(result.metric.size.area_mm2(), 4.0);
//! println!("Fuse: {} A", result.metric.fuse.rating_a);
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Sizing, resolver, ampacity/fuse advisor, temperature check
//! - [`catalog`] - Immutable reference tables
//! - [`derating`] - Installation method and derating factors
//! - [`materials`] - Conductor materials, insulation types, standard sizes
//! - [`settings`] - Engine limits and safety factors
//! - [`units`] - Temperature units
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod catalog;
pub mod derating;
pub mod errors;
pub mod materials;
pub mod settings;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{calculate, SizingInput, SizingResult};
pub use catalog::Catalog;
pub use errors::{CalcError, CalcResult};
pub use settings::EngineSettings;
