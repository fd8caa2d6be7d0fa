//! # Cable Calculations
//!
//! Each calculation follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `calculate(input, settings, catalog) -> Result<*Result, CalcError>` - Pure calculation function
//!
//! ## Available Calculations
//!
//! - [`sizing`] - Voltage-drop sizing of a DC circuit (the main entry point)
//! - [`thermal`] - Effective temperature and temperature-corrected resistivity
//! - [`standard_size`] - Rounding a required area onto metric/AWG tables
//! - [`ampacity`] - Derated ampacity, fuse selection, minimum safe size
//! - [`temperature_check`] - Insulation temperature verdict

pub mod ampacity;
pub mod sizing;
pub mod standard_size;
pub mod temperature_check;
pub mod thermal;

// Re-export commonly used types
pub use ampacity::{AmpacityConditions, FuseRecommendation, SafeSizeSelection};
pub use sizing::{calculate, SizeRecommendation, SizingInput, SizingResult};
pub use standard_size::{Resolution, VoltageDrop};
pub use temperature_check::{TemperatureCheck, TemperatureStatus};
