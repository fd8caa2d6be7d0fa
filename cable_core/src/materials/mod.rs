//! # Materials Database
//!
//! Reference data for the things a cable is made of: the conductor metal,
//! the insulation around it, and the standard cross-sections it is sold in.
//!
//! ## Example
//!
//! ```rust
//! use cable_core::materials::{ConductorMaterial, WireType};
//!
//! let copper = ConductorMaterial::from_str_flexible("copper").unwrap();
//! assert_eq!(copper.properties().resistivity_20c, 0.0175);
//!
//! let pvc = WireType::from_str_flexible("pvc").unwrap();
//! assert_eq!(pvc.max_temp_c(), 70.0);
//! ```

pub mod cable_sizes;
pub mod conductor;
pub mod insulation;

pub use cable_sizes::{SizeSystem, StandardSize};
pub use conductor::{ConductorMaterial, ConductorProperties, REFERENCE_TEMP_C};
pub use insulation::WireType;
