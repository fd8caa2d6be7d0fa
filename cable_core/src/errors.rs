//! # Error Types
//!
//! Structured error types for cable_core. Only malformed requests and broken
//! catalog tables are errors here. Engineering results that
//! fall outside the catalog (a required area larger than every standard size,
//! an insulation rating exceeded) are reported as flags on the result instead.
//!
//! ## Example
//!
//! ```rust
//! use cable_core::errors::{CalcError, CalcResult};
//!
//! fn validate_current(current_a: f64) -> CalcResult<()> {
//!     if current_a <= 0.0 {
//!         return Err(CalcError::InvalidInput {
//!             field: "current_a".to_string(),
//!             value: current_a.to_string(),
//!             reason: "Current must be positive".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for cable_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for sizing operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (out of range, not finite, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A material, installation or wire type key did not resolve
    #[error("Unknown {catalog} '{key}' (expected one of: {expected})")]
    UnknownCatalogKey {
        catalog: String,
        key: String,
        expected: String,
    },

    /// Allowed voltage drop is zero, so the required area is unbounded
    #[error("Undefined voltage drop: {voltage_v} V at {max_drop_percent}% allows no drop")]
    UndefinedVoltageDrop {
        voltage_v: f64,
        max_drop_percent: f64,
    },

    /// A catalog table violates its ordering or positivity invariant
    #[error("Invalid catalog table '{table}': {reason}")]
    InvalidCatalog { table: String, reason: String },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an UnknownCatalogKey error
    pub fn unknown_key(catalog: impl Into<String>, key: impl Into<String>, expected: &[&str]) -> Self {
        CalcError::UnknownCatalogKey {
            catalog: catalog.into(),
            key: key.into(),
            expected: expected.join(", "),
        }
    }

    /// Create an InvalidCatalog error
    pub fn invalid_catalog(table: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidCatalog {
            table: table.into(),
            reason: reason.into(),
        }
    }

    /// Check if the caller can fix this by correcting the request
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            CalcError::InvalidInput { .. }
                | CalcError::UnknownCatalogKey { .. }
                | CalcError::UndefinedVoltageDrop { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::UnknownCatalogKey { .. } => "UNKNOWN_CATALOG_KEY",
            CalcError::UndefinedVoltageDrop { .. } => "UNDEFINED_VOLTAGE_DROP",
            CalcError::InvalidCatalog { .. } => "INVALID_CATALOG",
            CalcError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}
