//! # CLI Error Types
//!
//! Engine errors pass through unchanged; file, schema and terminal problems
//! only exist at this layer.

use cable_core::CalcError;
use serde::Serialize;
use thiserror::Error;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Error, Debug, Serialize)]
#[serde(tag = "type", content = "details")]
pub enum CliError {
    /// Error raised by the sizing engine
    #[error(transparent)]
    Calc(#[from] CalcError),

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },

    /// Writing to the terminal or reading a prompt answer failed
    #[error("Output error: {reason}")]
    OutputError { reason: String },
}

impl CliError {
    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CliError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CliError::Calc(e) => e.error_code(),
            CliError::FileError { .. } => "FILE_ERROR",
            CliError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CliError::VersionMismatch { .. } => "VERSION_MISMATCH",
            CliError::OutputError { .. } => "OUTPUT_ERROR",
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::SerializationError {
            reason: err.to_string(),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::OutputError {
            reason: err.to_string(),
        }
    }
}
