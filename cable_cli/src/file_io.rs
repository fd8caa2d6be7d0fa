//! # File I/O Module
//!
//! Handles schedule and settings files:
//! - **Atomic saves**: Write to .tmp, verify, rename to prevent corruption
//! - **Version validation**: Ensure schema compatibility
//!
//! ## File Format
//!
//! Schedules are saved as `.cbl` files containing JSON. Settings files are
//! plain JSON objects with any subset of the [`EngineSettings`] fields.
//!
//! ## Example
//!
//! ```rust,ignore
//! let schedule = CableSchedule::new("Engineer", "26-001", "Vessel");
//! let path = Path::new("wiring.cbl");
//!
//! save_schedule(&schedule, path).unwrap();
//! let loaded = load_schedule(path).unwrap();
//! assert_eq!(loaded.meta.job_id, "26-001");
//! ```

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use tracing::debug;

use cable_core::EngineSettings;

use crate::errors::{CliError, CliResult};
use crate::schedule::{CableSchedule, SCHEMA_VERSION};

/// Save a schedule to a file with atomic write semantics.
///
/// The save process:
/// 1. Serialize schedule to JSON
/// 2. Write to a temporary file (.tmp) and sync it
/// 3. Re-read the temporary file and check it parses
/// 4. Rename .tmp over the target (atomic on most filesystems)
pub fn save_schedule(schedule: &CableSchedule, path: &Path) -> CliResult<()> {
    let json = serde_json::to_string_pretty(schedule)?;

    let tmp_path = path.with_extension("cbl.tmp");

    let mut tmp_file = File::create(&tmp_path)
        .map_err(|e| CliError::file_error("create temp file", tmp_path.display().to_string(), e.to_string()))?;

    tmp_file
        .write_all(json.as_bytes())
        .map_err(|e| CliError::file_error("write temp file", tmp_path.display().to_string(), e.to_string()))?;

    tmp_file
        .sync_all()
        .map_err(|e| CliError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string()))?;
    drop(tmp_file);

    // Verify before replacing the previous file
    let written = fs::read_to_string(&tmp_path)
        .map_err(|e| CliError::file_error("verify temp file", tmp_path.display().to_string(), e.to_string()))?;
    if let Err(e) = serde_json::from_str::<CableSchedule>(&written) {
        let _ = fs::remove_file(&tmp_path);
        return Err(CliError::SerializationError {
            reason: format!("Written schedule does not parse: {}", e),
        });
    }

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CliError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    debug!(path = %path.display(), circuits = schedule.circuit_count(), "saved schedule");
    Ok(())
}

/// Load a schedule from a file.
///
/// # Returns
///
/// * `Ok(CableSchedule)` - Successfully loaded schedule
/// * `Err(CliError::VersionMismatch)` - File version is incompatible
/// * `Err(CliError::SerializationError)` - Invalid JSON
/// * `Err(CliError::FileError)` - I/O error
pub fn load_schedule(path: &Path) -> CliResult<CableSchedule> {
    let contents =
        fs::read_to_string(path).map_err(|e| CliError::file_error("read", path.display().to_string(), e.to_string()))?;

    let schedule: CableSchedule = serde_json::from_str(&contents).map_err(|e| CliError::SerializationError {
        reason: format!("Invalid JSON in {}: {}", path.display(), e),
    })?;

    validate_version(&schedule.meta.version)?;
    schedule.settings.validate()?;

    debug!(path = %path.display(), circuits = schedule.circuit_count(), "loaded schedule");
    Ok(schedule)
}

/// Load engine settings from a JSON file; missing fields take defaults.
pub fn load_settings(path: &Path) -> CliResult<EngineSettings> {
    let contents =
        fs::read_to_string(path).map_err(|e| CliError::file_error("read", path.display().to_string(), e.to_string()))?;

    let settings: EngineSettings = serde_json::from_str(&contents).map_err(|e| CliError::SerializationError {
        reason: format!("Invalid JSON in {}: {}", path.display(), e),
    })?;
    settings.validate()?;
    Ok(settings)
}

/// Validate that a file version is compatible with the current schema.
fn validate_version(file_version: &str) -> CliResult<()> {
    let mismatch = || CliError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let parse = |v: &str| -> Option<Vec<u32>> { v.split('.').map(|p| p.parse().ok()).collect() };
    let file_parts = parse(file_version).ok_or_else(mismatch)?;
    let current_parts = parse(SCHEMA_VERSION).ok_or_else(mismatch)?;

    match (file_parts.as_slice(), current_parts.as_slice()) {
        ([file_major, ..], [major, ..]) if file_major != major => Err(mismatch()),
        // 0.x: a newer minor may carry breaking changes
        ([0, file_minor, ..], [0, minor, ..]) if file_minor > minor => Err(mismatch()),
        ([_, ..], [_, ..]) => Ok(()),
        _ => Err(mismatch()),
    }
}
