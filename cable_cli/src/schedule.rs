//! # Cable Schedule
//!
//! The `CableSchedule` struct is the root container for a set of circuits
//! sized together, e.g. every run on one boat or vehicle. Schedules serialize
//! to `.cbl` files as human-readable JSON.
//!
//! ## Structure
//!
//! ```text
//! CableSchedule
//! ├── meta: ScheduleMetadata (version, engineer, job info, timestamps)
//! ├── settings: EngineSettings (voltage ceiling, safety factors)
//! └── circuits: HashMap<Uuid, SizingInput>
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut schedule = CableSchedule::new("Jane Engineer", "26-014", "Sailing yacht Aurora");
//! schedule.add_circuit(SizingInput::new("Nav lights", 12.0, 4.0, 12.0));
//!
//! let outcomes = schedule.run_all(Catalog::builtin());
//! assert!(outcomes[0].result.is_ok());
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use cable_core::{calculate, CalcError, Catalog, EngineSettings, SizingInput, SizingResult};

/// Current schema version for .cbl files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root schedule container.
///
/// Circuits are stored in a flat UUID-keyed map so an edit never disturbs
/// the identity of the other circuits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CableSchedule {
    pub meta: ScheduleMetadata,

    /// Limits applied to every circuit in this schedule
    #[serde(default)]
    pub settings: EngineSettings,

    pub circuits: HashMap<Uuid, SizingInput>,
}

impl CableSchedule {
    /// Create a new empty schedule.
    ///
    /// # Arguments
    ///
    /// * `engineer` - Name of the responsible engineer
    /// * `job_id` - Job number (e.g., "26-001")
    /// * `vessel` - Vessel, vehicle or installation the circuits belong to
    pub fn new(engineer: impl Into<String>, job_id: impl Into<String>, vessel: impl Into<String>) -> Self {
        let now = Utc::now();
        CableSchedule {
            meta: ScheduleMetadata {
                version: SCHEMA_VERSION.to_string(),
                engineer: engineer.into(),
                job_id: job_id.into(),
                vessel: vessel.into(),
                created: now,
                modified: now,
            },
            settings: EngineSettings::default(),
            circuits: HashMap::new(),
        }
    }

    /// Add a circuit; returns its new UUID.
    pub fn add_circuit(&mut self, circuit: SizingInput) -> Uuid {
        let id = Uuid::new_v4();
        self.circuits.insert(id, circuit);
        self.touch();
        id
    }

    /// Remove a circuit by UUID.
    pub fn remove_circuit(&mut self, id: &Uuid) -> Option<SizingInput> {
        let circuit = self.circuits.remove(id);
        if circuit.is_some() {
            self.touch();
        }
        circuit
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    pub fn circuit_count(&self) -> usize {
        self.circuits.len()
    }

    /// Size every circuit with the schedule's settings.
    ///
    /// A failing circuit does not stop the run; its error is reported in its
    /// own outcome. Outcomes are ordered by label, then UUID.
    pub fn run_all(&self, catalog: &Catalog) -> Vec<CircuitOutcome> {
        let mut outcomes: Vec<CircuitOutcome> = self
            .circuits
            .iter()
            .map(|(id, circuit)| CircuitOutcome {
                id: *id,
                label: circuit.label.clone(),
                result: calculate(circuit, &self.settings, catalog),
            })
            .collect();
        outcomes.sort_by(|a, b| a.label.cmp(&b.label).then(a.id.cmp(&b.id)));

        let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
        info!(
            job_id = %self.meta.job_id,
            circuits = outcomes.len(),
            failed,
            "sized cable schedule"
        );
        outcomes
    }
}

impl Default for CableSchedule {
    fn default() -> Self {
        CableSchedule::new("", "", "")
    }
}

/// Schedule metadata stored in the file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    pub engineer: String,

    pub job_id: String,

    /// Vessel, vehicle or installation name
    pub vessel: String,

    pub created: DateTime<Utc>,

    pub modified: DateTime<Utc>,
}

/// Result of sizing one circuit of a schedule.
#[derive(Debug, Clone, Serialize)]
pub struct CircuitOutcome {
    pub id: Uuid,
    pub label: String,
    pub result: Result<SizingResult, CalcError>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_creation() {
        let schedule = CableSchedule::new("John Doe", "26-001", "MV Kestrel");
        assert_eq!(schedule.meta.engineer, "John Doe");
        assert_eq!(schedule.meta.vessel, "MV Kestrel");
        assert_eq!(schedule.meta.version, SCHEMA_VERSION);
        assert_eq!(schedule.settings, EngineSettings::default());
    }

    #[test]
    fn test_schedule_serialization() {
        let mut schedule = CableSchedule::new("Jane Engineer", "26-042", "Test Vessel");
        schedule.add_circuit(SizingInput::new("Bilge pump", 12.0, 8.0, 6.0));
        let json = serde_json::to_string_pretty(&schedule).unwrap();

        assert!(json.contains("Jane Engineer"));
        assert!(json.contains("Bilge pump"));

        let roundtrip: CableSchedule = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.circuit_count(), 1);
    }

    #[test]
    fn test_add_remove_circuit() {
        let mut schedule = CableSchedule::default();
        let id = schedule.add_circuit(SizingInput::new("Fridge", 12.0, 5.0, 4.0));
        assert_eq!(schedule.circuit_count(), 1);
        assert_eq!(schedule.circuits[&id].label, "Fridge");

        assert!(schedule.remove_circuit(&id).is_some());
        assert!(schedule.remove_circuit(&id).is_none());
        assert_eq!(schedule.circuit_count(), 0);
    }

    #[test]
    fn test_run_all_orders_by_label_and_isolates_errors() {
        let mut schedule = CableSchedule::default();
        schedule.add_circuit(SizingInput::new("Windlass", 12.0, 80.0, 10.0));
        schedule.add_circuit(SizingInput::new("Anchor light", 12.0, 1.0, 15.0));
        schedule.add_circuit(SizingInput::new("Inverter", 120.0, 50.0, 2.0));

        let outcomes = schedule.run_all(Catalog::builtin());
        let labels: Vec<&str> = outcomes.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, ["Anchor light", "Inverter", "Windlass"]);
        assert!(outcomes[0].result.is_ok());
        assert!(outcomes[1].result.is_err());
        assert!(outcomes[2].result.is_ok());
    }

    #[test]
    fn test_run_all_uses_schedule_settings() {
        let mut schedule = CableSchedule::default();
        schedule.settings = schedule.settings.with_max_voltage(60.0);
        schedule.add_circuit(SizingInput::new("Telecom", 54.0, 10.0, 20.0));
        let outcomes = schedule.run_all(Catalog::builtin());
        assert!(outcomes[0].result.is_ok());
    }
}
