//! # Wire Temperature Check
//!
//! Classifies the effective operating temperature against the insulation
//! rating. The verdict never stops a calculation; it travels with the result
//! so the caller can warn.

use serde::{Deserialize, Serialize};

use crate::materials::WireType;

/// Temperature verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureStatus {
    /// Comfortably below the rating
    Safe,
    /// Above the caution threshold but within the rating
    Caution,
    /// Above the rating; insulation may fail
    Unsafe,
}

/// Result of comparing operating temperature with the insulation rating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureCheck {
    pub status: TemperatureStatus,
    /// Effective operating temperature (°C)
    pub effective_temp_c: f64,
    /// Insulation rating (°C)
    pub max_temp_c: f64,
    /// Temperature at which the caution band starts (°C)
    pub caution_temp_c: f64,
    /// Human-readable warning; `None` when safe
    pub message: Option<String>,
}

impl TemperatureCheck {
    /// Within the insulation rating (safe or caution)
    pub fn is_valid(&self) -> bool {
        self.status != TemperatureStatus::Unsafe
    }

    /// Headroom to the rating (°C); negative when exceeded
    pub fn headroom_c(&self) -> f64 {
        self.max_temp_c - self.effective_temp_c
    }
}

/// Compare `effective_temp_c` with the rating of `wire_type`.
///
/// - above the rating → [`TemperatureStatus::Unsafe`]
/// - above `caution_ratio × rating` → [`TemperatureStatus::Caution`]
/// - otherwise → [`TemperatureStatus::Safe`], no message
pub fn validate_wire_temperature(effective_temp_c: f64, wire_type: WireType, caution_ratio: f64) -> TemperatureCheck {
    let max_temp_c = wire_type.max_temp_c();
    let caution_temp_c = max_temp_c * caution_ratio;
    let name = wire_type.display_name();

    let (status, message) = if effective_temp_c > max_temp_c {
        (
            TemperatureStatus::Unsafe,
            Some(format!(
                "WARNING: Effective operating temperature ({:.1}°C) exceeds {} maximum rating ({:.0}°C) by {:.1}°C! Wire insulation may fail.",
                effective_temp_c,
                name,
                max_temp_c,
                effective_temp_c - max_temp_c
            )),
        )
    } else if effective_temp_c > caution_temp_c {
        (
            TemperatureStatus::Caution,
            Some(format!(
                "CAUTION: Effective operating temperature ({:.1}°C) is close to {} maximum rating ({:.0}°C). Consider using a higher temperature rated wire.",
                effective_temp_c, name, max_temp_c
            )),
        )
    } else {
        (TemperatureStatus::Safe, None)
    };

    TemperatureCheck {
        status,
        effective_temp_c,
        max_temp_c,
        caution_temp_c,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(temp: f64, wire: WireType) -> TemperatureStatus {
        validate_wire_temperature(temp, wire, 0.9).status
    }

    #[test]
    fn test_classification() {
        assert_eq!(status(80.0, WireType::Flry), TemperatureStatus::Safe);
        assert_eq!(status(95.0, WireType::Flry), TemperatureStatus::Caution);
        assert_eq!(status(110.0, WireType::Flry), TemperatureStatus::Unsafe);
        assert_eq!(status(50.0, WireType::Pvc), TemperatureStatus::Safe);
        assert_eq!(status(75.0, WireType::Pvc), TemperatureStatus::Unsafe);
    }

    #[test]
    fn test_boundaries_are_exclusive() {
        // exactly 90% of 200°C is still safe, exactly the rating is caution
        assert_eq!(status(180.0, WireType::Silicone), TemperatureStatus::Safe);
        assert_eq!(status(200.0, WireType::Silicone), TemperatureStatus::Caution);
    }

    #[test]
    fn test_messages() {
        let safe = validate_wire_temperature(40.0, WireType::Generic, 0.9);
        assert!(safe.message.is_none());
        assert!(safe.is_valid());

        let unsafe_check = validate_wire_temperature(100.0, WireType::Thwn, 0.9);
        assert!(!unsafe_check.is_valid());
        let msg = unsafe_check.message.as_deref().unwrap();
        assert!(msg.starts_with("WARNING"));
        assert!(msg.contains("by 25.0°C"));
        assert_eq!(unsafe_check.headroom_c(), -25.0);

        let caution = validate_wire_temperature(85.0, WireType::Xlpe, 0.9);
        assert!(caution.message.unwrap().starts_with("CAUTION"));
    }
}
