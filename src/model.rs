/// Core data types for the AquaAlert flood awareness service.
///
/// This module defines the shared domain model imported by all other modules.
/// It contains no I/O. Every record derives `Serialize`/`Deserialize` so the
/// `store` module can read and write it as a CSV row without a mapping layer.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Alert constants
// ---------------------------------------------------------------------------

/// Value of the `type` column for every alert raised by the risk scorer.
pub const ALERT_TYPE_FLOOD_RISK: &str = "FloodRisk";

// ---------------------------------------------------------------------------
// Sensor types
// ---------------------------------------------------------------------------

/// Current state of a single water-level sensor.
///
/// One row of `sensors.csv`. The set of sensors is fixed by the data file;
/// every cycle reads and rewrites all of them together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    pub id: String,
    pub lat: f64,
    pub lon: f64,
    /// Water level above the sensor datum, in centimetres (>= 0).
    pub water_level: f64,
}

/// Water levels of a sensor set, in file order.
pub fn water_levels(readings: &[SensorReading]) -> Vec<f64> {
    readings.iter().map(|r| r.water_level).collect()
}

// ---------------------------------------------------------------------------
// Alert types
// ---------------------------------------------------------------------------

/// Severity tier of an emitted alert, in ascending order.
///
/// The "no alert" outcome is not a severity; `alert::thresholds::classify`
/// returns `Option<AlertSeverity>` and `None` means nothing is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AlertSeverity {
    Low,
    Medium,
    High,
}

impl fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertSeverity::Low => write!(f, "LOW"),
            AlertSeverity::Medium => write!(f, "MEDIUM"),
            AlertSeverity::High => write!(f, "HIGH"),
        }
    }
}

/// One row of the append-only alert log.
///
/// `lat`/`lon` are empty for basin-wide risk alerts; the columns exist so
/// point alerts can share the same file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertRecord {
    pub timestamp: String, // ISO 8601 local time, e.g. "2024-05-01T13:00:00.000000"
    #[serde(rename = "type")]
    pub alert_type: String,
    pub severity: AlertSeverity,
    pub message: String,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

// ---------------------------------------------------------------------------
// Community data
// ---------------------------------------------------------------------------

/// An evacuation shelter shown on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shelter {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    /// Number of people the shelter can hold.
    pub capacity: u32,
}

/// A water-level observation submitted by a resident.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommunityReport {
    pub timestamp: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    /// Observed water level, 0..=200.
    pub level: u32,
    pub notes: String,
    pub report_id: String, // "R-<unix seconds>"
    pub contact: String,
}

/// Household information registered by a resident.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseholdRegistration {
    pub name: String,
    pub address: String,
    pub contact_number: String,
    pub barangay: String,
    pub family_members: u32,
    pub timestamp: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(AlertSeverity::Low < AlertSeverity::Medium);
        assert!(AlertSeverity::Medium < AlertSeverity::High);
    }

    #[test]
    fn test_severity_display_matches_log_column() {
        assert_eq!(AlertSeverity::Low.to_string(), "LOW");
        assert_eq!(AlertSeverity::Medium.to_string(), "MEDIUM");
        assert_eq!(AlertSeverity::High.to_string(), "HIGH");
    }

    #[test]
    fn test_water_levels_preserves_order() {
        let readings = vec![
            SensorReading { id: "S-01".into(), lat: 0.0, lon: 0.0, water_level: 10.0 },
            SensorReading { id: "S-02".into(), lat: 0.0, lon: 0.0, water_level: 8.0 },
        ];
        assert_eq!(water_levels(&readings), vec![10.0, 8.0]);
    }
}
