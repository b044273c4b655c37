//! Flood alert threshold checking.
//!
//! Turns a risk score and the raw sensor levels into an alert decision.
//! Absolute sensor levels can raise an alert on their own: a single gauge at
//! 120 cm alerts even when the composite score is low, and one at 150 cm
//! forces the top tier.

use chrono::{DateTime, Local};

use crate::analysis::mean_level;
use crate::model::{ALERT_TYPE_FLOOD_RISK, AlertRecord, AlertSeverity};

/// Any sensor at or above this level (cm) raises an alert.
pub const SENSOR_ALERT_LEVEL_CM: f64 = 120.0;

/// Any sensor at or above this level (cm) forces HIGH severity.
pub const SENSOR_HIGH_LEVEL_CM: f64 = 150.0;

/// Risk score at or above which the alert is HIGH.
pub const HIGH_RISK_SCORE: f64 = 0.9;

/// Risk score at or above which the alert is at least MEDIUM.
pub const MEDIUM_RISK_SCORE: f64 = 0.75;

/// Decide whether to alert and at which severity.
///
/// Returns `None` when the risk is below `threshold` and every sensor is
/// below `SENSOR_ALERT_LEVEL_CM`. Both comparisons are inclusive.
pub fn classify(risk: f64, sensor_levels: &[f64], threshold: f64) -> Option<AlertSeverity> {
    let any_at = |limit: f64| sensor_levels.iter().any(|&level| level >= limit);

    if risk < threshold && !any_at(SENSOR_ALERT_LEVEL_CM) {
        return None;
    }

    if any_at(SENSOR_HIGH_LEVEL_CM) || risk >= HIGH_RISK_SCORE {
        Some(AlertSeverity::High)
    } else if risk >= MEDIUM_RISK_SCORE {
        Some(AlertSeverity::Medium)
    } else {
        Some(AlertSeverity::Low)
    }
}

/// Human-readable alert text: risk to 2 places, mean level to 1 place.
pub fn alert_message(risk: f64, mean_level_cm: f64) -> String {
    format!("Flood risk: score {:.2}. Avg sensor {:.1} cm.", risk, mean_level_cm)
}

/// Classify and, if an alert is due, build the record to append.
///
/// `now` is injected so tests can pin the timestamp.
pub fn check_flood_risk(
    risk: f64,
    sensor_levels: &[f64],
    threshold: f64,
    now: DateTime<Local>,
) -> Option<AlertRecord> {
    let severity = classify(risk, sensor_levels, threshold)?;
    let mean = mean_level(sensor_levels).unwrap_or(0.0);

    Some(AlertRecord {
        timestamp: now.naive_local().format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
        alert_type: ALERT_TYPE_FLOOD_RISK.to_string(),
        severity,
        message: alert_message(risk, mean),
        lat: None,
        lon: None,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
