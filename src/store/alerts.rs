//! Append-only alert log (`alerts.csv`).
//!
//! Rows are never rewritten or deleted. Appending is fire-and-forget from the
//! monitor's point of view: there is no delivery and no retry.

use std::path::PathBuf;

use crate::logging::{self, Subsystem};
use crate::model::AlertRecord;
use crate::store::{ALERTS_HEADER, CsvTable, StoreResult};

pub struct AlertLog {
    table: CsvTable<AlertRecord>,
}

impl AlertLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { table: CsvTable::new(path, ALERTS_HEADER) }
    }

    pub fn exists(&self) -> bool {
        self.table.exists()
    }

    /// Create the log with its header row if absent.
    pub fn ensure(&self) -> StoreResult<()> {
        self.table.ensure()
    }

    /// Add one alert to the end of the log.
    pub fn append(&self, alert: &AlertRecord) -> StoreResult<()> {
        self.table.append(alert)?;
        logging::info(
            Subsystem::Alerts,
            None,
            &format!("{} alert logged: {}", alert.severity, alert.message),
        );
        Ok(())
    }

    /// Every alert in the order it was written.
    pub fn read_all(&self) -> StoreResult<Vec<AlertRecord>> {
        if !self.table.exists() {
            return Ok(Vec::new());
        }
        self.table.read_all()
    }

    /// The most recent `limit` alerts, newest first.
    ///
    /// Sorted by timestamp; ISO 8601 strings with a common format sort
    /// chronologically as text.
    pub fn recent(&self, limit: usize) -> StoreResult<Vec<AlertRecord>> {
        let mut alerts = self.read_all()?;
        alerts.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        alerts.truncate(limit);
        Ok(alerts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AlertSeverity;

    fn alert(timestamp: &str, severity: AlertSeverity) -> AlertRecord {
        AlertRecord {
            timestamp: timestamp.into(),
            alert_type: "FloodRisk".into(),
            severity,
            message: "Flood risk: score 0.62. Avg sensor 40.0 cm.".into(),
            lat: None,
            lon: None,
        }
    }

    #[test]
    fn test_append_creates_file_with_header() {
        let dir = tempfile::tempdir().unwrap();
        let log = AlertLog::new(dir.path().join("alerts.csv"));

        log.append(&alert("2024-05-01T13:00:00.000000", AlertSeverity::Low)).unwrap();

        let text = std::fs::read_to_string(dir.path().join("alerts.csv")).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("timestamp,type,severity,message,lat,lon"));
        assert_eq!(
            lines.next(),
            Some("2024-05-01T13:00:00.000000,FloodRisk,LOW,Flood risk: score 0.62. Avg sensor 40.0 cm.,,")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_read_all_on_missing_log_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let log = AlertLog::new(dir.path().join("alerts.csv"));
        assert!(log.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_recent_is_newest_first_and_limited() {
        let dir = tempfile::tempdir().unwrap();
        let log = AlertLog::new(dir.path().join("alerts.csv"));

        log.append(&alert("2024-05-01T13:00:00.000000", AlertSeverity::Low)).unwrap();
        log.append(&alert("2024-05-01T15:00:00.000000", AlertSeverity::High)).unwrap();
        log.append(&alert("2024-05-01T14:00:00.000000", AlertSeverity::Medium)).unwrap();

        let recent = log.recent(2).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].severity, AlertSeverity::High);
        assert_eq!(recent[1].severity, AlertSeverity::Medium);

        // The file itself keeps insertion order.
        let all = log.read_all().unwrap();
        assert_eq!(all[0].severity, AlertSeverity::Low);
    }
}
