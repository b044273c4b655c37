//! One evaluation cycle of the flood monitor.
//!
//! ```text
//! SensorStore.read → validate → [simulate + SensorStore.write] → RiskScorer.score
//!     → classify → AlertLog.append
//! ```
//!
//! A `Monitor` owns a single `RiskScorer`, so the EWMA baseline lives as long
//! as the monitor. Build one per session; a `watch` loop reuses it across
//! cycles.

use chrono::{DateTime, Local};

use crate::alert::thresholds::check_flood_risk;
use crate::analysis::mean_level;
use crate::analysis::risk::RiskScorer;
use crate::config::DashboardConfig;
use crate::logging::{self, Subsystem};
use crate::model::{AlertRecord, AlertSeverity, SensorReading, water_levels};
use crate::simulate::Simulator;
use crate::store::{AlertLog, DataDir, SensorStore, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("sensor table {0} has no readings; cannot score an empty sensor set")]
    NoSensors(String),

    /// A stored level is negative or not a number.
    #[error("sensor {id} has invalid water level {level}")]
    InvalidReading { id: String, level: f64 },
}

/// Result of one cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleOutcome {
    pub risk: f64,
    pub mean_level: f64,
    /// Sensor state the score was computed from (after simulation).
    pub sensors: Vec<SensorReading>,
    /// The alert that was appended, if any.
    pub alert: Option<AlertRecord>,
}

impl CycleOutcome {
    pub fn severity(&self) -> Option<AlertSeverity> {
        self.alert.as_ref().map(|a| a.severity)
    }
}

pub struct Monitor {
    scorer: RiskScorer,
    settings: DashboardConfig,
    sensors: SensorStore,
    alerts: AlertLog,
}

impl Monitor {
    pub fn new(data: &DataDir, settings: DashboardConfig) -> Self {
        Self {
            scorer: RiskScorer::new(),
            settings,
            sensors: data.sensors(),
            alerts: data.alerts(),
        }
    }

    pub fn scorer(&self) -> &RiskScorer {
        &self.scorer
    }

    /// Run one cycle stamped with the local wall clock.
    pub fn evaluate(&mut self) -> Result<CycleOutcome, MonitorError> {
        self.evaluate_at(Local::now())
    }

    /// Run one cycle with an injected clock.
    pub fn evaluate_at(&mut self, now: DateTime<Local>) -> Result<CycleOutcome, MonitorError> {
        let mut readings = self.sensors.read().inspect_err(|e| {
            logging::log_store_failure(Subsystem::Sensors, "read sensors", e);
        })?;
        if readings.is_empty() {
            return Err(MonitorError::NoSensors(self.sensors.path().display().to_string()));
        }
        if let Some(bad) = readings.iter().find(|r| !r.water_level.is_finite() || r.water_level < 0.0) {
            logging::error(
                Subsystem::Sensors,
                Some(&bad.id),
                &format!("rejecting cycle: water level {} is out of range", bad.water_level),
            );
            return Err(MonitorError::InvalidReading { id: bad.id.clone(), level: bad.water_level });
        }

        if self.settings.simulate_updates {
            Simulator::new(self.settings.simulation_seed).step(&mut readings, self.settings.rain_mm_6h);
            self.sensors.write(&readings).inspect_err(|e| {
                logging::log_store_failure(Subsystem::Sensors, "write sensors", e);
            })?;
        }

        let levels = water_levels(&readings);
        let mean = mean_level(&levels).unwrap_or(0.0);
        let risk = self.scorer.score(self.settings.rain_mm_6h, &levels);

        let alert = check_flood_risk(risk, &levels, self.settings.risk_threshold, now);
        match &alert {
            Some(record) => self.alerts.append(record).inspect_err(|e| {
                logging::log_store_failure(Subsystem::Alerts, "append alert", e);
            })?,
            None => logging::info(
                Subsystem::Alerts,
                None,
                &format!("No immediate flood alert (risk {:.2})", risk),
            ),
        }

        for reading in &readings {
            logging::debug(
                Subsystem::Sensors,
                Some(&reading.id),
                &format!("water level {:.1} cm", reading.water_level),
            );
        }

        Ok(CycleOutcome { risk, mean_level: mean, sensors: readings, alert })
    }
}
