//! Sensor state table (`sensors.csv`).
//!
//! Read and replaced in bulk once per evaluation cycle. The file is the only
//! record of the simulated levels; there is no history.

use std::path::{Path, PathBuf};

use crate::logging::{self, Subsystem};
use crate::model::SensorReading;
use crate::store::{CsvTable, SENSORS_HEADER, StoreResult};

pub struct SensorStore {
    table: CsvTable<SensorReading>,
}

impl SensorStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { table: CsvTable::new(path, SENSORS_HEADER) }
    }

    pub fn path(&self) -> &Path {
        self.table.path()
    }

    pub fn exists(&self) -> bool {
        self.table.exists()
    }

    /// Current readings for every sensor, in file order.
    pub fn read(&self) -> StoreResult<Vec<SensorReading>> {
        let readings = self.table.read_all()?;
        logging::debug(
            Subsystem::Sensors,
            None,
            &format!("Loaded {} sensors from {}", readings.len(), self.table.path().display()),
        );
        Ok(readings)
    }

    /// Replace the whole sensor set.
    pub fn write(&self, readings: &[SensorReading]) -> StoreResult<()> {
        self.table.replace_all(readings)
    }
}
