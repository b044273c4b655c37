//! Flat-file persistence for the AquaAlert service.
//!
//! Every table is a CSV file with a fixed header row in one data directory.
//! Tables are either replaced wholesale (`sensors.csv`) or appended to
//! (alerts, reports, registrations). There is no locking: two processes
//! writing the same directory are last-writer-wins.
//!
//! Submodules:
//! - `sensors` — `SensorStore`, bulk read/replace of sensor state.
//! - `alerts` — `AlertLog`, the append-only alert table.
//! - `community` — resident reports and household registrations.
//! - `shelters` — evacuation shelter list.

pub mod alerts;
pub mod community;
pub mod sensors;
pub mod shelters;

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs::{self, File, OpenOptions};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use crate::stations;

pub use alerts::AlertLog;
pub use community::{RegistrationStore, ReportStore};
pub use sensors::SensorStore;
pub use shelters::ShelterStore;

// ---------------------------------------------------------------------------
// File names and headers
// ---------------------------------------------------------------------------

pub const SENSORS_FILE: &str = "sensors.csv";
pub const ALERTS_FILE: &str = "alerts.csv";
pub const REPORTS_FILE: &str = "reports.csv";
pub const SHELTERS_FILE: &str = "shelters.csv";
pub const USER_INFO_FILE: &str = "user_info.csv";

pub const SENSORS_HEADER: &[&str] = &["id", "lat", "lon", "water_level"];
pub const ALERTS_HEADER: &[&str] = &["timestamp", "type", "severity", "message", "lat", "lon"];
pub const REPORTS_HEADER: &[&str] = &[
    "timestamp", "name", "lat", "lon", "level", "notes", "report_id", "contact",
];
pub const SHELTERS_HEADER: &[&str] = &["name", "lat", "lon", "capacity"];
pub const USER_INFO_HEADER: &[&str] = &[
    "name", "address", "contact_number", "barangay", "family_members", "timestamp",
];

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors raised while reading or writing a data file.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed table {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

pub type StoreResult<T> = Result<T, StoreError>;

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> StoreError + '_ {
    move |source| StoreError::Io { path: path.to_path_buf(), source }
}

fn csv_err(path: &Path) -> impl FnOnce(csv::Error) -> StoreError + '_ {
    move |source| StoreError::Csv { path: path.to_path_buf(), source }
}

// ---------------------------------------------------------------------------
// Generic CSV table
// ---------------------------------------------------------------------------

/// A CSV file holding rows of `T` under a fixed header.
///
/// The header is written explicitly rather than derived from `T`, so an empty
/// table still carries its column names.
#[derive(Debug, Clone)]
pub struct CsvTable<T> {
    path: PathBuf,
    header: &'static [&'static str],
    _row: PhantomData<T>,
}

impl<T: Serialize + DeserializeOwned> CsvTable<T> {
    pub fn new(path: impl Into<PathBuf>, header: &'static [&'static str]) -> Self {
        Self { path: path.into(), header, _row: PhantomData }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the file exists and has at least its header row.
    pub fn exists(&self) -> bool {
        fs::metadata(&self.path).map(|m| m.len() > 0).unwrap_or(false)
    }

    /// Create the file with only a header row if it is missing or empty.
    pub fn ensure(&self) -> StoreResult<()> {
        if self.exists() {
            return Ok(());
        }
        self.replace_all(&[])
    }

    /// Read every row in file order.
    pub fn read_all(&self) -> StoreResult<Vec<T>> {
        let file = File::open(&self.path).map_err(io_err(&self.path))?;
        let mut reader = csv::Reader::from_reader(file);

        let mut rows = Vec::new();
        for result in reader.deserialize() {
            rows.push(result.map_err(csv_err(&self.path))?);
        }
        Ok(rows)
    }

    /// Overwrite the file with a header row followed by `rows`.
    pub fn replace_all(&self, rows: &[T]) -> StoreResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err(parent))?;
        }
        let file = File::create(&self.path).map_err(io_err(&self.path))?;
        let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(file);

        writer.write_record(self.header).map_err(csv_err(&self.path))?;
        for row in rows {
            writer.serialize(row).map_err(csv_err(&self.path))?;
        }
        writer.flush().map_err(io_err(&self.path))
    }

    /// Append one row, creating the file with its header first if needed.
    pub fn append(&self, row: &T) -> StoreResult<()> {
        self.ensure()?;
        let file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(io_err(&self.path))?;
        let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(file);

        writer.serialize(row).map_err(csv_err(&self.path))?;
        writer.flush().map_err(io_err(&self.path))
    }
}

// ---------------------------------------------------------------------------
// Data directory
// ---------------------------------------------------------------------------

/// The directory holding all of the service's tables.
#[derive(Debug, Clone)]
pub struct DataDir {
    root: PathBuf,
}

impl DataDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn sensors(&self) -> SensorStore {
        SensorStore::new(self.root.join(SENSORS_FILE))
    }

    pub fn alerts(&self) -> AlertLog {
        AlertLog::new(self.root.join(ALERTS_FILE))
    }

    pub fn reports(&self) -> ReportStore {
        ReportStore::new(self.root.join(REPORTS_FILE))
    }

    pub fn shelters(&self) -> ShelterStore {
        ShelterStore::new(self.root.join(SHELTERS_FILE))
    }

    pub fn registrations(&self) -> RegistrationStore {
        RegistrationStore::new(self.root.join(USER_INFO_FILE))
    }

    /// Create every missing table.
    ///
    /// Sensors and shelters are seeded from the reference registry; the other
    /// tables start with a header row only. Existing files are left untouched.
    /// Returns the names of the files that were created.
    pub fn ensure_files(&self) -> StoreResult<Vec<&'static str>> {
        fs::create_dir_all(&self.root).map_err(io_err(&self.root))?;
        let mut created = Vec::new();

        let sensors = self.sensors();
        if !sensors.exists() {
            sensors.write(&stations::reference_sensors())?;
            created.push(SENSORS_FILE);
        }

        let shelters = self.shelters();
        if !shelters.exists() {
            shelters.seed(&stations::reference_shelters())?;
            created.push(SHELTERS_FILE);
        }

        let alerts = self.alerts();
        if !alerts.exists() {
            alerts.ensure()?;
            created.push(ALERTS_FILE);
        }

        let reports = self.reports();
        if !reports.exists() {
            reports.ensure()?;
            created.push(REPORTS_FILE);
        }

        let registrations = self.registrations();
        if !registrations.exists() {
            registrations.ensure()?;
            created.push(USER_INFO_FILE);
        }

        Ok(created)
    }
}
