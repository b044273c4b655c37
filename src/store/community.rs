//! Resident-submitted tables: water-level reports (`reports.csv`) and
//! household registrations (`user_info.csv`). Both are append-only.

use std::path::PathBuf;

use crate::logging::{self, Subsystem};
use crate::model::{CommunityReport, HouseholdRegistration};
use crate::store::{CsvTable, REPORTS_HEADER, StoreResult, USER_INFO_HEADER};

pub struct ReportStore {
    table: CsvTable<CommunityReport>,
}

impl ReportStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { table: CsvTable::new(path, REPORTS_HEADER) }
    }

    pub fn exists(&self) -> bool {
        self.table.exists()
    }

    pub fn ensure(&self) -> StoreResult<()> {
        self.table.ensure()
    }

    pub fn append(&self, report: &CommunityReport) -> StoreResult<()> {
        self.table.append(report)?;
        logging::info(
            Subsystem::Reports,
            Some(&report.report_id),
            &format!("Report saved: level {} at ({:.4}, {:.4})", report.level, report.lat, report.lon),
        );
        Ok(())
    }

    pub fn read_all(&self) -> StoreResult<Vec<CommunityReport>> {
        if !self.table.exists() {
            return Ok(Vec::new());
        }
        self.table.read_all()
    }
}

pub struct RegistrationStore {
    table: CsvTable<HouseholdRegistration>,
}

impl RegistrationStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { table: CsvTable::new(path, USER_INFO_HEADER) }
    }

    pub fn exists(&self) -> bool {
        self.table.exists()
    }

    pub fn ensure(&self) -> StoreResult<()> {
        self.table.ensure()
    }

    pub fn append(&self, registration: &HouseholdRegistration) -> StoreResult<()> {
        self.table.append(registration)?;
        logging::info(
            Subsystem::Registry,
            None,
            &format!(
                "Household registered: {} ({} members, {})",
                registration.name, registration.family_members, registration.barangay
            ),
        );
        Ok(())
    }

    pub fn read_all(&self) -> StoreResult<Vec<HouseholdRegistration>> {
        if !self.table.exists() {
            return Ok(Vec::new());
        }
        self.table.read_all()
    }
}
