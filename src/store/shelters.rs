//! Evacuation shelter table (`shelters.csv`). Seeded once; edited by hand.

use std::path::PathBuf;

use crate::model::Shelter;
use crate::store::{CsvTable, SHELTERS_HEADER, StoreResult};

pub struct ShelterStore {
    table: CsvTable<Shelter>,
}

impl ShelterStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { table: CsvTable::new(path, SHELTERS_HEADER) }
    }

    pub fn exists(&self) -> bool {
        self.table.exists()
    }

    pub fn read(&self) -> StoreResult<Vec<Shelter>> {
        self.table.read_all()
    }

    /// Write the initial shelter list.
    pub fn seed(&self, shelters: &[Shelter]) -> StoreResult<()> {
        self.table.replace_all(shelters)
    }
}
