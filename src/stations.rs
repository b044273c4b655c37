/// Reference registry for the Bacuag flood awareness deployment.
///
/// Defines the water-level sensors and evacuation shelters that a fresh data
/// directory is seeded with, plus the map view they are displayed in. Once
/// the data files exist they are the source of truth for sensors and shelters.

use crate::model::{SensorReading, Shelter};

// ---------------------------------------------------------------------------
// Map view
// ---------------------------------------------------------------------------

/// WGS84 centre of the dashboard map (Bacuag poblacion).
pub const MAP_CENTER: (f64, f64) = (9.6113, 125.6345);

/// Initial map zoom level.
pub const MAP_ZOOM: u8 = 14;

// ---------------------------------------------------------------------------
// Sensor sites
// ---------------------------------------------------------------------------

/// A water-level sensor site and its initial reading.
pub struct SensorSite {
    /// Short identifier, "S-" followed by a two-digit number.
    pub id: &'static str,
    pub latitude: f64,
    pub longitude: f64,
    /// Water level written on first start, in cm.
    pub initial_level_cm: f64,
}

pub static SENSOR_REGISTRY: &[SensorSite] = &[
    SensorSite { id: "S-01", latitude: 9.6113, longitude: 125.6345, initial_level_cm: 10.0 },
    SensorSite { id: "S-02", latitude: 9.6150, longitude: 125.6300, initial_level_cm: 8.0 },
    SensorSite { id: "S-03", latitude: 9.6060, longitude: 125.6400, initial_level_cm: 5.0 },
];

/// Initial sensor readings for a new data directory.
pub fn reference_sensors() -> Vec<SensorReading> {
    SENSOR_REGISTRY
        .iter()
        .map(|s| SensorReading {
            id: s.id.to_string(),
            lat: s.latitude,
            lon: s.longitude,
            water_level: s.initial_level_cm,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Shelters
// ---------------------------------------------------------------------------

pub struct ShelterSite {
    pub name: &'static str,
    pub latitude: f64,
    pub longitude: f64,
    pub capacity: u32,
}

/// Designated evacuation centres, in the order `shelters.csv` is seeded.
pub static SHELTER_REGISTRY: &[ShelterSite] = &[
    ShelterSite { name: "Bacuag Municipal Gym", latitude: 9.6107, longitude: 125.6351, capacity: 500 },
    ShelterSite { name: "Bacuag National High School", latitude: 9.6095, longitude: 125.6370, capacity: 300 },
    ShelterSite { name: "Bacuag Barangay Hall", latitude: 9.6130, longitude: 125.6335, capacity: 200 },
    ShelterSite { name: "Bacuag Evacuation Center", latitude: 9.6142, longitude: 125.6322, capacity: 400 },
    ShelterSite { name: "Poblacion Covered Court", latitude: 9.6125, longitude: 125.6368, capacity: 250 },
];

pub fn reference_shelters() -> Vec<Shelter> {
    SHELTER_REGISTRY
        .iter()
        .map(|s| Shelter {
            name: s.name.to_string(),
            lat: s.latitude,
            lon: s.longitude,
            capacity: s.capacity,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
