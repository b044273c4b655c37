//! Map layer: shelter and sensor markers, exported as GeoJSON.
//!
//! Rendering is left to whatever consumes the GeoJSON (a Leaflet page, QGIS,
//! geojson.io). This module decides what goes on the map and how a sensor
//! marker is coloured.

use serde::Serialize;
use serde_json::{Value, json};
use std::fmt;

use crate::model::{SensorReading, Shelter};
use crate::stations::{MAP_CENTER, MAP_ZOOM};

/// Mean Earth radius used for great-circle distances, in km.
const EARTH_RADIUS_KM: f64 = 6371.0088;

// ---------------------------------------------------------------------------
// Marker colour bands
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerColor {
    Blue,
    Orange,
    Red,
}

impl fmt::Display for MarkerColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarkerColor::Blue => write!(f, "blue"),
            MarkerColor::Orange => write!(f, "orange"),
            MarkerColor::Red => write!(f, "red"),
        }
    }
}

/// Colour band for a sensor marker: below 50 cm blue, below 100 cm orange,
/// otherwise red.
pub fn sensor_color(water_level_cm: f64) -> MarkerColor {
    if water_level_cm < 50.0 {
        MarkerColor::Blue
    } else if water_level_cm < 100.0 {
        MarkerColor::Orange
    } else {
        MarkerColor::Red
    }
}

// ---------------------------------------------------------------------------
// Distance
// ---------------------------------------------------------------------------

/// Great-circle (haversine) distance between two WGS84 points, in km.
pub fn distance_km(from: (f64, f64), to: (f64, f64)) -> f64 {
    let (lat1, lon1) = (from.0.to_radians(), from.1.to_radians());
    let (lat2, lon2) = (to.0.to_radians(), to.1.to_radians());

    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;
    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * a.sqrt().asin()
}

/// The shelter closest to a point, with its distance in km.
pub fn nearest_shelter(lat: f64, lon: f64, shelters: &[Shelter]) -> Option<(&Shelter, f64)> {
    shelters
        .iter()
        .map(|s| (s, distance_km((lat, lon), (s.lat, s.lon))))
        .min_by(|a, b| a.1.total_cmp(&b.1))
}

// ---------------------------------------------------------------------------
// GeoJSON export
// ---------------------------------------------------------------------------

fn point(lat: f64, lon: f64) -> Value {
    // GeoJSON positions are [longitude, latitude].
    json!({ "type": "Point", "coordinates": [lon, lat] })
}

fn shelter_feature(shelter: &Shelter) -> Value {
    json!({
        "type": "Feature",
        "geometry": point(shelter.lat, shelter.lon),
        "properties": {
            "kind": "shelter",
            "name": shelter.name,
            "capacity": shelter.capacity,
        },
    })
}

fn sensor_feature(reading: &SensorReading) -> Value {
    json!({
        "type": "Feature",
        "geometry": point(reading.lat, reading.lon),
        "properties": {
            "kind": "sensor",
            "id": reading.id,
            "water_level": reading.water_level,
            "color": sensor_color(reading.water_level),
        },
    })
}

/// Build a GeoJSON `FeatureCollection` of shelters followed by sensors.
///
/// The initial view is carried as a foreign member (`view`) so a viewer can
/// centre the map without recomputing bounds.
pub fn feature_collection(shelters: &[Shelter], sensors: &[SensorReading]) -> Value {
    let features: Vec<Value> = shelters
        .iter()
        .map(shelter_feature)
        .chain(sensors.iter().map(sensor_feature))
        .collect();

    json!({
        "type": "FeatureCollection",
        "view": {
            "center": [MAP_CENTER.1, MAP_CENTER.0],
            "zoom": MAP_ZOOM,
        },
        "features": features,
    })
}
