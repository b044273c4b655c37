//! AquaAlert: community flood awareness service.
//!
//! Scores flood risk from rainfall and water-level sensors, appends
//! threshold-based alerts to a flat-file log, and keeps resident reports,
//! household registrations and evacuation shelters alongside.

pub mod alert;
pub mod analysis;
pub mod config;
pub mod forms;
pub mod guide;
pub mod logging;
pub mod map;
pub mod model;
pub mod monitor;
pub mod simulate;
pub mod stations;
pub mod store;
