/// Simulated sensor updates
///
/// There is no live telemetry feed. When simulation is enabled, each cycle
/// nudges every sensor by the rainfall-driven rise plus a small integer noise
/// term, so the dashboard and the risk model have something moving to look at.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::model::SensorReading;

/// Default generator seed.
pub const DEFAULT_SEED: u64 = 42;

/// Rainfall (mm over 6 hours) that raises every sensor by 1 cm per cycle.
pub const RAIN_MM_PER_CM: f64 = 50.0;

/// Valid range of a simulated level, in cm.
pub const MIN_LEVEL_CM: f64 = 0.0;
pub const MAX_LEVEL_CM: f64 = 200.0;

/// Configuration for simulated sensor updates
#[derive(Debug, Clone, Copy)]
pub struct Simulator {
    /// Seed applied at the start of every step
    pub seed: u64,
}

impl Simulator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Apply one simulated update in place.
    ///
    /// `level = clamp(level + rain / 50 + noise, 0, 200)` with integer noise
    /// drawn uniformly from `-2..4`. The generator is re-seeded every call,
    /// so every step applies the same noise vector.
    pub fn step(&self, readings: &mut [SensorReading], rain_mm_6h: f64) {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let rise = rain_mm_6h / RAIN_MM_PER_CM;

        for reading in readings.iter_mut() {
            let noise = rng.gen_range(-2i32..4) as f64;
            reading.water_level = (reading.water_level + rise + noise).clamp(MIN_LEVEL_CM, MAX_LEVEL_CM);
        }
    }
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}
