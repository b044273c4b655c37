//! Heuristic flood risk scoring.
//!
//! `RiskScorer` combines three normalized terms into a score in `[0, 1]`:
//!
//! | term  | source                         | weight |
//! |-------|--------------------------------|--------|
//! | `r`   | rainfall over the last 6 hours | 0.5    |
//! | `s`   | mean sensor water level        | 0.3    |
//! | `t`   | rise of the mean above an EWMA | 0.2    |
//!
//! plus a small `0.05 * r * s` interaction term, capped at 1.0.
//!
//! # Baseline lifecycle
//! The EWMA baseline is owned by the scorer instance. It starts uninitialized,
//! is set to the first observed mean on the first evaluation, and is then
//! advanced on every call. It is never persisted; a new process (or a new
//! `RiskScorer`) starts from scratch.

use crate::analysis::mean_level;

/// Smoothing factor applied to the newest mean.
pub const EWMA_ALPHA: f64 = 0.3;

/// Rainfall (mm over 6 hours) at which the rainfall term saturates.
pub const RAIN_SATURATION_MM: f64 = 200.0;

/// Mean sensor level (cm) at which the sensor term saturates.
pub const LEVEL_SATURATION_CM: f64 = 100.0;

/// Rise above baseline (cm) at which the trend term saturates.
pub const TREND_SATURATION_CM: f64 = 20.0;

const WEIGHT_RAIN: f64 = 0.5;
const WEIGHT_LEVEL: f64 = 0.3;
const WEIGHT_TREND: f64 = 0.2;
const WEIGHT_INTERACTION: f64 = 0.05;

/// Stateful flood risk scorer. Construct one per monitoring session.
#[derive(Debug, Clone, Default)]
pub struct RiskScorer {
    ewma: Option<f64>,
}

impl RiskScorer {
    /// Create a scorer with an uninitialized baseline.
    pub fn new() -> Self {
        Self { ewma: None }
    }

    /// Current baseline, or `None` before the first evaluation.
    pub fn baseline(&self) -> Option<f64> {
        self.ewma
    }

    /// Advance the baseline with the current sensor levels and return the
    /// trend term in `[0, 1]`.
    ///
    /// The first call only initializes the baseline and returns 0. Later calls
    /// measure the rise against the *updated* baseline, which damps a single
    /// cycle's spike.
    ///
    /// # Panics
    /// Panics if `sensor_levels` is empty. Callers must reject an empty
    /// sensor set before scoring.
    pub fn update_trend(&mut self, sensor_levels: &[f64]) -> f64 {
        let current = require_mean(sensor_levels);

        let Some(previous) = self.ewma else {
            self.ewma = Some(current);
            return 0.0;
        };

        let updated = EWMA_ALPHA * current + (1.0 - EWMA_ALPHA) * previous;
        self.ewma = Some(updated);

        let trend = (current - updated).max(0.0);
        (trend / TREND_SATURATION_CM).min(1.0)
    }

    /// Compute the flood risk score in `[0, 1]`.
    ///
    /// Has the side effect of advancing the baseline (see `update_trend`).
    ///
    /// # Panics
    /// Panics if `sensor_levels` is empty.
    pub fn score(&mut self, rain_mm_6h: f64, sensor_levels: &[f64]) -> f64 {
        let r = (rain_mm_6h / RAIN_SATURATION_MM).min(1.0);
        let s = (require_mean(sensor_levels) / LEVEL_SATURATION_CM).min(1.0);
        let t = self.update_trend(sensor_levels);

        let risk = WEIGHT_RAIN * r + WEIGHT_LEVEL * s + WEIGHT_TREND * t + WEIGHT_INTERACTION * r * s;
        risk.min(1.0)
    }
}

fn require_mean(sensor_levels: &[f64]) -> f64 {
    match mean_level(sensor_levels) {
        Some(mean) => mean,
        None => panic!("risk scoring requires at least one sensor reading"),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const REFERENCE_LEVELS: [f64; 3] = [10.0, 8.0, 5.0];

    // --- Trend --------------------------------------------------------------

    #[test]
    fn test_first_trend_initializes_baseline_and_returns_zero() {
        let mut scorer = RiskScorer::new();
        assert_eq!(scorer.baseline(), None);

        let trend = scorer.update_trend(&[100.0, 120.0, 140.0]);
        assert_eq!(trend, 0.0, "first call must not report a rise against a missing baseline");
        assert_eq!(scorer.baseline(), Some(120.0));
    }

    #[test]
    fn test_trend_uses_post_update_baseline() {
        let mut scorer = RiskScorer::new();
        scorer.update_trend(&[10.0, 10.0, 10.0]);

        // ewma = 0.3 * 30 + 0.7 * 10 = 16; rise = 30 - 16 = 14 → 14 / 20.
        let trend = scorer.update_trend(&[30.0, 30.0, 30.0]);
        assert!((scorer.baseline().unwrap() - 16.0).abs() < 1e-12);
        assert!((trend - 0.7).abs() < 1e-12, "got {}", trend);
    }

    #[test]
    fn test_repeated_identical_input_changes_trend_until_converged() {
        let mut scorer = RiskScorer::new();
        scorer.update_trend(&[10.0]);

        let second = scorer.update_trend(&[30.0]);
        let third = scorer.update_trend(&[30.0]);
        // ewma 16 → 20.2; rise 14 → 9.8.
        assert!((second - 0.7).abs() < 1e-12);
        assert!((third - 0.49).abs() < 1e-12);
        assert!(third < second, "trend should decay as the baseline catches up");
    }

    #[test]
    fn test_converged_baseline_gives_stable_zero_trend() {
        let mut scorer = RiskScorer::new();
        for _ in 0..3 {
            assert!(scorer.update_trend(&[42.0, 42.0]) < 1e-12);
        }
        assert!((scorer.baseline().unwrap() - 42.0).abs() < 1e-9);
    }

    #[test]
    fn test_falling_levels_give_zero_trend() {
        let mut scorer = RiskScorer::new();
        scorer.update_trend(&[80.0]);
        assert_eq!(scorer.update_trend(&[20.0]), 0.0);
    }

    #[test]
    fn test_trend_saturates_at_one() {
        let mut scorer = RiskScorer::new();
        scorer.update_trend(&[0.0]);
        // ewma = 60; rise = 140 → 7.0 before the cap.
        assert_eq!(scorer.update_trend(&[200.0]), 1.0);
    }

    #[test]
    #[should_panic(expected = "at least one sensor reading")]
    fn test_empty_sensor_set_fails_fast() {
        let mut scorer = RiskScorer::new();
        scorer.score(20.0, &[]);
    }

    // --- Score --------------------------------------------------------------

    #[test]
    fn test_reference_sensors_without_rain_score_low() {
        let mut scorer = RiskScorer::new();
        let risk = scorer.score(0.0, &REFERENCE_LEVELS);
        // r = 0, s = 0.0766..., t = 0 → 0.3 * s.
        let expected = 0.3 * (23.0 / 3.0) / 100.0;
        assert!((risk - expected).abs() < 1e-12, "got {}", risk);
        assert!((risk - 0.023).abs() < 1e-3);
    }

    #[test]
    fn test_score_includes_interaction_term() {
        let mut scorer = RiskScorer::new();
        let risk = scorer.score(100.0, &[50.0]);
        // r = 0.5, s = 0.5 → 0.25 + 0.15 + 0 + 0.0125.
        assert!((risk - 0.4125).abs() < 1e-12, "got {}", risk);
    }

    #[test]
    fn test_score_capped_at_one() {
        let mut scorer = RiskScorer::new();
        scorer.score(300.0, &[0.0]);
        let risk = scorer.score(300.0, &[200.0, 200.0]);
        // 0.5 + 0.3 + 0.2 + 0.05 = 1.05 before the cap.
        assert_eq!(risk, 1.0);
    }

    #[test]
    fn test_score_bounded_over_operator_range() {
        let level_sets: [&[f64]; 4] = [&[0.0], &REFERENCE_LEVELS, &[60.0, 130.0, 90.0], &[200.0, 200.0, 200.0]];
        for levels in level_sets {
            let mut scorer = RiskScorer::new();
            for rain in (0..=300).step_by(10) {
                let risk = scorer.score(rain as f64, levels);
                assert!(
                    (0.0..=1.0).contains(&risk),
                    "risk {} out of bounds for rain {} and levels {:?}",
                    risk,
                    rain,
                    levels
                );
            }
        }
    }

    #[test]
    fn test_score_non_decreasing_in_rainfall() {
        let mut previous = 0.0;
        for rain in 0..=300 {
            let mut scorer = RiskScorer::new();
            let risk = scorer.score(rain as f64, &REFERENCE_LEVELS);
            assert!(risk >= previous, "score fell from {} to {} at rain {}", previous, risk, rain);
            previous = risk;
        }
    }

    #[test]
    fn test_score_saturates_above_200mm() {
        let at_cap = RiskScorer::new().score(200.0, &REFERENCE_LEVELS);
        let above_cap = RiskScorer::new().score(300.0, &REFERENCE_LEVELS);
        assert_eq!(at_cap, above_cap);
    }

    #[test]
    fn test_score_advances_baseline() {
        let mut scorer = RiskScorer::new();
        scorer.score(0.0, &[10.0]);
        scorer.score(0.0, &[20.0]);
        assert!((scorer.baseline().unwrap() - 13.0).abs() < 1e-12);
    }
}
