/// Flood risk analysis for the AquaAlert service.
///
/// The scoring model is deliberately small: a weighted sum of normalized
/// rainfall, absolute sensor level, and a trend term measured against an
/// exponentially weighted baseline. Severity tiers and alert construction
/// live in `alert::thresholds`.
///
/// Submodules:
/// - `risk` — `RiskScorer`, the stateful score/trend computation.

pub mod risk;

/// Arithmetic mean of a sensor level set.
///
/// Returns `None` for an empty slice rather than NaN.
pub fn mean_level(levels: &[f64]) -> Option<f64> {
    if levels.is_empty() {
        return None;
    }
    Some(levels.iter().sum::<f64>() / levels.len() as f64)
}
