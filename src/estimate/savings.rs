//! Pairwise savings between two forecasts.

use serde::{Deserialize, Serialize};

use super::forecast::ConsumptionForecast;

/// Round a non-negative percentage half-up to one decimal place.
///
/// This is the only rounding applied by the crate; unit tallies and costs
/// stay unrounded.
pub fn round_percentage(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    (value * 10.0 + 0.5).floor() / 10.0
}

/// Reduction from `before` to `after` as a percentage of `before`.
///
/// Zero when `before` is zero, and never negative.
pub fn reduction_percentage(before: f64, after: f64) -> f64 {
    if before <= 0.0 {
        return 0.0;
    }
    (((before - after) / before).max(0.0)) * 100.0
}

/// How much cheaper `after` is than `before`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SavingsResult {
    /// Vibe unit reduction, percent
    pub vibe_reduction: f64,
    /// Spec unit reduction, percent
    pub spec_reduction: f64,
    /// Monetary cost reduction, percent
    pub cost_reduction: f64,
    /// Absolute vibe units saved
    pub vibes_saved: f64,
    /// Absolute spec units saved
    pub specs_saved: f64,
    /// Absolute dollars saved
    pub cost_saved: f64,
    /// Mean of the three percentage reductions
    pub overall_percentage: f64,
}

impl SavingsResult {
    /// Whether nothing was saved in any dimension.
    pub fn is_zero(&self) -> bool {
        self.overall_percentage == 0.0 && self.vibes_saved == 0.0 && self.specs_saved == 0.0 && self.cost_saved == 0.0
    }
}

/// Compare two forecasts. Pure, and never reports negative savings.
pub fn calculate_savings(before: &ConsumptionForecast, after: &ConsumptionForecast) -> SavingsResult {
    let vibe = reduction_percentage(before.vibe_units, after.vibe_units);
    let spec = reduction_percentage(before.spec_units, after.spec_units);
    let cost = reduction_percentage(before.estimated_cost, after.estimated_cost);

    SavingsResult {
        vibe_reduction: round_percentage(vibe),
        spec_reduction: round_percentage(spec),
        cost_reduction: round_percentage(cost),
        vibes_saved: (before.vibe_units - after.vibe_units).max(0.0),
        specs_saved: (before.spec_units - after.spec_units).max(0.0),
        cost_saved: (before.estimated_cost - after.estimated_cost).max(0.0),
        overall_percentage: round_percentage((vibe + spec + cost) / 3.0),
    }
}
