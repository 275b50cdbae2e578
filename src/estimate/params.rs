//! Per-call estimation parameters and the adjuster that applies them.
//!
//! Every estimator funnels its raw forecast through
//! [`ParameterAdjuster::adjust`], which runs three passes in a fixed order:
//!
//! 1. **Volume** scales consumption by `user_volume / reference_volume`.
//!    Volumes at either extreme lower confidence one level.
//! 2. **Sensitivity** scales consumption up (high) or down (low). High
//!    sensitivity raises confidence one level.
//! 3. **Constraints** cap vibes, specs and cost independently. A ceiling
//!    the unconstrained value reaches (or nearly reaches) lowers confidence
//!    one level.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::forecast::ConsumptionForecast;
use crate::workflow::Level;

/// Caller-supplied ceilings. Each is optional and enforced on its own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostConstraints {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_vibes: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_specs: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_cost: Option<f64>,
}

impl CostConstraints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_vibes(mut self, max: f64) -> Self {
        self.max_vibes = Some(max);
        self
    }

    pub fn with_max_specs(mut self, max: f64) -> Self {
        self.max_specs = Some(max);
        self
    }

    pub fn with_max_cost(mut self, max: f64) -> Self {
        self.max_cost = Some(max);
        self
    }

    /// Whether any ceiling is set.
    pub fn is_empty(&self) -> bool {
        self.max_vibes.is_none() && self.max_specs.is_none() && self.max_cost.is_none()
    }
}

/// Optional knobs supplied with a single estimation call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimationParameters {
    /// Expected number of users invoking the workflow
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_volume: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub performance_sensitivity: Option<Level>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_constraints: Option<CostConstraints>,
}

impl EstimationParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user_volume(mut self, volume: u64) -> Self {
        self.user_volume = Some(volume);
        self
    }

    pub fn with_performance_sensitivity(mut self, sensitivity: Level) -> Self {
        self.performance_sensitivity = Some(sensitivity);
        self
    }

    pub fn with_cost_constraints(mut self, constraints: CostConstraints) -> Self {
        self.cost_constraints = Some(constraints);
        self
    }

    /// Whether no parameter is set, so adjustment is a no-op.
    pub fn is_empty(&self) -> bool {
        self.user_volume.is_none()
            && self.performance_sensitivity.is_none()
            && self.cost_constraints.map_or(true, |c| c.is_empty())
    }
}

/// Tunables for [`ParameterAdjuster`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParameterAdjuster {
    /// Volume at which consumption is left unscaled
    pub reference_volume: u64,
    /// Volumes at or above this lower confidence
    pub high_volume_threshold: u64,
    /// Volumes at or below this lower confidence
    pub low_volume_threshold: u64,
    /// Consumption multiplier for high performance sensitivity
    pub high_sensitivity_factor: f64,
    /// Consumption multiplier for low performance sensitivity
    pub low_sensitivity_factor: f64,
    /// Fraction of a ceiling at which the constraint counts as tight (0.0 - 1.0)
    pub tight_constraint_ratio: f64,
}

impl Default for ParameterAdjuster {
    fn default() -> Self {
        Self {
            reference_volume: 100,
            high_volume_threshold: 1_000,
            low_volume_threshold: 9,
            high_sensitivity_factor: 1.2,
            low_sensitivity_factor: 0.9,
            tight_constraint_ratio: 0.9,
        }
    }
}

impl ParameterAdjuster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the reference volume (minimum 1).
    pub fn with_reference_volume(mut self, volume: u64) -> Self {
        self.reference_volume = volume.max(1);
        self
    }

    /// Set the tight-constraint ratio.
    pub fn with_tight_constraint_ratio(mut self, ratio: f64) -> Self {
        self.tight_constraint_ratio = ratio.clamp(0.0, 1.0);
        self
    }

    /// Apply `params` to a raw forecast, returning the adjusted forecast.
    pub fn adjust(
        &self,
        forecast: ConsumptionForecast,
        params: Option<&EstimationParameters>,
    ) -> ConsumptionForecast {
        let Some(params) = params else {
            return forecast;
        };

        let mut adjusted = forecast;

        if let Some(volume) = params.user_volume {
            let factor = volume as f64 / self.reference_volume.max(1) as f64;
            scale(&mut adjusted, factor);
            if volume >= self.high_volume_threshold || volume <= self.low_volume_threshold {
                adjusted.confidence = adjusted.confidence.lower();
            }
            debug!(
                scenario = %adjusted.scenario,
                volume,
                factor,
                confidence = %adjusted.confidence,
                "Applied volume adjustment"
            );
        }

        if let Some(sensitivity) = params.performance_sensitivity {
            let factor = match sensitivity {
                Level::High => self.high_sensitivity_factor,
                Level::Medium => 1.0,
                Level::Low => self.low_sensitivity_factor,
            };
            scale(&mut adjusted, factor);
            if sensitivity == Level::High {
                adjusted.confidence = adjusted.confidence.raise();
            }
            debug!(
                scenario = %adjusted.scenario,
                sensitivity = %sensitivity,
                factor,
                confidence = %adjusted.confidence,
                "Applied sensitivity adjustment"
            );
        }

        if let Some(constraints) = params.cost_constraints {
            let tight = [
                (constraints.max_vibes, adjusted.vibe_units),
                (constraints.max_specs, adjusted.spec_units),
                (constraints.max_cost, adjusted.estimated_cost),
            ]
            .into_iter()
            .any(|(ceiling, value)| {
                ceiling.is_some_and(|c| value > 0.0 && value >= c * self.tight_constraint_ratio)
            });

            if let Some(max) = constraints.max_vibes {
                adjusted.vibe_units = adjusted.vibe_units.min(max.max(0.0));
            }
            if let Some(max) = constraints.max_specs {
                adjusted.spec_units = adjusted.spec_units.min(max.max(0.0));
            }
            if let Some(max) = constraints.max_cost {
                adjusted.estimated_cost = adjusted.estimated_cost.min(max.max(0.0));
            }
            if tight {
                adjusted.confidence = adjusted.confidence.lower();
            }
            debug!(
                scenario = %adjusted.scenario,
                tight,
                vibes = adjusted.vibe_units,
                specs = adjusted.spec_units,
                cost = adjusted.estimated_cost,
                "Applied cost constraints"
            );
        }

        adjusted
    }
}

/// Multiply every consumption figure, breakdown included.
fn scale(forecast: &mut ConsumptionForecast, factor: f64) {
    let factor = factor.max(0.0);
    forecast.vibe_units *= factor;
    forecast.spec_units *= factor;
    forecast.estimated_cost *= factor;
    for entry in &mut forecast.breakdown {
        entry.cost *= factor;
    }
}
