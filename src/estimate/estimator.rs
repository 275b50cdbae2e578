//! Consumption estimators.
//!
//! Three strategies share one [`ConsumptionEstimator`]: naive (walk the
//! steps as written), optimized (apply author-asserted savings to the naive
//! figures) and zero-based (price a radical redesign as one synthetic
//! operation). All three finish by running the parameter adjuster.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::cost_model::CostModel;
use super::forecast::{BreakdownEntry, Confidence, ConsumptionForecast, Scenario};
use super::params::{EstimationParameters, ParameterAdjuster};
use crate::config::EngineConfig;
use crate::workflow::{Level, OptimizedWorkflow, StepKind, Workflow, ZeroBasedSolution};

/// A zero-based redesign always keeps at least this many vibe units.
pub const MIN_ZERO_BASED_VIBES: f64 = 1.0;

/// Complexity at or below which the naive estimate is trusted.
const SIMPLE_COMPLEXITY: u32 = 2;
/// Complexity at or above which the naive estimate is distrusted.
const COMPLEX_COMPLEXITY: u32 = 10;

/// Full-redesign baseline that zero-based savings percentages apply to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZeroBasedBaseline {
    pub vibe_units: f64,
    pub spec_units: f64,
}

impl Default for ZeroBasedBaseline {
    fn default() -> Self {
        Self {
            vibe_units: 10.0,
            spec_units: 2.0,
        }
    }
}

/// Naive-forecast confidence for a caller-supplied complexity.
pub fn complexity_confidence(complexity: u32) -> Confidence {
    if complexity <= SIMPLE_COMPLEXITY {
        Confidence::High
    } else if complexity >= COMPLEX_COMPLEXITY {
        Confidence::Low
    } else {
        Confidence::Medium
    }
}

/// Zero-based confidence for an implementation risk.
pub fn risk_confidence(risk: Level) -> Confidence {
    match risk {
        Level::Low => Confidence::High,
        Level::Medium => Confidence::Medium,
        Level::High => Confidence::Low,
    }
}

/// Percentage (0-100) as a clamped fraction.
fn fraction(percentage: f64) -> f64 {
    (percentage / 100.0).clamp(0.0, 1.0)
}

/// Summed reduction fractions for one step.
#[derive(Debug, Default, Clone, Copy)]
struct StepReduction {
    cost: f64,
    vibes: f64,
    specs: f64,
}

/// Estimates consumption for workflows and redesigns.
///
/// The estimator owns its cost model. Estimation takes `&self` and can be
/// shared across threads; replacing the model takes `&mut self`.
#[derive(Debug, Clone, Default)]
pub struct ConsumptionEstimator {
    cost_model: CostModel,
    adjuster: ParameterAdjuster,
    zero_based: ZeroBasedBaseline,
}

impl ConsumptionEstimator {
    /// Create an estimator with the given cost model and default tunables.
    pub fn new(cost_model: CostModel) -> Self {
        Self {
            cost_model,
            adjuster: ParameterAdjuster::default(),
            zero_based: ZeroBasedBaseline::default(),
        }
    }

    /// Create an estimator from loaded configuration.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            cost_model: config.cost_model.clone(),
            adjuster: config.adjuster.clone(),
            zero_based: config.zero_based.clone(),
        }
    }

    /// Use a custom parameter adjuster.
    pub fn with_adjuster(mut self, adjuster: ParameterAdjuster) -> Self {
        self.adjuster = adjuster;
        self
    }

    /// Use a custom zero-based baseline.
    pub fn with_zero_based_baseline(mut self, baseline: ZeroBasedBaseline) -> Self {
        self.zero_based = baseline;
        self
    }

    /// Replace the cost model for subsequent calls.
    pub fn set_cost_model(&mut self, cost_model: CostModel) {
        self.cost_model = cost_model;
    }

    /// Get the active cost model.
    pub fn cost_model(&self) -> &CostModel {
        &self.cost_model
    }

    /// Forecast a workflow executed exactly as written.
    pub fn estimate_naive(
        &self,
        workflow: &Workflow,
        params: Option<&EstimationParameters>,
    ) -> ConsumptionForecast {
        let forecast = self.adjuster.adjust(self.naive_raw(workflow), params);
        debug!(
            workflow = %workflow.id,
            steps = workflow.steps.len(),
            vibes = forecast.vibe_units,
            specs = forecast.spec_units,
            cost = forecast.estimated_cost,
            confidence = %forecast.confidence,
            "Estimated naive consumption"
        );
        forecast
    }

    /// Forecast a workflow after applying its optimizations.
    pub fn estimate_optimized(
        &self,
        optimized: &OptimizedWorkflow,
        params: Option<&EstimationParameters>,
    ) -> ConsumptionForecast {
        let workflow = &optimized.workflow;
        let naive = self.naive_raw(workflow);

        let mut reductions: HashMap<&str, StepReduction> = HashMap::new();
        for optimization in &optimized.optimizations {
            let savings = optimization.estimated_savings;
            for step_id in &optimization.affected_steps {
                let Some(step) = workflow.step(step_id) else {
                    debug!(
                        workflow = %workflow.id,
                        step = %step_id,
                        "Optimization references unknown step, ignoring"
                    );
                    continue;
                };
                let reduction = reductions.entry(step.id.as_str()).or_default();
                reduction.cost += fraction(savings.percentage);
                match step.kind {
                    StepKind::Vibe => reduction.vibes += fraction(savings.vibes),
                    StepKind::Spec => reduction.specs += fraction(savings.specs),
                    _ => {}
                }
            }
        }

        let mut vibes_removed = 0.0;
        let mut specs_removed = 0.0;
        let mut breakdown = Vec::with_capacity(naive.breakdown.len());
        for (step, entry) in workflow.steps.iter().zip(naive.breakdown) {
            match reductions.get(step.id.as_str()) {
                Some(reduction) => {
                    vibes_removed += reduction.vibes.min(1.0);
                    specs_removed += reduction.specs.min(1.0);
                    let cost = entry.cost * (1.0 - reduction.cost).max(0.0);
                    breakdown.push(BreakdownEntry { cost, ..entry });
                }
                None => breakdown.push(entry),
            }
        }

        let raw = ConsumptionForecast::new(
            Scenario::Optimized,
            (naive.vibe_units - vibes_removed).max(0.0),
            (naive.spec_units - specs_removed).max(0.0),
            breakdown.iter().map(|e| e.cost).sum::<f64>().max(0.0),
            Confidence::High,
            breakdown,
        );

        let forecast = self.adjuster.adjust(raw, params);
        debug!(
            workflow = %workflow.id,
            optimizations = optimized.optimizations.len(),
            vibes = forecast.vibe_units,
            specs = forecast.spec_units,
            cost = forecast.estimated_cost,
            "Estimated optimized consumption"
        );
        forecast
    }

    /// Forecast a zero-based redesign as a single synthetic operation.
    pub fn estimate_zero_based(
        &self,
        solution: &ZeroBasedSolution,
        params: Option<&EstimationParameters>,
    ) -> ConsumptionForecast {
        let retained = 1.0 - fraction(solution.potential_savings);
        let vibe_units = (self.zero_based.vibe_units * retained).max(MIN_ZERO_BASED_VIBES);
        let spec_units = (self.zero_based.spec_units * retained).max(0.0);
        let cost = self.cost_model.price_units(vibe_units, spec_units);

        let raw = ConsumptionForecast::new(
            Scenario::ZeroBased,
            vibe_units,
            spec_units,
            cost,
            risk_confidence(solution.implementation_risk),
            vec![BreakdownEntry::synthetic(&solution.radical_approach, cost)],
        );

        let adjusted = self.adjuster.adjust(raw, params);
        let forecast = ConsumptionForecast {
            vibe_units: adjusted.vibe_units.max(MIN_ZERO_BASED_VIBES),
            ..adjusted
        };
        debug!(
            potential_savings = solution.potential_savings,
            risk = %solution.implementation_risk,
            vibes = forecast.vibe_units,
            specs = forecast.spec_units,
            cost = forecast.estimated_cost,
            "Estimated zero-based consumption"
        );
        forecast
    }

    fn naive_raw(&self, workflow: &Workflow) -> ConsumptionForecast {
        let mut vibe_units = 0.0;
        let mut spec_units = 0.0;
        let mut cost = 0.0;
        let mut breakdown = Vec::with_capacity(workflow.steps.len());

        for step in &workflow.steps {
            match step.kind {
                StepKind::Vibe => vibe_units += 1.0,
                StepKind::Spec => spec_units += 1.0,
                _ => {}
            }
            let price = self.cost_model.price(step);
            cost += price;
            breakdown.push(BreakdownEntry::step(&step.id, &step.description, price));
        }

        ConsumptionForecast::new(
            Scenario::Naive,
            vibe_units,
            spec_units,
            cost,
            complexity_confidence(workflow.estimated_complexity),
            breakdown,
        )
    }
}
