//! Operation pricing.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::workflow::{Step, StepKind};

/// Price table used by the estimators.
///
/// Two separate accountings run side by side: `operation_costs` prices every
/// step kind in dollars, while `vibe_unit_cost` and `spec_unit_cost` price the
/// synthetic quota units a zero-based solution consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostModel {
    /// Dollar cost of one vibe unit
    pub vibe_unit_cost: f64,
    /// Dollar cost of one spec unit
    pub spec_unit_cost: f64,
    /// Dollar cost per operation, keyed by step kind
    pub operation_costs: BTreeMap<String, f64>,
}

impl Default for CostModel {
    fn default() -> Self {
        let mut operation_costs = BTreeMap::new();
        operation_costs.insert(StepKind::Vibe.as_str().to_string(), 0.04);
        operation_costs.insert(StepKind::Spec.as_str().to_string(), 0.20);
        operation_costs.insert(StepKind::Hook.as_str().to_string(), 0.02);
        operation_costs.insert(StepKind::Steering.as_str().to_string(), 0.01);
        Self {
            vibe_unit_cost: 0.04,
            spec_unit_cost: 0.20,
            operation_costs,
        }
    }
}

impl CostModel {
    /// Create the default price table.
    pub fn new() -> Self {
        Self::default()
    }

    /// A model with no operation prices; every step falls back to its own
    /// quota cost.
    pub fn step_priced() -> Self {
        Self {
            operation_costs: BTreeMap::new(),
            ..Self::default()
        }
    }

    /// Set the price of one operation kind.
    pub fn with_operation_cost(mut self, kind: StepKind, cost: f64) -> Self {
        self.operation_costs.insert(kind.as_str().to_string(), cost.max(0.0));
        self
    }

    /// Set the vibe unit cost.
    pub fn with_vibe_unit_cost(mut self, cost: f64) -> Self {
        self.vibe_unit_cost = cost.max(0.0);
        self
    }

    /// Set the spec unit cost.
    pub fn with_spec_unit_cost(mut self, cost: f64) -> Self {
        self.spec_unit_cost = cost.max(0.0);
        self
    }

    /// Price registered for a kind, if any.
    pub fn operation_cost(&self, kind: StepKind) -> Option<f64> {
        self.operation_costs.get(kind.as_str()).copied()
    }

    /// Price of a step: the table entry for its kind, else its own quota cost.
    pub fn price(&self, step: &Step) -> f64 {
        self.operation_cost(step.kind).unwrap_or(step.quota_cost)
    }

    /// Dollar cost of the given unit tallies.
    pub fn price_units(&self, vibe_units: f64, spec_units: f64) -> f64 {
        vibe_units * self.vibe_unit_cost + spec_units * self.spec_unit_cost
    }
}
