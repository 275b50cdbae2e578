//! Workflow descriptions consumed by the estimators.
//!
//! These types arrive from an upstream intent parser as camelCase JSON. The
//! estimators trust them, so callers at the input boundary should run the
//! `validate` methods first.

use std::collections::HashSet;
use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{Result, VibecastError};

/// Three-step qualitative scale used for risk, effort and sensitivity.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Low,
    #[default]
    Medium,
    High,
}

impl Level {
    /// Stable lowercase label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Low => "low",
            Level::Medium => "medium",
            Level::High => "high",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Kind of operation a step performs.
///
/// `Vibe` and `Spec` are the two billed quota categories; the remaining kinds
/// only contribute monetary cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    /// Free-form conversational request
    Vibe,
    /// Structured spec-driven request
    Spec,
    /// Automation hook fired on an event
    Hook,
    /// Steering file load
    Steering,
    /// External MCP tool call
    Mcp,
}

impl StepKind {
    /// Key used in cost model tables.
    pub fn as_str(&self) -> &'static str {
        match self {
            StepKind::Vibe => "vibe",
            StepKind::Spec => "spec",
            StepKind::Hook => "hook",
            StepKind::Steering => "steering",
            StepKind::Mcp => "mcp",
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A single operation in a workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: StepKind,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub inputs: Vec<String>,
    #[serde(default)]
    pub outputs: Vec<String>,
    /// Author-supplied price, used when the cost model has no entry for `kind`
    #[serde(default)]
    pub quota_cost: f64,
}

impl Step {
    /// Create a step with no inputs, outputs or fallback cost.
    pub fn new(id: impl Into<String>, kind: StepKind, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            description: description.into(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            quota_cost: 0.0,
        }
    }

    /// Set the fallback quota cost.
    pub fn with_quota_cost(mut self, cost: f64) -> Self {
        self.quota_cost = cost;
        self
    }

    /// Set the input data tags.
    pub fn with_inputs<I, S>(mut self, inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inputs = inputs.into_iter().map(Into::into).collect();
        self
    }

    /// Set the output data tags.
    pub fn with_outputs<I, S>(mut self, outputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.outputs = outputs.into_iter().map(Into::into).collect();
        self
    }
}

/// Directed data dependency between two steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DataFlow {
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub data_type: String,
    #[serde(default = "default_required")]
    pub required: bool,
}

fn default_required() -> bool {
    true
}

impl DataFlow {
    pub fn new(from: impl Into<String>, to: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            data_type: data_type.into(),
            required: true,
        }
    }
}

/// A developer workflow: ordered steps plus the data flowing between them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Workflow {
    pub id: String,
    #[serde(default)]
    pub steps: Vec<Step>,
    #[serde(default)]
    pub data_flow: Vec<DataFlow>,
    /// Caller-supplied complexity rating; drives naive confidence
    #[serde(default)]
    pub estimated_complexity: u32,
}

impl Workflow {
    /// Create an empty workflow.
    pub fn new(id: impl Into<String>, estimated_complexity: u32) -> Self {
        Self {
            id: id.into(),
            steps: Vec::new(),
            data_flow: Vec::new(),
            estimated_complexity,
        }
    }

    /// Append a step.
    pub fn with_step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    /// Append a data-flow edge.
    pub fn with_data_flow(mut self, edge: DataFlow) -> Self {
        self.data_flow.push(edge);
        self
    }

    /// Look up a step by id.
    pub fn step(&self, id: &str) -> Option<&Step> {
        self.steps.iter().find(|s| s.id == id)
    }

    /// Count steps of the given kind.
    pub fn count_kind(&self, kind: StepKind) -> usize {
        self.steps.iter().filter(|s| s.kind == kind).count()
    }

    /// Check that step ids are unique and every edge references known steps.
    pub fn validate(&self) -> Result<()> {
        let mut ids = HashSet::with_capacity(self.steps.len());
        for step in &self.steps {
            if step.id.trim().is_empty() {
                return Err(VibecastError::invalid_input(format!(
                    "workflow '{}' has a step with an empty id",
                    self.id
                )));
            }
            if !ids.insert(step.id.as_str()) {
                return Err(VibecastError::invalid_input(format!(
                    "workflow '{}' has duplicate step id '{}'",
                    self.id, step.id
                )));
            }
            if !step.quota_cost.is_finite() || step.quota_cost < 0.0 {
                return Err(VibecastError::invalid_input(format!(
                    "step '{}' has invalid quota cost {}",
                    step.id, step.quota_cost
                )));
            }
        }

        for edge in &self.data_flow {
            for endpoint in [&edge.from, &edge.to] {
                if !ids.contains(endpoint.as_str()) {
                    return Err(VibecastError::invalid_input(format!(
                        "data flow {} -> {} references unknown step '{}'",
                        edge.from, edge.to, endpoint
                    )));
                }
            }
        }

        Ok(())
    }
}

/// Category of an optimization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum OptimizationType {
    Batching,
    Caching,
    Decomposition,
    Parallelization,
    Consolidation,
    #[serde(other)]
    Other,
}

/// Author-asserted savings of an optimization, each as a 0-100 percentage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EstimatedSavings {
    /// Reduction in vibe units
    #[serde(default)]
    pub vibes: f64,
    /// Reduction in spec units
    #[serde(default)]
    pub specs: f64,
    /// Reduction in monetary cost
    #[serde(default)]
    pub percentage: f64,
}

impl EstimatedSavings {
    pub fn new(vibes: f64, specs: f64, percentage: f64) -> Self {
        Self {
            vibes,
            specs,
            percentage,
        }
    }
}

/// A proposed improvement to a subset of a workflow's steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Optimization {
    #[serde(rename = "type")]
    pub optimization_type: OptimizationType,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub affected_steps: Vec<String>,
    #[serde(default)]
    pub estimated_savings: EstimatedSavings,
}

impl Optimization {
    pub fn new<I, S>(optimization_type: OptimizationType, affected_steps: I, savings: EstimatedSavings) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            optimization_type,
            description: String::new(),
            affected_steps: affected_steps.into_iter().map(Into::into).collect(),
            estimated_savings: savings,
        }
    }

    /// Whether this optimization touches the given step.
    pub fn affects(&self, step_id: &str) -> bool {
        self.affected_steps.iter().any(|id| id == step_id)
    }
}

/// A workflow together with the optimizations proposed for it.
///
/// The optimization list is owned here; the source workflow is referenced by
/// id only and never modified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OptimizedWorkflow {
    pub workflow: Workflow,
    #[serde(default)]
    pub optimizations: Vec<Optimization>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_workflow_id: Option<String>,
}

impl OptimizedWorkflow {
    /// Wrap a workflow, recording its id as the original.
    pub fn new(workflow: Workflow) -> Self {
        let original_workflow_id = Some(workflow.id.clone());
        Self {
            workflow,
            optimizations: Vec::new(),
            original_workflow_id,
        }
    }

    /// Append an optimization.
    pub fn with_optimization(mut self, optimization: Optimization) -> Self {
        self.optimizations.push(optimization);
        self
    }

    /// Validate the wrapped workflow and every savings percentage.
    pub fn validate(&self) -> Result<()> {
        self.workflow.validate()?;
        for (index, opt) in self.optimizations.iter().enumerate() {
            let s = &opt.estimated_savings;
            for (name, value) in [("vibes", s.vibes), ("specs", s.specs), ("percentage", s.percentage)] {
                if !(0.0..=100.0).contains(&value) {
                    return Err(VibecastError::invalid_input(format!(
                        "optimization #{} has {} savings {} outside 0-100",
                        index, name, value
                    )));
                }
            }
        }
        Ok(())
    }
}

/// A radical redesign that replaces the workflow outright.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ZeroBasedSolution {
    pub radical_approach: String,
    #[serde(default)]
    pub challenged_assumptions: Vec<String>,
    /// Claimed savings against a full redesign baseline, 0-100
    pub potential_savings: f64,
    #[serde(default)]
    pub implementation_risk: Level,
}

impl ZeroBasedSolution {
    pub fn new(radical_approach: impl Into<String>, potential_savings: f64, implementation_risk: Level) -> Self {
        Self {
            radical_approach: radical_approach.into(),
            challenged_assumptions: Vec::new(),
            potential_savings,
            implementation_risk,
        }
    }

    /// Check the savings claim is a percentage.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=100.0).contains(&self.potential_savings) {
            return Err(VibecastError::invalid_input(format!(
                "potential savings {} outside 0-100",
                self.potential_savings
            )));
        }
        Ok(())
    }
}
