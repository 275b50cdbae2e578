//! Forecast value objects produced by the estimators.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which estimation strategy produced a forecast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Scenario {
    Naive,
    Optimized,
    ZeroBased,
}

impl Scenario {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scenario::Naive => "naive",
            Scenario::Optimized => "optimized",
            Scenario::ZeroBased => "zero-based",
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// How far a forecast can be trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    /// One level more trustworthy, saturating at `High`.
    pub fn raise(self) -> Self {
        match self {
            Confidence::Low => Confidence::Medium,
            Confidence::Medium | Confidence::High => Confidence::High,
        }
    }

    /// One level less trustworthy, saturating at `Low`.
    pub fn lower(self) -> Self {
        match self {
            Confidence::High => Confidence::Medium,
            Confidence::Medium | Confidence::Low => Confidence::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::Low => "low",
            Confidence::Medium => "medium",
            Confidence::High => "high",
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Cost attributed to one step, or to a synthetic entry with no step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownEntry {
    /// Step the cost belongs to; `None` for synthetic entries
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step_id: Option<String>,
    pub description: String,
    pub cost: f64,
}

impl BreakdownEntry {
    /// Entry for a workflow step.
    pub fn step(step_id: impl Into<String>, description: impl Into<String>, cost: f64) -> Self {
        Self {
            step_id: Some(step_id.into()),
            description: description.into(),
            cost,
        }
    }

    /// Entry that does not correspond to any step.
    pub fn synthetic(description: impl Into<String>, cost: f64) -> Self {
        Self {
            step_id: None,
            description: description.into(),
            cost,
        }
    }

    /// Label shown in reports: the step id, or the description for
    /// synthetic entries.
    pub fn label(&self) -> &str {
        self.step_id.as_deref().unwrap_or(&self.description)
    }
}

/// Predicted consumption for one scenario.
///
/// Built once by an estimator and only read afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsumptionForecast {
    pub scenario: Scenario,
    pub vibe_units: f64,
    pub spec_units: f64,
    /// Estimated monetary cost in dollars
    pub estimated_cost: f64,
    pub confidence: Confidence,
    pub breakdown: Vec<BreakdownEntry>,
}

impl ConsumptionForecast {
    pub fn new(
        scenario: Scenario,
        vibe_units: f64,
        spec_units: f64,
        estimated_cost: f64,
        confidence: Confidence,
        breakdown: Vec<BreakdownEntry>,
    ) -> Self {
        Self {
            scenario,
            vibe_units,
            spec_units,
            estimated_cost,
            confidence,
            breakdown,
        }
    }

    /// Forecast with nothing consumed.
    pub fn zero(scenario: Scenario, confidence: Confidence) -> Self {
        Self::new(scenario, 0.0, 0.0, 0.0, confidence, Vec::new())
    }

    /// Vibe plus spec units.
    pub fn total_units(&self) -> f64 {
        self.vibe_units + self.spec_units
    }

    /// Sum of breakdown entry costs.
    pub fn breakdown_cost(&self) -> f64 {
        self.breakdown.iter().map(|e| e.cost).sum()
    }
}
