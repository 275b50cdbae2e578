//! Multi-scenario recommendation.
//!
//! The naive forecast is the baseline. Optimized and zero-based forecasts are
//! compared against it to give conservative and bold savings figures, and
//! their mean gives the balanced figure. The recommendation comes from an
//! ordered rule table, evaluated top-down; the first matching rule wins.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, VibecastError};
use crate::estimate::{calculate_savings, round_percentage, Confidence, ConsumptionForecast, Scenario};

/// Bold savings above this may justify a redesign.
const BOLD_THRESHOLD: f64 = 80.0;
/// Conservative savings below this are not worth the effort.
const MINIMAL_THRESHOLD: f64 = 10.0;
/// Conservative savings needed before the balanced path is considered.
const BALANCED_CONSERVATIVE_THRESHOLD: f64 = 15.0;
/// Balanced savings needed for the balanced path.
const BALANCED_THRESHOLD: f64 = 30.0;

/// Recommended implementation track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Approach {
    /// No naive baseline was supplied
    NoBaseline,
    /// Only the naive scenario is present
    AlreadyEfficient,
    /// Zero-based redesign
    Bold,
    /// Savings too small to justify effort
    MinimalOptimization,
    /// Middle path between incremental and radical
    Balanced,
    /// Incremental optimization
    Conservative,
}

impl Approach {
    /// Human-readable recommendation.
    pub fn recommendation(&self) -> &'static str {
        match self {
            Approach::NoBaseline => {
                "No naive baseline supplied; estimate the workflow as written before comparing approaches"
            }
            Approach::AlreadyEfficient => {
                "Workflow is already efficient; there is no alternative scenario to compare against"
            }
            Approach::Bold => "Bold approach: pursue the zero-based redesign for maximum savings",
            Approach::MinimalOptimization => {
                "Minimal optimization: the savings gap is too small to justify restructuring"
            }
            Approach::Balanced => {
                "Balanced approach: apply the optimizations and adopt selected zero-based ideas"
            }
            Approach::Conservative => "Conservative approach: apply the incremental optimizations",
        }
    }
}

impl fmt::Display for Approach {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.recommendation())
    }
}

/// Figures the rule table inspects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenarioComparison {
    pub conservative_savings: f64,
    pub balanced_savings: f64,
    pub bold_savings: f64,
    pub naive_confidence: Option<Confidence>,
    pub optimized_confidence: Option<Confidence>,
    pub zero_based_confidence: Option<Confidence>,
}

impl ScenarioComparison {
    fn has_naive(&self) -> bool {
        self.naive_confidence.is_some()
    }

    fn has_alternative(&self) -> bool {
        self.optimized_confidence.is_some() || self.zero_based_confidence.is_some()
    }
}

/// One row of the decision table.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub applies: fn(&ScenarioComparison) -> bool,
    pub approach: Approach,
}

fn missing_baseline(c: &ScenarioComparison) -> bool {
    !c.has_naive()
}

fn nothing_to_compare(c: &ScenarioComparison) -> bool {
    !c.has_alternative()
}

fn bold_and_trusted(c: &ScenarioComparison) -> bool {
    c.bold_savings > BOLD_THRESHOLD
        && c.naive_confidence == Some(Confidence::High)
        && c.zero_based_confidence == Some(Confidence::High)
}

fn gap_too_small(c: &ScenarioComparison) -> bool {
    c.conservative_savings < MINIMAL_THRESHOLD
}

fn balanced_pays_off(c: &ScenarioComparison) -> bool {
    c.conservative_savings > BALANCED_CONSERVATIVE_THRESHOLD && c.balanced_savings > BALANCED_THRESHOLD
}

fn always(_: &ScenarioComparison) -> bool {
    true
}

/// Decision table, evaluated top-down.
pub const RULES: &[Rule] = &[
    Rule {
        name: "missing-baseline",
        applies: missing_baseline,
        approach: Approach::NoBaseline,
    },
    Rule {
        name: "nothing-to-compare",
        applies: nothing_to_compare,
        approach: Approach::AlreadyEfficient,
    },
    Rule {
        name: "bold-and-trusted",
        applies: bold_and_trusted,
        approach: Approach::Bold,
    },
    Rule {
        name: "gap-too-small",
        applies: gap_too_small,
        approach: Approach::MinimalOptimization,
    },
    Rule {
        name: "balanced-pays-off",
        applies: balanced_pays_off,
        approach: Approach::Balanced,
    },
    Rule {
        name: "fallback",
        applies: always,
        approach: Approach::Conservative,
    },
];

/// First matching rule for a comparison.
pub fn select_rule(comparison: &ScenarioComparison) -> &'static Rule {
    RULES
        .iter()
        .find(|rule| (rule.applies)(comparison))
        .unwrap_or(&RULES[RULES.len() - 1])
}

/// Blended savings figures and the recommended track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiScenarioSavings {
    /// Naive vs optimized, percent
    pub conservative_savings: f64,
    /// Mean of the conservative and bold figures that are present, percent
    pub balanced_savings: f64,
    /// Naive vs zero-based, percent
    pub bold_savings: f64,
    pub approach: Approach,
    pub recommended_approach: String,
}

/// Compare the canonical forecasts and recommend an approach.
///
/// The first forecast of each scenario is used; later duplicates are ignored.
pub fn calculate_multi_scenario_savings(forecasts: &[ConsumptionForecast]) -> Result<MultiScenarioSavings> {
    if forecasts.is_empty() {
        return Err(VibecastError::invalid_input(
            "multi-scenario comparison needs at least one forecast",
        ));
    }

    let find = |scenario: Scenario| forecasts.iter().find(|f| f.scenario == scenario);
    let naive = find(Scenario::Naive);
    let optimized = find(Scenario::Optimized);
    let zero_based = find(Scenario::ZeroBased);

    let (conservative, bold) = match naive {
        Some(naive) => (
            optimized.map(|o| calculate_savings(naive, o).overall_percentage),
            zero_based.map(|z| calculate_savings(naive, z).overall_percentage),
        ),
        None => (None, None),
    };

    let present: Vec<f64> = [conservative, bold].into_iter().flatten().collect();
    let balanced = if present.is_empty() {
        0.0
    } else {
        round_percentage(present.iter().sum::<f64>() / present.len() as f64)
    };

    let comparison = ScenarioComparison {
        conservative_savings: conservative.unwrap_or(0.0),
        balanced_savings: balanced,
        bold_savings: bold.unwrap_or(0.0),
        naive_confidence: naive.map(|f| f.confidence),
        optimized_confidence: optimized.map(|f| f.confidence),
        zero_based_confidence: zero_based.map(|f| f.confidence),
    };

    let rule = select_rule(&comparison);
    debug!(
        rule = rule.name,
        conservative = comparison.conservative_savings,
        balanced = comparison.balanced_savings,
        bold = comparison.bold_savings,
        "Selected recommendation"
    );

    Ok(MultiScenarioSavings {
        conservative_savings: comparison.conservative_savings,
        balanced_savings: comparison.balanced_savings,
        bold_savings: comparison.bold_savings,
        approach: rule.approach,
        recommended_approach: rule.approach.recommendation().to_string(),
    })
}
