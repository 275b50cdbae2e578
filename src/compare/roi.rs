//! Risk-adjusted ROI ranking.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, VibecastError};
use crate::estimate::ConsumptionForecast;
use crate::workflow::Level;

/// Score multiplier for implementation effort.
pub fn effort_weight(effort: Level) -> f64 {
    match effort {
        Level::Low => 1.0,
        Level::Medium => 0.9,
        Level::High => 0.7,
    }
}

/// Score multiplier for implementation risk.
pub fn risk_weight(risk: Level) -> f64 {
    match risk {
        Level::Low => 1.0,
        Level::Medium => 0.8,
        Level::High => 0.6,
    }
}

/// A named option competing in the ROI table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiScenario {
    pub name: String,
    pub forecast: ConsumptionForecast,
    /// Savings against the baseline, percent
    pub savings_percentage: f64,
    pub implementation_effort: Level,
    pub risk_level: Level,
}

impl RoiScenario {
    pub fn new(
        name: impl Into<String>,
        forecast: ConsumptionForecast,
        savings_percentage: f64,
        implementation_effort: Level,
        risk_level: Level,
    ) -> Self {
        Self {
            name: name.into(),
            forecast,
            savings_percentage,
            implementation_effort,
            risk_level,
        }
    }

    /// Savings discounted by effort and risk.
    pub fn score(&self) -> f64 {
        self.savings_percentage * effort_weight(self.implementation_effort) * risk_weight(self.risk_level)
    }
}

/// Ranked scenarios plus the pick and a risk summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiTable {
    /// Scenarios by descending savings percentage
    pub scenarios: Vec<RoiScenario>,
    pub best_option: String,
    /// Position of the best option in `scenarios`
    pub best_index: usize,
    pub risk_assessment: String,
}

impl RoiTable {
    /// The scenario picked as best option.
    pub fn best(&self) -> Option<&RoiScenario> {
        self.scenarios.get(self.best_index)
    }
}

/// Risk-adjusted score used for picking; NaN ranks below everything.
fn comparable_score(scenario: &RoiScenario) -> f64 {
    let score = scenario.score();
    if score.is_nan() {
        f64::NEG_INFINITY
    } else {
        score
    }
}

/// Rank scenarios and pick the best risk-adjusted option.
///
/// Ties on score go to the scenario listed first in `scenarios`.
pub fn generate_roi_table(scenarios: &[RoiScenario]) -> Result<RoiTable> {
    let mut best: Option<(usize, f64)> = None;
    for (index, scenario) in scenarios.iter().enumerate() {
        let score = comparable_score(scenario);
        debug!(scenario = %scenario.name, score, "Scored ROI scenario");
        if best.map_or(true, |(_, top)| score > top) {
            best = Some((index, score));
        }
    }
    let Some((best, _)) = best else {
        return Err(VibecastError::invalid_input(
            "ROI comparison needs at least one scenario",
        ));
    };
    let best_option = scenarios[best].name.clone();

    let mut order: Vec<usize> = (0..scenarios.len()).collect();
    order.sort_by(|&a, &b| {
        scenarios[b]
            .savings_percentage
            .total_cmp(&scenarios[a].savings_percentage)
    });
    let best_index = order.iter().position(|&i| i == best).unwrap_or_default();

    Ok(RoiTable {
        risk_assessment: assess_risk(scenarios, &best_option),
        scenarios: order.into_iter().map(|i| scenarios[i].clone()).collect(),
        best_option,
        best_index,
    })
}

fn names_at(scenarios: &[RoiScenario], level: Level) -> Vec<&str> {
    scenarios
        .iter()
        .filter(|s| s.risk_level == level)
        .map(|s| s.name.as_str())
        .collect()
}

fn assess_risk(scenarios: &[RoiScenario], best_option: &str) -> String {
    let high = names_at(scenarios, Level::High);
    if !high.is_empty() {
        return format!(
            "High-risk scenarios present: {}. Validate them with a prototype before committing; {} offers the best risk-adjusted return.",
            high.join(", "),
            best_option
        );
    }

    let medium = names_at(scenarios, Level::Medium);
    if !medium.is_empty() {
        return format!(
            "Medium-risk scenarios present: {}. {} offers the best risk-adjusted return.",
            medium.join(", "),
            best_option
        );
    }

    format!(
        "All scenarios carry low implementation risk; {} offers the best risk-adjusted return.",
        best_option
    )
}
