//! End-to-end comparison of the three canonical scenarios.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::compare::{calculate_multi_scenario_savings, generate_roi_table, MultiScenarioSavings, RoiScenario, RoiTable};
use crate::error::Result;
use crate::estimate::{calculate_savings, ConsumptionEstimator, ConsumptionForecast, EstimationParameters, SavingsResult};
use crate::workflow::{Level, OptimizedWorkflow, ZeroBasedSolution};

/// Implementation effort implied by the number of optimizations to apply.
pub fn optimization_effort(count: usize) -> Level {
    match count {
        0 | 1 => Level::Low,
        2 | 3 => Level::Medium,
        _ => Level::High,
    }
}

/// Forecasts, savings, ROI ranking and recommendation for one workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub workflow_id: String,
    pub naive: ConsumptionForecast,
    pub optimized: ConsumptionForecast,
    pub zero_based: ConsumptionForecast,
    /// Naive vs optimized
    pub optimized_savings: SavingsResult,
    /// Naive vs zero-based
    pub zero_based_savings: SavingsResult,
    pub roi: RoiTable,
    pub recommendation: MultiScenarioSavings,
}

impl ComparisonReport {
    /// Validate the inputs, run every estimator and compare the results.
    pub fn build(
        estimator: &ConsumptionEstimator,
        optimized: &OptimizedWorkflow,
        solution: &ZeroBasedSolution,
        params: Option<&EstimationParameters>,
    ) -> Result<Self> {
        optimized.validate()?;
        solution.validate()?;

        let naive = estimator.estimate_naive(&optimized.workflow, params);
        let optimized_forecast = estimator.estimate_optimized(optimized, params);
        let zero_based = estimator.estimate_zero_based(solution, params);

        let optimized_savings = calculate_savings(&naive, &optimized_forecast);
        let zero_based_savings = calculate_savings(&naive, &zero_based);

        let scenarios = [
            RoiScenario::new(naive.scenario.as_str(), naive.clone(), 0.0, Level::Low, Level::Low),
            RoiScenario::new(
                optimized_forecast.scenario.as_str(),
                optimized_forecast.clone(),
                optimized_savings.overall_percentage,
                optimization_effort(optimized.optimizations.len()),
                Level::Low,
            ),
            RoiScenario::new(
                zero_based.scenario.as_str(),
                zero_based.clone(),
                zero_based_savings.overall_percentage,
                Level::High,
                solution.implementation_risk,
            ),
        ];
        let roi = generate_roi_table(&scenarios)?;

        let recommendation =
            calculate_multi_scenario_savings(&[naive.clone(), optimized_forecast.clone(), zero_based.clone()])?;

        info!(
            workflow = %optimized.workflow.id,
            best = %roi.best_option,
            approach = ?recommendation.approach,
            "Built comparison report"
        );

        Ok(Self {
            workflow_id: optimized.workflow.id.clone(),
            naive,
            optimized: optimized_forecast,
            zero_based,
            optimized_savings,
            zero_based_savings,
            roi,
            recommendation,
        })
    }
}

fn write_forecast(f: &mut fmt::Formatter<'_>, forecast: &ConsumptionForecast) -> fmt::Result {
    writeln!(
        f,
        "  {:<11} vibes {:>8.2}  specs {:>8.2}  cost ${:>9.4}  confidence {}",
        forecast.scenario.as_str(),
        forecast.vibe_units,
        forecast.spec_units,
        forecast.estimated_cost,
        forecast.confidence
    )
}

impl fmt::Display for ComparisonReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Workflow {}", self.workflow_id)?;
        writeln!(f)?;
        writeln!(f, "Forecasts")?;
        write_forecast(f, &self.naive)?;
        write_forecast(f, &self.optimized)?;
        write_forecast(f, &self.zero_based)?;
        writeln!(f)?;
        writeln!(f, "ROI ranking")?;
        for scenario in &self.roi.scenarios {
            writeln!(
                f,
                "  {:<11} savings {:>5.1}%  effort {:<6}  risk {:<6}  score {:>5.1}",
                scenario.name,
                scenario.savings_percentage,
                scenario.implementation_effort,
                scenario.risk_level,
                scenario.score()
            )?;
        }
        writeln!(f, "  best option: {}", self.roi.best_option)?;
        writeln!(f, "  {}", self.roi.risk_assessment)?;
        writeln!(f)?;
        let r = &self.recommendation;
        writeln!(
            f,
            "Savings  conservative {:.1}%  balanced {:.1}%  bold {:.1}%",
            r.conservative_savings, r.balanced_savings, r.bold_savings
        )?;
        write!(f, "Recommendation: {}", r.recommended_approach)
    }
}
