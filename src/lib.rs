//! Consumption forecasting and ROI comparison for vibe/spec agent workflows.
//!
//! `vibecast` estimates how many vibe and spec quota units (and dollars) a
//! workflow will consume under three strategies, compares them, and
//! recommends a conservative, balanced or bold path.
//!
//! ```ignore
//! use vibecast::{calculate_multi_scenario_savings, ConsumptionEstimator, CostModel};
//!
//! let estimator = ConsumptionEstimator::new(CostModel::default());
//! let naive = estimator.estimate_naive(&optimized.workflow, None);
//! let optimized = estimator.estimate_optimized(&optimized, None);
//! let zero_based = estimator.estimate_zero_based(&solution, None);
//!
//! let advice = calculate_multi_scenario_savings(&[naive, optimized, zero_based])?;
//! println!("{}", advice.recommended_approach);
//! ```

pub mod compare;
pub mod config;
pub mod error;
pub mod estimate;
pub mod report;
pub mod workflow;

pub use compare::{
    calculate_multi_scenario_savings, generate_roi_table, Approach, MultiScenarioSavings, RoiScenario, RoiTable,
};
pub use config::EngineConfig;
pub use error::{Result, VibecastError};
pub use estimate::{
    calculate_savings, BreakdownEntry, Confidence, ConsumptionEstimator, ConsumptionForecast, CostConstraints,
    CostModel, EstimationParameters, SavingsResult, Scenario,
};
pub use report::ComparisonReport;
pub use workflow::{
    DataFlow, EstimatedSavings, Level, Optimization, OptimizationType, OptimizedWorkflow, Step, StepKind, Workflow,
    ZeroBasedSolution,
};
