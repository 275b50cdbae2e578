//! Consumption estimation for vibe/spec workflows.
//!
//! This module turns workflow descriptions into forecasts of quota and
//! dollar consumption.
//!
//! # Overview
//!
//! The estimation system consists of:
//! - **CostModel**: Prices operations by kind, with per-step fallback
//! - **ConsumptionEstimator**: Naive, optimized and zero-based strategies
//! - **ParameterAdjuster**: Scales forecasts by volume and sensitivity and clamps them to ceilings
//! - **calculate_savings**: Compares two forecasts
//!
//! # Example
//!
//! ```ignore
//! use vibecast::estimate::{ConsumptionEstimator, CostModel, EstimationParameters};
//!
//! let estimator = ConsumptionEstimator::new(CostModel::default());
//! let params = EstimationParameters::new().with_user_volume(250);
//!
//! let naive = estimator.estimate_naive(&workflow, Some(&params));
//! let optimized = estimator.estimate_optimized(&optimized_workflow, Some(&params));
//!
//! let savings = vibecast::estimate::calculate_savings(&naive, &optimized);
//! println!("{}% cheaper", savings.overall_percentage);
//! ```

mod cost_model;
mod estimator;
mod forecast;
mod params;
mod savings;

pub use cost_model::CostModel;
pub use estimator::{
    complexity_confidence, risk_confidence, ConsumptionEstimator, ZeroBasedBaseline, MIN_ZERO_BASED_VIBES,
};
pub use forecast::{BreakdownEntry, Confidence, ConsumptionForecast, Scenario};
pub use params::{CostConstraints, EstimationParameters, ParameterAdjuster};
pub use savings::{calculate_savings, reduction_percentage, round_percentage, SavingsResult};
