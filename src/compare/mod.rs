//! Comparison of competing forecasts.
//!
//! - **ROI table**: ranks named scenarios and picks the best risk-adjusted one
//! - **Advisor**: blends naive/optimized/zero-based savings into conservative,
//!   balanced and bold figures and recommends a track

mod advisor;
mod roi;

pub use advisor::{
    calculate_multi_scenario_savings, select_rule, Approach, MultiScenarioSavings, Rule, ScenarioComparison,
    RULES,
};
pub use roi::{effort_weight, generate_roi_table, risk_weight, RoiScenario, RoiTable};
