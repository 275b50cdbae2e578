//! Engine configuration.
//!
//! Configuration is layered: built-in defaults, then an optional TOML file,
//! then `VIBECAST_*` environment variables (nested keys separated by `__`,
//! e.g. `VIBECAST_COST_MODEL__VIBE_UNIT_COST=0.05`).

use std::env;
use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, VibecastError};
use crate::estimate::{CostModel, ParameterAdjuster, ZeroBasedBaseline};
use crate::workflow::StepKind;

/// Environment variable naming a config file when none is passed explicitly.
pub const CONFIG_ENV_VAR: &str = "VIBECAST_CONFIG";

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "VIBECAST";

/// Everything an estimator needs besides its inputs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Prices for operations and units
    pub cost_model: CostModel,
    /// Volume, sensitivity and constraint tunables
    pub adjuster: ParameterAdjuster,
    /// Baseline that zero-based savings are measured against
    pub zero_based: ZeroBasedBaseline,
}

impl EngineConfig {
    /// Create a config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the cost model.
    pub fn with_cost_model(mut self, cost_model: CostModel) -> Self {
        self.cost_model = cost_model;
        self
    }

    /// Set the parameter adjuster tunables.
    pub fn with_adjuster(mut self, adjuster: ParameterAdjuster) -> Self {
        self.adjuster = adjuster;
        self
    }

    /// Set the zero-based baseline.
    pub fn with_zero_based(mut self, baseline: ZeroBasedBaseline) -> Self {
        self.zero_based = baseline;
        self
    }

    /// Load configuration from `path` (or `VIBECAST_CONFIG`) and the
    /// environment, falling back to defaults for anything unset.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path: Option<PathBuf> = path
            .map(Path::to_path_buf)
            .or_else(|| env::var_os(CONFIG_ENV_VAR).map(PathBuf::from));

        // Defaults first: partial tables merge key by key.
        let mut builder = Config::builder().add_source(Config::try_from(&EngineConfig::default())?);
        if let Some(path) = &path {
            debug!(path = %path.display(), "Loading config file");
            builder = builder.add_source(File::from(path.as_path()).format(FileFormat::Toml).required(true));
        }
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: EngineConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make forecasts meaningless.
    pub fn validate(&self) -> Result<()> {
        let model = &self.cost_model;
        if model.vibe_unit_cost < 0.0 || model.spec_unit_cost < 0.0 {
            return Err(VibecastError::InvalidConfig(
                "unit costs must be non-negative".to_string(),
            ));
        }
        for (kind, cost) in &model.operation_costs {
            if !known_kind(kind) {
                return Err(VibecastError::InvalidConfig(format!(
                    "cost_model.operation_costs has unknown step kind '{}'",
                    kind
                )));
            }
            if !cost.is_finite() || *cost < 0.0 {
                return Err(VibecastError::InvalidConfig(format!(
                    "operation cost for '{}' must be non-negative",
                    kind
                )));
            }
        }

        let adjuster = &self.adjuster;
        if adjuster.reference_volume == 0 {
            return Err(VibecastError::InvalidConfig(
                "adjuster.reference_volume must be at least 1".to_string(),
            ));
        }
        if adjuster.high_sensitivity_factor < 1.0 || !(0.0..=1.0).contains(&adjuster.low_sensitivity_factor) {
            return Err(VibecastError::InvalidConfig(
                "sensitivity factors must be >= 1.0 (high) and within 0.0-1.0 (low)".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&adjuster.tight_constraint_ratio) {
            return Err(VibecastError::InvalidConfig(
                "adjuster.tight_constraint_ratio must be within 0.0-1.0".to_string(),
            ));
        }

        if self.zero_based.vibe_units < 0.0 || self.zero_based.spec_units < 0.0 {
            return Err(VibecastError::InvalidConfig(
                "zero_based baseline units must be non-negative".to_string(),
            ));
        }

        Ok(())
    }

    /// Render as TOML, suitable as a starting config file.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

fn known_kind(kind: &str) -> bool {
    [
        StepKind::Vibe,
        StepKind::Spec,
        StepKind::Hook,
        StepKind::Steering,
        StepKind::Mcp,
    ]
    .iter()
    .any(|k| k.as_str() == kind)
}
