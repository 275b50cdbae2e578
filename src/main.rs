use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use owo_colors::OwoColorize;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use vibecast::{
    ComparisonReport, Confidence, ConsumptionEstimator, ConsumptionForecast, CostConstraints, EngineConfig,
    EstimationParameters, Level, OptimizedWorkflow, Workflow, ZeroBasedSolution,
};

/// Environment variable controlling log output.
const LOG_ENV_VAR: &str = "VIBECAST_LOG";

/// Forecast vibe/spec consumption and compare implementation strategies.
#[derive(Parser)]
#[command(name = "vibecast", version, about)]
struct Cli {
    /// TOML config file (defaults to $VIBECAST_CONFIG, then built-in values)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print machine-readable JSON instead of a summary
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Forecast a workflow executed as written
    Naive {
        /// Workflow JSON file
        input: PathBuf,
        #[command(flatten)]
        params: ParamArgs,
    },

    /// Forecast a workflow after applying its optimizations
    Optimized {
        /// Optimized workflow JSON file
        input: PathBuf,
        #[command(flatten)]
        params: ParamArgs,
    },

    /// Forecast a zero-based redesign
    ZeroBased {
        /// Zero-based solution JSON file
        input: PathBuf,
        #[command(flatten)]
        params: ParamArgs,
    },

    /// Compare all three scenarios and recommend an approach
    Compare {
        /// Optimized workflow JSON file
        #[arg(long)]
        workflow: PathBuf,
        /// Zero-based solution JSON file
        #[arg(long)]
        solution: PathBuf,
        #[command(flatten)]
        params: ParamArgs,
    },

    /// Print the JSON schema of an input document
    Schema {
        #[arg(value_enum)]
        input: SchemaTarget,
    },

    /// Print the effective configuration as TOML
    Config,
}

#[derive(Clone, Copy, ValueEnum)]
enum SchemaTarget {
    Workflow,
    Optimized,
    Solution,
}

#[derive(Clone, Copy, ValueEnum)]
enum SensitivityArg {
    Low,
    Medium,
    High,
}

impl From<SensitivityArg> for Level {
    fn from(arg: SensitivityArg) -> Self {
        match arg {
            SensitivityArg::Low => Level::Low,
            SensitivityArg::Medium => Level::Medium,
            SensitivityArg::High => Level::High,
        }
    }
}

#[derive(Args)]
struct ParamArgs {
    /// Expected number of users
    #[arg(long)]
    volume: Option<u64>,

    /// Performance sensitivity
    #[arg(long, value_enum)]
    sensitivity: Option<SensitivityArg>,

    /// Ceiling on vibe units
    #[arg(long)]
    max_vibes: Option<f64>,

    /// Ceiling on spec units
    #[arg(long)]
    max_specs: Option<f64>,

    /// Ceiling on dollar cost
    #[arg(long)]
    max_cost: Option<f64>,
}

impl ParamArgs {
    fn to_params(&self) -> Option<EstimationParameters> {
        let constraints = CostConstraints {
            max_vibes: self.max_vibes,
            max_specs: self.max_specs,
            max_cost: self.max_cost,
        };
        let params = EstimationParameters {
            user_volume: self.volume,
            performance_sensitivity: self.sensitivity.map(Level::from),
            cost_constraints: (!constraints.is_empty()).then_some(constraints),
        };
        (!params.is_empty()).then_some(params)
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Log and propagate a rejected input document.
fn check_input<T>(result: vibecast::Result<T>, source: impl fmt::Display) -> Result<T> {
    if let Err(err) = &result {
        warn!(source = %source, error = %err, "Rejected input document");
    }
    result.with_context(|| format!("Invalid input in {}", source))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn confidence_label(confidence: Confidence) -> String {
    match confidence {
        Confidence::High => confidence.green().to_string(),
        Confidence::Medium => confidence.yellow().to_string(),
        Confidence::Low => confidence.red().to_string(),
    }
}

fn print_forecast(forecast: &ConsumptionForecast) {
    println!("{} {}", "Scenario:".bold(), forecast.scenario.cyan());
    println!("  vibe units:  {:.2}", forecast.vibe_units);
    println!("  spec units:  {:.2}", forecast.spec_units);
    println!("  cost:        ${:.4}", forecast.estimated_cost);
    println!("  confidence:  {}", confidence_label(forecast.confidence));
    if !forecast.breakdown.is_empty() {
        println!("{}", "Breakdown:".bold());
        for entry in &forecast.breakdown {
            println!("  {:<24} ${:.4}  {}", entry.label(), entry.cost, entry.description.dimmed());
        }
    }
}

fn emit_forecast(forecast: &ConsumptionForecast, json: bool) -> Result<()> {
    if json {
        print_json(forecast)
    } else {
        print_forecast(forecast);
        Ok(())
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = EngineConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    let estimator = ConsumptionEstimator::from_config(&config);

    match cli.command {
        Commands::Naive { input, params } => {
            let workflow: Workflow = read_json(&input)?;
            check_input(workflow.validate(), input.display())?;
            info!(workflow = %workflow.id, "Estimating naive consumption");
            let forecast = estimator.estimate_naive(&workflow, params.to_params().as_ref());
            emit_forecast(&forecast, cli.json)?;
        }
        Commands::Optimized { input, params } => {
            let optimized: OptimizedWorkflow = read_json(&input)?;
            check_input(optimized.validate(), input.display())?;
            info!(workflow = %optimized.workflow.id, "Estimating optimized consumption");
            let forecast = estimator.estimate_optimized(&optimized, params.to_params().as_ref());
            emit_forecast(&forecast, cli.json)?;
        }
        Commands::ZeroBased { input, params } => {
            let solution: ZeroBasedSolution = read_json(&input)?;
            check_input(solution.validate(), input.display())?;
            info!("Estimating zero-based consumption");
            let forecast = estimator.estimate_zero_based(&solution, params.to_params().as_ref());
            emit_forecast(&forecast, cli.json)?;
        }
        Commands::Compare {
            workflow,
            solution,
            params,
        } => {
            let optimized: OptimizedWorkflow = read_json(&workflow)?;
            let solution_doc: ZeroBasedSolution = read_json(&solution)?;
            // build() validates both documents.
            let report = check_input(
                ComparisonReport::build(&estimator, &optimized, &solution_doc, params.to_params().as_ref()),
                format!("{} / {}", workflow.display(), solution.display()),
            )?;
            if cli.json {
                print_json(&report)?;
            } else {
                println!("{report}");
            }
        }
        Commands::Schema { input } => {
            let schema = match input {
                SchemaTarget::Workflow => schemars::schema_for!(Workflow),
                SchemaTarget::Optimized => schemars::schema_for!(OptimizedWorkflow),
                SchemaTarget::Solution => schemars::schema_for!(ZeroBasedSolution),
            };
            print_json(&schema)?;
        }
        Commands::Config => {
            print!("{}", config.to_toml()?);
        }
    }

    Ok(())
}
