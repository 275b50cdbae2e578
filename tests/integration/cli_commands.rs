//! Integration tests for the vibecast binary.
//!
//! These tests write workflow documents to a temp dir and run the binary
//! against them, checking both the JSON and the summary output.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Checkout workflow with two vibe steps, one spec, one hook and one MCP call.
const TEST_OPTIMIZED_WORKFLOW: &str = r#"{
    "workflow": {
        "id": "checkout",
        "steps": [
            {"id": "v1", "type": "vibe", "description": "Sketch checkout flow"},
            {"id": "v2", "type": "vibe", "description": "Iterate on validation"},
            {"id": "s1", "type": "spec", "description": "Write payment spec"},
            {"id": "h1", "type": "hook", "description": "Run tests on save"},
            {"id": "t1", "type": "mcp", "description": "Query the payment API", "quotaCost": 0.05}
        ],
        "dataFlow": [
            {"from": "v1", "to": "s1", "dataType": "draft"},
            {"from": "s1", "to": "h1", "dataType": "code", "required": false}
        ],
        "estimatedComplexity": 4
    },
    "optimizations": [
        {
            "type": "batching",
            "description": "Merge the two vibe passes",
            "affectedSteps": ["v1", "v2"],
            "estimatedSavings": {"vibes": 50, "specs": 0, "percentage": 50}
        }
    ],
    "originalWorkflowId": "checkout"
}"#;

const TEST_SOLUTION: &str = r#"{
    "radicalApproach": "Generate checkout from the payment template",
    "challengedAssumptions": ["Checkout needs a bespoke flow"],
    "potentialSavings": 80,
    "implementationRisk": "medium"
}"#;

const TEST_DANGLING_WORKFLOW: &str = r#"{
    "id": "broken",
    "steps": [{"id": "a", "type": "vibe"}],
    "dataFlow": [{"from": "a", "to": "ghost", "dataType": "text"}],
    "estimatedComplexity": 1
}"#;

/// Get a Command instance for the vibecast binary
#[allow(deprecated)]
fn vibecast_cmd() -> Command {
    let mut cmd = Command::cargo_bin("vibecast").expect("Failed to find vibecast binary");
    cmd.env_remove("VIBECAST_CONFIG").env_remove("VIBECAST_LOG");
    cmd
}

struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, content).expect("Failed to write fixture");
        path
    }

    /// Plain workflow extracted from the optimized document.
    fn workflow(&self) -> PathBuf {
        let doc: serde_json::Value = serde_json::from_str(TEST_OPTIMIZED_WORKFLOW).unwrap();
        self.write("workflow.json", &doc["workflow"].to_string())
    }
}

fn run_json(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).expect("stdout is not JSON")
}

#[test]
fn test_help_lists_subcommands() {
    vibecast_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("naive"))
        .stdout(predicate::str::contains("zero-based"))
        .stdout(predicate::str::contains("compare"));
}

#[test]
fn test_naive_json_output() {
    let fixture = Fixture::new();
    let workflow = fixture.workflow();

    let json = run_json(vibecast_cmd().arg("naive").arg(&workflow).arg("--json"));

    assert_eq!(json["scenario"], "naive");
    assert_eq!(json["vibe_units"], 2.0);
    assert_eq!(json["spec_units"], 1.0);
    assert_eq!(json["confidence"], "medium");
    assert_eq!(json["breakdown"].as_array().map(Vec::len), Some(5));
    let cost = json["estimated_cost"].as_f64().unwrap();
    assert!((cost - 0.35).abs() < 1e-9);
}

#[test]
fn test_naive_summary_output() {
    let fixture = Fixture::new();
    let workflow = fixture.workflow();

    vibecast_cmd()
        .arg("naive")
        .arg(&workflow)
        .assert()
        .success()
        .stdout(predicate::str::contains("Scenario:"))
        .stdout(predicate::str::contains("naive"))
        .stdout(predicate::str::contains("Query the payment API"));
}

#[test]
fn test_volume_scales_forecast() {
    let fixture = Fixture::new();
    let workflow = fixture.workflow();

    let json = run_json(
        vibecast_cmd()
            .arg("naive")
            .arg(&workflow)
            .args(["--volume", "200", "--json"]),
    );

    assert_eq!(json["vibe_units"], 4.0);
    assert_eq!(json["spec_units"], 2.0);
}

#[test]
fn test_max_vibes_clamps_forecast() {
    let fixture = Fixture::new();
    let workflow = fixture.workflow();

    let json = run_json(
        vibecast_cmd()
            .arg("naive")
            .arg(&workflow)
            .args(["--max-vibes", "1.5", "--json"]),
    );

    assert_eq!(json["vibe_units"], 1.5);
    assert_eq!(json["spec_units"], 1.0);
    assert_eq!(json["confidence"], "low");
}

#[test]
fn test_dangling_edge_is_rejected() {
    let fixture = Fixture::new();
    let workflow = fixture.write("broken.json", TEST_DANGLING_WORKFLOW);

    vibecast_cmd()
        .arg("naive")
        .arg(&workflow)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown step 'ghost'"));
}

#[test]
fn test_missing_input_file_fails() {
    vibecast_cmd()
        .args(["naive", "/nonexistent/workflow.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read"));
}

#[test]
fn test_optimized_json_output() {
    let fixture = Fixture::new();
    let optimized = fixture.write("optimized.json", TEST_OPTIMIZED_WORKFLOW);

    let json = run_json(vibecast_cmd().arg("optimized").arg(&optimized).arg("--json"));

    assert_eq!(json["scenario"], "optimized");
    assert_eq!(json["vibe_units"], 1.0);
    assert_eq!(json["confidence"], "high");
    let cost = json["estimated_cost"].as_f64().unwrap();
    assert!((cost - 0.31).abs() < 1e-9);
}

#[test]
fn test_zero_based_full_savings_keeps_one_vibe() {
    let fixture = Fixture::new();
    let solution = fixture.write(
        "solution.json",
        r#"{"radicalApproach": "Delete the feature", "potentialSavings": 100, "implementationRisk": "low"}"#,
    );

    let json = run_json(vibecast_cmd().arg("zero-based").arg(&solution).arg("--json"));

    assert_eq!(json["scenario"], "zero-based");
    assert_eq!(json["vibe_units"], 1.0);
    assert_eq!(json["confidence"], "high");
    assert_eq!(json["breakdown"][0]["description"], "Delete the feature");
}

#[test]
fn test_compare_json_report() {
    let fixture = Fixture::new();
    let optimized = fixture.write("optimized.json", TEST_OPTIMIZED_WORKFLOW);
    let solution = fixture.write("solution.json", TEST_SOLUTION);

    let json = run_json(
        vibecast_cmd()
            .arg("compare")
            .arg("--workflow")
            .arg(&optimized)
            .arg("--solution")
            .arg(&solution)
            .arg("--json"),
    );

    assert_eq!(json["workflow_id"], "checkout");
    assert_eq!(json["roi"]["scenarios"].as_array().map(Vec::len), Some(3));
    assert!(json["roi"]["best_option"].is_string());
    assert!(json["recommendation"]["recommended_approach"].is_string());
    assert!(json["recommendation"]["conservative_savings"].as_f64().unwrap() > 0.0);
}

#[test]
fn test_compare_summary() {
    let fixture = Fixture::new();
    let optimized = fixture.write("optimized.json", TEST_OPTIMIZED_WORKFLOW);
    let solution = fixture.write("solution.json", TEST_SOLUTION);

    vibecast_cmd()
        .arg("compare")
        .arg("--workflow")
        .arg(&optimized)
        .arg("--solution")
        .arg(&solution)
        .assert()
        .success()
        .stdout(predicate::str::contains("Workflow checkout"))
        .stdout(predicate::str::contains("ROI ranking"))
        .stdout(predicate::str::contains("Recommendation:"));
}

/// `compare` rejects an out-of-range savings claim before estimating.
#[test]
fn test_compare_rejects_invalid_solution() {
    let fixture = Fixture::new();
    let optimized = fixture.write("optimized.json", TEST_OPTIMIZED_WORKFLOW);
    let solution = fixture.write(
        "solution.json",
        r#"{"radicalApproach": "Skip everything", "potentialSavings": 150}"#,
    );

    vibecast_cmd()
        .arg("compare")
        .arg("--workflow")
        .arg(&optimized)
        .arg("--solution")
        .arg(&solution)
        .assert()
        .failure()
        .stderr(predicate::str::contains("potential savings 150 outside 0-100"));
}

#[test]
fn test_schema_output() {
    vibecast_cmd()
        .args(["schema", "workflow"])
        .assert()
        .success()
        .stdout(predicate::str::contains("estimatedComplexity"))
        .stdout(predicate::str::contains("dataFlow"));
}

#[test]
fn test_config_prints_defaults() {
    vibecast_cmd()
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("[cost_model]"))
        .stdout(predicate::str::contains("reference_volume = 100"));
}

#[test]
fn test_config_file_overrides_prices() {
    let fixture = Fixture::new();
    let workflow = fixture.workflow();
    let config = fixture.write(
        "vibecast.toml",
        "[cost_model.operation_costs]\nvibe = 1.0\nspec = 1.0\nhook = 1.0\nmcp = 1.0\n",
    );

    let json = run_json(
        vibecast_cmd()
            .arg("--config")
            .arg(&config)
            .arg("naive")
            .arg(&workflow)
            .arg("--json"),
    );

    let cost = json["estimated_cost"].as_f64().unwrap();
    assert!((cost - 5.0).abs() < 1e-9);
}

/// A config file pricing only one kind keeps the built-in prices for the rest.
#[test]
fn test_partial_price_table_keeps_defaults() {
    let fixture = Fixture::new();
    let workflow = fixture.workflow();
    let config = fixture.write("vibecast.toml", "[cost_model.operation_costs]\nmcp = 1.0\n");

    let json = run_json(
        vibecast_cmd()
            .arg("--config")
            .arg(&config)
            .arg("naive")
            .arg(&workflow)
            .arg("--json"),
    );

    let cost = json["estimated_cost"].as_f64().unwrap();
    assert!((cost - 1.30).abs() < 1e-9);
}

#[test]
fn test_env_override() {
    let fixture = Fixture::new();
    let solution = fixture.write("solution.json", TEST_SOLUTION);

    let json = run_json(
        vibecast_cmd()
            .env("VIBECAST_ZERO_BASED__VIBE_UNITS", "40")
            .arg("zero-based")
            .arg(&solution)
            .arg("--json"),
    );

    let vibes = json["vibe_units"].as_f64().unwrap();
    assert!((vibes - 8.0).abs() < 1e-9);
}
