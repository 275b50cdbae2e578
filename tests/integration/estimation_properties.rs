//! Properties that must hold for any workflow, exercised through the
//! public library API.

use vibecast::{
    calculate_multi_scenario_savings, calculate_savings, generate_roi_table, Approach, Confidence,
    ConsumptionEstimator, ConsumptionForecast, CostConstraints, CostModel, EstimatedSavings,
    EstimationParameters, Level, Optimization, OptimizationType, OptimizedWorkflow, RoiScenario, Scenario, Step,
    StepKind, VibecastError, Workflow, ZeroBasedSolution,
};

const KINDS: [StepKind; 5] = [StepKind::Vibe, StepKind::Spec, StepKind::Hook, StepKind::Steering, StepKind::Mcp];

/// Workflow cycling through every step kind, with a fallback cost on each
/// step so unpriced kinds still cost something.
fn mixed_workflow(steps: usize, complexity: u32) -> Workflow {
    (0..steps).fold(Workflow::new("mixed", complexity), |workflow, i| {
        workflow.with_step(
            Step::new(format!("s{}", i), KINDS[i % KINDS.len()], format!("Step {}", i)).with_quota_cost(0.03),
        )
    })
}

fn forecast(scenario: Scenario, units: f64, confidence: Confidence) -> ConsumptionForecast {
    ConsumptionForecast::new(scenario, units, units, units, confidence, Vec::new())
}

fn assert_invalid_input<T: std::fmt::Debug>(result: Result<T, VibecastError>) {
    match result {
        Err(err) => assert!(err.is_invalid_input(), "unexpected error: {}", err),
        Ok(value) => panic!("expected InvalidInput, got {:?}", value),
    }
}

#[test]
fn test_naive_is_monotonic_in_step_count() {
    let estimator = ConsumptionEstimator::new(CostModel::default());
    let params = EstimationParameters::new()
        .with_user_volume(250)
        .with_performance_sensitivity(Level::High);

    for params in [None, Some(&params)] {
        let mut previous = estimator.estimate_naive(&mixed_workflow(0, 3), params);
        for steps in 1..=12 {
            let current = estimator.estimate_naive(&mixed_workflow(steps, 3), params);
            assert!(current.vibe_units >= previous.vibe_units);
            assert!(current.spec_units >= previous.spec_units);
            assert!(current.estimated_cost >= previous.estimated_cost);
            assert_eq!(current.breakdown.len(), steps);
            previous = current;
        }
    }
}

#[test]
fn test_empty_workflow_is_zero_forecast() {
    let estimator = ConsumptionEstimator::default();
    let forecast = estimator.estimate_naive(&Workflow::new("empty", 1), None);

    assert_eq!(forecast.total_units(), 0.0);
    assert_eq!(forecast.estimated_cost, 0.0);
    assert!(forecast.breakdown.is_empty());
}

#[test]
fn test_savings_against_self_is_zero() {
    let estimator = ConsumptionEstimator::default();
    let forecasts = [
        estimator.estimate_naive(&mixed_workflow(7, 4), None),
        estimator.estimate_naive(&Workflow::new("empty", 1), None),
        estimator.estimate_zero_based(&ZeroBasedSolution::new("Reuse the template", 60.0, Level::Medium), None),
    ];

    for forecast in &forecasts {
        let savings = calculate_savings(forecast, forecast);
        assert!(savings.is_zero(), "{:?}", savings);
        assert_eq!(savings.overall_percentage, 0.0);
    }
}

#[test]
fn test_savings_never_negative() {
    let small = forecast(Scenario::Naive, 1.0, Confidence::High);
    let large = forecast(Scenario::Optimized, 5.0, Confidence::High);
    let mixed = ConsumptionForecast::new(Scenario::Optimized, 0.5, 9.0, 0.2, Confidence::High, Vec::new());

    for (before, after) in [(&small, &large), (&small, &mixed), (&large, &mixed)] {
        let savings = calculate_savings(before, after);
        assert!(savings.vibe_reduction >= 0.0);
        assert!(savings.spec_reduction >= 0.0);
        assert!(savings.cost_reduction >= 0.0);
        assert!(savings.overall_percentage >= 0.0);
    }
}

#[test]
fn test_optimized_never_exceeds_naive() {
    let estimator = ConsumptionEstimator::default();
    let workflow = mixed_workflow(10, 5);
    let naive = estimator.estimate_naive(&workflow, None);

    let savings_sets = [
        vec![],
        vec![(vec!["s0", "s1"], 30.0, 20.0, 25.0)],
        vec![(vec!["s0", "s5"], 80.0, 0.0, 70.0), (vec!["s0", "s6"], 90.0, 90.0, 90.0)],
        vec![(vec!["s1", "s2", "s3", "s4"], 100.0, 100.0, 100.0), (vec!["s1"], 100.0, 100.0, 100.0)],
        vec![(vec!["missing"], 50.0, 50.0, 50.0)],
        vec![(vec!["s0"], 250.0, -40.0, 400.0)],
    ];

    for set in savings_sets {
        let optimized = set.into_iter().fold(
            OptimizedWorkflow::new(workflow.clone()),
            |optimized, (steps, vibes, specs, percentage)| {
                optimized.with_optimization(Optimization::new(
                    OptimizationType::Consolidation,
                    steps,
                    EstimatedSavings::new(vibes, specs, percentage),
                ))
            },
        );
        let forecast = estimator.estimate_optimized(&optimized, None);

        assert!(forecast.vibe_units >= 0.0 && forecast.vibe_units <= naive.vibe_units);
        assert!(forecast.spec_units >= 0.0 && forecast.spec_units <= naive.spec_units);
        assert!(forecast.estimated_cost >= 0.0 && forecast.estimated_cost <= naive.estimated_cost + 1e-12);
        assert_eq!(forecast.confidence, Confidence::High);
        assert_eq!(forecast.breakdown.len(), naive.breakdown.len());
    }
}

#[test]
fn test_zero_based_keeps_one_vibe_unit() {
    let estimator = ConsumptionEstimator::default();
    let cramped = EstimationParameters::new()
        .with_user_volume(1)
        .with_cost_constraints(CostConstraints::new().with_max_vibes(0.25));

    for savings in (0..=10).map(|step| f64::from(step) * 10.0) {
        for risk in [Level::Low, Level::Medium, Level::High] {
            let solution = ZeroBasedSolution::new("Generate from template", savings, risk);
            for params in [None, Some(&cramped)] {
                let forecast = estimator.estimate_zero_based(&solution, params);
                assert!(forecast.vibe_units >= 1.0, "savings {} gave {}", savings, forecast.vibe_units);
                assert_eq!(forecast.breakdown.len(), 1);
            }
        }
    }
}

#[test]
fn test_empty_inputs_are_rejected() {
    assert_invalid_input(generate_roi_table(&[]));
    assert_invalid_input(calculate_multi_scenario_savings(&[]));
}

#[test]
fn test_single_vibe_step_is_trusted() {
    let estimator = ConsumptionEstimator::default();
    let workflow = Workflow::new("one", 2).with_step(Step::new("v", StepKind::Vibe, "Ask once"));

    let forecast = estimator.estimate_naive(&workflow, None);
    assert_eq!(forecast.vibe_units, 1.0);
    assert_eq!(forecast.spec_units, 0.0);
    assert_eq!(forecast.confidence, Confidence::High);
}

#[test]
fn test_complex_workflow_is_distrusted() {
    let estimator = ConsumptionEstimator::default();
    for steps in [0, 1, 6] {
        let forecast = estimator.estimate_naive(&mixed_workflow(steps, 10), None);
        assert_eq!(forecast.confidence, Confidence::Low);
    }
}

#[test]
fn test_roi_prefers_cheaper_moderate_option() {
    let scenarios = [
        RoiScenario::new(
            "A",
            forecast(Scenario::Optimized, 5.0, Confidence::High),
            50.0,
            Level::Medium,
            Level::Medium,
        ),
        RoiScenario::new(
            "B",
            forecast(Scenario::ZeroBased, 2.0, Confidence::Low),
            80.0,
            Level::High,
            Level::High,
        ),
    ];

    let table = generate_roi_table(&scenarios).unwrap();
    assert_eq!(table.best_option, "A");
    assert_eq!(table.scenarios[0].name, "B");
    assert!(table.risk_assessment.contains("High-risk"));
    assert!(table.risk_assessment.contains('B'));
}

#[test]
fn test_naive_only_is_already_efficient() {
    let naive = forecast(Scenario::Naive, 4.0, Confidence::Medium);
    let result = calculate_multi_scenario_savings(&[naive]).unwrap();

    assert_eq!(result.conservative_savings, 0.0);
    assert_eq!(result.balanced_savings, 0.0);
    assert_eq!(result.bold_savings, 0.0);
    assert_eq!(result.approach, Approach::AlreadyEfficient);
    assert!(result.recommended_approach.contains("already efficient"));
}

#[test]
fn test_trusted_bold_savings_recommend_zero_based() {
    let naive = forecast(Scenario::Naive, 10.0, Confidence::High);
    let zero_based = forecast(Scenario::ZeroBased, 1.0, Confidence::High);

    let result = calculate_multi_scenario_savings(&[naive, zero_based]).unwrap();
    assert_eq!(result.bold_savings, 90.0);
    assert_eq!(result.approach, Approach::Bold);
}

#[test]
fn test_estimator_is_shared_across_threads() {
    let estimator = ConsumptionEstimator::default();
    let workflow = mixed_workflow(8, 4);
    let expected = estimator.estimate_naive(&workflow, None);

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| estimator.estimate_naive(&workflow, None)))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

#[test]
fn test_set_cost_model_applies_to_later_calls() {
    let mut estimator = ConsumptionEstimator::default();
    let workflow = mixed_workflow(5, 3);
    let before = estimator.estimate_naive(&workflow, None);

    estimator.set_cost_model(CostModel::default().with_operation_cost(StepKind::Vibe, 1.0));
    let after = estimator.estimate_naive(&workflow, None);

    assert!(after.estimated_cost > before.estimated_cost);
    assert_eq!(after.vibe_units, before.vibe_units);
}
