//! End-to-end properties of scenario generation.
//!
//! Covers the reference three-asset scenario, seeded reproducibility, the
//! idempotence and linearity properties of the shock sensitivity, and the
//! epsilon floor.

use approx::assert_abs_diff_eq;
use proptest::prelude::*;
use synth_core::params::{Horizon, PriceFloor, SimulationParameters};
use synth_core::types::{Date, ScenarioError};
use synth_models::prelude::*;

fn reference_asset(f0: f64, mu: f64, sigma: f64, alpha: f64) -> SimulationParameters {
    SimulationParameters::builder()
        .initial_price(f0)
        .growth_rate(mu)
        .volatility(sigma)
        .sensitivity(alpha)
        .shock_percent(1.0)
        .horizon(Horizon::new(390, 240, 50).unwrap())
        .build()
        .unwrap()
}

fn reference_assets() -> [SimulationParameters; 3] {
    [
        reference_asset(100.0, 0.02, 0.01, 0.4),
        reference_asset(50.0, 0.05, 0.02, 0.8),
        reference_asset(200.0, -0.01, 0.015, 0.2),
    ]
}

#[test]
fn test_reference_scenario_alignment() {
    let dataset = ScenarioDataset::builder()
        .asset(reference_assets()[0])
        .asset(reference_assets()[1])
        .asset(reference_assets()[2])
        .start_date(Date::parse("2024-01-01").unwrap())
        .build(&mut ScenarioRng::from_seed(2024))
        .unwrap();

    assert_eq!(dataset.len(), 390);
    assert_eq!(dataset.dates().unwrap().len(), 390);
    for label in ["Asset_1", "Asset_2", "Asset_3"] {
        assert_eq!(dataset.column(label).unwrap().len(), 390);
    }
    for (expected, row) in dataset.rows().enumerate() {
        assert_eq!(row.index, expected);
        assert_eq!(row.values.len(), 3);
    }
    assert_eq!(
        dataset.dates().unwrap()[389],
        Date::parse("2025-01-24").unwrap()
    );
}

#[test]
fn test_seeded_datasets_are_bit_identical() {
    let a = ScenarioDataset::generate(&reference_assets(), &mut ScenarioRng::from_seed(7)).unwrap();
    let b = ScenarioDataset::generate(&reference_assets(), &mut ScenarioRng::from_seed(7)).unwrap();
    assert_eq!(a, b);

    let c = ScenarioDataset::generate(&reference_assets(), &mut ScenarioRng::from_seed(8)).unwrap();
    assert_ne!(a.column("Asset_1"), c.column("Asset_1"));
}

#[test]
fn test_assets_are_independent_draws() {
    // Identical parameters on one stream must not produce identical paths.
    let asset = reference_asset(100.0, 0.02, 0.01, 0.4);
    let dataset =
        ScenarioDataset::generate(&[asset, asset], &mut ScenarioRng::from_seed(1)).unwrap();
    assert_ne!(dataset.column("Asset_1"), dataset.column("Asset_2"));
}

#[test]
fn test_worked_example() {
    let params = SimulationParameters::builder()
        .initial_price(100.0)
        .growth_rate(0.0)
        .volatility(0.0)
        .sensitivity(1.0)
        .shock_percent(1.0)
        .horizon(Horizon::new(5, 2, 2).unwrap())
        .build()
        .unwrap();

    let composed = PriceComposer::new()
        .compose(&params, &mut ScenarioRng::from_entropy())
        .unwrap();

    assert_eq!(composed.ideal(), &[100.0, 100.0, 100.0, 100.0, 100.0]);
    let expected_shock = [0.0, -0.01, -0.01, 0.0, 0.0];
    for t in 0..5 {
        assert_abs_diff_eq!(composed.shock()[t], expected_shock[t], epsilon = 1e-15);
        assert_abs_diff_eq!(
            composed.observed()[t],
            composed.ideal()[t] + composed.shock()[t],
            epsilon = 1e-12
        );
    }
}

#[test]
fn test_epsilon_floor_end_to_end() {
    let params = SimulationParameters::builder()
        .initial_price(1.0)
        .volatility(3.0)
        .epsilon(1e-4)
        .price_floor(PriceFloor::Epsilon)
        .horizon(Horizon::new(200, 0, 0).unwrap())
        .build()
        .unwrap();

    let composed = PriceComposer::new()
        .compose(&params, &mut ScenarioRng::from_seed(13))
        .unwrap();
    assert!(composed.ideal().iter().all(|&p| p >= 1e-4));
}

#[test]
fn test_mismatched_horizon_error_names_asset() {
    let short = SimulationParameters::builder()
        .horizon(Horizon::new(100, 10, 10).unwrap())
        .build()
        .unwrap();
    let err = ScenarioDataset::builder()
        .asset(reference_assets()[0])
        .labelled_asset("Short", short)
        .build(&mut ScenarioRng::from_seed(0))
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Horizon mismatch: asset Short (index 1) has 100 steps, expected 390"
    );
    assert!(matches!(err, ScenarioError::HorizonMismatch { index: 1, .. }));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_all_lengths_equal_steps(
        steps in 1usize..400,
        onset in 0usize..200,
        recovery in 0usize..200,
        sigma in 0.0f64..0.05,
        seed in any::<u64>(),
    ) {
        let params = SimulationParameters::builder()
            .volatility(sigma)
            .sensitivity(0.5)
            .shock_percent(2.0)
            .horizon(Horizon::new(steps, onset, recovery).unwrap())
            .build()
            .unwrap();
        let composed = PriceComposer::new()
            .compose(&params, &mut ScenarioRng::from_seed(seed))
            .unwrap();

        prop_assert_eq!(composed.observed().len(), steps);
        prop_assert_eq!(composed.ideal().len(), steps);
        prop_assert_eq!(composed.shock().len(), steps);
    }

    #[test]
    fn test_contribution_is_linear_in_alpha(
        alpha in -5.0f64..5.0,
        percent in -10.0f64..10.0,
        seed in any::<u64>(),
    ) {
        let build = |a: f64| {
            SimulationParameters::builder()
                .volatility(0.01)
                .sensitivity(a)
                .shock_percent(percent)
                .horizon(Horizon::new(60, 20, 20).unwrap())
                .build()
                .unwrap()
        };
        let base = PriceComposer::new()
            .compose(&build(alpha), &mut ScenarioRng::from_seed(seed))
            .unwrap();
        let doubled = PriceComposer::new()
            .compose(&build(2.0 * alpha), &mut ScenarioRng::from_seed(seed))
            .unwrap();

        for (t, (single, double)) in base
            .shock_contribution()
            .into_iter()
            .zip(doubled.shock_contribution())
            .enumerate()
        {
            prop_assert!(
                (2.0 * single - double).abs() < 1e-9,
                "t = {}: 2 × {} != {}", t, single, double
            );
            prop_assert!((single - alpha * base.shock()[t]).abs() < 1e-9);
        }
    }
}
