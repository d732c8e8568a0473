//! Idealised price path generation.
//!
//! The idealised path follows a discrete multiplicative random-growth
//! recurrence:
//!
//! ```text
//! f(t+1) = f(t) × (1 + μ_step + σ × ε(t)),   ε(t) ~ N(0, 1)
//! ```
//!
//! starting from `f0`. Only the N evolved values are returned; `f0` itself is
//! not part of the series. Unlike log-space GBM, this Euler form can go
//! negative when `σ × ε` is below `-(1 + μ_step)`; that is a property of the
//! model and is not trapped, unless [`PriceFloor::Epsilon`] is selected.

use synth_core::params::{PriceFloor, SimulationParameters};

use crate::rng::ScenarioRng;

/// Inputs to a single idealised path.
///
/// # Examples
///
/// ```rust
/// use synth_models::paths::GrowthParams;
///
/// let params = GrowthParams::new(100.0, 0.0, 0.0, 3);
/// assert_eq!(params.floor, None);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GrowthParams {
    /// Initial price (f0), excluded from the output.
    pub initial_price: f64,
    /// Per-step growth rate (μ_step).
    pub step_growth: f64,
    /// Per-step volatility (σ).
    pub volatility: f64,
    /// Number of steps (N).
    pub steps: usize,
    /// Lower bound applied after every step, if any.
    pub floor: Option<f64>,
}

impl GrowthParams {
    /// Creates unfloored growth parameters.
    #[inline]
    pub fn new(initial_price: f64, step_growth: f64, volatility: f64, steps: usize) -> Self {
        Self {
            initial_price,
            step_growth,
            volatility,
            steps,
            floor: None,
        }
    }

    /// Sets the lower bound applied after every step.
    #[inline]
    pub fn with_floor(mut self, floor: f64) -> Self {
        self.floor = Some(floor);
        self
    }

    /// Derives path inputs from an asset's parameters.
    ///
    /// The horizon growth rate is spread uniformly: `μ_step = μ / N`.
    pub fn from_simulation(params: &SimulationParameters) -> Self {
        let growth = Self::new(
            params.initial_price(),
            params.step_growth_rate(),
            params.volatility(),
            params.steps(),
        );
        match params.price_floor() {
            PriceFloor::Disabled => growth,
            PriceFloor::Epsilon => growth.with_floor(params.epsilon()),
        }
    }
}

/// Source of idealised price paths.
///
/// The composer only relies on this trait, so alternative or faulty
/// generators can be injected in tests.
pub trait PathGenerator {
    /// Generates the idealised series for `params`, drawing from `rng`.
    ///
    /// A correct implementation returns exactly `params.steps` values.
    fn generate(&self, params: GrowthParams, rng: &mut ScenarioRng) -> Vec<f64>;

    /// Get the generator name for identification.
    fn name(&self) -> &'static str;
}

/// The multiplicative random-growth recurrence described in the module docs.
#[derive(Clone, Copy, Debug, Default)]
pub struct MultiplicativePathGenerator;

impl PathGenerator for MultiplicativePathGenerator {
    fn generate(&self, params: GrowthParams, rng: &mut ScenarioRng) -> Vec<f64> {
        simulate_ideal_path(params, rng)
    }

    fn name(&self) -> &'static str {
        "MultiplicativeGrowth"
    }
}

/// Simulates one idealised price path.
///
/// All N normal draws are taken from `rng` before the recurrence runs, so a
/// path consumes exactly N draws regardless of its values.
///
/// # Examples
///
/// ```rust
/// use synth_models::paths::{simulate_ideal_path, GrowthParams};
/// use synth_models::rng::ScenarioRng;
///
/// let mut rng = ScenarioRng::from_seed(1);
/// let path = simulate_ideal_path(GrowthParams::new(100.0, 0.01, 0.0, 3), &mut rng);
///
/// // No volatility: pure compounding, f0 excluded
/// assert!((path[0] - 101.0).abs() < 1e-12);
/// assert!((path[2] - 100.0 * 1.01_f64.powi(3)).abs() < 1e-9);
/// ```
pub fn simulate_ideal_path(params: GrowthParams, rng: &mut ScenarioRng) -> Vec<f64> {
    let mut shocks = vec![0.0; params.steps];
    rng.fill_normal(&mut shocks);

    let mut price = params.initial_price;
    let mut path = Vec::with_capacity(params.steps);
    for &z in &shocks {
        price *= 1.0 + params.step_growth + params.volatility * z;
        if let Some(floor) = params.floor {
            price = price.max(floor);
        }
        path.push(price);
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use synth_core::params::Horizon;

    #[test]
    fn test_zero_steps_is_empty() {
        let mut rng = ScenarioRng::from_seed(1);
        let path = simulate_ideal_path(GrowthParams::new(100.0, 0.1, 0.2, 0), &mut rng);
        assert!(path.is_empty());
    }

    #[test]
    fn test_length_matches_steps() {
        let mut rng = ScenarioRng::from_seed(1);
        for steps in [1, 2, 17, 390] {
            let path = simulate_ideal_path(GrowthParams::new(100.0, 0.0, 0.01, steps), &mut rng);
            assert_eq!(path.len(), steps);
        }
    }

    #[test]
    fn test_flat_without_drift_or_volatility() {
        let mut rng = ScenarioRng::from_seed(5);
        let path = simulate_ideal_path(GrowthParams::new(100.0, 0.0, 0.0, 5), &mut rng);
        assert_eq!(path, vec![100.0; 5]);
    }

    #[test]
    fn test_recurrence_matches_manual_draws() {
        let params = GrowthParams::new(50.0, 0.001, 0.02, 20);
        let path = simulate_ideal_path(params, &mut ScenarioRng::from_seed(77));

        let mut draws = ScenarioRng::from_seed(77);
        let mut expected = 50.0;
        for &value in &path {
            expected *= 1.0 + 0.001 + 0.02 * draws.gen_normal();
            assert_eq!(value, expected);
        }
    }

    #[test]
    fn test_same_seed_bit_identical() {
        let params = GrowthParams::new(100.0, 0.02 / 390.0, 0.01, 390);
        let a = simulate_ideal_path(params, &mut ScenarioRng::from_seed(42));
        let b = simulate_ideal_path(params, &mut ScenarioRng::from_seed(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_large_volatility_can_go_negative_without_floor() {
        // With σ = 5 a step factor is negative whenever z < -0.2.
        let params = GrowthParams::new(1.0, 0.0, 5.0, 100);
        let path = simulate_ideal_path(params, &mut ScenarioRng::from_seed(3));
        assert!(path.iter().any(|&p| p < 0.0));
    }

    #[test]
    fn test_floor_keeps_prices_above_epsilon() {
        let params = GrowthParams::new(1.0, 0.0, 5.0, 100).with_floor(1e-6);
        let path = simulate_ideal_path(params, &mut ScenarioRng::from_seed(3));
        assert!(path.iter().all(|&p| p >= 1e-6));
    }

    #[test]
    fn test_from_simulation_spreads_growth() {
        let params = SimulationParameters::builder()
            .initial_price(80.0)
            .growth_rate(0.39)
            .volatility(0.01)
            .horizon(Horizon::new(390, 0, 0).unwrap())
            .build()
            .unwrap();

        let growth = GrowthParams::from_simulation(&params);
        assert_eq!(growth.initial_price, 80.0);
        assert_relative_eq!(growth.step_growth, 0.001);
        assert_eq!(growth.steps, 390);
        assert_eq!(growth.floor, None);
    }

    #[test]
    fn test_from_simulation_floor_policy() {
        let params = SimulationParameters::builder()
            .epsilon(1e-3)
            .price_floor(PriceFloor::Epsilon)
            .horizon(Horizon::new(10, 0, 0).unwrap())
            .build()
            .unwrap();

        assert_eq!(GrowthParams::from_simulation(&params).floor, Some(1e-3));
    }

    #[test]
    fn test_generator_name() {
        assert_eq!(MultiplicativePathGenerator.name(), "MultiplicativeGrowth");
    }
}
