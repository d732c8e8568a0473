//! Composition of an idealised path with a scaled shock.
//!
//! For one asset, [`PriceComposer`] produces
//!
//! ```text
//! observed[t] = ideal[t] + α × shock[t],   t ∈ [0, N)
//! ```
//!
//! after checking that both generated series have exactly N points. A length
//! disagreement means a generator is defective; it is reported as
//! [`ScenarioError::LengthMismatch`] and nothing is returned.

use synth_core::params::SimulationParameters;
use synth_core::types::ScenarioError;
use tracing::{debug, trace};

use crate::paths::{GrowthParams, MultiplicativePathGenerator, PathGenerator};
use crate::rng::ScenarioRng;
use crate::shock::{ShockGenerator, SinCosShockCurve};

/// The observed series together with the two series it was built from.
///
/// The ideal and shock series are kept for diagnostics and plotting.
#[derive(Clone, Debug, PartialEq)]
pub struct ComposedSeries {
    observed: Vec<f64>,
    ideal: Vec<f64>,
    shock: Vec<f64>,
}

impl ComposedSeries {
    /// Observed prices, `ideal + α × shock`.
    #[inline]
    pub fn observed(&self) -> &[f64] {
        &self.observed
    }

    /// Idealised (unshocked) prices.
    #[inline]
    pub fn ideal(&self) -> &[f64] {
        &self.ideal
    }

    /// Unscaled shock intensity.
    #[inline]
    pub fn shock(&self) -> &[f64] {
        &self.shock
    }

    /// Number of points (N).
    #[inline]
    pub fn len(&self) -> usize {
        self.observed.len()
    }

    /// Returns `true` if the series has no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.observed.is_empty()
    }

    /// Consumes the triple, returning `(observed, ideal, shock)`.
    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
        (self.observed, self.ideal, self.shock)
    }

    /// Per-step price impact of the shock, `observed[t] - ideal[t]`.
    pub fn shock_contribution(&self) -> Vec<f64> {
        self.observed
            .iter()
            .zip(&self.ideal)
            .map(|(observed, ideal)| observed - ideal)
            .collect()
    }

    /// Step and value of the largest absolute shock impact.
    ///
    /// Returns `None` for an empty series or when the shock never moves the price.
    pub fn peak_shock_impact(&self) -> Option<(usize, f64)> {
        self.shock_contribution()
            .into_iter()
            .enumerate()
            .filter(|(_, impact)| *impact != 0.0)
            .fold(None, |best, (t, impact)| match best {
                Some((_, peak)) if f64::abs(peak) >= impact.abs() => best,
                _ => Some((t, impact)),
            })
    }

    /// Step and value of the most negative shock impact.
    ///
    /// Returns `None` when the shock never pushes the price below the ideal path.
    pub fn max_drawdown_from_shock(&self) -> Option<(usize, f64)> {
        self.shock_contribution()
            .into_iter()
            .enumerate()
            .filter(|(_, impact)| *impact < 0.0)
            .fold(None, |worst, (t, impact)| match worst {
                Some((_, deepest)) if deepest <= impact => worst,
                _ => Some((t, impact)),
            })
    }
}

/// Builds one asset's observed series from a path generator and a shock generator.
///
/// # Examples
///
/// ```rust
/// use synth_core::params::{Horizon, SimulationParameters};
/// use synth_models::composer::PriceComposer;
/// use synth_models::rng::ScenarioRng;
///
/// let params = SimulationParameters::builder()
///     .initial_price(100.0)
///     .sensitivity(1.0)
///     .shock_percent(1.0)
///     .horizon(Horizon::new(5, 2, 2).unwrap())
///     .build()
///     .unwrap();
///
/// let composed = PriceComposer::new()
///     .compose(&params, &mut ScenarioRng::from_seed(0))
///     .unwrap();
///
/// assert_eq!(composed.ideal(), &[100.0; 5]);
/// assert!((composed.observed()[1] - 99.99).abs() < 1e-12);
/// ```
#[derive(Clone, Debug, Default)]
pub struct PriceComposer<P = MultiplicativePathGenerator, S = SinCosShockCurve> {
    path_generator: P,
    shock_generator: S,
}

impl PriceComposer {
    /// Creates a composer with the standard generators.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<P: PathGenerator, S: ShockGenerator> PriceComposer<P, S> {
    /// Creates a composer with custom generators.
    pub fn with_generators(path_generator: P, shock_generator: S) -> Self {
        Self {
            path_generator,
            shock_generator,
        }
    }

    /// Generates and composes one asset's series.
    ///
    /// Draws exactly as many normals from `rng` as the path generator consumes.
    ///
    /// # Errors
    /// `ScenarioError::LengthMismatch` if either generated series does not
    /// have `params.steps()` points.
    pub fn compose(
        &self,
        params: &SimulationParameters,
        rng: &mut ScenarioRng,
    ) -> Result<ComposedSeries, ScenarioError> {
        let steps = params.steps();

        let ideal = self
            .path_generator
            .generate(GrowthParams::from_simulation(params), rng);
        let shock = self
            .shock_generator
            .generate(params.horizon(), params.shock_percent());

        debug!(
            path_generator = self.path_generator.name(),
            shock_generator = self.shock_generator.name(),
            ideal_len = ideal.len(),
            shock_len = shock.len(),
            expected = steps,
            "Generated component series"
        );

        if ideal.len() != steps || shock.len() != steps {
            return Err(ScenarioError::LengthMismatch {
                ideal_len: ideal.len(),
                shock_len: shock.len(),
                expected: steps,
            });
        }

        let alpha = params.sensitivity();
        let mut observed = Vec::with_capacity(steps);
        for t in 0..steps {
            let price = ideal[t] + alpha * shock[t];
            trace!(t, ideal = ideal[t], shock = shock[t], observed = price);
            observed.push(price);
        }

        Ok(ComposedSeries {
            observed,
            ideal,
            shock,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use synth_core::params::Horizon;

    fn params(alpha: f64, percent: f64) -> SimulationParameters {
        SimulationParameters::builder()
            .initial_price(100.0)
            .growth_rate(0.02)
            .volatility(0.01)
            .sensitivity(alpha)
            .shock_percent(percent)
            .horizon(Horizon::new(390, 240, 50).unwrap())
            .build()
            .unwrap()
    }

    /// Path generator returning one point fewer than requested.
    struct ShortPath;

    impl PathGenerator for ShortPath {
        fn generate(&self, params: GrowthParams, _rng: &mut ScenarioRng) -> Vec<f64> {
            vec![params.initial_price; params.steps.saturating_sub(1)]
        }

        fn name(&self) -> &'static str {
            "ShortPath"
        }
    }

    /// Shock generator returning two points more than requested.
    struct LongShock;

    impl ShockGenerator for LongShock {
        fn generate(&self, horizon: Horizon, _shock_percent: f64) -> Vec<f64> {
            vec![0.0; horizon.steps() + 2]
        }

        fn name(&self) -> &'static str {
            "LongShock"
        }
    }

    #[test]
    fn test_worked_example() {
        let params = SimulationParameters::builder()
            .initial_price(100.0)
            .sensitivity(1.0)
            .shock_percent(1.0)
            .horizon(Horizon::new(5, 2, 2).unwrap())
            .build()
            .unwrap();

        let composed = PriceComposer::new()
            .compose(&params, &mut ScenarioRng::from_seed(11))
            .unwrap();

        assert_eq!(composed.ideal(), &[100.0; 5]);
        let expected = [100.0, 99.99, 99.99, 100.0, 100.0];
        for (value, want) in composed.observed().iter().zip(expected) {
            assert_abs_diff_eq!(*value, want, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_lengths_equal_steps() {
        let composed = PriceComposer::new()
            .compose(&params(0.4, 1.0), &mut ScenarioRng::from_seed(1))
            .unwrap();
        assert_eq!(composed.len(), 390);
        assert_eq!(composed.ideal().len(), 390);
        assert_eq!(composed.shock().len(), 390);
    }

    #[test]
    fn test_short_path_rejected() {
        let composer = PriceComposer::with_generators(ShortPath, SinCosShockCurve);
        let err = composer
            .compose(&params(0.4, 1.0), &mut ScenarioRng::from_seed(1))
            .unwrap_err();

        assert_eq!(
            err,
            ScenarioError::LengthMismatch {
                ideal_len: 389,
                shock_len: 390,
                expected: 390
            }
        );
        assert!(err.to_string().contains("389"));
        assert!(err.is_internal());
    }

    #[test]
    fn test_long_shock_rejected() {
        let composer = PriceComposer::with_generators(MultiplicativePathGenerator, LongShock);
        let err = composer
            .compose(&params(0.4, 1.0), &mut ScenarioRng::from_seed(1))
            .unwrap_err();

        assert!(matches!(
            err,
            ScenarioError::LengthMismatch {
                ideal_len: 390,
                shock_len: 392,
                expected: 390
            }
        ));
    }

    #[test]
    fn test_zero_shock_is_identity() {
        let composed = PriceComposer::new()
            .compose(&params(0.4, 0.0), &mut ScenarioRng::from_seed(3))
            .unwrap();
        assert_eq!(composed.observed(), composed.ideal());
        assert_eq!(composed.peak_shock_impact(), None);
    }

    #[test]
    fn test_zero_sensitivity_is_identity() {
        let composed = PriceComposer::new()
            .compose(&params(0.0, 25.0), &mut ScenarioRng::from_seed(3))
            .unwrap();
        assert_eq!(composed.observed(), composed.ideal());
    }

    #[test]
    fn test_alpha_scales_contribution() {
        let single = PriceComposer::new()
            .compose(&params(0.4, 1.0), &mut ScenarioRng::from_seed(8))
            .unwrap();
        let double = PriceComposer::new()
            .compose(&params(0.8, 1.0), &mut ScenarioRng::from_seed(8))
            .unwrap();

        assert_eq!(single.ideal(), double.ideal());
        for (a, b) in single
            .shock_contribution()
            .iter()
            .zip(double.shock_contribution())
        {
            assert_abs_diff_eq!(2.0 * a, b, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_peak_shock_impact() {
        let params = SimulationParameters::builder()
            .sensitivity(10.0)
            .shock_percent(1.0)
            .horizon(Horizon::new(20, 4, 8).unwrap())
            .build()
            .unwrap();
        let composed = PriceComposer::new()
            .compose(&params, &mut ScenarioRng::from_seed(0))
            .unwrap();

        let (t, impact) = composed.peak_shock_impact().unwrap();
        // Onset peak (t = 2) and recovery start (t = 4) tie at -0.1; the earliest wins.
        assert_eq!(t, 2);
        assert_abs_diff_eq!(impact, -0.1, epsilon = 1e-12);
    }

    #[test]
    fn test_max_drawdown_ignores_overshoot() {
        let params = SimulationParameters::builder()
            .sensitivity(10.0)
            .shock_percent(-1.0)
            .horizon(Horizon::new(20, 4, 8).unwrap())
            .build()
            .unwrap();
        let composed = PriceComposer::new()
            .compose(&params, &mut ScenarioRng::from_seed(0))
            .unwrap();

        // A negative percent only dips below the ideal path in late recovery (t = 9..11).
        let (t, impact) = composed.max_drawdown_from_shock().unwrap();
        assert_eq!(t, 11);
        assert!(impact < 0.0);
        assert!(composed.peak_shock_impact().unwrap().1 > 0.0);
    }

    #[test]
    fn test_max_drawdown_none_without_shock() {
        let composed = PriceComposer::new()
            .compose(&params(0.0, 1.0), &mut ScenarioRng::from_seed(2))
            .unwrap();
        assert_eq!(composed.max_drawdown_from_shock(), None);
    }

    #[test]
    fn test_into_parts() {
        let composed = PriceComposer::new()
            .compose(&params(0.4, 1.0), &mut ScenarioRng::from_seed(4))
            .unwrap();
        let expected = composed.clone();
        let (observed, ideal, shock) = composed.into_parts();
        assert_eq!(observed, expected.observed());
        assert_eq!(ideal, expected.ideal());
        assert_eq!(shock, expected.shock());
    }
}
