//! Per-asset simulation parameters.
//!
//! [`SimulationParameters`] bundles everything one simulation run needs:
//! the growth process inputs (`f0`, `mu`, `sigma`), the shock inputs
//! (`p_percent` and the [`Horizon`] durations) and the sensitivity `alpha`
//! that couples them. Values are validated once by the builder and are
//! immutable afterwards.
//!
//! # Examples
//!
//! ```
//! use synth_core::params::{Horizon, PriceFloor, SimulationParameters};
//!
//! let params = SimulationParameters::builder()
//!     .initial_price(100.0)
//!     .volatility(0.01)
//!     .horizon(Horizon::new(5, 2, 2).unwrap())
//!     .price_floor(PriceFloor::Epsilon)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(params.horizon().shock_end(), 4);
//! assert_eq!(params.epsilon(), 1e-6);
//! ```

use crate::types::ScenarioError;

/// Default numerical floor used when [`PriceFloor::Epsilon`] is selected.
pub const DEFAULT_EPSILON: f64 = 1e-6;

/// Step layout of a scenario: total length and the two shock phases.
///
/// # Invariants
/// - `steps >= 1`
/// - `onset` and `recovery` may be zero, meaning the phase is skipped
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Horizon {
    steps: usize,
    onset: usize,
    recovery: usize,
}

impl Horizon {
    /// Creates a horizon of `steps` points with the given shock phase lengths.
    ///
    /// # Errors
    /// `ScenarioError::InvalidHorizon` if `steps` is zero.
    pub fn new(steps: usize, onset: usize, recovery: usize) -> Result<Self, ScenarioError> {
        if steps == 0 {
            return Err(ScenarioError::InvalidHorizon {
                name: "steps",
                value: 0,
                reason: "must be positive",
            });
        }
        Ok(Self {
            steps,
            onset,
            recovery,
        })
    }

    /// Creates a horizon from signed inputs, as read from configuration files.
    ///
    /// # Errors
    /// `ScenarioError::InvalidHorizon` if `steps <= 0`, or `onset`/`recovery` is negative.
    ///
    /// # Examples
    ///
    /// ```
    /// use synth_core::params::Horizon;
    ///
    /// assert!(Horizon::from_signed(10, 0, 0).is_ok());
    /// assert!(Horizon::from_signed(10, -1, 0).is_err());
    /// assert!(Horizon::from_signed(0, 2, 2).is_err());
    /// ```
    pub fn from_signed(steps: i64, onset: i64, recovery: i64) -> Result<Self, ScenarioError> {
        if steps <= 0 {
            return Err(ScenarioError::InvalidHorizon {
                name: "steps",
                value: steps,
                reason: "must be positive",
            });
        }
        let onset = non_negative("onset", onset)?;
        let recovery = non_negative("recovery", recovery)?;
        let steps = usize::try_from(steps).map_err(|_| ScenarioError::InvalidHorizon {
            name: "steps",
            value: steps,
            reason: "exceeds platform word size",
        })?;
        Self::new(steps, onset, recovery)
    }

    /// Total number of simulated steps (N).
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Length of the onset phase (L).
    #[inline]
    pub fn onset(&self) -> usize {
        self.onset
    }

    /// Length of the recovery phase (I).
    #[inline]
    pub fn recovery(&self) -> usize {
        self.recovery
    }

    /// First step at which the shock has fully dissipated (L + I).
    #[inline]
    pub fn shock_end(&self) -> usize {
        self.onset.saturating_add(self.recovery)
    }
}

fn non_negative(name: &'static str, value: i64) -> Result<usize, ScenarioError> {
    if value < 0 {
        return Err(ScenarioError::InvalidHorizon {
            name,
            value,
            reason: "must be non-negative",
        });
    }
    usize::try_from(value).map_err(|_| ScenarioError::InvalidHorizon {
        name,
        value,
        reason: "exceeds platform word size",
    })
}

/// Whether the growth recurrence keeps prices away from zero.
///
/// The classic recurrence carries `epsilon` but never applies it, and can
/// drive a path negative under large volatility. `Epsilon` clamps the
/// accumulator at `epsilon` after every step instead.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PriceFloor {
    /// No clamping; `epsilon` is carried for reference only.
    #[default]
    Disabled,
    /// Floor the accumulator at `epsilon` after every step.
    Epsilon,
}

/// Validated inputs for a single asset's simulation run.
///
/// Construct with [`SimulationParameters::builder`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SimulationParameters {
    initial_price: f64,
    growth_rate: f64,
    volatility: f64,
    sensitivity: f64,
    shock_percent: f64,
    horizon: Horizon,
    epsilon: f64,
    price_floor: PriceFloor,
}

impl SimulationParameters {
    /// Starts a builder with neutral defaults (`f0 = 100`, everything else zero).
    pub fn builder() -> SimulationParametersBuilder {
        SimulationParametersBuilder::default()
    }

    /// Initial price `f0`. Not part of the generated series.
    #[inline]
    pub fn initial_price(&self) -> f64 {
        self.initial_price
    }

    /// Growth rate `mu` over the whole horizon.
    #[inline]
    pub fn growth_rate(&self) -> f64 {
        self.growth_rate
    }

    /// Per-step growth rate `mu / N`.
    #[inline]
    pub fn step_growth_rate(&self) -> f64 {
        self.growth_rate / self.horizon.steps as f64
    }

    /// Per-step volatility `sigma`.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Shock sensitivity `alpha`.
    #[inline]
    pub fn sensitivity(&self) -> f64 {
        self.sensitivity
    }

    /// Shock magnitude `p_percent`, in percent.
    #[inline]
    pub fn shock_percent(&self) -> f64 {
        self.shock_percent
    }

    /// Step layout.
    #[inline]
    pub fn horizon(&self) -> Horizon {
        self.horizon
    }

    /// Step count N.
    #[inline]
    pub fn steps(&self) -> usize {
        self.horizon.steps
    }

    /// Numerical floor `epsilon`.
    #[inline]
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Floor policy applied by the growth recurrence.
    #[inline]
    pub fn price_floor(&self) -> PriceFloor {
        self.price_floor
    }
}

/// Builder for [`SimulationParameters`].
#[derive(Clone, Debug)]
pub struct SimulationParametersBuilder {
    initial_price: f64,
    growth_rate: f64,
    volatility: f64,
    sensitivity: f64,
    shock_percent: f64,
    horizon: Option<Horizon>,
    epsilon: f64,
    price_floor: PriceFloor,
}

impl Default for SimulationParametersBuilder {
    fn default() -> Self {
        Self {
            initial_price: 100.0,
            growth_rate: 0.0,
            volatility: 0.0,
            sensitivity: 0.0,
            shock_percent: 0.0,
            horizon: None,
            epsilon: DEFAULT_EPSILON,
            price_floor: PriceFloor::Disabled,
        }
    }
}

impl SimulationParametersBuilder {
    /// Set the initial price `f0`.
    pub fn initial_price(mut self, f0: f64) -> Self {
        self.initial_price = f0;
        self
    }

    /// Set the horizon growth rate `mu`.
    pub fn growth_rate(mut self, mu: f64) -> Self {
        self.growth_rate = mu;
        self
    }

    /// Set the per-step volatility `sigma`.
    pub fn volatility(mut self, sigma: f64) -> Self {
        self.volatility = sigma;
        self
    }

    /// Set the shock sensitivity `alpha`.
    pub fn sensitivity(mut self, alpha: f64) -> Self {
        self.sensitivity = alpha;
        self
    }

    /// Set the shock magnitude in percent.
    pub fn shock_percent(mut self, p_percent: f64) -> Self {
        self.shock_percent = p_percent;
        self
    }

    /// Set the step layout.
    pub fn horizon(mut self, horizon: Horizon) -> Self {
        self.horizon = Some(horizon);
        self
    }

    /// Set the numerical floor `epsilon`.
    pub fn epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Set the floor policy.
    pub fn price_floor(mut self, price_floor: PriceFloor) -> Self {
        self.price_floor = price_floor;
        self
    }

    /// Validates and freezes the parameters.
    ///
    /// # Errors
    /// - `InvalidHorizon` if no horizon was set
    /// - `InvalidParameter` for non-finite reals, negative `sigma`, or non-positive `epsilon`
    pub fn build(self) -> Result<SimulationParameters, ScenarioError> {
        let horizon = self.horizon.ok_or(ScenarioError::InvalidHorizon {
            name: "steps",
            value: 0,
            reason: "must be positive",
        })?;

        finite("initial_price", self.initial_price)?;
        finite("growth_rate", self.growth_rate)?;
        finite("volatility", self.volatility)?;
        finite("sensitivity", self.sensitivity)?;
        finite("shock_percent", self.shock_percent)?;
        finite("epsilon", self.epsilon)?;

        if self.volatility < 0.0 {
            return Err(ScenarioError::InvalidParameter {
                name: "volatility",
                value: self.volatility,
                reason: "must be non-negative",
            });
        }
        if self.epsilon <= 0.0 {
            return Err(ScenarioError::InvalidParameter {
                name: "epsilon",
                value: self.epsilon,
                reason: "must be positive",
            });
        }

        Ok(SimulationParameters {
            initial_price: self.initial_price,
            growth_rate: self.growth_rate,
            volatility: self.volatility,
            sensitivity: self.sensitivity,
            shock_percent: self.shock_percent,
            horizon,
            epsilon: self.epsilon,
            price_floor: self.price_floor,
        })
    }
}

fn finite(name: &'static str, value: f64) -> Result<(), ScenarioError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ScenarioError::InvalidParameter {
            name,
            value,
            reason: "must be finite",
        })
    }
}
