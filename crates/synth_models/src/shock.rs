//! Deterministic shock intensity curve.
//!
//! The shock is a piecewise sinusoid over three phases keyed on the step
//! index `t`, with `p = p_percent / 100`:
//!
//! ```text
//! Onset      t ∈ [0, L)       -p × sin(π t / L)
//! Recovery   t ∈ [L, L + I)   -p × cos(π (t - L) / I)
//! Quiescent  t ≥ L + I        0
//! ```
//!
//! An empty phase (`L = 0` or `I = 0`) is skipped; its divisor is never
//! evaluated. Every value lies in `[-|p|, |p|]`. For `p_percent >= 0` the onset
//! and the first half of recovery are non-positive; past `t = L + I/2` the
//! cosine changes sign and the curve overshoots above zero until the shock
//! ends. A negative `p_percent` mirrors the whole curve.

use std::f64::consts::PI;

use synth_core::params::Horizon;

/// Phase of the shock at a given step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShockPhase {
    /// Rising disruption, `t < L`.
    Onset,
    /// Decay back to zero, `L <= t < L + I`.
    Recovery,
    /// Shock fully dissipated, `t >= L + I`.
    Quiescent,
}

impl ShockPhase {
    /// Classifies step `t` against half-open phase intervals.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use synth_models::shock::ShockPhase;
    ///
    /// assert_eq!(ShockPhase::classify(0, 2, 2), ShockPhase::Onset);
    /// assert_eq!(ShockPhase::classify(2, 2, 2), ShockPhase::Recovery);
    /// assert_eq!(ShockPhase::classify(4, 2, 2), ShockPhase::Quiescent);
    /// assert_eq!(ShockPhase::classify(0, 0, 3), ShockPhase::Recovery);
    /// ```
    #[inline]
    pub fn classify(t: usize, onset: usize, recovery: usize) -> Self {
        if t < onset {
            ShockPhase::Onset
        } else if t < onset.saturating_add(recovery) {
            ShockPhase::Recovery
        } else {
            ShockPhase::Quiescent
        }
    }
}

/// Shock value at step `t`.
///
/// # Examples
///
/// ```rust
/// use synth_models::shock::shock_value;
///
/// // Start of recovery is the full depression -p
/// assert_eq!(shock_value(2, 1.0, 2, 2), -0.01);
/// assert_eq!(shock_value(9, 1.0, 2, 2), 0.0);
/// ```
#[inline]
pub fn shock_value(t: usize, shock_percent: f64, onset: usize, recovery: usize) -> f64 {
    let magnitude = shock_percent / 100.0;
    match ShockPhase::classify(t, onset, recovery) {
        ShockPhase::Onset => -magnitude * (PI * t as f64 / onset as f64).sin(),
        ShockPhase::Recovery => {
            -magnitude * (PI * (t - onset) as f64 / recovery as f64).cos()
        }
        ShockPhase::Quiescent => 0.0,
    }
}

/// Computes the full shock series of `horizon.steps()` values.
pub fn shock_curve(horizon: Horizon, shock_percent: f64) -> Vec<f64> {
    (0..horizon.steps())
        .map(|t| shock_value(t, shock_percent, horizon.onset(), horizon.recovery()))
        .collect()
}

/// Source of shock series.
pub trait ShockGenerator {
    /// Generates the shock series over `horizon`.
    ///
    /// A correct implementation returns exactly `horizon.steps()` values.
    fn generate(&self, horizon: Horizon, shock_percent: f64) -> Vec<f64>;

    /// Get the generator name for identification.
    fn name(&self) -> &'static str;
}

/// The sin/cos onset-recovery archetype.
#[derive(Clone, Copy, Debug, Default)]
pub struct SinCosShockCurve;

impl ShockGenerator for SinCosShockCurve {
    fn generate(&self, horizon: Horizon, shock_percent: f64) -> Vec<f64> {
        shock_curve(horizon, shock_percent)
    }

    fn name(&self) -> &'static str {
        "SinCos"
    }
}
