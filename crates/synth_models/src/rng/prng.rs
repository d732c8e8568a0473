//! Seedable pseudo-random number generator handle.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, StandardNormal};

/// Caller-owned random stream for scenario simulation.
///
/// # Examples
///
/// ```rust
/// use synth_models::rng::ScenarioRng;
///
/// let mut a = ScenarioRng::new(Some(7));
/// let mut b = ScenarioRng::from_seed(7);
/// assert_eq!(a.gen_normal(), b.gen_normal());
///
/// let unseeded = ScenarioRng::new(None);
/// assert_eq!(unseeded.seed(), None);
/// ```
#[derive(Clone, Debug)]
pub struct ScenarioRng {
    /// The underlying PRNG instance.
    inner: StdRng,
    /// Seed used for initialisation, if any (kept for logging).
    seed: Option<u64>,
}

impl ScenarioRng {
    /// Creates a handle from an optional seed.
    ///
    /// `Some(seed)` is reproducible; `None` seeds from system entropy.
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::from_seed(seed),
            None => Self::from_entropy(),
        }
    }

    /// Creates a reproducible handle initialised with the given seed.
    #[inline]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    /// Creates a non-reproducible handle seeded from system entropy.
    pub fn from_entropy() -> Self {
        Self {
            inner: StdRng::from_entropy(),
            seed: None,
        }
    }

    /// Returns the seed used for initialisation, if any.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Generates a single standard normal variate (mean=0, std=1).
    ///
    /// Uses the Ziggurat algorithm via `rand_distr::StandardNormal`.
    #[inline]
    pub fn gen_normal(&mut self) -> f64 {
        StandardNormal.sample(&mut self.inner)
    }

    /// Fills the buffer with standard normal variates, in index order.
    ///
    /// Empty buffers are a no-op and consume no draws.
    #[inline]
    pub fn fill_normal(&mut self, buffer: &mut [f64]) {
        for value in buffer.iter_mut() {
            *value = StandardNormal.sample(&mut self.inner);
        }
    }
}
