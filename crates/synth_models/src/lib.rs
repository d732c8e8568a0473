//! # synth_models: Shocked Price Scenario Engine
//!
//! ## Layer 2 (Engine) Role
//!
//! synth_models turns validated [`SimulationParameters`](synth_core::params::SimulationParameters)
//! into synthetic price data:
//! - Caller-owned random streams (`rng`)
//! - Idealised multiplicative random-growth paths (`paths`)
//! - The deterministic sin/cos shock curve (`shock`)
//! - Per-asset composition `observed = ideal + α × shock` (`composer`)
//! - Multi-asset, date-aligned datasets with CSV export (`dataset`)
//!
//! ## Usage Examples
//!
//! ```rust
//! use synth_core::params::{Horizon, SimulationParameters};
//! use synth_models::prelude::*;
//!
//! let params = SimulationParameters::builder()
//!     .initial_price(100.0)
//!     .growth_rate(0.02)
//!     .volatility(0.01)
//!     .sensitivity(0.4)
//!     .shock_percent(1.0)
//!     .horizon(Horizon::new(390, 240, 50).unwrap())
//!     .build()
//!     .unwrap();
//!
//! let mut rng = ScenarioRng::from_seed(42);
//! let composed = PriceComposer::new().compose(&params, &mut rng).unwrap();
//! assert_eq!(composed.len(), 390);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod composer;
pub mod dataset;
pub mod paths;
pub mod rng;
pub mod shock;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::composer::{ComposedSeries, PriceComposer};
    pub use crate::dataset::{AssetColumn, DatasetRow, ScenarioDataset, ScenarioDatasetBuilder};
    pub use crate::paths::{GrowthParams, MultiplicativePathGenerator, PathGenerator};
    pub use crate::rng::ScenarioRng;
    pub use crate::shock::{ShockGenerator, ShockPhase, SinCosShockCurve};
}
