//! # synth_core: Foundation Types for Synthetic Shock Scenarios
//!
//! ## Layer 1 (Foundation) Role
//!
//! synth_core is the bottom layer of the workspace, providing:
//! - Validated per-asset simulation inputs (`params`)
//! - Time types: `Date` and consecutive calendar generation (`types::time`)
//! - Error types: `ScenarioError`, `DateError` (`types::error`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other synth_* crates, with minimal external dependencies:
//! - chrono: Date arithmetic
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use synth_core::params::{Horizon, SimulationParameters};
//! use synth_core::types::{date_range, Date};
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
//! assert_eq!(params.steps(), 390);
//!
//! let start = Date::parse("2024-01-01").unwrap();
//! let dates = date_range(start, 3).unwrap();
//! assert_eq!(dates[2].to_string(), "2024-01-03");
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for Date, Horizon, SimulationParameters

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod params;
pub mod types;
