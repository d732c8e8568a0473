//! Core time and error types.
//!
//! This module provides:
//! - `time`: `Date` wrapper and consecutive calendar generation
//! - `error`: Structured error types for scenario construction and dates
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level:
//! - [`Date`], [`date_range`] from `time`
//! - [`ScenarioError`], [`DateError`] from `error`

pub mod error;
pub mod time;

pub use error::{DateError, ScenarioError};
pub use time::{date_range, Date};
