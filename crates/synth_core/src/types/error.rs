//! Error types for structured error handling.
//!
//! This module provides:
//! - `ScenarioError`: Errors from parameter validation, composition and dataset assembly
//! - `DateError`: Errors from date construction, parsing and calendar generation

use thiserror::Error;

/// Date-related errors.
///
/// # Variants
/// - `InvalidDate`: Invalid date components (e.g., February 30th)
/// - `ParseError`: Failed to parse date string
/// - `OutOfRange`: A generated calendar would leave chrono's supported range
///
/// # Examples
/// ```
/// use synth_core::types::DateError;
///
/// let err = DateError::InvalidDate { year: 2024, month: 2, day: 30 };
/// assert_eq!(format!("{}", err), "Invalid date: 2024-2-30");
/// ```
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DateError {
    /// Invalid date components (e.g., February 30th).
    #[error("Invalid date: {year}-{month}-{day}")]
    InvalidDate {
        /// Year component
        year: i32,
        /// Month component (1-12)
        month: u32,
        /// Day component (1-31)
        day: u32,
    },

    /// Failed to parse date string.
    #[error("Date parse error: {0}")]
    ParseError(String),

    /// Calendar generation overflowed the representable date range.
    #[error("Date out of range: {count} days after {start}")]
    OutOfRange {
        /// ISO 8601 start date
        start: String,
        /// Number of days requested
        count: usize,
    },
}

/// Scenario construction and composition errors.
///
/// Every failure is raised at the point of detection; no partial series are
/// ever returned alongside an error.
///
/// # Variants
/// - `LengthMismatch`: A generator returned a series whose length differs from the horizon
/// - `InvalidHorizon`: Non-positive step count, or negative onset/recovery duration
/// - `InvalidParameter`: Non-finite or out-of-domain real parameter
/// - `HorizonMismatch`: Assets in one dataset disagree on the step count
/// - `EmptyScenario`: A dataset was requested with no assets
/// - `DuplicateLabel`: Two assets share a column label
/// - `Date`: Calendar generation failed
///
/// # Examples
/// ```
/// use synth_core::types::ScenarioError;
///
/// let err = ScenarioError::LengthMismatch { ideal_len: 4, shock_len: 5, expected: 5 };
/// assert_eq!(
///     format!("{}", err),
///     "Length mismatch: ideal series has 4 points, shock series has 5 points, expected 5"
/// );
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ScenarioError {
    /// Generated series length differs from the requested step count.
    #[error(
        "Length mismatch: ideal series has {ideal_len} points, shock series has {shock_len} points, expected {expected}"
    )]
    LengthMismatch {
        /// Length of the idealised price series
        ideal_len: usize,
        /// Length of the shock series
        shock_len: usize,
        /// Requested step count N
        expected: usize,
    },

    /// Horizon component outside its valid domain.
    #[error("Invalid horizon '{name}' = {value}: {reason}")]
    InvalidHorizon {
        /// Component name (`steps`, `onset`, `recovery`)
        name: &'static str,
        /// The rejected value
        value: i64,
        /// Constraint that was violated
        reason: &'static str,
    },

    /// Real-valued parameter outside its valid domain.
    #[error("Invalid parameter '{name}' = {value}: {reason}")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// The rejected value
        value: f64,
        /// Constraint that was violated
        reason: &'static str,
    },

    /// Asset step count disagrees with the rest of the dataset.
    #[error("Horizon mismatch: asset {asset} (index {index}) has {found} steps, expected {expected}")]
    HorizonMismatch {
        /// Label of the offending asset
        asset: String,
        /// Position of the offending asset in the input list
        index: usize,
        /// Its step count
        found: usize,
        /// Step count shared by the preceding assets
        expected: usize,
    },

    /// No assets were supplied.
    #[error("Scenario contains no assets")]
    EmptyScenario,

    /// Two assets were given the same label.
    #[error("Duplicate asset label: {0}")]
    DuplicateLabel(String),

    /// Calendar generation failed.
    #[error("Calendar error: {0}")]
    Date(#[from] DateError),
}

impl ScenarioError {
    /// Returns `true` for errors that indicate a generator defect rather than bad input.
    pub fn is_internal(&self) -> bool {
        matches!(self, ScenarioError::LengthMismatch { .. })
    }
}
