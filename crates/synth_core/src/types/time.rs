//! Time types for labelling scenario time axes.
//!
//! This module provides:
//! - `Date`: Type-safe date wrapper around chrono::NaiveDate
//! - `date_range`: Consecutive calendar days for a dataset's date column
//!
//! # Examples
//!
//! ```
//! use synth_core::types::time::{date_range, Date};
//!
//! let start = Date::from_ymd(2024, 2, 28).unwrap();
//! let days = date_range(start, 3).unwrap();
//!
//! // 2024 is a leap year
//! assert_eq!(days[1].to_string(), "2024-02-29");
//! assert_eq!(days[2].to_string(), "2024-03-01");
//! ```

use chrono::{Datelike, NaiveDate};
use std::fmt;
use std::ops::Sub;
use std::str::FromStr;

use super::error::DateError;

/// Type-safe date wrapper around chrono::NaiveDate.
///
/// Provides ISO 8601 parsing and formatting plus the day arithmetic needed to
/// lay out a scenario's calendar.
///
/// # Examples
///
/// ```
/// use synth_core::types::time::Date;
///
/// let date = Date::from_ymd(2024, 6, 15).unwrap();
/// assert_eq!(date.year(), 2024);
///
/// let parsed: Date = "2024-06-15".parse().unwrap();
/// assert_eq!(date, parsed);
///
/// let start = Date::from_ymd(2024, 1, 1).unwrap();
/// let end = Date::from_ymd(2024, 1, 11).unwrap();
/// assert_eq!(end - start, 10);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a Date from year, month, and day components.
    ///
    /// # Returns
    /// `Ok(Date)` if the date is valid, `Err(DateError::InvalidDate)` otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use synth_core::types::time::Date;
    ///
    /// assert!(Date::from_ymd(2024, 2, 29).is_ok());
    /// assert!(Date::from_ymd(2023, 2, 29).is_err());
    /// ```
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, DateError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or(DateError::InvalidDate { year, month, day })
    }

    /// Parses a date from ISO 8601 format string (YYYY-MM-DD).
    ///
    /// # Examples
    ///
    /// ```
    /// use synth_core::types::time::Date;
    ///
    /// let date = Date::parse("2024-01-01").unwrap();
    /// assert_eq!(date.month(), 1);
    /// assert!(Date::parse("01/01/2024").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, DateError> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Date)
            .map_err(|e| DateError::ParseError(format!("'{}': {}", s, e)))
    }

    /// Returns the date `days` calendar days later.
    ///
    /// # Errors
    /// `DateError::OutOfRange` if the result is not representable.
    pub fn add_days(self, days: usize) -> Result<Self, DateError> {
        let out_of_range = || DateError::OutOfRange {
            start: self.to_string(),
            count: days,
        };
        let offset = u64::try_from(days).map_err(|_| out_of_range())?;
        self.0
            .checked_add_days(chrono::Days::new(offset))
            .map(Date)
            .ok_or_else(out_of_range)
    }

    /// Returns the year component.
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day component (1-31).
    pub fn day(&self) -> u32 {
        self.0.day()
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Date(date)
    }
}

impl Sub for Date {
    type Output = i64;

    /// Returns the number of days between two dates.
    fn sub(self, other: Self) -> i64 {
        (self.0 - other.0).num_days()
    }
}

impl FromStr for Date {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, DateError> {
        Date::parse(s)
    }
}

impl fmt::Display for Date {
    /// Formats the date as ISO 8601 (YYYY-MM-DD).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// Generates `count` consecutive calendar days starting at `start`.
///
/// Index `i` of the result is `start + i` days, so the first element is
/// `start` itself. Weekends and holidays are not skipped.
///
/// # Errors
/// `DateError::OutOfRange` if the last day is not representable.
///
/// # Examples
///
/// ```
/// use synth_core::types::time::{date_range, Date};
///
/// let start = Date::parse("2024-12-31").unwrap();
/// let days = date_range(start, 2).unwrap();
/// assert_eq!(days[1], Date::parse("2025-01-01").unwrap());
/// assert!(date_range(start, 0).unwrap().is_empty());
/// ```
pub fn date_range(start: Date, count: usize) -> Result<Vec<Date>, DateError> {
    if count == 0 {
        return Ok(Vec::new());
    }
    // Fail up front rather than after allocating most of the column.
    start.add_days(count - 1)?;

    let mut dates = Vec::with_capacity(count);
    let mut current = start.0;
    dates.push(Date(current));
    for _ in 1..count {
        current = current.succ_opt().ok_or(DateError::OutOfRange {
            start: start.to_string(),
            count,
        })?;
        dates.push(Date(current));
    }
    Ok(dates)
}
