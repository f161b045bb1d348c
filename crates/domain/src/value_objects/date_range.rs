//! Inclusive calendar-date range used by filtered reads
//!
//! # Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use domain::value_objects::DateRange;
//!
//! let range = DateRange::parse("2024-01-01", "2024-01-31").expect("valid dates");
//! assert!(range.contains(NaiveDate::from_ymd_opt(2024, 1, 31).expect("valid date")));
//! assert!(!range.contains(NaiveDate::from_ymd_opt(2024, 2, 1).expect("valid date")));
//! ```

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, de};

use crate::errors::DomainError;

/// Date format used on the wire and in the store
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Check whether a date has a plain four-digit year
///
/// Only these dates format as `YYYY-MM-DD` text that sorts in calendar
/// order, which is what the store relies on.
#[must_use]
pub fn has_four_digit_year(date: NaiveDate) -> bool {
    (0..=9999).contains(&date.year())
}

/// Parse a `YYYY-MM-DD` calendar date
///
/// Signed or five-digit years such as `+10000-01-01` are rejected.
///
/// # Errors
///
/// Returns `DomainError::InvalidDate` if the string is not a valid calendar
/// date with a year between 0000 and 9999.
pub fn parse_calendar_date(s: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .ok()
        .filter(|date| has_four_digit_year(*date))
        .ok_or_else(|| DomainError::InvalidDate(s.to_string()))
}

/// Serde adapter that deserializes a date through [`parse_calendar_date`]
///
/// # Errors
///
/// Fails with the `Invalid date: ...` message for anything
/// `parse_calendar_date` rejects.
pub fn deserialize_calendar_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_calendar_date(&raw).map_err(de::Error::custom)
}

/// Inclusive `[start, end]` range of calendar dates
///
/// A range whose start is after its end is allowed and matches nothing,
/// the same way SQL `BETWEEN` behaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Create a range from two dates
    #[must_use]
    pub const fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Parse a range from two `YYYY-MM-DD` strings
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDate` naming the first bound that fails to parse.
    pub fn parse(start: &str, end: &str) -> Result<Self, DomainError> {
        Ok(Self::new(parse_calendar_date(start)?, parse_calendar_date(end)?))
    }

    /// First day of the range
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the range
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Check whether a date falls inside the range (both bounds inclusive)
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Check whether the range can match any date at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}..={}",
            self.start.format(DATE_FORMAT),
            self.end.format(DATE_FORMAT)
        )
    }
}
