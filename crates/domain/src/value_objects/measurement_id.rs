//! Measurement identifier assigned by the store

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Surrogate identifier of a stored measurement
///
/// Assigned by the store on insert and never reused after deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MeasurementId(i64);

impl MeasurementId {
    /// Wrap a raw row id
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Parse an identifier from user input (e.g. a query parameter)
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidMeasurementId` if the string is not an integer.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| DomainError::InvalidMeasurementId(s.to_string()))
    }

    /// Get the raw row id
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for MeasurementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for MeasurementId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<MeasurementId> for i64 {
    fn from(id: MeasurementId) -> Self {
        id.0
    }
}
