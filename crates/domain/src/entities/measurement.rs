//! Measurement entity - One daily temperature observation for a location

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::value_objects::{MeasurementId, deserialize_calendar_date};

/// A stored daily temperature observation
///
/// Rows are never updated: they are created by a bulk insert and removed
/// by a single-row delete. Duplicate `(location, measurement_date)` pairs
/// are permitted and keep distinct ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Identifier assigned by the store
    pub id: MeasurementId,
    /// Free-text location, stored exactly as supplied
    pub location: String,
    /// Calendar day of the observation, serialized as `YYYY-MM-DD`
    pub measurement_date: NaiveDate,
    /// Average temperature in Celsius, if known
    pub temp_c: Option<f64>,
}

/// A measurement before the store has assigned an id
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NewMeasurement {
    #[serde(deserialize_with = "deserialize_calendar_date")]
    pub date: NaiveDate,
    pub temp_c: Option<f64>,
}

impl NewMeasurement {
    #[must_use]
    pub const fn new(date: NaiveDate, temp_c: Option<f64>) -> Self {
        Self { date, temp_c }
    }
}
