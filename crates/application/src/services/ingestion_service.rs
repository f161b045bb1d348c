//! Ingestion service
//!
//! Pulls recent daily history for a location from the weather provider,
//! stores the daily averages, and reads the stored rows back. Also serves
//! the short daily forecast shown for a location.

use std::{fmt, sync::Arc};

use chrono::NaiveDate;
use domain::entities::{Measurement, NewMeasurement};
use domain::value_objects::DateRange;
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::{
    error::ApplicationError,
    ports::{BulkInsertOutcome, DailyWeather, Timestep, WeatherLookupPort},
    services::MeasurementService,
};

/// Number of forecast days shown by default
pub const DEFAULT_FORECAST_DAYS: u8 = 5;

/// Outcome of an ingestion run
#[derive(Debug, Clone, Serialize)]
pub struct IngestionReport {
    /// Location exactly as supplied by the caller
    pub location: String,
    /// Timesteps the provider actually returned, hourly first
    pub timesteps: Vec<Timestep>,
    /// Number of rows inserted by this run
    pub inserted: usize,
    /// Every stored row for the location, oldest first
    pub measurements: Vec<Measurement>,
}

/// Forecast prepared for display
#[derive(Debug, Clone, Serialize)]
pub struct ForecastView {
    /// Provider-resolved location name, or the input when none was resolved
    pub location: String,
    /// Leading daily records
    pub days: Vec<DailyWeather>,
}

/// Service orchestrating provider lookups and measurement storage
#[derive(Clone)]
pub struct IngestionService {
    weather: Arc<dyn WeatherLookupPort>,
    measurements: MeasurementService,
    forecast_days: u8,
}

impl fmt::Debug for IngestionService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IngestionService")
            .field("forecast_days", &self.forecast_days)
            .finish_non_exhaustive()
    }
}

/// Inclusive span used to read back everything stored for a location
fn full_history() -> Result<DateRange, ApplicationError> {
    let start = NaiveDate::from_ymd_opt(1970, 1, 1);
    let end = NaiveDate::from_ymd_opt(2100, 1, 1);
    match (start, end) {
        (Some(start), Some(end)) => Ok(DateRange::new(start, end)),
        _ => Err(ApplicationError::Internal(
            "history bounds out of range".to_string(),
        )),
    }
}

impl IngestionService {
    /// Create a new ingestion service
    #[must_use]
    pub fn new(weather: Arc<dyn WeatherLookupPort>, measurements: MeasurementService) -> Self {
        Self {
            weather,
            measurements,
            forecast_days: DEFAULT_FORECAST_DAYS,
        }
    }

    /// Override the number of forecast days returned
    #[must_use]
    pub const fn with_forecast_days(mut self, days: u8) -> Self {
        self.forecast_days = days;
        self
    }

    /// Fetch recent history for `location`, store its daily averages, and
    /// return every stored row for that location
    #[instrument(skip(self, timesteps), fields(timesteps = timesteps.len()))]
    pub async fn ingest(
        &self,
        location: &str,
        timesteps: &[Timestep],
    ) -> Result<IngestionReport, ApplicationError> {
        if location.trim().is_empty() {
            return Err(ApplicationError::Validation(
                "Please enter a location.".to_string(),
            ));
        }
        if timesteps.is_empty() {
            return Err(ApplicationError::Validation(
                "Please select at least one timestep.".to_string(),
            ));
        }

        let mut requested = timesteps.to_vec();
        requested.sort();
        requested.dedup();

        let series = self.weather.recent_history(location, &requested).await?;
        if series.daily.is_empty() {
            return Err(ApplicationError::NotFound(
                "No data found for this location.".to_string(),
            ));
        }

        let rows: Vec<NewMeasurement> = series
            .daily
            .iter()
            .map(|day| NewMeasurement::new(day.date, day.temperature_avg))
            .collect();

        let inserted = match self.measurements.record_batch(location, &rows).await {
            BulkInsertOutcome::Committed { ids } => ids.len(),
            BulkInsertOutcome::PartiallyCommitted { ids, error, .. } => {
                return Err(ApplicationError::Internal(format!(
                    "stored {} of {} measurements: {error}",
                    ids.len(),
                    rows.len()
                )));
            },
            BulkInsertOutcome::Rejected { error } => return Err(error),
        };

        let stored = self
            .measurements
            .list_in_range(location, full_history()?)
            .await?;
        if stored.is_empty() {
            return Err(ApplicationError::NotFound(
                "No stored data found for this location.".to_string(),
            ));
        }

        info!(inserted, stored = stored.len(), "History ingested");

        Ok(IngestionReport {
            location: location.to_string(),
            timesteps: series.available_timesteps(),
            inserted,
            measurements: stored,
        })
    }

    /// Leading days of the daily forecast for `location`
    #[instrument(skip(self))]
    pub async fn forecast(&self, location: &str) -> Result<ForecastView, ApplicationError> {
        if location.trim().is_empty() {
            return Err(ApplicationError::Validation(
                "No location provided.".to_string(),
            ));
        }

        let series = self.weather.forecast(location, self.forecast_days).await?;
        let days: Vec<DailyWeather> = series
            .daily
            .into_iter()
            .take(usize::from(self.forecast_days))
            .collect();

        debug!(days = days.len(), "Forecast prepared");

        Ok(ForecastView {
            location: series
                .resolved_location
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| location.to_string()),
            days,
        })
    }
}
