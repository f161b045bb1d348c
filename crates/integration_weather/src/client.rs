//! Tomorrow.io weather client
//!
//! HTTP client for the Tomorrow.io v4 Weather API.

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::models::{ApiInterval, ApiResponse, DailyRecord, Timeline, WeatherCondition};

/// Maximum number of forecast days Tomorrow.io returns
const MAX_FORECAST_DAYS: u8 = 6;

/// Weather client errors
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Location could not be resolved by the provider
    #[error("Location not found: {0}")]
    LocationNotFound(String),

    /// Connection to the weather service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to the weather service failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse response from weather service
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Service is temporarily unavailable
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// No API key configured
    #[error("Tomorrow.io API key is not configured")]
    MissingApiKey,
}

/// Weather service configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Tomorrow.io API base URL (default: <https://api.tomorrow.io/v4>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Tomorrow.io API key
    #[serde(default)]
    pub api_key: Option<String>,

    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Number of forecast days (default: 5)
    #[serde(default = "default_forecast_days")]
    pub forecast_days: u8,
}

impl std::fmt::Debug for WeatherConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .field("forecast_days", &self.forecast_days)
            .finish()
    }
}

fn default_base_url() -> String {
    "https://api.tomorrow.io/v4".to_string()
}

const fn default_timeout() -> u64 {
    30
}

const fn default_forecast_days() -> u8 {
    5
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            timeout_secs: default_timeout(),
            forecast_days: default_forecast_days(),
        }
    }
}

/// Weather client trait for fetching weather timelines
#[async_trait]
pub trait WeatherClient: Send + Sync {
    /// Get the daily forecast for a free-text location
    async fn forecast(&self, location: &str, days: u8) -> Result<Timeline, WeatherError>;

    /// Get recent history for a free-text location at the given timesteps (`"1h"`, `"1d"`)
    async fn recent_history(
        &self,
        location: &str,
        timesteps: &[&str],
    ) -> Result<Timeline, WeatherError>;
}

/// Tomorrow.io HTTP client implementation
pub struct TomorrowClient {
    client: Client,
    config: WeatherConfig,
    api_key: String,
}

impl std::fmt::Debug for TomorrowClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TomorrowClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl TomorrowClient {
    /// Create a new Tomorrow.io client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns `MissingApiKey` if no key is configured, or an error if the
    /// HTTP client cannot be initialized.
    pub fn new(config: WeatherConfig) -> Result<Self, WeatherError> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or(WeatherError::MissingApiKey)?;

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| WeatherError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config,
            api_key,
        })
    }

    /// Configured number of forecast days
    #[must_use]
    pub const fn forecast_days(&self) -> u8 {
        self.config.forecast_days
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.config.base_url.trim_end_matches('/'))
    }

    /// Issue a GET and decode the timeline body
    async fn fetch(
        &self,
        url: &str,
        location: &str,
        query: &[(&str, &str)],
    ) -> Result<ApiResponse, WeatherError> {
        let response = self
            .client
            .get(url)
            .query(&[("location", location), ("apikey", self.api_key.as_str())])
            .query(query)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() || e.is_timeout() {
                    WeatherError::ConnectionFailed(e.to_string())
                } else {
                    WeatherError::RequestFailed(e.to_string())
                }
            })?;

        Self::check_status(response.status(), location)?;

        response
            .json()
            .await
            .map_err(|e| WeatherError::ParseError(e.to_string()))
    }

    /// Map non-success statuses to errors
    fn check_status(status: StatusCode, location: &str) -> Result<(), WeatherError> {
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(WeatherError::RateLimitExceeded);
        }
        if status == StatusCode::BAD_REQUEST || status == StatusCode::NOT_FOUND {
            return Err(WeatherError::LocationNotFound(location.to_string()));
        }
        if status.is_server_error() {
            return Err(WeatherError::ServiceUnavailable(format!("HTTP {status}")));
        }
        if !status.is_success() {
            return Err(WeatherError::RequestFailed(format!("HTTP {status}")));
        }
        Ok(())
    }

    /// Parse the calendar day from an interval timestamp (`2024-01-15T06:00:00Z`)
    fn parse_day(time: &str) -> Result<NaiveDate, WeatherError> {
        let day = time
            .get(..10)
            .ok_or_else(|| WeatherError::ParseError(format!("Invalid timestamp: {time}")))?;
        NaiveDate::parse_from_str(day, "%Y-%m-%d")
            .map_err(|e| WeatherError::ParseError(format!("Invalid date {day}: {e}")))
    }

    fn parse_daily(interval: &ApiInterval) -> Result<DailyRecord, WeatherError> {
        let values = &interval.values;
        let weather_code = values.weather_code_max;

        Ok(DailyRecord {
            date: Self::parse_day(&interval.time)?,
            temperature_avg: values.temperature_avg,
            temperature_min: values.temperature_min,
            temperature_max: values.temperature_max,
            humidity_avg: values.humidity_avg,
            wind_speed_avg: values.wind_speed_avg,
            precipitation_sum: values.precipitation_sum.or(values.rain_accumulation_sum),
            weather_code,
            condition: weather_code.map_or(WeatherCondition::Unknown, WeatherCondition::from_code),
        })
    }

    /// Convert the raw response into a `Timeline`
    fn parse_timeline(response: ApiResponse) -> Result<Timeline, WeatherError> {
        let location_name = response.location.and_then(|l| l.name);
        let Some(timelines) = response.timelines else {
            return Ok(Timeline {
                location_name,
                ..Timeline::default()
            });
        };

        let daily = timelines
            .daily
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(Self::parse_daily)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Timeline {
            location_name,
            daily,
            hourly_available: timelines.hourly.is_some(),
            daily_available: timelines.daily.is_some(),
        })
    }
}

#[async_trait]
impl WeatherClient for TomorrowClient {
    #[instrument(skip(self), fields(days = %days))]
    async fn forecast(&self, location: &str, days: u8) -> Result<Timeline, WeatherError> {
        let url = self.endpoint("weather/forecast");
        debug!(url = %url, "Fetching weather forecast");

        let response = self.fetch(&url, location, &[]).await?;
        let mut timeline = Self::parse_timeline(response)?;
        timeline
            .daily
            .truncate(usize::from(days.clamp(1, MAX_FORECAST_DAYS)));

        debug!(days = timeline.daily.len(), "Forecast received");
        Ok(timeline)
    }

    #[instrument(skip(self))]
    async fn recent_history(
        &self,
        location: &str,
        timesteps: &[&str],
    ) -> Result<Timeline, WeatherError> {
        let url = self.endpoint("weather/history/recent");
        let steps = timesteps.join(",");
        debug!(url = %url, timesteps = %steps, "Fetching recent history");

        let response = self
            .fetch(&url, location, &[("timesteps", steps.as_str())])
            .await?;
        let timeline = Self::parse_timeline(response)?;

        debug!(
            daily = timeline.daily.len(),
            hourly = timeline.hourly_available,
            "History received"
        );
        Ok(timeline)
    }
}
