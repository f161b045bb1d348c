//! Weather lookup port
//!
//! Defines the interface for fetching forecast and recent-history series
//! from the upstream weather provider.

use std::fmt;

use async_trait::async_trait;
use chrono::NaiveDate;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// Upstream time granularity
///
/// Ordering puts `Hourly` before `Daily`, which is also the order used
/// when reporting which timesteps came back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Timestep {
    #[serde(rename = "1h")]
    Hourly,
    #[serde(rename = "1d")]
    Daily,
}

impl Timestep {
    /// Wire code understood by the provider
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Hourly => "1h",
            Self::Daily => "1d",
        }
    }
}

impl fmt::Display for Timestep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse weather condition exposed to clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCondition {
    Clear,
    PartlyCloudy,
    Cloudy,
    Fog,
    Drizzle,
    Rain,
    Snow,
    FreezingRain,
    IcePellets,
    Thunderstorm,
    Unknown,
}

impl WeatherCondition {
    /// Human-readable description
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Clear => "Clear",
            Self::PartlyCloudy => "Partly cloudy",
            Self::Cloudy => "Cloudy",
            Self::Fog => "Fog",
            Self::Drizzle => "Drizzle",
            Self::Rain => "Rain",
            Self::Snow => "Snow",
            Self::FreezingRain => "Freezing rain",
            Self::IcePellets => "Ice pellets",
            Self::Thunderstorm => "Thunderstorm",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// One day of aggregated weather values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyWeather {
    /// Calendar day (first 10 characters of the upstream timestamp)
    pub date: NaiveDate,
    /// Average temperature in Celsius
    pub temperature_avg: Option<f64>,
    /// Minimum temperature in Celsius
    pub temperature_min: Option<f64>,
    /// Maximum temperature in Celsius
    pub temperature_max: Option<f64>,
    /// Average relative humidity in percent
    pub humidity_avg: Option<f64>,
    /// Average wind speed in m/s
    pub wind_speed_avg: Option<f64>,
    /// Total precipitation in mm
    pub precipitation_sum: Option<f64>,
    /// Dominant condition of the day
    pub condition: WeatherCondition,
    /// Icon for the condition, as shown to users
    pub icon: String,
}

/// A weather timeline as returned by the provider
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherSeries {
    /// Location name as resolved by the provider
    pub resolved_location: Option<String>,
    /// Daily records in upstream order
    pub daily: Vec<DailyWeather>,
    /// Whether the provider returned an hourly timeline
    pub hourly_available: bool,
    /// Whether the provider returned a daily timeline
    pub daily_available: bool,
}

impl WeatherSeries {
    /// Timesteps present in the response, hourly first
    #[must_use]
    pub fn available_timesteps(&self) -> Vec<Timestep> {
        let mut out = Vec::with_capacity(2);
        if self.hourly_available {
            out.push(Timestep::Hourly);
        }
        if self.daily_available {
            out.push(Timestep::Daily);
        }
        out
    }
}

/// Port for weather lookups
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WeatherLookupPort: Send + Sync {
    /// Daily forecast for a free-text location
    async fn forecast(&self, location: &str, days: u8) -> Result<WeatherSeries, ApplicationError>;

    /// Recent history for a free-text location at the requested granularities
    async fn recent_history(
        &self,
        location: &str,
        timesteps: &[Timestep],
    ) -> Result<WeatherSeries, ApplicationError>;
}
