//! Weather data models
//!
//! Types for representing timelines returned by the Tomorrow.io API.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Weather condition derived from Tomorrow.io weather codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCondition {
    /// Clear, sunny (1000)
    Clear,
    /// Mostly clear (1100)
    MostlyClear,
    /// Partly cloudy (1101)
    PartlyCloudy,
    /// Mostly cloudy (1102)
    MostlyCloudy,
    /// Cloudy (1001)
    Cloudy,
    /// Fog (2000)
    Fog,
    /// Light fog (2100)
    LightFog,
    /// Drizzle (4000)
    Drizzle,
    /// Rain (4001)
    Rain,
    /// Light rain (4200)
    LightRain,
    /// Heavy rain (4201)
    HeavyRain,
    /// Snow (5000)
    Snow,
    /// Flurries (5001)
    Flurries,
    /// Light snow (5100)
    LightSnow,
    /// Heavy snow (5101)
    HeavySnow,
    /// Freezing drizzle (6000)
    FreezingDrizzle,
    /// Freezing rain (6001)
    FreezingRain,
    /// Light freezing rain (6200)
    LightFreezingRain,
    /// Heavy freezing rain (6201)
    HeavyFreezingRain,
    /// Ice pellets (7000)
    IcePellets,
    /// Heavy ice pellets (7101)
    HeavyIcePellets,
    /// Light ice pellets (7102)
    LightIcePellets,
    /// Thunderstorm (8000)
    Thunderstorm,
    /// Unknown condition
    Unknown,
}

impl WeatherCondition {
    /// Convert a Tomorrow.io weather code to `WeatherCondition`
    ///
    /// Code `0` is reported for some clear days and is treated as clear.
    /// See: <https://docs.tomorrow.io/reference/data-layers-weather-codes>
    #[must_use]
    pub const fn from_code(code: u32) -> Self {
        match code {
            0 | 1000 => Self::Clear,
            1100 => Self::MostlyClear,
            1101 => Self::PartlyCloudy,
            1102 => Self::MostlyCloudy,
            1001 => Self::Cloudy,
            2000 => Self::Fog,
            2100 => Self::LightFog,
            4000 => Self::Drizzle,
            4001 => Self::Rain,
            4200 => Self::LightRain,
            4201 => Self::HeavyRain,
            5000 => Self::Snow,
            5001 => Self::Flurries,
            5100 => Self::LightSnow,
            5101 => Self::HeavySnow,
            6000 => Self::FreezingDrizzle,
            6001 => Self::FreezingRain,
            6200 => Self::LightFreezingRain,
            6201 => Self::HeavyFreezingRain,
            7000 => Self::IcePellets,
            7101 => Self::HeavyIcePellets,
            7102 => Self::LightIcePellets,
            8000 => Self::Thunderstorm,
            _ => Self::Unknown,
        }
    }

    /// Get a human-readable description of the weather condition
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Clear => "Clear",
            Self::MostlyClear => "Mostly clear",
            Self::PartlyCloudy => "Partly cloudy",
            Self::MostlyCloudy => "Mostly cloudy",
            Self::Cloudy => "Cloudy",
            Self::Fog => "Fog",
            Self::LightFog => "Light fog",
            Self::Drizzle => "Drizzle",
            Self::Rain => "Rain",
            Self::LightRain => "Light rain",
            Self::HeavyRain => "Heavy rain",
            Self::Snow => "Snow",
            Self::Flurries => "Flurries",
            Self::LightSnow => "Light snow",
            Self::HeavySnow => "Heavy snow",
            Self::FreezingDrizzle => "Freezing drizzle",
            Self::FreezingRain => "Freezing rain",
            Self::LightFreezingRain => "Light freezing rain",
            Self::HeavyFreezingRain => "Heavy freezing rain",
            Self::IcePellets => "Ice pellets",
            Self::HeavyIcePellets => "Heavy ice pellets",
            Self::LightIcePellets => "Light ice pellets",
            Self::Thunderstorm => "Thunderstorm",
            Self::Unknown => "Unknown",
        }
    }

    /// Get an emoji representation of the weather condition
    #[must_use]
    pub const fn emoji(&self) -> &'static str {
        match self {
            Self::Clear => "☀️",
            Self::MostlyClear => "🌤️",
            Self::PartlyCloudy => "🌥️",
            Self::MostlyCloudy | Self::Cloudy => "☁️",
            Self::Fog | Self::LightFog => "🌫️",
            Self::LightRain => "🌦️",
            Self::Drizzle
            | Self::Rain
            | Self::HeavyRain
            | Self::FreezingDrizzle
            | Self::FreezingRain
            | Self::LightFreezingRain
            | Self::HeavyFreezingRain => "🌧️",
            Self::LightSnow => "🌨️",
            Self::Snow | Self::Flurries | Self::HeavySnow => "❄️",
            Self::IcePellets | Self::HeavyIcePellets | Self::LightIcePellets => "🌩️",
            Self::Thunderstorm => "⛈️",
            Self::Unknown => "❓",
        }
    }
}

impl std::fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// One day of a daily timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    /// Calendar day, taken from the first 10 characters of the timestamp
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
    /// Precipitation total in mm
    pub precipitation_sum: Option<f64>,
    /// Raw Tomorrow.io weather code (daily maximum)
    pub weather_code: Option<u32>,
    /// Condition derived from `weather_code`
    pub condition: WeatherCondition,
}

/// Parsed timeline response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    /// Location name as resolved by Tomorrow.io
    pub location_name: Option<String>,
    /// Daily records in response order
    pub daily: Vec<DailyRecord>,
    /// Whether an hourly timeline was present
    pub hourly_available: bool,
    /// Whether a daily timeline was present
    pub daily_available: bool,
}

// ============================================================================
// Raw API response types
// ============================================================================

/// Top-level Tomorrow.io timeline response
#[derive(Debug, Deserialize)]
pub(crate) struct ApiResponse {
    #[serde(default)]
    pub timelines: Option<ApiTimelines>,
    #[serde(default)]
    pub location: Option<ApiLocation>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiTimelines {
    #[serde(default)]
    pub daily: Option<Vec<ApiInterval>>,
    /// Only presence matters; hourly values are not used
    #[serde(default)]
    pub hourly: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiLocation {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiInterval {
    pub time: String,
    #[serde(default)]
    pub values: ApiDailyValues,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApiDailyValues {
    pub temperature_avg: Option<f64>,
    pub temperature_min: Option<f64>,
    pub temperature_max: Option<f64>,
    pub humidity_avg: Option<f64>,
    pub wind_speed_avg: Option<f64>,
    pub precipitation_sum: Option<f64>,
    pub rain_accumulation_sum: Option<f64>,
    pub weather_code_max: Option<u32>,
}
