//! Weather adapter - Implements WeatherLookupPort using integration_weather

use std::sync::Arc;

use application::error::ApplicationError;
use application::ports::{DailyWeather, Timestep, WeatherCondition, WeatherLookupPort, WeatherSeries};
use async_trait::async_trait;
use integration_weather::{
    DailyRecord, Timeline, TomorrowClient, WeatherClient, WeatherCondition as IntegrationCondition,
    WeatherConfig, WeatherError,
};
use tracing::{debug, instrument, warn};

/// Message shown when the provider cannot resolve a location
pub const LOCATION_NOT_FOUND: &str = "Location not found or not supported.";

/// Adapter for weather lookups using the Tomorrow.io API
pub struct WeatherAdapter {
    client: Arc<dyn WeatherClient>,
}

impl std::fmt::Debug for WeatherAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherAdapter")
            .field("client", &"TomorrowClient")
            .finish()
    }
}

impl WeatherAdapter {
    /// Create with custom configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error if no API key is set, or an internal
    /// error if the HTTP client fails to initialize.
    pub fn with_config(config: WeatherConfig) -> Result<Self, ApplicationError> {
        let client = TomorrowClient::new(config).map_err(Self::map_error)?;
        Ok(Self {
            client: Arc::new(client),
        })
    }

    /// Wrap an existing weather client
    #[must_use]
    pub fn with_client(client: Arc<dyn WeatherClient>) -> Self {
        Self { client }
    }

    /// Map integration weather error to application error
    fn map_error(err: WeatherError) -> ApplicationError {
        match err {
            WeatherError::LocationNotFound(location) => {
                debug!(%location, "Provider could not resolve location");
                ApplicationError::NotFound(LOCATION_NOT_FOUND.to_string())
            },
            WeatherError::RateLimitExceeded => ApplicationError::RateLimited,
            WeatherError::MissingApiKey => {
                ApplicationError::Configuration("weather.api_key is not set".into())
            },
            WeatherError::ConnectionFailed(e)
            | WeatherError::RequestFailed(e)
            | WeatherError::ServiceUnavailable(e)
            | WeatherError::ParseError(e) => {
                warn!(error = %e, "Weather provider call failed");
                ApplicationError::ExternalService(e)
            },
        }
    }

    /// Convert integration weather condition to application weather condition
    const fn map_condition(condition: IntegrationCondition) -> WeatherCondition {
        match condition {
            IntegrationCondition::Clear | IntegrationCondition::MostlyClear => {
                WeatherCondition::Clear
            },
            IntegrationCondition::PartlyCloudy => WeatherCondition::PartlyCloudy,
            IntegrationCondition::MostlyCloudy | IntegrationCondition::Cloudy => {
                WeatherCondition::Cloudy
            },
            IntegrationCondition::Fog | IntegrationCondition::LightFog => WeatherCondition::Fog,
            IntegrationCondition::Drizzle => WeatherCondition::Drizzle,
            IntegrationCondition::Rain
            | IntegrationCondition::LightRain
            | IntegrationCondition::HeavyRain => WeatherCondition::Rain,
            IntegrationCondition::Snow
            | IntegrationCondition::Flurries
            | IntegrationCondition::LightSnow
            | IntegrationCondition::HeavySnow => WeatherCondition::Snow,
            IntegrationCondition::FreezingDrizzle
            | IntegrationCondition::FreezingRain
            | IntegrationCondition::LightFreezingRain
            | IntegrationCondition::HeavyFreezingRain => WeatherCondition::FreezingRain,
            IntegrationCondition::IcePellets
            | IntegrationCondition::HeavyIcePellets
            | IntegrationCondition::LightIcePellets => WeatherCondition::IcePellets,
            IntegrationCondition::Thunderstorm => WeatherCondition::Thunderstorm,
            IntegrationCondition::Unknown => WeatherCondition::Unknown,
        }
    }

    fn map_daily(record: DailyRecord) -> DailyWeather {
        DailyWeather {
            date: record.date,
            temperature_avg: record.temperature_avg,
            temperature_min: record.temperature_min,
            temperature_max: record.temperature_max,
            humidity_avg: record.humidity_avg,
            wind_speed_avg: record.wind_speed_avg,
            precipitation_sum: record.precipitation_sum,
            condition: Self::map_condition(record.condition),
            icon: record.condition.emoji().to_string(),
        }
    }

    fn map_timeline(timeline: Timeline) -> WeatherSeries {
        WeatherSeries {
            resolved_location: timeline.location_name,
            daily: timeline.daily.into_iter().map(Self::map_daily).collect(),
            hourly_available: timeline.hourly_available,
            daily_available: timeline.daily_available,
        }
    }
}

#[async_trait]
impl WeatherLookupPort for WeatherAdapter {
    #[instrument(skip(self))]
    async fn forecast(&self, location: &str, days: u8) -> Result<WeatherSeries, ApplicationError> {
        let timeline = self
            .client
            .forecast(location, days)
            .await
            .map_err(Self::map_error)?;
        Ok(Self::map_timeline(timeline))
    }

    #[instrument(skip(self))]
    async fn recent_history(
        &self,
        location: &str,
        timesteps: &[Timestep],
    ) -> Result<WeatherSeries, ApplicationError> {
        let steps: Vec<&str> = timesteps.iter().map(Timestep::as_str).collect();
        let timeline = self
            .client
            .recent_history(location, &steps)
            .await
            .map_err(Self::map_error)?;
        Ok(Self::map_timeline(timeline))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn location_not_found_maps_to_not_found() {
        let err = WeatherAdapter::map_error(WeatherError::LocationNotFound("x".into()));
        assert!(matches!(err, ApplicationError::NotFound(ref m) if m == LOCATION_NOT_FOUND));
    }

    #[test]
    fn rate_limit_maps_to_rate_limited() {
        let err = WeatherAdapter::map_error(WeatherError::RateLimitExceeded);
        assert!(matches!(err, ApplicationError::RateLimited));
    }

    #[test]
    fn upstream_failures_map_to_external_service() {
        for err in [
            WeatherError::ConnectionFailed("c".into()),
            WeatherError::RequestFailed("r".into()),
            WeatherError::ServiceUnavailable("s".into()),
            WeatherError::ParseError("p".into()),
        ] {
            assert!(matches!(
                WeatherAdapter::map_error(err),
                ApplicationError::ExternalService(_)
            ));
        }
    }

    #[test]
    fn missing_key_is_configuration_error() {
        let err = WeatherAdapter::with_config(WeatherConfig::default()).unwrap_err();
        assert!(matches!(err, ApplicationError::Configuration(_)));
    }

    #[test]
    fn condition_mapping() {
        assert_eq!(
            WeatherAdapter::map_condition(IntegrationCondition::MostlyClear),
            WeatherCondition::Clear
        );
        assert_eq!(
            WeatherAdapter::map_condition(IntegrationCondition::HeavyRain),
            WeatherCondition::Rain
        );
        assert_eq!(
            WeatherAdapter::map_condition(IntegrationCondition::LightFreezingRain),
            WeatherCondition::FreezingRain
        );
        assert_eq!(
            WeatherAdapter::map_condition(IntegrationCondition::LightIcePellets),
            WeatherCondition::IcePellets
        );
    }

    #[test]
    fn daily_record_maps_icon_and_values() {
        let record = DailyRecord {
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            temperature_avg: Some(7.5),
            temperature_min: Some(2.0),
            temperature_max: Some(11.0),
            humidity_avg: None,
            wind_speed_avg: Some(4.1),
            precipitation_sum: None,
            weather_code: Some(4200),
            condition: IntegrationCondition::LightRain,
        };

        let daily = WeatherAdapter::map_daily(record);
        assert_eq!(daily.condition, WeatherCondition::Rain);
        assert_eq!(daily.icon, "🌦️");
        assert_eq!(daily.temperature_avg, Some(7.5));
    }
}
