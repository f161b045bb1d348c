//! Port definitions - Interfaces for external systems
//!
//! Ports define the contracts between the application layer and
//! infrastructure adapters, following hexagonal architecture.

mod measurement_store;
mod weather_lookup_port;

#[cfg(test)]
pub use measurement_store::MockMeasurementStore;
pub use measurement_store::{BulkInsertOutcome, MeasurementStore};
#[cfg(test)]
pub use weather_lookup_port::MockWeatherLookupPort;
pub use weather_lookup_port::{
    DailyWeather, Timestep, WeatherCondition, WeatherLookupPort, WeatherSeries,
};
