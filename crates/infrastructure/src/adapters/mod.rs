//! Adapters - Implementations of application ports

mod weather_adapter;

pub use weather_adapter::{LOCATION_NOT_FOUND, WeatherAdapter};
