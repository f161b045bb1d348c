//! Tomorrow.io weather integration
//!
//! Client for the Tomorrow.io v4 Weather API (<https://docs.tomorrow.io>).
//! Provides daily forecasts and recent history timelines for free-text
//! locations. Requires an API key.

pub mod client;
mod models;

pub use client::{TomorrowClient, WeatherClient, WeatherConfig, WeatherError};
pub use models::{DailyRecord, Timeline, WeatherCondition};
