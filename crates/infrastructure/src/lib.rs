//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer: the SQLite
//! measurement store, the Tomorrow.io weather adapter, and configuration
//! loading.

pub mod adapters;
pub mod config;
pub mod persistence;

pub use adapters::*;
pub use config::{AppConfig, DatabaseConfig, Environment, ServerConfig, WeatherAppConfig};
pub use persistence::{
    ConnectionPool, DatabaseError, SqliteMeasurementStore, create_pool, run_migrations,
};
