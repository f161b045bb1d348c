//! Persistence module
//!
//! SQLite-based storage for weather measurements.

pub mod connection;
pub mod measurement_store;
pub mod migrations;

pub use connection::{ConnectionPool, DatabaseError, create_pool};
pub use measurement_store::SqliteMeasurementStore;
pub use migrations::run_migrations;
