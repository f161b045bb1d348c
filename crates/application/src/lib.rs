//! Application layer - Use cases and orchestration
//!
//! Contains the measurement and ingestion use cases and the port
//! definitions they depend on. Adapters live in `infrastructure`.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
