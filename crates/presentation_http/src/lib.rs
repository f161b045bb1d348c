//! Weatherlog HTTP presentation layer
//!
//! JSON endpoints for stored measurements, forecast lookup and history
//! ingestion, plus liveness and readiness probes and the graceful
//! shutdown used by the server binary.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod shutdown;
pub mod state;

pub use error::ApiError;
pub use middleware::{RequestId, RequestIdLayer, ValidatedJson, ValidationError};
pub use routes::{create_router, create_router_with_layers};
pub use state::AppState;
