//! Application services - Use case implementations

mod ingestion_service;
mod measurement_service;

pub use ingestion_service::{ForecastView, IngestionReport, IngestionService};
pub use measurement_service::MeasurementService;
