//! Application state shared across handlers

use std::sync::Arc;

use application::{IngestionService, MeasurementService};
use infrastructure::AppConfig;

/// Shared application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Stored measurement operations
    pub measurement_service: Arc<MeasurementService>,
    /// Forecast and history ingestion; `None` when no provider key is configured
    pub ingestion_service: Option<Arc<IngestionService>>,
    /// Application configuration
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// State without a weather provider
    #[must_use]
    pub fn new(measurement_service: MeasurementService, config: AppConfig) -> Self {
        Self {
            measurement_service: Arc::new(measurement_service),
            ingestion_service: None,
            config: Arc::new(config),
        }
    }

    /// Attach the ingestion service backing the `/weather` endpoints
    #[must_use]
    pub fn with_ingestion(mut self, service: IngestionService) -> Self {
        self.ingestion_service = Some(Arc::new(service));
        self
    }
}
