//! Weatherlog HTTP Server
//!
//! Main entry point for the HTTP API server.

use std::{sync::Arc, time::Duration};

use application::{IngestionService, MeasurementService, ports::WeatherLookupPort};
use infrastructure::{AppConfig, SqliteMeasurementStore, WeatherAdapter, create_pool};
use presentation_http::{
    create_router_with_layers,
    shutdown::{serve_with_shutdown, shutdown_signal},
    state::AppState,
};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Configuration decides the log format, so load it before tracing starts
    let loaded = AppConfig::load();
    let json_logs = loaded
        .as_ref()
        .is_ok_and(|config| config.server.json_logs());
    init_tracing(json_logs);

    info!("🌦️ Weatherlog v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = loaded.unwrap_or_else(|e| {
        warn!("Failed to load config, using defaults: {}", e);
        AppConfig::default()
    });

    info!(
        environment = %config.environment,
        host = %config.server.host,
        port = %config.server.port,
        database = %config.database.path,
        "Configuration loaded"
    );

    let pool = create_pool(&config.database)
        .map_err(|e| anyhow::anyhow!("Failed to open database: {e}"))?;
    let store = SqliteMeasurementStore::new(Arc::new(pool));
    let measurement_service = MeasurementService::new(Arc::new(store));

    let mut state = AppState::new(measurement_service.clone(), config.clone());
    match WeatherAdapter::with_config(config.weather.to_client_config()) {
        Ok(adapter) => {
            let weather: Arc<dyn WeatherLookupPort> = Arc::new(adapter);
            let ingestion = IngestionService::new(weather, measurement_service)
                .with_forecast_days(config.weather.forecast_days);
            state = state.with_ingestion(ingestion);
            info!(base_url = %config.weather.base_url, "Weather provider configured");
        },
        Err(e) => {
            warn!(error = %e, "Weather provider disabled; /weather endpoints will return 503");
        },
    }

    let app = create_router_with_layers(state);

    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr).await?;

    info!("🚀 Server listening on http://{}", addr);

    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs.unwrap_or(30));
    serve_with_shutdown(listener, app, shutdown_signal(), shutdown_timeout).await?;

    info!("👋 Server shutdown complete");

    Ok(())
}

/// Install the global subscriber, honouring `RUST_LOG` when set
fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| {
            "weatherlog_server=debug,presentation_http=debug,application=info,\
             infrastructure=info,integration_weather=info,tower_http=debug"
                .into()
        });

    let (json_layer, text_layer) = if json {
        (Some(tracing_subscriber::fmt::layer().json()), None)
    } else {
        (None, Some(tracing_subscriber::fmt::layer()))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}
