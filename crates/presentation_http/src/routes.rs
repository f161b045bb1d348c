//! Route definitions

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    middleware::map_response,
    routing::{get, post},
};
use infrastructure::ServerConfig;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

use crate::{error::redact_error_details, handlers, middleware::RequestIdLayer, state::AppState};

/// Create the router with all routes and no middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health and status endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        // Stored measurements
        .route(
            "/weather-measurements",
            get(handlers::measurements::list_measurements)
                .post(handlers::measurements::create_measurements)
                .delete(handlers::measurements::delete_measurement),
        )
        // Weather provider
        .route("/weather/forecast", get(handlers::weather::forecast))
        .route("/weather/history", post(handlers::weather::ingest_history))
        .with_state(state)
}

/// Create the router wrapped in the server's middleware stack
///
/// From the outside in: request id, request tracing, CORS, body size limit.
/// In production, error details are redacted innermost.
pub fn create_router_with_layers(state: AppState) -> Router {
    let server = state.config.server.clone();
    let production = state.config.is_production();

    let mut router = create_router(state);
    if production {
        router = router.layer(map_response(redact_error_details));
    }

    router
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(server.max_body_size_json_bytes))
        .layer(cors_layer(&server))
        .layer(TraceLayer::new_for_http())
        .layer(RequestIdLayer::new())
}

/// Allow any origin when none are configured, otherwise only the listed ones
fn cors_layer(server: &ServerConfig) -> CorsLayer {
    if server.allowed_origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = server
        .allowed_origins
        .iter()
        .filter_map(|o| match o.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring unparseable CORS origin");
                None
            },
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers(Any)
}
