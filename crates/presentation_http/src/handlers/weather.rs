//! Weather provider handlers
//!
//! Forecast lookup and recent-history ingestion. Both answer 503 when no
//! provider key is configured.

use std::sync::Arc;

use application::{ForecastView, IngestionReport, IngestionService, Timestep};
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;
use validator::Validate;

use crate::{error::ApiError, middleware::ValidatedJson, state::AppState};

/// Query for `GET /weather/forecast`
#[derive(Debug, Default, Deserialize)]
pub struct ForecastQuery {
    pub location: Option<String>,
}

/// Body for `POST /weather/history`
#[derive(Debug, Deserialize, Validate)]
pub struct IngestRequest {
    #[validate(length(max = 255))]
    pub location: String,
    #[serde(default)]
    #[validate(length(max = 2))]
    pub timesteps: Vec<Timestep>,
}

fn ingestion(state: &AppState) -> Result<&Arc<IngestionService>, ApiError> {
    state
        .ingestion_service
        .as_ref()
        .ok_or_else(|| ApiError::ServiceUnavailable("Weather lookup is not configured".to_string()))
}

/// Daily forecast for a location
#[instrument(skip(state))]
pub async fn forecast(
    State(state): State<AppState>,
    Query(query): Query<ForecastQuery>,
) -> Result<Json<ForecastView>, ApiError> {
    let service = ingestion(&state)?;
    let location = query.location.unwrap_or_default();
    let view = service.forecast(&location).await?;
    Ok(Json(view))
}

/// Fetch recent history for a location and store its daily averages
#[instrument(skip(state, request), fields(location = %request.location))]
pub async fn ingest_history(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<IngestRequest>,
) -> Result<(StatusCode, Json<IngestionReport>), ApiError> {
    let service = ingestion(&state)?;
    let report = service
        .ingest(&request.location, &request.timesteps)
        .await?;
    Ok((StatusCode::CREATED, Json(report)))
}
