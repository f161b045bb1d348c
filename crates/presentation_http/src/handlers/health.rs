//! Health check handlers

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Liveness check - is the server running?
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub database: DatabaseStatus,
}

/// Status of the measurement store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseStatus {
    pub healthy: bool,
    /// Stored row count, when the store answered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measurements: Option<u64>,
}

/// Readiness check - can the store be queried?
pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let measurements = match state.measurement_service.count().await {
        Ok(count) => Some(count),
        Err(e) => {
            tracing::warn!(error = %e, "Readiness probe could not reach the store");
            None
        },
    };

    let ready = measurements.is_some();
    let status_code = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status_code,
        Json(ReadinessResponse {
            ready,
            database: DatabaseStatus {
                healthy: ready,
                measurements,
            },
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_response_serialization() {
        let resp = HealthResponse {
            status: "ok".to_string(),
            version: "0.1.0".to_string(),
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("status"));
        assert!(json.contains("ok"));
        assert!(json.contains("version"));
    }

    #[tokio::test]
    async fn health_check_reports_crate_version() {
        let Json(resp) = health_check().await;
        assert_eq!(resp.status, "ok");
        assert_eq!(resp.version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn unhealthy_database_omits_count() {
        let status = DatabaseStatus {
            healthy: false,
            measurements: None,
        };
        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["healthy"], false);
        assert!(json.get("measurements").is_none());
    }

    #[test]
    fn readiness_response_shape() {
        let resp = ReadinessResponse {
            ready: true,
            database: DatabaseStatus {
                healthy: true,
                measurements: Some(12),
            },
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["ready"], true);
        assert_eq!(json["database"]["measurements"], 12);
    }
}
