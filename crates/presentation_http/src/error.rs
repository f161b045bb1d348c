//! API error handling
//!
//! Every failure is rendered as `{ "error", "code", "details"? }`. Errors
//! whose details may be sensitive also carry a redacted body in the
//! response extensions; [`redact_error_details`] swaps it in when the
//! server runs in production.

use application::ApplicationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use domain::DomainError;
use serde::Serialize;
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// A bulk insert stopped partway; `committed` rows remain stored
    #[error("Partial insert: {committed} of {requested} rows stored: {reason}")]
    PartialInsert {
        committed: usize,
        requested: usize,
        reason: String,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Additional error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Rows stored before a bulk insert failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub committed: Option<usize>,
}

impl ErrorResponse {
    fn new(error: impl Into<String>, code: &str) -> Self {
        Self {
            error: error.into(),
            code: code.to_string(),
            details: None,
            committed: None,
        }
    }
}

impl ApiError {
    /// HTTP status for this error
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            Self::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::PartialInsert { .. } | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether the body differs once details are hidden
    const fn has_sensitive_details(&self) -> bool {
        matches!(
            self,
            Self::ServiceUnavailable(_) | Self::PartialInsert { .. } | Self::Internal(_)
        )
    }

    fn body(&self, expose: bool) -> ErrorResponse {
        match self {
            Self::BadRequest(msg) => ErrorResponse::new(msg.as_str(), "bad_request"),
            Self::NotFound(msg) => ErrorResponse::new(msg.as_str(), "not_found"),
            Self::RateLimited => ErrorResponse::new("Rate limit exceeded", "rate_limited"),
            Self::ServiceUnavailable(msg) => {
                let message = if expose {
                    msg.as_str()
                } else {
                    "Service temporarily unavailable"
                };
                ErrorResponse::new(message, "service_unavailable")
            },
            Self::PartialInsert {
                committed,
                requested,
                reason,
            } => ErrorResponse {
                details: expose.then(|| reason.clone()),
                committed: Some(*committed),
                ..ErrorResponse::new(
                    format!("Stored {committed} of {requested} measurements"),
                    "partial_insert",
                )
            },
            Self::Internal(msg) => ErrorResponse {
                details: expose.then(|| msg.clone()),
                ..ErrorResponse::new("An internal error occurred", "internal_error")
            },
        }
    }
}

/// Body to serve in place of the detailed one when details are hidden
#[derive(Debug, Clone)]
struct RedactedBody(ErrorResponse);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if matches!(self, Self::Internal(_) | Self::PartialInsert { .. }) {
            tracing::error!(error = %self, "Request failed");
        }
        let mut response = (self.status(), Json(self.body(true))).into_response();
        if self.has_sensitive_details() {
            response
                .extensions_mut()
                .insert(RedactedBody(self.body(false)));
        }
        response
    }
}

/// Response mapper that hides error details
///
/// Installed by the router when `environment = production`.
pub async fn redact_error_details(mut response: Response) -> Response {
    match response.extensions_mut().remove::<RedactedBody>() {
        Some(RedactedBody(body)) => (response.status(), Json(body)).into_response(),
        None => response,
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        match err {
            ApplicationError::Domain(e) => e.into(),
            ApplicationError::Validation(msg) => Self::BadRequest(msg),
            ApplicationError::NotFound(msg) => Self::NotFound(msg),
            ApplicationError::RateLimited => Self::RateLimited,
            ApplicationError::ExternalService(msg) => Self::ServiceUnavailable(msg),
            ApplicationError::Configuration(msg) | ApplicationError::Internal(msg) => {
                Self::Internal(msg)
            },
        }
    }
}
