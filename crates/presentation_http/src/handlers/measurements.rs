//! Stored measurement handlers
//!
//! `POST`, `GET` and `DELETE` on `/weather-measurements`. Query
//! parameters are checked here, so a request with a missing or malformed
//! parameter never reaches storage.

use application::BulkInsertOutcome;
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use domain::{DateRange, Measurement, MeasurementId, NewMeasurement};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use validator::Validate;

use crate::{error::ApiError, middleware::ValidatedJson, state::AppState};

/// Bulk insert request
///
/// Locations are limited to 255 characters and batches to 10 000 rows.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateMeasurementsRequest {
    #[validate(length(max = 255))]
    pub location: String,
    #[validate(length(max = 10000))]
    pub measurements: Vec<NewMeasurement>,
}

/// Acknowledgement for writes
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    const OK: Self = Self { success: true };
}

/// Query for `GET /weather-measurements`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub all: Option<String>,
    pub location: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Query for `DELETE /weather-measurements`
#[derive(Debug, Default, Deserialize)]
pub struct DeleteQuery {
    pub id: Option<String>,
}

/// What a list request asks for once its parameters are checked
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListRequest {
    All,
    InRange { location: String, range: DateRange },
}

/// Treat an empty parameter the same as an absent one
fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

impl ListQuery {
    /// Resolve the query into a list request
    ///
    /// `all=true` wins over every other parameter. Otherwise location,
    /// start date and end date are all required.
    pub fn resolve(&self) -> Result<ListRequest, ApiError> {
        if self.all.as_deref() == Some("true") {
            return Ok(ListRequest::All);
        }

        match (
            present(self.location.as_deref()),
            present(self.start_date.as_deref()),
            present(self.end_date.as_deref()),
        ) {
            (Some(location), Some(start), Some(end)) => Ok(ListRequest::InRange {
                location: location.to_string(),
                range: DateRange::parse(start, end)?,
            }),
            _ => Err(ApiError::BadRequest("Missing parameters".to_string())),
        }
    }
}

impl DeleteQuery {
    /// Parse the id parameter
    pub fn resolve(&self) -> Result<MeasurementId, ApiError> {
        let raw = present(self.id.as_deref())
            .ok_or_else(|| ApiError::BadRequest("Missing id".to_string()))?;
        Ok(MeasurementId::parse(raw)?)
    }
}

/// Insert every supplied measurement for the location
#[instrument(
    skip(state, request),
    fields(location = %request.location, count = request.measurements.len())
)]
pub async fn create_measurements(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateMeasurementsRequest>,
) -> Result<(StatusCode, Json<SuccessResponse>), ApiError> {
    let requested = request.measurements.len();
    let outcome = state
        .measurement_service
        .record_batch(&request.location, &request.measurements)
        .await;

    match outcome {
        BulkInsertOutcome::Committed { .. } => Ok((StatusCode::CREATED, Json(SuccessResponse::OK))),
        BulkInsertOutcome::PartiallyCommitted { ids, error, .. } => Err(ApiError::PartialInsert {
            committed: ids.len(),
            requested,
            reason: error.to_string(),
        }),
        BulkInsertOutcome::Rejected { error } => Err(error.into()),
    }
}

/// List measurements, either all of them or one location over a date range
#[instrument(skip(state))]
pub async fn list_measurements(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Measurement>>, ApiError> {
    let rows = match query.resolve()? {
        ListRequest::All => state.measurement_service.list_all().await?,
        ListRequest::InRange { location, range } => {
            state
                .measurement_service
                .list_in_range(&location, range)
                .await?
        },
    };
    Ok(Json(rows))
}

/// Delete one measurement; deleting an unknown id still succeeds
#[instrument(skip(state))]
pub async fn delete_measurement(
    State(state): State<AppState>,
    Query(query): Query<DeleteQuery>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let id = query.resolve()?;
    state.measurement_service.delete(id).await?;
    Ok(Json(SuccessResponse::OK))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn list(
        all: Option<&str>,
        location: Option<&str>,
        start: Option<&str>,
        end: Option<&str>,
    ) -> ListQuery {
        ListQuery {
            all: all.map(str::to_string),
            location: location.map(str::to_string),
            start_date: start.map(str::to_string),
            end_date: end.map(str::to_string),
        }
    }

    fn bad_request_message(err: ApiError) -> String {
        let ApiError::BadRequest(msg) = err else {
            unreachable!("Expected BadRequest");
        };
        msg
    }

    #[test]
    fn all_true_takes_precedence() {
        let query = list(Some("true"), Some("Berlin"), None, Some("garbage"));
        assert_eq!(query.resolve().unwrap(), ListRequest::All);
    }

    #[test]
    fn all_other_values_fall_through_to_filter() {
        let query = list(Some("false"), None, None, None);
        assert_eq!(
            bad_request_message(query.resolve().unwrap_err()),
            "Missing parameters"
        );
    }

    #[test]
    fn full_filter_resolves_to_range() {
        let query = list(None, Some("Berlin"), Some("2024-01-01"), Some("2024-01-31"));
        let ListRequest::InRange { location, range } = query.resolve().unwrap() else {
            unreachable!("Expected InRange");
        };
        assert_eq!(location, "Berlin");
        assert_eq!(range.start(), NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(range.end(), NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
    }

    #[test]
    fn each_missing_parameter_is_rejected() {
        let cases = [
            list(None, None, Some("2024-01-01"), Some("2024-01-02")),
            list(None, Some("Berlin"), None, Some("2024-01-02")),
            list(None, Some("Berlin"), Some("2024-01-01"), None),
            list(None, None, None, None),
        ];
        for query in cases {
            assert_eq!(
                bad_request_message(query.resolve().unwrap_err()),
                "Missing parameters"
            );
        }
    }

    #[test]
    fn empty_strings_count_as_missing() {
        let query = list(None, Some(""), Some("2024-01-01"), Some("2024-01-02"));
        assert_eq!(
            bad_request_message(query.resolve().unwrap_err()),
            "Missing parameters"
        );
    }

    #[test]
    fn malformed_date_is_reported() {
        let query = list(None, Some("Berlin"), Some("2024-02-30"), Some("2024-03-01"));
        assert_eq!(
            bad_request_message(query.resolve().unwrap_err()),
            "Invalid date: 2024-02-30"
        );
    }

    #[test]
    fn reversed_range_is_accepted() {
        let query = list(None, Some("Berlin"), Some("2024-02-01"), Some("2024-01-01"));
        let ListRequest::InRange { range, .. } = query.resolve().unwrap() else {
            unreachable!("Expected InRange");
        };
        assert!(range.is_empty());
    }

    #[test]
    fn delete_requires_id() {
        let missing = DeleteQuery { id: None };
        let empty = DeleteQuery {
            id: Some(String::new()),
        };
        assert_eq!(bad_request_message(missing.resolve().unwrap_err()), "Missing id");
        assert_eq!(bad_request_message(empty.resolve().unwrap_err()), "Missing id");
    }

    #[test]
    fn delete_rejects_non_numeric_id() {
        let query = DeleteQuery {
            id: Some("abc".to_string()),
        };
        assert_eq!(
            bad_request_message(query.resolve().unwrap_err()),
            "Invalid id: abc"
        );
    }

    #[test]
    fn delete_parses_id() {
        let query = DeleteQuery {
            id: Some("42".to_string()),
        };
        assert_eq!(query.resolve().unwrap(), MeasurementId::new(42));
    }

    #[test]
    fn create_request_limits() {
        let ok: CreateMeasurementsRequest = serde_json::from_str(
            r#"{"location":"Berlin","measurements":[{"date":"2024-01-01","temp_c":1.5}]}"#,
        )
        .unwrap();
        assert!(ok.validate().is_ok());

        let long = CreateMeasurementsRequest {
            location: "x".repeat(256),
            measurements: Vec::new(),
        };
        assert!(long.validate().is_err());
    }
}
