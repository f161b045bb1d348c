//! SQLite-based measurement persistence

use std::sync::Arc;

use application::{
    error::ApplicationError,
    ports::{BulkInsertOutcome, MeasurementStore},
};
use async_trait::async_trait;
use chrono::NaiveDate;
use domain::{
    DomainError,
    entities::{Measurement, NewMeasurement},
    value_objects::{DateRange, MeasurementId, has_four_digit_year},
};
use rusqlite::{Row, params, types::Type};
use tokio::task;
use tracing::{debug, instrument, warn};

use super::connection::ConnectionPool;

/// Storage format of `measurement_date`
const DATE_FORMAT: &str = "%Y-%m-%d";

/// SQLite-based measurement store
///
/// Each operation checks one connection out of the pool and returns it when
/// the blocking task finishes, on success and error paths alike.
#[derive(Debug, Clone)]
pub struct SqliteMeasurementStore {
    pool: Arc<ConnectionPool>,
}

impl SqliteMeasurementStore {
    /// Create a new SQLite measurement store
    #[must_use]
    pub const fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MeasurementStore for SqliteMeasurementStore {
    #[instrument(skip(self, measurements), fields(count = measurements.len()))]
    async fn insert_batch(
        &self,
        location: &str,
        measurements: &[NewMeasurement],
    ) -> BulkInsertOutcome {
        let pool = Arc::clone(&self.pool);
        let location = location.to_string();
        let measurements = measurements.to_vec();

        let joined = task::spawn_blocking(move || {
            let conn = match pool.get() {
                Ok(conn) => conn,
                Err(e) => {
                    return BulkInsertOutcome::Rejected {
                        error: ApplicationError::Internal(e.to_string()),
                    };
                },
            };

            // Rows are committed one by one; no enclosing transaction.
            let mut ids = Vec::with_capacity(measurements.len());
            for (index, m) in measurements.iter().enumerate() {
                let stored_date = m.date.format(DATE_FORMAT).to_string();
                // Text dates only sort chronologically with four-digit years
                let result = if has_four_digit_year(m.date) {
                    conn.execute(
                        "INSERT INTO weather_measurements (location, measurement_date, temp_c)
                         VALUES (?1, ?2, ?3)",
                        params![location, stored_date, m.temp_c],
                    )
                    .map_err(|e| ApplicationError::Internal(e.to_string()))
                } else {
                    Err(DomainError::InvalidDate(stored_date).into())
                };

                if let Err(error) = result {
                    if ids.is_empty() {
                        return BulkInsertOutcome::Rejected { error };
                    }
                    return BulkInsertOutcome::PartiallyCommitted {
                        ids,
                        failed_index: index,
                        error,
                    };
                }
                ids.push(MeasurementId::new(conn.last_insert_rowid()));
            }

            debug!(inserted = ids.len(), "Inserted measurements");
            BulkInsertOutcome::Committed { ids }
        })
        .await;

        joined.unwrap_or_else(|e| {
            warn!(error = %e, "Bulk insert task failed");
            BulkInsertOutcome::Rejected {
                error: ApplicationError::Internal(e.to_string()),
            }
        })
    }

    #[instrument(skip(self))]
    async fn list_all(&self) -> Result<Vec<Measurement>, ApplicationError> {
        let pool = Arc::clone(&self.pool);

        task::spawn_blocking(move || {
            let conn = pool
                .get()
                .map_err(|e| ApplicationError::Internal(e.to_string()))?;

            let mut stmt = conn
                .prepare(
                    "SELECT id, location, measurement_date, temp_c
                     FROM weather_measurements
                     ORDER BY measurement_date DESC, location ASC, id ASC",
                )
                .map_err(|e| ApplicationError::Internal(e.to_string()))?;

            let rows = stmt
                .query_map([], row_to_measurement)
                .map_err(|e| ApplicationError::Internal(e.to_string()))?
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| ApplicationError::Internal(e.to_string()))?;

            debug!(count = rows.len(), "Loaded measurements");
            Ok(rows)
        })
        .await
        .map_err(|e| ApplicationError::Internal(e.to_string()))?
    }

    #[instrument(skip(self), fields(range = %range))]
    async fn list_in_range(
        &self,
        location: &str,
        range: DateRange,
    ) -> Result<Vec<Measurement>, ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let location = location.to_string();
        let start = range.start().format(DATE_FORMAT).to_string();
        let end = range.end().format(DATE_FORMAT).to_string();

        task::spawn_blocking(move || {
            let conn = pool
                .get()
                .map_err(|e| ApplicationError::Internal(e.to_string()))?;

            let mut stmt = conn
                .prepare(
                    "SELECT id, location, measurement_date, temp_c
                     FROM weather_measurements
                     WHERE location = ?1 AND measurement_date BETWEEN ?2 AND ?3
                     ORDER BY measurement_date ASC, id ASC",
                )
                .map_err(|e| ApplicationError::Internal(e.to_string()))?;

            let rows = stmt
                .query_map(params![location, start, end], row_to_measurement)
                .map_err(|e| ApplicationError::Internal(e.to_string()))?
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| ApplicationError::Internal(e.to_string()))?;

            debug!(count = rows.len(), "Loaded measurements in range");
            Ok(rows)
        })
        .await
        .map_err(|e| ApplicationError::Internal(e.to_string()))?
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn delete(&self, id: MeasurementId) -> Result<bool, ApplicationError> {
        let pool = Arc::clone(&self.pool);

        task::spawn_blocking(move || {
            let conn = pool
                .get()
                .map_err(|e| ApplicationError::Internal(e.to_string()))?;

            let affected = conn
                .execute(
                    "DELETE FROM weather_measurements WHERE id = ?1",
                    [id.value()],
                )
                .map_err(|e| ApplicationError::Internal(e.to_string()))?;

            debug!(affected, "Deleted measurement");
            Ok(affected > 0)
        })
        .await
        .map_err(|e| ApplicationError::Internal(e.to_string()))?
    }

    #[instrument(skip(self))]
    async fn count(&self) -> Result<u64, ApplicationError> {
        let pool = Arc::clone(&self.pool);

        task::spawn_blocking(move || {
            let conn = pool
                .get()
                .map_err(|e| ApplicationError::Internal(e.to_string()))?;

            let count: i64 = conn
                .query_row("SELECT COUNT(*) FROM weather_measurements", [], |row| {
                    row.get(0)
                })
                .map_err(|e| ApplicationError::Internal(e.to_string()))?;

            u64::try_from(count).map_err(|e| ApplicationError::Internal(e.to_string()))
        })
        .await
        .map_err(|e| ApplicationError::Internal(e.to_string()))?
    }
}

/// Convert a database row to a Measurement domain entity
fn row_to_measurement(row: &Row<'_>) -> rusqlite::Result<Measurement> {
    let id: i64 = row.get(0)?;
    let location: String = row.get(1)?;
    let date_str: String = row.get(2)?;
    let temp_c: Option<f64> = row.get(3)?;

    let measurement_date = NaiveDate::parse_from_str(&date_str, DATE_FORMAT)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(e)))?;

    Ok(Measurement {
        id: MeasurementId::new(id),
        location,
        measurement_date,
        temp_c,
    })
}
