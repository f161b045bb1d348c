//! Measurement service
//!
//! Create, read, and delete operations over stored temperature
//! observations. Parameter presence and format are checked at the
//! boundary before these methods are called.

use std::{fmt, sync::Arc};

use domain::entities::{Measurement, NewMeasurement};
use domain::value_objects::{DateRange, MeasurementId};
use tracing::{debug, info, instrument, warn};

use crate::{
    error::ApplicationError,
    ports::{BulkInsertOutcome, MeasurementStore},
};

/// Service for managing stored measurements
#[derive(Clone)]
pub struct MeasurementService {
    store: Arc<dyn MeasurementStore>,
}

impl fmt::Debug for MeasurementService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MeasurementService").finish_non_exhaustive()
    }
}

impl MeasurementService {
    /// Create a new measurement service
    #[must_use]
    pub fn new(store: Arc<dyn MeasurementStore>) -> Self {
        Self { store }
    }

    /// Insert every measurement for `location`, one row each, in order
    ///
    /// Duplicates of existing rows are inserted as new rows.
    #[instrument(skip(self, measurements), fields(count = measurements.len()))]
    pub async fn record_batch(
        &self,
        location: &str,
        measurements: &[NewMeasurement],
    ) -> BulkInsertOutcome {
        let outcome = self.store.insert_batch(location, measurements).await;

        match &outcome {
            BulkInsertOutcome::Committed { ids } => {
                info!(inserted = ids.len(), "Measurements recorded");
            },
            BulkInsertOutcome::PartiallyCommitted {
                ids,
                failed_index,
                error,
            } => {
                warn!(
                    committed = ids.len(),
                    failed_index,
                    error = %error,
                    "Bulk insert stopped partway"
                );
            },
            BulkInsertOutcome::Rejected { error } => {
                warn!(error = %error, "Bulk insert rejected");
            },
        }

        outcome
    }

    /// All stored measurements, newest date first then location ascending
    #[instrument(skip(self))]
    pub async fn list_all(&self) -> Result<Vec<Measurement>, ApplicationError> {
        let rows = self.store.list_all().await?;
        debug!(count = rows.len(), "Listed all measurements");
        Ok(rows)
    }

    /// Measurements for exactly `location` with a date inside `range`, oldest first
    #[instrument(skip(self), fields(range = %range))]
    pub async fn list_in_range(
        &self,
        location: &str,
        range: DateRange,
    ) -> Result<Vec<Measurement>, ApplicationError> {
        let rows = self.store.list_in_range(location, range).await?;
        debug!(count = rows.len(), "Listed measurements in range");
        Ok(rows)
    }

    /// Delete a measurement; deleting an unknown id is not an error
    #[instrument(skip(self), fields(id = %id))]
    pub async fn delete(&self, id: MeasurementId) -> Result<(), ApplicationError> {
        let removed = self.store.delete(id).await?;
        if removed {
            info!("Measurement deleted");
        } else {
            debug!("No measurement with this id");
        }
        Ok(())
    }

    /// Total number of stored measurements
    #[instrument(skip(self))]
    pub async fn count(&self) -> Result<u64, ApplicationError> {
        self.store.count().await
    }
}
