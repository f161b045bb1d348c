//! Measurement store port
//!
//! Defines the interface for persisting and querying daily temperature
//! observations.

use async_trait::async_trait;
use domain::entities::{Measurement, NewMeasurement};
use domain::value_objects::{DateRange, MeasurementId};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Result of a bulk insert
///
/// Every row is inserted as its own atomic unit, so a failure midway
/// leaves the earlier rows committed. Ids are listed in input order.
#[derive(Debug)]
pub enum BulkInsertOutcome {
    /// All rows were inserted
    Committed { ids: Vec<MeasurementId> },
    /// Rows before `failed_index` were inserted, the rest were not
    PartiallyCommitted {
        ids: Vec<MeasurementId>,
        failed_index: usize,
        error: ApplicationError,
    },
    /// Nothing was inserted (e.g. no connection could be acquired)
    Rejected { error: ApplicationError },
}

impl BulkInsertOutcome {
    /// Ids of the rows that were committed
    #[must_use]
    pub fn committed_ids(&self) -> &[MeasurementId] {
        match self {
            Self::Committed { ids } | Self::PartiallyCommitted { ids, .. } => ids,
            Self::Rejected { .. } => &[],
        }
    }

    /// Number of rows that were committed
    #[must_use]
    pub fn committed(&self) -> usize {
        self.committed_ids().len()
    }

    /// Whether every requested row was inserted
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        matches!(self, Self::Committed { .. })
    }

    /// Convert into a plain result, discarding the partial id list on failure
    pub fn into_result(self) -> Result<Vec<MeasurementId>, ApplicationError> {
        match self {
            Self::Committed { ids } => Ok(ids),
            Self::PartiallyCommitted { error, .. } | Self::Rejected { error } => Err(error),
        }
    }
}

/// Port for measurement persistence
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MeasurementStore: Send + Sync {
    /// Insert one row per measurement, all for `location`, in sequence order
    async fn insert_batch(
        &self,
        location: &str,
        measurements: &[NewMeasurement],
    ) -> BulkInsertOutcome;

    /// All rows, newest date first, then location ascending
    async fn list_all(&self) -> Result<Vec<Measurement>, ApplicationError>;

    /// Rows with exactly `location` and a date inside `range`, oldest first
    async fn list_in_range(
        &self,
        location: &str,
        range: DateRange,
    ) -> Result<Vec<Measurement>, ApplicationError>;

    /// Delete a row, returning whether one was removed
    async fn delete(&self, id: MeasurementId) -> Result<bool, ApplicationError>;

    /// Total number of stored rows
    async fn count(&self) -> Result<u64, ApplicationError>;
}
