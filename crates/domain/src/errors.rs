//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// A calendar date could not be parsed
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// A measurement identifier could not be parsed
    #[error("Invalid id: {0}")]
    InvalidMeasurementId(String),
}
