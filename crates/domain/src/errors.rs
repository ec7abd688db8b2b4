//! Domain-level errors

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Station identifier is empty or contains only whitespace
    #[error("Invalid station id: {0:?}")]
    InvalidStationId(String),

    /// Date input does not follow the `YYYY-MM-DD` format
    #[error("Invalid date: {0:?} (expected YYYY-MM-DD)")]
    InvalidDate(String),

    /// Dataset bounds where the first date is after the last date
    #[error("Invalid dataset bounds: {first} is after {last}")]
    InvalidBounds { first: NaiveDate, last: NaiveDate },
}
