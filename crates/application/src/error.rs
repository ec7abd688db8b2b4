//! Application-level errors

use domain::{DatasetBounds, DateBoundary, DomainError};
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error (malformed dates, invalid identifiers)
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The measurement table holds no rows
    #[error("Dataset is empty: no measurements available")]
    DatasetEmpty,

    /// A requested date lies outside the observed dataset bounds
    #[error("{boundary} date is out of range (available: {bounds})")]
    DateOutOfRange {
        boundary: DateBoundary,
        bounds: DatasetBounds,
    },

    /// Reading from the measurement repository failed
    #[error("Repository error: {0}")]
    Repository(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ApplicationError {
    /// Check if this error was caused by the caller's input
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Domain(_) | Self::DatasetEmpty | Self::DateOutOfRange { .. }
        )
    }
}
