//! Database health check port
//!
//! Lets the readiness endpoint probe the measurement store without knowing
//! which database backs it.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Result of a database health probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseHealth {
    /// Whether the database answered the probe query
    pub reachable: bool,
    /// Engine version string, if available
    pub version: Option<String>,
    /// Number of rows in the measurement table, if counted
    pub measurement_rows: Option<u64>,
    /// Probe duration in milliseconds
    pub response_time_ms: Option<u64>,
}

impl DatabaseHealth {
    /// Create a healthy status with version info
    #[must_use]
    pub fn healthy_with_version(version: impl Into<String>) -> Self {
        Self {
            reachable: true,
            version: Some(version.into()),
            measurement_rows: None,
            response_time_ms: None,
        }
    }

    /// Create an unhealthy status
    #[must_use]
    pub const fn unhealthy() -> Self {
        Self {
            reachable: false,
            version: None,
            measurement_rows: None,
            response_time_ms: None,
        }
    }

    /// Attach the measurement row count
    #[must_use]
    pub const fn with_measurement_rows(mut self, rows: u64) -> Self {
        self.measurement_rows = Some(rows);
        self
    }

    /// Attach the probe duration
    #[must_use]
    pub const fn with_response_time(mut self, ms: u64) -> Self {
        self.response_time_ms = Some(ms);
        self
    }
}

/// Port for database health checking
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DatabaseHealthPort: Send + Sync {
    /// Check if the database is available and responding
    async fn is_available(&self) -> bool;

    /// Run the probe and collect details
    async fn check_health(&self) -> Result<DatabaseHealth, ApplicationError>;
}
