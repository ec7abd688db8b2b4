//! SQLite database health adapter
//!
//! Implements the `DatabaseHealthPort` on top of the sqlx pool.

use std::time::Instant;

use application::error::ApplicationError;
use application::ports::{DatabaseHealth, DatabaseHealthPort};
use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::{debug, instrument, warn};

use super::error::map_sqlx_error;

/// SQLite database health adapter
#[derive(Debug, Clone)]
pub struct SqliteDatabaseHealth {
    pool: SqlitePool,
}

impl SqliteDatabaseHealth {
    /// Create a new database health adapter with the given connection pool
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DatabaseHealthPort for SqliteDatabaseHealth {
    #[instrument(skip(self))]
    async fn is_available(&self) -> bool {
        match sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
        {
            Ok(_) => {
                debug!("Database health check passed");
                true
            },
            Err(e) => {
                warn!(error = %e, "Database health check failed");
                false
            },
        }
    }

    #[instrument(skip(self))]
    async fn check_health(&self) -> Result<DatabaseHealth, ApplicationError> {
        let start = Instant::now();

        let version: String = sqlx::query_scalar("SELECT sqlite_version()")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, "Database health check failed");
                map_sqlx_error(e)
            })?;

        // A missing table still counts as reachable
        let rows: Option<i64> = sqlx::query_scalar("SELECT COUNT(*) FROM measurement")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| warn!(error = %e, "Could not count measurement rows"))
            .ok();

        #[allow(clippy::cast_possible_truncation)]
        let response_time_ms = start.elapsed().as_millis() as u64;

        debug!(
            version = %version,
            rows = ?rows,
            response_time_ms,
            "Database health check passed"
        );

        let mut health = DatabaseHealth::healthy_with_version(format!("SQLite {version}"))
            .with_response_time(response_time_ms);
        if let Some(rows) = rows.and_then(|n| u64::try_from(n).ok()) {
            health = health.with_measurement_rows(rows);
        }
        Ok(health)
    }
}
