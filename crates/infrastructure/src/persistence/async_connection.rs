//! Async database connection using sqlx
//!
//! The climate dataset is owned by an external process, so the pool opens the
//! file read-only unless told otherwise. Migrations in the workspace
//! `migrations/` directory only run against writable databases (tests and
//! freshly created files).

use std::{path::Path, str::FromStr, time::Duration};

use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use tracing::{debug, info, instrument};

use crate::config::DatabaseConfig;

/// Error type for async database operations
#[derive(Debug, thiserror::Error)]
pub enum AsyncDatabaseError {
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Configuration for async database connection
#[derive(Debug, Clone)]
pub struct AsyncDatabaseConfig {
    /// Database URL (e.g., "sqlite:hawaii.sqlite" or "sqlite::memory:")
    pub url: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Minimum number of connections to keep open
    pub min_connections: u32,
    /// Open connections read-only
    pub read_only: bool,
    /// How long a connection waits on a locked database
    pub busy_timeout: Duration,
}

impl Default for AsyncDatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:Resources/hawaii.sqlite".to_string(),
            max_connections: 5,
            min_connections: 1,
            read_only: true,
            busy_timeout: Duration::from_secs(5),
        }
    }
}

impl AsyncDatabaseConfig {
    /// Create a writable in-memory database configuration for testing
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 1, // each connection would see its own database
            min_connections: 1,
            read_only: false,
            ..Default::default()
        }
    }

    /// Create a writable file-based database configuration
    #[must_use]
    pub fn file(path: impl AsRef<Path>) -> Self {
        let path_str = path.as_ref().display().to_string();
        Self {
            url: format!("sqlite:{path_str}"),
            read_only: false,
            ..Default::default()
        }
    }

    /// Set read-only mode
    #[must_use]
    pub const fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:")
    }
}

impl From<&DatabaseConfig> for AsyncDatabaseConfig {
    fn from(config: &DatabaseConfig) -> Self {
        Self {
            max_connections: config.max_connections,
            ..Self::file(&config.path).read_only(config.read_only)
        }
    }
}

/// Async database connection pool
#[derive(Debug, Clone)]
pub struct AsyncDatabase {
    pool: SqlitePool,
    read_only: bool,
}

impl AsyncDatabase {
    /// Create a new async database connection pool
    ///
    /// Read-only pools never create the file; a missing database is an error.
    #[instrument(skip_all, fields(url = %config.url, read_only = config.read_only))]
    pub async fn new(config: &AsyncDatabaseConfig) -> Result<Self, AsyncDatabaseError> {
        if config.read_only && config.is_in_memory() {
            return Err(AsyncDatabaseError::Config(
                "an in-memory database cannot be read-only".to_string(),
            ));
        }

        let options = SqliteConnectOptions::from_str(&config.url)?
            .read_only(config.read_only)
            .create_if_missing(!config.read_only)
            .busy_timeout(config.busy_timeout);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            // in-memory databases vanish with their last connection
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        info!(
            max_connections = config.max_connections,
            "Async database pool created"
        );

        Ok(Self {
            pool,
            read_only: config.read_only,
        })
    }

    /// Create a writable in-memory database for testing
    pub async fn in_memory() -> Result<Self, AsyncDatabaseError> {
        Self::new(&AsyncDatabaseConfig::in_memory()).await
    }

    /// Open the database described by the application config
    ///
    /// Runs migrations when `run_migrations` is set.
    pub async fn open(config: &DatabaseConfig) -> Result<Self, AsyncDatabaseError> {
        let db = Self::new(&AsyncDatabaseConfig::from(config)).await?;
        if config.run_migrations {
            db.migrate().await?;
        }
        Ok(db)
    }

    /// Get the underlying pool for raw queries
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Whether the pool was opened read-only
    #[must_use]
    pub const fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Run database migrations using the workspace migration SQL files
    ///
    /// The schema uses `CREATE TABLE IF NOT EXISTS`, so an existing dataset
    /// file is adopted as-is.
    #[instrument(skip(self))]
    pub async fn migrate(&self) -> Result<(), AsyncDatabaseError> {
        if self.read_only {
            return Err(AsyncDatabaseError::Config(
                "cannot run migrations on a read-only database".to_string(),
            ));
        }

        sqlx::migrate!("../../migrations").run(&self.pool).await?;

        info!("Database migrations completed");
        Ok(())
    }

    /// Close all connections in the pool
    pub async fn close(&self) {
        self.pool.close().await;
        debug!("Database pool closed");
    }
}
