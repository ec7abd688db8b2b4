//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server settings
//! - `database`: SQLite database settings
//! - `query`: Climate query behaviour
//!
//! Logging settings live in [`crate::telemetry::TelemetryConfig`].
//!
//! Sources are layered: built-in defaults, then an optional `config.toml`,
//! then `CLIMATE_API_*` environment variables (`__` separates nested keys,
//! e.g. `CLIMATE_API_SERVER__PORT=8080`).

mod database;
mod query;
mod server;

use std::{fmt, path::Path};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub use database::DatabaseConfig;
pub use query::QueryConfig;
pub use server::ServerConfig;

use crate::telemetry::TelemetryConfig;

/// Prefix for configuration environment variables
pub const ENV_PREFIX: &str = "CLIMATE_API";

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Application environment (development or production)
///
/// Controls how much error detail is exposed to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment - internal errors are shown in responses
    #[default]
    Development,
    /// Production environment - internal errors are masked
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(format!(
                "Invalid environment: {s}. Use 'development' or 'production'"
            )),
        }
    }
}

/// Rejected configuration values
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigValidationError {
    #[error("server.port must not be 0")]
    ZeroPort,

    #[error("database.path must not be empty")]
    EmptyDatabasePath,

    #[error("database.max_connections must be at least 1")]
    ZeroConnections,

    #[error("database.run_migrations requires database.read_only = false")]
    MigrationsOnReadOnly,

    #[error("query.trailing_window_days must be positive, got {0}")]
    NonPositiveWindow(i64),
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (development or production)
    #[serde(default)]
    pub environment: Environment,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Query configuration
    #[serde(default)]
    pub query: QueryConfig,

    /// Logging configuration
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from `config.toml` (if present) and the environment
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(Path::new("config.toml"))
    }

    /// Load configuration from the given file (if present) and the environment
    pub fn load_from(path: &Path) -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            // Load from file if exists
            .add_source(config::File::from(path).required(false))
            // Override with environment variables (e.g., CLIMATE_API_SERVER__PORT)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.allowed_origins")
                    .try_parsing(true),
            );

        let config: Self = builder.build()?.try_deserialize()?;
        debug!(
            environment = %config.environment,
            database = %config.database.path,
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Whether the service runs in production mode
    #[must_use]
    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    /// Check values that deserialize fine but cannot work at runtime
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.server.port == 0 {
            return Err(ConfigValidationError::ZeroPort);
        }
        if self.database.path.trim().is_empty() {
            return Err(ConfigValidationError::EmptyDatabasePath);
        }
        if self.database.max_connections == 0 {
            return Err(ConfigValidationError::ZeroConnections);
        }
        if self.database.run_migrations && self.database.read_only {
            return Err(ConfigValidationError::MigrationsOnReadOnly);
        }
        if self.query.trailing_window_days <= 0 {
            return Err(ConfigValidationError::NonPositiveWindow(
                self.query.trailing_window_days,
            ));
        }
        Ok(())
    }
}
