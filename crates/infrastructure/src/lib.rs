//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer: the sqlx-backed
//! measurement repository and health probe, configuration loading, logging
//! setup, and HTML templates.

pub mod config;
pub mod persistence;
pub mod telemetry;
pub mod templates;

pub use config::{
    AppConfig, ConfigValidationError, DatabaseConfig, Environment, QueryConfig, ServerConfig,
};
pub use persistence::{
    AsyncDatabase, AsyncDatabaseConfig, AsyncDatabaseError, InMemoryMeasurementRepository,
    SqliteDatabaseHealth, SqliteMeasurementRepository,
};
pub use telemetry::{LogFormat, TelemetryConfig, TelemetryError, init_telemetry};
pub use templates::{HomePage, RouteLink, TemplateEngine, TemplateError};
