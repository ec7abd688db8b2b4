//! Application state shared across handlers

use std::{fmt, sync::Arc};

use application::{ClimateQueryService, ports::DatabaseHealthPort};
use infrastructure::{AppConfig, TemplateEngine};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Climate query service behind the JSON API
    pub query_service: Arc<ClimateQueryService>,
    /// Database probe for the readiness endpoint
    pub database_health: Arc<dyn DatabaseHealthPort>,
    /// HTML templates
    pub templates: TemplateEngine,
    /// Application configuration
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Create the shared state
    #[must_use]
    pub fn new(
        query_service: Arc<ClimateQueryService>,
        database_health: Arc<dyn DatabaseHealthPort>,
        templates: TemplateEngine,
        config: Arc<AppConfig>,
    ) -> Self {
        Self {
            query_service,
            database_health,
            templates,
            config,
        }
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("query_service", &self.query_service)
            .field("database_health", &"<DatabaseHealthPort>")
            .field("templates", &self.templates)
            .field("environment", &self.config.environment)
            .finish()
    }
}
