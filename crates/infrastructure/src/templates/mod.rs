//! Template engine for the HTML home page
//!
//! Uses Tera with templates embedded at compile time. HTML templates are
//! auto-escaped.
//!
//! # Example
//!
//! ```rust,ignore
//! use infrastructure::templates::{HomePage, TemplateEngine};
//!
//! let engine = TemplateEngine::new()?;
//! let html = engine.render_home(&HomePage::default())?;
//! ```

use std::sync::Arc;

use domain::{DatasetBounds, TemperatureSummary, format_observation_date};
use serde::Serialize;
use tera::{Context, Tera};
use thiserror::Error;
use tracing::debug;

/// Name of the home page template
pub const HOME_TEMPLATE: &str = "index.html";

/// Error type for template operations
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Template not found
    #[error("Template not found: {0}")]
    NotFound(String),

    /// Template rendering failed
    #[error("Template rendering failed: {0}")]
    Render(String),

    /// Template compilation failed
    #[error("Template compilation failed: {0}")]
    Compile(String),
}

impl From<tera::Error> for TemplateError {
    fn from(e: tera::Error) -> Self {
        match e.kind {
            tera::ErrorKind::TemplateNotFound(name) => Self::NotFound(name),
            _ => Self::Render(e.to_string()),
        }
    }
}

/// One entry in the home page route list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteLink {
    /// HTTP method
    pub method: String,
    /// Path pattern
    pub path: String,
    /// Short description
    pub description: String,
}

impl RouteLink {
    /// Create a route entry
    #[must_use]
    pub fn new(
        method: impl Into<String>,
        path: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            description: description.into(),
        }
    }
}

/// Data for the home page
#[derive(Debug, Clone, Serialize)]
pub struct HomePage {
    /// Page heading
    pub title: String,
    /// Routes to list
    pub routes: Vec<RouteLink>,
    /// First observation date, if known
    pub first_date: Option<String>,
    /// Last observation date, if known
    pub last_date: Option<String>,
    /// Echo of the submitted start date
    pub start_input: Option<String>,
    /// Echo of the submitted end date
    pub end_input: Option<String>,
    /// Temperature summary from a form submission
    pub summary: Option<TemperatureSummary>,
    /// Error message from a form submission
    pub error: Option<String>,
}

impl Default for HomePage {
    fn default() -> Self {
        Self {
            title: "Hawaii Climate API".to_string(),
            routes: Vec::new(),
            first_date: None,
            last_date: None,
            start_input: None,
            end_input: None,
            summary: None,
            error: None,
        }
    }
}

impl HomePage {
    /// Set the route list
    #[must_use]
    pub fn with_routes(mut self, routes: Vec<RouteLink>) -> Self {
        self.routes = routes;
        self
    }

    /// Show the available date range
    #[must_use]
    pub fn with_bounds(mut self, bounds: DatasetBounds) -> Self {
        self.first_date = Some(format_observation_date(bounds.first_date()));
        self.last_date = Some(format_observation_date(bounds.last_date()));
        self
    }

    /// Echo the submitted form values
    #[must_use]
    pub fn with_inputs(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.start_input = Some(start.into());
        self.end_input = Some(end.into());
        self
    }

    /// Show a temperature summary
    #[must_use]
    pub const fn with_summary(mut self, summary: TemperatureSummary) -> Self {
        self.summary = Some(summary);
        self
    }

    /// Show an error message
    #[must_use]
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }
}

/// Embedded templates - compiled into the binary
mod embedded {
    pub const INDEX: &str = include_str!("../../templates/index.html");
}

/// Template engine using Tera
#[derive(Clone)]
pub struct TemplateEngine {
    tera: Arc<Tera>,
}

impl std::fmt::Debug for TemplateEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateEngine").finish_non_exhaustive()
    }
}

impl TemplateEngine {
    /// Create a template engine with the embedded templates
    pub fn new() -> Result<Self, TemplateError> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![".html", ".htm"]);

        tera.add_raw_template(HOME_TEMPLATE, embedded::INDEX)
            .map_err(|e| TemplateError::Compile(e.to_string()))?;

        debug!("Template engine initialized");
        Ok(Self {
            tera: Arc::new(tera),
        })
    }

    /// Render the home page
    pub fn render_home(&self, page: &HomePage) -> Result<String, TemplateError> {
        let context =
            Context::from_serialize(page).map_err(|e| TemplateError::Render(e.to_string()))?;
        self.tera
            .render(HOME_TEMPLATE, &context)
            .map_err(TemplateError::from)
    }
}
