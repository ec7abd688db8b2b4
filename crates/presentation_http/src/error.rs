//! API error handling
//!
//! Maps application errors to HTTP responses. In production mode, internal
//! errors return generic messages without details.

use application::ApplicationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use domain::{DatasetBounds, DateBoundary, format_observation_date};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;

/// Global flag to control error detail exposure
static EXPOSE_INTERNAL_ERRORS: AtomicBool = AtomicBool::new(true);

/// Configure whether internal error details should be exposed in responses.
///
/// Set to `false` in production.
pub fn set_expose_internal_errors(expose: bool) {
    EXPOSE_INTERNAL_ERRORS.store(expose, Ordering::SeqCst);
}

/// Check if internal error details should be exposed
fn should_expose_details() -> bool {
    EXPOSE_INTERNAL_ERRORS.load(Ordering::SeqCst)
}

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("{boundary} date is out of range (available: {bounds})")]
    DateOutOfRange {
        boundary: DateBoundary,
        bounds: DatasetBounds,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Additional error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Body returned when a requested date lies outside the dataset
#[derive(Debug, Serialize)]
pub struct OutOfRangeResponse {
    /// `start_date_is_out_of_range` or `end_date_is_out_of_range`
    pub error: &'static str,
    /// First available observation date
    pub first_date: String,
    /// Last available observation date
    pub last_date: String,
}

impl OutOfRangeResponse {
    /// Build the body for a rejected boundary
    #[must_use]
    pub fn new(boundary: DateBoundary, bounds: DatasetBounds) -> Self {
        Self {
            error: boundary.out_of_range_code(),
            first_date: format_observation_date(bounds.first_date()),
            last_date: format_observation_date(bounds.last_date()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match self {
            Self::DateOutOfRange { boundary, bounds } => {
                return (
                    StatusCode::NOT_FOUND,
                    Json(OutOfRangeResponse::new(boundary, bounds)),
                )
                    .into_response();
            },
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg, None),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg, None),
            Self::Internal(msg) => {
                // Internal errors never leak details in production
                let details = should_expose_details().then_some(msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                    details,
                )
            },
        };

        if status.is_server_error() {
            tracing::error!(code, details = ?details, "Request failed");
        }

        let body = ErrorResponse {
            error: message,
            code: code.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        match err {
            ApplicationError::Domain(e) => Self::BadRequest(e.to_string()),
            ApplicationError::DatasetEmpty => {
                Self::NotFound(ApplicationError::DatasetEmpty.to_string())
            },
            ApplicationError::DateOutOfRange { boundary, bounds } => {
                Self::DateOutOfRange { boundary, bounds }
            },
            ApplicationError::Repository(msg) | ApplicationError::Configuration(msg) => {
                Self::Internal(msg)
            },
        }
    }
}
