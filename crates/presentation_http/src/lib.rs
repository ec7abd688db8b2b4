//! Hawaii climate HTTP presentation layer
//!
//! This crate provides the JSON API and home page over the measurement store.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use error::{ApiError, set_expose_internal_errors};
pub use middleware::{REQUEST_ID_HEADER, RequestId, RequestIdLayer};
pub use routes::{create_app, create_router};
pub use state::AppState;
