//! Route definitions

use axum::{
    Router,
    http::{HeaderValue, Method, Uri},
    routing::{get, post},
};
use infrastructure::ServerConfig;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{error::ApiError, handlers, middleware::RequestIdLayer, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Home page
        .route("/", get(handlers::pages::home))
        .route("/example", post(handlers::pages::example))
        // Health and status endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        // Climate API
        .route("/api/precipitation", get(handlers::climate::precipitation))
        .route("/api/stations", get(handlers::climate::stations))
        .route("/api/tobs", get(handlers::climate::tobs))
        .route("/api/{start}", get(handlers::climate::summary_since))
        .route(
            "/api/{start}/{end}",
            get(handlers::climate::summary_between),
        )
        .route(
            "/api/{start}/{end}/",
            get(handlers::climate::summary_between),
        )
        .fallback(not_found)
        // Attach state
        .with_state(state)
}

/// Create the router wrapped in the HTTP middleware stack
pub fn create_app(state: AppState, server: &ServerConfig) -> Router {
    let app = create_router(state).layer(TraceLayer::new_for_http());
    let app = match cors_layer(server) {
        Some(cors) => app.layer(cors),
        None => app,
    };
    // Last added = outermost, so the request span wraps everything else
    app.layer(RequestIdLayer::new())
}

/// CORS policy from server config, `None` when disabled
pub fn cors_layer(server: &ServerConfig) -> Option<CorsLayer> {
    if !server.cors_enabled {
        return None;
    }

    let layer = if server.allowed_origins.is_empty() {
        // Development mode: allow all origins
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = server
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET])
            .allow_headers(Any)
    };
    Some(layer)
}

async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("No such resource: {}", uri.path()))
}
