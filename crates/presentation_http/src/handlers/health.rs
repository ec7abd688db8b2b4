//! Health check handlers

use application::ports::DatabaseHealth;
use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::state::AppState;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Liveness check - is the server running?
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub database: DatabaseStatus,
}

/// Status of the measurement database
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatabaseStatus {
    pub healthy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measurement_rows: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time_ms: Option<u64>,
}

impl From<DatabaseHealth> for DatabaseStatus {
    fn from(health: DatabaseHealth) -> Self {
        Self {
            healthy: health.reachable,
            version: health.version,
            measurement_rows: health.measurement_rows,
            response_time_ms: health.response_time_ms,
        }
    }
}

/// Readiness check - can the server answer climate queries?
pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let database = match state.database_health.check_health().await {
        Ok(health) => DatabaseStatus::from(health),
        Err(e) => {
            warn!(error = %e, "Database health check failed");
            DatabaseStatus::default()
        },
    };

    let ready = database.healthy;
    let status_code = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(ReadinessResponse { ready, database }))
}
