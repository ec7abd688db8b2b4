//! Climate JSON API handlers
//!
//! The summary routes take their dates from path segments written as
//! `startdate=YYYY-MM-DD` and `enddate=YYYY-MM-DD`.

use application::{PrecipitationSeries, StationTemperatures};
use axum::{
    Json,
    extract::{Path, State},
};
use chrono::NaiveDate;
use domain::{StationId, TemperatureSummary, parse_observation_date};
use tracing::{debug, instrument};

use crate::{error::ApiError, state::AppState};

/// Path prefix of the start date segment
pub const START_PREFIX: &str = "startdate=";
/// Path prefix of the end date segment
pub const END_PREFIX: &str = "enddate=";

/// Parse a `<prefix>YYYY-MM-DD` path segment
///
/// A segment without the prefix does not name a route (404); a prefixed but
/// malformed date is a bad request (400).
pub fn parse_date_segment(segment: &str, prefix: &str) -> Result<NaiveDate, ApiError> {
    let raw = segment
        .strip_prefix(prefix)
        .ok_or_else(|| ApiError::NotFound(format!("No such resource: /api/{segment}")))?;
    parse_observation_date(raw).map_err(|e| ApiError::BadRequest(e.to_string()))
}

/// GET /api/precipitation
#[instrument(skip(state))]
pub async fn precipitation(
    State(state): State<AppState>,
) -> Result<Json<PrecipitationSeries>, ApiError> {
    let series = state.query_service.precipitation_series().await?;
    Ok(Json(series))
}

/// GET /api/stations
#[instrument(skip(state))]
pub async fn stations(State(state): State<AppState>) -> Result<Json<Vec<StationId>>, ApiError> {
    let stations = state.query_service.list_stations().await?;
    Ok(Json(stations))
}

/// GET /api/tobs
#[instrument(skip(state))]
pub async fn tobs(State(state): State<AppState>) -> Result<Json<StationTemperatures>, ApiError> {
    let temperatures = state.query_service.most_active_station_trailing_year().await?;
    Ok(Json(temperatures))
}

/// GET /api/startdate=<start>
#[instrument(skip(state))]
pub async fn summary_since(
    State(state): State<AppState>,
    Path(start): Path<String>,
) -> Result<Json<TemperatureSummary>, ApiError> {
    let start = parse_date_segment(&start, START_PREFIX)?;
    let summary = state.query_service.temperature_since(start).await?;
    debug!(?summary, "Computed summary since start date");
    Ok(Json(summary))
}

/// GET /api/startdate=<start>/enddate=<end>/
#[instrument(skip(state))]
pub async fn summary_between(
    State(state): State<AppState>,
    Path((start, end)): Path<(String, String)>,
) -> Result<Json<TemperatureSummary>, ApiError> {
    let start = parse_date_segment(&start, START_PREFIX)?;
    let end = parse_date_segment(&end, END_PREFIX)?;
    let summary = state.query_service.temperature_between(start, end).await?;
    debug!(?summary, "Computed summary within range");
    Ok(Json(summary))
}
