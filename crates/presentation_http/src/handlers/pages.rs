//! HTML page handlers
//!
//! The home page lists the API routes and offers a form that computes a
//! temperature summary for a date range.

use application::ApplicationError;
use axum::{Form, extract::State, response::Html};
use domain::parse_observation_date;
use infrastructure::{HomePage, RouteLink};
use serde::Deserialize;
use tracing::{instrument, warn};

use crate::{error::ApiError, state::AppState};

/// Form fields posted by the home page
#[derive(Debug, Clone, Deserialize)]
pub struct RangeForm {
    /// Start date, `YYYY-MM-DD`
    pub sdate: String,
    /// End date, `YYYY-MM-DD`
    pub edate: String,
}

/// Routes shown on the home page
#[must_use]
pub fn route_links() -> Vec<RouteLink> {
    vec![
        RouteLink::new("GET", "/api/precipitation", "Precipitation keyed by date"),
        RouteLink::new("GET", "/api/stations", "Station identifiers"),
        RouteLink::new(
            "GET",
            "/api/tobs",
            "Last year of temperatures for the most active station",
        ),
        RouteLink::new(
            "GET",
            "/api/startdate=YYYY-MM-DD",
            "Min, average and max temperature from a start date",
        ),
        RouteLink::new(
            "GET",
            "/api/startdate=YYYY-MM-DD/enddate=YYYY-MM-DD/",
            "Min, average and max temperature between two dates",
        ),
    ]
}

/// Base page with routes and, when available, the dataset bounds
async fn base_page(state: &AppState) -> Result<HomePage, ApiError> {
    let page = HomePage::default().with_routes(route_links());
    match state.query_service.dataset_bounds().await {
        Ok(bounds) => Ok(page.with_bounds(bounds)),
        Err(ApplicationError::DatasetEmpty) => Ok(page),
        Err(e) => Err(e.into()),
    }
}

fn render(state: &AppState, page: &HomePage) -> Result<Html<String>, ApiError> {
    state
        .templates
        .render_home(page)
        .map(Html)
        .map_err(|e| ApiError::Internal(e.to_string()))
}

/// GET /
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let page = base_page(&state).await?;
    render(&state, &page)
}

/// POST /example
///
/// Re-renders the home page with the summary for the submitted range, or with
/// the reason it could not be computed.
#[instrument(skip(state))]
pub async fn example(
    State(state): State<AppState>,
    Form(form): Form<RangeForm>,
) -> Result<Html<String>, ApiError> {
    let page = base_page(&state)
        .await?
        .with_inputs(form.sdate.trim(), form.edate.trim());

    let dates = parse_observation_date(&form.sdate)
        .and_then(|start| parse_observation_date(&form.edate).map(|end| (start, end)));

    let page = match dates {
        Err(e) => page.with_error(e.to_string()),
        Ok((start, end)) => match state.query_service.temperature_between(start, end).await {
            Ok(summary) => page.with_summary(summary),
            Err(ApplicationError::DateOutOfRange { boundary, bounds }) => page
                .with_error(boundary.out_of_range_code())
                .with_bounds(bounds),
            Err(e) if e.is_client_error() => page.with_error(e.to_string()),
            Err(e) => {
                warn!(error = %e, "Summary for form submission failed");
                return Err(e.into());
            },
        },
    };

    render(&state, &page)
}
