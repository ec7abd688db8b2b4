//! Integration tests for HTTP handlers
#![allow(clippy::expect_used)]

use std::sync::Arc;

use application::{
    ClimateQueryConfig, ClimateQueryService,
    error::ApplicationError,
    ports::{DatabaseHealth, DatabaseHealthPort},
};
use async_trait::async_trait;
use axum_test::TestServer;
use domain::{Measurement, StationId, parse_observation_date};
use infrastructure::{AppConfig, InMemoryMeasurementRepository, ServerConfig, TemplateEngine};
use presentation_http::{REQUEST_ID_HEADER, create_app, state::AppState};
use serde_json::json;

/// Health probe double with a fixed answer
struct StubHealth {
    healthy: bool,
}

#[async_trait]
impl DatabaseHealthPort for StubHealth {
    async fn is_available(&self) -> bool {
        self.healthy
    }

    async fn check_health(&self) -> Result<DatabaseHealth, ApplicationError> {
        if self.healthy {
            Ok(DatabaseHealth::healthy_with_version("3.45.1").with_measurement_rows(8))
        } else {
            Err(ApplicationError::Repository("database is locked".to_string()))
        }
    }
}

fn measurement(station: &str, date: &str, prcp: Option<f64>, tobs: Option<f64>) -> Measurement {
    Measurement {
        station: StationId::new(station).expect("valid station"),
        date: parse_observation_date(date).expect("valid date"),
        precipitation: prcp,
        temperature: tobs,
    }
}

fn dataset() -> Vec<Measurement> {
    vec![
        measurement("USC00519397", "2016-08-22", Some(0.0), Some(80.0)),
        measurement("USC00519281", "2016-08-23", Some(1.79), Some(77.0)),
        measurement("USC00519281", "2016-08-24", None, Some(77.0)),
        measurement("USC00519397", "2016-08-24", Some(0.08), Some(79.0)),
        measurement("USC00519281", "2017-01-15", Some(0.02), None),
        measurement("USC00519281", "2017-08-22", Some(0.0), Some(79.0)),
        measurement("USC00519397", "2017-08-23", Some(0.0), Some(81.0)),
        measurement("USC00519281", "2017-08-23", Some(0.45), Some(76.0)),
    ]
}

fn server_with(rows: Vec<Measurement>, healthy: bool) -> TestServer {
    let repository = Arc::new(InMemoryMeasurementRepository::new(rows));
    let service = ClimateQueryService::new(repository, ClimateQueryConfig::default());
    let state = AppState::new(
        Arc::new(service),
        Arc::new(StubHealth { healthy }),
        TemplateEngine::new().expect("templates compile"),
        Arc::new(AppConfig::default()),
    );
    let app = create_app(state, &ServerConfig::default());
    TestServer::new(app).expect("Failed to create test server")
}

fn create_test_server() -> TestServer {
    server_with(dataset(), true)
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn health_endpoint_returns_ok() {
    let server = create_test_server();

    let response = server.get("/health").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "ok");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn ready_endpoint_reports_database() {
    let server = create_test_server();

    let response = server.get("/ready").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["ready"], true);
    assert_eq!(body["database"]["healthy"], true);
    assert_eq!(body["database"]["measurement_rows"], 8);
}

#[tokio::test]
async fn ready_endpoint_unavailable_when_database_fails() {
    let server = server_with(dataset(), false);

    let response = server.get("/ready").await;

    response.assert_status_service_unavailable();
    let body: serde_json::Value = response.json();
    assert_eq!(body["ready"], false);
    assert_eq!(body["database"]["healthy"], false);
}

// ============================================================================
// Climate API
// ============================================================================

#[tokio::test]
async fn precipitation_keyed_by_date() {
    let server = create_test_server();

    let response = server.get("/api/precipitation").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let map = body.as_object().expect("object body");
    assert_eq!(map.len(), 6);
    // last row for a date wins
    assert_eq!(body["2016-08-24"], json!(0.08));
    assert_eq!(body["2017-08-23"], json!(0.45));
    assert_eq!(body["2016-08-23"], json!(1.79));
}

#[tokio::test]
async fn stations_listed_once_in_first_seen_order() {
    let server = create_test_server();

    let response = server.get("/api/stations").await;

    response.assert_status_ok();
    response.assert_json(&json!(["USC00519397", "USC00519281"]));
}

#[tokio::test]
async fn tobs_for_most_active_station() {
    let server = create_test_server();

    let response = server.get("/api/tobs").await;

    response.assert_status_ok();
    response.assert_json(&json!({ "USC00519281": [77.0, 79.0, 76.0] }));
}

#[tokio::test]
async fn summary_since_start_date() {
    let server = create_test_server();

    let response = server.get("/api/startdate=2017-08-22").await;

    response.assert_status_ok();
    response.assert_json(&json!({ "min": 76.0, "avg": 78.67, "max": 81.0 }));
}

#[tokio::test]
async fn summary_between_dates_with_and_without_trailing_slash() {
    let server = create_test_server();
    let expected = json!({ "min": 76.0, "avg": 78.4, "max": 81.0 });

    for path in [
        "/api/startdate=2016-08-24/enddate=2017-08-23",
        "/api/startdate=2016-08-24/enddate=2017-08-23/",
        "/api/startdate=2017-08-23/enddate=2016-08-24/",
    ] {
        let response = server.get(path).await;
        response.assert_status_ok();
        response.assert_json(&expected);
    }
}

#[tokio::test]
async fn summary_without_readings_is_null() {
    let server = create_test_server();

    let response = server
        .get("/api/startdate=2017-01-15/enddate=2017-01-15")
        .await;

    response.assert_status_ok();
    response.assert_json(&json!({ "min": null, "avg": null, "max": null }));
}

#[tokio::test]
async fn start_date_out_of_range() {
    let server = create_test_server();

    let response = server.get("/api/startdate=2018-01-01").await;

    response.assert_status_not_found();
    response.assert_json(&json!({
        "error": "start_date_is_out_of_range",
        "first_date": "2016-08-22",
        "last_date": "2017-08-23",
    }));
}

#[tokio::test]
async fn end_date_out_of_range() {
    let server = create_test_server();

    let response = server
        .get("/api/startdate=2016-08-24/enddate=2018-01-01/")
        .await;

    response.assert_status_not_found();
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "end_date_is_out_of_range");
}

#[tokio::test]
async fn malformed_date_is_bad_request() {
    let server = create_test_server();

    for path in ["/api/startdate=2017-13-01", "/api/startdate=+017-08-23"] {
        let response = server.get(path).await;

        response.assert_status_bad_request();
        let body: serde_json::Value = response.json();
        assert_eq!(body["code"], "bad_request");
    }
}

#[tokio::test]
async fn segment_without_prefix_is_not_found() {
    let server = create_test_server();

    server.get("/api/2017-01-01").await.assert_status_not_found();
    server
        .get("/api/startdate=2017-01-01/2017-02-01")
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn empty_dataset() {
    let server = server_with(Vec::new(), true);

    server.get("/api/stations").await.assert_json(&json!([]));
    server.get("/api/precipitation").await.assert_json(&json!({}));
    server.get("/api/tobs").await.assert_status_not_found();
    server
        .get("/api/startdate=2017-01-01")
        .await
        .assert_status_not_found();
}

// ============================================================================
// Pages
// ============================================================================

#[tokio::test]
async fn home_page_lists_routes_and_bounds() {
    let server = create_test_server();

    let response = server.get("/").await;

    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains("Hawaii Climate API"));
    assert!(html.contains(r#"<a href="/api/precipitation">"#));
    assert!(html.contains(r#"<a href="/api/tobs">"#));
    assert!(html.contains("2016-08-22"));
    assert!(html.contains("2017-08-23"));
}

#[tokio::test]
async fn example_form_renders_summary() {
    let server = create_test_server();

    let response = server
        .post("/example")
        .form(&[("sdate", "2016-08-24"), ("edate", "2017-08-23")])
        .await;

    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains("78.4"));
    assert!(html.contains(r#"value="2016-08-24""#));
}

#[tokio::test]
async fn example_form_reports_out_of_range() {
    let server = create_test_server();

    let response = server
        .post("/example")
        .form(&[("sdate", "2010-01-01"), ("edate", "2017-08-23")])
        .await;

    response.assert_status_ok();
    assert!(response.text().contains("start_date_is_out_of_range"));
}

#[tokio::test]
async fn example_form_reports_malformed_date() {
    let server = create_test_server();

    let response = server
        .post("/example")
        .form(&[("sdate", "yesterday"), ("edate", "2017-08-23")])
        .await;

    response.assert_status_ok();
    assert!(response.text().contains("class=\"error\""));
}

// ============================================================================
// Middleware and routing
// ============================================================================

#[tokio::test]
async fn request_id_is_echoed() {
    let server = create_test_server();

    let response = server
        .get("/api/stations")
        .add_header(REQUEST_ID_HEADER, "trace-1")
        .await;

    assert_eq!(response.header(REQUEST_ID_HEADER), "trace-1");
}

#[tokio::test]
async fn request_id_is_generated() {
    let server = create_test_server();

    let response = server.get("/health").await;

    let id = response.header(REQUEST_ID_HEADER);
    assert!(uuid::Uuid::parse_str(id.to_str().expect("ascii header")).is_ok());
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let server = create_test_server();

    let response = server.get("/unknown/path").await;

    response.assert_status_not_found();
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "not_found");
}

#[tokio::test]
async fn wrong_method_is_rejected() {
    let server = create_test_server();

    let response = server.post("/api/stations").await;

    response.assert_status_not_ok();
}
