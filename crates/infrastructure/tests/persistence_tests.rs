//! Integration tests for the persistence layer using SQLite databases
//!
//! These tests run the climate query service against the sqlx repository and
//! check that it agrees with the in-memory repository.

#![allow(clippy::expect_used)]

use std::sync::Arc;

use application::{
    ApplicationError, ClimateQueryConfig, ClimateQueryService,
    ports::{DatabaseHealthPort, MeasurementQuery, MeasurementRepository},
};
use chrono::NaiveDate;
use domain::{DateBoundary, Measurement, StationId, parse_observation_date};
use infrastructure::{
    DatabaseConfig,
    persistence::{
        AsyncDatabase, AsyncDatabaseConfig, InMemoryMeasurementRepository, SqliteDatabaseHealth,
        SqliteMeasurementRepository,
    },
};

// ============================================================================
// Test Helpers
// ============================================================================

fn day(s: &str) -> NaiveDate {
    parse_observation_date(s).expect("valid date")
}

fn dataset() -> Vec<Measurement> {
    let row = |station: &str, date: &str, prcp: Option<f64>, tobs: Option<f64>| Measurement {
        station: StationId::new(station).expect("valid station"),
        date: day(date),
        precipitation: prcp,
        temperature: tobs,
    };
    vec![
        row("USC00519397", "2016-08-22", Some(0.0), Some(80.0)),
        row("USC00519281", "2016-08-23", Some(1.79), Some(77.0)),
        row("USC00519281", "2016-08-24", None, Some(77.0)),
        row("USC00519397", "2016-08-24", Some(0.08), Some(79.0)),
        row("USC00519281", "2017-01-15", Some(0.02), None),
        row("USC00519281", "2017-08-22", Some(0.0), Some(79.0)),
        row("USC00519397", "2017-08-23", Some(0.0), Some(81.0)),
        row("USC00519281", "2017-08-23", Some(0.45), Some(76.0)),
    ]
}

async fn insert_rows(db: &AsyncDatabase, rows: &[Measurement]) {
    for m in rows {
        sqlx::query("INSERT INTO measurement (station, date, prcp, tobs) VALUES ($1, $2, $3, $4)")
            .bind(m.station.as_str())
            .bind(m.date.format("%Y-%m-%d").to_string())
            .bind(m.precipitation)
            .bind(m.temperature)
            .execute(db.pool())
            .await
            .expect("Failed to insert measurement");
    }
}

async fn create_test_db(rows: &[Measurement]) -> AsyncDatabase {
    let db = AsyncDatabase::in_memory()
        .await
        .expect("Failed to create in-memory database");
    db.migrate().await.expect("Failed to run migrations");
    insert_rows(&db, rows).await;
    db
}

fn service(repository: Arc<dyn MeasurementRepository>) -> ClimateQueryService {
    ClimateQueryService::new(repository, ClimateQueryConfig::default())
}

// ============================================================================
// Query Service over SQLite
// ============================================================================

mod query_service_tests {
    use super::*;

    #[tokio::test]
    async fn precipitation_keeps_last_row_per_date() {
        let db = create_test_db(&dataset()).await;
        let service = service(Arc::new(SqliteMeasurementRepository::new(db.pool().clone())));

        let series = service.precipitation_series().await.expect("series");
        assert_eq!(series.len(), 6);
        assert_eq!(series.get(day("2016-08-24")), Some(Some(0.08)));
        assert_eq!(series.get(day("2017-08-23")), Some(Some(0.45)));
    }

    #[tokio::test]
    async fn stations_in_first_seen_order() {
        let db = create_test_db(&dataset()).await;
        let service = service(Arc::new(SqliteMeasurementRepository::new(db.pool().clone())));

        let stations: Vec<String> = service
            .list_stations()
            .await
            .expect("stations")
            .into_iter()
            .map(StationId::into_inner)
            .collect();
        assert_eq!(stations, ["USC00519397", "USC00519281"]);
    }

    #[tokio::test]
    async fn trailing_year_for_busiest_station() {
        let db = create_test_db(&dataset()).await;
        let service = service(Arc::new(SqliteMeasurementRepository::new(db.pool().clone())));

        let result = service
            .most_active_station_trailing_year()
            .await
            .expect("tobs");
        assert_eq!(result.station.as_str(), "USC00519281");
        // 2016-08-23 sits exactly on the window start and is excluded
        assert_eq!(result.temperatures, vec![77.0, 79.0, 76.0]);
    }

    #[tokio::test]
    async fn summary_between_dates() {
        let db = create_test_db(&dataset()).await;
        let service = service(Arc::new(SqliteMeasurementRepository::new(db.pool().clone())));

        let summary = service
            .temperature_between(day("2017-08-23"), day("2016-08-24"))
            .await
            .expect("summary");
        assert_eq!(summary.min, Some(76.0));
        assert_eq!(summary.avg, Some(78.4));
        assert_eq!(summary.max, Some(81.0));
    }

    #[tokio::test]
    async fn summary_since_out_of_range() {
        let db = create_test_db(&dataset()).await;
        let service = service(Arc::new(SqliteMeasurementRepository::new(db.pool().clone())));

        let result = service.temperature_since(day("2017-08-24")).await;
        assert!(matches!(
            result,
            Err(ApplicationError::DateOutOfRange {
                boundary: DateBoundary::Start,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn empty_table_reports_empty_dataset() {
        let db = create_test_db(&[]).await;
        let service = service(Arc::new(SqliteMeasurementRepository::new(db.pool().clone())));

        assert!(matches!(
            service.temperature_since(day("2017-01-01")).await,
            Err(ApplicationError::DatasetEmpty)
        ));
        assert!(service.list_stations().await.expect("stations").is_empty());
    }
}

// ============================================================================
// SQLite and in-memory repositories agree
// ============================================================================

mod repository_parity_tests {
    use super::*;

    #[tokio::test]
    async fn derived_lookups_match() {
        let db = create_test_db(&dataset()).await;
        let sqlite = SqliteMeasurementRepository::new(db.pool().clone());
        let memory = InMemoryMeasurementRepository::new(dataset());

        assert_eq!(
            sqlite.scan_all().await.expect("scan"),
            memory.scan_all().await.expect("scan")
        );
        assert_eq!(
            sqlite.date_bounds().await.expect("bounds"),
            memory.date_bounds().await.expect("bounds")
        );
        assert_eq!(
            sqlite.distinct_stations().await.expect("stations"),
            memory.distinct_stations().await.expect("stations")
        );
        assert_eq!(
            sqlite.station_activity().await.expect("activity"),
            memory.station_activity().await.expect("activity")
        );
    }

    #[tokio::test]
    async fn filters_match() {
        let db = create_test_db(&dataset()).await;
        let sqlite = SqliteMeasurementRepository::new(db.pool().clone());
        let memory = InMemoryMeasurementRepository::new(dataset());

        let queries = [
            MeasurementQuery::new(),
            MeasurementQuery::new().since(day("2016-08-24")),
            MeasurementQuery::new().after(day("2016-08-24")),
            MeasurementQuery::new()
                .since(day("2016-08-23"))
                .until(day("2017-01-15")),
            MeasurementQuery::new()
                .station(StationId::new("USC00519397").expect("valid station"))
                .until(day("2016-08-24")),
        ];

        for query in &queries {
            assert_eq!(
                sqlite.filter(query).await.expect("filter"),
                memory.filter(query).await.expect("filter"),
                "query {query:?}"
            );
        }
    }
}

// ============================================================================
// File databases
// ============================================================================

mod file_database_tests {
    use super::*;

    #[tokio::test]
    async fn read_only_reopen_serves_queries() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("hawaii.sqlite");

        let writable = AsyncDatabase::new(&AsyncDatabaseConfig::file(&path))
            .await
            .expect("create database");
        writable.migrate().await.expect("migrate");
        insert_rows(&writable, &dataset()).await;
        writable.close().await;

        let config = DatabaseConfig {
            path: path.display().to_string(),
            max_connections: 2,
            read_only: true,
            run_migrations: false,
        };
        let db = AsyncDatabase::open(&config).await.expect("open read-only");
        assert!(db.is_read_only());

        let insert = sqlx::query("INSERT INTO measurement (station, date) VALUES ('X', '2020-01-01')")
            .execute(db.pool())
            .await;
        assert!(insert.is_err());

        let service = service(Arc::new(SqliteMeasurementRepository::new(db.pool().clone())));
        let bounds = service.dataset_bounds().await.expect("bounds");
        assert_eq!(bounds.first_date(), day("2016-08-22"));
        assert_eq!(bounds.last_date(), day("2017-08-23"));
    }

    #[tokio::test]
    async fn open_runs_migrations_when_writable() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = DatabaseConfig {
            path: dir.path().join("fresh.sqlite").display().to_string(),
            max_connections: 1,
            read_only: false,
            run_migrations: true,
        };

        let db = AsyncDatabase::open(&config).await.expect("open");
        let health = SqliteDatabaseHealth::new(db.pool().clone())
            .check_health()
            .await
            .expect("health");
        assert_eq!(health.measurement_rows, Some(0));
    }

    #[tokio::test]
    async fn open_missing_read_only_file_fails() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = DatabaseConfig {
            path: dir.path().join("missing.sqlite").display().to_string(),
            ..DatabaseConfig::default()
        };
        assert!(AsyncDatabase::open(&config).await.is_err());
    }
}
