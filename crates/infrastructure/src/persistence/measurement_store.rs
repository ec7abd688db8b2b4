//! SQLite measurement repository using sqlx
//!
//! Reads the `measurement(station, date, prcp, tobs)` table. Storage order is
//! `rowid` order. Dates are stored as `YYYY-MM-DD` text, so range filters
//! compare strings.

use application::{
    error::ApplicationError,
    ports::{MeasurementQuery, MeasurementRepository},
};
use async_trait::async_trait;
use domain::{
    DatasetBounds, Measurement, StationActivity, StationId, format_observation_date,
    parse_observation_date,
};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::{debug, instrument};

use super::error::map_sqlx_error;

/// Measurement repository backed by a sqlx SQLite pool
#[derive(Debug, Clone)]
pub struct SqliteMeasurementRepository {
    pool: SqlitePool,
}

impl SqliteMeasurementRepository {
    /// Create a repository over an existing pool
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn parse_station(raw: &str) -> Result<StationId, ApplicationError> {
        StationId::new(raw)
            .map_err(|e| ApplicationError::Repository(format!("Malformed station column: {e}")))
    }

    fn parse_date(raw: &str) -> Result<chrono::NaiveDate, ApplicationError> {
        parse_observation_date(raw)
            .map_err(|e| ApplicationError::Repository(format!("Malformed date column: {e}")))
    }
}

/// Row type for measurement queries
#[derive(sqlx::FromRow)]
struct MeasurementRow {
    station: String,
    date: String,
    prcp: Option<f64>,
    tobs: Option<f64>,
}

impl MeasurementRow {
    fn into_measurement(self) -> Result<Measurement, ApplicationError> {
        Ok(Measurement {
            station: SqliteMeasurementRepository::parse_station(&self.station)?,
            date: SqliteMeasurementRepository::parse_date(&self.date)?,
            precipitation: self.prcp,
            temperature: self.tobs,
        })
    }
}

/// Row type for per-station counts
#[derive(sqlx::FromRow)]
struct ActivityRow {
    station: String,
    observations: i64,
}

fn convert_rows(rows: Vec<MeasurementRow>) -> Result<Vec<Measurement>, ApplicationError> {
    rows.into_iter().map(MeasurementRow::into_measurement).collect()
}

#[async_trait]
impl MeasurementRepository for SqliteMeasurementRepository {
    #[instrument(skip(self))]
    async fn scan_all(&self) -> Result<Vec<Measurement>, ApplicationError> {
        let rows: Vec<MeasurementRow> =
            sqlx::query_as("SELECT station, date, prcp, tobs FROM measurement ORDER BY rowid")
                .fetch_all(&self.pool)
                .await
                .map_err(map_sqlx_error)?;

        debug!(rows = rows.len(), "Scanned measurement table");
        convert_rows(rows)
    }

    #[instrument(skip(self))]
    async fn filter(
        &self,
        query: &MeasurementQuery,
    ) -> Result<Vec<Measurement>, ApplicationError> {
        let mut builder: QueryBuilder<'_, Sqlite> =
            QueryBuilder::new("SELECT station, date, prcp, tobs FROM measurement WHERE 1 = 1");

        if let Some(station) = &query.station {
            builder.push(" AND station = ").push_bind(station.as_str().to_owned());
        }
        if let Some(date) = query.since {
            builder
                .push(" AND date >= ")
                .push_bind(format_observation_date(date));
        }
        if let Some(date) = query.after {
            builder
                .push(" AND date > ")
                .push_bind(format_observation_date(date));
        }
        if let Some(date) = query.until {
            builder
                .push(" AND date <= ")
                .push_bind(format_observation_date(date));
        }
        builder.push(" ORDER BY rowid");

        let rows: Vec<MeasurementRow> = builder
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        debug!(rows = rows.len(), "Filtered measurement table");
        convert_rows(rows)
    }

    #[instrument(skip(self))]
    async fn date_bounds(&self) -> Result<Option<DatasetBounds>, ApplicationError> {
        let (first, last): (Option<String>, Option<String>) =
            sqlx::query_as("SELECT MIN(date), MAX(date) FROM measurement")
                .fetch_one(&self.pool)
                .await
                .map_err(map_sqlx_error)?;

        let (Some(first), Some(last)) = (first, last) else {
            debug!("Measurement table is empty");
            return Ok(None);
        };

        let bounds = DatasetBounds::new(Self::parse_date(&first)?, Self::parse_date(&last)?)?;
        debug!(%bounds, "Computed dataset bounds");
        Ok(Some(bounds))
    }

    #[instrument(skip(self))]
    async fn distinct_stations(&self) -> Result<Vec<StationId>, ApplicationError> {
        let stations: Vec<String> = sqlx::query_scalar(
            "SELECT station FROM measurement GROUP BY station ORDER BY MIN(rowid)",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        stations.iter().map(|s| Self::parse_station(s)).collect()
    }

    #[instrument(skip(self))]
    async fn station_activity(&self) -> Result<Vec<StationActivity>, ApplicationError> {
        let rows: Vec<ActivityRow> = sqlx::query_as(
            r"
            SELECT station, COUNT(*) AS observations
            FROM measurement
            GROUP BY station
            ORDER BY observations DESC, MIN(rowid)
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        rows.into_iter()
            .map(|row| {
                Ok(StationActivity::new(
                    Self::parse_station(&row.station)?,
                    u64::try_from(row.observations).unwrap_or_default(),
                ))
            })
            .collect()
    }
}
