//! Climate query service
//!
//! Read-only aggregations over the measurement dataset: the precipitation
//! series, the station list, the trailing-year temperatures of the busiest
//! station, and min/avg/max temperature summaries over validated date ranges.

use std::{collections::BTreeMap, fmt, sync::Arc};

use chrono::{NaiveDate, TimeDelta};
use domain::{DatasetBounds, DateBoundary, StationId, TemperatureSummary};
use serde::{Serialize, Serializer, ser::SerializeMap};
use tokio::sync::OnceCell;
use tracing::{debug, info, instrument};

use crate::{
    error::ApplicationError,
    ports::{MeasurementQuery, MeasurementRepository},
};

/// Default length of the trailing temperature window in days
pub const DEFAULT_TRAILING_WINDOW_DAYS: i64 = 365;

/// Configuration for the climate query service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClimateQueryConfig {
    /// Length of the trailing temperature window in days (default: 365)
    pub trailing_window_days: i64,
    /// Compute the dataset bounds once and reuse them (default: false)
    ///
    /// Only safe when the dataset does not change while the service runs.
    pub cache_bounds: bool,
}

impl Default for ClimateQueryConfig {
    fn default() -> Self {
        Self {
            trailing_window_days: DEFAULT_TRAILING_WINDOW_DAYS,
            cache_bounds: false,
        }
    }
}

impl ClimateQueryConfig {
    /// Check the configuration values
    pub fn validate(&self) -> Result<(), ApplicationError> {
        if self.trailing_window_days <= 0 {
            return Err(ApplicationError::Configuration(format!(
                "trailing_window_days must be positive, got {}",
                self.trailing_window_days
            )));
        }
        if TimeDelta::try_days(self.trailing_window_days).is_none() {
            return Err(ApplicationError::Configuration(format!(
                "trailing_window_days is too large: {}",
                self.trailing_window_days
            )));
        }
        Ok(())
    }
}

/// Precipitation readings keyed by observation date
///
/// Serializes as a JSON object with dates in ascending order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PrecipitationSeries(BTreeMap<NaiveDate, Option<f64>>);

impl PrecipitationSeries {
    /// Number of distinct dates
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the series holds no dates
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Reading recorded for `date`; `Some(None)` means the date exists without a value
    #[must_use]
    pub fn get(&self, date: NaiveDate) -> Option<Option<f64>> {
        self.0.get(&date).copied()
    }

    /// Iterate over `(date, precipitation)` in ascending date order
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, Option<f64>)> + '_ {
        self.0.iter().map(|(d, p)| (*d, *p))
    }
}

impl FromIterator<(NaiveDate, Option<f64>)> for PrecipitationSeries {
    /// Later pairs overwrite earlier pairs with the same date
    fn from_iter<I: IntoIterator<Item = (NaiveDate, Option<f64>)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Temperature observations of a single station
///
/// Serializes as a single-entry object `{ "<station>": [t, ...] }`.
#[derive(Debug, Clone, PartialEq)]
pub struct StationTemperatures {
    /// Station the readings belong to
    pub station: StationId,
    /// Readings in storage order
    pub temperatures: Vec<f64>,
}

impl Serialize for StationTemperatures {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.station.as_str(), &self.temperatures)?;
        map.end()
    }
}

/// Service answering the climate API queries
pub struct ClimateQueryService {
    repository: Arc<dyn MeasurementRepository>,
    config: ClimateQueryConfig,
    bounds: OnceCell<DatasetBounds>,
}

impl fmt::Debug for ClimateQueryService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClimateQueryService")
            .field("repository", &"<MeasurementRepository>")
            .field("config", &self.config)
            .field("cached_bounds", &self.bounds.get())
            .finish()
    }
}

impl ClimateQueryService {
    /// Create a new query service over the given repository
    #[must_use]
    pub fn new(repository: Arc<dyn MeasurementRepository>, config: ClimateQueryConfig) -> Self {
        Self {
            repository,
            config,
            bounds: OnceCell::new(),
        }
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &ClimateQueryConfig {
        &self.config
    }

    /// Precipitation of every row keyed by date
    ///
    /// When several rows share a date, the last row in storage order wins.
    #[instrument(skip(self))]
    pub async fn precipitation_series(&self) -> Result<PrecipitationSeries, ApplicationError> {
        let rows = self.repository.scan_all().await?;
        let series: PrecipitationSeries =
            rows.into_iter().map(|m| (m.date, m.precipitation)).collect();
        debug!(dates = series.len(), "Built precipitation series");
        Ok(series)
    }

    /// Distinct station ids in order of first appearance
    #[instrument(skip(self))]
    pub async fn list_stations(&self) -> Result<Vec<StationId>, ApplicationError> {
        let stations = self.repository.distinct_stations().await?;
        debug!(count = stations.len(), "Listed stations");
        Ok(stations)
    }

    /// First and last observation dates of the dataset
    ///
    /// Fails with `DatasetEmpty` when there are no rows. Successful results
    /// are cached when `cache_bounds` is enabled.
    #[instrument(skip(self))]
    pub async fn dataset_bounds(&self) -> Result<DatasetBounds, ApplicationError> {
        if let Some(bounds) = self.bounds.get() {
            return Ok(*bounds);
        }

        let bounds = self
            .repository
            .date_bounds()
            .await?
            .ok_or(ApplicationError::DatasetEmpty)?;

        if self.config.cache_bounds && self.bounds.set(bounds).is_ok() {
            info!(%bounds, "Cached dataset bounds");
        }
        Ok(bounds)
    }

    /// Temperatures of the busiest station within the trailing window
    ///
    /// The station with the most rows is selected (ties go to the station
    /// seen first). The window ends at the last observation date of the whole
    /// dataset and excludes its start date: only rows with
    /// `date > last_date - trailing_window_days` are returned. Rows without a
    /// temperature reading are skipped.
    #[instrument(skip(self))]
    pub async fn most_active_station_trailing_year(
        &self,
    ) -> Result<StationTemperatures, ApplicationError> {
        let top = self
            .repository
            .station_activity()
            .await?
            .into_iter()
            .next()
            .ok_or(ApplicationError::DatasetEmpty)?;

        let bounds = self.dataset_bounds().await?;
        let window_start = self.window_start(bounds.last_date())?;

        let query = MeasurementQuery::new()
            .station(top.station.clone())
            .after(window_start);
        let temperatures: Vec<f64> = self
            .repository
            .filter(&query)
            .await?
            .into_iter()
            .filter_map(|m| m.temperature)
            .collect();

        info!(
            station = %top.station,
            observations = top.observations,
            %window_start,
            readings = temperatures.len(),
            "Collected trailing-window temperatures"
        );

        Ok(StationTemperatures {
            station: top.station,
            temperatures,
        })
    }

    /// Min/avg/max temperature for all dates on or after `start`
    #[instrument(skip(self))]
    pub async fn temperature_since(
        &self,
        start: NaiveDate,
    ) -> Result<TemperatureSummary, ApplicationError> {
        let bounds = self.dataset_bounds().await?;
        ensure_within(&bounds, start, DateBoundary::Start)?;

        let rows = self
            .repository
            .filter(&MeasurementQuery::new().since(start))
            .await?;
        let summary = TemperatureSummary::from_readings(rows.iter().filter_map(|m| m.temperature));

        debug!(rows = rows.len(), "Summarized temperatures since start date");
        Ok(summary)
    }

    /// Min/avg/max temperature for dates in `[start, end]`
    ///
    /// `start` is validated before `end`. Reversed inputs are swapped, so the
    /// result does not depend on argument order.
    #[instrument(skip(self))]
    pub async fn temperature_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<TemperatureSummary, ApplicationError> {
        let bounds = self.dataset_bounds().await?;
        ensure_within(&bounds, start, DateBoundary::Start)?;
        ensure_within(&bounds, end, DateBoundary::End)?;

        let (start, end) = if start > end {
            debug!("Swapping reversed date range");
            (end, start)
        } else {
            (start, end)
        };

        let rows = self
            .repository
            .filter(&MeasurementQuery::new().since(start).until(end))
            .await?;
        let summary = TemperatureSummary::from_readings(rows.iter().filter_map(|m| m.temperature));

        debug!(rows = rows.len(), "Summarized temperatures within range");
        Ok(summary)
    }

    fn window_start(&self, last_date: NaiveDate) -> Result<NaiveDate, ApplicationError> {
        TimeDelta::try_days(self.config.trailing_window_days)
            .and_then(|window| last_date.checked_sub_signed(window))
            .ok_or_else(|| {
                ApplicationError::Configuration(format!(
                    "trailing window of {} days is out of range",
                    self.config.trailing_window_days
                ))
            })
    }
}

fn ensure_within(
    bounds: &DatasetBounds,
    date: NaiveDate,
    boundary: DateBoundary,
) -> Result<(), ApplicationError> {
    if bounds.contains(date) {
        Ok(())
    } else {
        Err(ApplicationError::DateOutOfRange {
            boundary,
            bounds: *bounds,
        })
    }
}
