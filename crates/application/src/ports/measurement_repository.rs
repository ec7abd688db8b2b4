//! Measurement repository port
//!
//! Read-only access to the observation dataset. Adapters only have to
//! provide a full scan and a predicate filter; the derived lookups have
//! default implementations over the scan that SQL adapters can replace with
//! native queries.

use async_trait::async_trait;
use chrono::NaiveDate;
use domain::{
    DatasetBounds, Measurement, StationActivity, StationId, distinct_stations,
    rank_station_activity,
};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Filter over measurement rows
///
/// All set conditions must hold for a row to match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MeasurementQuery {
    /// Only rows from this station
    pub station: Option<StationId>,
    /// Only rows with `date >= since`
    pub since: Option<NaiveDate>,
    /// Only rows with `date > after`
    pub after: Option<NaiveDate>,
    /// Only rows with `date <= until`
    pub until: Option<NaiveDate>,
}

impl MeasurementQuery {
    /// Create an unrestricted query
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to one station
    #[must_use]
    pub fn station(mut self, station: StationId) -> Self {
        self.station = Some(station);
        self
    }

    /// Restrict to dates on or after `date`
    #[must_use]
    pub const fn since(mut self, date: NaiveDate) -> Self {
        self.since = Some(date);
        self
    }

    /// Restrict to dates strictly after `date`
    #[must_use]
    pub const fn after(mut self, date: NaiveDate) -> Self {
        self.after = Some(date);
        self
    }

    /// Restrict to dates on or before `date`
    #[must_use]
    pub const fn until(mut self, date: NaiveDate) -> Self {
        self.until = Some(date);
        self
    }

    /// Check whether a measurement satisfies every condition
    #[must_use]
    pub fn matches(&self, measurement: &Measurement) -> bool {
        self.station.as_ref().is_none_or(|s| *s == measurement.station)
            && self.since.is_none_or(|d| measurement.date >= d)
            && self.after.is_none_or(|d| measurement.date > d)
            && self.until.is_none_or(|d| measurement.date <= d)
    }
}

/// Port for reading the measurement dataset
///
/// Results are returned in storage order.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MeasurementRepository: Send + Sync {
    /// Return every measurement row
    async fn scan_all(&self) -> Result<Vec<Measurement>, ApplicationError>;

    /// Return the rows matching `query`
    async fn filter(
        &self,
        query: &MeasurementQuery,
    ) -> Result<Vec<Measurement>, ApplicationError>;

    /// Minimum and maximum observation dates, `None` for an empty dataset
    async fn date_bounds(&self) -> Result<Option<DatasetBounds>, ApplicationError> {
        let rows = self.scan_all().await?;
        Ok(DatasetBounds::from_dates(rows.iter().map(|m| m.date)))
    }

    /// Distinct station ids in order of first appearance
    async fn distinct_stations(&self) -> Result<Vec<StationId>, ApplicationError> {
        let rows = self.scan_all().await?;
        Ok(distinct_stations(&rows))
    }

    /// Observation counts per station, busiest first, ties by first appearance
    async fn station_activity(&self) -> Result<Vec<StationActivity>, ApplicationError> {
        let rows = self.scan_all().await?;
        Ok(rank_station_activity(&rows))
    }
}
