//! In-memory measurement repository
//!
//! Holds a fixed set of rows. Used by tests and local demos that run without
//! a database file.

use application::{
    error::ApplicationError,
    ports::{MeasurementQuery, MeasurementRepository},
};
use async_trait::async_trait;
use domain::Measurement;
use tracing::{debug, instrument};

/// Measurement repository over a fixed, in-memory row set
#[derive(Debug, Clone, Default)]
pub struct InMemoryMeasurementRepository {
    rows: Vec<Measurement>,
}

impl InMemoryMeasurementRepository {
    /// Create a repository holding `rows` in the given storage order
    #[must_use]
    pub const fn new(rows: Vec<Measurement>) -> Self {
        Self { rows }
    }

    /// Number of stored rows
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether no rows are stored
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl FromIterator<Measurement> for InMemoryMeasurementRepository {
    fn from_iter<I: IntoIterator<Item = Measurement>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[async_trait]
impl MeasurementRepository for InMemoryMeasurementRepository {
    async fn scan_all(&self) -> Result<Vec<Measurement>, ApplicationError> {
        Ok(self.rows.clone())
    }

    #[instrument(skip(self))]
    async fn filter(
        &self,
        query: &MeasurementQuery,
    ) -> Result<Vec<Measurement>, ApplicationError> {
        let rows: Vec<Measurement> = self
            .rows
            .iter()
            .filter(|m| query.matches(m))
            .cloned()
            .collect();
        debug!(rows = rows.len(), "Filtered in-memory measurements");
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use domain::{StationId, parse_observation_date};

    use super::*;

    fn row(station: &str, date: &str, tobs: f64) -> Measurement {
        Measurement::new(
            StationId::new(station).unwrap(),
            parse_observation_date(date).unwrap(),
        )
        .with_temperature(tobs)
    }

    #[tokio::test]
    async fn scan_keeps_insertion_order() {
        let repo: InMemoryMeasurementRepository = [
            row("S2", "2017-08-23", 80.0),
            row("S1", "2010-01-01", 65.0),
        ]
        .into_iter()
        .collect();

        let rows = repo.scan_all().await.unwrap();
        assert_eq!(rows[0].station.as_str(), "S2");
        assert_eq!(rows[1].station.as_str(), "S1");
    }

    #[tokio::test]
    async fn filter_applies_query() {
        let repo = InMemoryMeasurementRepository::new(vec![
            row("S1", "2017-08-22", 70.0),
            row("S1", "2017-08-23", 71.0),
        ]);
        let query = MeasurementQuery::new().since(parse_observation_date("2017-08-23").unwrap());
        let rows = repo.filter(&query).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].temperature, Some(71.0));
    }

    #[tokio::test]
    async fn default_is_empty() {
        let repo = InMemoryMeasurementRepository::default();
        assert!(repo.is_empty());
        assert!(repo.date_bounds().await.unwrap().is_none());
    }
}
