//! Station activity ranking
//!
//! How many observations each station contributed to the dataset.

use serde::{Deserialize, Serialize};

use crate::{entities::Measurement, value_objects::StationId};

/// Observation count for one station
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationActivity {
    /// Station identifier
    pub station: StationId,
    /// Number of measurement rows recorded by the station
    pub observations: u64,
}

impl StationActivity {
    /// Create an activity entry
    #[must_use]
    pub const fn new(station: StationId, observations: u64) -> Self {
        Self {
            station,
            observations,
        }
    }
}

/// Distinct station ids in order of first appearance
pub fn distinct_stations<'a>(
    measurements: impl IntoIterator<Item = &'a Measurement>,
) -> Vec<StationId> {
    let mut seen: Vec<StationId> = Vec::new();
    for m in measurements {
        if !seen.contains(&m.station) {
            seen.push(m.station.clone());
        }
    }
    seen
}

/// Rank stations by observation count, busiest first
///
/// Stations with equal counts keep their order of first appearance, so the
/// ranking is deterministic for a given row order.
pub fn rank_station_activity<'a>(
    measurements: impl IntoIterator<Item = &'a Measurement>,
) -> Vec<StationActivity> {
    let mut ranking: Vec<StationActivity> = Vec::new();
    for m in measurements {
        match ranking.iter_mut().find(|a| a.station == m.station) {
            Some(activity) => activity.observations += 1,
            None => ranking.push(StationActivity::new(m.station.clone(), 1)),
        }
    }
    // stable sort
    ranking.sort_by(|a, b| b.observations.cmp(&a.observations));
    ranking
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn row(station: &str, day: u32) -> Measurement {
        Measurement::new(
            StationId::new(station).unwrap(),
            NaiveDate::from_ymd_opt(2017, 8, day).unwrap(),
        )
    }

    #[test]
    fn distinct_keeps_first_seen_order() {
        let rows = [row("S2", 1), row("S1", 1), row("S2", 2), row("S3", 2)];
        let ids: Vec<String> = distinct_stations(&rows)
            .into_iter()
            .map(StationId::into_inner)
            .collect();
        assert_eq!(ids, ["S2", "S1", "S3"]);
    }

    #[test]
    fn distinct_of_empty_is_empty() {
        assert!(distinct_stations(&[]).is_empty());
    }

    #[test]
    fn ranking_orders_by_count() {
        let rows = [row("S1", 1), row("S2", 1), row("S2", 2), row("S2", 3), row("S1", 2)];
        let ranking = rank_station_activity(&rows);
        assert_eq!(ranking.len(), 2);
        assert_eq!(ranking[0].station.as_str(), "S2");
        assert_eq!(ranking[0].observations, 3);
        assert_eq!(ranking[1].station.as_str(), "S1");
        assert_eq!(ranking[1].observations, 2);
    }

    #[test]
    fn ranking_ties_keep_first_appearance() {
        let rows = [row("S3", 1), row("S1", 1), row("S1", 2), row("S3", 2)];
        let ranking = rank_station_activity(&rows);
        assert_eq!(ranking[0].station.as_str(), "S3");
        assert_eq!(ranking[1].station.as_str(), "S1");
    }

    #[test]
    fn counts_sum_to_row_count() {
        let rows = [row("S1", 1), row("S2", 1), row("S3", 1), row("S1", 2)];
        let total: u64 = rank_station_activity(&rows)
            .iter()
            .map(|a| a.observations)
            .sum();
        assert_eq!(total, 4);
    }
}
