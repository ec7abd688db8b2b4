//! Value Objects - Immutable, identity-less domain primitives

mod dataset_bounds;
mod observation_date;
mod station_activity;
mod station_id;
mod temperature_summary;

pub use dataset_bounds::{DatasetBounds, DateBoundary};
pub use observation_date::{
    OBSERVATION_DATE_FORMAT, format_observation_date, parse_observation_date,
};
pub use station_activity::{StationActivity, distinct_stations, rank_station_activity};
pub use station_id::StationId;
pub use temperature_summary::{AVERAGE_DECIMAL_PLACES, TemperatureSummary, round_to_places};
