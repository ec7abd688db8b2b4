//! Application services - Use case implementations

mod climate_query_service;

pub use climate_query_service::{
    ClimateQueryConfig, ClimateQueryService, DEFAULT_TRAILING_WINDOW_DAYS, PrecipitationSeries,
    StationTemperatures,
};
