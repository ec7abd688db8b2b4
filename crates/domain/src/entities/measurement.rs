//! Measurement entity
//!
//! One dated observation from a station. Rows come from an externally owned
//! dataset and are never modified by this service.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::value_objects::StationId;

/// A daily observation of precipitation and temperature at one station
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Station that recorded the observation
    pub station: StationId,
    /// Observation date
    pub date: NaiveDate,
    /// Precipitation, if recorded
    pub precipitation: Option<f64>,
    /// Temperature observation, if recorded
    pub temperature: Option<f64>,
}

impl Measurement {
    /// Create a measurement with no readings
    #[must_use]
    pub const fn new(station: StationId, date: NaiveDate) -> Self {
        Self {
            station,
            date,
            precipitation: None,
            temperature: None,
        }
    }

    /// Set the precipitation reading
    #[must_use]
    pub const fn with_precipitation(mut self, precipitation: f64) -> Self {
        self.precipitation = Some(precipitation);
        self
    }

    /// Set the temperature reading
    #[must_use]
    pub const fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }
}
