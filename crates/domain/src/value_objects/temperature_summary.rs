//! Temperature summary value object
//!
//! Minimum, mean, and maximum of a set of temperature observations.
//!
//! # Examples
//!
//! ```
//! use domain::value_objects::TemperatureSummary;
//!
//! let summary = TemperatureSummary::from_readings([78.0, 82.0, 81.0]);
//! assert_eq!(summary.min, Some(78.0));
//! assert_eq!(summary.avg, Some(80.33));
//! assert_eq!(summary.max, Some(82.0));
//!
//! let empty = TemperatureSummary::from_readings([]);
//! assert!(empty.is_empty());
//! ```

use serde::{Deserialize, Serialize};

/// Number of decimal places kept in the reported mean
pub const AVERAGE_DECIMAL_PLACES: usize = 2;

/// Min/avg/max over a set of temperature readings
///
/// Every field is `None` when no reading was available.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TemperatureSummary {
    /// Lowest reading
    pub min: Option<f64>,
    /// Arithmetic mean, rounded to two decimal places
    pub avg: Option<f64>,
    /// Highest reading
    pub max: Option<f64>,
}

impl TemperatureSummary {
    /// Summary for an empty set of readings
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            min: None,
            avg: None,
            max: None,
        }
    }

    /// Summarize the given readings
    #[must_use]
    pub fn from_readings(readings: impl IntoIterator<Item = f64>) -> Self {
        let mut count: u32 = 0;
        let mut sum = 0.0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;

        for value in readings {
            count += 1;
            sum += value;
            min = min.min(value);
            max = max.max(value);
        }

        if count == 0 {
            return Self::empty();
        }

        Self {
            min: Some(min),
            avg: Some(round_to_places(sum / f64::from(count), AVERAGE_DECIMAL_PLACES)),
            max: Some(max),
        }
    }

    /// Whether the summary was computed from zero readings
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.min.is_none() && self.avg.is_none() && self.max.is_none()
    }
}

/// Round to the given number of decimal places
///
/// Rounds the exact binary value, so only exactly representable ties such as
/// `80.625` are ties, and those go to the even digit.
#[must_use]
pub fn round_to_places(value: f64, places: usize) -> f64 {
    format!("{value:.places$}").parse().unwrap_or(value)
}
