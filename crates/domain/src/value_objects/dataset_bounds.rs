//! Dataset bounds value object
//!
//! The first and last observation dates of the whole measurement table.
//! Requested dates are validated against these bounds, both ends inclusive.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Inclusive range of dates covered by the dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DatasetBounds {
    first_date: NaiveDate,
    last_date: NaiveDate,
}

impl DatasetBounds {
    /// Create bounds from the first and last observation dates
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidBounds` if `first_date > last_date`.
    pub fn new(first_date: NaiveDate, last_date: NaiveDate) -> Result<Self, DomainError> {
        if first_date > last_date {
            return Err(DomainError::InvalidBounds {
                first: first_date,
                last: last_date,
            });
        }
        Ok(Self {
            first_date,
            last_date,
        })
    }

    /// Compute bounds as the minimum and maximum of the given dates
    ///
    /// Returns `None` for an empty iterator.
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use domain::value_objects::DatasetBounds;
    ///
    /// let d = |day| NaiveDate::from_ymd_opt(2017, 8, day).unwrap();
    /// let bounds = DatasetBounds::from_dates([d(23), d(1), d(14)]).unwrap();
    /// assert_eq!(bounds.first_date(), d(1));
    /// assert_eq!(bounds.last_date(), d(23));
    ///
    /// assert!(DatasetBounds::from_dates([]).is_none());
    /// ```
    pub fn from_dates(dates: impl IntoIterator<Item = NaiveDate>) -> Option<Self> {
        dates.into_iter().fold(None, |acc, date| match acc {
            None => Some(Self {
                first_date: date,
                last_date: date,
            }),
            Some(bounds) => Some(Self {
                first_date: bounds.first_date.min(date),
                last_date: bounds.last_date.max(date),
            }),
        })
    }

    /// Earliest observation date
    #[must_use]
    pub const fn first_date(&self) -> NaiveDate {
        self.first_date
    }

    /// Latest observation date
    #[must_use]
    pub const fn last_date(&self) -> NaiveDate {
        self.last_date
    }

    /// Check whether a date lies within the bounds (inclusive)
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.first_date && date <= self.last_date
    }
}

impl fmt::Display for DatasetBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.first_date, self.last_date)
    }
}

/// Custom deserialization that enforces `first_date <= last_date`
impl<'de> Deserialize<'de> for DatasetBounds {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            first_date: NaiveDate,
            last_date: NaiveDate,
        }

        let raw = Raw::deserialize(deserializer)?;
        Self::new(raw.first_date, raw.last_date).map_err(serde::de::Error::custom)
    }
}

/// Which end of a requested range a date was supplied for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateBoundary {
    /// Start of the requested range
    Start,
    /// End of the requested range
    End,
}

impl DateBoundary {
    /// Machine-readable error code reported when this boundary is out of range
    #[must_use]
    pub const fn out_of_range_code(self) -> &'static str {
        match self {
            Self::Start => "start_date_is_out_of_range",
            Self::End => "end_date_is_out_of_range",
        }
    }
}

impl fmt::Display for DateBoundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => write!(f, "start"),
            Self::End => write!(f, "end"),
        }
    }
}
