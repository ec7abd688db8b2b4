//! Station identifier value object
//!
//! Stations carry no attributes beyond their identifier, which is an opaque
//! string such as `USC00519281`.
//!
//! # Examples
//!
//! ```
//! use domain::value_objects::StationId;
//!
//! let id = StationId::new("USC00519281").expect("valid station id");
//! assert_eq!(id.as_str(), "USC00519281");
//!
//! assert!(StationId::new("   ").is_err());
//! ```

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Opaque identifier of an observation station
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct StationId(String);

impl StationId {
    /// Create a station id, kept exactly as given
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStationId` if the id is empty or blank.
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(DomainError::InvalidStationId(id));
        }
        Ok(Self(id))
    }

    /// Get the identifier as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the value object and return the inner string
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for StationId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for StationId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl AsRef<str> for StationId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Custom deserialization that rejects blank identifiers
impl<'de> Deserialize<'de> for StationId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::new(value).map_err(serde::de::Error::custom)
    }
}
