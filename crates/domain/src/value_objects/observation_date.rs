//! Observation date parsing
//!
//! Dates cross every boundary of the service (HTTP paths, form fields, the
//! `measurement.date` column) as literal `YYYY-MM-DD` text.

use chrono::NaiveDate;

use crate::errors::DomainError;

/// Textual format of observation dates
pub const OBSERVATION_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` date
///
/// The input must be exactly ten characters starting with a four-digit year;
/// unpadded forms such as `2017-8-3` and signed years are rejected.
///
/// # Examples
///
/// ```
/// use domain::value_objects::parse_observation_date;
///
/// let date = parse_observation_date("2017-08-23").expect("valid date");
/// assert_eq!(date.to_string(), "2017-08-23");
///
/// assert!(parse_observation_date("2017-8-23").is_err());
/// assert!(parse_observation_date("2017-02-30").is_err());
/// ```
pub fn parse_observation_date(input: &str) -> Result<NaiveDate, DomainError> {
    let trimmed = input.trim();
    let four_digit_year = trimmed
        .as_bytes()
        .get(..4)
        .is_some_and(|year| year.iter().all(u8::is_ascii_digit));
    if trimmed.len() != 10 || !four_digit_year {
        return Err(DomainError::InvalidDate(input.to_string()));
    }
    NaiveDate::parse_from_str(trimmed, OBSERVATION_DATE_FORMAT)
        .map_err(|_| DomainError::InvalidDate(input.to_string()))
}

/// Format a date as `YYYY-MM-DD`
#[must_use]
pub fn format_observation_date(date: NaiveDate) -> String {
    date.format(OBSERVATION_DATE_FORMAT).to_string()
}
