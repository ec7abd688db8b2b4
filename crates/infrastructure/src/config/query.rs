//! Query behaviour configuration.

use application::{ClimateQueryConfig, DEFAULT_TRAILING_WINDOW_DAYS};
use serde::{Deserialize, Serialize};

use super::default_true;

/// Settings for the climate query service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Length of the trailing temperature window in days (default: 365)
    #[serde(default = "default_trailing_window_days")]
    pub trailing_window_days: i64,

    /// Cache the dataset bounds after the first lookup (default: true)
    #[serde(default = "default_true")]
    pub cache_bounds: bool,
}

const fn default_trailing_window_days() -> i64 {
    DEFAULT_TRAILING_WINDOW_DAYS
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            trailing_window_days: default_trailing_window_days(),
            cache_bounds: true,
        }
    }
}

impl From<&QueryConfig> for ClimateQueryConfig {
    fn from(config: &QueryConfig) -> Self {
        Self {
            trailing_window_days: config.trailing_window_days,
            cache_bounds: config.cache_bounds,
        }
    }
}
