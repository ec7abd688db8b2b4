//! Database (SQLite) configuration.

use serde::{Deserialize, Serialize};

use super::default_true;

/// SQLite database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file holding the `measurement` table
    #[serde(default = "default_db_path")]
    pub path: String,

    /// Maximum number of concurrent database connections
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Open the database read-only (default: true)
    #[serde(default = "default_true")]
    pub read_only: bool,

    /// Whether to run pending migrations on startup (default: false)
    ///
    /// Requires `read_only = false`.
    #[serde(default)]
    pub run_migrations: bool,
}

fn default_db_path() -> String {
    "Resources/hawaii.sqlite".to_string()
}

const fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            max_connections: default_max_connections(),
            read_only: true,
            run_migrations: false,
        }
    }
}
