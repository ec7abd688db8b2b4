//! Shared error mapping for sqlx persistence layer

use application::error::ApplicationError;

/// Map a sqlx error to an application-layer error
pub fn map_sqlx_error(e: sqlx::Error) -> ApplicationError {
    match e {
        sqlx::Error::Database(db_err) => {
            ApplicationError::Repository(format!("Database error: {db_err}"))
        },
        sqlx::Error::PoolTimedOut => {
            ApplicationError::Repository("Timed out waiting for a database connection".to_string())
        },
        other => ApplicationError::Repository(format!("Database error: {other}")),
    }
}
