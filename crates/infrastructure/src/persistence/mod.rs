//! Persistence module
//!
//! Read access to the climate dataset through sqlx, plus an in-memory
//! repository for tests.

pub mod async_connection;
pub mod database_health;
pub mod error;
pub mod in_memory;
pub mod measurement_store;

pub use async_connection::{AsyncDatabase, AsyncDatabaseConfig, AsyncDatabaseError};
pub use database_health::SqliteDatabaseHealth;
pub use in_memory::InMemoryMeasurementRepository;
pub use measurement_store::SqliteMeasurementRepository;
