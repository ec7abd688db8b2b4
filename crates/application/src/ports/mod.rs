//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod database_health_port;
mod measurement_repository;

#[cfg(test)]
pub use database_health_port::MockDatabaseHealthPort;
pub use database_health_port::{DatabaseHealth, DatabaseHealthPort};
#[cfg(test)]
pub use measurement_repository::MockMeasurementRepository;
pub use measurement_repository::{MeasurementQuery, MeasurementRepository};
