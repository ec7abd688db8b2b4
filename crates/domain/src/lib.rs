//! Domain layer for climate-api
//!
//! Contains the measurement model, derived value objects, and domain errors.
//! This layer performs no I/O and defines the ubiquitous language of the
//! station dataset.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
