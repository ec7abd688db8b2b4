//! Domain entities - Rows of the observation dataset

mod measurement;

pub use measurement::Measurement;
