//! Input validation at the API boundary

pub mod data;
pub mod error;

pub use data::{validate_observation, validate_observations};
pub use error::{ObservationField, ValidationError};
