//! Observation validation errors

use thiserror::Error;

/// Which part of an observation failed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObservationField {
    Latitude,
    Longitude,
    Distance,
}

impl std::fmt::Display for ObservationField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ObservationField::Latitude => write!(f, "latitude"),
            ObservationField::Longitude => write!(f, "longitude"),
            ObservationField::Distance => write!(f, "distance"),
        }
    }
}

/// Reasons an observation cannot be handed to the solver
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("observation {index}: {field} is not a finite number")]
    NonFinite { index: usize, field: ObservationField },

    #[error("observation {index}: reference latitude {value} rad is outside [-π/2, π/2]")]
    LatitudeOutOfRange { index: usize, value: f64 },

    #[error("observation {index}: negative angular distance {value} rad")]
    NegativeDistance { index: usize, value: f64 },

    #[error("observation {index}: angular distance {value} rad exceeds π")]
    DistanceTooLarge { index: usize, value: f64 },
}

impl ValidationError {
    pub fn index(&self) -> usize {
        match self {
            ValidationError::NonFinite { index, .. }
            | ValidationError::LatitudeOutOfRange { index, .. }
            | ValidationError::NegativeDistance { index, .. }
            | ValidationError::DistanceTooLarge { index, .. } => *index,
        }
    }
}
