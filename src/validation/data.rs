//! Sanity checks for observations entering through the API

use super::error::{ObservationField, ValidationError};
use crate::core::{Observation, HALF_PI};
use std::f64::consts::PI;

/// Check one observation, `index` being its position in the input
pub fn validate_observation(index: usize, observation: &Observation) -> Result<(), ValidationError> {
    let reference = &observation.reference;

    if !reference.lat.is_finite() {
        return Err(ValidationError::NonFinite { index, field: ObservationField::Latitude });
    }
    if !reference.long.is_finite() {
        return Err(ValidationError::NonFinite { index, field: ObservationField::Longitude });
    }
    if !observation.distance.is_finite() {
        return Err(ValidationError::NonFinite { index, field: ObservationField::Distance });
    }
    if reference.lat.abs() > HALF_PI {
        return Err(ValidationError::LatitudeOutOfRange { index, value: reference.lat });
    }
    if observation.distance < 0.0 {
        return Err(ValidationError::NegativeDistance { index, value: observation.distance });
    }
    if observation.distance > PI {
        return Err(ValidationError::DistanceTooLarge { index, value: observation.distance });
    }

    Ok(())
}

/// Check a full observation set, stopping at the first problem
pub fn validate_observations(observations: &[Observation]) -> Result<(), ValidationError> {
    observations
        .iter()
        .enumerate()
        .try_for_each(|(index, obs)| validate_observation(index, obs))
}
