//! Common API types and data structures

use crate::core::{Coordinate, NAUTICAL_MILES_PER_RADIAN};
use crate::utils::ConfigError;
use crate::validation::ValidationError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// API error types
#[derive(Error, Debug)]
pub enum ApiError {
    /// An observation failed validation
    #[error(transparent)]
    InvalidObservation(#[from] ValidationError),
    /// Invalid or unreadable configuration
    #[error(transparent)]
    Configuration(#[from] ConfigError),
    /// Output serialization failure
    #[error("failed to serialize fix: {0}")]
    Formatting(#[from] serde_json::Error),
}

/// Solved position with fit quality information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fix {
    /// Best-fit position
    pub position: Coordinate,
    /// Sum of squared angular residuals at `position` (rad²)
    pub error: f64,
    /// Computed minus observed distance per observation (radians)
    pub residuals: Vec<f64>,
    /// Number of observations used
    pub observation_count: usize,
    /// Error function evaluations spent by the search
    pub evaluations: usize,
    /// Strategy that produced the fix
    pub strategy: String,
    /// Computation time (microseconds)
    pub computation_time_us: u64,
}

impl Fix {
    /// Residuals converted to nautical miles (one arc minute each)
    pub fn residuals_nm(&self) -> Vec<f64> {
        self.residuals
            .iter()
            .map(|r| r * NAUTICAL_MILES_PER_RADIAN)
            .collect()
    }

    /// Largest absolute residual in nautical miles
    pub fn worst_residual_nm(&self) -> f64 {
        self.residuals
            .iter()
            .fold(0.0_f64, |worst, r| worst.max(r.abs()))
            * NAUTICAL_MILES_PER_RADIAN
    }

    /// With fewer than two circles the position is not constrained
    pub fn is_degenerate(&self) -> bool {
        self.observation_count < 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_fix() -> Fix {
        Fix {
            position: Coordinate::from_degrees(10.0, 20.0),
            error: 0.0,
            residuals: vec![1.0_f64.to_radians() / 60.0, -2.0_f64.to_radians() / 60.0],
            observation_count: 2,
            evaluations: 10,
            strategy: "grid_refinement".to_string(),
            computation_time_us: 0,
        }
    }

    #[test]
    fn test_residuals_in_nautical_miles() {
        let fix = sample_fix();
        let nm = fix.residuals_nm();
        assert!((nm[0] - 1.0).abs() < 1e-9);
        assert!((nm[1] + 2.0).abs() < 1e-9);
        assert!((fix.worst_residual_nm() - 2.0).abs() < 1e-9);
        assert!(!fix.is_degenerate());
    }

    #[test]
    fn test_error_messages_pass_through() {
        let err: ApiError = ValidationError::NegativeDistance { index: 4, value: -1.0 }.into();
        assert!(err.to_string().contains("observation 4"));
    }
}
