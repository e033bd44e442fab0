//! Quadrant-corner hill climber
//!
//! Simplest of the strategies: from the current best point try the four
//! diagonal corners of a shrinking box and move to any that improves.
//! It follows a single basin and is kept as a cheap baseline.

use super::strategy::{SearchOutcome, SearchStrategy};
use crate::core::{normalize_coordinate, Candidate, Coordinate, HALF_PI};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::f64::consts::PI;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HillClimbSearch {
    pub iterations: usize,
    /// First box half-size as a fraction of (π/2 latitude, π longitude)
    pub initial_step: f64,
    /// Box multiplier applied after each round
    pub step_decay: f64,
}

impl Default for HillClimbSearch {
    fn default() -> Self {
        Self {
            iterations: 40,
            initial_step: 0.5,
            step_decay: 0.6,
        }
    }
}

impl SearchStrategy for HillClimbSearch {
    fn name(&self) -> &'static str {
        "hill_climb"
    }

    fn search(&self, error_fn: &dyn Fn(&Coordinate) -> f64) -> SearchOutcome {
        let origin = Coordinate::default();
        let mut current = Candidate::new(origin, error_fn(&origin));
        let mut evaluations = 1;
        let mut step = self.initial_step;

        for round in 0..self.iterations {
            let lat_shift = step * HALF_PI;
            let long_shift = step * PI;
            let base = current.coordinate;

            for corner in 0..4u8 {
                let lat_sign = if corner & 1 == 0 { -1.0 } else { 1.0 };
                let long_sign = if corner & 2 == 0 { -1.0 } else { 1.0 };
                let coordinate = normalize_coordinate(
                    base.lat + lat_sign * lat_shift,
                    base.long + long_sign * long_shift,
                );
                let candidate = Candidate::new(coordinate, error_fn(&coordinate));
                evaluations += 1;
                if candidate.cmp_error(&current) == Ordering::Less {
                    current = candidate;
                }
            }

            step *= self.step_decay;
            debug!(round, step, error = current.error, "hill climb round");
        }

        SearchOutcome {
            best: current,
            evaluations,
        }
    }
}
