//! Position fixing entry points

use super::types::{ApiResult, Fix};
use crate::algorithms::{
    build_error_function, circle_around_point, ErrorSurface, GridRefinementSearch, SearchStrategy,
};
use crate::core::{Coordinate, Observation};
use crate::utils::SolverConfig;
use crate::validation::validate_observations;
use std::time::Instant;
use tracing::{info, warn};

/// Best-fit position for a set of observations using the default grid refinement search.
///
/// No validation is performed. An empty set still yields a finite coordinate,
/// it just carries no positional information.
pub fn solve_position(observations: &[Observation]) -> Coordinate {
    solve_position_with(observations, &GridRefinementSearch::default())
}

/// Best-fit position using any search strategy
pub fn solve_position_with(observations: &[Observation], strategy: &dyn SearchStrategy) -> Coordinate {
    let error_fn = build_error_function(observations);
    strategy.minimize(&error_fn)
}

/// Configured solver with validation and fit reporting
#[derive(Debug, Clone, Default)]
pub struct PositionSolver {
    config: SolverConfig,
}

impl PositionSolver {
    pub fn new(config: SolverConfig) -> ApiResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Validate the observations and compute the fix
    pub fn solve(&self, observations: &[Observation]) -> ApiResult<Fix> {
        validate_observations(observations)?;

        let surface = ErrorSurface::new(observations);
        if surface.len() < 2 {
            warn!(
                observations = surface.len(),
                "fewer than two circles of position; the fix is not constrained"
            );
        }

        let strategy = &self.config.strategy;
        let started = Instant::now();
        let outcome = strategy.search(&|c: &Coordinate| surface.error_at(c));
        let computation_time_us = started.elapsed().as_micros() as u64;

        let position = outcome.best.coordinate;
        info!(
            strategy = strategy.name(),
            lat_deg = position.lat_degrees(),
            long_deg = position.long_degrees(),
            error = outcome.best.error,
            evaluations = outcome.evaluations,
            computation_time_us,
            "position fix computed"
        );

        Ok(Fix {
            position,
            error: outcome.best.error,
            residuals: surface.residuals_at(&position),
            observation_count: surface.len(),
            evaluations: outcome.evaluations,
            strategy: strategy.name().to_string(),
            computation_time_us,
        })
    }

    /// Polyline of each observation's circle of position, for plotting
    pub fn lines_of_position(&self, observations: &[Observation]) -> Vec<Vec<Coordinate>> {
        observations
            .iter()
            .map(|obs| circle_around_point(&obs.reference, obs.distance, self.config.circle_points))
            .collect()
    }
}
