//! Pluggable search strategies over an error surface

use super::clustered::ClusteredSearch;
use super::grid_refinement::GridRefinementSearch;
use super::hill_climb::HillClimbSearch;
use crate::core::{Candidate, Coordinate};
use serde::{Deserialize, Serialize};

/// Result of one search: the lowest-error point found and the work spent on it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchOutcome {
    pub best: Candidate,
    /// Number of error function evaluations
    pub evaluations: usize,
}

/// A derivative-free minimizer for scalar functions on the sphere
pub trait SearchStrategy {
    /// Short identifier used in logs and reports
    fn name(&self) -> &'static str;

    fn search(&self, error_fn: &dyn Fn(&Coordinate) -> f64) -> SearchOutcome;

    fn minimize(&self, error_fn: &dyn Fn(&Coordinate) -> f64) -> Coordinate {
        self.search(error_fn).best.coordinate
    }
}

/// Strategy selected by configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SolverStrategy {
    GridRefinement(GridRefinementSearch),
    Clustered(ClusteredSearch),
    HillClimb(HillClimbSearch),
}

impl Default for SolverStrategy {
    fn default() -> Self {
        SolverStrategy::GridRefinement(GridRefinementSearch::default())
    }
}

impl SolverStrategy {
    fn inner(&self) -> &dyn SearchStrategy {
        match self {
            SolverStrategy::GridRefinement(search) => search,
            SolverStrategy::Clustered(search) => search,
            SolverStrategy::HillClimb(search) => search,
        }
    }
}

impl SearchStrategy for SolverStrategy {
    fn name(&self) -> &'static str {
        self.inner().name()
    }

    fn search(&self, error_fn: &dyn Fn(&Coordinate) -> f64) -> SearchOutcome {
        self.inner().search(error_fn)
    }
}
