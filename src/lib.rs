//! Celestial Navigation Position Fix
//!
//! Finds the point on a unit sphere that best agrees with a set of
//! circles of position, each given by a reference point (a star's
//! geographic position) and an angular distance from it.

pub mod core;
pub mod algorithms;
pub mod validation;
pub mod utils;
pub mod api;

// Re-export commonly used types
pub use crate::core::{Candidate, Coordinate, Observation, NAUTICAL_MILES_PER_RADIAN};
pub use algorithms::{
    angular_distance, build_error_function, circle_around_point, coord_to_unit_vector,
    destination_point, unit_vector_to_coord, ClusteredSearch, GridRefinementSearch,
    HillClimbSearch, SearchOutcome, SearchStrategy, SolverStrategy,
};
pub use validation::ValidationError;
pub use utils::{init_logging, ConfigError, LogConfig, SolverConfig};
pub use api::{
    solve_position, solve_position_with, ApiError, ApiResult, AngleStyle, CsvFormatter, Fix,
    JsonFormatter, PositionSolver, TextFormatter,
};
