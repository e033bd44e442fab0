//! Spherical geometry and position search algorithms

pub mod sphere;
pub mod great_circle;
pub mod error_surface;
pub mod strategy;
pub mod grid_refinement;
pub mod clustered;
pub mod hill_climb;

pub use sphere::{coord_to_unit_vector, unit_vector_to_coord, FrameRotation};
pub use great_circle::{angular_distance, chord_length, circle_around_point, destination_point};
pub use error_surface::{build_error_function, ErrorSurface};
pub use strategy::{SearchOutcome, SearchStrategy, SolverStrategy};
pub use grid_refinement::{GridPoint, GridRefinementSearch};
pub use clustered::{Cluster, ClusterPopulation, ClusteredRun, ClusteredSearch};
pub use hill_climb::HillClimbSearch;
