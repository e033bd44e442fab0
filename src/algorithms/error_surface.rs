//! Squared-residual error surface over a set of circles of position

use super::great_circle::chord_to_angle;
use super::sphere::coord_to_unit_vector;
use crate::core::{Coordinate, Observation};
use nalgebra::Vector3;

/// Observation with its reference point already on the unit sphere
#[derive(Debug, Clone, Copy)]
struct PreparedObservation {
    reference: Vector3<f64>,
    distance: f64,
}

/// Sum of squared angular residuals for a fixed set of observations.
///
/// An empty set yields a surface that is zero everywhere.
#[derive(Debug, Clone, Default)]
pub struct ErrorSurface {
    observations: Vec<PreparedObservation>,
}

impl ErrorSurface {
    pub fn new(observations: &[Observation]) -> Self {
        Self {
            observations: observations
                .iter()
                .map(|obs| PreparedObservation {
                    reference: coord_to_unit_vector(&obs.reference),
                    distance: obs.distance,
                })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Σ (angular_distance(candidate, reference) − observed)²
    pub fn error_at(&self, candidate: &Coordinate) -> f64 {
        let v = coord_to_unit_vector(candidate);
        self.observations
            .iter()
            .map(|obs| {
                let residual = chord_to_angle((obs.reference - v).norm()) - obs.distance;
                residual * residual
            })
            .sum()
    }

    /// Signed residual (computed − observed) for each observation, in input order
    pub fn residuals_at(&self, candidate: &Coordinate) -> Vec<f64> {
        let v = coord_to_unit_vector(candidate);
        self.observations
            .iter()
            .map(|obs| chord_to_angle((obs.reference - v).norm()) - obs.distance)
            .collect()
    }
}

/// Build the error function minimized by the search strategies
pub fn build_error_function(observations: &[Observation]) -> impl Fn(&Coordinate) -> f64 + Send + Sync {
    let surface = ErrorSurface::new(observations);
    move |candidate: &Coordinate| surface.error_at(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::great_circle::angular_distance;
    use crate::core::HALF_PI;

    fn observations_for(target: &Coordinate, references: &[Coordinate]) -> Vec<Observation> {
        references
            .iter()
            .map(|r| Observation::new(*r, angular_distance(target, r)))
            .collect()
    }

    #[test]
    fn test_empty_surface_is_flat_zero() {
        let error_fn = build_error_function(&[]);
        assert_eq!(error_fn(&Coordinate::new(0.3, 0.2)), 0.0);
        assert_eq!(error_fn(&Coordinate::new(-1.5, 3.1)), 0.0);
    }

    #[test]
    fn test_error_vanishes_at_true_position() {
        let target = Coordinate::new(0.4, -0.9);
        let refs = [
            Coordinate::new(0.0, 0.0),
            Coordinate::new(0.9, -1.4),
            Coordinate::new(-0.2, -0.3),
        ];
        let surface = ErrorSurface::new(&observations_for(&target, &refs));
        assert_eq!(surface.len(), 3);
        assert!(surface.error_at(&target) < 1e-24);
        assert!(surface.error_at(&Coordinate::new(0.5, -0.9)) > 1e-4);
    }

    #[test]
    fn test_error_is_sum_of_squared_residuals() {
        let obs = [
            Observation::new(Coordinate::new(0.0, 0.0), 0.5),
            Observation::new(Coordinate::new(0.0, HALF_PI), 1.0),
        ];
        let surface = ErrorSurface::new(&obs);
        let candidate = Coordinate::new(0.0, 0.0);
        let residuals = surface.residuals_at(&candidate);
        assert!((residuals[0] + 0.5).abs() < 1e-12);
        assert!((residuals[1] - (HALF_PI - 1.0)).abs() < 1e-12);

        let expected: f64 = residuals.iter().map(|r| r * r).sum();
        assert!((surface.error_at(&candidate) - expected).abs() < 1e-15);
    }

    #[test]
    fn test_error_function_is_shareable_across_threads() {
        let obs = [Observation::new(Coordinate::new(0.2, 0.2), 0.3)];
        let error_fn = build_error_function(&obs);
        let expected = error_fn(&Coordinate::new(0.1, 0.1));
        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| error_fn(&Coordinate::new(0.1, 0.1))))
                .collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), expected);
            }
        });
    }
}
