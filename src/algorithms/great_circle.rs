//! Great-circle distance and circle-of-position geometry

use super::sphere::{coord_to_unit_vector, unit_vector_to_coord, FrameRotation};
use crate::core::{Coordinate, TAU};
use nalgebra::Vector3;

/// Straight-line distance between two points of the unit sphere
pub fn chord_length(a: &Coordinate, b: &Coordinate) -> f64 {
    (coord_to_unit_vector(b) - coord_to_unit_vector(a)).norm()
}

/// Angular distance from a chord length; the half chord is clamped so
/// rounding near antipodal points cannot leave the asin domain.
pub fn chord_to_angle(chord: f64) -> f64 {
    2.0 * (chord / 2.0).clamp(-1.0, 1.0).asin()
}

/// Great-circle angle between two coordinates (radians, in [0, π])
pub fn angular_distance(a: &Coordinate, b: &Coordinate) -> f64 {
    chord_to_angle(chord_length(a, b))
}

/// Point reached by travelling `distance` radians from `center` along `bearing`
/// (radians clockwise from north)
pub fn destination_point(center: &Coordinate, distance: f64, bearing: f64) -> Coordinate {
    let (sin_d, cos_d) = distance.sin_cos();
    let (sin_b, cos_b) = bearing.sin_cos();
    let local = Vector3::new(sin_d * sin_b, sin_d * cos_b, cos_d);
    unit_vector_to_coord(&FrameRotation::around(center).to_global(&local))
}

/// Sample `num_points` evenly spaced points of the small circle lying
/// `angular_radius` away from `center`.
pub fn circle_around_point(center: &Coordinate, angular_radius: f64, num_points: usize) -> Vec<Coordinate> {
    if num_points == 0 {
        return Vec::new();
    }

    let frame = FrameRotation::around(center);
    let (rad, z) = angular_radius.sin_cos();
    let step = TAU / num_points as f64;

    (0..num_points)
        .map(|i| {
            let (sin_a, cos_a) = (step * i as f64).sin_cos();
            let local = Vector3::new(cos_a * rad, sin_a * rad, z);
            unit_vector_to_coord(&frame.to_global(&local))
        })
        .collect()
}
