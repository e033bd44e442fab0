//! Unit-vector representation of sphere coordinates
//!
//! Coordinates map onto the unit sphere with the equator/prime meridian
//! crossing on the +z axis, +x towards 90°E and +y towards the north pole:
//! - x = sin(long)·cos(lat)
//! - y = sin(lat)
//! - z = cos(long)·cos(lat)

use crate::core::{wrap_longitude, Coordinate};
use nalgebra::{Matrix3, Rotation3, Vector3};

/// Below this xz-plane radius a vector is treated as sitting on a pole
const POLAR_EPSILON: f64 = 1e-15;

/// Unit vector for a coordinate
pub fn coord_to_unit_vector(coord: &Coordinate) -> Vector3<f64> {
    let (sin_lat, cos_lat) = coord.lat.sin_cos();
    let (sin_long, cos_long) = coord.long.sin_cos();
    Vector3::new(sin_long * cos_lat, sin_lat, cos_long * cos_lat)
}

/// Coordinate pointed at by a (not necessarily unit) vector.
///
/// Uses atan2 against the planar and full norms, which is the asin/acos
/// formulation without the divisions. On a pole the longitude is reported
/// as 0; the zero vector maps to (0, 0).
pub fn unit_vector_to_coord(v: &Vector3<f64>) -> Coordinate {
    let planar = (v.x * v.x + v.z * v.z).sqrt();
    if planar < POLAR_EPSILON {
        return match v.y.partial_cmp(&0.0) {
            Some(std::cmp::Ordering::Greater) => Coordinate {
                lat: crate::core::HALF_PI,
                long: 0.0,
            },
            Some(std::cmp::Ordering::Less) => Coordinate {
                lat: -crate::core::HALF_PI,
                long: 0.0,
            },
            _ => Coordinate::default(),
        };
    }

    Coordinate {
        lat: v.y.atan2(planar),
        long: wrap_longitude(v.x.atan2(v.z)),
    }
}

/// Rotation taking the local frame's pole axis (+z) onto a chosen center.
///
/// Points expressed around the local pole (small circles, bearings) are
/// carried into the global frame with [`FrameRotation::to_global`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameRotation {
    rotation: Rotation3<f64>,
}

impl FrameRotation {
    pub fn around(center: &Coordinate) -> Self {
        let (sin_lat, cos_lat) = center.lat.sin_cos();
        let (sin_long, cos_long) = center.long.sin_cos();

        // Columns: local east, local north, center direction
        #[rustfmt::skip]
        let matrix = Matrix3::new(
            cos_long, -sin_lat * sin_long, cos_lat * sin_long,
            0.0, cos_lat, sin_lat,
            -sin_long, -sin_lat * cos_long, cos_lat * cos_long,
        );

        Self {
            rotation: Rotation3::from_matrix_unchecked(matrix),
        }
    }

    pub fn to_global(&self, local: &Vector3<f64>) -> Vector3<f64> {
        self.rotation * local
    }
}
