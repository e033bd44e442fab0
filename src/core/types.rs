//! Core data types for the position fix solver

use super::constants::{HALF_PI, TAU};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::f64::consts::PI;

/// Position on the unit sphere in radians.
///
/// Latitude lies in [-π/2, π/2] and longitude in (-π, π]. Values built through
/// [`Coordinate::new`] or deserialized are normalized into that range; a struct
/// literal is taken as is and is only in range if its fields are.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "RawCoordinate")]
pub struct Coordinate {
    pub lat: f64,
    pub long: f64,
}

/// Wire form of [`Coordinate`] before normalization
#[derive(Deserialize)]
struct RawCoordinate {
    lat: f64,
    long: f64,
}

impl From<RawCoordinate> for Coordinate {
    fn from(raw: RawCoordinate) -> Self {
        normalize_coordinate(raw.lat, raw.long)
    }
}

impl Coordinate {
    pub fn new(lat: f64, long: f64) -> Self {
        normalize_coordinate(lat, long)
    }

    pub fn from_degrees(lat_deg: f64, long_deg: f64) -> Self {
        Self::new(lat_deg.to_radians(), long_deg.to_radians())
    }

    pub fn lat_degrees(&self) -> f64 {
        self.lat.to_degrees()
    }

    pub fn long_degrees(&self) -> f64 {
        self.long.to_degrees()
    }

    /// True when every component is finite and inside the canonical range
    pub fn is_normalized(&self) -> bool {
        self.lat.is_finite()
            && self.long.is_finite()
            && (-HALF_PI..=HALF_PI).contains(&self.lat)
            && self.long > -PI
            && self.long <= PI
    }

    /// Euclidean distance in (lat, long) space, not along the sphere
    pub fn planar_distance(&self, other: &Coordinate) -> f64 {
        let lat_dif = other.lat - self.lat;
        let long_dif = other.long - self.long;
        (lat_dif * lat_dif + long_dif * long_dif).sqrt()
    }
}

/// Wrap any finite longitude into (-π, π]
pub fn wrap_longitude(long: f64) -> f64 {
    if long > -PI && long <= PI {
        return long;
    }
    let wrapped = (long + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI {
        wrapped + TAU
    } else {
        wrapped
    }
}

/// Bring an arbitrary (lat, long) pair back onto the canonical range.
///
/// Latitudes past a pole are reflected back and the longitude moves to the
/// opposite meridian. Coordinates already in range are returned untouched.
pub fn normalize_coordinate(lat: f64, long: f64) -> Coordinate {
    let mut lat = lat;
    let mut long = long;

    if lat <= -PI || lat > PI {
        lat = (lat + PI).rem_euclid(TAU) - PI;
    }
    if lat > HALF_PI {
        lat = PI - lat;
        long += PI;
    } else if lat < -HALF_PI {
        lat = -PI - lat;
        long += PI;
    }

    Coordinate {
        lat,
        long: wrap_longitude(long),
    }
}

/// A single circle of position: the observer lies `distance` radians from `reference`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Geographic position of the observed body
    pub reference: Coordinate,
    /// Observed angular distance (radians)
    pub distance: f64,
}

impl Observation {
    pub fn new(reference: Coordinate, distance: f64) -> Self {
        Self { reference, distance }
    }

    /// Build from a measured altitude above the horizon; the zenith distance is its complement
    pub fn from_altitude(reference: Coordinate, altitude: f64) -> Self {
        Self::new(reference, HALF_PI - altitude)
    }
}

/// An evaluated point of the error surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub coordinate: Coordinate,
    pub error: f64,
}

impl Candidate {
    /// NaN errors are stored as +∞ so they always lose comparisons
    pub fn new(coordinate: Coordinate, error: f64) -> Self {
        Self {
            coordinate,
            error: sanitize_error(error),
        }
    }

    pub fn cmp_error(&self, other: &Candidate) -> Ordering {
        self.error.total_cmp(&other.error)
    }
}

/// Map NaN to +∞ so selection by error stays total
pub fn sanitize_error(error: f64) -> f64 {
    if error.is_nan() {
        f64::INFINITY
    } else {
        error
    }
}
