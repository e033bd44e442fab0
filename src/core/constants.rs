//! Angular constants and fixed system parameters

use std::f64::consts::PI;

/// Quarter turn (radians)
pub const HALF_PI: f64 = PI / 2.0;

/// Full turn (radians)
pub const TAU: f64 = PI * 2.0;

/// One arc minute of great circle is one nautical mile
pub const NAUTICAL_MILES_PER_RADIAN: f64 = 60.0 * 180.0 / PI;

/// Number of vertices used when tracing a line-of-position circle
pub const DEFAULT_CIRCLE_POINTS: usize = 128;
