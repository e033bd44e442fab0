//! Multi-resolution grid refinement search
//!
//! The sphere is flattened into a 2×1 rectangle: x ∈ [0, 2) spans longitude
//! and y ∈ [0, 1] spans latitude, with
//! - lat = y·π − π/2
//! - long = x·π − π
//!
//! A coarse grid over the whole rectangle seeds a list of the K best points.
//! Every following round shrinks the sampling window and resamples a grid of
//! the same shape around each of those K points, so several basins are
//! refined side by side until the window is tiny.

use super::strategy::{SearchOutcome, SearchStrategy};
use crate::core::{wrap_longitude, Candidate, Coordinate, HALF_PI};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::f64::consts::PI;
use tracing::debug;

/// Quantization used for memo keys (2^48 steps per unit)
const KEY_SCALE: f64 = (1u64 << 48) as f64;

/// Deterministic coarse-to-fine grid search tracking several candidates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridRefinementSearch {
    /// Number of sampling rounds, the initial full-surface pass included
    pub iterations: usize,
    /// Size of the best-candidate list refined each round
    pub targets_kept: usize,
    /// Grid rows per window; columns are twice this
    pub lat_split: usize,
    /// Window side multiplier applied between rounds
    pub shrink_factor: f64,
}

impl Default for GridRefinementSearch {
    fn default() -> Self {
        Self {
            iterations: 16,
            targets_kept: 4,
            lat_split: 4,
            shrink_factor: 0.5,
        }
    }
}

impl GridRefinementSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn long_split(&self) -> usize {
        self.lat_split * 2
    }
}

/// Point of the flattened 2×1 parameter rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridPoint {
    pub x: f64,
    pub y: f64,
}

impl GridPoint {
    /// Fold an arbitrary (x, y) back into the rectangle.
    ///
    /// Leaving through the top or bottom edge crosses a pole, which lands on
    /// the opposite meridian (x + 1).
    pub fn new(x: f64, y: f64) -> Self {
        let mut x = x;
        let mut y = y.rem_euclid(2.0);
        if y > 1.0 {
            y = 2.0 - y;
            x += 1.0;
        }
        let mut x = x.rem_euclid(2.0);
        if x >= 2.0 {
            x = 0.0;
        }
        Self { x, y }
    }

    pub fn to_coordinate(&self) -> Coordinate {
        Coordinate {
            lat: self.y * PI - HALF_PI,
            long: wrap_longitude(self.x * PI - PI),
        }
    }

    /// Memo key; every x on a pole names the same point
    pub fn key(&self) -> (i64, i64) {
        let y = (self.y * KEY_SCALE).round() as i64;
        let at_pole = self.y <= 0.0 || self.y >= 1.0;
        let x = if at_pole { 0 } else { (self.x * KEY_SCALE).round() as i64 };
        (x, y)
    }
}

#[derive(Debug, Clone, Copy)]
struct GridTarget {
    point: GridPoint,
    candidate: Candidate,
}

/// Working state of one search call
struct GridSearchState<'a> {
    error_fn: &'a dyn Fn(&Coordinate) -> f64,
    targets: Vec<GridTarget>,
    targets_kept: usize,
    visited: HashSet<(i64, i64)>,
    evaluations: usize,
}

impl<'a> GridSearchState<'a> {
    fn new(error_fn: &'a dyn Fn(&Coordinate) -> f64, targets_kept: usize) -> Self {
        Self {
            error_fn,
            targets: Vec::with_capacity(targets_kept + 1),
            targets_kept,
            visited: HashSet::new(),
            evaluations: 0,
        }
    }

    fn process_point(&mut self, x: f64, y: f64) {
        let point = GridPoint::new(x, y);
        if !self.visited.insert(point.key()) {
            return;
        }

        let coordinate = point.to_coordinate();
        let candidate = Candidate::new(coordinate, (self.error_fn)(&coordinate));
        self.evaluations += 1;

        // New points go ahead of equal-error ones already kept
        let index = self
            .targets
            .partition_point(|t| t.candidate.cmp_error(&candidate) == Ordering::Less);
        if index < self.targets_kept {
            self.targets.insert(index, GridTarget { point, candidate });
            self.targets.truncate(self.targets_kept);
        }
    }

    fn process_area(&mut self, center: GridPoint, side_x: f64, side_y: f64, lat_split: usize, long_split: usize) {
        let step_x = side_x / long_split as f64;
        let step_y = side_y / lat_split as f64;
        let base_x = center.x + (step_x - side_x) * 0.5;
        let base_y = center.y + (step_y - side_y) * 0.5;

        for i in 0..lat_split {
            let y = base_y + i as f64 * step_y;
            for j in 0..long_split {
                self.process_point(base_x + j as f64 * step_x, y);
            }
        }
    }
}

impl SearchStrategy for GridRefinementSearch {
    fn name(&self) -> &'static str {
        "grid_refinement"
    }

    fn search(&self, error_fn: &dyn Fn(&Coordinate) -> f64) -> SearchOutcome {
        let lat_split = self.lat_split;
        let long_split = self.long_split();
        let mut state = GridSearchState::new(error_fn, self.targets_kept);

        let mut side_x = 2.0;
        let mut side_y = 1.0;
        state.process_area(GridPoint { x: 1.0, y: 0.5 }, side_x, side_y, lat_split, long_split);

        for round in 1..self.iterations {
            side_x *= self.shrink_factor;
            side_y *= self.shrink_factor;

            let centers: Vec<GridPoint> = state.targets.iter().map(|t| t.point).collect();
            for center in centers {
                state.process_area(center, side_x, side_y, lat_split, long_split);
            }

            if let Some(lead) = state.targets.first() {
                debug!(
                    round,
                    side_y,
                    best_error = lead.candidate.error,
                    evaluations = state.evaluations,
                    "grid refinement round"
                );
            }
        }

        let best = match state.targets.first() {
            Some(target) => target.candidate,
            None => {
                let origin = Coordinate::default();
                Candidate::new(origin, error_fn(&origin))
            }
        };

        debug!(
            lat = best.coordinate.lat,
            long = best.coordinate.long,
            error = best.error,
            evaluations = state.evaluations,
            "grid refinement finished"
        );

        SearchOutcome {
            best,
            evaluations: state.evaluations,
        }
    }
}
