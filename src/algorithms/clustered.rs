//! Cluster-based neighbor expansion search
//!
//! A small population of clusters is grown every round by spawning a 3×3
//! patch of neighbors around each member. Whenever the population overflows,
//! the two closest clusters are found and the worse of the pair is dropped,
//! which keeps the survivors both good and spread out. The neighbor spacing
//! shrinks geometrically from round to round.
//!
//! Each round expands the clusters present when the round began; clusters
//! added during the round wait for the next one. The two seeds are inserted
//! like any other candidate, so their pair distance is cached as well.

use super::strategy::{SearchOutcome, SearchStrategy};
use crate::core::{normalize_coordinate, Candidate, Coordinate, HALF_PI};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::debug;

/// Neighbor offsets as a fraction of the current range
const NEIGHBOR_OFFSETS: [f64; 3] = [-0.25, 0.0, 0.25];

/// Population-based alternate solver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusteredSearch {
    /// Upper bound on the tracked population
    pub max_clusters: usize,
    /// Range multiplier applied after each round
    pub shrink_factor: f64,
    /// Number of expansion rounds
    pub iterations: usize,
}

impl Default for ClusteredSearch {
    fn default() -> Self {
        Self {
            max_clusters: 6,
            shrink_factor: 0.75,
            iterations: 75,
        }
    }
}

impl ClusteredSearch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a round-by-round run against `error_fn`
    pub fn start<'a>(&'a self, error_fn: &'a dyn Fn(&Coordinate) -> f64) -> ClusteredRun<'a> {
        ClusteredRun::new(self, error_fn)
    }
}

/// A tracked candidate region
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cluster {
    pub id: usize,
    pub candidate: Candidate,
}

/// Cached distance between two live clusters, `a` older than `b`
#[derive(Debug, Clone, Copy, PartialEq)]
struct ClusterPair {
    a: usize,
    b: usize,
    distance: f64,
}

/// Bounded cluster set with its pairwise distance cache
#[derive(Debug, Clone)]
pub struct ClusterPopulation {
    clusters: Vec<Cluster>,
    pairs: Vec<ClusterPair>,
    max_clusters: usize,
    next_id: usize,
}

impl ClusterPopulation {
    pub fn new(max_clusters: usize) -> Self {
        Self {
            clusters: Vec::with_capacity(max_clusters + 1),
            pairs: Vec::new(),
            max_clusters: max_clusters.max(1),
            next_id: 0,
        }
    }

    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    pub fn max_clusters(&self) -> usize {
        self.max_clusters
    }

    /// Lowest-error cluster; the earliest one wins ties
    pub fn best(&self) -> Option<&Cluster> {
        self.clusters.iter().fold(None, |best: Option<&Cluster>, cluster| match best {
            Some(b) if b.candidate.cmp_error(&cluster.candidate) != Ordering::Greater => Some(b),
            _ => Some(cluster),
        })
    }

    /// Add a candidate, evicting one cluster if the bound is exceeded.
    /// Returns the evicted cluster, which may be the one just added.
    pub fn insert(&mut self, candidate: Candidate) -> Option<Cluster> {
        let added = Cluster {
            id: self.next_id,
            candidate,
        };
        self.next_id += 1;

        for cluster in &self.clusters {
            self.pairs.push(ClusterPair {
                a: cluster.id,
                b: added.id,
                distance: cluster.candidate.coordinate.planar_distance(&candidate.coordinate),
            });
        }
        self.clusters.push(added);

        if self.clusters.len() <= self.max_clusters {
            return None;
        }

        let closest = self
            .pairs
            .iter()
            .fold(None, |best: Option<&ClusterPair>, pair| match best {
                Some(b) if b.distance <= pair.distance => Some(b),
                _ => Some(pair),
            })
            .copied()?;

        let a = self.candidate_of(closest.a)?;
        let b = self.candidate_of(closest.b)?;
        let remove = if a.cmp_error(b) == Ordering::Greater {
            closest.a
        } else {
            closest.b
        };

        let index = self.clusters.iter().position(|c| c.id == remove)?;
        let evicted = self.clusters.remove(index);
        self.pairs.retain(|pair| pair.a != remove && pair.b != remove);
        Some(evicted)
    }

    fn candidate_of(&self, id: usize) -> Option<&Candidate> {
        self.clusters.iter().find(|c| c.id == id).map(|c| &c.candidate)
    }
}

/// One in-progress clustered search
pub struct ClusteredRun<'a> {
    config: &'a ClusteredSearch,
    error_fn: &'a dyn Fn(&Coordinate) -> f64,
    population: ClusterPopulation,
    range: f64,
    rounds: usize,
    evaluations: usize,
}

impl<'a> ClusteredRun<'a> {
    /// Seed the population on the equator at 90°W and 90°E
    pub fn new(config: &'a ClusteredSearch, error_fn: &'a dyn Fn(&Coordinate) -> f64) -> Self {
        let mut run = Self {
            config,
            error_fn,
            population: ClusterPopulation::new(config.max_clusters),
            range: HALF_PI,
            rounds: 0,
            evaluations: 0,
        };
        for long in [-HALF_PI, HALF_PI] {
            run.add(Coordinate { lat: 0.0, long });
        }
        run
    }

    fn add(&mut self, coordinate: Coordinate) {
        let candidate = Candidate::new(coordinate, (self.error_fn)(&coordinate));
        self.evaluations += 1;
        self.population.insert(candidate);
    }

    /// Expand every cluster present at the start of the round, then shrink the range
    pub fn iterate(&mut self) {
        let origins: Vec<Coordinate> = self
            .population
            .clusters()
            .iter()
            .map(|c| c.candidate.coordinate)
            .collect();

        for origin in origins {
            for lat_offset in NEIGHBOR_OFFSETS {
                for long_offset in NEIGHBOR_OFFSETS {
                    let neighbor = normalize_coordinate(
                        origin.lat + lat_offset * self.range,
                        origin.long + long_offset * self.range,
                    );
                    self.add(neighbor);
                }
            }
        }

        self.range *= self.config.shrink_factor;
        self.rounds += 1;
    }

    pub fn population(&self) -> &ClusterPopulation {
        &self.population
    }

    pub fn range(&self) -> f64 {
        self.range
    }

    pub fn rounds(&self) -> usize {
        self.rounds
    }

    pub fn evaluations(&self) -> usize {
        self.evaluations
    }

    pub fn outcome(&self) -> SearchOutcome {
        let best = match self.population.best() {
            Some(cluster) => cluster.candidate,
            None => Candidate::new(Coordinate::default(), f64::INFINITY),
        };
        SearchOutcome {
            best,
            evaluations: self.evaluations,
        }
    }
}

impl SearchStrategy for ClusteredSearch {
    fn name(&self) -> &'static str {
        "clustered"
    }

    fn search(&self, error_fn: &dyn Fn(&Coordinate) -> f64) -> SearchOutcome {
        let mut run = self.start(error_fn);
        while run.rounds() < self.iterations {
            run.iterate();
            if let Some(best) = run.population().best() {
                debug!(
                    round = run.rounds(),
                    range = run.range(),
                    clusters = run.population().len(),
                    best_error = best.candidate.error,
                    "clustered search round"
                );
            }
        }

        let outcome = run.outcome();
        debug!(
            lat = outcome.best.coordinate.lat,
            long = outcome.best.coordinate.long,
            error = outcome.best.error,
            evaluations = outcome.evaluations,
            "clustered search finished"
        );
        outcome
    }
}
