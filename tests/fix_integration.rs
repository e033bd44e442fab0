use celestial_fix::algorithms::{ClusterPopulation, FrameRotation};
use celestial_fix::core::{normalize_coordinate, Candidate, HALF_PI};
use celestial_fix::{
    angular_distance, build_error_function, circle_around_point, coord_to_unit_vector,
    destination_point, solve_position, solve_position_with, unit_vector_to_coord,
    ClusteredSearch, Coordinate, GridRefinementSearch, HillClimbSearch, Observation,
    PositionSolver, SearchStrategy, SolverConfig, SolverStrategy,
};
use std::f64::consts::PI;

/// Deterministic spread of points over the valid coordinate range
fn sample_coordinates() -> Vec<Coordinate> {
    let mut points = Vec::new();
    for i in 0..13 {
        for j in 0..17 {
            let lat = -HALF_PI + 0.05 + (PI - 0.1) * i as f64 / 12.0;
            let long = -PI + 0.01 + (2.0 * PI - 0.02) * j as f64 / 16.0;
            points.push(Coordinate { lat, long });
        }
    }
    points
}

fn observations_around(target: Coordinate, sights: &[(f64, f64)]) -> Vec<Observation> {
    sights
        .iter()
        .map(|&(distance, bearing)| {
            Observation::new(destination_point(&target, distance, bearing), distance)
        })
        .collect()
}

fn all_strategies() -> Vec<Box<dyn SearchStrategy>> {
    vec![
        Box::new(GridRefinementSearch::default()),
        Box::new(ClusteredSearch::default()),
        Box::new(HillClimbSearch::default()),
    ]
}

#[test]
fn unit_vector_round_trip() {
    for c in sample_coordinates() {
        let back = unit_vector_to_coord(&coord_to_unit_vector(&c));
        assert!((back.lat - c.lat).abs() < 1e-9, "lat mismatch at {:?}", c);
        assert!((back.long - c.long).abs() < 1e-9, "long mismatch at {:?}", c);
    }

    let north = unit_vector_to_coord(&coord_to_unit_vector(&Coordinate { lat: HALF_PI, long: 1.0 }));
    assert!((north.lat - HALF_PI).abs() < 1e-9);
    assert!(north.long.is_finite());
}

#[test]
fn angular_distance_is_a_metric() {
    let points = sample_coordinates();
    for (i, a) in points.iter().enumerate().step_by(7) {
        assert_eq!(angular_distance(a, a), 0.0);
        for b in points.iter().skip(i % 5).step_by(11) {
            let ab = angular_distance(a, b);
            assert!((ab - angular_distance(b, a)).abs() < 1e-12);
            assert!((0.0..=PI + 1e-12).contains(&ab));
            for c in points.iter().step_by(29) {
                assert!(angular_distance(a, c) <= ab + angular_distance(b, c) + 1e-7);
            }
        }
    }
}

#[test]
fn normalization_is_idempotent_and_reflects_over_poles() {
    for c in sample_coordinates() {
        assert_eq!(normalize_coordinate(c.lat, c.long), c);
    }

    let delta = 0.2;
    let reflected = normalize_coordinate(HALF_PI + delta, 0.5);
    assert!((reflected.lat - (HALF_PI - delta)).abs() < 1e-12);
    assert!((reflected.long - (0.5 - PI)).abs() < 1e-12);

    let south = normalize_coordinate(-HALF_PI - delta, -2.5);
    assert!((south.lat - (-HALF_PI + delta)).abs() < 1e-12);
    assert!((south.long - (PI - 2.5)).abs() < 1e-12);
}

#[test]
fn frame_rotation_places_circle_around_center() {
    let center = Coordinate { lat: -0.7, long: 2.9 };
    let rotation = FrameRotation::around(&center);
    let up = rotation.to_global(&nalgebra::Vector3::z());
    assert!((up - coord_to_unit_vector(&center)).norm() < 1e-12);

    for p in circle_around_point(&center, 0.4, 24) {
        assert!((angular_distance(&center, &p) - 0.4).abs() < 1e-9);
    }
}

#[test]
fn three_circle_convergence() {
    let target = Coordinate { lat: PI / 8.0, long: PI / 8.0 };
    let observations: Vec<Observation> = [(0.0, 0.0), (0.0, HALF_PI), (PI / 4.0, PI / 4.0)]
        .iter()
        .map(|&(lat, long)| {
            let reference = Coordinate { lat, long };
            Observation::new(reference, angular_distance(&target, &reference))
        })
        .collect();

    let found = solve_position(&observations);
    assert!(angular_distance(&found, &target) < 0.01);
}

#[test]
fn no_observations_still_yields_a_position() {
    let found = solve_position(&[]);
    assert!(!found.lat.is_nan() && !found.long.is_nan());

    for strategy in all_strategies() {
        let c = solve_position_with(&[], strategy.as_ref());
        assert!(c.lat.is_finite() && c.long.is_finite(), "{}", strategy.name());
    }
}

#[test]
fn every_strategy_fixes_western_hemisphere_sights() {
    let target = Coordinate { lat: 0.61, long: -1.35 };
    let observations = observations_around(target, &[(0.7, 0.4), (0.9, 2.3), (0.62, 4.4)]);
    for strategy in all_strategies() {
        let found = solve_position_with(&observations, strategy.as_ref());
        assert!(
            angular_distance(&found, &target) < 0.01,
            "{} missed: {:?}",
            strategy.name(),
            found
        );
    }
}

#[test]
fn every_strategy_fixes_four_southern_sights() {
    let target = Coordinate { lat: -0.45, long: 2.9 };
    let observations = observations_around(
        target,
        &[(0.8, 0.1), (0.65, 1.9), (1.0, 3.6), (0.75, 5.0)],
    );
    for strategy in all_strategies() {
        let found = solve_position_with(&observations, strategy.as_ref());
        assert!(
            angular_distance(&found, &target) < 0.01,
            "{} missed: {:?}",
            strategy.name(),
            found
        );
    }
}

#[test]
fn clustered_rounds_respect_capacity_and_keep_best() {
    let target = Coordinate { lat: 0.61, long: -1.35 };
    let observations = observations_around(target, &[(0.7, 0.4), (0.9, 2.3), (0.62, 4.4)]);
    let error_fn = build_error_function(&observations);

    let config = ClusteredSearch {
        max_clusters: 4,
        ..ClusteredSearch::default()
    };
    let mut run = config.start(&error_fn);
    let mut best_so_far = f64::INFINITY;
    for _ in 0..30 {
        run.iterate();
        let population = run.population();
        assert!(population.len() <= 4);
        let best = population.best().map(|c| c.candidate.error).unwrap_or(f64::INFINITY);
        assert!(best <= best_so_far);
        best_so_far = best;
    }
}

#[test]
fn cluster_eviction_drops_the_worse_of_the_closest_pair() {
    let mut population = ClusterPopulation::new(3);
    population.insert(Candidate::new(Coordinate { lat: 0.0, long: 0.0 }, 1.0));
    population.insert(Candidate::new(Coordinate { lat: 1.0, long: 1.0 }, 2.0));
    population.insert(Candidate::new(Coordinate { lat: -1.0, long: 2.0 }, 3.0));

    // Lands next to the best cluster but scores worse, so it goes
    let evicted = population
        .insert(Candidate::new(Coordinate { lat: 0.01, long: 0.0 }, 5.0))
        .expect("population was full");
    assert_eq!(evicted.candidate.error, 5.0);
    assert_eq!(population.best().map(|c| c.candidate.error), Some(1.0));

    // Lands next to the best cluster and beats it
    let evicted = population
        .insert(Candidate::new(Coordinate { lat: 0.01, long: 0.0 }, 0.5))
        .expect("population was full");
    assert_eq!(evicted.candidate.error, 1.0);
    assert_eq!(population.len(), 3);
}

#[test]
fn solver_config_selects_strategy() {
    let config = SolverConfig::from_json_str(
        r#"{ "strategy": { "kind": "clustered", "max_clusters": 8 } }"#,
    )
    .unwrap();
    assert!(matches!(
        config.strategy,
        SolverStrategy::Clustered(ClusteredSearch { max_clusters: 8, .. })
    ));

    let target = Coordinate { lat: -0.45, long: 2.9 };
    let observations = observations_around(
        target,
        &[(0.8, 0.1), (0.65, 1.9), (1.0, 3.6), (0.75, 5.0)],
    );
    let fix = PositionSolver::new(config).unwrap().solve(&observations).unwrap();
    assert_eq!(fix.strategy, "clustered");
    assert!(angular_distance(&fix.position, &target) < 0.01);
}
