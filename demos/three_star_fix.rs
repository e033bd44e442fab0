//! Synthetic three-star fix solved with every search strategy.
//!
//! Run with `cargo run --example three_star_fix`.

use celestial_fix::{
    angular_distance, destination_point, init_logging, ClusteredSearch, Coordinate,
    GridRefinementSearch, HillClimbSearch, LogConfig, Observation, PositionSolver, SearchStrategy,
    SolverConfig, SolverStrategy, TextFormatter, NAUTICAL_MILES_PER_RADIAN,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(&LogConfig::quiet());

    let truth = Coordinate::from_degrees(34.95, -77.35);
    // (distance, bearing from the observer) in degrees
    let sights: [(f64, f64); 3] = [(40.1, 22.9), (51.6, 131.8), (35.5, 252.1)];
    let observations: Vec<Observation> = sights
        .iter()
        .map(|&(distance, bearing)| {
            let distance = distance.to_radians();
            Observation::new(
                destination_point(&truth, distance, bearing.to_radians()),
                distance,
            )
        })
        .collect();

    println!("True position: {:.4}°, {:.4}°\n", truth.lat_degrees(), truth.long_degrees());

    let strategies = [
        SolverStrategy::GridRefinement(GridRefinementSearch::default()),
        SolverStrategy::Clustered(ClusteredSearch::default()),
        SolverStrategy::HillClimb(HillClimbSearch::default()),
    ];

    let formatter = TextFormatter {
        compact: true,
        ..TextFormatter::new()
    };
    for strategy in strategies {
        let solver = PositionSolver::new(SolverConfig::with_strategy(strategy))?;
        let fix = solver.solve(&observations)?;
        let miss_nm = angular_distance(&fix.position, &truth) * NAUTICAL_MILES_PER_RADIAN;
        println!(
            "{:<16} {} | miss {:.3} nm",
            solver.config().strategy.name(),
            formatter.format_text(&fix),
            miss_nm
        );
    }

    Ok(())
}
