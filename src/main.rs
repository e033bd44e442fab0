use celestial_fix::{
    init_logging, ApiError, Coordinate, CsvFormatter, Fix, JsonFormatter, Observation,
    PositionSolver, SolverConfig, TextFormatter,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ObservationsJson {
    observations: Vec<SightJson>,
}

/// One sight, angles in degrees
#[derive(Debug, Deserialize)]
struct SightJson {
    #[serde(default)]
    name: Option<String>,
    lat: f64,
    long: f64,
    #[serde(default)]
    distance: Option<f64>,
    #[serde(default)]
    altitude: Option<f64>,
}

impl SightJson {
    fn to_observation(&self, index: usize) -> Result<Observation, String> {
        let reference = Coordinate {
            lat: self.lat.to_radians(),
            long: self.long.to_radians(),
        };
        let label = self.name.clone().unwrap_or_else(|| format!("#{}", index));
        match (self.distance, self.altitude) {
            (Some(distance), None) => Ok(Observation::new(reference, distance.to_radians())),
            (None, Some(altitude)) => Ok(Observation::from_altitude(reference, altitude.to_radians())),
            (Some(_), Some(_)) => Err(format!("sight {} gives both distance and altitude", label)),
            (None, None) => Err(format!("sight {} needs a distance or an altitude", label)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum OutputMode {
    Text,
    Decimal,
    Json,
    Csv,
}

fn parse_observations(json_data: &str) -> Result<Vec<Observation>, Box<dyn std::error::Error>> {
    let parsed: ObservationsJson = serde_json::from_str(json_data)?;
    let observations = parsed
        .observations
        .iter()
        .enumerate()
        .map(|(i, sight)| sight.to_observation(i))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(observations)
}

fn render(fix: &Fix, mode: OutputMode) -> Result<String, ApiError> {
    let output = match mode {
        OutputMode::Text => TextFormatter::new().format_text(fix),
        OutputMode::Decimal => TextFormatter::decimal().format_text(fix),
        OutputMode::Json => JsonFormatter::pretty().format_json(fix)?,
        OutputMode::Csv => CsvFormatter::new().format_csv(fix),
    };
    Ok(output)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    let program = args.first().map_or("celestial-fix", |s| s.as_str());

    let mut mode = OutputMode::Text;
    let mut paths = Vec::new();
    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "--json" => mode = OutputMode::Json,
            "--csv" => mode = OutputMode::Csv,
            "--decimal" => mode = OutputMode::Decimal,
            _ => paths.push(arg.as_str()),
        }
    }

    if paths.is_empty() || paths.len() > 2 {
        eprintln!(
            "Usage: {} <observations.json> [config.json] [--json|--csv|--decimal]",
            program
        );
        return Err("Invalid arguments".into());
    }

    let config = match paths.get(1) {
        Some(path) => SolverConfig::from_file(path)?,
        None => SolverConfig::default(),
    };
    init_logging(&config.logging);

    let json_data = std::fs::read_to_string(paths[0])?;
    let observations = parse_observations(&json_data)?;

    let solver = PositionSolver::new(config)?;
    match solver.solve(&observations) {
        Ok(fix) => {
            println!("{}", render(&fix, mode)?);
        }
        Err(e) => {
            eprintln!("Error computing fix: {}", e);
            return Err(e.into());
        }
    }

    Ok(())
}
