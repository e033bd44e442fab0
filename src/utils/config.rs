use crate::algorithms::SolverStrategy;
use crate::core::DEFAULT_CIRCLE_POINTS;
use crate::utils::logging::LogConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Solver-wide configuration parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Search strategy and its parameters
    pub strategy: SolverStrategy,
    /// Vertices per line-of-position circle
    pub circle_points: usize,
    /// Logging setup used by the binary
    pub logging: LogConfig,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            strategy: SolverStrategy::default(),
            circle_points: DEFAULT_CIRCLE_POINTS,
            logging: LogConfig::default(),
        }
    }
}

/// Configuration loading and validation errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Invalid parameter value
    #[error("invalid parameter '{parameter}' = '{value}': {reason}")]
    InvalidParameter {
        parameter: String,
        value: String,
        reason: String,
    },
    /// Configuration file I/O error
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// JSON deserialization error
    #[error("failed to parse config: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ConfigError {
    fn invalid(parameter: &str, value: impl ToString, reason: &str) -> Self {
        ConfigError::InvalidParameter {
            parameter: parameter.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl SolverConfig {
    /// Default configuration with a different strategy
    pub fn with_strategy(strategy: SolverStrategy) -> Self {
        Self {
            strategy,
            ..Default::default()
        }
    }

    /// Parse and validate configuration from JSON text
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let config: SolverConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path_str = path.as_ref().to_string_lossy().to_string();
        let content = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path_str,
            source,
        })?;
        Self::from_json_str(&content)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every parameter, reporting the first problem found
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.circle_points < 3 {
            return Err(ConfigError::invalid(
                "circle_points",
                self.circle_points,
                "a circle needs at least 3 vertices",
            ));
        }

        match &self.strategy {
            SolverStrategy::GridRefinement(grid) => {
                check_iterations("grid_refinement.iterations", grid.iterations)?;
                if grid.targets_kept == 0 {
                    return Err(ConfigError::invalid(
                        "grid_refinement.targets_kept",
                        grid.targets_kept,
                        "at least one candidate must be kept",
                    ));
                }
                if grid.lat_split == 0 {
                    return Err(ConfigError::invalid(
                        "grid_refinement.lat_split",
                        grid.lat_split,
                        "the sampling grid needs at least one row",
                    ));
                }
                check_factor("grid_refinement.shrink_factor", grid.shrink_factor)?;
            }
            SolverStrategy::Clustered(clustered) => {
                check_iterations("clustered.iterations", clustered.iterations)?;
                if clustered.max_clusters < 2 {
                    return Err(ConfigError::invalid(
                        "clustered.max_clusters",
                        clustered.max_clusters,
                        "both seed clusters must fit",
                    ));
                }
                check_factor("clustered.shrink_factor", clustered.shrink_factor)?;
            }
            SolverStrategy::HillClimb(hill) => {
                check_iterations("hill_climb.iterations", hill.iterations)?;
                check_factor("hill_climb.step_decay", hill.step_decay)?;
                if !(hill.initial_step > 0.0 && hill.initial_step <= 1.0) {
                    return Err(ConfigError::invalid(
                        "hill_climb.initial_step",
                        hill.initial_step,
                        "must lie in (0, 1]",
                    ));
                }
            }
        }

        Ok(())
    }
}

fn check_iterations(parameter: &str, iterations: usize) -> Result<(), ConfigError> {
    if iterations == 0 {
        return Err(ConfigError::invalid(parameter, iterations, "at least one round is required"));
    }
    Ok(())
}

fn check_factor(parameter: &str, factor: f64) -> Result<(), ConfigError> {
    if !(factor > 0.0 && factor < 1.0) {
        return Err(ConfigError::invalid(parameter, factor, "must lie strictly between 0 and 1"));
    }
    Ok(())
}
