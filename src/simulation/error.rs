//! Error types for the simulation.

use thiserror::Error;

/// Invalid simulation parameters.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// Playfield must have a positive, finite size.
    #[error("Playfield dimensions must be positive, got {width} x {height}")]
    InvalidPlayfield {
        /// Configured width.
        width: f32,
        /// Configured height.
        height: f32,
    },
    /// Population must hold at least one agent.
    #[error("Population size must be at least 1")]
    EmptyPopulation,
    /// Elite pool must be non-empty and fit inside the population.
    #[error("Elite size must be in 1..={population_size}, got {elite_size}")]
    InvalidEliteSize {
        /// Configured elite size.
        elite_size: usize,
        /// Configured population size.
        population_size: usize,
    },
    /// The track needs two obstacles so a next obstacle always exists.
    #[error("Obstacle count must be at least 2, got {0}")]
    TooFewObstacles(usize),
    /// A probability fell outside [0, 1].
    #[error("{name} must be a probability in [0, 1], got {value}")]
    InvalidProbability {
        /// Parameter name.
        name: &'static str,
        /// Offending value.
        value: f32,
    },
    /// A length-like value was zero, negative or not finite.
    #[error("{name} must be positive and finite, got {value}")]
    NonPositive {
        /// Parameter name.
        name: &'static str,
        /// Offending value.
        value: f32,
    },
    /// A value was NaN or infinite.
    #[error("{name} must be finite, got {value}")]
    NonFinite {
        /// Parameter name.
        name: &'static str,
        /// Offending value.
        value: f32,
    },
}

/// Errors raised by the simulation core.
#[derive(Debug, Error)]
pub enum SimError {
    /// Mismatched dimensions or invalid parameters. Programmer error, not retried.
    #[error("Configuration error: {0}")]
    Configuration(String),
    /// Invalid parameter set.
    #[error(transparent)]
    Params(#[from] ConfigError),
    /// Internal state broke a structural guarantee.
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
    /// Reading a parameter file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// JSON encoding or decoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<ndarray::ShapeError> for SimError {
    fn from(err: ndarray::ShapeError) -> Self {
        SimError::Configuration(err.to_string())
    }
}
