// src/error.rs

use thiserror::Error;

/// Rejected configuration. Raised before anything is generated or painted.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse TOML configuration: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// A noodle that could not be finished. Only that noodle is affected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenerationError {
    #[error("containment repair for segment {segment} gave up after {iterations} iterations")]
    RepairTimeout { segment: usize, iterations: usize },

    #[error("segment budget of {segments} exhausted at length {accumulated:.2} of {target:.2}")]
    SegmentBudgetExhausted { segments: usize, accumulated: f64, target: f64 },
}

#[derive(Debug, Error)]
pub enum NoodleError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Generation(#[from] GenerationError),
}
