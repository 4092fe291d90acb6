// src/error.rs

use thiserror::Error;

/// Result alias used across the engine and the ingestion helpers.
pub type Result<T> = std::result::Result<T, SimulationError>;

/// Everything that can reject a simulation run.
///
/// Engine variants are raised during entry validation, before the first
/// simulated day, so a failed call never leaves partial output behind.
#[derive(Debug, Error)]
pub enum SimulationError {
    /// Sample standard deviation (ddof = 1) needs at least two observations.
    #[error("training series has {len} observation(s); at least 2 are required")]
    InsufficientData { len: usize },

    /// Target service level must lie strictly between 0 and 1.
    #[error("target service level {value} is outside the open interval (0, 1)")]
    InvalidServiceLevel { value: f64 },

    #[error("invalid policy parameters: {0}")]
    InvalidPolicy(String),

    #[error("test series is empty")]
    EmptySeries,

    /// A demand observation that cannot be used (NaN, infinite, unparsable).
    #[error("invalid demand observation at position {index}: {reason}")]
    InvalidDemand { index: usize, reason: String },

    #[error("invalid train/test split: {0}")]
    InvalidSplit(String),

    #[error("distribution error: {0}")]
    Distribution(String),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
