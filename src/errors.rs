//! Shared error types used across submodules.

use thiserror::Error;

use crate::math::Scalar;
use crate::simulation::SimulationError;

/// Raised when a panel parameter is missing, unknown or out of its slider range.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParameterError {
    /// Value lies outside the slider's `[min, max]`.
    #[error("{key} = {value} is outside [{min}, {max}]")]
    OutOfRange {
        /// Parameter key.
        key: &'static str,
        /// Offending value.
        value: Scalar,
        /// Lower bound.
        min: Scalar,
        /// Upper bound.
        max: Scalar,
    },
    /// Value is NaN or infinite.
    #[error("{key} must be finite, got {value}")]
    NotFinite {
        /// Parameter key.
        key: &'static str,
        /// Offending value.
        value: Scalar,
    },
    /// Key does not name a parameter of the panel.
    #[error("unknown parameter '{key}' for {topic}")]
    UnknownKey {
        /// Topic slug.
        topic: String,
        /// Offending key.
        key: String,
    },
    /// A `key=value` override could not be parsed.
    #[error("malformed override '{0}' (expected key=value)")]
    MalformedOverride(String),
}

/// Top-level error type for the crate.
#[derive(Debug, Error)]
pub enum EmLabError {
    /// Wraps parameter validation errors.
    #[error(transparent)]
    Parameter(#[from] ParameterError),
    /// Wraps simulation-related errors.
    #[error(transparent)]
    Simulation(#[from] SimulationError),
    /// Configuration could not be loaded or extracted.
    #[error("configuration error: {0}")]
    Config(String),
    /// Drawing backend failure.
    #[error("render error: {0}")]
    Render(String),
    /// Filesystem failure while writing outputs.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for EmLabError {
    fn from(e: figment::Error) -> Self {
        Self::Config(e.to_string())
    }
}
