//! Error types.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for the crate.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Trace error: {0}")]
    Trace(#[from] TraceError),
}

/// A raw table entry holds a value outside the state set of its counter.
///
/// This can only come from a maintenance bug inside a predictor and is
/// never returned to callers of `predict`/`train`: tables report it as a
/// warning and treat the entry as not-taken.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("undefined state {value} for {kind} counter")]
pub struct InvalidCounterState {
    /// Name of the counter FSM
    pub kind: &'static str,
    /// The offending raw value
    pub value: u8,
}

/// Errors related to predictor configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{name} must be at most {max} bits (got {bits})")]
    HistoryBits { name: &'static str, bits: usize, max: usize },

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to read configuration file '{0}': {1}")]
    FileRead(PathBuf, #[source] std::io::Error),
}

/// Errors related to reading a text trace
#[derive(Error, Debug)]
pub enum TraceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: missing field '{field}'")]
    MissingField { line: usize, field: &'static str },

    #[error("line {line}: invalid value '{value}' for field '{field}'")]
    InvalidField { line: usize, field: &'static str, value: String },
}

/// Type alias for Result with [`Error`]
pub type Result<T> = std::result::Result<T, Error>;
