//! Error taxonomy for the training pipeline

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MlError {
    /// Malformed or inconsistent input shapes/values, caught before any
    /// expensive work.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Training labels that make a binary fit undefined: values outside
    /// {0,1}, or one class entirely absent.
    #[error("degenerate training labels: {0}")]
    DegenerateTraining(String),

    /// Persisted artifact failed structural validation on load.
    #[error("corrupt artifact: {0}")]
    CorruptArtifact(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MlError>;
