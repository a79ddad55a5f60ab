//! Error types for the visage workspace

use thiserror::Error;

/// Errors surfaced by the lip-sync engine and its speech boundary.
#[derive(Error, Debug)]
pub enum VisageError {
    // Animation errors
    #[error("avatar sink rejected frame: {0}")]
    Sink(String),

    // Speech boundary errors
    #[error("malformed speech clip: {0}")]
    Clip(String),

    #[error("unsupported audio format: {0}")]
    UnsupportedFormat(String),

    // Driver errors
    #[error("frame driver is not running")]
    DriverStopped,
}

/// Result type for visage operations.
pub type VisageResult<T> = Result<T, VisageError>;
