//! Error types for filemeta

use thiserror::Error;

/// Result type alias for filemeta operations
pub type Result<T> = std::result::Result<T, FilemetaError>;

/// Main error type for filemeta
#[derive(Error, Debug)]
pub enum FilemetaError {
    #[error("Unknown sample type: {0}")]
    UnknownSampleType(String),
}
