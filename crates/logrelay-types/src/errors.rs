//! Error types for logrelay operations.

use thiserror::Error;

/// The main error type for logrelay operations.
///
/// Destination setup failures are recovered inside the router itself;
/// logging calls never surface these to their callers.
#[derive(Error, Debug)]
pub enum RelayError {
    /// The base log location could not be resolved to an absolute path
    #[error("Path resolution error: {0}")]
    PathResolution(String),

    /// Configuration-related error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for logrelay operations.
pub type Result<T> = std::result::Result<T, RelayError>;
