//! Shared error types for the application.
//!
//! Configuration errors are fatal and propagate to the top level; adapter
//! errors are expected to be converted to empty data at the pipeline
//! boundary so the remaining signals can still produce a ranking.

use thiserror::Error;

/// Main error type for testmap operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration file errors. Always fatal, never partially applied.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Coverage resultset errors
    #[error("Coverage data error: {0}")]
    Coverage(String),

    /// Complexity tool invocation or diagnostic parsing errors
    #[error("Complexity analysis error: {0}")]
    Complexity(String),

    /// Version-control history errors
    #[error("Git history error: {0}")]
    GitHistory(String),

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;
