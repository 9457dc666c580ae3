//! Common error types for the syllabus expander

use thiserror::Error;

/// Common result type for syllabus expander operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types shared by the pipeline, server and batch tool
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Phrase extraction produced nothing usable
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// A generated record broke one of its construction invariants
    #[error("Invariant violated: {0}")]
    Invariant(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}
