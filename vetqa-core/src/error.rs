//! Error types for the `vetqa-core` crate.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while initializing or querying the match engine.
#[derive(Debug, Error)]
pub enum MatchError {
    /// The corpus source file does not exist.
    #[error("dataset not found at {0}")]
    DatasetNotFound(PathBuf),

    /// The corpus source file exists but could not be parsed into valid records.
    #[error("dataset is malformed: {0}")]
    DatasetMalformed(String),

    /// The embedding model could not be loaded.
    #[error("embedding model unavailable: {0}")]
    ModelUnavailable(String),

    /// An encode call failed while building the index or serving a query.
    #[error("encoding failed: {0}")]
    EncodingError(String),

    /// The query text was empty after trimming whitespace.
    #[error("query is empty")]
    EmptyQuery,

    /// The engine has not finished (or has failed) loading the corpus and index.
    #[error("engine is not ready")]
    NotReady,

    /// A configuration validation error.
    #[error("configuration error: {0}")]
    ConfigError(String),
}

impl MatchError {
    /// True when the error is the caller's fault rather than a server-side
    /// failure. The HTTP layer maps caller errors to 400-class responses and
    /// everything else to 500-class responses.
    pub fn is_caller_error(&self) -> bool {
        matches!(self, MatchError::EmptyQuery)
    }
}

/// A convenience result type for match engine operations.
pub type Result<T> = std::result::Result<T, MatchError>;
