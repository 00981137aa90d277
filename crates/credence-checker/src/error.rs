//! Error types for the checker

use thiserror::Error;

/// Errors that abort a fact-check request
///
/// Lookup failures never appear here; they degrade the result instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckerError {
    /// The NLP model failed to load at startup
    #[error("NLP model not available: {0}")]
    ServiceUnavailable(String),
}
