//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation or processing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The provided URL is invalid or malformed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// A payload could not be turned into a JSON object.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    /// A response body could not be decoded as requested.
    #[error("cannot decode body: {0}")]
    BodyDecode(String),

    /// The assertion mode name is not recognised.
    #[error("unknown assertion mode: {0}")]
    UnknownMode(String),

    /// A regular expression used by an assertion failed to compile.
    #[error("invalid pattern '{pattern}': {message}")]
    InvalidPattern {
        /// The offending pattern.
        pattern: String,
        /// Compiler message.
        message: String,
    },
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
