//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation or parsing.
///
/// The resolution engine itself never returns these; they surface when
/// records are created or parsed from user input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The provided base URL is not an absolute URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The HTTP method is not supported.
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// An identifier is invalid or empty.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// A parameter location is not one of path, query, header or cookie.
    #[error("unsupported parameter location: {0}")]
    UnsupportedParameterLocation(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
