//! Application error types

use thiserror::Error;
use apiforge_domain::DomainError;

use crate::ports::{SecretsError, WorkspaceError};

/// Application-level errors.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// A domain validation error occurred.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// The workspace records could not be read.
    #[error("storage error: {0}")]
    Storage(String),

    /// The secret store failed.
    #[error("secret store error: {0}")]
    Secrets(String),

    /// The requested resource was not found.
    #[error("not found: {0}")]
    NotFound(String),
}

impl From<WorkspaceError> for ApplicationError {
    fn from(error: WorkspaceError) -> Self {
        match error {
            WorkspaceError::NotFound(what) => Self::NotFound(what),
            other => Self::Storage(other.to_string()),
        }
    }
}

impl From<SecretsError> for ApplicationError {
    fn from(error: SecretsError) -> Self {
        Self::Secrets(error.to_string())
    }
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
