//! Apiforge Application - Use cases and ports
//!
//! This crate defines the application layer with:
//! - Port traits (interfaces for workspace records, secrets and files)
//! - Use case orchestration
//! - Application-level error handling

pub mod error;
pub mod ports;
pub mod use_cases;

pub use error::{ApplicationError, ApplicationResult};
pub use ports::{
    FileSystem, FileSystemError, SecretsError, SecretsRepository, WorkspaceError,
    WorkspaceRepository,
};
pub use use_cases::{
    PrepareRequest, PreparedRequest, ResolveEnvironment, ResolveEnvironmentError, ResolvedTarget,
};
