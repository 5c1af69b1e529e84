//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the application core and external systems.
//! Each port is a trait that can be implemented by adapters in the infrastructure layer.

mod file_system;
mod secrets_repository;
mod workspace_repository;

pub use file_system::{FileSystem, FileSystemError};
pub use secrets_repository::{SecretsError, SecretsRepository};
pub use workspace_repository::{WorkspaceError, WorkspaceRepository};
