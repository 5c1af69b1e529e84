//! Workspace repository port
//!
//! Defines the interface for reading schema, group and environment records.

use async_trait::async_trait;
use std::path::Path;

use apiforge_domain::{EnvironmentConfig, SchemaConfig, WorkspaceConfig};

/// Errors that can occur during workspace operations.
#[derive(Debug, thiserror::Error)]
pub enum WorkspaceError {
    /// Record not found.
    #[error("{0}")]
    NotFound(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Repository trait for workspace records.
#[async_trait]
pub trait WorkspaceRepository: Send + Sync {
    /// Loads all workspace records.
    ///
    /// # Arguments
    /// * `workspace` - Path to the workspace root
    ///
    /// # Returns
    /// The workspace configuration. Returns an empty workspace if nothing is stored.
    async fn load(&self, workspace: &Path) -> Result<WorkspaceConfig, WorkspaceError>;

    /// Gets an environment record by id, schema-owned or legacy.
    ///
    /// # Errors
    /// Returns `WorkspaceError::NotFound` if no environment has this id.
    async fn get_environment(
        &self,
        workspace: &Path,
        id: &str,
    ) -> Result<EnvironmentConfig, WorkspaceError> {
        let config = self.load(workspace).await?;
        config
            .locate_environment(id)
            .map(|location| location.environment.clone())
            .ok_or_else(|| WorkspaceError::NotFound(format!("environment '{id}'")))
    }

    /// Gets a schema record by id.
    ///
    /// # Errors
    /// Returns `WorkspaceError::NotFound` if no schema has this id.
    async fn get_schema(&self, workspace: &Path, id: &str) -> Result<SchemaConfig, WorkspaceError> {
        let config = self.load(workspace).await?;
        config
            .schema(id)
            .cloned()
            .ok_or_else(|| WorkspaceError::NotFound(format!("schema '{id}'")))
    }
}
