//! File system based workspace repository implementation.

use std::path::{Path, PathBuf};

use apiforge_application::ports::{FileSystem, WorkspaceError, WorkspaceRepository};
use apiforge_domain::workspace::{CURRENT_SCHEMA_VERSION, WorkspaceConfig};
use async_trait::async_trait;

use super::{state_file, to_io_error};
use crate::serialization::{from_json_bytes, to_json_stable_bytes};

const WORKSPACE_FILE: &str = "workspace.json";

/// File system based implementation of `WorkspaceRepository`.
///
/// Reads `.apiforge/workspace.json`; a missing file is an empty workspace.
#[derive(Debug, Clone)]
pub struct FileWorkspaceRepository<F> {
    fs: F,
}

impl<F: FileSystem> FileWorkspaceRepository<F> {
    /// Creates a new repository with the given file system implementation.
    #[must_use]
    pub const fn new(fs: F) -> Self {
        Self { fs }
    }

    /// Returns the workspace file path.
    fn workspace_path(workspace: &Path) -> PathBuf {
        state_file(workspace, WORKSPACE_FILE)
    }

    /// Writes the workspace records.
    ///
    /// # Errors
    ///
    /// Returns an error if a record is invalid or the file cannot be written.
    pub async fn save(
        &self,
        workspace: &Path,
        config: &WorkspaceConfig,
    ) -> Result<(), WorkspaceError> {
        for environment in config
            .schemas
            .iter()
            .flat_map(|s| &s.environments)
            .chain(&config.environments)
        {
            environment
                .validate()
                .map_err(|e| WorkspaceError::Serialization(e.to_string()))?;
        }

        let content = to_json_stable_bytes(config)
            .map_err(|e| WorkspaceError::Serialization(e.to_string()))?;

        self.fs
            .write_file(&Self::workspace_path(workspace), &content)
            .await
            .map_err(|e| WorkspaceError::Io(to_io_error(e)))
    }
}

#[async_trait]
impl<F: FileSystem> WorkspaceRepository for FileWorkspaceRepository<F> {
    async fn load(&self, workspace: &Path) -> Result<WorkspaceConfig, WorkspaceError> {
        let path = Self::workspace_path(workspace);

        if !self.fs.exists(&path).await {
            tracing::debug!(path = %path.display(), "no workspace file, using empty workspace");
            return Ok(WorkspaceConfig::new());
        }

        let content = self
            .fs
            .read_file(&path)
            .await
            .map_err(|e| WorkspaceError::Io(to_io_error(e)))?;

        let config: WorkspaceConfig =
            from_json_bytes(&content).map_err(|e| WorkspaceError::Serialization(e.to_string()))?;

        // Validate schema version
        if config.schema_version > CURRENT_SCHEMA_VERSION {
            return Err(WorkspaceError::Serialization(format!(
                "workspace schema version {} is newer than supported version {CURRENT_SCHEMA_VERSION}",
                config.schema_version
            )));
        }

        Ok(config)
    }
}
