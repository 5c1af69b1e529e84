//! File-based secrets repository implementation.
//!
//! Secrets are stored in `.apiforge/secrets.json` within the workspace.
//! This file should be added to `.gitignore` to prevent accidental commits.

use std::path::{Path, PathBuf};

use apiforge_application::ports::{FileSystem, SecretsError, SecretsRepository};
use apiforge_domain::environment::SecretsStore;
use async_trait::async_trait;

use super::{state_file, to_io_error};
use crate::serialization::{from_json_bytes, to_json_stable_bytes};

const SECRETS_FILE: &str = "secrets.json";

/// File-based secrets repository.
///
/// Stores secrets in `.apiforge/secrets.json`, keyed by the references
/// found in the workspace auth configuration:
/// ```json
/// {
///   "schema_version": 1,
///   "secrets": {
///     "prod-token": "abc123",
///     "staging-basic": "hunter2"
///   }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct FileSecretsRepository<F> {
    fs: F,
}

impl<F: FileSystem> FileSecretsRepository<F> {
    /// Creates a new file-based secrets repository.
    pub const fn new(fs: F) -> Self {
        Self { fs }
    }

    /// Returns the secrets file path for a workspace.
    fn secrets_path(workspace: &Path) -> PathBuf {
        state_file(workspace, SECRETS_FILE)
    }

    /// Writes the secrets store.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub async fn save(&self, workspace: &Path, secrets: &SecretsStore) -> Result<(), SecretsError> {
        let content = to_json_stable_bytes(secrets)
            .map_err(|e| SecretsError::Serialization(e.to_string()))?;

        self.fs
            .write_file(&Self::secrets_path(workspace), &content)
            .await
            .map_err(|e| SecretsError::Io(to_io_error(e)))
    }
}

#[async_trait]
impl<F: FileSystem> SecretsRepository for FileSecretsRepository<F> {
    async fn load(&self, workspace: &Path) -> Result<SecretsStore, SecretsError> {
        let path = Self::secrets_path(workspace);

        if !self.fs.exists(&path).await {
            // Return empty store if file doesn't exist
            return Ok(SecretsStore::new());
        }

        let content = self
            .fs
            .read_file(&path)
            .await
            .map_err(|e| SecretsError::Io(to_io_error(e)))?;

        from_json_bytes(&content).map_err(|e| SecretsError::Serialization(e.to_string()))
    }
}
