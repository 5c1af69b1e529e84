//! Secrets repository port
//!
//! Credential values live outside the workspace configuration and are
//! looked up by the opaque keys stored in `StoredAuth`.

use async_trait::async_trait;
use std::path::Path;

use apiforge_domain::environment::SecretsStore;

/// Errors that can occur during secrets operations.
#[derive(Debug, thiserror::Error)]
pub enum SecretsError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Repository trait for secret lookups.
#[async_trait]
pub trait SecretsRepository: Send + Sync {
    /// Loads the whole secrets store of a workspace.
    ///
    /// # Returns
    /// The secrets store. Returns an empty store if nothing is stored.
    async fn load(&self, workspace: &Path) -> Result<SecretsStore, SecretsError>;

    /// Gets a single credential by its secret key.
    ///
    /// Empty values are reported as `None`.
    ///
    /// # Arguments
    /// * `workspace` - Path to the workspace root
    /// * `secret_key` - Opaque key referenced by the auth configuration
    async fn get_credential(
        &self,
        workspace: &Path,
        secret_key: &str,
    ) -> Result<Option<String>, SecretsError> {
        let store = self.load(workspace).await?;
        Ok(store.get_secret(secret_key).map(String::from))
    }
}
