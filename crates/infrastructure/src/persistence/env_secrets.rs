//! Secrets from process environment variables.
//!
//! A secret key `prod-token` is read from `APIFORGE_SECRET_PROD_TOKEN`.

use std::path::Path;

use apiforge_application::ports::{SecretsError, SecretsRepository};
use apiforge_domain::environment::SecretsStore;
use async_trait::async_trait;

/// Prefix of the environment variables holding secrets.
pub const SECRET_ENV_PREFIX: &str = "APIFORGE_SECRET_";

/// Environment variable suffix for a secret key: uppercase, with every
/// character outside `[A-Z0-9]` replaced by `_`.
fn env_suffix(secret_key: &str) -> String {
    secret_key
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect()
}

/// Secrets repository over a snapshot of environment variables.
#[derive(Debug, Clone)]
pub struct EnvSecretsRepository {
    store: SecretsStore,
}

impl EnvSecretsRepository {
    /// Snapshots the current process environment.
    #[must_use]
    pub fn from_process() -> Self {
        Self::from_vars(std::env::vars())
    }

    /// Builds the repository from explicit `(name, value)` pairs.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut store = SecretsStore::new();
        for (name, value) in vars {
            if let Some(suffix) = name.as_ref().strip_prefix(SECRET_ENV_PREFIX) {
                store.set_secret(suffix, value);
            }
        }
        tracing::debug!(count = store.len(), "loaded secrets from environment");
        Self { store }
    }
}

#[async_trait]
impl SecretsRepository for EnvSecretsRepository {
    async fn load(&self, _workspace: &Path) -> Result<SecretsStore, SecretsError> {
        Ok(self.store.clone())
    }

    async fn get_credential(
        &self,
        _workspace: &Path,
        secret_key: &str,
    ) -> Result<Option<String>, SecretsError> {
        Ok(self.store.get_secret(&env_suffix(secret_key)).map(String::from))
    }
}

/// Looks secrets up in `primary`, then in `fallback`.
///
/// A failing primary is logged and skipped.
#[derive(Debug, Clone)]
pub struct FallbackSecretsRepository<P, F> {
    primary: P,
    fallback: F,
}

impl<P: SecretsRepository, F: SecretsRepository> FallbackSecretsRepository<P, F> {
    /// Creates a repository consulting `primary` before `fallback`.
    pub const fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

#[async_trait]
impl<P: SecretsRepository, F: SecretsRepository> SecretsRepository
    for FallbackSecretsRepository<P, F>
{
    async fn load(&self, workspace: &Path) -> Result<SecretsStore, SecretsError> {
        let mut store = self.fallback.load(workspace).await?;
        for (key, value) in self.primary.load(workspace).await?.secrets {
            store.set_secret(key, value);
        }
        Ok(store)
    }

    async fn get_credential(
        &self,
        workspace: &Path,
        secret_key: &str,
    ) -> Result<Option<String>, SecretsError> {
        match self.primary.get_credential(workspace, secret_key).await {
            Ok(Some(value)) => return Ok(Some(value)),
            Ok(None) => {}
            Err(e) => tracing::warn!(secret_key, error = %e, "primary secret store failed"),
        }
        self.fallback.get_credential(workspace, secret_key).await
    }
}
