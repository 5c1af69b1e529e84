//! Resolve environment use case

use std::path::Path;

use apiforge_domain::{Environment, Schema, StoredAuth, effective_auth};

use crate::ports::{SecretsRepository, WorkspaceError, WorkspaceRepository};

/// Errors that can occur when resolving an environment.
#[derive(Debug, thiserror::Error)]
pub enum ResolveEnvironmentError {
    /// Environment not found.
    #[error("Environment not found: {0}")]
    NotFound(String),

    /// Failed to read the workspace records.
    #[error("Failed to read workspace: {0}")]
    IoError(String),

    /// Failed to parse the workspace records.
    #[error("Failed to parse workspace: {0}")]
    ParseError(String),
}

impl From<WorkspaceError> for ResolveEnvironmentError {
    fn from(error: WorkspaceError) -> Self {
        match error {
            WorkspaceError::NotFound(name) => Self::NotFound(name),
            WorkspaceError::Io(e) => Self::IoError(e.to_string()),
            WorkspaceError::Serialization(e) => Self::ParseError(e),
        }
    }
}

impl From<ResolveEnvironmentError> for crate::ApplicationError {
    fn from(error: ResolveEnvironmentError) -> Self {
        match error {
            ResolveEnvironmentError::NotFound(what) => Self::NotFound(what),
            other => Self::Storage(other.to_string()),
        }
    }
}

/// An environment ready for request building.
#[derive(Debug, Clone)]
pub struct ResolvedTarget {
    /// The environment with its effective, hydrated authentication.
    pub environment: Environment,
    /// Engine view of the owning schema; `None` for standalone environments.
    pub schema: Option<Schema>,
}

/// Loads an environment record and hydrates its effective authentication.
pub struct ResolveEnvironment<W, S> {
    workspaces: W,
    secrets: S,
}

impl<W: WorkspaceRepository, S: SecretsRepository> ResolveEnvironment<W, S> {
    /// Creates a new `ResolveEnvironment` use case.
    pub const fn new(workspaces: W, secrets: S) -> Self {
        Self {
            workspaces,
            secrets,
        }
    }

    /// Executes the use case.
    ///
    /// # Arguments
    /// * `workspace` - Path to the workspace root
    /// * `environment_id` - Id of the environment to resolve
    ///
    /// # Errors
    /// Returns an error if the workspace cannot be read or the environment
    /// does not exist. Secret lookup failures never fail the resolution.
    pub async fn execute(
        &self,
        workspace: &Path,
        environment_id: &str,
    ) -> Result<ResolvedTarget, ResolveEnvironmentError> {
        let config = self.workspaces.load(workspace).await?;
        let location = config
            .locate_environment(environment_id)
            .ok_or_else(|| ResolveEnvironmentError::NotFound(environment_id.to_string()))?;

        let stored = effective_auth(
            &location.environment.auth,
            location.group.and_then(|g| g.default_auth.as_ref()),
            location.schema.and_then(|s| s.default_auth.as_ref()),
        );
        let secret = self.fetch_secret(workspace, stored).await;
        let auth = stored.hydrate(|_| secret.clone());

        tracing::debug!(
            environment = %environment_id,
            schema = location.schema.map(|s| s.id.as_str()),
            auth = auth.kind(),
            "resolved environment"
        );

        Ok(ResolvedTarget {
            environment: location.environment.resolve(auth),
            schema: location.schema.map(apiforge_domain::SchemaConfig::to_schema),
        })
    }

    async fn fetch_secret(&self, workspace: &Path, stored: &StoredAuth) -> Option<String> {
        let secret_key = stored.secret_key()?;
        match self.secrets.get_credential(workspace, secret_key).await {
            Ok(Some(value)) => Some(value),
            Ok(None) => {
                tracing::warn!(secret_key, "secret not found, authentication will be omitted");
                None
            }
            Err(e) => {
                tracing::warn!(secret_key, error = %e, "failed to read secret, authentication will be omitted");
                None
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::ports::SecretsError;
    use apiforge_domain::{
        AuthDescriptor, EnvironmentConfig, GroupConfig, SchemaConfig, SecretsStore,
        WorkspaceConfig,
    };
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;
    use std::sync::Mutex;

    struct MockWorkspaces {
        config: Mutex<WorkspaceConfig>,
    }

    impl MockWorkspaces {
        fn new(config: WorkspaceConfig) -> Self {
            Self {
                config: Mutex::new(config),
            }
        }
    }

    #[async_trait]
    impl WorkspaceRepository for MockWorkspaces {
        async fn load(&self, _: &Path) -> Result<WorkspaceConfig, WorkspaceError> {
            Ok(self.config.lock().expect("Lock poisoned").clone())
        }
    }

    struct MockSecrets {
        store: Mutex<SecretsStore>,
        fail: bool,
    }

    impl MockSecrets {
        fn with(pairs: &[(&str, &str)]) -> Self {
            let mut store = SecretsStore::default();
            for (key, value) in pairs {
                store.set_secret(*key, *value);
            }
            Self {
                store: Mutex::new(store),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                store: Mutex::new(SecretsStore::default()),
                fail: true,
            }
        }
    }

    #[async_trait]
    impl SecretsRepository for MockSecrets {
        async fn load(&self, _: &Path) -> Result<SecretsStore, SecretsError> {
            if self.fail {
                return Err(SecretsError::Serialization("corrupt".to_string()));
            }
            Ok(self.store.lock().expect("Lock poisoned").clone())
        }
    }

    fn environment(id: &str, auth: StoredAuth) -> EnvironmentConfig {
        let mut env = EnvironmentConfig::new("Production", "https://api.test.com/").unwrap();
        env.id = id.to_string();
        env.auth = auth;
        env
    }

    fn bearer(secret_key: &str) -> StoredAuth {
        StoredAuth::Bearer {
            secret_key: secret_key.to_string(),
        }
    }

    fn workspace_with_group() -> WorkspaceConfig {
        let mut schema = SchemaConfig::new("s1", "Users API");
        schema.default_auth = Some(bearer("schema-token"));
        schema.groups.push(GroupConfig {
            id: "g1".to_string(),
            name: "Cloud".to_string(),
            default_auth: Some(bearer("group-token")),
            environment_ids: vec!["grouped".to_string()],
        });
        schema.environments.push(environment("grouped", StoredAuth::None));
        schema.environments.push(environment("loose", StoredAuth::None));
        schema
            .environments
            .push(environment("own", bearer("own-token")));

        let mut config = WorkspaceConfig::new();
        config.schemas.push(schema);
        config
    }

    fn secrets() -> MockSecrets {
        MockSecrets::with(&[
            ("schema-token", "from-schema"),
            ("group-token", "from-group"),
            ("own-token", "from-env"),
        ])
    }

    async fn resolve(id: &str) -> ResolvedTarget {
        let use_case = ResolveEnvironment::new(MockWorkspaces::new(workspace_with_group()), secrets());
        use_case
            .execute(&PathBuf::from("/test"), id)
            .await
            .expect("Should resolve")
    }

    #[tokio::test]
    async fn test_environment_auth_wins() {
        let target = resolve("own").await;
        assert_eq!(target.environment.auth, AuthDescriptor::bearer("from-env"));
    }

    #[tokio::test]
    async fn test_group_auth_is_inherited() {
        let target = resolve("grouped").await;
        assert_eq!(target.environment.auth, AuthDescriptor::bearer("from-group"));
    }

    #[tokio::test]
    async fn test_schema_auth_is_inherited() {
        let target = resolve("loose").await;
        assert_eq!(target.environment.auth, AuthDescriptor::bearer("from-schema"));
        assert_eq!(target.schema.map(|s| s.id), Some("s1".to_string()));
    }

    #[tokio::test]
    async fn test_base_url_is_trimmed() {
        let target = resolve("own").await;
        assert_eq!(target.environment.base_url, "https://api.test.com");
    }

    #[tokio::test]
    async fn test_legacy_environment_has_no_schema() {
        let mut config = WorkspaceConfig::new();
        config
            .environments
            .push(environment("legacy", bearer("own-token")));
        let use_case = ResolveEnvironment::new(MockWorkspaces::new(config), secrets());

        let target = use_case
            .execute(&PathBuf::from("/test"), "legacy")
            .await
            .expect("Should resolve");

        assert!(target.schema.is_none());
        assert_eq!(target.environment.auth, AuthDescriptor::bearer("from-env"));
    }

    #[tokio::test]
    async fn test_missing_secret_hydrates_empty() {
        let use_case = ResolveEnvironment::new(
            MockWorkspaces::new(workspace_with_group()),
            MockSecrets::with(&[]),
        );

        let target = use_case
            .execute(&PathBuf::from("/test"), "own")
            .await
            .expect("Should resolve");

        assert_eq!(target.environment.auth, AuthDescriptor::bearer(""));
    }

    #[tokio::test]
    async fn test_secret_store_failure_is_not_fatal() {
        let use_case = ResolveEnvironment::new(
            MockWorkspaces::new(workspace_with_group()),
            MockSecrets::failing(),
        );

        let result = use_case.execute(&PathBuf::from("/test"), "own").await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_unknown_environment() {
        let use_case = ResolveEnvironment::new(MockWorkspaces::new(WorkspaceConfig::new()), secrets());

        let result = use_case
            .execute(&PathBuf::from("/test"), "nonexistent")
            .await;

        assert!(matches!(result, Err(ResolveEnvironmentError::NotFound(id)) if id == "nonexistent"));
    }
}
