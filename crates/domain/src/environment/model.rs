//! Environment types: the persisted record and its resolved form.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::auth::{AuthDescriptor, StoredAuth};
use crate::error::{DomainError, DomainResult};
use crate::id::generate_id;

/// A named base URL plus authentication a user tests an API against.
///
/// This is the resolved form: secrets have been fetched and auth
/// inheritance applied. The engine trusts `base_url` without re-validating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    /// Unique identifier.
    pub id: String,
    /// Display name (e.g. "Production").
    pub name: String,
    /// Absolute base URL without a trailing slash.
    pub base_url: String,
    /// Effective authentication.
    #[serde(default)]
    pub auth: AuthDescriptor,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Extra headers sent with every request.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub custom_headers: IndexMap<String, String>,
}

impl Environment {
    /// Creates an environment with a generated id.
    #[must_use]
    pub fn new(name: impl Into<String>, base_url: impl Into<String>, auth: AuthDescriptor) -> Self {
        Self {
            id: generate_id(),
            name: name.into(),
            base_url: base_url.into(),
            auth,
            description: None,
            custom_headers: IndexMap::new(),
        }
    }

    /// Adds a custom header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom_headers.insert(name.into(), value.into());
        self
    }
}

/// Persisted environment record.
///
/// Authentication refers to secrets by key; see [`StoredAuth`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    /// Unique identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Absolute base URL.
    pub base_url: String,
    /// Authentication configuration; `none` defers to group/schema defaults.
    #[serde(default)]
    pub auth: StoredAuth,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Extra headers sent with every request.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub custom_headers: IndexMap<String, String>,
}

impl EnvironmentConfig {
    /// Creates a validated environment record with a generated id.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidUrl`] if `base_url` is not absolute.
    pub fn new(name: impl Into<String>, base_url: impl Into<String>) -> DomainResult<Self> {
        let config = Self {
            id: generate_id(),
            name: name.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            auth: StoredAuth::None,
            description: None,
            custom_headers: IndexMap::new(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks the record invariants enforced at creation time.
    ///
    /// # Errors
    ///
    /// Returns an error if the id or name is empty, or the base URL is not
    /// an absolute URL with a host.
    pub fn validate(&self) -> DomainResult<()> {
        if self.id.trim().is_empty() {
            return Err(DomainError::InvalidIdentifier("environment id is empty".to_string()));
        }
        if self.name.trim().is_empty() {
            return Err(DomainError::InvalidIdentifier(format!(
                "environment '{}' has no name",
                self.id
            )));
        }
        let url = Url::parse(&self.base_url)
            .map_err(|e| DomainError::InvalidUrl(format!("{}: {e}", self.base_url)))?;
        if !url.has_host() {
            return Err(DomainError::InvalidUrl(format!(
                "{}: missing host",
                self.base_url
            )));
        }
        Ok(())
    }

    /// Returns a copy with a fresh id and a derived name.
    #[must_use]
    pub fn duplicate(&self) -> Self {
        Self {
            id: generate_id(),
            name: format!("{} (copy)", self.name),
            ..self.clone()
        }
    }

    /// Builds the resolved environment from already hydrated auth.
    #[must_use]
    pub fn resolve(&self, auth: AuthDescriptor) -> Environment {
        Environment {
            id: self.id.clone(),
            name: self.name.clone(),
            base_url: self.base_url.clone(),
            auth,
            description: self.description.clone(),
            custom_headers: self.custom_headers.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_trailing_slash() {
        let config = EnvironmentConfig::new("Production", "https://api.test.com/")
            .expect("valid environment");
        assert_eq!(config.base_url, "https://api.test.com");
        assert_eq!(config.auth, StoredAuth::None);
    }

    #[test]
    fn test_new_rejects_relative_url() {
        let result = EnvironmentConfig::new("Broken", "/api");
        assert!(matches!(result, Err(DomainError::InvalidUrl(_))));
    }

    #[test]
    fn test_validate_rejects_empty_name() {
        let mut config =
            EnvironmentConfig::new("Dev", "http://localhost:8080").expect("valid environment");
        config.name = "  ".to_string();
        assert!(matches!(
            config.validate(),
            Err(DomainError::InvalidIdentifier(_))
        ));
    }

    #[test]
    fn test_duplicate_gets_new_id() {
        let config = EnvironmentConfig::new("Dev", "http://localhost").expect("valid environment");
        let copy = config.duplicate();
        assert_ne!(copy.id, config.id);
        assert_eq!(copy.name, "Dev (copy)");
        assert_eq!(copy.base_url, config.base_url);
    }

    #[test]
    fn test_resolve_keeps_fields() {
        let mut config =
            EnvironmentConfig::new("Dev", "http://localhost").expect("valid environment");
        config
            .custom_headers
            .insert("X-Trace".to_string(), "1".to_string());
        let env = config.resolve(AuthDescriptor::bearer("t"));
        assert_eq!(env.id, config.id);
        assert_eq!(env.auth, AuthDescriptor::bearer("t"));
        assert_eq!(env.custom_headers.len(), 1);
    }
}
