//! Local secret storage (never committed to version control)
//!
//! File location: .apiforge/secrets.json

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Secret values keyed by the opaque references in [`crate::auth::StoredAuth`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretsStore {
    /// Schema version for migration support.
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Secret key to secret value.
    #[serde(default)]
    pub secrets: BTreeMap<String, String>,
}

const fn default_schema_version() -> u32 {
    1
}

impl SecretsStore {
    /// Creates an empty secrets store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            schema_version: 1,
            secrets: BTreeMap::new(),
        }
    }

    /// Gets a secret value. Empty values are reported as missing.
    #[must_use]
    pub fn get_secret(&self, key: &str) -> Option<&str> {
        self.secrets
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Sets a secret value.
    pub fn set_secret(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.secrets.insert(key.into(), value.into());
    }

    /// Removes a secret value.
    pub fn remove_secret(&mut self, key: &str) -> Option<String> {
        self.secrets.remove(key)
    }

    /// Number of stored secrets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.secrets.len()
    }

    /// Returns true if no secrets are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.secrets.is_empty()
    }
}

impl Default for SecretsStore {
    fn default() -> Self {
        Self::new()
    }
}
