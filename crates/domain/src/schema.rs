//! Schema and group records.
//!
//! A schema is a loaded OpenAPI document plus its metadata: declared
//! platform, default authentication and owned environments. Groups bundle
//! environments under a shared default authentication.

use serde::{Deserialize, Serialize};

use crate::auth::StoredAuth;
use crate::environment::EnvironmentConfig;
use crate::platform::PlatformProfile;

/// The parts of a schema the resolution engine reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    /// Unique identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Explicit platform profile; overrides auto-detection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform_config: Option<PlatformProfile>,
}

impl Schema {
    /// Creates a schema without a platform profile.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            platform_config: None,
        }
    }

    /// Sets the explicit platform profile.
    #[must_use]
    pub fn with_platform_config(mut self, profile: PlatformProfile) -> Self {
        self.platform_config = Some(profile);
        self
    }
}

/// Persisted group record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupConfig {
    /// Unique identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Authentication inherited by member environments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_auth: Option<StoredAuth>,
    /// Ids of the environments in this group.
    #[serde(default)]
    pub environment_ids: Vec<String>,
}

impl GroupConfig {
    /// Returns true if the environment belongs to this group.
    #[must_use]
    pub fn contains(&self, environment_id: &str) -> bool {
        self.environment_ids.iter().any(|id| id == environment_id)
    }
}

/// Persisted schema record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaConfig {
    /// Unique identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Path or URL of the OpenAPI document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Declared built-in platform identifier (e.g. `kibana`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    /// Full platform profile; takes precedence over `platform`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform_config: Option<PlatformProfile>,
    /// Authentication inherited by every environment of this schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_auth: Option<StoredAuth>,
    /// Environment groups.
    #[serde(default)]
    pub groups: Vec<GroupConfig>,
    /// Environments owned by this schema.
    #[serde(default)]
    pub environments: Vec<EnvironmentConfig>,
}

impl SchemaConfig {
    /// Creates an empty schema record.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            source: None,
            platform: None,
            platform_config: None,
            default_auth: None,
            groups: Vec::new(),
            environments: Vec::new(),
        }
    }

    /// The group an environment belongs to, if any.
    #[must_use]
    pub fn group_of(&self, environment_id: &str) -> Option<&GroupConfig> {
        self.groups.iter().find(|g| g.contains(environment_id))
    }

    /// Looks up an owned environment by id.
    #[must_use]
    pub fn environment(&self, environment_id: &str) -> Option<&EnvironmentConfig> {
        self.environments.iter().find(|e| e.id == environment_id)
    }

    /// Builds the engine view of this schema.
    ///
    /// An explicit `platform_config` wins; otherwise a declared `platform`
    /// naming a built-in profile is expanded. Unknown platforms are ignored
    /// so that auto-detection still applies.
    #[must_use]
    pub fn to_schema(&self) -> Schema {
        let platform_config = self.platform_config.clone().or_else(|| {
            self.platform.as_deref().and_then(|id| {
                let profile = PlatformProfile::builtin(id);
                if profile.is_none() {
                    tracing::warn!(schema = %self.id, platform = id, "unknown platform identifier");
                }
                profile
            })
        });
        Schema {
            id: self.id.clone(),
            name: self.name.clone(),
            platform_config,
        }
    }
}
