//! Workspace record (.apiforge/workspace.json).

use serde::{Deserialize, Serialize};

use crate::environment::EnvironmentConfig;
use crate::schema::{GroupConfig, SchemaConfig};

/// Current schema version of the workspace file.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// All persisted schemas and environments of a workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    /// Schema version for migration support.
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Loaded OpenAPI schemas with their environments.
    #[serde(default)]
    pub schemas: Vec<SchemaConfig>,

    /// Standalone environments from the legacy layout, owned by no schema.
    #[serde(default)]
    pub environments: Vec<EnvironmentConfig>,
}

const fn default_schema_version() -> u32 {
    CURRENT_SCHEMA_VERSION
}

/// Where an environment lives in the workspace.
#[derive(Debug, Clone, Copy)]
pub struct EnvironmentLocation<'a> {
    /// The environment record.
    pub environment: &'a EnvironmentConfig,
    /// The owning schema; `None` for legacy standalone environments.
    pub schema: Option<&'a SchemaConfig>,
    /// The group the environment belongs to, if any.
    pub group: Option<&'a GroupConfig>,
}

impl WorkspaceConfig {
    /// Creates an empty workspace.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            schemas: Vec::new(),
            environments: Vec::new(),
        }
    }

    /// Finds an environment with its owning schema and group.
    ///
    /// Schema-owned environments are searched before legacy ones.
    #[must_use]
    pub fn locate_environment(&self, environment_id: &str) -> Option<EnvironmentLocation<'_>> {
        self.schemas
            .iter()
            .find_map(|schema| {
                schema
                    .environment(environment_id)
                    .map(|environment| EnvironmentLocation {
                        environment,
                        schema: Some(schema),
                        group: schema.group_of(environment_id),
                    })
            })
            .or_else(|| {
                self.environments
                    .iter()
                    .find(|e| e.id == environment_id)
                    .map(|environment| EnvironmentLocation {
                        environment,
                        schema: None,
                        group: None,
                    })
            })
    }

    /// Finds a schema by id.
    #[must_use]
    pub fn schema(&self, schema_id: &str) -> Option<&SchemaConfig> {
        self.schemas.iter().find(|s| s.id == schema_id)
    }
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self::new()
    }
}
