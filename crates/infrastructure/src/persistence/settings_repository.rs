//! Generator settings persistence.
//!
//! Settings live in `.apiforge/settings.json` inside the workspace, next to
//! the workspace records.

use std::path::{Path, PathBuf};

use apiforge_domain::GeneratorSettings;
use tokio::fs;

use super::state_file;
use crate::serialization::{SerializationError, from_json_bytes, to_json_stable_bytes};

const SETTINGS_FILE: &str = "settings.json";

/// Error type for settings operations.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// IO error during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] SerializationError),
}

/// Repository for generator settings persistence.
#[derive(Debug, Clone, Default)]
pub struct SettingsRepository;

impl SettingsRepository {
    /// Creates a new settings repository.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Returns the path to the settings file of a workspace.
    #[must_use]
    pub fn settings_path(workspace: &Path) -> PathBuf {
        state_file(workspace, SETTINGS_FILE)
    }

    /// Loads generator settings.
    ///
    /// Returns default settings if the file doesn't exist; missing fields
    /// take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn load(&self, workspace: &Path) -> Result<GeneratorSettings, SettingsError> {
        let path = Self::settings_path(workspace);
        if !fs::try_exists(&path).await? {
            return Ok(GeneratorSettings::default());
        }

        let content = fs::read(&path).await?;
        let settings = from_json_bytes(&content)?;
        Ok(settings)
    }

    /// Saves generator settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub async fn save(
        &self,
        workspace: &Path,
        settings: &GeneratorSettings,
    ) -> Result<(), SettingsError> {
        let path = Self::settings_path(workspace);
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).await?;
        }

        let content = to_json_stable_bytes(settings)?;
        fs::write(&path, content).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apiforge_domain::RenderTarget;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_returns_default_when_no_file() {
        let dir = TempDir::new().expect("temp dir");
        let settings = SettingsRepository::new()
            .load(dir.path())
            .await
            .expect("load should succeed");
        assert_eq!(settings, GeneratorSettings::default());
    }

    #[tokio::test]
    async fn save_then_load() {
        let dir = TempDir::new().expect("temp dir");
        let repo = SettingsRepository::new();
        let settings = GeneratorSettings {
            default_target: RenderTarget::PowerShell,
            default_api_key_header: "X-Token".to_string(),
            ..GeneratorSettings::default()
        };

        repo.save(dir.path(), &settings).await.expect("save should succeed");
        let loaded = repo.load(dir.path()).await.expect("load should succeed");

        assert_eq!(loaded, settings);
        assert!(SettingsRepository::settings_path(dir.path()).ends_with(".apiforge/settings.json"));
    }
}
