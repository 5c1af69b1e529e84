//! Generator settings
//!
//! Workspace-level preferences for request generation, stored in
//! `.apiforge/settings.json`.

use serde::{Deserialize, Serialize};

use crate::auth::{AuthResolver, DEFAULT_API_KEY_HEADER};
use crate::codegen::{CodeGenOptions, RenderTarget};

/// Preferences applied when generating requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorSettings {
    /// API-key header used when neither the environment nor the platform
    /// names one.
    #[serde(default = "default_api_key_header")]
    pub default_api_key_header: String,

    /// Output format used when none is requested.
    #[serde(default)]
    pub default_target: RenderTarget,

    /// Emit comments in generated code.
    #[serde(default = "default_true")]
    pub include_comments: bool,

    /// Indentation width for generated code.
    #[serde(default = "default_indent_size")]
    pub indent_size: usize,
}

fn default_api_key_header() -> String {
    DEFAULT_API_KEY_HEADER.to_string()
}

const fn default_true() -> bool {
    true
}

const fn default_indent_size() -> usize {
    4
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            default_api_key_header: default_api_key_header(),
            default_target: RenderTarget::default(),
            include_comments: true,
            indent_size: default_indent_size(),
        }
    }
}

impl GeneratorSettings {
    /// The authentication resolver these settings describe.
    #[must_use]
    pub fn auth_resolver(&self) -> AuthResolver {
        AuthResolver::new(self.default_api_key_header.clone())
    }

    /// Code generation options for `target`, or the default target.
    #[must_use]
    pub fn codegen_options(&self, target: Option<RenderTarget>) -> CodeGenOptions {
        CodeGenOptions {
            target: target.unwrap_or(self.default_target),
            include_comments: self.include_comments,
            pretty_format: true,
            indent_size: self.indent_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = GeneratorSettings::default();
        assert_eq!(settings.default_api_key_header, "X-API-Key");
        assert_eq!(settings.default_target, RenderTarget::Curl);
        assert!(settings.include_comments);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: GeneratorSettings =
            serde_json::from_str(r#"{"default_target": "python"}"#).unwrap_or_default();
        assert_eq!(settings.default_target, RenderTarget::Python);
        assert_eq!(settings.indent_size, 4);
    }

    #[test]
    fn test_codegen_options() {
        let settings = GeneratorSettings {
            include_comments: false,
            indent_size: 2,
            ..GeneratorSettings::default()
        };
        let options = settings.codegen_options(Some(RenderTarget::Ansible));
        assert_eq!(options.target, RenderTarget::Ansible);
        assert!(!options.include_comments);
        assert_eq!(options.indent(), "  ");
        assert_eq!(settings.codegen_options(None).target, RenderTarget::Curl);
    }

    #[test]
    fn test_auth_resolver_uses_configured_header() {
        let settings = GeneratorSettings {
            default_api_key_header: "X-Token".to_string(),
            ..GeneratorSettings::default()
        };
        assert_eq!(settings.auth_resolver().default_header(), "X-Token");
    }
}
