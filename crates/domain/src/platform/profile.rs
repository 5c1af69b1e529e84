//! Platform profile types and the built-in profiles.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Identifier of the generic fallback profile.
pub const GENERIC: &str = "generic";
/// Identifier of the Elasticsearch profile.
pub const ELASTICSEARCH: &str = "elasticsearch";
/// Identifier of the Kibana profile.
pub const KIBANA: &str = "kibana";

/// Conventions a known API platform imposes on generated requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformProfile {
    /// Platform identifier (e.g. `generic`, `kibana`).
    pub id: String,
    /// Headers injected into every request, in order.
    #[serde(default)]
    pub required_headers: IndexMap<String, String>,
    /// Authentication formatting rules.
    #[serde(default)]
    pub auth_config: AuthFormatConfig,
    /// Advisory TLS notes. Never changes the generated request.
    #[serde(default)]
    pub ssl_config: SslConfig,
    /// Advisory comments for generated code.
    #[serde(default)]
    pub code_gen_hints: CodeGenHints,
}

/// How a platform expects API keys to be presented.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AuthFormatConfig {
    /// Scheme prefix for API-key header values, e.g. `ApiKey`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_format: Option<String>,
    /// Header the platform reads API keys from when none is configured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_name: Option<String>,
}

/// Advisory SSL information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SslConfig {
    /// Whether certificates are normally verifiable.
    #[serde(default = "default_true")]
    pub verify_certificates: bool,
    /// Free-form notes shown alongside generated code.
    #[serde(default)]
    pub notes: Vec<String>,
}

impl Default for SslConfig {
    fn default() -> Self {
        Self {
            verify_certificates: true,
            notes: Vec::new(),
        }
    }
}

const fn default_true() -> bool {
    true
}

/// Hints for code generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CodeGenHints {
    /// Comment lines placed at the top of generated snippets.
    #[serde(default)]
    pub comments: Vec<String>,
}

impl PlatformProfile {
    /// The generic profile: no headers, no auth formatting, no notes.
    #[must_use]
    pub fn generic() -> Self {
        Self {
            id: GENERIC.to_string(),
            required_headers: IndexMap::new(),
            auth_config: AuthFormatConfig::default(),
            ssl_config: SslConfig::default(),
            code_gen_hints: CodeGenHints::default(),
        }
    }

    /// Elasticsearch: `ApiKey` scheme in the `Authorization` header.
    #[must_use]
    pub fn elasticsearch() -> Self {
        Self {
            id: ELASTICSEARCH.to_string(),
            required_headers: IndexMap::from([(
                "Accept".to_string(),
                "application/json".to_string(),
            )]),
            auth_config: AuthFormatConfig {
                header_format: Some("ApiKey".to_string()),
                header_name: Some("Authorization".to_string()),
            },
            ssl_config: SslConfig {
                verify_certificates: false,
                notes: vec![
                    "Self-managed clusters often use self-signed certificates; \
                     disable verification only for local testing."
                        .to_string(),
                ],
            },
            code_gen_hints: CodeGenHints {
                comments: vec!["Elasticsearch API key must be the base64 encoded id:api_key pair.".to_string()],
            },
        }
    }

    /// Kibana: like Elasticsearch plus the mandatory `kbn-xsrf` header.
    #[must_use]
    pub fn kibana() -> Self {
        Self {
            id: KIBANA.to_string(),
            required_headers: IndexMap::from([("kbn-xsrf".to_string(), "true".to_string())]),
            auth_config: AuthFormatConfig {
                header_format: Some("ApiKey".to_string()),
                header_name: Some("Authorization".to_string()),
            },
            ssl_config: SslConfig {
                verify_certificates: false,
                notes: vec![
                    "Kibana behind a self-signed proxy may require disabling certificate \
                     verification."
                        .to_string(),
                ],
            },
            code_gen_hints: CodeGenHints {
                comments: vec!["Kibana rejects write requests without the kbn-xsrf header.".to_string()],
            },
        }
    }

    /// Looks up a built-in profile by identifier, case-insensitively.
    #[must_use]
    pub fn builtin(id: &str) -> Option<Self> {
        match id.to_ascii_lowercase().as_str() {
            GENERIC => Some(Self::generic()),
            ELASTICSEARCH | "elastic" | "opensearch" => Some(Self::elasticsearch()),
            KIBANA => Some(Self::kibana()),
            _ => None,
        }
    }

    /// Returns true if this is the generic profile.
    #[must_use]
    pub fn is_generic(&self) -> bool {
        self.id == GENERIC
    }

    /// Advisory lines for generated code: hint comments then SSL notes.
    #[must_use]
    pub fn advisory_lines(&self) -> Vec<String> {
        self.code_gen_hints
            .comments
            .iter()
            .chain(&self.ssl_config.notes)
            .cloned()
            .collect()
    }
}

impl Default for PlatformProfile {
    fn default() -> Self {
        Self::generic()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generic_is_empty() {
        let profile = PlatformProfile::generic();
        assert!(profile.is_generic());
        assert!(profile.required_headers.is_empty());
        assert!(profile.auth_config.header_format.is_none());
        assert!(profile.advisory_lines().is_empty());
    }

    #[test]
    fn test_builtin_lookup() {
        assert_eq!(PlatformProfile::builtin("Kibana"), Some(PlatformProfile::kibana()));
        assert_eq!(
            PlatformProfile::builtin("opensearch"),
            Some(PlatformProfile::elasticsearch())
        );
        assert_eq!(PlatformProfile::builtin("unknown"), None);
    }

    #[test]
    fn test_profile_deserializes_camel_case() {
        let json = r#"{
            "id": "custom",
            "requiredHeaders": {"X-Tenant": "acme"},
            "authConfig": {"headerFormat": "ApiKey"}
        }"#;
        let profile: PlatformProfile = serde_json::from_str(json).expect("valid profile");
        assert_eq!(profile.required_headers.get("X-Tenant").map(String::as_str), Some("acme"));
        assert_eq!(profile.auth_config.header_format.as_deref(), Some("ApiKey"));
        assert!(profile.ssl_config.verify_certificates);
    }

    #[test]
    fn test_advisory_lines_order() {
        let lines = PlatformProfile::kibana().advisory_lines();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("kbn-xsrf"));
    }
}
