//! Authentication configuration types

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

/// Authentication credentials with secret values already fetched.
///
/// This is the form the resolution engine works with. Exactly one variant's
/// fields are meaningful; empty strings mean "not provided".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuthDescriptor {
    /// No authentication
    #[default]
    None,
    /// API key authentication
    #[serde(rename = "apikey")]
    ApiKey {
        /// The API key value
        key: String,
        /// Header or query parameter name, platform default when absent
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        /// Where to add the key
        #[serde(default)]
        location: ApiKeyLocation,
    },
    /// Bearer token authentication
    Bearer {
        /// The bearer token
        token: String,
    },
    /// Basic authentication
    Basic {
        /// Username
        username: String,
        /// Password
        password: String,
    },
}

/// Location for API key authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ApiKeyLocation {
    /// Add to request headers
    #[default]
    Header,
    /// Add to query parameters
    Query,
}

impl AuthDescriptor {
    /// Returns true if authentication is configured.
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        !matches!(self, Self::None)
    }

    /// Short name of the variant, safe to log.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::ApiKey { .. } => "apikey",
            Self::Bearer { .. } => "bearer",
            Self::Basic { .. } => "basic",
        }
    }

    /// Creates a bearer token authentication.
    #[must_use]
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer {
            token: token.into(),
        }
    }

    /// Creates a basic authentication.
    #[must_use]
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Creates an API key authentication sent in a header.
    ///
    /// A `None` name lets the platform profile or resolver default decide.
    #[must_use]
    pub fn api_key_header(key: impl Into<String>, name: Option<&str>) -> Self {
        Self::ApiKey {
            key: key.into(),
            name: name.map(String::from),
            location: ApiKeyLocation::Header,
        }
    }

    /// Creates an API key authentication sent as a query parameter.
    #[must_use]
    pub fn api_key_query(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self::ApiKey {
            key: key.into(),
            name: Some(name.into()),
            location: ApiKeyLocation::Query,
        }
    }
}

/// Persisted authentication configuration.
///
/// Secrets are never stored inline: `secret_key` is an opaque reference into
/// the secret store, fetched by the caller before resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StoredAuth {
    /// No authentication
    #[default]
    None,
    /// API key authentication
    #[serde(rename = "apikey")]
    ApiKey {
        /// Reference to the key in the secret store
        secret_key: String,
        /// Header or query parameter name
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        /// Where to add the key
        #[serde(default)]
        location: ApiKeyLocation,
    },
    /// Bearer token authentication
    Bearer {
        /// Reference to the token in the secret store
        secret_key: String,
    },
    /// Basic authentication
    Basic {
        /// Username, stored in plain configuration
        username: String,
        /// Reference to the password in the secret store
        secret_key: String,
    },
}

impl StoredAuth {
    /// Returns true if authentication is configured.
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        !matches!(self, Self::None)
    }

    /// The secret store key this configuration refers to, if any.
    #[must_use]
    pub fn secret_key(&self) -> Option<&str> {
        match self {
            Self::None => None,
            Self::ApiKey { secret_key, .. }
            | Self::Bearer { secret_key }
            | Self::Basic { secret_key, .. } => Some(secret_key),
        }
    }

    /// Builds an [`AuthDescriptor`] using already fetched secret values.
    ///
    /// A secret the lookup cannot provide becomes an empty string, which the
    /// resolver treats as incomplete authentication.
    #[must_use]
    pub fn hydrate<F>(&self, mut lookup: F) -> AuthDescriptor
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut fetch = |key: &str| lookup(key).unwrap_or_default();
        match self {
            Self::None => AuthDescriptor::None,
            Self::ApiKey {
                secret_key,
                name,
                location,
            } => AuthDescriptor::ApiKey {
                key: fetch(secret_key),
                name: name.clone(),
                location: *location,
            },
            Self::Bearer { secret_key } => AuthDescriptor::Bearer {
                token: fetch(secret_key),
            },
            Self::Basic {
                username,
                secret_key,
            } => AuthDescriptor::Basic {
                username: username.clone(),
                password: fetch(secret_key),
            },
        }
    }
}

/// Picks the most specific configured authentication.
///
/// Precedence is environment, then the owning group's default, then the
/// schema's default. Returns [`StoredAuth::None`] when nothing is configured.
#[must_use]
pub fn effective_auth<'a>(
    environment: &'a StoredAuth,
    group: Option<&'a StoredAuth>,
    schema: Option<&'a StoredAuth>,
) -> &'a StoredAuth {
    static NONE: StoredAuth = StoredAuth::None;

    [Some(environment), group, schema]
        .into_iter()
        .flatten()
        .find(|auth| auth.is_configured())
        .unwrap_or(&NONE)
}

/// A username/password pair resolved from basic authentication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicCredentials {
    /// Username
    pub username: String,
    /// Password
    pub password: String,
}

impl BasicCredentials {
    /// Creates a credential pair.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Returns the `Authorization` header value: `Basic base64(user:pass)`.
    #[must_use]
    pub fn header_value(&self) -> String {
        let encoded = STANDARD.encode(format!("{}:{}", self.username, self.password));
        format!("Basic {encoded}")
    }
}
