//! Authentication resolution.
//!
//! Turns an [`AuthDescriptor`] plus a [`PlatformProfile`] into the single
//! artifact a request needs. Incomplete credentials resolve to `None` rather
//! than an error so a request skeleton can still be generated.

use crate::platform::PlatformProfile;

use super::types::{ApiKeyLocation, AuthDescriptor, BasicCredentials};

/// Header name used for API keys when neither the descriptor nor the
/// platform names one.
pub const DEFAULT_API_KEY_HEADER: &str = "X-API-Key";

/// Query parameter name used for API keys without a configured name.
pub const DEFAULT_API_KEY_PARAM: &str = "api_key";

/// The canonical authentication artifact for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedAuth {
    /// Add this header to the request.
    Header {
        /// Header name (e.g., "Authorization").
        name: String,
        /// Header value (e.g., "Bearer token123").
        value: String,
    },
    /// Append this query parameter to the URL.
    QueryParam {
        /// Query parameter name.
        name: String,
        /// Query parameter value.
        value: String,
    },
    /// Basic credentials; encoding is left to the renderer.
    Basic(BasicCredentials),
}

/// Resolves authentication descriptors against a platform profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthResolver {
    default_header: String,
}

impl AuthResolver {
    /// Creates a resolver with a custom default API-key header name.
    #[must_use]
    pub fn new(default_header: impl Into<String>) -> Self {
        Self {
            default_header: default_header.into(),
        }
    }

    /// The API-key header name used when nothing more specific is set.
    #[must_use]
    pub fn default_header(&self) -> &str {
        &self.default_header
    }

    /// Resolves `auth` to a header, query parameter or credential pair.
    ///
    /// Returns `None` for `none` and for any variant missing a required
    /// value. A non-blank profile `header_format` prefixes header API keys.
    #[must_use]
    pub fn resolve(&self, auth: &AuthDescriptor, profile: &PlatformProfile) -> Option<ResolvedAuth> {
        match auth {
            AuthDescriptor::Bearer { token } if !token.is_empty() => Some(ResolvedAuth::Header {
                name: "Authorization".to_string(),
                value: format!("Bearer {token}"),
            }),
            AuthDescriptor::ApiKey {
                key,
                name,
                location: ApiKeyLocation::Header,
            } if !key.is_empty() => {
                let name = non_empty(name.as_deref())
                    .or_else(|| non_empty(profile.auth_config.header_name.as_deref()))
                    .unwrap_or(&self.default_header);
                let value = match non_empty(profile.auth_config.header_format.as_deref()) {
                    Some(format) => format!("{format} {key}"),
                    None => key.clone(),
                };
                Some(ResolvedAuth::Header {
                    name: name.to_string(),
                    value,
                })
            }
            AuthDescriptor::ApiKey {
                key,
                name,
                location: ApiKeyLocation::Query,
            } if !key.is_empty() => Some(ResolvedAuth::QueryParam {
                name: non_empty(name.as_deref())
                    .unwrap_or(DEFAULT_API_KEY_PARAM)
                    .to_string(),
                value: key.clone(),
            }),
            AuthDescriptor::Basic { username, password }
                if !username.is_empty() && !password.is_empty() =>
            {
                Some(ResolvedAuth::Basic(BasicCredentials::new(username, password)))
            }
            _ => None,
        }
    }
}

impl Default for AuthResolver {
    fn default() -> Self {
        Self::new(DEFAULT_API_KEY_HEADER)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Resolves authentication using the default API-key header name.
#[must_use]
pub fn resolve_auth_header(auth: &AuthDescriptor, profile: &PlatformProfile) -> Option<ResolvedAuth> {
    AuthResolver::default().resolve(auth, profile)
}
