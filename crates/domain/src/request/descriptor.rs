//! The renderer-agnostic description of one HTTP request.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::auth::BasicCredentials;
use crate::endpoint::HttpMethod;

/// How a renderer presents basic credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BasicAuthStyle {
    /// As an `Authorization: Basic <base64>` header.
    Header,
    /// Through the target's own basic-auth mechanism; headers untouched.
    Native,
}

/// A fully specified request, built fresh per invocation and never persisted.
///
/// Header order: platform-required headers, environment custom headers,
/// `Content-Type`, then the authentication header last.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestDescriptor {
    /// HTTP method.
    pub method: HttpMethod,
    /// Final URL, including any query-string API key.
    pub url: String,
    /// Ordered headers.
    pub headers: IndexMap<String, String>,
    /// JSON body placeholder for body-carrying methods.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Basic credentials, kept out of `headers` so each renderer can pick
    /// header or native encoding.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub basic_auth: Option<BasicCredentials>,
    /// Name of the header carrying credentials, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_header: Option<String>,
    /// Advisory comments from the platform profile.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hints: Vec<String>,
}

impl RequestDescriptor {
    /// Looks up a header value, case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Returns true if a header is present, case-insensitively.
    #[must_use]
    pub fn has_header(&self, name: &str) -> bool {
        self.header(name).is_some()
    }

    /// Returns true if `name` carries credentials.
    #[must_use]
    pub fn is_auth_header(&self, name: &str) -> bool {
        self.auth_header
            .as_deref()
            .is_some_and(|h| h.eq_ignore_ascii_case(name))
            || (self.basic_auth.is_some() && name.eq_ignore_ascii_case("Authorization"))
    }

    /// The headers a renderer should emit.
    ///
    /// With [`BasicAuthStyle::Header`] basic credentials are appended as an
    /// encoded `Authorization` header, keeping the auth header last.
    #[must_use]
    pub fn effective_headers(&self, style: BasicAuthStyle) -> IndexMap<String, String> {
        let mut headers = self.headers.clone();
        if let (BasicAuthStyle::Header, Some(credentials)) = (style, &self.basic_auth) {
            headers.retain(|k, _| !k.eq_ignore_ascii_case("Authorization"));
            headers.insert("Authorization".to_string(), credentials.header_value());
        }
        headers
    }

    /// The authorization value as it appears on the wire, if any.
    #[must_use]
    pub fn authorization_value(&self) -> Option<String> {
        self.basic_auth
            .as_ref()
            .map(BasicCredentials::header_value)
            .or_else(|| {
                self.auth_header
                    .as_deref()
                    .and_then(|name| self.header(name))
                    .map(String::from)
            })
    }
}
