//! Endpoint definitions derived from an OpenAPI document.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::error::{DomainError, DomainResult};

use super::method::HttpMethod;

/// One operation of an OpenAPI document. Read-only; regenerated whenever
/// the source document is reloaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Endpoint {
    /// Path template, starting with `/` (e.g. `/pets/{petId}`).
    pub path: String,
    /// HTTP method.
    pub method: HttpMethod,
    /// Short summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Long description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// `operationId`, if declared.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
    /// Tags used for grouping.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Path, query, header and cookie parameters.
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    /// Request body definition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBodySpec>,
    /// Status code to response description.
    #[serde(default)]
    pub responses: IndexMap<String, String>,
}

impl Endpoint {
    /// Creates an endpoint with only a method and path.
    #[must_use]
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method,
            summary: None,
            description: None,
            operation_id: None,
            tags: Vec::new(),
            parameters: Vec::new(),
            request_body: None,
            responses: IndexMap::new(),
        }
    }

    /// Sets the summary.
    #[must_use]
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Sets the JSON request body schema.
    #[must_use]
    pub fn with_body_schema(mut self, schema: Value) -> Self {
        self.request_body = Some(RequestBodySpec {
            required: true,
            content_type: "application/json".to_string(),
            schema: Some(schema),
        });
        self
    }

    /// `METHOD /path`, used for display and lookups.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} {}", self.method, self.path)
    }

    /// Human-readable title: summary, else operation id, else the label.
    #[must_use]
    pub fn title(&self) -> String {
        self.summary
            .clone()
            .or_else(|| self.operation_id.clone())
            .unwrap_or_else(|| self.label())
    }

    /// Parameters declared at the given location.
    pub fn parameters_in(&self, location: ParameterLocation) -> impl Iterator<Item = &Parameter> {
        self.parameters.iter().filter(move |p| p.location == location)
    }

    /// Schema of the request body, if any.
    #[must_use]
    pub fn body_schema(&self) -> Option<&Value> {
        self.request_body.as_ref().and_then(|b| b.schema.as_ref())
    }
}

/// A single operation parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name.
    pub name: String,
    /// Where the parameter is sent.
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    /// Whether the parameter is required.
    #[serde(default)]
    pub required: bool,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// JSON schema of the value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,
}

/// Parameter location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    /// Templated path segment
    Path,
    /// Query string
    Query,
    /// Request header
    Header,
    /// Cookie
    Cookie,
}

impl ParameterLocation {
    /// Returns the OpenAPI `in` value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Path => "path",
            Self::Query => "query",
            Self::Header => "header",
            Self::Cookie => "cookie",
        }
    }
}

impl fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParameterLocation {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "path" => Ok(Self::Path),
            "query" => Ok(Self::Query),
            "header" => Ok(Self::Header),
            "cookie" => Ok(Self::Cookie),
            other => Err(DomainError::UnsupportedParameterLocation(other.to_string())),
        }
    }
}

/// Declared request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestBodySpec {
    /// Whether a body is required.
    #[serde(default)]
    pub required: bool,
    /// Media type the schema was taken from.
    pub content_type: String,
    /// JSON schema of the body, with local references resolved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,
}
