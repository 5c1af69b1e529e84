//! OpenAPI 3 / Swagger 2 importer
//!
//! Turns an API description (JSON or YAML) into the endpoint list the
//! request builder consumes. Local `$ref` pointers are inlined for the
//! parts the builder reads: parameters and request bodies.

use std::path::Path;

use indexmap::IndexMap;
use serde_json::{Map, Value};
use thiserror::Error;

use apiforge_domain::{Endpoint, HttpMethod, Parameter, ParameterLocation, RequestBodySpec};

/// Nesting bound for `$ref` inlining.
const MAX_REF_DEPTH: usize = 16;

/// Media type preferred when an operation declares several.
const JSON_MEDIA_TYPE: &str = "application/json";

/// Import error types
#[derive(Debug, Error)]
pub enum ImportError {
    /// Neither JSON nor YAML could be parsed
    #[error("Invalid document: {0}")]
    InvalidDocument(String),
    /// The document declares neither `openapi: 3.x` nor `swagger: 2.0`
    #[error("Unsupported API description version: {0}")]
    UnsupportedVersion(String),
    /// The document has no `paths` object
    #[error("Document has no paths")]
    MissingPaths,
    /// IO operation failed
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Description dialect of an imported document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecVersion {
    /// Swagger 2.0
    Swagger2,
    /// OpenAPI 3.x
    OpenApi3,
}

/// An imported API description.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiDocument {
    /// `info.title`
    pub title: String,
    /// `info.version`
    pub version: String,
    /// Dialect the document was written in.
    pub spec_version: SpecVersion,
    /// Server base URLs, in declaration order.
    pub servers: Vec<String>,
    /// Operations in document order.
    pub endpoints: Vec<Endpoint>,
}

impl ApiDocument {
    /// Finds an endpoint by `operationId` or by `"METHOD /path"`.
    #[must_use]
    pub fn find(&self, selector: &str) -> Option<&Endpoint> {
        let selector = selector.trim();
        if let Some(endpoint) = self
            .endpoints
            .iter()
            .find(|e| e.operation_id.as_deref() == Some(selector))
        {
            return Some(endpoint);
        }

        let (method, path) = selector.split_once(char::is_whitespace)?;
        let method: HttpMethod = method.parse().ok()?;
        let path = path.trim();
        self.endpoints
            .iter()
            .find(|e| e.method == method && e.path == path)
    }
}

/// Parses OpenAPI and Swagger documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenApiImporter;

impl OpenApiImporter {
    /// Creates a new importer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Reads and parses a document from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub async fn load(&self, path: &Path) -> Result<ApiDocument, ImportError> {
        let text = tokio::fs::read_to_string(path).await?;
        tracing::debug!(path = %path.display(), bytes = text.len(), "read API description");
        self.parse(&text)
    }

    /// Parses a document from JSON or YAML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not JSON/YAML, is not an OpenAPI 3 or
    /// Swagger 2 document, or has no `paths`.
    pub fn parse(&self, text: &str) -> Result<ApiDocument, ImportError> {
        let root: Value = match serde_json::from_str(text) {
            Ok(value) => value,
            Err(_) => serde_yaml::from_str(text)
                .map_err(|e| ImportError::InvalidDocument(e.to_string()))?,
        };
        self.parse_value(&root)
    }

    /// Parses an already decoded document.
    ///
    /// # Errors
    ///
    /// See [`OpenApiImporter::parse`].
    pub fn parse_value(&self, root: &Value) -> Result<ApiDocument, ImportError> {
        let spec_version = detect_version(root)?;
        let paths = root
            .get("paths")
            .and_then(Value::as_object)
            .ok_or(ImportError::MissingPaths)?;

        let mut endpoints = Vec::new();
        for (path, item) in paths {
            let item = follow_ref(item, root);
            let shared = item.get("parameters").and_then(Value::as_array);
            for method in HttpMethod::openapi_order() {
                let Some(operation) = item.get(method.openapi_key()) else {
                    continue;
                };
                endpoints.push(parse_operation(
                    *method,
                    path,
                    follow_ref(operation, root),
                    shared,
                    root,
                    spec_version,
                ));
            }
        }

        let info = root.get("info");
        let document = ApiDocument {
            title: string_at(info, "title").unwrap_or_default(),
            version: string_at(info, "version").unwrap_or_default(),
            spec_version,
            servers: servers(root, spec_version),
            endpoints,
        };

        tracing::info!(
            title = %document.title,
            endpoints = document.endpoints.len(),
            "imported API description"
        );
        Ok(document)
    }
}

fn detect_version(root: &Value) -> Result<SpecVersion, ImportError> {
    if let Some(version) = root.get("openapi") {
        let version = version_string(version);
        return if version.starts_with("3.") {
            Ok(SpecVersion::OpenApi3)
        } else {
            Err(ImportError::UnsupportedVersion(format!("openapi {version}")))
        };
    }
    if let Some(version) = root.get("swagger") {
        let version = version_string(version);
        return if version.starts_with('2') {
            Ok(SpecVersion::Swagger2)
        } else {
            Err(ImportError::UnsupportedVersion(format!("swagger {version}")))
        };
    }
    Err(ImportError::UnsupportedVersion(
        "missing openapi or swagger field".to_string(),
    ))
}

/// YAML reads an unquoted `2.0` as a number.
fn version_string(value: &Value) -> String {
    value
        .as_str()
        .map_or_else(|| value.to_string(), String::from)
}

fn string_at(value: Option<&Value>, key: &str) -> Option<String> {
    value
        .and_then(|v| v.get(key))
        .and_then(Value::as_str)
        .map(String::from)
}

fn servers(root: &Value, spec_version: SpecVersion) -> Vec<String> {
    match spec_version {
        SpecVersion::OpenApi3 => root
            .get("servers")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(|s| s.get("url").and_then(Value::as_str))
            .map(|url| url.trim_end_matches('/').to_string())
            .collect(),
        SpecVersion::Swagger2 => {
            let Some(host) = root.get("host").and_then(Value::as_str) else {
                return Vec::new();
            };
            let base_path = root
                .get("basePath")
                .and_then(Value::as_str)
                .unwrap_or("")
                .trim_end_matches('/');
            let schemes: Vec<&str> = root
                .get("schemes")
                .and_then(Value::as_array)
                .map(|s| s.iter().filter_map(Value::as_str).collect())
                .unwrap_or_default();
            let schemes = if schemes.is_empty() { vec!["https"] } else { schemes };
            schemes
                .into_iter()
                .map(|scheme| format!("{scheme}://{host}{base_path}"))
                .collect()
        }
    }
}

fn parse_operation(
    method: HttpMethod,
    path: &str,
    operation: &Value,
    shared: Option<&Vec<Value>>,
    root: &Value,
    spec_version: SpecVersion,
) -> Endpoint {
    let declared = operation.get("parameters").and_then(Value::as_array);
    let resolved: Vec<Value> = shared
        .into_iter()
        .chain(declared)
        .flatten()
        .map(|param| resolve_refs(param, root))
        .collect();

    // Operation parameters override path-level ones with the same name and location.
    let mut merged: IndexMap<(String, String), &Value> = IndexMap::new();
    for param in &resolved {
        let name = param.get("name").and_then(Value::as_str).unwrap_or_default();
        let location = param.get("in").and_then(Value::as_str).unwrap_or_default();
        merged.insert((name.to_string(), location.to_string()), param);
    }

    let mut parameters = Vec::new();
    let mut body_param = None;
    for ((name, location), param) in &merged {
        if location == "body" {
            body_param = Some(*param);
            continue;
        }
        match location.parse::<ParameterLocation>() {
            Ok(location) => parameters.push(parse_parameter(name, location, param, spec_version)),
            Err(e) => tracing::debug!(%path, parameter = %name, error = %e, "skipping parameter"),
        }
    }

    let request_body = match spec_version {
        SpecVersion::OpenApi3 => operation
            .get("requestBody")
            .map(|body| resolve_refs(body, root))
            .as_ref()
            .and_then(parse_request_body),
        SpecVersion::Swagger2 => body_param.map(|param| RequestBodySpec {
            required: param.get("required").and_then(Value::as_bool).unwrap_or(false),
            content_type: operation
                .get("consumes")
                .and_then(Value::as_array)
                .and_then(|c| c.first())
                .and_then(Value::as_str)
                .unwrap_or(JSON_MEDIA_TYPE)
                .to_string(),
            schema: param.get("schema").cloned(),
        }),
    };

    let responses: IndexMap<String, String> = operation
        .get("responses")
        .and_then(Value::as_object)
        .map(|responses| {
            responses
                .iter()
                .map(|(status, response)| {
                    let response = follow_ref(response, root);
                    let description = string_at(Some(response), "description").unwrap_or_default();
                    (status.clone(), description)
                })
                .collect()
        })
        .unwrap_or_default();

    Endpoint {
        path: path.to_string(),
        method,
        summary: string_at(Some(operation), "summary"),
        description: string_at(Some(operation), "description"),
        operation_id: string_at(Some(operation), "operationId"),
        tags: operation
            .get("tags")
            .and_then(Value::as_array)
            .map(|tags| tags.iter().filter_map(Value::as_str).map(String::from).collect())
            .unwrap_or_default(),
        parameters,
        request_body,
        responses,
    }
}

fn parse_parameter(
    name: &str,
    location: ParameterLocation,
    param: &Value,
    spec_version: SpecVersion,
) -> Parameter {
    let schema = match spec_version {
        SpecVersion::OpenApi3 => param.get("schema").cloned(),
        // Swagger 2 puts type information on the parameter itself.
        SpecVersion::Swagger2 => param.get("type").map(|ty| {
            let mut schema = Map::new();
            schema.insert("type".to_string(), ty.clone());
            for key in ["format", "items", "enum", "default"] {
                if let Some(value) = param.get(key) {
                    schema.insert(key.to_string(), value.clone());
                }
            }
            Value::Object(schema)
        }),
    };

    Parameter {
        name: name.to_string(),
        location,
        required: location == ParameterLocation::Path
            || param.get("required").and_then(Value::as_bool).unwrap_or(false),
        description: string_at(Some(param), "description"),
        schema,
    }
}

fn parse_request_body(body: &Value) -> Option<RequestBodySpec> {
    let content = body.get("content").and_then(Value::as_object)?;
    let (content_type, media) = content
        .get_key_value(JSON_MEDIA_TYPE)
        .or_else(|| content.iter().next())?;
    Some(RequestBodySpec {
        required: body.get("required").and_then(Value::as_bool).unwrap_or(false),
        content_type: content_type.clone(),
        schema: media.get("schema").cloned(),
    })
}

/// Follows a chain of local `$ref` pointers without inlining anything below.
fn follow_ref<'a>(mut value: &'a Value, root: &'a Value) -> &'a Value {
    for _ in 0..MAX_REF_DEPTH {
        let Some(next) = local_ref(value).and_then(|target| root.pointer(target)) else {
            return value;
        };
        value = next;
    }
    value
}

fn local_ref(value: &Value) -> Option<&str> {
    value
        .get("$ref")
        .and_then(Value::as_str)
        .and_then(|r| r.strip_prefix('#'))
}

/// Returns `value` with every local `$ref` replaced by its target.
///
/// External and unresolvable references are kept as-is. A reference to a
/// pointer already being expanded, or nested deeper than
/// [`MAX_REF_DEPTH`], becomes an empty object.
fn resolve_refs(value: &Value, root: &Value) -> Value {
    resolve_refs_within(value, root, &mut Vec::new())
}

fn resolve_refs_within<'a>(value: &'a Value, root: &'a Value, active: &mut Vec<&'a str>) -> Value {
    match value {
        Value::Object(map) => {
            if let Some(target) = local_ref(value) {
                let Some(resolved) = root.pointer(target) else {
                    tracing::warn!(reference = target, "unresolvable $ref");
                    return value.clone();
                };
                if active.contains(&target) || active.len() >= MAX_REF_DEPTH {
                    tracing::debug!(reference = target, "recursive $ref left empty");
                    return Value::Object(Map::new());
                }
                active.push(target);
                let inlined = resolve_refs_within(resolved, root, active);
                active.pop();
                return inlined;
            }
            Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), resolve_refs_within(v, root, active)))
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| resolve_refs_within(item, root, active))
                .collect(),
        ),
        other => other.clone(),
    }
}
