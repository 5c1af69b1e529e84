//! JSON body placeholders generated from request-body schemas.

use serde_json::{Map, Value};

/// Nesting limit for `allOf` chains.
const MAX_DEPTH: usize = 8;

/// Builds a pretty-printed JSON placeholder for a request-body schema.
///
/// Every required top-level property is emitted with its declared
/// `default`, or a zero value for its type. Anything that cannot be
/// represented degrades to `{}`.
#[must_use]
pub fn placeholder_body(schema: Option<&Value>) -> String {
    let mut fields = Map::new();
    if let Some(schema) = schema {
        collect_required(schema, &mut fields, 0);
    }
    serde_json::to_string_pretty(&Value::Object(fields)).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "body placeholder not serializable");
        "{}".to_string()
    })
}

fn collect_required(schema: &Value, fields: &mut Map<String, Value>, depth: usize) {
    if depth > MAX_DEPTH {
        return;
    }
    let Some(schema) = schema.as_object() else {
        return;
    };

    if let Some(members) = schema.get("allOf").and_then(Value::as_array) {
        for member in members {
            collect_required(member, fields, depth + 1);
        }
    }

    let properties = schema.get("properties").and_then(Value::as_object);
    let required = schema
        .get("required")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(Value::as_str);

    for name in required {
        let property = properties.and_then(|p| p.get(name));
        fields.insert(name.to_string(), zero_value(property));
    }
}

fn zero_value(schema: Option<&Value>) -> Value {
    let Some(schema) = schema else {
        return Value::String(String::new());
    };
    if let Some(default) = schema.get("default") {
        return default.clone();
    }

    match schema_type(schema) {
        Some("integer" | "number") => Value::from(0),
        Some("boolean") => Value::Bool(false),
        Some("array") => Value::Array(Vec::new()),
        Some("object") => Value::Object(Map::new()),
        None if schema.get("properties").is_some() => Value::Object(Map::new()),
        _ => Value::String(String::new()),
    }
}

/// The declared type; for type arrays the first non-null entry.
fn schema_type(schema: &Value) -> Option<&str> {
    match schema.get("type")? {
        Value::String(t) => Some(t.as_str()),
        Value::Array(types) => types
            .iter()
            .filter_map(Value::as_str)
            .find(|t| *t != "null"),
        _ => None,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn parse(body: &str) -> Value {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn test_no_schema_is_empty_object() {
        assert_eq!(placeholder_body(None), "{}");
    }

    #[test]
    fn test_required_properties_get_zero_values() {
        let schema = json!({
            "type": "object",
            "required": ["name", "age", "active", "tags", "meta", "note"],
            "properties": {
                "name": {"type": "string"},
                "age": {"type": "integer"},
                "active": {"type": "boolean"},
                "tags": {"type": "array", "items": {"type": "string"}},
                "meta": {"type": "object"},
                "optional": {"type": "string"}
            }
        });
        assert_eq!(
            parse(&placeholder_body(Some(&schema))),
            json!({"name": "", "age": 0, "active": false, "tags": [], "meta": {}, "note": ""})
        );
    }

    #[test]
    fn test_default_wins_over_zero_value() {
        let schema = json!({
            "required": ["status"],
            "properties": {"status": {"type": "string", "default": "available"}}
        });
        assert_eq!(
            parse(&placeholder_body(Some(&schema))),
            json!({"status": "available"})
        );
    }

    #[test]
    fn test_nullable_type_array() {
        let schema = json!({
            "required": ["count"],
            "properties": {"count": {"type": ["null", "number"]}}
        });
        assert_eq!(parse(&placeholder_body(Some(&schema))), json!({"count": 0}));
    }

    #[test]
    fn test_all_of_members_are_merged() {
        let schema = json!({
            "allOf": [
                {"required": ["id"], "properties": {"id": {"type": "integer"}}},
                {"required": ["name"], "properties": {"name": {"type": "string"}}}
            ]
        });
        assert_eq!(
            parse(&placeholder_body(Some(&schema))),
            json!({"id": 0, "name": ""})
        );
    }

    #[test]
    fn test_unrepresentable_schema_degrades_to_empty_object() {
        assert_eq!(placeholder_body(Some(&json!(true))), "{}");
        assert_eq!(placeholder_body(Some(&json!({"type": "array"}))), "{}");
    }
}
