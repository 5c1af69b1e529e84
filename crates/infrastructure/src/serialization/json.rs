//! JSON serialization helpers for deterministic output.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Byte order mark some editors prepend to UTF-8 files.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Error type for serialization operations.
#[derive(Debug, thiserror::Error)]
pub enum SerializationError {
    /// JSON serialization failed.
    #[error("JSON serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// JSON deserialization failed.
    #[error("JSON deserialization failed: {0}")]
    Deserialize(serde_json::Error),

    /// UTF-8 encoding error.
    #[error("UTF-8 encoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Serializes a value to deterministic JSON.
///
/// Output format:
/// - 2-space indentation
/// - Trailing newline
/// - Keys in declaration order (`BTreeMap` fields come out sorted)
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json_stable<T: Serialize>(value: &T) -> Result<String, SerializationError> {
    Ok(String::from_utf8(to_json_stable_bytes(value)?)?)
}

/// Serializes a value to deterministic JSON bytes for direct file writing.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json_stable_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, SerializationError> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"  ");
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;
    buffer.push(b'\n');
    Ok(buffer)
}

/// Deserializes JSON from bytes, ignoring a leading UTF-8 BOM.
///
/// # Errors
///
/// Returns an error if the JSON is invalid or doesn't match the expected type.
pub fn from_json_bytes<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, SerializationError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    serde_json::from_slice(bytes).map_err(SerializationError::Deserialize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use apiforge_domain::{SchemaConfig, SecretsStore, StoredAuth, WorkspaceConfig};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_stable_serialization_has_trailing_newline() {
        let json = to_json_stable(&WorkspaceConfig::new()).expect("serialization should work");
        assert!(json.ends_with("}\n"));
    }

    #[test]
    fn test_secret_keys_are_sorted() {
        let mut store = SecretsStore::new();
        store.set_secret("zebra", "1");
        store.set_secret("apple", "2");

        let json = to_json_stable(&store).expect("serialization should work");
        let apple = json.find("apple").expect("apple should be in json");
        let zebra = json.find("zebra").expect("zebra should be in json");
        assert!(apple < zebra);
        assert!(json.contains("\n    \"apple\": \"2\""));
    }

    #[test]
    fn test_workspace_roundtrip() {
        let mut schema = SchemaConfig::new("s1", "Users API");
        schema.default_auth = Some(StoredAuth::Bearer {
            secret_key: "users-token".to_string(),
        });
        let mut original = WorkspaceConfig::new();
        original.schemas.push(schema);

        let bytes = to_json_stable_bytes(&original).expect("serialization should work");
        let restored: WorkspaceConfig = from_json_bytes(&bytes).expect("deserialization should work");

        assert_eq!(original, restored);
    }

    #[test]
    fn test_from_json_bytes_skips_bom() {
        let mut bytes = UTF8_BOM.to_vec();
        bytes.extend_from_slice(br#"{"secrets": {"k": "v"}}"#);

        let store: SecretsStore = from_json_bytes(&bytes).expect("deserialization should work");
        assert_eq!(store.get_secret("k"), Some("v"));
        assert_eq!(store.schema_version, 1);
    }

    #[test]
    fn test_from_json_bytes_invalid() {
        let result: Result<SecretsStore, _> = from_json_bytes(br#"{"secrets": }"#);
        assert!(matches!(result, Err(SerializationError::Deserialize(_))));
    }
}
