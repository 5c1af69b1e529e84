//! Apiforge Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer, the OpenAPI importer and the
//! code renderers.

pub mod codegen;
pub mod import;
pub mod persistence;
pub mod serialization;

pub use codegen::{CodeGenerator, generate_code, render};
pub use import::{ApiDocument, ImportError, OpenApiImporter, SpecVersion};
pub use persistence::{
    APIFORGE_DIR, EnvSecretsRepository, FallbackSecretsRepository, FileSecretsRepository,
    FileWorkspaceRepository, SECRET_ENV_PREFIX, SettingsError, SettingsRepository,
    TokioFileSystem,
};
pub use serialization::{SerializationError, from_json_bytes, to_json_stable, to_json_stable_bytes};
