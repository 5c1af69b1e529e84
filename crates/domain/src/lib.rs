//! Apiforge Domain - Core types and the request resolution engine
//!
//! This crate defines the domain model (environments, schemas, endpoints,
//! authentication) and the pure engine that turns them into request
//! descriptors. All types here are pure Rust with no I/O dependencies.

pub mod auth;
pub mod codegen;
pub mod endpoint;
pub mod environment;
pub mod error;
pub mod id;
pub mod platform;
pub mod request;
pub mod schema;
pub mod settings;
pub mod workspace;

pub use auth::{
    ApiKeyLocation, AuthDescriptor, AuthResolver, BasicCredentials, ResolvedAuth, StoredAuth,
    effective_auth, resolve_auth_header,
};
pub use codegen::{CodeGenOptions, CodeSnippet, RenderTarget};
pub use endpoint::{Endpoint, HttpMethod, Parameter, ParameterLocation, RequestBodySpec};
pub use environment::{Environment, EnvironmentConfig, SecretsStore};
pub use error::{DomainError, DomainResult};
pub use id::generate_id;
pub use platform::{PlatformProfile, resolve_profile};
pub use request::{BasicAuthStyle, RequestBuilder, RequestDescriptor, build_request};
pub use schema::{GroupConfig, Schema, SchemaConfig};
pub use settings::GeneratorSettings;
pub use workspace::{EnvironmentLocation, WorkspaceConfig};
