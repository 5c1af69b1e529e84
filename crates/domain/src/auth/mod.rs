//! Authentication domain types and resolution

mod resolver;
mod types;

pub use resolver::{
    AuthResolver, DEFAULT_API_KEY_HEADER, DEFAULT_API_KEY_PARAM, ResolvedAuth, resolve_auth_header,
};
pub use types::{ApiKeyLocation, AuthDescriptor, BasicCredentials, StoredAuth, effective_auth};
