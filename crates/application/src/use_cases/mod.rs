//! Application use cases (business logic orchestration).

mod prepare_request;
mod resolve_environment;

pub use prepare_request::{PrepareRequest, PreparedRequest};
pub use resolve_environment::{ResolveEnvironment, ResolveEnvironmentError, ResolvedTarget};
