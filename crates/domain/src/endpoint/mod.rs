//! Endpoint definitions derived from OpenAPI documents

mod method;
mod model;

pub use method::HttpMethod;
pub use model::{Endpoint, Parameter, ParameterLocation, RequestBodySpec};
