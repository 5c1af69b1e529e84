//! API description import
//!
//! Reads OpenAPI 3 and Swagger 2 documents into domain endpoints.

pub mod openapi;

pub use openapi::{ApiDocument, ImportError, OpenApiImporter, SpecVersion};
