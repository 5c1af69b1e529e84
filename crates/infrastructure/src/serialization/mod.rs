//! Deterministic JSON serialization for the `.apiforge` workspace files.
//!
//! Written files use 2-space indentation, a trailing newline and the
//! field order of the domain types, so they diff cleanly under Git.

mod json;

pub use json::*;
