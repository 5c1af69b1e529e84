//! Request construction: descriptor, builder and body placeholders

mod builder;
mod descriptor;
mod placeholder;

pub use builder::{RequestBuilder, build_request};
pub use descriptor::{BasicAuthStyle, RequestDescriptor};
pub use placeholder::placeholder_body;
