//! Platform profiles and their auto-detection.

mod profile;
mod resolver;

pub use profile::{AuthFormatConfig, CodeGenHints, PlatformProfile, SslConfig};
pub use resolver::{ProfileRule, builtin_rules, resolve_profile};
