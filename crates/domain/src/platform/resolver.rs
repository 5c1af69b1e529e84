//! Platform profile resolution.
//!
//! Precedence (first match wins, tiers are never merged):
//! 1. The schema's explicit `platform_config`
//! 2. Built-in detection rules over the environment name and base URL
//! 3. The generic profile

use crate::environment::Environment;
use crate::schema::Schema;

use super::profile::PlatformProfile;

/// A single detection rule: when `matches` accepts the lowercased
/// environment name or base URL, `profile` is selected.
#[derive(Debug, Clone, Copy)]
pub struct ProfileRule {
    /// Predicate over a lowercased name or URL.
    pub matches: fn(&str) -> bool,
    /// Builds the profile selected by this rule.
    pub profile: fn() -> PlatformProfile,
}

static BUILTIN_RULES: &[ProfileRule] = &[
    ProfileRule {
        matches: |s| s.contains("kibana"),
        profile: PlatformProfile::kibana,
    },
    ProfileRule {
        matches: |s| s.contains("elastic") || s.contains("opensearch") || s.contains(":9200"),
        profile: PlatformProfile::elasticsearch,
    },
];

/// Built-in detection rules in priority order.
///
/// Kibana is checked first since Kibana hosts are frequently named after
/// the Elastic stack they front. New platforms are added by appending rules.
#[must_use]
pub fn builtin_rules() -> &'static [ProfileRule] {
    BUILTIN_RULES
}

/// Selects the platform profile for a request.
///
/// Pure and deterministic: identical inputs always produce identical
/// profiles. Missing inputs fall through to the generic profile.
#[must_use]
pub fn resolve_profile(schema: Option<&Schema>, environment: Option<&Environment>) -> PlatformProfile {
    if let Some(config) = schema.and_then(|s| s.platform_config.as_ref()) {
        return config.clone();
    }

    if let Some(environment) = environment {
        let name = environment.name.to_lowercase();
        let base_url = environment.base_url.to_lowercase();
        if let Some(rule) = builtin_rules()
            .iter()
            .find(|rule| (rule.matches)(&name) || (rule.matches)(&base_url))
        {
            return (rule.profile)();
        }
    }

    PlatformProfile::generic()
}
