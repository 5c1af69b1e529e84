//! Request construction.
//!
//! Combines an endpoint, a resolved environment and an optional schema into a
//! [`RequestDescriptor`]. No network I/O happens here.

use indexmap::IndexMap;
use url::form_urlencoded;

use crate::auth::{AuthResolver, ResolvedAuth};
use crate::endpoint::Endpoint;
use crate::environment::Environment;
use crate::platform::resolve_profile;
use crate::schema::Schema;

use super::descriptor::RequestDescriptor;
use super::placeholder::placeholder_body;

/// Builds request descriptors.
#[derive(Debug, Clone, Default)]
pub struct RequestBuilder {
    auth_resolver: AuthResolver,
}

impl RequestBuilder {
    /// Creates a builder using the given authentication resolver.
    #[must_use]
    pub const fn new(auth_resolver: AuthResolver) -> Self {
        Self { auth_resolver }
    }

    /// Builds the descriptor for `endpoint` against `environment`.
    ///
    /// `base_url` and `path` are concatenated as-is; callers keep the base URL
    /// free of a trailing slash and the path prefixed with `/`.
    #[must_use]
    pub fn build(
        &self,
        endpoint: &Endpoint,
        environment: &Environment,
        schema: Option<&Schema>,
    ) -> RequestDescriptor {
        let profile = resolve_profile(schema, Some(environment));
        let mut url = format!("{}{}", environment.base_url, endpoint.path);

        let mut headers = profile.required_headers.clone();
        for (name, value) in &environment.custom_headers {
            if find_header(&headers, name).is_some() {
                tracing::debug!(header = %name, "custom header shadowed by platform header");
                continue;
            }
            headers.insert(name.clone(), value.clone());
        }

        let body = endpoint.method.has_body().then(|| {
            if find_header(&headers, "Content-Type").is_none() {
                headers.insert("Content-Type".to_string(), "application/json".to_string());
            }
            placeholder_body(endpoint.body_schema())
        });

        let mut basic_auth = None;
        let mut auth_header = None;
        match self.auth_resolver.resolve(&environment.auth, &profile) {
            Some(ResolvedAuth::Header { name, value }) => {
                if let Some(index) = find_header(&headers, &name) {
                    headers.shift_remove_index(index);
                }
                headers.insert(name.clone(), value);
                auth_header = Some(name);
            }
            Some(ResolvedAuth::QueryParam { name, value }) => append_query(&mut url, &name, &value),
            Some(ResolvedAuth::Basic(credentials)) => {
                headers.retain(|k, _| !k.eq_ignore_ascii_case("Authorization"));
                basic_auth = Some(credentials);
            }
            None => {}
        }

        tracing::debug!(
            method = %endpoint.method,
            path = %endpoint.path,
            environment = %environment.name,
            profile = %profile.id,
            auth = environment.auth.kind(),
            "built request descriptor"
        );

        RequestDescriptor {
            method: endpoint.method,
            url,
            headers,
            body,
            basic_auth,
            auth_header,
            hints: profile.advisory_lines(),
        }
    }
}

/// Builds a request descriptor with the default authentication resolver.
#[must_use]
pub fn build_request(
    endpoint: &Endpoint,
    environment: &Environment,
    schema: Option<&Schema>,
) -> RequestDescriptor {
    RequestBuilder::default().build(endpoint, environment, schema)
}

fn find_header(headers: &IndexMap<String, String>, name: &str) -> Option<usize> {
    headers.keys().position(|k| k.eq_ignore_ascii_case(name))
}

/// Appends `name=value` with `?`, or `&` when a query string already exists.
fn append_query(url: &mut String, name: &str, value: &str) {
    let pair = form_urlencoded::Serializer::new(String::new())
        .append_pair(name, value)
        .finish();
    if !(url.ends_with('?') || url.ends_with('&')) {
        url.push(if url.contains('?') { '&' } else { '?' });
    }
    url.push_str(&pair);
}
