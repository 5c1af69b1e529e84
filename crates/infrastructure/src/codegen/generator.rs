//! Renderers turning one request descriptor into runnable snippets.
//!
//! Every renderer reads the same [`RequestDescriptor`]; none of them
//! recomputes headers, authentication or the body.

use apiforge_domain::codegen::{CodeGenOptions, CodeSnippet, RenderTarget};
use apiforge_domain::request::{BasicAuthStyle, RequestDescriptor};
use apiforge_domain::{Endpoint, Environment, HttpMethod, Schema, build_request};

/// Generate code for a prepared request in the target of `options`.
#[must_use]
pub fn generate_code(
    endpoint: &Endpoint,
    descriptor: &RequestDescriptor,
    options: &CodeGenOptions,
) -> CodeSnippet {
    let generator = CodeGenerator::new(options);
    generator.generate(endpoint, descriptor)
}

/// Build the request for `endpoint` and render it in one step.
#[must_use]
pub fn render(
    endpoint: &Endpoint,
    environment: &Environment,
    schema: Option<&Schema>,
    options: &CodeGenOptions,
) -> CodeSnippet {
    let descriptor = build_request(endpoint, environment, schema);
    generate_code(endpoint, &descriptor, options)
}

/// Code generator that produces code snippets from request descriptors.
pub struct CodeGenerator<'a> {
    options: &'a CodeGenOptions,
}

impl<'a> CodeGenerator<'a> {
    /// Create a new code generator with the given options.
    #[must_use]
    pub const fn new(options: &'a CodeGenOptions) -> Self {
        Self { options }
    }

    /// Generate code for the given descriptor.
    #[must_use]
    pub fn generate(&self, endpoint: &Endpoint, descriptor: &RequestDescriptor) -> CodeSnippet {
        match self.options.target {
            RenderTarget::Curl => self.generate_curl(endpoint, descriptor),
            RenderTarget::HttpFile => self.generate_http_file(endpoint, descriptor),
            RenderTarget::Python => self.generate_python(endpoint, descriptor),
            RenderTarget::JavaScript => self.generate_javascript(endpoint, descriptor),
            RenderTarget::PowerShell => self.generate_powershell(endpoint, descriptor),
            RenderTarget::Ansible => self.generate_ansible(endpoint, descriptor),
        }
    }

    /// Title, description and platform hints, one per line.
    fn comment_lines(&self, endpoint: &Endpoint, descriptor: &RequestDescriptor) -> Vec<String> {
        if !self.options.include_comments {
            return Vec::new();
        }
        let mut lines = vec![endpoint.title()];
        if let Some(description) = endpoint.description.as_deref() {
            lines.extend(
                description
                    .lines()
                    .map(str::trim)
                    .filter(|l| !l.is_empty())
                    .map(String::from),
            );
        }
        lines.extend(descriptor.hints.iter().cloned());
        lines
    }

    fn comments(&self, endpoint: &Endpoint, descriptor: &RequestDescriptor, prefix: &str) -> String {
        self.comment_lines(endpoint, descriptor)
            .iter()
            .map(|line| format!("{prefix} {line}\n"))
            .collect()
    }

    fn generate_curl(&self, endpoint: &Endpoint, descriptor: &RequestDescriptor) -> CodeSnippet {
        // `-X HEAD` would wait for a body; `-I` sends HEAD and prints headers.
        let method = if descriptor.method == HttpMethod::Head {
            "-I".to_string()
        } else {
            format!("-X {}", descriptor.method)
        };
        let mut parts = vec![format!("curl {method} {}", shell_quote(&descriptor.url))];

        for (name, value) in descriptor.effective_headers(BasicAuthStyle::Native) {
            parts.push(format!("-H {}", shell_quote(&format!("{name}: {value}"))));
        }

        if let Some(credentials) = &descriptor.basic_auth {
            parts.push(format!(
                "-u {}",
                shell_quote(&format!("{}:{}", credentials.username, credentials.password))
            ));
        }

        if let Some(body) = &descriptor.body {
            parts.push(format!("-d '{}'", body.replace('\'', "'\\''")));
        }

        let command = if self.options.pretty_format {
            parts.join(" \\\n  ")
        } else {
            parts.join(" ")
        };

        let code = format!("{}{command}", self.comments(endpoint, descriptor, "#"));
        CodeSnippet::new(code, RenderTarget::Curl)
    }

    fn generate_http_file(&self, endpoint: &Endpoint, descriptor: &RequestDescriptor) -> CodeSnippet {
        let mut code = format!("### {}\n", endpoint.title());
        if self.options.include_comments {
            for hint in &descriptor.hints {
                code.push_str(&format!("# {hint}\n"));
            }
        }

        code.push_str(&format!("{} {}\n", descriptor.method, descriptor.url));
        for (name, value) in descriptor.effective_headers(BasicAuthStyle::Header) {
            code.push_str(&format!("{name}: {value}\n"));
        }

        if let Some(body) = &descriptor.body {
            code.push('\n');
            code.push_str(body);
            code.push('\n');
        }

        CodeSnippet::new(code, RenderTarget::HttpFile)
    }

    fn generate_python(&self, endpoint: &Endpoint, descriptor: &RequestDescriptor) -> CodeSnippet {
        let indent = self.options.indent();
        let headers = descriptor.effective_headers(BasicAuthStyle::Header);

        let mut code = self.comments(endpoint, descriptor, "#");
        code.push_str(&format!("url = {}\n", quoted(&descriptor.url)));

        if !headers.is_empty() {
            code.push_str("headers = {\n");
            for (name, value) in &headers {
                code.push_str(&format!("{indent}{}: {},\n", quoted(name), quoted(value)));
            }
            code.push_str("}\n");
        }

        if let Some(body) = &descriptor.body {
            let escaped = body.replace('\\', "\\\\").replace("\"\"\"", "\\\"\\\"\\\"");
            code.push_str(&format!("payload = \"\"\"{escaped}\"\"\"\n"));
        }

        code.push_str(&format!(
            "\nresponse = requests.request({}, url",
            quoted(descriptor.method.as_str())
        ));
        if !headers.is_empty() {
            code.push_str(", headers=headers");
        }
        if descriptor.body.is_some() {
            code.push_str(", data=payload");
        }
        code.push_str(")\n\n");
        code.push_str("print(response.status_code)\nprint(response.text)");

        CodeSnippet::new(code, RenderTarget::Python).with_import("import requests")
    }

    fn generate_javascript(&self, endpoint: &Endpoint, descriptor: &RequestDescriptor) -> CodeSnippet {
        let indent = self.options.indent();
        let headers = descriptor.effective_headers(BasicAuthStyle::Header);

        let mut code = self.comments(endpoint, descriptor, "//");
        code.push_str(&format!(
            "const response = await fetch({}, {{\n",
            quoted(&descriptor.url)
        ));
        code.push_str(&format!(
            "{indent}method: {},\n",
            quoted(descriptor.method.as_str())
        ));

        if !headers.is_empty() {
            code.push_str(&format!("{indent}headers: {{\n"));
            for (name, value) in &headers {
                code.push_str(&format!(
                    "{indent}{indent}{}: {},\n",
                    quoted(name),
                    quoted(value)
                ));
            }
            code.push_str(&format!("{indent}}},\n"));
        }

        if let Some(body) = &descriptor.body {
            let escaped = body
                .replace('\\', "\\\\")
                .replace('`', "\\`")
                .replace("${", "\\${");
            code.push_str(&format!("{indent}body: `{escaped}`,\n"));
        }

        code.push_str("});\n\n");
        code.push_str("const data = await response.text();\nconsole.log(response.status, data);");

        CodeSnippet::new(code, RenderTarget::JavaScript)
    }

    fn generate_powershell(&self, endpoint: &Endpoint, descriptor: &RequestDescriptor) -> CodeSnippet {
        let indent = self.options.indent();
        let mut headers = descriptor.effective_headers(BasicAuthStyle::Header);
        // Invoke-RestMethod rejects Content-Type in -Headers on Windows PowerShell.
        let content_type_key = headers
            .keys()
            .find(|k| k.eq_ignore_ascii_case("Content-Type"))
            .cloned();
        let content_type = content_type_key.and_then(|k| headers.shift_remove(&k));

        let mut code = self.comments(endpoint, descriptor, "#");

        if !headers.is_empty() {
            code.push_str("$headers = @{\n");
            for (name, value) in &headers {
                code.push_str(&format!(
                    "{indent}{} = {}\n",
                    single_quote(name),
                    single_quote(value)
                ));
            }
            code.push_str("}\n");
        }

        if let Some(body) = &descriptor.body {
            code.push_str(&format!("$body = @'\n{body}\n'@\n"));
        }

        let mut call = format!(
            "\n$response = Invoke-RestMethod -Uri {} -Method {}",
            single_quote(&descriptor.url),
            descriptor.method
        );
        if !headers.is_empty() {
            call.push_str(" -Headers $headers");
        }
        if descriptor.body.is_some() {
            call.push_str(" -Body $body");
        }
        if let Some(content_type) = content_type {
            call.push_str(&format!(" -ContentType {}", single_quote(&content_type)));
        }
        code.push_str(&call);
        code.push_str("\n$response | ConvertTo-Json -Depth 10");

        CodeSnippet::new(code, RenderTarget::PowerShell)
    }

    fn generate_ansible(&self, endpoint: &Endpoint, descriptor: &RequestDescriptor) -> CodeSnippet {
        // YAML nesting below is fixed at two spaces per level.
        let mut code = format!("- name: {}\n", quoted(&endpoint.title()));
        if self.options.include_comments {
            for hint in &descriptor.hints {
                code.push_str(&format!("  # {hint}\n"));
            }
        }

        code.push_str("  ansible.builtin.uri:\n");
        code.push_str(&format!("    url: {}\n", quoted(&descriptor.url)));
        code.push_str(&format!("    method: {}\n", descriptor.method));

        let headers = descriptor.effective_headers(BasicAuthStyle::Native);
        if !headers.is_empty() {
            code.push_str("    headers:\n");
            for (name, value) in &headers {
                code.push_str(&format!("      {}: {}\n", quoted(name), quoted(value)));
            }
        }

        if let Some(credentials) = &descriptor.basic_auth {
            code.push_str(&format!("    url_username: {}\n", quoted(&credentials.username)));
            code.push_str(&format!("    url_password: {}\n", quoted(&credentials.password)));
            code.push_str("    force_basic_auth: true\n");
        }

        if let Some(body) = &descriptor.body {
            code.push_str("    body_format: json\n");
            code.push_str("    body: |\n");
            for line in body.lines() {
                code.push_str(&format!("      {line}\n"));
            }
        }

        code.push_str("    return_content: true\n");
        code.push_str("  register: response");

        CodeSnippet::new(code, RenderTarget::Ansible)
    }
}

/// Double-quoted string literal valid in Python, JavaScript and YAML.
fn quoted(value: &str) -> String {
    serde_json::Value::from(value).to_string()
}

/// Double-quoted shell word; `$`, backquote, `"` and `\` are escaped.
fn shell_quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        if matches!(c, '"' | '\\' | '$' | '`') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

/// Single-quoted PowerShell string.
fn single_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use apiforge_domain::{AuthDescriptor, BasicCredentials, PlatformProfile};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn bearer_env() -> Environment {
        Environment::new("Test", "https://api.test.com", AuthDescriptor::bearer("abc123"))
    }

    fn basic_env() -> Environment {
        Environment::new("Test", "https://api.test.com", AuthDescriptor::basic("u", "p"))
    }

    fn users() -> Endpoint {
        Endpoint::new(HttpMethod::Get, "/users").with_summary("List users")
    }

    fn create_item() -> Endpoint {
        Endpoint::new(HttpMethod::Post, "/items").with_body_schema(json!({
            "type": "object",
            "required": ["name"],
            "properties": {"name": {"type": "string"}}
        }))
    }

    fn snippet(target: RenderTarget, endpoint: &Endpoint, env: &Environment) -> CodeSnippet {
        render(endpoint, env, None, &CodeGenOptions::for_target(target))
    }

    #[test]
    fn test_curl_bearer() {
        let code = snippet(RenderTarget::Curl, &users(), &bearer_env()).code;
        assert!(code.contains(r#"curl -X GET "https://api.test.com/users""#));
        assert!(code.contains(r#"-H "Authorization: Bearer abc123""#));
        assert!(code.starts_with("# List users\n"));
    }

    #[test]
    fn test_curl_basic_uses_user_flag() {
        let code = snippet(RenderTarget::Curl, &users(), &basic_env()).code;
        assert!(code.contains(r#"-u "u:p""#));
        assert!(!code.contains("Authorization"));
    }

    #[test]
    fn test_curl_single_line() {
        let options = CodeGenOptions {
            pretty_format: false,
            include_comments: false,
            ..CodeGenOptions::for_target(RenderTarget::Curl)
        };
        let code = render(&users(), &bearer_env(), None, &options).code;
        assert_eq!(
            code,
            r#"curl -X GET "https://api.test.com/users" -H "Authorization: Bearer abc123""#
        );
    }

    #[test]
    fn test_curl_escapes_body_quotes() {
        let endpoint = Endpoint::new(HttpMethod::Post, "/items").with_body_schema(json!({
            "type": "object",
            "required": ["q"],
            "properties": {"q": {"type": "string", "default": "it's"}}
        }));
        let code = snippet(RenderTarget::Curl, &endpoint, &bearer_env()).code;
        assert!(code.contains(r"it'\''s"));
    }

    #[test]
    fn test_curl_escapes_shell_metacharacters() {
        assert_eq!(shell_quote(r#"a"$b"#), r#""a\"\$b""#);
    }

    #[test]
    fn test_python_basic_header() {
        let snippet = snippet(RenderTarget::Python, &users(), &basic_env());
        assert!(snippet.code.contains(r#""Authorization": "Basic dTpw""#));
        assert!(snippet.imports.iter().any(|i| i == "import requests"));
        assert!(snippet.full_code().starts_with("import requests\n\n"));
    }

    #[test]
    fn test_python_body() {
        let code = snippet(RenderTarget::Python, &create_item(), &bearer_env()).code;
        assert!(code.contains("payload = \"\"\"{"));
        assert!(code.contains(r#"requests.request("POST", url, headers=headers, data=payload)"#));
    }

    #[test]
    fn test_javascript_fetch() {
        let code = snippet(RenderTarget::JavaScript, &create_item(), &bearer_env()).code;
        assert!(code.contains(r#"await fetch("https://api.test.com/items", {"#));
        assert!(code.contains(r#"method: "POST","#));
        assert!(code.contains(r#""Content-Type": "application/json","#));
        assert!(code.contains(r#""Authorization": "Bearer abc123","#));
        assert!(code.contains("body: `{"));
        assert!(code.starts_with("// POST /items\n"));
    }

    #[test]
    fn test_http_file_block() {
        let code = snippet(RenderTarget::HttpFile, &create_item(), &basic_env()).code;
        let expected = "### POST /items\n\
            POST https://api.test.com/items\n\
            Content-Type: application/json\n\
            Authorization: Basic dTpw\n\
            \n\
            {\n  \"name\": \"\"\n}\n";
        assert_eq!(code, expected);
    }

    #[test]
    fn test_powershell_moves_content_type() {
        let code = snippet(RenderTarget::PowerShell, &create_item(), &bearer_env()).code;
        assert!(code.contains("'Authorization' = 'Bearer abc123'"));
        assert!(!code.contains("'Content-Type' ="));
        assert!(code.contains("-Method POST -Headers $headers -Body $body -ContentType 'application/json'"));
        assert!(code.contains("$body = @'\n{"));
    }

    #[test]
    fn test_ansible_basic_is_native() {
        let code = snippet(RenderTarget::Ansible, &create_item(), &basic_env()).code;
        assert!(code.starts_with("- name: \"POST /items\"\n  ansible.builtin.uri:\n"));
        assert!(code.contains("    url_username: \"u\"\n    url_password: \"p\"\n    force_basic_auth: true\n"));
        assert!(code.contains("    body_format: json\n    body: |\n      {\n"));
        assert!(!code.contains("Authorization"));
    }

    #[test]
    fn test_platform_hints_become_comments() {
        let schema = Schema::new("s", "Search").with_platform_config(PlatformProfile::kibana());
        let env = Environment::new(
            "Kibana",
            "https://kb.example.com",
            AuthDescriptor::api_key_header("k", None),
        );
        let options = CodeGenOptions::for_target(RenderTarget::Curl);
        let code = render(&users(), &env, Some(&schema), &options).code;

        for hint in PlatformProfile::kibana().advisory_lines() {
            assert!(code.contains(&format!("# {hint}")));
        }
        assert!(code.contains(r#"-H "kbn-xsrf: true""#));
        assert!(code.contains(r#"-H "Authorization: ApiKey k""#));
    }

    #[test]
    fn test_comments_can_be_disabled() {
        let options = CodeGenOptions {
            include_comments: false,
            ..CodeGenOptions::for_target(RenderTarget::JavaScript)
        };
        let code = render(&users(), &bearer_env(), None, &options).code;
        assert!(code.starts_with("const response"));
    }

    #[test]
    fn test_curl_head_uses_head_flag() {
        let endpoint = Endpoint::new(HttpMethod::Head, "/users");
        let code = snippet(RenderTarget::Curl, &endpoint, &bearer_env()).code;
        assert!(code.contains(r#"curl -I "https://api.test.com/users""#));
        assert!(!code.contains("-X HEAD"));
    }

    #[test]
    fn test_basic_replaces_custom_authorization_in_every_target() {
        let env = basic_env().with_header("Authorization", "Token stale");

        let curl = snippet(RenderTarget::Curl, &users(), &env).code;
        let python = snippet(RenderTarget::Python, &users(), &env).code;
        let ansible = snippet(RenderTarget::Ansible, &users(), &env).code;

        for code in [&curl, &python, &ansible] {
            assert!(!code.contains("Token stale"), "stale credential in:\n{code}");
        }
        assert!(curl.contains(r#"-u "u:p""#));
        assert!(python.contains(r#""Authorization": "Basic dTpw""#));
        assert!(ansible.contains("    url_username: \"u\"\n"));
        assert!(!ansible.contains("    headers:\n"));
    }

    /// URL, header list and `-u` credentials of a pretty-printed curl command.
    fn parse_curl(code: &str) -> (String, Vec<(String, String)>, Option<String>) {
        let mut url = String::new();
        let mut headers = Vec::new();
        let mut user = None;
        for part in code.split(" \\\n  ") {
            let part = part.lines().last().unwrap_or(part);
            if let Some(rest) = part.strip_prefix("curl ") {
                url = rest.split('"').nth(1).unwrap().to_string();
            } else if let Some(header) = part.strip_prefix("-H ") {
                let (name, value) = header.trim_matches('"').split_once(": ").unwrap();
                headers.push((name.to_string(), value.to_string()));
            } else if let Some(credentials) = part.strip_prefix("-u ") {
                user = Some(credentials.trim_matches('"').to_string());
            }
        }
        (url, headers, user)
    }

    /// URL and header list of a fetch call.
    fn parse_fetch(code: &str) -> (String, Vec<(String, String)>) {
        let url = code.split("fetch(\"").nth(1).unwrap().split('"').next().unwrap();
        let headers = code.split_once("headers: {\n").map_or_else(Vec::new, |(_, rest)| {
            rest.split_once("},").unwrap().0
                .lines()
                .filter(|l| !l.trim().is_empty())
                .map(|line| {
                    let (name, value) = line.trim().trim_end_matches(',').split_once(": ").unwrap();
                    (
                        serde_json::from_str::<String>(name).unwrap(),
                        serde_json::from_str::<String>(value).unwrap(),
                    )
                })
                .collect()
        });
        (url.to_string(), headers)
    }

    fn assert_curl_matches_fetch(endpoint: &Endpoint, env: &Environment) {
        let descriptor = build_request(endpoint, env, None);
        let curl = generate_code(endpoint, &descriptor, &CodeGenOptions::for_target(RenderTarget::Curl));
        let fetch = generate_code(
            endpoint,
            &descriptor,
            &CodeGenOptions::for_target(RenderTarget::JavaScript),
        );
        let (curl_url, mut curl_headers, user) = parse_curl(&curl.code);
        let (fetch_url, fetch_headers) = parse_fetch(&fetch.code);

        if let Some(user) = user {
            let (username, password) = user.split_once(':').unwrap();
            curl_headers.push((
                "Authorization".to_string(),
                BasicCredentials::new(username, password).header_value(),
            ));
        }

        assert_eq!(curl_url, descriptor.url);
        assert_eq!(fetch_url, descriptor.url);
        let names = |headers: &[(String, String)]| {
            let mut names: Vec<String> = headers.iter().map(|(n, _)| n.to_ascii_lowercase()).collect();
            names.sort();
            names
        };
        assert_eq!(names(&curl_headers), names(&fetch_headers));
        let authorization = |headers: &[(String, String)]| {
            headers
                .iter()
                .find(|(n, _)| n.eq_ignore_ascii_case("Authorization"))
                .map(|(_, v)| v.clone())
        };
        assert_eq!(authorization(&curl_headers), authorization(&fetch_headers));
        assert_eq!(authorization(&fetch_headers), descriptor.authorization_value());
    }

    #[test]
    fn test_curl_and_fetch_agree_on_kibana_request() {
        let endpoint = Endpoint::new(HttpMethod::Post, "/api/saved_objects?overwrite=true");
        let query_key = Environment::new(
            "Kibana",
            "https://kibana.local:5601",
            AuthDescriptor::api_key_query("k 1", "key"),
        )
        .with_header("X-Team", "search");
        let header_key = Environment::new(
            "Kibana",
            "https://kibana.local:5601",
            AuthDescriptor::api_key_header("k1", None),
        )
        .with_header("X-Team", "search");

        assert_curl_matches_fetch(&endpoint, &query_key);
        assert_curl_matches_fetch(&endpoint, &header_key);
    }

    #[test]
    fn test_curl_and_fetch_agree_on_basic_auth() {
        let env = basic_env().with_header("X-Team", "search");
        assert_curl_matches_fetch(&create_item(), &env);
        assert_curl_matches_fetch(&users(), &env);
    }

    #[test]
    fn test_all_targets_generate() {
        for target in RenderTarget::all() {
            let snippet = snippet(*target, &create_item(), &bearer_env());
            assert!(!snippet.code.is_empty(), "Empty code for {target:?}");
            assert!(snippet.code.contains("https://api.test.com/items"), "No URL for {target:?}");
            assert!(snippet.code.contains("Bearer abc123"), "No auth for {target:?}");
        }
    }
}
