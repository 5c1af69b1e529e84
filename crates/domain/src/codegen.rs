//! Code generation types for rendering request descriptors.
//!
//! This module provides the target enumeration, rendering options and the
//! snippet type shared by all renderers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RenderTarget {
    /// cURL command line
    #[default]
    Curl,
    /// HTTP notebook / REST client block
    #[serde(rename = "http")]
    HttpFile,
    /// Python with requests library
    Python,
    /// JavaScript with fetch API
    JavaScript,
    /// PowerShell with Invoke-RestMethod
    PowerShell,
    /// Ansible `uri` module task
    Ansible,
}

impl RenderTarget {
    /// Get display name for the target.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Curl => "cURL",
            Self::HttpFile => "HTTP notebook",
            Self::Python => "Python (requests)",
            Self::JavaScript => "JavaScript (fetch)",
            Self::PowerShell => "PowerShell (Invoke-RestMethod)",
            Self::Ansible => "Ansible (uri)",
        }
    }

    /// Get file extension for the target.
    #[must_use]
    pub const fn file_extension(&self) -> &'static str {
        match self {
            Self::Curl => "sh",
            Self::HttpFile => "http",
            Self::Python => "py",
            Self::JavaScript => "js",
            Self::PowerShell => "ps1",
            Self::Ansible => "yml",
        }
    }

    /// Identifier used in configuration and on the command line.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::Curl => "curl",
            Self::HttpFile => "http",
            Self::Python => "python",
            Self::JavaScript => "javascript",
            Self::PowerShell => "powershell",
            Self::Ansible => "ansible",
        }
    }

    /// Get all available targets.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Curl,
            Self::HttpFile,
            Self::Python,
            Self::JavaScript,
            Self::PowerShell,
            Self::Ansible,
        ]
    }
}

impl fmt::Display for RenderTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for RenderTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        match wanted.as_str() {
            "js" | "fetch" => return Ok(Self::JavaScript),
            "py" => return Ok(Self::Python),
            "ps" | "pwsh" | "ps1" => return Ok(Self::PowerShell),
            _ => {}
        }
        Self::all()
            .iter()
            .copied()
            .find(|t| t.key() == wanted)
            .ok_or_else(|| format!("unknown render target: {s}"))
    }
}

/// Options for code generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodeGenOptions {
    /// Target output format.
    pub target: RenderTarget,
    /// Include comments (summary, platform hints) in generated code.
    #[serde(default = "default_true")]
    pub include_comments: bool,
    /// Use multi-line formatting where the target allows it.
    #[serde(default = "default_true")]
    pub pretty_format: bool,
    /// Indent size (spaces).
    #[serde(default = "default_indent")]
    pub indent_size: usize,
}

const fn default_true() -> bool {
    true
}

const fn default_indent() -> usize {
    4
}

impl Default for CodeGenOptions {
    fn default() -> Self {
        Self {
            target: RenderTarget::default(),
            include_comments: true,
            pretty_format: true,
            indent_size: default_indent(),
        }
    }
}

impl CodeGenOptions {
    /// Create options for a specific target with defaults.
    #[must_use]
    pub fn for_target(target: RenderTarget) -> Self {
        Self {
            target,
            ..Default::default()
        }
    }

    /// Get indentation string.
    #[must_use]
    pub fn indent(&self) -> String {
        " ".repeat(self.indent_size)
    }
}

/// Generated code snippet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeSnippet {
    /// The generated code.
    pub code: String,
    /// Target of the generated code.
    pub target: RenderTarget,
    /// Imports the code needs.
    pub imports: Vec<String>,
}

impl CodeSnippet {
    /// Create a new code snippet.
    #[must_use]
    pub fn new(code: impl Into<String>, target: RenderTarget) -> Self {
        Self {
            code: code.into(),
            target,
            imports: Vec::new(),
        }
    }

    /// Add an import.
    #[must_use]
    pub fn with_import(mut self, import: impl Into<String>) -> Self {
        self.imports.push(import.into());
        self
    }

    /// Get the complete code including imports, ready for display.
    #[must_use]
    pub fn full_code(&self) -> String {
        if self.imports.is_empty() {
            return self.code.clone();
        }
        format!("{}\n\n{}", self.imports.join("\n"), self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_target_display() {
        assert_eq!(RenderTarget::Curl.display_name(), "cURL");
        assert_eq!(RenderTarget::Python.to_string(), "Python (requests)");
    }

    #[test]
    fn test_render_target_extension() {
        assert_eq!(RenderTarget::HttpFile.file_extension(), "http");
        assert_eq!(RenderTarget::PowerShell.file_extension(), "ps1");
    }

    #[test]
    fn test_render_target_parse() {
        assert_eq!("curl".parse::<RenderTarget>(), Ok(RenderTarget::Curl));
        assert_eq!("JS".parse::<RenderTarget>(), Ok(RenderTarget::JavaScript));
        assert_eq!("pwsh".parse::<RenderTarget>(), Ok(RenderTarget::PowerShell));
        assert!("cobol".parse::<RenderTarget>().is_err());
    }

    #[test]
    fn test_render_target_serde_key_matches() {
        for target in RenderTarget::all() {
            let json = serde_json::to_string(target).unwrap_or_default();
            assert_eq!(json, format!("\"{}\"", target.key()));
        }
    }

    #[test]
    fn test_code_gen_options_default() {
        let options = CodeGenOptions::default();
        assert!(options.include_comments);
        assert!(options.pretty_format);
        assert_eq!(options.indent_size, 4);
        assert_eq!(options.indent(), "    ");
    }

    #[test]
    fn test_code_snippet_full_code() {
        let snippet =
            CodeSnippet::new("print('hello')", RenderTarget::Python).with_import("import requests");
        assert_eq!(snippet.full_code(), "import requests\n\nprint('hello')");
    }
}
