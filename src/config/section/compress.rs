//! `[compress]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [compress]
//! source_maps = true
//! timeout = 120
//!
//! [compress.css]
//! command = ["cleancss"]
//! arguments = ["--level", "1"]
//!
//! [compress.js]
//! command = ["npx", "google-closure-compiler"]
//! arguments = ["--compilation_level", "SIMPLE"]
//! ```
//!
//! An empty `command` disables compression for that kind: sources are only
//! concatenated and no source map is produced.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::{ConfigDiagnostics, FieldPath};

/// Default wrapper for packed scripts; `%s` is replaced by the script body.
pub const DEFAULT_JS_WRAPPER: &str = "(function() {\n%s\n}).call(this);";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompressConfig {
    /// Produce source maps for packages without an explicit variant.
    pub source_maps: bool,
    /// Skip wrapping packed scripts in `js_wrapper`.
    pub disable_wrapper: bool,
    /// Wrapper template for packed scripts (`%s` marks the body).
    pub js_wrapper: String,
    /// Timeout in seconds for each compressor invocation.
    pub timeout: Option<u64>,
    /// Stylesheet compressor.
    pub css: CompressorConfig,
    /// Script compressor.
    pub js: CompressorConfig,
}

impl Default for CompressConfig {
    fn default() -> Self {
        Self {
            source_maps: false,
            disable_wrapper: false,
            js_wrapper: DEFAULT_JS_WRAPPER.into(),
            timeout: None,
            css: CompressorConfig::default(),
            js: CompressorConfig::default(),
        }
    }
}

impl CompressConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_secs)
    }

    /// Validate compressor configuration.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        let field = FieldPath::new("compress");

        if !self.disable_wrapper && !self.js_wrapper.contains("%s") {
            diag.error_with_hint(
                field.child("js_wrapper"),
                "wrapper has no `%s` placeholder for the script body",
                "add `%s` or set compress.disable_wrapper = true",
            );
        }
        if self.timeout == Some(0) {
            diag.error(field.child("timeout"), "timeout must be at least 1 second");
        }

        self.css.validate(field.child("css"), diag);
        self.js.validate(field.child("js"), diag);
    }
}

/// External compressor: program plus leading arguments, then extra arguments.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CompressorConfig {
    /// Compressor command (e.g., `["cleancss"]` or `["npx", "cleancss"]`).
    pub command: Vec<String>,
    /// Extra arguments appended after the command.
    pub arguments: Vec<String>,
}

impl CompressorConfig {
    /// Whether an external compressor is configured.
    pub fn is_enabled(&self) -> bool {
        !self.command.is_empty()
    }

    /// Check that the configured program is installed.
    pub fn validate(&self, field: FieldPath, diag: &mut ConfigDiagnostics) {
        if let Some(program) = self.command.first() {
            super::check_executable(program, &self.command, field.child("command"), diag);
        } else if !self.arguments.is_empty() {
            diag.warn(
                field.child("arguments"),
                "arguments are ignored while command is empty",
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_defaults() {
        let config = test_parse_config("");
        assert!(!config.compress.source_maps);
        assert!(!config.compress.disable_wrapper);
        assert_eq!(config.compress.js_wrapper, DEFAULT_JS_WRAPPER);
        assert!(!config.compress.css.is_enabled());
        assert!(!config.compress.js.is_enabled());
        assert_eq!(config.compress.timeout(), None);
    }

    #[test]
    fn test_compressor_command() {
        let config = test_parse_config(
            r#"
[compress]
source_maps = true
timeout = 30

[compress.css]
command = ["npx", "cleancss"]
arguments = ["--level", "1"]
"#,
        );
        assert!(config.compress.source_maps);
        assert_eq!(config.compress.timeout(), Some(Duration::from_secs(30)));
        assert!(config.compress.css.is_enabled());
        assert_eq!(config.compress.css.command, vec!["npx", "cleancss"]);
        assert_eq!(config.compress.css.arguments, vec!["--level", "1"]);
    }

    #[test]
    fn test_validate_wrapper_placeholder() {
        let config = test_parse_config("[compress]\njs_wrapper = \"(function(){})();\"");
        let mut diag = ConfigDiagnostics::new();
        config.compress.validate(&mut diag);
        assert!(diag.has_errors());
        assert_eq!(diag.errors()[0].field.as_str(), "compress.js_wrapper");
    }

    #[test]
    fn test_validate_missing_program() {
        let config = test_parse_config("[compress.js]\ncommand = [\"bale-no-such-closure\"]");
        let mut diag = ConfigDiagnostics::new();
        config.compress.validate(&mut diag);
        assert!(diag.has_errors());
        assert_eq!(diag.errors()[0].field.as_str(), "compress.js.command");
    }
}
