//! `[[compilers]]` section configuration.
//!
//! Each entry turns sources with one of its extensions into a compiled
//! sibling before compression.
//!
//! # Example
//!
//! ```toml
//! [[compilers]]
//! name = "sass"
//! extensions = ["scss", "sass"]
//! output_extension = "css"
//! command = ["sassc", "$BALE_INPUT", "$BALE_OUTPUT"]
//!
//! [[compilers]]
//! name = "coffee"
//! extensions = ["coffee"]
//! output_extension = "js"
//! command = ["coffee", "--compile", "--print", "$BALE_INPUT"]
//! stdout = true
//! ```

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::{ConfigDiagnostics, FieldPath};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    /// Display name (defaults to the program name).
    pub name: Option<String>,
    /// Source extensions handled by this compiler, without the dot.
    pub extensions: Vec<String>,
    /// Extension of the compiled sibling, without the dot.
    pub output_extension: String,
    /// Command with `$BALE_INPUT` / `$BALE_OUTPUT` placeholders.
    pub command: Vec<String>,
    /// Write the command's stdout to the compiled sibling.
    pub stdout: bool,
    /// Timeout in seconds for each invocation.
    pub timeout: Option<u64>,
}

impl CompilerConfig {
    /// Human-readable name for logs.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or_else(|| self.command.first().map(String::as_str))
            .unwrap_or("compiler")
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_secs)
    }

    fn validate(&self, field: FieldPath, diag: &mut ConfigDiagnostics) {
        if self.extensions.is_empty() {
            diag.error(field.child("extensions"), "at least one extension is required");
        }
        if self.output_extension.trim_start_matches('.').is_empty() {
            diag.error(field.child("output_extension"), "output extension is required");
        }
        if self
            .extensions
            .iter()
            .any(|ext| normalize_ext(ext) == normalize_ext(&self.output_extension))
        {
            diag.error(
                field.child("output_extension"),
                "output extension must differ from the source extensions",
            );
        }

        match self.command.first() {
            Some(program) => {
                super::check_executable(program, &self.command, field.child("command"), diag)
            }
            None => diag.error(field.child("command"), "command must not be empty"),
        }
    }
}

/// Strip a leading dot and lowercase an extension for comparison.
pub fn normalize_ext(ext: &str) -> String {
    ext.trim_start_matches('.').to_ascii_lowercase()
}

/// Validate all compilers, including extension conflicts between them.
pub fn validate_compilers(compilers: &[CompilerConfig], diag: &mut ConfigDiagnostics) {
    let mut claimed: FxHashMap<String, usize> = FxHashMap::default();

    for (i, compiler) in compilers.iter().enumerate() {
        let field = FieldPath::new("compilers").index(i);
        compiler.validate(field.clone(), diag);

        for ext in &compiler.extensions {
            let ext = normalize_ext(ext);
            if let Some(prev) = claimed.insert(ext.clone(), i) {
                diag.error(
                    field.child("extensions"),
                    format!("extension '{ext}' is already handled by compilers[{prev}]"),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_parse_compilers() {
        let config = test_parse_config(
            r#"
[[compilers]]
name = "sass"
extensions = ["scss", ".sass"]
output_extension = "css"
command = ["sassc", "$BALE_INPUT", "$BALE_OUTPUT"]

[[compilers]]
extensions = ["coffee"]
output_extension = "js"
command = ["coffee", "-cp", "$BALE_INPUT"]
stdout = true
timeout = 5
"#,
        );
        assert_eq!(config.compilers.len(), 2);
        assert_eq!(config.compilers[0].display_name(), "sass");
        assert_eq!(config.compilers[1].display_name(), "coffee");
        assert!(config.compilers[1].stdout);
        assert_eq!(config.compilers[1].timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_extension_conflict() {
        let compilers = vec![
            CompilerConfig {
                extensions: vec!["scss".into()],
                output_extension: "css".into(),
                command: vec!["cp".into()],
                ..Default::default()
            },
            CompilerConfig {
                extensions: vec![".SCSS".into()],
                output_extension: "css".into(),
                command: vec!["cp".into()],
                ..Default::default()
            },
        ];
        let mut diag = ConfigDiagnostics::new();
        validate_compilers(&compilers, &mut diag);
        assert_eq!(diag.errors().len(), 1);
        assert_eq!(diag.errors()[0].field.as_str(), "compilers[1].extensions");
    }

    #[test]
    fn test_empty_command_and_same_extension() {
        let compilers = vec![CompilerConfig {
            extensions: vec!["css".into()],
            output_extension: "css".into(),
            ..Default::default()
        }];
        let mut diag = ConfigDiagnostics::new();
        validate_compilers(&compilers, &mut diag);
        let fields: Vec<_> = diag.errors().iter().map(|e| e.field.as_str()).collect();
        assert!(fields.contains(&"compilers[0].output_extension"));
        assert!(fields.contains(&"compilers[0].command"));
    }
}
