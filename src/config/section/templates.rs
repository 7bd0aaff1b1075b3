//! `[templates]` section configuration.
//!
//! Script packages may list client-side template files; they are compiled
//! into a JavaScript object instead of being concatenated.
//!
//! # Example
//!
//! ```toml
//! [templates]
//! ext = ".jst"
//! namespace = "window.JST"
//! func = "_.template"
//! separator = "_"
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplatesConfig {
    /// Suffix marking template sources.
    pub ext: String,
    /// JavaScript object the compiled templates are assigned to.
    pub namespace: String,
    /// Function each template body is passed to.
    pub func: String,
    /// Replaces path separators in template names.
    pub separator: String,
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            ext: ".jst".into(),
            namespace: "window.JST".into(),
            func: "_.template".into(),
            separator: "_".into(),
        }
    }
}

impl TemplatesConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        let field = FieldPath::new("templates");
        if self.ext.is_empty() {
            diag.error(field.child("ext"), "template suffix must not be empty");
        }
        if self.namespace.trim().is_empty() {
            diag.error(field.child("namespace"), "namespace must not be empty");
        }
        if self.func.trim().is_empty() {
            diag.error(field.child("func"), "template function must not be empty");
        }
    }
}
