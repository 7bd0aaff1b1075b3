//! `[style.<name>]` and `[script.<name>]` package tables.
//!
//! # Example
//!
//! ```toml
//! [style.main]
//! source_filenames = ["css/reset.css", "css/*.scss"]
//! output_filename = "css/main.css"
//! extra_context = { media = "screen,projection" }
//!
//! [script.app]
//! source_filenames = ["js/lib/*.js", "js/app.js", "templates/**/*.jst"]
//! output_filename = "js/app.js"
//! variant = "source-maps"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::{ConfigDiagnostics, FieldPath};

/// Alternate packing strategy for a single package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    /// Always produce a source map.
    SourceMaps,
    /// Never produce a source map.
    Plain,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PackageConfig {
    /// Glob patterns of sources, in packing order.
    pub source_filenames: Vec<String>,
    /// Logical path of the packed file.
    pub output_filename: String,
    /// Free-form values handed to notification subscribers.
    pub extra_context: toml::Table,
    /// Name of the template used to render tags for this package.
    pub template_name: Option<String>,
    /// Overrides `compress.source_maps` for this package.
    pub variant: Option<Variant>,
    /// Include the packed file in generated manifests.
    pub manifest: bool,
}

impl Default for PackageConfig {
    fn default() -> Self {
        Self {
            source_filenames: Vec::new(),
            output_filename: String::new(),
            extra_context: toml::Table::new(),
            template_name: None,
            variant: None,
            manifest: true,
        }
    }
}

/// Validate one package table (`section` is `style` or `script`).
pub fn validate_packages(
    section: &str,
    packages: &BTreeMap<String, PackageConfig>,
    diag: &mut ConfigDiagnostics,
) {
    let mut outputs: BTreeMap<&str, &str> = BTreeMap::new();

    for (name, package) in packages {
        let field = FieldPath::new(format!("{section}.{name}"));

        if package.output_filename.trim().is_empty() {
            diag.error(field.child("output_filename"), "output filename is required");
        } else if package.output_filename.starts_with('/')
            || package.output_filename.split('/').any(|seg| seg == "..")
        {
            diag.error(
                field.child("output_filename"),
                format!(
                    "'{}' must be a relative path inside the storage root",
                    package.output_filename
                ),
            );
        } else if let Some(prev) = outputs.insert(&package.output_filename, name) {
            diag.error(
                field.child("output_filename"),
                format!(
                    "'{}' is also the output of {section}.{prev}",
                    package.output_filename
                ),
            );
        }

        if package.source_filenames.is_empty() {
            diag.warn(field.child("source_filenames"), "package has no sources");
        }
        for (i, pattern) in package.source_filenames.iter().enumerate() {
            if let Err(err) = glob::Pattern::new(pattern) {
                diag.error(
                    field.child("source_filenames").index(i),
                    format!("invalid pattern '{pattern}': {}", err.msg),
                );
            }
        }
    }
}
