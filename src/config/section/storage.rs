//! `[storage]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [storage]
//! root = "public/static"      # physical root packed files are written under
//! url = "/static/"            # public URL of that root
//! dirs = [
//!     "assets",                                  # searched for sources
//!     { prefix = "vendor", dir = "/opt/vendor" }, # served at /static/vendor/
//! ]
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::storage::StaticDir;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Storage root directory (relative to the config file).
    pub root: PathBuf,
    /// Public base URL of the storage root.
    pub url: String,
    /// Extra static directories, searched after the root when locating
    /// sources and used to relocate source-map entries outside the root.
    pub dirs: Vec<StaticDirEntry>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("static"),
            url: "/static/".into(),
            dirs: Vec::new(),
        }
    }
}

impl StorageConfig {
    /// Normalize all paths relative to root directory.
    pub fn normalize(&mut self, root: &Path) {
        self.root = super::normalize_relative(&self.root, root);
        for entry in &mut self.dirs {
            entry.normalize(root);
        }
    }

    /// Extra directories in lookup order.
    pub fn static_dirs(&self) -> Vec<StaticDir> {
        self.dirs.iter().map(StaticDirEntry::to_static_dir).collect()
    }

    /// Validate storage configuration after paths are normalized.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        let field = FieldPath::new("storage");

        if !self.url.ends_with('/') {
            diag.error_with_hint(
                field.child("url"),
                format!("'{}' must end with a slash", self.url),
                format!("use \"{}/\"", self.url),
            );
        }

        if self.root.exists() && !self.root.is_dir() {
            diag.error(
                field.child("root"),
                format!("'{}' must be a directory", self.root.display()),
            );
        }

        for (i, entry) in self.dirs.iter().enumerate() {
            let path = entry.source();
            let field = field.child("dirs").index(i);
            if !path.exists() {
                diag.warn(field, format!("'{}' does not exist", path.display()));
            } else if !path.is_dir() {
                diag.error(field, format!("'{}' must be a directory", path.display()));
            } else if path == self.root {
                diag.error(field, "extra directory must differ from storage.root");
            }
        }
    }
}

// ============================================================================
// Static Dir Entry
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StaticDirEntry {
    /// Simple path string, served from the storage root.
    Simple(PathBuf),
    /// Directory served under a URL prefix.
    Prefixed {
        /// URL prefix (relative to the storage URL).
        prefix: String,
        /// Directory path (relative to the config file).
        dir: PathBuf,
    },
}

impl StaticDirEntry {
    /// Get source directory path.
    pub fn source(&self) -> &Path {
        match self {
            Self::Simple(p) => p,
            Self::Prefixed { dir, .. } => dir,
        }
    }

    /// Get URL prefix, if any.
    pub fn prefix(&self) -> Option<&str> {
        match self {
            Self::Simple(_) => None,
            Self::Prefixed { prefix, .. } => Some(prefix.trim_matches('/')),
        }
    }

    fn normalize(&mut self, root: &Path) {
        match self {
            Self::Simple(p) => *p = super::normalize_relative(p, root),
            Self::Prefixed { dir, .. } => *dir = super::normalize_relative(dir, root),
        }
    }

    fn to_static_dir(&self) -> StaticDir {
        StaticDir {
            prefix: self.prefix().map(str::to_string),
            path: self.source().to_path_buf(),
        }
    }
}
