//! Rewriting of source-map `sources` into URLs relative to the packed file.

use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;

use crate::log;
use crate::storage::{StaticDir, Storage, StorageError};
use crate::utils::path::{clean_path, relative_to, route, to_slash};

/// Relocates map sources produced next to a packed file.
pub struct SourceMapRelocator<'a> {
    storage: &'a dyn Storage,
    static_dirs: &'a [StaticDir],
}

impl<'a> SourceMapRelocator<'a> {
    pub fn new(storage: &'a dyn Storage, static_dirs: &'a [StaticDir]) -> Self {
        Self {
            storage,
            static_dirs,
        }
    }

    /// Rewrite every entry of `sources` in `map_json`.
    ///
    /// Entries are resolved against `output_dir` (the physical directory of
    /// the packed file) and rewritten relative to `output_url`. An entry that
    /// maps to no URL is reported and left as it was. Every other field is
    /// passed through untouched.
    pub fn relocate(&self, map_json: &str, output_dir: &Path, output_url: &str) -> Result<String> {
        let mut map: Value = serde_json::from_str(map_json).context("Invalid source map")?;

        if let Some(sources) = map.get_mut("sources").and_then(Value::as_array_mut) {
            for entry in sources.iter_mut() {
                let Some(source) = entry.as_str() else {
                    continue;
                };
                if route::is_external_link(source) {
                    continue;
                }
                match self.source_url(source, output_dir) {
                    Ok(url) => *entry = Value::String(route::relative_url(&url, output_url)),
                    Err(err) => {
                        log!("sourcemap"; "cannot relocate `{}`: {}", source, err);
                    }
                }
            }
        }

        serde_json::to_string(&map).context("Failed to serialize source map")
    }

    /// Storage URL of one map source.
    fn source_url(&self, source: &str, output_dir: &Path) -> Result<String, StorageError> {
        let location = clean_path(&output_dir.join(source));
        let rel = to_slash(&relative_to(&location, self.storage.base_location()));

        match self.storage.url(&rel) {
            Err(StorageError::OutsideRoot(_)) => self.static_dir_url(&location),
            other => other,
        }
    }

    /// URL through the first extra directory containing `location`.
    fn static_dir_url(&self, location: &Path) -> Result<String, StorageError> {
        let outside = || StorageError::OutsideRoot(location.display().to_string());

        let dir = self
            .static_dirs
            .iter()
            .find(|dir| location.starts_with(&dir.path))
            .ok_or_else(outside)?;
        let rel = location.strip_prefix(&dir.path).map_err(|_| outside())?;
        let rel = to_slash(rel);

        match &dir.prefix {
            Some(prefix) => self.storage.url(&route::join(prefix, &rel)),
            None => self.storage.url(&rel),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::FileSystemStorage;
    use crate::utils::path::normalize_path;
    use std::fs;
    use tempfile::TempDir;

    struct Fixture {
        _dir: TempDir,
        storage: FileSystemStorage,
        vendor: StaticDir,
    }

    fn fixture() -> Fixture {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("static");
        fs::create_dir_all(root.join("lib")).unwrap();
        fs::create_dir_all(root.join("styles")).unwrap();
        fs::write(root.join("lib/util.css"), "").unwrap();
        let vendor = dir.path().join("opt/vendor");
        fs::create_dir_all(&vendor).unwrap();
        fs::write(vendor.join("x.css"), "").unwrap();

        Fixture {
            storage: FileSystemStorage::new(&root, "/static/"),
            vendor: StaticDir {
                prefix: Some("vendor".into()),
                path: normalize_path(&vendor),
            },
            _dir: dir,
        }
    }

    fn sources(json: &str) -> Vec<String> {
        let map: Value = serde_json::from_str(json).unwrap();
        map["sources"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_sources_inside_root() {
        let fx = fixture();
        let output_dir = fx.storage.base_location().join("styles");
        let relocator = SourceMapRelocator::new(&fx.storage, &[]);

        let map = r#"{"version":3,"sources":["../lib/util.css","app.css"],"mappings":"AAAA","names":[]}"#;
        let out = relocator
            .relocate(map, &output_dir, "/static/styles/app.css")
            .unwrap();

        assert_eq!(sources(&out), vec!["../lib/util.css", "app.css"]);
        let value: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["mappings"], "AAAA");
        assert_eq!(value["version"], 3);
    }

    #[test]
    fn test_absolute_output_url() {
        let fx = fixture();
        let storage = FileSystemStorage::new(fx.storage.base_location(), "https://cdn.example.com/s/");
        let output_dir = storage.base_location().join("styles");
        let relocator = SourceMapRelocator::new(&storage, &[]);

        let out = relocator
            .relocate(
                r#"{"sources":["../lib/util.css"]}"#,
                &output_dir,
                "https://cdn.example.com/s/styles/app.css",
            )
            .unwrap();
        assert_eq!(sources(&out), vec!["../lib/util.css"]);
    }

    #[test]
    fn test_outside_root_uses_static_dir() {
        let fx = fixture();
        let output_dir = fx.storage.base_location().join("styles");
        let dirs = [fx.vendor.clone()];
        let relocator = SourceMapRelocator::new(&fx.storage, &dirs);

        let vendored = fx.vendor.path.join("x.css");
        let map = format!(
            r#"{{"sources":["{}","../lib/util.css"]}}"#,
            vendored.display()
        );
        let out = relocator
            .relocate(&map, &output_dir, "/static/styles/app.css")
            .unwrap();
        assert_eq!(sources(&out), vec!["../vendor/x.css", "../lib/util.css"]);
    }

    #[test]
    fn test_unresolvable_entry_left_unchanged() {
        let fx = fixture();
        let output_dir = fx.storage.base_location().join("styles");
        let dirs = [fx.vendor.clone()];
        let relocator = SourceMapRelocator::new(&fx.storage, &dirs);

        let map = r#"{"sources":["../../../elsewhere/y.css","../lib/util.css","webpack://app/z.js"]}"#;
        let out = relocator
            .relocate(map, &output_dir, "/static/styles/app.css")
            .unwrap();
        assert_eq!(
            sources(&out),
            vec!["../../../elsewhere/y.css", "../lib/util.css", "webpack://app/z.js"]
        );
    }

    #[test]
    fn test_invalid_json_is_error() {
        let fx = fixture();
        let relocator = SourceMapRelocator::new(&fx.storage, &[]);
        assert!(relocator.relocate("not json", Path::new("/"), "/static/a.css").is_err());
    }
}
