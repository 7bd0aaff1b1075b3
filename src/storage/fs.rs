//! Directory-backed storage.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use std::fs;
use std::path::{Path, PathBuf};

use super::{StaticDir, Storage, StorageError};
use crate::config::StorageConfig;
use crate::debug;
use crate::utils::path::{clean_path, normalize_path, route, to_slash};

/// Characters left unescaped in storage URLs.
const URI_PATH: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'!')
    .remove(b'*')
    .remove(b'(')
    .remove(b')')
    .remove(b'\'');

/// Storage rooted at a directory and served under a base URL.
///
/// Sources are looked up in the root first, then in the extra directories
/// in configuration order.
#[derive(Debug, Clone)]
pub struct FileSystemStorage {
    location: PathBuf,
    base_url: String,
    dirs: Vec<StaticDir>,
}

impl FileSystemStorage {
    pub fn new(location: impl AsRef<Path>, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self {
            location: normalize_path(location.as_ref()),
            base_url,
            dirs: Vec::new(),
        }
    }

    pub fn with_dirs(mut self, dirs: Vec<StaticDir>) -> Self {
        self.dirs = dirs;
        self
    }

    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(&config.root, config.url.clone()).with_dirs(config.static_dirs())
    }

    /// Locate `path` inside one extra directory.
    fn find_in_dir(dir: &StaticDir, path: &str) -> Option<PathBuf> {
        let rel = match &dir.prefix {
            Some(prefix) => path.strip_prefix(prefix.as_str())?.strip_prefix('/')?,
            None => path,
        };
        let candidate = clean_path(&dir.path.join(rel));
        (candidate.starts_with(&dir.path) && candidate.is_file()).then_some(candidate)
    }
}

impl Storage for FileSystemStorage {
    fn find(&self, path: &str) -> Option<PathBuf> {
        if let Ok(location) = self.path(path)
            && location.is_file()
        {
            return Some(location);
        }
        self.dirs.iter().find_map(|dir| Self::find_in_dir(dir, path))
    }

    fn url(&self, path: &str) -> Result<String, StorageError> {
        let path = path.replace('\\', "/");
        let path = path.trim_start_matches('/');
        self.path(path)?;

        let logical = route::normpath(path);
        let logical = if logical == "." { "" } else { logical.as_str() };
        Ok(format!(
            "{}{}",
            self.base_url,
            utf8_percent_encode(logical, URI_PATH)
        ))
    }

    fn path(&self, path: &str) -> Result<PathBuf, StorageError> {
        let full = clean_path(&self.location.join(path));
        if full.starts_with(&self.location) {
            Ok(full)
        } else {
            Err(StorageError::OutsideRoot(path.to_string()))
        }
    }

    fn save(&self, path: &str, content: &[u8]) -> Result<(), StorageError> {
        let full = self.path(path)?;
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).map_err(|err| StorageError::Io(parent.to_path_buf(), err))?;
        }
        fs::write(&full, content).map_err(|err| StorageError::Io(full, err))
    }

    fn base_location(&self) -> &Path {
        &self.location
    }

    /// Matches under the root, then under each extra directory. A path
    /// found in more than one place is listed once, where `find` locates it.
    fn glob(&self, pattern: &str) -> Result<Vec<String>, StorageError> {
        let pattern = pattern.trim_start_matches('/');
        let mut matches = glob_dir(&self.location, pattern, pattern)?;

        for dir in &self.dirs {
            let (rel_pattern, prefix) = match &dir.prefix {
                Some(prefix) => match pattern
                    .strip_prefix(prefix.as_str())
                    .and_then(|rest| rest.strip_prefix('/'))
                {
                    Some(rest) => (rest, Some(prefix.as_str())),
                    None => continue,
                },
                None => (pattern, None),
            };

            for rel in glob_dir(&dir.path, rel_pattern, pattern)? {
                let logical = match prefix {
                    Some(prefix) => route::join(prefix, &rel),
                    None => rel,
                };
                if !matches.contains(&logical) {
                    matches.push(logical);
                }
            }
        }
        Ok(matches)
    }
}

/// Files below `base` matching `pattern`, as `/`-separated relative paths.
///
/// `original` is the pattern as written, for error reporting.
fn glob_dir(base: &Path, pattern: &str, original: &str) -> Result<Vec<String>, StorageError> {
    let escaped = glob::Pattern::escape(&to_slash(base));
    let full = format!("{}/{}", escaped.trim_end_matches('/'), pattern);
    let entries = glob::glob(&full).map_err(|source| StorageError::Pattern {
        pattern: original.to_string(),
        source,
    })?;

    let mut matches = Vec::new();
    for entry in entries {
        let path = match entry {
            Ok(path) => path,
            Err(err) => {
                debug!("resolve"; "skipping {}: {}", err.path().display(), err.error());
                continue;
            }
        };
        if !path.is_file() {
            continue;
        }
        if let Ok(rel) = path.strip_prefix(base) {
            matches.push(to_slash(rel));
        }
    }
    Ok(matches)
}
