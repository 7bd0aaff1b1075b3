//! Storage and finder abstraction.
//!
//! Every packaging stage talks to files through [`Storage`]: it maps logical
//! paths (`css/app.css`) to physical locations and public URLs, and is the
//! only place packed artifacts are written.
//!
//! - [`FileSystemStorage`]: a directory on disk served under a base URL
//! - [`StaticDir`]: extra source directory, optionally served under a prefix

mod fs;
#[cfg(test)]
pub mod testing;

pub use fs::FileSystemStorage;

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Storage errors.
///
/// `OutsideRoot` is distinct from other failures: callers relocating source
/// maps recover from it by consulting the extra static directories.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("`{0}` lies outside the storage root")]
    OutsideRoot(String),

    #[error("`{0}` not found")]
    NotFound(String),

    #[error("invalid pattern `{pattern}`")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("IO error at `{0}`")]
    Io(PathBuf, #[source] std::io::Error),
}

/// An extra directory sources may live in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticDir {
    /// URL prefix under the storage URL (`None` = served from the root).
    pub prefix: Option<String>,
    /// Absolute directory path.
    pub path: PathBuf,
}

/// Logical-path storage consumed by the packager.
pub trait Storage {
    /// Physical location of an existing source, searching the root first.
    fn find(&self, path: &str) -> Option<PathBuf>;

    /// Public URL of a logical path.
    fn url(&self, path: &str) -> Result<String, StorageError>;

    /// Physical path of a logical path under the storage root.
    fn path(&self, path: &str) -> Result<PathBuf, StorageError>;

    /// Write (or overwrite) a logical path.
    fn save(&self, path: &str, content: &[u8]) -> Result<(), StorageError>;

    /// Absolute storage root.
    fn base_location(&self) -> &Path;

    /// Logical paths of files matching a glob pattern, in sorted order.
    fn glob(&self, pattern: &str) -> Result<Vec<String>, StorageError>;

    /// Read a source located with [`Storage::find`] as text.
    fn read_text(&self, path: &str) -> Result<String, StorageError> {
        let location = self
            .find(path)
            .ok_or_else(|| StorageError::NotFound(path.to_string()))?;
        std::fs::read_to_string(&location).map_err(|err| StorageError::Io(location, err))
    }
}
