//! Test doubles for [`Storage`].

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::{FileSystemStorage, Storage, StorageError};

/// File system storage that remembers the order of `save` calls.
pub struct RecordingStorage {
    inner: FileSystemStorage,
    saved: Mutex<Vec<String>>,
}

impl RecordingStorage {
    pub fn new(inner: FileSystemStorage) -> Self {
        Self {
            inner,
            saved: Mutex::new(Vec::new()),
        }
    }

    /// Logical paths passed to `save`, oldest first.
    pub fn saved(&self) -> Vec<String> {
        self.saved.lock().unwrap().clone()
    }
}

impl Storage for RecordingStorage {
    fn find(&self, path: &str) -> Option<PathBuf> {
        self.inner.find(path)
    }

    fn url(&self, path: &str) -> Result<String, StorageError> {
        self.inner.url(path)
    }

    fn path(&self, path: &str) -> Result<PathBuf, StorageError> {
        self.inner.path(path)
    }

    fn save(&self, path: &str, content: &[u8]) -> Result<(), StorageError> {
        self.saved.lock().unwrap().push(path.to_string());
        self.inner.save(path, content)
    }

    fn base_location(&self) -> &Path {
        self.inner.base_location()
    }

    fn glob(&self, pattern: &str) -> Result<Vec<String>, StorageError> {
        self.inner.glob(pattern)
    }
}
