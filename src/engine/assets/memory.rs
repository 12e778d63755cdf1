// In-memory asset source

use super::{AssetError, AssetSource};
use std::collections::HashMap;

/// Asset source backed by a map of path -> bytes
///
/// Useful for embedded documents (`include_str!`) and for tests. Every
/// `insert` bumps a revision counter that is reported as the modification
/// time, so hot reloading works the same way as on disk.
#[derive(Debug, Default, Clone)]
pub struct MemoryAssets {
    files: HashMap<String, (Vec<u8>, u64)>,
    revision: u64,
}

impl MemoryAssets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an asset
    pub fn insert(&mut self, path: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.revision += 1;
        self.files.insert(path.into(), (bytes.into(), self.revision));
    }

    /// Builder-style insert
    pub fn with(mut self, path: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(path, bytes);
        self
    }

    /// Remove an asset
    pub fn remove(&mut self, path: &str) -> bool {
        self.files.remove(path).is_some()
    }
}

impl AssetSource for MemoryAssets {
    fn load_bytes(&self, path: &str) -> Result<Vec<u8>, AssetError> {
        self.files
            .get(path)
            .map(|(bytes, _)| bytes.clone())
            .ok_or_else(|| AssetError::NotFound(path.to_string()))
    }

    fn exists(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    fn modification_time(&self, path: &str) -> Option<u64> {
        self.files.get(path).map(|(_, revision)| *revision)
    }
}
