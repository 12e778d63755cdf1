// Hot reloading support for shape documents during development

use super::{AssetError, AssetSource};
use std::collections::HashMap;

/// Tracks modification times of loaded documents so changed ones can be re-parsed
#[derive(Debug, Default)]
pub struct HotReloadWatcher {
    /// Map of logical asset paths to their last seen modification time
    file_times: HashMap<String, u64>,

    /// Whether hot reloading is enabled
    enabled: bool,
}

impl HotReloadWatcher {
    /// Create a new hot reload watcher
    pub fn new(enabled: bool) -> Self {
        Self {
            file_times: HashMap::new(),
            enabled,
        }
    }

    /// Register a document for watching
    ///
    /// Sources that do not report modification times are accepted but never
    /// report a change.
    pub fn watch<S: AssetSource + ?Sized>(
        &mut self,
        source: &S,
        path: &str,
    ) -> Result<(), AssetError> {
        if !self.enabled {
            return Ok(());
        }

        if !source.exists(path) {
            return Err(AssetError::NotFound(path.to_string()));
        }

        if let Some(mtime) = source.modification_time(path) {
            self.file_times.insert(path.to_string(), mtime);
        }

        Ok(())
    }

    /// Stop watching a document
    pub fn unwatch(&mut self, path: &str) {
        self.file_times.remove(path);
    }

    /// Check if a document has been modified since the last check
    pub fn has_changed<S: AssetSource + ?Sized>(&mut self, source: &S, path: &str) -> bool {
        if !self.enabled {
            return false;
        }

        let Some(current_time) = source.modification_time(path) else {
            return false;
        };

        if let Some(last_time) = self.file_times.get_mut(path) {
            if current_time > *last_time {
                *last_time = current_time;
                return true;
            }
        }

        false
    }

    /// Check all watched documents for changes
    pub fn check_all<S: AssetSource + ?Sized>(&mut self, source: &S) -> Vec<String> {
        if !self.enabled {
            return Vec::new();
        }

        let mut paths: Vec<String> = self.file_times.keys().cloned().collect();
        paths.sort();
        paths.retain(|path| self.has_changed(source, path));
        paths
    }

    /// Enable or disable hot reloading
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Check if hot reloading is enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Number of watched documents
    pub fn watched_count(&self) -> usize {
        self.file_times.len()
    }

    /// Clear all watched documents
    pub fn clear(&mut self) {
        self.file_times.clear();
    }
}
