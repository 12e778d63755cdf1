// Asset access for shape definition files
//
// Supplies raw document bytes by logical path, from disk or from memory,
// and tracks modification times for hot reloading.

mod hot_reload;
mod loader;
mod memory;

pub use hot_reload::HotReloadWatcher;
pub use loader::AssetLoader;
pub use memory::MemoryAssets;

/// Asset loading errors
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Anything that can hand out asset bytes by logical path
pub trait AssetSource {
    /// Read the full contents of an asset
    fn load_bytes(&self, path: &str) -> Result<Vec<u8>, AssetError>;

    /// Check if an asset exists
    fn exists(&self, path: &str) -> bool;

    /// Last modification time, if the source tracks it
    ///
    /// Only ordering matters; files report milliseconds since the epoch.
    fn modification_time(&self, _path: &str) -> Option<u64> {
        None
    }
}

impl<T: AssetSource + ?Sized> AssetSource for &T {
    fn load_bytes(&self, path: &str) -> Result<Vec<u8>, AssetError> {
        (**self).load_bytes(path)
    }

    fn exists(&self, path: &str) -> bool {
        (**self).exists(path)
    }

    fn modification_time(&self, path: &str) -> Option<u64> {
        (**self).modification_time(path)
    }
}
