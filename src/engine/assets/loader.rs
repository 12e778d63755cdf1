// Filesystem asset loading

use super::{AssetError, AssetSource};
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

/// File extension of PhysicsEditor shape documents
pub const SHAPE_EXTENSION: &str = "xml";

/// Asset loader responsible for finding and reading asset files below a base directory
#[derive(Debug, Clone)]
pub struct AssetLoader {
    base_path: PathBuf,
}

impl AssetLoader {
    /// Create a new asset loader with the given base path
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Get the full path for an asset
    pub fn resolve_path(&self, name: &str) -> PathBuf {
        self.base_path.join(name)
    }

    /// List all shape documents in a directory below the base path
    pub fn list_shape_files(&self, dir: &str) -> Result<Vec<String>, AssetError> {
        let full = self.resolve_path(dir);

        if !full.exists() {
            return Ok(Vec::new());
        }

        let io_err = |source| AssetError::Io {
            path: full.to_string_lossy().to_string(),
            source,
        };

        let mut assets = Vec::new();
        for entry in std::fs::read_dir(&full).map_err(io_err)? {
            let path = entry.map_err(io_err)?.path();

            if path.is_file()
                && path.extension().is_some_and(|ext| ext == SHAPE_EXTENSION)
            {
                if let Some(name) = path.file_name() {
                    let name = name.to_string_lossy();
                    assets.push(if dir.is_empty() {
                        name.to_string()
                    } else {
                        format!("{}/{}", dir.trim_end_matches('/'), name)
                    });
                }
            }
        }

        assets.sort();
        Ok(assets)
    }

    /// Get the base path
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

impl AssetSource for AssetLoader {
    fn load_bytes(&self, name: &str) -> Result<Vec<u8>, AssetError> {
        let path = self.resolve_path(name);

        if !path.exists() {
            return Err(AssetError::NotFound(path.to_string_lossy().to_string()));
        }

        std::fs::read(&path).map_err(|source| AssetError::Io {
            path: path.to_string_lossy().to_string(),
            source,
        })
    }

    fn exists(&self, name: &str) -> bool {
        self.resolve_path(name).is_file()
    }

    fn modification_time(&self, name: &str) -> Option<u64> {
        let modified = std::fs::metadata(self.resolve_path(name))
            .and_then(|m| m.modified())
            .ok()?;
        modified
            .duration_since(UNIX_EPOCH)
            .ok()
            .and_then(|d| u64::try_from(d.as_millis()).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture_loader() -> AssetLoader {
        AssetLoader::new(concat!(env!("CARGO_MANIFEST_DIR"), "/assets"))
    }

    #[test]
    fn test_loader_path_resolution() {
        let loader = AssetLoader::new("/game/assets");
        let path = loader.resolve_path("shapes/bugs.xml");

        assert_eq!(path.to_str().unwrap(), "/game/assets/shapes/bugs.xml");
    }

    #[test]
    fn test_load_existing_file() {
        let loader = fixture_loader();
        assert!(loader.exists("shapes/bugs.xml"));

        let bytes = loader.load_bytes("shapes/bugs.xml").unwrap();
        assert!(!bytes.is_empty());
        // Millisecond resolution, so edits within one second are still seen
        let mtime = loader.modification_time("shapes/bugs.xml").unwrap();
        assert!(mtime > 1_000_000_000_000);
    }

    #[test]
    fn test_load_missing_file() {
        let loader = fixture_loader();
        assert!(!loader.exists("shapes/missing.xml"));

        let err = loader.load_bytes("shapes/missing.xml").unwrap_err();
        assert!(matches!(err, AssetError::NotFound(_)));
        assert!(loader.modification_time("shapes/missing.xml").is_none());
    }

    #[test]
    fn test_list_shape_files() {
        let loader = fixture_loader();
        let files = loader.list_shape_files("shapes").unwrap();

        assert!(files.contains(&"shapes/bugs.xml".to_string()));
        // Only .xml documents are listed
        assert!(!files.iter().any(|f| f.ends_with(".pes")));

        assert!(loader.list_shape_files("nowhere").unwrap().is_empty());
    }
}
