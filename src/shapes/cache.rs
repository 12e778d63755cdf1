// Shape cache: name -> body template, filled from PhysicsEditor documents

use super::body::BodyTemplate;
use super::config::LoaderConfig;
use super::document::ShapeDocument;
use super::metadata::Metadata;
use super::LoadError;
use crate::engine::assets::{AssetSource, HotReloadWatcher};
use crate::engine::physics::{BodyDef, PhysicsWorld, RigidBodyHandle};
use log::{info, warn};
use std::collections::{HashMap, HashSet};

/// Label used for documents that were parsed from a string
pub const MEMORY_DOCUMENT: &str = "<memory>";

/// Bookkeeping for one loaded document
#[derive(Debug)]
struct LoadedFile {
    path: String,
    metadata: Metadata,
    bodies: Vec<String>,
}

/// Outcome of [`ShapeCache::reload_changed`]
#[derive(Debug, Default)]
pub struct ReloadReport {
    /// Documents that were re-parsed and installed
    pub reloaded: Vec<String>,
    /// Documents whose new contents were rejected, with the reason
    pub failed: Vec<(String, LoadError)>,
}

impl ReloadReport {
    /// True when nothing changed
    pub fn is_empty(&self) -> bool {
        self.reloaded.is_empty() && self.failed.is_empty()
    }
}

/// Cache of body templates loaded from PhysicsEditor shape documents
///
/// Templates are parsed once and instantiated into a [`PhysicsWorld`] on
/// demand. Several documents can share one cache as long as their body names
/// do not clash.
#[derive(Debug)]
pub struct ShapeCache {
    config: LoaderConfig,
    bodies: HashMap<String, BodyTemplate>,
    /// Loaded documents in load order
    files: Vec<LoadedFile>,
    watcher: HotReloadWatcher,
}

impl Default for ShapeCache {
    fn default() -> Self {
        Self::with_config(LoaderConfig::default())
    }
}

impl ShapeCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty cache with custom loader options
    pub fn with_config(config: LoaderConfig) -> Self {
        let watcher = HotReloadWatcher::new(config.hot_reload());
        Self {
            config,
            bodies: HashMap::new(),
            files: Vec::new(),
            watcher,
        }
    }

    /// Load a shape document into a new cache
    pub fn load<S: AssetSource + ?Sized>(source: &S, path: &str) -> Result<Self, LoadError> {
        Self::load_with_config(source, path, LoaderConfig::default())
    }

    /// Load a shape document into a new cache with custom loader options
    pub fn load_with_config<S: AssetSource + ?Sized>(
        source: &S,
        path: &str,
        config: LoaderConfig,
    ) -> Result<Self, LoadError> {
        let mut cache = Self::with_config(config);
        cache.add_shapes_with_file(source, path)?;
        Ok(cache)
    }

    /// Parse a document held in memory into a new cache
    pub fn parse_str(xml: &str) -> Result<Self, LoadError> {
        let mut cache = Self::new();
        cache.add_shapes_from_str(MEMORY_DOCUMENT, xml)?;
        Ok(cache)
    }

    /// Load another document into this cache
    ///
    /// Returns the number of bodies added. On error the cache is left exactly
    /// as it was.
    pub fn add_shapes_with_file<S: AssetSource + ?Sized>(
        &mut self,
        source: &S,
        path: &str,
    ) -> Result<usize, LoadError> {
        if self.is_loaded(path) {
            return Err(LoadError::AlreadyLoaded(path.to_string()));
        }

        let document = read_document(source, path)?;
        let added = self.install(path, document)?;

        if let Err(e) = self.watcher.watch(source, path) {
            warn!("Not watching {} for changes: {}", path, e);
        }

        info!("Loaded {} bodies from {}", added, path);
        Ok(added)
    }

    /// Parse a document from a string and add it under `label`
    pub fn add_shapes_from_str(&mut self, label: &str, xml: &str) -> Result<usize, LoadError> {
        if self.is_loaded(label) {
            return Err(LoadError::AlreadyLoaded(label.to_string()));
        }

        let added = self.install(label, ShapeDocument::parse(xml)?)?;
        info!("Loaded {} bodies from {}", added, label);
        Ok(added)
    }

    /// Re-parse every watched document whose source changed since it was loaded
    ///
    /// Every changed document is attempted. A document that fails to parse
    /// keeps its previous bodies and is listed in [`ReloadReport::failed`].
    pub fn reload_changed<S: AssetSource + ?Sized>(&mut self, source: &S) -> ReloadReport {
        let mut report = ReloadReport::default();

        for path in self.watcher.check_all(source) {
            let result =
                read_document(source, &path).and_then(|document| self.install(&path, document));
            match result {
                Ok(count) => {
                    info!("Reloaded {} bodies from {}", count, path);
                    report.reloaded.push(path);
                }
                Err(e) => {
                    warn!("Keeping previous bodies of {}: {}", path, e);
                    report.failed.push((path, e));
                }
            }
        }

        report
    }

    /// Remove every body that came from `path`
    pub fn remove_shapes_with_file(&mut self, path: &str) -> bool {
        let Some(index) = self.files.iter().position(|f| f.path == path) else {
            return false;
        };

        let file = self.files.remove(index);
        for name in &file.bodies {
            self.bodies.remove(name);
        }
        self.watcher.unwatch(path);

        info!("Removed {} bodies from {}", file.bodies.len(), path);
        true
    }

    /// Remove every body and forget every loaded document
    ///
    /// Returns the number of templates released.
    pub fn remove_all_shapes(&mut self) -> usize {
        let count = self.bodies.len();
        self.bodies.clear();
        self.files.clear();
        self.watcher.clear();
        count
    }

    /// Release every template held by this cache
    ///
    /// The cache is consumed, so it cannot be used or released again.
    pub fn dispose(mut self) -> usize {
        let count = self.remove_all_shapes();
        info!("Released {} body templates", count);
        count
    }

    /// Check if a body name is present
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Look up a body template by name
    ///
    /// When suffix fallback is enabled, `"bug.png"` also finds `"bug"`.
    pub fn get(&self, name: &str) -> Option<&BodyTemplate> {
        self.bodies.get(name).or_else(|| {
            if !self.config.suffix_fallback() {
                return None;
            }
            let (stem, _) = name.rsplit_once('.')?;
            self.bodies.get(stem)
        })
    }

    /// Create a body using the authored body attributes
    ///
    /// `scale_x` scales fixture widths, `scale_y` fixture heights (ignored for
    /// circles). Returns `None` if no body has that name.
    pub fn create_body(
        &self,
        name: &str,
        world: &mut PhysicsWorld,
        scale_x: f32,
        scale_y: f32,
    ) -> Option<RigidBodyHandle> {
        let template = self.lookup_for_create(name)?;
        Some(template.create_body(world, scale_x, scale_y))
    }

    /// Create a body with caller supplied attributes; only fixtures come from the document
    pub fn create_body_with_def(
        &self,
        name: &str,
        world: &mut PhysicsWorld,
        def: &BodyDef,
        scale_x: f32,
        scale_y: f32,
    ) -> Option<RigidBodyHandle> {
        let template = self.lookup_for_create(name)?;
        Some(template.create_body_with_def(world, def, scale_x, scale_y))
    }

    fn lookup_for_create(&self, name: &str) -> Option<&BodyTemplate> {
        let template = self.get(name);
        if template.is_none() {
            warn!("Body \"{}\" not found in shape cache", name);
        }
        template
    }

    /// Pixels-to-meter ratio of the first loaded document
    pub fn ptm_ratio(&self) -> Option<f32> {
        self.metadata().map(|m| m.ptm_ratio)
    }

    /// Metadata of the first loaded document
    pub fn metadata(&self) -> Option<&Metadata> {
        self.files.first().map(|f| &f.metadata)
    }

    /// Metadata of a specific loaded document
    pub fn file_metadata(&self, path: &str) -> Option<&Metadata> {
        self.files.iter().find(|f| f.path == path).map(|f| &f.metadata)
    }

    /// Sorted body names
    pub fn body_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.bodies.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Loaded document paths in load order
    pub fn loaded_files(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(|f| f.path.as_str())
    }

    pub fn is_loaded(&self, path: &str) -> bool {
        self.files.iter().any(|f| f.path == path)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Insert a parsed document, replacing an earlier version of the same path
    fn install(&mut self, path: &str, document: ShapeDocument) -> Result<usize, LoadError> {
        let format = document.metadata().format;
        if !self.config.accepts_format(format) {
            return Err(LoadError::UnsupportedFormat(format));
        }

        let previous = self.files.iter().position(|f| f.path == path);

        // Validate everything before touching the cache
        {
            let replaced: HashSet<&str> = previous
                .map(|i| self.files[i].bodies.iter().map(String::as_str).collect())
                .unwrap_or_default();

            if let Some(clash) = document
                .bodies()
                .iter()
                .find(|b| self.bodies.contains_key(b.name()) && !replaced.contains(b.name()))
            {
                return Err(LoadError::DuplicateBody {
                    name: clash.name().to_string(),
                    path: path.to_string(),
                });
            }
        }

        let (templates, metadata) = document.into_parts();
        let names: Vec<String> = templates.iter().map(|t| t.name().to_string()).collect();
        let count = names.len();

        let file = LoadedFile {
            path: path.to_string(),
            metadata,
            bodies: names,
        };

        match previous {
            Some(i) => {
                for name in &self.files[i].bodies {
                    self.bodies.remove(name);
                }
                self.files[i] = file;
            }
            None => self.files.push(file),
        }

        for template in templates {
            self.bodies.insert(template.name().to_string(), template);
        }

        Ok(count)
    }
}

fn read_document<S: AssetSource + ?Sized>(source: &S, path: &str) -> Result<ShapeDocument, LoadError> {
    let bytes = source.load_bytes(path)?;
    let xml = String::from_utf8(bytes).map_err(|_| LoadError::NotUtf8 {
        path: path.to_string(),
    })?;
    ShapeDocument::parse(&xml)
}
