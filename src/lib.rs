//! Loader for PhysicsEditor shape definitions.
//!
//! Reads the XML documents PhysicsEditor exports for Box2D style engines,
//! caches the parsed body templates, and creates rapier2d bodies and
//! colliders from them at any scale.
//!
//! ```no_run
//! use pe_shapes::engine::assets::AssetLoader;
//! use pe_shapes::engine::physics::PhysicsWorld;
//! use pe_shapes::ShapeCache;
//!
//! # fn main() -> Result<(), pe_shapes::LoadError> {
//! let assets = AssetLoader::new("assets");
//! let shapes = ShapeCache::load(&assets, "shapes/bugs.xml")?;
//!
//! let mut world = PhysicsWorld::new();
//! let scale = 1.0 / shapes.ptm_ratio().unwrap_or(1.0);
//! let bug = shapes.create_body("bug_0001", &mut world, scale, scale);
//! assert!(bug.is_some());
//!
//! shapes.dispose();
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod engine;
pub mod shapes;

pub use shapes::{BodyTemplate, LoadError, LoaderConfig, ShapeCache};
