// PhysicsEditor shape definitions
//
// Parses the PhysicsEditor XML export (bodies, fixtures, polygons, circles,
// metadata) into immutable templates and turns them into rapier bodies on
// demand. Coordinates stay in authoring pixels until a body is created, so
// the same template can be instantiated at any scale.

mod body;
mod cache;
mod circle;
mod config;
mod document;
mod element;
mod error;
mod fixture;
mod metadata;
mod polygon;

pub use body::BodyTemplate;
pub use cache::{ReloadReport, ShapeCache, MEMORY_DOCUMENT};
pub use circle::CircleTemplate;
pub use config::LoaderConfig;
pub use document::ShapeDocument;
pub use element::Element;
pub use error::LoadError;
pub use fixture::FixtureTemplate;
pub use metadata::Metadata;
pub use polygon::PolygonTemplate;
