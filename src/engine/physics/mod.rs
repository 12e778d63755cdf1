// Physics layer on top of rapier2d
//
// Engine-side descriptors that shape templates are translated into, and the
// world that owns the resulting bodies and colliders.

pub mod body;
mod filter;
mod shape;
mod world;

pub use body::{BodyDef, ColliderHandle, FixtureDef, RigidBodyHandle};
pub use filter::{FilterData, FixtureFilterHooks};
pub use shape::{Shape, LINEAR_SLOP};
pub use world::PhysicsWorld;

// Re-export commonly used rapier types for convenience
pub use rapier2d::prelude::{Real, RigidBodyType, Vector};
