use super::filter::FilterData;
use super::shape::Shape;
use glam::Vec2;
use rapier2d::prelude::*;

pub use rapier2d::prelude::{ColliderHandle, RigidBodyHandle};

/// Body attributes used when creating a rigid body
///
/// Field names and defaults follow Box2D's `b2BodyDef` so shape documents
/// authored for Box2D behave the same way here.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyDef {
    pub body_type: RigidBodyType,
    pub position: Vec2,
    pub angle: Real,
    pub linear_velocity: Vec2,
    pub angular_velocity: Real,
    pub linear_damping: Real,
    pub angular_damping: Real,
    pub allow_sleep: bool,
    pub fixed_rotation: bool,
    /// Enables continuous collision detection
    pub bullet: bool,
    pub gravity_scale: Real,
}

impl Default for BodyDef {
    fn default() -> Self {
        Self {
            body_type: RigidBodyType::Fixed,
            position: Vec2::ZERO,
            angle: 0.0,
            linear_velocity: Vec2::ZERO,
            angular_velocity: 0.0,
            linear_damping: 0.0,
            angular_damping: 0.0,
            allow_sleep: true,
            fixed_rotation: false,
            bullet: false,
            gravity_scale: 1.0,
        }
    }
}

impl BodyDef {
    /// Create a new dynamic body (affected by forces and collisions)
    pub fn new_dynamic() -> Self {
        Self {
            body_type: RigidBodyType::Dynamic,
            ..Self::default()
        }
    }

    /// Create a new fixed (static) body
    pub fn new_fixed() -> Self {
        Self::default()
    }

    /// Set the initial position of the body
    pub fn position(mut self, x: Real, y: Real) -> Self {
        self.position = Vec2::new(x, y);
        self
    }

    /// Set the initial rotation (radians)
    pub fn angle(mut self, angle: Real) -> Self {
        self.angle = angle;
        self
    }

    /// Set the initial linear velocity
    pub fn linvel(mut self, x: Real, y: Real) -> Self {
        self.linear_velocity = Vec2::new(x, y);
        self
    }

    /// Set the initial angular velocity (radians per second)
    pub fn angvel(mut self, angvel: Real) -> Self {
        self.angular_velocity = angvel;
        self
    }

    pub fn damping(mut self, linear: Real, angular: Real) -> Self {
        self.linear_damping = linear;
        self.angular_damping = angular;
        self
    }

    /// Set the gravity scale (1.0 = normal gravity, 0.0 = no gravity)
    pub fn gravity_scale(mut self, scale: Real) -> Self {
        self.gravity_scale = scale;
        self
    }

    /// Set whether the body can sleep when inactive
    pub fn allow_sleep(mut self, allow_sleep: bool) -> Self {
        self.allow_sleep = allow_sleep;
        self
    }

    /// Lock rotation
    pub fn fixed_rotation(mut self, fixed_rotation: bool) -> Self {
        self.fixed_rotation = fixed_rotation;
        self
    }

    /// Treat as a fast moving body (continuous collision detection)
    pub fn bullet(mut self, bullet: bool) -> Self {
        self.bullet = bullet;
        self
    }

    /// Build the rigid body
    pub fn build(&self) -> RigidBody {
        let locked_axes = if self.fixed_rotation {
            LockedAxes::ROTATION_LOCKED
        } else {
            LockedAxes::empty()
        };

        RigidBodyBuilder::new(self.body_type)
            .position(Isometry::new(
                vector![self.position.x, self.position.y],
                self.angle,
            ))
            .linvel(vector![self.linear_velocity.x, self.linear_velocity.y])
            .angvel(self.angular_velocity)
            .linear_damping(self.linear_damping)
            .angular_damping(self.angular_damping)
            .gravity_scale(self.gravity_scale)
            .can_sleep(self.allow_sleep)
            .ccd_enabled(self.bullet)
            .locked_axes(locked_axes)
            .build()
    }
}

/// Material, filter and shape of a single collider
#[derive(Debug, Clone, PartialEq)]
pub struct FixtureDef {
    pub shape: Shape,
    pub density: Real,
    pub friction: Real,
    pub restitution: Real,
    pub filter: FilterData,
    pub is_sensor: bool,
}

impl FixtureDef {
    /// Create a fixture with Box2D's default material
    pub fn new(shape: Shape) -> Self {
        Self {
            shape,
            density: 0.0,
            friction: 0.2,
            restitution: 0.0,
            filter: FilterData::default(),
            is_sensor: false,
        }
    }

    /// Set density (mass will be calculated from shape area)
    pub fn density(mut self, density: Real) -> Self {
        self.density = density;
        self
    }

    /// Set friction coefficient
    pub fn friction(mut self, friction: Real) -> Self {
        self.friction = friction;
        self
    }

    /// Set restitution/bounciness
    pub fn restitution(mut self, restitution: Real) -> Self {
        self.restitution = restitution;
        self
    }

    /// Set the collision filter
    pub fn filter(mut self, filter: FilterData) -> Self {
        self.filter = filter;
        self
    }

    /// Make this a sensor (detects overlaps but doesn't cause physical response)
    pub fn sensor(mut self, is_sensor: bool) -> Self {
        self.is_sensor = is_sensor;
        self
    }

    /// Build the collider
    ///
    /// The packed filter is stored in the collider's `user_data`. Filters
    /// with a group index switch on the contact and intersection hooks so
    /// [`super::FixtureFilterHooks`] can decide those pairs. Returns `None`
    /// if rapier rejects the shape.
    pub fn build(&self) -> Option<Collider> {
        let shape = self.shape.to_shared_shape()?;

        let builder = ColliderBuilder::new(shape)
            .position(self.shape.local_position())
            .density(self.density)
            .friction(self.friction)
            .restitution(self.restitution)
            // Box2D mixes restitution with max()
            .restitution_combine_rule(CoefficientCombineRule::Max)
            .sensor(self.is_sensor)
            .user_data(self.filter.to_user_data());

        let builder = if self.filter.needs_hooks() {
            builder
                .collision_groups(InteractionGroups::all())
                .active_hooks(ActiveHooks::FILTER_CONTACT_PAIRS | ActiveHooks::FILTER_INTERSECTION_PAIR)
        } else {
            builder.collision_groups(self.filter.to_interaction_groups())
        };

        Some(builder.build())
    }
}
