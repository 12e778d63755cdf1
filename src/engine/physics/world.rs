use rapier2d::prelude::*;

use super::body::{BodyDef, FixtureDef};
use super::filter::FixtureFilterHooks;

/// Physics world that owns every body and collider created from shape templates
pub struct PhysicsWorld {
    /// Gravity vector (default: -9.81 m/s² in y-axis)
    gravity: Vector<Real>,

    /// Integration parameters for the physics simulation
    integration_parameters: IntegrationParameters,

    /// Physics pipeline handles collision detection and solving
    physics_pipeline: PhysicsPipeline,

    /// Island manager for sleeping bodies
    island_manager: IslandManager,

    /// Broad phase collision detection
    broad_phase: DefaultBroadPhase,

    /// Narrow phase collision detection
    narrow_phase: NarrowPhase,

    /// Impulse joint set
    impulse_joint_set: ImpulseJointSet,

    /// Multibody joint set
    multibody_joint_set: MultibodyJointSet,

    /// CCD solver for bullet bodies
    ccd_solver: CCDSolver,

    /// Rigid body set
    rigid_body_set: RigidBodySet,

    /// Collider set
    collider_set: ColliderSet,

    /// Group index filtering for fixtures
    hooks: FixtureFilterHooks,
}

impl PhysicsWorld {
    /// Create a new physics world with default settings
    pub fn new() -> Self {
        Self::with_gravity(vector![0.0, -9.81])
    }

    /// Create a new physics world with custom gravity
    pub fn with_gravity(gravity: Vector<Real>) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        // Fixed timestep of 1/60 seconds (60 FPS)
        integration_parameters.dt = 1.0 / 60.0;

        Self {
            gravity,
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            hooks: FixtureFilterHooks,
        }
    }

    /// Step the physics simulation forward by one timestep
    pub fn step(&mut self) {
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            None,
            &self.hooks,
            &(),
        );
    }

    /// Create a rigid body from its definition
    pub fn create_body(&mut self, def: &BodyDef) -> RigidBodyHandle {
        self.add_rigid_body(def.build())
    }

    /// Create a collider on an existing body
    ///
    /// Returns `None` when the shape is rejected by rapier or the parent body
    /// does not exist.
    pub fn create_fixture(
        &mut self,
        parent_handle: RigidBodyHandle,
        def: &FixtureDef,
    ) -> Option<ColliderHandle> {
        if !self.rigid_body_set.contains(parent_handle) {
            return None;
        }

        def.build()
            .map(|collider| self.add_collider(collider, parent_handle))
    }

    /// Add a rigid body to the physics world
    pub fn add_rigid_body(&mut self, body: RigidBody) -> RigidBodyHandle {
        self.rigid_body_set.insert(body)
    }

    /// Add a collider attached to a rigid body
    pub fn add_collider(
        &mut self,
        collider: Collider,
        parent_handle: RigidBodyHandle,
    ) -> ColliderHandle {
        self.collider_set
            .insert_with_parent(collider, parent_handle, &mut self.rigid_body_set)
    }

    /// Remove a rigid body and all its attached colliders
    pub fn remove_rigid_body(&mut self, handle: RigidBodyHandle) {
        self.rigid_body_set.remove(
            handle,
            &mut self.island_manager,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            true, // remove attached colliders
        );
    }

    /// Get a reference to a rigid body
    pub fn get_rigid_body(&self, handle: RigidBodyHandle) -> Option<&RigidBody> {
        self.rigid_body_set.get(handle)
    }

    /// Get a reference to a collider
    pub fn get_collider(&self, handle: ColliderHandle) -> Option<&Collider> {
        self.collider_set.get(handle)
    }

    /// Colliders attached to a body, in creation order
    pub fn body_colliders(&self, handle: RigidBodyHandle) -> &[ColliderHandle] {
        self.rigid_body_set
            .get(handle)
            .map(|body| body.colliders())
            .unwrap_or(&[])
    }

    /// Number of bodies in the world
    pub fn body_count(&self) -> usize {
        self.rigid_body_set.len()
    }

    /// Number of colliders in the world
    pub fn collider_count(&self) -> usize {
        self.collider_set.len()
    }

    /// Set gravity for the physics world
    pub fn set_gravity(&mut self, gravity: Vector<Real>) {
        self.gravity = gravity;
    }

    /// Get current gravity
    pub fn gravity(&self) -> Vector<Real> {
        self.gravity
    }

    /// Set the timestep for physics simulation
    pub fn set_timestep(&mut self, dt: Real) {
        self.integration_parameters.dt = dt;
    }

    /// Get the current timestep
    pub fn timestep(&self) -> Real {
        self.integration_parameters.dt
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::physics::{FilterData, Shape};
    use glam::Vec2;

    fn ball(radius: Real) -> FixtureDef {
        FixtureDef::new(Shape::circle(Vec2::ZERO, radius)).density(1.0)
    }

    #[test]
    fn test_create_body_with_fixtures() {
        let mut world = PhysicsWorld::new();
        let body = world.create_body(&BodyDef::new_dynamic().position(1.0, 2.0));

        let first = world.create_fixture(body, &ball(0.5)).unwrap();
        let second = world.create_fixture(body, &ball(0.25)).unwrap();

        assert_eq!(world.body_count(), 1);
        assert_eq!(world.collider_count(), 2);
        assert_eq!(world.body_colliders(body), &[first, second]);
        assert_eq!(world.get_collider(first).unwrap().parent(), Some(body));
    }

    #[test]
    fn test_create_fixture_on_missing_body() {
        let mut world = PhysicsWorld::new();
        let body = world.create_body(&BodyDef::new_fixed());
        world.remove_rigid_body(body);

        assert!(world.create_fixture(body, &ball(1.0)).is_none());
        assert!(world.body_colliders(body).is_empty());
    }

    #[test]
    fn test_rejected_shape_adds_no_collider() {
        let mut world = PhysicsWorld::new();
        let body = world.create_body(&BodyDef::new_dynamic());
        let empty = FixtureDef::new(Shape::Polygon { vertices: Vec::new() });

        assert!(world.create_fixture(body, &empty).is_none());
        assert_eq!(world.collider_count(), 0);
    }

    #[test]
    fn test_dynamic_body_falls() {
        let mut world = PhysicsWorld::new();
        let body = world.create_body(&BodyDef::new_dynamic());
        world.create_fixture(body, &ball(0.5));

        for _ in 0..10 {
            world.step();
        }

        assert!(world.get_rigid_body(body).unwrap().translation().y < 0.0);
    }

    #[test]
    fn test_negative_group_pair_does_not_collide() {
        let mut world = PhysicsWorld::with_gravity(vector![0.0, 0.0]);
        let ghost = FilterData::new(1, 0xFFFF, -1);

        let a = world.create_body(&BodyDef::new_dynamic().position(0.0, 0.0).linvel(1.0, 0.0));
        let b = world.create_body(&BodyDef::new_dynamic().position(0.5, 0.0));
        world.create_fixture(a, &ball(0.5).filter(ghost));
        world.create_fixture(b, &ball(0.5).filter(ghost));

        for _ in 0..5 {
            world.step();
        }

        // No contact impulse, so b keeps still while a passes through
        let b_vel = world.get_rigid_body(b).unwrap().linvel().x;
        assert_eq!(b_vel, 0.0);
    }

    #[test]
    fn test_group_collider_respects_plain_mask() {
        let mut world = PhysicsWorld::with_gravity(vector![0.0, 0.0]);
        // Interaction groups let this pair through; only the hook can reject it
        let grouped = FilterData::new(0b01, 0xFFFF, 2);
        let picky = FilterData::new(0b10, 0b10, 0);

        let a = world.create_body(&BodyDef::new_dynamic().position(0.0, 0.0).linvel(1.0, 0.0));
        let b = world.create_body(&BodyDef::new_dynamic().position(0.5, 0.0));
        world.create_fixture(a, &ball(0.5).filter(grouped));
        world.create_fixture(b, &ball(0.5).filter(picky));

        for _ in 0..5 {
            world.step();
        }

        // b's mask does not accept a's category
        let b_vel = world.get_rigid_body(b).unwrap().linvel().x;
        assert_eq!(b_vel, 0.0);
    }

    #[test]
    fn test_positive_group_overrides_masks() {
        let mut world = PhysicsWorld::with_gravity(vector![0.0, 0.0]);
        // Masks alone would reject the pair
        let friends = FilterData::new(0b01, 0b00, 3);

        let a = world.create_body(&BodyDef::new_dynamic().position(0.0, 0.0).linvel(1.0, 0.0));
        let b = world.create_body(&BodyDef::new_dynamic().position(0.5, 0.0));
        world.create_fixture(a, &ball(0.5).filter(friends));
        world.create_fixture(b, &ball(0.5).filter(friends));

        for _ in 0..5 {
            world.step();
        }

        // Contact pushed b along
        let b_vel = world.get_rigid_body(b).unwrap().linvel().x;
        assert!(b_vel > 0.0);
    }

    #[test]
    fn test_gravity_and_timestep() {
        let mut world = PhysicsWorld::default();
        assert_eq!(world.gravity(), vector![0.0, -9.81]);

        world.set_gravity(vector![0.0, 0.0]);
        world.set_timestep(1.0 / 30.0);
        assert_eq!(world.gravity(), vector![0.0, 0.0]);
        assert_eq!(world.timestep(), 1.0 / 30.0);
    }
}
