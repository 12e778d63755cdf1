use super::element::Element;
use super::fixture::FixtureTemplate;
use super::polygon::parse_floats_csv;
use super::LoadError;
use crate::engine::physics::{BodyDef, PhysicsWorld, RigidBodyHandle, RigidBodyType};
use glam::Vec2;
use log::{debug, warn};

/// Parsed `<body>` element: body attributes plus its fixtures
///
/// Templates are never modified by body creation, so the same template can
/// be instantiated any number of times with different scales.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyTemplate {
    name: String,
    pub is_dynamic: bool,
    pub allow_sleep: bool,
    pub fixed_rotation: bool,
    pub bullet: bool,
    pub linear_damping: f32,
    pub angular_damping: f32,
    /// Normalized sprite anchor, when the document provides one
    pub anchor_point: Option<Vec2>,
    fixtures: Vec<FixtureTemplate>,
}

impl BodyTemplate {
    pub(crate) fn from_element(data: &Element) -> Result<Self, LoadError> {
        let name = data.required_attribute("name")?.to_string();

        let anchor_point = match data.child("anchorpoint") {
            Some(anchor) => Some(parse_anchor(anchor.text())?),
            None => None,
        };

        let fixtures = data
            .children_named("fixture")
            .map(FixtureTemplate::from_element)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            name,
            is_dynamic: data.has_child("is_dynamic"),
            allow_sleep: data.has_child("allow_sleep"),
            fixed_rotation: data.has_child("fixed_rotation"),
            bullet: data.has_child("is_bullet"),
            linear_damping: data.parse_value("linear_damping")?,
            angular_damping: data.parse_value("angular_damping")?,
            anchor_point,
            fixtures,
        })
    }

    /// Body name exactly as it appears in the document
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fixtures(&self) -> &[FixtureTemplate] {
        &self.fixtures
    }

    /// Body attributes as authored
    pub fn body_def(&self) -> BodyDef {
        BodyDef {
            body_type: if self.is_dynamic {
                RigidBodyType::Dynamic
            } else {
                RigidBodyType::Fixed
            },
            allow_sleep: self.allow_sleep,
            fixed_rotation: self.fixed_rotation,
            bullet: self.bullet,
            linear_damping: self.linear_damping,
            angular_damping: self.angular_damping,
            ..BodyDef::default()
        }
    }

    /// Create a body using the authored attributes
    pub fn create_body(
        &self,
        world: &mut PhysicsWorld,
        scale_x: f32,
        scale_y: f32,
    ) -> RigidBodyHandle {
        self.create_body_with_def(world, &self.body_def(), scale_x, scale_y)
    }

    /// Create a body with caller supplied attributes and this template's fixtures
    pub fn create_body_with_def(
        &self,
        world: &mut PhysicsWorld,
        def: &BodyDef,
        scale_x: f32,
        scale_y: f32,
    ) -> RigidBodyHandle {
        let handle = world.create_body(def);

        let mut colliders = 0;
        for fixture in &self.fixtures {
            for fixture_def in fixture.fixture_defs(scale_x, scale_y) {
                if world.create_fixture(handle, &fixture_def).is_some() {
                    colliders += 1;
                } else {
                    warn!(
                        "Skipping fixture of body \"{}\": rapier rejected its shape",
                        self.name
                    );
                }
            }
        }

        debug!(
            "Created body \"{}\" with {} colliders at scale ({}, {})",
            self.name, colliders, scale_x, scale_y
        );

        handle
    }
}

fn parse_anchor(text: &str) -> Result<Vec2, LoadError> {
    match parse_floats_csv(text)?.as_slice() {
        [x, y] => Ok(Vec2::new(*x, *y)),
        other => Err(LoadError::Malformed(format!(
            "anchor point needs 2 coordinates, got {}",
            other.len()
        ))),
    }
}
