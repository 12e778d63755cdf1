use super::element::Element;
use super::LoadError;
use crate::engine::physics::Shape;
use glam::Vec2;

/// Circle in authoring pixel units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleTemplate {
    center: Vec2,
    radius: f32,
}

impl CircleTemplate {
    pub(crate) fn from_element(data: &Element) -> Result<Self, LoadError> {
        Ok(Self {
            center: Vec2::new(data.parse_attribute("x")?, data.parse_attribute("y")?),
            radius: data.parse_attribute("r")?,
        })
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Circle shape scaled uniformly by `scale`
    pub fn shape(&self, scale: f32) -> Shape {
        Shape::circle(self.center * scale, self.radius * scale)
    }
}
