use super::circle::CircleTemplate;
use super::element::Element;
use super::polygon::PolygonTemplate;
use super::LoadError;
use crate::engine::physics::{FilterData, FixtureDef, Shape};
use log::warn;

/// Material, filter and shapes of one `<fixture>` element
#[derive(Debug, Clone, PartialEq)]
pub struct FixtureTemplate {
    pub density: f32,
    pub friction: f32,
    pub restitution: f32,
    pub filter: FilterData,
    pub is_sensor: bool,
    circle: Option<CircleTemplate>,
    polygons: Vec<PolygonTemplate>,
}

impl FixtureTemplate {
    pub(crate) fn from_element(data: &Element) -> Result<Self, LoadError> {
        // Filter values are 16 bit in Box2D, wider input is truncated
        let category: i32 = data.parse_value("filter_category_bits")?;
        let group: i32 = data.parse_value("filter_group_index")?;
        let mask: i32 = data.parse_value("filter_mask_bits")?;

        let circle = data
            .child("circle")
            .map(CircleTemplate::from_element)
            .transpose()?;

        let polygons = data
            .children_named("polygon")
            .map(PolygonTemplate::from_element)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            density: data.parse_value("density")?,
            friction: data.parse_value("friction")?,
            restitution: data.parse_value("restitution")?,
            filter: FilterData::new(category as u16, mask as u16, group as i16),
            is_sensor: data.has_child("is_sensor"),
            circle,
            polygons,
        })
    }

    pub fn circle(&self) -> Option<&CircleTemplate> {
        self.circle.as_ref()
    }

    pub fn polygons(&self) -> &[PolygonTemplate] {
        &self.polygons
    }

    /// Number of colliders this fixture turns into
    pub fn shape_count(&self) -> usize {
        self.circle.iter().len() + self.polygons.len()
    }

    /// Fixture definitions for the given scale: the circle first, then one per polygon
    ///
    /// Circles only use `scale_x`. Polygons that collapse under the scale are
    /// skipped.
    pub fn fixture_defs(&self, scale_x: f32, scale_y: f32) -> Vec<FixtureDef> {
        let mut defs = Vec::with_capacity(self.shape_count());

        if let Some(circle) = &self.circle {
            defs.push(self.fixture_def(circle.shape(scale_x)));
        }

        for polygon in &self.polygons {
            match polygon.shape(scale_x, scale_y) {
                Some(shape) => defs.push(self.fixture_def(shape)),
                None => warn!(
                    "Skipping degenerate polygon with {} vertices at scale ({}, {})",
                    polygon.vertices().len(),
                    scale_x,
                    scale_y
                ),
            }
        }

        defs
    }

    fn fixture_def(&self, shape: Shape) -> FixtureDef {
        FixtureDef::new(shape)
            .density(self.density)
            .friction(self.friction)
            .restitution(self.restitution)
            .filter(self.filter)
            .sensor(self.is_sensor)
    }
}
