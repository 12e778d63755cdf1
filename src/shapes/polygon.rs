use super::element::Element;
use super::LoadError;
use crate::core::math::scale_point;
use crate::engine::physics::Shape;
use glam::Vec2;

/// Polygon outline in authoring pixel units, in authoring order
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonTemplate {
    vertices: Vec<Vec2>,
}

impl PolygonTemplate {
    pub(crate) fn from_element(data: &Element) -> Result<Self, LoadError> {
        let floats = parse_floats_csv(data.text())?;

        if floats.len() % 2 != 0 {
            return Err(LoadError::InvalidPolygon(format!(
                "odd number of coordinates ({})",
                floats.len()
            )));
        }

        let vertices = floats
            .chunks_exact(2)
            .map(|xy| Vec2::new(xy[0], xy[1]))
            .collect();

        Ok(Self { vertices })
    }

    /// Raw vertices as authored
    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    /// Polygon shape with each axis scaled independently
    ///
    /// `None` if the scaled outline collapses to fewer than three vertices.
    pub fn shape(&self, scale_x: f32, scale_y: f32) -> Option<Shape> {
        let scaled: Vec<Vec2> = self
            .vertices
            .iter()
            .map(|v| scale_point(*v, scale_x, scale_y))
            .collect();
        Shape::polygon(&scaled)
    }
}

/// Parse `"1.2, 3.4 ,5"` into floats
pub(crate) fn parse_floats_csv(csv: &str) -> Result<Vec<f32>, LoadError> {
    csv.split(',')
        .map(|item| {
            let item = item.trim();
            item.parse::<f32>().map_err(|_| {
                LoadError::InvalidPolygon(format!("{:?} is not a number", item))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn polygon() -> PolygonTemplate {
        let elem = Element::parse(
            "<polygon> 1.0000, 6.0000  ,  19.0000, 6.0000  ,  16.0000, 19.0000  ,  4.0000, 19.0000 </polygon>",
        )
        .unwrap();
        PolygonTemplate::from_element(&elem).unwrap()
    }

    #[test]
    fn test_parse_floats_csv() {
        assert_eq!(parse_floats_csv("1.2, 3.4").unwrap(), vec![1.2, 3.4]);
        assert_eq!(parse_floats_csv(" 5 ,-6.5,7 ").unwrap(), vec![5.0, -6.5, 7.0]);
        assert!(parse_floats_csv("").is_err());
        assert!(parse_floats_csv("1, two").is_err());
    }

    #[test]
    fn test_get_polygon_shape() {
        let template = polygon();
        assert_eq!(template.vertices()[0], Vec2::new(1.0, 6.0));

        let shape = template.shape(1.0, 1.0).unwrap();
        let vertices = shape.vertices();
        assert_eq!(vertices.len(), 4);
        assert_eq!(vertices[0], Vec2::new(19.0, 6.0));
        assert_eq!(vertices[1], Vec2::new(16.0, 19.0));
        assert_eq!(vertices[2], Vec2::new(4.0, 19.0));
        assert_eq!(vertices[3], Vec2::new(1.0, 6.0));

        let shape = template.shape(0.5, 0.25).unwrap();
        assert_relative_eq!(shape.vertices()[0].x, 19.0 * 0.5);
        assert_relative_eq!(shape.vertices()[0].y, 6.0 * 0.25);
    }

    #[test]
    fn test_scaling_does_not_touch_template() {
        let template = polygon();
        let _ = template.shape(0.5, 0.5);
        let shape = template.shape(2.0, 3.0).unwrap();

        assert_eq!(shape.vertices()[0], Vec2::new(38.0, 18.0));
        assert_eq!(template.vertices()[1], Vec2::new(19.0, 6.0));
    }

    #[test]
    fn test_odd_coordinate_count() {
        let elem = Element::parse("<polygon>1, 2, 3</polygon>").unwrap();
        assert!(matches!(
            PolygonTemplate::from_element(&elem),
            Err(LoadError::InvalidPolygon(_))
        ));
    }

    #[test]
    fn test_zero_scale_collapses() {
        assert!(polygon().shape(0.0, 1.0).is_none());
    }
}
