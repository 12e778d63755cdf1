// Collision shape descriptors

use crate::core::math::cross;
use glam::Vec2;
use rapier2d::prelude::*;

/// Vertices closer than half of this distance are welded together when a
/// polygon is built (Box2D's linear slop)
pub const LINEAR_SLOP: f32 = 0.005;

/// Engine-independent description of a collision shape in physics units
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Circle centred at `center` relative to the body origin
    Circle { center: Vec2, radius: f32 },

    /// Convex polygon, counter-clockwise, starting at the right-most vertex
    Polygon { vertices: Vec<Vec2> },
}

impl Shape {
    /// Create a circle shape
    pub fn circle(center: Vec2, radius: f32) -> Self {
        Shape::Circle { center, radius }
    }

    /// Create a convex polygon from arbitrary points
    ///
    /// Nearly coincident points are welded and the convex hull is wrapped the
    /// same way Box2D's `b2PolygonShape::Set` does, so vertex order matches
    /// what Box2D based loaders produce. Returns `None` when fewer than three
    /// hull vertices remain.
    pub fn polygon(points: &[Vec2]) -> Option<Self> {
        convex_hull(points).map(|vertices| Shape::Polygon { vertices })
    }

    /// Polygon vertices (empty for circles)
    pub fn vertices(&self) -> &[Vec2] {
        match self {
            Shape::Circle { .. } => &[],
            Shape::Polygon { vertices } => vertices,
        }
    }

    /// Offset of the shape relative to its body
    pub fn local_position(&self) -> Isometry<Real> {
        match self {
            Shape::Circle { center, .. } => Isometry::translation(center.x, center.y),
            Shape::Polygon { .. } => Isometry::identity(),
        }
    }

    /// Convert to a rapier shape
    pub fn to_shared_shape(&self) -> Option<SharedShape> {
        match self {
            Shape::Circle { radius, .. } => Some(SharedShape::ball(*radius)),
            Shape::Polygon { vertices } => {
                let points = vertices.iter().map(|v| point![v.x, v.y]).collect();
                SharedShape::convex_polyline(points)
            }
        }
    }
}

/// Gift-wrapping hull starting at the right-most (then lowest) point
fn convex_hull(points: &[Vec2]) -> Option<Vec<Vec2>> {
    let weld_distance_sq = (0.5 * LINEAR_SLOP) * (0.5 * LINEAR_SLOP);

    let mut ps: Vec<Vec2> = Vec::with_capacity(points.len());
    for &p in points {
        if ps.iter().all(|q| p.distance_squared(*q) >= weld_distance_sq) {
            ps.push(p);
        }
    }

    let n = ps.len();
    if n < 3 {
        return None;
    }

    let mut i0 = 0;
    for i in 1..n {
        let (x, x0) = (ps[i].x, ps[i0].x);
        if x > x0 || (x == x0 && ps[i].y < ps[i0].y) {
            i0 = i;
        }
    }

    let mut hull = Vec::with_capacity(n);
    let mut ih = i0;
    loop {
        hull.push(ih);

        let mut ie = 0;
        for j in 1..n {
            if ie == ih {
                ie = j;
                continue;
            }

            let r = ps[ie] - ps[ih];
            let v = ps[j] - ps[ih];
            let c = cross(r, v);
            if c < 0.0 {
                ie = j;
            }

            // Collinear, keep the farthest point
            if c == 0.0 && v.length_squared() > r.length_squared() {
                ie = j;
            }
        }

        ih = ie;
        if ie == i0 || hull.len() > n {
            break;
        }
    }

    if hull.len() < 3 {
        return None;
    }

    Some(hull.into_iter().map(|i| ps[i]).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(x: f32, y: f32) -> Vec2 {
        Vec2::new(x, y)
    }

    #[test]
    fn test_hull_starts_at_rightmost_vertex() {
        let shape = Shape::polygon(&[v(1.0, 6.0), v(19.0, 6.0), v(16.0, 19.0), v(4.0, 19.0)])
            .unwrap();

        assert_eq!(
            shape.vertices(),
            &[v(19.0, 6.0), v(16.0, 19.0), v(4.0, 19.0), v(1.0, 6.0)]
        );
    }

    #[test]
    fn test_clockwise_input_is_reversed() {
        let authored = [v(10.0, 0.0), v(0.0, 0.0), v(0.0, 10.0), v(10.0, 10.0)];
        let shape = Shape::polygon(&authored).unwrap();

        let mut reversed = authored.to_vec();
        reversed.reverse();
        // Same cycle as the reversed input, rotated to the right-most lowest vertex
        assert_eq!(
            shape.vertices(),
            &[v(10.0, 0.0), v(10.0, 10.0), v(0.0, 10.0), v(0.0, 0.0)]
        );
        assert_eq!(shape.vertices()[1..], reversed[..3]);
    }

    #[test]
    fn test_interior_and_duplicate_points_dropped() {
        let shape = Shape::polygon(&[
            v(0.0, 0.0),
            v(4.0, 0.0),
            v(4.0, 0.0001),
            v(2.0, 1.0),
            v(4.0, 4.0),
            v(0.0, 4.0),
        ])
        .unwrap();

        assert_eq!(shape.vertices().len(), 4);
        assert!(!shape.vertices().contains(&v(2.0, 1.0)));
    }

    #[test]
    fn test_degenerate_polygons_rejected() {
        assert!(Shape::polygon(&[v(0.0, 0.0), v(1.0, 1.0)]).is_none());
        assert!(Shape::polygon(&[v(0.0, 0.0), v(1.0, 0.0), v(2.0, 0.0)]).is_none());
        assert!(Shape::polygon(&[v(1.0, 1.0), v(1.0, 1.0), v(1.0, 1.0)]).is_none());
    }

    #[test]
    fn test_circle_conversion() {
        let shape = Shape::circle(v(50.0, 100.0), 5.0);
        assert!(shape.vertices().is_empty());

        let shared = shape.to_shared_shape().unwrap();
        assert_eq!(shared.as_ball().unwrap().radius, 5.0);

        let position = shape.local_position();
        assert_eq!(position.translation.vector, vector![50.0, 100.0]);
    }

    #[test]
    fn test_polygon_conversion() {
        let shape = Shape::polygon(&[v(0.0, 0.0), v(2.0, 0.0), v(2.0, 1.0), v(0.0, 1.0)]).unwrap();
        let shared = shape.to_shared_shape().unwrap();

        assert_eq!(shared.as_convex_polygon().unwrap().points().len(), 4);
        assert_eq!(shape.local_position(), Isometry::identity());
    }
}
