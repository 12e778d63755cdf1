// Math utilities and helper functions

use glam::Vec2;

/// 2D cross product (z component of the 3D cross product)
pub fn cross(a: Vec2, b: Vec2) -> f32 {
    a.x * b.y - a.y * b.x
}

/// Scale a point independently along each axis
pub fn scale_point(point: Vec2, scale_x: f32, scale_y: f32) -> Vec2 {
    Vec2::new(point.x * scale_x, point.y * scale_y)
}
