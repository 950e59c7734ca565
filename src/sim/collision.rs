//! Collision geometry helpers
//!
//! Shared primitives for the ball's contact resolution: specular
//! reflection and point-to-segment distance.

use glam::Vec2;

/// Reflect a direction off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect(direction: Vec2, normal: Vec2) -> Vec2 {
    direction - 2.0 * direction.dot(normal) * normal
}

/// Distance from `point` to the closest point on segment `a`-`b`
///
/// A degenerate segment collapses to the distance to `a`.
pub fn distance_to_segment(a: Vec2, b: Vec2, point: Vec2) -> f32 {
    let line_vec = b - a;
    let point_vec = point - a;
    let line_len_sq = line_vec.length_squared();

    if line_len_sq < f32::EPSILON {
        return point_vec.length();
    }

    let t = (point_vec.dot(line_vec) / line_len_sq).clamp(0.0, 1.0);
    let closest = a + line_vec * t;
    (point - closest).length()
}
