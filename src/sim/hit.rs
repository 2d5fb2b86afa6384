//! Distance-based hit testing
//!
//! The collision-trigger collaborator (e.g. the creature walking into the
//! resting ball) only needs sphere-overlap checks at arena positions.

use glam::Vec3;

use crate::ground_distance;

/// Sphere overlap test
#[inline]
pub fn spheres_touch(a: Vec3, ra: f32, b: Vec3, rb: f32) -> bool {
    let r = ra + rb;
    a.distance_squared(b) <= r * r
}

/// Overlap test on the ground plane, ignoring height differences. Useful
/// when the ball rests on the floor but the creature's center sits above it.
#[inline]
pub fn ground_circles_touch(a: Vec3, ra: f32, b: Vec3, rb: f32) -> bool {
    ground_distance(a, b) <= ra + rb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spheres_touch() {
        let a = Vec3::ZERO;
        let b = Vec3::new(0.2, 0.0, 0.0);
        assert!(spheres_touch(a, 0.1, b, 0.1));
        assert!(!spheres_touch(a, 0.05, b, 0.05));
    }

    #[test]
    fn test_touching_exactly_at_radius_sum() {
        let a = Vec3::ZERO;
        let b = Vec3::new(0.3, 0.0, 0.0);
        assert!(spheres_touch(a, 0.15, b, 0.15));
    }

    #[test]
    fn test_ground_circles_ignore_height() {
        let ball = Vec3::new(0.0, 0.03, 0.0);
        let creature = Vec3::new(0.1, 0.5, 0.0);
        assert!(ground_circles_touch(ball, 0.03, creature, 0.15));
        assert!(!spheres_touch(ball, 0.03, creature, 0.15));
    }
}
