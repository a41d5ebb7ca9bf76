//! Collision detection and response for the ball
//!
//! The ball is always a circle. It can meet solid boxes (platforms, ground),
//! other circles, and the inside of an edge loop (the screen boundary).

use glam::Vec2;

use super::geometry::Aabb;

/// Result of a collision check
#[derive(Debug, Clone, Copy)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Closest point on the other shape
    pub point: Vec2,
    /// Surface normal pointing toward the ball center
    pub normal: Vec2,
    /// Penetration depth (for position correction)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            point: Vec2::ZERO,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }

    fn hit(point: Vec2, normal: Vec2, penetration: f32) -> Self {
        Self {
            hit: true,
            point,
            normal,
            penetration,
        }
    }
}

/// Check a circle against a solid box
///
/// The normal points from the box toward the circle, so a ball resting on top
/// of a platform gets `normal.y > 0`.
pub fn circle_aabb_collision(center: Vec2, radius: f32, aabb: &Aabb) -> CollisionResult {
    let min = aabb.min();
    let max = aabb.max();
    let closest = center.clamp(min, max);
    let offset = center - closest;
    let dist_sq = offset.length_squared();

    if dist_sq > radius * radius {
        return CollisionResult::miss();
    }

    if dist_sq > 1e-8 {
        let dist = dist_sq.sqrt();
        return CollisionResult::hit(closest, offset / dist, radius - dist);
    }

    // Center is inside the box: push out through the nearest face
    let faces = [
        (center.x - min.x, Vec2::NEG_X, Vec2::new(min.x, center.y)),
        (max.x - center.x, Vec2::X, Vec2::new(max.x, center.y)),
        (center.y - min.y, Vec2::NEG_Y, Vec2::new(center.x, min.y)),
        (max.y - center.y, Vec2::Y, Vec2::new(center.x, max.y)),
    ];
    let (depth, normal, point) = faces
        .into_iter()
        .min_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal))
        .unwrap_or((0.0, Vec2::Y, center));

    CollisionResult::hit(point, normal, depth + radius)
}

/// Check a circle against the inside walls of an edge loop
///
/// Yields one result per wall the circle overlaps (two in a corner). Normals
/// point back into the loop.
pub fn circle_edge_loop_collisions(
    center: Vec2,
    radius: f32,
    frame: &Aabb,
) -> impl Iterator<Item = CollisionResult> {
    let min = frame.min();
    let max = frame.max();

    let left = (center.x - radius < min.x).then(|| {
        CollisionResult::hit(
            Vec2::new(min.x, center.y),
            Vec2::X,
            min.x - (center.x - radius),
        )
    });
    let right = (center.x + radius > max.x).then(|| {
        CollisionResult::hit(
            Vec2::new(max.x, center.y),
            Vec2::NEG_X,
            center.x + radius - max.x,
        )
    });
    let bottom = (center.y - radius < min.y).then(|| {
        CollisionResult::hit(
            Vec2::new(center.x, min.y),
            Vec2::Y,
            min.y - (center.y - radius),
        )
    });
    let top = (center.y + radius > max.y).then(|| {
        CollisionResult::hit(
            Vec2::new(center.x, max.y),
            Vec2::NEG_Y,
            center.y + radius - max.y,
        )
    });

    [left, right, bottom, top].into_iter().flatten()
}

/// Reflect only the normal component, scaled by restitution
///
/// v' = v - (1 + e)(v·n)n. Velocity already leaving the surface is untouched.
pub fn bounce_velocity(velocity: Vec2, normal: Vec2, restitution: f32) -> Vec2 {
    let approach = velocity.dot(normal);
    if approach >= 0.0 {
        return velocity;
    }
    velocity - (1.0 + restitution) * approach * normal
}

#[cfg(test)]
mod tests {
    use super::*;

    fn platform() -> Aabb {
        Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(100.0, 20.0))
    }

    #[test]
    fn test_circle_above_box_normal_points_up() {
        let result = circle_aabb_collision(Vec2::new(10.0, 20.0), 16.0, &platform());
        assert!(result.hit);
        assert!((result.normal - Vec2::Y).length() < 1e-5);
        assert!((result.penetration - 6.0).abs() < 1e-4);
    }

    #[test]
    fn test_circle_below_box_normal_points_down() {
        let result = circle_aabb_collision(Vec2::new(0.0, -20.0), 16.0, &platform());
        assert!(result.hit);
        assert!(result.normal.y < 0.0);
    }

    #[test]
    fn test_circle_misses_box() {
        let result = circle_aabb_collision(Vec2::new(0.0, 40.0), 16.0, &platform());
        assert!(!result.hit);
    }

    #[test]
    fn test_center_inside_box_uses_nearest_face() {
        // 8 units below the top face, 12 above the bottom
        let result = circle_aabb_collision(Vec2::new(0.0, 2.0), 16.0, &platform());
        assert!(result.hit);
        assert_eq!(result.normal, Vec2::Y);
        assert!((result.penetration - 24.0).abs() < 1e-4);
    }

    #[test]
    fn test_edge_loop_inside_is_clear() {
        let frame = Aabb::new(Vec2::ZERO, Vec2::new(400.0, 800.0));
        assert_eq!(circle_edge_loop_collisions(Vec2::ZERO, 16.0, &frame).count(), 0);
    }

    #[test]
    fn test_edge_loop_corner_hits_two_walls() {
        let frame = Aabb::new(Vec2::ZERO, Vec2::new(400.0, 800.0));
        let hits: Vec<_> =
            circle_edge_loop_collisions(Vec2::new(-195.0, 395.0), 16.0, &frame).collect();
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().any(|h| h.normal == Vec2::X));
        assert!(hits.iter().any(|h| h.normal == Vec2::NEG_Y));
    }

    #[test]
    fn test_elastic_bounce_reflects() {
        // Ball moving right, hits vertical wall (normal pointing left)
        let velocity = Vec2::new(100.0, 0.0);
        let normal = Vec2::new(-1.0, 0.0);

        let reflected = bounce_velocity(velocity, normal, 1.0);
        assert!((reflected.x - (-100.0)).abs() < 0.001);
        assert!(reflected.y.abs() < 0.001);
    }

    #[test]
    fn test_bounce_keeps_three_quarters() {
        let bounced = bounce_velocity(Vec2::new(-200.0, 50.0), Vec2::X, 0.75);
        assert!((bounced.x - 150.0).abs() < 1e-3);
        assert!((bounced.y - 50.0).abs() < 1e-3);
    }

    #[test]
    fn test_bounce_ignores_separating_velocity() {
        let v = Vec2::new(200.0, 0.0);
        assert_eq!(bounce_velocity(v, Vec2::X, 0.75), v);
    }
}
