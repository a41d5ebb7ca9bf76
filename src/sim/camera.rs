//! Camera rig: upward-only camera tracking, boundary walls and spawn squares
//!
//! The camera, the boundary loop, both squares and the ground bar move as one
//! unit. [`CameraRig::follow`] is the only place they are shifted, always by
//! the same delta, so their relative layout never drifts.

use glam::Vec2;

use super::geometry::{Aabb, Viewport};
use super::physics::{Body, BodyId, Category, PhysicsWorld};

/// Camera-anchored geometry of a running scene
#[derive(Debug, Clone)]
pub struct CameraRig {
    camera: Vec2,
    viewport: Viewport,
    /// Side = min(width, height); the area visible in any orientation
    min_square: Aabb,
    /// Side = max(width, height); bounds platform generation
    max_square: Aabb,
    boundary: BodyId,
    ground: BodyId,
}

impl CameraRig {
    /// Build the rig at the scene origin and insert its bodies
    ///
    /// The ground sits on the bottom edge of the small square and spans the
    /// large one.
    pub fn configure(world: &mut PhysicsWorld, viewport: Viewport, ground_height: f32) -> Self {
        let camera = Vec2::ZERO;
        let min_square = Aabb::square(camera, viewport.min_side());
        let max_square = Aabb::square(camera, viewport.max_side());

        let boundary = world.insert(Body::edge_loop(
            Category::Boundary,
            viewport.size(),
            Vec2::ZERO,
        ));

        let ground_pos = Vec2::new(
            max_square.center.x,
            min_square.min_y() + ground_height / 2.0,
        );
        let ground = world.insert(Body::static_rect(
            Category::Platform,
            Vec2::new(viewport.max_side(), ground_height),
            ground_pos,
        ));

        log::info!(
            "Camera rig configured for {}x{} (ground y={:.1})",
            viewport.width,
            viewport.height,
            ground_pos.y
        );

        Self {
            camera,
            viewport,
            min_square,
            max_square,
            boundary,
            ground,
        }
    }

    pub fn camera(&self) -> Vec2 {
        self.camera
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn min_square(&self) -> Aabb {
        self.min_square
    }

    pub fn max_square(&self) -> Aabb {
        self.max_square
    }

    pub fn boundary(&self) -> BodyId {
        self.boundary
    }

    pub fn ground(&self) -> BodyId {
        self.ground
    }

    pub fn boundary_pos(&self, world: &PhysicsWorld) -> Option<Vec2> {
        world.get(self.boundary).map(|b| b.pos)
    }

    pub fn ground_y(&self, world: &PhysicsWorld) -> Option<f32> {
        world.get(self.ground).map(|b| b.pos.y)
    }

    /// Horizontal spawn range: the viewport frame around the camera
    pub fn x_range(&self) -> (f32, f32) {
        let half = self.viewport.width / 2.0;
        (self.camera.x - half, self.camera.x + half)
    }

    /// Move up to the ball if it is above the camera
    ///
    /// Returns the scroll delta, or `None` when the camera stays put.
    pub fn follow(&mut self, world: &mut PhysicsWorld, ball_y: f32) -> Option<f32> {
        if ball_y <= self.camera.y {
            return None;
        }
        let dy = ball_y - self.camera.y;
        self.scroll(world, dy);
        Some(dy)
    }

    fn scroll(&mut self, world: &mut PhysicsWorld, dy: f32) {
        self.camera.y += dy;
        self.min_square = self.min_square.shifted_y(dy);
        self.max_square = self.max_square.shifted_y(dy);
        if let Some(boundary) = world.get_mut(self.boundary) {
            boundary.pos.y += dy;
        }
        if let Some(ground) = world.get_mut(self.ground) {
            ground.pos.y += dy;
        }
    }

    /// Rebuild the boundary for a new viewport size
    ///
    /// The old loop is detached and a new one with the new frame is inserted
    /// where the old one was. Squares keep their centers and take the new
    /// sides. Degenerate sizes are ignored; returns whether anything changed.
    pub fn resize(&mut self, world: &mut PhysicsWorld, viewport: Viewport) -> bool {
        if viewport.is_degenerate() || viewport == self.viewport {
            return false;
        }

        let anchor = world
            .remove(self.boundary)
            .map_or(Vec2::new(0.0, self.camera.y), |old| old.pos);
        self.boundary = world.insert(Body::edge_loop(
            Category::Boundary,
            viewport.size(),
            anchor,
        ));

        self.min_square = self
            .min_square
            .resized(Vec2::splat(viewport.min_side()));
        self.max_square = self
            .max_square
            .resized(Vec2::splat(viewport.max_side()));
        self.viewport = viewport;

        log::info!(
            "Viewport resized to {}x{}",
            viewport.width,
            viewport.height
        );
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::physics::CollisionMatrix;

    fn setup(viewport: Viewport) -> (PhysicsWorld, CameraRig) {
        let mut world = PhysicsWorld::new(Vec2::new(0.0, -980.0), CollisionMatrix::default());
        let rig = CameraRig::configure(&mut world, viewport, 24.0);
        (world, rig)
    }

    #[test]
    fn test_configure_layout() {
        let (world, rig) = setup(Viewport::new(400.0, 800.0));
        assert_eq!(rig.camera(), Vec2::ZERO);
        assert_eq!(rig.min_square().size(), Vec2::splat(400.0));
        assert_eq!(rig.max_square().size(), Vec2::splat(800.0));
        assert_eq!(rig.ground_y(&world), Some(-200.0 + 12.0));
        assert_eq!(world.count(Category::Boundary), 1);
        assert_eq!(rig.x_range(), (-200.0, 200.0));
    }

    #[test]
    fn test_follow_moves_everything_by_delta() {
        let (mut world, mut rig) = setup(Viewport::new(400.0, 800.0));
        let ground_before = rig.ground_y(&world).unwrap();
        let offset = ground_before - rig.min_square().min_y();

        let dy = rig.follow(&mut world, 75.0);

        assert_eq!(dy, Some(75.0));
        assert_eq!(rig.camera().y, 75.0);
        assert_eq!(rig.boundary_pos(&world).unwrap().y, 75.0);
        assert_eq!(rig.min_square().center.y, 75.0);
        assert_eq!(rig.max_square().center.y, 75.0);
        assert_eq!(rig.ground_y(&world).unwrap(), ground_before + 75.0);
        assert_eq!(rig.ground_y(&world).unwrap() - rig.min_square().min_y(), offset);
    }

    #[test]
    fn test_follow_never_moves_down() {
        let (mut world, mut rig) = setup(Viewport::new(400.0, 800.0));
        rig.follow(&mut world, 50.0);
        assert_eq!(rig.follow(&mut world, 10.0), None);
        assert_eq!(rig.follow(&mut world, 50.0), None);
        assert_eq!(rig.camera().y, 50.0);
    }

    #[test]
    fn test_resize_rebuilds_boundary_in_place() {
        let (mut world, mut rig) = setup(Viewport::new(400.0, 800.0));
        rig.follow(&mut world, 120.0);
        let old = rig.boundary();

        assert!(rig.resize(&mut world, Viewport::new(800.0, 400.0)));

        assert_ne!(rig.boundary(), old);
        assert!(!world.contains(old));
        assert_eq!(world.count(Category::Boundary), 1);
        let boundary = world.get(rig.boundary()).unwrap();
        assert_eq!(boundary.pos, Vec2::new(0.0, 120.0));
        assert_eq!(boundary.aabb().size(), Vec2::new(800.0, 400.0));
        assert_eq!(rig.min_square().center.y, 120.0);
    }

    #[test]
    fn test_resize_ignores_placeholder_and_same_size() {
        let (mut world, mut rig) = setup(Viewport::new(400.0, 800.0));
        let boundary = rig.boundary();
        assert!(!rig.resize(&mut world, Viewport::PLACEHOLDER));
        assert!(!rig.resize(&mut world, Viewport::new(400.0, 800.0)));
        assert_eq!(rig.boundary(), boundary);
    }
}
