//! Ball controller: the player's body, steering and platform launches

use glam::Vec2;

use super::physics::{Body, BodyId, Category, ContactEvent, PhysicsWorld};
use crate::config::GameConfig;

/// Handle to the single ball body plus its tuning
#[derive(Debug, Clone)]
pub struct BallController {
    body: BodyId,
    radius: f32,
    mass: f32,
    restitution: f32,
    launch_speed: f32,
    steer_force: f32,
}

impl BallController {
    /// Insert a resting ball at `pos`
    pub fn spawn(world: &mut PhysicsWorld, config: &GameConfig, pos: Vec2) -> Self {
        let mut ball = Self {
            body: BodyId::UNASSIGNED,
            radius: config.ball_radius,
            mass: config.ball_mass,
            restitution: config.ball_restitution,
            launch_speed: config.launch_speed,
            steer_force: config.steer_force,
        };
        ball.body = world.insert(ball.new_body(pos));
        ball
    }

    fn new_body(&self, pos: Vec2) -> Body {
        Body::dynamic_circle(
            Category::Ball,
            self.radius,
            self.mass,
            self.restitution,
            pos,
        )
    }

    pub fn body(&self) -> BodyId {
        self.body
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn position(&self, world: &PhysicsWorld) -> Option<Vec2> {
        world.get(self.body).map(|b| b.pos)
    }

    pub fn velocity(&self, world: &PhysicsWorld) -> Option<Vec2> {
        world.get(self.body).map(|b| b.vel)
    }

    /// Push the ball toward the pointer's side
    pub fn steer(&self, world: &mut PhysicsWorld, pointer: Vec2) {
        let Some(body) = world.get_mut(self.body) else {
            return;
        };
        let dir = if pointer.x > body.pos.x { 1.0 } else { -1.0 };
        body.apply_force(Vec2::new(dir * self.steer_force, 0.0));
    }

    /// Launch if the contact is this ball landing on a platform from above
    ///
    /// Returns true when the ball was launched.
    pub fn handle_contact(&self, world: &mut PhysicsWorld, contact: &ContactEvent) -> bool {
        let ours = contact.a == self.body && contact.b_category == Category::Platform;
        if ours && contact.normal.y > 0.0 {
            self.launch(world);
            return true;
        }
        false
    }

    /// Set (not add) the vertical velocity to the launch speed
    pub fn launch(&self, world: &mut PhysicsWorld) {
        if let Some(body) = world.get_mut(self.body) {
            body.vel.y = self.launch_speed;
        }
    }

    /// Replace the body with a fresh one at `pos`
    pub fn respawn_at(&mut self, world: &mut PhysicsWorld, pos: Vec2) {
        world.remove(self.body);
        self.body = world.insert(self.new_body(pos));
        log::debug!("Ball respawned at ({:.1}, {:.1})", pos.x, pos.y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::physics::CollisionMatrix;

    fn setup() -> (PhysicsWorld, BallController) {
        let mut world = PhysicsWorld::new(Vec2::new(0.0, -980.0), CollisionMatrix::default());
        let ball = BallController::spawn(&mut world, &GameConfig::default(), Vec2::ZERO);
        (world, ball)
    }

    fn contact(ball: &BallController, normal: Vec2) -> ContactEvent {
        ContactEvent {
            a: ball.body(),
            a_category: Category::Ball,
            b: BodyId::UNASSIGNED,
            b_category: Category::Platform,
            normal,
        }
    }

    #[test]
    fn test_steer_toward_pointer_side() {
        let (mut world, ball) = setup();
        ball.steer(&mut world, Vec2::new(50.0, 300.0));
        assert_eq!(world.get(ball.body()).unwrap().pending_force(), Vec2::new(500.0, 0.0));

        let (mut world, ball) = setup();
        ball.steer(&mut world, Vec2::new(-50.0, -300.0));
        assert_eq!(world.get(ball.body()).unwrap().pending_force(), Vec2::new(-500.0, 0.0));
    }

    #[test]
    fn test_pointer_at_ball_x_pushes_left() {
        let (mut world, ball) = setup();
        ball.steer(&mut world, Vec2::new(0.0, 0.0));
        assert_eq!(world.get(ball.body()).unwrap().pending_force().x, -500.0);
    }

    #[test]
    fn test_landing_sets_launch_speed() {
        for incoming in [-2000.0, -10.0, 0.0, 350.0] {
            let (mut world, ball) = setup();
            world.get_mut(ball.body()).unwrap().vel = Vec2::new(40.0, incoming);

            assert!(ball.handle_contact(&mut world, &contact(&ball, Vec2::new(0.3, 0.95))));

            let vel = ball.velocity(&world).unwrap();
            assert_eq!(vel.y, 900.0);
            assert_eq!(vel.x, 40.0);
        }
    }

    #[test]
    fn test_hit_from_below_does_not_launch() {
        let (mut world, ball) = setup();
        world.get_mut(ball.body()).unwrap().vel = Vec2::new(0.0, 400.0);
        assert!(!ball.handle_contact(&mut world, &contact(&ball, Vec2::NEG_Y)));
        assert!(!ball.handle_contact(&mut world, &contact(&ball, Vec2::X)));
        assert_eq!(ball.velocity(&world).unwrap().y, 400.0);
    }

    #[test]
    fn test_respawn_keeps_single_ball() {
        let (mut world, mut ball) = setup();
        let old = ball.body();
        world.get_mut(old).unwrap().vel = Vec2::new(100.0, -100.0);

        ball.respawn_at(&mut world, Vec2::new(0.0, 640.0));

        assert!(!world.contains(old));
        assert_eq!(world.count(Category::Ball), 1);
        assert_eq!(ball.position(&world), Some(Vec2::new(0.0, 640.0)));
        assert_eq!(ball.velocity(&world), Some(Vec2::ZERO));
    }
}
