//! Game state and scene assembly
//!
//! A game starts [`Stage::Unconfigured`]: nothing can be placed until the host
//! reports a real viewport size. The first usable size builds the [`Scene`].

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::ball::BallController;
use super::camera::CameraRig;
use super::geometry::Viewport;
use super::physics::{CollisionMatrix, PhysicsWorld};
use super::platforms::PlatformField;
use crate::config::GameConfig;

/// Everything that exists once the viewport is known
#[derive(Debug, Clone)]
pub struct Scene {
    pub world: PhysicsWorld,
    pub ball: BallController,
    pub rig: CameraRig,
    pub platforms: PlatformField,
}

impl Scene {
    /// Build the world for a viewport: camera, boundary, squares, ground,
    /// ball at the camera, then platforms up to the large square's top
    pub fn build(config: &GameConfig, viewport: Viewport, rng: &mut Pcg32) -> Self {
        let mut world = PhysicsWorld::new(Vec2::new(0.0, config.gravity), CollisionMatrix::default());
        let rig = CameraRig::configure(&mut world, viewport, config.ground_height);
        let ball = BallController::spawn(&mut world, config, rig.camera());

        let mut platforms = PlatformField::new(
            config.spawn_interval,
            Vec2::new(config.platform_width, config.platform_height),
        );
        if let Some(ground_y) = rig.ground_y(&world) {
            platforms.populate(
                &mut world,
                rng,
                ground_y,
                rig.x_range(),
                rig.max_square().max_y(),
            );
        }

        Self {
            world,
            ball,
            rig,
            platforms,
        }
    }

    pub fn ball_position(&self) -> Option<Vec2> {
        self.ball.position(&self.world)
    }

    /// Apply a new viewport size
    ///
    /// Returns true if the ball had to be moved back to the camera because it
    /// ended up outside the small square.
    pub fn apply_viewport(&mut self, viewport: Viewport) -> bool {
        if !self.rig.resize(&mut self.world, viewport) {
            return false;
        }

        let inside = self
            .ball_position()
            .is_some_and(|pos| self.rig.min_square().contains(pos));
        if inside {
            return false;
        }

        let camera = self.rig.camera();
        self.ball.respawn_at(&mut self.world, camera);
        log::info!("Ball left the visible area on resize - moved to camera");
        true
    }
}

/// Whether the world has been built yet
#[derive(Debug, Clone)]
pub enum Stage {
    /// Waiting for a usable viewport
    Unconfigured,
    Running(Box<Scene>),
}

/// Complete game state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub config: GameConfig,
    /// Simulation ticks advanced (paused ticks are not counted)
    pub time_ticks: u64,
    /// Physics and recycling are frozen while set
    pub paused: bool,
    pub stage: Stage,
    pub(crate) rng: Pcg32,
    /// Scene was built but the theme has not been announced yet
    pub(crate) theme_pending: bool,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64, config: GameConfig) -> Self {
        Self {
            seed,
            config,
            time_ticks: 0,
            paused: false,
            stage: Stage::Unconfigured,
            rng: Pcg32::seed_from_u64(seed),
            theme_pending: false,
        }
    }

    /// Build the scene if it does not exist yet
    ///
    /// Returns true when this call built it.
    pub fn configure(&mut self, viewport: Viewport) -> bool {
        if viewport.is_degenerate() || self.is_configured() {
            return false;
        }
        let scene = Scene::build(&self.config, viewport, &mut self.rng);
        log::info!(
            "Scene configured: {} platforms, seed {}",
            scene.platforms.len(),
            self.seed
        );
        self.stage = Stage::Running(Box::new(scene));
        self.theme_pending = true;
        true
    }

    pub fn is_configured(&self) -> bool {
        matches!(self.stage, Stage::Running(_))
    }

    pub fn scene(&self) -> Option<&Scene> {
        match &self.stage {
            Stage::Running(scene) => Some(scene),
            Stage::Unconfigured => None,
        }
    }

    pub fn scene_mut(&mut self) -> Option<&mut Scene> {
        match &mut self.stage {
            Stage::Running(scene) => Some(scene),
            Stage::Unconfigured => None,
        }
    }

    /// Freeze the simulation; returns false if already paused
    pub fn pause(&mut self) -> bool {
        if self.paused {
            return false;
        }
        self.paused = true;
        true
    }

    /// Unfreeze the simulation; returns false if already running
    pub fn resume(&mut self) -> bool {
        if !self.paused {
            return false;
        }
        self.paused = false;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::physics::Category;

    #[test]
    fn test_starts_unconfigured() {
        let state = GameState::new(1, GameConfig::default());
        assert!(!state.is_configured());
        assert!(state.scene().is_none());
    }

    #[test]
    fn test_placeholder_does_not_configure() {
        let mut state = GameState::new(1, GameConfig::default());
        assert!(!state.configure(Viewport::PLACEHOLDER));
        assert!(!state.is_configured());
    }

    #[test]
    fn test_configure_builds_scene_once() {
        let mut state = GameState::new(1, GameConfig::default());
        assert!(state.configure(Viewport::new(400.0, 800.0)));
        assert!(!state.configure(Viewport::new(800.0, 400.0)));

        let scene = state.scene().unwrap();
        assert_eq!(scene.world.count(Category::Ball), 1);
        assert_eq!(scene.world.count(Category::Boundary), 1);
        assert_eq!(scene.ball_position(), Some(Vec2::ZERO));
        // Ground at -188; platforms at -88, 12, ... while y < 400
        assert_eq!(scene.platforms.len(), 5);
        assert!(scene.platforms.is_sorted());
    }

    #[test]
    fn test_resize_teleports_ball_outside_min_square() {
        let mut state = GameState::new(1, GameConfig::default());
        state.configure(Viewport::new(400.0, 800.0));
        let scene = state.scene_mut().unwrap();

        let old = scene.ball.body();
        scene.world.get_mut(old).unwrap().pos = Vec2::new(0.0, -300.0);

        assert!(scene.apply_viewport(Viewport::new(800.0, 400.0)));
        assert_eq!(scene.ball_position(), Some(scene.rig.camera()));
        assert_eq!(scene.world.count(Category::Ball), 1);
        assert!(!scene.world.contains(old));
    }

    #[test]
    fn test_resize_keeps_ball_inside_min_square() {
        let mut state = GameState::new(1, GameConfig::default());
        state.configure(Viewport::new(400.0, 800.0));
        let scene = state.scene_mut().unwrap();
        let body = scene.ball.body();
        scene.world.get_mut(body).unwrap().pos = Vec2::new(50.0, 80.0);

        assert!(!scene.apply_viewport(Viewport::new(800.0, 400.0)));
        assert_eq!(scene.ball.body(), body);
        assert_eq!(scene.ball_position(), Some(Vec2::new(50.0, 80.0)));
    }

    #[test]
    fn test_pause_resume_idempotent() {
        let mut state = GameState::new(1, GameConfig::default());
        assert!(state.pause());
        assert!(!state.pause());
        assert!(state.paused);
        assert!(state.resume());
        assert!(!state.resume());
        assert!(!state.paused);
    }
}
