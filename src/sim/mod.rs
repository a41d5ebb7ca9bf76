//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by body ID)
//! - No rendering or platform dependencies

pub mod ball;
pub mod camera;
pub mod collision;
pub mod geometry;
pub mod observer;
pub mod physics;
pub mod platforms;
pub mod state;
pub mod tick;

pub use ball::BallController;
pub use camera::CameraRig;
pub use collision::{CollisionResult, bounce_velocity};
pub use geometry::{Aabb, Viewport};
pub use observer::{AudioCue, GameObserver, NoopObserver, Scoreboard};
pub use physics::{
    Body, BodyId, Category, CollisionMatrix, ContactEvent, Interaction, PhysicsWorld, Shape,
};
pub use platforms::{Platform, PlatformField, Recycle};
pub use state::{GameState, Scene, Stage};
pub use tick::{TickInput, tick};
