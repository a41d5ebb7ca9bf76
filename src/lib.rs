//! Light Ball - an endless vertical jumper
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, world scrolling, platform recycling)
//! - `session`: Frame-driven wrapper that owns the simulation and its observer
//! - `config`: Data-driven tuning loaded from JSON
//! - `audio`: Web Audio cue playback (wasm only)

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod config;
pub mod error;
pub mod session;
pub mod sim;

pub use config::GameConfig;
pub use error::ConfigError;
pub use session::Session;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz for smooth physics)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta the session will accumulate (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Downward acceleration applied to dynamic bodies (units/s²)
    pub const GRAVITY: f32 = -980.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 16.0;
    pub const BALL_MASS: f32 = 0.05;
    /// Fraction of normal speed kept after a wall bounce
    pub const BALL_RESTITUTION: f32 = 0.75;
    /// Vertical speed set when the ball lands on a platform
    pub const LAUNCH_SPEED: f32 = 900.0;
    /// Horizontal force applied per pointer event
    pub const STEER_FORCE: f32 = 500.0;

    /// Platform extent
    pub const PLATFORM_WIDTH: f32 = 96.0;
    pub const PLATFORM_HEIGHT: f32 = 16.0;
    /// Ground bar thickness (its width spans the large square)
    pub const GROUND_HEIGHT: f32 = 24.0;

    /// Vertical distance between consecutive platforms
    pub const SPAWN_INTERVAL: f32 = 100.0;
    /// Height that earns one point
    pub const SCORE_INTERVAL: f32 = 100.0;

    /// Default cue loudness (0.0 - 1.0)
    pub const MASTER_VOLUME: f32 = 0.8;
}
