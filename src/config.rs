//! Game tuning
//!
//! Every physics and world-generation constant can be overridden from a JSON
//! document. Missing keys fall back to [`crate::consts`], so a config only
//! needs the values it changes.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Runtime-tunable simulation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === World ===
    /// Vertical acceleration for dynamic bodies (negative = down)
    pub gravity: f32,

    // === Ball ===
    pub ball_radius: f32,
    pub ball_mass: f32,
    pub ball_restitution: f32,
    /// Vertical speed set on a platform landing
    pub launch_speed: f32,
    /// Horizontal force per pointer event
    pub steer_force: f32,

    // === Platforms ===
    pub platform_width: f32,
    pub platform_height: f32,
    pub ground_height: f32,
    /// Vertical step between platforms
    pub spawn_interval: f32,

    // === Scoring ===
    /// Height per point
    pub score_interval: f32,

    // === Audio ===
    /// Cue loudness (0.0 - 1.0)
    pub master_volume: f32,
    pub muted: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,

            ball_radius: BALL_RADIUS,
            ball_mass: BALL_MASS,
            ball_restitution: BALL_RESTITUTION,
            launch_speed: LAUNCH_SPEED,
            steer_force: STEER_FORCE,

            platform_width: PLATFORM_WIDTH,
            platform_height: PLATFORM_HEIGHT,
            ground_height: GROUND_HEIGHT,
            spawn_interval: SPAWN_INTERVAL,

            score_interval: SCORE_INTERVAL,

            master_volume: MASTER_VOLUME,
            muted: false,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("ball_radius", self.ball_radius),
            ("ball_mass", self.ball_mass),
            ("platform_width", self.platform_width),
            ("platform_height", self.platform_height),
            ("ground_height", self.ground_height),
            ("spawn_interval", self.spawn_interval),
            ("score_interval", self.score_interval),
        ];
        for (name, value) in positive {
            if !(value > 0.0 && value.is_finite()) {
                return Err(ConfigError::OutOfRange {
                    name,
                    value,
                    expected: "(0, ∞)",
                });
            }
        }

        if !(0.0..=1.0).contains(&self.master_volume) {
            return Err(ConfigError::OutOfRange {
                name: "master_volume",
                value: self.master_volume,
                expected: "[0, 1]",
            });
        }

        if !(0.0..=1.0).contains(&self.ball_restitution) {
            return Err(ConfigError::OutOfRange {
                name: "ball_restitution",
                value: self.ball_restitution,
                expected: "[0, 1]",
            });
        }

        for (name, value) in [
            ("gravity", self.gravity),
            ("launch_speed", self.launch_speed),
            ("steer_force", self.steer_force),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::OutOfRange {
                    name,
                    value,
                    expected: "a finite number",
                });
            }
        }

        Ok(())
    }

    /// Environment variable naming a JSON config file (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub const PATH_ENV: &'static str = "LIGHTBALL_CONFIG";

    /// Read a config file from disk
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_path(path: &str) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Load from `LIGHTBALL_CONFIG` if set, otherwise defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(path) = std::env::var(Self::PATH_ENV) else {
            return Self::default();
        };
        match Self::from_path(&path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path);
                config
            }
            Err(err) => {
                log::warn!("{} - using defaults", err);
                Self::default()
            }
        }
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "lightball_config";

    /// Load config from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(config) => {
                        log::info!("Loaded config from LocalStorage");
                        return config;
                    }
                    Err(err) => log::warn!("{} - using defaults", err),
                }
            }
        }

        Self::default()
    }
}
