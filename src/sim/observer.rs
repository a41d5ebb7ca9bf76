//! Outward-facing hooks: height reports and audio cues
//!
//! The simulation never owns UI or audio. It calls a [`GameObserver`] that the
//! host injects when creating the session.

use glam::Vec2;

/// Sounds the simulation asks the host to play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCue {
    /// The scene is up and running (background theme)
    Theme,
    /// The ball was launched off a platform
    Launch,
}

/// Capability consumed by the game loop
pub trait GameObserver {
    /// The ball reached a new highest camera position
    fn report_height(&mut self, position: Vec2, interval: f32);

    /// A sound should play
    fn notify_audio_cue(&mut self, cue: AudioCue);
}

/// Observer that ignores everything (headless runs and tests)
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl GameObserver for NoopObserver {
    fn report_height(&mut self, _position: Vec2, _interval: f32) {}

    fn notify_audio_cue(&mut self, _cue: AudioCue) {}
}

/// Height-derived score
///
/// `floor(|y| / interval)`, replaced only when a report beats it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scoreboard {
    score: u64,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    /// Score value for a height
    pub fn value_for(position: Vec2, interval: f32) -> u64 {
        if !(interval > 0.0) {
            return 0;
        }
        (position.y.abs() / interval).floor() as u64
    }

    pub fn reset(&mut self) {
        self.score = 0;
    }
}

impl GameObserver for Scoreboard {
    fn report_height(&mut self, position: Vec2, interval: f32) {
        let value = Self::value_for(position, interval);
        if value > self.score {
            self.score = value;
        }
    }

    fn notify_audio_cue(&mut self, _cue: AudioCue) {}
}
