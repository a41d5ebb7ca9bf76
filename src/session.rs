//! Frame-driven session
//!
//! Hosts deliver pointer, resize and pause events whenever they like; the
//! session queues them and feeds the simulation in fixed steps, so every
//! event lands on a tick boundary.

use glam::Vec2;

use crate::config::GameConfig;
use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::sim::{GameObserver, GameState, TickInput, Viewport, tick};

/// A running game plus the observer it reports to
pub struct Session<O: GameObserver> {
    state: GameState,
    observer: O,
    accumulator: f32,
    /// One-shot input for the next tick
    input: TickInput,
    /// Last usable size, reused on restart
    viewport: Option<Viewport>,
}

impl<O: GameObserver> Session<O> {
    pub fn new(seed: u64, config: GameConfig, observer: O) -> Self {
        Self {
            state: GameState::new(seed, config),
            observer,
            accumulator: 0.0,
            input: TickInput::default(),
            viewport: None,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Queue a viewport size (applied at the next tick)
    pub fn resize(&mut self, width: f32, height: f32) {
        let viewport = Viewport::new(width, height);
        if !viewport.is_degenerate() {
            self.viewport = Some(viewport);
        }
        self.input.viewport = Some(viewport);
    }

    /// Primary pointer went down or moved, in scene coordinates
    pub fn pointer(&mut self, x: f32, y: f32) {
        self.input.pointer = Some(Vec2::new(x, y));
    }

    /// Convert a position on a viewport-sized surface (origin top-left,
    /// y down) to scene coordinates
    pub fn screen_to_scene(&self, x: f32, y: f32) -> Option<Vec2> {
        let scene = self.state.scene()?;
        let viewport = scene.rig.viewport();
        let camera = scene.rig.camera();
        Some(Vec2::new(
            x - viewport.width / 2.0 + camera.x,
            viewport.height / 2.0 - y + camera.y,
        ))
    }

    pub fn pause(&mut self) {
        if self.state.pause() {
            log::info!("Paused");
        }
    }

    pub fn resume(&mut self) {
        if self.state.resume() {
            // Time spent paused must not be replayed
            self.accumulator = 0.0;
            log::info!("Resumed");
        }
    }

    pub fn toggle_pause(&mut self) {
        if self.state.paused {
            self.resume();
        } else {
            self.pause();
        }
    }

    pub fn is_paused(&self) -> bool {
        self.state.paused
    }

    /// Run as many fixed ticks as `frame_dt` covers; returns ticks run
    pub fn update(&mut self, frame_dt: f32) -> u32 {
        // A NaN would poison the accumulator for good
        if !frame_dt.is_finite() {
            return 0;
        }
        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.step();
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        substeps
    }

    /// Run exactly one tick with whatever input is queued
    pub fn step(&mut self) {
        let input = std::mem::take(&mut self.input);
        tick(&mut self.state, &input, SIM_DT, &mut self.observer);
    }

    /// Start over with a new seed; the last viewport is re-applied
    pub fn restart(&mut self, seed: u64) {
        let config = self.state.config.clone();
        let paused = self.state.paused;
        self.state = GameState::new(seed, config);
        self.state.paused = paused;
        self.accumulator = 0.0;
        self.input = TickInput {
            viewport: self.viewport,
            ..Default::default()
        };
        log::info!("Session restarted with seed {}", seed);
    }
}
