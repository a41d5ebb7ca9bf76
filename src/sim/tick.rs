//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use glam::Vec2;

use super::geometry::Viewport;
use super::observer::{AudioCue, GameObserver};
use super::state::{GameState, Stage};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Primary pointer position in scene coordinates (down or move)
    pub pointer: Option<Vec2>,
    /// Latest viewport size reported by the host
    pub viewport: Option<Viewport>,
}

/// Advance the game state by one fixed timestep
///
/// Order within a tick:
/// 1. Apply a pending viewport (builds the scene or rebuilds the boundary).
/// 2. Stop here if paused or not configured.
/// 3. Theme cue once after the scene is built; steering force from the pointer.
/// 4. If the ball is above the camera: scroll, recycle, report height.
/// 5. Physics step; platform contacts launch the ball.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32, observer: &mut impl GameObserver) {
    if let Some(viewport) = input.viewport {
        apply_viewport(state, viewport);
    }

    if state.paused {
        return;
    }

    let GameState {
        stage,
        rng,
        config,
        time_ticks,
        theme_pending,
        ..
    } = state;
    let Stage::Running(scene) = stage else {
        return;
    };
    let scene = &mut **scene;

    *time_ticks += 1;

    if std::mem::take(theme_pending) {
        observer.notify_audio_cue(AudioCue::Theme);
    }

    if let Some(pointer) = input.pointer {
        scene.ball.steer(&mut scene.world, pointer);
    }

    if let Some(ball_pos) = scene.ball_position() {
        if scene.rig.follow(&mut scene.world, ball_pos.y).is_some() {
            let x_range = scene.rig.x_range();
            let upper = scene.rig.max_square().max_y();
            if let Some(ground_y) = scene.rig.ground_y(&scene.world) {
                scene
                    .platforms
                    .recycle(&mut scene.world, rng, x_range, upper, ground_y);
            }
            observer.report_height(ball_pos, config.score_interval);
        }
    }

    let contacts = scene.world.step(dt);
    for contact in &contacts {
        if scene.ball.handle_contact(&mut scene.world, contact) {
            observer.notify_audio_cue(AudioCue::Launch);
        }
    }
}

fn apply_viewport(state: &mut GameState, viewport: Viewport) {
    if !state.is_configured() {
        state.configure(viewport);
        return;
    }
    if let Some(scene) = state.scene_mut() {
        scene.apply_viewport(viewport);
    }
}
