//! Light Ball entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, PointerEvent};

    use lightball::audio::AudioManager;
    use lightball::consts::SIM_DT;
    use lightball::sim::{AudioCue, GameObserver, Scene, Scoreboard};
    use lightball::{GameConfig, Session};

    const BACKGROUND: &str = "#10131c";
    const BALL_COLOR: &str = "#fff6c8";
    const PLATFORM_COLOR: &str = "#5fa8d3";
    const GROUND_COLOR: &str = "#3a4a63";
    const TEXT_COLOR: &str = "#f4f4f4";

    /// Forwards simulation callbacks to the score and the speakers
    struct WebObserver {
        board: Scoreboard,
        audio: AudioManager,
    }

    impl GameObserver for WebObserver {
        fn report_height(&mut self, position: Vec2, interval: f32) {
            self.board.report_height(position, interval);
        }

        fn notify_audio_cue(&mut self, cue: AudioCue) {
            self.audio.play(cue);
        }
    }

    /// Game instance holding all state
    struct Game {
        session: Session<WebObserver>,
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
        last_time: f64,
        pointer_down: bool,
    }

    impl Game {
        /// Match the backing store to the element size and tell the session
        fn sync_size(&mut self) {
            let dpr = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio());
            let client_w = self.canvas.client_width();
            let client_h = self.canvas.client_height();
            self.canvas.set_width((client_w as f64 * dpr) as u32);
            self.canvas.set_height((client_h as f64 * dpr) as u32);
            let _ = self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
            self.session.resize(client_w as f32, client_h as f32);
        }

        fn pointer(&mut self, event: &PointerEvent) {
            if !event.is_primary() {
                return;
            }
            let x = event.offset_x() as f32;
            let y = event.offset_y() as f32;
            if let Some(pos) = self.session.screen_to_scene(x, y) {
                self.session.pointer(pos.x, pos.y);
            }
        }

        fn pause(&mut self) {
            self.session.pause();
            self.sync_audio();
        }

        fn resume(&mut self) {
            self.session.resume();
            self.sync_audio();
        }

        fn toggle_pause(&mut self) {
            self.session.toggle_pause();
            self.sync_audio();
        }

        /// Audio runs only while the game does
        fn sync_audio(&self) {
            let audio = &self.session.observer().audio;
            if self.session.is_paused() {
                audio.suspend();
            } else {
                audio.resume();
            }
        }

        /// Draw the current frame
        fn render(&self) {
            let ctx = &self.ctx;
            let w = self.canvas.client_width() as f64;
            let h = self.canvas.client_height() as f64;

            ctx.set_fill_style_str(BACKGROUND);
            ctx.fill_rect(0.0, 0.0, w, h);

            if let Some(scene) = self.session.state().scene() {
                self.draw_scene(scene, w, h);
            }

            ctx.set_fill_style_str(TEXT_COLOR);
            ctx.set_font("bold 28px sans-serif");
            ctx.set_text_align("center");
            let score = self.session.observer().board.score();
            let _ = ctx.fill_text(&score.to_string(), w / 2.0, 48.0);

            if self.session.is_paused() {
                ctx.set_font("bold 40px sans-serif");
                let _ = ctx.fill_text("Paused", w / 2.0, h / 2.0);
            }
        }

        fn draw_scene(&self, scene: &Scene, w: f64, h: f64) {
            let ctx = &self.ctx;
            let camera = scene.rig.camera();
            // Scene y grows upward, canvas y grows downward
            let to_screen = |p: Vec2| {
                (
                    (p.x - camera.x) as f64 + w / 2.0,
                    h / 2.0 - (p.y - camera.y) as f64,
                )
            };
            let fill_box = |center: Vec2, size: Vec2| {
                let (x, y) = to_screen(center);
                ctx.fill_rect(
                    x - size.x as f64 / 2.0,
                    y - size.y as f64 / 2.0,
                    size.x as f64,
                    size.y as f64,
                );
            };

            if let Some(ground) = scene.world.get(scene.rig.ground()) {
                ctx.set_fill_style_str(GROUND_COLOR);
                fill_box(ground.pos, ground.aabb().size());
            }

            ctx.set_fill_style_str(PLATFORM_COLOR);
            for platform in scene.platforms.iter() {
                if let Some(body) = scene.world.get(platform.body) {
                    fill_box(body.pos, body.aabb().size());
                }
            }

            if let Some(pos) = scene.ball_position() {
                let (x, y) = to_screen(pos);
                ctx.set_fill_style_str(BALL_COLOR);
                ctx.begin_path();
                let _ = ctx.arc(x, y, scene.ball.radius() as f64, 0.0, std::f64::consts::TAU);
                ctx.fill();
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Failed to init logger: {e}").into());
        }

        log::info!("Light Ball starting...");

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document - cannot start");
            return;
        };
        let Some(canvas) = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No #canvas element - cannot start");
            return;
        };
        let Some(ctx) = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
        else {
            log::error!("Canvas 2D context unavailable - cannot start");
            return;
        };

        let seed = js_sys::Date::now() as u64;
        let config = GameConfig::load();
        let mut audio = AudioManager::new();
        audio.apply_config(&config);
        let observer = WebObserver {
            board: Scoreboard::new(),
            audio,
        };
        let session = Session::new(seed, config, observer);
        let game = Rc::new(RefCell::new(Game {
            session,
            canvas: canvas.clone(),
            ctx,
            last_time: 0.0,
            pointer_down: false,
        }));
        game.borrow_mut().sync_size();

        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(&canvas, game.clone());
        setup_resize(game.clone());
        setup_auto_pause(game.clone());

        request_animation_frame(game);

        log::info!("Light Ball running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Pointer down - steer, and resume if paused
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                if g.session.is_paused() {
                    g.resume();
                    return;
                }
                // Browsers keep audio locked until a user gesture
                g.session.observer().audio.resume();
                g.pointer_down = true;
                g.pointer(&event);
            });
            let _ = canvas
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer move - steer while pressed
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let mut g = game.borrow_mut();
                if g.pointer_down {
                    g.pointer(&event);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer up / cancel
        for name in ["pointerup", "pointercancel", "pointerleave"] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
                game.borrow_mut().pointer_down = false;
            });
            let _ = canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        if let Some(window) = web_sys::window() {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    " " | "Escape" | "p" | "P" => g.toggle_pause(),
                    "m" | "M" => {
                        let audio = &mut g.session.observer_mut().audio;
                        audio.set_muted(!audio.is_muted());
                        log::info!("Muted: {}", audio.is_muted());
                    }
                    "r" | "R" => {
                        let seed = js_sys::Date::now() as u64;
                        g.session.restart(seed);
                        g.session.observer_mut().board.reset();
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::UiEvent| {
            game.borrow_mut().sync_size();
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut g = game.borrow_mut();
                    if !g.session.is_paused() {
                        g.pause();
                        log::info!("Auto-paused (tab hidden)");
                    }
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if !g.session.is_paused() {
                    g.pause();
                    log::info!("Auto-paused (window blur)");
                }
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.session.update(dt);
            g.render();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use lightball::sim::Scoreboard;
    use lightball::{GameConfig, Session};

    env_logger::init();
    log::info!("Light Ball (native) starting...");
    log::info!("Native mode runs a headless demo - run with `trunk serve` for the web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);
    let mut session = Session::new(seed, GameConfig::load(), Scoreboard::new());
    session.resize(390.0, 844.0);

    // Ten simulated seconds at 60 fps, sweeping the pointer side to side
    for frame in 0..600u32 {
        if frame % 30 == 0 {
            if let Some(ball) = session.state().scene().and_then(|s| s.ball_position()) {
                let side = if (frame / 90) % 2 == 0 { 1.0 } else { -1.0 };
                session.pointer(ball.x + side * 60.0, ball.y);
            }
        }
        session.update(1.0 / 60.0);
    }

    let height = session
        .state()
        .scene()
        .map_or(0.0, |s| s.rig.camera().y);
    log::info!(
        "Demo finished after {} ticks: camera at {:.0}, score {}",
        session.state().time_ticks,
        height,
        session.observer().score()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
