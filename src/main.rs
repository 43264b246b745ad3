//! Doodle Jump entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent};

    use doodle_jump::Session;
    use doodle_jump::platform::{KeyValueStore, LocalStore, MemoryStore};
    use doodle_jump::sim::{GamePhase, GameState, PlatformKind};
    use doodle_jump::tuning::Tuning;

    /// Game instance: the session plus the canvas it draws to
    struct Game {
        session: Session<Box<dyn KeyValueStore>>,
        ctx: CanvasRenderingContext2d,
    }

    impl Game {
        fn update(&mut self) {
            for event in self.session.frame() {
                log::debug!("{:?}", event);
            }
        }

        /// Flat-colour rendering of the world and overlays
        fn render(&self) {
            let state = &self.session.state;
            let ctx = &self.ctx;
            let arena = state.tuning.arena;
            let w = arena.width as f64;
            let h = arena.height as f64;

            ctx.set_fill_style_str("rgb(15, 52, 96)");
            ctx.fill_rect(0.0, 0.0, w, h);

            let cam = state.camera_y as f64;
            if state.phase == GamePhase::Playing {
                for platform in &state.platforms.platforms {
                    let color = match platform.kind {
                        PlatformKind::Normal => "rgb(100, 200, 255)",
                        PlatformKind::Moving { .. } => "rgb(255, 200, 100)",
                        PlatformKind::Breaking { .. } if platform.is_triggered() => {
                            if platform.flash_on() {
                                "rgb(200, 100, 100)"
                            } else {
                                "rgb(255, 150, 150)"
                            }
                        }
                        PlatformKind::Breaking { .. } => "rgb(255, 150, 150)",
                    };
                    let b = platform.bounds();
                    ctx.set_fill_style_str(color);
                    ctx.fill_rect(
                        b.left() as f64,
                        b.top() as f64 - cam,
                        b.size.x as f64,
                        b.size.y as f64,
                    );
                }

                let b = state.player.bounds();
                ctx.set_fill_style_str("rgb(120, 220, 120)");
                ctx.fill_rect(
                    b.left() as f64,
                    b.top() as f64 - cam,
                    b.size.x as f64,
                    b.size.y as f64,
                );
            }

            if self.session.settings.show_hud {
                self.render_hud(state);
            }

            match state.phase {
                GamePhase::Start => self.render_overlay(
                    w,
                    h,
                    "DOODLE JUMP",
                    &[
                        "Use ARROW KEYS or A/D to move",
                        "Press H to toggle the HUD",
                        "Press SPACE to Start",
                    ],
                ),
                GamePhase::GameOver => {
                    let score = format!("Score: {}", state.score);
                    let level = format!("Level Reached: {}", state.level);
                    let mut lines = vec![level.as_str(), score.as_str()];
                    if state.new_record {
                        lines.push("NEW HIGH SCORE!");
                    }
                    lines.push("Press SPACE to Play Again");
                    self.render_overlay(w, h, "GAME OVER", &lines);
                }
                GamePhase::Playing => {}
            }
        }

        fn render_hud(&self, state: &GameState) {
            let ctx = &self.ctx;
            ctx.set_fill_style_str("white");
            ctx.set_font("20px sans-serif");
            ctx.set_text_align("left");
            let _ = ctx.fill_text(&format!("Score: {}", state.score), 20.0, 30.0);
            let _ = ctx.fill_text(&format!("Level: {}", state.level), 20.0, 60.0);
            let _ = ctx.fill_text(&format!("High Score: {}", state.high_score), 20.0, 90.0);
        }

        fn render_overlay(&self, w: f64, h: f64, title: &str, lines: &[&str]) {
            let ctx = &self.ctx;
            ctx.set_fill_style_str("rgba(0, 0, 0, 0.6)");
            ctx.fill_rect(0.0, 0.0, w, h);

            ctx.set_text_align("center");
            ctx.set_fill_style_str("white");
            ctx.set_font("48px sans-serif");
            let _ = ctx.fill_text(title, w / 2.0, h / 2.0 - 80.0);

            ctx.set_font("20px sans-serif");
            for (i, line) in lines.iter().enumerate() {
                let _ = ctx.fill_text(line, w / 2.0, h / 2.0 - 20.0 + i as f64 * 40.0);
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Doodle Jump starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let tuning = Tuning::default();
        canvas.set_width(tuning.arena.width as u32);
        canvas.set_height(tuning.arena.height as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let store: Box<dyn KeyValueStore> = match LocalStore::open() {
            Ok(store) => Box::new(store),
            Err(e) => {
                log::warn!("{}; high score will not persist", e);
                Box::new(MemoryStore::new())
            }
        };
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game {
            session: Session::new(store, tuning, seed),
            ctx,
        }));

        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(game.clone());
        request_animation_frame(game);

        log::info!("Doodle Jump running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if game.borrow_mut().session.key_down(&event.key()) {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().session.key_up(&event.key());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            g.update();
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
    env_logger::init();
    log::info!("Doodle Jump (native) starting...");
    log::info!("Native mode runs a headless autopilot session - serve the wasm build to play");

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(2024);
    let tuning = match args.next() {
        Some(path) => load_tuning(&path),
        None => doodle_jump::Tuning::default(),
    };

    autoplay(seed, tuning);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn load_tuning(path: &str) -> doodle_jump::Tuning {
    let loaded = std::fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|json| doodle_jump::Tuning::from_json(&json).map_err(|e| e.to_string()));
    match loaded {
        Ok(tuning) => {
            log::info!("Loaded tuning from {}", path);
            tuning
        }
        Err(e) => {
            log::warn!("Using default tuning ({}): {}", path, e);
            doodle_jump::Tuning::default()
        }
    }
}

/// Let the autopilot play one run and report how it went
#[cfg(not(target_arch = "wasm32"))]
fn autoplay(seed: u64, tuning: doodle_jump::Tuning) {
    use doodle_jump::Session;
    use doodle_jump::platform::MemoryStore;
    use doodle_jump::sim::{GameEvent, GamePhase, TickInput};

    const MAX_FRAMES: u64 = 60 * 60 * 5;

    let mut session = Session::new(MemoryStore::new(), tuning, seed);
    let idle = TickInput {
        idle_mode: true,
        ..Default::default()
    };

    let mut bounces = 0u32;
    while session.state.frame < MAX_FRAMES {
        for event in session.frame_with(&idle) {
            if let GameEvent::Bounced { .. } = event {
                bounces += 1;
            }
        }
        if session.state.phase == GamePhase::GameOver {
            break;
        }
    }

    let state = &session.state;
    println!(
        "seed {}: score {} level {} after {} frames ({} bounces){}",
        seed,
        state.score,
        state.level,
        state.frame,
        bounces,
        if state.phase == GamePhase::GameOver {
            ""
        } else {
            " - still climbing"
        }
    );
}
