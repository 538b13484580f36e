//! Neon Runner entry point
//!
//! Handles platform-specific initialization and runs the game loop. The
//! browser build drives the HUD and screens and hands every frame to an
//! external renderer; the native build plays a headless run on autopilot.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{KeyboardEvent, TouchEvent};

    /// How long the crash flash stays on screen
    const FLASH_MS: i32 = 200;

    use neon_runner::platform::{Command, command_for_key, command_for_tap};
    use neon_runner::sim::{GameEvent, GamePhase, Snapshot};
    use neon_runner::view::PlayerVisual;
    use neon_runner::{Session, Tuning, autopilot};

    // Hook for whatever draws the scene
    #[wasm_bindgen(inline_js = "
        export function publish_frame(json) {
            const hook = window.neonRunnerFrame;
            if (typeof hook === 'function') {
                hook(json);
            }
        }
    ")]
    extern "C" {
        fn publish_frame(json: &str);
    }

    /// Everything the renderer receives each frame
    #[derive(serde::Serialize)]
    struct Frame<'a> {
        #[serde(flatten)]
        snapshot: &'a Snapshot,
        player: &'a PlayerVisual,
    }

    /// Game instance holding all state
    struct Game {
        session: Session,
        visual: PlayerVisual,
        last_time: f64,
        last_phase: GamePhase,
        idle_mode: bool,
    }

    impl Game {
        fn new(session: Session) -> Self {
            let visual = PlayerVisual::new(session.tuning());
            Self {
                session,
                visual,
                last_time: 0.0,
                last_phase: GamePhase::Menu,
                idle_mode: false,
            }
        }

        fn command(&mut self, command: Command) {
            match command {
                // A fresh seed per reboot so runs differ
                Command::Restart => {
                    if self.session.restart_with_seed(random_seed()) {
                        self.visual.reset(self.session.tuning());
                    }
                }
                Command::Start => {
                    if self.session.start() {
                        self.visual.reset(self.session.tuning());
                    }
                }
                other => self.session.handle(other),
            }
        }

        /// Run one simulation tick and the visual smoothing
        fn update(&mut self, dt: f32) {
            if self.idle_mode {
                if let Some(command) = autopilot::decide(self.session.state()) {
                    self.session.handle(command);
                }
            }
            self.session.frame(dt);
            let lane = self.session.state().player_lane;
            self.visual.update(lane, dt, self.session.tuning());
        }

        fn publish(&self) {
            let snapshot = self.session.snapshot();
            let frame = Frame {
                snapshot: &snapshot,
                player: &self.visual,
            };
            match serde_json::to_string(&frame) {
                Ok(json) => publish_frame(&json),
                Err(e) => log::warn!("Failed to serialize frame: {:?}", e),
            }
        }

        /// Update HUD elements and screens in DOM
        fn update_hud(&mut self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            let score = self.session.score();
            if let Some(el) = document.query_selector("#hud-score .hud-value").ok().flatten() {
                el.set_text_content(Some(&format!("{:06}", score)));
            }

            let crashed = self
                .session
                .state()
                .events
                .iter()
                .any(|e| matches!(e, GameEvent::Crashed { .. }));
            if crashed {
                flash_impact(&document);
            }

            let phase = self.session.phase();
            if phase == self.last_phase {
                return;
            }
            self.last_phase = phase;

            set_hidden(&document, "menu", phase != GamePhase::Menu);
            set_hidden(&document, "hud", phase != GamePhase::Playing);
            set_hidden(&document, "game-over", phase != GamePhase::GameOver);

            match phase {
                GamePhase::GameOver => {
                    if let Some(el) = document.get_element_by_id("final-score") {
                        el.set_text_content(Some(&score.to_string()));
                    }
                }
                GamePhase::Playing | GamePhase::Menu => {}
            }
        }
    }

    /// Show the impact flash and take it down again after [`FLASH_MS`]
    fn flash_impact(document: &web_sys::Document) {
        let Some(el) = document.get_element_by_id("impact-flash") else {
            return;
        };
        let _ = el.class_list().add_1("flash");

        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move || {
            let _ = el.class_list().remove_1("flash");
        });
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            FLASH_MS,
        );
        closure.forget();
    }

    fn set_hidden(document: &web_sys::Document, id: &str, hidden: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.class_list().toggle_with_force("hidden", hidden);
        }
    }

    fn random_seed() -> u64 {
        let hi = (js_sys::Math::random() * u32::MAX as f64) as u64;
        let lo = (js_sys::Math::random() * u32::MAX as f64) as u64;
        (hi << 32) | lo
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Neon Runner starting...");

        let seed = random_seed();
        let session = match Session::new(Tuning::default(), seed) {
            Ok(session) => session,
            Err(e) => {
                log::error!("Cannot start: {}", e);
                return;
            }
        };
        let game = Rc::new(RefCell::new(Game::new(session)));
        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(game.clone());
        setup_buttons(game.clone());
        game.borrow_mut().update_hud();
        request_animation_frame(game);

        log::info!("Neon Runner running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                let key = event.key();
                if key == "i" || key == "I" {
                    g.idle_mode = !g.idle_mode;
                    log::info!("Idle mode: {}", g.idle_mode);
                    return;
                }
                if let Some(command) = command_for_key(&key, g.session.phase()) {
                    event.prevent_default();
                    g.command(command);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Tap sides to move, tap the middle to shoot
        {
            let game = game.clone();
            let window_clone = window.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                let Some(touch) = event.touches().get(0) else {
                    return;
                };
                let width = window_clone
                    .inner_width()
                    .ok()
                    .and_then(|w| w.as_f64())
                    .unwrap_or(1.0);
                let fraction = (touch.client_x() as f64 / width) as f32;
                let mut g = game.borrow_mut();
                if g.session.phase() != GamePhase::Playing {
                    return;
                }
                event.prevent_default();
                if let Some(command) = command_for_tap(fraction) {
                    g.command(command);
                }
            });
            let _ = window
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        for (id, command) in [("start-button", Command::Start), ("reboot-button", Command::Restart)] {
            let Some(button) = document.get_element_by_id(id) else {
                log::warn!("Missing #{} element", id);
                continue;
            };
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().command(command);
            });
            let _ = button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
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
                0.0
            };
            g.last_time = time;

            g.update(dt);
            g.publish();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use anyhow::{Context, Result};

    use neon_runner::sim::GamePhase;
    use neon_runner::{Session, Tuning, autopilot};

    /// Host frame rate for the headless run
    const FRAME_DT: f32 = 1.0 / 60.0;
    /// Give up after this much simulated time
    const MAX_SECONDS: f64 = 300.0;

    /// `neon-runner [seed] [tuning.json]`
    pub fn run() -> Result<()> {
        let mut args = std::env::args().skip(1);
        let seed = match args.next() {
            Some(arg) => arg
                .parse::<u64>()
                .with_context(|| format!("seed `{}` is not a u64", arg))?,
            None => 0x5eed,
        };
        let tuning = match args.next() {
            Some(path) => {
                log::info!("Loading tuning from {}", path);
                let json = std::fs::read_to_string(&path)
                    .with_context(|| format!("reading {}", path))?;
                Tuning::from_json(&json).with_context(|| format!("loading {}", path))?
            }
            None => Tuning::default(),
        };

        let mut session = Session::new(tuning, seed)?;
        session.start();

        let mut next_report = 10.0;
        while session.phase() == GamePhase::Playing && session.state().elapsed < MAX_SECONDS {
            if let Some(command) = autopilot::decide(session.state()) {
                session.handle(command);
            }
            session.frame(FRAME_DT);

            let elapsed = session.state().elapsed;
            if elapsed >= next_report {
                log::info!(
                    "{:.0}s: score {}, {} obstacles, {} bullets",
                    elapsed,
                    session.score(),
                    session.state().obstacles.len(),
                    session.state().bullets.len()
                );
                next_report += 10.0;
            }
        }

        println!(
            "Seed {}: {:?} after {:.1}s with score {}",
            seed,
            session.phase(),
            session.state().elapsed,
            session.score()
        );
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Neon Runner (native) starting...");

    if let Err(e) = headless::run() {
        log::error!("Headless run failed: {:#}", e);
        std::process::exit(1);
    }
}
