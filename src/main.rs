//! Stick Hero entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, HtmlElement, KeyboardEvent, MouseEvent, TouchEvent};

    use stick_hero::Settings;
    use stick_hero::renderer::{RenderState, scene};
    use stick_hero::sim::{GameEvent, GameState, InputEvent, handle_input, tick};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        settings: Settings,
        render_state: Option<RenderState>,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            Self {
                state: GameState::new(seed),
                settings: Settings::load(),
                render_state: None,
            }
        }

        fn input(&mut self, event: InputEvent) {
            handle_input(&mut self.state, event);
            self.handle_events();
        }

        /// Advance simulation for one animation frame
        fn update(&mut self, time: f64) {
            tick(&mut self.state, time);
            self.handle_events();
        }

        fn handle_events(&mut self) {
            for event in self.state.drain_events() {
                match event {
                    GameEvent::Landed { perfect: true, .. } => log::info!("Perfect!"),
                    GameEvent::GameOver => log::info!("Game over at score {}", self.state.score),
                    _ => log::debug!("{:?}", event),
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                let vertices = scene::build(&self.state.snapshot(), &self.settings);
                match render_state.render(&vertices, scene::background(&self.settings)) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let snapshot = self.state.snapshot();

            if let Some(el) = document.get_element_by_id("score") {
                el.set_text_content(Some(&snapshot.score.to_string()));
            }

            set_style(
                &document,
                "introduction",
                "opacity",
                if snapshot.show_intro { "1" } else { "0" },
            );
            set_style(
                &document,
                "perfect",
                "opacity",
                if self.settings.perfect_cue && snapshot.perfect_cue { "1" } else { "0" },
            );
            set_style(
                &document,
                "restart",
                "display",
                if snapshot.show_restart { "block" } else { "none" },
            );
        }
    }

    fn set_style(document: &web_sys::Document, id: &str, property: &str, value: &str) {
        if let Some(el) = document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        {
            let _ = el.style().set_property(property, value);
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Failed to init logger: {}", e).into());
        }

        log::info!("Stick Hero starting...");

        let Some(window) = web_sys::window() else {
            log::error!("No window");
            return;
        };
        let Some(document) = window.document() else {
            log::error!("No document");
            return;
        };

        let Some(canvas) = document
            .get_element_by_id("game")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No #game canvas");
            return;
        };

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        // Initialize game
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));
        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => surface,
            Err(e) => {
                log::error!("Failed to create surface: {}", e);
                return;
            }
        };

        let adapter = match instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
        {
            Ok(adapter) => adapter,
            Err(e) => {
                log::error!("Failed to get adapter: {}", e);
                return;
            }
        };

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        match RenderState::new(surface, &adapter, width, height).await {
            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
            Err(e) => {
                log::error!("Failed to create device: {}", e);
                return;
            }
        }

        setup_input_handlers(game.clone());
        setup_restart_button(game.clone());

        game.borrow().update_hud();
        game.borrow_mut().render();

        // Start game loop
        request_animation_frame(game);

        log::info!("Stick Hero running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Mouse press/release anywhere in the window
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                // Left button only
                if event.button() == 0 {
                    game.borrow_mut().input(InputEvent::Press);
                }
            });
            let _ = window
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().input(InputEvent::Release);
            });
            let _ = window
                .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch press/release
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: TouchEvent| {
                game.borrow_mut().input(InputEvent::Press);
            });
            let _ = window
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: TouchEvent| {
                game.borrow_mut().input(InputEvent::Release);
            });
            let _ = window
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard: space acts as the press gesture
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.key() == " " && !event.repeat() {
                    event.prevent_default();
                    game.borrow_mut().input(InputEvent::Press);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.key() == " " {
                    game.borrow_mut().input(InputEvent::Release);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        if let Some(btn) = document.get_element_by_id("restart") {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                event.stop_propagation();
                let mut g = game.borrow_mut();
                g.input(InputEvent::Restart);
                g.update_hud();
                log::info!("Game restarted with seed: {}", g.state.seed);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
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
            g.update(time);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod autoplay {
    use std::path::PathBuf;

    use anyhow::{Context, Result};
    use clap::Parser;

    use stick_hero::Tuning;
    use stick_hero::sim::{GamePhase, GameState, InputEvent, handle_input, tick};

    /// 60 Hz animation frames
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Give up on a round after this many frames
    const MAX_FRAMES_PER_ROUND: u32 = 60 * 60;

    /// Headless Stick Hero: a bot plays a few rounds and reports how it went
    #[derive(Parser, Debug)]
    pub struct Args {
        /// run seed (defaults to a fixed seed for reproducible runs)
        #[arg(long, default_value_t = 0x5717_C4E0)]
        seed: u64,

        /// rounds to play; the last one deliberately falls short
        #[arg(long, default_value_t = 5)]
        rounds: u32,

        /// JSON file with tuning overrides
        #[arg(long)]
        tuning: Option<PathBuf>,

        /// print the final snapshot as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    }

    /// Drives a session with timestamps the way the browser would
    struct Bot {
        state: GameState,
        now: f64,
    }

    impl Bot {
        fn frame(&mut self) {
            self.now += FRAME_MS;
            tick(&mut self.state, self.now);
        }

        /// Play one cycle. Returns false once the run is over.
        fn play_round(&mut self, miss: bool) -> bool {
            let stick_x = self.state.stick.x;
            let next = self.state.next_platform();
            let target = if miss {
                (next.x - stick_x) / 2.0
            } else {
                next.center() - stick_x
            };

            handle_input(&mut self.state, InputEvent::Press);
            let mut frames = 0;
            // Release within half a frame's growth of the target
            let step = FRAME_MS as f32 / self.state.tuning.stretching_speed;
            while self.state.stick.length + step / 2.0 < target && frames < MAX_FRAMES_PER_ROUND {
                self.frame();
                frames += 1;
            }
            handle_input(&mut self.state, InputEvent::Release);
            log::debug!("Released at length {:.1} (target {:.1})", self.state.stick.length, target);

            while frames < MAX_FRAMES_PER_ROUND {
                self.frame();
                frames += 1;
                match self.state.phase {
                    GamePhase::Waiting => return true,
                    GamePhase::Falling if self.state.show_restart => return false,
                    _ => {}
                }
            }
            log::warn!("Round did not finish within {} frames", MAX_FRAMES_PER_ROUND);
            false
        }
    }

    fn load_tuning(path: Option<&PathBuf>) -> Result<Tuning> {
        let Some(path) = path else {
            return Ok(Tuning::default());
        };
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading tuning file {}", path.display()))?;
        let tuning = Tuning::from_json(&json)
            .with_context(|| format!("parsing tuning file {}", path.display()))?;
        Ok(tuning)
    }

    pub fn run(args: Args) -> Result<()> {
        let tuning = load_tuning(args.tuning.as_ref())?;
        log::info!("Stick Hero (native autoplay) seed {}", args.seed);

        let mut bot = Bot {
            state: GameState::with_tuning(args.seed, tuning),
            now: 0.0,
        };

        for round in 0..args.rounds {
            let miss = round + 1 == args.rounds;
            if !bot.play_round(miss) {
                break;
            }
        }

        let snapshot = bot.state.snapshot();
        log::info!(
            "Finished: score {}, perfect landings {}, phase {}",
            snapshot.score,
            snapshot.perfect_count,
            snapshot.phase.as_str()
        );
        if args.json {
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        } else {
            println!("score {} ({} perfect)", snapshot.score, snapshot.perfect_count);
        }
        Ok(())
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use clap::Parser;

    env_logger::init();
    autoplay::run(autoplay::Args::parse())
}
