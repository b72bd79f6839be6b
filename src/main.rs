//! Emoji Dodge entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent};

    use emoji_dodge::audio::{AudioManager, SoundEffect};
    use emoji_dodge::consts::SIM_DT;
    use emoji_dodge::platform::LocalStore;
    use emoji_dodge::renderer::{RenderState, build_scene};
    use emoji_dodge::sim::{GameEvent, PointerPhase, TickInput};
    use emoji_dodge::{PlatformProfile, Session, Settings, Tuning, Viewport};

    /// Game instance holding all state
    struct Game {
        session: Session<LocalStore>,
        render_state: Option<RenderState>,
        settings: Settings,
        audio: AudioManager,
        input: TickInput,
        last_time: f64,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(session: Session<LocalStore>, settings: Settings) -> Self {
            let mut audio = AudioManager::new();
            audio.set_volume(settings.effective_volume());
            Self {
                session,
                render_state: None,
                settings,
                audio,
                input: TickInput::default(),
                last_time: 0.0,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Run simulation ticks and react to what happened
        fn update(&mut self, dt: f32, time: f64) {
            for event in self.session.update(dt, &mut self.input) {
                match event {
                    GameEvent::GameOver {
                        score, new_record, ..
                    } => {
                        self.audio.play(SoundEffect::GameOver);
                        if new_record {
                            self.audio.play(SoundEffect::HighScore);
                            log::info!("New high score: {}", score);
                        }
                    }
                    GameEvent::DifficultyIncreased { multiplier } => {
                        log::debug!("Difficulty x{:.1}", multiplier);
                    }
                    GameEvent::ObstaclesSpawned { .. } => {}
                }
            }

            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        fn render(&mut self) {
            let Some(render_state) = self.render_state.as_mut() else {
                return;
            };
            let vertices = build_scene(&self.session.state);
            match render_state.render(&vertices) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost) => {
                    let (w, h) = render_state.size;
                    let view = render_state.view_size;
                    render_state.resize(w, h, view);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let state = &self.session.state;
            let score = state.progress.display_score();

            if let Some(el) = document.get_element_by_id("score") {
                el.set_text_content(Some(&format!("Score: {}", score)));
            }
            if let Some(el) = document.get_element_by_id("high-score") {
                el.set_text_content(Some(&format!("High Score: {}", state.high_score)));
            }

            if let Some(el) = document.get_element_by_id("fps") {
                if self.settings.show_fps {
                    el.set_text_content(Some(&format!("{} fps", self.fps)));
                    let _ = el.set_attribute("class", "");
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }

            if let Some(el) = document.get_element_by_id("game-over") {
                if state.is_game_over() {
                    let _ = el.set_attribute("class", "");
                    if let Some(score_el) = document.get_element_by_id("final-score") {
                        score_el.set_text_content(Some(&score.to_string()));
                    }
                    if let Some(best_el) = document.get_element_by_id("final-high-score") {
                        best_el.set_text_content(Some(&state.high_score.to_string()));
                    }
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }
        }

        fn restart(&mut self) {
            let seed = js_sys::Date::now() as u64;
            self.session.restart(seed);
            self.input = TickInput::default();
            self.audio.play(SoundEffect::Restart);
        }

        /// Mute or unmute sound effects and remember the choice
        fn toggle_sound(&mut self) {
            self.settings.sound = !self.settings.sound;
            self.audio.set_volume(self.settings.effective_volume());
            self.session.save_settings(&self.settings);
        }

        fn toggle_fps(&mut self) {
            self.settings.show_fps = !self.settings.show_fps;
            self.session.save_settings(&self.settings);
        }

        fn resize(&mut self, canvas: &HtmlCanvasElement) {
            let (viewport, width, height) = measure(canvas);
            canvas.set_width(width);
            canvas.set_height(height);
            self.session.state.resize(viewport);
            if let Some(render_state) = self.render_state.as_mut() {
                render_state.resize(width, height, (viewport.width, viewport.height));
            }
        }
    }

    /// Viewport in CSS pixels plus the backing size in physical pixels
    fn measure(canvas: &HtmlCanvasElement) -> (Viewport, u32, u32) {
        let dpr = web_sys::window()
            .map(|w| w.device_pixel_ratio())
            .unwrap_or(1.0);
        let viewport = Viewport::new(canvas.client_width() as f32, canvas.client_height() as f32);
        let width = (viewport.width as f64 * dpr) as u32;
        let height = (viewport.height as f64 * dpr) as u32;
        (viewport, width, height)
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Emoji Dodge starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let store = LocalStore::new();
        let settings = Settings::load(&store);
        let tuning = Tuning::load(&store);
        let profile = settings.resolve_profile(PlatformProfile::detect);
        log::info!("Using {} profile", profile.kind.as_str());

        let (viewport, width, height) = measure(&canvas);
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = js_sys::Date::now() as u64;
        let session = Session::new(store, seed, profile, tuning, viewport);
        let game = Rc::new(RefCell::new(Game::new(session, settings)));

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| JsValue::from_str(&format!("Failed to create surface: {}", e)))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&format!("Failed to get adapter: {}", e)))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(
            surface,
            &adapter,
            width,
            height,
            (viewport.width, viewport.height),
        )
        .await
        .map_err(|e| JsValue::from_str(&format!("Failed to create device: {}", e)))?;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(&canvas, game.clone())?;
        setup_restart_button(game.clone());
        setup_resize_handler(&canvas, game.clone())?;

        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.set_attribute("class", "");
        }

        request_animation_frame(game);

        log::info!("Emoji Dodge running!");
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;

        // Pointer down/move/up share one shape
        // Down captures the pointer so an up outside the canvas still ends the drag
        for (name, phase) in [
            ("pointerdown", PointerPhase::Down),
            ("pointermove", PointerPhase::Move),
            ("pointerup", PointerPhase::Up),
            ("pointercancel", PointerPhase::Up),
        ] {
            let game = game.clone();
            let target = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::PointerEvent| {
                let mut g = game.borrow_mut();
                if phase == PointerPhase::Down {
                    g.audio.resume();
                    if let Err(e) = target.set_pointer_capture(event.pointer_id()) {
                        log::warn!("Pointer capture failed: {:?}", e);
                    }
                }
                if phase == PointerPhase::Move && event.buttons() == 0 && event.pointer_type() == "mouse" {
                    return;
                }
                event.prevent_default();
                g.input.pointer.push(emoji_dodge::sim::PointerEvent::new(
                    event.offset_x() as f32,
                    event.offset_y() as f32,
                    phase,
                ));
            });
            canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                g.audio.resume();
                match event.key().as_str() {
                    "ArrowLeft" | "a" | "A" => g.input.left = true,
                    "ArrowRight" | "d" | "D" => g.input.right = true,
                    "r" | "R" | "Enter" if g.session.state.is_game_over() => g.restart(),
                    "m" | "M" if !event.repeat() => g.toggle_sound(),
                    "f" | "F" if !event.repeat() => g.toggle_fps(),
                    _ => {}
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" | "a" | "A" => g.input.left = false,
                    "ArrowRight" | "d" | "D" => g.input.right = false,
                    _ => {}
                }
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    fn setup_resize_handler(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().resize(&canvas);
        });
        window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().restart();
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

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt, time);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Startup failed: {:?}", e);
    }
}

/// Headless run: no renderer, no input. The player stands still until hit.
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use emoji_dodge::consts::SIM_DT;
    use emoji_dodge::platform::MemoryStore;
    use emoji_dodge::sim::{GameEvent, TickInput};
    use emoji_dodge::{PlatformProfile, ProfileKind, Session, Tuning, Viewport};

    env_logger::init();
    log::info!("Emoji Dodge (native) starting...");
    log::info!("Rendering is web-only - run with `trunk serve` for the playable version");

    /// Simulated time cap (seconds)
    const MAX_SECONDS: f32 = 600.0;

    // Usage: emoji-dodge [seed] [standard|compact]
    let args: Vec<String> = std::env::args().collect();
    let seed = args
        .get(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0xD0D6E);
    let profile = args
        .get(2)
        .and_then(|s| ProfileKind::from_str(s))
        .map(PlatformProfile::from_kind)
        .unwrap_or_else(PlatformProfile::detect);
    log::info!("Using {} profile", profile.kind.as_str());

    let mut session = Session::new(
        MemoryStore::new(),
        seed,
        profile,
        Tuning::default(),
        Viewport::default(),
    );

    let mut input = TickInput::default();
    let mut elapsed = 0.0;
    let mut spawned = 0;
    while elapsed < MAX_SECONDS && !session.state.is_game_over() {
        for event in session.update(SIM_DT, &mut input) {
            match event {
                GameEvent::ObstaclesSpawned { count } => spawned += count,
                GameEvent::DifficultyIncreased { multiplier } => {
                    log::info!("t={:.0}s difficulty x{:.1}", elapsed, multiplier);
                }
                GameEvent::GameOver { score, .. } => {
                    log::info!("t={:.0}s hit, final score {}", elapsed, score);
                }
            }
        }
        elapsed += SIM_DT;
    }

    let state = &session.state;
    println!(
        "seed {}: score {}, level {}, {} obstacles spawned, {:.0}s survived{}",
        seed,
        state.progress.display_score(),
        state.progress.level,
        spawned,
        elapsed,
        if state.is_game_over() { "" } else { " (time cap)" }
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
