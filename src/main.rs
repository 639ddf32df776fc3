//! Brick Breaker entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Element, HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use brick_breaker::audio::LogSound;
    use brick_breaker::platform::{ScoreSink, canvas_size, lives_label, score_label};
    use brick_breaker::renderer::{BackendError, RenderState};
    use brick_breaker::{Game, Settings};

    /// Score/lives text in the page
    struct DomScore {
        score_el: Option<Element>,
        lives_el: Option<Element>,
    }

    impl ScoreSink for DomScore {
        fn show(&mut self, score: u64, lives: u32) {
            if let Some(el) = &self.score_el {
                el.set_text_content(Some(&score_label(score)));
            }
            if let Some(el) = &self.lives_el {
                el.set_text_content(Some(&lives_label(lives)));
            }
        }
    }

    /// Everything the frame callback and the event handlers share
    struct App {
        game: Game,
        render_state: RenderState,
        canvas: HtmlCanvasElement,
        last_time: f64,
    }

    impl App {
        /// Run one frame
        fn frame(&mut self, time: f64) {
            let dt_ms = if self.last_time > 0.0 {
                time - self.last_time
            } else {
                0.0
            };
            self.last_time = time;

            self.game.update(dt_ms);
            self.game.render(&mut self.render_state);
            match self.render_state.present() {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    let (w, h) = self.render_state.size;
                    self.render_state.resize(w, h);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }

        /// Fit the canvas to the window and restart the level on the new area
        fn resize_to_window(&mut self) {
            let Some(window) = web_sys::window() else {
                return;
            };
            let (w, h) = canvas_size(
                window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0),
                window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0),
                self.game.settings(),
            );
            self.canvas.set_width(w);
            self.canvas.set_height(h);
            self.render_state.resize(w, h);
            self.game.resize(w as f32, h as f32);
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Brick Breaker starting...");

        if let Err(e) = start().await {
            log::error!("Startup failed: {}", e);
            if let Some(body) = web_sys::window()
                .and_then(|w| w.document())
                .and_then(|d| d.body())
            {
                body.set_text_content(Some(&format!("Unable to start the game: {}", e)));
            }
        }
    }

    async fn start() -> Result<(), BackendError> {
        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let settings = Settings::load();
        // Write back the sanitized values so they can be edited in storage
        settings.save();
        let (width, height) = canvas_size(
            window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0),
            window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0),
            &settings,
        );
        canvas.set_width(width);
        canvas.set_height(height);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;
        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height).await?;

        let score = DomScore {
            score_el: document.get_element_by_id("score-display"),
            lives_el: document.get_element_by_id("lives-display"),
        };
        let seed = js_sys::Date::now() as u64;
        let muted = settings.muted;
        let game = Game::new(
            width as f32,
            height as f32,
            settings,
            seed,
            Box::new(score),
            Box::new(LogSound::new(muted)),
        );
        log::info!("Game initialized with seed: {}", seed);

        let app = Rc::new(RefCell::new(App {
            game,
            render_state,
            canvas: canvas.clone(),
            last_time: 0.0,
        }));

        setup_input_handlers(&canvas, app.clone());
        setup_window_handlers(app.clone());

        request_animation_frame(app);

        log::info!("Brick Breaker running!");
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();

        // Key down
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                if app.borrow_mut().game.key_down(&key) && key == " " {
                    // Keep space from scrolling the page
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                app.borrow_mut().game.key_up(&event.key());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse move - x relative to the canvas
        {
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let rect = canvas_clone.get_bounding_client_rect();
                let x = event.client_x() as f32 - rect.left() as f32;
                app.borrow_mut().game.pointer_moved(x);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_window_handlers(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();

        // Resize
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                app.borrow_mut().resize_to_window();
            });
            let _ = window
                .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur - keys released while unfocused never arrive
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                app.borrow_mut().game.release_all();
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        app.borrow_mut().frame(time);
        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Brick Breaker (native) starting...");
    log::info!("Native mode runs a headless autopilot game - run with `trunk serve` for the web version");

    let session = headless::run(brick_breaker::Settings::load(), 0x5EED, 20_000);
    println!(
        "SCORE: {}  LIVES: {}  LEVEL: {}",
        session.score, session.lives, session.level
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Autopilot game against the recording backend
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use brick_breaker::audio::LogSound;
    use brick_breaker::platform::LogScore;
    use brick_breaker::renderer::RecordingBackend;
    use brick_breaker::sim::{GamePhase, GameSession};
    use brick_breaker::{Game, Settings};

    /// Nominal frame time
    const FRAME_MS: f64 = 1000.0 / 60.0;

    /// Play until game over or `max_frames`, returning the final session
    pub fn run(settings: Settings, seed: u64, max_frames: u64) -> GameSession {
        let muted = settings.muted;
        let mut game = Game::new(
            800.0,
            600.0,
            settings,
            seed,
            Box::new(LogScore),
            Box::new(LogSound::new(muted)),
        );
        let mut backend = RecordingBackend::new();
        let mut best_level = 1;

        for frame in 0..max_frames {
            match game.phase() {
                GamePhase::Ready => game.start(),
                GamePhase::GameOver => break,
                _ => {}
            }

            // Aim slightly off-center so the ball does not go vertical forever
            let ball_x = game.session().ball.pos.x;
            let offset = ((frame / 90) % 5) as f32 * 8.0 - 16.0;
            game.pointer_moved((ball_x + offset).max(1.0));

            game.update(FRAME_MS);
            game.render(&mut backend);
            best_level = best_level.max(game.session().level);
        }

        let session = game.session();
        log::info!(
            "Headless run finished: phase {:?}, score {}, lives {}, level {} (best {}), {} frames drawn",
            session.phase,
            session.score,
            session.lives,
            session.level,
            best_level,
            backend.frames
        );
        session.clone()
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_same_seed_same_game() {
            let a = run(Settings::default(), 42, 3_000);
            let b = run(Settings::default(), 42, 3_000);
            assert_eq!(a.score, b.score);
            assert_eq!(a.lives, b.lives);
            assert_eq!(a.level, b.level);
            assert_eq!(a.phase, b.phase);
            assert_eq!(a.ball, b.ball);
            assert_eq!(a.bricks, b.bricks);
        }

        #[test]
        fn test_autopilot_scores() {
            let session = run(Settings::default(), 7, 3_000);
            assert!(session.score > 0);
        }
    }
}
