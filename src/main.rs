//! Dodge Pups entry point
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
    use web_sys::{HtmlCanvasElement, HtmlElement, KeyboardEvent, MouseEvent, TouchEvent};

    use dodge_pups::browser::{self, html};
    use dodge_pups::consts::*;
    use dodge_pups::renderer::Renderer;
    use dodge_pups::sim::{GamePhase, GameState, InputSnapshot, Stick, tick};
    use dodge_pups::{BestTimes, Settings, ui};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        renderer: Renderer,
        settings: Settings,
        best_times: BestTimes,
        /// Live input, mutated by event handlers between frames; the tick
        /// sees one clone per frame
        input: InputSnapshot,
        accumulator: f64,
        last_time: f64,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
        // Track phase to catch the end of a run
        last_phase: GamePhase,
    }

    impl Game {
        fn new(seed: u64, now_ms: f64, renderer: Renderer) -> Self {
            Self {
                state: GameState::new(seed, now_ms),
                renderer,
                settings: Settings::load(),
                best_times: BestTimes::load(),
                input: InputSnapshot::default(),
                accumulator: 0.0,
                last_time: 0.0,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
                last_phase: GamePhase::Playing,
            }
        }

        /// Run the simulation frames accumulated since the last callback
        fn update(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                (time - self.last_time).min(100.0)
            } else {
                FRAME_MS
            };
            self.last_time = time;
            self.accumulator += dt;

            let mut frames = 0;
            while self.accumulator >= FRAME_MS && frames < MAX_FRAMES_PER_CALLBACK {
                let snapshot = self.input.clone();
                tick(&mut self.state, &snapshot, time);
                self.accumulator -= FRAME_MS;
                frames += 1;

                // Clear one-shot inputs after processing
                self.input.restart_click = None;
            }

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            // Calculate FPS from oldest to newest frame
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }

            // Record the run when it ends
            let phase = self.state.phase;
            if phase != self.last_phase {
                if phase == GamePhase::GameOver {
                    let seconds = self.state.elapsed_secs;
                    match self.best_times.record(seconds, js_sys::Date::now()) {
                        Some(rank) => {
                            log::info!("Run over: survived {seconds}s (best-times rank {rank})");
                            self.best_times.save();
                        }
                        None => log::info!("Run over: survived {seconds}s"),
                    }
                } else {
                    log::info!("New run started");
                }
                self.last_phase = phase;
            }
        }

        /// Render the current frame
        fn render(&self) {
            let palette = ui::palette(self.settings.high_contrast);
            if let Err(err) = self.renderer.draw(&self.state, &palette) {
                log::warn!("Render error: {err:?}");
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Ok(document) = browser::document() else {
                return;
            };

            // Survival time readout
            if let Some(el) = document.query_selector("#hud-time .hud-value").ok().flatten() {
                el.set_text_content(Some(&self.state.elapsed_secs.to_string()));
            }

            // FPS counter, shown only when enabled
            if let Some(el) = document.get_element_by_id("hud-fps") {
                if self.settings.show_fps {
                    let _ = el.set_attribute("class", "hud-item");
                    if let Some(val) = document.query_selector("#hud-fps .hud-value").ok().flatten()
                    {
                        val.set_text_content(Some(&self.fps.to_string()));
                    }
                } else {
                    let _ = el.set_attribute("class", "hud-item hidden");
                }
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Dodge Pups starting...");

        if let Err(err) = start() {
            log::error!("Startup failed: {err:?}");
        }
    }

    fn start() -> anyhow::Result<()> {
        let canvas = browser::canvas()?;

        // Fixed logical resolution; CSS scales the element to fit the
        // display area while preserving aspect
        canvas.set_width(LOGICAL_WIDTH as u32);
        canvas.set_height(LOGICAL_HEIGHT as u32);
        fit_canvas(&canvas);

        let renderer = Renderer::new()?;
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, browser::now()?, renderer)));

        log::info!("Game initialized with seed: {seed}");

        setup_input_handlers(&canvas, game.clone())?;
        setup_resize_handler(canvas)?;

        // Start game loop
        request_animation_frame(game);

        log::info!("Dodge Pups running!");
        Ok(())
    }

    /// Scale the canvas element to fit the window, preserving the 4:3
    /// logical aspect (letterboxed by the surrounding layout)
    fn fit_canvas(canvas: &HtmlCanvasElement) {
        let Ok(window) = browser::window() else {
            return;
        };
        let inner_w = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(LOGICAL_WIDTH as f64);
        let inner_h = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(LOGICAL_HEIGHT as f64);

        let max_w = (inner_w - 20.0).min(LOGICAL_WIDTH as f64);
        let max_h = (inner_h - 100.0).min(LOGICAL_HEIGHT as f64);
        let scale = (max_w / LOGICAL_WIDTH as f64).min(max_h / LOGICAL_HEIGHT as f64);

        let style = canvas.style();
        let _ = style.set_property("width", &format!("{}px", LOGICAL_WIDTH as f64 * scale));
        let _ = style.set_property("height", &format!("{}px", LOGICAL_HEIGHT as f64 * scale));
    }

    fn setup_resize_handler(canvas: HtmlCanvasElement) -> anyhow::Result<()> {
        let window = browser::window()?;
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            fit_canvas(&canvas);
        });
        let _ =
            window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
        Ok(())
    }

    fn setup_input_handlers(
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) -> anyhow::Result<()> {
        let window = browser::window()?;

        // Keyboard - directional keys held/released
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().input.set_key(&event.key(), true);
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().input.set_key(&event.key(), false);
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Canvas click - scale-corrected to logical coordinates, consumed
        // by the tick for restart hit-testing
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let rect = canvas_clone.get_bounding_client_rect();
                if rect.width() <= 0.0 {
                    return;
                }
                let scale = LOGICAL_WIDTH as f64 / rect.width();
                let x = (event.client_x() as f64 - rect.left()) * scale;
                let y = (event.client_y() as f64 - rect.top()) * scale;
                game.borrow_mut().input.restart_click = Some(Vec2::new(x as f32, y as f32));
            });
            let _ =
                canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Virtual joystick - drag on the control area yields angle +
        // clamped throw, and moves the knob element to match
        let joystick = browser::html_element(html::JOYSTICK_ID)?;
        let stick_el = browser::html_element(html::STICK_ID)?;
        {
            let game = game.clone();
            let joystick_clone = joystick.clone();
            let stick_el = stick_el.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(stick) = read_stick(&event, &joystick_clone) {
                    game.borrow_mut().input.stick = Some(stick);
                    move_knob(&stick_el, stick.knob_offset());
                }
            });
            let _ = joystick
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let joystick_clone = joystick.clone();
            let stick_el = stick_el.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                // Only while a gesture is active
                if g.input.stick.is_some() {
                    if let Some(stick) = read_stick(&event, &joystick_clone) {
                        g.input.stick = Some(stick);
                        move_knob(&stick_el, stick.knob_offset());
                    }
                }
            });
            let _ = joystick
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().input.stick = None;
                move_knob(&stick_el, Vec2::ZERO);
            });
            let _ = joystick
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        Ok(())
    }

    /// Read the first touch of a gesture as a stick position relative to
    /// the joystick control center
    fn read_stick(event: &TouchEvent, joystick: &HtmlElement) -> Option<Stick> {
        let touch = event.touches().get(0)?;
        let rect = joystick.get_bounding_client_rect();
        let center_x = rect.left() + rect.width() / 2.0;
        let center_y = rect.top() + rect.height() / 2.0;
        let dx = touch.client_x() as f64 - center_x;
        let dy = touch.client_y() as f64 - center_y;
        Some(Stick::from_drag(dx as f32, dy as f32))
    }

    /// Translate the knob element to the clamped stick offset
    fn move_knob(stick_el: &HtmlElement, offset: Vec2) {
        let _ = stick_el.style().set_property(
            "transform",
            &format!("translate({}px, {}px)", offset.x, offset.y),
        );
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Ok(window) = browser::window() else {
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
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use dodge_pups::consts::FRAME_MS;
    use dodge_pups::sim::{GameState, InputSnapshot, tick};

    env_logger::init();
    log::info!("Dodge Pups (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    // Headless smoke run: idle player at the center, 30 seconds max
    let mut state = GameState::new(0xD09, 0.0);
    let input = InputSnapshot::default();
    for frame in 1..=(30 * 60u64) {
        tick(&mut state, &input, frame as f64 * FRAME_MS);
        if state.is_over() {
            break;
        }
    }
    println!(
        "Idle run: survived {}s against {} pursuers",
        state.elapsed_secs,
        state.pursuers.len()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
