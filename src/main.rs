//! Breakout entry point
//!
//! On the web, boots the canvas game and runs the frame loop. Natively, plays
//! a headless autopilot round and logs how it went.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use breakout::Settings;
    use breakout::audio::{AudioSink, WebAudio};
    use breakout::consts::*;
    use breakout::platform::{InputAction, InputState};
    use breakout::renderer::build_frame;
    use breakout::renderer::canvas::CanvasPainter;
    use breakout::sim::{Game, tick};

    /// Everything the frame loop and the event handlers share
    struct App {
        game: Game,
        input: InputState,
        audio: WebAudio,
        painter: CanvasPainter,
    }

    impl App {
        fn frame(&mut self, now: f64) {
            if self.input.take_mute_toggle() {
                self.audio.toggle_mute();
            }

            let input = self.input.take();
            tick(&mut self.game, &input, now);

            let events = self.game.drain_events();
            self.audio.play_events(&events);

            if let Err(e) = self.painter.paint(&build_frame(&self.game)) {
                log::warn!("Paint failed: {:?}", e);
            }
        }

        /// Pause a running game, e.g. when the page loses focus
        fn auto_pause(&mut self, reason: &str) {
            if self.game.state.is_playing() && !self.game.is_paused() {
                self.input.request_pause();
                log::info!("Auto-paused ({})", reason);
            }
        }
    }

    fn js_err(msg: &str) -> JsValue {
        JsValue::from_str(msg)
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).map_err(|e| js_err(&e.to_string()))?;

        log::info!("Breakout starting...");

        let window = web_sys::window().ok_or_else(|| js_err("no window"))?;
        let document = window.document().ok_or_else(|| js_err("no document"))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or_else(|| js_err("no canvas"))?
            .dyn_into()
            .map_err(|_| js_err("not a canvas"))?;

        let settings =
            Settings::from_json_or_default(canvas.get_attribute("data-settings").as_deref());

        // Backing store at device resolution, drawn in playfield units
        let dpr = window.device_pixel_ratio();
        canvas.set_width((PLAYFIELD_WIDTH as f64 * dpr) as u32);
        canvas.set_height((PLAYFIELD_HEIGHT as f64 * dpr) as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| js_err("no 2d context"))?
            .dyn_into()
            .map_err(|_| js_err("not a 2d context"))?;

        let seed = js_sys::Date::now() as u64;
        let mut game = Game::new(seed);
        game.frame_timing = settings.frame_timing;
        log::info!(
            "Game initialized with seed {} ({} frame timing)",
            seed,
            settings.frame_timing.as_str()
        );

        let app = Rc::new(RefCell::new(App {
            game,
            input: InputState::new(&settings),
            audio: WebAudio::new(&settings),
            painter: CanvasPainter::new(ctx, dpr),
        }));

        setup_input_handlers(&window, &canvas, app.clone())?;
        setup_auto_pause(&window, &document, app.clone())?;

        request_animation_frame(app);

        log::info!("Breakout running!");
        Ok(())
    }

    fn setup_input_handlers(
        window: &web_sys::Window,
        canvas: &HtmlCanvasElement,
        app: Rc<RefCell<App>>,
    ) -> Result<(), JsValue> {
        // Keyboard
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut a = app.borrow_mut();
                let Some(action) = a.input.key_down(&event.key()) else {
                    return;
                };
                // Keep arrows and space from scrolling the page
                event.prevent_default();
                if action == InputAction::Start {
                    a.audio.resume();
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Mouse move - anywhere in the window, relative to the canvas
        {
            let canvas = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let bounds = canvas.get_bounding_client_rect();
                app.borrow_mut().input.mouse_move(
                    event.client_x() as f32,
                    bounds.left() as f32,
                    bounds.width() as f32,
                );
            });
            window
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_auto_pause(
        window: &web_sys::Window,
        document: &web_sys::Document,
        app: Rc<RefCell<App>>,
    ) -> Result<(), JsValue> {
        // Visibility change (tab switch, minimize)
        {
            let app = app.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    app.borrow_mut().auto_pause("tab hidden");
                }
            });
            document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            )?;
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                app.borrow_mut().auto_pause("window blur");
            });
            window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
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
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use breakout::Settings;
    use breakout::audio::{AudioSink, SilentAudio};
    use breakout::consts::{PLAYFIELD_WIDTH, REFERENCE_FRAME_MS};
    use breakout::platform::{InputAction, InputState};
    use breakout::sim::{Game, tick};

    /// Five minutes of play at 60 Hz
    const MAX_FRAMES: u64 = 60 * 60 * 5;
    /// Aim off-center now and then so the ball does not settle into a column
    const AIM_OFFSETS: [f32; 3] = [-30.0, 0.0, 30.0];

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings =
        Settings::from_json_or_default(std::env::var("BREAKOUT_SETTINGS").ok().as_deref());
    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);

    log::info!(
        "Breakout (native) autopilot, seed {} ({} frame timing)",
        seed,
        settings.frame_timing.as_str()
    );

    let mut game = Game::new(seed);
    game.frame_timing = settings.frame_timing;
    let mut input = InputState::new(&settings);
    let mut audio = SilentAudio::new(&settings);

    input.apply(InputAction::Start);
    let mut frames = 0;
    for frame in 0..MAX_FRAMES {
        let aim = AIM_OFFSETS[(frame / 300 % 3) as usize];
        input.mouse_move(game.ball.pos.x + aim, 0.0, PLAYFIELD_WIDTH);

        let frame_input = input.take();
        tick(&mut game, &frame_input, frame as f64 * REFERENCE_FRAME_MS);
        audio.play_events(&game.drain_events());

        frames = frame;
        if !game.state.is_playing() {
            break;
        }
    }

    log::info!(
        "Finished after {} frames: {:?}, score {}, level {}, lives {}, {} bricks left, {} sounds",
        frames,
        game.state.phase,
        game.state.score,
        game.state.level,
        game.state.lives,
        game.live_bricks(),
        audio.played.len()
    );
    match game.to_json() {
        Ok(json) => log::debug!("Final state: {}", json),
        Err(e) => log::warn!("Could not snapshot final state: {}", e),
    }
}
