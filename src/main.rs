//! Milky Way entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use milky_way::audio::AudioManager;
    use milky_way::consts::*;
    use milky_way::platform::{Framebuffer, Input};
    use milky_way::renderer::PixelRenderState;
    use milky_way::{Error, GameLoop, Settings};

    /// Pointer state gathered from DOM events between frames
    #[derive(Debug, Default)]
    struct WebInput {
        pointer_x: f32,
        /// Set on mousedown/touchstart, cleared once a frame has seen it
        click: bool,
    }

    impl Input for WebInput {
        fn pointer_x(&self) -> f32 {
            self.pointer_x
        }

        fn left_pressed(&self) -> bool {
            self.click
        }
    }

    /// Game instance holding all state
    struct Game {
        game: GameLoop,
        framebuffer: Framebuffer,
        render_state: PixelRenderState,
        audio: AudioManager,
        input: WebInput,
        accumulator: f32,
        last_time: f64,
        dpr: f32,
    }

    impl Game {
        /// Canvas CSS position to logical screen x
        fn set_pointer(&mut self, css_x: f32, css_y: f32) {
            let viewport = self.render_state.viewport();
            let (x, _) = viewport.to_logical(css_x * self.dpr, css_y * self.dpr);
            self.input.pointer_x = x;
        }

        fn press(&mut self) {
            self.input.click = true;
            self.audio.resume();
        }

        /// Run fixed-step frames; returns how many ran
        fn update(&mut self, dt: f32) -> u32 {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= FRAME_DT && substeps < MAX_SUBSTEPS {
                self.game.update(&self.input, &mut self.audio);
                self.framebuffer.advance_frame();
                self.accumulator -= FRAME_DT;
                substeps += 1;

                // A click counts for exactly one frame
                self.input.click = false;
            }

            // Don't spiral after a long stall
            if substeps == MAX_SUBSTEPS {
                self.accumulator = 0.0;
            }
            substeps
        }

        /// Draw the current frame and present it
        fn render(&mut self) {
            self.game.draw(&mut self.framebuffer);
            match self.render_state.render(&self.framebuffer) {
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
    }

    pub async fn run() -> Result<(), Error> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();

        log::info!("Milky Way starting...");

        let window = web_sys::window().ok_or_else(|| Error::Surface("no window".into()))?;
        let document = window
            .document()
            .ok_or_else(|| Error::Surface("no document".into()))?;
        document.set_title(WINDOW_TITLE);

        let settings = Settings::from_query(&window.location().search().unwrap_or_default());
        log::info!("Settings: {:?}", settings);

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into().ok())
            .ok_or_else(|| Error::Surface("no canvas element".into()))?;

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| Error::Surface(e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| Error::Adapter(e.to_string()))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state =
            PixelRenderState::new(surface, &adapter, width, height, settings.scale).await?;

        let seed = js_sys::Date::now() as u64;
        let audio = AudioManager::new(&settings);
        let game = Rc::new(RefCell::new(Game {
            game: GameLoop::new(seed, settings),
            framebuffer: Framebuffer::new(),
            render_state,
            audio,
            input: WebInput {
                pointer_x: PLAYER_INITIAL_X,
                click: false,
            },
            accumulator: 0.0,
            last_time: 0.0,
            dpr: dpr as f32,
        }));

        setup_input_handlers(&canvas, game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Milky Way running!");
        Ok(())
    }

    /// Touch position relative to the canvas, in CSS pixels
    fn touch_position(event: &TouchEvent, canvas: &HtmlCanvasElement) -> Option<(f32, f32)> {
        let touch = event.touches().get(0)?;
        let rect = canvas.get_bounding_client_rect();
        Some((
            touch.client_x() as f32 - rect.left() as f32,
            touch.client_y() as f32 - rect.top() as f32,
        ))
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse move
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                game.borrow_mut()
                    .set_pointer(event.offset_x() as f32, event.offset_y() as f32);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse click
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                if event.button() == 0 {
                    game.borrow_mut().press();
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some((x, y)) = touch_position(&event, &canvas_clone) {
                    game.borrow_mut().set_pointer(x, y);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start (click)
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                if let Some((x, y)) = touch_position(&event, &canvas_clone) {
                    g.set_pointer(x, y);
                }
                g.press();
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let mut g = game.borrow_mut();
            match event.key().as_str() {
                "i" | "I" => {
                    g.game.toggle_autopilot();
                }
                "m" | "M" => {
                    let muted = !g.audio.is_muted();
                    g.audio.set_muted(muted);
                    g.game.settings_mut().muted = muted;
                    log::info!("Muted: {}", muted);
                }
                _ => {}
            }
        });
        let _ =
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
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
                FRAME_DT
            };
            g.last_time = time;

            if g.update(dt) > 0 {
                g.render();
            }
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Milky Way failed to start: {}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Frames the headless run plays before giving up
#[cfg(not(target_arch = "wasm32"))]
const HEADLESS_FRAME_LIMIT: u64 = 20_000;

/// Outcome of a headless run, printed as JSON
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, serde::Serialize)]
struct RunSummary {
    seed: u64,
    frames: u64,
    scene: &'static str,
    damage: u32,
    remaining_height: i32,
    cues: Vec<milky_way::platform::SoundCue>,
    lit_pixels: usize,
}

#[cfg(not(target_arch = "wasm32"))]
impl RunSummary {
    fn to_json(&self) -> Result<String, milky_way::Error> {
        serde_json::to_string_pretty(self).map_err(milky_way::Error::Summary)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), milky_way::Error> {
    use milky_way::consts::{COLOR_BACKGROUND, PLAYER_INITIAL_X};
    use milky_way::platform::{Framebuffer, RecordingAudio, ScriptedInput};
    use milky_way::{GameLoop, Settings};

    env_logger::init();
    log::info!("Milky Way (native) starting...");
    log::info!("Native mode runs headless on autopilot - use the web build to play");

    let mut settings = Settings::from_env()?;
    settings.autopilot = true;

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default();

    let mut game = GameLoop::new(seed, settings);
    let mut framebuffer = Framebuffer::new();
    let mut audio = RecordingAudio::default();
    let input = ScriptedInput {
        pointer_x: PLAYER_INITIAL_X,
        pressed: false,
    };

    let mut frames = 0;
    while frames < HEADLESS_FRAME_LIMIT {
        game.update(&input, &mut audio);
        game.draw(&mut framebuffer);
        framebuffer.advance_frame();
        frames += 1;

        if game.scene().is_finished() {
            break;
        }
    }

    let state = game.state();
    let summary = RunSummary {
        seed,
        frames,
        scene: state.scene.as_str(),
        damage: state.damage,
        remaining_height: state.remaining_height(),
        cues: audio.played.iter().map(|&(_, cue)| cue).collect(),
        lit_pixels: framebuffer.lit_pixels(COLOR_BACKGROUND),
    };
    log::info!("Run finished after {} frames in {}", frames, summary.scene);
    println!("{}", summary.to_json()?);

    Ok(())
}
