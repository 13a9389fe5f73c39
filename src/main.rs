//! Bounce Box entry point
//!
//! On the web this wires the canvas, input and animation frames to a
//! [`Session`](bounce_box::sim::Session). Natively it runs the simulation
//! headless and prints the final state.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_host {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use bounce_box::SimConfig;
    use bounce_box::renderer::CanvasRenderer;
    use bounce_box::sim::Session;

    /// Host state shared between the frame loop and input handlers
    struct Host {
        session: Session,
        renderer: CanvasRenderer,
        /// requestAnimationFrame handle of the next scheduled tick
        pending_frame: Option<i32>,
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Bounce Box starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let stored = SimConfig::load();
        let config = SimConfig {
            arena_width: canvas.width() as f32,
            arena_height: canvas.height() as f32,
            seed: stored.seed.or(Some(js_sys::Date::now() as u64)),
            ..stored
        };
        let session = Session::new(config).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let renderer = CanvasRenderer::new(&canvas, session.config())?;
        renderer.clear();
        log::info!("Session initialized with seed: {}", session.seed());

        let host = Rc::new(RefCell::new(Host {
            session,
            renderer,
            pending_frame: None,
        }));

        setup_click(&canvas, host.clone());
        setup_keyboard(host.clone())?;

        request_frame(host);

        log::info!("Bounce Box running!");
        Ok(())
    }

    fn request_frame(host: Rc<RefCell<Host>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let next = host.clone();
        let closure = Closure::once(move |_time: f64| {
            on_frame(next);
        });
        match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            Ok(id) => host.borrow_mut().pending_frame = Some(id),
            Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
        }
        closure.forget();
    }

    fn cancel_frame(host: &mut Host) {
        if let Some(id) = host.pending_frame.take() {
            if let Some(window) = web_sys::window() {
                let _ = window.cancel_animation_frame(id);
            }
        }
    }

    fn on_frame(host: Rc<RefCell<Host>>) {
        let reschedule = {
            let mut h = host.borrow_mut();
            h.pending_frame = None;
            let outcome = h.session.tick();
            if outcome.should_reschedule() {
                if let Err(e) = h.renderer.draw(h.session.bodies()) {
                    log::warn!("Render error: {:?}", e);
                }
            }
            outcome.should_reschedule()
        };
        if reschedule {
            request_frame(host);
        }
    }

    fn toggle(host: &Rc<RefCell<Host>>) {
        let restart = {
            let mut h = host.borrow_mut();
            // A frame may still be queued if pause and resume land within one frame
            h.session.toggle() && h.pending_frame.is_none()
        };
        if restart {
            request_frame(host.clone());
        }
    }

    fn reset(host: &Rc<RefCell<Host>>) {
        {
            let mut h = host.borrow_mut();
            cancel_frame(&mut h);
            h.session.reset();
            h.renderer.clear();
        }
        request_frame(host.clone());
    }

    fn setup_click(canvas: &HtmlCanvasElement, host: Rc<RefCell<Host>>) {
        let canvas_clone = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let rect = canvas_clone.get_bounding_client_rect();
            let x = event.client_x() as f32 - rect.left() as f32;
            let y = event.client_y() as f32 - rect.top() as f32;
            if let Err(e) = host.borrow_mut().session.add_body_at(x, y) {
                log::warn!("Could not add body: {}", e);
            }
        });
        let _ = canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_keyboard(host: Rc<RefCell<Host>>) -> Result<(), JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or("no document")?;
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            match event.key().as_str() {
                " " => {
                    event.prevent_default();
                    toggle(&host);
                }
                "r" | "R" => reset(&host),
                _ => {}
            }
        });
        document.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_host::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Ticks simulated when no count is given
#[cfg(not(target_arch = "wasm32"))]
const DEFAULT_TICKS: u64 = 600;

/// Usage: `bounce-box [config.json] [ticks]`
#[cfg(not(target_arch = "wasm32"))]
fn main() -> bounce_box::Result<()> {
    use bounce_box::SimConfig;
    use bounce_box::sim::{Session, TickOutcome};

    env_logger::init();
    log::info!("Bounce Box (native, headless) starting...");

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => {
            log::info!("Loading config from {}", path);
            SimConfig::from_path(&path)?
        }
        None => SimConfig::default(),
    };
    let ticks = match args.next() {
        Some(raw) => raw
            .parse::<u64>()
            .map_err(|e| bounce_box::Error::InvalidConfig(format!("tick count {raw:?}: {e}")))?,
        None => DEFAULT_TICKS,
    };

    let mut session = Session::new(config)?;
    let mut wall_hits = 0;
    let mut contacts = 0;
    for _ in 0..ticks {
        if let TickOutcome::Stepped(report) = session.tick() {
            wall_hits += report.wall_hits;
            contacts += report.contacts;
        }
    }

    log::info!(
        "Simulated {} ticks (seed {}): {} wall hits, {} contacts",
        session.time_ticks(),
        session.seed(),
        wall_hits,
        contacts
    );
    println!("{}", serde_json::to_string_pretty(&session.snapshot())?);
    Ok(())
}
