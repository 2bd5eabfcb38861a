pub mod canvas;
pub mod loader;
pub mod runner;

pub use canvas::CanvasRenderer;
pub use runner::StageRunner;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Event, HtmlCanvasElement, MouseEvent, Window};

use wander_engine::{InputEvent, Renderer, SpriteManifest, StageConfig};

type FrameCallback = Closure<dyn FnMut(f64)>;

/// Browser-side handles for one running animation, released on stop.
struct Session {
    window: Window,
    canvas: HtmlCanvasElement,
    on_click: Closure<dyn FnMut(MouseEvent)>,
    on_resize: Closure<dyn FnMut(Event)>,
    frame: Rc<RefCell<Option<FrameCallback>>>,
    frame_id: Rc<Cell<Option<i32>>>,
}

thread_local! {
    static RUNNER: RefCell<Option<StageRunner<CanvasRenderer>>> = const { RefCell::new(None) };
    static SESSION: RefCell<Option<Session>> = const { RefCell::new(None) };
    /// Bumped by `stop_animation` (and so by every start) so loads from a
    /// stopped session are dropped.
    static GENERATION: Cell<u32> = const { Cell::new(0) };
}

fn with_runner<R>(f: impl FnOnce(&mut StageRunner<CanvasRenderer>) -> R) -> Option<R> {
    RUNNER.with(|cell| cell.borrow_mut().as_mut().map(f))
}

fn is_current(generation: u32) -> bool {
    GENERATION.with(|g| g.get() == generation)
}

fn init_logging() {
    console_error_panic_hook::set_once();
    // Already initialised on a restart
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Laid-out size of the canvas, which the backing store is matched to.
fn surface_size(canvas: &HtmlCanvasElement) -> (u32, u32) {
    let width = canvas.offset_width().max(0) as u32;
    let height = canvas.offset_height().max(0) as u32;
    (width, height)
}

/// Start the animation on `canvas` with default settings.
#[wasm_bindgen]
pub fn start_animation(canvas: HtmlCanvasElement) -> Result<(), JsValue> {
    start(canvas, StageConfig::default())
}

/// Start the animation with a partial JSON `StageConfig`. A `sprites` entry
/// swaps in a different sheet manifest.
#[wasm_bindgen]
pub fn start_animation_with_config(canvas: HtmlCanvasElement, config_json: &str) -> Result<(), JsValue> {
    let config = StageConfig::from_json(config_json).map_err(|err| JsValue::from_str(&err.to_string()))?;
    start(canvas, config)
}

/// Stop the loop, detach listeners and release the stage.
#[wasm_bindgen]
pub fn stop_animation() {
    GENERATION.with(|g| g.set(g.get().wrapping_add(1)));
    with_runner(|r| r.stop());

    if let Some(session) = SESSION.with(|cell| cell.borrow_mut().take()) {
        if let Some(id) = session.frame_id.take() {
            let _ = session.window.cancel_animation_frame(id);
        }
        // Breaks the callback's reference to itself
        session.frame.borrow_mut().take();
        let _ = session
            .canvas
            .remove_event_listener_with_callback("click", session.on_click.as_ref().unchecked_ref());
        let _ = session
            .window
            .remove_event_listener_with_callback("resize", session.on_resize.as_ref().unchecked_ref());
    }

    RUNNER.with(|cell| cell.borrow_mut().take());
}

fn start(canvas: HtmlCanvasElement, mut config: StageConfig) -> Result<(), JsValue> {
    init_logging();
    stop_animation();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    if config.seed.is_none() {
        config.seed = Some(js_sys::Date::now() as u64);
    }
    let frames_per_batch = config.frames_per_batch;
    let manifest = config.sprites.clone();

    let (width, height) = surface_size(&canvas);
    let mut renderer = CanvasRenderer::new(canvas.clone())?;
    renderer.resize(width, height);
    let mut runner = StageRunner::new(config, renderer, width as f32, height as f32);
    // Floor shows immediately while sheets stream in
    runner.redraw();
    RUNNER.with(|cell| *cell.borrow_mut() = Some(runner));

    let generation = GENERATION.with(|g| g.get());

    let click_canvas = canvas.clone();
    let on_click = Closure::wrap(Box::new(move |event: MouseEvent| {
        let rect = click_canvas.get_bounding_client_rect();
        let x = (event.client_x() as f64 - rect.left()) as f32;
        let y = (event.client_y() as f64 - rect.top()) as f32;
        with_runner(|r| r.push_input(InputEvent::Click { x, y }));
    }) as Box<dyn FnMut(MouseEvent)>);
    canvas.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;

    let resize_canvas = canvas.clone();
    let on_resize = Closure::wrap(Box::new(move |_event: Event| {
        let (width, height) = surface_size(&resize_canvas);
        with_runner(|r| {
            r.push_input(InputEvent::Resize {
                width: width as f32,
                height: height as f32,
            })
        });
    }) as Box<dyn FnMut(Event)>);
    window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;

    let frame: Rc<RefCell<Option<FrameCallback>>> = Rc::new(RefCell::new(None));
    let frame_id: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
    {
        let frame_cb = Rc::clone(&frame);
        let frame_id_cb = Rc::clone(&frame_id);
        let window_cb = window.clone();
        let mut last_ts: Option<f64> = None;
        *frame.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
            frame_id_cb.set(None);
            let dt = last_ts.map_or(0.0, |prev| ((ts - prev) / 1000.0) as f32);
            last_ts = Some(ts);

            let running = with_runner(|r| {
                r.tick(dt);
                r.is_running()
            })
            .unwrap_or(false);
            if !running {
                return;
            }

            if let Some(cb) = frame_cb.borrow().as_ref() {
                match window_cb.request_animation_frame(cb.as_ref().unchecked_ref()) {
                    Ok(id) => frame_id_cb.set(Some(id)),
                    Err(err) => log::error!("requestAnimationFrame failed: {:?}", err),
                }
            }
        }) as Box<dyn FnMut(f64)>));
    }
    if let Some(cb) = frame.borrow().as_ref() {
        frame_id.set(Some(window.request_animation_frame(cb.as_ref().unchecked_ref())?));
    }

    SESSION.with(|cell| {
        *cell.borrow_mut() = Some(Session {
            window,
            canvas,
            on_click,
            on_resize,
            frame,
            frame_id,
        });
    });

    spawn_local(load_sprites(document, manifest, frames_per_batch, generation));

    log::info!("wander: started on {}x{} canvas", width, height);
    Ok(())
}

/// Load every sheet in manifest order, merging each one as it lands.
async fn load_sprites(document: Document, manifest: SpriteManifest, frames_per_batch: usize, generation: u32) {
    let total = manifest.len();
    let mut loaded = 0;
    for (key, src) in manifest.entries() {
        if !is_current(generation) {
            return;
        }
        match loader::load_sheet(&document, src, frames_per_batch).await {
            Ok(sheet) => {
                if !is_current(generation) {
                    return;
                }
                log::debug!("sprite {}: {} frames", key.name(), sheet.info.frame_count);
                with_runner(|r| {
                    r.renderer_mut().insert_sheet(key, sheet.frames);
                    r.add_sheet(key, sheet.info);
                });
                loaded += 1;
            }
            Err(err) => log::warn!("skipping sprite {} from {}: {:?}", key.name(), src, err),
        }
    }

    if is_current(generation) {
        with_runner(|r| r.finish_loading());
        log::info!("wander: {}/{} sprite sheets loaded", loaded, total);
    }
}
