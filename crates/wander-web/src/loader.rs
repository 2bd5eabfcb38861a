//! Browser-side sheet loading.
//!
//! Images are decoded by the browser, read back as RGBA through a scratch
//! canvas, keyed by the engine's `SheetSlicer`, and written to one small
//! canvas per frame. Slicing yields to the event loop every few frames so a
//! large sheet never blocks the page.

use js_sys::{Function, Promise};
use wasm_bindgen::prelude::*;
use wasm_bindgen::{Clamped, JsCast};
use wasm_bindgen_futures::JsFuture;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlImageElement, ImageData};

use wander_engine::{FrameImage, SheetInfo, SheetSlicer};

/// A sheet ready for drawing: engine metrics plus per-frame surfaces.
pub struct SheetFrames {
    pub info: SheetInfo,
    pub frames: Vec<HtmlCanvasElement>,
}

/// Resolve once `src` has loaded into a fresh image element.
pub async fn load_image(src: &str) -> Result<HtmlImageElement, JsValue> {
    let image = HtmlImageElement::new()?;
    let promise = Promise::new(&mut |resolve: Function, reject: Function| {
        image.set_onload(Some(&resolve));
        image.set_onerror(Some(&reject));
    });
    image.set_src(src);
    let loaded = JsFuture::from(promise).await;
    image.set_onload(None);
    image.set_onerror(None);
    loaded.map_err(|_| JsValue::from_str(&format!("failed to load {}", src)))?;
    Ok(image)
}

/// Give the event loop a turn (a zero-delay timeout).
pub async fn next_turn() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let mut scheduled = Ok(0);
    let promise = Promise::new(&mut |resolve: Function, _reject: Function| {
        scheduled = window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, 0);
    });
    scheduled?;
    JsFuture::from(promise).await?;
    Ok(())
}

fn canvas_2d(
    document: &Document,
    width: u32,
    height: u32,
) -> Result<(HtmlCanvasElement, CanvasRenderingContext2d), JsValue> {
    let canvas = document
        .create_element("canvas")?
        .dyn_into::<HtmlCanvasElement>()?;
    canvas.set_width(width);
    canvas.set_height(height);
    let ctx = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2D canvas context unavailable"))?
        .dyn_into::<CanvasRenderingContext2d>()?;
    Ok((canvas, ctx))
}

/// Read an image's pixels back as RGBA8.
fn image_pixels(document: &Document, image: &HtmlImageElement) -> Result<(Vec<u8>, u32, u32), JsValue> {
    let (width, height) = (image.natural_width(), image.natural_height());
    let (_scratch, ctx) = canvas_2d(document, width, height)?;
    ctx.draw_image_with_html_image_element(image, 0.0, 0.0)?;
    let data = ctx.get_image_data(0.0, 0.0, width as f64, height as f64)?;
    Ok((data.data().0, width, height))
}

fn frame_surface(document: &Document, frame: &FrameImage) -> Result<HtmlCanvasElement, JsValue> {
    let (canvas, ctx) = canvas_2d(document, frame.width, frame.height)?;
    let data = ImageData::new_with_u8_clamped_array_and_sh(
        Clamped(frame.as_bytes()),
        frame.width,
        frame.height,
    )?;
    ctx.put_image_data(&data, 0.0, 0.0)?;
    Ok(canvas)
}

/// Fetch, slice and key one sheet, `frames_per_batch` frames per event-loop turn.
pub async fn load_sheet(
    document: &Document,
    src: &str,
    frames_per_batch: usize,
) -> Result<SheetFrames, JsValue> {
    let image = load_image(src).await?;
    let (rgba, width, height) = image_pixels(document, &image)?;
    let slicer = SheetSlicer::new(&rgba, width, height)
        .map_err(|err| JsValue::from_str(&format!("{}: {}", src, err)))?;
    let info = slicer.info();

    let batch = frames_per_batch.max(1);
    let mut frames = Vec::with_capacity(info.frame_count);
    for (index, frame) in slicer.enumerate() {
        frames.push(frame_surface(document, &frame)?);
        if (index + 1) % batch == 0 && index + 1 < info.frame_count {
            next_turn().await?;
        }
    }
    Ok(SheetFrames { info, frames })
}
