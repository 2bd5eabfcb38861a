use std::collections::HashMap;
use std::f64::consts::TAU;

use glam::Vec2;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use wander_engine::renderer::draw::{Shadow, CHARACTER_SKEW};
use wander_engine::{DrawCommand, FrameData, Renderer, SpriteKey};

/// Replays draw lists onto a 2D canvas context.
pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    /// Keyed frame surfaces per loaded sheet.
    sheets: HashMap<SpriteKey, Vec<HtmlCanvasElement>>,
}

impl CanvasRenderer {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2D canvas context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self {
            canvas,
            ctx,
            sheets: HashMap::new(),
        })
    }

    pub fn insert_sheet(&mut self, key: SpriteKey, frames: Vec<HtmlCanvasElement>) {
        self.sheets.insert(key, frames);
    }

    fn draw_command(&self, command: &DrawCommand) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        match command {
            DrawCommand::Clear { width, height } => {
                ctx.clear_rect(0.0, 0.0, *width as f64, *height as f64);
            }
            DrawCommand::Tile {
                center,
                half_width,
                half_height,
                fill,
                stroke,
                stroke_width,
            } => {
                let (x, y) = (center.x as f64, center.y as f64);
                let (hw, hh) = (*half_width as f64, *half_height as f64);
                ctx.begin_path();
                ctx.move_to(x, y - hh);
                ctx.line_to(x + hw, y);
                ctx.line_to(x, y + hh);
                ctx.line_to(x - hw, y);
                ctx.close_path();
                ctx.set_fill_style_str(&fill.to_css());
                ctx.fill();
                ctx.set_stroke_style_str(&stroke.to_css());
                ctx.set_line_width(*stroke_width as f64);
                ctx.stroke();
            }
            DrawCommand::Ellipse {
                center,
                radius,
                color,
            } => {
                ctx.begin_path();
                ctx.ellipse(
                    center.x as f64,
                    center.y as f64,
                    radius.x as f64,
                    radius.y as f64,
                    0.0,
                    0.0,
                    TAU,
                )?;
                ctx.set_fill_style_str(&color.to_css());
                ctx.fill();
            }
            DrawCommand::Disc {
                center,
                radius,
                color,
            } => {
                ctx.begin_path();
                ctx.arc(center.x as f64, center.y as f64, *radius as f64, 0.0, TAU)?;
                ctx.set_fill_style_str(&color.to_css());
                ctx.fill();
            }
            DrawCommand::Sprite {
                key,
                frame,
                anchor,
                size,
                mirrored,
                shadow,
            } => {
                let Some(surface) = self.sheets.get(key).and_then(|frames| frames.get(*frame))
                else {
                    return Ok(());
                };
                ctx.save();
                let result = self.draw_sprite(surface, *anchor, *size, *mirrored, shadow);
                ctx.restore();
                result?;
            }
        }
        Ok(())
    }

    /// Draw a frame with its bottom centre at `anchor`. Expects the caller to
    /// save and restore the context around it.
    fn draw_sprite(
        &self,
        surface: &HtmlCanvasElement,
        anchor: Vec2,
        size: Vec2,
        mirrored: bool,
        shadow: &Shadow,
    ) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        let [a, b, c, d] = CHARACTER_SKEW.map(f64::from);
        ctx.translate(anchor.x as f64, anchor.y as f64)?;
        ctx.transform(a, b, c, d, 0.0, 0.0)?;
        if mirrored {
            ctx.scale(-1.0, 1.0)?;
        }

        ctx.begin_path();
        ctx.ellipse(
            shadow.offset.x as f64,
            shadow.offset.y as f64,
            shadow.radius.x as f64,
            shadow.radius.y as f64,
            0.0,
            0.0,
            TAU,
        )?;
        ctx.set_fill_style_str(&shadow.color.to_css());
        ctx.fill();

        let (w, h) = (size.x as f64, size.y as f64);
        ctx.draw_image_with_html_canvas_element_and_dw_and_dh(surface, -w / 2.0, -h, w, h)
    }
}

impl Renderer for CanvasRenderer {
    fn backend(&self) -> &'static str {
        "canvas2d"
    }

    fn draw(&mut self, frame: &FrameData) {
        for command in frame.draw_list.iter() {
            if let Err(err) = self.draw_command(command) {
                log::error!("canvas draw failed: {:?}", err);
                return;
            }
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        // Assigning either dimension clears the canvas, even to the same value
        if self.canvas.width() != width {
            self.canvas.set_width(width);
        }
        if self.canvas.height() != height {
            self.canvas.set_height(height);
        }
    }
}
