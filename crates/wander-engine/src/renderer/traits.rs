//! Renderer seam between the headless stage and a drawing backend.
//!
//! The stage produces a [`DrawList`] every frame; a backend (Canvas2D in the
//! web crate, a recording stub in tests) replays it.

use super::draw::DrawList;

/// Complete frame data for rendering.
pub struct FrameData<'a> {
    pub draw_list: &'a DrawList,
    /// Surface size the commands were laid out for.
    pub width: f32,
    pub height: f32,
}

/// Drawing backend.
///
/// Implementations must treat a sprite command whose sheet they do not hold
/// as a no-op: sheets load asynchronously and may fail individually.
pub trait Renderer {
    /// Backend identifier (e.g., "canvas2d").
    fn backend(&self) -> &'static str;

    /// Draw a complete frame.
    fn draw(&mut self, frame: &FrameData);

    /// Handle a surface resize.
    fn resize(&mut self, width: u32, height: u32);
}
