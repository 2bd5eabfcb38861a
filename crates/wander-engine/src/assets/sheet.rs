//! Sprite sheet preprocessing: strip slicing and brightness alpha keying.
//!
//! Source sheets are grayscale strips drawn light-on-dark. Each frame is cut
//! out and recoloured into a soft-edged black silhouette: dark pixels vanish,
//! bright pixels become opaque black, and the band in between ramps alpha.

use thiserror::Error;

use crate::components::sprite::SheetInfo;

/// Brightness below which a pixel becomes fully transparent.
pub const KEY_LOW: f32 = 18.0;
/// Brightness at and above which a pixel becomes fully opaque.
pub const KEY_HIGH: f32 = 55.0;

/// Errors raised while preparing a sprite sheet.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SheetError {
    #[error("sprite sheet has unusable dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
    #[error("pixel buffer holds {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },
}

/// A single processed frame, RGBA8 rows top to bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<[u8; 4]>,
}

impl FrameImage {
    /// Raw RGBA bytes, suitable for handing to an image upload API.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }
}

/// Derive frame metrics from the sheet's pixel size.
///
/// Frames are square-ish cells laid out horizontally, so the frame count is
/// the rounded aspect ratio.
pub fn sheet_layout(width: u32, height: u32) -> Result<SheetInfo, SheetError> {
    if width == 0 || height == 0 {
        return Err(SheetError::InvalidDimensions { width, height });
    }
    let frame_count = (width as f64 / height as f64).round() as usize;
    if frame_count == 0 {
        return Err(SheetError::InvalidDimensions { width, height });
    }
    let frame_width = (width as f64 / frame_count as f64).round() as u32;
    Ok(SheetInfo {
        frame_count,
        frame_width,
        frame_height: height,
    })
}

/// Alpha for a given brightness under the key ramp.
pub fn key_alpha(brightness: f32) -> u8 {
    if brightness < KEY_LOW {
        0
    } else if brightness < KEY_HIGH {
        (((brightness - KEY_LOW) / (KEY_HIGH - KEY_LOW)) * 255.0).floor() as u8
    } else {
        255
    }
}

/// Apply the brightness alpha key in place.
pub fn alpha_key(pixels: &mut [[u8; 4]]) {
    for px in pixels.iter_mut() {
        let brightness = (px[0] as f32 + px[1] as f32 + px[2] as f32) / 3.0;
        if brightness < KEY_LOW {
            px[3] = 0;
        } else {
            *px = [0, 0, 0, key_alpha(brightness)];
        }
    }
}

/// Lazily cuts a sheet into keyed frames, one per `next()`.
///
/// Lets a host spread the work over several event-loop turns.
pub struct SheetSlicer<'a> {
    source: &'a [[u8; 4]],
    width: u32,
    info: SheetInfo,
    next: usize,
}

impl<'a> SheetSlicer<'a> {
    /// Validate an RGBA8 buffer of `width * height` pixels and prepare to slice it.
    pub fn new(rgba: &'a [u8], width: u32, height: u32) -> Result<Self, SheetError> {
        let info = sheet_layout(width, height)?;
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(SheetError::BufferSize {
                expected,
                actual: rgba.len(),
            });
        }
        let source: &[[u8; 4]] =
            bytemuck::try_cast_slice(rgba).map_err(|_| SheetError::BufferSize {
                expected,
                actual: rgba.len(),
            })?;
        Ok(Self {
            source,
            width,
            info,
            next: 0,
        })
    }

    pub fn info(&self) -> SheetInfo {
        self.info
    }

    fn cut(&self, index: usize) -> FrameImage {
        let fw = self.info.frame_width;
        let fh = self.info.frame_height;
        let x0 = index as u32 * fw;
        let mut pixels = vec![[0u8; 4]; (fw * fh) as usize];
        for y in 0..fh {
            for x in 0..fw {
                let sx = x0 + x;
                // Columns past the source edge stay transparent
                if sx >= self.width {
                    continue;
                }
                pixels[(y * fw + x) as usize] = self.source[(y * self.width + sx) as usize];
            }
        }
        alpha_key(&mut pixels);
        FrameImage {
            width: fw,
            height: fh,
            pixels,
        }
    }
}

impl Iterator for SheetSlicer<'_> {
    type Item = FrameImage;

    fn next(&mut self) -> Option<FrameImage> {
        if self.next >= self.info.frame_count {
            return None;
        }
        let frame = self.cut(self.next);
        self.next += 1;
        Some(frame)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.info.frame_count - self.next;
        (left, Some(left))
    }
}

impl ExactSizeIterator for SheetSlicer<'_> {}
