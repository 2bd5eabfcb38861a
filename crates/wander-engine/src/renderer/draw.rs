use glam::Vec2;
use crate::components::sprite::SpriteKey;

/// Straight-alpha colour, channels 0-255 with alpha in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Black at the given opacity.
    pub const fn shade(a: f32) -> Self {
        Self::new(0, 0, 0, a)
    }

    /// CSS `rgba()` form for Canvas2D style setters.
    pub fn to_css(&self) -> String {
        format!("rgba({},{},{},{})", self.r, self.g, self.b, self.a)
    }
}

/// Floor fill for even tiles.
pub const FLOOR_EVEN: Rgba = Rgba::shade(0.025);
/// Floor fill for odd tiles.
pub const FLOOR_ODD: Rgba = Rgba::shade(0.015);
/// Tile outline.
pub const FLOOR_STROKE: Rgba = Rgba::shade(0.055);
pub const FLOOR_STROKE_WIDTH: f32 = 0.5;
pub const FOOD_SHADOW: Rgba = Rgba::shade(0.1);
pub const FOOD_BODY: Rgba = Rgba::new(30, 30, 30, 0.9);

/// Horizontal shear and vertical squash applied to every character so the
/// silhouettes lean into the isometric floor: canvas transform (a, b, c, d).
pub const CHARACTER_SKEW: [f32; 4] = [1.0, 0.0, -0.07, 0.92];

/// Soft elliptical shadow under a character, in the character's local frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    /// Offset from the character anchor (after skew and mirroring).
    pub offset: Vec2,
    pub radius: Vec2,
    pub color: Rgba,
}

/// One backend-neutral drawing operation, in screen pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Clear the whole surface to transparent.
    Clear { width: f32, height: f32 },
    /// Filled and outlined floor diamond.
    Tile {
        center: Vec2,
        half_width: f32,
        half_height: f32,
        fill: Rgba,
        stroke: Rgba,
        stroke_width: f32,
    },
    /// Filled axis-aligned ellipse.
    Ellipse { center: Vec2, radius: Vec2, color: Rgba },
    /// Filled circle.
    Disc { center: Vec2, radius: f32, color: Rgba },
    /// A character sprite frame.
    ///
    /// The backend translates to `anchor`, applies [`CHARACTER_SKEW`],
    /// mirrors horizontally when `mirrored`, draws `shadow`, then draws the
    /// frame with its bottom centre at the origin.
    Sprite {
        key: SpriteKey,
        frame: usize,
        anchor: Vec2,
        size: Vec2,
        mirrored: bool,
        shadow: Shadow,
    },
}

/// Ordered list of draw commands for one frame, back to front.
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self {
            commands: Vec::with_capacity(2048),
        }
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter()
    }

    /// Only the sprite commands, in paint order.
    pub fn sprites(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Sprite { .. }))
    }
}

impl Default for DrawList {
    fn default() -> Self {
        Self::new()
    }
}
