use glam::Vec2;

/// Isometric projection between normalized world space and screen pixels.
///
/// World coordinates live in [0, 1] x [0, 1]; the centre of the world maps to
/// the centre of the surface. Tile size follows the larger surface dimension
/// so the floor looks the same in portrait and landscape.
#[derive(Debug, Clone)]
pub struct IsoProjection {
    /// Surface width in pixels.
    pub width: f32,
    /// Surface height in pixels.
    pub height: f32,
    /// Tile half-width as a fraction of max(width, height).
    pub tile_scale: f32,
    /// Logical half grid count: world [0, 1] spans 2N tiles.
    pub grid_half_count: f32,
    /// Surfaces narrower than this use the narrow sprite scale.
    pub narrow_width: f32,
    pub narrow_sprite_scale: f32,
    pub wide_sprite_scale: f32,
}

/// One diamond of the floor grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloorTile {
    pub gx: i32,
    pub gy: i32,
    /// Centre of the diamond in screen pixels.
    pub center: Vec2,
}

impl FloorTile {
    /// Checkerboard parity of the tile.
    pub fn is_even(&self) -> bool {
        (self.gx + self.gy).rem_euclid(2) == 0
    }
}

impl IsoProjection {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            tile_scale: 0.018,
            grid_half_count: 14.0,
            narrow_width: 600.0,
            narrow_sprite_scale: 0.15,
            wide_sprite_scale: 0.26,
        }
    }

    /// Re-derive the surface size (e.g. on window resize).
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    /// Tile half-width in pixels.
    pub fn tile_w(&self) -> f32 {
        self.width.max(self.height) * self.tile_scale
    }

    /// Tile half-height in pixels (2:1 diamonds).
    pub fn tile_h(&self) -> f32 {
        self.tile_w() * 0.5
    }

    /// Map a world position to screen pixels.
    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        let n2 = self.grid_half_count * 2.0;
        let gx = (world.x - 0.5) * n2;
        let gy = (world.y - 0.5) * n2;
        self.center() + Vec2::new((gx - gy) * self.tile_w(), (gx + gy) * self.tile_h())
    }

    /// Map screen pixels back to a world position.
    ///
    /// Exact inverse of [`world_to_screen`](Self::world_to_screen). A
    /// zero-sized surface has no scale to invert and maps everything to the
    /// world centre.
    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        let tile_w = self.tile_w();
        let tile_h = self.tile_h();
        if tile_w <= f32::EPSILON || self.grid_half_count <= 0.0 {
            return Vec2::splat(0.5);
        }
        let rel = screen - self.center();
        let a = rel.x / tile_w;
        let b = rel.y / tile_h;
        let gx = (a + b) / 2.0;
        let gy = (b - a) / 2.0;
        let n2 = self.grid_half_count * 2.0;
        Vec2::new(gx / n2 + 0.5, gy / n2 + 0.5)
    }

    /// Base sprite scale for the current surface width.
    pub fn sprite_scale(&self) -> f32 {
        if self.width < self.narrow_width {
            self.narrow_sprite_scale
        } else {
            self.wide_sprite_scale
        }
    }

    /// Depth factor: characters further back (smaller wy) render smaller.
    pub fn depth_scale(wy: f32) -> f32 {
        0.45 + wy * 0.75
    }

    /// Every floor tile that can touch the viewport.
    ///
    /// The grid is sized so it covers the surface at any aspect ratio; tiles
    /// whose centre lies more than two tile extents outside the surface are
    /// dropped.
    pub fn floor_tiles(&self) -> Vec<FloorTile> {
        let tile_w = self.tile_w();
        let tile_h = self.tile_h();
        if tile_w <= f32::EPSILON {
            return Vec::new();
        }
        let c = self.center();
        let n = ((self.height / tile_h).max(self.width / tile_w) / 2.0).ceil() as i32 + 2;
        let mut tiles = Vec::with_capacity((2 * n * 2 * n) as usize);
        for gy in -n..n {
            for gx in -n..n {
                let sx = c.x + (gx - gy) as f32 * tile_w;
                let sy = c.y + (gx + gy) as f32 * tile_h;
                if sx < -tile_w * 2.0
                    || sx > self.width + tile_w * 2.0
                    || sy < -tile_h * 2.0
                    || sy > self.height + tile_h * 2.0
                {
                    continue;
                }
                tiles.push(FloorTile {
                    gx,
                    gy,
                    center: Vec2::new(sx, sy),
                });
            }
        }
        tiles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec2, b: Vec2) -> bool {
        (a - b).abs().max_element() < 1e-4
    }

    #[test]
    fn centre_maps_to_centre() {
        let proj = IsoProjection::new(1280.0, 720.0);
        assert!(close(proj.world_to_screen(Vec2::splat(0.5)), Vec2::new(640.0, 360.0)));
    }

    #[test]
    fn inverse_reproduces_world_position() {
        for (w, h) in [(1280.0, 720.0), (375.0, 812.0), (1.0, 1.0), (4000.0, 300.0)] {
            let proj = IsoProjection::new(w, h);
            for i in 0..=10 {
                for j in 0..=10 {
                    let world = Vec2::new(i as f32 / 10.0, j as f32 / 10.0);
                    let back = proj.screen_to_world(proj.world_to_screen(world));
                    assert!(close(world, back), "{}x{}: {:?} -> {:?}", w, h, world, back);
                }
            }
        }
    }

    #[test]
    fn isometric_axes() {
        let proj = IsoProjection::new(1000.0, 1000.0);
        // Moving along +wx goes right and down on screen; +wy goes left and down
        let c = proj.world_to_screen(Vec2::splat(0.5));
        let x = proj.world_to_screen(Vec2::new(0.6, 0.5));
        let y = proj.world_to_screen(Vec2::new(0.5, 0.6));
        assert!(x.x > c.x && x.y > c.y);
        assert!(y.x < c.x && y.y > c.y);
    }

    #[test]
    fn zero_surface_maps_to_centre() {
        let proj = IsoProjection::new(0.0, 0.0);
        assert_eq!(proj.screen_to_world(Vec2::new(10.0, 10.0)), Vec2::splat(0.5));
        assert!(proj.floor_tiles().is_empty());
    }

    #[test]
    fn sprite_scale_follows_width() {
        let mut proj = IsoProjection::new(599.0, 900.0);
        assert_eq!(proj.sprite_scale(), 0.15);
        proj.resize(600.0, 900.0);
        assert_eq!(proj.sprite_scale(), 0.26);
    }

    #[test]
    fn floor_covers_viewport_corners() {
        for (w, h) in [(1280.0, 720.0), (390.0, 844.0)] {
            let proj = IsoProjection::new(w, h);
            let tiles = proj.floor_tiles();
            let (tw, th) = (proj.tile_w(), proj.tile_h());
            for corner in [Vec2::ZERO, Vec2::new(w, 0.0), Vec2::new(0.0, h), Vec2::new(w, h)] {
                let covered = tiles.iter().any(|t| {
                    let d = (corner - t.center).abs();
                    d.x / tw + d.y / th <= 1.0 + 1e-3
                });
                assert!(covered, "corner {:?} not covered at {}x{}", corner, w, h);
            }
        }
    }

    #[test]
    fn floor_skips_far_tiles() {
        let proj = IsoProjection::new(1280.0, 720.0);
        let (tw, th) = (proj.tile_w(), proj.tile_h());
        for t in proj.floor_tiles() {
            assert!(t.center.x >= -tw * 2.0 && t.center.x <= 1280.0 + tw * 2.0);
            assert!(t.center.y >= -th * 2.0 && t.center.y <= 720.0 + th * 2.0);
        }
    }

    #[test]
    fn checkerboard_parity_handles_negatives() {
        let t = |gx, gy| FloorTile { gx, gy, center: Vec2::ZERO };
        assert!(t(0, 0).is_even());
        assert!(!t(-1, 0).is_even());
        assert!(t(-1, -1).is_even());
        assert!(!t(2, -3).is_even());
    }

    #[test]
    fn depth_scale_grows_toward_front() {
        assert!(IsoProjection::depth_scale(0.0) < IsoProjection::depth_scale(1.0));
        assert!((IsoProjection::depth_scale(0.0) - 0.45).abs() < 1e-6);
    }
}
