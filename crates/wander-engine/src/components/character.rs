use glam::Vec2;
use crate::api::types::CharacterId;
use crate::assets::registry::SpriteLibrary;
use crate::components::animation::FrameCursor;
use crate::components::sprite::SpriteKey;
use crate::components::state::State;
use crate::core::rng::Rng;

/// Below this magnitude the screen-space heading is treated as zero and
/// facing is left alone.
pub const FACING_EPSILON: f32 = 0.00001;
/// Walking bounces off these margins inside the unit square.
pub const SOFT_EDGE: f32 = 0.05;
/// Airborne and special moves may drift this far outside the floor.
pub const HARD_MIN: f32 = -0.5;
pub const HARD_MAX: f32 = 1.5;
/// Steering toward a point closer than this leaves velocity unchanged.
pub const ARRIVE_EPSILON: f32 = 0.001;

/// An NPC on the floor.
#[derive(Debug, Clone)]
pub struct Character {
    pub id: CharacterId,
    /// World position; nominally inside [0, 1] x [0, 1].
    pub pos: Vec2,
    /// Height above the floor in pixels; negative is up.
    pub z: f32,
    /// Vertical velocity; negative is up.
    pub vz: f32,
    /// Drift velocity in world units per tick.
    pub velocity: Vec2,
    /// Facing right on screen.
    pub right: bool,
    /// Walking speed in world units per tick.
    pub base_speed: f32,
    pub state: State,
    pub anim: FrameCursor,
    /// Ticks until walking picks a new heading.
    pub dir_timer: u32,
}

impl Character {
    /// Create a character at a random spot away from the edges, walking in a
    /// random direction.
    pub fn spawn(id: CharacterId, rng: &mut Rng) -> Self {
        let pos = Vec2::new(0.15 + rng.next_f32() * 0.7, 0.15 + rng.next_f32() * 0.7);
        let right = rng.next_f32() > 0.5;
        let phase_frame = rng.next_int(12) as usize;
        let phase_tick = rng.next_int(40);
        let base_speed = 0.0006 + rng.next_f32() * 0.0006;
        let delay = rng.range(6, 3);
        let mut character = Self {
            id,
            pos,
            z: 0.0,
            vz: 0.0,
            velocity: Vec2::ZERO,
            right,
            base_speed,
            state: State::Walking,
            anim: FrameCursor::new(delay).with_phase(phase_frame, phase_tick),
            dir_timer: 0,
        };
        character.pick_new_direction(rng);
        character
    }

    /// Create a grounded, walking character with explicit parameters.
    pub fn at(id: CharacterId, pos: Vec2, base_speed: f32, delay: u32) -> Self {
        Self {
            id,
            pos,
            z: 0.0,
            vz: 0.0,
            velocity: Vec2::ZERO,
            right: true,
            base_speed,
            state: State::Walking,
            anim: FrameCursor::new(delay),
            dir_timer: 1,
        }
    }

    pub fn is_grounded(&self) -> bool {
        self.z == 0.0
    }

    /// Face along the on-screen horizontal component of the velocity.
    ///
    /// Under the isometric transform screen x grows with (dvx - dvy).
    pub fn update_facing(&mut self) {
        let screen_dx = self.velocity.x - self.velocity.y;
        if screen_dx.abs() > FACING_EPSILON {
            self.right = screen_dx > 0.0;
        }
    }

    /// Random heading at base speed and a fresh direction timer.
    pub fn pick_new_direction(&mut self, rng: &mut Rng) {
        let angle = rng.next_f32() * std::f32::consts::TAU;
        self.velocity = Vec2::new(angle.cos(), angle.sin()) * self.base_speed;
        self.update_facing();
        self.dir_timer = rng.range(200, 400);
    }

    /// Point the velocity at `target` with magnitude `speed`.
    ///
    /// Returns the distance to the target, or 0 when already on top of it.
    pub fn walk_toward(&mut self, target: Vec2, speed: f32) -> f32 {
        let delta = target - self.pos;
        let dist = delta.length();
        if dist < ARRIVE_EPSILON {
            return 0.0;
        }
        self.velocity = delta / dist * speed;
        self.update_facing();
        dist
    }

    /// Move by the velocity scaled per axis.
    pub fn drift(&mut self, scale_x: f32, scale_y: f32) {
        self.pos += self.velocity * Vec2::new(scale_x, scale_y);
    }

    /// Keep inside the hard bounds.
    pub fn clamp_position(&mut self) {
        self.pos = self.pos.clamp(Vec2::splat(HARD_MIN), Vec2::splat(HARD_MAX));
    }

    /// Reflect off the soft edges, then clamp into the unit square.
    pub fn bounce_edges(&mut self) {
        if self.pos.x < SOFT_EDGE || self.pos.x > 1.0 - SOFT_EDGE {
            self.velocity.x = -self.velocity.x;
            self.update_facing();
        }
        if self.pos.y < SOFT_EDGE || self.pos.y > 1.0 - SOFT_EDGE {
            self.velocity.y = -self.velocity.y;
            self.update_facing();
        }
        self.pos = self.pos.clamp(Vec2::ZERO, Vec2::ONE);
    }

    /// Switch state. The animation restarts only if the state label differs,
    /// so refreshing a timer keeps the current frame.
    pub fn go(&mut self, next: State) {
        if self.state.name() != next.name() {
            log::debug!(
                "character {}: {} -> {}",
                self.id.0,
                self.state.name(),
                next.name()
            );
            self.anim.reset();
        }
        self.state = next;
    }

    /// Advance the animation of the current state's sheet by one tick.
    pub fn step_frame(&mut self, sprites: &SpriteLibrary, looping: bool) {
        let count = sprites.frame_count(self.state.sprite());
        self.anim.step(count, looping);
    }

    /// Sheet key and in-range frame to draw, if the sheet is loaded.
    pub fn draw_frame(&self, sprites: &SpriteLibrary) -> Option<(SpriteKey, usize)> {
        let key = self.state.sprite();
        let count = sprites.frame_count(key)?;
        let frame = if self.state.holds_first_frame() {
            0
        } else {
            self.anim.display_frame(count)
        };
        Some((key, frame))
    }
}
