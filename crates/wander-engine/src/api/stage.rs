use glam::Vec2;
use crate::api::config::StageConfig;
use crate::api::types::{CharacterId, FoodId};
use crate::assets::registry::SpriteLibrary;
use crate::components::character::Character;
use crate::components::sprite::{SheetInfo, SpriteKey};
use crate::core::crowd::Crowd;
use crate::core::food::FoodField;
use crate::core::rng::Rng;
use crate::core::time::FrameClock;
use crate::input::queue::{InputEvent, InputQueue};
use crate::renderer::draw::{DrawCommand, DrawList};
use crate::renderer::projection::IsoProjection;
use crate::systems::behavior::{self, BehaviorContext};
use crate::systems::render::{draw_character, draw_floor, draw_food};

/// Seed used when the config leaves it to the host and the host doesn't care.
pub const DEFAULT_SEED: u64 = 0x5eed_f00d;

/// The whole animated scene: floor, food and crowd, plus the clock and RNG
/// that drive them.
pub struct Stage {
    config: StageConfig,
    projection: IsoProjection,
    sprites: SpriteLibrary,
    food: FoodField,
    crowd: Crowd,
    rng: Rng,
    clock: FrameClock,
    next_id: u32,
}

impl Stage {
    pub fn new(config: StageConfig, width: f32, height: f32) -> Self {
        let mut projection = IsoProjection::new(width, height);
        projection.tile_scale = config.tile_scale;
        projection.grid_half_count = config.grid_half_count;
        projection.narrow_width = config.narrow_width;
        projection.narrow_sprite_scale = config.narrow_sprite_scale;
        projection.wide_sprite_scale = config.wide_sprite_scale;

        Self {
            projection,
            sprites: SpriteLibrary::new(),
            food: FoodField::new(config.food_lifetime),
            crowd: Crowd::with_capacity(config.population),
            rng: Rng::new(config.seed.unwrap_or(DEFAULT_SEED)),
            clock: FrameClock::new(config.fixed_dt),
            next_id: 1,
            config,
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.projection.resize(width, height);
    }

    /// Drain and apply all queued host events.
    pub fn handle_input(&mut self, input: &mut InputQueue) {
        for event in input.drain() {
            match event {
                InputEvent::Click { x, y } => {
                    self.place_food(Vec2::new(x, y));
                }
                InputEvent::Resize { width, height } => self.resize(width, height),
            }
        }
    }

    /// Drop food under a screen position.
    pub fn place_food(&mut self, screen: Vec2) -> FoodId {
        let world = self.projection.screen_to_world(screen);
        self.food.place(world)
    }

    /// Merge a loaded sheet. While the crowd is short of its target, each
    /// successful sheet also brings one new character on stage.
    pub fn add_sheet(&mut self, key: SpriteKey, info: SheetInfo) {
        self.sprites.insert(key, info);
        if self.sprites.contains(key) && self.crowd.len() < self.config.population {
            self.spawn_character();
        }
    }

    /// Top the crowd up to its target population.
    pub fn fill_population(&mut self) {
        let before = self.crowd.len();
        while self.crowd.len() < self.config.population {
            self.spawn_character();
        }
        log::info!(
            "stage populated: {} characters ({} new), {} sheets",
            self.crowd.len(),
            self.crowd.len() - before,
            self.sprites.len()
        );
    }

    pub fn spawn_character(&mut self) -> CharacterId {
        let id = CharacterId(self.next_id);
        self.next_id += 1;
        self.crowd.spawn(Character::spawn(id, &mut self.rng));
        id
    }

    /// One fixed tick of logic without drawing.
    pub fn step(&mut self) {
        self.crowd.sort_by_depth();
        let mut ctx = BehaviorContext {
            food: &mut self.food,
            sprites: &self.sprites,
            rng: &mut self.rng,
            time_ms: self.clock.elapsed_ms(),
        };
        for character in self.crowd.iter_mut() {
            behavior::update(character, &mut ctx);
        }
        self.food.age_and_reap();
        self.clock.advance();
    }

    /// One fixed tick of logic, drawing as it goes.
    ///
    /// Floor and food are drawn before anyone moves; each character is drawn
    /// right after its own update, back to front.
    pub fn frame(&mut self, list: &mut DrawList) {
        let time_ms = self.clock.elapsed_ms();
        self.draw_background(list, time_ms);

        self.crowd.sort_by_depth();
        let mut ctx = BehaviorContext {
            food: &mut self.food,
            sprites: &self.sprites,
            rng: &mut self.rng,
            time_ms,
        };
        for character in self.crowd.iter_mut() {
            behavior::update(character, &mut ctx);
            draw_character(&self.projection, &self.sprites, character, list);
        }

        self.food.age_and_reap();
        self.clock.advance();
    }

    /// Redraw the current state without advancing it.
    pub fn render(&self, list: &mut DrawList) {
        self.draw_background(list, self.clock.elapsed_ms());
        for character in self.crowd.iter() {
            draw_character(&self.projection, &self.sprites, character, list);
        }
    }

    fn draw_background(&self, list: &mut DrawList, time_ms: f64) {
        list.clear();
        list.push(DrawCommand::Clear {
            width: self.projection.width,
            height: self.projection.height,
        });
        draw_floor(&self.projection, list);
        draw_food(&self.projection, &self.food, time_ms, list);
    }

    pub fn config(&self) -> &StageConfig {
        &self.config
    }

    pub fn projection(&self) -> &IsoProjection {
        &self.projection
    }

    pub fn sprites(&self) -> &SpriteLibrary {
        &self.sprites
    }

    pub fn food(&self) -> &FoodField {
        &self.food
    }

    pub fn crowd(&self) -> &Crowd {
        &self.crowd
    }

    pub fn crowd_mut(&mut self) -> &mut Crowd {
        &mut self.crowd
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut FrameClock {
        &mut self.clock
    }
}
