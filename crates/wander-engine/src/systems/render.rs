use glam::Vec2;
use crate::assets::registry::SpriteLibrary;
use crate::components::character::Character;
use crate::core::food::FoodField;
use crate::renderer::draw::{
    DrawCommand, DrawList, Rgba, Shadow, FLOOR_EVEN, FLOOR_ODD, FLOOR_STROKE,
    FLOOR_STROKE_WIDTH, FOOD_BODY, FOOD_SHADOW,
};
use crate::renderer::projection::IsoProjection;

/// Base food radius in pixels before the pulse.
pub const FOOD_RADIUS: f32 = 5.0;
/// Screen pixels per unit of character height, before depth scaling.
pub const HEIGHT_TO_SCREEN: f32 = 0.55;

/// Push the visible floor diamonds, alternating fill by grid parity.
pub fn draw_floor(projection: &IsoProjection, list: &mut DrawList) {
    let half_width = projection.tile_w();
    let half_height = projection.tile_h();
    for tile in projection.floor_tiles() {
        list.push(DrawCommand::Tile {
            center: tile.center,
            half_width,
            half_height,
            fill: if tile.is_even() { FLOOR_EVEN } else { FLOOR_ODD },
            stroke: FLOOR_STROKE,
            stroke_width: FLOOR_STROKE_WIDTH,
        });
    }
}

/// Food pulse factor at a clock time; all items pulse in phase.
pub fn food_pulse(time_ms: f64) -> f32 {
    0.8 + 0.2 * (time_ms * 0.005).sin() as f32
}

/// Push a shadow and a body disc for every live food item.
pub fn draw_food(projection: &IsoProjection, food: &FoodField, time_ms: f64, list: &mut DrawList) {
    let radius = FOOD_RADIUS * food_pulse(time_ms);
    for item in food.alive() {
        let screen = projection.world_to_screen(item.pos);
        list.push(DrawCommand::Ellipse {
            center: screen + Vec2::new(0.0, 2.0),
            radius: Vec2::new(radius + 2.0, 2.0),
            color: FOOD_SHADOW,
        });
        list.push(DrawCommand::Disc {
            center: screen - Vec2::new(0.0, 1.0),
            radius,
            color: FOOD_BODY,
        });
    }
}

/// Push one character's sprite. Does nothing if its sheet is not loaded.
pub fn draw_character(
    projection: &IsoProjection,
    sprites: &SpriteLibrary,
    character: &Character,
    list: &mut DrawList,
) {
    let Some((key, frame)) = character.draw_frame(sprites) else {
        return;
    };
    let Some(info) = sprites.get(key) else {
        return;
    };

    let depth = IsoProjection::depth_scale(character.pos.y);
    let scale = depth * projection.sprite_scale();
    let size = Vec2::new(info.frame_width as f32, info.frame_height as f32) * scale;
    let screen_z = character.z * depth * HEIGHT_TO_SCREEN;
    let anchor = projection.world_to_screen(character.pos) + Vec2::new(0.0, screen_z);

    // Shadow stays on the floor and fades with height
    let shadow_scale = (1.0 - character.z.abs() * 0.005).max(0.0);
    let shadow = Shadow {
        offset: Vec2::new(0.0, -screen_z + 3.0),
        radius: Vec2::new(size.x * 0.26 * shadow_scale, 4.0 * shadow_scale),
        color: Rgba::shade(0.1 * shadow_scale),
    };

    list.push(DrawCommand::Sprite {
        key,
        frame,
        anchor,
        size,
        mirrored: !character.right,
        shadow,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::CharacterId;
    use crate::components::sprite::{SheetInfo, SpriteKey};
    use crate::components::state::State;

    fn library() -> SpriteLibrary {
        let mut lib = SpriteLibrary::new();
        lib.insert(
            SpriteKey::Walking,
            SheetInfo { frame_count: 8, frame_width: 200, frame_height: 100 },
        );
        lib
    }

    #[test]
    fn floor_alternates_fill() {
        let proj = IsoProjection::new(800.0, 600.0);
        let mut list = DrawList::new();
        draw_floor(&proj, &mut list);
        assert!(!list.is_empty());
        let mut even = 0;
        let mut odd = 0;
        for cmd in list.iter() {
            match cmd {
                DrawCommand::Tile { fill, half_width, .. } => {
                    assert_eq!(*half_width, proj.tile_w());
                    if *fill == FLOOR_EVEN {
                        even += 1;
                    } else if *fill == FLOOR_ODD {
                        odd += 1;
                    }
                }
                other => panic!("unexpected {:?}", other),
            }
        }
        assert!(even > 0 && odd > 0);
        assert_eq!(even + odd, list.len());
    }

    #[test]
    fn food_pulse_stays_in_band() {
        for i in 0..1000 {
            let p = food_pulse(i as f64 * 7.3);
            assert!((0.6..=1.0 + 1e-6).contains(&p), "pulse {}", p);
        }
        assert!((food_pulse(0.0) - 0.8).abs() < 1e-6);
    }

    #[test]
    fn food_draws_shadow_then_body() {
        let proj = IsoProjection::new(800.0, 600.0);
        let mut food = FoodField::default();
        food.place(Vec2::splat(0.5));
        let dead = food.place(Vec2::splat(0.2));
        food.consume(dead);

        let mut list = DrawList::new();
        draw_food(&proj, &food, 0.0, &mut list);
        assert_eq!(list.len(), 2);
        let center = proj.world_to_screen(Vec2::splat(0.5));
        assert_eq!(
            list.commands[0],
            DrawCommand::Ellipse {
                center: center + Vec2::new(0.0, 2.0),
                radius: Vec2::new(6.0, 2.0),
                color: FOOD_SHADOW,
            }
        );
        match &list.commands[1] {
            DrawCommand::Disc { center: c, radius, color } => {
                assert_eq!(*c, center - Vec2::new(0.0, 1.0));
                assert!((radius - 4.0).abs() < 1e-6);
                assert_eq!(*color, FOOD_BODY);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn grounded_character_geometry() {
        let proj = IsoProjection::new(800.0, 600.0);
        let mut c = Character::at(CharacterId(1), Vec2::new(0.5, 0.6), 0.001, 6);
        c.right = false;

        let mut list = DrawList::new();
        draw_character(&proj, &library(), &c, &mut list);
        let Some(DrawCommand::Sprite { key, anchor, size, mirrored, shadow, .. }) =
            list.commands.first()
        else {
            panic!("no sprite drawn");
        };
        let depth = 0.45 + 0.6 * 0.75;
        let sc = depth * proj.sprite_scale();
        assert_eq!(*key, SpriteKey::Walking);
        assert!((size.x - 200.0 * sc).abs() < 1e-4);
        assert!((size.y - 100.0 * sc).abs() < 1e-4);
        assert_eq!(*anchor, proj.world_to_screen(c.pos));
        assert!(*mirrored);
        assert_eq!(shadow.offset, Vec2::new(0.0, 3.0));
        assert!((shadow.radius.x - size.x * 0.26).abs() < 1e-4);
        assert!((shadow.color.a - 0.1).abs() < 1e-6);
    }

    #[test]
    fn airborne_character_lifts_and_shadow_fades() {
        let proj = IsoProjection::new(800.0, 600.0);
        let mut c = Character::at(CharacterId(1), Vec2::new(0.5, 0.5), 0.001, 6);
        c.z = -100.0;

        let mut list = DrawList::new();
        draw_character(&proj, &library(), &c, &mut list);
        let Some(DrawCommand::Sprite { anchor, shadow, mirrored, .. }) = list.commands.first() else {
            panic!("no sprite drawn");
        };
        let depth = 0.45 + 0.5 * 0.75;
        let screen_z = -100.0 * depth * 0.55;
        let ground = proj.world_to_screen(c.pos);
        assert!((anchor.y - (ground.y + screen_z)).abs() < 1e-3);
        assert!(!*mirrored);
        // Shadow offset cancels the lift so it lands back on the floor
        assert!((anchor.y + shadow.offset.y - (ground.y + 3.0)).abs() < 1e-3);
        assert!((shadow.color.a - 0.05).abs() < 1e-6);

        c.z = -300.0;
        list.clear();
        draw_character(&proj, &library(), &c, &mut list);
        let Some(DrawCommand::Sprite { shadow, .. }) = list.commands.first() else {
            panic!("no sprite drawn");
        };
        assert_eq!(shadow.radius, Vec2::ZERO);
        assert_eq!(shadow.color.a, 0.0);
    }

    #[test]
    fn unloaded_sheet_draws_nothing() {
        let proj = IsoProjection::new(800.0, 600.0);
        let mut c = Character::at(CharacterId(1), Vec2::splat(0.5), 0.001, 6);
        c.state = State::Roll { timer: 10 };
        let mut list = DrawList::new();
        draw_character(&proj, &library(), &c, &mut list);
        assert!(list.is_empty());
    }
}
