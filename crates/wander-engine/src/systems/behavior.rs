//! Character behaviour: the per-tick state transition function.
//!
//! `update` applies the food priority rule, then dispatches on the current
//! state. Every branch returns the next state, which is applied through
//! [`Character::go`] so animation restarts follow state identity.
//!
//! All probabilities are per fixed tick (1/60 s by default).

use crate::assets::registry::SpriteLibrary;
use crate::components::character::Character;
use crate::components::state::{JumpKind, State};
use crate::core::food::FoodField;
use crate::core::rng::Rng;

// Walking -> branch probabilities, evaluated in this order.
pub const IDLE_CHANCE: f32 = 0.0008;
pub const JUMP_CHANCE: f32 = 0.0003;
pub const RUN_CHANCE: f32 = 0.00015;
pub const SPEED_BOOST_CHANCE: f32 = 0.0001;
pub const DIVE_CHANCE: f32 = 0.0001;
pub const WALL_CLIMB_CHANCE: f32 = 0.00008;
pub const CRAWL_CHANCE: f32 = 0.00008;
pub const ROLL_CHANCE: f32 = 0.00006;
pub const LADDER_CHANCE: f32 = 0.00008;
pub const LEAP_CHANCE: f32 = 0.00005;
/// Per-tick chance of kicking off the wall before reaching the top.
pub const WALL_KICK_CHANCE: f32 = 0.007;

pub const GRAVITY: f32 = 0.40;
pub const LEAP_GRAVITY: f32 = 0.32;
pub const WALL_JUMP_GRAVITY: f32 = 0.35;
/// Descending jumps above this height switch to the falling pose.
pub const FALL_HEIGHT: f32 = -10.0;
pub const LEAP_FALL_HEIGHT: f32 = -8.0;
pub const LEAP_VELOCITY: f32 = -5.0;
pub const WALL_JUMP_VELOCITY: f32 = -3.0;

pub const HUNGRY_SPEED_FACTOR: f32 = 4.0;
/// World distance at which a hungry character eats its target.
pub const EAT_DISTANCE: f32 = 0.025;

pub const DIVE_SINK_RATE: f32 = 3.0;
pub const DIVE_DEPTH: f32 = -50.0;
pub const SWIM_DEPTH: f32 = -50.0;
pub const SWIM_AMPLITUDE: f32 = 18.0;
pub const SWIM_FREQUENCY: f64 = 0.0012;
pub const WALL_CLIMB_RATE: f32 = 1.4;
pub const WALL_TOP: f32 = -60.0;
pub const LADDER_RATE: f32 = 1.0;
pub const LADDER_TOP: f32 = -70.0;

pub const STOP_RUNNING_TICKS: u32 = 25;
pub const LANDING_TICKS: u32 = 18;
pub const FALL_LANDING_TICKS: u32 = 20;
pub const ROLL_TICKS: u32 = 45;
pub const DIVE_TICKS: u32 = 30;
pub const SWIM_TICKS: u32 = 200;
pub const DESCEND_TICKS: u32 = 70;

/// Everything a character update may read or touch besides the character.
pub struct BehaviorContext<'a> {
    pub food: &'a mut FoodField,
    pub sprites: &'a SpriteLibrary,
    pub rng: &'a mut Rng,
    /// Stage clock in milliseconds, drives the swim bob.
    pub time_ms: f64,
}

/// Advance one character by one tick.
pub fn update(c: &mut Character, ctx: &mut BehaviorContext) {
    if c.is_grounded() && !c.state.ignores_food() {
        if let Some(food) = ctx.food.nearest_alive(c.pos) {
            let target = food.id;
            // A jump launched last tick is still on the ground with its
            // launch velocity set
            c.vz = 0.0;
            c.go(State::Hungry { target });
        }
    }

    let next = transition(c.state, c, ctx);
    c.go(next);
}

fn countdown(timer: u32) -> Option<u32> {
    match timer.saturating_sub(1) {
        0 => None,
        left => Some(left),
    }
}

/// Back to walking with a fresh heading.
fn resume_walking(c: &mut Character, rng: &mut Rng) -> State {
    c.pick_new_direction(rng);
    State::Walking
}

/// Apply one tick of ballistic motion. Returns true on touchdown.
fn ballistic(c: &mut Character, gravity: f32) -> bool {
    c.z += c.vz;
    c.vz += gravity;
    if c.z >= 0.0 {
        c.z = 0.0;
        c.vz = 0.0;
        true
    } else {
        false
    }
}

fn transition(state: State, c: &mut Character, ctx: &mut BehaviorContext) -> State {
    let sprites = ctx.sprites;
    match state {
        State::Walking => walk(c, ctx),

        State::IdlePause { timer } => match countdown(timer) {
            Some(timer) => State::IdlePause { timer },
            None => resume_walking(c, ctx.rng),
        },

        State::Hungry { target } => {
            let Some(food_pos) = ctx.food.get(target).filter(|f| f.alive).map(|f| f.pos) else {
                return resume_walking(c, ctx.rng);
            };
            let dist = c.walk_toward(food_pos, c.base_speed * HUNGRY_SPEED_FACTOR);
            c.step_frame(sprites, true);
            c.drift(1.0, 1.0);
            c.clamp_position();
            if dist >= EAT_DISTANCE {
                return State::Hungry { target };
            }
            if ctx.food.consume(target) {
                State::Eating {
                    timer: ctx.rng.range(50, 30),
                }
            } else {
                resume_walking(c, ctx.rng)
            }
        }

        State::Eating { timer } => {
            c.step_frame(sprites, true);
            match countdown(timer) {
                Some(timer) => State::Eating { timer },
                None => resume_walking(c, ctx.rng),
            }
        }

        State::Running { timer } => {
            c.step_frame(sprites, true);
            c.drift(1.6, 1.6);
            c.bounce_edges();
            match countdown(timer) {
                Some(timer) => State::Running { timer },
                None => State::StopRunning {
                    timer: STOP_RUNNING_TICKS,
                },
            }
        }

        State::SpeedBoostRunning { timer } => {
            c.step_frame(sprites, true);
            c.drift(2.2, 2.2);
            c.bounce_edges();
            match countdown(timer) {
                Some(timer) => State::SpeedBoostRunning { timer },
                None => State::StopRunning {
                    timer: STOP_RUNNING_TICKS,
                },
            }
        }

        State::StopRunning { timer } => {
            c.step_frame(sprites, false);
            match countdown(timer) {
                Some(timer) => State::StopRunning { timer },
                None => resume_walking(c, ctx.rng),
            }
        }

        State::Crawl { timer } => {
            c.step_frame(sprites, true);
            c.drift(0.25, 0.25);
            c.bounce_edges();
            match countdown(timer) {
                Some(timer) => State::Crawl { timer },
                None => resume_walking(c, ctx.rng),
            }
        }

        State::Roll { timer } => {
            c.step_frame(sprites, true);
            c.drift(1.2, 0.4);
            c.clamp_position();
            match countdown(timer) {
                Some(timer) => State::Roll { timer },
                None => resume_walking(c, ctx.rng),
            }
        }

        State::Jump(kind) => {
            c.step_frame(sprites, false);
            c.drift(0.5, 0.5);
            let landed = ballistic(c, GRAVITY);
            c.clamp_position();
            if landed {
                let timer = LANDING_TICKS;
                if kind == JumpKind::Double {
                    State::LandingImpact { timer }
                } else {
                    State::Landing { timer }
                }
            } else if c.vz > 0.0 && c.z < FALL_HEIGHT {
                State::Falling
            } else {
                State::Jump(kind)
            }
        }

        State::Falling => {
            c.step_frame(sprites, true);
            c.drift(0.3, 0.3);
            let landed = ballistic(c, GRAVITY);
            c.clamp_position();
            if landed {
                State::LandingImpact {
                    timer: FALL_LANDING_TICKS,
                }
            } else {
                State::Falling
            }
        }

        State::Leap => {
            c.step_frame(sprites, false);
            c.drift(1.6, 0.4);
            let landed = ballistic(c, LEAP_GRAVITY);
            c.clamp_position();
            if landed {
                State::Landing {
                    timer: LANDING_TICKS,
                }
            } else if c.vz > 0.0 && c.z < LEAP_FALL_HEIGHT {
                State::Falling
            } else {
                State::Leap
            }
        }

        State::Landing { timer } => {
            c.step_frame(sprites, false);
            match countdown(timer) {
                Some(timer) => State::Landing { timer },
                None => resume_walking(c, ctx.rng),
            }
        }

        State::LandingImpact { timer } => {
            c.step_frame(sprites, false);
            match countdown(timer) {
                Some(timer) => State::LandingImpact { timer },
                None => resume_walking(c, ctx.rng),
            }
        }

        State::SwimmingDive { timer, swim_timer } => {
            c.step_frame(sprites, false);
            c.z -= DIVE_SINK_RATE;
            c.drift(0.3, 0.1);
            c.clamp_position();
            match countdown(timer) {
                Some(timer) if c.z >= DIVE_DEPTH => State::SwimmingDive { timer, swim_timer },
                _ => State::Swimming { swim_timer },
            }
        }

        State::Swimming { swim_timer } => {
            let left = countdown(swim_timer);
            c.step_frame(sprites, true);
            c.drift(0.5, 0.15);
            let phase = ctx.time_ms * SWIM_FREQUENCY + c.pos.x as f64 * 10.0;
            c.z = SWIM_DEPTH + SWIM_AMPLITUDE * phase.sin() as f32;
            c.bounce_edges();
            match left {
                Some(swim_timer) => State::Swimming { swim_timer },
                None => {
                    c.z = 0.0;
                    State::Walking
                }
            }
        }

        State::WallClimbing => {
            c.step_frame(sprites, true);
            c.z -= WALL_CLIMB_RATE;
            if c.z < WALL_TOP || ctx.rng.chance(WALL_KICK_CHANCE) {
                c.vz = WALL_JUMP_VELOCITY;
                let away = if c.right { -1.0 } else { 1.0 };
                c.velocity.x = away * c.base_speed * 1.8;
                c.right = !c.right;
                State::WallJump
            } else {
                State::WallClimbing
            }
        }

        State::WallJump => {
            c.step_frame(sprites, false);
            c.drift(1.0, 0.3);
            let landed = ballistic(c, WALL_JUMP_GRAVITY);
            c.clamp_position();
            if landed {
                resume_walking(c, ctx.rng)
            } else {
                State::WallJump
            }
        }

        State::ClimbingLadder { timer } => {
            c.step_frame(sprites, true);
            c.z -= LADDER_RATE;
            match countdown(timer) {
                Some(timer) if c.z >= LADDER_TOP => State::ClimbingLadder { timer },
                _ => State::DescendingLadder {
                    timer: DESCEND_TICKS,
                },
            }
        }

        State::DescendingLadder { timer } => {
            c.step_frame(sprites, true);
            c.z += LADDER_RATE;
            match countdown(timer) {
                Some(timer) if c.z < 0.0 => State::DescendingLadder { timer },
                _ => {
                    c.z = 0.0;
                    resume_walking(c, ctx.rng)
                }
            }
        }
    }
}

fn walk(c: &mut Character, ctx: &mut BehaviorContext) -> State {
    let rng = &mut *ctx.rng;
    c.step_frame(ctx.sprites, true);
    c.drift(1.0, 1.0);
    c.bounce_edges();
    c.dir_timer = c.dir_timer.saturating_sub(1);
    if c.dir_timer == 0 {
        c.pick_new_direction(rng);
    }

    if rng.chance(IDLE_CHANCE) {
        return State::IdlePause {
            timer: rng.range(60, 100),
        };
    }

    if rng.chance(JUMP_CHANCE) {
        let kind = JumpKind::ALL[rng.next_int(JumpKind::ALL.len() as u32) as usize];
        c.vz = kind.launch_velocity();
        State::Jump(kind)
    } else if rng.chance(RUN_CHANCE) {
        State::Running {
            timer: rng.range(80, 100),
        }
    } else if rng.chance(SPEED_BOOST_CHANCE) {
        State::SpeedBoostRunning {
            timer: rng.range(50, 60),
        }
    } else if rng.chance(DIVE_CHANCE) {
        State::SwimmingDive {
            timer: DIVE_TICKS,
            swim_timer: SWIM_TICKS,
        }
    } else if rng.chance(WALL_CLIMB_CHANCE) {
        State::WallClimbing
    } else if rng.chance(CRAWL_CHANCE) {
        State::Crawl {
            timer: rng.range(80, 80),
        }
    } else if rng.chance(ROLL_CHANCE) {
        State::Roll { timer: ROLL_TICKS }
    } else if rng.chance(LADDER_CHANCE) {
        State::ClimbingLadder {
            timer: rng.range(60, 80),
        }
    } else if rng.chance(LEAP_CHANCE) {
        c.vz = LEAP_VELOCITY;
        State::Leap
    } else {
        State::Walking
    }
}
