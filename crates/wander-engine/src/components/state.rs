//! Character behaviour states.
//!
//! Each variant carries only the data its state needs. Timers count ticks
//! remaining; a state exits on the tick its timer reaches zero.

use crate::api::types::FoodId;
use crate::components::sprite::SpriteKey;

/// The eight interchangeable jump animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JumpKind {
    Upward,
    Jumping,
    Double,
    Side,
    Obstacle,
    Platform,
    WithStrike,
    Gliding,
}

impl JumpKind {
    pub const ALL: [JumpKind; 8] = [
        JumpKind::Upward,
        JumpKind::Jumping,
        JumpKind::Double,
        JumpKind::Side,
        JumpKind::Obstacle,
        JumpKind::Platform,
        JumpKind::WithStrike,
        JumpKind::Gliding,
    ];

    pub fn sprite(self) -> SpriteKey {
        match self {
            JumpKind::Upward => SpriteKey::UpwardJump,
            JumpKind::Jumping => SpriteKey::Jumping,
            JumpKind::Double => SpriteKey::DoubleJump,
            JumpKind::Side => SpriteKey::SideJump,
            JumpKind::Obstacle => SpriteKey::ObstacleJump,
            JumpKind::Platform => SpriteKey::PlatformJump,
            JumpKind::WithStrike => SpriteKey::JumpWithStrike,
            JumpKind::Gliding => SpriteKey::GlidingJump,
        }
    }

    /// Initial vertical velocity (negative is up).
    pub fn launch_velocity(self) -> f32 {
        match self {
            JumpKind::Double => -10.0,
            _ => -7.0,
        }
    }
}

/// Behaviour state of a character.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum State {
    Walking,
    IdlePause { timer: u32 },
    /// Chasing a food item.
    Hungry { target: FoodId },
    Eating { timer: u32 },
    Running { timer: u32 },
    SpeedBoostRunning { timer: u32 },
    StopRunning { timer: u32 },
    Crawl { timer: u32 },
    Roll { timer: u32 },
    Jump(JumpKind),
    Falling,
    Leap,
    Landing { timer: u32 },
    LandingImpact { timer: u32 },
    SwimmingDive { timer: u32, swim_timer: u32 },
    Swimming { swim_timer: u32 },
    WallClimbing,
    WallJump,
    ClimbingLadder { timer: u32 },
    DescendingLadder { timer: u32 },
}

impl State {
    /// Stable label; two states with the same label are the same state for
    /// animation purposes.
    pub fn name(&self) -> &'static str {
        match self {
            State::Walking => "walking",
            State::IdlePause { .. } => "idle_pause",
            State::Hungry { .. } => "hungry",
            State::Eating { .. } => "eating",
            State::Running { .. } => "running",
            State::SpeedBoostRunning { .. } => "speed_boost_running",
            State::StopRunning { .. } => "stop_running",
            State::Crawl { .. } => "crawl",
            State::Roll { .. } => "roll",
            State::Jump(kind) => kind.sprite().name(),
            State::Falling => "falling",
            State::Leap => "leap",
            State::Landing { .. } => "landing",
            State::LandingImpact { .. } => "landing_impact",
            State::SwimmingDive { .. } => "swimming_dive",
            State::Swimming { .. } => "swimming",
            State::WallClimbing => "wall_climbing",
            State::WallJump => "wall_jump",
            State::ClimbingLadder { .. } => "climbing_ladder",
            State::DescendingLadder { .. } => "descending_ladder",
        }
    }

    /// Sheet used to animate and draw this state.
    ///
    /// Several states borrow another state's artwork: a paused character
    /// shows the first walking frame, a hungry one sprints, an eating one
    /// crouches.
    pub fn sprite(&self) -> SpriteKey {
        match self {
            State::Walking | State::IdlePause { .. } => SpriteKey::Walking,
            State::Hungry { .. } => SpriteKey::SpeedBoostRunning,
            State::Eating { .. } => SpriteKey::Crouch,
            State::Running { .. } => SpriteKey::Running,
            State::SpeedBoostRunning { .. } => SpriteKey::SpeedBoostRunning,
            State::StopRunning { .. } => SpriteKey::StopRunning,
            State::Crawl { .. } => SpriteKey::Crawl,
            State::Roll { .. } => SpriteKey::Roll,
            State::Jump(kind) => kind.sprite(),
            State::Falling => SpriteKey::Falling,
            State::Leap => SpriteKey::Leap,
            State::Landing { .. } => SpriteKey::Landing,
            State::LandingImpact { .. } => SpriteKey::LandingImpact,
            State::SwimmingDive { .. } => SpriteKey::SwimmingDive,
            State::Swimming { .. } => SpriteKey::Swimming,
            State::WallClimbing => SpriteKey::WallClimbing,
            State::WallJump => SpriteKey::WallJump,
            State::ClimbingLadder { .. } => SpriteKey::ClimbingLadder,
            State::DescendingLadder { .. } => SpriteKey::DescendingLadder,
        }
    }

    /// Whether the drawn frame is pinned to the first frame of the sheet.
    pub fn holds_first_frame(&self) -> bool {
        matches!(self, State::IdlePause { .. })
    }

    /// States that food cannot interrupt.
    pub fn ignores_food(&self) -> bool {
        matches!(
            self,
            State::Eating { .. } | State::Hungry { .. } | State::Falling
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn borrowed_artwork() {
        assert_eq!(State::IdlePause { timer: 3 }.sprite(), SpriteKey::Walking);
        assert_eq!(
            State::Hungry { target: FoodId(1) }.sprite(),
            SpriteKey::SpeedBoostRunning
        );
        assert_eq!(State::Eating { timer: 3 }.sprite(), SpriteKey::Crouch);
        assert!(State::IdlePause { timer: 1 }.holds_first_frame());
        assert!(!State::Walking.holds_first_frame());
    }

    #[test]
    fn timers_do_not_change_identity() {
        assert_eq!(
            State::Running { timer: 5 }.name(),
            State::Running { timer: 90 }.name()
        );
        assert_ne!(
            State::Jump(JumpKind::Side).name(),
            State::Jump(JumpKind::Double).name()
        );
    }

    #[test]
    fn only_double_jump_launches_high() {
        for kind in JumpKind::ALL {
            let expected = if kind == JumpKind::Double { -10.0 } else { -7.0 };
            assert_eq!(kind.launch_velocity(), expected);
        }
    }

    #[test]
    fn food_interrupt_rules() {
        assert!(State::Falling.ignores_food());
        assert!(State::Eating { timer: 1 }.ignores_food());
        assert!(!State::Walking.ignores_food());
        assert!(!State::Jump(JumpKind::Upward).ignores_food());
    }
}
