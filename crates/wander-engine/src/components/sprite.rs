use serde::{Deserialize, Serialize};

/// Identifies one sprite sheet in the asset set.
///
/// The set is closed: every animation the crowd can show maps to one of these.
/// Serialized as the snake_case name used in the asset manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpriteKey {
    Walking,
    Running,
    StopRunning,
    SpeedBoostRunning,
    Crawl,
    Crouch,
    Jumping,
    UpwardJump,
    DoubleJump,
    GlidingJump,
    SideJump,
    ObstacleJump,
    PlatformJump,
    WallJump,
    JumpWithStrike,
    Falling,
    Landing,
    LandingImpact,
    Leap,
    Roll,
    Swimming,
    SwimmingDive,
    WallClimbing,
    ClimbingLadder,
    DescendingLadder,
}

impl SpriteKey {
    /// Total number of sprite keys.
    pub const COUNT: usize = 25;

    /// All keys, in asset loading order.
    pub const ALL: [SpriteKey; Self::COUNT] = [
        SpriteKey::Walking,
        SpriteKey::Running,
        SpriteKey::StopRunning,
        SpriteKey::SpeedBoostRunning,
        SpriteKey::Crawl,
        SpriteKey::Crouch,
        SpriteKey::Jumping,
        SpriteKey::UpwardJump,
        SpriteKey::DoubleJump,
        SpriteKey::GlidingJump,
        SpriteKey::SideJump,
        SpriteKey::ObstacleJump,
        SpriteKey::PlatformJump,
        SpriteKey::WallJump,
        SpriteKey::JumpWithStrike,
        SpriteKey::Falling,
        SpriteKey::Landing,
        SpriteKey::LandingImpact,
        SpriteKey::Leap,
        SpriteKey::Roll,
        SpriteKey::Swimming,
        SpriteKey::SwimmingDive,
        SpriteKey::WallClimbing,
        SpriteKey::ClimbingLadder,
        SpriteKey::DescendingLadder,
    ];

    /// Manifest name of this key.
    pub fn name(self) -> &'static str {
        match self {
            SpriteKey::Walking => "walking",
            SpriteKey::Running => "running",
            SpriteKey::StopRunning => "stop_running",
            SpriteKey::SpeedBoostRunning => "speed_boost_running",
            SpriteKey::Crawl => "crawl",
            SpriteKey::Crouch => "crouch",
            SpriteKey::Jumping => "jumping",
            SpriteKey::UpwardJump => "upward_jump",
            SpriteKey::DoubleJump => "double_jump",
            SpriteKey::GlidingJump => "gliding_jump",
            SpriteKey::SideJump => "side_jump",
            SpriteKey::ObstacleJump => "obstacle_jump",
            SpriteKey::PlatformJump => "platform_jump",
            SpriteKey::WallJump => "wall_jump",
            SpriteKey::JumpWithStrike => "jump_with_strike",
            SpriteKey::Falling => "falling",
            SpriteKey::Landing => "landing",
            SpriteKey::LandingImpact => "landing_impact",
            SpriteKey::Leap => "leap",
            SpriteKey::Roll => "roll",
            SpriteKey::Swimming => "swimming",
            SpriteKey::SwimmingDive => "swimming_dive",
            SpriteKey::WallClimbing => "wall_climbing",
            SpriteKey::ClimbingLadder => "climbing_ladder",
            SpriteKey::DescendingLadder => "descending_ladder",
        }
    }
}

/// Dimensions of a loaded sprite sheet: a horizontal strip of equal frames.
///
/// The pixel data lives with whichever backend loaded it; the engine only
/// needs the metrics to step animations and size draw calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetInfo {
    pub frame_count: usize,
    pub frame_width: u32,
    pub frame_height: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_match_manifest_keys() {
        for key in SpriteKey::ALL {
            let json = serde_json::to_string(&key).unwrap();
            assert_eq!(json, format!("\"{}\"", key.name()));
        }
        assert!(serde_json::from_str::<SpriteKey>("\"idle_pause\"").is_err());
    }

    #[test]
    fn all_keys_are_distinct() {
        let mut keys = SpriteKey::ALL.to_vec();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), SpriteKey::COUNT);
    }

    #[test]
    fn serde_uses_manifest_names() {
        let json = serde_json::to_string(&SpriteKey::JumpWithStrike).unwrap();
        assert_eq!(json, "\"jump_with_strike\"");
        let key: SpriteKey = serde_json::from_str("\"landing_impact\"").unwrap();
        assert_eq!(key, SpriteKey::LandingImpact);
    }
}
