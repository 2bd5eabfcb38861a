use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};

use crate::components::sprite::SpriteKey;

/// Where each sprite sheet is fetched from.
///
/// Serialized as a flat JSON object keyed by sprite name:
/// `{ "walking": { "src": "/assets/sprites/Walking.png" }, ... }`.
/// Iteration follows `SpriteKey` order, which is also the loading order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpriteManifest {
    sprites: BTreeMap<SpriteKey, SpriteSource>,
}

/// Locator for a single sheet image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteSource {
    /// URL or path of the PNG strip.
    pub src: String,
}

const DEFAULT_BASE: &str = "/assets/sprites/";

fn default_file(key: SpriteKey) -> &'static str {
    match key {
        SpriteKey::Walking => "Walking.png",
        SpriteKey::Running => "Running.png",
        SpriteKey::StopRunning => "Stop_Running.png",
        SpriteKey::SpeedBoostRunning => "Speed_Boost_Running.png",
        SpriteKey::Crawl => "Crawl.png",
        SpriteKey::Crouch => "Crouch.png",
        SpriteKey::Jumping => "Jumping.png",
        SpriteKey::UpwardJump => "Upward Jump.png",
        SpriteKey::DoubleJump => "Double_Jump.png",
        SpriteKey::GlidingJump => "Gliding_Jump.png",
        SpriteKey::SideJump => "Side_Jump.png",
        SpriteKey::ObstacleJump => "Obstacle Jump.png",
        SpriteKey::PlatformJump => "Platform Jump.png",
        SpriteKey::WallJump => "Wall Jump.png",
        // Matches the shipped asset's file name
        SpriteKey::JumpWithStrike => "Jump witn Strike.png",
        SpriteKey::Falling => "Falling.png",
        SpriteKey::Landing => "Landing.png",
        SpriteKey::LandingImpact => "Landing with Impact.png",
        SpriteKey::Leap => "Leap.png",
        SpriteKey::Roll => "Roll.png",
        SpriteKey::Swimming => "Swimming.png",
        SpriteKey::SwimmingDive => "Swimming_Dive.png",
        SpriteKey::WallClimbing => "Wall_Climbing.png",
        SpriteKey::ClimbingLadder => "Climbing_Ladder.png",
        SpriteKey::DescendingLadder => "Descending_Ladder.png",
    }
}

impl SpriteManifest {
    /// An empty manifest.
    pub fn new() -> Self {
        Self {
            sprites: BTreeMap::new(),
        }
    }

    /// Register (or replace) the source for a key.
    pub fn insert(&mut self, key: SpriteKey, src: impl Into<String>) {
        self.sprites.insert(key, SpriteSource { src: src.into() });
    }

    pub fn get(&self, key: SpriteKey) -> Option<&str> {
        self.sprites.get(&key).map(|s| s.src.as_str())
    }

    /// All entries in loading order.
    pub fn entries(&self) -> impl Iterator<Item = (SpriteKey, &str)> {
        self.sprites.iter().map(|(k, s)| (*k, s.src.as_str()))
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }
}

impl Default for SpriteManifest {
    /// Every key mapped to its sheet under `/assets/sprites/`.
    fn default() -> Self {
        let mut manifest = Self::new();
        for key in SpriteKey::ALL {
            manifest.insert(key, format!("{}{}", DEFAULT_BASE, default_file(key)));
        }
        manifest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_covers_every_key() {
        let manifest = SpriteManifest::default();
        assert_eq!(manifest.len(), SpriteKey::COUNT);
        assert_eq!(manifest.get(SpriteKey::Walking), Some("/assets/sprites/Walking.png"));
        assert_eq!(
            manifest.get(SpriteKey::LandingImpact),
            Some("/assets/sprites/Landing with Impact.png")
        );
    }

    #[test]
    fn entries_follow_loading_order() {
        let manifest = SpriteManifest::default();
        let keys: Vec<SpriteKey> = manifest.entries().map(|(k, _)| k).collect();
        assert_eq!(keys, SpriteKey::ALL.to_vec());
    }

    #[test]
    fn serializes_as_flat_object() {
        let mut manifest = SpriteManifest::new();
        manifest.insert(SpriteKey::Roll, "r.png");
        let json = serde_json::to_string(&manifest).unwrap();
        assert_eq!(json, r#"{"roll":{"src":"r.png"}}"#);
    }
}
