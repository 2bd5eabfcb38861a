use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::assets::manifest::SpriteManifest;

/// Errors raised while reading host-supplied configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed configuration: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid value for `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Tunables for a stage. Every field has a default, so hosts only send what
/// they want to change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageConfig {
    /// Characters on the floor once everything is loaded (default: 20).
    pub population: usize,
    /// RNG seed. `None` lets the host pick one.
    pub seed: Option<u64>,
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Ticks a food item lives (default: 600).
    pub food_lifetime: u32,
    /// Tile width as a fraction of the larger surface dimension.
    pub tile_scale: f32,
    pub grid_half_count: f32,
    /// Surfaces narrower than this use the narrow sprite scale.
    pub narrow_width: f32,
    pub narrow_sprite_scale: f32,
    pub wide_sprite_scale: f32,
    /// Frames keyed per batch while slicing a sheet (default: 2).
    pub frames_per_batch: usize,
    /// Sheets to load, in key order. Replaces the built-in manifest
    /// wholesale when present.
    pub sprites: SpriteManifest,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            population: 20,
            seed: None,
            fixed_dt: 1.0 / 60.0,
            food_lifetime: 600,
            tile_scale: 0.018,
            grid_half_count: 14.0,
            narrow_width: 600.0,
            narrow_sprite_scale: 0.15,
            wide_sprite_scale: 0.26,
            frames_per_batch: 2,
            sprites: SpriteManifest::default(),
        }
    }
}

impl StageConfig {
    /// Parse a (possibly partial) JSON object and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_population(mut self, population: usize) -> Self {
        self.population = population;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.fixed_dt > 0.0 && self.fixed_dt.is_finite()) {
            return Err(ConfigError::Invalid {
                field: "fixed_dt",
                reason: "must be a positive number of seconds",
            });
        }
        if !(self.tile_scale > 0.0 && self.tile_scale.is_finite()) {
            return Err(ConfigError::Invalid {
                field: "tile_scale",
                reason: "must be positive",
            });
        }
        if self.frames_per_batch == 0 {
            return Err(ConfigError::Invalid {
                field: "frames_per_batch",
                reason: "must be at least 1",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = StageConfig::from_json(r#"{ "population": 5, "seed": 42 }"#).unwrap();
        assert_eq!(config.population, 5);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.food_lifetime, 600);
        assert_eq!(config.frames_per_batch, 2);
        assert!((config.fixed_dt - 1.0 / 60.0).abs() < 1e-9);
    }

    #[test]
    fn empty_object_is_default() {
        assert_eq!(StageConfig::from_json("{}").unwrap(), StageConfig::default());
    }

    #[test]
    fn malformed_json_is_reported() {
        let err = StageConfig::from_json("{ population: ").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
        let err = StageConfig::from_json(r#"{ "population": "many" }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn rejects_nonsense_values() {
        let err = StageConfig::from_json(r#"{ "fixed_dt": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "fixed_dt", .. }));
        let err = StageConfig::from_json(r#"{ "frames_per_batch": 0 }"#).unwrap_err();
        assert!(err.to_string().contains("frames_per_batch"));
    }

    #[test]
    fn sprites_replace_the_default_manifest() {
        use crate::components::sprite::SpriteKey;

        let config = StageConfig::from_json(
            r#"{
                "sprites": {
                    "walking": { "src": "w.png" },
                    "crouch": { "src": "c.png" }
                }
            }"#,
        )
        .unwrap();
        assert_eq!(config.sprites.len(), 2);
        assert_eq!(config.sprites.get(SpriteKey::Crouch), Some("c.png"));
        assert_eq!(config.sprites.get(SpriteKey::Roll), None);
        assert_eq!(config.population, 20);
    }

    #[test]
    fn unknown_sprite_key_is_rejected() {
        let err = StageConfig::from_json(r#"{ "sprites": { "moonwalk": { "src": "m.png" } } }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn builders() {
        let config = StageConfig::default().with_seed(7).with_population(3);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.population, 3);
    }
}
