//! Game tuning and playfield configuration
//!
//! Loaded from JSON; every field has a default so partial files work.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::layout::{AsciiMaze, LayoutError};
use crate::sim::Aabb;

/// Errors from loading or validating a [`GameConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
    #[error("invalid level {level}: {source}")]
    Level { level: usize, source: LayoutError },
}

/// Playfield dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
    /// Strip at the top reserved for the HUD
    pub hud_margin: f32,
}

impl Default for Playfield {
    fn default() -> Self {
        Self {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
            hud_margin: HUD_MARGIN,
        }
    }
}

impl Playfield {
    /// Region the player box must stay inside
    pub fn player_bounds(&self) -> Aabb {
        Aabb::from_min_max(
            Vec2::ZERO,
            Vec2::new(self.width - 1.0, self.height - self.hud_margin),
        )
    }
}

/// All tunables of a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub playfield: Playfield,
    /// Player displacement per tick while a direction is held
    pub player_speed: f32,
    /// Adversary displacement per tick
    pub adversary_speed: f32,
    /// Re-aim chance per adversary per tick is 1 in this (0 disables)
    pub reaim_one_in: u32,
    pub starting_lives: u32,
    pub player_half_extents: [f32; 2],
    pub adversary_half_extents: [f32; 2],
    /// Grid cell size of the obstacle index
    pub spatial_cell_size: f32,
    /// Run seed for the steering RNG
    pub seed: u64,
    /// Custom mazes; empty means the built-in rotation
    pub levels: Vec<AsciiMaze>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            playfield: Playfield::default(),
            player_speed: PLAYER_SPEED,
            adversary_speed: ADVERSARY_SPEED,
            reaim_one_in: REAIM_ONE_IN,
            starting_lives: STARTING_LIVES,
            player_half_extents: [AGENT_HALF_SIZE, AGENT_HALF_SIZE],
            adversary_half_extents: [AGENT_HALF_SIZE, AGENT_HALF_SIZE],
            spatial_cell_size: SPATIAL_CELL_SIZE,
            seed: 0,
            levels: Vec::new(),
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn player_half(&self) -> Vec2 {
        Vec2::from_array(self.player_half_extents)
    }

    pub fn adversary_half(&self) -> Vec2 {
        Vec2::from_array(self.adversary_half_extents)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let pf = &self.playfield;
        if !(pf.width > 0.0 && pf.height > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "playfield must be positive, got {}x{}",
                pf.width, pf.height
            )));
        }
        if !(pf.hud_margin >= 0.0 && pf.hud_margin < pf.height) {
            return Err(ConfigError::Invalid(format!(
                "hud_margin {} must be in [0, height)",
                pf.hud_margin
            )));
        }
        if !(self.player_speed >= 0.0 && self.adversary_speed >= 0.0) {
            return Err(ConfigError::Invalid("speeds must not be negative".into()));
        }
        if self.starting_lives == 0 {
            return Err(ConfigError::Invalid("starting_lives must be at least 1".into()));
        }
        let mut halves = self.player_half_extents.iter().chain(&self.adversary_half_extents);
        if halves.any(|&h| !(h > 0.0)) {
            return Err(ConfigError::Invalid("half extents must be positive".into()));
        }
        let bounds = pf.player_bounds();
        let player = self.player_half() * 2.0;
        if player.x > bounds.max.x || player.y > bounds.max.y {
            return Err(ConfigError::Invalid("player does not fit the playfield".into()));
        }
        // Each obstacle is registered in every cell it covers
        let cell = self.spatial_cell_size;
        if !(cell.is_finite() && cell >= MIN_SPATIAL_CELL_SIZE) {
            return Err(ConfigError::Invalid(format!(
                "spatial_cell_size {} must be finite and at least {}",
                cell, MIN_SPATIAL_CELL_SIZE
            )));
        }
        for (idx, maze) in self.levels.iter().enumerate() {
            maze.parse(pf).map_err(|source| ConfigError::Level {
                level: idx + 1,
                source,
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_arcade_constants() {
        let config = GameConfig::default();
        assert_eq!(config.playfield.width, 800.0);
        assert_eq!(config.playfield.height, 600.0);
        assert_eq!(config.player_speed, 5.0);
        assert_eq!(config.adversary_speed, 1.0);
        assert_eq!(config.reaim_one_in, 50);
        assert_eq!(config.starting_lives, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = GameConfig::from_json(r#"{ "seed": 7, "playfield": { "hud_margin": 40 } }"#)
            .unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.playfield.hud_margin, 40.0);
        assert_eq!(config.playfield.width, 800.0);
        assert_eq!(config.reaim_one_in, 50);
    }

    #[test]
    fn test_json_roundtrip() {
        let config = GameConfig {
            seed: 99,
            reaim_one_in: 10,
            ..Default::default()
        };
        let json = config.to_json().unwrap();
        assert_eq!(GameConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            GameConfig::from_json(r#"{ "starting_lives": 0 }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            GameConfig::from_json(r#"{ "adversary_speed": -1.0 }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            GameConfig::from_json(r#"{ "spatial_cell_size": 0.0 }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            GameConfig::from_json(r#"{ "player_half_extents": [0.0, 5.0] }"#),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_tiny_spatial_cells_rejected() {
        for json in [
            r#"{ "spatial_cell_size": 0.001 }"#,
            r#"{ "spatial_cell_size": 0.5 }"#,
            r#"{ "spatial_cell_size": -64.0 }"#,
        ] {
            assert!(matches!(GameConfig::from_json(json), Err(ConfigError::Invalid(_))));
        }
        let config = GameConfig {
            spatial_cell_size: f32::INFINITY,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
        assert!(GameConfig::from_json(r#"{ "spatial_cell_size": 1.0 }"#).is_ok());
    }

    #[test]
    fn test_bad_level_rejected_on_load() {
        let json = r######"{ "levels": [
            { "rows": ["#####", "#P.G#", "#####"] },
            { "rows": ["#####", "#P.G#", "#####"], "tile": -40.0 }
        ] }"######;
        assert!(matches!(
            GameConfig::from_json(json),
            Err(ConfigError::Level {
                level: 2,
                source: LayoutError::BadTileSize { .. }
            })
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(GameConfig::from_json("{ nope"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_player_bounds_reserve_hud() {
        let bounds = Playfield::default().player_bounds();
        assert_eq!(bounds.left(), 0.0);
        assert_eq!(bounds.bottom(), 0.0);
        assert_eq!(bounds.right(), 799.0);
        assert_eq!(bounds.top(), 570.0);
    }
}
