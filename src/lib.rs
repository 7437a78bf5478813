//! Maze Chase - a maze-chase arcade game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, steering, collisions, session state)
//! - `layout`: Level layouts and the ASCII maze format
//! - `config`: Data-driven tuning loaded from JSON
//!
//! Rendering, audio and input devices live outside this crate. They read
//! [`sim::Snapshot`]s, consume [`sim::GameEvent`]s and feed [`sim::TickInput`]s.

pub mod config;
pub mod layout;
pub mod sim;

pub use config::{ConfigError, GameConfig, Playfield};
pub use layout::{AsciiMaze, Layout, LayoutError, LayoutSource, MazeRotation};

/// Default tuning constants
pub mod consts {
    /// Playfield dimensions
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;
    /// HUD strip at the top the player may not enter
    pub const HUD_MARGIN: f32 = 30.0;

    /// Player displacement per tick
    pub const PLAYER_SPEED: f32 = 5.0;
    /// Adversary displacement per tick
    pub const ADVERSARY_SPEED: f32 = 1.0;
    /// Each adversary re-aims at the player with chance 1/REAIM_ONE_IN per tick
    pub const REAIM_ONE_IN: u32 = 50;

    pub const STARTING_LIVES: u32 = 3;

    /// Half edge of the player and adversary boxes
    pub const AGENT_HALF_SIZE: f32 = 10.0;

    /// Maze tile edge
    pub const TILE_SIZE: f32 = 40.0;
    /// Collectible edge
    pub const ITEM_SIZE: f32 = 8.0;

    /// Obstacle index cell edge
    pub const SPATIAL_CELL_SIZE: f32 = 64.0;

    /// Smallest accepted obstacle index cell edge
    pub const MIN_SPATIAL_CELL_SIZE: f32 = 1.0;
}
