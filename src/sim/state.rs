//! Session state and level transitions
//!
//! The session owns everything that changes during play. The current level's
//! obstacles, collectibles and adversaries live in a [`Stage`] that is
//! replaced wholesale on every level setup.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::agent::Agent;
use super::collision::Collectible;
use super::spatial::ObstacleSet;
use crate::config::GameConfig;
use crate::layout::{Layout, LayoutError, LayoutSource, MazeRotation};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Last item collected; only observable while the next level is set up
    LevelComplete,
    /// Out of lives. Ticking further is a no-op.
    GameOver,
}

/// Outcome events for audio and other fire-and-forget listeners
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameEvent {
    Collected,
    Hit,
    LevelComplete,
    GameOver,
}

impl GameEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameEvent::Collected => "collected",
            GameEvent::Hit => "hit",
            GameEvent::LevelComplete => "level-complete",
            GameEvent::GameOver => "game-over",
        }
    }
}

/// Contents of one level instance
#[derive(Debug, Clone)]
pub struct Stage {
    pub obstacles: ObstacleSet,
    /// Items not yet collected
    pub collectibles: Vec<Collectible>,
    pub adversaries: Vec<Agent>,
    pub player_spawn: Vec2,
    /// Item count at setup
    pub total_collectibles: usize,
}

impl Stage {
    /// Build a level from a layout
    pub fn from_layout(layout: Layout, config: &GameConfig) -> Self {
        let half = config.adversary_half();
        let total_collectibles = layout.collectibles.len();
        Self {
            obstacles: ObstacleSet::new(layout.obstacles, config.spatial_cell_size),
            collectibles: layout.collectibles.into_iter().map(Collectible::new).collect(),
            adversaries: layout
                .adversary_spawns
                .into_iter()
                .map(|spawn| Agent::new(spawn, half))
                .collect(),
            player_spawn: layout.player_spawn,
            total_collectibles,
        }
    }

    pub fn active_collectibles(&self) -> usize {
        self.collectibles.len()
    }
}

/// A running game
pub struct Session {
    pub config: GameConfig,
    /// Steering RNG, seeded from the config
    pub(crate) rng: Pcg32,
    pub score: u64,
    pub lives: u32,
    /// Current level (1-based)
    pub level: u32,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Agent,
    pub stage: Stage,
    /// Events raised by the most recent tick
    pub(crate) events: Vec<GameEvent>,
    /// Scratch space for obstacle queries
    pub(crate) scratch: Vec<usize>,
    layouts: Box<dyn LayoutSource>,
}

impl Session {
    /// Start a fresh session at level 1
    pub fn new(config: GameConfig, mut layouts: Box<dyn LayoutSource>) -> Self {
        let stage = Stage::from_layout(layouts.layout(1), &config);
        let player = Agent::new(stage.player_spawn, config.player_half());
        let session = Self {
            rng: Pcg32::seed_from_u64(config.seed),
            score: 0,
            lives: config.starting_lives,
            level: 1,
            phase: GamePhase::Playing,
            time_ticks: 0,
            player,
            stage,
            events: Vec::new(),
            scratch: Vec::new(),
            layouts,
            config,
        };
        log::info!(
            "Session started: seed={}, lives={}, {} items, {} adversaries",
            session.config.seed,
            session.lives,
            session.stage.total_collectibles,
            session.stage.adversaries.len()
        );
        session
    }

    /// Session over the config's levels (custom or built-in)
    pub fn from_config(config: GameConfig) -> Result<Self, LayoutError> {
        let rotation = MazeRotation::from_config(&config)?;
        Ok(Self::new(config, Box::new(rotation)))
    }

    /// Events raised by the most recent tick
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn active_collectibles(&self) -> usize {
        self.stage.active_collectibles()
    }

    fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Replace the level contents from the layout source and respawn the player
    pub fn setup(&mut self) {
        let layout = self.layouts.layout(self.level);
        self.stage = Stage::from_layout(layout, &self.config);
        self.player = Agent::new(self.stage.player_spawn, self.config.player_half());
        log::info!(
            "Level {} set up: {} obstacles, {} items, {} adversaries",
            self.level,
            self.stage.obstacles.len(),
            self.stage.total_collectibles,
            self.stage.adversaries.len()
        );
    }

    /// One item picked up
    pub fn on_collect(&mut self) {
        self.score += 1;
        self.emit(GameEvent::Collected);
        log::debug!("Collected item, score={}", self.score);
    }

    /// Player touched an adversary. Returns the resulting phase.
    pub fn on_hit(&mut self) -> GamePhase {
        let spawn = self.stage.player_spawn;
        self.player.place(spawn);
        self.lives = self.lives.saturating_sub(1);
        self.emit(GameEvent::Hit);
        log::debug!("Player hit, lives={}", self.lives);

        if self.lives == 0 {
            self.phase = GamePhase::GameOver;
            self.emit(GameEvent::GameOver);
            log::info!(
                "Game over at level {} with score {} after {} ticks",
                self.level,
                self.score,
                self.time_ticks
            );
        }
        self.phase
    }

    /// All items collected: advance and rebuild. Score and lives carry over.
    pub fn on_level_complete(&mut self) {
        self.phase = GamePhase::LevelComplete;
        self.level += 1;
        self.emit(GameEvent::LevelComplete);
        log::info!("Level complete, advancing to level {}", self.level);

        self.setup();
        self.phase = GamePhase::Playing;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Aabb;

    fn layout() -> Layout {
        Layout {
            obstacles: vec![Aabb::from_min_max(Vec2::new(300.0, 0.0), Vec2::new(320.0, 100.0))],
            collectibles: vec![
                Aabb::from_center(Vec2::new(100.0, 100.0), Vec2::splat(4.0)),
                Aabb::from_center(Vec2::new(150.0, 100.0), Vec2::splat(4.0)),
            ],
            player_spawn: Vec2::new(50.0, 290.0),
            adversary_spawns: vec![Vec2::new(720.0, 200.0), Vec2::new(720.0, 400.0)],
        }
    }

    fn session() -> Session {
        Session::new(GameConfig::default(), Box::new(layout()))
    }

    #[test]
    fn test_new_session() {
        let s = session();
        assert_eq!(s.score, 0);
        assert_eq!(s.lives, 3);
        assert_eq!(s.level, 1);
        assert_eq!(s.phase, GamePhase::Playing);
        assert_eq!(s.player.pos, Vec2::new(50.0, 290.0));
        assert_eq!(s.stage.adversaries.len(), 2);
        assert_eq!(s.active_collectibles(), 2);
        assert!(s.events().is_empty());
    }

    #[test]
    fn test_hit_respawns_and_costs_a_life() {
        let mut s = session();
        s.player.place(Vec2::new(400.0, 400.0));

        assert_eq!(s.on_hit(), GamePhase::Playing);
        assert_eq!(s.lives, 2);
        assert_eq!(s.player.pos, Vec2::new(50.0, 290.0));
        assert_eq!(s.events(), &[GameEvent::Hit]);
    }

    #[test]
    fn test_last_life_ends_game() {
        let mut s = session();
        s.lives = 1;
        assert_eq!(s.on_hit(), GamePhase::GameOver);
        assert_eq!(s.lives, 0);
        assert!(s.is_over());
        assert_eq!(s.events(), &[GameEvent::Hit, GameEvent::GameOver]);
    }

    #[test]
    fn test_level_complete_preserves_score_and_lives() {
        let mut s = session();
        s.score = 17;
        s.lives = 2;
        s.stage.collectibles.clear();
        s.stage.adversaries[0].pos = Vec2::new(1.0, 1.0);

        s.on_level_complete();
        assert_eq!(s.level, 2);
        assert_eq!(s.score, 17);
        assert_eq!(s.lives, 2);
        assert_eq!(s.phase, GamePhase::Playing);
        assert_eq!(s.active_collectibles(), 2);
        assert_eq!(s.stage.adversaries[0].pos, Vec2::new(720.0, 200.0));
        assert_eq!(s.events(), &[GameEvent::LevelComplete]);
    }

    #[test]
    fn test_event_names() {
        assert_eq!(GameEvent::LevelComplete.as_str(), "level-complete");
        assert_eq!(
            serde_json::to_string(&GameEvent::GameOver).unwrap(),
            "\"game-over\""
        );
    }

    #[test]
    fn test_from_config_uses_builtin_levels() {
        let s = Session::from_config(GameConfig::default()).unwrap();
        assert_eq!(s.stage.adversaries.len(), 4);
        assert!(s.active_collectibles() > 0);
        assert_eq!(s.active_collectibles(), s.stage.total_collectibles);
    }
}
