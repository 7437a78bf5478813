//! Read-only view of a session for presentation
//!
//! Renderers and HUDs get a copy, so nothing outside the simulation can
//! mutate agent or level state.

use serde::{Deserialize, Serialize};

use super::geometry::Aabb;
use super::state::{GamePhase, Session};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub tick: u64,
    pub phase: GamePhase,
    pub score: u64,
    pub lives: u32,
    pub level: u32,
    pub player: Aabb,
    pub adversaries: Vec<Aabb>,
    pub obstacles: Vec<Aabb>,
    /// Remaining items only
    pub collectibles: Vec<Aabb>,
}

impl Session {
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tick: self.time_ticks,
            phase: self.phase,
            score: self.score,
            lives: self.lives,
            level: self.level,
            player: self.player.bounds(),
            adversaries: self.stage.adversaries.iter().map(|a| a.bounds()).collect(),
            obstacles: self.stage.obstacles.iter().copied().collect(),
            collectibles: self.stage.collectibles.iter().map(|c| c.rect).collect(),
        }
    }
}
