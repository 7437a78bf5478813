//! Moving entities and movement intents
//!
//! Player and adversaries share one record. Which movement policy applies to
//! an agent is decided by the tick, not by the agent.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Aabb, clamp_to_bounds};

/// A moving entity (player or adversary)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    /// Centre of the bounding box
    pub pos: Vec2,
    /// Displacement per tick
    pub vel: Vec2,
    /// Half width / half height of the bounding box
    pub half_extents: Vec2,
}

impl Agent {
    /// Create a stationary agent at `pos`
    pub fn new(pos: Vec2, half_extents: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            half_extents,
        }
    }

    /// Current bounding box
    #[inline]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, self.half_extents)
    }

    /// Advance by one tick of velocity with nothing in the way
    pub fn update_free(&mut self) {
        self.pos += self.vel;
    }

    /// Advance by one tick of velocity, then clamp into `bounds`
    pub fn update_clamped(&mut self, bounds: &Aabb) {
        self.update_free();
        self.clamp_to(bounds);
    }

    /// Move so the box lies inside `bounds`
    pub fn clamp_to(&mut self, bounds: &Aabb) {
        self.pos = clamp_to_bounds(self.pos, self.half_extents, bounds);
    }

    /// Teleport to `pos`, keeping velocity
    pub fn place(&mut self, pos: Vec2) {
        self.pos = pos;
    }
}

/// A single movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit vector (y grows upward)
    pub fn unit(self) -> Vec2 {
        match self {
            Direction::Up => Vec2::Y,
            Direction::Down => Vec2::NEG_Y,
            Direction::Left => Vec2::NEG_X,
            Direction::Right => Vec2::X,
        }
    }
}

/// Pick the one honoured direction from the held intents.
///
/// An intent only counts when its opposite is not also held; among the rest
/// the priority is up, down, left, right.
pub fn resolve_intent(up: bool, down: bool, left: bool, right: bool) -> Option<Direction> {
    if up && !down {
        Some(Direction::Up)
    } else if down && !up {
        Some(Direction::Down)
    } else if left && !right {
        Some(Direction::Left)
    } else if right && !left {
        Some(Direction::Right)
    } else {
        None
    }
}

/// Player velocity for a resolved intent
pub fn velocity_for(direction: Option<Direction>, speed: f32) -> Vec2 {
    direction.map_or(Vec2::ZERO, |d| d.unit() * speed)
}
