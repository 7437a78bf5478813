//! Collision detection and response for boxes
//!
//! Agents move one axis at a time against the static obstacles. After each
//! axis the agent is snapped flush with whatever it ran into, so the box never
//! stays inside a wall and never tunnels diagonally through a corner.

use glam::Vec2;

use super::agent::Agent;
use super::geometry::Aabb;
use super::spatial::ObstacleSet;

/// Movement axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// What happens to velocity after a wall hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallResponse {
    /// Invert the velocity component (adversaries)
    Bounce,
    /// Leave velocity alone (player)
    Block,
}

/// Result of resolving one agent for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AxisHits {
    pub x: bool,
    pub y: bool,
}

impl AxisHits {
    pub fn any(&self) -> bool {
        self.x || self.y
    }
}

/// Move `agent` along one axis by its velocity and snap against obstacles.
///
/// Returns true if any obstacle was hit. `buf` is scratch space for queries.
pub fn move_axis(
    agent: &mut Agent,
    axis: Axis,
    obstacles: &ObstacleSet,
    response: WallResponse,
    buf: &mut Vec<usize>,
) -> bool {
    let step = match axis {
        Axis::X => Vec2::new(agent.vel.x, 0.0),
        Axis::Y => Vec2::new(0.0, agent.vel.y),
    };
    agent.pos += step;

    obstacles.query_into(&agent.bounds(), buf);
    if buf.is_empty() {
        return false;
    }

    let half = agent.half_extents;
    match axis {
        Axis::X => {
            if agent.vel.x > 0.0 {
                let face = nearest(buf, obstacles, |o| o.left(), f32::min);
                agent.pos.x = face - half.x;
            } else if agent.vel.x < 0.0 {
                let face = nearest(buf, obstacles, |o| o.right(), f32::max);
                agent.pos.x = face + half.x;
            }
            if response == WallResponse::Bounce {
                agent.vel.x = -agent.vel.x;
            }
        }
        Axis::Y => {
            if agent.vel.y > 0.0 {
                let face = nearest(buf, obstacles, |o| o.bottom(), f32::min);
                agent.pos.y = face - half.y;
            } else if agent.vel.y < 0.0 {
                let face = nearest(buf, obstacles, |o| o.top(), f32::max);
                agent.pos.y = face + half.y;
            }
            if response == WallResponse::Bounce {
                agent.vel.y = -agent.vel.y;
            }
        }
    }
    true
}

/// Face of the hit obstacles that clears all of them
fn nearest(
    hits: &[usize],
    obstacles: &ObstacleSet,
    face: impl Fn(&Aabb) -> f32,
    pick: fn(f32, f32) -> f32,
) -> f32 {
    hits.iter()
        .filter_map(|&idx| obstacles.get(idx))
        .map(face)
        .reduce(pick)
        .unwrap_or(0.0)
}

/// Move horizontally then vertically, resolving each axis on its own
pub fn resolve_walls(
    agent: &mut Agent,
    obstacles: &ObstacleSet,
    response: WallResponse,
    buf: &mut Vec<usize>,
) -> AxisHits {
    let x = move_axis(agent, Axis::X, obstacles, response, buf);
    let y = move_axis(agent, Axis::Y, obstacles, response, buf);
    AxisHits { x, y }
}

/// Player movement: walls block it, then the playfield clamps it
pub fn update_player(
    player: &mut Agent,
    obstacles: &ObstacleSet,
    bounds: &Aabb,
    buf: &mut Vec<usize>,
) {
    resolve_walls(player, obstacles, WallResponse::Block, buf);
    player.clamp_to(bounds);
}

/// Whether `player` overlaps any adversary
pub fn hits_any(player: &Aabb, adversaries: &[Agent]) -> bool {
    adversaries.iter().any(|a| a.bounds().overlaps(player))
}

/// An item the player can pick up
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collectible {
    pub rect: Aabb,
    pub collected: bool,
}

impl Collectible {
    pub fn new(rect: Aabb) -> Self {
        Self {
            rect,
            collected: false,
        }
    }
}

/// Mark every uncollected item under `player`, then drop the marked ones.
///
/// Returns how many were collected. Marking happens for the whole scan before
/// anything is removed, and already-collected items are skipped, so an item
/// is never counted twice.
pub fn collect_overlapping(player: &Aabb, items: &mut Vec<Collectible>) -> usize {
    let mut count = 0;
    for item in items.iter_mut() {
        if !item.collected && item.rect.overlaps(player) {
            item.collected = true;
            count += 1;
        }
    }
    if count > 0 {
        items.retain(|item| !item.collected);
    }
    count
}
