//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed tick only, velocities are per tick
//! - Seeded RNG only
//! - Stable iteration order (layout order)
//! - No rendering, audio or platform dependencies

pub mod agent;
pub mod collision;
pub mod geometry;
pub mod snapshot;
pub mod spatial;
pub mod state;
pub mod steering;
pub mod tick;

pub use agent::{Agent, Direction, resolve_intent, velocity_for};
pub use collision::{
    AxisHits, Collectible, WallResponse, collect_overlapping, hits_any, resolve_walls,
    update_player,
};
pub use geometry::{Aabb, clamp_to_bounds};
pub use snapshot::Snapshot;
pub use spatial::ObstacleSet;
pub use state::{GameEvent, GamePhase, Session, Stage};
pub use steering::{aim_velocity, should_reaim, steer};
pub use tick::{TickInput, tick};
