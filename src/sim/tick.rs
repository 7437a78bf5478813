//! Fixed simulation tick
//!
//! Advances a session by one step. The order of the steps matters: the
//! adversary hit check runs before wall resolution so a losing hit is never
//! masked by a same-tick bounce, and items are collected only after everyone
//! has moved.

use serde::{Deserialize, Serialize};

use super::agent::{Direction, resolve_intent, velocity_for};
use super::collision::{WallResponse, collect_overlapping, hits_any, resolve_walls, update_player};
use super::state::{GamePhase, Session};
use super::steering::steer;

/// Movement intents held during a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl TickInput {
    /// Input holding exactly one direction
    pub fn toward(direction: Direction) -> Self {
        let mut input = Self::default();
        match direction {
            Direction::Up => input.up = true,
            Direction::Down => input.down = true,
            Direction::Left => input.left = true,
            Direction::Right => input.right = true,
        }
        input
    }

    /// The direction that wins when several are held
    pub fn direction(&self) -> Option<Direction> {
        resolve_intent(self.up, self.down, self.left, self.right)
    }
}

/// Advance the session by one tick and return the resulting phase.
///
/// Events raised during the tick are available from [`Session::events`] until
/// the next call. Once the session is over this does nothing.
pub fn tick(session: &mut Session, input: &TickInput) -> GamePhase {
    session.events.clear();
    if session.phase == GamePhase::GameOver {
        return GamePhase::GameOver;
    }
    session.time_ticks += 1;

    // Player moves on last tick's velocity, then picks up the new intent
    let bounds = session.config.playfield.player_bounds();
    update_player(
        &mut session.player,
        &session.stage.obstacles,
        &bounds,
        &mut session.scratch,
    );
    session.player.vel = velocity_for(input.direction(), session.config.player_speed);

    let target = session.player.pos;
    let speed = session.config.adversary_speed;
    let one_in = session.config.reaim_one_in;
    for adversary in &mut session.stage.adversaries {
        steer(adversary, target, speed, one_in, &mut session.rng);
    }

    if hits_any(&session.player.bounds(), &session.stage.adversaries)
        && session.on_hit() == GamePhase::GameOver
    {
        return GamePhase::GameOver;
    }

    for (idx, adversary) in session.stage.adversaries.iter_mut().enumerate() {
        let hits = resolve_walls(
            adversary,
            &session.stage.obstacles,
            WallResponse::Bounce,
            &mut session.scratch,
        );
        if hits.any() {
            log::trace!("adversary {} bounced: {:?}, vel={:?}", idx, hits, adversary.vel);
        }
    }

    let collected = collect_overlapping(&session.player.bounds(), &mut session.stage.collectibles);
    for _ in 0..collected {
        session.on_collect();
    }

    if session.stage.collectibles.is_empty() {
        session.on_level_complete();
    }

    session.phase
}
