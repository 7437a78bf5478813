//! Adversary heading selection
//!
//! Adversaries keep their heading and only occasionally re-aim at the player.
//! Walls deflect them between re-aims, so they drift toward the player
//! without ever planning a path.

use glam::Vec2;
use rand::Rng;

use super::agent::Agent;

/// Whether this tick re-aims. `one_in == 0` never re-aims, `1` always does.
pub fn should_reaim<R: Rng>(rng: &mut R, one_in: u32) -> bool {
    match one_in {
        0 => false,
        1 => true,
        n => rng.random_range(0..n) == 0,
    }
}

/// Velocity of magnitude `speed` pointing from `from` to `to`.
///
/// Coincident points give angle 0 (east).
pub fn aim_velocity(from: Vec2, to: Vec2, speed: f32) -> Vec2 {
    let delta = to - from;
    let angle = delta.y.atan2(delta.x);
    Vec2::new(angle.cos() * speed, angle.sin() * speed)
}

/// Steer one adversary. Returns true when it re-aimed.
pub fn steer<R: Rng>(
    adversary: &mut Agent,
    target: Vec2,
    speed: f32,
    reaim_one_in: u32,
    rng: &mut R,
) -> bool {
    if !should_reaim(rng, reaim_one_in) {
        return false;
    }
    adversary.vel = aim_velocity(adversary.pos, target, speed);
    log::trace!(
        "adversary at ({:.1}, {:.1}) re-aimed, vel=({:.2}, {:.2})",
        adversary.pos.x,
        adversary.pos.y,
        adversary.vel.x,
        adversary.vel.y
    );
    true
}
