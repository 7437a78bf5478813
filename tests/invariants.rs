//! Session-wide invariants checked over random seeds and input sequences

use glam::Vec2;
use maze_chase::sim::{Aabb, GameEvent, GamePhase, Session, TickInput, tick};
use maze_chase::{AsciiMaze, GameConfig};
use proptest::prelude::*;

/// Small maze so random walks collect items, get hit and clear levels
fn small_maze() -> AsciiMaze {
    AsciiMaze::new(&[
        "########",
        "#P....G#",
        "#.##.#.#",
        "#.....G#",
        "########",
    ])
}

fn input_from_bits(bits: u8) -> TickInput {
    TickInput {
        up: bits & 1 != 0,
        down: bits & 2 != 0,
        left: bits & 4 != 0,
        right: bits & 8 != 0,
    }
}

/// Overlap that ignores float noise at shared edges
fn overlaps_beyond_noise(a: &Aabb, b: &Aabb) -> bool {
    let shrink = Vec2::splat(1e-3);
    Aabb::from_min_max(a.min + shrink, a.max - shrink).overlaps(b)
}

fn session(seed: u64, reaim_one_in: u32, small: bool) -> Session {
    let config = GameConfig {
        seed,
        reaim_one_in,
        starting_lives: 5,
        levels: if small { vec![small_maze()] } else { Vec::new() },
        ..Default::default()
    };
    Session::from_config(config).expect("built-in and test mazes are valid")
}

proptest! {
    #[test]
    fn player_stays_in_bounds(
        seed in any::<u64>(),
        inputs in prop::collection::vec(0u8..16, 1..400),
    ) {
        let mut s = session(seed, 50, false);
        let bounds = s.config.playfield.player_bounds();
        for bits in inputs {
            tick(&mut s, &input_from_bits(bits));
            let p = s.player.bounds();
            prop_assert!(p.left() >= bounds.left() - 1e-3);
            prop_assert!(p.right() <= bounds.right() + 1e-3);
            prop_assert!(p.bottom() >= bounds.bottom() - 1e-3);
            prop_assert!(p.top() <= bounds.top() + 1e-3);
        }
    }

    #[test]
    fn adversaries_never_rest_inside_walls(
        seed in any::<u64>(),
        reaim in 1u32..10,
        ticks in 1usize..600,
    ) {
        let mut s = session(seed, reaim, false);
        for _ in 0..ticks {
            if tick(&mut s, &TickInput::default()) == GamePhase::GameOver {
                break;
            }
            for adversary in &s.stage.adversaries {
                let rect = adversary.bounds();
                prop_assert!(s.stage.obstacles.iter().all(|o| !overlaps_beyond_noise(&rect, o)));
            }
        }
    }

    #[test]
    fn score_lives_and_levels_stay_consistent(
        seed in any::<u64>(),
        reaim in 1u32..4,
        inputs in prop::collection::vec(0u8..16, 1..600),
    ) {
        let mut s = session(seed, reaim, true);
        let mut cleared_items = 0u64;
        let mut lives = s.lives;
        let mut level = s.level;
        let mut collected_events = 0u64;

        for bits in inputs {
            let active_before = s.active_collectibles() as u64;
            let total_before = s.stage.total_collectibles as u64;
            let phase = tick(&mut s, &input_from_bits(bits));
            let events = s.events().to_vec();

            let collected = events.iter().filter(|e| **e == GameEvent::Collected).count() as u64;
            let completes = events.iter().filter(|e| **e == GameEvent::LevelComplete).count();
            let hits = events.iter().filter(|e| **e == GameEvent::Hit).count() as u32;
            collected_events += collected;
            // Each remaining item can be collected at most once
            prop_assert!(collected <= active_before);

            // At most one life per tick even with several adversaries on the player;
            // a level change does not touch lives
            prop_assert!(hits <= 1);
            prop_assert_eq!(s.lives, lives - hits);
            if s.level != level {
                prop_assert_eq!(s.level, level + 1);
                prop_assert_eq!(completes, 1);
                prop_assert_eq!(s.active_collectibles(), s.stage.total_collectibles);
                cleared_items += total_before;
            } else {
                prop_assert_eq!(completes, 0);
            }

            // Zero lives always and only means game over
            prop_assert_eq!(s.lives == 0, phase == GamePhase::GameOver);
            prop_assert_eq!(phase == GamePhase::GameOver, events.contains(&GameEvent::GameOver));

            let in_level = (s.stage.total_collectibles - s.active_collectibles()) as u64;
            prop_assert_eq!(s.score, cleared_items + in_level);
            prop_assert_eq!(s.score, collected_events);

            lives = s.lives;
            level = s.level;
            if phase == GamePhase::GameOver {
                break;
            }
        }
    }
}
