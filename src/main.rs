//! Maze Chase headless runner
//!
//! Runs a session with a simple autopilot, logs what happens and prints the
//! final snapshot as JSON.
//!
//! Usage: `maze-chase [config.json] [ticks]`

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::error::Error;

    use glam::Vec2;
    use maze_chase::GameConfig;
    use maze_chase::sim::{Direction, GameEvent, GamePhase, Session, TickInput, tick};

    const DEFAULT_TICKS: u64 = 20_000;
    /// Ticks spent on the other axis after getting stuck
    const DETOUR_TICKS: u32 = 24;

    /// Heads for the nearest item, sidestepping when a wall stops it
    #[derive(Default)]
    struct Autopilot {
        last_pos: Option<Vec2>,
        detour: u32,
        detour_dir: Option<Direction>,
    }

    impl Autopilot {
        fn input(&mut self, session: &Session) -> TickInput {
            let pos = session.player.pos;
            let stuck = self.last_pos == Some(pos);
            self.last_pos = Some(pos);

            let Some(target) = session
                .stage
                .collectibles
                .iter()
                .map(|c| c.rect.center())
                .min_by(|a, b| a.distance_squared(pos).total_cmp(&b.distance_squared(pos)))
            else {
                return TickInput::default();
            };
            let delta = target - pos;
            let preferred = if delta.x.abs() >= delta.y.abs() {
                horizontal(delta.x)
            } else {
                vertical(delta.y)
            };

            if stuck && self.detour == 0 {
                // Try the other axis for a while
                let side = match preferred {
                    Direction::Left | Direction::Right => {
                        vertical(if session.time_ticks % 2 == 0 { delta.y } else { -delta.y })
                    }
                    Direction::Up | Direction::Down => {
                        horizontal(if session.time_ticks % 2 == 0 { delta.x } else { -delta.x })
                    }
                };
                self.detour = DETOUR_TICKS;
                self.detour_dir = Some(side);
            }

            if self.detour > 0 {
                self.detour -= 1;
                if let Some(dir) = self.detour_dir {
                    return TickInput::toward(dir);
                }
            }
            TickInput::toward(preferred)
        }
    }

    fn horizontal(dx: f32) -> Direction {
        if dx < 0.0 { Direction::Left } else { Direction::Right }
    }

    fn vertical(dy: f32) -> Direction {
        if dy < 0.0 { Direction::Down } else { Direction::Up }
    }

    pub fn run() -> Result<(), Box<dyn Error>> {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

        let mut args = std::env::args().skip(1);
        let config = match args.next() {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };
        let ticks = match args.next() {
            Some(n) => n.parse::<u64>()?,
            None => DEFAULT_TICKS,
        };
        log::info!("Maze Chase (headless) starting, up to {} ticks", ticks);

        let mut session = Session::from_config(config)?;
        let mut pilot = Autopilot::default();
        let (mut collected, mut hits, mut levels) = (0u64, 0u64, 0u64);

        for _ in 0..ticks {
            let input = pilot.input(&session);
            let phase = tick(&mut session, &input);
            for event in session.events() {
                log::debug!("tick {}: {}", session.time_ticks, event.as_str());
                match event {
                    GameEvent::Collected => collected += 1,
                    GameEvent::Hit => hits += 1,
                    GameEvent::LevelComplete => levels += 1,
                    GameEvent::GameOver => {}
                }
            }
            if phase == GamePhase::GameOver {
                break;
            }
        }

        log::info!(
            "Finished after {} ticks: {} collected, {} hits, {} levels cleared",
            session.time_ticks,
            collected,
            hits,
            levels
        );
        println!("{}", serde_json::to_string_pretty(&session.snapshot())?);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No headless runner on wasm; embedders drive `sim::tick` directly
}
