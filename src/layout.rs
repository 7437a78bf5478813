//! Level layouts
//!
//! The session asks a [`LayoutSource`] for a fresh [`Layout`] on every level
//! setup. Layouts are usually authored as ASCII mazes:
//!
//! - `#` wall tile
//! - `.` collectible in the middle of the tile
//! - `P` player spawn (exactly one)
//! - `G` adversary spawn
//! - space or `-` empty floor
//!
//! Row 0 is the top of the maze. The bottom-left corner of the grid sits on
//! the playfield origin.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{GameConfig, Playfield};
use crate::consts::{ITEM_SIZE, TILE_SIZE};
use crate::sim::Aabb;

/// Errors from turning an ASCII maze into a [`Layout`]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("maze has no rows")]
    Empty,
    #[error("no levels to rotate through")]
    NoLevels,
    #[error("tile {tile} and item size {item_size} must be positive and finite")]
    BadTileSize { tile: f32, item_size: f32 },
    #[error("row {row} is {found} tiles wide, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown tile {ch:?} at row {row}, column {col}")]
    UnknownTile { ch: char, row: usize, col: usize },
    #[error("maze has no player spawn")]
    NoPlayerSpawn,
    #[error("maze has more than one player spawn")]
    MultiplePlayerSpawns,
    #[error("maze has no collectibles")]
    NoCollectibles,
    #[error("maze is {width}x{height} px, playfield only allows {max_width}x{max_height}")]
    TooLarge {
        width: f32,
        height: f32,
        max_width: f32,
        max_height: f32,
    },
}

/// Everything needed to set up one level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub obstacles: Vec<Aabb>,
    pub collectibles: Vec<Aabb>,
    pub player_spawn: Vec2,
    pub adversary_spawns: Vec<Vec2>,
}

/// Supplies the layout for each level (1-based)
pub trait LayoutSource {
    fn layout(&mut self, level: u32) -> Layout;
}

/// A fixed layout reused for every level
impl LayoutSource for Layout {
    fn layout(&mut self, _level: u32) -> Layout {
        self.clone()
    }
}

/// A maze authored as text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AsciiMaze {
    pub rows: Vec<String>,
    /// Tile edge length in pixels
    #[serde(default = "default_tile")]
    pub tile: f32,
    /// Collectible edge length in pixels
    #[serde(default = "default_item_size")]
    pub item_size: f32,
}

fn default_tile() -> f32 {
    TILE_SIZE
}

fn default_item_size() -> f32 {
    ITEM_SIZE
}

impl AsciiMaze {
    pub fn new(rows: &[&str]) -> Self {
        Self {
            rows: rows.iter().map(|r| r.to_string()).collect(),
            tile: TILE_SIZE,
            item_size: ITEM_SIZE,
        }
    }

    /// Pixel size of the whole grid
    pub fn pixel_size(&self) -> Vec2 {
        let cols = self.rows.first().map_or(0, |r| r.chars().count());
        Vec2::new(cols as f32, self.rows.len() as f32) * self.tile
    }

    /// Parse into a layout, checking that it fits `playfield`
    pub fn parse(&self, playfield: &Playfield) -> Result<Layout, LayoutError> {
        let positive = |v: f32| v.is_finite() && v > 0.0;
        if !positive(self.tile) || !positive(self.item_size) {
            return Err(LayoutError::BadTileSize {
                tile: self.tile,
                item_size: self.item_size,
            });
        }
        let first = self.rows.first().ok_or(LayoutError::Empty)?;
        let cols = first.chars().count();
        let height = self.rows.len();

        let size = self.pixel_size();
        let max = Vec2::new(playfield.width, playfield.height - playfield.hud_margin);
        if size.x > max.x || size.y > max.y {
            return Err(LayoutError::TooLarge {
                width: size.x,
                height: size.y,
                max_width: max.x,
                max_height: max.y,
            });
        }

        let tile = self.tile;
        let item_half = Vec2::splat(self.item_size / 2.0);
        let mut obstacles = Vec::new();
        let mut collectibles = Vec::new();
        let mut player_spawn = None;
        let mut adversary_spawns = Vec::new();

        for (row, line) in self.rows.iter().enumerate() {
            let found = line.chars().count();
            if found != cols {
                return Err(LayoutError::Ragged {
                    row,
                    expected: cols,
                    found,
                });
            }

            let y0 = (height - 1 - row) as f32 * tile;
            // Horizontal wall runs become one obstacle each
            let mut run_start: Option<usize> = None;

            for (col, ch) in line.chars().enumerate() {
                let center = Vec2::new(col as f32 * tile + tile / 2.0, y0 + tile / 2.0);
                match ch {
                    '#' => {
                        if run_start.is_none() {
                            run_start = Some(col);
                        }
                        continue;
                    }
                    '.' => collectibles.push(Aabb::from_center(center, item_half)),
                    'P' => {
                        if player_spawn.replace(center).is_some() {
                            return Err(LayoutError::MultiplePlayerSpawns);
                        }
                    }
                    'G' => adversary_spawns.push(center),
                    ' ' | '-' => {}
                    other => {
                        return Err(LayoutError::UnknownTile { ch: other, row, col });
                    }
                }
                if let Some(start) = run_start.take() {
                    obstacles.push(wall_run(start, col, y0, tile));
                }
            }
            if let Some(start) = run_start {
                obstacles.push(wall_run(start, cols, y0, tile));
            }
        }

        let player_spawn = player_spawn.ok_or(LayoutError::NoPlayerSpawn)?;
        if collectibles.is_empty() {
            return Err(LayoutError::NoCollectibles);
        }

        Ok(Layout {
            obstacles,
            collectibles,
            player_spawn,
            adversary_spawns,
        })
    }
}

/// Wall covering columns `start..end` of the row whose bottom is `y0`
fn wall_run(start: usize, end: usize, y0: f32, tile: f32) -> Aabb {
    Aabb::from_min_max(
        Vec2::new(start as f32 * tile, y0),
        Vec2::new(end as f32 * tile, y0 + tile),
    )
}

/// Cycles through a list of mazes, one per level
#[derive(Debug, Clone)]
pub struct MazeRotation {
    layouts: Vec<Layout>,
}

impl MazeRotation {
    /// Parse every maze up front so level setup cannot fail
    pub fn new(mazes: &[AsciiMaze], playfield: &Playfield) -> Result<Self, LayoutError> {
        let layouts = mazes
            .iter()
            .map(|m| m.parse(playfield))
            .collect::<Result<Vec<_>, _>>()?;
        if layouts.is_empty() {
            return Err(LayoutError::NoLevels);
        }
        Ok(Self { layouts })
    }

    /// Built-in mazes sized for the default 800x600 playfield
    pub fn builtin(playfield: &Playfield) -> Result<Self, LayoutError> {
        Self::new(&builtin_mazes(), playfield)
    }

    /// The config's custom levels, or the built-in ones when it has none
    pub fn from_config(config: &GameConfig) -> Result<Self, LayoutError> {
        if config.levels.is_empty() {
            Self::builtin(&config.playfield)
        } else {
            Self::new(&config.levels, &config.playfield)
        }
    }

    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }
}

impl LayoutSource for MazeRotation {
    fn layout(&mut self, level: u32) -> Layout {
        let idx = (level.max(1) - 1) as usize % self.layouts.len();
        self.layouts[idx].clone()
    }
}

/// The two stock mazes
pub fn builtin_mazes() -> Vec<AsciiMaze> {
    vec![
        AsciiMaze::new(&[
            "####################",
            "#........#........G#",
            "#.##.###.#.###.##..#",
            "#..................#",
            "#.##.#.######.#.##.#",
            "#....#...##...#...G#",
            "####.###.##.###.####",
            "#P.................#",
            "####.###.##.###.####",
            "#....#...##...#...G#",
            "#.##.#.######.#.##.#",
            "#..................#",
            "#.##.###.#.###.##.G#",
            "####################",
        ]),
        AsciiMaze::new(&[
            "####################",
            "#P.......##.......G#",
            "#.######.##.######.#",
            "#.#..............#.#",
            "#.#.####.##.####.#.#",
            "#...#..........#...#",
            "###.#.###..###.#.###",
            "#.....#......#....G#",
            "###.#.###..###.#.###",
            "#...#..........#...#",
            "#.#.####.##.####.#.#",
            "#.#..............#.#",
            "#G......##.......G.#",
            "####################",
        ]),
    ]
}
