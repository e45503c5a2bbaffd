//! Tiles, directions, and the grid bliques move across.

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use crate::WorldError;

/// Cardinal facing of an agent.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// Unit step in grid coordinates (y grows downward, screen-style).
    #[must_use]
    pub const fn delta(self) -> (i64, i64) {
        match self {
            Self::North => (0, -1),
            Self::East => (1, 0),
            Self::South => (0, 1),
            Self::West => (-1, 0),
        }
    }

    /// Quarter turn counter-clockwise.
    #[must_use]
    pub const fn left(self) -> Self {
        match self {
            Self::North => Self::West,
            Self::West => Self::South,
            Self::South => Self::East,
            Self::East => Self::North,
        }
    }

    /// Quarter turn clockwise.
    #[must_use]
    pub const fn right(self) -> Self {
        match self {
            Self::North => Self::East,
            Self::East => Self::South,
            Self::South => Self::West,
            Self::West => Self::North,
        }
    }

    /// Uniform random facing.
    #[must_use]
    pub fn random(rng: &mut dyn RngCore) -> Self {
        match rng.random_range(0..4u8) {
            0 => Self::North,
            1 => Self::East,
            2 => Self::South,
            _ => Self::West,
        }
    }
}

/// A square of the environment. Immutable once placed in a grid.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Tile {
    /// Empty, walkable ground.
    #[default]
    Open,
    /// Impassable barrier.
    Wall,
    /// Walkable; carries no effect (no consuming behavior exists yet).
    Food,
}

impl Tile {
    /// Whether an agent may occupy this tile.
    #[must_use]
    pub const fn passable(self) -> bool {
        match self {
            Self::Open | Self::Food => true,
            Self::Wall => false,
        }
    }

    /// Display symbol used by the rendering layer.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Open => ' ',
            Self::Wall => '█',
            Self::Food => '*',
        }
    }
}

/// Read-only copy of one grid cell handed to the rendering layer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CellView {
    pub passable: bool,
    pub symbol: char,
}

/// Read-only copy of the full grid for drawing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GridSnapshot {
    pub width: u32,
    pub height: u32,
    pub cells: Vec<CellView>,
}

/// Rectangular field of tiles, stored flat at `y * width + x`. Tiles are
/// never mutated while a simulation is running, so the grid can be read
/// concurrently by every agent within a tick.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Grid {
    width: u32,
    height: u32,
    tiles: Vec<Tile>,
}

impl Grid {
    /// Build a grid from an explicit tile vector.
    pub fn new(width: u32, height: u32, tiles: Vec<Tile>) -> Result<Self, WorldError> {
        let expected = (width as usize) * (height as usize);
        if tiles.len() != expected {
            return Err(WorldError::GridShape {
                expected,
                actual: tiles.len(),
            });
        }
        Ok(Self {
            width,
            height,
            tiles,
        })
    }

    /// Standard arena shape: a ring of walls around an open interior.
    pub fn bounded(width: u32, height: u32) -> Result<Self, WorldError> {
        if width < 3 || height < 3 {
            return Err(WorldError::InvalidConfig(
                "bounded grid needs room for an interior, at least 3x3",
            ));
        }
        let mut tiles = Vec::with_capacity((width as usize) * (height as usize));
        for y in 0..height {
            for x in 0..width {
                let interior = x > 0 && x < width - 1 && y > 0 && y < height - 1;
                tiles.push(if interior { Tile::Open } else { Tile::Wall });
            }
        }
        Self::new(width, height, tiles)
    }

    /// Sprinkle food tiles over the open interior with probability
    /// `density` per cell.
    pub fn scatter_food(&mut self, density: f32, rng: &mut dyn RngCore) {
        if density <= 0.0 {
            return;
        }
        let width = self.width as usize;
        for (index, tile) in self.tiles.iter_mut().enumerate() {
            let (x, y) = (index % width, index / width);
            if x == 0 || y == 0 || x + 1 == width || y + 1 == self.height as usize {
                continue;
            }
            if *tile == Tile::Open && rng.random::<f32>() < density {
                *tile = Tile::Food;
            }
        }
    }

    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Tile at `(x, y)`. Anything outside the grid resolves to a wall,
    /// so callers never bounds-check before querying.
    #[must_use]
    pub fn tile(&self, x: i64, y: i64) -> Tile {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return Tile::Wall;
        }
        self.tiles[(y as usize) * (self.width as usize) + (x as usize)]
    }

    /// Copy out the cell data the rendering layer needs.
    #[must_use]
    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot {
            width: self.width,
            height: self.height,
            cells: self
                .tiles
                .iter()
                .map(|tile| CellView {
                    passable: tile.passable(),
                    symbol: tile.symbol(),
                })
                .collect(),
        }
    }
}
