//! Minesweeper game engine: mine placement, flood reveal with a safe first move, chording, flags,
//! win/loss tracking, and an incremental display-code view for renderers.
//!
//! The engine is single-threaded and owned by its caller; every operation runs to completion
//! before returning.

use serde::{Deserialize, Serialize};

pub use adjacency::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use types::*;
pub use view::*;

mod adjacency;
mod engine;
mod error;
mod flag;
mod generator;
mod grid;
mod outcome;
mod reveal;
mod types;
mod view;

/// Share of tiles holding a mine when no explicit count is given.
pub const DEFAULT_MINE_RATE: f64 = 0.20625;

/// Parameters of a session. An explicit `mines` count overrides `mine_rate`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: Option<CellCount>,
    pub mine_rate: f64,
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new((16, 16))
    }
}

impl GameConfig {
    pub const fn new(size: Coord2) -> Self {
        Self {
            size,
            mines: None,
            mine_rate: DEFAULT_MINE_RATE,
            seed: None,
        }
    }

    pub const fn beginner() -> Self {
        Self::new((9, 9)).with_mines(10)
    }

    pub const fn intermediate() -> Self {
        Self::new((16, 16)).with_mines(40)
    }

    pub const fn expert() -> Self {
        Self::new((30, 16)).with_mines(99)
    }

    pub const fn with_mines(mut self, mines: CellCount) -> Self {
        self.mines = Some(mines);
        self
    }

    pub const fn with_mine_rate(mut self, mine_rate: f64) -> Self {
        self.mines = None;
        self.mine_rate = mine_rate;
        self
    }

    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    /// Validates the parameters and resolves how many mines the board gets.
    pub fn mine_count(&self) -> Result<CellCount> {
        let (width, height) = self.size;
        if width == 0 || height == 0 {
            return Err(GameError::InvalidDimensions(width, height));
        }

        let tiles = self.total_cells();
        let mines = match self.mines {
            Some(mines) => mines,
            None => {
                if !self.mine_rate.is_finite() || !(0.0..=1.0).contains(&self.mine_rate) {
                    return Err(GameError::InvalidMineRate(self.mine_rate));
                }
                (f64::from(tiles) * self.mine_rate).floor() as CellCount
            }
        };

        if mines > tiles {
            return Err(GameError::TooManyMines {
                requested: mines,
                tiles,
            });
        }
        Ok(mines)
    }
}
