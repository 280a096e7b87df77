use thiserror::Error;

use crate::{CellCount, Coord};

#[derive(Error, Debug, Copy, Clone, PartialEq)]
pub enum GameError {
    #[error("Illegal board shape, width and height must both be positive: {0}x{1}")]
    InvalidDimensions(Coord, Coord),
    #[error("Too many mines, requested {requested} but the board only has {tiles} tiles")]
    TooManyMines {
        requested: CellCount,
        tiles: CellCount,
    },
    #[error("Mine rate must be a finite share between 0 and 1, got {0}")]
    InvalidMineRate(f64),
    #[error("Not a display code: {0}")]
    InvalidTileCode(i8),
}

pub type Result<T> = core::result::Result<T, GameError>;
