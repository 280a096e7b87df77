use core::fmt;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Player-visible state of a tile, convertible to and from the small integer display codes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileCode {
    /// A flag on a safe tile, only shown after a loss (`-5`)
    IncorrectFlag,
    /// The mine that ended the game (`-4`)
    Detonated,
    /// Any other mine exposed by a loss (`-3`)
    Mine,
    /// Undiscovered and unflagged (`-2`)
    Hidden,
    /// Flagged by the player, or auto-flagged by a win (`-1`)
    Flagged,
    /// Discovered safe tile with its adjacent mine count (`0..=8`)
    Open(u8),
}

impl TileCode {
    pub const fn value(self) -> i8 {
        use TileCode::*;
        match self {
            IncorrectFlag => -5,
            Detonated => -4,
            Mine => -3,
            Hidden => -2,
            Flagged => -1,
            Open(count) => count as i8,
        }
    }

    /// Codes that only appear once a game has been lost.
    pub const fn is_terminal_marker(self) -> bool {
        matches!(self, Self::IncorrectFlag | Self::Detonated | Self::Mine)
    }

    fn symbol(self) -> char {
        use TileCode::*;
        match self {
            IncorrectFlag => 'x',
            Detonated => '#',
            Mine => '*',
            Hidden => '.',
            Flagged => 'F',
            Open(0) => ' ',
            Open(count) => char::from(b'0' + count),
        }
    }
}

impl From<TileCode> for i8 {
    fn from(code: TileCode) -> Self {
        code.value()
    }
}

impl TryFrom<i8> for TileCode {
    type Error = GameError;

    fn try_from(value: i8) -> Result<Self> {
        use TileCode::*;
        Ok(match value {
            -5 => IncorrectFlag,
            -4 => Detonated,
            -3 => Mine,
            -2 => Hidden,
            -1 => Flagged,
            0..=8 => Open(value as u8),
            _ => return Err(GameError::InvalidTileCode(value)),
        })
    }
}

/// Encodes one cell. Flag state is checked before discovery, terminal adjustments win over both.
pub fn tile_code(
    cell: Cell,
    coords: Coord2,
    status: GameStatus,
    detonated: Option<Coord2>,
) -> TileCode {
    let mut code = if cell.flagged {
        TileCode::Flagged
    } else {
        TileCode::Hidden
    };
    if cell.discovered {
        code = TileCode::Open(cell.adjacent_mines);
    }

    match status {
        GameStatus::Lost if detonated == Some(coords) => TileCode::Detonated,
        GameStatus::Lost if cell.is_mine && !cell.flagged => TileCode::Mine,
        GameStatus::Lost if !cell.is_mine && cell.flagged => TileCode::IncorrectFlag,
        GameStatus::Won if cell.is_mine => TileCode::Flagged,
        _ => code,
    }
}

/// Read-only snapshot of the display codes, indexed by `(x, y)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BoardView {
    codes: Array2<i8>,
}

impl BoardView {
    pub fn size(&self) -> Coord2 {
        let (x, y) = self.codes.dim();
        (x as Coord, y as Coord)
    }

    pub fn get(&self, coords: Coord2) -> Option<TileCode> {
        let code = *self.codes.get(coords.to_nd_index())?;
        TileCode::try_from(code).ok()
    }

    pub fn codes(&self) -> &Array2<i8> {
        &self.codes
    }
}

impl Index<Coord2> for BoardView {
    type Output = i8;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.codes[coords.to_nd_index()]
    }
}

/// One text row per `y`, one character per tile.
impl fmt::Display for BoardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (x_end, y_end) = self.size();
        for y in 0..y_end {
            for x in 0..x_end {
                let symbol = self.get((x, y)).map_or('?', TileCode::symbol);
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl GameEngine {
    pub fn board(&self) -> BoardView {
        let codes = Array2::from_shape_fn(self.grid.cells().dim(), |(x, y)| {
            let coords = (x as Coord, y as Coord);
            self.tile_code_unchecked(coords).value()
        });
        BoardView { codes }
    }

    /// Display code of a single tile, for redrawing just the pending updates.
    pub fn code_at(&self, coords: Coord2) -> Option<TileCode> {
        self.grid
            .contains(coords)
            .then(|| self.tile_code_unchecked(coords))
    }

    fn tile_code_unchecked(&self, coords: Coord2) -> TileCode {
        tile_code(self.grid[coords], coords, self.status, self.detonated)
    }
}
