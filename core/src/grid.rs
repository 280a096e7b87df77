use core::ops::{Index, IndexMut};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Authoritative state of a single tile.
///
/// `adjacent_mines` is only meaningful for cells without a mine.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub is_mine: bool,
    pub adjacent_mines: u8,
    pub discovered: bool,
    pub flagged: bool,
}

impl Cell {
    /// Hidden and unflagged.
    pub const fn is_untouched(self) -> bool {
        !self.discovered && !self.flagged
    }
}

/// The minefield together with the per-tile discovery and flag state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    cells: Array2<Cell>,
    mine_count: CellCount,
}

impl Grid {
    /// A grid without any mines.
    pub fn new(size: Coord2) -> Self {
        Self {
            cells: Array2::default(size.to_nd_index()),
            mine_count: 0,
        }
    }

    /// Builds a grid from a mine mask and computes the adjacency counts.
    pub fn from_mine_mask(mine_mask: &Array2<bool>) -> Self {
        let mut cells: Array2<Cell> = Array2::default(mine_mask.dim());
        let mut mine_count = 0;
        for (cell, &is_mine) in cells.iter_mut().zip(mine_mask.iter()) {
            cell.is_mine = is_mine;
            if is_mine {
                mine_count += 1;
            }
        }

        let mut grid = Self { cells, mine_count };
        fill_adjacency_counts(&mut grid);
        grid
    }

    /// Places mines on the listed coordinates; coordinates outside the board are ignored.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Self {
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());
        for &coords in mine_coords {
            if in_bounds(coords, size) {
                mine_mask[coords.to_nd_index()] = true;
            }
        }

        Self::from_mine_mask(&mine_mask)
    }

    pub fn size(&self) -> Coord2 {
        let (x, y) = self.cells.dim();
        (x as Coord, y as Coord)
    }

    pub fn total_cells(&self) -> CellCount {
        let (x, y) = self.size();
        mult(x, y)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        in_bounds(coords, self.size())
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }

    /// Every coordinate on the board, column by column.
    pub fn iter_coords(&self) -> impl Iterator<Item = Coord2> + use<> {
        let (x_end, y_end) = self.size();
        (0..x_end).flat_map(move |x| (0..y_end).map(move |y| (x, y)))
    }

    pub fn count_mines_around(&self, coords: Coord2) -> u8 {
        self.count_neighbors(coords, |cell| cell.is_mine)
    }

    pub fn count_flags_around(&self, coords: Coord2) -> u8 {
        self.count_neighbors(coords, |cell| cell.flagged)
    }

    fn count_neighbors(&self, coords: Coord2, pred: impl Fn(&Cell) -> bool) -> u8 {
        // at most eight neighbors
        self.iter_neighbors(coords)
            .filter(|&pos| pred(&self[pos]))
            .count() as u8
    }

    /// Snapshot of the flag layer, used to carry flags over a regeneration.
    pub fn flag_mask(&self) -> Array2<bool> {
        self.cells.map(|cell| cell.flagged)
    }

    /// Restores a flag layer taken from a grid of the same size, returning how many flags were set.
    pub fn apply_flag_mask(&mut self, flags: &Array2<bool>) -> CellCount {
        let mut count = 0;
        for (cell, &flagged) in self.cells.iter_mut().zip(flags.iter()) {
            cell.flagged = flagged && !cell.discovered;
            if cell.flagged {
                count += 1;
            }
        }
        count
    }

    pub(crate) fn cells(&self) -> &Array2<Cell> {
        &self.cells
    }
}

impl Index<Coord2> for Grid {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

impl IndexMut<Coord2> for Grid {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.cells[coords.to_nd_index()]
    }
}
