use ndarray::Array2;

use super::*;

/// Purely random placement, optionally keeping the start cell (and its neighborhood) free of mines.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomGridGenerator {
    seed: u64,
    start: Coord2,
    start_cell: StartCell,
}

impl RandomGridGenerator {
    pub fn new(seed: u64, start: Coord2, start_cell: StartCell) -> Self {
        Self {
            seed,
            start,
            start_cell,
        }
    }

    /// No start cell guarantee, used when a session is initialized.
    pub fn unconstrained(seed: u64) -> Self {
        Self::new(seed, (0, 0), StartCell::Random)
    }

    /// Degrades the requested guarantee until `mines` fits in the remaining cells.
    fn feasible_start_cell(&self, size: Coord2, mines: CellCount) -> StartCell {
        use StartCell::*;

        let total_cells = mult(size.0, size.1);
        let zone_cells = NeighborIter::new(self.start, size).count() as CellCount + 1;

        match self.start_cell {
            Random => Random,
            SimpleSafe | AlwaysZero if mines + 1 > total_cells => {
                log::warn!("Cannot make start cell safe, fallback to random");
                Random
            }
            SimpleSafe => SimpleSafe,
            AlwaysZero if mines + zone_cells > total_cells => {
                log::warn!("Cannot make start cell zero, fallback to simple safe");
                SimpleSafe
            }
            AlwaysZero => AlwaysZero,
        }
    }
}

impl GridGenerator for RandomGridGenerator {
    fn generate(self, size: Coord2, mines: CellCount) -> Grid {
        use rand::prelude::*;
        use StartCell::*;

        let total_cells = mult(size.0, size.1);
        let mines = if mines > total_cells {
            log::warn!(
                "Minefield already full, requested {} but only fits {}",
                mines,
                total_cells
            );
            total_cells
        } else {
            mines
        };

        let mut excluded: Array2<bool> = Array2::default(size.to_nd_index());
        if in_bounds(self.start, size) {
            match self.feasible_start_cell(size, mines) {
                Random => {}
                SimpleSafe => {
                    excluded[self.start.to_nd_index()] = true;
                }
                AlwaysZero => {
                    excluded[self.start.to_nd_index()] = true;
                    for coords in NeighborIter::new(self.start, size) {
                        excluded[coords.to_nd_index()] = true;
                    }
                }
            }
        }
        let eligible = total_cells - excluded.iter().filter(|&&cell| cell).count() as CellCount;

        // flip whichever of mines or holes is the minority
        let (value_to_place, mut remaining) = if mines > eligible / 2 {
            (false, eligible - mines)
        } else {
            (true, mines)
        };
        let mut mine_mask = excluded.map(|&skip| !skip && !value_to_place);

        let mut rng = SmallRng::seed_from_u64(self.seed);
        while remaining > 0 {
            let coords = (rng.random_range(0..size.0), rng.random_range(0..size.1));
            let index = coords.to_nd_index();
            if excluded[index] || mine_mask[index] == value_to_place {
                continue;
            }
            mine_mask[index] = value_to_place;
            remaining -= 1;
        }

        let grid = Grid::from_mine_mask(&mine_mask);
        // double check mine count
        if grid.mine_count() != mines {
            log::warn!(
                "Generated minefield count mismatch, actual: {}, requested: {}",
                grid.mine_count(),
                mines
            );
        }
        grid
    }
}
