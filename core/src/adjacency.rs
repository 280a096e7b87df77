use crate::*;

/// Stores the number of mines in the 3x3 neighborhood of every safe cell.
///
/// Mine cells keep whatever count they had, the value is never read for them.
pub fn fill_adjacency_counts(grid: &mut Grid) {
    for coords in grid.iter_coords() {
        if grid[coords].is_mine {
            continue;
        }
        let count = grid.count_mines_around(coords);
        grid[coords].adjacent_mines = count;
    }
}
