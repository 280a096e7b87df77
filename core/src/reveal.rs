use crate::*;

impl GameEngine {
    /// Discovers a tile, flood-revealing the connected empty region around it.
    ///
    /// Returns `false` without changing anything when the game is over, the tile is flagged,
    /// or it was already discovered. The first discover of a session never lands on a mine
    /// nor on a numbered tile when the mine count allows it.
    pub fn discover(&mut self, coords: Coord2) -> bool {
        if !self.begin_move(coords) || self.grid[coords].flagged {
            return false;
        }

        self.ensure_safe_start(coords);
        let discovered = self.reveal_from(coords);
        self.settle_outcome();
        discovered
    }

    /// Opens every unflagged neighbor of a discovered number tile whose flag count matches it.
    ///
    /// Returns whether the flag count matched, even if one of the opened neighbors was a mine.
    /// Every unflagged neighbor is opened either way; the first mine hit is the detonated one.
    pub fn chord(&mut self, coords: Coord2) -> bool {
        if !self.begin_move(coords) {
            return false;
        }

        let cell = self.grid[coords];
        if !cell.discovered || self.grid.count_flags_around(coords) != cell.adjacent_mines {
            return false;
        }

        for neighbor in self.grid.iter_neighbors(coords) {
            self.reveal_from(neighbor);
        }
        self.settle_outcome();
        true
    }

    pub fn can_chord_at(&self, coords: Coord2) -> bool {
        if self.status.is_final() || !self.grid.contains(coords) {
            return false;
        }

        let cell = self.grid[coords];
        cell.discovered && self.grid.count_flags_around(coords) == cell.adjacent_mines
    }

    fn ensure_safe_start(&mut self, coords: Coord2) {
        if self.play_initiated {
            return;
        }
        self.play_initiated = true;

        let cell = self.grid[coords];
        if self.first_move_safety && (cell.is_mine || cell.adjacent_mines != 0) {
            self.regenerate_around(coords);
        }
    }

    /// Discovers `start` and, through an explicit stack, every tile reachable over zero tiles.
    fn reveal_from(&mut self, start: Coord2) -> bool {
        if !self.grid[start].is_untouched() {
            return false;
        }

        let mut to_visit = vec![start];
        while let Some(coords) = to_visit.pop() {
            let cell = self.grid[coords];
            // a tile can be queued by several zero neighbors
            if !cell.is_untouched() {
                continue;
            }

            self.grid[coords].discovered = true;
            self.pending_updates.push(coords);

            if cell.is_mine {
                // only `start` can be a mine, the flood never walks past a numbered tile
                self.mark_lost(coords);
                return true;
            }

            self.discovered_count += 1;
            log::trace!(
                "Opened tile at {:?}, mine count: {}",
                coords,
                cell.adjacent_mines
            );

            if cell.adjacent_mines == 0 {
                let grid = &self.grid;
                to_visit.extend(
                    grid.iter_neighbors(coords)
                        .filter(|&pos| grid[pos].is_untouched()),
                );
            }
        }

        self.mark_started();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(size: Coord2, mines: &[Coord2]) -> GameEngine {
        GameEngine::from_grid(Grid::from_mine_coords(size, mines), 0)
    }

    #[test]
    fn flood_opens_zero_region_and_its_numbered_border() {
        // . . . .
        // . . . .
        // 1 1 . .
        // * 1 . .
        let mut engine = engine((4, 4), &[(0, 3)]);

        assert!(engine.discover((3, 0)));

        // everything but the mine is reachable
        assert_eq!(engine.discovered_count(), 15);
        assert_eq!(engine.status(), GameStatus::Won);
    }

    #[test]
    fn flood_stops_at_numbered_wall() {
        // column x = 2 is a wall of mines splitting the board
        let mines = [(2, 0), (2, 1), (2, 2)];
        let mut engine = engine((5, 3), &mines);

        assert!(engine.discover((0, 0)));

        for y in 0..3 {
            assert!(engine.grid()[(0, y)].discovered);
            assert!(engine.grid()[(1, y)].discovered);
            assert!(!engine.grid()[(3, y)].discovered);
            assert!(!engine.grid()[(4, y)].discovered);
        }
        assert_eq!(engine.discovered_count(), 6);
        assert_eq!(engine.status(), GameStatus::InProgress);
        assert_eq!(engine.pending_updates().len(), 6);
    }

    #[test]
    fn flood_skips_flagged_tiles() {
        let mut engine = engine((4, 1), &[]);
        engine.flag((2, 0));

        assert!(engine.discover((0, 0)));

        assert!(engine.grid()[(1, 0)].discovered);
        assert!(!engine.grid()[(2, 0)].discovered);
        assert!(!engine.grid()[(3, 0)].discovered);
        assert_eq!(engine.status(), GameStatus::InProgress);
    }

    #[test]
    fn discover_flagged_tile_is_rejected() {
        let mut engine = engine((3, 3), &[(2, 2)]);
        assert!(engine.flag((0, 0)));

        assert!(!engine.discover((0, 0)));
        assert!(!engine.grid()[(0, 0)].discovered);
        assert!(!engine.play_initiated());
        assert!(engine.pending_updates().is_empty());
    }

    #[test]
    fn rediscovering_is_a_no_op() {
        let mines = [(2, 0), (2, 1), (2, 2)];
        let mut engine = engine((5, 3), &mines);
        assert!(engine.discover((0, 0)));

        assert!(!engine.discover((1, 1)));
        assert_eq!(engine.discovered_count(), 6);
        assert!(engine.pending_updates().is_empty());
    }

    #[test]
    fn first_move_on_mine_moves_the_mines() {
        let mut engine = engine((9, 9), &[(4, 4), (0, 0), (8, 8)]);

        assert!(engine.discover((4, 4)));

        let grid = engine.grid();
        assert!(!grid[(4, 4)].is_mine);
        assert_eq!(grid[(4, 4)].adjacent_mines, 0);
        assert_eq!(grid.mine_count(), 3);
        assert!(grid[(4, 4)].discovered);
        assert_ne!(engine.status(), GameStatus::Lost);
    }

    #[test]
    fn first_move_on_number_moves_the_mines_and_keeps_flags() {
        let mut engine = engine((9, 9), &[(1, 0), (8, 8)]);
        assert!(engine.flag((8, 0)));

        assert!(engine.discover((0, 0)));

        assert_eq!(engine.grid()[(0, 0)].adjacent_mines, 0);
        assert!(engine.grid()[(8, 0)].flagged);
        assert_eq!(engine.flag_count(), 1);
    }

    #[test]
    fn without_first_move_safety_the_first_click_can_lose() {
        let mut engine = engine((3, 3), &[(1, 1)]).without_first_move_safety();

        assert!(engine.discover((1, 1)));
        assert_eq!(engine.status(), GameStatus::Lost);
        assert_eq!(engine.detonated(), Some((1, 1)));
    }

    #[test]
    fn full_board_is_won_before_any_move() {
        let mut engine = engine((1, 1), &[(0, 0)]);
        assert_eq!(engine.status(), GameStatus::Won);
        assert!(!engine.discover((0, 0)));
    }

    #[test]
    fn discover_after_game_over_is_rejected() {
        let mut engine = engine((3, 1), &[(2, 0)]).without_first_move_safety();
        assert!(engine.discover((2, 0)));
        assert_eq!(engine.status(), GameStatus::Lost);

        assert!(!engine.discover((0, 0)));
        assert!(!engine.grid()[(0, 0)].discovered);
    }

    #[test]
    fn chord_opens_neighbors_when_flags_match() {
        // * 1 .
        // 1 1 .
        // . . .
        let mut engine = engine((3, 3), &[(0, 0)]).without_first_move_safety();
        assert!(engine.discover((1, 1)));
        assert_eq!(engine.discovered_count(), 1);

        assert!(!engine.chord((1, 1)));
        assert!(engine.flag((0, 0)));
        assert!(engine.chord((1, 1)));

        assert_eq!(engine.status(), GameStatus::Won);
        assert_eq!(engine.discovered_count(), 8);
    }

    #[test]
    fn chord_with_wrong_flag_detonates() {
        let mut engine = engine((3, 3), &[(0, 0)]).without_first_move_safety();
        assert!(engine.discover((1, 1)));
        assert!(engine.flag((2, 2)));

        assert!(engine.chord((1, 1)));

        assert_eq!(engine.status(), GameStatus::Lost);
        assert_eq!(engine.detonated(), Some((0, 0)));
        assert!(!engine.grid()[(2, 2)].discovered);
        // the mine comes first in neighbor order, the rest is still opened
        for neighbor in engine.grid().iter_neighbors((1, 1)) {
            assert_eq!(engine.grid()[neighbor].discovered, neighbor != (2, 2));
        }
        assert_eq!(engine.discovered_count(), 7);
    }

    #[test]
    fn chord_into_several_mines_keeps_the_first_detonation() {
        // * 2 * .
        // 1 2 2 2
        // F 0 F *
        let mut engine = engine((4, 3), &[(0, 0), (2, 0), (3, 2)]).without_first_move_safety();
        assert!(engine.discover((1, 1)));
        assert!(engine.flag((0, 2)));
        assert!(engine.flag((2, 2)));

        assert!(engine.chord((1, 1)));

        assert_eq!(engine.status(), GameStatus::Lost);
        assert_eq!(engine.detonated(), Some((0, 0)));
        assert_eq!(engine.discovered_count(), 5);

        let board = engine.board();
        assert_eq!(board[(0, 0)], -4);
        assert_eq!(board[(2, 0)], -3);
        assert_eq!(board[(3, 2)], -3);
        assert_eq!(board[(0, 2)], -5);
        assert_eq!(board[(2, 2)], -5);
        assert_eq!(board[(1, 2)], 0);

        let updates = engine.pending_updates();
        for coords in [(0, 0), (2, 0), (3, 2), (0, 2), (2, 2)] {
            let seen = updates.iter().filter(|&&pos| pos == coords).count();
            assert_eq!(seen, 1, "{:?} queued {} times", coords, seen);
        }
        assert!(!updates.contains(&(1, 1)));
        assert_eq!(updates.len(), 9);
    }

    #[test]
    fn chord_cascades_through_an_opened_zero() {
        // * 1 . . .
        // 1 1 . . .
        // . . . . .
        // . . . 1 1
        // . . . 1 *
        let mut engine = engine((5, 5), &[(0, 0), (4, 4)]).without_first_move_safety();
        assert!(engine.discover((1, 1)));
        assert_eq!(engine.discovered_count(), 1);
        assert!(engine.flag((0, 0)));

        assert!(engine.chord((1, 1)));

        // the zero at (2, 0) floods far outside the chorded neighborhood
        assert_eq!(engine.discovered_count(), 23);
        assert_eq!(engine.status(), GameStatus::Won);
        let updates = engine.pending_updates();
        for coords in [(4, 0), (0, 4), (3, 4), (4, 3), (3, 3)] {
            assert!(engine.grid()[coords].discovered);
            assert!(updates.contains(&coords));
        }
        assert!(!updates.contains(&(1, 1)));
        // 22 newly opened tiles, then the auto-flag on the remaining mine
        assert_eq!(updates.len(), 23);
        assert_eq!(updates.last(), Some(&(4, 4)));
    }

    #[test]
    fn chord_mismatch_changes_nothing() {
        let mut engine = engine((3, 3), &[(0, 0), (2, 0)]).without_first_move_safety();
        assert!(engine.discover((1, 1)));
        assert!(engine.flag((0, 0)));
        let before = engine.grid().clone();

        assert!(!engine.chord((1, 1)));

        assert_eq!(engine.grid(), &before);
        assert!(engine.pending_updates().is_empty());
    }

    #[test]
    fn chord_on_hidden_tile_is_rejected() {
        let mut engine = engine((3, 3), &[(0, 0)]);
        assert!(!engine.chord((2, 2)));
        assert!(!engine.can_chord_at((2, 2)));
    }

    #[test]
    fn deep_flood_on_large_empty_board() {
        let mut engine = engine((512, 512), &[]);

        assert!(engine.discover((256, 256)));

        assert_eq!(engine.discovered_count(), 512 * 512);
        assert_eq!(engine.status(), GameStatus::Won);
    }
}
