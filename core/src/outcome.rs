use crate::*;

impl GameEngine {
    /// Settles win/loss after a mutating call and applies the end-of-game board corrections.
    ///
    /// A loss exposes every unflagged mine and every wrong flag, a win flags all remaining
    /// mines. Affected tiles are appended to the pending updates.
    pub(crate) fn settle_outcome(&mut self) {
        match self.status {
            GameStatus::Won => {}
            GameStatus::Lost => self.expose_board(),
            GameStatus::NotStarted | GameStatus::InProgress => {
                if self.discovered_count == self.grid.safe_cell_count() {
                    self.mark_won();
                }
            }
        }
    }

    pub(crate) fn mark_started(&mut self) {
        if self.status.is_initial() {
            log::debug!("Game started");
            self.status = GameStatus::InProgress;
        }
    }

    pub(crate) fn mark_lost(&mut self, detonated: Coord2) {
        // a chord can open several mines, the first one stays the detonated tile
        if self.status == GameStatus::Lost {
            log::debug!("Also opened mine at {:?}", detonated);
            return;
        }
        self.detonated = Some(detonated);
        self.status = GameStatus::Lost;
        log::info!(
            "Game lost at {:?} with {} of {} safe tiles discovered",
            detonated,
            self.discovered_count,
            self.grid.safe_cell_count()
        );
    }

    fn mark_won(&mut self) {
        self.status = GameStatus::Won;
        self.detonated = None;

        for coords in self.grid.iter_coords() {
            let cell = &mut self.grid[coords];
            if cell.is_mine && !cell.flagged {
                cell.flagged = true;
                self.flag_count += 1;
                self.pending_updates.push(coords);
            }
        }
        log::info!("Game won, {} safe tiles discovered", self.discovered_count);
    }

    /// Queues every tile whose display code flips because the game was lost.
    fn expose_board(&mut self) {
        for coords in self.grid.iter_coords() {
            let cell = self.grid[coords];
            let exposed_mine = cell.is_mine && cell.is_untouched();
            let wrong_flag = !cell.is_mine && cell.flagged;
            if exposed_mine || wrong_flag {
                self.pending_updates.push(coords);
            }
        }
    }
}
