use crate::*;

impl GameEngine {
    /// Toggles the flag on a hidden tile. Flags are a player annotation and may be wrong.
    pub fn flag(&mut self, coords: Coord2) -> bool {
        if !self.begin_move(coords) {
            return false;
        }

        let cell = &mut self.grid[coords];
        if cell.discovered {
            return false;
        }

        cell.flagged = !cell.flagged;
        if cell.flagged {
            self.flag_count += 1;
        } else {
            self.flag_count -= 1;
        }
        self.pending_updates.push(coords);
        self.settle_outcome();
        true
    }
}
