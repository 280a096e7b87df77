use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - NotStarted -> InProgress
/// - NotStarted -> Won (first move clears the board, or there is nothing to clear)
/// - NotStarted -> Lost (first move with first-move safety turned off)
/// - InProgress -> Won
/// - InProgress -> Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// No successful discover yet
    #[default]
    NotStarted,
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_initial(self) -> bool {
        matches!(self, Self::NotStarted)
    }

    /// The game has ended and no moves are accepted anymore
    pub const fn is_final(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// One play session: the authoritative [`Grid`], the session counters, and the list of tiles
/// whose display code changed during the last mutating call.
///
/// The engine assumes a single writer; it is not meant to be shared between threads while
/// being mutated.
#[derive(Clone, Debug)]
pub struct GameEngine {
    pub(crate) config: GameConfig,
    pub(crate) grid: Grid,
    pub(crate) discovered_count: CellCount,
    pub(crate) flag_count: CellCount,
    pub(crate) status: GameStatus,
    pub(crate) play_initiated: bool,
    pub(crate) first_move_safety: bool,
    pub(crate) detonated: Option<Coord2>,
    pub(crate) pending_updates: Vec<Coord2>,
    seeds: SmallRng,
}

impl GameEngine {
    /// Validates `config` and builds a fresh session.
    pub fn new(config: GameConfig) -> Result<Self> {
        let mines = config.mine_count()?;
        let mut seeds = SmallRng::seed_from_u64(config.seed.unwrap_or_else(clock_seed));
        let grid = RandomGridGenerator::unconstrained(seeds.random()).generate(config.size, mines);
        log::debug!(
            "New {}x{} session with {} mines",
            config.size.0,
            config.size.1,
            mines
        );

        Ok(Self::with_parts(config, grid, seeds))
    }

    /// Starts a session on a hand-placed layout. Later regenerations are random with the same
    /// size and mine count.
    pub fn from_grid(grid: Grid, seed: u64) -> Self {
        let config = GameConfig::new(grid.size())
            .with_mines(grid.mine_count())
            .with_seed(seed);
        Self::with_parts(config, grid, SmallRng::seed_from_u64(seed))
    }

    /// Keeps the first discover where it lands instead of moving mines out of the way.
    pub fn without_first_move_safety(mut self) -> Self {
        self.first_move_safety = false;
        self
    }

    fn with_parts(config: GameConfig, grid: Grid, seeds: SmallRng) -> Self {
        let mut engine = Self {
            config,
            grid,
            discovered_count: 0,
            flag_count: 0,
            status: GameStatus::NotStarted,
            play_initiated: false,
            first_move_safety: true,
            detonated: None,
            pending_updates: Vec::new(),
            seeds,
        };
        // a board without safe tiles is already solved
        engine.settle_outcome();
        engine.pending_updates.clear();
        engine
    }

    /// Replaces the session with one built from `config`; on error the current session is kept.
    pub fn initialize(&mut self, config: GameConfig) -> Result<()> {
        let first_move_safety = self.first_move_safety;
        *self = Self::new(config)?;
        self.first_move_safety = first_move_safety;
        Ok(())
    }

    /// Discards the session and deals a new layout with the stored size and mine count.
    pub fn reinitialize(&mut self) {
        let grid = RandomGridGenerator::unconstrained(self.seeds.random())
            .generate(self.grid.size(), self.grid.mine_count());
        log::debug!("Reinitialized session");
        self.grid = grid;
        self.reset_counters();
        self.settle_outcome();
        self.pending_updates.clear();
    }

    fn reset_counters(&mut self) {
        self.discovered_count = 0;
        self.flag_count = 0;
        self.status = GameStatus::NotStarted;
        self.play_initiated = false;
        self.detonated = None;
        self.pending_updates.clear();
    }

    /// Deals a new layout in which `start` and its neighborhood hold no mine, keeping flags.
    pub(crate) fn regenerate_around(&mut self, start: Coord2) {
        let flags = self.grid.flag_mask();
        self.grid = RandomGridGenerator::new(self.seeds.random(), start, StartCell::AlwaysZero)
            .generate(self.grid.size(), self.grid.mine_count());
        self.flag_count = self.grid.apply_flag_mask(&flags);
        log::debug!("Regenerated layout around first move at {:?}", start);
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn dimensions(&self) -> Coord2 {
        self.grid.size()
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status.is_final()
    }

    /// Whether a discover has gone through this session.
    pub fn play_initiated(&self) -> bool {
        self.play_initiated
    }

    pub fn mine_count(&self) -> CellCount {
        self.grid.mine_count()
    }

    pub fn mine_rate(&self) -> f64 {
        f64::from(self.grid.mine_count()) / f64::from(self.grid.total_cells())
    }

    pub fn flag_count(&self) -> CellCount {
        self.flag_count
    }

    /// Safe tiles discovered so far; the detonated mine is not counted.
    ///
    /// Counters that also add the losing click are one higher after a loss. Leaving it out
    /// keeps `discovered_count() + mine_count()` equal to the tile count exactly when won.
    pub fn discovered_count(&self) -> CellCount {
        self.discovered_count
    }

    pub fn remaining_safe(&self) -> CellCount {
        self.grid.safe_cell_count() - self.discovered_count
    }

    /// How many mines have not been flagged yet, negative when over-flagged.
    pub fn mines_left(&self) -> i64 {
        i64::from(self.grid.mine_count()) - i64::from(self.flag_count)
    }

    /// The mine that ended the game, if it was lost.
    pub fn detonated(&self) -> Option<Coord2> {
        self.detonated
    }

    /// Tiles whose display code changed during the last mutating call, in the order they changed.
    pub fn pending_updates(&self) -> &[Coord2] {
        &self.pending_updates
    }

    pub fn clear_pending_updates(&mut self) {
        self.pending_updates.clear();
    }

    /// Chords a discovered tile, otherwise toggles its flag.
    pub fn quick_action(&mut self, coords: Coord2) -> bool {
        if self.grid.contains(coords) && self.grid[coords].discovered {
            self.chord(coords)
        } else {
            self.flag(coords)
        }
    }

    /// Common guard for gameplay calls: starts a fresh update list and rejects moves on a
    /// finished game or outside the board.
    pub(crate) fn begin_move(&mut self, coords: Coord2) -> bool {
        self.pending_updates.clear();
        if self.status.is_final() {
            log::debug!("Move at {:?} rejected, game already ended", coords);
            return false;
        }
        self.grid.contains(coords)
    }
}

fn clock_seed() -> u64 {
    use web_time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}
