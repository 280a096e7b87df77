use serde::{Deserialize, Serialize};

use crate::*;
pub use random::*;

mod random;

pub trait GridGenerator {
    fn generate(self, size: Coord2, mines: CellCount) -> Grid;
}

/// What is guaranteed about the start cell of a freshly generated grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StartCell {
    /// No guarantee at all.
    Random,
    /// The start cell holds no mine.
    SimpleSafe,
    /// Neither the start cell nor any of its neighbors hold a mine.
    AlwaysZero,
}
