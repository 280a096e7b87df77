use ndarray::Array2;

/// Board axis: width, height, and tile positions. Unsigned, so an empty axis is the only bad size.
pub type Coord = u16;

/// Tile totals and the session counters: mines, flags, discovered safe tiles.
/// Wide enough for the largest `Coord` x `Coord` board.
pub type CellCount = u32;

/// Tile position `(x, y)`, also used for board size `(width, height)`.
pub type Coord2 = (Coord, Coord);

/// Converts a tile position into the `[x, y]` index of the backing `Array2`.
pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

/// Tile count of an `a` x `b` board.
pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Whether `coords` lies inside a board of `size`.
pub const fn in_bounds(coords: Coord2, size: Coord2) -> bool {
    coords.0 < size.0 && coords.1 < size.1
}

/// Neighborhood lookup on any board-shaped array, used for cells and display codes alike.
pub trait NeighborIterExt {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter {
        let (x, y) = self.dim();
        // dimensions are always built from a `Coord2`
        NeighborIter::new(index, (x as Coord, y as Coord))
    }
}

const DISPLACEMENTS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: (i32, i32), bounds: Coord2) -> Option<Coord2> {
    let next_x = Coord::try_from(i32::from(coords.0) + delta.0).ok()?;
    let next_y = Coord::try_from(i32::from(coords.1) + delta.1).ok()?;

    in_bounds((next_x, next_y), bounds).then_some((next_x, next_y))
}

/// Iterates the up to eight in-bounds cells around a center, never the center itself.
#[derive(Debug, Clone)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    index: u8,
}

impl NeighborIter {
    pub fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let delta = *DISPLACEMENTS.get(usize::from(self.index))?;
            self.index += 1;

            if let Some(next_item) = apply_delta(self.center, delta, self.bounds) {
                return Some(next_item);
            }
        }
    }
}
