//! Grid domain: coordinates, rectangular bounds and the splittable [`Basis`].
//!
//! Every coordinate in this crate is a whole-grid position. Partitions never
//! renumber cells, so a coordinate produced by one leaf can be handed to any
//! other layer (layouts, disjoint sets, extraction) without translation.

mod basis;
mod bounds;

pub use basis::{Basis, Vertices};
pub use bounds::{Axis, Bounds, EdgeKind, SharedEdge};

use core::fmt;

/// A whole-grid position as `(row, col)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Coord {
    /// Row index, growing southwards.
    pub row: usize,
    /// Column index, growing eastwards.
    pub col: usize,
}

impl Coord {
    /// Creates a coordinate.
    #[inline]
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Moves one cell in `dir`, or `None` if the move leaves `bounds`.
    #[inline]
    #[must_use]
    pub fn step(self, dir: Direction, bounds: &Bounds) -> Option<Coord> {
        let next = match dir {
            Direction::East => Coord::new(self.row, self.col.checked_add(1)?),
            Direction::South => Coord::new(self.row.checked_add(1)?, self.col),
            Direction::West => Coord::new(self.row, self.col.checked_sub(1)?),
            Direction::North => Coord::new(self.row.checked_sub(1)?, self.col),
        };
        bounds.contains(next).then_some(next)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(usize, usize)> for Coord {
    #[inline]
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

/// One of the four edge-adjacent moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// `col + 1`
    East,
    /// `row + 1`
    South,
    /// `col - 1`
    West,
    /// `row - 1`
    North,
}

impl Direction {
    /// Neighbor visiting order used by [`Basis::neighbors`].
    pub const ALL: [Direction; 4] = [
        Direction::East,
        Direction::South,
        Direction::West,
        Direction::North,
    ];
}
