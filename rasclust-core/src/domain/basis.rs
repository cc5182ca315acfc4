use core::iter::FusedIterator;

use super::{Bounds, Coord, Direction};
use crate::error::{Error, Result};

/// A recursively splittable view over part of a whole grid.
///
/// `whole` never changes across splits; `current` shrinks. A basis owns no
/// cell data. Neighbor queries are answered in whole-grid coordinates and
/// filtered against `whole`, so a vertex on the edge of `current` reports
/// neighbors that belong to a sibling partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Basis {
    whole: Bounds,
    current: Bounds,
    granularity: usize,
}

impl Basis {
    /// Creates a basis whose current bounds equal `whole`.
    ///
    /// `granularity` bounds the longer axis of a leaf: a basis keeps
    /// splitting while its longer axis spans more than `granularity` cells.
    ///
    /// # Errors
    ///
    /// * [`Error::DegenerateBounds`] if `whole` is empty.
    /// * [`Error::InvalidConfig`] if `granularity` is zero.
    pub fn new(whole: Bounds, granularity: usize) -> Result<Self> {
        if whole.is_empty() {
            let (rows, cols) = (whole.rows(), whole.cols());
            return Err(Error::DegenerateBounds {
                rows: (rows.start, rows.end),
                cols: (cols.start, cols.end),
            });
        }
        if granularity == 0 {
            return Err(Error::InvalidConfig("granularity must be at least 1"));
        }
        Ok(Self {
            whole,
            current: whole,
            granularity,
        })
    }

    /// Bounds of the whole grid.
    #[inline]
    #[must_use]
    pub const fn whole(&self) -> Bounds {
        self.whole
    }

    /// Bounds of this partition.
    #[inline]
    #[must_use]
    pub const fn current(&self) -> Bounds {
        self.current
    }

    /// Splitting granularity.
    #[inline]
    #[must_use]
    pub const fn granularity(&self) -> usize {
        self.granularity
    }

    /// Whether [`split`](Self::split) will cut this basis.
    #[inline]
    #[must_use]
    pub const fn is_divisible(&self) -> bool {
        self.current.longer_extent() > self.granularity
    }

    /// Halves the current bounds along the longer axis (rows on ties).
    ///
    /// The two halves cover the current bounds exactly and keep the same
    /// whole bounds and granularity. Returns `None` when not divisible.
    #[must_use]
    pub fn split(&self) -> Option<(Basis, Basis)> {
        if !self.is_divisible() {
            return None;
        }
        let (_, lo, hi) = self.current.bisect()?;
        Some((
            Basis {
                current: lo,
                ..*self
            },
            Basis {
                current: hi,
                ..*self
            },
        ))
    }

    /// Every coordinate of the current bounds in row-major order.
    ///
    /// The iterator is cheap to clone, so a pass can be restarted.
    #[inline]
    #[must_use]
    pub fn vertices(&self) -> Vertices {
        Vertices::new(self.current)
    }

    /// Edge-adjacent coordinates of `c` inside the whole bounds, in the
    /// order east, south, west, north.
    #[inline]
    pub fn neighbors(&self, c: Coord) -> impl Iterator<Item = Coord> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |dir| c.step(dir, &self.whole))
    }
}

/// Row-major walk over a [`Bounds`].
#[derive(Debug, Clone)]
pub struct Vertices {
    bounds: Bounds,
    next: Coord,
    remaining: usize,
}

impl Vertices {
    fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            next: Coord::new(bounds.rows().start, bounds.cols().start),
            remaining: bounds.area(),
        }
    }
}

impl Iterator for Vertices {
    type Item = Coord;

    #[inline]
    fn next(&mut self) -> Option<Coord> {
        if self.remaining == 0 {
            return None;
        }
        let out = self.next;
        self.remaining -= 1;
        self.next.col += 1;
        if self.next.col == self.bounds.cols().end {
            self.next.col = self.bounds.cols().start;
            self.next.row += 1;
        }
        Some(out)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Vertices {}
impl FusedIterator for Vertices {}
