use super::Layout;
use crate::domain::{Coord, Direction};
use crate::error::{Error, Result};

/// Plain `row * width + col` addressing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowMajor {
    height: usize,
    width: usize,
}

impl RowMajor {
    /// Creates a row-major layout.
    ///
    /// # Errors
    ///
    /// [`Error::DegenerateBounds`] if either dimension is zero.
    pub fn new(height: usize, width: usize) -> Result<Self> {
        if height == 0 || width == 0 {
            return Err(Error::DegenerateBounds {
                rows: (0, height),
                cols: (0, width),
            });
        }
        Ok(Self { height, width })
    }
}

impl Layout for RowMajor {
    #[inline]
    fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn width(&self) -> usize {
        self.width
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.height * self.width
    }

    #[inline(always)]
    fn offset(&self, c: Coord) -> usize {
        c.row * self.width + c.col
    }

    #[inline(always)]
    fn coord(&self, offset: usize) -> Coord {
        Coord::new(offset / self.width, offset % self.width)
    }

    #[inline]
    fn neighbor(&self, offset: usize, at: Coord, dir: Direction) -> Option<usize> {
        match dir {
            Direction::East => (at.col + 1 < self.width).then(|| offset + 1),
            Direction::South => (at.row + 1 < self.height).then(|| offset + self.width),
            Direction::West => (at.col > 0).then(|| offset - 1),
            Direction::North => (at.row > 0).then(|| offset - self.width),
        }
    }
}
