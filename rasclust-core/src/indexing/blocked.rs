use super::Layout;
use crate::domain::{Coord, Direction};
use crate::error::{Error, Result};

/// Square tiles of `block x block` cells, tiles in row-major order and
/// cells row-major inside each tile.
///
/// Tiles on the last tile-row or tile-column may be partial. A partial tile
/// is packed with its own width, so the offsets of the whole grid form the
/// dense range `0..height * width` with no holes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Blocked {
    height: usize,
    width: usize,
    block: usize,
}

impl Blocked {
    /// Creates a blocked layout.
    ///
    /// # Errors
    ///
    /// * [`Error::DegenerateBounds`] if either dimension is zero.
    /// * [`Error::InvalidConfig`] if `block` is zero.
    pub fn new(height: usize, width: usize, block: usize) -> Result<Self> {
        if height == 0 || width == 0 {
            return Err(Error::DegenerateBounds {
                rows: (0, height),
                cols: (0, width),
            });
        }
        if block == 0 {
            return Err(Error::InvalidConfig("block size must be at least 1"));
        }
        Ok(Self {
            height,
            width,
            block,
        })
    }

    /// Tile edge length.
    #[inline]
    pub const fn block(&self) -> usize {
        self.block
    }

    /// Height of the tiles on tile-row `tr`.
    #[inline(always)]
    const fn tile_height(&self, tr: usize) -> usize {
        let left = self.height - tr * self.block;
        if left < self.block {
            left
        } else {
            self.block
        }
    }

    /// Width of the tiles on tile-column `tc`.
    #[inline(always)]
    const fn tile_width(&self, tc: usize) -> usize {
        let left = self.width - tc * self.block;
        if left < self.block {
            left
        } else {
            self.block
        }
    }
}

impl Layout for Blocked {
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

    #[inline]
    fn offset(&self, c: Coord) -> usize {
        let b = self.block;
        let (tr, tc) = (c.row / b, c.col / b);
        let th = self.tile_height(tr);
        let tw = self.tile_width(tc);
        // Full tile-rows above, then full-height tiles to the left.
        tr * b * self.width + tc * b * th + (c.row % b) * tw + c.col % b
    }

    #[inline]
    fn coord(&self, offset: usize) -> Coord {
        let b = self.block;
        let band = b * self.width;
        let tr = offset / band;
        let in_band = offset - tr * band;
        let th = self.tile_height(tr);
        let tc = in_band / (b * th);
        let in_tile = in_band - tc * b * th;
        let tw = self.tile_width(tc);
        Coord::new(tr * b + in_tile / tw, tc * b + in_tile % tw)
    }

    #[inline]
    fn neighbor(&self, offset: usize, at: Coord, dir: Direction) -> Option<usize> {
        let b = self.block;
        let (ir, ic) = (at.row % b, at.col % b);
        let tw = self.tile_width(at.col / b);
        let th = self.tile_height(at.row / b);
        let inside = match dir {
            Direction::East => (ic + 1 < tw).then(|| offset + 1),
            Direction::South => (ir + 1 < th).then(|| offset + tw),
            Direction::West => (ic > 0).then(|| offset - 1),
            Direction::North => (ir > 0).then(|| offset - tw),
        };
        // Crossing into another tile needs a fresh encode.
        inside.or_else(|| at.step(dir, &self.bounds()).map(|n| self.offset(n)))
    }
}
