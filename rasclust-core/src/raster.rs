//! Immutable `u8` land-use grids and raw-buffer ingestion.
//!
//! A [`Raster`] stores its cells through any [`Layout`], so the same grid can
//! be clustered under row-major, blocked or Morton addressing. The grid is
//! never mutated after construction.

use std::io::Read;

use crate::domain::{Bounds, Coord, Direction};
use crate::error::{Error, Result};
use crate::indexing::{GridStore, Layout, RowMajor};

/// Order in which a source stores its rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowOrder {
    /// First stored row is row 0.
    #[default]
    TopDown,
    /// First stored row is the last grid row (PPM-style sources).
    BottomUp,
}

/// A `height x width` grid of cell values.
#[derive(Debug, Clone)]
pub struct Raster<L: Layout = RowMajor> {
    store: GridStore<u8, L>,
}

impl Raster<RowMajor> {
    /// Wraps a dense row-major buffer.
    ///
    /// # Errors
    ///
    /// * [`Error::DegenerateBounds`] if either dimension is zero.
    /// * [`Error::ShapeMismatch`] if `values.len() != height * width`.
    pub fn from_row_major(values: Vec<u8>, height: usize, width: usize) -> Result<Self> {
        let layout = RowMajor::new(height, width)?;
        if values.len() != layout.capacity() {
            return Err(Error::ShapeMismatch {
                expected: layout.capacity(),
                actual: values.len(),
            });
        }
        Ok(Self {
            store: GridStore::from_slots(layout, values),
        })
    }

    /// Reads exactly `height * width` bytes from `reader`.
    ///
    /// Bottom-up sources are flipped so that row 0 is the top row.
    ///
    /// # Errors
    ///
    /// * [`Error::Io`] if the reader fails or ends early.
    /// * [`Error::DegenerateBounds`] if either dimension is zero.
    pub fn read_raw<R: Read>(
        mut reader: R,
        height: usize,
        width: usize,
        order: RowOrder,
    ) -> Result<Self> {
        let layout = RowMajor::new(height, width)?;
        let mut values = vec![0u8; layout.capacity()];
        reader.read_exact(&mut values)?;
        if order == RowOrder::BottomUp {
            flip_rows(&mut values, width);
        }
        Self::from_row_major(values, height, width)
    }
}

impl<L: Layout> Raster<L> {
    /// Lays a row-major buffer out through `layout`.
    ///
    /// # Errors
    ///
    /// [`Error::ShapeMismatch`] if `values` does not cover the layout's domain.
    pub fn with_layout(values: &[u8], layout: L) -> Result<Self> {
        let expected = layout.height() * layout.width();
        if values.len() != expected {
            return Err(Error::ShapeMismatch {
                expected,
                actual: values.len(),
            });
        }
        let width = layout.width();
        let mut store = GridStore::new(layout, 0u8);
        for (i, &v) in values.iter().enumerate() {
            store.set(Coord::new(i / width, i % width), v)?;
        }
        Ok(Self { store })
    }

    /// Copies the grid into another layout of the same dimensions.
    ///
    /// # Errors
    ///
    /// [`Error::ShapeMismatch`] if the layout's domain differs in size.
    pub fn relayout<M: Layout>(&self, layout: M) -> Result<Raster<M>> {
        if layout.height() != self.height() || layout.width() != self.width() {
            return Err(Error::ShapeMismatch {
                expected: self.height() * self.width(),
                actual: layout.height() * layout.width(),
            });
        }
        Raster::with_layout(&self.to_row_major(), layout)
    }

    /// Addressing scheme.
    #[inline]
    pub fn layout(&self) -> &L {
        self.store.layout()
    }

    /// Number of rows.
    #[inline]
    pub fn height(&self) -> usize {
        self.store.layout().height()
    }

    /// Number of columns.
    #[inline]
    pub fn width(&self) -> usize {
        self.store.layout().width()
    }

    /// Whole-grid bounds.
    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.store.layout().bounds()
    }

    /// Value at an in-domain coordinate. Panics only if `c` maps past the
    /// backing storage.
    #[inline(always)]
    pub fn value(&self, c: Coord) -> u8 {
        debug_assert!(self.layout().contains(c), "{c} outside raster");
        *self.store.at(self.store.layout().offset(c))
    }

    /// Checked value lookup.
    ///
    /// # Errors
    ///
    /// [`Error::DomainRange`] if `c` is outside the grid.
    #[inline]
    pub fn get(&self, c: Coord) -> Result<u8> {
        self.store.get(c).copied()
    }

    /// Equality predicate used for clustering.
    #[inline(always)]
    pub fn same_value(&self, a: Coord, b: Coord) -> bool {
        self.value(a) == self.value(b)
    }

    /// Value of the neighbor of `c` in `dir`, stepped in storage space.
    #[inline]
    pub fn neighbor_value(&self, c: Coord, dir: Direction) -> Option<u8> {
        let layout = self.store.layout();
        let offset = layout.neighbor(layout.offset(c), c, dir)?;
        Some(*self.store.at(offset))
    }

    /// Counts east and south neighbor pairs holding equal values.
    ///
    /// Walks the grid in storage order using the layout's neighbor stepping,
    /// which makes it a direct probe of each layout's locality.
    pub fn count_equal_edges(&self) -> usize {
        let layout = self.store.layout();
        let mut count = 0;
        for offset in 0..layout.capacity() {
            let Ok(c) = layout.decode(offset) else {
                continue;
            };
            let v = *self.store.at(offset);
            for dir in [Direction::East, Direction::South] {
                if let Some(n) = layout.neighbor(offset, c, dir) {
                    count += usize::from(*self.store.at(n) == v);
                }
            }
        }
        count
    }

    /// Distinct values present, ascending.
    pub fn unique_values(&self) -> Vec<u8> {
        let mut present = [false; 256];
        for row in 0..self.height() {
            for col in 0..self.width() {
                present[usize::from(self.value(Coord::new(row, col)))] = true;
            }
        }
        (0..=u8::MAX).filter(|&v| present[usize::from(v)]).collect()
    }

    /// Cells in row-major order.
    pub fn to_row_major(&self) -> Vec<u8> {
        let (h, w) = (self.height(), self.width());
        let mut out = Vec::with_capacity(h * w);
        for row in 0..h {
            for col in 0..w {
                out.push(self.value(Coord::new(row, col)));
            }
        }
        out
    }
}

/// Reverses the row order of a row-major buffer in place.
pub fn flip_rows(values: &mut [u8], width: usize) {
    if width == 0 {
        return;
    }
    let height = values.len() / width;
    for top in 0..height / 2 {
        let bottom = height - 1 - top;
        let (head, tail) = values.split_at_mut(bottom * width);
        head[top * width..(top + 1) * width].swap_with_slice(&mut tail[..width]);
    }
}
