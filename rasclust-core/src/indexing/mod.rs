//! Storage addressing: bijections from grid coordinates to linear offsets.
//!
//! Three layouts are provided:
//!
//! - [`RowMajor`] - `row * width + col`
//! - [`Blocked`] - square tiles in row-major tile order, row-major inside a
//!   tile, with partial edge tiles packed densely
//! - [`Morton`] - Z-order bit interleaving with carry-safe neighbor steps
//!
//! Every layout round-trips: `coord(offset(c)) == c` for each `c` in its
//! domain, and `offset` is injective there. Backing storage ([`GridStore`])
//! is allocated once to the layout's capacity and never grows; addressing
//! outside the domain is a [`DomainRange`](crate::Error::DomainRange) error.

mod blocked;
pub mod morton;
mod row_major;

pub use blocked::Blocked;
pub use morton::{add_interleaved, detangle, interleave, Morton};
pub use row_major::RowMajor;

use crate::domain::{Bounds, Coord, Direction};
use crate::error::{Error, Result};

/// A coordinate-to-offset addressing scheme over a fixed `height x width` domain.
///
/// [`offset`](Self::offset) and [`coord`](Self::coord) are the unchecked hot
/// path; callers guarantee the argument lies in the domain. The checked
/// [`encode`](Self::encode) / [`decode`](Self::decode) pair validates first.
pub trait Layout: Clone + Send + Sync {
    /// Domain height.
    fn height(&self) -> usize;

    /// Domain width.
    fn width(&self) -> usize;

    /// Number of storage slots needed; at least `height * width`.
    fn capacity(&self) -> usize;

    /// Offset of an in-domain coordinate.
    fn offset(&self, c: Coord) -> usize;

    /// Coordinate stored at an offset produced by [`offset`](Self::offset).
    fn coord(&self, offset: usize) -> Coord;

    /// Domain as bounds anchored at the origin.
    #[inline]
    fn bounds(&self) -> Bounds {
        Bounds::origin(self.height(), self.width())
    }

    /// Whether `c` is inside the domain.
    #[inline]
    fn contains(&self, c: Coord) -> bool {
        c.row < self.height() && c.col < self.width()
    }

    /// Checked [`offset`](Self::offset).
    ///
    /// # Errors
    ///
    /// [`Error::DomainRange`] if `c` is outside the domain.
    #[inline]
    fn encode(&self, c: Coord) -> Result<usize> {
        if !self.contains(c) {
            return Err(Error::DomainRange {
                coord: c,
                height: self.height(),
                width: self.width(),
            });
        }
        Ok(self.offset(c))
    }

    /// Checked [`coord`](Self::coord).
    ///
    /// # Errors
    ///
    /// [`Error::OffsetRange`] if `offset` is past the capacity or does not
    /// correspond to an in-domain coordinate.
    #[inline]
    fn decode(&self, offset: usize) -> Result<Coord> {
        let out_of_range = Error::OffsetRange {
            offset,
            capacity: self.capacity(),
        };
        if offset >= self.capacity() {
            return Err(out_of_range);
        }
        let c = self.coord(offset);
        if !self.contains(c) {
            return Err(out_of_range);
        }
        Ok(c)
    }

    /// Offset of the neighbor of `at` (whose offset is `offset`) in `dir`,
    /// or `None` if that neighbor is outside the domain.
    ///
    /// The default re-encodes; layouts override it with offset arithmetic.
    #[inline]
    fn neighbor(&self, _offset: usize, at: Coord, dir: Direction) -> Option<usize> {
        at.step(dir, &self.bounds()).map(|n| self.offset(n))
    }
}

/// Fixed-capacity storage addressed through a [`Layout`].
#[derive(Debug, Clone)]
pub struct GridStore<T, L: Layout> {
    layout: L,
    slots: Vec<T>,
}

impl<T: Clone, L: Layout> GridStore<T, L> {
    /// Allocates `layout.capacity()` slots filled with `fill`.
    pub fn new(layout: L, fill: T) -> Self {
        let slots = vec![fill; layout.capacity()];
        Self { layout, slots }
    }
}

impl<T, L: Layout> GridStore<T, L> {
    /// Adopts slots already in storage order. Caller guarantees
    /// `slots.len() == layout.capacity()`.
    pub(crate) fn from_slots(layout: L, slots: Vec<T>) -> Self {
        debug_assert_eq!(slots.len(), layout.capacity());
        Self { layout, slots }
    }

    /// Addressing scheme.
    #[inline]
    pub fn layout(&self) -> &L {
        &self.layout
    }

    /// Checked read.
    ///
    /// # Errors
    ///
    /// [`Error::DomainRange`] if `c` is outside the layout's domain.
    #[inline]
    pub fn get(&self, c: Coord) -> Result<&T> {
        let offset = self.layout.encode(c)?;
        Ok(&self.slots[offset])
    }

    /// Checked mutable access.
    ///
    /// # Errors
    ///
    /// [`Error::DomainRange`] if `c` is outside the layout's domain.
    #[inline]
    pub fn get_mut(&mut self, c: Coord) -> Result<&mut T> {
        let offset = self.layout.encode(c)?;
        Ok(&mut self.slots[offset])
    }

    /// Checked write.
    ///
    /// # Errors
    ///
    /// [`Error::DomainRange`] if `c` is outside the layout's domain.
    #[inline]
    pub fn set(&mut self, c: Coord, value: T) -> Result<()> {
        *self.get_mut(c)? = value;
        Ok(())
    }

    /// Slot at a raw offset. Panics if `offset >= capacity`.
    #[inline]
    pub fn at(&self, offset: usize) -> &T {
        &self.slots[offset]
    }

    /// Raw slots in storage order, holes included.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.slots
    }
}
