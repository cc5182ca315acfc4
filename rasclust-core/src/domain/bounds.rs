use core::ops::Range;

use super::Coord;
use crate::error::{Error, Result};

/// Axis along which a rectangle is cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Cut across rows: the halves are stacked vertically.
    Rows,
    /// Cut across columns: the halves sit side by side.
    Cols,
}

/// A half-open rectangle `[row_lo, row_hi) x [col_lo, col_hi)`.
///
/// Non-empty bounds always have positive extent on both axes. The only
/// zero-extent value is [`Bounds::empty`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bounds {
    row_lo: usize,
    row_hi: usize,
    col_lo: usize,
    col_hi: usize,
}

impl Bounds {
    /// Builds bounds from half-open row and column ranges.
    ///
    /// # Errors
    ///
    /// [`Error::DegenerateBounds`] if either range is empty or reversed.
    pub fn new(rows: Range<usize>, cols: Range<usize>) -> Result<Self> {
        if rows.end <= rows.start || cols.end <= cols.start {
            return Err(Error::DegenerateBounds {
                rows: (rows.start, rows.end),
                cols: (cols.start, cols.end),
            });
        }
        Ok(Self {
            row_lo: rows.start,
            row_hi: rows.end,
            col_lo: cols.start,
            col_hi: cols.end,
        })
    }

    /// Bounds of a whole `height x width` grid anchored at the origin.
    ///
    /// # Errors
    ///
    /// [`Error::DegenerateBounds`] if either dimension is zero.
    pub fn grid(height: usize, width: usize) -> Result<Self> {
        Self::new(0..height, 0..width)
    }

    /// `[0, height) x [0, width)` for dimensions a caller already validated.
    pub(crate) const fn origin(height: usize, width: usize) -> Self {
        Self {
            row_lo: 0,
            row_hi: height,
            col_lo: 0,
            col_hi: width,
        }
    }

    /// The explicitly empty rectangle.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            row_lo: 0,
            row_hi: 0,
            col_lo: 0,
            col_hi: 0,
        }
    }

    /// True only for [`Bounds::empty`].
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.row_hi <= self.row_lo || self.col_hi <= self.col_lo
    }

    /// Row range.
    #[inline]
    #[must_use]
    pub const fn rows(&self) -> Range<usize> {
        self.row_lo..self.row_hi
    }

    /// Column range.
    #[inline]
    #[must_use]
    pub const fn cols(&self) -> Range<usize> {
        self.col_lo..self.col_hi
    }

    /// Number of rows.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> usize {
        self.row_hi.saturating_sub(self.row_lo)
    }

    /// Number of columns.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> usize {
        self.col_hi.saturating_sub(self.col_lo)
    }

    /// Number of cells.
    #[inline]
    #[must_use]
    pub const fn area(&self) -> usize {
        self.height() * self.width()
    }

    /// Extent of the longer axis.
    #[inline]
    #[must_use]
    pub const fn longer_extent(&self) -> usize {
        let (h, w) = (self.height(), self.width());
        if h >= w {
            h
        } else {
            w
        }
    }

    /// Whether `c` lies inside the rectangle.
    #[inline]
    #[must_use]
    pub const fn contains(&self, c: Coord) -> bool {
        c.row >= self.row_lo && c.row < self.row_hi && c.col >= self.col_lo && c.col < self.col_hi
    }

    /// Halves the rectangle along its longer axis, rows winning ties.
    ///
    /// The low half keeps `[lo, lo + extent / 2)`. Returns `None` for a
    /// single cell (or the empty rectangle), which cannot be cut.
    #[must_use]
    pub fn bisect(&self) -> Option<(Axis, Bounds, Bounds)> {
        let axis = if self.height() >= self.width() {
            Axis::Rows
        } else {
            Axis::Cols
        };
        let extent = self.longer_extent();
        if extent < 2 {
            return None;
        }
        match axis {
            Axis::Rows => {
                let mid = self.row_lo + extent / 2;
                let lo = Bounds { row_hi: mid, ..*self };
                let hi = Bounds { row_lo: mid, ..*self };
                Some((axis, lo, hi))
            }
            Axis::Cols => {
                let mid = self.col_lo + extent / 2;
                let lo = Bounds { col_hi: mid, ..*self };
                let hi = Bounds { col_lo: mid, ..*self };
                Some((axis, lo, hi))
            }
        }
    }

    /// Smallest rectangle containing both. The empty rectangle is the identity.
    #[must_use]
    pub fn hull(&self, other: &Bounds) -> Bounds {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        Bounds {
            row_lo: self.row_lo.min(other.row_lo),
            row_hi: self.row_hi.max(other.row_hi),
            col_lo: self.col_lo.min(other.col_lo),
            col_hi: self.col_hi.max(other.col_hi),
        }
    }

    /// The boundary shared with `other`, if the two rectangles are
    /// edge-adjacent with a positive overlap.
    ///
    /// Touching only at a corner, overlapping, or being apart all give `None`.
    #[must_use]
    pub fn shared_edge(&self, other: &Bounds) -> Option<SharedEdge> {
        if self.is_empty() || other.is_empty() {
            return None;
        }
        if self.col_hi == other.col_lo || other.col_hi == self.col_lo {
            let line = if self.col_hi == other.col_lo {
                self.col_hi
            } else {
                self.col_lo
            };
            let lo = self.row_lo.max(other.row_lo);
            let hi = self.row_hi.min(other.row_hi);
            if lo < hi {
                return Some(SharedEdge {
                    kind: EdgeKind::Vertical,
                    line,
                    span_lo: lo,
                    span_hi: hi,
                });
            }
        }
        if self.row_hi == other.row_lo || other.row_hi == self.row_lo {
            let line = if self.row_hi == other.row_lo {
                self.row_hi
            } else {
                self.row_lo
            };
            let lo = self.col_lo.max(other.col_lo);
            let hi = self.col_hi.min(other.col_hi);
            if lo < hi {
                return Some(SharedEdge {
                    kind: EdgeKind::Horizontal,
                    line,
                    span_lo: lo,
                    span_hi: hi,
                });
            }
        }
        None
    }
}

/// Orientation of a [`SharedEdge`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    /// The regions sit side by side; the edge runs down a column line.
    Vertical,
    /// The regions are stacked; the edge runs along a row line.
    Horizontal,
}

/// The exact boundary between two edge-adjacent rectangles.
///
/// `line` is the first row (horizontal) or column (vertical) of the
/// lower/right region. `span` is the overlap on the other axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SharedEdge {
    /// Orientation.
    pub kind: EdgeKind,
    /// Row or column index where the lower/right region begins.
    pub line: usize,
    span_lo: usize,
    span_hi: usize,
}

impl SharedEdge {
    /// Overlap along the edge.
    #[inline]
    #[must_use]
    pub const fn span(&self) -> Range<usize> {
        self.span_lo..self.span_hi
    }

    /// Number of straddling pairs.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.span_hi - self.span_lo
    }

    /// Always false for edges built by [`Bounds::shared_edge`].
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.span_hi <= self.span_lo
    }

    /// Straddling pairs as `(upper_or_left, lower_or_right)`.
    pub fn pairs(&self) -> impl ExactSizeIterator<Item = (Coord, Coord)> + '_ {
        let line = self.line;
        let kind = self.kind;
        self.span().map(move |i| match kind {
            EdgeKind::Vertical => (Coord::new(i, line - 1), Coord::new(i, line)),
            EdgeKind::Horizontal => (Coord::new(line - 1, i), Coord::new(line, i)),
        })
    }
}
