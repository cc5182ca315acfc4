//! Error types shared by every layer of the crate.
//!
//! All core failures are structural: they indicate that a caller broke a
//! precondition (malformed bounds, an address outside a layout's domain, an
//! incomplete disjoint-set). None of them are retried. A failure aborts the
//! operation in progress and no partial result is returned.

use crate::domain::Coord;
use thiserror::Error;

/// Result alias used throughout `rasclust-core`.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors surfaced by clustering, indexing, ingestion and synthesis.
#[derive(Debug, Error)]
pub enum Error {
    /// Bounds with zero or negative extent along either axis.
    #[error("degenerate bounds: rows [{}, {}) x cols [{}, {})", rows.0, rows.1, cols.0, cols.1)]
    DegenerateBounds {
        /// Half-open row range as `(lo, hi)`.
        rows: (usize, usize),
        /// Half-open column range as `(lo, hi)`.
        cols: (usize, usize),
    },

    /// A coordinate outside the declared `height x width` domain of a layout.
    #[error("coordinate {coord} outside {height}x{width} domain")]
    DomainRange {
        /// Offending coordinate.
        coord: Coord,
        /// Declared domain height.
        height: usize,
        /// Declared domain width.
        width: usize,
    },

    /// A linear offset that does not decode to any coordinate of a layout.
    #[error("offset {offset} outside layout capacity {capacity}")]
    OffsetRange {
        /// Offending offset.
        offset: usize,
        /// Layout capacity.
        capacity: usize,
    },

    /// `find` was asked about a coordinate that was never made into a set.
    #[error("no disjoint-set entry for {coord}")]
    MissingSetEntry {
        /// Coordinate without a parent entry.
        coord: Coord,
    },

    /// The synthetic generator cannot place every value in the grid.
    #[error("cannot realize {values} distinct values in {cells} cells")]
    Capacity {
        /// Requested number of distinct values.
        values: usize,
        /// Cells available.
        cells: usize,
    },

    /// An ingested buffer does not match the declared dimensions.
    #[error("buffer holds {actual} cells, expected {expected}")]
    ShapeMismatch {
        /// `height * width`.
        expected: usize,
        /// Length actually supplied.
        actual: usize,
    },

    /// Builder validation failure.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),

    /// A dedicated worker pool could not be created.
    #[error("failed to build worker pool")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// Failure reading a grid from a collaborator source.
    #[error("grid ingestion failed")]
    Io(#[from] std::io::Error),
}
