//! # rasclust-core: Parallel Connected Components for Land-Use Rasters
//!
//! `rasclust-core` finds clusters, maximal 4-connected regions of equal-valued
//! cells, in 2D grids with hundreds of millions of cells.
//!
//! ## Overview
//!
//! 1. **Partition** - the whole grid is a [`Basis`] that is bisected along its
//!    longer axis until partitions reach the configured granularity
//! 2. **Cluster leaves** - each partition runs a scan-line union-find pass
//!    into its own [`DisjointSet`]
//! 3. **Join** - sibling results are merged bottom-up with `rayon::join`,
//!    unioning equal cells across every boundary that became shared
//! 4. **Extract** - [`gather`] groups every cell by representative
//!
//! Grids are stored through a [`Layout`]: row-major, blocked tiles, or Morton
//! (Z-order). All three are bijections over their domain, so clustering is
//! identical whichever one a raster uses.
//!
//! ## Quick Start
//!
//! ```
//! use rasclust_core::{synthetic, ClusterBuilder};
//!
//! let raster = synthetic::checkerboard(100, 100, 0..25).unwrap();
//! let clusters = ClusterBuilder::new()
//!     .granularity(16)
//!     .build()
//!     .unwrap()
//!     .run(&raster)
//!     .unwrap();
//!
//! assert_eq!(clusters.len(), 25);
//! assert_eq!(clusters.cell_count(), 10_000);
//! ```
//!
//! ## Module Organization
//!
//! - [`domain`] - coordinates, bounds and the splittable basis
//! - [`indexing`] - storage layouts and fixed-capacity grid storage
//! - [`raster`] - immutable value grids and raw ingestion
//! - [`disjoint_set`] - union-find over pluggable coordinate maps
//! - [`engine`] - serial pass, fork-join reduction and observers
//! - [`gather`] - cluster extraction and export
//! - [`synthetic`] - generated grids for tests and benchmarks

#![deny(missing_docs)]

// =============================================================================
// Module Declarations
// =============================================================================

/// Union-find over grid coordinates.
pub mod disjoint_set;

/// Coordinates, rectangles and the recursively splittable basis.
pub mod domain;

/// Serial pass, parallel reduce engine, observers and configuration.
pub mod engine;

/// Crate-wide error type.
pub mod error;

/// Cluster extraction and export formats.
pub mod gather;

/// Row-major, blocked and Morton storage layouts.
pub mod indexing;

/// Immutable cell-value grids.
pub mod raster;

/// Synthetic grid generation.
pub mod synthetic;

// =============================================================================
// Convenience Re-exports (Clean Public API)
// =============================================================================

// Errors
pub use error::{Error, Result};

// Domain
pub use domain::{Basis, Bounds, Coord, Direction, EdgeKind, SharedEdge};

// Storage
pub use indexing::{Blocked, GridStore, Layout, Morton, RowMajor};
pub use raster::{flip_rows, Raster, RowOrder};

// Union-find
pub use disjoint_set::{CoordMap, DenseMap, DisjointSet};

// Engine
pub use engine::{
    cluster, cluster_dense, cluster_serial, ClusterBuilder, Clusterer, Counts, CountingObserver,
    JoinReport, NoopObserver, Observer, PassStats, Reconcile, Schedule, TracingObserver,
    DEFAULT_GRANULARITY,
};

// Extraction
pub use gather::{gather, Cluster, Clusters};
