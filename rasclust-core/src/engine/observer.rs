//! Diagnostics hooks for the reduce engine.
//!
//! The engine itself never logs. Callers that want visibility inject an
//! [`Observer`]; hooks may be called from several worker threads at once.

use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::{debug, trace};

use super::serial::PassStats;
use crate::domain::Bounds;
use crate::gather::Clusters;

/// What one join did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoinReport {
    /// Hull of the merged task.
    pub bounds: Bounds,
    /// Seen regions carried by the receiving task before the join.
    pub regions_left: usize,
    /// Seen regions carried by the absorbed task.
    pub regions_right: usize,
    /// Region pairs found edge-adjacent.
    pub edges: usize,
    /// Straddling coordinate pairs compared.
    pub pairs: usize,
    /// Comparisons that joined two distinct sets.
    pub unions: usize,
}

/// Callbacks fired while clustering. Every hook defaults to a no-op.
pub trait Observer: Sync {
    /// A partition was split into `lo` and `hi`.
    fn on_split(&self, _parent: Bounds, _lo: Bounds, _hi: Bounds) {}

    /// A leaf finished its serial pass.
    fn on_leaf(&self, _bounds: Bounds, _stats: &PassStats) {}

    /// Two sibling tasks were joined.
    fn on_join(&self, _report: &JoinReport) {}

    /// Clusters were extracted from the final disjoint set.
    fn on_gather(&self, _clusters: &Clusters) {}
}

/// Ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl Observer for NoopObserver {}

/// Forwards events to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn on_split(&self, parent: Bounds, lo: Bounds, hi: Bounds) {
        trace!(?parent, ?lo, ?hi, "split");
    }

    fn on_leaf(&self, bounds: Bounds, stats: &PassStats) {
        trace!(?bounds, vertices = stats.vertices, unions = stats.unions, "leaf done");
    }

    fn on_join(&self, report: &JoinReport) {
        debug!(
            bounds = ?report.bounds,
            regions_left = report.regions_left,
            regions_right = report.regions_right,
            edges = report.edges,
            pairs = report.pairs,
            unions = report.unions,
            "join"
        );
    }

    fn on_gather(&self, clusters: &Clusters) {
        debug!(clusters = clusters.len(), "gathered");
    }
}

/// Snapshot of a [`CountingObserver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Counts {
    /// Splits performed.
    pub splits: usize,
    /// Leaves processed.
    pub leaves: usize,
    /// Joins performed.
    pub joins: usize,
    /// Boundary pairs compared across all joins.
    pub boundary_pairs: usize,
    /// Unions made by leaves and joins together.
    pub unions: usize,
}

/// Thread-safe event counters.
#[derive(Debug, Default)]
pub struct CountingObserver {
    splits: AtomicUsize,
    leaves: AtomicUsize,
    joins: AtomicUsize,
    boundary_pairs: AtomicUsize,
    unions: AtomicUsize,
}

impl CountingObserver {
    /// Fresh counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current totals.
    pub fn counts(&self) -> Counts {
        Counts {
            splits: self.splits.load(Ordering::Relaxed),
            leaves: self.leaves.load(Ordering::Relaxed),
            joins: self.joins.load(Ordering::Relaxed),
            boundary_pairs: self.boundary_pairs.load(Ordering::Relaxed),
            unions: self.unions.load(Ordering::Relaxed),
        }
    }
}

impl Observer for CountingObserver {
    fn on_split(&self, _parent: Bounds, _lo: Bounds, _hi: Bounds) {
        self.splits.fetch_add(1, Ordering::Relaxed);
    }

    fn on_leaf(&self, _bounds: Bounds, stats: &PassStats) {
        self.leaves.fetch_add(1, Ordering::Relaxed);
        self.unions.fetch_add(stats.unions, Ordering::Relaxed);
    }

    fn on_join(&self, report: &JoinReport) {
        self.joins.fetch_add(1, Ordering::Relaxed);
        self.boundary_pairs.fetch_add(report.pairs, Ordering::Relaxed);
        self.unions.fetch_add(report.unions, Ordering::Relaxed);
    }
}

impl<O: Observer + ?Sized> Observer for &O {
    fn on_split(&self, parent: Bounds, lo: Bounds, hi: Bounds) {
        (**self).on_split(parent, lo, hi);
    }

    fn on_leaf(&self, bounds: Bounds, stats: &PassStats) {
        (**self).on_leaf(bounds, stats);
    }

    fn on_join(&self, report: &JoinReport) {
        (**self).on_join(report);
    }

    fn on_gather(&self, clusters: &Clusters) {
        (**self).on_gather(clusters);
    }
}
