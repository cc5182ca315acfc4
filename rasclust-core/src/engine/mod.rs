//! Parallel connected-component engine.
//!
//! # Pipeline
//!
//! 1. The whole grid becomes a [`Basis`].
//! 2. The basis is split recursively while its longer axis exceeds the
//!    granularity; halves are processed with `rayon::join`.
//! 3. Each leaf runs the [serial pass](serial::run) into its own
//!    [`DisjointSet`], and records its bounds as its only seen region.
//! 4. Sibling results are joined bottom-up: the right disjoint set is merged
//!    into the left, then every pair of seen regions that became adjacent is
//!    reconciled by unioning equal cells across the shared edge.
//! 5. The root disjoint set is handed to [`gather`].
//!
//! Tasks own their maps and seen lists exclusively until they are joined, so
//! no locking is involved. The final partition is independent of scheduling
//! order; which cell ends up as a representative is not.

mod builder;
pub mod observer;
mod reduce;
pub mod serial;

pub use builder::ClusterBuilder;
pub use observer::{Counts, CountingObserver, JoinReport, NoopObserver, Observer, TracingObserver};
pub use serial::PassStats;

use tracing::info_span;

use crate::disjoint_set::{CoordMap, DenseMap, DisjointSet, ParentMap, RankMap};
use crate::domain::{Basis, Bounds, Coord};
use crate::error::Result;
use crate::gather::{gather, Clusters};
use crate::indexing::Layout;
use crate::raster::Raster;

use reduce::Context;

/// Default leaf size: leaves stop splitting once their longer axis is at
/// most this many cells.
pub const DEFAULT_GRANULARITY: usize = 1024;

/// How seen regions are matched up at a join.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Reconcile {
    /// Only regions touching the line between the two siblings, matched by a
    /// sorted sweep. Linear in the regions on that line.
    #[default]
    Frontier,
    /// Every region of one sibling against every region of the other.
    /// Quadratic in the number of seen regions; kept as a reference.
    Exhaustive,
}

/// Where the two halves of a split run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Schedule {
    /// `rayon::join`; halves may run on different workers.
    #[default]
    Parallel,
    /// Low half then high half on the calling thread.
    Sequential,
}

/// A configured clustering run. Build one with [`ClusterBuilder`].
#[derive(Debug)]
pub struct Clusterer<O = NoopObserver> {
    granularity: usize,
    reconcile: Reconcile,
    schedule: Schedule,
    pool: Option<rayon::ThreadPool>,
    observer: O,
}

impl<O: Observer> Clusterer<O> {
    /// Leaf granularity.
    #[inline]
    pub fn granularity(&self) -> usize {
        self.granularity
    }

    /// Reconciliation strategy.
    #[inline]
    pub fn reconcile(&self) -> Reconcile {
        self.reconcile
    }

    /// Scheduling mode.
    #[inline]
    pub fn schedule(&self) -> Schedule {
        self.schedule
    }

    /// The injected observer.
    #[inline]
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Clusters the cells of `raster` by equal value.
    ///
    /// # Errors
    ///
    /// Any structural failure aborts the run; no partial clusters are returned.
    pub fn run<L: Layout>(&self, raster: &Raster<L>) -> Result<Clusters> {
        let _span = info_span!(
            "cluster",
            height = raster.height(),
            width = raster.width(),
            granularity = self.granularity
        )
        .entered();

        let equal = |a: Coord, b: Coord| raster.same_value(a, b);
        let mut dset = self.reduce(raster.bounds(), &equal)?;
        let clusters = gather(&mut dset, raster.width(), raster.height())?;
        self.observer.on_gather(&clusters);
        Ok(clusters)
    }

    /// Runs the reduction over `whole` with an arbitrary equality predicate
    /// and returns the root disjoint set over the default hash maps.
    ///
    /// # Errors
    ///
    /// [`DegenerateBounds`](crate::Error::DegenerateBounds) for empty bounds,
    /// or any failure raised while clustering.
    pub fn reduce<F>(&self, whole: Bounds, equal: &F) -> Result<DisjointSet>
    where
        F: Fn(Coord, Coord) -> bool + Sync,
    {
        self.reduce_with::<ParentMap, RankMap, F>(whole, equal)
    }

    /// [`reduce`](Self::reduce) over caller-chosen map types.
    ///
    /// # Errors
    ///
    /// Same as [`reduce`](Self::reduce).
    pub fn reduce_with<P, R, F>(&self, whole: Bounds, equal: &F) -> Result<DisjointSet<P, R>>
    where
        P: CoordMap<Coord> + Default + Send,
        R: CoordMap<u32> + Default + Send,
        F: Fn(Coord, Coord) -> bool + Sync,
    {
        let basis = Basis::new(whole, self.granularity)?;
        let ctx = Context {
            equal,
            observer: &self.observer,
            reconcile: self.reconcile,
            schedule: self.schedule,
        };
        let task = match &self.pool {
            Some(pool) => pool.install(|| reduce::reduce::<P, R, F, O>(basis, &ctx))?,
            None => reduce::reduce::<P, R, F, O>(basis, &ctx)?,
        };
        debug_assert_eq!(task.seen.iter().map(Bounds::area).sum::<usize>(), whole.area());
        Ok(task.dset)
    }
}

/// Clusters `raster` in parallel on the global pool.
///
/// # Errors
///
/// [`InvalidConfig`](crate::Error::InvalidConfig) for a zero granularity, or
/// any failure raised while clustering.
pub fn cluster<L: Layout>(raster: &Raster<L>, granularity: usize) -> Result<Clusters> {
    ClusterBuilder::new()
        .granularity(granularity)
        .build()?
        .run(raster)
}

/// Clusters `raster` with a single serial pass over the whole grid.
///
/// # Errors
///
/// Propagates clustering failures.
pub fn cluster_serial<L: Layout>(raster: &Raster<L>) -> Result<Clusters> {
    let basis = Basis::new(raster.bounds(), usize::MAX)?;
    let mut dset = DisjointSet::new();
    serial::run(&basis, |a, b| raster.same_value(a, b), &mut dset)?;
    gather(&mut dset, raster.width(), raster.height())
}

/// Serial clustering with parent and rank stored in arenas addressed by the
/// raster's own layout.
///
/// # Errors
///
/// Propagates clustering failures.
pub fn cluster_dense<L: Layout>(raster: &Raster<L>) -> Result<Clusters> {
    let basis = Basis::new(raster.bounds(), usize::MAX)?;
    let layout = raster.layout().clone();
    let mut dset = DisjointSet::with_maps(
        DenseMap::<Coord, L>::new(layout.clone()),
        DenseMap::<u32, L>::new(layout),
    );
    serial::run(&basis, |a, b| raster.same_value(a, b), &mut dset)?;
    gather(&mut dset, raster.width(), raster.height())
}
