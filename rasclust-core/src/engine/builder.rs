//! Builder for [`Clusterer`] configuration.
//!
//! # Example
//!
//! ```
//! use rasclust_core::{ClusterBuilder, CountingObserver, Raster, Reconcile};
//!
//! let raster = Raster::from_row_major(vec![0, 0, 1, 0, 0, 1], 2, 3).unwrap();
//! let clusterer = ClusterBuilder::new()
//!     .granularity(1)
//!     .reconcile(Reconcile::Exhaustive)
//!     .observer(CountingObserver::new())
//!     .build()
//!     .unwrap();
//!
//! let clusters = clusterer.run(&raster).unwrap();
//! assert_eq!(clusters.len(), 2);
//! assert!(clusterer.observer().counts().joins > 0);
//! ```

use super::{Clusterer, NoopObserver, Observer, Reconcile, Schedule, DEFAULT_GRANULARITY};
use crate::error::{Error, Result};

/// Builder for [`Clusterer`].
///
/// Defaults: granularity [`DEFAULT_GRANULARITY`], frontier reconciliation,
/// parallel schedule on the global rayon pool, no observer.
#[derive(Debug, Clone)]
pub struct ClusterBuilder<O = NoopObserver> {
    granularity: usize,
    reconcile: Reconcile,
    schedule: Schedule,
    threads: Option<usize>,
    observer: O,
}

impl ClusterBuilder<NoopObserver> {
    /// Creates a builder with default settings.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            granularity: DEFAULT_GRANULARITY,
            reconcile: Reconcile::Frontier,
            schedule: Schedule::Parallel,
            threads: None,
            observer: NoopObserver,
        }
    }
}

impl Default for ClusterBuilder<NoopObserver> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: Observer> ClusterBuilder<O> {
    /// Longest leaf axis, in cells. `1` splits down to single cells;
    /// anything at least as large as the grid's longer side gives one leaf.
    #[must_use]
    pub fn granularity(mut self, granularity: usize) -> Self {
        self.granularity = granularity;
        self
    }

    /// Boundary reconciliation strategy.
    #[must_use]
    pub fn reconcile(mut self, reconcile: Reconcile) -> Self {
        self.reconcile = reconcile;
        self
    }

    /// Parallel or sequential execution of split halves.
    #[must_use]
    pub fn schedule(mut self, schedule: Schedule) -> Self {
        self.schedule = schedule;
        self
    }

    /// Runs on a dedicated pool of `threads` workers instead of the global pool.
    #[must_use]
    pub fn threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    /// Replaces the observer.
    #[must_use]
    pub fn observer<N: Observer>(self, observer: N) -> ClusterBuilder<N> {
        ClusterBuilder {
            granularity: self.granularity,
            reconcile: self.reconcile,
            schedule: self.schedule,
            threads: self.threads,
            observer,
        }
    }

    /// Validates the configuration and creates the clusterer.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidConfig`] for a zero granularity or zero threads.
    /// * [`Error::ThreadPool`] if the dedicated pool cannot be started.
    pub fn build(self) -> Result<Clusterer<O>> {
        if self.granularity == 0 {
            return Err(Error::InvalidConfig("granularity must be at least 1"));
        }
        let pool = match self.threads {
            Some(0) => return Err(Error::InvalidConfig("thread count must be at least 1")),
            Some(n) => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .thread_name(|i| format!("rasclust-{i}"))
                    .build()?,
            ),
            None => None,
        };
        Ok(Clusterer {
            granularity: self.granularity,
            reconcile: self.reconcile,
            schedule: self.schedule,
            pool,
            observer: self.observer,
        })
    }
}
