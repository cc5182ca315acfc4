//! Single-threaded scan-line union-find over one partition.

use crate::disjoint_set::{CoordMap, DisjointSet};
use crate::domain::{Basis, Coord};
use crate::error::Result;

/// Counters produced by one [`run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PassStats {
    /// Vertices made into sets.
    pub vertices: usize,
    /// Unions that joined two distinct sets.
    pub unions: usize,
}

/// Clusters the vertices of `basis` into `dset`.
///
/// Vertices are visited row-major. Each is made into a singleton, then
/// unioned with every neighbor that is already present in `dset` and equal
/// under `equal(neighbor, vertex)`. Within a fresh partition the present
/// neighbors are exactly west and north; east and south are picked up when
/// those cells are visited. Neighbors in sibling partitions are left to
/// boundary reconciliation.
///
/// # Errors
///
/// Propagates disjoint-set storage failures.
pub fn run<P, R, F>(basis: &Basis, equal: F, dset: &mut DisjointSet<P, R>) -> Result<PassStats>
where
    P: CoordMap<Coord>,
    R: CoordMap<u32>,
    F: Fn(Coord, Coord) -> bool,
{
    let mut stats = PassStats::default();
    for v in basis.vertices() {
        dset.make_set(v)?;
        stats.vertices += 1;
        for n in basis.neighbors(v) {
            if dset.contains(n) && equal(n, v) && dset.union(n, v)? {
                stats.unions += 1;
            }
        }
    }
    Ok(stats)
}
