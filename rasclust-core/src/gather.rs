//! Cluster extraction from a finished disjoint set.

use rustc_hash::FxHashMap;

use crate::disjoint_set::{CoordMap, DisjointSet};
use crate::domain::Coord;
use crate::error::Result;

/// Cells sharing one representative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cluster {
    /// Set representative at extraction time.
    pub representative: Coord,
    /// Member cells in row-major discovery order.
    pub members: Vec<Coord>,
}

impl Cluster {
    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Never true for clusters produced by [`gather`].
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Every cluster of a grid, ordered by first-seen representative.
///
/// The order carries no meaning beyond determinism for a fixed disjoint set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Clusters {
    clusters: Vec<Cluster>,
}

impl Clusters {
    /// Number of clusters.
    #[inline]
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    /// True for an empty collection.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// Iterates clusters in extraction order.
    pub fn iter(&self) -> core::slice::Iter<'_, Cluster> {
        self.clusters.iter()
    }

    /// Cluster sizes in extraction order.
    pub fn sizes(&self) -> Vec<usize> {
        self.clusters.iter().map(Cluster::len).collect()
    }

    /// Total cells across all clusters.
    pub fn cell_count(&self) -> usize {
        self.clusters.iter().map(Cluster::len).sum()
    }

    /// Canonical form of the partition: members sorted within each cluster,
    /// clusters sorted by their smallest member. Two runs grouping the same
    /// cells compare equal even if their representatives differ.
    pub fn normalized(&self) -> Vec<Vec<Coord>> {
        let mut out: Vec<Vec<Coord>> = self
            .clusters
            .iter()
            .map(|c| {
                let mut members = c.members.clone();
                members.sort_unstable();
                members
            })
            .collect();
        out.sort_unstable_by(|a, b| a.first().cmp(&b.first()));
        out
    }

    /// Export as a sequence of coordinate sequences.
    pub fn to_nested(&self) -> Vec<Vec<Coord>> {
        self.clusters.iter().map(|c| c.members.clone()).collect()
    }

    /// Edge-oriented export: one `(representative, member)` pair per cell.
    pub fn edges(&self) -> Vec<(Coord, Coord)> {
        self.clusters
            .iter()
            .flat_map(|c| c.members.iter().map(move |&m| (c.representative, m)))
            .collect()
    }
}

impl<'a> IntoIterator for &'a Clusters {
    type Item = &'a Cluster;
    type IntoIter = core::slice::Iter<'a, Cluster>;

    fn into_iter(self) -> Self::IntoIter {
        self.clusters.iter()
    }
}

impl IntoIterator for Clusters {
    type Item = Cluster;
    type IntoIter = std::vec::IntoIter<Cluster>;

    fn into_iter(self) -> Self::IntoIter {
        self.clusters.into_iter()
    }
}

/// Groups every cell of `[0, height) x [0, width)` by its representative.
///
/// # Errors
///
/// [`MissingSetEntry`](crate::Error::MissingSetEntry) if some cell was never
/// made, meaning the reduction did not cover the whole grid.
pub fn gather<P, R>(dset: &mut DisjointSet<P, R>, width: usize, height: usize) -> Result<Clusters>
where
    P: CoordMap<Coord>,
    R: CoordMap<u32>,
{
    let mut index: FxHashMap<Coord, usize> = FxHashMap::default();
    let mut clusters: Vec<Cluster> = Vec::new();
    for row in 0..height {
        for col in 0..width {
            let c = Coord::new(row, col);
            let rep = dset.find(c)?;
            let slot = *index.entry(rep).or_insert_with(|| {
                clusters.push(Cluster {
                    representative: rep,
                    members: Vec::new(),
                });
                clusters.len() - 1
            });
            clusters[slot].members.push(c);
        }
    }
    Ok(Clusters { clusters })
}
