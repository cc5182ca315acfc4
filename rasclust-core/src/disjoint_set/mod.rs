//! Union-find over grid coordinates.
//!
//! [`DisjointSet`] keeps two coordinate-keyed tables, parent and rank, behind
//! the [`CoordMap`] trait so the backing store can be swapped:
//!
//! - `FxHashMap` (default) - cheap to create per partition and to merge
//! - `BTreeMap` - deterministic iteration, handy in tests
//! - [`DenseMap`] - arena sized to the whole grid, no hashing
//!
//! # Algorithm
//!
//! `find` uses two-pass full path compression: walk to the root, then repoint
//! every visited node straight at it. `union` is by rank; on equal rank the
//! second argument's root goes under the first's and the first's rank grows.
//!
//! `find` mutates parent pointers, so it takes `&mut self` even though it is
//! logically a read.

mod storage;

pub use storage::{CoordMap, DenseMap};

use rustc_hash::FxHashMap;

use crate::domain::Coord;
use crate::error::{Error, Result};

/// Default parent table.
pub type ParentMap = FxHashMap<Coord, Coord>;

/// Default rank table.
pub type RankMap = FxHashMap<Coord, u32>;

/// Union-find with union-by-rank and full path compression.
#[derive(Debug, Clone, Default)]
pub struct DisjointSet<P = ParentMap, R = RankMap> {
    parent: P,
    rank: R,
}

impl DisjointSet {
    /// Empty set over the default hash maps.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<P, R> DisjointSet<P, R>
where
    P: CoordMap<Coord>,
    R: CoordMap<u32>,
{
    /// Builds a set over caller-provided (normally empty) tables.
    pub fn with_maps(parent: P, rank: R) -> Self {
        Self { parent, rank }
    }

    /// Adds `v` as a singleton with rank 0. No-op if already present.
    ///
    /// # Errors
    ///
    /// Propagates storage failures from bounded maps.
    #[inline]
    pub fn make_set(&mut self, v: Coord) -> Result<()> {
        if !self.parent.contains(v) {
            self.parent.insert(v, v)?;
            self.rank.insert(v, 0)?;
        }
        Ok(())
    }

    /// Whether `v` has been made.
    #[inline]
    pub fn contains(&self, v: Coord) -> bool {
        self.parent.contains(v)
    }

    /// Number of coordinates made so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// True before the first [`make_set`](Self::make_set).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Representative of `v`'s set.
    ///
    /// # Errors
    ///
    /// [`Error::MissingSetEntry`] if `v` (or a node on its path) was never
    /// made, or [`Error::DomainRange`] if a bounded backend cannot address `v`.
    #[inline]
    pub fn find(&mut self, v: Coord) -> Result<Coord> {
        let p = self.parent_of(v)?;
        if p == v {
            return Ok(v);
        }
        // Depth one: already compressed.
        let gp = self.parent_of(p)?;
        if gp == p {
            return Ok(p);
        }
        self.find_slow(v, gp)
    }

    #[cold]
    #[inline(never)]
    fn find_slow(&mut self, v: Coord, from: Coord) -> Result<Coord> {
        let mut root = from;
        loop {
            let next = self.parent_of(root)?;
            if next == root {
                break;
            }
            root = next;
        }

        let mut cur = v;
        while cur != root {
            let next = self.parent_of(cur)?;
            self.parent.insert(cur, root)?;
            cur = next;
        }
        Ok(root)
    }

    #[inline(always)]
    fn parent_of(&self, v: Coord) -> Result<Coord> {
        match self.parent.get(v) {
            Some(p) => Ok(p),
            None => Err(self.missing(v)),
        }
    }

    /// Error for a lookup miss: out-of-domain keys report the range error.
    #[cold]
    fn missing(&self, v: Coord) -> Error {
        match self.parent.addressable(v) {
            Err(e) => e,
            Ok(()) => Error::MissingSetEntry { coord: v },
        }
    }

    #[inline(always)]
    fn rank_of(&self, v: Coord) -> Result<u32> {
        self.rank.get(v).ok_or(Error::MissingSetEntry { coord: v })
    }

    /// Merges the sets of `a` and `b`.
    ///
    /// Returns `true` if two distinct sets were joined, `false` if `a` and
    /// `b` already shared a representative.
    ///
    /// # Errors
    ///
    /// [`Error::MissingSetEntry`] if either coordinate was never made.
    pub fn union(&mut self, a: Coord, b: Coord) -> Result<bool> {
        let ra = self.find(a)?;
        let rb = self.find(b)?;
        if ra == rb {
            return Ok(false);
        }

        let rank_a = self.rank_of(ra)?;
        let rank_b = self.rank_of(rb)?;
        match rank_a.cmp(&rank_b) {
            core::cmp::Ordering::Less => self.parent.insert(ra, rb)?,
            core::cmp::Ordering::Greater => self.parent.insert(rb, ra)?,
            core::cmp::Ordering::Equal => {
                self.parent.insert(rb, ra)?;
                self.rank.insert(ra, rank_a + 1)?;
            }
        }
        Ok(true)
    }

    /// Moves every entry of `other` into `self`.
    ///
    /// The key sets must be disjoint, which the partitioning guarantees: no
    /// coordinate belongs to two leaves.
    ///
    /// # Errors
    ///
    /// Propagates storage failures from bounded maps.
    pub fn merge_maps(&mut self, other: Self) -> Result<()> {
        self.parent.absorb(other.parent)?;
        self.rank.absorb(other.rank)?;
        Ok(())
    }
}
