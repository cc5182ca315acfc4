use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use crate::domain::Coord;
use crate::error::Result;
use crate::indexing::{GridStore, Layout};

/// Coordinate-keyed storage backing the parent and rank tables of a
/// [`DisjointSet`](super::DisjointSet).
pub trait CoordMap<V: Copy> {
    /// Value stored for `key`.
    fn get(&self, key: Coord) -> Option<V>;

    /// Stores `value` for `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Bounded maps fail with [`DomainRange`](crate::Error::DomainRange)
    /// for keys they cannot address.
    fn insert(&mut self, key: Coord, value: V) -> Result<()>;

    /// Number of keys present.
    fn len(&self) -> usize;

    /// Moves every entry of `other` into `self`. Key sets are disjoint.
    ///
    /// # Errors
    ///
    /// Propagates [`insert`](Self::insert) failures.
    fn absorb(&mut self, other: Self) -> Result<()>
    where
        Self: Sized;

    /// Checks that `key` can be stored at all.
    ///
    /// # Errors
    ///
    /// Bounded maps fail with [`DomainRange`](crate::Error::DomainRange)
    /// for keys outside their domain. Unbounded maps accept every key.
    #[inline]
    fn addressable(&self, _key: Coord) -> Result<()> {
        Ok(())
    }

    /// Whether `key` is present.
    #[inline]
    fn contains(&self, key: Coord) -> bool {
        self.get(key).is_some()
    }

    /// True if no keys are present.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<V: Copy, S: BuildHasher> CoordMap<V> for HashMap<Coord, V, S> {
    #[inline]
    fn get(&self, key: Coord) -> Option<V> {
        HashMap::get(self, &key).copied()
    }

    #[inline]
    fn insert(&mut self, key: Coord, value: V) -> Result<()> {
        HashMap::insert(self, key, value);
        Ok(())
    }

    #[inline]
    fn len(&self) -> usize {
        HashMap::len(self)
    }

    fn absorb(&mut self, other: Self) -> Result<()> {
        // Keep the larger table and drain the smaller one into it.
        if other.len() > HashMap::len(self) {
            let small = std::mem::replace(self, other);
            self.extend(small);
        } else {
            self.extend(other);
        }
        Ok(())
    }
}

impl<V: Copy> CoordMap<V> for BTreeMap<Coord, V> {
    #[inline]
    fn get(&self, key: Coord) -> Option<V> {
        BTreeMap::get(self, &key).copied()
    }

    #[inline]
    fn insert(&mut self, key: Coord, value: V) -> Result<()> {
        BTreeMap::insert(self, key, value);
        Ok(())
    }

    #[inline]
    fn len(&self) -> usize {
        BTreeMap::len(self)
    }

    fn absorb(&mut self, mut other: Self) -> Result<()> {
        self.append(&mut other);
        Ok(())
    }
}

/// Arena storage: one slot per cell of the whole grid, addressed through a
/// [`Layout`].
///
/// Lookups avoid hashing entirely. Because every instance is sized to the
/// whole grid, merging two of them costs a full scan, so this backend suits
/// a single serial pass rather than the fork-join engine.
#[derive(Debug, Clone)]
pub struct DenseMap<V, L: Layout> {
    slots: GridStore<Option<V>, L>,
    len: usize,
}

impl<V: Copy, L: Layout> DenseMap<V, L> {
    /// Allocates an empty map covering `layout`'s domain.
    pub fn new(layout: L) -> Self {
        Self {
            slots: GridStore::new(layout, None),
            len: 0,
        }
    }
}

impl<V: Copy, L: Layout> CoordMap<V> for DenseMap<V, L> {
    #[inline]
    fn get(&self, key: Coord) -> Option<V> {
        self.slots.get(key).ok().copied().flatten()
    }

    #[inline]
    fn addressable(&self, key: Coord) -> Result<()> {
        self.slots.get(key).map(drop)
    }

    #[inline]
    fn insert(&mut self, key: Coord, value: V) -> Result<()> {
        let slot = self.slots.get_mut(key)?;
        if slot.replace(value).is_none() {
            self.len += 1;
        }
        Ok(())
    }

    #[inline]
    fn len(&self) -> usize {
        self.len
    }

    fn absorb(&mut self, other: Self) -> Result<()> {
        let layout = other.slots.layout().clone();
        for (offset, slot) in other.slots.as_slice().iter().enumerate() {
            if let Some(value) = *slot {
                self.insert(layout.coord(offset), value)?;
            }
        }
        Ok(())
    }
}
