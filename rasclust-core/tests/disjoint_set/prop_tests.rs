//! Property-based tests for the disjoint set.
//!
//! Random union sequences are checked against a naive label-relabelling
//! model, for each storage backend.

use std::collections::BTreeMap;

use proptest::prelude::*;
use rasclust_core::disjoint_set::{DenseMap, DisjointSet};
use rasclust_core::{Coord, Morton};

const SIDE: usize = 6;

fn coord_strategy() -> impl Strategy<Value = Coord> {
    (0..SIDE, 0..SIDE).prop_map(|(r, c)| Coord::new(r, c))
}

/// Naive model: every cell carries a label, union relabels one side.
fn model_partition(unions: &[(Coord, Coord)]) -> Vec<usize> {
    let mut label: Vec<usize> = (0..SIDE * SIDE).collect();
    for &(a, b) in unions {
        let la = label[a.row * SIDE + a.col];
        let lb = label[b.row * SIDE + b.col];
        if la != lb {
            for l in label.iter_mut() {
                if *l == lb {
                    *l = la;
                }
            }
        }
    }
    label
}

proptest! {
    #[test]
    fn prop_union_matches_model(unions in prop::collection::vec((coord_strategy(), coord_strategy()), 0..60)) {
        let mut ds = DisjointSet::new();
        for r in 0..SIDE {
            for c in 0..SIDE {
                ds.make_set(Coord::new(r, c)).unwrap();
            }
        }
        for &(a, b) in &unions {
            ds.union(a, b).unwrap();
            prop_assert_eq!(ds.find(a).unwrap(), ds.find(b).unwrap(), "union must join {} and {}", a, b);
        }

        let label = model_partition(&unions);
        for i in 0..SIDE * SIDE {
            for j in 0..SIDE * SIDE {
                let (a, b) = (Coord::new(i / SIDE, i % SIDE), Coord::new(j / SIDE, j % SIDE));
                let same_model = label[i] == label[j];
                let same_ds = ds.find(a).unwrap() == ds.find(b).unwrap();
                prop_assert_eq!(same_model, same_ds, "disagreement on {} vs {}", a, b);
            }
        }
    }

    #[test]
    fn prop_backends_agree(unions in prop::collection::vec((coord_strategy(), coord_strategy()), 0..40)) {
        let layout = Morton::new(SIDE, SIDE).unwrap();
        let mut hashed = DisjointSet::new();
        let mut ordered = DisjointSet::with_maps(BTreeMap::<Coord, Coord>::new(), BTreeMap::<Coord, u32>::new());
        let mut dense = DisjointSet::with_maps(DenseMap::<Coord, _>::new(layout), DenseMap::<u32, _>::new(layout));

        for r in 0..SIDE {
            for c in 0..SIDE {
                let p = Coord::new(r, c);
                hashed.make_set(p).unwrap();
                ordered.make_set(p).unwrap();
                dense.make_set(p).unwrap();
            }
        }
        for &(a, b) in &unions {
            let h = hashed.union(a, b).unwrap();
            let o = ordered.union(a, b).unwrap();
            let d = dense.union(a, b).unwrap();
            prop_assert_eq!(h, o);
            prop_assert_eq!(h, d);
        }
        // Identical operation sequences pick identical representatives.
        for r in 0..SIDE {
            for c in 0..SIDE {
                let p = Coord::new(r, c);
                let rep = hashed.find(p).unwrap();
                prop_assert_eq!(rep, ordered.find(p).unwrap());
                prop_assert_eq!(rep, dense.find(p).unwrap());
            }
        }
    }

    #[test]
    fn prop_rank_bounds_depth(n in 1usize..SIDE * SIDE, seed in any::<u64>()) {
        // Union a pseudo-random sequence; every find must still resolve.
        let mut ds = DisjointSet::new();
        let cells: Vec<Coord> = (0..n).map(|i| Coord::new(i / SIDE, i % SIDE)).collect();
        for &p in &cells {
            ds.make_set(p).unwrap();
        }
        let mut x = seed | 1;
        for _ in 0..n {
            x ^= x << 13;
            x ^= x >> 7;
            x ^= x << 17;
            let a = cells[(x as usize) % n];
            let b = cells[((x >> 32) as usize) % n];
            ds.union(a, b).unwrap();
        }
        for &p in &cells {
            let root = ds.find(p).unwrap();
            prop_assert_eq!(ds.find(root).unwrap(), root, "representative must be its own root");
        }
    }
}
