//! Property-based tests for the clustering engine.
//!
//! Flood fill is the ground truth; every engine configuration must produce
//! the same partition.

use crate::common;

use proptest::prelude::*;
use rasclust_core::{
    cluster_serial, gather, Blocked, ClusterBuilder, Coord, CountingObserver, Morton, Reconcile,
    Schedule,
};

fn reconcile_strategy() -> impl Strategy<Value = Reconcile> {
    prop_oneof![Just(Reconcile::Frontier), Just(Reconcile::Exhaustive)]
}

fn schedule_strategy() -> impl Strategy<Value = Schedule> {
    prop_oneof![Just(Schedule::Parallel), Just(Schedule::Sequential)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_matches_flood_fill(
        (values, h, w) in common::grid_strategy(24, 3),
        granularity in 1usize..8,
        reconcile in reconcile_strategy(),
        schedule in schedule_strategy(),
    ) {
        let raster = common::raster(values.clone(), h, w);
        let clusters = ClusterBuilder::new()
            .granularity(granularity)
            .reconcile(reconcile)
            .schedule(schedule)
            .build()
            .unwrap()
            .run(&raster)
            .unwrap();

        prop_assert_eq!(clusters.cell_count(), h * w);
        for c in &clusters {
            prop_assert!(!c.is_empty());
            prop_assert!(c.members.contains(&c.representative));
        }
        prop_assert_eq!(clusters.normalized(), common::flood_fill_partition(&values, h, w));
    }

    #[test]
    fn prop_granularity_does_not_change_partition((values, h, w) in common::grid_strategy(20, 2)) {
        let raster = common::raster(values, h, w);
        let run = |g: usize| {
            ClusterBuilder::new().granularity(g).build().unwrap().run(&raster).unwrap().normalized()
        };
        let finest = run(1);
        prop_assert_eq!(&finest, &run(h.max(w)));
        prop_assert_eq!(&finest, &cluster_serial(&raster).unwrap().normalized());
    }

    #[test]
    fn prop_reconcile_strategies_compare_same_pairs(
        (values, h, w) in common::grid_strategy(24, 4),
        granularity in 1usize..6,
    ) {
        let raster = common::raster(values, h, w);
        let counts = |reconcile: Reconcile| {
            let clusterer = ClusterBuilder::new()
                .granularity(granularity)
                .reconcile(reconcile)
                .schedule(Schedule::Sequential)
                .observer(CountingObserver::new())
                .build()
                .unwrap();
            let clusters = clusterer.run(&raster).unwrap();
            (clusterer.observer().counts(), clusters)
        };
        let (frontier, a) = counts(Reconcile::Frontier);
        let (exhaustive, b) = counts(Reconcile::Exhaustive);
        prop_assert_eq!(frontier, exhaustive);
        prop_assert_eq!(a.normalized(), b.normalized());
    }

    #[test]
    fn prop_layouts_agree((values, h, w) in common::grid_strategy(24, 3), block in 1usize..9) {
        let raster = common::raster(values, h, w);
        let run = |g: usize| ClusterBuilder::new().granularity(g).build().unwrap();
        let expected = run(3).run(&raster).unwrap().normalized();

        let blocked = raster.relayout(Blocked::new(h, w, block).unwrap()).unwrap();
        let morton = raster.relayout(Morton::new(h, w).unwrap()).unwrap();
        prop_assert_eq!(&run(3).run(&blocked).unwrap().normalized(), &expected);
        prop_assert_eq!(&run(3).run(&morton).unwrap().normalized(), &expected);
    }

    #[test]
    fn prop_gather_idempotent((values, h, w) in common::grid_strategy(16, 3)) {
        let raster = common::raster(values, h, w);
        let clusterer = ClusterBuilder::new().granularity(2).build().unwrap();
        let mut dset = clusterer
            .reduce(raster.bounds(), &|a: Coord, b: Coord| raster.same_value(a, b))
            .unwrap();
        let first = gather(&mut dset, w, h).unwrap();
        prop_assert_eq!(first, gather(&mut dset, w, h).unwrap());
    }
}
