//! Property-based tests for the synthetic grid generator.

use proptest::prelude::*;
use rasclust_core::{cluster, synthetic, Error};

#[test]
fn test_rejects_more_values_than_cells() {
    assert!(matches!(
        synthetic::checkerboard(2, 2, 0..5),
        Err(Error::Capacity {
            values: 5,
            cells: 4
        })
    ));
}

#[test]
fn test_rejects_empty_range() {
    assert!(matches!(
        synthetic::checkerboard(4, 4, 3..3),
        Err(Error::InvalidConfig(_))
    ));
}

#[test]
fn test_rejects_zero_dimension() {
    assert!(matches!(
        synthetic::checkerboard(0, 4, 0..1),
        Err(Error::DegenerateBounds { .. })
    ));
}

#[test]
fn test_exactly_one_cell_per_value() {
    let raster = synthetic::checkerboard(3, 3, 0..9).unwrap();
    assert_eq!(raster.unique_values(), (0..9).collect::<Vec<u8>>());
    assert_eq!(cluster(&raster, 1).unwrap().sizes(), vec![1; 9]);
}

proptest! {
    #[test]
    fn prop_one_region_per_value(
        h in 1usize..40,
        w in 1usize..40,
        start in 0u8..100,
        count in 1u8..30,
    ) {
        prop_assume!(h * w >= usize::from(count));
        let values = start..start + count;
        let raster = synthetic::checkerboard(h, w, values.clone()).unwrap();

        prop_assert_eq!(raster.unique_values(), values.collect::<Vec<u8>>());
        let clusters = cluster(&raster, 4).unwrap();
        prop_assert_eq!(clusters.len(), usize::from(count));
        prop_assert_eq!(clusters.cell_count(), h * w);
    }
}
