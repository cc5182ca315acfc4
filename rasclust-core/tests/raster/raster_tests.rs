//! Tests for raster construction, ingestion and queries.

use crate::common;

use proptest::prelude::*;
use rasclust_core::{Blocked, Coord, Direction, Error, Morton, Raster, RowOrder};

#[test]
fn test_from_row_major_checks_length() {
    assert!(matches!(
        Raster::from_row_major(vec![0; 5], 2, 3),
        Err(Error::ShapeMismatch {
            expected: 6,
            actual: 5
        })
    ));
    assert!(matches!(
        Raster::from_row_major(Vec::new(), 0, 3),
        Err(Error::DegenerateBounds { .. })
    ));
}

#[test]
fn test_read_raw_top_down() {
    let bytes: &[u8] = &[1, 2, 3, 4, 5, 6];
    let raster = Raster::read_raw(bytes, 2, 3, RowOrder::TopDown).unwrap();
    assert_eq!(raster.value(Coord::new(0, 0)), 1);
    assert_eq!(raster.value(Coord::new(1, 2)), 6);
}

#[test]
fn test_read_raw_bottom_up_flips_rows() {
    let bytes: &[u8] = &[1, 2, 3, 4, 5, 6];
    let raster = Raster::read_raw(bytes, 2, 3, RowOrder::BottomUp).unwrap();
    assert_eq!(raster.to_row_major(), vec![4, 5, 6, 1, 2, 3]);
}

#[test]
fn test_read_raw_short_input_is_io_error() {
    let bytes: &[u8] = &[1, 2, 3];
    assert!(matches!(
        Raster::read_raw(bytes, 2, 2, RowOrder::TopDown),
        Err(Error::Io(_))
    ));
}

#[test]
fn test_read_raw_ignores_trailing_bytes() {
    let bytes: &[u8] = &[9, 9, 9, 9, 7];
    let raster = Raster::read_raw(bytes, 2, 2, RowOrder::TopDown).unwrap();
    assert_eq!(raster.unique_values(), vec![9]);
}

#[test]
fn test_get_outside_domain() {
    let raster = common::raster_from_rows(&["01", "23"]);
    assert_eq!(raster.get(Coord::new(1, 1)).unwrap(), 3);
    assert!(matches!(
        raster.get(Coord::new(2, 0)),
        Err(Error::DomainRange { .. })
    ));
}

#[test]
fn test_unique_values_sorted() {
    let raster = common::raster_from_rows(&["5520", "0052"]);
    assert_eq!(raster.unique_values(), vec![0, 2, 5]);
}

#[test]
fn test_neighbor_value_at_edges() {
    let raster = common::raster_from_rows(&["012", "345"]);
    let c = Coord::new(0, 2);
    assert_eq!(raster.neighbor_value(c, Direction::East), None);
    assert_eq!(raster.neighbor_value(c, Direction::North), None);
    assert_eq!(raster.neighbor_value(c, Direction::West), Some(1));
    assert_eq!(raster.neighbor_value(c, Direction::South), Some(5));
}

#[test]
fn test_same_value() {
    let raster = common::raster_from_rows(&["001", "011"]);
    assert!(raster.same_value(Coord::new(0, 0), Coord::new(1, 0)));
    assert!(!raster.same_value(Coord::new(0, 1), Coord::new(0, 2)));
}

#[test]
fn test_relayout_rejects_other_shape() {
    let raster = common::raster_from_rows(&["01", "23"]);
    assert!(matches!(
        raster.relayout(Morton::new(3, 2).unwrap()),
        Err(Error::ShapeMismatch { .. })
    ));
}

/// Equal east/south pairs counted straight from the row-major buffer.
fn naive_equal_edges(values: &[u8], h: usize, w: usize) -> usize {
    let mut count = 0;
    for r in 0..h {
        for c in 0..w {
            let v = values[r * w + c];
            if c + 1 < w && values[r * w + c + 1] == v {
                count += 1;
            }
            if r + 1 < h && values[(r + 1) * w + c] == v {
                count += 1;
            }
        }
    }
    count
}

proptest! {
    #[test]
    fn prop_relayout_preserves_cells((values, h, w) in common::grid_strategy(20, 5), block in 1usize..7) {
        let raster = common::raster(values.clone(), h, w);
        let blocked = raster.relayout(Blocked::new(h, w, block).unwrap()).unwrap();
        let morton = raster.relayout(Morton::new(h, w).unwrap()).unwrap();
        prop_assert_eq!(blocked.to_row_major(), values.clone());
        prop_assert_eq!(morton.to_row_major(), values.clone());
        prop_assert_eq!(morton.unique_values(), raster.unique_values());
    }

    #[test]
    fn prop_equal_edges_layout_independent((values, h, w) in common::grid_strategy(20, 3), block in 1usize..7) {
        let raster = common::raster(values.clone(), h, w);
        let expected = naive_equal_edges(&values, h, w);
        prop_assert_eq!(raster.count_equal_edges(), expected);
        prop_assert_eq!(raster.relayout(Blocked::new(h, w, block).unwrap()).unwrap().count_equal_edges(), expected);
        prop_assert_eq!(raster.relayout(Morton::new(h, w).unwrap()).unwrap().count_equal_edges(), expected);
    }

    #[test]
    fn prop_bottom_up_is_flipped_top_down((values, h, w) in common::grid_strategy(12, 8)) {
        let top = Raster::read_raw(values.as_slice(), h, w, RowOrder::TopDown).unwrap();
        let bottom = Raster::read_raw(values.as_slice(), h, w, RowOrder::BottomUp).unwrap();
        for r in 0..h {
            for c in 0..w {
                prop_assert_eq!(top.value(Coord::new(r, c)), bottom.value(Coord::new(h - 1 - r, c)));
            }
        }
    }
}
