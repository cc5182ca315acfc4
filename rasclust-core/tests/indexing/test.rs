//! Unit tests for storage layouts and Morton bit tricks.

use rasclust_core::indexing::morton::{
    add_interleaved, detangle, interleave, COL_DEC, COL_INC, COL_MASK, ROW_DEC, ROW_INC, ROW_MASK,
};
use rasclust_core::{Blocked, Coord, Direction, Error, GridStore, Layout, Morton, RowMajor};

// =============================================================================
// Morton codes
// =============================================================================

#[test]
fn test_morton_transposed_codes_differ() {
    let a = interleave(3, 6);
    let b = interleave(6, 3);
    assert_ne!(a, b);
    assert_eq!(detangle(a), (3, 6));
    assert_eq!(detangle(b), (6, 3));
}

#[test]
fn test_add_interleaved_row_step() {
    let code = interleave(3, 6);
    assert_eq!(detangle(add_interleaved(code, ROW_INC)), (4, 6));
}

#[test]
fn test_add_interleaved_carries_stay_in_plane() {
    // 0b0111 + 1 in the row plane ripples through three row bits.
    let code = interleave(7, 5);
    assert_eq!(detangle(add_interleaved(code, ROW_INC)), (8, 5));
    assert_eq!(detangle(add_interleaved(code, COL_INC)), (7, 6));
}

#[test]
fn test_add_interleaved_negative_steps() {
    let code = interleave(8, 16);
    assert_eq!(detangle(add_interleaved(code, ROW_DEC)), (7, 16));
    assert_eq!(detangle(add_interleaved(code, COL_DEC)), (8, 15));
}

#[test]
fn test_add_interleaved_general_step() {
    // A step is itself an interleaved offset.
    let code = interleave(10, 20);
    let step = interleave(5, 9);
    assert_eq!(detangle(add_interleaved(code, step)), (15, 29));
}

#[test]
fn test_masks_partition_bits() {
    assert_eq!(ROW_MASK & COL_MASK, 0);
    assert_eq!(ROW_MASK | COL_MASK, u64::MAX);
    assert_eq!(interleave(u32::MAX, 0), ROW_MASK);
    assert_eq!(interleave(0, u32::MAX), COL_MASK);
}

// =============================================================================
// Layout domains
// =============================================================================

#[test]
fn test_row_major_formula() {
    let layout = RowMajor::new(4, 7).unwrap();
    assert_eq!(layout.offset(Coord::new(2, 3)), 17);
    assert_eq!(layout.coord(17), Coord::new(2, 3));
    assert_eq!(layout.capacity(), 28);
}

#[test]
fn test_encode_outside_domain_fails() {
    let layout = Blocked::new(5, 5, 2).unwrap();
    match layout.encode(Coord::new(5, 0)) {
        Err(Error::DomainRange {
            coord,
            height,
            width,
        }) => {
            assert_eq!(coord, Coord::new(5, 0));
            assert_eq!((height, width), (5, 5));
        }
        other => panic!("expected DomainRange, got {:?}", other),
    }
}

#[test]
fn test_decode_past_capacity_fails() {
    let layout = RowMajor::new(3, 3).unwrap();
    assert!(matches!(
        layout.decode(9),
        Err(Error::OffsetRange {
            offset: 9,
            capacity: 9
        })
    ));
}

#[test]
fn test_morton_hole_fails_to_decode() {
    // 3 x 3 domain: the corner (2, 2) encodes to 12, but codes 5 = (3, 0)
    // and 10 = (0, 3) fall outside the domain.
    let layout = Morton::new(3, 3).unwrap();
    assert_eq!(layout.capacity(), 13);
    assert_eq!(layout.decode(6).unwrap(), Coord::new(2, 1));
    assert!(matches!(layout.decode(5), Err(Error::OffsetRange { .. })));
    assert!(matches!(layout.decode(10), Err(Error::OffsetRange { .. })));
}

#[test]
fn test_zero_sizes_rejected() {
    assert!(matches!(RowMajor::new(0, 3), Err(Error::DegenerateBounds { .. })));
    assert!(matches!(Morton::new(3, 0), Err(Error::DegenerateBounds { .. })));
    assert!(matches!(Blocked::new(3, 3, 0), Err(Error::InvalidConfig(_))));
}

// =============================================================================
// GridStore
// =============================================================================

#[test]
fn test_grid_store_preallocated_and_checked() {
    let layout = Blocked::new(6, 5, 4).unwrap();
    let mut store = GridStore::new(layout, 0u16);
    assert_eq!(store.as_slice().len(), 30);

    store.set(Coord::new(5, 4), 99).unwrap();
    assert_eq!(*store.get(Coord::new(5, 4)).unwrap(), 99);
    assert!(matches!(
        store.set(Coord::new(6, 0), 1),
        Err(Error::DomainRange { .. })
    ));
    assert!(store.get(Coord::new(0, 5)).is_err());
    // Writes never grow the backing store.
    assert_eq!(store.as_slice().len(), 30);
}

#[test]
fn test_neighbor_stops_at_domain_edge() {
    let layout = Morton::new(4, 4).unwrap();
    let corner = Coord::new(3, 3);
    let off = layout.offset(corner);
    assert_eq!(layout.neighbor(off, corner, Direction::East), None);
    assert_eq!(layout.neighbor(off, corner, Direction::South), None);
    assert_eq!(
        layout.neighbor(off, corner, Direction::West),
        Some(layout.offset(Coord::new(3, 2)))
    );
}
