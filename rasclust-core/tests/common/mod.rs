//! Shared test utilities for rasclust-core tests.
//!
//! Provides an independent flood-fill labelling used as ground truth for
//! clustering, plus proptest strategies for small random rasters.

#![allow(dead_code)] // Not all test files use all functions

use proptest::prelude::*;
use rasclust_core::{Coord, Raster};

/// Partition of a row-major grid computed by breadth-first flood fill.
///
/// Returned in the same canonical form as `Clusters::normalized`: members
/// sorted, clusters sorted by smallest member.
pub fn flood_fill_partition(values: &[u8], height: usize, width: usize) -> Vec<Vec<Coord>> {
    let mut label = vec![usize::MAX; height * width];
    let mut out: Vec<Vec<Coord>> = Vec::new();
    let mut queue = std::collections::VecDeque::new();

    for start in 0..height * width {
        if label[start] != usize::MAX {
            continue;
        }
        let id = out.len();
        let mut members = Vec::new();
        label[start] = id;
        queue.push_back(start);
        while let Some(i) = queue.pop_front() {
            let (r, c) = (i / width, i % width);
            members.push(Coord::new(r, c));
            let mut visit = |j: usize| {
                if label[j] == usize::MAX && values[j] == values[i] {
                    label[j] = id;
                    queue.push_back(j);
                }
            };
            if c + 1 < width {
                visit(i + 1);
            }
            if r + 1 < height {
                visit(i + width);
            }
            if c > 0 {
                visit(i - 1);
            }
            if r > 0 {
                visit(i - width);
            }
        }
        members.sort_unstable();
        out.push(members);
    }
    out.sort_unstable_by(|a, b| a.first().cmp(&b.first()));
    out
}

/// Number of 4-connected equal-value regions.
pub fn flood_fill_count(values: &[u8], height: usize, width: usize) -> usize {
    flood_fill_partition(values, height, width).len()
}

/// Random grid of `1..=max_side` per axis with values in `0..palette`.
///
/// Small palettes give large, winding regions that cross many partitions.
pub fn grid_strategy(max_side: usize, palette: u8) -> impl Strategy<Value = (Vec<u8>, usize, usize)> {
    (1..=max_side, 1..=max_side).prop_flat_map(move |(h, w)| {
        (prop::collection::vec(0..palette, h * w), Just(h), Just(w))
    })
}

/// Builds a row-major raster, panicking on malformed test input.
pub fn raster(values: Vec<u8>, height: usize, width: usize) -> Raster {
    Raster::from_row_major(values, height, width).expect("valid test raster")
}

/// Builds a raster from rows of ASCII digits, e.g. `["0011", "0111"]`.
pub fn raster_from_rows(rows: &[&str]) -> Raster {
    let height = rows.len();
    let width = rows[0].len();
    let values = rows
        .iter()
        .flat_map(|row| row.bytes().map(|b| b - b'0'))
        .collect();
    raster(values, height, width)
}
