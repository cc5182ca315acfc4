//! Synthetic land-use grids for tests and benchmarks.

use core::ops::Range;

use crate::domain::Bounds;
use crate::error::{Error, Result};
use crate::raster::Raster;

/// Fills a `height x width` grid with one rectangle per value of `values`.
///
/// The grid is partitioned recursively: each step cuts the longer axis (rows
/// on ties), hands the lower half of the remaining values to the upper/left
/// piece, and places the cut in proportion to that share so the rectangles
/// end up near-equal in area. Every piece always keeps at least one cell per
/// value it owns, so each value appears as exactly one rectangle.
///
/// # Errors
///
/// * [`Error::DegenerateBounds`] if either dimension is zero.
/// * [`Error::InvalidConfig`] if `values` is empty.
/// * [`Error::Capacity`] if the grid has fewer cells than values.
pub fn checkerboard(height: usize, width: usize, values: Range<u8>) -> Result<Raster> {
    let whole = Bounds::grid(height, width)?;
    let count = values.len();
    if count == 0 {
        return Err(Error::InvalidConfig("empty value range"));
    }
    if whole.area() < count {
        return Err(Error::Capacity {
            values: count,
            cells: whole.area(),
        });
    }

    let mut cells = vec![0u8; whole.area()];
    let mut placed = 0;
    let mut stack = vec![(whole, values.start, values.end)];
    while let Some((region, lo, hi)) = stack.pop() {
        let k = usize::from(hi - lo);
        if k == 1 {
            fill(&mut cells, width, &region, lo);
            placed += 1;
            continue;
        }
        let (first, second, low_share) = cut(&region, k)?;
        // `low_share < k <= 255`, so it fits in a u8.
        let mid = lo + low_share as u8;
        stack.push((second, mid, hi));
        stack.push((first, lo, mid));
    }

    if placed != count {
        return Err(Error::Capacity {
            values: count,
            cells: whole.area(),
        });
    }
    Raster::from_row_major(cells, height, width)
}

/// Splits `region` holding `k >= 2` values. Returns both pieces and how many
/// values the first keeps. Requires `region.area() >= k`.
fn cut(region: &Bounds, k: usize) -> Result<(Bounds, Bounds, usize)> {
    let rows_axis = region.height() >= region.width();
    let (extent, across) = if rows_axis {
        (region.height(), region.width())
    } else {
        (region.width(), region.height())
    };
    let mut share = k / 2;
    let at = (extent * share / k).clamp(1, extent - 1);
    let first_area = at * across;
    let second_area = (extent - at) * across;
    share = share.max(k - second_area.min(k)).min(first_area);

    let (rows, cols) = (region.rows(), region.cols());
    let (first, second) = if rows_axis {
        let mid = rows.start + at;
        (
            Bounds::new(rows.start..mid, cols.clone())?,
            Bounds::new(mid..rows.end, cols)?,
        )
    } else {
        let mid = cols.start + at;
        (
            Bounds::new(rows.clone(), cols.start..mid)?,
            Bounds::new(rows, mid..cols.end)?,
        )
    };
    Ok((first, second, share))
}

fn fill(cells: &mut [u8], width: usize, region: &Bounds, value: u8) {
    for row in region.rows() {
        cells[row * width + region.cols().start..row * width + region.cols().end].fill(value);
    }
}
