//! Morton (Z-order) codes and the [`Morton`] layout.
//!
//! Rows occupy the even bit-plane and columns the odd one, so (3, 6) encodes
//! to 0b101101. Uses BMI2 PDEP/PEXT when the target enables it, SWAR otherwise.

// =============================================================================
// Morton Encoding/Decoding (Z-order curve)
// =============================================================================

#[cfg(all(target_arch = "x86_64", target_feature = "bmi2"))]
use core::arch::x86_64::{_pdep_u64, _pext_u64};

use super::Layout;
use crate::domain::{Coord, Direction};
use crate::error::{Error, Result};

/// Bits owned by the row coordinate.
pub const ROW_MASK: u64 = 0x5555_5555_5555_5555;

/// Bits owned by the column coordinate.
pub const COL_MASK: u64 = 0xAAAA_AAAA_AAAA_AAAA;

/// Interleaved `+1` row step.
pub const ROW_INC: u64 = 0b01;

/// Interleaved `+1` column step.
pub const COL_INC: u64 = 0b10;

/// Interleaved `-1` row step (all row bits set).
pub const ROW_DEC: u64 = ROW_MASK;

/// Interleaved `-1` column step (all column bits set).
pub const COL_DEC: u64 = COL_MASK;

// =============================================================================
// Bit Spreading/Compacting (SWAR operations)
// =============================================================================

/// Spreads the 32 bits of `x` into the even bit positions of a `u64`.
#[inline(always)]
pub fn spread_bits(x: u32) -> u64 {
    let mut x = u64::from(x);
    x = (x | (x << 16)) & 0x0000_FFFF_0000_FFFF;
    x = (x | (x << 8)) & 0x00FF_00FF_00FF_00FF;
    x = (x | (x << 4)) & 0x0F0F_0F0F_0F0F_0F0F;
    x = (x | (x << 2)) & 0x3333_3333_3333_3333;
    x = (x | (x << 1)) & 0x5555_5555_5555_5555;
    x
}

/// Gathers the even bit positions of `x` into a `u32`.
#[inline(always)]
pub fn compact_bits(x: u64) -> u32 {
    let mut x = x & 0x5555_5555_5555_5555;
    x = (x | (x >> 1)) & 0x3333_3333_3333_3333;
    x = (x | (x >> 2)) & 0x0F0F_0F0F_0F0F_0F0F;
    x = (x | (x >> 4)) & 0x00FF_00FF_00FF_00FF;
    x = (x | (x >> 8)) & 0x0000_FFFF_0000_FFFF;
    x = (x | (x >> 16)) & 0x0000_0000_FFFF_FFFF;
    x as u32
}

/// Interleaves `row` (even bits) and `col` (odd bits) into a Morton code.
#[inline(always)]
pub fn interleave(row: u32, col: u32) -> u64 {
    #[cfg(all(target_arch = "x86_64", target_feature = "bmi2"))]
    // SAFETY: the cfg guarantees BMI2 is available on the compilation target.
    unsafe {
        _pdep_u64(u64::from(row), ROW_MASK) | _pdep_u64(u64::from(col), COL_MASK)
    }
    #[cfg(not(all(target_arch = "x86_64", target_feature = "bmi2")))]
    {
        spread_bits(row) | (spread_bits(col) << 1)
    }
}

/// Inverse of [`interleave`]: returns `(row, col)`.
#[inline(always)]
pub fn detangle(code: u64) -> (u32, u32) {
    #[cfg(all(target_arch = "x86_64", target_feature = "bmi2"))]
    // SAFETY: the cfg guarantees BMI2 is available on the compilation target.
    unsafe {
        (_pext_u64(code, ROW_MASK) as u32, _pext_u64(code, COL_MASK) as u32)
    }
    #[cfg(not(all(target_arch = "x86_64", target_feature = "bmi2")))]
    {
        (compact_bits(code), compact_bits(code >> 1))
    }
}

// =============================================================================
// Morton Navigation
// =============================================================================

/// Adds an interleaved `step` to `code` without decoding.
///
/// Each bit-plane is added independently: filling the foreign plane with
/// ones lets the carry ripple across it, and masking afterwards drops the
/// carry that would otherwise leak into the other coordinate. A step equal
/// to a plane's full mask subtracts one from that plane.
#[inline(always)]
pub fn add_interleaved(code: u64, step: u64) -> u64 {
    let row = (code | !ROW_MASK).wrapping_add(step & ROW_MASK) & ROW_MASK;
    let col = (code | !COL_MASK).wrapping_add(step & COL_MASK) & COL_MASK;
    row | col
}

/// Z-order layout over a `height x width` domain.
///
/// The code space of a non power-of-two domain has holes; the capacity is
/// the largest code in the domain plus one, and offsets that land in a hole
/// fail to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Morton {
    height: usize,
    width: usize,
    capacity: usize,
}

impl Morton {
    /// Creates a Morton layout.
    ///
    /// # Errors
    ///
    /// * [`Error::DegenerateBounds`] if either dimension is zero.
    /// * [`Error::InvalidConfig`] if a dimension does not fit in 32 bits.
    pub fn new(height: usize, width: usize) -> Result<Self> {
        if height == 0 || width == 0 {
            return Err(Error::DegenerateBounds {
                rows: (0, height),
                cols: (0, width),
            });
        }
        let (Ok(max_row), Ok(max_col)) = (u32::try_from(height - 1), u32::try_from(width - 1))
        else {
            return Err(Error::InvalidConfig("morton dimensions exceed 32 bits"));
        };
        let capacity = usize::try_from(interleave(max_row, max_col))
            .ok()
            .and_then(|c| c.checked_add(1))
            .ok_or(Error::InvalidConfig("morton capacity exceeds address space"))?;
        Ok(Self {
            height,
            width,
            capacity,
        })
    }
}

impl Layout for Morton {
    #[inline]
    fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn width(&self) -> usize {
        self.width
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline(always)]
    fn offset(&self, c: Coord) -> usize {
        interleave(c.row as u32, c.col as u32) as usize
    }

    #[inline(always)]
    fn coord(&self, offset: usize) -> Coord {
        let (row, col) = detangle(offset as u64);
        Coord::new(row as usize, col as usize)
    }

    #[inline]
    fn neighbor(&self, offset: usize, at: Coord, dir: Direction) -> Option<usize> {
        at.step(dir, &self.bounds())?;
        let step = match dir {
            Direction::East => COL_INC,
            Direction::South => ROW_INC,
            Direction::West => COL_DEC,
            Direction::North => ROW_DEC,
        };
        Some(add_interleaved(offset as u64, step) as usize)
    }
}
