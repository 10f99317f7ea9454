//! Miscellaneous utilities for working with bits.

use crate::error::{Error, Result};

/// The width of the accumulator words both streams operate on.
pub const WORD_BITS: u32 = u32::BITS;

/// Gets a mask covering the low `count` bits of a word.
///
/// `count` values of 32 and above produce a full mask.
#[inline]
pub const fn mask(count: u32) -> u32 {
    match count {
        0 => 0,
        c if c >= WORD_BITS => u32::MAX,
        c => (1 << c) - 1,
    }
}

/// Validates that `count` lies in `min..=32`.
#[inline]
pub fn check_width(count: u32, min: u32) -> Result<()> {
    if (min..=WORD_BITS).contains(&count) {
        Ok(())
    } else {
        cold();
        Err(Error::Width(count))
    }
}

/// Splits a value into its sign flag and magnitude, with the
/// magnitude truncated to `count - 1` bits.
///
/// This is sign-magnitude, not two's complement. Magnitudes which
/// do not fit are silently masked, so `i32::MIN` over 32 bits
/// degrades to a negative zero.
#[inline]
pub fn split_signed(value: i32, count: u32) -> (u32, u32) {
    let sign = (value < 0) as u32;
    (sign, value.unsigned_abs() & mask(count - 1))
}

/// Joins a sign flag and magnitude produced by [`split_signed`].
///
/// Both signs of a zero magnitude decode to `0`. Only the low 31
/// bits of `magnitude` are considered.
#[inline]
pub fn join_signed(sign: u32, magnitude: u32) -> i32 {
    let value = (magnitude & mask(WORD_BITS - 1)) as i32;
    if sign != 0 {
        -value
    } else {
        value
    }
}

// There are no stable branch prediction hints for us.
// We emulate them by nudging the compiler into optimizing
// around the paths which do not call this function.
#[cold]
#[inline(always)]
pub(crate) fn cold() {}
