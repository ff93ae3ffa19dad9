//! Common definitions and helper functions used by the rest of the library

use num_traits::{Float, FromPrimitive};

/// The version of the library
pub const VERSION_MAJOR: u32 = 0;
pub const VERSION_MINOR: u32 = 1;
pub const VERSION_PATCH: u32 = 0;
pub const VERSION_STRING: &str = "0.1.0";

/// Whether `size` is a non-zero power of two
#[inline]
pub const fn is_power_of_two(size: usize) -> bool {
    size != 0 && size & (size - 1) == 0
}

/// Whether `size` is a non-zero even number
#[inline]
pub const fn is_even(size: usize) -> bool {
    size != 0 && size % 2 == 0
}

/// Number of index bits for a power-of-two size (`log2(size)`)
#[inline]
pub const fn bits_needed(size: usize) -> u32 {
    if size < 2 {
        0
    } else {
        size.trailing_zeros()
    }
}

/// Reverses the lowest `bits` bits of `index`
#[inline]
pub const fn reverse_bits(index: usize, bits: u32) -> usize {
    if bits == 0 {
        0
    } else {
        index.reverse_bits() >> (usize::BITS - bits)
    }
}

/// Converts an `f64` constant into the sample type.
///
/// Every `Float` we care about represents these exactly or to nearest, so a failed
/// conversion only happens for exotic types and shows up as NaN in the output.
#[inline]
pub(crate) fn constant<T: Float + FromPrimitive>(value: f64) -> T {
    T::from_f64(value).unwrap_or_else(T::nan)
}

/// Converts a buffer length into the sample type
#[inline]
pub(crate) fn length<T: Float + FromPrimitive>(size: usize) -> T {
    T::from_usize(size).unwrap_or_else(T::nan)
}
