//! Error types for the transform engines and the distance utility

use core::fmt;

use thiserror::Error;

/// Structural constraint a backend places on the transform size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizeRequirement {
    /// Non-zero power of two (radix-2 complex engine)
    PowerOfTwo,
    /// Non-zero even number (real-optimized engine)
    Even,
}

impl SizeRequirement {
    /// Whether `size` satisfies this requirement
    pub const fn accepts(self, size: usize) -> bool {
        match self {
            Self::PowerOfTwo => crate::common::is_power_of_two(size),
            Self::Even => crate::common::is_even(size),
        }
    }
}

impl fmt::Display for SizeRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PowerOfTwo => "a power of two".fmt(f),
            Self::Even => "even".fmt(f),
        }
    }
}

/// Errors reported by the transform engines.
///
/// Nothing is written to the caller's output buffers when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FftError {
    /// The engine was configured with a size its backend cannot handle.
    ///
    /// An inert engine keeps returning this from every `process` call.
    #[error("unsupported transform size {size}: size must be {requirement}")]
    UnsupportedSize {
        size: usize,
        requirement: SizeRequirement,
    },
    /// A buffer does not have the length the engine was built for
    #[error("buffer `{buffer}` has {actual} elements, expected {expected}")]
    BufferLength {
        buffer: &'static str,
        expected: usize,
        actual: usize,
    },
    /// An imaginary input was handed to the forward real-input transform
    #[error("the real-input forward transform does not take an imaginary input")]
    ImaginaryInputUnsupported,
    /// The spectrum handed to the inverse real transform is not conjugate-symmetric
    #[error("spectrum is not conjugate-symmetric at bin {bin}")]
    AsymmetricSpectrum { bin: usize },
}

/// Degenerate inputs to the cosine distance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum DistanceError {
    #[error("vectors are not the same size ({left} and {right})")]
    LengthMismatch { left: usize, right: usize },
    #[error("dividing by zero: at least one vector has zero energy")]
    ZeroDenominator,
    #[error("energy product is not finite: the vectors overflow or contain NaN")]
    NonFiniteDenominator,
}

/// Checks a buffer length against the transform size
#[inline]
pub(crate) fn check_length(buffer: &'static str, expected: usize, actual: usize) -> Result<(), FftError> {
    if expected == actual {
        Ok(())
    } else {
        Err(FftError::BufferLength {
            buffer,
            expected,
            actual,
        })
    }
}
