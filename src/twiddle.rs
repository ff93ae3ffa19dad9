//! Twiddle-factor generation
//!
//! The radix-2 engine does not keep a full table of roots of unity. Each butterfly stage
//! stores the cosine and sine of its base angle (and of twice that angle), and the
//! twiddles for a block are then produced by the Chebyshev recurrence
//! `w[n] = 2·cos(δ)·w[n-1] - w[n-2]`, which needs no further trigonometric calls.

#[cfg(feature = "std")]
use std::f64::consts::PI;

#[cfg(not(feature = "std"))]
use core::f64::consts::PI;

use core::marker::PhantomData;

use num_complex::Complex;
use num_traits::{Float, FromPrimitive};

use crate::common::constant;

/// Trigonometric seed for one butterfly stage of block size `block`.
///
/// The recurrence amplifies rounding error with every step, so it always runs in `f64`
/// and each twiddle is narrowed to the sample type on the way out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageSeed {
    block: usize,
    cos1: f64,
    sin1: f64,
    cos2: f64,
    sin2: f64,
}

impl StageSeed {
    /// Computes the seed for a stage combining blocks of `block` elements
    pub fn new(block: usize) -> Self {
        let delta = 2.0 * PI / block as f64;
        Self {
            block,
            cos1: delta.cos(),
            sin1: delta.sin(),
            cos2: (2.0 * delta).cos(),
            sin2: (2.0 * delta).sin(),
        }
    }

    /// Block size this stage combines
    pub fn block(&self) -> usize {
        self.block
    }

    /// Starts the twiddle sequence `e^{∓2πi·n/block}` for `n = 0, 1, 2, ...`
    ///
    /// Forward transforms rotate clockwise, inverse transforms counter-clockwise.
    pub fn twiddles<T: Float + FromPrimitive>(&self, inverse: bool) -> TwiddleRecurrence<T> {
        // The recurrence is seeded with the two values preceding n = 0
        let (sin1, sin2) = if inverse {
            (-self.sin1, -self.sin2)
        } else {
            (self.sin1, self.sin2)
        };
        TwiddleRecurrence {
            w: 2.0 * self.cos1,
            re: [self.cos1, self.cos2],
            im: [sin1, sin2],
            sample: PhantomData,
        }
    }
}

/// Endless iterator over the twiddles of one stage.
///
/// Holds `[w[n-1], w[n-2]]` for the real and imaginary parts.
#[derive(Debug, Clone)]
pub struct TwiddleRecurrence<T> {
    w: f64,
    re: [f64; 2],
    im: [f64; 2],
    sample: PhantomData<T>,
}

impl<T: Float + FromPrimitive> Iterator for TwiddleRecurrence<T> {
    type Item = Complex<T>;

    #[inline]
    fn next(&mut self) -> Option<Complex<T>> {
        let re = self.w * self.re[0] - self.re[1];
        let im = self.w * self.im[0] - self.im[1];
        self.re = [re, self.re[0]];
        self.im = [im, self.im[0]];
        Some(Complex::new(constant(re), constant(im)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_twiddles_match_direct() {
        let block = 64;
        let seed = StageSeed::new(block);
        assert_eq!(seed.block(), block);

        for (n, w) in seed.twiddles::<f64>(false).take(block / 2).enumerate() {
            let phase = -2.0 * PI * n as f64 / block as f64;
            assert!((w.re - phase.cos()).abs() < 1e-12);
            assert!((w.im - phase.sin()).abs() < 1e-12);
        }
    }

    #[test]
    fn test_inverse_twiddles_are_conjugates() {
        let seed = StageSeed::new(16);
        let forward = seed.twiddles::<f64>(false).take(8);
        let inverse = seed.twiddles::<f64>(true).take(8);
        for (f, i) in forward.zip(inverse) {
            assert!((f.re - i.re).abs() < 1e-15);
            assert!((f.im + i.im).abs() < 1e-15);
        }
    }

    #[test]
    fn test_first_twiddle_is_one() {
        for block in [2, 4, 8, 1024] {
            let w = StageSeed::new(block).twiddles::<f32>(false).next().unwrap();
            assert!((w.re - 1.0).abs() < 1e-6);
            assert!(w.im.abs() < 1e-6);
        }
    }

    #[test]
    fn test_single_precision_stays_accurate_over_long_blocks() {
        let block = 1 << 16;
        for (n, w) in StageSeed::new(block).twiddles::<f32>(false).take(block / 2).enumerate() {
            let phase = -2.0 * PI * n as f64 / block as f64;
            assert!(
                (f64::from(w.re) - phase.cos()).abs() < 1e-6 && (f64::from(w.im) - phase.sin()).abs() < 1e-6,
                "twiddle {n} drifted to {w}"
            );
        }
    }
}
