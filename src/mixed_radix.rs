//! Mixed-radix complex FFT for arbitrary sizes
//!
//! The real-input engine packs `N` real samples into `N/2` complex ones, and `N/2` is only
//! guaranteed to be a positive integer. This recursive decimation-in-time transform factors
//! the size into radix-4, radix-2 and odd radices, using dedicated butterflies for 2 and 4
//! and a generic `O(p²)` butterfly for everything else.

#[cfg(feature = "std")]
use std::f64::consts::PI;

#[cfg(not(feature = "std"))]
use core::f64::consts::PI;

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use num_complex::Complex;
use num_traits::{Float, FromPrimitive};

use crate::common::constant;

/// Unnormalized complex FFT of any non-zero size
#[derive(Debug, Clone)]
pub(crate) struct MixedRadixFFT<T: Float> {
    size: usize,
    /// `(radix, remaining length)` for each recursion level
    factors: Vec<(usize, usize)>,
    /// `e^{-2πik/N}` for `k` in `0..N`
    twiddles: Vec<Complex<T>>,
}

impl<T: Float + FromPrimitive> MixedRadixFFT<T> {
    pub fn new(size: usize) -> Self {
        let twiddles = (0..size)
            .map(|k| {
                let phase = -2.0 * PI * k as f64 / size as f64;
                Complex::new(constant(phase.cos()), constant(phase.sin()))
            })
            .collect();
        Self {
            size,
            factors: factorize(size),
            twiddles,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn factors(&self) -> impl Iterator<Item = usize> + '_ {
        self.factors.iter().map(|&(radix, _)| radix)
    }

    /// Length of the butterfly scratch buffer [`process`](Self::process) needs
    pub fn scratch_len(&self) -> usize {
        self.factors().max().unwrap_or(1)
    }

    /// Transform `input` into `output` (both `size` long) without normalization.
    ///
    /// `scratch` must hold at least [`scratch_len`](Self::scratch_len) elements.
    pub fn process<const INVERSE: bool>(
        &self,
        input: &[Complex<T>],
        output: &mut [Complex<T>],
        scratch: &mut [Complex<T>],
    ) {
        debug_assert_eq!(input.len(), self.size);
        debug_assert_eq!(output.len(), self.size);
        debug_assert!(scratch.len() >= self.scratch_len());

        if self.factors.is_empty() {
            output.copy_from_slice(input);
            return;
        }
        self.work::<INVERSE>(output, input, 0, 1, 0, scratch);
    }

    #[inline(always)]
    fn twiddle<const INVERSE: bool>(&self, index: usize) -> Complex<T> {
        let w = self.twiddles[index];
        if INVERSE {
            w.conj()
        } else {
            w
        }
    }

    // Computes the `radix * m` outputs of one recursion level.
    // Input element `j` of this sub-transform lives at `input[offset + j * stride]`.
    fn work<const INVERSE: bool>(
        &self,
        output: &mut [Complex<T>],
        input: &[Complex<T>],
        offset: usize,
        stride: usize,
        level: usize,
        scratch: &mut [Complex<T>],
    ) {
        let (radix, m) = self.factors[level];
        if m == 1 {
            for (j, value) in output.iter_mut().enumerate() {
                *value = input[offset + j * stride];
            }
        } else {
            for (j, chunk) in output.chunks_exact_mut(m).enumerate() {
                self.work::<INVERSE>(chunk, input, offset + j * stride, stride * radix, level + 1, scratch);
            }
        }

        match radix {
            2 => self.butterfly2::<INVERSE>(output, stride, m),
            4 => self.butterfly4::<INVERSE>(output, stride, m),
            _ => self.butterfly_generic::<INVERSE>(output, stride, m, radix, scratch),
        }
    }

    fn butterfly2<const INVERSE: bool>(&self, data: &mut [Complex<T>], stride: usize, m: usize) {
        let (low, high) = data.split_at_mut(m);
        for (k, (a, b)) in low.iter_mut().zip(high.iter_mut()).enumerate() {
            let t = *b * self.twiddle::<INVERSE>(k * stride);
            *b = *a - t;
            *a = *a + t;
        }
    }

    fn butterfly4<const INVERSE: bool>(&self, data: &mut [Complex<T>], stride: usize, m: usize) {
        for k in 0..m {
            let s0 = data[k + m] * self.twiddle::<INVERSE>(k * stride);
            let s1 = data[k + 2 * m] * self.twiddle::<INVERSE>(2 * k * stride);
            let s2 = data[k + 3 * m] * self.twiddle::<INVERSE>(3 * k * stride);

            let a = data[k];
            let s3 = s0 + s2;
            let s4 = s0 - s2;
            let s5 = a - s1;
            let a = a + s1;

            data[k] = a + s3;
            data[k + 2 * m] = a - s3;
            // Multiply s4 by -i (forward) or +i (inverse)
            let s4 = if INVERSE {
                Complex::new(-s4.im, s4.re)
            } else {
                Complex::new(s4.im, -s4.re)
            };
            data[k + m] = s5 + s4;
            data[k + 3 * m] = s5 - s4;
        }
    }

    fn butterfly_generic<const INVERSE: bool>(
        &self,
        data: &mut [Complex<T>],
        stride: usize,
        m: usize,
        radix: usize,
        scratch: &mut [Complex<T>],
    ) {
        let scratch = &mut scratch[..radix];
        for u in 0..m {
            for (q, slot) in scratch.iter_mut().enumerate() {
                *slot = data[u + q * m];
            }
            for q1 in 0..radix {
                let k = u + q1 * m;
                let mut acc = scratch[0];
                let mut index = 0;
                for &value in &scratch[1..] {
                    index += stride * k;
                    if index >= self.size {
                        index -= self.size;
                    }
                    acc = acc + value * self.twiddle::<INVERSE>(index);
                }
                data[k] = acc;
            }
        }
    }
}

/// Splits `size` into radices, preferring 4, then 2, then odd factors.
/// A remaining factor larger than `sqrt(size)` is taken whole.
fn factorize(size: usize) -> Vec<(usize, usize)> {
    let mut factors = Vec::new();
    if size < 2 {
        return factors;
    }

    let floor_sqrt = (size as f64).sqrt().floor() as usize;
    let mut n = size;
    let mut radix = 4;
    while n > 1 {
        while n % radix != 0 {
            radix = match radix {
                4 => 2,
                2 => 3,
                _ => radix + 2,
            };
            if radix > floor_sqrt {
                radix = n;
            }
        }
        n /= radix;
        factors.push((radix, n));
    }
    factors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn naive_dft(input: &[Complex<f64>], inverse: bool) -> Vec<Complex<f64>> {
        let n = input.len();
        let sign = if inverse { 1.0 } else { -1.0 };
        (0..n)
            .map(|k| {
                input.iter().enumerate().fold(Complex::new(0.0, 0.0), |acc, (t, &x)| {
                    let phase = sign * 2.0 * PI * (k * t) as f64 / n as f64;
                    acc + x * Complex::new(phase.cos(), phase.sin())
                })
            })
            .collect()
    }

    fn test_signal(n: usize) -> Vec<Complex<f64>> {
        (0..n)
            .map(|i| Complex::new((i as f64 * 0.37).sin() + 0.25, (i as f64 * 1.3).cos()))
            .collect()
    }

    #[test]
    fn test_factorize() {
        assert_eq!(factorize(1), vec![]);
        assert_eq!(factorize(2), vec![(2, 1)]);
        assert_eq!(factorize(16), vec![(4, 4), (4, 1)]);
        assert_eq!(factorize(8), vec![(4, 2), (2, 1)]);
        assert_eq!(factorize(12), vec![(4, 3), (3, 1)]);
        assert_eq!(factorize(3), vec![(3, 1)]);
        assert_eq!(factorize(7), vec![(7, 1)]);
        assert_eq!(factorize(45), vec![(3, 15), (3, 5), (5, 1)]);
        assert_eq!(factorize(26), vec![(2, 13), (13, 1)]);
    }

    #[test]
    fn test_matches_naive_dft() {
        for n in [1, 2, 3, 4, 5, 6, 7, 8, 9, 12, 15, 16, 20, 25, 26, 30, 49, 64, 96] {
            let fft = MixedRadixFFT::<f64>::new(n);
            assert_eq!(fft.size(), n);
            let input = test_signal(n);

            for inverse in [false, true] {
                let mut output = vec![Complex::new(0.0, 0.0); n];
                let mut scratch = vec![Complex::new(0.0, 0.0); fft.scratch_len()];
                if inverse {
                    fft.process::<true>(&input, &mut output, &mut scratch);
                } else {
                    fft.process::<false>(&input, &mut output, &mut scratch);
                }
                let expected = naive_dft(&input, inverse);
                for k in 0..n {
                    assert!(
                        (output[k] - expected[k]).norm() < 1e-9,
                        "n = {n}, inverse = {inverse}, bin {k}: {} vs {}",
                        output[k],
                        expected[k]
                    );
                }
            }
        }
    }
}
