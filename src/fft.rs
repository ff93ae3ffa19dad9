//! Fast Fourier Transform implementation
//!
//! This module provides the generic complex engine: an iterative radix-2 decimation-in-time
//! FFT for power-of-two sizes. It accepts split (separate real/imaginary slices) and
//! interleaved [`Complex`] buffers, and computes forward and inverse transforms from the
//! same routine.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use core::marker::PhantomData;

use num_complex::Complex;
use num_traits::{Float, FromPrimitive};

use crate::common::{bits_needed, is_power_of_two, length, reverse_bits};
use crate::error::{check_length, FftError, SizeRequirement};
use crate::twiddle::StageSeed;

/// A power-of-2 complex FFT.
///
/// The forward transform computes `X[k] = Σ x[n]·e^{-2πikn/N}`; the inverse uses the
/// conjugate kernel and divides by `N`, so a forward/inverse pair is the identity.
#[derive(Debug, Clone)]
pub struct ComplexFFT<T: Float> {
    size: usize,
    bit_reversed: Vec<usize>,
    stages: Vec<StageSeed>,
    _marker: PhantomData<T>,
}

impl<T: Float + FromPrimitive> ComplexFFT<T> {
    /// Create a new FFT with the specified size, which must be a power of two
    pub fn new(size: usize) -> Result<Self, FftError> {
        if !is_power_of_two(size) {
            return Err(FftError::UnsupportedSize {
                size,
                requirement: SizeRequirement::PowerOfTwo,
            });
        }

        let bits = bits_needed(size);
        let bit_reversed = (0..size).map(|i| reverse_bits(i, bits)).collect();
        let stages = (1..=bits).map(|stage| StageSeed::new(1 << stage)).collect();
        log::debug!("planned radix-2 FFT of size {size} ({bits} stages)");

        Ok(Self {
            size,
            bit_reversed,
            stages,
            _marker: PhantomData,
        })
    }

    /// The transform size
    pub fn size(&self) -> usize {
        self.size
    }

    /// Transform split-complex data in either direction.
    ///
    /// `imag_in` may be `None` for purely real input. All buffers must have exactly
    /// [`size`](Self::size) elements; lengths are checked before anything is written.
    pub fn process(
        &self,
        inverse: bool,
        real_in: &[T],
        imag_in: Option<&[T]>,
        real_out: &mut [T],
        imag_out: &mut [T],
    ) -> Result<(), FftError> {
        check_length("real_in", self.size, real_in.len())?;
        if let Some(imag_in) = imag_in {
            check_length("imag_in", self.size, imag_in.len())?;
        }
        check_length("real_out", self.size, real_out.len())?;
        check_length("imag_out", self.size, imag_out.len())?;

        for (i, &j) in self.bit_reversed.iter().enumerate() {
            real_out[j] = real_in[i];
            imag_out[j] = imag_in.map_or(T::zero(), |imag| imag[i]);
        }
        self.butterflies_split(inverse, real_out, imag_out);

        if inverse {
            let scale = T::one() / length::<T>(self.size);
            for (re, im) in real_out.iter_mut().zip(imag_out.iter_mut()) {
                *re = *re * scale;
                *im = *im * scale;
            }
        }
        Ok(())
    }

    /// Perform a forward FFT with split complex representation
    pub fn fft_split(&self, in_r: &[T], in_i: &[T], out_r: &mut [T], out_i: &mut [T]) -> Result<(), FftError> {
        self.process(false, in_r, Some(in_i), out_r, out_i)
    }

    /// Perform an inverse FFT with split complex representation
    pub fn ifft_split(&self, in_r: &[T], in_i: &[T], out_r: &mut [T], out_i: &mut [T]) -> Result<(), FftError> {
        self.process(true, in_r, Some(in_i), out_r, out_i)
    }

    /// Perform a forward FFT
    pub fn fft(&self, time: &[Complex<T>], freq: &mut [Complex<T>]) -> Result<(), FftError> {
        self.process_interleaved(false, time, freq)
    }

    /// Perform an inverse FFT, normalized by `1/N`
    pub fn ifft(&self, freq: &[Complex<T>], time: &mut [Complex<T>]) -> Result<(), FftError> {
        self.process_interleaved(true, freq, time)
    }

    fn process_interleaved(
        &self,
        inverse: bool,
        input: &[Complex<T>],
        output: &mut [Complex<T>],
    ) -> Result<(), FftError> {
        check_length("input", self.size, input.len())?;
        check_length("output", self.size, output.len())?;

        for (value, &j) in input.iter().zip(&self.bit_reversed) {
            output[j] = *value;
        }
        self.butterflies(inverse, output);

        if inverse {
            let scale = T::one() / length::<T>(self.size);
            output.iter_mut().for_each(|value| *value = value.scale(scale));
        }
        Ok(())
    }

    // In-place butterfly passes over bit-reversed split data
    fn butterflies_split(&self, inverse: bool, re: &mut [T], im: &mut [T]) {
        for seed in &self.stages {
            let half = seed.block() / 2;
            for start in (0..self.size).step_by(seed.block()) {
                for (j, w) in (start..start + half).zip(seed.twiddles::<T>(inverse)) {
                    let k = j + half;
                    let tr = w.re * re[k] - w.im * im[k];
                    let ti = w.re * im[k] + w.im * re[k];

                    re[k] = re[j] - tr;
                    im[k] = im[j] - ti;
                    re[j] = re[j] + tr;
                    im[j] = im[j] + ti;
                }
            }
        }
    }

    // In-place butterfly passes over bit-reversed interleaved data
    fn butterflies(&self, inverse: bool, data: &mut [Complex<T>]) {
        for seed in &self.stages {
            let half = seed.block() / 2;
            for block in data.chunks_exact_mut(seed.block()) {
                let (low, high) = block.split_at_mut(half);
                for ((a, b), w) in low.iter_mut().zip(high.iter_mut()).zip(seed.twiddles::<T>(inverse)) {
                    let t = *b * w;
                    *b = *a - t;
                    *a = *a + t;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_impulse() {
        let fft = ComplexFFT::<f64>::new(4).unwrap();
        let real_in = [1.0, 0.0, 0.0, 0.0];
        let mut real_out = [0.0; 4];
        let mut imag_out = [0.0; 4];

        fft.process(false, &real_in, None, &mut real_out, &mut imag_out).unwrap();

        // All values should be 1.0 for a delta function input
        for i in 0..4 {
            assert!((real_out[i] - 1.0).abs() < 1e-12);
            assert!(imag_out[i].abs() < 1e-12);
        }
    }

    #[test]
    fn test_constant() {
        let fft = ComplexFFT::<f64>::new(4).unwrap();
        let mut real_out = [0.0; 4];
        let mut imag_out = [0.0; 4];

        fft.process(false, &[1.0; 4], Some(&[0.0; 4][..]), &mut real_out, &mut imag_out).unwrap();

        assert!((real_out[0] - 4.0).abs() < 1e-12);
        for i in 1..4 {
            assert!(real_out[i].abs() < 1e-12);
        }
        assert!(imag_out.iter().all(|x| x.abs() < 1e-12));
    }

    #[test]
    fn test_sine_and_inverse() {
        let fft = ComplexFFT::<f32>::new(4).unwrap();

        let input = vec![
            Complex::new(0.0, 0.0),
            Complex::new(1.0, 0.0),
            Complex::new(0.0, 0.0),
            Complex::new(-1.0, 0.0),
        ];
        let mut output = vec![Complex::new(0.0, 0.0); 4];
        fft.fft(&input, &mut output).unwrap();

        // Energy sits in bin 1 and its mirror
        assert!(output[0].norm() < 1e-6);
        assert!((output[1].im + 2.0).abs() < 1e-6);
        assert!(output[2].norm() < 1e-6);
        assert!((output[3].im - 2.0).abs() < 1e-6);

        let mut restored = vec![Complex::new(0.0, 0.0); 4];
        fft.ifft(&output, &mut restored).unwrap();
        for i in 0..4 {
            assert!((restored[i] - input[i]).norm() < 1e-6);
        }
    }

    #[test]
    fn test_split_matches_interleaved() {
        let fft = ComplexFFT::<f64>::new(16).unwrap();
        let re: Vec<f64> = (0..16).map(|i| (i as f64 * 0.3).sin()).collect();
        let im: Vec<f64> = (0..16).map(|i| (i as f64 * 0.7).cos()).collect();
        let input: Vec<Complex<f64>> = re.iter().zip(&im).map(|(&r, &i)| Complex::new(r, i)).collect();

        let mut out_r = vec![0.0; 16];
        let mut out_i = vec![0.0; 16];
        let mut out = vec![Complex::new(0.0, 0.0); 16];
        fft.fft_split(&re, &im, &mut out_r, &mut out_i).unwrap();
        fft.fft(&input, &mut out).unwrap();

        for k in 0..16 {
            assert!((out[k].re - out_r[k]).abs() < 1e-12);
            assert!((out[k].im - out_i[k]).abs() < 1e-12);
        }

        let mut back_r = vec![0.0; 16];
        let mut back_i = vec![0.0; 16];
        fft.ifft_split(&out_r, &out_i, &mut back_r, &mut back_i).unwrap();
        for k in 0..16 {
            assert!((back_r[k] - re[k]).abs() < 1e-12);
            assert!((back_i[k] - im[k]).abs() < 1e-12);
        }
    }

    #[test]
    fn test_size_one_is_identity() {
        let fft = ComplexFFT::<f64>::new(1).unwrap();
        let mut real_out = [0.0];
        let mut imag_out = [0.0];
        fft.process(true, &[3.0], Some(&[-2.0][..]), &mut real_out, &mut imag_out).unwrap();
        assert_eq!(real_out, [3.0]);
        assert_eq!(imag_out, [-2.0]);
    }

    #[test]
    fn test_rejects_bad_sizes() {
        for size in [0, 3, 6, 12, 1000] {
            assert_eq!(
                ComplexFFT::<f64>::new(size).unwrap_err(),
                FftError::UnsupportedSize {
                    size,
                    requirement: SizeRequirement::PowerOfTwo
                }
            );
        }
    }

    #[test]
    fn test_length_checked_before_writing() {
        let fft = ComplexFFT::<f64>::new(8).unwrap();
        let mut real_out = [7.0; 8];
        let mut imag_out = [7.0; 4];

        let err = fft
            .process(false, &[1.0; 8], None, &mut real_out, &mut imag_out)
            .unwrap_err();
        assert_eq!(
            err,
            FftError::BufferLength {
                buffer: "imag_out",
                expected: 8,
                actual: 4
            }
        );
        assert!(real_out.iter().all(|&x| x == 7.0));
        assert!(imag_out.iter().all(|&x| x == 7.0));
    }

    #[test]
    fn test_single_precision_tracks_double() {
        let size = 1 << 14;
        let signal: Vec<f64> = (0..size)
            .map(|i| 0.5 * (i as f64 * 0.013).sin() + 0.25 * (i as f64 * 0.71).cos())
            .collect();
        let signal_f32: Vec<f32> = signal.iter().map(|&x| x as f32).collect();

        let mut real = vec![0.0; size];
        let mut imag = vec![0.0; size];
        ComplexFFT::<f64>::new(size)
            .unwrap()
            .process(false, &signal, None, &mut real, &mut imag)
            .unwrap();

        let mut real_f32 = vec![0.0f32; size];
        let mut imag_f32 = vec![0.0f32; size];
        ComplexFFT::<f32>::new(size)
            .unwrap()
            .process(false, &signal_f32, None, &mut real_f32, &mut imag_f32)
            .unwrap();

        let peak = real.iter().zip(&imag).map(|(r, i)| r.hypot(*i)).fold(0.0, f64::max);
        for k in 0..size {
            let error = (real[k] - f64::from(real_f32[k])).hypot(imag[k] - f64::from(imag_f32[k]));
            assert!(error < 1e-5 * peak, "bin {k}: error {error} against peak {peak}");
        }
    }

    #[test]
    fn test_single_precision_round_trip() {
        let size = 1 << 16;
        let fft = ComplexFFT::<f32>::new(size).unwrap();
        let signal: Vec<f32> = (0..size).map(|i| 0.5 * (i as f32 * 0.05).sin()).collect();

        let mut real = vec![0.0; size];
        let mut imag = vec![0.0; size];
        fft.process(false, &signal, None, &mut real, &mut imag).unwrap();

        let mut restored = vec![0.0; size];
        let mut remainder = vec![0.0; size];
        fft.process(true, &real, Some(&imag[..]), &mut restored, &mut remainder)
            .unwrap();

        for (a, b) in restored.iter().zip(&signal) {
            assert!((a - b).abs() < 1e-4);
        }
        assert!(remainder.iter().all(|x| x.abs() < 1e-4));
    }
}
