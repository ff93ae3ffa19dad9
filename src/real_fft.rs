//! Real-input FFT
//!
//! The spectrum of a real signal is conjugate-symmetric, so only the `N/2 + 1` bins up to
//! Nyquist carry information. [`RealFFT`] computes exactly those by packing the even and odd
//! samples into one half-size complex sequence, transforming it, and separating the two
//! interleaved spectra with a final twiddle pass. The inverse runs the same steps backwards.

#[cfg(feature = "std")]
use std::f64::consts::PI;

#[cfg(not(feature = "std"))]
use core::f64::consts::PI;

#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};

use num_complex::Complex;
use num_traits::{Float, FromPrimitive};

use crate::common::{constant, is_even, length};
use crate::error::{check_length, FftError, SizeRequirement};
use crate::mixed_radix::MixedRadixFFT;

/// FFT for real-valued signals of any even length
#[derive(Debug, Clone)]
pub struct RealFFT<T: Float> {
    size: usize,
    half: MixedRadixFFT<T>,
    /// `-i·e^{-2πik/N}` for `k` in `0..=N/4`, separating the even/odd spectra
    split_twiddles: Vec<Complex<T>>,
    symmetry_tolerance: Option<T>,
}

/// Working memory for one [`RealFFT`], reusable across calls.
///
/// Obtained from [`RealFFT::scratch`]; only valid for plans of the same size.
#[derive(Debug, Clone)]
pub struct RealScratch<T> {
    packed: Vec<Complex<T>>,
    spectrum: Vec<Complex<T>>,
    bins: Vec<Complex<T>>,
    butterfly: Vec<Complex<T>>,
}

impl<T: Float + FromPrimitive> RealFFT<T> {
    /// Create a new real FFT with the specified size, which must be even
    pub fn new(size: usize) -> Result<Self, FftError> {
        if !is_even(size) {
            return Err(FftError::UnsupportedSize {
                size,
                requirement: SizeRequirement::Even,
            });
        }

        let half_size = size / 2;
        let split_twiddles = (0..=half_size / 2)
            .map(|k| {
                let phase = -PI * (k as f64 / half_size as f64 + 0.5);
                Complex::new(constant(phase.cos()), constant(phase.sin()))
            })
            .collect();
        let half = MixedRadixFFT::new(half_size);
        log::debug!(
            "planned real FFT of size {size} (half-size factors {:?})",
            half.factors().collect::<Vec<_>>()
        );

        Ok(Self {
            size,
            half,
            split_twiddles,
            symmetry_tolerance: None,
        })
    }

    /// Reject full-length spectra passed to the inverse transform unless
    /// `X[N-k] = conj(X[k])` holds to within `tolerance`.
    ///
    /// Without this, the upper half of a full spectrum is ignored.
    #[must_use]
    pub fn with_symmetry_check(mut self, tolerance: T) -> Self {
        self.symmetry_tolerance = Some(tolerance);
        self
    }

    /// The transform size
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of independent bins, `N/2 + 1`
    pub fn bins(&self) -> usize {
        self.size / 2 + 1
    }

    /// Allocate working memory for [`process_with_scratch`](Self::process_with_scratch)
    pub fn scratch(&self) -> RealScratch<T> {
        let zero = Complex::new(T::zero(), T::zero());
        RealScratch {
            packed: vec![zero; self.half.size()],
            spectrum: vec![zero; self.half.size()],
            bins: vec![zero; self.bins()],
            butterfly: vec![zero; self.half.scratch_len()],
        }
    }

    /// Forward transform of `N` real samples into `N/2 + 1` bins.
    ///
    /// Allocates its working memory on every call.
    pub fn forward_half(&self, time: &[T], freq: &mut [Complex<T>]) -> Result<(), FftError> {
        check_length("time", self.size, time.len())?;
        check_length("freq", self.bins(), freq.len())?;

        let mut scratch = self.scratch();
        let RealScratch {
            packed,
            spectrum,
            butterfly,
            ..
        } = &mut scratch;
        self.forward_bins(time, freq, packed, spectrum, butterfly);
        Ok(())
    }

    /// Inverse transform of `N/2 + 1` bins into `N` real samples, normalized by `1/N`.
    ///
    /// The imaginary parts of the DC and Nyquist bins are ignored. Allocates its working
    /// memory on every call.
    pub fn inverse_half(&self, freq: &[Complex<T>], time: &mut [T]) -> Result<(), FftError> {
        check_length("freq", self.bins(), freq.len())?;
        check_length("time", self.size, time.len())?;

        let mut scratch = self.scratch();
        let RealScratch {
            packed,
            spectrum,
            butterfly,
            ..
        } = &mut scratch;
        self.inverse_bins(freq, time, packed, spectrum, butterfly);
        Ok(())
    }

    /// Transform with split buffers, matching the complex engine's interface.
    ///
    /// Forward: `real_in` holds `N` samples, `imag_in` must be `None`, and the full
    /// conjugate-symmetric spectrum is written to `real_out`/`imag_out`.
    ///
    /// Inverse: `real_in`/`imag_in` hold either the full spectrum (`N` bins) or the
    /// independent half (`N/2 + 1` bins); a missing `imag_in` is read as zeros. The `N`
    /// reconstructed samples go to `real_out` and `imag_out` is zeroed.
    ///
    /// Each call allocates its working memory; hot loops should hold a [`RealScratch`]
    /// and call [`process_with_scratch`](Self::process_with_scratch) instead.
    pub fn process(
        &self,
        inverse: bool,
        real_in: &[T],
        imag_in: Option<&[T]>,
        real_out: &mut [T],
        imag_out: &mut [T],
    ) -> Result<(), FftError> {
        self.process_with_scratch(inverse, real_in, imag_in, real_out, imag_out, &mut self.scratch())
    }

    /// Same as [`process`](Self::process), without allocating
    pub fn process_with_scratch(
        &self,
        inverse: bool,
        real_in: &[T],
        imag_in: Option<&[T]>,
        real_out: &mut [T],
        imag_out: &mut [T],
        scratch: &mut RealScratch<T>,
    ) -> Result<(), FftError> {
        check_length("scratch", self.bins(), scratch.bins.len())?;
        if inverse {
            self.process_inverse(real_in, imag_in, real_out, imag_out, scratch)
        } else {
            self.process_forward(real_in, imag_in, real_out, imag_out, scratch)
        }
    }

    fn process_forward(
        &self,
        real_in: &[T],
        imag_in: Option<&[T]>,
        real_out: &mut [T],
        imag_out: &mut [T],
        scratch: &mut RealScratch<T>,
    ) -> Result<(), FftError> {
        if imag_in.is_some() {
            return Err(FftError::ImaginaryInputUnsupported);
        }
        check_length("real_in", self.size, real_in.len())?;
        check_length("real_out", self.size, real_out.len())?;
        check_length("imag_out", self.size, imag_out.len())?;

        let RealScratch {
            packed,
            spectrum,
            bins: freq,
            butterfly,
        } = scratch;
        self.forward_bins(real_in, freq, packed, spectrum, butterfly);

        let nyquist = self.size / 2;
        real_out[0] = freq[0].re;
        imag_out[0] = freq[0].im;
        real_out[nyquist] = freq[nyquist].re;
        imag_out[nyquist] = freq[nyquist].im;
        for k in 1..nyquist {
            real_out[k] = freq[k].re;
            real_out[self.size - k] = freq[k].re;
            imag_out[k] = freq[k].im;
            imag_out[self.size - k] = -freq[k].im;
        }
        Ok(())
    }

    fn process_inverse(
        &self,
        real_in: &[T],
        imag_in: Option<&[T]>,
        real_out: &mut [T],
        imag_out: &mut [T],
        scratch: &mut RealScratch<T>,
    ) -> Result<(), FftError> {
        let bins = real_in.len();
        if bins != self.size && bins != self.bins() {
            return Err(FftError::BufferLength {
                buffer: "real_in",
                expected: self.size,
                actual: bins,
            });
        }
        if let Some(imag_in) = imag_in {
            check_length("imag_in", bins, imag_in.len())?;
        }
        check_length("real_out", self.size, real_out.len())?;
        check_length("imag_out", self.size, imag_out.len())?;

        if let (Some(tolerance), true) = (self.symmetry_tolerance, bins == self.size) {
            self.check_symmetry(real_in, imag_in, tolerance)?;
        }

        let RealScratch {
            packed,
            spectrum,
            bins: freq,
            butterfly,
        } = scratch;
        for (k, bin) in freq.iter_mut().enumerate() {
            *bin = Complex::new(real_in[k], imag_in.map_or(T::zero(), |imag| imag[k]));
        }
        self.inverse_bins(freq, real_out, packed, spectrum, butterfly);
        imag_out.iter_mut().for_each(|x| *x = T::zero());
        Ok(())
    }

    fn check_symmetry(&self, real_in: &[T], imag_in: Option<&[T]>, tolerance: T) -> Result<(), FftError> {
        let imag = |k: usize| imag_in.map_or(T::zero(), |imag| imag[k]);
        for k in 1..self.size / 2 {
            let mirror = self.size - k;
            if (real_in[k] - real_in[mirror]).abs() > tolerance || (imag(k) + imag(mirror)).abs() > tolerance {
                return Err(FftError::AsymmetricSpectrum { bin: mirror });
            }
        }
        Ok(())
    }

    fn forward_bins(
        &self,
        time: &[T],
        freq: &mut [Complex<T>],
        packed: &mut [Complex<T>],
        spectrum: &mut [Complex<T>],
        butterfly: &mut [Complex<T>],
    ) {
        for (slot, pair) in packed.iter_mut().zip(time.chunks_exact(2)) {
            *slot = Complex::new(pair[0], pair[1]);
        }
        self.half.process::<false>(packed, spectrum, butterfly);
        self.split_spectra(spectrum, freq);
    }

    fn inverse_bins(
        &self,
        freq: &[Complex<T>],
        time: &mut [T],
        packed: &mut [Complex<T>],
        pairs: &mut [Complex<T>],
        butterfly: &mut [Complex<T>],
    ) {
        self.merge_spectra(freq, packed);
        self.half.process::<true>(packed, pairs, butterfly);

        let scale = T::one() / length::<T>(self.size);
        for (out, pair) in time.chunks_exact_mut(2).zip(pairs.iter()) {
            out[0] = pair.re * scale;
            out[1] = pair.im * scale;
        }
    }

    // Turns the half-size spectrum Z of z[m] = x[2m] + i·x[2m+1] into the bins of x.
    // With E/O the spectra of the even/odd samples, Z[k] = E[k] + i·O[k] and
    // X[k] = E[k] + e^{-2πik/N}·O[k].
    fn split_spectra(&self, spectrum: &[Complex<T>], freq: &mut [Complex<T>]) {
        let half_size = self.half.size();
        let one_half = constant::<T>(0.5);

        let dc = spectrum[0];
        freq[0] = Complex::new(dc.re + dc.im, T::zero());
        freq[half_size] = Complex::new(dc.re - dc.im, T::zero());

        for k in 1..=half_size / 2 {
            let fpk = spectrum[k];
            let fpnk = spectrum[half_size - k].conj();
            let sum = fpk + fpnk;
            let diff = fpk - fpnk;
            let twisted = diff * self.split_twiddles[k];

            freq[k] = (sum + twisted).scale(one_half);
            freq[half_size - k] = (sum - twisted).conj().scale(one_half);
        }
    }

    // Inverse of `split_spectra`: rebuilds 2·Z from the bins of x
    fn merge_spectra(&self, freq: &[Complex<T>], packed: &mut [Complex<T>]) {
        let half_size = self.half.size();

        let dc = freq[0].re;
        let nyquist = freq[half_size].re;
        packed[0] = Complex::new(dc + nyquist, dc - nyquist);

        for k in 1..=half_size / 2 {
            let fk = freq[k];
            let fnkc = freq[half_size - k].conj();
            let even = fk + fnkc;
            let odd = (fk - fnkc) * self.split_twiddles[k].conj();

            packed[k] = even + odd;
            packed[half_size - k] = (even - odd).conj();
        }
    }
}
