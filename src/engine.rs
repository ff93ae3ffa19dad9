//! Backend selection for fixed-size transforms
//!
//! [`TransformEngine`] binds a transform size to one of the two FFT backends and exposes a
//! single split-buffer `process` call for both. It never fails to construct: a size the
//! chosen backend cannot handle is logged and leaves the engine inert, and every later
//! `process` call returns that configuration error without touching the output buffers.

use num_traits::{Float, FromPrimitive};

use crate::common::{is_even, is_power_of_two};
use crate::error::{FftError, SizeRequirement};
use crate::fft::ComplexFFT;
use crate::real_fft::RealFFT;

/// Which transform strategy an engine uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TransformBackend {
    /// Radix-2 complex FFT, power-of-two sizes, complex or real input
    #[default]
    Generic,
    /// Half-size packed FFT, even sizes, real input only
    RealOptimized,
}

impl TransformBackend {
    /// Size constraint of this backend
    pub const fn requirement(self) -> SizeRequirement {
        match self {
            Self::Generic => SizeRequirement::PowerOfTwo,
            Self::RealOptimized => SizeRequirement::Even,
        }
    }

    /// Whether this backend can be built for `size`
    pub const fn supports(self, size: usize) -> bool {
        self.requirement().accepts(size)
    }

    /// The cheapest backend for a size and input kind, if any fits.
    ///
    /// Real input prefers the real-optimized backend, which does roughly half the work.
    pub const fn preferred_for(size: usize, real_input: bool) -> Option<Self> {
        if real_input && is_even(size) {
            Some(Self::RealOptimized)
        } else if is_power_of_two(size) {
            Some(Self::Generic)
        } else {
            None
        }
    }
}

/// Construction-time options for a [`TransformEngine`]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EngineOptions {
    /// Validate conjugate symmetry of full spectra passed to the real-optimized inverse.
    ///
    /// The generic backend accepts any complex spectrum and ignores this setting.
    pub symmetry_tolerance: Option<f64>,
}

impl EngineOptions {
    #[must_use]
    pub fn with_symmetry_tolerance(mut self, tolerance: f64) -> Self {
        self.symmetry_tolerance = Some(tolerance);
        self
    }
}

#[derive(Debug, Clone)]
enum Backend<T: Float> {
    Generic(ComplexFFT<T>),
    RealOptimized(RealFFT<T>),
}

#[derive(Debug, Clone)]
enum State<T: Float> {
    Ready(Backend<T>),
    Degraded(FftError),
}

/// A transform engine bound to one size and backend
#[derive(Debug, Clone)]
pub struct TransformEngine<T: Float = f64> {
    size: usize,
    backend: TransformBackend,
    state: State<T>,
}

impl<T: Float + FromPrimitive> TransformEngine<T> {
    /// Create an engine, leaving it inert if `size` does not suit `backend`
    pub fn new(backend: TransformBackend, size: usize) -> Self {
        Self::with_options(backend, size, EngineOptions::default())
    }

    /// Create an engine with explicit options, leaving it inert if `size` does not suit `backend`
    pub fn with_options(backend: TransformBackend, size: usize, options: EngineOptions) -> Self {
        let state = match Self::build(backend, size, options) {
            Ok(ready) => State::Ready(ready),
            Err(err) => {
                log::error!("{backend:?} transform engine disabled: {err}");
                State::Degraded(err)
            }
        };
        Self {
            size,
            backend,
            state,
        }
    }

    /// Create an engine, failing if `size` does not suit `backend`
    pub fn try_new(backend: TransformBackend, size: usize) -> Result<Self, FftError> {
        let ready = Self::build(backend, size, EngineOptions::default())?;
        Ok(Self {
            size,
            backend,
            state: State::Ready(ready),
        })
    }

    fn build(backend: TransformBackend, size: usize, options: EngineOptions) -> Result<Backend<T>, FftError> {
        Ok(match backend {
            TransformBackend::Generic => {
                if options.symmetry_tolerance.is_some() {
                    log::debug!("symmetry tolerance ignored: the generic backend accepts any complex spectrum");
                }
                Backend::Generic(ComplexFFT::new(size)?)
            }
            TransformBackend::RealOptimized => {
                let fft = RealFFT::new(size)?;
                match options.symmetry_tolerance.and_then(T::from_f64) {
                    Some(tolerance) => Backend::RealOptimized(fft.with_symmetry_check(tolerance)),
                    None => Backend::RealOptimized(fft),
                }
            }
        })
    }

    /// The transform size this engine was built for
    pub fn size(&self) -> usize {
        self.size
    }

    /// The backend this engine was built with
    pub fn backend(&self) -> TransformBackend {
        self.backend
    }

    /// Whether construction failed and the engine ignores all work
    pub fn is_degraded(&self) -> bool {
        matches!(self.state, State::Degraded(_))
    }

    /// The configuration error that made this engine inert, if any
    pub fn configuration_error(&self) -> Option<&FftError> {
        match &self.state {
            State::Ready(_) => None,
            State::Degraded(err) => Some(err),
        }
    }

    /// Run a forward or inverse transform.
    ///
    /// See [`ComplexFFT::process`] and [`RealFFT::process`] for the buffer contracts of
    /// each backend. An inert engine returns its configuration error and writes nothing.
    pub fn process(
        &self,
        inverse: bool,
        real_in: &[T],
        imag_in: Option<&[T]>,
        real_out: &mut [T],
        imag_out: &mut [T],
    ) -> Result<(), FftError> {
        match &self.state {
            State::Ready(Backend::Generic(fft)) => fft.process(inverse, real_in, imag_in, real_out, imag_out),
            State::Ready(Backend::RealOptimized(fft)) => fft.process(inverse, real_in, imag_in, real_out, imag_out),
            State::Degraded(err) => Err(err.clone()),
        }
    }
}
