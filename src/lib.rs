//! # Cute FFT
//!
//! Fixed-size discrete Fourier transforms for signal-analysis code.
//!
//! ## Features
//!
//! - **Complex FFT**: iterative radix-2 transform for power-of-two sizes, with twiddles
//!   generated by recurrence instead of a trigonometric call per butterfly
//! - **Real FFT**: half-size packed transform for real signals of any even length
//! - **Transform engine**: runtime choice between the two backends behind one interface
//! - **Cosine distance**: similarity score between two feature vectors
//! - **no_std Support**: builds on `core` + `alloc` without the `std` feature
//!
//! ```
//! use cute_fft::{TransformBackend, TransformEngine};
//!
//! let engine = TransformEngine::<f64>::new(TransformBackend::Generic, 4);
//! let mut real = [0.0; 4];
//! let mut imag = [0.0; 4];
//! engine.process(false, &[1.0, 0.0, 0.0, 0.0], None, &mut real, &mut imag).unwrap();
//! assert_eq!(real, [1.0; 4]);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod common;
pub mod distance;
pub mod engine;
pub mod error;
pub mod fft;
mod mixed_radix;
pub mod real_fft;
pub mod twiddle;

#[cfg(feature = "wasm")]
pub mod wasm_bindings;

pub use distance::{distance, try_distance};
pub use engine::{EngineOptions, TransformBackend, TransformEngine};
pub use error::{DistanceError, FftError, SizeRequirement};
pub use fft::ComplexFFT;
pub use real_fft::{RealFFT, RealScratch};

#[cfg(feature = "wasm")]
pub use wasm_bindings::*;
