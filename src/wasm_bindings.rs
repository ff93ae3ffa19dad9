//! WebAssembly bindings for the transform engines
//!
//! This module provides WASM-compatible wrappers using concrete `f64` types instead of generics.

use wasm_bindgen::prelude::*;

use crate::common;
use crate::distance::distance;
use crate::engine::{EngineOptions, TransformBackend, TransformEngine};
use crate::error::FftError;

fn to_js_error(err: FftError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Fixed-size FFT for f64 buffers
#[wasm_bindgen]
pub struct WasmTransformEngine {
    engine: TransformEngine<f64>,
}

#[wasm_bindgen]
impl WasmTransformEngine {
    /// Create an engine; `real_optimized` selects the even-size real-input backend
    #[wasm_bindgen(constructor)]
    pub fn new(size: usize, real_optimized: bool) -> WasmTransformEngine {
        let backend = if real_optimized {
            TransformBackend::RealOptimized
        } else {
            TransformBackend::Generic
        };
        WasmTransformEngine {
            engine: TransformEngine::new(backend, size),
        }
    }

    /// Create an engine with the cheapest backend for the size, or an inert generic one
    #[wasm_bindgen]
    pub fn preferred(size: usize, real_input: bool, symmetry_tolerance: Option<f64>) -> WasmTransformEngine {
        let backend = TransformBackend::preferred_for(size, real_input).unwrap_or_default();
        let options = EngineOptions { symmetry_tolerance };
        WasmTransformEngine {
            engine: TransformEngine::with_options(backend, size, options),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn size(&self) -> usize {
        self.engine.size()
    }

    #[wasm_bindgen(getter)]
    pub fn degraded(&self) -> bool {
        self.engine.is_degraded()
    }

    #[wasm_bindgen]
    pub fn forward(
        &self,
        real_in: &[f64],
        imag_in: Option<Vec<f64>>,
        real_out: &mut [f64],
        imag_out: &mut [f64],
    ) -> Result<(), JsValue> {
        self.engine
            .process(false, real_in, imag_in.as_deref(), real_out, imag_out)
            .map_err(to_js_error)
    }

    #[wasm_bindgen]
    pub fn inverse(
        &self,
        real_in: &[f64],
        imag_in: Option<Vec<f64>>,
        real_out: &mut [f64],
        imag_out: &mut [f64],
    ) -> Result<(), JsValue> {
        self.engine
            .process(true, real_in, imag_in.as_deref(), real_out, imag_out)
            .map_err(to_js_error)
    }
}

/// Cosine distance between two vectors, `1.0` on degenerate input
#[wasm_bindgen]
pub fn cosine_distance(v1: &[f64], v2: &[f64]) -> f64 {
    distance(v1, v2)
}

/// Library version string
#[wasm_bindgen]
pub fn version() -> String {
    common::VERSION_STRING.to_string()
}
