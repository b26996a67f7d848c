//! Pixwarp WASM - WebAssembly bindings for Pixwarp
//!
//! This crate exposes the pixwarp-core rotation and convolution operations
//! to JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper for grayscale rasters
//! - `transform` - Rotation bindings
//! - `spectral` - FFT and direct convolution bindings
//! - `logging` - Browser console backend for the `log` facade
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsRaster, rotate_image } from '@pixwarp/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const raster = new JsRaster(width, height, grayBytes);
//! const [cx, cy] = [(width - 1) / 2, (height - 1) / 2];
//! const rotated = rotate_image(raster, Math.PI / 4, cx, cy, "bilinear");
//! ```

use wasm_bindgen::prelude::*;

mod logging;
mod spectral;
mod transform;
mod types;

// Re-export public types
pub use spectral::{convolve_direct, convolve_fft};
pub use transform::{rotate_image, rotate_image_with_params};
pub use types::JsRaster;

/// Initialize the WASM module (called automatically on load)
///
/// Routes `log` output from pixwarp-core to the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    logging::install(log::LevelFilter::Info);
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
