//! Pixwarp Core - grayscale raster transformation library
//!
//! This crate provides rotation of 8-bit single-channel rasters with selectable
//! interpolation, and convolution of rasters with real-valued kernels either in
//! the frequency domain or directly in the spatial domain.

pub mod filter;
pub mod raster;
pub mod spectral;
pub mod transform;

pub use filter::{convolve_direct, convolve_direct_raw, FilterError, Kernel};
pub use raster::{normalize_min_max, Raster, RasterError, RealGrid};
pub use spectral::{convolve_fft, convolve_fft_raw, SpectralError};
pub use transform::{
    rotate, rotate_str, rotate_with, InterpolationMode, RotationParams, SampleBounds,
    TransformError,
};

/// A pair of real coordinates.
///
/// Used both as a rotation center in pixel space and as an (abscissa, ordinate)
/// knot when evaluating Hermite splines.
#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}
