//! Convolution in the frequency domain.
//!
//! The pipeline is an ownership chain: each stage consumes its input buffer
//! and returns a new one.
//!
//! 1. [`pad`] image and kernel to a fast transform size ([`optimal_transform_len`])
//! 2. [`Spectrum::forward`] both
//! 3. [`Spectrum::multiply`] element-wise
//! 4. [`Spectrum::inverse`] back to a real grid
//! 5. [`normalize_min_max`](crate::raster::normalize_min_max) onto `0..=255`
//! 6. [`crop`] to the original image size

mod convolve;
mod fft;
mod padding;

use thiserror::Error;

pub use convolve::{convolve_fft, convolve_fft_raw, crop, prepare, prepare_grid};
pub use fft::Spectrum;
pub use padding::{optimal_transform_len, pad};

/// Errors that can occur in the spectral pipeline.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SpectralError {
    /// Buffer shapes are incompatible or empty
    #[error("dimension mismatch: {0}")]
    DimensionMismatch(String),
}
