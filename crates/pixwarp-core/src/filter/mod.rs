//! Convolution kernels and spatial-domain convolution.
//!
//! The direct convolution here computes the same values as the spectral
//! pipeline in [`crate::spectral`] and serves as its reference.

mod direct;
mod kernel;

pub use direct::{convolve_direct, convolve_direct_raw};
pub use kernel::{FilterError, Kernel};
