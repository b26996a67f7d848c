//! Single-channel 8-bit rasters and real-valued grids.
//!
//! Every operation in this crate consumes and produces [`Raster`] values.
//! Decoding from and encoding to files is left to the caller; the
//! `image::GrayImage` conversions are the interchange point.
//!
//! [`RealGrid`] carries intermediate `f64` results (convolution output) and
//! [`normalize_min_max`] brings them back to the 8-bit range.
//!
//! # Coordinate System
//!
//! - Pixels are stored row-major, one sample per pixel
//! - `(col, row)` addressing, origin at the top-left corner

mod grid;
mod types;

pub use grid::{normalize_min_max, RealGrid};
pub use types::{Raster, RasterError};
