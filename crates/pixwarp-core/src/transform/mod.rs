//! Geometric transformation of rasters: rotation about a point.
//!
//! Rotation uses inverse mapping: every destination pixel is mapped back into
//! the source raster and its value is reconstructed there by one of the
//! interpolation kernels.
//!
//! # Coordinate System
//!
//! - Angles are in radians
//! - `x` grows to the right (columns), `y` grows downwards (rows)
//! - Origin is the top-left pixel

mod interpolation;
mod rotation;

pub use interpolation::{
    hermite_spline, InterpolationMode, SampleBounds, TransformError, BACKGROUND,
};
pub use rotation::{
    image_center, inverse_map, rotate, rotate_str, rotate_with, InverseRotation, RotationParams,
};
