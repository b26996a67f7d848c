//! Convolution kernels.

use thiserror::Error;

use crate::raster::RealGrid;

/// Errors that can occur during spatial filtering.
#[derive(Debug, Error, PartialEq)]
pub enum FilterError {
    /// Kernel dimensions or values are unusable
    #[error("invalid kernel: {0}")]
    InvalidKernel(String),

    /// Input image has a zero dimension
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
}

/// A 2D convolution kernel with real coefficients.
///
/// The kernel origin is its top-left element: convolving with a kernel
/// that has a single non-zero element at `(kx, ky)` shifts the image by
/// `kx` columns and `ky` rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    /// Width of the kernel
    width: u32,
    /// Height of the kernel
    height: u32,
    /// Kernel data (row-major order)
    data: Vec<f64>,
}

impl Kernel {
    /// Create a kernel from row-major coefficients.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::InvalidKernel` if a dimension is zero, the data
    /// length doesn't match, or a coefficient is not finite.
    pub fn new(width: u32, height: u32, data: Vec<f64>) -> Result<Self, FilterError> {
        if width == 0 || height == 0 {
            return Err(FilterError::InvalidKernel(format!(
                "dimensions must be non-zero, got {}x{}",
                width, height
            )));
        }

        let expected = (width as usize) * (height as usize);
        if data.len() != expected {
            return Err(FilterError::InvalidKernel(format!(
                "expected {} coefficients for {}x{}, got {}",
                expected,
                width,
                height,
                data.len()
            )));
        }

        if let Some(bad) = data.iter().find(|v| !v.is_finite()) {
            return Err(FilterError::InvalidKernel(format!("coefficient {} is not finite", bad)));
        }

        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// The 1x1 kernel with coefficient 1.
    pub fn identity() -> Self {
        Self {
            width: 1,
            height: 1,
            data: vec![1.0],
        }
    }

    /// Create a box (averaging) kernel. All values are `1/(size*size)`.
    pub fn box_filter(size: u32) -> Result<Self, FilterError> {
        let n = (size as usize) * (size as usize);
        Self::new(size, size, vec![1.0 / n as f64; n])
    }

    /// Get the kernel width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the kernel height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the coefficient at `(col, row)`.
    #[inline]
    pub fn get(&self, col: u32, row: u32) -> Option<f64> {
        if col >= self.width || row >= self.height {
            return None;
        }
        self.data
            .get(row as usize * self.width as usize + col as usize)
            .copied()
    }

    /// Coefficients in row-major order.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// The kernel rotated by 180 degrees.
    ///
    /// Correlating with the flipped kernel is convolving with the original.
    pub fn flipped(&self) -> Self {
        Self {
            width: self.width,
            height: self.height,
            data: self.data.iter().rev().copied().collect(),
        }
    }

    /// Copy the coefficients into a real grid of the same shape.
    pub fn to_grid(&self) -> RealGrid {
        RealGrid::new(self.width as usize, self.height as usize, self.data.clone())
    }
}
