//! Real-valued grids used between convolution stages.

use log::warn;

use super::types::Raster;

/// A row-major grid of `f64` values.
///
/// Convolution results live here until they are rescaled into a [`Raster`].
#[derive(Debug, Clone, PartialEq)]
pub struct RealGrid {
    /// Number of columns.
    pub width: usize,
    /// Number of rows.
    pub height: usize,
    /// Values in row-major order. Length should be width * height.
    pub data: Vec<f64>,
}

impl RealGrid {
    /// Create a new RealGrid with the given dimensions and values.
    pub fn new(width: usize, height: usize, data: Vec<f64>) -> Self {
        debug_assert_eq!(data.len(), width * height, "Grid buffer size mismatch");
        Self {
            width,
            height,
            data,
        }
    }

    /// Create a grid filled with zeros.
    pub fn zeros(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0.0; width * height],
        }
    }

    /// Widen the samples of a raster to `f64`.
    pub fn from_raster(raster: &Raster) -> Self {
        Self {
            width: raster.width as usize,
            height: raster.height as usize,
            data: raster.pixels.iter().map(|&v| v as f64).collect(),
        }
    }

    /// Get the value at `(col, row)`, or `None` outside the grid.
    #[inline]
    pub fn get(&self, col: usize, row: usize) -> Option<f64> {
        if col >= self.width || row >= self.height {
            return None;
        }
        self.data.get(row * self.width + col).copied()
    }

    /// Multiply every value by `factor`.
    pub fn scale(mut self, factor: f64) -> Self {
        for v in &mut self.data {
            *v *= factor;
        }
        self
    }

    /// Keep only the top-left `width x height` block.
    ///
    /// Dimensions larger than the grid are clamped to it.
    pub fn crop(self, width: usize, height: usize) -> Self {
        let width = width.min(self.width);
        let height = height.min(self.height);
        if width == self.width && height == self.height {
            return self;
        }
        if width == 0 || height == 0 {
            return Self::zeros(width, height);
        }

        let mut data = Vec::with_capacity(width * height);
        for row in self.data.chunks_exact(self.width).take(height) {
            data.extend_from_slice(&row[..width]);
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Smallest and largest value, or `None` for an empty grid.
    pub fn min_max(&self) -> Option<(f64, f64)> {
        let mut iter = self.data.iter().copied();
        let first = iter.next()?;
        Some(iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }

    /// Check if the grid holds no values.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.data.is_empty()
    }
}

/// Ranges at or below this fraction of the grid's magnitude count as flat.
///
/// FFT round-off on a constant grid is around `1e-16` relative.
const FLAT_RELATIVE_TOLERANCE: f64 = 1e-9;

/// Rescale a grid so its minimum maps to 0 and its maximum to 255.
///
/// Values are rounded to the nearest level. A flat grid, whose range is at
/// most `1e-9 * max(|min|, |max|, 1)`, maps entirely to 0.
pub fn normalize_min_max(grid: RealGrid) -> Raster {
    let (width, height) = (grid.width as u32, grid.height as u32);
    let Some((min, max)) = grid.min_max() else {
        return Raster::new(width, height, Vec::new());
    };

    let range = max - min;
    let magnitude = min.abs().max(max.abs()).max(1.0);
    let scale = if range > FLAT_RELATIVE_TOLERANCE * magnitude {
        255.0 / range
    } else {
        warn!("normalizing a flat {}x{} grid; output is all zero", width, height);
        0.0
    };

    let pixels = grid
        .data
        .iter()
        .map(|&v| ((v - min) * scale).round().clamp(0.0, 255.0) as u8)
        .collect();

    Raster::new(width, height, pixels)
}
