//! Transform sizing and zero padding.

use super::SpectralError;
use crate::raster::RealGrid;

/// Smallest length `>= n` whose only prime factors are 2, 3 and 5.
///
/// Mixed-radix transforms of such lengths are fast. `n <= 1` gives 1.
pub fn optimal_transform_len(n: usize) -> usize {
    let mut m = n.max(1);
    while !is_5_smooth(m) {
        m += 1;
    }
    m
}

fn is_5_smooth(mut m: usize) -> bool {
    for p in [2, 3, 5] {
        while m % p == 0 {
            m /= p;
        }
    }
    m == 1
}

/// Zero-pad a grid on the bottom and right to `width x height`.
///
/// # Errors
///
/// Returns `SpectralError::DimensionMismatch` if the target is smaller than
/// the grid in either dimension.
pub fn pad(grid: RealGrid, width: usize, height: usize) -> Result<RealGrid, SpectralError> {
    if width < grid.width || height < grid.height {
        return Err(SpectralError::DimensionMismatch(format!(
            "cannot pad {}x{} grid to {}x{}",
            grid.width, grid.height, width, height
        )));
    }
    if width == grid.width && height == grid.height {
        return Ok(grid);
    }

    let mut data = Vec::with_capacity(width * height);
    if grid.width > 0 {
        for row in grid.data.chunks_exact(grid.width) {
            data.extend_from_slice(row);
            data.resize(data.len() + width - grid.width, 0.0);
        }
    }
    data.resize(width * height, 0.0);

    Ok(RealGrid::new(width, height, data))
}
