//! Spatial-domain convolution.

use log::debug;

use super::kernel::{FilterError, Kernel};
use crate::raster::{normalize_min_max, Raster, RealGrid};

/// Convolve a grid with a kernel directly in the spatial domain.
///
/// The image is treated as zero outside its extent. Output pixel `(c, r)` is
/// `sum(k[ky][kx] * img[r - ky][c - kx])`, i.e. the top-left
/// `width x height` block of the full linear convolution.
///
/// # Errors
///
/// Returns `FilterError::InvalidDimensions` if the grid has a zero dimension.
pub fn convolve_direct_raw(image: &RealGrid, kernel: &Kernel) -> Result<RealGrid, FilterError> {
    if image.is_empty() {
        return Err(FilterError::InvalidDimensions {
            width: image.width,
            height: image.height,
        });
    }

    let flipped = kernel.flipped();
    let kw = flipped.width() as usize;
    let kh = flipped.height() as usize;
    let taps = flipped.as_slice();

    let mut out = RealGrid::zeros(image.width, image.height);

    // Correlate the flipped kernel with the image padded by (kh-1, kw-1)
    // zeros on the top/left; padded coordinates are shifted back on read.
    for row in 0..image.height {
        for col in 0..image.width {
            let mut acc = 0.0;
            for (a, tap_row) in taps.chunks_exact(kw).enumerate() {
                let Some(src_row) = (row + a).checked_sub(kh - 1) else {
                    continue;
                };
                for (b, &tap) in tap_row.iter().enumerate() {
                    let Some(src_col) = (col + b).checked_sub(kw - 1) else {
                        continue;
                    };
                    acc += tap * image.data[src_row * image.width + src_col];
                }
            }
            out.data[row * image.width + col] = acc;
        }
    }

    Ok(out)
}

/// Convolve a raster with a kernel and rescale the result to `0..=255`.
///
/// Min-max normalization runs over the image-sized result.
pub fn convolve_direct(image: &Raster, kernel: &Kernel) -> Result<Raster, FilterError> {
    debug!(
        "direct convolution: image {}x{}, kernel {}x{}",
        image.width,
        image.height,
        kernel.width(),
        kernel.height()
    );

    let raw = convolve_direct_raw(&RealGrid::from_raster(image), kernel)?;
    Ok(normalize_min_max(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(width: usize, height: usize) -> RealGrid {
        RealGrid::new(width, height, (0..width * height).map(|v| v as f64).collect())
    }

    #[test]
    fn test_identity_kernel_is_noop() {
        let grid = ramp(4, 3);
        let out = convolve_direct_raw(&grid, &Kernel::identity()).unwrap();
        assert_eq!(out, grid);
    }

    #[test]
    fn test_single_tap_shifts_down_right() {
        // Only k[1][1] is set: output(c, r) = img(c - 1, r - 1)
        let kernel = Kernel::new(2, 2, vec![0.0, 0.0, 0.0, 1.0]).unwrap();
        let grid = ramp(3, 3);
        let out = convolve_direct_raw(&grid, &kernel).unwrap();
        assert_eq!(out.data, vec![0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 3.0, 4.0]);
    }

    #[test]
    fn test_horizontal_difference() {
        // k = [1, -1]: output(c) = img(c) - img(c - 1)
        let kernel = Kernel::new(2, 1, vec![1.0, -1.0]).unwrap();
        let grid = RealGrid::new(4, 1, vec![1.0, 4.0, 9.0, 16.0]);
        let out = convolve_direct_raw(&grid, &kernel).unwrap();
        assert_eq!(out.data, vec![1.0, 3.0, 5.0, 7.0]);
    }

    #[test]
    fn test_box_filter_sums_neighborhood() {
        let kernel = Kernel::new(2, 2, vec![1.0; 4]).unwrap();
        let grid = RealGrid::new(2, 2, vec![1.0, 2.0, 3.0, 4.0]);
        let out = convolve_direct_raw(&grid, &kernel).unwrap();
        assert_eq!(out.data, vec![1.0, 3.0, 4.0, 10.0]);
    }

    #[test]
    fn test_kernel_larger_than_image() {
        let kernel = Kernel::new(3, 3, vec![1.0; 9]).unwrap();
        let grid = RealGrid::new(1, 1, vec![5.0]);
        let out = convolve_direct_raw(&grid, &kernel).unwrap();
        assert_eq!(out.data, vec![5.0]);
    }

    #[test]
    fn test_empty_image_rejected() {
        let err = convolve_direct_raw(&RealGrid::zeros(0, 2), &Kernel::identity()).unwrap_err();
        assert_eq!(err, FilterError::InvalidDimensions { width: 0, height: 2 });
    }

    #[test]
    fn test_convolve_direct_normalizes() {
        let image = Raster::new(3, 1, vec![10, 20, 30]);
        let out = convolve_direct(&image, &Kernel::identity()).unwrap();
        assert_eq!(out.pixels, vec![0, 128, 255]);
    }
}
