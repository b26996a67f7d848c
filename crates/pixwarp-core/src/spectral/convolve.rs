//! Frequency-domain convolution driver.

use log::{debug, trace};

use super::fft::Spectrum;
use super::padding::{optimal_transform_len, pad};
use super::SpectralError;
use crate::filter::Kernel;
use crate::raster::{normalize_min_max, Raster, RealGrid};

/// Pad an image grid and a kernel to a common fast transform size and
/// forward-transform both.
///
/// Each axis is sized to `optimal_transform_len(image + kernel - 1)`, which is
/// large enough for the circular convolution to equal the linear one.
///
/// # Errors
///
/// Returns `SpectralError::DimensionMismatch` if the image has a zero dimension.
pub fn prepare_grid(
    image: RealGrid,
    kernel: &Kernel,
) -> Result<(Spectrum, Spectrum), SpectralError> {
    if image.is_empty() {
        return Err(SpectralError::DimensionMismatch(format!(
            "image must be non-empty, got {}x{}",
            image.width, image.height
        )));
    }

    let width = optimal_transform_len(image.width + kernel.width() as usize - 1);
    let height = optimal_transform_len(image.height + kernel.height() as usize - 1);
    trace!("padding to {}x{}", width, height);

    let image = pad(image, width, height)?;
    let kernel = pad(kernel.to_grid(), width, height)?;

    trace!("forward transforms");
    Ok((Spectrum::forward(image), Spectrum::forward(kernel)))
}

/// [`prepare_grid`] for an 8-bit raster.
pub fn prepare(image: &Raster, kernel: &Kernel) -> Result<(Spectrum, Spectrum), SpectralError> {
    prepare_grid(RealGrid::from_raster(image), kernel)
}

/// Keep only the top-left `width x height` region of a raster.
///
/// Dimensions larger than the raster are clamped to it.
pub fn crop(raster: Raster, width: u32, height: u32) -> Raster {
    let width = width.min(raster.width);
    let height = height.min(raster.height);
    if width == raster.width && height == raster.height {
        return raster;
    }
    if width == 0 || height == 0 {
        return Raster::new(width, height, Vec::new());
    }

    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for row in raster
        .pixels
        .chunks_exact(raster.width as usize)
        .take(height as usize)
    {
        pixels.extend_from_slice(&row[..width as usize]);
    }
    Raster::new(width, height, pixels)
}

/// Convolve a raster with a kernel through the Fourier domain.
///
/// The product of the two spectra is inverse-transformed, min-max normalized
/// to `0..=255` over the whole padded grid, then cropped to the image size.
///
/// # Errors
///
/// Returns `SpectralError::DimensionMismatch` if the image has a zero dimension.
pub fn convolve_fft(image: &Raster, kernel: &Kernel) -> Result<Raster, SpectralError> {
    debug!(
        "FFT convolution: image {}x{}, kernel {}x{}",
        image.width,
        image.height,
        kernel.width(),
        kernel.height()
    );

    let (image_spectrum, kernel_spectrum) = prepare(image, kernel)?;
    debug!(
        "transform size {}x{}",
        image_spectrum.width(),
        image_spectrum.height()
    );

    trace!("multiplying spectra");
    let product = image_spectrum.multiply(&kernel_spectrum)?;

    trace!("inverse transform");
    let spatial = product.inverse();

    trace!("normalizing and cropping");
    Ok(crop(normalize_min_max(spatial), image.width, image.height))
}

/// Convolve a grid with a kernel through the Fourier domain, without
/// normalization.
///
/// The result is the top-left image-sized block of the linear convolution,
/// matching [`crate::filter::convolve_direct_raw`] up to rounding error.
pub fn convolve_fft_raw(image: &RealGrid, kernel: &Kernel) -> Result<RealGrid, SpectralError> {
    let (width, height) = (image.width, image.height);
    let (image_spectrum, kernel_spectrum) = prepare_grid(image.clone(), kernel)?;
    let product = image_spectrum.multiply(&kernel_spectrum)?;
    Ok(product.inverse().crop(width, height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::convolve_direct_raw;

    fn assert_close(a: &[f64], b: &[f64], tol: f64) {
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b) {
            assert!((x - y).abs() < tol, "{} vs {}", x, y);
        }
    }

    fn sample_raster() -> Raster {
        let pixels = (0..35u32).map(|v| ((v * 37) % 256) as u8).collect::<Vec<_>>();
        let mut raster = Raster::new(7, 5, pixels);
        raster.set(0, 0, 0);
        raster.set(6, 4, 255);
        raster
    }

    #[test]
    fn test_identity_kernel_reproduces_image() {
        let image = sample_raster();
        let out = convolve_fft(&image, &Kernel::identity()).unwrap();
        assert_eq!(out, image);
    }

    /// Raster with values spanning exactly 40..=125.
    fn mid_range_raster(width: u32, height: u32) -> Raster {
        let n = width * height;
        let mut pixels: Vec<u8> = (0..n).map(|i| (40 + (i * 7) % 86) as u8).collect();
        pixels[n as usize - 1] = 125;
        Raster::new(width, height, pixels)
    }

    #[test]
    fn test_identity_kernel_stretches_unpadded_range() {
        // 6x5 needs no padding, so min and max come from the image itself.
        let image = mid_range_raster(6, 5);
        let out = convolve_fft(&image, &Kernel::identity()).unwrap();
        let expected: Vec<u8> = image.pixels.iter().map(|&v| (v - 40) * 3).collect();
        assert_eq!(out.pixels, expected);
    }

    #[test]
    fn test_identity_kernel_stretches_against_padding() {
        // 7x5 is padded to 8x5; the zero padding becomes the minimum.
        let image = mid_range_raster(7, 5);
        let out = convolve_fft(&image, &Kernel::identity()).unwrap();
        let expected: Vec<u8> = image
            .pixels
            .iter()
            .map(|&v| (v as f64 * 255.0 / 125.0).round() as u8)
            .collect();
        assert_eq!(out.pixels, expected);
    }

    #[test]
    fn test_identity_kernel_constant_image() {
        // Unpadded shapes are flat up to FFT round-off and map to 0.
        for (w, h) in [(6, 5), (5, 3), (4, 4), (8, 8), (1, 1)] {
            let out = convolve_fft(&Raster::filled(w, h, 100), &Kernel::identity()).unwrap();
            assert_eq!(out.pixels, vec![0; (w * h) as usize], "{}x{}", w, h);
        }

        // 7x7 is padded to 8x8, so the image sits above the zero padding.
        let out = convolve_fft(&Raster::filled(7, 7, 100), &Kernel::identity()).unwrap();
        assert_eq!(out.pixels, vec![255; 49]);
    }

    #[test]
    fn test_output_has_image_dimensions() {
        let image = sample_raster();
        let kernel = Kernel::box_filter(3).unwrap();
        let out = convolve_fft(&image, &kernel).unwrap();
        assert_eq!((out.width, out.height), (7, 5));
        assert_eq!(out.pixels.len(), 35);
    }

    #[test]
    fn test_prepare_sizes() {
        let image = Raster::filled(7, 5, 1);
        let kernel = Kernel::box_filter(3).unwrap();
        let (a, b) = prepare(&image, &kernel).unwrap();
        // 7 + 3 - 1 = 9, 5 + 3 - 1 = 7 -> 8
        assert_eq!((a.width(), a.height()), (9, 8));
        assert_eq!((b.width(), b.height()), (9, 8));
    }

    #[test]
    fn test_empty_image_rejected() {
        let image = Raster::new(0, 4, Vec::new());
        let err = convolve_fft(&image, &Kernel::identity()).unwrap_err();
        assert!(matches!(err, SpectralError::DimensionMismatch(_)));
    }

    #[test]
    fn test_raw_matches_direct() {
        let image = RealGrid::from_raster(&sample_raster());
        let kernel = Kernel::new(3, 2, vec![1.0, -2.0, 0.5, 0.25, 3.0, -1.0]).unwrap();
        let fft = convolve_fft_raw(&image, &kernel).unwrap();
        let direct = convolve_direct_raw(&image, &kernel).unwrap();
        assert_eq!((fft.width, fft.height), (7, 5));
        assert_close(&fft.data, &direct.data, 1e-6);
    }

    #[test]
    fn test_raw_is_linear() {
        let image = RealGrid::from_raster(&sample_raster());
        let kernel = Kernel::box_filter(3).unwrap();
        let base = convolve_fft_raw(&image, &kernel).unwrap();
        let scaled = convolve_fft_raw(&image.clone().scale(3.0), &kernel).unwrap();
        let expected: Vec<f64> = base.data.iter().map(|v| v * 3.0).collect();
        assert_close(&scaled.data, &expected, 1e-6);
    }

    #[test]
    fn test_crop() {
        let raster = Raster::new(3, 2, vec![1, 2, 3, 4, 5, 6]);
        let cropped = crop(raster.clone(), 2, 1);
        assert_eq!(cropped.pixels, vec![1, 2]);
        assert_eq!(crop(raster.clone(), 9, 9), raster);
    }
}
