//! WASM bindings for raster convolution.
//!
//! Both entry points take the kernel as a flat row-major `Float64Array` plus
//! its dimensions.

use crate::types::JsRaster;
use pixwarp_core::{convolve_direct as core_direct, convolve_fft as core_fft, Kernel};
use wasm_bindgen::prelude::*;

/// Convolve a raster with a kernel through the Fourier domain.
///
/// The result is rescaled so its darkest value is 0 and its brightest 255.
///
/// # Arguments
///
/// * `image` - Source raster
/// * `kernel_width` - Kernel columns
/// * `kernel_height` - Kernel rows
/// * `kernel` - `kernel_width * kernel_height` coefficients, row-major
///
/// # Example (TypeScript)
///
/// ```typescript
/// const blurred = convolve_fft(raster, 3, 3, new Float64Array(9).fill(1 / 9));
/// ```
#[wasm_bindgen]
pub fn convolve_fft(
    image: &JsRaster,
    kernel_width: u32,
    kernel_height: u32,
    kernel: Vec<f64>,
) -> Result<JsRaster, JsValue> {
    fft_inner(image, kernel_width, kernel_height, kernel).map_err(|e| JsValue::from_str(&e))
}

/// Convolve a raster with a kernel in the spatial domain.
///
/// Same arguments as [`convolve_fft`]. Suited to small kernels.
#[wasm_bindgen]
pub fn convolve_direct(
    image: &JsRaster,
    kernel_width: u32,
    kernel_height: u32,
    kernel: Vec<f64>,
) -> Result<JsRaster, JsValue> {
    direct_inner(image, kernel_width, kernel_height, kernel).map_err(|e| JsValue::from_str(&e))
}

fn fft_inner(
    image: &JsRaster,
    kernel_width: u32,
    kernel_height: u32,
    kernel: Vec<f64>,
) -> Result<JsRaster, String> {
    let src = image.to_raster().map_err(|e| e.to_string())?;
    let kernel = Kernel::new(kernel_width, kernel_height, kernel).map_err(|e| e.to_string())?;
    let result = core_fft(&src, &kernel).map_err(|e| e.to_string())?;
    Ok(JsRaster::from_raster(result))
}

fn direct_inner(
    image: &JsRaster,
    kernel_width: u32,
    kernel_height: u32,
    kernel: Vec<f64>,
) -> Result<JsRaster, String> {
    let src = image.to_raster().map_err(|e| e.to_string())?;
    let kernel = Kernel::new(kernel_width, kernel_height, kernel).map_err(|e| e.to_string())?;
    let result = core_direct(&src, &kernel).map_err(|e| e.to_string())?;
    Ok(JsRaster::from_raster(result))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_image() -> JsRaster {
        let mut pixels: Vec<u8> = (0..48u32).map(|i| ((i * 53) % 256) as u8).collect();
        pixels[0] = 0;
        pixels[47] = 255;
        JsRaster::new(8, 6, pixels)
    }

    #[test]
    fn test_fft_identity_kernel() {
        let img = test_image();
        let result = fft_inner(&img, 1, 1, vec![1.0]).unwrap();
        assert_eq!(result.pixels(), img.pixels());
    }

    #[test]
    fn test_direct_identity_kernel() {
        let img = test_image();
        let result = direct_inner(&img, 1, 1, vec![1.0]).unwrap();
        assert_eq!(result.pixels(), img.pixels());
    }

    #[test]
    fn test_box_blur_keeps_dimensions() {
        let img = test_image();
        let kernel = vec![1.0 / 9.0; 9];
        let fft = fft_inner(&img, 3, 3, kernel.clone()).unwrap();
        let direct = direct_inner(&img, 3, 3, kernel).unwrap();
        assert_eq!((fft.width(), fft.height()), (8, 6));
        assert_eq!((direct.width(), direct.height()), (8, 6));
    }

    #[test]
    fn test_kernel_length_mismatch() {
        let img = test_image();
        let err = fft_inner(&img, 3, 3, vec![1.0; 4]).err().unwrap();
        assert!(err.contains("invalid kernel"));
        assert!(direct_inner(&img, 2, 0, vec![]).is_err());
    }
}
