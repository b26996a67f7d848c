//! WASM bindings for raster rotation.

use crate::types::JsRaster;
use pixwarp_core::{rotate_str, rotate_with, Point2D, RotationParams};
use wasm_bindgen::prelude::*;

/// Rotate a raster about a center point.
///
/// Destination pixels that map outside the source become white (255). The
/// output has the same dimensions as the input.
///
/// # Arguments
///
/// * `image` - Source raster
/// * `angle` - Rotation angle in radians
/// * `center_x` - Column of the rotation center
/// * `center_y` - Row of the rotation center
/// * `mode` - `"nearest"`, `"bilinear"` or `"bicubic"`
///
/// # Errors
///
/// Fails if the raster buffer is inconsistent or `mode` is unknown.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const rotated = rotate_image(raster, Math.PI / 6, 31.5, 31.5, "bicubic");
/// ```
#[wasm_bindgen]
pub fn rotate_image(
    image: &JsRaster,
    angle: f64,
    center_x: f64,
    center_y: f64,
    mode: &str,
) -> Result<JsRaster, JsValue> {
    rotate_inner(image, angle, Point2D::new(center_x, center_y), mode)
        .map_err(|e| JsValue::from_str(&e))
}

/// Rotate a raster using a parameter object.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const rotated = rotate_image_with_params(raster, {
///   angle: 0.5,
///   center: { x: 10, y: 10 },
///   mode: "bilinear",
///   bounds: "inclusive",
/// });
/// ```
///
/// Missing fields fall back to their defaults.
#[wasm_bindgen]
pub fn rotate_image_with_params(image: &JsRaster, params: JsValue) -> Result<JsRaster, JsValue> {
    let params: RotationParams = serde_wasm_bindgen::from_value(params)
        .map_err(|e| JsValue::from_str(&format!("Invalid rotation params: {}", e)))?;

    rotate_params_inner(image, &params).map_err(|e| JsValue::from_str(&e))
}

fn rotate_inner(
    image: &JsRaster,
    angle: f64,
    center: Point2D,
    mode: &str,
) -> Result<JsRaster, String> {
    let src = image.to_raster().map_err(|e| e.to_string())?;
    let result = rotate_str(&src, angle, center, mode).map_err(|e| e.to_string())?;
    Ok(JsRaster::from_raster(result))
}

fn rotate_params_inner(image: &JsRaster, params: &RotationParams) -> Result<JsRaster, String> {
    let src = image.to_raster().map_err(|e| e.to_string())?;
    Ok(JsRaster::from_raster(rotate_with(&src, params)))
}
