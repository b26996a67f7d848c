//! Sample reconstruction at non-integer source coordinates.
//!
//! Three kernels are available:
//! - **Nearest**: the sample whose cell contains the coordinate
//! - **Bilinear**: linear blend of the 2x2 neighborhood
//! - **Bicubic**: Hermite cubic spline over the 4x4 neighborhood
//!
//! All kernels share one boundary test and one clamped read. A coordinate
//! whose integer cell fails the boundary test yields [`BACKGROUND`]. Once the
//! cell passes, neighbors that fall outside the grid are read from the
//! nearest edge sample, so only cells at the image border are affected.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::raster::Raster;
use crate::Point2D;

/// Value written for coordinates that fall outside the source raster.
pub const BACKGROUND: u8 = 255;

/// Errors raised when configuring a transform.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransformError {
    /// A parameter could not be interpreted.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Interpolation kernel used to reconstruct a sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterpolationMode {
    /// Nearest neighbor - copies the sample of the containing cell.
    #[default]
    Nearest,
    /// Bilinear interpolation over 4 samples.
    Bilinear,
    /// Hermite bicubic interpolation over 16 samples.
    Bicubic,
}

impl FromStr for InterpolationMode {
    type Err = TransformError;

    /// Parse a mode name. `"neighbor"` is accepted as an alias of `"nearest"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nearest" | "neighbor" => Ok(InterpolationMode::Nearest),
            "bilinear" => Ok(InterpolationMode::Bilinear),
            "bicubic" => Ok(InterpolationMode::Bicubic),
            other => Err(TransformError::InvalidArgument(format!(
                "unknown interpolation mode '{}' (expected nearest, bilinear or bicubic)",
                other
            ))),
        }
    }
}

/// Lower bound applied to the integer cell of a sampling coordinate.
///
/// Upper bounds are always `i < width` and `j < height`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SampleBounds {
    /// Accept `i > 0` and `j > 0`. Column 0 and row 0 always yield background.
    #[default]
    Legacy,
    /// Accept `i >= 0` and `j >= 0`.
    Inclusive,
}

impl SampleBounds {
    /// Check whether the integer cell `(i, j)` may be sampled.
    #[inline]
    pub fn contains(self, source: &Raster, i: i64, j: i64) -> bool {
        let lower_ok = match self {
            SampleBounds::Legacy => i > 0 && j > 0,
            SampleBounds::Inclusive => i >= 0 && j >= 0,
        };
        lower_ok && i < source.width as i64 && j < source.height as i64
    }
}

impl InterpolationMode {
    /// Reconstruct the sample at source coordinate `(x, y)`.
    ///
    /// Returns [`BACKGROUND`] when `(floor(x), floor(y))` fails `bounds`
    /// or the coordinate is not finite.
    pub fn sample(self, source: &Raster, x: f64, y: f64, bounds: SampleBounds) -> u8 {
        if !x.is_finite() || !y.is_finite() {
            return BACKGROUND;
        }

        let i = x.floor() as i64;
        let j = y.floor() as i64;
        if !bounds.contains(source, i, j) {
            return BACKGROUND;
        }

        match self {
            InterpolationMode::Nearest => sample_nearest(source, i, j),
            InterpolationMode::Bilinear => sample_bilinear(source, x, y, i, j),
            InterpolationMode::Bicubic => sample_bicubic(source, x, y, i, j),
        }
    }
}

/// Read a sample as f64, clamping the position onto the grid first.
///
/// The caller guarantees a non-empty raster (the boundary test rejects
/// every cell of an empty one).
#[inline]
fn sample_clamped(source: &Raster, col: i64, row: i64) -> f64 {
    let col = col.clamp(0, source.width as i64 - 1) as usize;
    let row = row.clamp(0, source.height as i64 - 1) as usize;
    source.pixels[row * source.width as usize + col] as f64
}

fn sample_nearest(source: &Raster, i: i64, j: i64) -> u8 {
    sample_clamped(source, i, j) as u8
}

/// Blend horizontally along rows `j` and `j + 1`, then vertically.
fn sample_bilinear(source: &Raster, x: f64, y: f64, i: i64, j: i64) -> u8 {
    let dx = x - i as f64;
    let dy = y - j as f64;

    let top_left = sample_clamped(source, i, j);
    let top = top_left + (sample_clamped(source, i + 1, j) - top_left) * dx;

    let bottom_left = sample_clamped(source, i, j + 1);
    let bottom = bottom_left + (sample_clamped(source, i + 1, j + 1) - bottom_left) * dx;

    let value = top + (bottom - top) * dy;
    value.clamp(0.0, 255.0) as u8
}

/// Interpolate each of rows `j-1..=j+2` across columns `i-1..=i+2` at `x`,
/// then interpolate the four row results at `y`.
fn sample_bicubic(source: &Raster, x: f64, y: f64, i: i64, j: i64) -> u8 {
    let row_values: [f64; 4] = std::array::from_fn(|k| {
        let row = j - 1 + k as i64;
        let knots = std::array::from_fn(|m| {
            let col = i - 1 + m as i64;
            Point2D::new(col as f64, sample_clamped(source, col, row))
        });
        hermite_spline(&knots, x)
    });

    let knots = std::array::from_fn(|k| Point2D::new((j - 1 + k as i64) as f64, row_values[k]));
    let value = hermite_spline(&knots, y);
    value.clamp(0.0, 255.0) as u8
}

/// Hermite basis function weighting the start value.
#[inline]
pub fn h0(t: f64) -> f64 {
    2.0 * t.powi(3) - 3.0 * t.powi(2) + 1.0
}

/// Hermite basis function weighting the end value.
#[inline]
pub fn h1(t: f64) -> f64 {
    -2.0 * t.powi(3) + 3.0 * t.powi(2)
}

/// Hermite basis function weighting the start tangent.
#[inline]
pub fn h2(t: f64) -> f64 {
    t.powi(3) - 2.0 * t.powi(2) + t
}

/// Hermite basis function weighting the end tangent.
#[inline]
pub fn h3(t: f64) -> f64 {
    t.powi(3) - t.powi(2)
}

/// Evaluate a cubic Hermite spline through four consecutive knots.
///
/// The segment between `knots[1]` and `knots[2]` is evaluated at the
/// fractional part of `x`. Tangents are the one-sided differences
/// `knots[1].y - knots[0].y` and `knots[3].y - knots[2].y`.
///
/// The result is not clamped; it can overshoot the range of the knot values.
pub fn hermite_spline(knots: &[Point2D; 4], x: f64) -> f64 {
    let t = x - x.floor();
    let [p1, p2, p3, p4] = knots;
    h0(t) * p2.y + h1(t) * p3.y + h2(t) * (p2.y - p1.y) + h3(t) * (p4.y - p3.y)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
