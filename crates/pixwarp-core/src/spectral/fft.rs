//! 2D discrete Fourier transform over real grids.

use rustfft::num_complex::Complex;
use rustfft::{FftDirection, FftPlanner};

use super::SpectralError;
use crate::raster::RealGrid;

/// The 2D Fourier transform of a [`RealGrid`].
///
/// Coefficients are stored transposed (column-major with respect to the
/// source grid) since one transposition is needed to run the column pass.
/// Two spectra produced by [`Spectrum::forward`] share that layout, so
/// element-wise products are unaffected, and [`Spectrum::inverse`] undoes it.
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    width: usize,
    height: usize,
    data: Vec<Complex<f64>>,
}

impl Spectrum {
    /// Forward-transform a real grid.
    ///
    /// The transform is not normalized; the `1 / (width * height)` factor is
    /// applied once by [`Spectrum::inverse`].
    pub fn forward(grid: RealGrid) -> Self {
        let RealGrid {
            width,
            height,
            data,
        } = grid;

        let mut buffer: Vec<Complex<f64>> =
            data.into_iter().map(|v| Complex::new(v, 0.0)).collect();
        if width == 0 || height == 0 {
            return Self {
                width,
                height,
                data: buffer,
            };
        }

        let data = fft_2d(width, height, &mut buffer, FftDirection::Forward);
        Self {
            width,
            height,
            data,
        }
    }

    /// Inverse-transform back to a real grid, keeping the real part.
    pub fn inverse(self) -> RealGrid {
        let Self {
            width,
            height,
            mut data,
        } = self;

        if width == 0 || height == 0 {
            return RealGrid::zeros(width, height);
        }

        // Running the same passes on the transposed layout yields row-major output.
        let restored = fft_2d(height, width, &mut data, FftDirection::Inverse);
        let scale = 1.0 / (width * height) as f64;
        RealGrid::new(width, height, restored.into_iter().map(|c| c.re * scale).collect())
    }

    /// Element-wise product of two spectra (no conjugation).
    ///
    /// # Errors
    ///
    /// Returns `SpectralError::DimensionMismatch` if the shapes differ.
    pub fn multiply(mut self, other: &Spectrum) -> Result<Self, SpectralError> {
        if self.width != other.width || self.height != other.height {
            return Err(SpectralError::DimensionMismatch(format!(
                "cannot multiply {}x{} spectrum by {}x{}",
                self.width, self.height, other.width, other.height
            )));
        }

        for (a, b) in self.data.iter_mut().zip(&other.data) {
            *a *= *b;
        }
        Ok(self)
    }

    /// Width of the transformed grid.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height of the transformed grid.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Coefficient for frequency `(u, v)`.
    pub fn get(&self, u: usize, v: usize) -> Option<Complex<f64>> {
        if u >= self.width || v >= self.height {
            return None;
        }
        self.data.get(u * self.height + v).copied()
    }
}

/// Row pass, transpose, column pass. Returns the transposed result.
fn fft_2d(
    width: usize,
    height: usize,
    buffer: &mut [Complex<f64>],
    direction: FftDirection,
) -> Vec<Complex<f64>> {
    let mut planner = FftPlanner::new();
    let fft_width = planner.plan_fft(width, direction);
    let mut scratch = vec![Complex::default(); fft_width.get_inplace_scratch_len()];
    for row in buffer.chunks_exact_mut(width) {
        fft_width.process_with_scratch(row, &mut scratch);
    }

    let mut transposed = transpose(width, height, buffer);
    let fft_height = planner.plan_fft(height, direction);
    scratch.resize(fft_height.get_inplace_scratch_len(), Complex::default());
    for column in transposed.chunks_exact_mut(height) {
        fft_height.process_with_scratch(column, &mut scratch);
    }
    transposed
}

fn transpose<T: Copy + Default>(width: usize, height: usize, matrix: &[T]) -> Vec<T> {
    let mut transposed = vec![T::default(); matrix.len()];
    for (row, values) in matrix.chunks_exact(width).enumerate() {
        for (col, &v) in values.iter().enumerate() {
            transposed[col * height + row] = v;
        }
    }
    transposed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: &[f64], b: &[f64], tol: f64) {
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b) {
            assert!((x - y).abs() < tol, "{} vs {}", x, y);
        }
    }

    #[test]
    fn test_transpose() {
        let m = [1, 2, 3, 4, 5, 6];
        assert_eq!(transpose(3, 2, &m), vec![1, 4, 2, 5, 3, 6]);
    }

    #[test]
    fn test_forward_constant_grid_is_dc_only() {
        let spectrum = Spectrum::forward(RealGrid::new(4, 3, vec![2.0; 12]));
        let dc = spectrum.get(0, 0).unwrap();
        assert!((dc.re - 24.0).abs() < 1e-9);
        assert!(dc.im.abs() < 1e-9);
        for u in 0..4 {
            for v in 0..3 {
                if (u, v) != (0, 0) {
                    assert!(spectrum.get(u, v).unwrap().norm() < 1e-9);
                }
            }
        }
    }

    #[test]
    fn test_forward_horizontal_frequency() {
        // cos(2*pi*x/4) along rows -> energy at u = 1 and u = 3
        let row = [1.0, 0.0, -1.0, 0.0];
        let data: Vec<f64> = row.iter().chain(row.iter()).copied().collect();
        let spectrum = Spectrum::forward(RealGrid::new(4, 2, data));
        assert!((spectrum.get(1, 0).unwrap().re - 4.0).abs() < 1e-9);
        assert!((spectrum.get(3, 0).unwrap().re - 4.0).abs() < 1e-9);
        assert!(spectrum.get(0, 1).unwrap().norm() < 1e-9);
        assert_eq!(spectrum.get(4, 0), None);
    }

    #[test]
    fn test_forward_inverse_roundtrip() {
        let values: Vec<f64> = (0..30).map(|v| (v * 7 % 11) as f64 - 3.5).collect();
        let grid = RealGrid::new(6, 5, values.clone());
        let restored = Spectrum::forward(grid).inverse();
        assert_eq!((restored.width, restored.height), (6, 5));
        assert_close(&restored.data, &values, 1e-9);
    }

    #[test]
    fn test_multiply_shape_mismatch() {
        let a = Spectrum::forward(RealGrid::zeros(4, 4));
        let b = Spectrum::forward(RealGrid::zeros(4, 2));
        assert!(matches!(a.multiply(&b), Err(SpectralError::DimensionMismatch(_))));
    }

    #[test]
    fn test_multiply_by_delta_is_identity() {
        let mut delta = RealGrid::zeros(3, 3);
        delta.data[0] = 1.0;
        let values: Vec<f64> = (0..9).map(|v| v as f64).collect();
        let product = Spectrum::forward(RealGrid::new(3, 3, values.clone()))
            .multiply(&Spectrum::forward(delta))
            .unwrap();
        assert_close(&product.inverse().data, &values, 1e-9);
    }

    #[test]
    fn test_empty_grid() {
        let spectrum = Spectrum::forward(RealGrid::zeros(0, 3));
        assert_eq!(spectrum.width(), 0);
        assert_eq!(spectrum.height(), 3);
        assert!(spectrum.inverse().is_empty());
    }
}
