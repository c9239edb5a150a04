//! Generic square-kernel convolution shared by the emboss and smooth filters.
//!
//! For every output pixel and each of R, G, B:
//!
//! ```text
//! sum    = Σ kernel[i][j] * src(x + j - K/2, y + i - K/2)
//! result = clamp(sum / factor + offset, 0, 255)
//! ```
//!
//! Source coordinates outside the raster contribute 0 (zero padding). Alpha
//! is copied from the source pixel at the same position. Rows are computed
//! in parallel with rayon; each row depends only on the read-only source, so
//! the output is identical to a sequential pass.

use log::debug;
use ndarray::Array2;
use rayon::prelude::*;

use crate::error::{FilterError, Result};
use crate::raster::{Raster, ALPHA, BLUE, GREEN, RED};

/// A square, odd-sized weight matrix plus its post-sum divisor and bias.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvolutionKernel {
    weights: Array2<f64>,
    /// Divisor applied to the weighted sum. Must be non-zero.
    pub factor: f64,
    /// Bias added after dividing by `factor`.
    pub offset: f64,
}

impl ConvolutionKernel {
    /// Creates a kernel from a square matrix with odd side length.
    pub fn new(weights: Array2<f64>, factor: f64, offset: f64) -> Result<Self> {
        let (rows, cols) = weights.dim();
        if rows != cols {
            return Err(FilterError::invalid(
                "kernel.shape",
                format!("{rows}x{cols}"),
                "kernel must be square",
            ));
        }
        if rows % 2 == 0 {
            return Err(FilterError::invalid(
                "kernel.size",
                rows,
                "kernel size must be odd and at least 1",
            ));
        }
        if weights.iter().any(|w| !w.is_finite()) {
            return Err(FilterError::invalid(
                "kernel.weights",
                "non-finite",
                "weights must be finite",
            ));
        }
        Ok(Self {
            weights,
            factor,
            offset,
        })
    }

    /// A `size`x`size` kernel with every weight set to `value`.
    pub fn filled(size: usize, value: f64, factor: f64, offset: f64) -> Result<Self> {
        Self::new(Array2::from_elem((size, size), value), factor, offset)
    }

    /// Side length K of the kernel.
    pub fn size(&self) -> usize {
        self.weights.dim().0
    }

    pub fn weights(&self) -> &Array2<f64> {
        &self.weights
    }

    /// Overwrites the weight at `(row, col)`.
    pub fn set_weight(&mut self, row: usize, col: usize, value: f64) -> Result<()> {
        let size = self.size();
        if row >= size || col >= size {
            return Err(FilterError::OutOfBounds {
                x: col,
                y: row,
                width: size,
                height: size,
            });
        }
        if !value.is_finite() {
            return Err(FilterError::invalid("kernel.weight", value, "weights must be finite"));
        }
        self.weights[[row, col]] = value;
        Ok(())
    }
}

/// Convolves `src` with `kernel`, producing a new raster of the same size.
///
/// Fails with `InvalidParameter` when `kernel.factor` is zero or not finite,
/// or when `kernel.offset` is not finite.
pub fn apply_kernel(src: &Raster, kernel: &ConvolutionKernel) -> Result<Raster> {
    if kernel.factor == 0.0 || !kernel.factor.is_finite() {
        return Err(FilterError::invalid(
            "factor",
            kernel.factor,
            "convolution factor must be finite and non-zero",
        ));
    }
    if !kernel.offset.is_finite() {
        return Err(FilterError::invalid("offset", kernel.offset, "offset must be finite"));
    }

    let (width, height) = (src.width(), src.height());
    debug!(
        "apply_kernel: {}x{} raster, K={}, factor={}, offset={}",
        width,
        height,
        kernel.size(),
        kernel.factor,
        kernel.offset
    );

    let input = src.as_array();
    let size = kernel.size();
    let half = (size / 2) as isize;

    let rows: Vec<Vec<u8>> = (0..height)
        .into_par_iter()
        .map(|y| {
            let mut row = vec![0u8; width * 4];
            for x in 0..width {
                let mut sum = [0.0f64; 3];

                for i in 0..size {
                    let sy = y as isize + i as isize - half;
                    if sy < 0 || sy >= height as isize {
                        continue;
                    }
                    for j in 0..size {
                        let sx = x as isize + j as isize - half;
                        if sx < 0 || sx >= width as isize {
                            continue;
                        }
                        let w = kernel.weights[[i, j]];
                        let (sy, sx) = (sy as usize, sx as usize);
                        sum[0] += w * input[[sy, sx, RED]] as f64;
                        sum[1] += w * input[[sy, sx, GREEN]] as f64;
                        sum[2] += w * input[[sy, sx, BLUE]] as f64;
                    }
                }

                let out = &mut row[x * 4..x * 4 + 4];
                for c in 0..3 {
                    let v = sum[c] / kernel.factor + kernel.offset;
                    out[c] = v.clamp(0.0, 255.0) as u8;
                }
                out[ALPHA] = input[[y, x, ALPHA]];
            }
            row
        })
        .collect();

    Raster::from_rgba_bytes(width, height, rows.concat())
}
