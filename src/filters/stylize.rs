//! Stylize filters: Emboss, Smooth.
//!
//! Both are fixed 3x3 kernels run through [`apply_kernel`], so they share
//! its zero-padded borders and alpha pass-through.

use log::debug;
use ndarray::arr2;

use super::core::{apply_kernel, ConvolutionKernel};
use crate::error::{FilterError, Result};
use crate::raster::Raster;

/// Bias that centers emboss output on mid gray.
const EMBOSS_OFFSET: f64 = 127.0;
const SMOOTH_OFFSET: f64 = 1.0;

// ============================================================================
// Emboss
// ============================================================================

/// Apply the emboss effect.
///
/// Kernel `{{-1,0,-1},{0,4,0},{-1,0,-1}}`, factor 1, offset 127. A flat
/// region becomes 127 gray; edges and the image border pick up the relief.
pub fn emboss(src: &Raster) -> Result<Raster> {
    debug!("emboss: {}x{} raster", src.width(), src.height());
    let kernel = ConvolutionKernel::new(
        arr2(&[[-1.0, 0.0, -1.0], [0.0, 4.0, 0.0], [-1.0, 0.0, -1.0]]),
        1.0,
        EMBOSS_OFFSET,
    )?;
    apply_kernel(src, &kernel)
}

// ============================================================================
// Smooth
// ============================================================================

/// Apply the smooth effect.
///
/// All-ones 3x3 kernel with `value` at the center, factor `value + 8`,
/// offset 1. Larger values weight the center pixel more and smooth less.
///
/// # Arguments
/// * `value` - Center weight, must be finite and greater than -8
pub fn smooth(src: &Raster, value: f64) -> Result<Raster> {
    if !value.is_finite() || value <= -8.0 {
        return Err(FilterError::invalid(
            "value",
            value,
            "smooth center weight must be finite and greater than -8",
        ));
    }
    debug!(
        "smooth: {}x{} raster, value={}",
        src.width(),
        src.height(),
        value
    );

    let mut kernel = ConvolutionKernel::filled(3, 1.0, value + 8.0, SMOOTH_OFFSET)?;
    kernel.set_weight(1, 1, value)?;
    apply_kernel(src, &kernel)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::Color;

    #[test]
    fn test_emboss_flat_image_borders() {
        let src = Raster::filled(4, 4, Color::rgb(10, 10, 10)).unwrap();
        let result = emboss(&src).unwrap();

        // Interior: -4c + 4c = 0.
        assert_eq!(result.get_pixel(1, 1).unwrap(), Color::rgb(127, 127, 127));
        assert_eq!(result.get_pixel(2, 2).unwrap(), Color::rgb(127, 127, 127));
        // Edge: two diagonal neighbors padded -> 4c - 2c = 2c.
        assert_eq!(result.get_pixel(1, 0).unwrap(), Color::rgb(147, 147, 147));
        assert_eq!(result.get_pixel(0, 2).unwrap(), Color::rgb(147, 147, 147));
        // Corner: three diagonal neighbors padded -> 4c - c = 3c.
        assert_eq!(result.get_pixel(0, 0).unwrap(), Color::rgb(157, 157, 157));
        assert_eq!(result.get_pixel(3, 3).unwrap(), Color::rgb(157, 157, 157));
    }

    #[test]
    fn test_emboss_preserves_alpha() {
        let src = Raster::filled(3, 3, Color::argb(42, 0, 0, 0)).unwrap();
        let result = emboss(&src).unwrap();
        assert_eq!(result.get_pixel(1, 1).unwrap(), Color::argb(42, 127, 127, 127));
    }

    #[test]
    fn test_smooth_flat_interior() {
        // (8c + v*c) / (v + 8) + 1 = c + 1
        let src = Raster::filled(3, 3, Color::rgb(100, 50, 0)).unwrap();
        let result = smooth(&src, 1.0).unwrap();
        assert_eq!(result.get_pixel(1, 1).unwrap(), Color::rgb(101, 51, 1));
    }

    #[test]
    fn test_smooth_averages_spike() {
        let mut src = Raster::filled(3, 3, Color::rgb(0, 0, 0)).unwrap();
        src.set_pixel(1, 1, Color::rgb(90, 90, 90)).unwrap();
        let result = smooth(&src, 1.0).unwrap();
        // 90 / 9 + 1
        assert_eq!(result.get_pixel(1, 1).unwrap(), Color::rgb(11, 11, 11));
        assert_eq!(result.get_pixel(0, 0).unwrap(), Color::rgb(11, 11, 11));
    }

    #[test]
    fn test_smooth_rejects_degenerate_factor() {
        let src = Raster::new(2, 2).unwrap();
        assert!(smooth(&src, -8.0).is_err());
        assert!(smooth(&src, -9.0).is_err());
        assert!(smooth(&src, f64::NAN).is_err());
        assert!(smooth(&src, 0.0).is_ok());
    }
}
