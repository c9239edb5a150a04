//! Color adjustment filters: Brightness, Color Replace.
//!
//! These are pixel-wise operations that don't require spatial context.
//! Alpha is preserved unless a filter documents otherwise.

use log::debug;

use crate::error::{FilterError, Result};
use crate::raster::{Color, Raster};

/// Default per-channel distance for [`color_replace`].
pub const DEFAULT_REPLACE_THRESHOLD: u8 = 60;

// ============================================================================
// Brightness
// ============================================================================

/// Shift every R, G and B channel by `delta`, clamping to 0-255.
///
/// # Arguments
/// * `src` - Source raster (not modified)
/// * `delta` - Channel offset in `[-255, 255]`, 0 = no change
///
/// # Returns
/// Brightness-adjusted raster, alpha unchanged
pub fn brightness(src: &Raster, delta: i32) -> Result<Raster> {
    if !(-255..=255).contains(&delta) {
        return Err(FilterError::invalid(
            "delta",
            delta,
            "brightness delta must be within [-255, 255]",
        ));
    }
    debug!(
        "brightness: {}x{} raster, delta={}",
        src.width(),
        src.height(),
        delta
    );

    let shift = |c: u8| (c as i32 + delta).clamp(0, 255) as u8;
    Ok(src.map_pixels(|px| Color::argb(px.a, shift(px.r), shift(px.g), shift(px.b))))
}

// ============================================================================
// Color Replace
// ============================================================================

/// Replace every pixel close to `from` with `to`.
///
/// A pixel matches when each of its R, G and B channels is within
/// `threshold` of the corresponding channel of `from`. Alpha takes no part in
/// the comparison. Matching pixels are replaced whole, alpha included.
///
/// # Arguments
/// * `src` - Source raster (not modified)
/// * `from` - Color to look for
/// * `to` - Replacement color
/// * `threshold` - Maximum per-channel distance, see [`DEFAULT_REPLACE_THRESHOLD`]
pub fn color_replace(src: &Raster, from: Color, to: Color, threshold: u8) -> Raster {
    debug!(
        "color_replace: {}x{} raster, from={:#010x}, to={:#010x}, threshold={}",
        src.width(),
        src.height(),
        from.to_argb_u32(),
        to.to_argb_u32(),
        threshold
    );

    let near = |a: u8, b: u8| a.abs_diff(b) <= threshold;
    src.map_pixels(|px| {
        if near(px.r, from.r) && near(px.g, from.g) && near(px.b, from.b) {
            to
        } else {
            px
        }
    })
}
