//! Color space helpers (RGB <-> HSV) and the hue scale filter.
//!
//! The conversions follow the mobile platform's integer-input HSV model:
//! hue in degrees `[0, 360)`, saturation and value in `[0, 1]`, and
//! round-half-up when converting back to 8-bit channels, so [`hue_scale`]
//! produces the same pixels as the platform's own conversion.

use log::debug;

use crate::raster::{Color, Raster};

/// Saturation at or below this is treated as gray.
const NEARLY_ZERO: f32 = 1.0 / 4096.0;

// ============================================================================
// Color Space Conversion Utilities
// ============================================================================

/// Convert 8-bit RGB to HSV.
/// Output: (h, s, v) where h is 0.0-360.0 (exclusive), s and v are 0.0-1.0
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> (f32, f32, f32) {
    let min = r.min(g).min(b);
    let max = r.max(g).max(b);
    let v = max as f32 / 255.0;

    if max == min {
        return (0.0, 0.0, v);
    }

    let delta = (max - min) as f32;
    let s = delta / max as f32;
    let (r, g, b) = (r as f32, g as f32, b as f32);

    let mut h = if r == max as f32 {
        (g - b) / delta
    } else if g == max as f32 {
        2.0 + (b - r) / delta
    } else {
        4.0 + (r - g) / delta
    };
    h *= 60.0;
    if h < 0.0 {
        h += 360.0;
    }

    (h, s, v)
}

/// Convert HSV to opaque 8-bit RGB.
/// Input: h in degrees (values outside `[0, 360)` map to 0), s and v clamped to 0.0-1.0
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> (u8, u8, u8) {
    let s = s.clamp(0.0, 1.0);
    let v = v.clamp(0.0, 1.0);
    let v_byte = round_to_byte(v * 255.0);

    if s <= NEARLY_ZERO {
        return (v_byte, v_byte, v_byte);
    }

    let hx = if !(0.0..360.0).contains(&h) { 0.0 } else { h / 60.0 };
    let sector = hx.floor();
    let f = hx - sector;
    let p = round_to_byte((1.0 - s) * v * 255.0);
    let q = round_to_byte((1.0 - s * f) * v * 255.0);
    let t = round_to_byte((1.0 - s * (1.0 - f)) * v * 255.0);

    match sector as u32 {
        0 => (v_byte, t, p),
        1 => (q, v_byte, p),
        2 => (p, v_byte, t),
        3 => (p, q, v_byte),
        4 => (t, p, v_byte),
        _ => (v_byte, p, q),
    }
}

#[inline]
fn round_to_byte(x: f32) -> u8 {
    (x + 0.5).floor().clamp(0.0, 255.0) as u8
}

// ============================================================================
// Hue Scale
// ============================================================================

/// Multiply every pixel's hue by `level` and OR the result into the pixel.
///
/// The recomputed color is opaque, so every output pixel ends up with alpha
/// 255. Its channel bits are OR-ed into the source pixel rather than
/// replacing it.
pub fn hue_scale(src: &Raster, level: i32) -> Raster {
    debug!(
        "hue_scale: {}x{} raster, level={}",
        src.width(),
        src.height(),
        level
    );

    src.map_pixels(|px| {
        let (h, s, v) = rgb_to_hsv(px.r, px.g, px.b);
        let scaled = (h * level as f32).clamp(0.0, 360.0);
        let (r, g, b) = hsv_to_rgb(scaled, s, v);
        Color::from_argb_u32(px.to_argb_u32() | Color::rgb(r, g, b).to_argb_u32())
    })
}
