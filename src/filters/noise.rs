//! Noise filters: Snow.
//!
//! Snow whitens random pixels: each pixel draws its own threshold and turns
//! gray at `color_max` when all three color channels exceed it. Bright
//! regions therefore collect more flakes than dark ones.
//!
//! ## Output depth
//!
//! By default the result is quantized as if stored in a 16-bit RGB 565
//! bitmap, which drops alpha and the low bits of every channel.
//! Passing `preserve_depth = true` keeps 8-bit channels and the source alpha
//! for pixels that stay untouched.

use log::debug;

use crate::error::{FilterError, Result};
use crate::raster::{Color, Raster};

// ============================================================================
// Simple RNG (deterministic for reproducible output)
// ============================================================================

/// Simple linear congruential generator for deterministic noise.
/// MINSTD multiplier and modulus with an added increment of 1, so a state of
/// zero does not get stuck; the sequence differs from textbook MINSTD.
#[derive(Debug, Clone)]
pub(crate) struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    pub(crate) fn new(seed: u64) -> Self {
        SimpleRng {
            state: seed.wrapping_add(1), // Avoid zero
        }
    }

    /// Next state of `state * 48271 + 1 mod (2^31 - 1)`, in `[0, 2^31 - 1)`.
    pub(crate) fn next_u32(&mut self) -> u32 {
        // MINSTD LCG
        self.state = self.state.wrapping_mul(48271).wrapping_add(1) % 2147483647;
        self.state as u32
    }

    /// Generate a uniform integer in `[0, bound)`. `bound` must be non-zero.
    pub(crate) fn next_below(&mut self, bound: u32) -> u32 {
        ((self.next_u32() as u64 * bound as u64) / 2147483647) as u32
    }
}

// ============================================================================
// Snow
// ============================================================================

/// Sprinkle `color_max` gray flakes over the image.
///
/// # Arguments
/// * `src` - Source raster (not modified)
/// * `color_max` - Flake brightness and exclusive upper bound of the per-pixel threshold, 1-255
/// * `seed` - RNG seed; the same seed reproduces the same flakes
/// * `preserve_depth` - Keep 8-bit channels and alpha instead of quantizing to RGB 565
pub fn snow(src: &Raster, color_max: i32, seed: u64, preserve_depth: bool) -> Result<Raster> {
    if !(1..=255).contains(&color_max) {
        return Err(FilterError::invalid(
            "color_max",
            color_max,
            "snow ceiling must be within [1, 255]",
        ));
    }
    debug!(
        "snow: {}x{} raster, color_max={}, seed={}, preserve_depth={}",
        src.width(),
        src.height(),
        color_max,
        seed,
        preserve_depth
    );

    let level = color_max as u8;
    let flake = Color::rgb(level, level, level);
    let mut rng = SimpleRng::new(seed);

    Ok(src.map_pixels(|px| {
        let threshold = rng.next_below(color_max as u32);
        let hit = (px.r as u32) > threshold && (px.g as u32) > threshold && (px.b as u32) > threshold;
        let out = if hit { flake } else { px };
        if preserve_depth {
            out
        } else {
            quantize_565(out)
        }
    }))
}

/// Round-trip a color through RGB 565: alpha becomes opaque and the low bits
/// are refilled from the high bits, as a 16-bit bitmap reads back.
pub fn quantize_565(color: Color) -> Color {
    let r = color.r >> 3;
    let g = color.g >> 2;
    let b = color.b >> 3;
    Color::rgb((r << 3) | (r >> 2), (g << 2) | (g >> 4), (b << 3) | (b >> 2))
}
