use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use pixel_effects::{Color, Raster};

/// Generates a deterministic multi-colored raster with varying alpha.
pub fn pattern_raster(width: usize, height: usize) -> Raster {
    assert!(width > 0 && height > 0, "image dimensions must be positive");

    let pixels: Vec<u32> = (0..width * height)
        .map(|i| {
            let x = (i % width) as u32;
            let y = (i / width) as u32;
            Color::argb(
                (255 - (x * 7 + y * 3) % 128) as u8,
                ((x * 37 + y * 11) % 256) as u8,
                ((x * 13 + y * 53) % 256) as u8,
                ((x * y * 5 + 17) % 256) as u8,
            )
            .to_argb_u32()
        })
        .collect();
    Raster::from_argb_pixels(width, height, &pixels).expect("valid pattern dimensions")
}

/// Hash of every pixel, used to prove a filter left its input alone.
pub fn content_hash(raster: &Raster) -> u64 {
    let mut hasher = DefaultHasher::new();
    raster.width().hash(&mut hasher);
    raster.height().hash(&mut hasher);
    raster.channel_buffer().hash(&mut hasher);
    hasher.finish()
}
