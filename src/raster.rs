//! Owned RGBA raster and the single-pixel `Color` type.
//!
//! ## Layout
//!
//! Pixels live in an `Array3<u8>` of shape `(height, width, 4)` with channels
//! ordered red, green, blue, alpha. Hosts that speak packed `0xAARRGGBB`
//! words (the usual mobile bitmap format) use [`Raster::channel_buffer`] and
//! [`Raster::set_channel_buffer`] to move whole images across the boundary.

use ndarray::{Array3, ArrayView3};

use crate::error::{FilterError, Result};

/// Index of each channel in the last axis of the pixel array.
pub const RED: usize = 0;
pub const GREEN: usize = 1;
pub const BLUE: usize = 2;
pub const ALPHA: usize = 3;

// ============================================================================
// Color
// ============================================================================

/// A single pixel with 8-bit alpha, red, green and blue channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    /// Fully opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { a: 255, r, g, b }
    }

    /// Decomposes a packed `0xAARRGGBB` word.
    pub const fn from_argb_u32(packed: u32) -> Self {
        Self {
            a: (packed >> 24) as u8,
            r: (packed >> 16) as u8,
            g: (packed >> 8) as u8,
            b: packed as u8,
        }
    }

    /// Composes the packed `0xAARRGGBB` word.
    pub const fn to_argb_u32(self) -> u32 {
        ((self.a as u32) << 24) | ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }
}

impl From<u32> for Color {
    fn from(packed: u32) -> Self {
        Color::from_argb_u32(packed)
    }
}

impl From<Color> for u32 {
    fn from(color: Color) -> Self {
        color.to_argb_u32()
    }
}

// ============================================================================
// Raster
// ============================================================================

/// Length of a `width x height` RGBA buffer, rejecting sizes ndarray can't
/// address.
fn byte_len(width: usize, height: usize) -> Result<usize> {
    width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(4))
        .filter(|&n| n <= isize::MAX as usize)
        .ok_or_else(|| {
            FilterError::invalid(
                "dimensions",
                format!("{}x{}", width, height),
                "raster byte length overflows",
            )
        })
}

/// An owned, non-empty 2D pixel buffer.
///
/// `Clone` is a deep copy: the clone never shares storage with the original.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    data: Array3<u8>,
}

impl Raster {
    /// Creates a transparent black raster.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        Self::filled(width, height, Color::default())
    }

    /// Creates a raster where every pixel is `color`.
    pub fn filled(width: usize, height: usize, color: Color) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(FilterError::NullInput);
        }
        byte_len(width, height)?;
        let mut data = Array3::<u8>::zeros((height, width, 4));
        for mut px in data.lanes_mut(ndarray::Axis(2)) {
            px[RED] = color.r;
            px[GREEN] = color.g;
            px[BLUE] = color.b;
            px[ALPHA] = color.a;
        }
        Ok(Self { data })
    }

    /// Builds a raster from row-major packed `0xAARRGGBB` words.
    pub fn from_argb_pixels(width: usize, height: usize, pixels: &[u32]) -> Result<Self> {
        let mut raster = Self::new(width, height)?;
        raster.set_channel_buffer(pixels)?;
        Ok(raster)
    }

    /// Builds a raster from row-major RGBA bytes (`width * height * 4` long).
    pub fn from_rgba_bytes(width: usize, height: usize, bytes: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 || bytes.is_empty() {
            return Err(FilterError::NullInput);
        }
        let expected = byte_len(width, height)?;
        if bytes.len() != expected {
            return Err(FilterError::invalid(
                "bytes.len",
                bytes.len(),
                "must equal width * height * 4",
            ));
        }
        let data = Array3::from_shape_vec((height, width, 4), bytes)
            .map_err(|_| FilterError::invalid("bytes.len", expected, "shape mismatch"))?;
        Ok(Self { data })
    }

    /// Wraps an existing `(height, width, 4)` RGBA array.
    pub fn from_array(data: Array3<u8>) -> Result<Self> {
        let (height, width, channels) = data.dim();
        if width == 0 || height == 0 {
            return Err(FilterError::NullInput);
        }
        if channels != 4 {
            return Err(FilterError::invalid("channels", channels, "raster must be RGBA"));
        }
        Ok(Self { data })
    }

    /// Consumes the raster, returning row-major RGBA bytes.
    pub fn into_rgba_bytes(self) -> Vec<u8> {
        if self.data.is_standard_layout() {
            self.data.into_raw_vec_and_offset().0
        } else {
            self.data.iter().copied().collect()
        }
    }

    pub fn into_array(self) -> Array3<u8> {
        self.data
    }

    pub fn as_array(&self) -> ArrayView3<'_, u8> {
        self.data.view()
    }

    pub fn width(&self) -> usize {
        self.data.dim().1
    }

    pub fn height(&self) -> usize {
        self.data.dim().0
    }

    pub fn pixel_count(&self) -> usize {
        self.width() * self.height()
    }

    /// Reads one pixel, failing with `OutOfBounds` outside the raster.
    pub fn get_pixel(&self, x: usize, y: usize) -> Result<Color> {
        self.check_bounds(x, y)?;
        Ok(self.pixel(x, y))
    }

    /// Overwrites one pixel, failing with `OutOfBounds` outside the raster.
    pub fn set_pixel(&mut self, x: usize, y: usize, color: Color) -> Result<()> {
        self.check_bounds(x, y)?;
        self.put(x, y, color);
        Ok(())
    }

    /// Copies every pixel out as row-major packed `0xAARRGGBB` words.
    pub fn channel_buffer(&self) -> Vec<u32> {
        self.data
            .lanes(ndarray::Axis(2))
            .into_iter()
            .map(|px| Color::argb(px[ALPHA], px[RED], px[GREEN], px[BLUE]).to_argb_u32())
            .collect()
    }

    /// Overwrites every pixel from row-major packed `0xAARRGGBB` words.
    pub fn set_channel_buffer(&mut self, pixels: &[u32]) -> Result<()> {
        if pixels.len() != self.pixel_count() {
            return Err(FilterError::invalid(
                "pixels.len",
                pixels.len(),
                "must equal width * height",
            ));
        }
        for (mut px, &packed) in self.data.lanes_mut(ndarray::Axis(2)).into_iter().zip(pixels) {
            let c = Color::from_argb_u32(packed);
            px[RED] = c.r;
            px[GREEN] = c.g;
            px[BLUE] = c.b;
            px[ALPHA] = c.a;
        }
        Ok(())
    }

    fn check_bounds(&self, x: usize, y: usize) -> Result<()> {
        if x >= self.width() || y >= self.height() {
            return Err(FilterError::OutOfBounds {
                x,
                y,
                width: self.width(),
                height: self.height(),
            });
        }
        Ok(())
    }

    /// Unchecked read for loops that already iterate within bounds.
    #[inline]
    pub(crate) fn pixel(&self, x: usize, y: usize) -> Color {
        Color::argb(
            self.data[[y, x, ALPHA]],
            self.data[[y, x, RED]],
            self.data[[y, x, GREEN]],
            self.data[[y, x, BLUE]],
        )
    }

    #[inline]
    pub(crate) fn put(&mut self, x: usize, y: usize, color: Color) {
        self.data[[y, x, RED]] = color.r;
        self.data[[y, x, GREEN]] = color.g;
        self.data[[y, x, BLUE]] = color.b;
        self.data[[y, x, ALPHA]] = color.a;
    }

    /// Applies `f` to every pixel, producing a new raster of the same size.
    pub(crate) fn map_pixels<F>(&self, mut f: F) -> Raster
    where
        F: FnMut(Color) -> Color,
    {
        let mut output = self.clone();
        for mut px in output.data.lanes_mut(ndarray::Axis(2)) {
            let c = f(Color::argb(px[ALPHA], px[RED], px[GREEN], px[BLUE]));
            px[RED] = c.r;
            px[GREEN] = c.g;
            px[BLUE] = c.b;
            px[ALPHA] = c.a;
        }
        output
    }
}
