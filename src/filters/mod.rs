//! Filter modules for image processing effects.
//!
//! ## Format
//!
//! Every filter reads a [`Raster`](crate::raster::Raster) (RGBA, 8 bits per
//! channel) by reference and returns a brand-new raster of the same size.
//! The source is never modified.
//!
//! ## Architecture
//!
//! All filters follow these principles:
//! - **Pure** - No shared or global state; safe to call from any thread
//! - **Alpha preservation** - Alpha is kept unless a filter documents otherwise
//! - **Validated parameters** - Out-of-domain values fail with `InvalidParameter`
//!
//! ## Filter Categories
//!
//! - **Convolution engine**: apply_kernel (core)
//! - **Pixel-wise**: brightness, color_replace (color_adjust)
//! - **Color science**: rgb_to_hsv, hsv_to_rgb, hue_scale (color_science)
//! - **Stylize**: emboss, smooth (stylize)
//! - **Noise**: snow (noise)

pub mod core;
pub mod color_adjust;
pub mod color_science;
pub mod stylize;
pub mod noise;

pub use self::core::{apply_kernel, ConvolutionKernel};
pub use color_adjust::{brightness, color_replace, DEFAULT_REPLACE_THRESHOLD};
pub use color_science::{hsv_to_rgb, hue_scale, rgb_to_hsv};
pub use noise::{quantize_565, snow};
pub use stylize::{emboss, smooth};
