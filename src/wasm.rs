//! WebAssembly exports for the pixel effects.
//!
//! These functions are exposed to JavaScript via wasm-bindgen. Images cross
//! the boundary as flat RGBA byte arrays (`width * height * 4` long, the
//! `ImageData` layout); errors surface as thrown strings.

use wasm_bindgen::prelude::*;

use crate::effect::{apply_effect, Effect};
use crate::error::FilterError;
use crate::filters;
use crate::raster::{Color, Raster};

fn to_js(err: FilterError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn run<F>(data: &[u8], width: usize, height: usize, f: F) -> Result<Vec<u8>, JsValue>
where
    F: FnOnce(&Raster) -> crate::Result<Raster>,
{
    let input = Raster::from_rgba_bytes(width, height, data.to_vec()).map_err(to_js)?;
    let result = f(&input).map_err(to_js)?;
    Ok(result.into_rgba_bytes())
}

// ============================================================================
// Filters
// ============================================================================

/// Replace colors within `threshold` (per channel) of `from_color`.
///
/// # Arguments
/// * `data` - Flat array of RGBA bytes
/// * `from_color` / `to_color` - Packed 0xAARRGGBB colors
#[wasm_bindgen]
pub fn color_replace_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    from_color: u32,
    to_color: u32,
    threshold: u8,
) -> Result<Vec<u8>, JsValue> {
    run(data, width, height, |src| {
        Ok(filters::color_replace(
            src,
            Color::from_argb_u32(from_color),
            Color::from_argb_u32(to_color),
            threshold,
        ))
    })
}

#[wasm_bindgen]
pub fn hue_scale_wasm(data: &[u8], width: usize, height: usize, level: i32) -> Result<Vec<u8>, JsValue> {
    run(data, width, height, |src| Ok(filters::hue_scale(src, level)))
}

#[wasm_bindgen]
pub fn emboss_wasm(data: &[u8], width: usize, height: usize) -> Result<Vec<u8>, JsValue> {
    run(data, width, height, filters::emboss)
}

#[wasm_bindgen]
pub fn smooth_wasm(data: &[u8], width: usize, height: usize, value: f64) -> Result<Vec<u8>, JsValue> {
    run(data, width, height, |src| filters::smooth(src, value))
}

#[wasm_bindgen]
pub fn brightness_wasm(data: &[u8], width: usize, height: usize, delta: i32) -> Result<Vec<u8>, JsValue> {
    run(data, width, height, |src| filters::brightness(src, delta))
}

/// Sprinkle snow. The seed is a `u64` on the Rust side (`BigInt` in JS).
#[wasm_bindgen]
pub fn snow_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    color_max: i32,
    seed: u64,
    preserve_depth: bool,
) -> Result<Vec<u8>, JsValue> {
    run(data, width, height, |src| {
        filters::snow(src, color_max, seed, preserve_depth)
    })
}

/// Run an effect described as JSON, e.g. `{"effect": "smooth", "value": 3}`.
#[wasm_bindgen]
pub fn apply_effect_wasm(data: &[u8], width: usize, height: usize, effect: &str) -> Result<Vec<u8>, JsValue> {
    let effect = Effect::from_json(effect).map_err(|e| JsValue::from_str(&e.to_string()))?;
    run(data, width, height, |src| apply_effect(Some(src), &effect))
}
