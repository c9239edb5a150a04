//! Pixel Effects
//!
//! Small, pure image filters over an in-memory RGBA raster: color
//! replacement, hue scaling, emboss, smooth, brightness and snow, plus the
//! generic convolution engine the kernel-based ones share.
//!
//! ## Image Format
//! A [`Raster`] is a non-empty `(height, width, 4)` array of 8-bit RGBA
//! channels. Hosts holding packed `0xAARRGGBB` pixels convert at the
//! boundary with [`Raster::from_argb_pixels`] / [`Raster::channel_buffer`].
//!
//! ## Calling Convention
//! Every filter borrows its source read-only and returns a new raster, so
//! filters can run concurrently on independent images from any thread.
//! Decoding and encoding image files is the host's job.
//!
//! ```
//! use pixel_effects::{apply_effect, Color, Effect, Raster};
//!
//! let image = Raster::filled(4, 4, Color::rgb(120, 60, 30)).unwrap();
//! let brighter = apply_effect(Some(&image), &Effect::Brightness { delta: 20 }).unwrap();
//! assert_eq!(brighter.get_pixel(0, 0).unwrap(), Color::rgb(140, 80, 50));
//! ```

pub mod effect;
pub mod error;
pub mod filters;
pub mod raster;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use effect::{apply_effect, Effect, EffectKind, EffectProcessor, ParameterRange};
pub use error::{FilterError, Result};
pub use raster::{Color, Raster};

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use numpy::{IntoPyArray, PyArray3, PyReadonlyArray3};
    use pyo3::exceptions::{PyIndexError, PyValueError};
    use pyo3::prelude::*;

    use crate::effect::{apply_effect, Effect};
    use crate::error::FilterError;
    use crate::filters;
    use crate::raster::{Color, Raster};

    fn to_py_err(err: FilterError) -> PyErr {
        match err {
            FilterError::OutOfBounds { .. } => PyIndexError::new_err(err.to_string()),
            _ => PyValueError::new_err(err.to_string()),
        }
    }

    /// Copies a `(height, width, 4)` u8 array into a raster.
    fn to_raster(image: &PyReadonlyArray3<'_, u8>) -> PyResult<Raster> {
        Raster::from_array(image.as_array().to_owned()).map_err(to_py_err)
    }

    fn into_py<'py>(py: Python<'py>, result: crate::Result<Raster>) -> PyResult<Bound<'py, PyArray3<u8>>> {
        Ok(result.map_err(to_py_err)?.into_array().into_pyarray(py))
    }

    // ========================================================================
    // Filters
    // ========================================================================

    /// Replace colors within `threshold` (per channel) of `from_color`.
    ///
    /// Colors are packed 0xAARRGGBB integers.
    #[pyfunction]
    #[pyo3(signature = (image, from_color, to_color, threshold=60))]
    pub fn color_replace<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        from_color: u32,
        to_color: u32,
        threshold: u8,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let src = to_raster(&image)?;
        let result = filters::color_replace(
            &src,
            Color::from_argb_u32(from_color),
            Color::from_argb_u32(to_color),
            threshold,
        );
        into_py(py, Ok(result))
    }

    #[pyfunction]
    pub fn hue_scale<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        level: i32,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let src = to_raster(&image)?;
        into_py(py, Ok(filters::hue_scale(&src, level)))
    }

    #[pyfunction]
    pub fn emboss<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let src = to_raster(&image)?;
        into_py(py, filters::emboss(&src))
    }

    #[pyfunction]
    pub fn smooth<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        value: f64,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let src = to_raster(&image)?;
        into_py(py, filters::smooth(&src, value))
    }

    #[pyfunction]
    pub fn brightness<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        delta: i32,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let src = to_raster(&image)?;
        into_py(py, filters::brightness(&src, delta))
    }

    /// Sprinkle snow; the same seed reproduces the same flakes.
    #[pyfunction]
    #[pyo3(signature = (image, color_max, seed=0, preserve_depth=false))]
    pub fn snow<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        color_max: i32,
        seed: u64,
        preserve_depth: bool,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let src = to_raster(&image)?;
        into_py(py, filters::snow(&src, color_max, seed, preserve_depth))
    }

    /// Convolve with a square, odd-sized kernel given as nested lists.
    #[pyfunction]
    #[pyo3(signature = (image, kernel, factor=1.0, offset=0.0))]
    pub fn convolve<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        kernel: Vec<Vec<f64>>,
        factor: f64,
        offset: f64,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let src = to_raster(&image)?;
        let size = kernel.len();
        if kernel.iter().any(|row| row.len() != size) {
            return Err(PyValueError::new_err("kernel must be square"));
        }
        let weights = ndarray::Array2::from_shape_vec((size, size), kernel.concat())
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        let kernel = filters::ConvolutionKernel::new(weights, factor, offset).map_err(to_py_err)?;
        into_py(py, filters::apply_kernel(&src, &kernel))
    }

    /// Run an effect described as JSON, e.g. `{"effect": "brightness", "delta": 40}`.
    #[pyfunction]
    pub fn apply_effect_json<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        effect: &str,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let effect = Effect::from_json(effect).map_err(|e| PyValueError::new_err(e.to_string()))?;
        let src = to_raster(&image)?;
        into_py(py, apply_effect(Some(&src), &effect))
    }

    // ========================================================================
    // Color space helpers
    // ========================================================================

    #[pyfunction]
    pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> (f32, f32, f32) {
        filters::rgb_to_hsv(r, g, b)
    }

    #[pyfunction]
    pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> (u8, u8, u8) {
        filters::hsv_to_rgb(h, s, v)
    }

    #[pymodule]
    pub fn pixel_effects(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(color_replace, m)?)?;
        m.add_function(wrap_pyfunction!(hue_scale, m)?)?;
        m.add_function(wrap_pyfunction!(emboss, m)?)?;
        m.add_function(wrap_pyfunction!(smooth, m)?)?;
        m.add_function(wrap_pyfunction!(brightness, m)?)?;
        m.add_function(wrap_pyfunction!(snow, m)?)?;
        m.add_function(wrap_pyfunction!(convolve, m)?)?;
        m.add_function(wrap_pyfunction!(apply_effect_json, m)?)?;
        m.add_function(wrap_pyfunction!(rgb_to_hsv, m)?)?;
        m.add_function(wrap_pyfunction!(hsv_to_rgb, m)?)?;
        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::pixel_effects;
