//! Error taxonomy shared by every filter entry point.

use thiserror::Error;

/// Errors reported synchronously by raster construction and filter calls.
///
/// Filters are deterministic, so none of these are worth retrying with the
/// same inputs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FilterError {
    /// The source raster is missing or has no pixels.
    #[error("no source image: raster is missing or empty")]
    NullInput,

    /// A numeric parameter lies outside its documented domain.
    #[error("invalid parameter `{name}` = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: &'static str,
    },

    /// A pixel coordinate lies outside the raster extent.
    #[error("pixel ({x}, {y}) is outside a {width}x{height} raster")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
}

impl FilterError {
    pub(crate) fn invalid(
        name: &'static str,
        value: impl ToString,
        reason: &'static str,
    ) -> Self {
        FilterError::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }
}

pub type Result<T> = std::result::Result<T, FilterError>;
