//! Serializable effect requests and the dispatcher that runs them.
//!
//! Hosts describe what to run with an [`Effect`], either built directly or
//! parsed from JSON:
//!
//! ```json
//! { "effect": "brightness", "delta": 40 }
//! { "effect": "color_replace", "from": 4278190080, "to": 0 }
//! ```
//!
//! [`apply_effect`] checks the request against the host-level parameter
//! ranges ([`EffectKind::parameter_range`]) before calling the filter.
//! [`EffectProcessor`] additionally owns the working image, so a caller can
//! load a picture once and try several effects on it.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::{FilterError, Result};
use crate::filters;
use crate::raster::{Color, Raster};

// ============================================================================
// Parameter ranges
// ============================================================================

/// Inclusive integer range accepted for an effect's numeric input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterRange {
    pub min: i32,
    pub max: i32,
}

impl ParameterRange {
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min as f64 && value <= self.max as f64
    }
}

pub const HUE_LEVEL_RANGE: ParameterRange = ParameterRange::new(0, 10);
pub const SMOOTH_VALUE_RANGE: ParameterRange = ParameterRange::new(0, 10);
pub const BRIGHTNESS_RANGE: ParameterRange = ParameterRange::new(-100, 100);
pub const SNOW_CEILING_RANGE: ParameterRange = ParameterRange::new(1, 255);

// ============================================================================
// EffectKind
// ============================================================================

/// The six effects, in menu order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    ColorReplace,
    HueScale,
    Emboss,
    Smooth,
    Brightness,
    Snow,
}

impl EffectKind {
    pub const ALL: [EffectKind; 6] = [
        EffectKind::ColorReplace,
        EffectKind::HueScale,
        EffectKind::Emboss,
        EffectKind::Smooth,
        EffectKind::Brightness,
        EffectKind::Snow,
    ];

    /// Maps a menu position (0-5) to its effect.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Range the host should ask the user for, if the effect takes a number.
    pub fn parameter_range(self) -> Option<ParameterRange> {
        match self {
            EffectKind::HueScale => Some(HUE_LEVEL_RANGE),
            EffectKind::Smooth => Some(SMOOTH_VALUE_RANGE),
            EffectKind::Brightness => Some(BRIGHTNESS_RANGE),
            EffectKind::Snow => Some(SNOW_CEILING_RANGE),
            EffectKind::ColorReplace | EffectKind::Emboss => None,
        }
    }
}

// ============================================================================
// Effect
// ============================================================================

fn default_threshold() -> u8 {
    filters::DEFAULT_REPLACE_THRESHOLD
}

/// A fully parameterized effect request.
///
/// Colors are packed `0xAARRGGBB` words.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum Effect {
    ColorReplace {
        from: u32,
        to: u32,
        #[serde(default = "default_threshold")]
        threshold: u8,
    },
    HueScale {
        level: i32,
    },
    Emboss,
    Smooth {
        value: f64,
    },
    Brightness {
        delta: i32,
    },
    Snow {
        color_max: i32,
        #[serde(default)]
        seed: u64,
        #[serde(default)]
        preserve_depth: bool,
    },
}

impl Effect {
    /// Color replace where an unset (`0`) source means black and an unset
    /// target means white.
    pub fn color_replace_with_defaults(from: u32, to: u32) -> Self {
        let from = if from == 0 { Color::BLACK.to_argb_u32() } else { from };
        let to = if to == 0 { Color::WHITE.to_argb_u32() } else { to };
        Effect::ColorReplace {
            from,
            to,
            threshold: filters::DEFAULT_REPLACE_THRESHOLD,
        }
    }

    /// Builds the request for a menu position (0-5) and its dialog value.
    ///
    /// `value` is the hue level, smooth weight, brightness delta or snow
    /// ceiling. Color replace and emboss ignore it; color replace uses the
    /// black to white defaults and snow uses seed 0 with 565 output.
    pub fn from_menu_index(index: usize, value: i32) -> Option<Self> {
        let effect = match EffectKind::from_index(index)? {
            EffectKind::ColorReplace => Effect::color_replace_with_defaults(0, 0),
            EffectKind::HueScale => Effect::HueScale { level: value },
            EffectKind::Emboss => Effect::Emboss,
            EffectKind::Smooth => Effect::Smooth {
                value: value as f64,
            },
            EffectKind::Brightness => Effect::Brightness { delta: value },
            EffectKind::Snow => Effect::Snow {
                color_max: value,
                seed: 0,
                preserve_depth: false,
            },
        };
        Some(effect)
    }

    pub fn kind(&self) -> EffectKind {
        match self {
            Effect::ColorReplace { .. } => EffectKind::ColorReplace,
            Effect::HueScale { .. } => EffectKind::HueScale,
            Effect::Emboss => EffectKind::Emboss,
            Effect::Smooth { .. } => EffectKind::Smooth,
            Effect::Brightness { .. } => EffectKind::Brightness,
            Effect::Snow { .. } => EffectKind::Snow,
        }
    }

    /// Checks the numeric input against the effect's host-level range.
    pub fn validate(&self) -> Result<()> {
        let (name, value) = match *self {
            Effect::HueScale { level } => ("level", level as f64),
            Effect::Smooth { value } => ("value", value),
            Effect::Brightness { delta } => ("delta", delta as f64),
            Effect::Snow { color_max, .. } => ("color_max", color_max as f64),
            Effect::ColorReplace { .. } | Effect::Emboss => return Ok(()),
        };
        match self.kind().parameter_range() {
            Some(range) if !range.contains(value) => {
                warn!(
                    "rejecting {:?}: {} = {} outside [{}, {}]",
                    self.kind(),
                    name,
                    value,
                    range.min,
                    range.max
                );
                Err(FilterError::invalid(name, value, "outside the effect's input range"))
            }
            _ => Ok(()),
        }
    }

    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Runs the filter on `src` without range validation.
    fn run(&self, src: &Raster) -> Result<Raster> {
        match *self {
            Effect::ColorReplace {
                from,
                to,
                threshold,
            } => Ok(filters::color_replace(
                src,
                Color::from_argb_u32(from),
                Color::from_argb_u32(to),
                threshold,
            )),
            Effect::HueScale { level } => Ok(filters::hue_scale(src, level)),
            Effect::Emboss => filters::emboss(src),
            Effect::Smooth { value } => filters::smooth(src, value),
            Effect::Brightness { delta } => filters::brightness(src, delta),
            Effect::Snow {
                color_max,
                seed,
                preserve_depth,
            } => filters::snow(src, color_max, seed, preserve_depth),
        }
    }
}

/// Validates `effect` and applies it to `source`.
///
/// Fails with `NullInput` when there is no source image.
pub fn apply_effect(source: Option<&Raster>, effect: &Effect) -> Result<Raster> {
    let src = source.ok_or(FilterError::NullInput)?;
    effect.validate()?;
    effect.run(src)
}

// ============================================================================
// EffectProcessor
// ============================================================================

/// Holds the working image that effects are applied to.
///
/// The processor keeps its own copy: later changes to the caller's raster
/// don't leak in, and results never alias the stored image.
#[derive(Debug, Clone, Default)]
pub struct EffectProcessor {
    image: Option<Raster>,
}

impl EffectProcessor {
    pub fn new(image: Option<&Raster>) -> Self {
        Self {
            image: image.cloned(),
        }
    }

    /// Replaces the working image with a copy of `image`.
    pub fn set_image(&mut self, image: &Raster) {
        self.image = Some(image.clone());
    }

    pub fn clear(&mut self) {
        self.image = None;
    }

    /// Returns a copy of the working image, if one is loaded.
    pub fn image(&self) -> Option<Raster> {
        self.image.clone()
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    /// Applies `effect` to the working image.
    pub fn apply(&self, effect: &Effect) -> Result<Raster> {
        apply_effect(self.image.as_ref(), effect)
    }
}
