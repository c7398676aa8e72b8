use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::foundation::core::{CanvasSize, Rgb8};
use crate::foundation::error::{CanvasError, CanvasResult};

/// How the canvas is filled before the foreground is pasted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackgroundMode {
    /// Uniform fill with [`CanvasParameters::background_color`].
    #[default]
    SolidColor,
    /// Stretched, blurred copy of the source.
    Blur,
}

/// Gaussian blur strength for [`BackgroundMode::Blur`], in pixels of standard deviation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u32")]
pub enum BlurRadius {
    /// Light blur.
    R20,
    /// Medium blur.
    #[default]
    R50,
    /// Heavy blur.
    R100,
}

impl BlurRadius {
    /// Every selectable radius, lightest first.
    pub const ALL: [BlurRadius; 3] = [BlurRadius::R20, BlurRadius::R50, BlurRadius::R100];

    /// Radius in pixels.
    pub fn px(self) -> u32 {
        match self {
            Self::R20 => 20,
            Self::R50 => 50,
            Self::R100 => 100,
        }
    }

    /// Snap an arbitrary positive radius to the nearest selectable one.
    ///
    /// Ties go to the lighter blur. Zero or negative radii have no meaningful clamp.
    pub fn nearest(px: i64) -> CanvasResult<Self> {
        if px <= 0 {
            return Err(CanvasError::out_of_range("blur_radius", px));
        }
        let mut best = Self::R20;
        for r in Self::ALL {
            if (i64::from(r.px()) - px).abs() < (i64::from(best.px()) - px).abs() {
                best = r;
            }
        }
        Ok(best)
    }
}

impl TryFrom<i64> for BlurRadius {
    type Error = CanvasError;

    fn try_from(px: i64) -> Result<Self, Self::Error> {
        Self::nearest(px)
    }
}

impl From<BlurRadius> for u32 {
    fn from(r: BlurRadius) -> Self {
        r.px()
    }
}

/// Placement and background controls for one render.
///
/// The canvas itself is always [`CanvasSize::FULL_HD`]; see [`CanvasParameters::canvas`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasParameters {
    /// Background fill strategy.
    pub background: BackgroundMode,
    /// Fill color for [`BackgroundMode::SolidColor`].
    pub background_color: Rgb8,
    /// Blur strength for [`BackgroundMode::Blur`].
    pub blur_radius: BlurRadius,
    /// Foreground scale factor, clamped to the source's allowed range at render time.
    pub scale: f64,
    /// Manual left edge of the foreground, in canvas pixels.
    pub offset_x: i32,
    /// Manual vertical offset; positive values move the foreground up.
    pub offset_y: i32,
    /// Center horizontally, ignoring `offset_x`.
    pub center_horizontal: bool,
    /// Center vertically, ignoring `offset_y`.
    pub center_vertical: bool,
    /// Center on both axes, ignoring offsets and per-axis flags.
    pub fit_to_canvas: bool,
}

impl Default for CanvasParameters {
    fn default() -> Self {
        Self {
            background: BackgroundMode::SolidColor,
            background_color: Rgb8::gray(0x90),
            blur_radius: BlurRadius::default(),
            scale: 1.0,
            offset_x: 0,
            offset_y: 0,
            center_horizontal: false,
            center_vertical: false,
            fit_to_canvas: false,
        }
    }
}

impl CanvasParameters {
    /// Output canvas dimensions.
    pub const fn canvas(&self) -> CanvasSize {
        CanvasSize::FULL_HD
    }

    /// Parse parameters from a JSON reader. Missing fields take their defaults.
    pub fn from_reader<R: std::io::Read>(r: R) -> CanvasResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| CanvasError::config(format!("parse canvas parameters JSON: {e}")))
    }

    /// Parse parameters from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> CanvasResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            CanvasError::config(format!("open parameters JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }
}

/// Tunables shared by every render.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompositorConfig {
    /// Upper scale bound for ordinary sources.
    pub max_scale_default: f64,
    /// Upper scale bound once a source counts as high resolution.
    pub max_scale_high_res: f64,
    /// Lower scale bound.
    pub min_scale: f64,
    /// Sources wider than this count as high resolution.
    pub high_res_width: u32,
    /// Uploads larger than this many bytes count as high resolution.
    pub high_res_bytes: u64,
    /// Fill color of the canvas shown before any image is loaded.
    pub default_background_color: Rgb8,
    /// Exports above this size (KB) produce an advisory.
    pub size_warning_kb: f64,
}

impl Default for CompositorConfig {
    fn default() -> Self {
        Self {
            max_scale_default: 3.0,
            max_scale_high_res: 3.0,
            min_scale: 0.1,
            high_res_width: 3000,
            high_res_bytes: 5 * 1024 * 1024,
            default_background_color: Rgb8::gray(45),
            size_warning_kb: 500.0,
        }
    }
}

impl CompositorConfig {
    /// Variant allowing up to 10x for ordinary sources. High-res sources stay capped at 3x.
    pub fn extended_scale() -> Self {
        Self {
            max_scale_default: 10.0,
            ..Self::default()
        }
    }

    /// Reject configurations whose scale range is empty or non-positive.
    pub fn validate(&self) -> CanvasResult<()> {
        if !self.min_scale.is_finite() || self.min_scale <= 0.0 {
            return Err(CanvasError::out_of_range("min_scale", self.min_scale));
        }
        if !self.max_scale_default.is_finite() || self.max_scale_default < self.min_scale {
            return Err(CanvasError::out_of_range(
                "max_scale_default",
                self.max_scale_default,
            ));
        }
        if !self.max_scale_high_res.is_finite() || self.max_scale_high_res < self.min_scale {
            return Err(CanvasError::out_of_range(
                "max_scale_high_res",
                self.max_scale_high_res,
            ));
        }
        if !self.size_warning_kb.is_finite() || self.size_warning_kb < 0.0 {
            return Err(CanvasError::out_of_range(
                "size_warning_kb",
                self.size_warning_kb,
            ));
        }
        Ok(())
    }

    /// Parse and validate a config from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> CanvasResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            CanvasError::config(format!("open compositor config '{}': {e}", path.display()))
        })?;
        let cfg: Self = serde_json::from_reader(BufReader::new(f))
            .map_err(|e| CanvasError::config(format!("parse compositor config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/params.rs"]
mod tests;
