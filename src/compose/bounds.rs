use crate::assets::decode::SourceInfo;
use crate::compose::advisory::Advisory;
use crate::compose::params::CompositorConfig;
use crate::foundation::core::CanvasSize;
use crate::foundation::error::{CanvasError, CanvasResult};
use crate::foundation::math::round_extent;

/// Allowed range for the user scale factor of one source.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleBounds {
    /// Smallest allowed scale.
    pub min: f64,
    /// Largest allowed scale.
    pub max: f64,
}

impl ScaleBounds {
    /// Clamp `scale` into range. Non-finite values have no safe clamp.
    pub fn clamp(self, scale: f64) -> CanvasResult<f64> {
        if !scale.is_finite() {
            return Err(CanvasError::out_of_range("scale", scale));
        }
        Ok(scale.clamp(self.min, self.max))
    }

    /// Whether `scale` is already inside the range.
    pub fn contains(self, scale: f64) -> bool {
        scale >= self.min && scale <= self.max
    }
}

/// Scale range for a source, plus an advisory when the high-res cap applies.
///
/// Wide sources (over `high_res_width`) and large uploads (over `high_res_bytes`) are capped
/// at `max_scale_high_res`.
pub fn scale_bounds(info: &SourceInfo, config: &CompositorConfig) -> (ScaleBounds, Option<Advisory>) {
    let high_res =
        info.size.width > config.high_res_width || info.file_bytes > config.high_res_bytes;
    if high_res {
        let max = config.max_scale_default.min(config.max_scale_high_res);
        let bounds = ScaleBounds {
            min: config.min_scale,
            max,
        };
        return (
            bounds,
            Some(Advisory::HighResolutionScaleCap { max_scale: max }),
        );
    }
    (
        ScaleBounds {
            min: config.min_scale,
            max: config.max_scale_default,
        },
        None,
    )
}

/// Largest size with the aspect ratio of `size` that fits inside `bound`.
///
/// Sizes that already fit are returned unchanged; this never upscales.
pub fn pre_shrink_dims(size: CanvasSize, bound: CanvasSize) -> CanvasSize {
    if size.fits_within(bound) {
        return size;
    }
    let factor = (f64::from(bound.width) / f64::from(size.width))
        .min(f64::from(bound.height) / f64::from(size.height));

    let shrink = |v: u32, limit: u32| -> u32 {
        (round_extent(f64::from(v) * factor) as u32).clamp(1, limit)
    };
    CanvasSize {
        width: shrink(size.width, bound.width),
        height: shrink(size.height, bound.height),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/bounds.rs"]
mod tests;
