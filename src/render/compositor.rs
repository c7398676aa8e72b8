use std::borrow::Cow;

use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbImage, RgbaImage};

use crate::assets::decode::{SourceImage, SourceInfo};
use crate::compose::advisory::Advisory;
use crate::compose::bounds::{ScaleBounds, pre_shrink_dims, scale_bounds};
use crate::compose::params::{BackgroundMode, BlurRadius, CanvasParameters, CompositorConfig};
use crate::compose::placement::{Placement, place};
use crate::effects::blur::gaussian_blur_rgb8;
use crate::effects::composite::{PasteRegion, paste_clipped};
use crate::encode::export::{ExportSettings, ExportedImage, export};
use crate::foundation::core::{CanvasSize, Rgb8};
use crate::foundation::error::{CanvasError, CanvasResult};

const RESAMPLE_FILTER: FilterType = FilterType::Lanczos3;

/// Finished 1920x1080 RGB8 output of one render.
#[derive(Clone, Debug, PartialEq)]
pub struct Canvas {
    pixels: RgbImage,
}

impl Canvas {
    /// A canvas filled uniformly with `color`.
    pub fn filled(color: Rgb8) -> Self {
        let size = CanvasSize::FULL_HD;
        Self {
            pixels: RgbImage::from_pixel(size.width, size.height, image::Rgb(color.to_array())),
        }
    }

    fn from_background(pixels: RgbImage) -> CanvasResult<Self> {
        let size = CanvasSize {
            width: pixels.width(),
            height: pixels.height(),
        };
        if size != CanvasSize::FULL_HD {
            return Err(CanvasError::out_of_range("canvas", size));
        }
        Ok(Self { pixels })
    }

    /// Always [`CanvasSize::FULL_HD`].
    pub fn size(&self) -> CanvasSize {
        CanvasSize {
            width: self.pixels.width(),
            height: self.pixels.height(),
        }
    }

    /// RGB8 pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` lies outside the canvas; use [`Canvas::get_pixel`] to check instead.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        self.pixels.get_pixel(x, y).0
    }

    /// RGB8 pixel at `(x, y)`, or `None` outside the canvas.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        self.pixels.get_pixel_checked(x, y).map(|p| p.0)
    }

    /// Underlying image buffer.
    pub fn pixels(&self) -> &RgbImage {
        &self.pixels
    }

    /// Tightly packed RGB8 bytes, row-major.
    pub fn as_raw(&self) -> &[u8] {
        self.pixels.as_raw()
    }

    /// Consume the canvas into its image buffer.
    pub fn into_image(self) -> RgbImage {
        self.pixels
    }
}

/// What the host needs to present a loaded source before rendering it.
#[derive(Clone, Debug, PartialEq)]
pub struct SourceReport {
    /// Facts about the original upload.
    pub info: SourceInfo,
    /// Allowed user scale range.
    pub scale_bounds: ScaleBounds,
    /// Dimensions after the fit-to-canvas pre-shrink.
    pub working_size: CanvasSize,
    /// Notices to show alongside the source.
    pub advisories: Vec<Advisory>,
}

/// A rendered canvas plus the decisions that produced it.
#[derive(Clone, Debug)]
pub struct Rendered {
    /// Output pixels.
    pub canvas: Canvas,
    /// Foreground placement; `None` when rendering without a source.
    pub placement: Option<Placement>,
    /// Canvas area covered by the foreground after clipping.
    pub visible: Option<PasteRegion>,
    /// Scale actually applied, after clamping.
    pub scale: Option<f64>,
    /// Notices produced while rendering.
    pub advisories: Vec<Advisory>,
}

/// Turns a source image and [`CanvasParameters`] into a fixed-size [`Canvas`].
///
/// Holds only immutable configuration; every call renders from scratch.
#[derive(Clone, Debug, Default)]
pub struct Compositor {
    config: CompositorConfig,
}

impl Compositor {
    /// Build a compositor after validating `config`.
    pub fn new(config: CompositorConfig) -> CanvasResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Active configuration.
    pub fn config(&self) -> &CompositorConfig {
        &self.config
    }

    /// Scale range, pre-shrink size and advisories for `source`.
    pub fn inspect(&self, source: &SourceImage) -> SourceReport {
        let info = *source.info();
        let (bounds, cap) = scale_bounds(&info, &self.config);
        let working_size = pre_shrink_dims(source.size(), CanvasSize::FULL_HD);

        let mut advisories = Vec::new();
        advisories.extend(cap);
        if working_size != source.size() {
            advisories.push(Advisory::PreShrunk {
                from: source.size(),
                to: working_size,
            });
        }
        SourceReport {
            info,
            scale_bounds: bounds,
            working_size,
            advisories,
        }
    }

    /// Render `source` onto a fresh canvas.
    ///
    /// Without a source the canvas is filled with the configured default background.
    #[tracing::instrument(skip_all, fields(has_source = source.is_some()))]
    pub fn render(
        &self,
        source: Option<&SourceImage>,
        params: &CanvasParameters,
    ) -> CanvasResult<Rendered> {
        let Some(source) = source else {
            return Ok(Rendered {
                canvas: Canvas::filled(self.config.default_background_color),
                placement: None,
                visible: None,
                scale: None,
                advisories: Vec::new(),
            });
        };

        let report = self.inspect(source);
        for advisory in &report.advisories {
            match advisory {
                Advisory::PreShrunk { .. } => tracing::info!(%advisory, "pre-shrinking source"),
                _ => tracing::warn!(%advisory, "source advisory"),
            }
        }

        let working = resample(source.pixels(), report.working_size);
        let scale = report.scale_bounds.clamp(params.scale)?;
        let canvas_size = params.canvas();
        let placement = place(params, report.working_size, scale, canvas_size)?;
        tracing::debug!(
            scale,
            x = placement.x,
            y = placement.y,
            size = %placement.size,
            "computed placement"
        );

        let mut canvas = match params.background {
            BackgroundMode::SolidColor => Canvas::filled(params.background_color),
            BackgroundMode::Blur => blurred_background(&working, params.blur_radius)?,
        };

        let foreground = resample(&working, placement.size);
        let visible = paste_clipped(
            &mut canvas.pixels,
            &foreground,
            placement.x,
            placement.y,
            source.has_alpha(),
        );
        if visible.is_none() {
            tracing::debug!("foreground lies entirely outside the canvas");
        }

        Ok(Rendered {
            canvas,
            placement: Some(placement),
            visible,
            scale: Some(scale),
            advisories: report.advisories,
        })
    }

    /// Render and keep only the canvas.
    pub fn composite(
        &self,
        source: Option<&SourceImage>,
        params: &CanvasParameters,
    ) -> CanvasResult<Canvas> {
        Ok(self.render(source, params)?.canvas)
    }

    /// Encode `canvas`, logging when the result exceeds the configured size warning.
    pub fn export(&self, canvas: &Canvas, settings: &ExportSettings) -> CanvasResult<ExportedImage> {
        let out = export(canvas, settings)?;
        if let Some(advisory) = out.size_advisory(self.config.size_warning_kb) {
            tracing::warn!(%advisory, "export size");
        }
        Ok(out)
    }
}

/// Render with the default [`CompositorConfig`].
pub fn composite(source: Option<&SourceImage>, params: &CanvasParameters) -> CanvasResult<Canvas> {
    Compositor::default().composite(source, params)
}

fn resample(img: &RgbaImage, size: CanvasSize) -> Cow<'_, RgbaImage> {
    if img.dimensions() == (size.width, size.height) {
        return Cow::Borrowed(img);
    }
    Cow::Owned(imageops::resize(img, size.width, size.height, RESAMPLE_FILTER))
}

/// Stretch the source over the whole canvas and blur it.
///
/// Alpha is dropped from the premultiplied pixels, so transparent regions turn black.
fn blurred_background(working: &RgbaImage, radius: BlurRadius) -> CanvasResult<Canvas> {
    let size = CanvasSize::FULL_HD;
    let rgb = DynamicImage::ImageRgba8(working.clone()).into_rgb8();
    let stretched = if rgb.dimensions() == (size.width, size.height) {
        rgb
    } else {
        imageops::resize(&rgb, size.width, size.height, RESAMPLE_FILTER)
    };

    let blurred = gaussian_blur_rgb8(
        stretched.as_raw(),
        size.width,
        size.height,
        radius.px() as f32,
    )?;
    let pixels = RgbImage::from_raw(size.width, size.height, blurred)
        .ok_or_else(|| CanvasError::out_of_range("blur_buffer", "length mismatch"))?;
    Canvas::from_background(pixels)
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
