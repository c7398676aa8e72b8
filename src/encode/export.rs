use std::fmt;
use std::io::Cursor;
use std::str::FromStr;

use anyhow::Context as _;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::codecs::webp::WebPEncoder;
use image::{ExtendedColorType, ImageEncoder};
use serde::{Deserialize, Serialize};

use crate::compose::advisory::Advisory;
use crate::foundation::error::{CanvasError, CanvasResult};
use crate::render::compositor::Canvas;

/// Lowest accepted export quality.
pub const MIN_QUALITY: u8 = 10;
/// Highest accepted export quality.
pub const MAX_QUALITY: u8 = 100;
/// Quality used when none is given.
pub const DEFAULT_QUALITY: u8 = 85;

/// Encoded output container.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ExportFormat {
    /// WebP, always encoded losslessly.
    ///
    /// Quality below 100 quantizes the color channels before encoding, which shrinks flat and
    /// synthetic content but leaves photographic canvases large: expect them to stay above the
    /// 500 KB size advisory even at the default quality. Use JPEG when size matters.
    #[default]
    Webp,
    /// JPEG.
    Jpeg,
    /// PNG, always lossless.
    Png,
}

impl ExportFormat {
    /// Upper-case identifier (`WEBP`, `JPEG`, `PNG`).
    pub fn label(self) -> &'static str {
        match self {
            Self::Webp => "WEBP",
            Self::Jpeg => "JPEG",
            Self::Png => "PNG",
        }
    }

    /// Lower-case file extension.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Webp => "webp",
            Self::Jpeg => "jpeg",
            Self::Png => "png",
        }
    }

    /// MIME type for downloads.
    pub fn mime(self) -> &'static str {
        match self {
            Self::Webp => "image/webp",
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
        }
    }

    /// Whether the quality setting changes the output.
    pub fn is_lossy(self) -> bool {
        !matches!(self, Self::Png)
    }

    /// Suggested download name, e.g. `resized_image.webp`.
    pub fn suggested_file_name(self) -> String {
        format!("resized_image.{}", self.extension())
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ExportFormat {
    type Err = CanvasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "webp" => Ok(Self::Webp),
            "jpeg" | "jpg" => Ok(Self::Jpeg),
            "png" => Ok(Self::Png),
            _ => Err(CanvasError::unsupported_format(s.trim())),
        }
    }
}

impl TryFrom<String> for ExportFormat {
    type Error = CanvasError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ExportFormat> for String {
    fn from(f: ExportFormat) -> Self {
        f.label().to_owned()
    }
}

/// Format and quality for one export.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Output container.
    pub format: ExportFormat,
    /// 10..=100; ignored for lossless formats. Out-of-range values are clamped on
    /// deserialization and again when encoding.
    #[serde(deserialize_with = "deserialize_quality")]
    pub quality: u8,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            format: ExportFormat::default(),
            quality: DEFAULT_QUALITY,
        }
    }
}

impl ExportSettings {
    /// Build settings, clamping `quality` into 10..=100.
    pub fn new(format: ExportFormat, quality: i64) -> Self {
        Self {
            format,
            quality: clamp_quality(quality),
        }
    }

    /// Build settings from a user-supplied format identifier.
    pub fn parse(format: &str, quality: i64) -> CanvasResult<Self> {
        Ok(Self::new(format.parse()?, quality))
    }

    /// Quality as it reaches the encoder.
    pub fn effective_quality(&self) -> u8 {
        clamp_quality(i64::from(self.quality))
    }
}

fn deserialize_quality<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: serde::Deserializer<'de>,
{
    i64::deserialize(deserializer).map(clamp_quality)
}

fn clamp_quality(q: i64) -> u8 {
    q.clamp(i64::from(MIN_QUALITY), i64::from(MAX_QUALITY)) as u8
}

/// Encoded canvas bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportedImage {
    /// Encoded file contents.
    pub bytes: Vec<u8>,
    /// Container the bytes are in.
    pub format: ExportFormat,
    /// Quality handed to the encoder.
    pub quality: u8,
}

impl ExportedImage {
    /// Encoded size in KB (1024 bytes).
    pub fn size_kb(&self) -> f64 {
        self.bytes.len() as f64 / 1024.0
    }

    /// Advisory when the encoded size is above `limit_kb`.
    pub fn size_advisory(&self, limit_kb: f64) -> Option<Advisory> {
        let size_kb = self.size_kb();
        (size_kb > limit_kb).then_some(Advisory::ExportSizeExceeded { size_kb, limit_kb })
    }
}

/// Encode `canvas` with `settings`.
#[tracing::instrument(skip(canvas), fields(format = %settings.format))]
pub fn export(canvas: &Canvas, settings: &ExportSettings) -> CanvasResult<ExportedImage> {
    let quality = settings.effective_quality();
    let size = canvas.size();
    let mut buf = Vec::new();

    match settings.format {
        ExportFormat::Jpeg => {
            JpegEncoder::new_with_quality(Cursor::new(&mut buf), quality)
                .write_image(canvas.as_raw(), size.width, size.height, ExtendedColorType::Rgb8)
                .context("encode JPEG")?;
        }
        ExportFormat::Png => {
            PngEncoder::new(Cursor::new(&mut buf))
                .write_image(canvas.as_raw(), size.width, size.height, ExtendedColorType::Rgb8)
                .context("encode PNG")?;
        }
        ExportFormat::Webp => {
            // The pure-Rust WebP encoder is lossless, so lossy quality is emulated by
            // quantizing channels before encoding.
            let mut rgb = canvas.as_raw().to_vec();
            quantize_rgb_for_webp(&mut rgb, quality);
            WebPEncoder::new_lossless(Cursor::new(&mut buf))
                .write_image(&rgb, size.width, size.height, ExtendedColorType::Rgb8)
                .context("encode WEBP")?;
        }
    }

    let out = ExportedImage {
        bytes: buf,
        format: settings.format,
        quality,
    };
    tracing::debug!(size_kb = out.size_kb(), quality, "exported canvas");
    Ok(out)
}

fn quantize_rgb_for_webp(data: &mut [u8], quality: u8) {
    if quality >= MAX_QUALITY {
        return;
    }
    let levels = webp_levels_from_quality(quality);
    let step = 255.0 / (f32::from(levels) - 1.0);
    for channel in data.iter_mut() {
        let bucket = (f32::from(*channel) / step).round();
        *channel = (bucket * step).round().clamp(0.0, 255.0) as u8;
    }
}

/// Quadratic in quality: fine palettes near 100, aggressively coarse at the low end.
fn webp_levels_from_quality(quality: u8) -> u16 {
    if quality >= MAX_QUALITY {
        return 256;
    }
    let normalized = f32::from(quality).clamp(1.0, 100.0) / 100.0;
    let levels = 2.0 + normalized * normalized * 254.0;
    levels.round().clamp(2.0, 256.0) as u16
}

#[cfg(test)]
#[path = "../../tests/unit/encode/export.rs"]
mod tests;
