use image::{DynamicImage, RgbImage, RgbaImage};

use crate::foundation::core::{CANVAS_HEIGHT, CANVAS_WIDTH, CanvasSize};
use crate::foundation::error::{CanvasError, CanvasResult};
use crate::foundation::math::mul_div255_u8;

const BYTES_PER_MIB: f64 = 1024.0 * 1024.0;

/// Facts about an uploaded image, captured before any resizing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SourceInfo {
    /// Dimensions as decoded.
    pub size: CanvasSize,
    /// Encoded size of the upload, or 0 when the image was built in memory.
    pub file_bytes: u64,
}

impl SourceInfo {
    /// `width / height` of the original image.
    pub fn aspect_ratio(&self) -> f64 {
        self.size.aspect_ratio()
    }

    /// Encoded size in MiB.
    pub fn file_size_mib(&self) -> f64 {
        self.file_bytes as f64 / BYTES_PER_MIB
    }

    /// Whether the source already has the exact output canvas dimensions.
    pub fn is_canvas_sized(&self) -> bool {
        self.size.width == CANVAS_WIDTH && self.size.height == CANVAS_HEIGHT
    }
}

/// Decoded source image, kept as premultiplied RGBA8.
///
/// Premultiplying zeroes the color hidden under fully transparent pixels, so resampling never
/// bleeds it into visible edges. `has_alpha` records whether the decoded color type carried an
/// alpha channel. Opaque sources paste as a plain copy; alpha sources blend against the
/// background.
#[derive(Clone, Debug)]
pub struct SourceImage {
    pixels: RgbaImage,
    has_alpha: bool,
    info: SourceInfo,
}

impl SourceImage {
    /// Wrap an opaque RGB buffer.
    pub fn from_rgb(img: RgbImage) -> CanvasResult<Self> {
        Self::from_dynamic(DynamicImage::ImageRgb8(img), 0)
    }

    /// Wrap a straight-alpha RGBA buffer whose alpha channel acts as a paste mask.
    pub fn from_rgba(img: RgbaImage) -> CanvasResult<Self> {
        Self::from_dynamic(DynamicImage::ImageRgba8(img), 0)
    }

    /// Record the encoded byte size of the upload, which feeds the high-res scale cap.
    pub fn with_file_bytes(mut self, file_bytes: u64) -> Self {
        self.info.file_bytes = file_bytes;
        self
    }

    fn from_dynamic(img: DynamicImage, file_bytes: u64) -> CanvasResult<Self> {
        let size = CanvasSize::new(img.width(), img.height())
            .map_err(|_| CanvasError::decode("image has zero width or height"))?;
        let has_alpha = img.color().has_alpha();
        let mut pixels = img.into_rgba8();
        if has_alpha {
            premultiply_rgba8_in_place(&mut pixels);
        }
        Ok(Self {
            pixels,
            has_alpha,
            info: SourceInfo { size, file_bytes },
        })
    }

    /// Premultiplied RGBA8 pixels.
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Whether the pixels carry a meaningful alpha channel.
    pub fn has_alpha(&self) -> bool {
        self.has_alpha
    }

    /// Metadata about the original upload.
    pub fn info(&self) -> &SourceInfo {
        &self.info
    }

    /// Current pixel dimensions.
    pub fn size(&self) -> CanvasSize {
        self.info.size
    }
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        match a {
            0 => px[..3].fill(0),
            255 => {}
            _ => {
                for c in &mut px[..3] {
                    *c = mul_div255_u8(u16::from(*c), a);
                }
            }
        }
    }
}

/// Decode encoded image bytes (JPEG, PNG, WEBP, ...) into a [`SourceImage`].
pub fn decode_image(bytes: &[u8]) -> CanvasResult<SourceImage> {
    if bytes.is_empty() {
        return Err(CanvasError::decode("input image is empty"));
    }
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| CanvasError::decode(format!("decode image from memory: {e}")))?;
    let img = SourceImage::from_dynamic(dyn_img, bytes.len() as u64)?;
    tracing::debug!(
        size = %img.size(),
        has_alpha = img.has_alpha(),
        file_bytes = img.info.file_bytes,
        "decoded source image"
    );
    Ok(img)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
