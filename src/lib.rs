//! fotolito places an uploaded image on a fixed 1920x1080 canvas and exports the result.
//!
//! # Pipeline overview
//!
//! 1. **Decode**: encoded bytes -> [`SourceImage`] (premultiplied RGBA8 plus upload metadata)
//! 2. **Bound**: derive the allowed scale range and pre-shrink oversized sources to fit the canvas
//! 3. **Background**: solid color fill, or a stretched and blurred copy of the source
//! 4. **Place**: scale the foreground, resolve fit / centered / manual offsets, paste with clipping
//! 5. **Export**: [`Canvas`] -> WEBP, JPEG or PNG bytes
//!
//! Rendering is a pure function of `(Option<&SourceImage>, &CanvasParameters)`: nothing is
//! retained between calls and the host re-renders on every parameter change. Placement that
//! runs off the canvas is clipped silently, never reported as an error.
//!
//! ```no_run
//! use fotolito::{CanvasParameters, Compositor, ExportFormat, ExportSettings, decode_image};
//!
//! # fn main() -> fotolito::CanvasResult<()> {
//! let bytes = std::fs::read("photo.jpg").map_err(anyhow::Error::from)?;
//! let source = decode_image(&bytes)?;
//! let params = CanvasParameters {
//!     fit_to_canvas: true,
//!     ..CanvasParameters::default()
//! };
//! let compositor = Compositor::default();
//! let canvas = compositor.composite(Some(&source), &params)?;
//! let out = compositor.export(&canvas, &ExportSettings::new(ExportFormat::Jpeg, 85))?;
//! println!("{:.2} KB", out.size_kb());
//! # Ok(())
//! # }
//! ```
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod compose;
mod effects;
mod encode;
mod foundation;
mod render;

pub use assets::decode::{SourceImage, SourceInfo, decode_image};
pub use compose::advisory::Advisory;
pub use compose::bounds::{ScaleBounds, pre_shrink_dims, scale_bounds};
pub use compose::params::{BackgroundMode, BlurRadius, CanvasParameters, CompositorConfig};
pub use compose::placement::{Placement, place, placement_offset, scaled_dims};
pub use effects::blur::gaussian_blur_rgb8;
pub use effects::composite::{PasteRegion, blend_over, paste_clipped};
pub use encode::export::{
    DEFAULT_QUALITY, ExportFormat, ExportSettings, ExportedImage, MAX_QUALITY, MIN_QUALITY, export,
};
pub use foundation::core::{CANVAS_HEIGHT, CANVAS_WIDTH, CanvasSize, Rgb8};
pub use foundation::error::{CanvasError, CanvasResult};
pub use render::compositor::{Canvas, Compositor, Rendered, SourceReport, composite};
