use std::fmt;

use crate::foundation::core::CanvasSize;

/// Non-fatal notice surfaced to the user alongside a render or export.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Advisory {
    /// The source is high resolution, so the scale range was capped.
    HighResolutionScaleCap {
        /// Scale ceiling now in effect.
        max_scale: f64,
    },
    /// The source was shrunk to fit the canvas before user scaling.
    PreShrunk {
        /// Original dimensions.
        from: CanvasSize,
        /// Dimensions after the shrink.
        to: CanvasSize,
    },
    /// The encoded export is larger than the warning threshold.
    ExportSizeExceeded {
        /// Encoded size in KB.
        size_kb: f64,
        /// Warning threshold in KB.
        limit_kb: f64,
    },
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HighResolutionScaleCap { max_scale } => write!(
                f,
                "high-resolution image: scale is limited to a maximum of {max_scale}x"
            ),
            Self::PreShrunk { from, to } => write!(
                f,
                "image was resized from {from} to {to} to fit the canvas, keeping its aspect ratio"
            ),
            Self::ExportSizeExceeded { size_kb, limit_kb } => write!(
                f,
                "file size {size_kb:.2} KB exceeds {limit_kb:.0} KB"
            ),
        }
    }
}
