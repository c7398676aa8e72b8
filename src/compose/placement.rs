use crate::compose::params::CanvasParameters;
use crate::foundation::core::CanvasSize;
use crate::foundation::error::{CanvasError, CanvasResult};
use crate::foundation::math::{floor_half, round_extent};

/// Where the scaled foreground lands on the canvas.
///
/// `x`/`y` are the top-left corner in canvas pixels and may be negative or past the canvas edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    /// Left edge.
    pub x: i64,
    /// Top edge.
    pub y: i64,
    /// Foreground dimensions after scaling.
    pub size: CanvasSize,
}

/// `round(width * scale) x round(height * scale)`.
pub fn scaled_dims(size: CanvasSize, scale: f64) -> CanvasResult<CanvasSize> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(CanvasError::out_of_range("scale", scale));
    }
    let w = round_extent(f64::from(size.width) * scale);
    let h = round_extent(f64::from(size.height) * scale);
    if w == 0 {
        return Err(CanvasError::out_of_range("scaled_width", w));
    }
    if h == 0 {
        return Err(CanvasError::out_of_range("scaled_height", h));
    }
    Ok(CanvasSize {
        width: w as u32,
        height: h as u32,
    })
}

/// Resolve the top-left corner of a `scaled` foreground on `canvas`.
///
/// Fit-to-canvas centers both axes. Otherwise each axis is independent: its centering flag
/// wins over its manual offset. Manual offsets are clamped to half the canvas in each
/// direction, and the vertical one is negated so positive input moves the image up.
pub fn placement_offset(
    params: &CanvasParameters,
    scaled: CanvasSize,
    canvas: CanvasSize,
) -> (i64, i64) {
    let center_x = floor_half(i64::from(canvas.width) - i64::from(scaled.width));
    let center_y = floor_half(i64::from(canvas.height) - i64::from(scaled.height));
    if params.fit_to_canvas {
        return (center_x, center_y);
    }

    let half_w = i64::from(canvas.width / 2);
    let half_h = i64::from(canvas.height / 2);

    let x = if params.center_horizontal {
        center_x
    } else {
        i64::from(params.offset_x).clamp(-half_w, half_w)
    };
    let y = if params.center_vertical {
        center_y
    } else {
        -i64::from(params.offset_y).clamp(-half_h, half_h)
    };
    (x, y)
}

/// Scale a foreground and place it, in one step.
pub fn place(
    params: &CanvasParameters,
    source: CanvasSize,
    scale: f64,
    canvas: CanvasSize,
) -> CanvasResult<Placement> {
    let size = scaled_dims(source, scale)?;
    let (x, y) = placement_offset(params, size, canvas);
    Ok(Placement { x, y, size })
}

#[cfg(test)]
#[path = "../../tests/unit/compose/placement.rs"]
mod tests;
