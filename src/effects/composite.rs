use image::{RgbImage, RgbaImage};

use crate::foundation::math::mul_div255_u8;

/// Premultiplied RGBA8 source pixel.
pub type PremulRgba8 = [u8; 4];
/// Opaque RGB8 canvas pixel.
pub type Rgb8Px = [u8; 3];

/// Blend a premultiplied `src` over an opaque `dst`.
///
/// Alpha 0 keeps `dst`, alpha 255 replaces it.
pub fn blend_over(dst: Rgb8Px, src: PremulRgba8) -> Rgb8Px {
    let a = u16::from(src[3]);
    if a == 0 {
        return dst;
    }
    if a == 255 {
        return [src[0], src[1], src[2]];
    }

    let inv = 255u16 - a;
    let mut out = [0u8; 3];
    for i in 0..3 {
        let dc = mul_div255_u8(u16::from(dst[i]), inv);
        out[i] = src[i].saturating_add(dc);
    }
    out
}

/// Canvas-space rectangle that actually received foreground pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PasteRegion {
    /// Left edge on the canvas.
    pub x: u32,
    /// Top edge on the canvas.
    pub y: u32,
    /// Width of the visible part.
    pub width: u32,
    /// Height of the visible part.
    pub height: u32,
}

/// Paste `fg` onto `canvas` with its top-left corner at `(x, y)`.
///
/// Pixels falling outside the canvas are dropped; a foreground entirely off-canvas is a no-op
/// and returns `None`. With `use_alpha`, `fg` is read as premultiplied and its alpha is the blend mask; otherwise the
/// visible pixels are copied as-is.
pub fn paste_clipped(
    canvas: &mut RgbImage,
    fg: &RgbaImage,
    x: i64,
    y: i64,
    use_alpha: bool,
) -> Option<PasteRegion> {
    let (cw, ch) = (i64::from(canvas.width()), i64::from(canvas.height()));
    let (fw, fh) = (i64::from(fg.width()), i64::from(fg.height()));

    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = (x + fw).min(cw);
    let y1 = (y + fh).min(ch);
    if x0 >= x1 || y0 >= y1 {
        return None;
    }

    for cy in y0..y1 {
        let sy = (cy - y) as u32;
        for cx in x0..x1 {
            let sx = (cx - x) as u32;
            let s = fg.get_pixel(sx, sy).0;
            let d = canvas.get_pixel_mut(cx as u32, cy as u32);
            d.0 = if use_alpha {
                blend_over(d.0, s)
            } else {
                [s[0], s[1], s[2]]
            };
        }
    }

    Some(PasteRegion {
        x: x0 as u32,
        y: y0 as u32,
        width: (x1 - x0) as u32,
        height: (y1 - y0) as u32,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/effects/composite.rs"]
mod tests;
