use crate::foundation::error::{CanvasError, CanvasResult};

const CHANNELS: usize = 3;
const BOX_PASSES: usize = 3;

/// Gaussian blur of a tightly packed RGB8 buffer with standard deviation `sigma`.
///
/// Approximated by three successive box blurs whose widths are chosen to match the Gaussian
/// variance, so cost per pixel is independent of `sigma`. Edges repeat the border pixel.
pub fn gaussian_blur_rgb8(src: &[u8], width: u32, height: u32, sigma: f32) -> CanvasResult<Vec<u8>> {
    let expected_len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(CHANNELS))
        .ok_or_else(|| CanvasError::out_of_range("blur_buffer", "size overflow"))?;
    if src.len() != expected_len {
        return Err(CanvasError::out_of_range(
            "blur_buffer",
            format!("{} bytes for {width}x{height} rgb8", src.len()),
        ));
    }
    if !sigma.is_finite() || sigma < 0.0 {
        return Err(CanvasError::out_of_range("blur_sigma", sigma));
    }
    if sigma == 0.0 || width == 0 || height == 0 {
        return Ok(src.to_vec());
    }

    let mut cur = src.to_vec();
    let mut tmp = vec![0u8; expected_len];
    for radius in box_radii_for_gauss(sigma) {
        if radius == 0 {
            continue;
        }
        horizontal_pass(&cur, &mut tmp, width, height, radius);
        vertical_pass(&tmp, &mut cur, width, height, radius);
    }
    Ok(cur)
}

/// Radii of the box filters whose cascade has (nearly) the variance of `sigma`.
fn box_radii_for_gauss(sigma: f32) -> [u32; BOX_PASSES] {
    let n = BOX_PASSES as f64;
    let s2 = f64::from(sigma) * f64::from(sigma);

    let w_ideal = (12.0 * s2 / n + 1.0).sqrt();
    let mut wl = w_ideal.floor() as i64;
    if wl % 2 == 0 {
        wl -= 1;
    }
    let wl = wl.max(1);
    let wu = wl + 2;

    let wl_f = wl as f64;
    let m_ideal = (12.0 * s2 - n * wl_f * wl_f - 4.0 * n * wl_f - 3.0 * n) / (-4.0 * wl_f - 4.0);
    let m = m_ideal.round().clamp(0.0, n) as usize;

    let mut radii = [0u32; BOX_PASSES];
    for (i, r) in radii.iter_mut().enumerate() {
        let w = if i < m { wl } else { wu };
        *r = ((w - 1) / 2) as u32;
    }
    radii
}

fn horizontal_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, radius: u32) {
    let w = width as usize;
    let r = radius as i64;
    let last = w as i64 - 1;
    let div = (2 * radius + 1) as u32;

    for y in 0..height as usize {
        let row = y * w * CHANNELS;
        let px = |x: i64, c: usize| -> u32 {
            let sx = x.clamp(0, last) as usize;
            u32::from(src[row + sx * CHANNELS + c])
        };

        let mut acc = [0u32; CHANNELS];
        for i in -r..=r {
            for (c, a) in acc.iter_mut().enumerate() {
                *a += px(i, c);
            }
        }
        for x in 0..w as i64 {
            let out = row + (x as usize) * CHANNELS;
            for c in 0..CHANNELS {
                dst[out + c] = div_round(acc[c], div);
                acc[c] = acc[c] + px(x + r + 1, c) - px(x - r, c);
            }
        }
    }
}

fn vertical_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, radius: u32) {
    let w = width as usize;
    let r = radius as i64;
    let last = height as i64 - 1;
    let div = (2 * radius + 1) as u32;

    for x in 0..w {
        let px = |y: i64, c: usize| -> u32 {
            let sy = y.clamp(0, last) as usize;
            u32::from(src[(sy * w + x) * CHANNELS + c])
        };

        let mut acc = [0u32; CHANNELS];
        for i in -r..=r {
            for (c, a) in acc.iter_mut().enumerate() {
                *a += px(i, c);
            }
        }
        for y in 0..height as i64 {
            let out = ((y as usize) * w + x) * CHANNELS;
            for c in 0..CHANNELS {
                dst[out + c] = div_round(acc[c], div);
                acc[c] = acc[c] + px(y + r + 1, c) - px(y - r, c);
            }
        }
    }
}

fn div_round(acc: u32, div: u32) -> u8 {
    ((acc + div / 2) / div).min(255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/effects/blur.rs"]
mod tests;
