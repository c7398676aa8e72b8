pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

/// Floor of `v / 2`, so negative gaps round toward negative infinity.
pub(crate) fn floor_half(v: i64) -> i64 {
    v.div_euclid(2)
}

/// Round a non-negative pixel extent to the nearest integer (half away from zero).
pub(crate) fn round_extent(v: f64) -> i64 {
    if !v.is_finite() || v <= 0.0 {
        return 0;
    }
    v.round().min(i64::from(u32::MAX) as f64) as i64
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
