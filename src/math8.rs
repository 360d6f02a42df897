use embassy_time::Duration;

/// Scale an 8-bit value by a factor (0-255 = 0.0-1.0)
///
/// Uses integer math for efficiency on embedded systems.
#[inline]
#[allow(clippy::cast_lossless, clippy::cast_possible_truncation)]
pub const fn scale8(value: u8, scale: u8) -> u8 {
    ((value as u16 * (1 + scale as u16)) >> 8) as u8
}

/// Elapsed share of `duration` in `0.0..=1.0`.
///
/// A zero duration counts as already elapsed.
#[inline]
pub fn progress_f32(elapsed: Duration, duration: Duration) -> f32 {
    let total = duration.as_millis();
    if total == 0 || elapsed.as_millis() >= total {
        return 1.0;
    }
    elapsed.as_millis() as f32 / total as f32
}

/// Saturating conversion of a float channel value into a byte.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn saturate_u8(value: f32) -> u8 {
    if value.is_nan() || value <= 0.0 {
        0
    } else if value >= 255.0 {
        255
    } else {
        value as u8
    }
}
