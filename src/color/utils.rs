use crate::color::Rgb;

/// All channels off
pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

/// Create an RGB color from a u32 value (0xRRGGBB format)
pub const fn rgb_from_u32(color: u32) -> Rgb {
    Rgb {
        r: ((color >> 16) & 0xFF) as u8,
        g: ((color >> 8) & 0xFF) as u8,
        b: (color & 0xFF) as u8,
    }
}

/// Pack an RGB color into a u32 value (0xRRGGBB format)
pub const fn rgb_to_u32(color: Rgb) -> u32 {
    ((color.r as u32) << 16) | ((color.g as u32) << 8) | color.b as u32
}

/// Classic three-segment color wheel.
///
/// Walks green -> red -> blue -> green over positions `0..=254`; position 255
/// is treated as 254 so the wheel never wraps onto itself.
pub const fn wheel(position: u8) -> Rgb {
    let position = if position > 254 { 254 } else { position };
    if position < 85 {
        let step = position * 3;
        return Rgb {
            r: step,
            g: 255 - step,
            b: 0,
        };
    }
    if position < 170 {
        let step = (position - 85) * 3;
        return Rgb {
            r: 255 - step,
            g: 0,
            b: step,
        };
    }
    let step = (position - 170) * 3;
    Rgb {
        r: 0,
        g: step,
        b: 255 - step,
    }
}

/// Linear blend of two colors, `amount_of_b` in `0.0..=1.0`.
///
/// Channels are truncated, not rounded.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn lerp(a: Rgb, b: Rgb, amount_of_b: f32) -> Rgb {
    let t = amount_of_b.clamp(0.0, 1.0);
    let channel = |from: u8, to: u8| -> u8 {
        (f32::from(from) * (1.0 - t) + f32::from(to) * t) as u8
    };
    Rgb {
        r: channel(a.r, b.r),
        g: channel(a.g, b.g),
        b: channel(a.b, b.b),
    }
}

/// Scale a color by a brightness factor in `0.0..=1.0`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn dim(color: Rgb, factor: f32) -> Rgb {
    let factor = factor.clamp(0.0, 1.0);
    Rgb {
        r: (f32::from(color.r) * factor) as u8,
        g: (f32::from(color.g) * factor) as u8,
        b: (f32::from(color.b) * factor) as u8,
    }
}

/// Black-body style heat ramp for temperatures in `0.0..=1.0`.
///
/// The first third ramps red up from black, so a cold cell is truly dark
/// instead of dim red. The second third adds green (orange to yellow) and the
/// last third adds blue towards white.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn black_body(temperature: f32) -> Rgb {
    const THIRD: f32 = 1.0 / 3.0;
    let t = if temperature.is_nan() {
        0.0
    } else {
        temperature.clamp(0.0, 1.0)
    };
    let ramp = |from: f32| -> u8 { (255.0 * ((t - from) / THIRD).clamp(0.0, 1.0)) as u8 };

    if t <= THIRD {
        Rgb {
            r: ramp(0.0),
            g: 0,
            b: 0,
        }
    } else if t <= 2.0 * THIRD {
        Rgb {
            r: 255,
            g: ramp(THIRD),
            b: 0,
        }
    } else {
        Rgb {
            r: 255,
            g: 255,
            b: ramp(2.0 * THIRD),
        }
    }
}
