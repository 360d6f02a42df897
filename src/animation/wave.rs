use core::f32::consts::PI;

use serde::Deserialize;

use super::{Animation, Frame};
use crate::color::{dim, wheel};
use crate::surface::PixelSurface;

/// Simulated time advanced per frame.
const TIME_STEP: f32 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WaveParams {
    pub wave_speed: f32,
    /// Exponential falloff along the strip
    pub decay_rate: f32,
    /// Pulse rate of the source at pixel 0
    pub brightness_frequency: f32,
    pub wavelength: f32,
}

impl Default for WaveParams {
    fn default() -> Self {
        Self {
            wave_speed: 1.0,
            decay_rate: 2.0,
            brightness_frequency: 0.1,
            wavelength: 6.0,
        }
    }
}

/// Sine wave travelling away from a pulsing source at pixel 0.
///
/// Colors are emitted from the source over time, so each crest carries the
/// color that was current when it left.
#[derive(Debug, Clone)]
pub struct WaveAnimation {
    params: WaveParams,
    time: f32,
}

impl Default for WaveAnimation {
    fn default() -> Self {
        Self::new(WaveParams::default())
    }
}

impl WaveAnimation {
    pub const fn new(params: WaveParams) -> Self {
        Self { params, time: 0.0 }
    }
}

impl Animation for WaveAnimation {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn execute<S: PixelSurface + ?Sized>(&mut self, surface: &mut S, _frame: Frame) {
        self.time += TIME_STEP;

        let WaveParams {
            wave_speed,
            decay_rate,
            brightness_frequency,
            wavelength,
        } = self.params;
        let len = surface.len();
        let travel = wave_speed * 10.0;
        let source = 0.65 + 0.35 * libm::sinf(self.time * brightness_frequency * 2.0 * PI);

        for index in 0..len {
            let distance = index as f32;
            let crest = (libm::sinf((distance - self.time * travel) / wavelength) + 1.0) / 2.0;
            let emitted = self.time - distance / travel;
            let hue = ((emitted * 20.0) as i32).rem_euclid(255) as u8;
            let falloff = libm::expf(-decay_rate * distance / len as f32);
            surface.set_pixel(index, dim(wheel(hue), source * crest * falloff));
        }
    }
}
