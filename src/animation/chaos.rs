use serde::Deserialize;

use super::{Animation, Frame};
use crate::color::{BLACK, wheel};
use crate::surface::PixelSurface;

const ITERATIONS: u32 = 60;
const COLOR_FACTOR: u32 = 4;
const X_INITIAL: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChaosParams {
    pub r_min: f32,
    pub r_max: f32,
    /// Growth-rate increment per frame
    pub r_delta: f32,
}

impl Default for ChaosParams {
    fn default() -> Self {
        Self {
            r_min: 2.95,
            r_max: 4.0,
            r_delta: 0.0002,
        }
    }
}

/// Orbit of the logistic map `x -> r x (1 - x)` plotted along the strip while
/// `r` sweeps slowly through the bifurcation range.
#[derive(Debug, Clone)]
pub struct ChaosAnimation {
    params: ChaosParams,
    r: f32,
}

impl Default for ChaosAnimation {
    fn default() -> Self {
        Self::new(ChaosParams::default())
    }
}

impl ChaosAnimation {
    pub const fn new(params: ChaosParams) -> Self {
        Self {
            params,
            r: params.r_min,
        }
    }

    /// Current growth rate.
    pub const fn r(&self) -> f32 {
        self.r
    }
}

impl Animation for ChaosAnimation {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn execute<S: PixelSurface + ?Sized>(&mut self, surface: &mut S, _frame: Frame) {
        surface.fill(BLACK);

        let len = surface.len();
        let scale = if len > 1 { (len - 1) as f32 } else { 1.0 };

        let mut x = X_INITIAL;
        for iteration in 0..ITERATIONS {
            x = self.r * x * (1.0 - x);
            let position = x * scale;
            if position >= 0.0 {
                surface.set_pixel(position as usize, wheel(((iteration * COLOR_FACTOR) % 255) as u8));
            }
        }

        self.r += self.params.r_delta;
        if self.r > self.params.r_max {
            self.r = self.params.r_min;
        }
    }
}
