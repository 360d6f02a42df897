use serde::Deserialize;

use super::{Animation, Frame};
use crate::color::{BLACK, wheel};
use crate::surface::PixelSurface;

/// Pixels per repeating chase segment.
const SEGMENT: u64 = 7;
/// Dark pixels at the start of each segment.
const GAP: u64 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TheaterChaseParams {
    /// Frames for one trip around the color wheel
    pub steps_per_cycle: u32,
}

impl Default for TheaterChaseParams {
    fn default() -> Self {
        Self { steps_per_cycle: 21 }
    }
}

/// Marquee chase: segments of lit pixels shifting one pixel per frame.
#[derive(Debug, Clone)]
pub struct TheaterChaseAnimation {
    steps_per_cycle: u64,
    step: u64,
}

impl Default for TheaterChaseAnimation {
    fn default() -> Self {
        Self::new(TheaterChaseParams::default())
    }
}

impl TheaterChaseAnimation {
    pub fn new(params: TheaterChaseParams) -> Self {
        Self {
            steps_per_cycle: u64::from(params.steps_per_cycle.max(1)),
            step: 0,
        }
    }
}

impl Animation for TheaterChaseAnimation {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn execute<S: PixelSurface + ?Sized>(&mut self, surface: &mut S, _frame: Frame) {
        let cycle = (self.step % self.steps_per_cycle) as f32 / self.steps_per_cycle as f32;
        let color = wheel((cycle * 255.0) as u8);

        for index in 0..surface.len() {
            let offset = (index as u64 + self.step) % SEGMENT;
            surface.set_pixel(index, if offset < GAP { BLACK } else { color });
        }

        self.step = self.step.wrapping_add(1);
    }
}
