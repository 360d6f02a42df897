use serde::Deserialize;

use super::{Animation, Frame};
use crate::color::{BLACK, Rgb};
use crate::surface::PixelSurface;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StroboscopeParams {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Frames lit per period
    pub on_cycles: u32,
    /// Frames dark per period
    pub off_cycles: u32,
}

impl Default for StroboscopeParams {
    fn default() -> Self {
        Self {
            r: 255,
            g: 255,
            b: 255,
            on_cycles: 1,
            off_cycles: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct StroboscopeAnimation {
    color: Rgb,
    on_cycles: u32,
    off_cycles: u32,
    cycle: u32,
}

impl Default for StroboscopeAnimation {
    fn default() -> Self {
        Self::new(StroboscopeParams::default())
    }
}

impl StroboscopeAnimation {
    pub fn new(params: StroboscopeParams) -> Self {
        Self {
            color: Rgb::new(params.r, params.g, params.b),
            on_cycles: params.on_cycles,
            off_cycles: params.off_cycles,
            cycle: 0,
        }
    }
}

impl Animation for StroboscopeAnimation {
    fn execute<S: PixelSurface + ?Sized>(&mut self, surface: &mut S, _frame: Frame) {
        let period = self.on_cycles.saturating_add(self.off_cycles).max(1);
        if self.cycle % period < self.on_cycles {
            surface.fill(self.color);
        } else {
            surface.fill(BLACK);
        }
        self.cycle = self.cycle.wrapping_add(1);
    }
}
