use alloc::vec::Vec;

use serde::Deserialize;

use super::fade::FadeIn;
use super::{Animation, Frame};
use crate::color::Rgb;
use crate::palette::Palette;
use crate::surface::PixelSurface;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TwoColorBlendParams {
    pub r1: u8,
    pub g1: u8,
    pub b1: u8,
    pub r2: u8,
    pub g2: u8,
    pub b2: u8,
}

impl Default for TwoColorBlendParams {
    fn default() -> Self {
        Self {
            r1: 255,
            g1: 0,
            b1: 0,
            r2: 0,
            g2: 0,
            b2: 255,
        }
    }
}

/// Linear gradient from the first color at pixel 0 to the second at the end.
#[derive(Debug, Clone)]
pub struct TwoColorBlendAnimation {
    palette: Palette,
    fade: FadeIn,
}

impl Default for TwoColorBlendAnimation {
    fn default() -> Self {
        Self::new(TwoColorBlendParams::default())
    }
}

impl TwoColorBlendAnimation {
    pub fn new(params: TwoColorBlendParams) -> Self {
        let mut palette = Palette::new();
        palette.add_color(0.0, Rgb::new(params.r1, params.g1, params.b1));
        palette.add_color(1.0, Rgb::new(params.r2, params.g2, params.b2));
        Self {
            palette,
            fade: FadeIn::default(),
        }
    }

    pub fn target_colors(&self, len: usize) -> Vec<Rgb> {
        gradient(&self.palette, len)
    }
}

fn gradient(palette: &Palette, len: usize) -> Vec<Rgb> {
    let span = len.saturating_sub(1).max(1) as f32;
    (0..len)
        .map(|index| palette.color_at(index as f32 / span))
        .collect()
}

impl Animation for TwoColorBlendAnimation {
    fn execute<S: PixelSurface + ?Sized>(&mut self, surface: &mut S, frame: Frame) {
        let palette = &self.palette;
        self.fade
            .execute(surface, frame.now, |len| gradient(palette, len));
    }

    fn is_complete(&self) -> bool {
        self.fade.is_complete()
    }
}
