use alloc::vec;

use serde::Deserialize;

use super::fade::FadeIn;
use super::{Animation, Frame};
use crate::color::Rgb;
use crate::surface::PixelSurface;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SolidParams {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Default for SolidParams {
    fn default() -> Self {
        Self {
            r: 255,
            g: 255,
            b: 255,
        }
    }
}

/// Single color over the whole strip, faded in from the previous frame.
#[derive(Debug, Clone)]
pub struct SolidAnimation {
    color: Rgb,
    fade: FadeIn,
}

impl Default for SolidAnimation {
    fn default() -> Self {
        Self::new(SolidParams::default())
    }
}

impl SolidAnimation {
    pub fn new(params: SolidParams) -> Self {
        Self::with_color(Rgb::new(params.r, params.g, params.b))
    }

    pub fn with_color(color: Rgb) -> Self {
        Self {
            color,
            fade: FadeIn::default(),
        }
    }

    pub const fn color(&self) -> Rgb {
        self.color
    }
}

impl Animation for SolidAnimation {
    fn execute<S: PixelSurface + ?Sized>(&mut self, surface: &mut S, frame: Frame) {
        let color = self.color;
        self.fade.execute(surface, frame.now, |len| vec![color; len]);
    }

    fn is_complete(&self) -> bool {
        self.fade.is_complete()
    }
}
