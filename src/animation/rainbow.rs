use super::{Animation, Frame};
use crate::color::wheel;
use crate::surface::PixelSurface;

/// Color wheel sweeping along the strip, one step per frame.
#[derive(Debug, Clone, Default)]
pub struct RainbowAnimation;

impl RainbowAnimation {
    pub const fn new() -> Self {
        Self
    }
}

impl Animation for RainbowAnimation {
    #[allow(clippy::cast_possible_truncation)]
    fn execute<S: PixelSurface + ?Sized>(&mut self, surface: &mut S, frame: Frame) {
        for index in 0..surface.len() {
            let position = (frame.index.wrapping_add(index as u64) % 255) as u8;
            surface.set_pixel(index, wheel(position));
        }
    }
}
