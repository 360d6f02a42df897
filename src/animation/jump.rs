use heapless::Deque;

use super::{Animation, Frame};
use crate::color::{BLACK, Rgb, rgb_from_u32};
use crate::surface::PixelSurface;

/// Frames per unit of height; larger values slow the bounce down.
const TIME_SCALE: f32 = 10.0;
const SPARE_COLORS: usize = 6;

/// One bouncing light.
///
/// Each bounce is a parabola peaking at `peak_factor` of the strip length.
#[derive(Debug, Clone)]
pub struct Ball {
    peak_factor: f32,
    color: Rgb,
    period: u64,
    bounced: bool,
}

impl Ball {
    pub const fn new(peak_factor: f32, color: Rgb) -> Self {
        Self {
            peak_factor,
            color,
            period: 0,
            bounced: false,
        }
    }

    pub const fn color(&self) -> Rgb {
        self.color
    }

    /// Height of the ball at frame `index` on a strip of `len` pixels.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn position(&mut self, index: u64, len: usize) -> usize {
        let amplitude = self.peak_factor * len as f32;
        let duration = 2.0 * libm::sqrtf(amplitude) * TIME_SCALE;
        let center = duration / 2.0;
        let period_length = (duration as u64).max(1);

        let period = index / period_length;
        if self.period != period && !self.bounced {
            self.period = period;
            self.bounced = true;
        }

        let offset = (index % period_length) as f32;
        let from_peak = (offset - center) / TIME_SCALE;
        let height = amplitude - from_peak * from_peak;
        (height.max(0.0) as usize).min(len.saturating_sub(1))
    }

    /// Returns `true` once after each new bounce started.
    fn take_bounce(&mut self) -> bool {
        core::mem::take(&mut self.bounced)
    }

    fn swap_color(&mut self, spare: &mut Deque<Rgb, SPARE_COLORS>) {
        if spare.push_back(self.color).is_err() {
            return;
        }
        if let Some(next) = spare.pop_front() {
            self.color = next;
        }
    }
}

/// Balls of different heights bouncing off pixel 0, trading colors on every
/// bounce.
#[derive(Debug, Clone)]
pub struct JumpAnimation {
    balls: [Ball; 5],
    spare: Deque<Rgb, SPARE_COLORS>,
}

impl Default for JumpAnimation {
    fn default() -> Self {
        Self::new()
    }
}

impl JumpAnimation {
    pub fn new() -> Self {
        let mut spare = Deque::new();
        let _ = spare.push_back(rgb_from_u32(0xFF_FF00));
        Self {
            balls: [
                Ball::new(1.0, rgb_from_u32(0xFF_0000)),
                Ball::new(0.5, rgb_from_u32(0x00_FF00)),
                Ball::new(0.75, rgb_from_u32(0xFF_FF00)),
                Ball::new(0.80, rgb_from_u32(0xFF_00FF)),
                Ball::new(0.66, rgb_from_u32(0x00_00FF)),
            ],
            spare,
        }
    }
}

impl Animation for JumpAnimation {
    fn execute<S: PixelSurface + ?Sized>(&mut self, surface: &mut S, frame: Frame) {
        surface.fill(BLACK);
        let len = surface.len();
        for ball in &mut self.balls {
            let position = ball.position(frame.index, len);
            surface.set_pixel(position, ball.color);
            if ball.take_bounce() {
                ball.swap_color(&mut self.spare);
            }
        }
    }
}
