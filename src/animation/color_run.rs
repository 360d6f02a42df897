use alloc::vec::Vec;

use super::{Animation, Frame};
use crate::color::{BLACK, Rgb, rgb_from_u32};
use crate::random::{RandomSource, SeededRandom};
use crate::surface::PixelSurface;

const PHASES: [Rgb; 8] = [
    rgb_from_u32(0x00_0000),
    rgb_from_u32(0x00_00FF),
    rgb_from_u32(0x00_FF00),
    rgb_from_u32(0x00_FFFF),
    rgb_from_u32(0xFF_0000),
    rgb_from_u32(0xFF_00FF),
    rgb_from_u32(0xFF_FF00),
    rgb_from_u32(0xFF_FFFF),
];

/// Chance per frame of launching a new dot.
const SPAWN_CHANCE: f32 = 0.05;

#[derive(Debug, Clone, Copy)]
struct Dot {
    start: u64,
    /// Pixels per frame
    speed: f32,
    color: Rgb,
}

impl Dot {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn position(&self, index: u64) -> usize {
        (self.speed * index.saturating_sub(self.start) as f32) as usize
    }
}

/// Dots of random color and speed running from pixel 0 to the end.
#[derive(Debug, Clone)]
pub struct ColorRunAnimation {
    dots: Vec<Dot>,
    started: bool,
    rng: SeededRandom,
}

impl ColorRunAnimation {
    pub fn new(seed: u64) -> Self {
        Self {
            dots: Vec::new(),
            started: false,
            rng: SeededRandom::new(seed),
        }
    }

    /// Dots currently on the strip.
    pub fn dot_count(&self) -> usize {
        self.dots.len()
    }

    fn spawn(&mut self, index: u64) {
        if !self.started {
            self.started = true;
            self.dots.push(Dot {
                start: index,
                speed: 0.5,
                color: rgb_from_u32(0xFF_0000),
            });
        }
        if self.rng.next_f32() < SPAWN_CHANCE {
            let speed = (20 + self.rng.next_below(41)) as f32 / 100.0;
            let color = PHASES[self.rng.next_below(PHASES.len())];
            self.dots.push(Dot {
                start: index,
                speed,
                color,
            });
        }
    }
}

impl Animation for ColorRunAnimation {
    fn execute<S: PixelSurface + ?Sized>(&mut self, surface: &mut S, frame: Frame) {
        self.spawn(frame.index);

        surface.fill(BLACK);
        for dot in &self.dots {
            surface.set_pixel(dot.position(frame.index), dot.color);
        }

        let len = surface.len();
        self.dots.retain(|dot| dot.position(frame.index) < len);
    }
}
