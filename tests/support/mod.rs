#![allow(dead_code, unreachable_pub)]

use std::cell::Cell;

use embassy_time::{Duration, Instant};
use pixel_show::{Clock, OutputDriver, PixelSurface, RandomSource, Rgb};

pub const RED: Rgb = Rgb::new(255, 0, 0);
pub const GREEN: Rgb = Rgb::new(0, 255, 0);
pub const BLUE: Rgb = Rgb::new(0, 0, 255);
pub const WHITE: Rgb = Rgb::new(255, 255, 255);
pub const BLACK: Rgb = Rgb::new(0, 0, 0);
pub const MARK: Rgb = Rgb::new(1, 2, 3);

/// In-memory surface that records every write.
#[derive(Debug, Clone)]
pub struct MockSurface {
    pub pixels: Vec<Rgb>,
    pub writes: Vec<usize>,
    pub brightness: u8,
    pub flushes: usize,
}

impl MockSurface {
    pub fn new(len: usize) -> Self {
        Self::filled(len, BLACK)
    }

    pub fn filled(len: usize, color: Rgb) -> Self {
        Self {
            pixels: vec![color; len],
            writes: Vec::new(),
            brightness: 255,
            flushes: 0,
        }
    }

    pub fn written(&self, index: usize) -> bool {
        self.writes.contains(&index)
    }

    pub fn count(&self, color: Rgb) -> usize {
        self.pixels.iter().filter(|&&pixel| pixel == color).count()
    }
}

impl PixelSurface for MockSurface {
    fn len(&self) -> usize {
        self.pixels.len()
    }

    fn pixel(&self, index: usize) -> Rgb {
        self.pixels.get(index).copied().unwrap_or(BLACK)
    }

    fn set_pixel(&mut self, index: usize, color: Rgb) {
        if let Some(pixel) = self.pixels.get_mut(index) {
            *pixel = color;
            self.writes.push(index);
        }
    }

    fn brightness(&self) -> u8 {
        self.brightness
    }

    fn set_brightness(&mut self, brightness: u8) {
        self.brightness = brightness;
    }

    fn flush(&mut self) {
        self.flushes += 1;
    }
}

/// Driver keeping every frame it was handed.
#[derive(Debug, Default)]
pub struct RecordingDriver {
    pub frames: Vec<Vec<Rgb>>,
}

impl OutputDriver for RecordingDriver {
    fn write(&mut self, colors: &[Rgb]) {
        self.frames.push(colors.to_vec());
    }
}

/// Random source replaying a fixed value.
#[derive(Debug, Clone, Copy)]
pub struct FixedRandom(pub f32);

impl RandomSource for FixedRandom {
    fn next_f32(&mut self) -> f32 {
        self.0
    }
}

/// Random source cycling through a fixed sequence.
#[derive(Debug, Clone)]
pub struct SequenceRandom {
    values: Vec<f32>,
    next: usize,
}

impl SequenceRandom {
    pub fn new(values: &[f32]) -> Self {
        Self {
            values: values.to_vec(),
            next: 0,
        }
    }
}

impl RandomSource for SequenceRandom {
    fn next_f32(&mut self) -> f32 {
        let value = self.values[self.next % self.values.len()];
        self.next += 1;
        value
    }
}

/// Clock that advances by a fixed step every time it is read.
#[derive(Debug)]
pub struct SteppingClock {
    now_ms: Cell<u64>,
    step_ms: u64,
}

impl SteppingClock {
    pub fn new(start_ms: u64, step_ms: u64) -> Self {
        Self {
            now_ms: Cell::new(start_ms),
            step_ms,
        }
    }

    pub fn advance(&self, duration: Duration) {
        self.now_ms.set(self.now_ms.get() + duration.as_millis());
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> Instant {
        let now = self.now_ms.get();
        self.now_ms.set(now + self.step_ms);
        Instant::from_millis(now)
    }
}

pub fn ms(value: u64) -> Instant {
    Instant::from_millis(value)
}
