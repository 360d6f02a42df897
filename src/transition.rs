use alloc::vec;
use alloc::vec::Vec;

use embassy_time::{Duration, Instant};

use crate::color::Rgb;
use crate::math8::{progress_f32, saturate_u8};
use crate::surface::PixelSurface;

/// Default length of a color transition.
pub const DEFAULT_TRANSITION: Duration = Duration::from_millis(2000);

/// Time-driven fade from a captured frame to a target frame.
///
/// The starting colors are snapshotted once at construction and never change.
/// Progress depends only on the time elapsed since `start`, so calling
/// [`ColorTransition::step`] more or less often does not change the outcome.
#[derive(Debug, Clone)]
pub struct ColorTransition {
    /// Colors at the moment the transition started
    initial: Vec<Rgb>,
    /// Colors to end on
    target: Vec<Rgb>,
    /// Time at which the transition started
    start: Instant,
    /// Total transition duration
    duration: Duration,
    /// Blend curve exponent, 1.0 is linear
    power: f32,
}

impl ColorTransition {
    /// Fade every pixel of `surface` towards one color.
    pub fn to_color<S: PixelSurface + ?Sized>(surface: &S, target: Rgb, now: Instant) -> Self {
        Self::to_colors(surface, vec![target; surface.len()], now)
    }

    /// Fade each pixel of `surface` towards its own target.
    pub fn to_colors<S: PixelSurface + ?Sized>(surface: &S, target: Vec<Rgb>, now: Instant) -> Self {
        Self {
            initial: surface.snapshot(),
            target,
            start: now,
            duration: DEFAULT_TRANSITION,
            power: 1.0,
        }
    }

    #[must_use]
    pub const fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    #[must_use]
    pub const fn with_power(mut self, power: f32) -> Self {
        self.power = power;
        self
    }

    pub fn initial(&self) -> &[Rgb] {
        &self.initial
    }

    pub fn target(&self) -> &[Rgb] {
        &self.target
    }

    pub const fn duration(&self) -> Duration {
        self.duration
    }

    /// Remaining share of the transition: 1.0 at the start, 0.0 once done.
    pub fn remaining(&self, now: Instant) -> f32 {
        1.0 - progress_f32(now.saturating_duration_since(self.start), self.duration)
    }

    pub fn is_complete(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.start) >= self.duration
    }

    /// Write the blended frame for `now` into `surface`.
    ///
    /// Only the pixels present in the snapshot, the target and the surface
    /// are touched. Does not flush. Returns `true` while the transition is
    /// still running.
    pub fn step<S: PixelSurface + ?Sized>(&self, surface: &mut S, now: Instant) -> bool {
        let remaining = self.remaining(now);
        let start_weight = libm::powf(remaining, self.power);
        let end_weight = libm::powf(1.0 - remaining, self.power);
        let blend = |from: u8, to: u8| {
            saturate_u8(f32::from(from) * start_weight + f32::from(to) * end_weight)
        };

        let count = surface.len().min(self.initial.len()).min(self.target.len());
        for (index, (from, to)) in self.initial.iter().zip(&self.target).take(count).enumerate() {
            surface.set_pixel(
                index,
                Rgb {
                    r: blend(from.r, to.r),
                    g: blend(from.g, to.g),
                    b: blend(from.b, to.b),
                },
            );
        }

        !self.is_complete(now)
    }
}
