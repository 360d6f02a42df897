use alloc::collections::BTreeMap;

use embassy_time::{Duration, Instant};
use serde::Deserialize;

use super::{Animation, Frame};
use crate::color::{BLACK, Rgb, dim};
use crate::log::show_log;
use crate::random::{RandomSource, SeededRandom};
use crate::surface::PixelSurface;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct StarlightParams {
    /// Chance of a new star per frame, `0.0..=1.0`
    pub probability: f32,
    /// Time at full brightness, in milliseconds
    pub length: u64,
    /// Fade-in and fade-out time, in milliseconds
    pub fade: u64,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Default for StarlightParams {
    fn default() -> Self {
        Self {
            probability: 0.1,
            length: 5000,
            fade: 1000,
            r: 255,
            g: 180,
            b: 50,
        }
    }
}

/// Longest hold or fade accepted from params, in milliseconds.
pub const MAX_STAR_PHASE_MS: u64 = 600_000;

/// Twinkling stars: random pixels fade in, hold, then fade out.
#[derive(Debug, Clone)]
pub struct StarlightAnimation {
    probability: f32,
    hold: Duration,
    fade: Duration,
    color: Rgb,
    /// Start time of each lit star, keyed by pixel
    stars: BTreeMap<usize, Instant>,
    rng: SeededRandom,
}

impl StarlightAnimation {
    /// `length` and `fade` are capped at [`MAX_STAR_PHASE_MS`].
    pub fn new(params: StarlightParams, seed: u64) -> Self {
        Self {
            probability: params.probability,
            hold: Duration::from_millis(params.length.min(MAX_STAR_PHASE_MS)),
            fade: Duration::from_millis(params.fade.min(MAX_STAR_PHASE_MS)),
            color: Rgb::new(params.r, params.g, params.b),
            stars: BTreeMap::new(),
            rng: SeededRandom::new(seed),
        }
    }

    pub const fn hold(&self) -> Duration {
        self.hold
    }

    pub const fn fade(&self) -> Duration {
        self.fade
    }

    /// Number of stars currently alive.
    pub fn active_stars(&self) -> usize {
        self.stars.len()
    }

    fn lifetime(&self) -> Duration {
        self.fade + self.hold + self.fade
    }

    /// Brightness of a star `elapsed` after it appeared.
    pub fn brightness_at(&self, elapsed: Duration) -> f32 {
        let elapsed = elapsed.as_millis();
        let fade = self.fade.as_millis();
        let hold_end = fade + self.hold.as_millis();
        if elapsed < fade {
            return elapsed as f32 / fade as f32;
        }
        if elapsed < hold_end {
            return 1.0;
        }
        if elapsed < hold_end + fade {
            return 1.0 - (elapsed - hold_end) as f32 / fade as f32;
        }
        0.0
    }
}

impl Animation for StarlightAnimation {
    fn execute<S: PixelSurface + ?Sized>(&mut self, surface: &mut S, frame: Frame) {
        let len = surface.len();
        if len > 0 && self.rng.next_f32() < self.probability {
            let led = self.rng.next_below(len);
            if !self.stars.contains_key(&led) {
                self.stars.insert(led, frame.now);
                if self.stars.len() <= 5 {
                    show_log!("[show] Starlight: new star at {} ({} active)", led, self.stars.len());
                }
            }
        }

        surface.fill(BLACK);

        let lifetime = self.lifetime();
        self.stars
            .retain(|_, start| frame.now.saturating_duration_since(*start) < lifetime);
        for (&led, &start) in &self.stars {
            let brightness = self.brightness_at(frame.now.saturating_duration_since(start));
            surface.set_pixel(led, dim(self.color, brightness));
        }
    }
}
