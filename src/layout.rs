//! Logical-to-physical pixel mapping.
//!
//! A [`Layout`] sits between the animations and the physical surface. It can
//! reverse the strip, mirror it around the centre and mask a run of dead
//! pixels at the start, the end, the middle or both edges.

use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::color::{BLACK, Rgb};
use crate::surface::PixelSurface;

/// How logical pixels land on the physical strip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutSettings {
    /// Run logical index 0 from the far end.
    pub reverse: bool,
    /// Render the logical strip twice, the second copy mirrored.
    pub mirror: bool,
    /// Number of masked pixels. The sign picks where they sit: start (+) or
    /// end (-) on a plain strip, middle (+) or edges (-) on a mirrored one.
    pub dead_pixels: i16,
}

impl LayoutSettings {
    pub const fn new(reverse: bool, mirror: bool, dead_pixels: i16) -> Self {
        Self {
            reverse,
            mirror,
            dead_pixels,
        }
    }

    /// Logical length for a physical strip of `physical_len` pixels.
    pub const fn logical_len(&self, physical_len: usize) -> usize {
        let live = physical_len.saturating_sub(self.dead_pixels.unsigned_abs() as usize);
        if self.mirror { live / 2 } else { live }
    }
}

/// Remapping decorator over a [`PixelSurface`].
///
/// Owns its inner surface; wrap `&mut surface` to borrow instead.
#[derive(Debug)]
pub struct Layout<S> {
    surface: S,
    settings: LayoutSettings,
    logical_len: usize,
}

impl<S: PixelSurface> Layout<S> {
    /// Wrap `surface` and blank its dead pixels.
    pub fn new(surface: S, settings: LayoutSettings) -> Self {
        let logical_len = settings.logical_len(surface.len());
        let mut layout = Self {
            surface,
            settings,
            logical_len,
        };
        layout.blank_dead_pixels();
        layout
    }

    /// Replace the mapping in place.
    ///
    /// The whole physical surface is cleared first so nothing drawn under the
    /// old mapping survives in what are now dead or unused pixels.
    pub fn rebuild(&mut self, settings: LayoutSettings) {
        self.surface.fill(BLACK);
        self.settings = settings;
        self.logical_len = settings.logical_len(self.surface.len());
        self.blank_dead_pixels();
    }

    pub const fn settings(&self) -> LayoutSettings {
        self.settings
    }

    pub const fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_inner(self) -> S {
        self.surface
    }

    /// Physical index backing `logical`, or `None` when out of range.
    ///
    /// On a mirrored layout this is the first of the two copies; the second
    /// is `physical_len - real - 1`.
    pub const fn real_index(&self, logical: usize) -> Option<usize> {
        if logical >= self.logical_len {
            return None;
        }
        let mut index = if self.settings.reverse {
            self.logical_len - logical - 1
        } else {
            logical
        };
        let dead = self.settings.dead_pixels;
        if !self.settings.mirror && dead > 0 {
            index += dead.unsigned_abs() as usize;
        } else if self.settings.mirror && dead < 0 {
            index += dead.unsigned_abs() as usize / 2;
        }
        Some(index)
    }

    /// Physical indices masked by the current settings, in ascending order.
    pub fn dead_pixel_indices(&self) -> Vec<usize> {
        let physical = self.surface.len();
        let dead = self.settings.dead_pixels;
        let count = dead.unsigned_abs() as usize;
        let mut indices: Vec<usize> = match (self.settings.mirror, dead) {
            (_, 0) => Vec::new(),
            (false, d) if d > 0 => (0..count).collect(),
            (false, _) => (physical.saturating_sub(count)..physical).collect(),
            (true, d) if d > 0 => {
                let start = physical.saturating_sub(count) / 2;
                (start..start + count).collect()
            }
            (true, _) => {
                let edge = count / 2;
                let mut edges: Vec<usize> = (0..edge).collect();
                if count % 2 == 1 {
                    // odd remainder goes to the unrendered gap after the first copy
                    edges.push(edge + self.logical_len);
                }
                edges.extend(physical.saturating_sub(edge)..physical);
                edges
            }
        };
        indices.retain(|&index| index < physical);
        indices
    }

    fn blank_dead_pixels(&mut self) {
        for index in self.dead_pixel_indices() {
            self.surface.set_pixel(index, BLACK);
        }
    }

    fn mirrored(&self, real: usize) -> Option<usize> {
        if self.settings.mirror {
            self.surface.len().checked_sub(real + 1)
        } else {
            None
        }
    }
}

impl<S: PixelSurface> PixelSurface for Layout<S> {
    fn len(&self) -> usize {
        self.logical_len
    }

    fn pixel(&self, index: usize) -> Rgb {
        self.real_index(index)
            .map_or(BLACK, |real| self.surface.pixel(real))
    }

    fn set_pixel(&mut self, index: usize, color: Rgb) {
        let Some(real) = self.real_index(index) else {
            return;
        };
        self.surface.set_pixel(real, color);
        if let Some(mirror) = self.mirrored(real) {
            self.surface.set_pixel(mirror, color);
        }
    }

    fn brightness(&self) -> u8 {
        self.surface.brightness()
    }

    fn set_brightness(&mut self, brightness: u8) {
        self.surface.set_brightness(brightness);
    }

    fn flush(&mut self) {
        self.surface.flush();
    }
}
