use alloc::vec::Vec;

use serde::Deserialize;

use super::fade::FadeIn;
use super::{Animation, Frame};
use crate::color::Rgb;
use crate::log::show_log;
use crate::palette::{ColorPoint, Palette};
use crate::surface::PixelSurface;

const DEFAULT_COLORS: [Rgb; 2] = [Rgb::new(0, 87, 183), Rgb::new(255, 215, 0)];

/// Either a single color (`r`, `g`, `b`) or a list of `colors` with optional
/// percentage boundaries in `ranges`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ColorRangesParams {
    pub r: Option<u8>,
    pub g: Option<u8>,
    pub b: Option<u8>,
    pub colors: Vec<[u8; 3]>,
    /// Boundaries between consecutive colors, in percent of the strip.
    pub ranges: Vec<f32>,
    /// Blend between colors instead of hard sections.
    pub gradient: bool,
}

impl ColorRangesParams {
    fn resolve_colors(&self) -> Vec<Rgb> {
        if self.r.is_some() || self.g.is_some() || self.b.is_some() {
            return alloc::vec![Rgb::new(
                self.r.unwrap_or(255),
                self.g.unwrap_or(255),
                self.b.unwrap_or(255),
            )];
        }
        if self.colors.is_empty() {
            return DEFAULT_COLORS.to_vec();
        }
        self.colors
            .iter()
            .map(|&[r, g, b]| Rgb::new(r, g, b))
            .collect()
    }
}

#[derive(Debug, Clone)]
struct Sections {
    colors: Vec<Rgb>,
    ranges: Vec<f32>,
    gradient: bool,
}

impl Sections {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn target_colors(&self, len: usize) -> Vec<Rgb> {
        if self.gradient && self.colors.len() > 1 {
            let last = (self.colors.len() - 1) as f32;
            let palette = Palette::from_points(
                self.colors
                    .iter()
                    .enumerate()
                    .map(|(index, &color)| ColorPoint::new(index as f32 / last, color)),
            );
            return (0..len)
                .map(|led| {
                    let position = if len > 1 {
                        led as f32 / (len - 1) as f32
                    } else {
                        0.0
                    };
                    palette.color_at(position)
                })
                .collect();
        }

        let boundaries = self.boundaries(len);
        let last = self.colors.len().saturating_sub(1);
        (0..len)
            .map(|led| {
                let section = boundaries
                    .windows(2)
                    .position(|pair| led >= pair[0] && led < pair[1])
                    .unwrap_or(0);
                self.colors.get(section.min(last)).copied().unwrap_or_default()
            })
            .collect()
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn boundaries(&self, len: usize) -> Vec<usize> {
        let count = self.colors.len();
        let mut boundaries = Vec::with_capacity(count + 1);
        boundaries.push(0);

        let custom = !self.ranges.is_empty();
        if custom && self.ranges.len() + 1 == count {
            boundaries.extend(
                self.ranges
                    .iter()
                    .map(|&percent| (len as f32 * percent / 100.0) as usize),
            );
        } else {
            if custom {
                show_log!(
                    "[show] ColorRanges: expected {} ranges for {} colors, got {}; using equal sections",
                    count.saturating_sub(1),
                    count,
                    self.ranges.len()
                );
            }
            boundaries.extend(
                (1..count).map(|index| (len as f32 * index as f32 / count as f32) as usize),
            );
        }

        boundaries.push(len);
        boundaries
    }
}

/// Static color sections, for flags and simple patterns.
#[derive(Debug, Clone)]
pub struct ColorRangesAnimation {
    sections: Sections,
    fade: FadeIn,
}

impl Default for ColorRangesAnimation {
    fn default() -> Self {
        Self::new(ColorRangesParams::default())
    }
}

impl ColorRangesAnimation {
    pub fn new(params: ColorRangesParams) -> Self {
        Self {
            sections: Sections {
                colors: params.resolve_colors(),
                ranges: params.ranges,
                gradient: params.gradient,
            },
            fade: FadeIn::default(),
        }
    }

    pub fn colors(&self) -> &[Rgb] {
        &self.sections.colors
    }

    /// The frame this animation settles on for a strip of `len` pixels.
    pub fn target_colors(&self, len: usize) -> Vec<Rgb> {
        self.sections.target_colors(len)
    }
}

impl Animation for ColorRangesAnimation {
    fn execute<S: PixelSurface + ?Sized>(&mut self, surface: &mut S, frame: Frame) {
        let sections = &self.sections;
        self.fade
            .execute(surface, frame.now, |len| sections.target_colors(len));
    }

    fn is_complete(&self) -> bool {
        self.fade.is_complete()
    }
}
