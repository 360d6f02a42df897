//! Position-to-color lookup through sorted control points.

use alloc::vec::Vec;
use core::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::color::{BLACK, Rgb, lerp};

/// How a segment blends from its lower point to the next one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Interpolation {
    #[default]
    Linear,
    /// Hold the lower point's color for the whole segment.
    Step,
    /// Reshape the fraction as `fraction^power` before blending.
    Power,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorPoint {
    pub position: f32,
    pub color: Rgb,
    pub interpolation: Interpolation,
    pub power: f32,
}

impl ColorPoint {
    pub const fn new(position: f32, color: Rgb) -> Self {
        Self {
            position,
            color,
            interpolation: Interpolation::Linear,
            power: 1.0,
        }
    }

    #[must_use]
    pub const fn with_interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = interpolation;
        self
    }

    /// Switch to [`Interpolation::Power`] with the given exponent.
    #[must_use]
    pub const fn with_power(mut self, power: f32) -> Self {
        self.interpolation = Interpolation::Power;
        self.power = power;
        self
    }
}

/// Color gradient over a normalized position.
///
/// Points stay sorted by position after every insertion. Positions outside
/// the first and last point clamp to the boundary colors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Palette {
    points: Vec<ColorPoint>,
}

impl Palette {
    pub const fn new() -> Self {
        Self { points: Vec::new() }
    }

    pub fn from_points(points: impl IntoIterator<Item = ColorPoint>) -> Self {
        let mut palette = Self::new();
        for point in points {
            palette.add(point);
        }
        palette
    }

    /// Insert a point, keeping the list sorted.
    ///
    /// Points sharing a position keep insertion order.
    pub fn add(&mut self, point: ColorPoint) {
        let at = self
            .points
            .iter()
            .position(|existing| {
                existing.position.partial_cmp(&point.position) == Some(Ordering::Greater)
            })
            .unwrap_or(self.points.len());
        self.points.insert(at, point);
    }

    /// Insert a linearly interpolated point.
    pub fn add_color(&mut self, position: f32, color: Rgb) {
        self.add(ColorPoint::new(position, color));
    }

    pub fn points(&self) -> &[ColorPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Color at `position`. Black when the palette has no points.
    pub fn color_at(&self, position: f32) -> Rgb {
        let (Some(first), Some(last)) = (self.points.first(), self.points.last()) else {
            return BLACK;
        };
        if position <= first.position {
            return first.color;
        }
        if position >= last.position {
            return last.color;
        }

        for pair in self.points.windows(2) {
            let (lower, upper) = (&pair[0], &pair[1]);
            if position < lower.position || position >= upper.position {
                continue;
            }
            let mut fraction = (position - lower.position) / (upper.position - lower.position);
            match lower.interpolation {
                Interpolation::Step => return lower.color,
                Interpolation::Power => fraction = libm::powf(fraction, lower.power),
                Interpolation::Linear => {}
            }
            return lerp(lower.color, upper.color, fraction);
        }

        last.color
    }
}
