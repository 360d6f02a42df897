//! One-dimensional thermal field behind the fire animation.
//!
//! Heat enters only through ignition at the bottom of the field, moves upward
//! by diffusion and leaves through cooldown. The first `start_offset` cells
//! are a hidden reservoir below the visible strip.

use alloc::vec;
use alloc::vec::Vec;

use crate::color::{Rgb, black_body};
use crate::random::RandomSource;

/// Upper bound on the heat a cell may pull from below in one step.
pub const MAX_SPREAD_PER_STEP: f32 = 0.25;

#[derive(Debug, Clone, PartialEq)]
pub struct FireField {
    temperature: Vec<f32>,
    snapshot: Vec<f32>,
    start_offset: usize,
}

impl FireField {
    /// Cold field for `visible_len` pixels on top of `start_offset` reservoir cells.
    pub fn new(visible_len: usize, start_offset: usize) -> Self {
        let len = visible_len.saturating_add(start_offset);
        Self {
            temperature: vec![0.0; len],
            snapshot: vec![0.0; len],
            start_offset,
        }
    }

    /// Number of cells, reservoir included.
    pub fn len(&self) -> usize {
        self.temperature.len()
    }

    pub fn is_empty(&self) -> bool {
        self.temperature.is_empty()
    }

    pub fn visible_len(&self) -> usize {
        self.len() - self.start_offset
    }

    pub const fn start_offset(&self) -> usize {
        self.start_offset
    }

    /// Temperature of field cell `index`; 0.0 when out of range.
    pub fn temperature(&self, index: usize) -> f32 {
        self.temperature.get(index).copied().unwrap_or(0.0)
    }

    /// Out-of-range writes are ignored.
    pub fn set_temperature(&mut self, index: usize, value: f32) {
        if let Some(cell) = self.temperature.get_mut(index) {
            *cell = value;
        }
    }

    pub fn total_energy(&self) -> f32 {
        self.temperature.iter().sum()
    }

    /// Remove `amount` from every cell, flooring at zero.
    pub fn cooldown(&mut self, amount: f32) {
        for cell in &mut self.temperature {
            *cell = (*cell - amount).max(0.0);
        }
    }

    /// Move heat upward and ignite sparks at the bottom.
    ///
    /// All reads come from a snapshot taken on entry, so heat climbs at most
    /// one cell per call. Each cell pulls from up to `weights.len()` cells
    /// below it; the pull is bounded by [`MAX_SPREAD_PER_STEP`], by the
    /// snapshot heat of its contributors and by what each contributor still
    /// holds. The receiving cell gains exactly what was given, so diffusion
    /// never changes the total. Cells below `spark_range` additionally gain
    /// `spark_amount` with probability `ignition`.
    #[allow(clippy::too_many_arguments)]
    pub fn spread<R: RandomSource + ?Sized>(
        &mut self,
        rng: &mut R,
        rate: f32,
        ignition: f32,
        spark_range: usize,
        spark_amount: f32,
        weights: &[f32],
    ) {
        self.snapshot.copy_from_slice(&self.temperature);

        for index in 0..self.temperature.len() {
            let total_weight: f32 = contributors(index, weights).map(|(_, weight)| weight).sum();

            let mut weighted = 0.0;
            let mut available = 0.0;
            if total_weight > 0.0 {
                for (at, weight) in contributors(index, weights) {
                    weighted += self.snapshot[at] * weight / total_weight;
                    available += self.snapshot[at];
                }
            }

            let candidate = weighted.min(MAX_SPREAD_PER_STEP) * rate * rng.next_f32();
            let transfer = candidate.min(available);
            if transfer > 0.0 {
                let mut received = 0.0;
                for (at, weight) in contributors(index, weights) {
                    let give = (transfer * weight / total_weight).min(self.temperature[at]).max(0.0);
                    self.temperature[at] -= give;
                    received += give;
                }
                self.temperature[index] += received;
            }

            if index < spark_range && ignition > 0.0 && rng.next_f32() <= ignition {
                self.temperature[index] += spark_amount;
            }
        }
    }

    /// Color of visible pixel `index` through the black-body ramp.
    pub fn color(&self, index: usize) -> Rgb {
        black_body(self.temperature(index + self.start_offset))
    }
}

/// Cells below `index` paired with their raw weights, nearest first.
fn contributors(index: usize, weights: &[f32]) -> impl Iterator<Item = (usize, f32)> + '_ {
    weights
        .iter()
        .enumerate()
        .filter_map(move |(k, &weight)| index.checked_sub(k + 1).map(|at| (at, weight)))
}
