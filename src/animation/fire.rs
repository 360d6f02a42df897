use alloc::vec;
use alloc::vec::Vec;

use serde::Deserialize;

use super::{Animation, Frame};
use crate::fire::FireField;
use crate::random::{RandomSource, SeededRandom};
use crate::surface::PixelSurface;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FireParams {
    /// Upper bound of the heat removed per frame
    pub cooling: f32,
    /// Diffusion rate upward
    pub spread: f32,
    /// Chance per frame and bottom cell of a spark
    pub ignition: f32,
    pub spark_amount: f32,
    /// Contribution of the cells below, nearest first
    pub weights: Vec<f32>,
    /// Hidden reservoir cells below the first pixel
    pub start_offset: usize,
    /// Bottom cells that can ignite
    pub spark_range: usize,
}

impl Default for FireParams {
    fn default() -> Self {
        Self {
            cooling: 0.05,
            spread: 1.0,
            ignition: 0.4,
            spark_amount: 0.6,
            weights: vec![1.0, 0.5],
            start_offset: 4,
            spark_range: 3,
        }
    }
}

/// Deepest hidden reservoir accepted from params.
pub const MAX_START_OFFSET: usize = 64;

/// Flames rising from the bottom of the strip.
#[derive(Debug, Clone)]
pub struct FireAnimation {
    params: FireParams,
    field: Option<FireField>,
    rng: SeededRandom,
}

impl FireAnimation {
    /// `start_offset` is capped at [`MAX_START_OFFSET`].
    pub fn new(mut params: FireParams, seed: u64) -> Self {
        params.start_offset = params.start_offset.min(MAX_START_OFFSET);
        Self {
            params,
            field: None,
            rng: SeededRandom::new(seed),
        }
    }

    pub const fn params(&self) -> &FireParams {
        &self.params
    }

    pub const fn field(&self) -> Option<&FireField> {
        self.field.as_ref()
    }
}

impl Animation for FireAnimation {
    fn execute<S: PixelSurface + ?Sized>(&mut self, surface: &mut S, _frame: Frame) {
        let len = surface.len();
        if self.field.as_ref().is_none_or(|field| field.visible_len() != len) {
            self.field = Some(FireField::new(len, self.params.start_offset));
        }
        let Some(field) = self.field.as_mut() else {
            return;
        };

        let params = &self.params;
        field.cooldown(params.cooling * self.rng.next_f32());
        field.spread(
            &mut self.rng,
            params.spread,
            params.ignition,
            params.spark_range,
            params.spark_amount,
            &params.weights,
        );

        for index in 0..len {
            surface.set_pixel(index, field.color(index));
        }
    }
}
