use serde::Deserialize;

use super::{Animation, Frame};
use crate::color::{BLACK, wheel};
use crate::surface::PixelSurface;

/// Squared magnitude past which a point counts as escaped.
const ESCAPE_RADIUS_SQUARED: f32 = 10.0;

/// Iteration budget ceiling per pixel.
pub const MAX_ITERATIONS: u32 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MandelbrotParams {
    /// Real part at the start of the sweep
    pub re_min: f32,
    pub im_min: f32,
    pub im_max: f32,
    /// Frames per pixel-width step along the real axis
    pub scale: u32,
    pub max_iterations: u32,
    pub color_scale: u32,
}

impl Default for MandelbrotParams {
    fn default() -> Self {
        Self {
            re_min: -1.05,
            im_min: -0.3616,
            im_max: -0.3156,
            scale: 5,
            max_iterations: 50,
            color_scale: 10,
        }
    }
}

/// Sweeps a vertical line of the Mandelbrot set across the real axis, coloring
/// each pixel by its escape time.
#[derive(Debug, Clone)]
pub struct MandelbrotAnimation {
    params: MandelbrotParams,
}

impl Default for MandelbrotAnimation {
    fn default() -> Self {
        Self::new(MandelbrotParams::default())
    }
}

impl MandelbrotAnimation {
    /// `max_iterations` is capped at [`MAX_ITERATIONS`].
    pub fn new(mut params: MandelbrotParams) -> Self {
        params.max_iterations = params.max_iterations.min(MAX_ITERATIONS);
        Self { params }
    }

    pub const fn params(&self) -> &MandelbrotParams {
        &self.params
    }

    /// Iterations before `c` escapes, or `None` if it stays bounded.
    pub fn escape_time(&self, c_re: f32, c_im: f32) -> Option<u32> {
        let (mut z_re, mut z_im) = (0.0_f32, 0.0_f32);
        for iteration in 0..self.params.max_iterations {
            (z_re, z_im) = (z_re * z_re - z_im * z_im + c_re, 2.0 * z_re * z_im + c_im);
            if z_re * z_re + z_im * z_im > ESCAPE_RADIUS_SQUARED {
                return Some(iteration);
            }
        }
        None
    }
}

impl Animation for MandelbrotAnimation {
    #[allow(clippy::cast_possible_truncation)]
    fn execute<S: PixelSurface + ?Sized>(&mut self, surface: &mut S, frame: Frame) {
        let len = surface.len();
        if len == 0 {
            return;
        }

        let scale = u64::from(self.params.scale.max(1));
        let delta = (self.params.im_max - self.params.im_min).abs() / len as f32;
        let column = frame.index % (len as u64 * scale);
        let c_re = self.params.re_min + (delta / scale as f32) * column as f32;

        for index in 0..len {
            let c_im = self.params.im_min + delta * index as f32;
            let color = match self.escape_time(c_re, c_im) {
                Some(iterations) => {
                    wheel((iterations.wrapping_mul(self.params.color_scale) % 255) as u8)
                }
                None => BLACK,
            };
            surface.set_pixel(index, color);
        }
    }
}
