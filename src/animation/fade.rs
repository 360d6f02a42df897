use alloc::vec::Vec;

use embassy_time::Instant;

use crate::color::Rgb;
use crate::surface::PixelSurface;
use crate::transition::ColorTransition;

/// Fade from whatever is on the surface to a computed target frame, then hold.
///
/// The target is computed lazily on the first frame, and again whenever the
/// surface length no longer matches it.
#[derive(Debug, Clone, Default)]
pub(crate) struct FadeIn {
    transition: Option<ColorTransition>,
    complete: bool,
}

impl FadeIn {
    pub(crate) fn execute<S, F>(&mut self, surface: &mut S, now: Instant, target: F)
    where
        S: PixelSurface + ?Sized,
        F: FnOnce(usize) -> Vec<Rgb>,
    {
        let stale = self
            .transition
            .as_ref()
            .is_none_or(|transition| transition.target().len() != surface.len());
        if stale {
            let colors = target(surface.len());
            self.transition = Some(ColorTransition::to_colors(surface, colors, now));
            self.complete = false;
        }

        if let Some(transition) = &self.transition {
            if !transition.step(surface, now) {
                self.complete = true;
            }
        }
    }

    pub(crate) const fn is_complete(&self) -> bool {
        self.complete
    }
}
