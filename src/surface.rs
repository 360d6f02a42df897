//! Pixel addressing.
//!
//! [`PixelSurface`] is the capability every animation draws on. [`Strip`] is
//! the frame-buffered implementation that pushes finished frames to an
//! [`OutputDriver`].

use alloc::vec::Vec;

use smart_leds::SmartLedsWrite;

use crate::color::{BLACK, Rgb};
use crate::error::ShowError;
use crate::log::show_log;
use crate::math8::scale8;

/// Abstract LED driver trait
///
/// Implement this trait to support different hardware platforms.
/// [`Strip`] is generic over it.
pub trait OutputDriver {
    /// Write colors to the LED strip
    fn write(&mut self, colors: &[Rgb]);
}

/// Fixed-length sequence of colors with a global brightness.
///
/// Out-of-range writes are ignored and out-of-range reads return black.
pub trait PixelSurface {
    /// Number of addressable pixels. Never changes for a given instance.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Color at `index`, or black when out of range.
    fn pixel(&self, index: usize) -> Rgb;

    /// Set the color at `index`. No-op when out of range.
    fn set_pixel(&mut self, index: usize, color: Rgb);

    /// Checked variant of [`PixelSurface::set_pixel`].
    fn try_set_pixel(&mut self, index: usize, color: Rgb) -> Result<(), ShowError> {
        let len = self.len();
        if index >= len {
            return Err(ShowError::IndexOutOfRange { index, len });
        }
        self.set_pixel(index, color);
        Ok(())
    }

    /// Set every pixel to `color`.
    fn fill(&mut self, color: Rgb) {
        for index in 0..self.len() {
            self.set_pixel(index, color);
        }
    }

    /// Global brightness applied on flush.
    fn brightness(&self) -> u8;

    fn set_brightness(&mut self, brightness: u8);

    /// Push the current frame out.
    fn flush(&mut self);

    /// Copy of the current colors.
    fn snapshot(&self) -> Vec<Rgb> {
        (0..self.len()).map(|index| self.pixel(index)).collect()
    }
}

impl<S: PixelSurface + ?Sized> PixelSurface for &mut S {
    fn len(&self) -> usize {
        (**self).len()
    }

    fn pixel(&self, index: usize) -> Rgb {
        (**self).pixel(index)
    }

    fn set_pixel(&mut self, index: usize, color: Rgb) {
        (**self).set_pixel(index, color);
    }

    fn fill(&mut self, color: Rgb) {
        (**self).fill(color);
    }

    fn brightness(&self) -> u8 {
        (**self).brightness()
    }

    fn set_brightness(&mut self, brightness: u8) {
        (**self).set_brightness(brightness);
    }

    fn flush(&mut self) {
        (**self).flush();
    }
}

/// Frame buffer of `N` pixels in front of an [`OutputDriver`].
///
/// Brightness is applied with [`scale8`] on the way out; the buffer itself
/// keeps full-scale colors.
pub struct Strip<D: OutputDriver, const N: usize> {
    driver: D,
    pixels: [Rgb; N],
    output: [Rgb; N],
    brightness: u8,
}

impl<D: OutputDriver, const N: usize> Strip<D, N> {
    pub const fn new(driver: D) -> Self {
        Self {
            driver,
            pixels: [BLACK; N],
            output: [BLACK; N],
            brightness: u8::MAX,
        }
    }

    /// Full-scale colors as last written.
    pub const fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    pub const fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }
}

impl<D: OutputDriver, const N: usize> PixelSurface for Strip<D, N> {
    fn len(&self) -> usize {
        N
    }

    fn pixel(&self, index: usize) -> Rgb {
        self.pixels.get(index).copied().unwrap_or(BLACK)
    }

    fn set_pixel(&mut self, index: usize, color: Rgb) {
        if let Some(pixel) = self.pixels.get_mut(index) {
            *pixel = color;
        }
    }

    fn fill(&mut self, color: Rgb) {
        self.pixels.fill(color);
    }

    fn brightness(&self) -> u8 {
        self.brightness
    }

    fn set_brightness(&mut self, brightness: u8) {
        self.brightness = brightness;
    }

    fn flush(&mut self) {
        let brightness = self.brightness;
        for (out, pixel) in self.output.iter_mut().zip(self.pixels.iter()) {
            *out = Rgb {
                r: scale8(pixel.r, brightness),
                g: scale8(pixel.g, brightness),
                b: scale8(pixel.b, brightness),
            };
        }
        self.driver.write(&self.output);
    }
}

/// Adapter from any `smart-leds` writer to [`OutputDriver`].
pub struct SmartLedsOutput<W>(pub W);

impl<W> OutputDriver for SmartLedsOutput<W>
where
    W: SmartLedsWrite,
    W::Color: From<Rgb>,
{
    fn write(&mut self, colors: &[Rgb]) {
        if self.0.write(colors.iter().copied()).is_err() {
            show_log!("[show] led write failed");
        }
    }
}
