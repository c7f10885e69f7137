//! Fixed-length pixel buffer.

use crate::color::{BLACK, Rgb};
use crate::error::FrameError;
use crate::filter::{Brightness, Filter};

/// Pixel colors of the whole strip, `N` LEDs long
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer<const N: usize> {
    pixels: [Rgb; N],
}

impl<const N: usize> FrameBuffer<N> {
    /// Create an all-black buffer
    pub const fn new() -> Self {
        Self { pixels: [BLACK; N] }
    }

    pub const fn len(&self) -> usize {
        N
    }

    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    pub const fn pixels(&self) -> &[Rgb; N] {
        &self.pixels
    }

    pub fn get(&self, index: usize) -> Option<Rgb> {
        self.pixels.get(index).copied()
    }

    /// Set a single pixel
    ///
    /// Fails without touching the buffer if `index` is past the end.
    pub fn set(&mut self, index: usize, color: Rgb) -> Result<(), FrameError> {
        let pixel = self
            .pixels
            .get_mut(index)
            .ok_or(FrameError::IndexOutOfRange { index, len: N })?;
        *pixel = color;
        Ok(())
    }

    pub fn fill(&mut self, color: Rgb) {
        self.pixels.fill(color);
    }

    /// Alternate two colors, `even` on even indices and `odd` on odd ones
    pub fn interleave(&mut self, even: Rgb, odd: Rgb) {
        for (i, pixel) in self.pixels.iter_mut().enumerate() {
            *pixel = if i % 2 == 0 { even } else { odd };
        }
    }

    /// Light every other LED, starting from the first
    pub fn up_light(&mut self, color: Rgb) {
        self.interleave(color, BLACK);
    }

    /// Copy of the buffer scaled by `brightness`
    pub fn scaled(&self, brightness: Brightness) -> [Rgb; N] {
        let mut frame = self.pixels;
        brightness.apply(&mut frame);
        frame
    }
}

impl<const N: usize> Default for FrameBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}
