//! Wire encoding of a frame.
//!
//! Pixels are stored as RGB but the strip expects green, red, blue, each
//! channel most significant bit first.

use crate::color::Rgb;

/// Bits sent per pixel
pub const BITS_PER_PIXEL: usize = 24;

/// Pack a pixel into a 24-bit GRB word
pub const fn grb_word(color: Rgb) -> u32 {
    ((color.g as u32) << 16) | ((color.r as u32) << 8) | color.b as u32
}

/// Iterator over the bits of a frame in transmission order
#[derive(Debug, Clone)]
pub struct BitStream<'a> {
    pixels: core::slice::Iter<'a, Rgb>,
    word: u32,
    remaining: usize,
}

impl<'a> BitStream<'a> {
    pub fn new(frame: &'a [Rgb]) -> Self {
        Self {
            pixels: frame.iter(),
            word: 0,
            remaining: 0,
        }
    }
}

impl Iterator for BitStream<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        if self.remaining == 0 {
            self.word = grb_word(*self.pixels.next()?);
            self.remaining = BITS_PER_PIXEL;
        }
        self.remaining -= 1;
        Some((self.word >> self.remaining) & 1 == 1)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.remaining + self.pixels.len() * BITS_PER_PIXEL;
        (len, Some(len))
    }
}

impl ExactSizeIterator for BitStream<'_> {}
