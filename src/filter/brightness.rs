//! Linear brightness scaling
//!
//! The factor is kept as an exact fraction of [`Brightness::SCALE`], so every
//! whole percent is represented without rounding. Each channel is multiplied
//! by the factor and truncated toward zero: a factor of 1.0 leaves the color
//! untouched and 0.0 produces black.

use super::Filter;
use crate::color::Rgb;

/// Brightness factor in `0.0..=1.0`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Brightness(u16);

impl Brightness {
    /// Denominator of the stored factor
    pub const SCALE: u16 = 10_000;

    pub const OFF: Self = Self(0);
    pub const FULL: Self = Self(Self::SCALE);

    /// Create a factor, clamping it into range. NaN is treated as off.
    ///
    /// The value is rounded to the nearest 1/10000.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn new(value: f32) -> Self {
        if value.is_nan() {
            return Self::OFF;
        }
        let scaled = libm::roundf(value.clamp(0.0, 1.0) * f32::from(Self::SCALE));
        Self(scaled as u16)
    }

    /// Factor of `percent / 100`, with percent clamped to 100
    #[allow(clippy::cast_lossless)]
    pub const fn from_percent(percent: u8) -> Self {
        let percent = if percent > 100 { 100 } else { percent };
        Self(percent as u16 * (Self::SCALE / 100))
    }

    pub fn value(self) -> f32 {
        f32::from(self.0) / f32::from(Self::SCALE)
    }

    /// Scale a single channel, `floor(channel * factor)`
    #[allow(clippy::cast_possible_truncation, clippy::cast_lossless)]
    pub const fn scale(self, channel: u8) -> u8 {
        (channel as u32 * self.0 as u32 / Self::SCALE as u32) as u8
    }

    pub const fn scale_color(self, color: Rgb) -> Rgb {
        Rgb {
            r: self.scale(color.r),
            g: self.scale(color.g),
            b: self.scale(color.b),
        }
    }
}

impl Filter for Brightness {
    fn apply(&self, frame: &mut [Rgb]) {
        if *self >= Self::FULL {
            return;
        }
        for pixel in frame.iter_mut() {
            *pixel = self.scale_color(*pixel);
        }
    }
}
