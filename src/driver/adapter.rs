use defmt_or_log as log;
use smart_leds::SmartLedsWrite;

use crate::color::Rgb;
use crate::error::TransmitError;
use crate::OutputDriver;

/// Adapter for any `smart-leds` writer (PIO, RMT or SPI backed)
///
/// Hardware drivers own the bit timing themselves; this only forwards the
/// frame and turns their error into [`TransmitError::Busy`].
pub struct SmartLedsDriver<W> {
    inner: W,
}

impl<W> SmartLedsDriver<W> {
    pub const fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &W {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut W {
        &mut self.inner
    }
}

impl<W> OutputDriver for SmartLedsDriver<W>
where
    W: SmartLedsWrite<Color = Rgb>,
    W::Error: core::fmt::Debug,
{
    fn write(&mut self, colors: &[Rgb]) -> Result<(), TransmitError> {
        self.inner.write(colors.iter().copied()).map_err(|e| {
            log::warn!(
                "LED writer rejected frame: {:?}",
                defmt_or_log::Debug2Format(&e)
            );
            TransmitError::Busy
        })
    }
}
