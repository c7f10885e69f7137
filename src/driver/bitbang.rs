use defmt_or_log as log;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use super::encoding::BitStream;
use super::timing::{BitTiming, RESET_INTERVAL};
use crate::color::Rgb;
use crate::error::TransmitError;
use crate::OutputDriver;

/// Software bit-stream driver on a single GPIO
///
/// The whole frame is clocked out inside one critical section, so no
/// interrupt can stretch a pulse in the middle of a bit. The latch interval
/// afterwards runs with interrupts enabled again.
///
/// Needs a core fast enough for `delay` to resolve the sub-microsecond
/// pulse widths; hardware drivers go through [`super::SmartLedsDriver`].
pub struct BitBangDriver<P, D> {
    pin: P,
    delay: D,
    /// Pulse widths in nanoseconds: (one high, one low, zero high, zero low)
    widths: [u32; 4],
}

impl<P: OutputPin, D: DelayNs> BitBangDriver<P, D> {
    /// Create a driver and pull the data line low
    pub fn new(mut pin: P, delay: D, timing: &BitTiming) -> Result<Self, TransmitError> {
        pin.set_low().map_err(|_| TransmitError::Pin)?;
        let one = timing.one();
        let zero = timing.zero();
        Ok(Self {
            pin,
            delay,
            widths: [
                timing.cycles_to_ns(u32::from(one.high)),
                timing.cycles_to_ns(u32::from(one.low)),
                timing.cycles_to_ns(u32::from(zero.high)),
                timing.cycles_to_ns(u32::from(zero.low)),
            ],
        })
    }

    pub fn release(self) -> (P, D) {
        (self.pin, self.delay)
    }

    fn send_bit(&mut self, bit: bool) -> Result<(), TransmitError> {
        let (high, low) = if bit {
            (self.widths[0], self.widths[1])
        } else {
            (self.widths[2], self.widths[3])
        };
        self.pin.set_high().map_err(|_| TransmitError::Pin)?;
        self.delay.delay_ns(high);
        self.pin.set_low().map_err(|_| TransmitError::Pin)?;
        self.delay.delay_ns(low);
        Ok(())
    }
}

impl<P: OutputPin, D: DelayNs> OutputDriver for BitBangDriver<P, D> {
    #[allow(clippy::cast_possible_truncation)]
    fn write(&mut self, colors: &[Rgb]) -> Result<(), TransmitError> {
        let sent: Result<(), TransmitError> = critical_section::with(|_| {
            for bit in BitStream::new(colors) {
                self.send_bit(bit)?;
            }
            Ok(())
        });
        // Leave the line low so the next attempt starts from a reset
        if sent.is_err() && self.pin.set_low().is_err() {
            log::warn!("Data line could not be pulled low after a failed frame");
        }
        self.delay.delay_us(RESET_INTERVAL.as_micros() as u32);
        sent
    }
}
