//! Error types shared across the crate.

use core::fmt;

use embassy_time::Instant;

use crate::driver::TimingError;

/// Frame could not be accepted by the output driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransmitError {
    /// Output queue is full or the peripheral is still busy
    Busy,
    /// Data pin could not be driven
    Pin,
}

impl TransmitError {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Busy => "output busy",
            Self::Pin => "data pin error",
        }
    }
}

impl fmt::Display for TransmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::error::Error for TransmitError {}

/// Rendering a frame failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderError {
    /// The previous frame has not latched yet
    Settling { ready_at: Instant },
    /// The driver rejected the frame
    Transmit(TransmitError),
}

impl From<TransmitError> for RenderError {
    fn from(err: TransmitError) -> Self {
        Self::Transmit(err)
    }
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Settling { ready_at } => {
                write!(f, "strip is latching until {} ms", ready_at.as_millis())
            }
            Self::Transmit(err) => write!(f, "transmission failed: {err}"),
        }
    }
}

impl core::error::Error for RenderError {}

/// Frame buffer access outside of the strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameError {
    IndexOutOfRange { index: usize, len: usize },
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfRange { index, len } => {
                write!(f, "pixel index {index} is out of range for {len} LEDs")
            }
        }
    }
}

impl core::error::Error for FrameError {}

/// Weekday index reported by the clock is outside 0..=6.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidWeekday(pub u8);

impl fmt::Display for InvalidWeekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "weekday index {} is not in 0..=6", self.0)
    }
}

impl core::error::Error for InvalidWeekday {}

/// Startup configuration is unusable. The strip must stay dark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Strip has no LEDs
    EmptyStrip,
    /// Configured LED count does not match the frame buffer capacity
    LedCountMismatch { configured: usize, capacity: usize },
    /// GPIO number does not exist on the board
    InvalidPin(u8),
    /// Same GPIO assigned twice
    PinConflict(u8),
    /// At least one motion sensor is required
    NoSensors,
    /// Bit timing misses the protocol windows
    Timing(TimingError),
    /// Ramp needs at least one step
    ZeroRampSteps,
    /// Hold window or poll interval is zero
    ZeroInterval,
    /// Ramp step interval is shorter than the inter-frame settle delay
    StepTooShort,
    /// Settle delay is shorter than the protocol latch interval
    SettleTooShort,
    /// Retry delay does not fit within one ramp step
    RetryTooLong,
}

impl ConfigError {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EmptyStrip => "strip has no LEDs",
            Self::LedCountMismatch { .. } => "LED count does not match frame buffer",
            Self::InvalidPin(_) => "invalid GPIO number",
            Self::PinConflict(_) => "GPIO assigned twice",
            Self::NoSensors => "no motion sensors configured",
            Self::Timing(_) => "bit timing outside protocol windows",
            Self::ZeroRampSteps => "ramp step count is zero",
            Self::ZeroInterval => "hold or poll interval is zero",
            Self::StepTooShort => "ramp step shorter than settle delay",
            Self::SettleTooShort => "settle delay shorter than latch interval",
            Self::RetryTooLong => "retry delay longer than ramp step",
        }
    }
}

impl From<TimingError> for ConfigError {
    fn from(err: TimingError) -> Self {
        Self::Timing(err)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LedCountMismatch {
                configured,
                capacity,
            } => write!(
                f,
                "configured {configured} LEDs but frame buffer holds {capacity}"
            ),
            Self::InvalidPin(pin) => write!(f, "GPIO {pin} does not exist"),
            Self::PinConflict(pin) => write!(f, "GPIO {pin} is assigned twice"),
            Self::Timing(err) => write!(f, "bit timing: {}", err.as_str()),
            other => f.write_str(other.as_str()),
        }
    }
}

impl core::error::Error for ConfigError {}
