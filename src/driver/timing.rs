//! Bit timing of the one-wire LED protocol.
//!
//! Each bit is a high pulse followed by a low pulse, measured in cycles of a
//! fixed output clock. The three sub-periods split one bit slot:
//!
//! ```text
//!        | t1 | t2      | t3 |
//! one:   ‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾|____|
//! zero:  ‾‾‾‾|_______________|
//! ```

use core::fmt;

use embassy_time::Duration;

/// Minimum time the data line stays low after a frame so the strip latches it
pub const RESET_INTERVAL: Duration = Duration::from_micros(50);

/// Longest accepted high time of a zero bit
const ZERO_HIGH_MAX_NS: u32 = 500;
/// Shortest accepted high time of a one bit
const ONE_HIGH_MIN_NS: u32 = 550;
/// Accepted range of a whole bit slot
const BIT_PERIOD_MIN_NS: u32 = 650;
const BIT_PERIOD_MAX_NS: u32 = 1850;

/// High and low durations of one encoded bit, in output clock cycles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pulse {
    pub high: u16,
    pub low: u16,
}

impl Pulse {
    pub const fn cycles(self) -> u32 {
        self.high as u32 + self.low as u32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimingError {
    ZeroClock,
    ZeroPeriod,
    ZeroHighTooLong,
    OneHighTooShort,
    BitPeriodOutOfRange,
}

impl TimingError {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ZeroClock => "output clock is zero",
            Self::ZeroPeriod => "sub-period is zero",
            Self::ZeroHighTooLong => "zero bit high time too long",
            Self::OneHighTooShort => "one bit high time too short",
            Self::BitPeriodOutOfRange => "bit period out of range",
        }
    }
}

impl fmt::Display for TimingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::error::Error for TimingError {}

/// Bit clock and sub-periods used to encode the stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitTiming {
    /// Output clock in Hz
    pub clock_hz: u32,
    pub t1: u8,
    pub t2: u8,
    pub t3: u8,
}

impl BitTiming {
    /// 8 MHz clock, 2/5/3 cycles: 0.875/0.375 us for one, 0.25/1.0 us for zero
    pub const WS2812: Self = Self {
        clock_hz: 8_000_000,
        t1: 2,
        t2: 5,
        t3: 3,
    };

    pub const fn one(&self) -> Pulse {
        Pulse {
            high: self.t1 as u16 + self.t2 as u16,
            low: self.t3 as u16,
        }
    }

    pub const fn zero(&self) -> Pulse {
        Pulse {
            high: self.t1 as u16,
            low: self.t2 as u16 + self.t3 as u16,
        }
    }

    pub const fn pulse(&self, bit: bool) -> Pulse {
        if bit { self.one() } else { self.zero() }
    }

    /// Convert a cycle count to nanoseconds, rounding down
    #[allow(clippy::cast_possible_truncation)]
    pub const fn cycles_to_ns(&self, cycles: u32) -> u32 {
        if self.clock_hz == 0 {
            return 0;
        }
        (cycles as u64 * 1_000_000_000 / self.clock_hz as u64) as u32
    }

    pub const fn bit_period_ns(&self) -> u32 {
        self.cycles_to_ns(self.t1 as u32 + self.t2 as u32 + self.t3 as u32)
    }

    /// Check the timing against the protocol windows
    pub fn validate(&self) -> Result<(), TimingError> {
        if self.clock_hz == 0 {
            return Err(TimingError::ZeroClock);
        }
        if self.t1 == 0 || self.t2 == 0 || self.t3 == 0 {
            return Err(TimingError::ZeroPeriod);
        }
        if self.cycles_to_ns(u32::from(self.zero().high)) > ZERO_HIGH_MAX_NS {
            return Err(TimingError::ZeroHighTooLong);
        }
        if self.cycles_to_ns(u32::from(self.one().high)) < ONE_HIGH_MIN_NS {
            return Err(TimingError::OneHighTooShort);
        }
        let period = self.bit_period_ns();
        if !(BIT_PERIOD_MIN_NS..=BIT_PERIOD_MAX_NS).contains(&period) {
            return Err(TimingError::BitPeriodOutOfRange);
        }
        Ok(())
    }
}

impl Default for BitTiming {
    fn default() -> Self {
        Self::WS2812
    }
}
