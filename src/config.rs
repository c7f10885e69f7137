//! Startup configuration.
//!
//! Everything here is fixed at initialization. [`LightConfig::validate`] runs
//! once before the sequencer is built; an invalid configuration keeps the
//! strip dark instead of running with undefined timing.

use embassy_time::Duration;
use heapless::Vec;

use crate::driver::BitTiming;
use crate::error::ConfigError;
use crate::motion::DEFAULT_DEBOUNCE;

/// Highest GPIO number on the target board (RP2040)
pub const MAX_GPIO: u8 = 29;

/// At most two motion sensors are wired
pub const MAX_SENSORS: usize = 2;

/// Default strip length
pub const DEFAULT_LED_COUNT: usize = 18;

/// Default motion sensor GPIOs
pub const DEFAULT_SENSOR_PINS: [u8; MAX_SENSORS] = [28, 27];

/// Timing of the motion animation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationConfig {
    /// Number of frames in each ramp
    pub ramp_steps: u8,
    /// Time between two ramp frames
    pub step_interval: Duration,
    /// Length of one hold window
    pub hold_interval: Duration,
    /// Brightness of the hold frame, in percent
    pub peak_percent: u8,
    /// Brightness of the final black frame, in percent
    pub settle_percent: u8,
    /// Delay before a failed frame is sent again
    pub retry_delay: Duration,
    /// Longest the caller may sleep between ticks
    pub poll_interval: Duration,
}

impl AnimationConfig {
    pub const DEFAULT: Self = Self {
        ramp_steps: 50,
        step_interval: Duration::from_millis(10),
        hold_interval: Duration::from_secs(10),
        peak_percent: 50,
        settle_percent: 10,
        retry_delay: Duration::from_millis(2),
        poll_interval: Duration::from_millis(10),
    };
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Configuration of the whole light
#[derive(Debug, Clone)]
pub struct LightConfig {
    pub led_count: usize,
    /// GPIO driving the strip's data line
    pub data_pin: u8,
    /// GPIOs of the motion sensors (pull-down, active high)
    pub sensor_pins: Vec<u8, MAX_SENSORS>,
    pub timing: BitTiming,
    /// Delay after each frame before the next one may be sent
    pub settle: Duration,
    pub debounce: Duration,
    pub animation: AnimationConfig,
}

impl LightConfig {
    /// 18 LEDs on GPIO 29, sensors on GPIO 28 and 27
    pub fn new() -> Self {
        Self {
            led_count: DEFAULT_LED_COUNT,
            data_pin: 29,
            // An empty list is caught by `validate` as `NoSensors`
            sensor_pins: Vec::from_slice(&DEFAULT_SENSOR_PINS).unwrap_or_default(),
            timing: BitTiming::WS2812,
            settle: Duration::from_millis(10),
            debounce: DEFAULT_DEBOUNCE,
            animation: AnimationConfig::DEFAULT,
        }
    }

    /// Check the configuration against a frame buffer of `N` LEDs
    pub fn validate<const N: usize>(&self) -> Result<(), ConfigError> {
        if self.led_count == 0 || N == 0 {
            return Err(ConfigError::EmptyStrip);
        }
        if self.led_count != N {
            return Err(ConfigError::LedCountMismatch {
                configured: self.led_count,
                capacity: N,
            });
        }

        self.validate_pins()?;
        self.timing.validate()?;

        let animation = &self.animation;
        if animation.ramp_steps == 0 {
            return Err(ConfigError::ZeroRampSteps);
        }
        if animation.hold_interval == Duration::from_ticks(0)
            || animation.poll_interval == Duration::from_ticks(0)
        {
            return Err(ConfigError::ZeroInterval);
        }
        if self.settle < crate::driver::RESET_INTERVAL {
            return Err(ConfigError::SettleTooShort);
        }
        if animation.step_interval < self.settle {
            return Err(ConfigError::StepTooShort);
        }
        if animation.retry_delay >= animation.step_interval {
            return Err(ConfigError::RetryTooLong);
        }
        Ok(())
    }

    fn validate_pins(&self) -> Result<(), ConfigError> {
        if self.sensor_pins.is_empty() {
            return Err(ConfigError::NoSensors);
        }

        let mut used: u32 = 0;
        for &pin in core::iter::once(&self.data_pin).chain(self.sensor_pins.iter()) {
            if pin > MAX_GPIO {
                return Err(ConfigError::InvalidPin(pin));
            }
            let mask = 1 << pin;
            if used & mask != 0 {
                return Err(ConfigError::PinConflict(pin));
            }
            used |= mask;
        }
        Ok(())
    }
}

impl Default for LightConfig {
    fn default() -> Self {
        Self::new()
    }
}
