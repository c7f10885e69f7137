//! Shared test infrastructure for ambient-strip integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;

use ambient_strip::color::Rgb;
use ambient_strip::{
    Instant, MotionTrigger, OutputDriver, Phase, Sequencer, TransmitError, Weekday,
};
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorKind, ErrorType, InputPin, OutputPin};

// ============================================================================
// Mock output driver
// ============================================================================

/// Driver that records every frame and can be told to reject writes
#[derive(Default)]
pub struct MockDriver {
    pub frames: Vec<Vec<Rgb>>,
    /// Number of upcoming writes that fail with `Busy`
    pub fail_next: u32,
    pub rejected: u32,
}

impl MockDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_frame(&self) -> Option<&[Rgb]> {
        self.frames.last().map(Vec::as_slice)
    }
}

impl OutputDriver for MockDriver {
    fn write(&mut self, colors: &[Rgb]) -> Result<(), TransmitError> {
        if self.fail_next > 0 {
            self.fail_next -= 1;
            self.rejected += 1;
            return Err(TransmitError::Busy);
        }
        self.frames.push(colors.to_vec());
        Ok(())
    }
}

// ============================================================================
// Mock data line
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEvent {
    High,
    Low,
    Wait(u32),
}

pub type LineLog = Rc<RefCell<Vec<LineEvent>>>;

/// Output pin writing its level changes into a shared log
pub struct MockLine {
    log: LineLog,
}

impl MockLine {
    pub fn new(log: &LineLog) -> Self {
        Self { log: log.clone() }
    }
}

impl ErrorType for MockLine {
    type Error = Infallible;
}

impl OutputPin for MockLine {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(LineEvent::Low);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(LineEvent::High);
        Ok(())
    }
}

/// Delay writing every requested wait into the shared log
pub struct MockDelay {
    log: LineLog,
}

impl MockDelay {
    pub fn new(log: &LineLog) -> Self {
        Self { log: log.clone() }
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.log.borrow_mut().push(LineEvent::Wait(ns));
    }
}

/// Output pin that fails once `fail_after` writes have succeeded
pub struct BrokenLine {
    pub fail_after: usize,
    pub writes: usize,
}

impl ErrorType for BrokenLine {
    type Error = ErrorKind;
}

impl OutputPin for BrokenLine {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.writes += 1;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        if self.writes >= self.fail_after {
            return Err(ErrorKind::Other);
        }
        self.writes += 1;
        Ok(())
    }
}

pub struct NoDelay;

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

// ============================================================================
// Mock motion sensor
// ============================================================================

/// Sensor input with a settable level
#[derive(Default)]
pub struct MockSensor {
    pub high: bool,
    pub broken: bool,
}

impl MockSensor {
    pub fn low() -> Self {
        Self::default()
    }
}

impl ErrorType for MockSensor {
    type Error = ErrorKind;
}

impl InputPin for MockSensor {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        if self.broken {
            return Err(ErrorKind::Other);
        }
        Ok(self.high)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}

// ============================================================================
// Sequencer helpers
// ============================================================================

pub fn ms(millis: u64) -> Instant {
    Instant::from_millis(millis)
}

/// A frame observed while driving the sequencer
#[derive(Debug, Clone)]
pub struct Rendered {
    pub at_ms: u64,
    pub phase: Phase,
    pub pixels: Vec<Rgb>,
}

/// Tick the sequencer from `from_ms` to `until_ms`, always jumping to the
/// requested deadline. `on_tick` runs before every tick and may raise the
/// trigger. Returns every frame the driver accepted.
pub fn drive<const N: usize>(
    sequencer: &mut Sequencer<MockDriver, N>,
    trigger: &MotionTrigger,
    weekday: Weekday,
    from_ms: u64,
    until_ms: u64,
    mut on_tick: impl FnMut(u64),
) -> Vec<Rendered> {
    let mut rendered = Vec::new();
    let mut now = from_ms;
    while now <= until_ms {
        on_tick(now);
        let before = sequencer.renderer().driver().frames.len();
        let result = sequencer.tick(ms(now), trigger, None, weekday);
        for pixels in &sequencer.renderer().driver().frames[before..] {
            rendered.push(Rendered {
                at_ms: now,
                phase: result.phase,
                pixels: pixels.clone(),
            });
        }
        let next = result.next_deadline.as_millis();
        assert!(next > now, "sequencer asked to be ticked in the past");
        now = next;
    }
    rendered
}
