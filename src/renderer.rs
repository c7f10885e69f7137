use embassy_time::{Duration, Instant};

use crate::color::{BLACK, Rgb};
use crate::driver::RESET_INTERVAL;
use crate::error::{ConfigError, RenderError};
use crate::filter::Brightness;
use crate::frame::FrameBuffer;
use crate::OutputDriver;

/// Owns the frame buffer and the output driver
///
/// A render scales one consistent snapshot of the buffer, transmits it and
/// then keeps the strip closed for the settle delay so the frame latches.
pub struct Renderer<D: OutputDriver, const N: usize> {
    // External dependencies and configuration
    driver: D,
    settle: Duration,

    // Internal state
    frame_buffer: FrameBuffer<N>,
    output: [Rgb; N],
    ready_at: Instant,
    frames_sent: u32,
}

impl<D: OutputDriver, const N: usize> Renderer<D, N> {
    /// Create a renderer with an all-black buffer
    ///
    /// Refuses an empty strip or a settle delay shorter than the latch
    /// interval of the protocol.
    pub fn new(driver: D, settle: Duration) -> Result<Self, ConfigError> {
        if N == 0 {
            return Err(ConfigError::EmptyStrip);
        }
        if settle < RESET_INTERVAL {
            return Err(ConfigError::SettleTooShort);
        }
        Ok(Self {
            driver,
            settle,
            frame_buffer: FrameBuffer::new(),
            output: [BLACK; N],
            ready_at: Instant::from_ticks(0),
            frames_sent: 0,
        })
    }

    pub fn frame(&self) -> &FrameBuffer<N> {
        &self.frame_buffer
    }

    pub fn frame_mut(&mut self) -> &mut FrameBuffer<N> {
        &mut self.frame_buffer
    }

    /// Last frame handed to the driver
    pub fn output(&self) -> &[Rgb; N] {
        &self.output
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Earliest instant the next frame may be transmitted
    pub fn ready_at(&self) -> Instant {
        self.ready_at
    }

    pub fn frames_sent(&self) -> u32 {
        self.frames_sent
    }

    /// Scale the buffer by `brightness` and transmit it
    pub fn render(&mut self, brightness: Brightness, now: Instant) -> Result<(), RenderError> {
        if now < self.ready_at {
            return Err(RenderError::Settling {
                ready_at: self.ready_at,
            });
        }

        let frame = self.frame_buffer.scaled(brightness);
        self.driver.write(&frame)?;

        self.output = frame;
        self.ready_at = now + self.settle;
        self.frames_sent = self.frames_sent.wrapping_add(1);
        Ok(())
    }
}
