#![no_std]

pub mod color;
pub mod config;
pub mod driver;
pub mod error;
pub mod filter;
pub mod frame;
pub mod motion;
pub mod renderer;
pub mod sequencer;
pub mod weekday;

pub use config::{AnimationConfig, LightConfig};
pub use driver::{BitBangDriver, BitTiming, SmartLedsDriver};
pub use error::{ConfigError, FrameError, InvalidWeekday, RenderError, TransmitError};
pub use filter::Brightness;
pub use frame::FrameBuffer;
pub use motion::{MotionMonitor, MotionTrigger};
pub use renderer::Renderer;
pub use sequencer::{Phase, Sequencer, TickResult};
pub use weekday::Weekday;

pub use color::Rgb;
pub use embassy_time::{Duration, Instant};

/// Abstract LED driver trait
///
/// Implement this trait to support different hardware platforms.
/// The sequencer is generic over this trait.
pub trait OutputDriver {
    /// Transmit one complete frame to the LED strip
    ///
    /// Returns an error if the frame could not be accepted. A failed write
    /// must not be reported as success.
    fn write(&mut self, colors: &[Rgb]) -> Result<(), TransmitError>;
}
