//! Signal drivers turning frames into the strip's one-wire bit stream.

mod adapter;
mod bitbang;
pub mod encoding;
pub mod timing;

pub use adapter::SmartLedsDriver;
pub use bitbang::BitBangDriver;
pub use encoding::{BITS_PER_PIXEL, BitStream, grb_word};
pub use timing::{BitTiming, Pulse, RESET_INTERVAL, TimingError};
