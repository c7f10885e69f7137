use crate::color::Rgb;

mod brightness;

pub use brightness::Brightness;

/// Post-processing applied to a frame copy before transmission
pub trait Filter {
    fn apply(&self, frame: &mut [Rgb]);
}
