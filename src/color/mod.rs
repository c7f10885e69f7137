//! Pixel type and the named colors used by the strip.

use smart_leds::RGB8;

pub type Rgb = RGB8;

pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
pub const WHITE: Rgb = Rgb {
    r: 255,
    g: 255,
    b: 255,
};
pub const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };
pub const YELLOW: Rgb = Rgb {
    r: 255,
    g: 255,
    b: 0,
};
pub const GREEN: Rgb = Rgb { r: 0, g: 255, b: 0 };
pub const CYAN: Rgb = Rgb {
    r: 0,
    g: 255,
    b: 255,
};
pub const PURPLE: Rgb = Rgb {
    r: 128,
    g: 0,
    b: 255,
};
pub const PINK: Rgb = Rgb {
    r: 255,
    g: 0,
    b: 255,
};
pub const ORANGE: Rgb = Rgb {
    r: 255,
    g: 50,
    b: 0,
};

/// Clamp a wide integer into the 0-255 channel range
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub const fn clamp_channel(value: i32) -> u8 {
    if value < 0 {
        0
    } else if value > 255 {
        255
    } else {
        value as u8
    }
}

/// Build a color from wide integer channels, clamping each one
pub const fn clamped(r: i32, g: i32, b: i32) -> Rgb {
    Rgb {
        r: clamp_channel(r),
        g: clamp_channel(g),
        b: clamp_channel(b),
    }
}
