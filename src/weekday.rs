//! Day of the week and its display color.
//!
//! The clock collaborator reports the weekday as an integer where Monday is 0
//! and Sunday is 6. Conversion happens once at the boundary; everything past
//! it works with [`Weekday`].

use crate::color::{CYAN, GREEN, ORANGE, PINK, PURPLE, RED, Rgb, YELLOW};
use crate::error::InvalidWeekday;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Weekday {
    Monday = 0,
    Tuesday = 1,
    Wednesday = 2,
    Thursday = 3,
    Friday = 4,
    Saturday = 5,
    Sunday = 6,
}

const DAYS: [Weekday; 7] = [
    Weekday::Monday,
    Weekday::Tuesday,
    Weekday::Wednesday,
    Weekday::Thursday,
    Weekday::Friday,
    Weekday::Saturday,
    Weekday::Sunday,
];

/// Color of the day, indexed by [`Weekday`] discriminant
const DAY_COLORS: [Rgb; 7] = [YELLOW, PINK, GREEN, ORANGE, CYAN, PURPLE, RED];

const DAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

impl Weekday {
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Display color for this day
    pub const fn color(self) -> Rgb {
        DAY_COLORS[self as usize]
    }

    pub const fn name(self) -> &'static str {
        DAY_NAMES[self as usize]
    }

    /// Day following this one, wrapping Sunday to Monday
    pub const fn next(self) -> Self {
        DAYS[(self as usize + 1) % DAYS.len()]
    }

    pub const fn all() -> [Self; 7] {
        DAYS
    }
}

impl TryFrom<u8> for Weekday {
    type Error = InvalidWeekday;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        DAYS.get(usize::from(value))
            .copied()
            .ok_or(InvalidWeekday(value))
    }
}
