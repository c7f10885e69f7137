//! Motion sensor input.
//!
//! The GPIO interrupt only stamps the time of a rising edge. The main loop
//! later re-reads the pin once the debounce window has passed and raises the
//! shared [`MotionTrigger`] if the sensor is still high. Nothing in the
//! interrupt path waits.

use core::cell::Cell;

use critical_section::Mutex;
use defmt_or_log as log;
use embassy_time::{Duration, Instant};
use embedded_hal::digital::InputPin;

/// Default time a sensor must stay high before motion is accepted
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(100);

/// "Motion pending" flag shared between the sensor path and the sequencer
///
/// Every access runs inside a critical section, so raising the flag can never
/// interleave with a read-and-clear.
pub struct MotionTrigger {
    pending: Mutex<Cell<bool>>,
}

impl MotionTrigger {
    pub const fn new() -> Self {
        Self {
            pending: Mutex::new(Cell::new(false)),
        }
    }

    pub fn raise(&self) {
        critical_section::with(|cs| self.pending.borrow(cs).set(true));
    }

    /// Read and clear the flag in one step
    pub fn take(&self) -> bool {
        critical_section::with(|cs| self.pending.borrow(cs).replace(false))
    }

    pub fn is_pending(&self) -> bool {
        critical_section::with(|cs| self.pending.borrow(cs).get())
    }

    pub fn clear(&self) {
        critical_section::with(|cs| self.pending.borrow(cs).set(false));
    }
}

impl Default for MotionTrigger {
    fn default() -> Self {
        Self::new()
    }
}

/// Edge capture and debounce for `SENSORS` motion sensors
///
/// Intended to live in a `static` so the interrupt handler can reach it.
pub struct MotionMonitor<const SENSORS: usize> {
    /// Time of the oldest unconfirmed rising edge per sensor
    edges: [Mutex<Cell<Option<Instant>>>; SENSORS],
    debounce: Duration,
}

impl<const SENSORS: usize> MotionMonitor<SENSORS> {
    pub const fn new(debounce: Duration) -> Self {
        Self {
            edges: [const { Mutex::new(Cell::new(None)) }; SENSORS],
            debounce,
        }
    }

    pub const fn debounce(&self) -> Duration {
        self.debounce
    }

    /// Record a rising edge. Safe to call from an interrupt handler.
    ///
    /// Further edges before the pending one is confirmed are ignored, so a
    /// bouncing line is judged from its first edge.
    pub fn on_rising_edge(&self, sensor: usize, now: Instant) {
        let Some(slot) = self.edges.get(sensor) else {
            return;
        };
        critical_section::with(|cs| {
            let edge = slot.borrow(cs);
            if edge.get().is_none() {
                edge.set(Some(now));
            }
        });
    }

    /// Whether any sensor has an edge waiting for confirmation
    pub fn has_pending(&self) -> bool {
        self.next_deadline().is_some()
    }

    /// Earliest instant at which a pending edge can be confirmed
    pub fn next_deadline(&self) -> Option<Instant> {
        critical_section::with(|cs| {
            self.edges
                .iter()
                .filter_map(|slot| slot.borrow(cs).get())
                .min()
                .map(|edge| edge + self.debounce)
        })
    }

    /// Confirm edges whose debounce window has passed
    ///
    /// Each due edge is consumed and its pin sampled. A sensor that is still
    /// high raises `trigger`. Returns the last sensor that fired, if any.
    /// A pin that cannot be read counts as low.
    pub fn poll<P: InputPin>(
        &self,
        now: Instant,
        pins: &mut [P; SENSORS],
        trigger: &MotionTrigger,
    ) -> Option<usize> {
        let mut fired = None;
        for (sensor, pin) in pins.iter_mut().enumerate() {
            if self.take_due(sensor, now).is_none() {
                continue;
            }
            if pin.is_high().unwrap_or(false) {
                log::info!("Motion confirmed on sensor {}", sensor + 1);
                trigger.raise();
                fired = Some(sensor);
            } else {
                log::debug!("Sensor {} pulse shorter than debounce, ignored", sensor + 1);
            }
        }
        fired
    }

    fn take_due(&self, sensor: usize, now: Instant) -> Option<Instant> {
        let slot = self.edges.get(sensor)?;
        critical_section::with(|cs| {
            let edge = slot.borrow(cs);
            match edge.get() {
                Some(at) if now >= at + self.debounce => edge.take(),
                _ => None,
            }
        })
    }
}
