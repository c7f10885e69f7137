//! Motion animation state machine.
//!
//! One cycle runs `Idle -> RampUp -> Hold (repeated while motion continues)
//! -> RampDown -> Off -> Idle`. The sequencer never sleeps: [`Sequencer::tick`]
//! does whatever is due at `now` and returns the instant it wants to be
//! called again, so the caller can keep servicing the motion sensors in
//! between.
//!
//! # Usage
//!
//! ```ignore
//! loop {
//!     let now = Instant::now();
//!     MONITOR.poll(now, &mut sensors, &TRIGGER);
//!     let weekday = Weekday::try_from(rtc.weekday())?;
//!     let result = sequencer.tick(now, &TRIGGER, MONITOR.next_deadline(), weekday);
//!     Timer::at(result.next_deadline).await;
//! }
//! ```

use defmt_or_log as log;
use embassy_time::{Duration, Instant};

use crate::color::{BLACK, Rgb, WHITE};
use crate::config::{AnimationConfig, LightConfig};
use crate::error::{ConfigError, RenderError};
use crate::filter::Brightness;
use crate::motion::MotionTrigger;
use crate::renderer::Renderer;
use crate::weekday::Weekday;
use crate::OutputDriver;

/// Externally visible animation phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    RampUp,
    Hold,
    RampDown,
    /// Final black frame before returning to idle
    Off,
}

impl Phase {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::RampUp => "ramp-up",
            Self::Hold => "hold",
            Self::RampDown => "ramp-down",
            Self::Off => "off",
        }
    }
}

/// Result of a sequencer tick
#[derive(Debug, Clone, Copy)]
pub struct TickResult {
    /// Phase after the tick
    pub phase: Phase,
    /// When to call `tick` again. Never further away than the poll interval.
    pub next_deadline: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    RampUp { step: u8 },
    /// Hold frame not shown yet
    HoldEnter,
    Hold,
    /// Counts down from `ramp_steps` to 1
    RampDown { step: u8 },
    Off,
}

impl State {
    const fn phase(self) -> Phase {
        match self {
            Self::Idle => Phase::Idle,
            Self::RampUp { .. } => Phase::RampUp,
            Self::HoldEnter | Self::Hold => Phase::Hold,
            Self::RampDown { .. } => Phase::RampDown,
            Self::Off => Phase::Off,
        }
    }
}

/// Drives the strip through the motion animation
pub struct Sequencer<D: OutputDriver, const N: usize> {
    renderer: Renderer<D, N>,
    config: AnimationConfig,
    debounce: Duration,

    state: State,
    color: Rgb,
    /// Nominal deadline of the current step
    scheduled: Instant,
    /// When the next step is due; ahead of `scheduled` only while retrying
    next_tick: Instant,
    retrying: bool,
    hold_windows: u16,
    skipped_frames: u32,
}

impl<D: OutputDriver, const N: usize> Sequencer<D, N> {
    /// Validate `config` and build an idle sequencer around `driver`
    pub fn new(driver: D, config: &LightConfig) -> Result<Self, ConfigError> {
        if let Err(err) = config.validate::<N>() {
            log::error!("Refusing to start: {}", err.as_str());
            return Err(err);
        }
        let renderer = Renderer::new(driver, config.settle)?;
        let start = Instant::from_ticks(0);

        Ok(Self {
            renderer,
            config: config.animation,
            debounce: config.debounce,
            state: State::Idle,
            color: BLACK,
            scheduled: start,
            next_tick: start,
            retrying: false,
            hold_windows: 0,
            skipped_frames: 0,
        })
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    /// Day color of the running cycle
    pub fn day_color(&self) -> Rgb {
        self.color
    }

    /// Hold windows started in the current or last cycle
    pub fn hold_windows(&self) -> u16 {
        self.hold_windows
    }

    /// Frames dropped after a failed retry
    pub fn skipped_frames(&self) -> u32 {
        self.skipped_frames
    }

    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    pub fn renderer(&self) -> &Renderer<D, N> {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut Renderer<D, N> {
        &mut self.renderer
    }

    /// Advance the animation to `now`
    ///
    /// While idle, a pending trigger is consumed and starts a new cycle in the
    /// color of `weekday`. Otherwise the trigger is only read when a hold
    /// window ends.
    ///
    /// `unconfirmed` is the instant a sensor edge still inside its debounce
    /// window gets decided ([`MotionMonitor::next_deadline`]). An edge that
    /// began before a hold window closed keeps the hold open until then.
    ///
    /// [`MotionMonitor::next_deadline`]: crate::MotionMonitor::next_deadline
    pub fn tick(
        &mut self,
        now: Instant,
        trigger: &MotionTrigger,
        unconfirmed: Option<Instant>,
        weekday: Weekday,
    ) -> TickResult {
        if self.state == State::Idle && trigger.take() {
            self.start(now, weekday);
        }

        while self.state != State::Idle && now >= self.next_tick {
            self.step(now, trigger, unconfirmed);
        }

        let poll = now + self.config.poll_interval;
        let next_deadline = if self.state == State::Idle {
            poll
        } else {
            self.next_tick.min(poll)
        };

        TickResult {
            phase: self.phase(),
            next_deadline,
        }
    }

    fn start(&mut self, now: Instant, weekday: Weekday) {
        self.color = weekday.color();
        log::info!("Motion detected, lighting {} color", weekday.name());
        self.renderer.frame_mut().up_light(self.color);
        self.hold_windows = 0;
        self.scheduled = now;
        self.next_tick = now;
        self.retrying = false;
        self.enter(State::RampUp { step: 0 });
    }

    /// Run the step that is due. Leaves `next_tick` in the past only when the
    /// next state must run immediately.
    fn step(&mut self, now: Instant, trigger: &MotionTrigger, unconfirmed: Option<Instant>) {
        let steps = self.config.ramp_steps;
        match self.state {
            State::Idle => {}
            State::RampUp { step } => {
                if self.show(self.ramp_level(step), now) {
                    let next = step + 1;
                    if next >= steps {
                        self.enter(State::HoldEnter);
                    } else {
                        self.state = State::RampUp { step: next };
                    }
                    self.advance(now, self.config.step_interval);
                }
            }
            State::HoldEnter => {
                self.renderer.frame_mut().interleave(self.color, WHITE);
                if self.show(self.ramp_level(steps), now) {
                    self.hold_windows = 1;
                    self.state = State::Hold;
                    self.advance(now, self.config.hold_interval);
                }
            }
            State::Hold => {
                if trigger.take() {
                    self.hold_windows = self.hold_windows.saturating_add(1);
                    log::info!("Motion during hold, window {}", self.hold_windows);
                    // Extensions count from the end of the window, even when
                    // the decision waited for a debounce
                    self.scheduled += self.config.hold_interval;
                    self.next_tick = self.scheduled;
                    self.retrying = false;
                } else if let Some(at) = self.undecided_edge(unconfirmed, now) {
                    log::debug!("Hold window ended with a sensor edge in debounce");
                    self.next_tick = at;
                } else {
                    // Runs the first ramp-down frame on the same tick
                    self.renderer.frame_mut().up_light(self.color);
                    self.enter(State::RampDown { step: steps });
                }
            }
            State::RampDown { step } => {
                if self.show(self.ramp_level(step), now) {
                    if step <= 1 {
                        self.enter(State::Off);
                    } else {
                        self.state = State::RampDown { step: step - 1 };
                    }
                    self.advance(now, self.config.step_interval);
                }
            }
            State::Off => {
                if trigger.take() {
                    log::debug!("Motion during ramp-down discarded");
                }
                self.renderer.frame_mut().fill(BLACK);
                let level = Brightness::from_percent(self.config.settle_percent);
                if self.show(level, now) {
                    self.retrying = false;
                    self.enter(State::Idle);
                }
            }
        }
    }

    /// Render the buffer, handling the retry policy
    ///
    /// Returns `true` when the step is finished, either sent or given up.
    fn show(&mut self, brightness: Brightness, now: Instant) -> bool {
        match self.renderer.render(brightness, now) {
            Ok(()) => true,
            Err(RenderError::Settling { ready_at }) => {
                self.next_tick = ready_at;
                false
            }
            Err(RenderError::Transmit(err)) if !self.retrying => {
                log::warn!("Frame not sent ({}), retrying", err.as_str());
                self.retrying = true;
                self.next_tick = now + self.config.retry_delay;
                false
            }
            Err(RenderError::Transmit(err)) => {
                log::warn!("Frame skipped: {}", err.as_str());
                self.retrying = false;
                self.skipped_frames = self.skipped_frames.wrapping_add(1);
                true
            }
        }
    }

    /// Schedule the next step `interval` after the current one
    ///
    /// If we've fallen more than two ramp steps behind, the schedule restarts
    /// from `now` instead of catching up in a burst.
    fn advance(&mut self, now: Instant, interval: Duration) {
        let max_drift = self.config.step_interval * 2;
        let base = if now > self.scheduled + max_drift {
            now
        } else {
            self.scheduled
        };
        self.scheduled = base + interval;
        self.next_tick = self.scheduled;
        self.retrying = false;
    }

    /// When to look at the hold again for an edge that started before the
    /// window closed and has not been confirmed or rejected yet
    ///
    /// The wait ends at most one debounce plus one poll interval past the
    /// window end.
    fn undecided_edge(&self, unconfirmed: Option<Instant>, now: Instant) -> Option<Instant> {
        let decided_by = self.scheduled + self.debounce;
        let give_up = decided_by + self.config.poll_interval;
        match unconfirmed {
            Some(at) if at <= decided_by && now < give_up => {
                Some(if at > now { at } else { now + self.config.poll_interval })
            }
            _ => None,
        }
    }

    /// Brightness of ramp frame `step`, `peak * step / ramp_steps`
    #[allow(clippy::cast_possible_truncation)]
    fn ramp_level(&self, step: u8) -> Brightness {
        let peak = u16::from(self.config.peak_percent.min(100));
        let percent = peak * u16::from(step) / u16::from(self.config.ramp_steps.max(1));
        Brightness::from_percent(percent as u8)
    }

    fn enter(&mut self, state: State) {
        let from = self.state.phase();
        self.state = state;
        let to = state.phase();
        if from != to {
            log::info!("Phase {} -> {}", from.as_str(), to.as_str());
        }
    }
}
