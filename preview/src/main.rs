//! Desktop preview for ambient-strip
//!
//! Simulates the motion sensors and draws the strip in a window. The library
//! is driven the same way the firmware drives it: button presses play the
//! role of the GPIO interrupt, and every repaint polls the monitor and ticks
//! the sequencer once its deadline has passed.

use std::convert::Infallible;
use std::time::Instant as StdInstant;

use ambient_strip::config::{DEFAULT_LED_COUNT, MAX_SENSORS};
use ambient_strip::motion::DEFAULT_DEBOUNCE;
use ambient_strip::{
    Instant, LightConfig, MotionMonitor, MotionTrigger, OutputDriver, Rgb, Sequencer,
    TransmitError, Weekday,
};
use eframe::egui::{self};
use embedded_hal::digital::{ErrorType, InputPin};

/// Size of each LED rectangle in pixels
const LED_SIZE: f32 = 24.0;

/// Gap between LEDs
const LED_GAP: f32 = 4.0;

/// How long a PIR button keeps its sensor output high
const PIR_PULSE_MS: u64 = 3000;

/// Pulse length of the "Noise" button, shorter than the debounce window
const NOISE_PULSE_MS: u64 = 30;

/// Edge capture shared with the simulated interrupt path
static MONITOR: MotionMonitor<MAX_SENSORS> = MotionMonitor::new(DEFAULT_DEBOUNCE);

/// Motion flag read by the sequencer
static TRIGGER: MotionTrigger = MotionTrigger::new();

type PreviewSequencer = Sequencer<PreviewDriver, DEFAULT_LED_COUNT>;

fn main() -> eframe::Result<()> {
    env_logger::init();

    let sequencer = match Sequencer::new(PreviewDriver, &LightConfig::default()) {
        Ok(sequencer) => sequencer,
        Err(err) => {
            log::error!("Invalid light configuration: {err}");
            return Ok(());
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([720.0, 320.0])
            .with_title("Ambient Strip Preview"),
        ..Default::default()
    };

    eframe::run_native(
        "ambient-strip-preview",
        options,
        Box::new(|_cc| Ok(Box::new(PreviewApp::new(sequencer)))),
    )
}

/// Driver that always accepts the frame; the window reads it back from the
/// renderer's output
struct PreviewDriver;

impl OutputDriver for PreviewDriver {
    fn write(&mut self, _colors: &[Rgb]) -> Result<(), TransmitError> {
        Ok(())
    }
}

/// PIR output that stays high until a given synthetic time
#[derive(Default)]
struct SimSensor {
    high_until_ms: u64,
    now_ms: u64,
}

impl ErrorType for SimSensor {
    type Error = Infallible;
}

impl InputPin for SimSensor {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.now_ms < self.high_until_ms)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}

struct PreviewApp {
    sequencer: PreviewSequencer,
    sensors: [SimSensor; MAX_SENSORS],
    /// When the sequencer wants its next tick
    next_tick_ms: u64,
    weekday: Weekday,
    /// Synthetic time in milliseconds
    t_ms: u64,
    /// Wall-clock reference for delta time
    last_frame: StdInstant,
    /// Time scale multiplier (1.0 = realtime)
    time_scale: f32,
    /// LED pixel size for display
    led_size: f32,
}

impl PreviewApp {
    fn new(sequencer: PreviewSequencer) -> Self {
        Self {
            sequencer,
            sensors: Default::default(),
            next_tick_ms: 0,
            weekday: Weekday::Monday,
            t_ms: 0,
            last_frame: StdInstant::now(),
            time_scale: 1.0,
            led_size: LED_SIZE,
        }
    }

    /// Raise a sensor output for `length_ms` and report the rising edge
    fn pulse(&mut self, sensor: usize, length_ms: u64) {
        let Some(pin) = self.sensors.get_mut(sensor) else {
            return;
        };
        let was_high = self.t_ms < pin.high_until_ms;
        pin.high_until_ms = pin.high_until_ms.max(self.t_ms + length_ms);
        if !was_high {
            MONITOR.on_rising_edge(sensor, Instant::from_millis(self.t_ms));
        }
    }

    /// Update synthetic time based on wall clock and time scale
    fn update_time(&mut self) {
        let now = StdInstant::now();
        let delta = now.duration_since(self.last_frame);
        self.last_frame = now;

        let delta_ms_f64 = delta.as_secs_f64() * 1000.0 * f64::from(self.time_scale);
        let delta_ms_f64 = if delta_ms_f64.is_finite() {
            #[allow(clippy::cast_precision_loss)]
            delta_ms_f64.clamp(0.0, u64::MAX as f64)
        } else {
            0.0
        };
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let delta_ms = delta_ms_f64 as u64;
        self.t_ms = self.t_ms.wrapping_add(delta_ms);
    }

    /// One pass of the firmware main loop
    fn run_loop(&mut self) {
        let now = Instant::from_millis(self.t_ms);
        for pin in &mut self.sensors {
            pin.now_ms = self.t_ms;
        }
        MONITOR.poll(now, &mut self.sensors, &TRIGGER);

        if self.t_ms >= self.next_tick_ms || TRIGGER.is_pending() {
            let result = self
                .sequencer
                .tick(now, &TRIGGER, MONITOR.next_deadline(), self.weekday);
            self.next_tick_ms = result.next_deadline.as_millis();
        }
    }
}

impl eframe::App for PreviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_time();
        self.run_loop();

        let frame = self.sequencer.renderer().output().to_vec();

        // Request continuous repaint for animation
        ctx.request_repaint();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                // <SensorControls>
                ui.vertical(|ui| {
                    ui.horizontal(|ui| {
                        if ui.button("PIR 1").clicked() {
                            self.pulse(0, PIR_PULSE_MS);
                        }
                        if ui.button("PIR 2").clicked() {
                            self.pulse(1, PIR_PULSE_MS);
                        }
                        if ui.button("Noise").clicked() {
                            self.pulse(0, NOISE_PULSE_MS);
                        }
                    });

                    ui.add_space(4.0);

                    ui.horizontal(|ui| {
                        let secs = self.t_ms / 1000;
                        let ms = self.t_ms % 1000;
                        ui.label(format!("Time: {secs}.{ms:03}s"));
                    });

                    ui.add_space(4.0);

                    ui.horizontal(|ui| {
                        ui.label("Speed:");
                        ui.add(egui::Slider::new(&mut self.time_scale, 0.1..=5.0).logarithmic(true));
                    });
                });
                // </SensorControls>
                ui.add_space(16.0);
                // <StateView>
                ui.vertical(|ui| {
                    ui.horizontal(|ui| {
                        ui.label("Day:");
                        egui::ComboBox::from_id_salt("weekday_selector")
                            .selected_text(self.weekday.name())
                            .show_ui(ui, |ui| {
                                for day in Weekday::all() {
                                    ui.selectable_value(&mut self.weekday, day, day.name());
                                }
                            });
                    });

                    ui.add_space(4.0);

                    ui.label(format!("Phase: {}", self.sequencer.phase().as_str()));
                    ui.label(format!("Hold windows: {}", self.sequencer.hold_windows()));
                    ui.label(format!(
                        "Skipped frames: {}",
                        self.sequencer.skipped_frames()
                    ));

                    ui.add_space(4.0);

                    ui.horizontal(|ui| {
                        ui.label("Size: ");
                        ui.add(egui::Slider::new(&mut self.led_size, 8.0..=48.0));
                    });
                });
                // </StateView>
            });

            ui.add_space(16.0);

            // === LED Display ===
            let available_width = ui.available_width();
            let led_pitch = self.led_size + LED_GAP;

            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let leds_per_row = (available_width / led_pitch).floor().max(1.0) as usize;
            let rows = frame.len().div_ceil(leds_per_row);
            #[allow(clippy::cast_precision_loss)]
            let height = rows as f32 * led_pitch;

            let (response, painter) =
                ui.allocate_painter(egui::vec2(available_width, height), egui::Sense::hover());
            let origin = response.rect.min;

            #[allow(clippy::cast_precision_loss)]
            for (i, pixel) in frame.iter().enumerate() {
                let row = i / leds_per_row;
                let col = i % leds_per_row;
                let x = origin.x + col as f32 * led_pitch;
                let y = origin.y + row as f32 * led_pitch;

                let rect = egui::Rect::from_min_size(
                    egui::pos2(x, y),
                    egui::vec2(self.led_size, self.led_size),
                );
                let color = egui::Color32::from_rgb(pixel.r, pixel.g, pixel.b);
                painter.rect_filled(rect, 3.0, color);
            }
        });
    }
}
