//! SensorEmulator - Main entry point
//!
//! On the ESP32-S3: bring up the DAC, encoder and status LED, then run the
//! control loop forever.
//!
//! On a host: replay a scripted knob session against an in-memory DAC and
//! print what the board would have output.

use sensor_emulator::{log_drain, Controller, GeneratorConfig, LOG_STREAM};

#[cfg(target_os = "espidf")]
fn main() {
    device::run()
}

#[cfg(not(target_os = "espidf"))]
fn main() {
    host::run()
}

/// Print sink for the log drain.
struct Stdout;

impl core::fmt::Write for Stdout {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        print!("{}", s);
        Ok(())
    }
}

#[cfg(target_os = "espidf")]
mod device {
    use super::*;

    use esp_idf_svc::hal::gpio::{PinDriver, Pull};
    use esp_idf_svc::hal::peripherals::Peripherals;
    use esp_idf_svc::sys;
    use sensor_emulator::hal::esp::{self, now_ticks};
    use sensor_emulator::hal::{OptionalPin, ParallelDac, QuadratureEncoder};
    use sensor_emulator::{rt_error, rt_info, rt_warn, PinMap};

    /// Iterations between two log drains.
    const DRAIN_EVERY: u32 = 4096;

    pub fn run() -> ! {
        sys::link_patches();

        let config = GeneratorConfig::DEFAULT;
        let pins = PinMap::ESP32S3;
        let now = now_ticks();

        // The DAC goes through raw registers and keeps running without the
        // knob or the LED.
        let (encoder_pins, led_pin) = match Peripherals::take() {
            Ok(p) => (
                // Typed pins follow PinMap::ESP32S3.
                Some((p.pins.gpio10, p.pins.gpio11, p.pins.gpio12)),
                Some(p.pins.gpio2),
            ),
            Err(e) => {
                rt_error!(LOG_STREAM, now, "peripherals: {}; knob and LED disabled", e);
                (None, None)
            }
        };

        let mut encoder = encoder_pins.and_then(|(a, b, btn)| {
            match (PinDriver::input(a), PinDriver::input(b), PinDriver::input(btn)) {
                (Ok(mut a), Ok(mut b), Ok(mut btn)) => {
                    for result in [a.set_pull(Pull::Up), b.set_pull(Pull::Up), btn.set_pull(Pull::Up)] {
                        if let Err(e) = result {
                            rt_warn!(LOG_STREAM, now, "encoder pull-up: {}", e);
                        }
                    }
                    let mut encoder = QuadratureEncoder::new(a, b, btn, config.debounce_ticks);
                    encoder.init(now);
                    Some(encoder)
                }
                (a, b, btn) => {
                    if let Some(e) = a.err().or(b.err()).or(btn.err()) {
                        rt_warn!(LOG_STREAM, now, "encoder pins: {}; knob disabled", e);
                    }
                    None
                }
            }
        });

        let mut status_led = OptionalPin(led_pin.and_then(|pin| match PinDriver::output(pin) {
            Ok(driver) => Some(driver),
            Err(e) => {
                rt_warn!(LOG_STREAM, now, "status LED pin: {}; indicator disabled", e);
                None
            }
        }));

        let (bank, dac_error) = esp::configure(&pins.dac);
        if let Some(e) = dac_error {
            rt_warn!(LOG_STREAM, now, "DAC pin setup: {}", e);
        }
        let mut dac = ParallelDac::new(bank, pins.dac);
        dac.init();

        let mut controller = Controller::new(config);
        rt_info!(
            LOG_STREAM,
            now,
            "{} ({}), {} at {} cycles/s",
            env!("VERSION_STRING"),
            env!("GIT_HASH"),
            controller.mode(),
            controller.frequency()
        );

        let mut out = Stdout;
        let mut iterations: u32 = 0;
        loop {
            controller.iterate(now_ticks(), &mut encoder, &mut dac, &mut status_led);

            iterations = iterations.wrapping_add(1);
            if iterations % DRAIN_EVERY == 0 {
                log_drain::drain_into(&LOG_STREAM, &mut out);
            }
        }
    }
}

#[cfg(not(target_os = "espidf"))]
mod host {
    use super::*;

    use core::convert::Infallible;

    use embedded_hal::digital::{ErrorType, OutputPin};
    use sensor_emulator::hal::{DacOutput, Direction, EncoderInput};
    use sensor_emulator::logging::LogLevel;

    /// One scripted operator action.
    #[derive(Clone, Copy)]
    enum Action {
        Wait(u32),
        Turn(Direction, u32),
        Press,
    }

    /// Encoder that replays queued actions, one per iteration.
    #[derive(Default)]
    struct ScriptedKnob {
        direction: Direction,
        pressed: bool,
        event: bool,
    }

    impl EncoderInput for ScriptedKnob {
        fn update(&mut self, _now_ticks: u64) {}

        fn take_direction(&mut self) -> Direction {
            core::mem::take(&mut self.direction)
        }

        fn button_pressed(&self) -> bool {
            self.pressed
        }

        fn take_button_event(&mut self) -> bool {
            core::mem::take(&mut self.event)
        }
    }

    /// DAC that keeps the most recent codes for the summary.
    #[derive(Default)]
    struct CaptureDac {
        codes: Vec<u16>,
    }

    impl DacOutput for CaptureDac {
        fn write(&mut self, code: u16) {
            self.codes.push(code);
        }
    }

    struct Led;

    impl ErrorType for Led {
        type Error = Infallible;
    }

    impl OutputPin for Led {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    const SCRIPT: &[Action] = &[
        Action::Wait(32),
        Action::Turn(Direction::Cw, 5),
        Action::Wait(32),
        Action::Press,
        Action::Turn(Direction::Cw, 32),
        Action::Wait(64),
        Action::Press,
        Action::Wait(32),
        Action::Press,
        Action::Turn(Direction::Ccw, 28),
        Action::Wait(4),
    ];

    pub fn run() {
        LOG_STREAM.set_max_level(LogLevel::Debug);

        let mut controller = Controller::new(GeneratorConfig::DEFAULT);
        let mut knob = ScriptedKnob::default();
        let mut dac = CaptureDac::default();
        let mut led = Led;
        let mut out = Stdout;

        println!("{} ({})", env!("VERSION_STRING"), env!("GIT_HASH"));

        let mut now: u64 = 0;
        for action in SCRIPT {
            let (steps, direction, press) = match *action {
                Action::Wait(n) => (n, Direction::None, false),
                Action::Turn(dir, n) => (n, dir, false),
                Action::Press => (1, Direction::None, true),
            };

            for _ in 0..steps {
                knob.direction = direction;
                knob.pressed = press;
                knob.event = press;

                let before = dac.codes.len();
                controller.iterate(now, &mut knob, &mut dac, &mut led);
                if dac.codes.len() > before {
                    println!(
                        "t={:>12} {:<5} idx={:>4} code={:>4}",
                        now,
                        controller.mode(),
                        controller.scheduler().index(),
                        dac.codes[before]
                    );
                }

                // Advance exactly to the next deadline
                now = now.max(controller.scheduler().next_deadline());
            }
            knob.pressed = false;

            log_drain::drain_into(&LOG_STREAM, &mut out);
        }

        println!(
            "{} samples, final mode {} at {} cycles/s, {:?}",
            dac.codes.len(),
            controller.mode(),
            controller.frequency(),
            controller.params()
        );
    }
}
