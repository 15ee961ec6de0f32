//! Mode and parameter controller.
//!
//! Owns the whole signal state (mode, parameters, playback position) and
//! is driven once per loop iteration by [`Controller::iterate`]:
//!
//! 1. Sample the encoder (`update`)
//! 2. Mirror the button level on the status LED
//! 3. Button press edge → next mode (ABS → CRANK → CAM → DC → ABS)
//! 4. Rotation → adjust the mode's parameter
//! 5. Scheduler tick
//!
//! Pure logic over the HAL traits, fully testable on host.

use embedded_hal::digital::{OutputPin, PinState};

use crate::config::{GeneratorConfig, IndexPolicy};
use crate::frequency::nominal_frequency;
use crate::hal::{DacOutput, Direction, EncoderInput};
use crate::log_globals::LOG_STREAM;
use crate::params::{Parameters, Step};
use crate::scheduler::OutputScheduler;
use crate::waveform::{Knob, Mode, ModeProfile};
use crate::{rt_debug, rt_info, rt_trace, rt_warn};

/// Signal generator state machine.
pub struct Controller {
    config: GeneratorConfig,
    mode: Mode,
    profile: ModeProfile,
    params: Parameters,
    scheduler: OutputScheduler,
    /// Last status LED write failed.
    status_fault: bool,
}

impl Controller {
    /// Start in ABS mode with the configured power-up parameters.
    pub fn new(config: GeneratorConfig) -> Self {
        let mode = Mode::default();
        Self {
            config,
            mode,
            profile: mode.profile(),
            params: Parameters::from_config(&config),
            scheduler: OutputScheduler::new(),
            status_fault: false,
        }
    }

    /// Active mode.
    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Profile of the active mode.
    #[inline]
    pub fn profile(&self) -> &ModeProfile {
        &self.profile
    }

    /// Current parameters.
    #[inline]
    pub fn params(&self) -> &Parameters {
        &self.params
    }

    /// Playback state.
    #[inline]
    pub fn scheduler(&self) -> &OutputScheduler {
        &self.scheduler
    }

    /// Nominal frequency of the active signal (0 for DC).
    #[inline]
    pub fn frequency(&self) -> u32 {
        nominal_frequency(self.mode, self.params.interval, self.profile.len)
    }

    /// Run one loop iteration.
    ///
    /// Returns the DAC code written this iteration, if any. A failing
    /// status LED does not stop the iteration; the first failure of a run
    /// of failures is logged at WARN.
    pub fn iterate<E, D, L>(
        &mut self,
        now: u64,
        encoder: &mut E,
        dac: &mut D,
        status: &mut L,
    ) -> Option<u16>
    where
        E: EncoderInput,
        D: DacOutput,
        L: OutputPin,
    {
        encoder.update(now);

        match status.set_state(PinState::from(encoder.button_pressed())) {
            Ok(()) => self.status_fault = false,
            Err(e) => {
                if !self.status_fault {
                    rt_warn!(LOG_STREAM, now, "status LED: {:?}", e);
                }
                self.status_fault = true;
            }
        }

        if encoder.take_button_event() {
            self.switch_mode(now);
        }

        self.adjust(encoder.take_direction(), now);

        self.tick(now, dac)
    }

    /// Advance to the next mode and rebind the playback table.
    pub fn switch_mode(&mut self, now: u64) -> Mode {
        let previous = self.mode;
        self.mode = previous.next();
        self.profile = self.mode.profile();

        if self.config.index_policy == IndexPolicy::Reset {
            self.scheduler.rewind();
        }

        rt_info!(
            LOG_STREAM,
            now,
            "mode {} -> {}: {} samples, index {}, {} cycles/s",
            previous,
            self.mode,
            self.profile.len,
            self.scheduler.index(),
            self.frequency()
        );

        self.mode
    }

    /// Apply one encoder step to the active mode's parameter.
    pub fn adjust(&mut self, dir: Direction, now: u64) -> Step {
        let (name, step) = match self.profile.knob {
            Knob::Voltage => ("voltage", self.params.step_voltage(dir, &self.config.voltage)),
            Knob::CrankAmplitude => (
                "crank amplitude",
                self.params.step_crank_amplitude(dir, &self.config.crank_amplitude),
            ),
            Knob::Interval => ("interval", self.params.step_interval(dir, &self.config.interval)),
        };

        match step {
            Step::Changed(v) => {
                rt_debug!(LOG_STREAM, now, "{} {} {}", self.mode, name, v);
            }
            Step::Saturated(v) => {
                rt_trace!(LOG_STREAM, now, "{} {} at limit {}", self.mode, name, v);
            }
            Step::Idle => {}
        }

        step
    }

    /// Emit the next sample if due.
    #[inline]
    pub fn tick<D: DacOutput>(&mut self, now: u64, dac: &mut D) -> Option<u16> {
        self.scheduler.tick(
            now,
            &self.profile,
            &self.params,
            self.config.crank_amplitude_base,
            dac,
        )
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new(GeneratorConfig::DEFAULT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NullDac;

    impl DacOutput for NullDac {
        fn write(&mut self, _code: u16) {}
    }

    #[test]
    fn test_initial_state() {
        let ctl = Controller::default();
        assert_eq!(ctl.mode(), Mode::Abs);
        assert_eq!(ctl.profile().len, 32);
        assert_eq!(ctl.params().interval, 100_000);
        assert_eq!(ctl.frequency(), 312);
    }

    #[test]
    fn test_crank_does_not_touch_interval() {
        let mut ctl = Controller::default();
        ctl.switch_mode(0);
        assert_eq!(ctl.mode(), Mode::Crank);

        ctl.adjust(Direction::Cw, 0);
        assert_eq!(ctl.params().crank_amplitude, 33);
        assert_eq!(ctl.params().interval, 100_000);
    }

    #[test]
    fn test_reset_policy_rewinds() {
        let mut ctl = Controller::default();
        ctl.switch_mode(0);
        for t in 0..40u64 {
            ctl.tick(t * 100_000, &mut NullDac);
        }
        assert_eq!(ctl.scheduler().index(), 40);

        ctl.switch_mode(0);
        assert_eq!(ctl.mode(), Mode::Cam);
        assert_eq!(ctl.scheduler().index(), 0);
    }
}
