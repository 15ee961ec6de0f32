//! Output scheduler.
//!
//! One deadline comparison per loop iteration. When the deadline has
//! passed, exactly one sample goes to the DAC and the next deadline is set
//! one interval after *now* (late iterations stretch the period, they never
//! emit a burst).

use crate::config::DAC_SHIFT;
use crate::hal::DacOutput;
use crate::params::Parameters;
use crate::waveform::{scale_crank, ModeProfile, Source};

/// Playback position and deadline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutputScheduler {
    index: usize,
    next_deadline: u64,
}

impl OutputScheduler {
    /// Start at index 0 with the deadline already due.
    pub const fn new() -> Self {
        Self {
            index: 0,
            next_deadline: 0,
        }
    }

    /// Current playback index.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Time of the next emission.
    #[inline]
    pub fn next_deadline(&self) -> u64 {
        self.next_deadline
    }

    /// True once `now` has reached the deadline.
    #[inline]
    pub fn is_due(&self, now: u64) -> bool {
        now >= self.next_deadline
    }

    /// Restart playback from the first sample.
    #[inline]
    pub fn rewind(&mut self) {
        self.index = 0;
    }

    /// Logical sample at the current index.
    ///
    /// An index left over from a longer table is read modulo the active
    /// table length.
    #[inline]
    pub fn sample(&self, profile: &ModeProfile, params: &Parameters, crank_base: u8) -> u8 {
        match profile.source {
            Source::Table(table) => table[self.index % table.len()],
            Source::ScaledCrank(table) => scale_crank(
                table[self.index % table.len()],
                params.crank_amplitude,
                crank_base,
            ),
            Source::Level => params.dc_voltage,
        }
    }

    /// Emit the next sample if the deadline has passed.
    ///
    /// Returns the DAC code written, `None` if not yet due.
    #[inline]
    pub fn tick<D: DacOutput>(
        &mut self,
        now: u64,
        profile: &ModeProfile,
        params: &Parameters,
        crank_base: u8,
        dac: &mut D,
    ) -> Option<u16> {
        if !self.is_due(now) {
            return None;
        }

        let code = (self.sample(profile, params, crank_base) as u16) << DAC_SHIFT;
        dac.write(code);

        self.index = (self.index + 1) % profile.len.max(1);
        self.next_deadline = now.saturating_add(params.interval as u64);
        Some(code)
    }
}

impl Default for OutputScheduler {
    fn default() -> Self {
        Self::new()
    }
}
