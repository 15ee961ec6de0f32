//! Encoder-driven parameters.
//!
//! Each value only ever moves by its configured step and stays inside its
//! range; a request past the limit is absorbed silently.

use crate::config::{GeneratorConfig, Range};
use crate::hal::Direction;

/// Outcome of one encoder step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// Value moved to the contained new value.
    Changed(u32),
    /// Value already at the limit in that direction.
    Saturated(u32),
    /// No rotation.
    Idle,
}

/// Current parameter set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Parameters {
    /// DC level in logical sample units.
    pub dc_voltage: u8,
    /// Crank sine amplitude.
    pub crank_amplitude: u8,
    /// Ticks between emitted samples, shared by every mode.
    pub interval: u32,
}

impl Parameters {
    /// Power-up values from the configuration.
    pub const fn from_config(config: &GeneratorConfig) -> Self {
        Self {
            dc_voltage: config.voltage_default,
            crank_amplitude: config.crank_amplitude_default,
            interval: config.interval_default,
        }
    }

    /// Clockwise raises the DC level.
    pub fn step_voltage(&mut self, dir: Direction, range: &Range<u8>) -> Step {
        let step = step_within(self.dc_voltage as u32, dir, widen(range));
        if let Step::Changed(v) = step {
            self.dc_voltage = v as u8;
        }
        step
    }

    /// Clockwise raises the crank amplitude.
    pub fn step_crank_amplitude(&mut self, dir: Direction, range: &Range<u8>) -> Step {
        let step = step_within(self.crank_amplitude as u32, dir, widen(range));
        if let Step::Changed(v) = step {
            self.crank_amplitude = v as u8;
        }
        step
    }

    /// Clockwise shortens the interval (higher frequency).
    pub fn step_interval(&mut self, dir: Direction, range: &Range<u32>) -> Step {
        let reversed = match dir {
            Direction::Cw => Direction::Ccw,
            Direction::Ccw => Direction::Cw,
            Direction::None => Direction::None,
        };
        let step = step_within(self.interval, reversed, *range);
        if let Step::Changed(v) = step {
            self.interval = v;
        }
        step
    }
}

impl Default for Parameters {
    fn default() -> Self {
        Self::from_config(&GeneratorConfig::DEFAULT)
    }
}

fn widen(range: &Range<u8>) -> Range<u32> {
    Range {
        min: range.min as u32,
        max: range.max as u32,
        step: range.step as u32,
    }
}

/// Move `value` one step up (CW) or down (CCW), clamped to the range.
fn step_within(value: u32, dir: Direction, range: Range<u32>) -> Step {
    let next = match dir {
        Direction::None => return Step::Idle,
        Direction::Cw => value.saturating_add(range.step).min(range.max),
        Direction::Ccw => value.saturating_sub(range.step).max(range.min),
    };
    if next == value {
        Step::Saturated(value)
    } else {
        Step::Changed(next)
    }
}
