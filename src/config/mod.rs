//! Module: config
//!
//! Purpose: Single source of truth for generator limits and defaults.
//!
//! Architecture:
//! - `GeneratorConfig::DEFAULT`: compile-time defaults, usable in `static`/`const`
//! - `with_*` overrides clamp into the configured ranges
//! - `pins`: board pin assignments, kept apart from signal semantics
//!
//! Time values are in the controller's abstract tick unit (nanoseconds on
//! hardware: the loop feeds `microseconds * 1000`).

pub mod pins;

pub use pins::PinMap;

use crate::waveform::tables::CRANK_BASE_AMPLITUDE;

/// Logical sample resolution of the waveform tables.
pub const SAMPLE_BITS: u32 = 8;

/// Resolution of the parallel DAC.
pub const DAC_BITS: u32 = 10;

/// Left shift that maps an 8-bit logical sample onto the DAC code range.
pub const DAC_SHIFT: u32 = DAC_BITS - SAMPLE_BITS;

/// Largest code the DAC accepts.
pub const DAC_MAX_CODE: u16 = (1 << DAC_BITS) - 1;

/// Ticks per second for the frequency report (nanosecond ticks).
pub const TICKS_PER_SECOND: u64 = 1_000_000_000;

/// What happens to the playback index when the active signal changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndexPolicy {
    /// Restart the new signal from its first sample.
    Reset,
    /// Keep the previous index; an index past the new table is read modulo
    /// its length until the next advance wraps it.
    Carry,
}

impl Default for IndexPolicy {
    fn default() -> Self {
        IndexPolicy::Reset
    }
}

/// Inclusive range with a step, used for every encoder-driven parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Range<T> {
    pub min: T,
    pub max: T,
    pub step: T,
}

/// Generator configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Ticks between two emitted samples (shared by ABS, cam and DC).
    pub interval: Range<u32>,
    /// Interval at power-up.
    pub interval_default: u32,

    /// DC reference level (logical sample units).
    pub voltage: Range<u8>,
    /// DC level at power-up.
    pub voltage_default: u8,

    /// Crank amplitude; `crank_amplitude_base` reproduces the table as stored.
    pub crank_amplitude: Range<u8>,
    /// Crank amplitude at power-up.
    pub crank_amplitude_default: u8,
    /// Amplitude the crank table was generated with.
    pub crank_amplitude_base: u8,

    /// Button debounce window in ticks.
    pub debounce_ticks: u64,

    /// Index handling on signal change.
    pub index_policy: IndexPolicy,
}

impl GeneratorConfig {
    /// Factory defaults.
    pub const DEFAULT: Self = Self {
        interval: Range { min: 10_000, max: 1_000_000, step: 10_000 },
        interval_default: 100_000,
        voltage: Range { min: 0, max: 255, step: 1 },
        voltage_default: 128,
        crank_amplitude: Range { min: 32, max: 127, step: 1 },
        crank_amplitude_default: 32,
        crank_amplitude_base: CRANK_BASE_AMPLITUDE,
        debounce_ticks: 50_000_000, // 50 ms
        index_policy: IndexPolicy::Reset,
    };

    /// Override the power-up interval (clamped).
    pub const fn with_interval(mut self, interval: u32) -> Self {
        self.interval_default = clamp_u32(interval, self.interval.min, self.interval.max);
        self
    }

    /// Override the power-up DC level (clamped).
    pub const fn with_voltage(mut self, voltage: u8) -> Self {
        self.voltage_default = clamp_u8(voltage, self.voltage.min, self.voltage.max);
        self
    }

    /// Override the power-up crank amplitude (clamped).
    pub const fn with_crank_amplitude(mut self, amplitude: u8) -> Self {
        self.crank_amplitude_default =
            clamp_u8(amplitude, self.crank_amplitude.min, self.crank_amplitude.max);
        self
    }

    /// Select index handling on signal change.
    pub const fn with_index_policy(mut self, policy: IndexPolicy) -> Self {
        self.index_policy = policy;
        self
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

const fn clamp_u32(v: u32, min: u32, max: u32) -> u32 {
    if v < min {
        min
    } else if v > max {
        max
    } else {
        v
    }
}

const fn clamp_u8(v: u8, min: u8, max: u8) -> u8 {
    if v < min {
        min
    } else if v > max {
        max
    } else {
        v
    }
}
