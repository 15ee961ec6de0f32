//! Signal modes and their playback profiles.

use super::tables::{ABS_TABLE, CAM_TABLE, CRANK_TABLE};

/// Active output signal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Wheel-speed square wave.
    Abs,
    /// Crankshaft 60-2 wheel.
    Crank,
    /// Camshaft, one pulse per revolution.
    Cam,
    /// Constant reference level.
    Dc,
}

impl Default for Mode {
    fn default() -> Self {
        Mode::Abs
    }
}

/// Parameter the encoder turns in a given mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Knob {
    /// Shared emission interval (frequency).
    Interval,
    /// Crank sine amplitude.
    CrankAmplitude,
    /// DC level.
    Voltage,
}

/// Where the samples of a mode come from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Source {
    /// Replay a table verbatim.
    Table(&'static [u8]),
    /// Replay the crank table with amplitude scaling.
    ScaledCrank(&'static [u8]),
    /// Emit the DC level.
    Level,
}

/// Everything the scheduler and controller need to know about a mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModeProfile {
    pub source: Source,
    /// Cycle length in samples (1 for DC).
    pub len: usize,
    pub knob: Knob,
}

impl Mode {
    /// Next mode in the button cycle.
    #[inline]
    pub fn next(self) -> Self {
        match self {
            Mode::Abs => Mode::Crank,
            Mode::Crank => Mode::Cam,
            Mode::Cam => Mode::Dc,
            Mode::Dc => Mode::Abs,
        }
    }

    /// Playback profile of this mode.
    pub fn profile(self) -> ModeProfile {
        match self {
            Mode::Abs => ModeProfile {
                source: Source::Table(&ABS_TABLE),
                len: ABS_TABLE.len(),
                knob: Knob::Interval,
            },
            Mode::Crank => ModeProfile {
                source: Source::ScaledCrank(&CRANK_TABLE),
                len: CRANK_TABLE.len(),
                knob: Knob::CrankAmplitude,
            },
            Mode::Cam => ModeProfile {
                source: Source::Table(&CAM_TABLE),
                len: CAM_TABLE.len(),
                knob: Knob::Interval,
            },
            Mode::Dc => ModeProfile {
                source: Source::Level,
                len: 1,
                knob: Knob::Voltage,
            },
        }
    }

    /// Short label for logs and the console.
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Abs => "ABS",
            Mode::Crank => "CRANK",
            Mode::Cam => "CAM",
            Mode::Dc => "DC",
        }
    }
}

impl core::fmt::Display for Mode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
