//! Waveform generation for the emulated sensors
//!
//! Architecture:
//! - Tables: ABS square, crank 60-2 sine, cam pulse (const-evaluated, immutable)
//! - Modes: tagged enum, each mapping to a profile (source, length, knob)
//! - Crank amplitude is applied per sample at read time, tables stay untouched

pub mod mode;
pub mod tables;

pub use mode::{Knob, Mode, ModeProfile, Source};
pub use tables::{ABS_TABLE, CAM_TABLE, CRANK_TABLE, SIGNAL_CENTER};

/// Scale a raw crank sample around the centre.
///
/// Centre samples (gap and zero crossings) pass through unchanged. Division
/// truncates toward zero.
#[inline]
pub fn scale_crank(raw: u8, amplitude: u8, base: u8) -> u8 {
    if raw == SIGNAL_CENTER {
        return SIGNAL_CENTER;
    }
    let centered = raw as i32 - SIGNAL_CENTER as i32;
    let scaled = centered * amplitude as i32 / base.max(1) as i32;
    (SIGNAL_CENTER as i32 + scaled).clamp(0, u8::MAX as i32) as u8
}
