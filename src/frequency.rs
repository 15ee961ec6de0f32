//! Nominal signal frequency.
//!
//! Derived only from the emission interval and the cycle length: cycles per
//! [`TICKS_PER_SECOND`] ticks. Not calibrated against the real loop rate.

use crate::config::TICKS_PER_SECOND;
use crate::waveform::Mode;

/// `⌊TICKS_PER_SECOND / (interval · len)⌋`, 0 for DC or a zero period.
#[inline]
pub fn nominal_frequency(mode: Mode, interval: u32, len: usize) -> u32 {
    if mode == Mode::Dc {
        return 0;
    }
    let period = (interval as u64).saturating_mul(len as u64);
    if period == 0 {
        return 0;
    }
    (TICKS_PER_SECOND / period) as u32
}
