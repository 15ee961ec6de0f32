//! Parallel (R-2R) DAC driver
//!
//! One GPIO per bit, most significant bit first. A write clears every
//! line that must go low, then sets every line that must go high: two bank
//! accesses, so the lines are not updated atomically.

use super::{DacOutput, GpioBank};
use crate::config::pins::DAC_PINS;

/// Parallel DAC on a [`GpioBank`].
pub struct ParallelDac<B: GpioBank> {
    bank: B,
    /// Per-bit GPIO masks, index 0 = MSB.
    masks: [u64; DAC_PINS],
    /// Union of all data-line masks.
    all_lines: u64,
    last_code: u16,
}

impl<B: GpioBank> ParallelDac<B> {
    /// Bind the DAC to its data pins (MSB first).
    ///
    /// Pins must be below 64; higher numbers cannot be addressed by a mask
    /// and are left undriven.
    pub fn new(bank: B, pins: [u8; DAC_PINS]) -> Self {
        let mut masks = [0u64; DAC_PINS];
        let mut all_lines = 0u64;
        for (mask, &pin) in masks.iter_mut().zip(pins.iter()) {
            *mask = 1u64.checked_shl(pin as u32).unwrap_or(0);
            all_lines |= *mask;
        }

        Self {
            bank,
            masks,
            all_lines,
            last_code: 0,
        }
    }

    /// Drive every data line low (output code 0).
    pub fn init(&mut self) {
        self.bank.clear_bits(self.all_lines);
        self.last_code = 0;
    }

    /// Compute the (set, clear) masks for `code`.
    ///
    /// Only the low `DAC_PINS` bits of `code` are used.
    #[inline]
    pub fn masks_for(&self, code: u16) -> (u64, u64) {
        let mut set = 0u64;
        let mut clear = 0u64;
        for (i, &mask) in self.masks.iter().enumerate() {
            let bit = DAC_PINS - 1 - i;
            if code & (1 << bit) != 0 {
                set |= mask;
            } else {
                clear |= mask;
            }
        }
        (set, clear)
    }

    /// Last code written.
    #[inline]
    pub fn last_code(&self) -> u16 {
        self.last_code
    }

    /// Access the underlying bank (tests, diagnostics).
    pub fn bank(&self) -> &B {
        &self.bank
    }
}

impl<B: GpioBank> DacOutput for ParallelDac<B> {
    #[inline]
    fn write(&mut self, code: u16) {
        let (set, clear) = self.masks_for(code);
        self.bank.clear_bits(clear);
        self.bank.set_bits(set);
        self.last_code = code & crate::config::DAC_MAX_CODE;
    }
}
