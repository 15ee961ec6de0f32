//! Board pin assignments.

use super::DAC_BITS;

/// Number of DAC data lines.
pub const DAC_PINS: usize = DAC_BITS as usize;

/// GPIO numbers for every line the emulator drives or samples.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PinMap {
    /// DAC data lines, most significant bit first (D9..D0).
    pub dac: [u8; DAC_PINS],
    /// Encoder channel A (pulled up).
    pub encoder_a: u8,
    /// Encoder channel B (pulled up).
    pub encoder_b: u8,
    /// Encoder push button, active low (pulled up).
    pub encoder_button: u8,
    /// Status LED, lit while the button is held.
    pub status_led: u8,
}

impl PinMap {
    /// ESP32-S3 DevKitC wiring: R-2R ladder on the left header.
    pub const ESP32S3: Self = Self {
        dac: [4, 5, 6, 7, 15, 16, 17, 18, 8, 9],
        encoder_a: 10,
        encoder_b: 11,
        encoder_button: 12,
        status_led: 2,
    };
}

impl Default for PinMap {
    fn default() -> Self {
        Self::ESP32S3
    }
}
