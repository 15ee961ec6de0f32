//! Sensor waveform tables.
//!
//! Built by `const fn` at compile time, so they exist before the first loop
//! iteration and are never written afterwards. Values are 8-bit logical
//! samples centred on [`SIGNAL_CENTER`].

/// Logical zero of every signal.
pub const SIGNAL_CENTER: u8 = 128;

/// Swing of the digital (ABS, cam) signals around the centre.
pub const DIGITAL_SWING: u8 = 127;

/// High level of the digital signals (128 + 127).
pub const LEVEL_HIGH: u8 = SIGNAL_CENTER + DIGITAL_SWING;

/// Low level of the digital signals (128 - 127).
pub const LEVEL_LOW: u8 = SIGNAL_CENTER - DIGITAL_SWING;

/// Samples per crank tooth (one sine period).
pub const SAMPLES_PER_TOOTH: usize = 32;

/// Tooth positions on the trigger wheel, including the two missing ones.
pub const CRANK_TEETH: usize = 60;

/// First missing tooth of the 60-2 wheel.
pub const CRANK_GAP_FIRST_TOOTH: usize = 58;

/// Sine amplitude stored in the crank table.
pub const CRANK_BASE_AMPLITUDE: u8 = 32;

/// ABS table length.
pub const ABS_LEN: usize = 32;

/// Crank table length (60 teeth x 32 samples).
pub const CRANK_LEN: usize = CRANK_TEETH * SAMPLES_PER_TOOTH;

/// Cam table length.
pub const CAM_LEN: usize = 32;

/// Cam pulse width: 1/8 of the revolution.
pub const CAM_PULSE_LEN: usize = CAM_LEN / 8;

/// Wheel-speed square wave: first half high, second half low.
pub static ABS_TABLE: [u8; ABS_LEN] = generate_abs();

/// 60-2 crank pattern: one sine per tooth, flat centre over teeth 58-59.
pub static CRANK_TABLE: [u8; CRANK_LEN] = generate_crank();

/// Cam: a single pulse at the start of the revolution.
pub static CAM_TABLE: [u8; CAM_LEN] = generate_cam();

/// Build the ABS square wave.
pub const fn generate_abs() -> [u8; ABS_LEN] {
    let mut table = [LEVEL_LOW; ABS_LEN];
    let mut i = 0;
    while i < ABS_LEN / 2 {
        table[i] = LEVEL_HIGH;
        i += 1;
    }
    table
}

/// Build the 60-2 crank wheel.
pub const fn generate_crank() -> [u8; CRANK_LEN] {
    let mut table = [SIGNAL_CENTER; CRANK_LEN];
    let mut i = 0;
    while i < CRANK_GAP_FIRST_TOOTH * SAMPLES_PER_TOOTH {
        let phase = i % SAMPLES_PER_TOOTH;
        let angle = 2.0 * core::f64::consts::PI * (phase as f64) / (SAMPLES_PER_TOOTH as f64);
        let value = SIGNAL_CENTER as f64 + CRANK_BASE_AMPLITUDE as f64 * const_sin(angle);
        // Truncate like an integer cast; the guard keeps exact peaks (160, 96)
        // from dropping a step on approximation error.
        table[i] = (value + 1e-4) as u8;
        i += 1;
    }
    table
}

/// Build the cam pulse.
pub const fn generate_cam() -> [u8; CAM_LEN] {
    let mut table = [LEVEL_LOW; CAM_LEN];
    let mut i = 0;
    while i < CAM_PULSE_LEN {
        table[i] = LEVEL_HIGH;
        i += 1;
    }
    table
}

/// True for crank indices inside the two missing teeth.
#[inline]
pub const fn is_crank_gap(index: usize) -> bool {
    index / SAMPLES_PER_TOOTH >= CRANK_GAP_FIRST_TOOTH
}

/// Const-compatible sine.
///
/// Range-reduced to [-π/2, π/2] before the Taylor series, which keeps the
/// error below 1e-7 over the whole circle.
const fn const_sin(x: f64) -> f64 {
    use core::f64::consts::{FRAC_PI_2, PI};

    let mut x = x;
    while x > PI {
        x -= 2.0 * PI;
    }
    while x < -PI {
        x += 2.0 * PI;
    }

    // sin(π - x) = sin(x)
    if x > FRAC_PI_2 {
        x = PI - x;
    } else if x < -FRAC_PI_2 {
        x = -PI - x;
    }

    let x2 = x * x;
    let x3 = x2 * x;
    let x5 = x3 * x2;
    let x7 = x5 * x2;
    let x9 = x7 * x2;
    let x11 = x9 * x2;

    x - x3 / 6.0 + x5 / 120.0 - x7 / 5040.0 + x9 / 362880.0 - x11 / 39916800.0
}
