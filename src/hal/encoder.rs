//! Rotary encoder with push button
//!
//! Polled driver over `embedded_hal` input pins. All three lines are
//! pulled up: the button reads low while held.
//!
//! - Rotation: decided on every change of line A (`A == B` → CCW, else CW)
//! - Button: level changes accepted only after the debounce window,
//!   press edge (high → low) latches a one-shot event

use embedded_hal::digital::InputPin;

use super::{Direction, EncoderInput};

/// Polled quadrature encoder.
pub struct QuadratureEncoder<A, B, Btn> {
    pin_a: A,
    pin_b: B,
    pin_button: Btn,

    last_a: bool,
    last_b: bool,

    /// Accepted (debounced) button line level, true = released.
    button_line: bool,
    /// Time of the last accepted button change.
    button_changed_at: u64,
    debounce_ticks: u64,

    direction: Direction,
    button_event: bool,
}

impl<A, B, Btn> QuadratureEncoder<A, B, Btn>
where
    A: InputPin,
    B: InputPin,
    Btn: InputPin,
{
    /// Create the driver. Call [`init`](Self::init) before the first update.
    pub fn new(pin_a: A, pin_b: B, pin_button: Btn, debounce_ticks: u64) -> Self {
        Self {
            pin_a,
            pin_b,
            pin_button,
            last_a: true,
            last_b: true,
            button_line: true,
            button_changed_at: 0,
            debounce_ticks,
            direction: Direction::None,
            button_event: false,
        }
    }

    /// Latch the current line levels as the reference state.
    pub fn init(&mut self, now_ticks: u64) {
        self.last_a = read_or(&mut self.pin_a, true);
        self.last_b = read_or(&mut self.pin_b, true);
        self.button_line = read_or(&mut self.pin_button, true);
        self.button_changed_at = now_ticks;
        self.direction = Direction::None;
        self.button_event = false;
    }
}

impl<A, B, Btn> EncoderInput for QuadratureEncoder<A, B, Btn>
where
    A: InputPin,
    B: InputPin,
    Btn: InputPin,
{
    fn update(&mut self, now_ticks: u64) {
        let a = read_or(&mut self.pin_a, self.last_a);
        let b = read_or(&mut self.pin_b, self.last_b);

        if a != self.last_a {
            self.direction = if a == b { Direction::Ccw } else { Direction::Cw };
        }
        self.last_a = a;
        self.last_b = b;

        let line = read_or(&mut self.pin_button, self.button_line);
        let elapsed = now_ticks.saturating_sub(self.button_changed_at);
        if line != self.button_line && elapsed > self.debounce_ticks {
            if self.button_line && !line {
                self.button_event = true;
            }
            self.button_line = line;
            self.button_changed_at = now_ticks;
        }
    }

    #[inline]
    fn take_direction(&mut self) -> Direction {
        core::mem::take(&mut self.direction)
    }

    #[inline]
    fn button_pressed(&self) -> bool {
        !self.button_line
    }

    #[inline]
    fn take_button_event(&mut self) -> bool {
        core::mem::take(&mut self.button_event)
    }
}

/// Read a line, keeping `previous` if the pin reports an error.
#[inline]
fn read_or<P: InputPin>(pin: &mut P, previous: bool) -> bool {
    pin.is_high().unwrap_or(previous)
}
