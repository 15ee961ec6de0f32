//! Hardware Abstraction Layer for SensorEmulator.
//!
//! Thin capability traits plus portable drivers built on them.
//! Signal logic stays in core modules, HAL is just I/O.

pub mod dac;
pub mod encoder;
#[cfg(target_os = "espidf")]
pub mod esp;
pub mod setclear;

pub use dac::ParallelDac;
pub use encoder::QuadratureEncoder;
pub use setclear::{RegisterWrite, SetClearBank, SetClearRegs};

use embedded_hal::digital::{ErrorType, OutputPin};

/// Set/clear access to a bank of output lines.
///
/// Bit `n` of a mask addresses GPIO `n`. Implementations write the whole
/// mask in one register access where the hardware allows it.
pub trait GpioBank {
    /// Drive every line in `mask` high.
    fn set_bits(&mut self, mask: u64);
    /// Drive every line in `mask` low.
    fn clear_bits(&mut self, mask: u64);
}

impl<T: GpioBank + ?Sized> GpioBank for &mut T {
    #[inline]
    fn set_bits(&mut self, mask: u64) {
        (**self).set_bits(mask)
    }

    #[inline]
    fn clear_bits(&mut self, mask: u64) {
        (**self).clear_bits(mask)
    }
}

/// Sink for DAC codes.
pub trait DacOutput {
    /// Present `code` on the output. Takes effect when the call returns.
    fn write(&mut self, code: u16);
}

/// Encoder rotation reported for one loop iteration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(i8)]
pub enum Direction {
    /// Counter-clockwise.
    Ccw = -1,
    /// No rotation.
    None = 0,
    /// Clockwise.
    Cw = 1,
}

impl Default for Direction {
    fn default() -> Self {
        Direction::None
    }
}

/// Debounced rotary encoder with push button.
pub trait EncoderInput {
    /// Sample the raw lines. Call exactly once per loop iteration.
    fn update(&mut self, now_ticks: u64);
    /// Pending rotation; resets to [`Direction::None`] once read.
    fn take_direction(&mut self) -> Direction;
    /// Debounced button level (true while held).
    fn button_pressed(&self) -> bool;
    /// One-shot press edge; cleared once read.
    fn take_button_event(&mut self) -> bool;
}

/// A missing encoder never rotates and never presses.
impl<E: EncoderInput> EncoderInput for Option<E> {
    #[inline]
    fn update(&mut self, now_ticks: u64) {
        if let Some(encoder) = self {
            encoder.update(now_ticks);
        }
    }

    #[inline]
    fn take_direction(&mut self) -> Direction {
        self.as_mut().map_or(Direction::None, E::take_direction)
    }

    #[inline]
    fn button_pressed(&self) -> bool {
        self.as_ref().is_some_and(E::button_pressed)
    }

    #[inline]
    fn take_button_event(&mut self) -> bool {
        self.as_mut().is_some_and(E::take_button_event)
    }
}

/// Output line that may be absent; writes to a missing line succeed.
pub struct OptionalPin<P>(pub Option<P>);

impl<P: OutputPin> ErrorType for OptionalPin<P> {
    type Error = P::Error;
}

impl<P: OutputPin> OutputPin for OptionalPin<P> {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.0.as_mut().map_or(Ok(()), P::set_low)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.0.as_mut().map_or(Ok(()), P::set_high)
    }
}
