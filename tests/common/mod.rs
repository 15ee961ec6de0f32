//! Host mocks shared by the integration tests.

#![allow(dead_code)]

use std::cell::Cell;
use std::collections::VecDeque;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin};
use sensor_emulator::hal::{DacOutput, Direction, EncoderInput, GpioBank};

/// DAC that records every code.
#[derive(Default)]
pub struct RecordingDac {
    pub codes: Vec<u16>,
}

impl DacOutput for RecordingDac {
    fn write(&mut self, code: u16) {
        self.codes.push(code);
    }
}

/// One iteration's worth of encoder output.
#[derive(Clone, Copy, Default)]
pub struct KnobFrame {
    pub direction: Direction,
    pub pressed: bool,
    pub event: bool,
}

/// Encoder fed from a queue of frames; idle once the queue is empty.
#[derive(Default)]
pub struct FakeKnob {
    pub queue: VecDeque<KnobFrame>,
    current: KnobFrame,
    pub updates: u32,
}

impl FakeKnob {
    pub fn push_turn(&mut self, direction: Direction) {
        self.queue.push_back(KnobFrame { direction, ..Default::default() });
    }

    pub fn push_press(&mut self) {
        self.queue.push_back(KnobFrame { pressed: true, event: true, ..Default::default() });
    }
}

impl EncoderInput for FakeKnob {
    fn update(&mut self, _now_ticks: u64) {
        self.updates += 1;
        self.current = self.queue.pop_front().unwrap_or_default();
    }

    fn take_direction(&mut self) -> Direction {
        std::mem::take(&mut self.current.direction)
    }

    fn button_pressed(&self) -> bool {
        self.current.pressed
    }

    fn take_button_event(&mut self) -> bool {
        std::mem::take(&mut self.current.event)
    }
}

/// Output pin remembering its level and how often it was written.
#[derive(Default)]
pub struct Led {
    pub on: bool,
    pub writes: u32,
}

impl ErrorType for Led {
    type Error = Infallible;
}

impl OutputPin for Led {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.on = false;
        self.writes += 1;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.on = true;
        self.writes += 1;
        Ok(())
    }
}

/// Input line whose level the test controls through a shared cell.
#[derive(Clone)]
pub struct Line(pub Rc<Cell<bool>>);

impl Line {
    pub fn new(level: bool) -> Self {
        Self(Rc::new(Cell::new(level)))
    }

    pub fn set(&self, level: bool) {
        self.0.set(level);
    }
}

impl ErrorType for Line {
    type Error = Infallible;
}

impl InputPin for Line {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.0.get())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.0.get())
    }
}

/// Bank operation, in call order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BankOp {
    Set(u64),
    Clear(u64),
}

/// GPIO bank that tracks levels and the operation log.
#[derive(Default)]
pub struct MemoryBank {
    pub level: u64,
    pub ops: Vec<BankOp>,
}

impl GpioBank for MemoryBank {
    fn set_bits(&mut self, mask: u64) {
        self.level |= mask;
        self.ops.push(BankOp::Set(mask));
    }

    fn clear_bits(&mut self, mask: u64) {
        self.level &= !mask;
        self.ops.push(BankOp::Clear(mask));
    }
}
