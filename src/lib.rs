//! # SensorEmulator
//!
//! Automotive sensor emulator: ABS wheel-speed, crank 60-2, cam and a DC
//! reference, played through a 10-bit parallel DAC and tuned with a rotary
//! encoder.
//!
//! ## Architecture
//!
//! Everything runs in one cooperative loop. [`Controller::iterate`] samples
//! the encoder, switches mode on a button press, adjusts the active
//! parameter and lets the [`OutputScheduler`] emit at most one sample.
//! Hardware is reached only through the traits in [`hal`], so the whole
//! signal path runs on the host in tests.

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod controller;
pub mod frequency;
pub mod hal;
pub mod log_drain;
pub mod log_globals;
pub mod logging;
pub mod params;
pub mod scheduler;
pub mod waveform;

pub use config::{GeneratorConfig, IndexPolicy, PinMap};
pub use controller::Controller;
pub use frequency::nominal_frequency;
pub use hal::{DacOutput, Direction, EncoderInput, GpioBank, OptionalPin};
pub use log_globals::LOG_STREAM;
pub use params::{Parameters, Step};
pub use scheduler::OutputScheduler;
pub use waveform::{Mode, ModeProfile};
