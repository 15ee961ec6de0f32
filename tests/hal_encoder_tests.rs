//! Rotary encoder driver tests

mod common;

use common::Line;
use embedded_hal::digital::{ErrorKind, ErrorType, InputPin};
use sensor_emulator::hal::{Direction, EncoderInput, QuadratureEncoder};

const MS: u64 = 1_000_000;
const DEBOUNCE: u64 = 50 * MS;

fn make() -> (QuadratureEncoder<Line, Line, Line>, Line, Line, Line) {
    let a = Line::new(true);
    let b = Line::new(true);
    let btn = Line::new(true);
    let mut enc = QuadratureEncoder::new(a.clone(), b.clone(), btn.clone(), DEBOUNCE);
    enc.init(0);
    (enc, a, b, btn)
}

#[test]
fn test_idle_reports_nothing() {
    let (mut enc, ..) = make();
    enc.update(MS);
    assert_eq!(enc.take_direction(), Direction::None);
    assert!(!enc.button_pressed());
    assert!(!enc.take_button_event());
}

#[test]
fn test_rotation_direction() {
    let (mut enc, a, _b, _) = make();

    // A falls while B high: A != B
    a.set(false);
    enc.update(MS);
    assert_eq!(enc.take_direction(), Direction::Cw);
    assert_eq!(enc.take_direction(), Direction::None, "reported once");

    // A rises while B high: A == B
    a.set(true);
    enc.update(2 * MS);
    assert_eq!(enc.take_direction(), Direction::Ccw);
}

#[test]
fn test_b_alone_does_not_rotate() {
    let (mut enc, _a, b, _) = make();
    b.set(false);
    enc.update(MS);
    assert_eq!(enc.take_direction(), Direction::None);
}

#[test]
fn test_button_debounce() {
    let (mut enc, _, _, btn) = make();

    // Bounce inside the window after init is ignored
    btn.set(false);
    enc.update(10 * MS);
    assert!(!enc.button_pressed());
    assert!(!enc.take_button_event());

    // Still low after the window: accepted, one event
    enc.update(60 * MS);
    assert!(enc.button_pressed());
    assert!(enc.take_button_event());
    assert!(!enc.take_button_event(), "one-shot");

    // Release too soon after the press is ignored
    btn.set(true);
    enc.update(70 * MS);
    assert!(enc.button_pressed());

    // Release after the window: no event on release
    enc.update(111 * MS);
    assert!(!enc.button_pressed());
    assert!(!enc.take_button_event());
}

#[test]
fn test_exact_window_not_enough() {
    let (mut enc, _, _, btn) = make();
    btn.set(false);
    enc.update(DEBOUNCE);
    assert!(!enc.button_pressed());
    enc.update(DEBOUNCE + 1);
    assert!(enc.button_pressed());
}

#[derive(Debug)]
struct Broken;

impl embedded_hal::digital::Error for Broken {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

struct FailingPin;

impl ErrorType for FailingPin {
    type Error = Broken;
}

impl InputPin for FailingPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Err(Broken)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Err(Broken)
    }
}

#[test]
fn test_read_errors_hold_previous_level() {
    let mut enc = QuadratureEncoder::new(FailingPin, FailingPin, FailingPin, DEBOUNCE);
    enc.init(0);

    for t in 1..10 {
        enc.update(t * 100 * MS);
        assert_eq!(enc.take_direction(), Direction::None);
        assert!(!enc.button_pressed());
        assert!(!enc.take_button_event());
    }
}
