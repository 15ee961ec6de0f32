//! Mode and parameter controller tests

mod common;

use common::{FakeKnob, Led, RecordingDac};
use sensor_emulator::waveform::tables::{CAM_TABLE, CRANK_TABLE};
use sensor_emulator::{Controller, Direction, GeneratorConfig, IndexPolicy, Mode, Step};

fn mode_for(n: usize) -> Mode {
    match n % 4 {
        0 => Mode::Abs,
        1 => Mode::Crank,
        2 => Mode::Cam,
        _ => Mode::Dc,
    }
}

/// Deterministic direction sequence (LCG), biased toward long runs.
fn directions(seed: u32, count: usize) -> Vec<Direction> {
    let mut state = seed;
    let mut out = Vec::with_capacity(count);
    let mut current = Direction::Cw;
    for _ in 0..count {
        state = state.wrapping_mul(1664525).wrapping_add(1013904223);
        match state >> 28 {
            0 => current = Direction::Cw,
            1 => current = Direction::Ccw,
            2 => {
                out.push(Direction::None);
                continue;
            }
            _ => {}
        }
        out.push(current);
    }
    out
}

#[test]
fn test_mode_cycle() {
    for presses in 0..13 {
        let mut ctl = Controller::default();
        let mut knob = FakeKnob::default();
        let mut dac = RecordingDac::default();
        let mut led = Led::default();

        let mut now = 0u64;
        for i in 0..presses {
            knob.push_press();
            // Irregular gaps between presses
            now += 1 + (i as u64 * 7_919) % 500_000;
            ctl.iterate(now, &mut knob, &mut dac, &mut led);
        }

        assert_eq!(ctl.mode(), mode_for(presses), "{} presses", presses);
    }
}

#[test]
fn test_held_button_switches_once() {
    let mut ctl = Controller::default();
    let mut knob = FakeKnob::default();
    let mut dac = RecordingDac::default();
    let mut led = Led::default();

    knob.push_press();
    for _ in 0..5 {
        knob.queue.push_back(common::KnobFrame { pressed: true, ..Default::default() });
    }

    for t in 0..6u64 {
        ctl.iterate(t, &mut knob, &mut dac, &mut led);
        assert!(led.on, "LED mirrors the held button");
    }
    assert_eq!(ctl.mode(), Mode::Crank);

    ctl.iterate(6, &mut knob, &mut dac, &mut led);
    assert!(!led.on);
    assert_eq!(led.writes, 7, "LED written every iteration");
    assert_eq!(knob.updates, 7, "encoder sampled once per iteration");
}

#[test]
fn test_clamps_hold_for_any_rotation() {
    for seed in [1u32, 7, 42, 1234, 99_991] {
        let mut ctl = Controller::default();
        let seq = directions(seed, 2_000);

        for (i, &dir) in seq.iter().enumerate() {
            if i % 250 == 0 {
                ctl.switch_mode(i as u64);
            }
            ctl.adjust(dir, i as u64);

            let p = ctl.params();
            assert!(p.crank_amplitude >= 32 && p.crank_amplitude <= 127);
            assert!(p.interval >= 10_000 && p.interval <= 1_000_000);
            assert_eq!(p.interval % 10_000, 0);
        }
    }
}

#[test]
fn test_dc_voltage_limits() {
    let mut ctl = Controller::default();
    for _ in 0..3 {
        ctl.switch_mode(0);
    }
    assert_eq!(ctl.mode(), Mode::Dc);
    assert_eq!(ctl.params().dc_voltage, 128);

    for _ in 0..300 {
        ctl.adjust(Direction::Cw, 0);
    }
    assert_eq!(ctl.params().dc_voltage, 255);
    assert_eq!(ctl.adjust(Direction::Cw, 0), Step::Saturated(255));

    for _ in 0..300 {
        ctl.adjust(Direction::Ccw, 0);
    }
    assert_eq!(ctl.params().dc_voltage, 0);
    assert_eq!(ctl.params().interval, 100_000, "DC never touches the interval");
}

#[test]
fn test_interval_only_in_abs_and_cam() {
    let mut ctl = Controller::default();

    assert_eq!(ctl.adjust(Direction::Cw, 0), Step::Changed(90_000));

    ctl.switch_mode(0); // Crank
    ctl.adjust(Direction::Cw, 0);
    assert_eq!(ctl.params().interval, 90_000);
    assert_eq!(ctl.params().crank_amplitude, 33);

    ctl.switch_mode(0); // Cam
    assert_eq!(ctl.adjust(Direction::Ccw, 0), Step::Changed(100_000));
    assert_eq!(ctl.adjust(Direction::Ccw, 0), Step::Changed(110_000));

    ctl.switch_mode(0); // Dc
    ctl.adjust(Direction::Cw, 0);
    assert_eq!(ctl.params().interval, 110_000);
}

#[test]
fn test_interval_shared_across_modes() {
    let mut ctl = Controller::default();
    let mut dac = RecordingDac::default();

    for _ in 0..5 {
        ctl.adjust(Direction::Cw, 0);
    }
    assert_eq!(ctl.params().interval, 50_000);

    // Crank plays at the cadence ABS configured
    ctl.switch_mode(0);
    ctl.tick(1_000, &mut dac);
    assert_eq!(ctl.scheduler().next_deadline(), 51_000);
}

#[test]
fn test_amplitude_persists_across_cycle() {
    let mut ctl = Controller::default();
    ctl.switch_mode(0);
    for _ in 0..10 {
        ctl.adjust(Direction::Cw, 0);
    }
    for _ in 0..4 {
        ctl.switch_mode(0);
    }
    assert_eq!(ctl.mode(), Mode::Crank);
    assert_eq!(ctl.params().crank_amplitude, 42);
}

#[test]
fn test_reset_policy_starts_new_table_at_zero() {
    let mut ctl = Controller::default();
    let mut dac = RecordingDac::default();

    ctl.switch_mode(0); // Crank
    for k in 0..100u64 {
        ctl.tick(k * 100_000, &mut dac);
    }
    assert_eq!(ctl.scheduler().index(), 100);

    ctl.switch_mode(0); // Cam
    assert_eq!(ctl.scheduler().index(), 0);

    dac.codes.clear();
    ctl.tick(100 * 100_000, &mut dac);
    assert_eq!(dac.codes, vec![(CAM_TABLE[0] as u16) << 2]);
}

#[test]
fn test_carry_policy_keeps_index() {
    let config = GeneratorConfig::DEFAULT.with_index_policy(IndexPolicy::Carry);
    let mut ctl = Controller::new(config);
    let mut dac = RecordingDac::default();

    ctl.switch_mode(0); // Crank
    for k in 0..100u64 {
        ctl.tick(k * 100_000, &mut dac);
    }
    assert_eq!(dac.codes.last(), Some(&((CRANK_TABLE[99] as u16) << 2)));

    ctl.switch_mode(0); // Cam, index still 100
    assert_eq!(ctl.scheduler().index(), 100);

    dac.codes.clear();
    let mut now = 100 * 100_000;
    for _ in 0..3 {
        ctl.tick(now, &mut dac);
        now += 100_000;
    }

    // 100 is read as 100 % 32 = 4, then the advance wraps: 101 % 32 = 5, 6
    let expected: Vec<u16> = [4, 5, 6].iter().map(|&i| (CAM_TABLE[i] as u16) << 2).collect();
    assert_eq!(dac.codes, expected);
    assert_eq!(ctl.scheduler().index(), 7);
}

#[test]
fn test_carry_policy_short_index_is_plain_continuation() {
    let config = GeneratorConfig::DEFAULT.with_index_policy(IndexPolicy::Carry);
    let mut ctl = Controller::new(config);
    let mut dac = RecordingDac::default();

    for k in 0..2u64 {
        ctl.tick(k * 100_000, &mut dac);
    }
    ctl.switch_mode(0); // Crank continues at index 2
    dac.codes.clear();
    ctl.tick(200_000, &mut dac);
    assert_eq!(dac.codes, vec![(CRANK_TABLE[2] as u16) << 2]);
}

#[test]
fn test_dc_outputs_voltage() {
    let mut ctl = Controller::default();
    let mut dac = RecordingDac::default();
    for _ in 0..3 {
        ctl.switch_mode(0);
    }
    for _ in 0..10 {
        ctl.adjust(Direction::Cw, 0);
    }

    ctl.tick(0, &mut dac);
    ctl.tick(100_000, &mut dac);
    assert_eq!(dac.codes, vec![138 << 2, 138 << 2]);
}
