//! End-to-end driver runs over a simulated wall clock.

use std::sync::atomic::AtomicBool;

use super::{SimulatedClock, angle_diff};
use clockdyn_common::clock::{ClockConfig, Preset};
use clockdyn_common::hand::HandKind;
use clockdyn_engine::driver::ClockDriver;
use clockdyn_engine::error::DriverError;
use clockdyn_engine::input::parse_command;
use clockdyn_engine::perturbation::{Amplitude, Direction};
use clockdyn_engine::reference::{ClockTime, ReferenceMapping, ReferenceSource};
use clockdyn_engine::render::{HandFrame, JsonLinesRenderer, NullRenderer};

fn frames(preset: Preset, start: ClockTime, ticks: usize) -> Vec<HandFrame> {
    let cfg = ClockConfig::preset(preset);
    let clock = SimulatedClock::new(&cfg.motion, start, 20);
    let mut driver = ClockDriver::new(&cfg, clock, NullRenderer).unwrap();
    (0..ticks).map(|_| driver.tick().unwrap()).collect()
}

fn max_step(frames: &[HandFrame], pick: fn(&HandFrame) -> f64) -> f64 {
    frames
        .windows(2)
        .map(|w| angle_diff(pick(&w[1]), pick(&w[0])).abs())
        .fold(0.0, f64::max)
}

#[test]
fn continuous_face_sweeps_through_the_hour() {
    // 10:59:50 → 11:00:10, crossing the pause, the minute and the hour mark.
    let f = frames(Preset::Continuous, ClockTime::new(10, 59, 50, 0), 1_000);
    assert_eq!(f.len(), 1_000);
    assert_eq!(f[999].tick, 1_000);

    // Sweeping second hand: ~0.124°/tick, never a visible snap.
    assert!(max_step(&f, |x| x.second) < 1.0);
    // Stepping minute hand: a single 6° jump, filtered by its dynamics.
    assert!(max_step(&f, |x| x.minute) < 6.0);
    assert!(max_step(&f, |x| x.hour) < 0.5);

    // Ends near 11:00:10.
    let last = f[999];
    assert!(angle_diff(last.minute, 0.0).abs() < 0.5, "{last:?}");
    assert!(angle_diff(last.hour, 330.0).abs() < 0.5, "{last:?}");
}

#[test]
fn ticking_face_rolls_over_minute() {
    let f = frames(Preset::Stepping, ClockTime::new(3, 14, 57, 0), 500);
    // Each 6° tick is absorbed by the stiff spring within a few samples.
    assert!(max_step(&f, |x| x.second) < 6.0);
    // 3:15:06.980: settled on the 36° tick.
    assert!(angle_diff(f[498].second, 36.0).abs() < 0.1, "{:?}", f[498]);
}

#[test]
fn wall_clock_hands_start_on_their_references() {
    let f = frames(Preset::Continuous, ClockTime::new(6, 30, 15, 0), 1);
    let mapping = ReferenceMapping::new(&ClockConfig::preset(Preset::Continuous).motion);
    let expected = mapping.angles(&ClockTime::new(6, 30, 15, 20));
    assert!((f[0].minute - expected.minute).abs() < 1e-6);
    assert!((f[0].hour - expected.hour).abs() < 1e-6);
    // Sweeping hand lags its reference by about one sample.
    assert!((f[0].second - expected.second).abs() < 0.2);
}

#[test]
fn posted_commands_perturb_the_next_tick_only() {
    let cfg = ClockConfig::preset(Preset::Continuous);
    let start = ClockTime::new(12, 0, 5, 0);
    let mut quiet =
        ClockDriver::new(&cfg, SimulatedClock::new(&cfg.motion, start, 20), NullRenderer).unwrap();
    let mut pushed =
        ClockDriver::new(&cfg, SimulatedClock::new(&cfg.motion, start, 20), NullRenderer).unwrap();

    for _ in 0..10 {
        quiet.tick().unwrap();
        pushed.tick().unwrap();
    }
    parse_command("-M").unwrap().post(pushed.inbox());

    let q = quiet.tick().unwrap();
    let p = pushed.tick().unwrap();
    assert!(p.minute < q.minute);
    assert_eq!(p.second, q.second);
    assert_eq!(p.hour, q.hour);
    assert_eq!(pushed.simulator(HandKind::Minute).pending_force(), 0.0);
}

#[test]
fn disabled_dynamics_follow_reference_exactly() {
    let mut cfg = ClockConfig::preset(Preset::Stepping);
    cfg.simulation.enable_dynamics = false;
    let start = ClockTime::new(9, 41, 0, 0);
    let mut driver =
        ClockDriver::new(&cfg, SimulatedClock::new(&cfg.motion, start, 20), NullRenderer).unwrap();
    let mut reference = SimulatedClock::new(&cfg.motion, start, 20);
    reference.sample();

    driver.perturb(HandKind::Second, Amplitude::High, Direction::Positive);
    for _ in 0..200 {
        let frame = driver.tick().unwrap();
        let r = reference.sample();
        assert_eq!(frame.second, r.second);
        assert_eq!(frame.minute, r.minute);
        assert_eq!(frame.hour, r.hour);
    }
}

#[test]
fn json_lines_capture_every_tick() {
    let mut cfg = ClockConfig::default();
    cfg.simulation.sampling_period = 0.001;
    let clock = SimulatedClock::new(&cfg.motion, ClockTime::new(0, 0, 0, 0), 1);
    let mut driver = ClockDriver::new(&cfg, clock, JsonLinesRenderer::new(Vec::new())).unwrap();

    let running = AtomicBool::new(true);
    let stats = driver.run(&running, Some(25)).unwrap();
    assert_eq!(stats.tick_count, 25);

    let out = String::from_utf8(driver.into_renderer().into_inner()).unwrap();
    let ticks: Vec<u64> = out
        .lines()
        .map(|l| serde_json::from_str::<serde_json::Value>(l).unwrap()["tick"].as_u64().unwrap())
        .collect();
    assert_eq!(ticks, (1..=25).collect::<Vec<_>>());
}

#[test]
fn invalid_hand_parameters_abort_construction() {
    let mut cfg = ClockConfig::default();
    cfg.hands.second.stiffness = 0.0;
    let clock = SimulatedClock::new(&cfg.motion, ClockTime::default(), 20);
    let err = ClockDriver::new(&cfg, clock, NullRenderer).err().unwrap();
    assert!(matches!(err, DriverError::Config(_)));
    assert!(err.to_string().contains("hands.second.stiffness"), "{err}");
}
