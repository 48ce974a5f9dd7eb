//! Dial wrap handling: a reference crossing 0°/360° must not show up as a
//! backward jump of the simulated hand.

use super::{angle_diff, second_params, simulator};
use clockdyn_common::clock::{ClockConfig, Preset};
use clockdyn_common::hand::HandKind;

/// Feed one simulator the wrapped reference and another the unwrapped one;
/// outputs must agree modulo 360 at every step.
fn assert_wrap_invisible(hand: HandKind, preset: Preset, start: f64, speed: f64, unwrapped: &[f64]) {
    let params = *ClockConfig::preset(preset).hands.get(hand);
    let mut wrapped_sim = simulator(hand, params);
    let mut plain_sim = simulator(hand, params);
    wrapped_sim.initialize(start.rem_euclid(360.0), speed);
    plain_sim.initialize(start, speed);

    for &r in unwrapped {
        let a = wrapped_sim.step(r.rem_euclid(360.0)).unwrap();
        let b = plain_sim.step(r).unwrap();
        assert!(
            angle_diff(a, b).abs() < 1e-6,
            "{hand}: ref={r} wrapped={a} plain={b}"
        );
    }
}

#[test]
fn explicit_crossing_sequence_is_continuous() {
    let mut sim = simulator(HandKind::Second, second_params());
    sim.initialize(356.0, 50.0);

    let refs = [357.0, 358.0, 359.0, 1.0, 2.0, 3.0, 4.0];
    let mut prev = sim.real_angle();
    for r in refs {
        let y = sim.step(r).unwrap();
        let dy = angle_diff(y, prev);
        assert!(dy > -0.5 && dy < 3.0, "ref={r} y={y} prev={prev}");
        prev = y;
    }
    // Output is reported in the reference's frame after the crossing.
    assert!(prev < 180.0, "y={prev}");
}

#[test]
fn sweeping_second_hand_crosses_top_smoothly() {
    let mut sim = simulator(HandKind::Second, second_params());
    sim.initialize(354.0, 6.0);

    let per_step = 6.0 * super::T;
    let mut prev = sim.real_angle();
    for n in 1..=200 {
        let r = (354.0 + per_step * n as f64).rem_euclid(360.0);
        let y = sim.step(r).unwrap();
        assert!(angle_diff(y, prev).abs() < 3.0 * per_step, "n={n} y={y} prev={prev}");
        assert!(angle_diff(y, r).abs() < 0.5, "n={n} y={y} r={r}");
        prev = y;
    }
}

#[test]
fn ramp_across_top_matches_unwrapped_run() {
    let refs: Vec<f64> = (1..=300).map(|n| 350.0 + 0.12 * n as f64).collect();
    assert_wrap_invisible(HandKind::Second, Preset::Continuous, 350.0, 6.0, &refs);
}

#[test]
fn ticking_second_hand_minute_rollover() {
    // 57 s, 58 s, 59 s, 0 s: one 6° tick per 50 samples.
    let refs: Vec<f64> = (0..200).map(|n| 342.0 + 6.0 * (n / 50) as f64).collect();
    assert_wrap_invisible(HandKind::Second, Preset::Stepping, 342.0, 0.0, &refs);
}

#[test]
fn parked_second_hand_release() {
    // Held at 360 during the pause, then restarting from 0.
    let mut refs = vec![360.0; 100];
    refs.extend((1..=100).map(|n| 360.0 + 0.124 * n as f64));
    assert_wrap_invisible(HandKind::Second, Preset::Continuous, 359.0, 0.0, &refs);
}

#[test]
fn backward_crossing_is_continuous() {
    let refs: Vec<f64> = (1..=200).map(|n| 10.0 - 0.2 * n as f64).collect();
    assert_wrap_invisible(HandKind::Minute, Preset::Continuous, 10.0, -10.0, &refs);
}

#[test]
fn hour_hand_midnight_drops_two_turns() {
    let params = *ClockConfig::preset(Preset::Continuous).hands.get(HandKind::Hour);
    let mut sim = simulator(HandKind::Hour, params);
    sim.initialize(719.5, 0.0);
    for _ in 0..200 {
        sim.step(719.5).unwrap();
    }
    let y = sim.step(0.25).unwrap();
    assert!(angle_diff(y, 0.25).abs() < 1.0, "y={y}");
    assert!(y < 360.0, "state should have dropped two turns, y={y}");
}

#[test]
fn wrap_threshold_is_strict() {
    let fresh = || {
        let mut s = simulator(HandKind::Second, second_params());
        s.initialize(0.0, 0.0);
        s
    };

    // 181° forward is read as 179° backward.
    let over = fresh().step(181.0).unwrap();
    let back = fresh().step(-179.0).unwrap();
    assert!(angle_diff(over, back).abs() < 1e-9);

    // Exactly 180° is taken at face value.
    let half = fresh().step(180.0).unwrap();
    let minus_half = fresh().step(-180.0).unwrap();
    assert!(half > 0.0 && minus_half < 0.0);
    assert!((half + minus_half).abs() < 1e-9);
}
