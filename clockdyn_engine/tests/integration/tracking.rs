//! Steady-state tracking of a uniformly advancing reference.

use super::{T, second_params, simulator};
use clockdyn_common::clock::{ClockConfig, Preset};
use clockdyn_common::hand::{HandKind, OscillatorParameters};

/// Second hand seeded at 0° and 6°/s, fed `θ = 6·t`: within 0.5° after 50 steps.
#[test]
fn second_hand_tracks_uniform_sweep() {
    let mut sim = simulator(HandKind::Second, second_params());
    sim.initialize(0.0, 6.0);

    let mut last = (0.0, 0.0);
    for n in 1..=50 {
        let reference = 6.0 * n as f64 * T;
        let real = sim.step(reference).unwrap();
        last = (reference, real);
    }
    let (reference, real) = last;
    assert!(
        (real - reference).abs() < 0.5,
        "tracking error {} too large",
        real - reference
    );
}

#[test]
fn tracking_error_stays_bounded_over_a_minute() {
    let mut sim = simulator(HandKind::Second, second_params());
    sim.initialize(0.0, 6.0);

    let mut worst: f64 = 0.0;
    for n in 1..=3_000 {
        let reference = 6.0 * n as f64 * T;
        let real = sim.step(reference).unwrap();
        worst = worst.max((real - reference).abs());
    }
    // The feed is one sample ahead of the state; the lag never grows.
    assert!(worst < 2.0 * 6.0 * T, "worst error {worst}");
}

#[test]
fn every_preset_hand_tracks_its_nominal_speed() {
    for preset in [Preset::Continuous, Preset::Stepping] {
        let cfg = ClockConfig::preset(preset);
        for (hand, speed) in [
            (HandKind::Second, 6.0),
            (HandKind::Minute, 0.1),
            (HandKind::Hour, 1.0 / 120.0),
        ] {
            let params: OscillatorParameters = *cfg.hands.get(hand);
            let mut sim = simulator(hand, params);
            sim.initialize(10.0, speed);
            let mut reference = 10.0;
            for _ in 0..500 {
                reference += speed * T;
                let real = sim.step(reference).unwrap();
                assert!(
                    (real - reference).abs() < 0.5,
                    "{preset:?} {hand}: real={real} ref={reference}"
                );
            }
        }
    }
}
