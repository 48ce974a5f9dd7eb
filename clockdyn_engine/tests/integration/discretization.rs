//! Property tests of the Tustin discretization over random valid hands.

use clockdyn_common::hand::{HandKind, OscillatorParameters};
use clockdyn_engine::linalg::{Mat2, Vec2};
use clockdyn_engine::model::OscillatorModel;
use clockdyn_engine::simulator::HandSimulator;
use proptest::prelude::*;

fn hand_params() -> impl Strategy<Value = (OscillatorParameters, f64)> {
    (0.05f64..5.0, 0.01f64..20.0, 0.5f64..2_000.0, 0.001f64..0.1)
        .prop_map(|(m, c, k, t)| (OscillatorParameters::new(m, c, k), t))
}

fn tol(scale: f64) -> f64 {
    1e-9 * (1.0 + scale)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn matrices_satisfy_tustin_identities((params, t) in hand_params()) {
        let model = OscillatorModel::build(HandKind::Minute, params, t, true).unwrap();
        let a = model.continuous().a;
        let b = model.continuous().b;
        let d = model.discrete();
        let p = Mat2::IDENTITY - a.scale(t / 2.0);

        let lhs = p * d.ad;
        let rhs = Mat2::IDENTITY + a.scale(t / 2.0);
        prop_assert!((lhs - rhs).max_abs() <= tol(rhs.max_abs()));

        let lhs = p * d.bd;
        let rhs = b.scale(t);
        prop_assert!((lhs - rhs).max_abs() <= tol(rhs.max_abs()));

        let cp = d.cd * p;
        prop_assert!((cp.0[0] - 1.0).abs() <= tol(1.0) && cp.0[1].abs() <= tol(1.0));

        let dd = d.cd * b.scale(t / 2.0);
        prop_assert!((dd.0[0] - d.dd.0[0]).abs() <= tol(dd.0[0].abs()));
        prop_assert!((dd.0[1] - d.dd.0[1]).abs() <= tol(dd.0[1].abs()));
    }

    #[test]
    fn damped_hands_are_stable((params, t) in hand_params()) {
        let model = OscillatorModel::build(HandKind::Hour, params, t, true).unwrap();
        let ad = model.discrete().ad;
        let det = ad.det();
        let tr = ad.0[0][0] + ad.0[1][1];
        prop_assert!(det.abs() < 1.0, "det={det}");
        prop_assert!(tr.abs() < 1.0 + det, "tr={tr} det={det}");
    }

    #[test]
    fn one_step_is_exactly_linear(
        (params, t) in hand_params(),
        theta0 in -100.0f64..100.0,
        v0 in -50.0f64..50.0,
        jump in -150.0f64..150.0,
        force in -1_000.0f64..1_000.0,
    ) {
        // Jumps stay below the wrap threshold so no turn correction applies.
        let reference = theta0 + jump;
        let model = OscillatorModel::build(HandKind::Second, params, t, true).unwrap();
        let d = *model.discrete();
        let mut sim = HandSimulator::new(model);
        sim.initialize(theta0, v0);
        sim.add_force(force);

        let z0 = sim.warped_state();
        let u = Vec2::new(reference, force);
        let y = sim.step(reference).unwrap();

        let expected_y = d.cd.dot(z0) + d.dd.dot(u);
        let expected_z = d.ad * z0 + d.bd * u;
        prop_assert!((y - expected_y).abs() <= tol(expected_y.abs()));
        prop_assert!((sim.warped_state() - expected_z).max_abs() <= tol(expected_z.max_abs()));
    }

    #[test]
    fn whole_turn_jump_moves_output_one_turn(
        (params, t) in hand_params(),
        theta0 in 0.0f64..360.0,
        jump in -150.0f64..150.0,
    ) {
        let model = OscillatorModel::build(HandKind::Second, params, t, true).unwrap();
        let mut plain = HandSimulator::new(model.clone());
        let mut shifted = HandSimulator::new(model);
        plain.initialize(theta0, 0.0);
        shifted.initialize(theta0, 0.0);

        let y_plain = plain.step(theta0 + jump).unwrap();
        let y_shifted = shifted.step(theta0 + jump + 360.0).unwrap();
        // The wrap patch lands the state one turn up, in the reference's frame.
        prop_assert!(
            (y_shifted - 360.0 - y_plain).abs() <= tol(360.0 + y_plain.abs()),
            "{y_plain} vs {y_shifted}"
        );
    }

    #[test]
    fn initialization_reconstructs_physical_state(
        (params, t) in hand_params(),
        theta0 in -360.0f64..360.0,
        v0 in -50.0f64..50.0,
    ) {
        let model = OscillatorModel::build(HandKind::Minute, params, t, true).unwrap();
        let lambda = model.lambda();
        let mut sim = HandSimulator::new(model);
        sim.initialize(theta0, v0);
        let x = sim.physical_state().unwrap();
        let scale = 1.0 + theta0.abs() * (1.0 + lambda) + v0.abs();
        prop_assert!((x.0[0] - theta0).abs() <= 1e-8 * scale);
        prop_assert!((x.0[1] - (v0 - 2.0 * lambda * theta0)).abs() <= 1e-8 * scale);
    }
}
