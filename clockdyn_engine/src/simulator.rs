//! Discrete hand simulator.
//!
//! Owns the warped state `Z` of one hand and advances it once per sampling
//! period from the current reference angle and the perturbation force
//! accumulated since the previous step.
//!
//! ```text
//! Δ = θ − θ_prev;  |Δ| > 180  ⇒  Z += ModCorr · round(Δ/360)·360
//! y = Cd·Z + Dd·[θ, F]
//! Z = Ad·Z + Bd·[θ, F]
//! F = 0
//! ```
//!
//! The wrap patch keeps the internal trajectory continuous when the
//! reference crosses 0°/360°: the simulated hand shifts by the same whole
//! turns as its reference and no visible snap is produced.

use clockdyn_common::consts::{FULL_TURN_DEG, WRAP_DETECT_DEG};
use clockdyn_common::hand::HandKind;
use tracing::{debug, trace};

use crate::error::SimulationError;
use crate::linalg::Vec2;
use crate::model::OscillatorModel;

/// Lifecycle of a simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimPhase {
    /// Created, `initialize` not yet called; `step` is rejected.
    Uninitialized,
    /// Ready for repeated stepping.
    Running,
}

/// Mutable simulation state of one hand.
#[derive(Debug, Clone)]
pub struct HandSimulator {
    model: OscillatorModel,
    phase: SimPhase,
    /// Latest reference angle [deg].
    ref_angle: f64,
    /// Reference angle of the previous step [deg].
    ref_angle_prev: f64,
    /// Force accumulated for the upcoming step.
    pert_force: f64,
    /// Warped integrator state.
    z: Vec2,
    /// Last output angle [deg].
    real_angle: f64,
    /// Steps performed since the last initialization.
    steps: u64,
}

impl HandSimulator {
    /// Wrap a built model. The simulator must be initialized before stepping.
    pub fn new(model: OscillatorModel) -> Self {
        Self {
            model,
            phase: SimPhase::Uninitialized,
            ref_angle: 0.0,
            ref_angle_prev: 0.0,
            pert_force: 0.0,
            z: Vec2::ZERO,
            real_angle: 0.0,
            steps: 0,
        }
    }

    /// Seed the state from an initial reference angle and angular speed.
    ///
    /// `X = [θ0, v0 − 2λ·θ0]`, `Z = P·X − B·(T/2)·[θ0, 0]`.
    ///
    /// A second hand whose reference is parked at exactly 360° (pausing at
    /// the top of the dial) starts at rest to avoid a jump right after start.
    /// Any pending perturbation is discarded. Calling this again re-seeds.
    pub fn initialize(&mut self, ref_angle0: f64, initial_speed: f64) {
        let speed = if self.model.hand() == HandKind::Second && ref_angle0 == FULL_TURN_DEG {
            0.0
        } else {
            initial_speed
        };

        let lambda = self.model.lambda();
        let half_t = self.model.sampling_period() / 2.0;
        let x = Vec2::new(ref_angle0, speed - 2.0 * lambda * ref_angle0);
        let u = Vec2::new(ref_angle0, 0.0);

        self.z = *self.model.trans_mat() * x - (self.model.continuous().b * u).scale(half_t);
        self.ref_angle = ref_angle0;
        self.ref_angle_prev = ref_angle0;
        self.pert_force = 0.0;
        self.real_angle = ref_angle0;
        self.steps = 0;
        self.phase = SimPhase::Running;

        debug!(
            "{} initialized at {:.3} deg, speed {:.4} deg/s",
            self.model.hand(),
            ref_angle0,
            speed
        );
    }

    /// Accumulate a perturbation force for the next step.
    ///
    /// Contributions sum linearly and are consumed by the next [`step`](Self::step).
    #[inline]
    pub fn add_force(&mut self, force: f64) {
        self.pert_force += force;
    }

    /// Advance one sampling period with reference angle `ref_angle` [deg].
    ///
    /// Returns the simulated (real) angle, unbounded and clockwise-positive.
    ///
    /// # Errors
    /// [`SimulationError::NotInitialized`] if called before [`initialize`](Self::initialize).
    pub fn step(&mut self, ref_angle: f64) -> Result<f64, SimulationError> {
        if self.phase != SimPhase::Running {
            return Err(SimulationError::NotInitialized {
                hand: self.model.hand(),
            });
        }

        let dm = *self.model.discrete();

        let delta = ref_angle - self.ref_angle_prev;
        if delta.abs() > WRAP_DETECT_DEG {
            let turns = (delta / FULL_TURN_DEG).round();
            self.z += dm.mod_corr.scale(turns * FULL_TURN_DEG);
            debug!(
                "{}: reference wrapped by {:.3} deg, state shifted {} turn(s)",
                self.model.hand(),
                delta,
                turns
            );
        }
        self.ref_angle = ref_angle;
        self.ref_angle_prev = ref_angle;

        let u = Vec2::new(ref_angle, self.pert_force);
        self.real_angle = dm.cd.dot(self.z) + dm.dd.dot(u);
        self.z = dm.ad * self.z + dm.bd * u;
        self.pert_force = 0.0;
        self.steps += 1;

        trace!(
            "{}: ref={:.4} real={:.4}",
            self.model.hand(),
            ref_angle,
            self.real_angle
        );

        Ok(self.real_angle)
    }

    /// Hand simulated by this instance.
    #[inline]
    pub fn hand(&self) -> HandKind {
        self.model.hand()
    }

    /// Underlying model.
    #[inline]
    pub fn model(&self) -> &OscillatorModel {
        &self.model
    }

    /// Current lifecycle phase.
    #[inline]
    pub fn phase(&self) -> SimPhase {
        self.phase
    }

    /// Last output angle [deg].
    #[inline]
    pub fn real_angle(&self) -> f64 {
        self.real_angle
    }

    /// Latest reference angle [deg].
    #[inline]
    pub fn ref_angle(&self) -> f64 {
        self.ref_angle
    }

    /// Force pending for the next step.
    #[inline]
    pub fn pending_force(&self) -> f64 {
        self.pert_force
    }

    /// Warped integrator state `Z`.
    #[inline]
    pub fn warped_state(&self) -> Vec2 {
        self.z
    }

    /// Physical state `X = P⁻¹·(Z + B·(T/2)·[θ, 0])` reconstructed from `Z`
    /// and the latest reference; `None` only if `P` were singular.
    pub fn physical_state(&self) -> Option<Vec2> {
        let half_t = self.model.sampling_period() / 2.0;
        let u = Vec2::new(self.ref_angle, 0.0);
        let p_inv = self.model.trans_mat().inverse()?;
        Some(p_inv * (self.z + (self.model.continuous().b * u).scale(half_t)))
    }

    /// Steps since the last initialization.
    #[inline]
    pub fn steps(&self) -> u64 {
        self.steps
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
