//! Oscillator model builder.
//!
//! Derives, once per hand, the continuous state-space model of a
//! mass-spring-damper driven through its spring/damper anchor by the
//! reference angle `r` and directly by a perturbation force `F`:
//!
//! ```text
//! M·x'' + c·x' + k·x = c·r' + k·r + F
//! ```
//!
//! The state is `[x, x' − 2λ·r]` (λ = c/2M, ω0² = k/M), which removes the
//! `r'` term from the input and gives:
//!
//! ```text
//! A = [[0, 1], [-ω0², -2λ]]      B = [[2λ, 0], [ω0² − 4λ², 1/M]]
//! C = [1, 0]                     D = [0, 0]
//! ```
//!
//! Discretization uses the bilinear (Tustin) transform with the fixed
//! sampling period `T`, in the warped-state form:
//!
//! ```text
//! P  = I − A·T/2
//! Ad = P⁻¹·(I + A·T/2)    Bd = P⁻¹·B·T
//! Cd = C·P⁻¹              Dd = Cd·B·T/2 + D
//! ```
//!
//! A 360° shift of both `x` and `r` moves the warped state by exactly
//! `[1, −2λ]·360`, which is what the simulator adds on a dial wrap.

use clockdyn_common::hand::{HandKind, OscillatorParameters};
use tracing::{debug, info};

use crate::error::ModelError;
use crate::linalg::{Mat2, Row2, Vec2};

/// Continuous-time state-space matrices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContinuousModel {
    /// State matrix (2×2).
    pub a: Mat2,
    /// Input matrix (2×2; inputs are reference angle and force).
    pub b: Mat2,
    /// Output matrix (1×2).
    pub c: Row2,
    /// Feed-through matrix (1×2).
    pub d: Row2,
}

/// Discrete-time state-space matrices in warped-state form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiscreteModel {
    /// State transition (2×2).
    pub ad: Mat2,
    /// Input matrix (2×2).
    pub bd: Mat2,
    /// Output matrix (1×2).
    pub cd: Row2,
    /// Feed-through matrix (1×2).
    pub dd: Row2,
    /// Warped-state patch per degree of reference wrap (2×1).
    pub mod_corr: Vec2,
}

/// Immutable per-hand model: parameters, continuous and discrete matrices.
#[derive(Debug, Clone, PartialEq)]
pub struct OscillatorModel {
    hand: HandKind,
    params: OscillatorParameters,
    sampling_period: f64,
    lambda: f64,
    free_frequency: f64,
    continuous: ContinuousModel,
    discrete: DiscreteModel,
    trans_mat: Mat2,
    dynamics_enabled: bool,
}

impl OscillatorModel {
    /// Build the continuous and discrete models of one hand.
    ///
    /// With `enable_dynamics == false` the discrete output is overridden to
    /// `Cd = [0, 0]`, `Dd = [1, 0]` after the normal discretization, so the
    /// hand follows its reference exactly while the continuous model stays
    /// available for diagnostics.
    ///
    /// # Errors
    /// - [`ModelError::InvalidParameter`] if `M <= 0`, `k <= 0`, `c < 0`,
    ///   `T <= 0` or any of them is not finite.
    /// - [`ModelError::SingularTransform`] if `I − A·T/2` is not invertible.
    pub fn build(
        hand: HandKind,
        params: OscillatorParameters,
        sampling_period: f64,
        enable_dynamics: bool,
    ) -> Result<Self, ModelError> {
        params
            .check()
            .map_err(|(name, value)| ModelError::InvalidParameter { hand, name, value })?;
        if !(sampling_period.is_finite() && sampling_period > 0.0) {
            return Err(ModelError::InvalidParameter {
                hand,
                name: "sampling_period",
                value: sampling_period,
            });
        }

        let omega0_2 = params.omega0_squared();
        let lambda = params.damping_rate();
        let free_frequency = params.free_frequency();

        let continuous = ContinuousModel {
            a: Mat2::new([0.0, 1.0], [-omega0_2, -2.0 * lambda]),
            b: Mat2::new(
                [2.0 * lambda, 0.0],
                [omega0_2 - 4.0 * lambda * lambda, 1.0 / params.mass],
            ),
            c: Row2::new(1.0, 0.0),
            d: Row2::new(0.0, 0.0),
        };

        let half_t = sampling_period / 2.0;
        let a_half = continuous.a.scale(half_t);
        let trans_mat = Mat2::IDENTITY - a_half;
        let trans_inv = trans_mat
            .inverse()
            .ok_or(ModelError::SingularTransform { hand })?;

        let ad = trans_inv * (Mat2::IDENTITY + a_half);
        let bd = trans_inv * continuous.b.scale(sampling_period);
        let mut cd = continuous.c * trans_inv;
        let mut dd = cd * continuous.b.scale(half_t) + continuous.d;
        if !enable_dynamics {
            cd = Row2::new(0.0, 0.0);
            dd = Row2::new(1.0, 0.0);
        }

        let discrete = DiscreteModel {
            ad,
            bd,
            cd,
            dd,
            mod_corr: Vec2::new(1.0, -2.0 * lambda),
        };

        if enable_dynamics {
            info!(
                "Eigen frequency of the {}: {:.6} Hz (lambda={:.4} 1/s)",
                hand, free_frequency, lambda
            );
        } else {
            debug!("{}: dynamic simulation disabled, output follows reference", hand);
        }

        Ok(Self {
            hand,
            params,
            sampling_period,
            lambda,
            free_frequency,
            continuous,
            discrete,
            trans_mat,
            dynamics_enabled: enable_dynamics,
        })
    }

    /// Hand this model belongs to.
    #[inline]
    pub fn hand(&self) -> HandKind {
        self.hand
    }

    /// Physical parameters.
    #[inline]
    pub fn params(&self) -> &OscillatorParameters {
        &self.params
    }

    /// Sampling period `T` [s].
    #[inline]
    pub fn sampling_period(&self) -> f64 {
        self.sampling_period
    }

    /// Damping rate `λ = c/2M` [1/s].
    #[inline]
    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    /// Free-mode frequency `f = ω0/2π` [Hz] (informational).
    #[inline]
    pub fn free_frequency(&self) -> f64 {
        self.free_frequency
    }

    /// Continuous-time matrices.
    #[inline]
    pub fn continuous(&self) -> &ContinuousModel {
        &self.continuous
    }

    /// Discrete-time matrices.
    #[inline]
    pub fn discrete(&self) -> &DiscreteModel {
        &self.discrete
    }

    /// `P = I − A·T/2`, mapping physical state to warped state.
    #[inline]
    pub fn trans_mat(&self) -> &Mat2 {
        &self.trans_mat
    }

    /// Whether spring-damper dynamics shape the output.
    #[inline]
    pub fn dynamics_enabled(&self) -> bool {
        self.dynamics_enabled
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
