//! Perturbation injection.
//!
//! A click on a hand becomes a one-step force `F = impulse / T` added to
//! that hand's pending force. Contributions before the next step sum
//! linearly (no saturation) and are consumed by that step.
//!
//! [`apply`] is the direct, single-context path. [`PerturbationInbox`] is
//! the cross-thread path: input threads post into a mutex-protected
//! per-hand accumulator, and the driver drains it exactly once per tick.

use std::sync::Arc;

use clockdyn_common::clock::PerturbationConfig;
use clockdyn_common::config::ConfigError;
use clockdyn_common::consts::HAND_COUNT;
use clockdyn_common::hand::{HandKind, PerHand};
use parking_lot::Mutex;
use tracing::debug;

use crate::simulator::HandSimulator;

/// Impulse magnitude class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Amplitude {
    /// Plain click.
    Low,
    /// Boosted click.
    High,
}

/// Sign of the applied force.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Clockwise push.
    Positive,
    /// Counter-clockwise push.
    Negative,
}

impl Direction {
    /// `+1.0` or `-1.0`.
    #[inline]
    pub const fn sign(self) -> f64 {
        match self {
            Self::Positive => 1.0,
            Self::Negative => -1.0,
        }
    }
}

/// Force magnitudes applied during one sampling period.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerturbationLevels {
    low: f64,
    high: f64,
}

impl PerturbationLevels {
    /// Build from force magnitudes (`0 <= low < high`).
    ///
    /// # Errors
    /// `ConfigError::ValidationError` when the ordering or sign is violated.
    pub fn new(low: f64, high: f64) -> Result<Self, ConfigError> {
        if !(low.is_finite() && high.is_finite() && low >= 0.0 && high > low) {
            return Err(ConfigError::ValidationError(format!(
                "perturbation levels must satisfy 0 <= low < high (low={low}, high={high})"
            )));
        }
        Ok(Self { low, high })
    }

    /// Convert impulse magnitudes to one-step forces (`F = impulse / T`).
    pub fn from_config(cfg: &PerturbationConfig, sampling_period: f64) -> Result<Self, ConfigError> {
        if !(sampling_period.is_finite() && sampling_period > 0.0) {
            return Err(ConfigError::ValidationError(format!(
                "sampling_period {sampling_period} must be > 0"
            )));
        }
        Self::new(
            cfg.impulse_low / sampling_period,
            cfg.impulse_high / sampling_period,
        )
    }

    /// Magnitude of one class.
    #[inline]
    pub fn magnitude(&self, amplitude: Amplitude) -> f64 {
        match amplitude {
            Amplitude::Low => self.low,
            Amplitude::High => self.high,
        }
    }

    /// Signed force for one click.
    #[inline]
    pub fn force(&self, amplitude: Amplitude, direction: Direction) -> f64 {
        direction.sign() * self.magnitude(amplitude)
    }
}

/// Add one click's force to a simulator's pending force.
#[inline]
pub fn apply(
    sim: &mut HandSimulator,
    levels: &PerturbationLevels,
    amplitude: Amplitude,
    direction: Direction,
) {
    let force = levels.force(amplitude, direction);
    sim.add_force(force);
    debug!("{}: perturbation {:+.3} queued", sim.hand(), force);
}

/// Thread-safe per-hand force accumulator shared by input producers and
/// the step driver. Cloning shares the same accumulator.
#[derive(Debug, Clone)]
pub struct PerturbationInbox {
    levels: PerturbationLevels,
    pending: Arc<Mutex<[f64; HAND_COUNT]>>,
}

impl PerturbationInbox {
    /// Create an empty inbox.
    pub fn new(levels: PerturbationLevels) -> Self {
        Self {
            levels,
            pending: Arc::new(Mutex::new([0.0; HAND_COUNT])),
        }
    }

    /// Levels used to convert posted clicks into forces.
    #[inline]
    pub fn levels(&self) -> &PerturbationLevels {
        &self.levels
    }

    /// Queue one click for `hand`.
    pub fn post(&self, hand: HandKind, amplitude: Amplitude, direction: Direction) {
        let force = self.levels.force(amplitude, direction);
        self.pending.lock()[hand.index()] += force;
        debug!("{hand}: perturbation {force:+.3} posted");
    }

    /// Take and clear the accumulated forces.
    pub fn take(&self) -> PerHand<f64> {
        let drained = std::mem::take(&mut *self.pending.lock());
        PerHand::from_fn(|h| drained[h.index()])
    }

    /// Move every pending force into the matching simulator.
    pub fn drain_into(&self, sims: &mut PerHand<HandSimulator>) {
        for (hand, force) in self.take().iter() {
            if *force != 0.0 {
                sims.get_mut(hand).add_force(*force);
            }
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
