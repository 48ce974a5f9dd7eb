//! Clock configuration (one file per clock face).
//!
//! Optional sections use `#[serde(default)]`; a missing section falls back to
//! the continuous preset so a minimal file only needs what it overrides.
//!
//! # TOML Example
//!
//! ```toml
//! [simulation]
//! sampling_period = 0.02
//! enable_dynamics = true
//!
//! [motion]
//! continuous_second_hand = true
//! continuous_minute_hand = false
//! second_hand_pause = 2.0
//!
//! [perturbation]
//! impulse_low = 12.5
//! impulse_high = 37.5
//!
//! [hands.second]
//! mass = 0.1
//! damping = 0.3
//! stiffness = 8.0
//! ```

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::{ConfigError, SharedConfig};
use crate::consts::{DEFAULT_SAMPLING_PERIOD, DEFAULT_SECOND_HAND_PAUSE};
use crate::hand::{HandKind, OscillatorParameters};

// ─── Presets ────────────────────────────────────────────────────────

/// Built-in clock face tunings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Sweeping second hand with a short pause at the top, stepping minutes.
    #[default]
    Continuous,
    /// Ticking second hand, continuous minutes; stiffer hands.
    Stepping,
}

// ─── Sections ───────────────────────────────────────────────────────

/// Sampling and model mode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulationConfig {
    /// Fixed sampling period `T` shared by all hands [s].
    #[serde(default = "default_sampling_period")]
    pub sampling_period: f64,
    /// When false, every hand tracks its reference exactly.
    #[serde(default = "default_true")]
    pub enable_dynamics: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            sampling_period: DEFAULT_SAMPLING_PERIOD,
            enable_dynamics: true,
        }
    }
}

/// Reference-angle granularity.
///
/// Missing fields take the continuous face's values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MotionConfig {
    /// Second hand interpolates milliseconds instead of ticking.
    pub continuous_second_hand: bool,
    /// Minute hand interpolates seconds instead of jumping each minute.
    pub continuous_minute_hand: bool,
    /// Pause of a continuous second hand at 12 o'clock [s]. 0 disables.
    pub second_hand_pause: f64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            continuous_second_hand: true,
            continuous_minute_hand: false,
            second_hand_pause: DEFAULT_SECOND_HAND_PAUSE,
        }
    }
}

impl MotionConfig {
    /// Pause actually in effect (zero unless the second hand sweeps).
    #[inline]
    pub fn effective_pause(&self) -> f64 {
        if self.continuous_second_hand {
            self.second_hand_pause
        } else {
            0.0
        }
    }
}

/// Perturbation impulse magnitudes, independent of the sampling period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PerturbationConfig {
    /// Plain click impulse [kg·m/s].
    pub impulse_low: f64,
    /// Boosted click impulse [kg·m/s].
    pub impulse_high: f64,
}

/// Physical parameters for all three hands.
///
/// A hand table left out keeps the continuous preset's tuning; a table that
/// is present must be complete.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HandsConfig {
    /// Second hand.
    #[serde(default = "default_second_hand")]
    pub second: OscillatorParameters,
    /// Minute hand.
    #[serde(default = "default_minute_hand")]
    pub minute: OscillatorParameters,
    /// Hour hand.
    #[serde(default = "default_hour_hand")]
    pub hour: OscillatorParameters,
}

impl HandsConfig {
    /// Parameters of one hand.
    pub fn get(&self, hand: HandKind) -> &OscillatorParameters {
        match hand {
            HandKind::Second => &self.second,
            HandKind::Minute => &self.minute,
            HandKind::Hour => &self.hour,
        }
    }
}

// ─── Clock Config ───────────────────────────────────────────────────

/// Complete configuration of one animated clock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClockConfig {
    /// Logging and instance naming.
    #[serde(default)]
    pub shared: SharedConfig,
    /// Sampling and model mode.
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Reference granularity.
    #[serde(default)]
    pub motion: MotionConfig,
    /// Click impulses.
    #[serde(default = "default_perturbation")]
    pub perturbation: PerturbationConfig,
    /// Hand physics.
    #[serde(default = "default_hands")]
    pub hands: HandsConfig,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self::preset(Preset::Continuous)
    }
}

impl ClockConfig {
    /// Build one of the built-in tunings.
    pub fn preset(preset: Preset) -> Self {
        match preset {
            Preset::Continuous => Self {
                shared: SharedConfig::default(),
                simulation: SimulationConfig::default(),
                motion: MotionConfig::default(),
                perturbation: PerturbationConfig {
                    impulse_low: 12.5,
                    impulse_high: 37.5,
                },
                hands: HandsConfig {
                    second: OscillatorParameters::new(0.1, 0.3, 8.0),
                    minute: OscillatorParameters::new(0.2, 2.0, 50.0),
                    hour: OscillatorParameters::new(0.3, 3.0, 100.0),
                },
            },
            Preset::Stepping => Self {
                shared: SharedConfig::default(),
                simulation: SimulationConfig::default(),
                motion: MotionConfig {
                    continuous_second_hand: false,
                    continuous_minute_hand: true,
                    second_hand_pause: DEFAULT_SECOND_HAND_PAUSE,
                },
                perturbation: PerturbationConfig {
                    impulse_low: 50.0,
                    impulse_high: 120.0,
                },
                hands: HandsConfig {
                    second: OscillatorParameters::new(0.1, 5.2, 510.0),
                    minute: OscillatorParameters::new(0.2, 12.0, 1040.0),
                    hour: OscillatorParameters::new(0.3, 10.0, 1550.0),
                },
            },
        }
    }

    /// Sampling period as a [`Duration`].
    pub fn sampling_period(&self) -> Duration {
        Duration::from_secs_f64(self.simulation.sampling_period)
    }

    /// Validate all sections.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.shared.validate()?;

        let t = self.simulation.sampling_period;
        if !(t.is_finite() && t > 0.0) {
            return Err(invalid(format!("simulation.sampling_period {t} must be > 0")));
        }
        if t > 1.0 {
            return Err(invalid(format!(
                "simulation.sampling_period {t} exceeds 1 s (one reference unit)"
            )));
        }

        let pause = self.motion.second_hand_pause;
        if !(pause.is_finite() && (0.0..60.0).contains(&pause)) {
            return Err(invalid(format!(
                "motion.second_hand_pause {pause} out of range [0, 60)"
            )));
        }

        let p = &self.perturbation;
        if !(p.impulse_low.is_finite() && p.impulse_low >= 0.0) {
            return Err(invalid(format!(
                "perturbation.impulse_low {} must be >= 0",
                p.impulse_low
            )));
        }
        if !(p.impulse_high.is_finite() && p.impulse_high > p.impulse_low) {
            return Err(invalid(format!(
                "perturbation.impulse_high {} must exceed impulse_low {}",
                p.impulse_high, p.impulse_low
            )));
        }

        for hand in HandKind::ALL {
            if let Err((field, value)) = self.hands.get(hand).check() {
                return Err(invalid(format!(
                    "hands.{}.{field} {value} out of range",
                    hand_key(hand)
                )));
            }
        }

        Ok(())
    }
}

fn invalid(msg: String) -> ConfigError {
    ConfigError::ValidationError(msg)
}

fn hand_key(hand: HandKind) -> &'static str {
    match hand {
        HandKind::Second => "second",
        HandKind::Minute => "minute",
        HandKind::Hour => "hour",
    }
}

fn default_sampling_period() -> f64 {
    DEFAULT_SAMPLING_PERIOD
}

fn default_true() -> bool {
    true
}

fn default_perturbation() -> PerturbationConfig {
    ClockConfig::default().perturbation
}

fn default_hands() -> HandsConfig {
    ClockConfig::default().hands
}

fn default_second_hand() -> OscillatorParameters {
    default_hands().second
}

fn default_minute_hand() -> OscillatorParameters {
    default_hands().minute
}

fn default_hour_hand() -> OscillatorParameters {
    default_hands().hour
}
