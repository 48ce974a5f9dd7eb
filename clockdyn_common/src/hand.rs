//! Hand identities and physical parameters.
//!
//! Each hand is modelled as a mass-spring-damper whose generalized
//! coordinate is the hand angle in degrees.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::consts::HAND_COUNT;

/// One of the three clock hands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandKind {
    /// Second hand.
    Second,
    /// Minute hand.
    Minute,
    /// Hour hand.
    Hour,
}

impl HandKind {
    /// All hands in stepping order.
    pub const ALL: [HandKind; HAND_COUNT] = [HandKind::Second, HandKind::Minute, HandKind::Hour];

    /// Position of this hand in per-hand arrays.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Self::Second => 0,
            Self::Minute => 1,
            Self::Hour => 2,
        }
    }

    /// Human-readable label used in logs.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Second => "second hand",
            Self::Minute => "minute hand",
            Self::Hour => "hour hand",
        }
    }
}

impl fmt::Display for HandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Physical parameters of one hand.
///
/// Units are only required to be self-consistent: degrees play the role
/// of metres, so `mass` [kg], `damping` [N·s/m], `stiffness` [N/m].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OscillatorParameters {
    /// Mass `M` (> 0).
    pub mass: f64,
    /// Viscous coefficient `c` (>= 0).
    pub damping: f64,
    /// Stiffness `k` (> 0).
    pub stiffness: f64,
}

impl OscillatorParameters {
    /// Create a parameter set.
    pub const fn new(mass: f64, damping: f64, stiffness: f64) -> Self {
        Self {
            mass,
            damping,
            stiffness,
        }
    }

    /// Squared natural frequency `ω0² = k / M` [1/s²].
    #[inline]
    pub fn omega0_squared(&self) -> f64 {
        self.stiffness / self.mass
    }

    /// Damping rate `λ = c / (2M)` [1/s].
    #[inline]
    pub fn damping_rate(&self) -> f64 {
        self.damping / (2.0 * self.mass)
    }

    /// Free-mode frequency without damping `f = ω0 / 2π` [Hz].
    #[inline]
    pub fn free_frequency(&self) -> f64 {
        self.omega0_squared().sqrt() / (2.0 * std::f64::consts::PI)
    }

    /// Check the physical bounds.
    ///
    /// Returns the name and value of the first offending field.
    pub fn check(&self) -> Result<(), (&'static str, f64)> {
        if !(self.mass.is_finite() && self.mass > 0.0) {
            return Err(("mass", self.mass));
        }
        if !(self.damping.is_finite() && self.damping >= 0.0) {
            return Err(("damping", self.damping));
        }
        if !(self.stiffness.is_finite() && self.stiffness > 0.0) {
            return Err(("stiffness", self.stiffness));
        }
        Ok(())
    }
}

/// Per-hand container indexed by [`HandKind`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerHand<T> {
    /// Second hand value.
    pub second: T,
    /// Minute hand value.
    pub minute: T,
    /// Hour hand value.
    pub hour: T,
}

impl<T> PerHand<T> {
    /// Build from a closure evaluated once per hand in stepping order.
    pub fn from_fn(mut f: impl FnMut(HandKind) -> T) -> Self {
        Self {
            second: f(HandKind::Second),
            minute: f(HandKind::Minute),
            hour: f(HandKind::Hour),
        }
    }

    /// Borrow the value for one hand.
    #[inline]
    pub fn get(&self, hand: HandKind) -> &T {
        match hand {
            HandKind::Second => &self.second,
            HandKind::Minute => &self.minute,
            HandKind::Hour => &self.hour,
        }
    }

    /// Mutably borrow the value for one hand.
    #[inline]
    pub fn get_mut(&mut self, hand: HandKind) -> &mut T {
        match hand {
            HandKind::Second => &mut self.second,
            HandKind::Minute => &mut self.minute,
            HandKind::Hour => &mut self.hour,
        }
    }

    /// Iterate `(hand, value)` pairs in stepping order.
    pub fn iter(&self) -> impl Iterator<Item = (HandKind, &T)> {
        HandKind::ALL.into_iter().map(move |h| (h, self.get(h)))
    }
}
