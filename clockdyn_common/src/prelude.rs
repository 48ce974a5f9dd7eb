//! Prelude module for common re-exports.
//!
//! ```rust
//! use clockdyn_common::prelude::*;
//! ```

// ─── Logging ────────────────────────────────────────────────────────
pub use crate::config::LogLevel;

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::clock::{ClockConfig, Preset};
pub use crate::config::{ConfigError, ConfigLoader, SharedConfig};

// ─── Hands ──────────────────────────────────────────────────────────
pub use crate::hand::{HandKind, OscillatorParameters, PerHand};

// ─── System Constants ───────────────────────────────────────────────
pub use crate::consts::{DEFAULT_SAMPLING_PERIOD, FULL_TURN_DEG, HAND_COUNT};
