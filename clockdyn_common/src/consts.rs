//! System-wide constants for the clockdyn workspace.
//!
//! Single source of truth for dial geometry, timing defaults and naming.

use static_assertions::const_assert;

/// Number of simulated hands (second, minute, hour).
pub const HAND_COUNT: usize = 3;

/// One full turn of the dial [deg].
pub const FULL_TURN_DEG: f64 = 360.0;

/// Reference jump above which a step is treated as a dial wrap [deg].
pub const WRAP_DETECT_DEG: f64 = 180.0;

/// Second/minute hand travel per unit (360° / 60) [deg].
pub const DEG_PER_MINOR_UNIT: f64 = 6.0;

/// Hour hand travel per hour (360° / 12) [deg].
pub const DEG_PER_HOUR: f64 = 30.0;

/// Default sampling period [s] (50 Hz).
pub const DEFAULT_SAMPLING_PERIOD: f64 = 0.020;

/// Default pause of a sweeping second hand at the top of the dial [s].
pub const DEFAULT_SECOND_HAND_PAUSE: f64 = 2.0;

/// Default service name reported in logs.
pub const DEFAULT_SERVICE_NAME: &str = "clockdyn";

const_assert!(HAND_COUNT == 3);
const_assert!(DEFAULT_SAMPLING_PERIOD > 0.0);
