//! Reference-angle feed.
//!
//! Maps a wall-clock instant to the angle each hand should point to before
//! dynamics are applied. Seconds and minutes can be discrete (change once
//! per whole unit) or continuous (interpolated with the sub-unit fraction).
//! A continuous second hand also runs slightly fast so that it completes
//! its turn `pause` seconds early and waits at 12 o'clock.

use chrono::{Local, NaiveTime, Timelike};
use clockdyn_common::clock::MotionConfig;
use clockdyn_common::consts::{DEG_PER_HOUR, DEG_PER_MINOR_UNIT, FULL_TURN_DEG};
use clockdyn_common::hand::PerHand;

/// Reference angles of the three hands at one instant [deg].
pub type ReferenceAngles = PerHand<f64>;

/// Broken-down wall-clock time (24 h).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClockTime {
    /// 0..=23
    pub hours: u32,
    /// 0..=59
    pub minutes: u32,
    /// 0..=59
    pub seconds: u32,
    /// 0..=999
    pub millis: u32,
}

impl ClockTime {
    /// Create a time of day.
    pub const fn new(hours: u32, minutes: u32, seconds: u32, millis: u32) -> Self {
        Self {
            hours,
            minutes,
            seconds,
            millis,
        }
    }

    /// Break down any `chrono` time of day. Leap-second nanos clamp to 999 ms.
    pub fn from_timelike<T: Timelike>(t: &T) -> Self {
        Self {
            hours: t.hour(),
            minutes: t.minute(),
            seconds: t.second(),
            millis: (t.nanosecond() / 1_000_000).min(999),
        }
    }
}

impl From<NaiveTime> for ClockTime {
    fn from(t: NaiveTime) -> Self {
        Self::from_timelike(&t)
    }
}

/// Time-to-angle mapping derived from the motion settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceMapping {
    overspeed: f64,
    s_frac: f64,
    m_frac: f64,
    h_frac: f64,
    initial_speeds: PerHand<f64>,
}

impl ReferenceMapping {
    /// Build from a validated motion section.
    pub fn new(motion: &MotionConfig) -> Self {
        let overspeed = 60.0 / (60.0 - motion.effective_pause());
        let both_continuous = motion.continuous_second_hand && motion.continuous_minute_hand;

        // Normal speeds: 360°/60 s, 360°/3600 s, 720°/86400 s.
        let initial_speeds = PerHand {
            second: if motion.continuous_second_hand {
                DEG_PER_MINOR_UNIT * overspeed
            } else {
                0.0
            },
            minute: if both_continuous { 0.1 } else { 0.0 },
            hour: if both_continuous { 1.0 / 120.0 } else { 0.0 },
        };

        Self {
            overspeed,
            s_frac: if motion.continuous_second_hand {
                1.0 / 1000.0
            } else {
                0.0
            },
            m_frac: if motion.continuous_minute_hand {
                1.0 / 60.0
            } else {
                0.0
            },
            h_frac: 1.0 / 60.0,
            initial_speeds,
        }
    }

    /// Second-hand speed-up ratio `60 / (60 − pause)`.
    #[inline]
    pub fn overspeed(&self) -> f64 {
        self.overspeed
    }

    /// Hand speeds used to seed the simulators [deg/s].
    #[inline]
    pub fn initial_speeds(&self) -> &PerHand<f64> {
        &self.initial_speeds
    }

    /// Reference angles at `t`.
    ///
    /// Second in `[0, 360]` (held at 360 during the pause), minute in
    /// `[0, 360)`, hour in `[0, 720)`.
    pub fn angles(&self, t: &ClockTime) -> ReferenceAngles {
        let s_cont = f64::from(t.seconds) + f64::from(t.millis) * self.s_frac;
        let m_cont = f64::from(t.minutes) + s_cont * self.m_frac;
        let h_cont = f64::from(t.hours) + m_cont * self.h_frac;

        PerHand {
            second: (DEG_PER_MINOR_UNIT * s_cont * self.overspeed).min(FULL_TURN_DEG),
            minute: DEG_PER_MINOR_UNIT * m_cont,
            hour: DEG_PER_HOUR * h_cont,
        }
    }
}

/// Supplies one reference sample per tick.
///
/// All three angles come from the same instant.
pub trait ReferenceSource {
    /// Sample the reference angles now.
    fn sample(&mut self) -> ReferenceAngles;

    /// Hand speeds to seed the simulators with [deg/s].
    fn initial_speeds(&self) -> PerHand<f64>;
}

/// Local wall-clock feed.
#[derive(Debug, Clone)]
pub struct WallClockSource {
    mapping: ReferenceMapping,
}

impl WallClockSource {
    /// Create a feed over the local time zone.
    pub fn new(motion: &MotionConfig) -> Self {
        Self {
            mapping: ReferenceMapping::new(motion),
        }
    }

    /// Mapping in use.
    pub fn mapping(&self) -> &ReferenceMapping {
        &self.mapping
    }
}

impl ReferenceSource for WallClockSource {
    fn sample(&mut self) -> ReferenceAngles {
        let now = Local::now();
        self.mapping.angles(&ClockTime::from_timelike(&now))
    }

    fn initial_speeds(&self) -> PerHand<f64> {
        *self.mapping.initial_speeds()
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
