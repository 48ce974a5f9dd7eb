//! Step driver: sample → perturb → step → render, once per period.
//!
//! All three hands are stepped with angles taken from a single reference
//! sample, so there is no per-hand time skew. Perturbations posted to the
//! inbox from other threads are drained exactly once per tick, before the
//! step that consumes them.
//!
//! ## Pacing
//! Tick deadlines are `start + n·T`; sleeping targets the next deadline so
//! timing error does not accumulate. After a long stall the schedule is
//! re-anchored instead of bursting to catch up.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use clockdyn_common::clock::ClockConfig;
use clockdyn_common::hand::{HandKind, PerHand};
use tracing::{debug, info, warn};

use crate::error::DriverError;
use crate::model::OscillatorModel;
use crate::perturbation::{self, Amplitude, Direction, PerturbationInbox, PerturbationLevels};
use crate::reference::ReferenceSource;
use crate::render::{HandFrame, HandRenderer};
use crate::simulator::HandSimulator;

// ─── Tick Statistics ────────────────────────────────────────────────

/// O(1) per-tick timing statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickStats {
    /// Ticks executed.
    pub tick_count: u64,
    /// Last tick duration.
    pub last: Duration,
    /// Shortest tick duration.
    pub min: Duration,
    /// Longest tick duration.
    pub max: Duration,
    /// Running sum for the average.
    pub sum: Duration,
    /// Ticks whose body took longer than the period.
    pub overruns: u64,
    /// Worst wake-up delay past the scheduled deadline.
    pub max_latency: Duration,
}

impl TickStats {
    /// Zeroed statistics.
    pub const fn new() -> Self {
        Self {
            tick_count: 0,
            last: Duration::ZERO,
            min: Duration::MAX,
            max: Duration::ZERO,
            sum: Duration::ZERO,
            overruns: 0,
            max_latency: Duration::ZERO,
        }
    }

    /// Record one tick.
    #[inline]
    pub fn record(&mut self, duration: Duration, latency: Duration) {
        self.tick_count += 1;
        self.last = duration;
        self.min = self.min.min(duration);
        self.max = self.max.max(duration);
        self.sum += duration;
        self.max_latency = self.max_latency.max(latency);
    }

    /// Average tick duration (zero before the first tick).
    #[inline]
    pub fn avg(&self) -> Duration {
        match u32::try_from(self.tick_count) {
            Ok(0) => Duration::ZERO,
            Ok(n) => self.sum / n,
            Err(_) => Duration::from_secs_f64(self.sum.as_secs_f64() / self.tick_count as f64),
        }
    }
}

impl Default for TickStats {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Clock Driver ───────────────────────────────────────────────────

/// Owns the three hand simulators and drives them at the sampling period.
pub struct ClockDriver<S, R> {
    sims: PerHand<HandSimulator>,
    source: S,
    renderer: R,
    levels: PerturbationLevels,
    inbox: PerturbationInbox,
    period: Duration,
    ticks: u64,
    stats: TickStats,
}

impl<S: ReferenceSource, R: HandRenderer> ClockDriver<S, R> {
    /// Validate `config`, build every hand model and seed each simulator
    /// from one reference sample and the source's initial speeds.
    ///
    /// # Errors
    /// - [`DriverError::Config`] if the configuration is invalid.
    /// - [`DriverError::Model`] if a hand model cannot be built.
    pub fn new(config: &ClockConfig, mut source: S, renderer: R) -> Result<Self, DriverError> {
        config.validate()?;

        let t = config.simulation.sampling_period;
        let dynamics = config.simulation.enable_dynamics;
        let build = |hand: HandKind| -> Result<HandSimulator, DriverError> {
            let model = OscillatorModel::build(hand, *config.hands.get(hand), t, dynamics)?;
            Ok(HandSimulator::new(model))
        };
        let mut sims = PerHand {
            second: build(HandKind::Second)?,
            minute: build(HandKind::Minute)?,
            hour: build(HandKind::Hour)?,
        };

        let levels = PerturbationLevels::from_config(&config.perturbation, t)?;

        let initial = source.sample();
        let speeds = source.initial_speeds();
        for hand in HandKind::ALL {
            sims.get_mut(hand)
                .initialize(*initial.get(hand), *speeds.get(hand));
        }
        debug!(
            "Hands initialized at sec={:.3} min={:.3} hour={:.3}",
            initial.second, initial.minute, initial.hour
        );

        Ok(Self {
            sims,
            source,
            renderer,
            levels,
            inbox: PerturbationInbox::new(levels),
            period: config.sampling_period(),
            ticks: 0,
            stats: TickStats::new(),
        })
    }

    /// Shared inbox for perturbations arriving from other threads.
    pub fn inbox(&self) -> &PerturbationInbox {
        &self.inbox
    }

    /// True when a perturbation can move the rendered hands.
    ///
    /// Pass-through hands (dynamics disabled) ignore forces.
    pub fn accepts_perturbations(&self) -> bool {
        self.sims.iter().all(|(_, sim)| sim.model().dynamics_enabled())
    }

    /// Apply a perturbation directly from the driving thread.
    pub fn perturb(&mut self, hand: HandKind, amplitude: Amplitude, direction: Direction) {
        perturbation::apply(self.sims.get_mut(hand), &self.levels, amplitude, direction);
    }

    /// Execute one tick and return the rendered frame.
    ///
    /// # Errors
    /// [`DriverError::Simulation`] or [`DriverError::Render`].
    pub fn tick(&mut self) -> Result<HandFrame, DriverError> {
        let angles = self.source.sample();
        self.inbox.drain_into(&mut self.sims);

        let second = self.sims.second.step(angles.second)?;
        let minute = self.sims.minute.step(angles.minute)?;
        let hour = self.sims.hour.step(angles.hour)?;

        self.ticks += 1;
        let frame = HandFrame {
            tick: self.ticks,
            second,
            minute,
            hour,
        };
        self.renderer.render(&frame)?;
        Ok(frame)
    }

    /// Tick at the sampling period until `running` is cleared or
    /// `max_ticks` ticks have run in total.
    ///
    /// Overruns are counted and logged, never fatal.
    pub fn run(&mut self, running: &AtomicBool, max_ticks: Option<u64>) -> Result<TickStats, DriverError> {
        info!(
            "Step driver started (T = {:.1} ms)",
            self.period.as_secs_f64() * 1e3
        );

        let mut deadline = Instant::now();
        while running.load(Ordering::SeqCst) && max_ticks.is_none_or(|max| self.ticks < max) {
            let tick_start = Instant::now();
            let latency = tick_start.saturating_duration_since(deadline);

            self.tick()?;

            let elapsed = tick_start.elapsed();
            self.stats.record(elapsed, latency);
            if elapsed > self.period {
                self.stats.overruns += 1;
                warn!(
                    "Tick {} overran: {:?} > {:?}",
                    self.ticks, elapsed, self.period
                );
            }

            deadline += self.period;
            let now = Instant::now();
            if let Some(remaining) = deadline.checked_duration_since(now) {
                std::thread::sleep(remaining);
            } else if now.duration_since(deadline) > self.period {
                deadline = now;
            }
        }

        self.renderer.finish()?;
        info!(
            "Step driver stopped after {} ticks (avg {:?}, max {:?}, overruns {})",
            self.stats.tick_count,
            self.stats.avg(),
            self.stats.max,
            self.stats.overruns
        );
        Ok(self.stats.clone())
    }

    /// Simulator of one hand.
    pub fn simulator(&self, hand: HandKind) -> &HandSimulator {
        self.sims.get(hand)
    }

    /// Ticks executed so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Timing statistics of [`run`](Self::run).
    pub fn stats(&self) -> &TickStats {
        &self.stats
    }

    /// Configured sampling period.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Borrow the renderer.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Consume the driver, returning its renderer.
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
