//! Simulation time model.
//!
//! # Design
//!
//! Virtual time is a monotonically increasing `SimTime` measured in simulated
//! minutes from the start of the run.  The mapping to wall-clock minutes is
//! held in `SimClock`:
//!
//!   wall_minutes = env_start + now
//!
//! where `env_start` is minutes since midnight of the simulated day.  Every
//! logged timestamp uses wall minutes so output lines up with the timetables,
//! which are expressed as minute-of-day.
//!
//! Time is `f64` rather than an integer tick: service and walk durations are
//! sampled from continuous distributions and fractions of a minute matter
//! (loading 7 people at 0.1 min each takes 0.7 min).  Determinism is not
//! affected — the event queue orders equal times by insertion sequence, never
//! by float identity tricks.

use std::fmt;

// ── SimTime ───────────────────────────────────────────────────────────────────

/// A point in virtual time, in minutes since the start of the run.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(pub f64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0.0);

    #[inline]
    pub fn minutes(self) -> f64 {
        self.0
    }

    /// The time `delta` minutes after `self`.
    #[inline]
    pub fn offset(self, delta: f64) -> SimTime {
        SimTime(self.0 + delta)
    }

    /// Total order for heap keys and comparisons; IEEE `total_cmp` so the
    /// event queue never sees an incomparable pair.
    #[inline]
    pub fn total_cmp(&self, other: &SimTime) -> std::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl std::ops::Add<f64> for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, rhs: f64) -> SimTime {
        SimTime(self.0 + rhs)
    }
}

impl std::ops::Sub for SimTime {
    type Output = f64;
    #[inline]
    fn sub(self, rhs: SimTime) -> f64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}m", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Converts between virtual run time and wall minute-of-day.
///
/// `SimClock` is cheap to copy and intentionally holds no heap data.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Minutes since midnight at which the simulated window opens.
    pub env_start: u32,
    /// Current virtual time — advanced by the engine to each popped wake-up.
    pub now: SimTime,
}

impl SimClock {
    pub fn new(env_start: u32) -> Self {
        Self { env_start, now: SimTime::ZERO }
    }

    /// Jump the clock forward to `at`.
    ///
    /// # Panics
    /// Panics in debug mode if `at` is earlier than the current time — the
    /// event queue must never hand out a wake-up from the past.
    #[inline]
    pub fn advance_to(&mut self, at: SimTime) {
        debug_assert!(at.0 >= self.now.0, "clock moved backwards: {} -> {}", self.now, at);
        self.now = at;
    }

    /// Wall-clock minutes since midnight for the current virtual time.
    #[inline]
    pub fn wall(&self) -> f64 {
        self.env_start as f64 + self.now.0
    }

    /// Wall-clock minutes for an arbitrary virtual time.
    #[inline]
    pub fn wall_at(&self, at: SimTime) -> f64 {
        self.env_start as f64 + at.0
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let wall = self.wall();
        let h = (wall / 60.0) as u32 % 24;
        let m = wall % 60.0;
        write!(f, "{} ({h:02}:{m:04.1})", self.now)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// Typically deserialized alongside the scenario spec by the application and
/// passed to the engine builder.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Minutes since midnight at which the window opens (e.g. 420 = 07:00).
    pub env_start: u32,

    /// Minutes of virtual time to simulate.  Events scheduled past this
    /// horizon never run; open wait intervals are closed at the horizon
    /// during output aggregation.
    pub horizon: f64,

    /// Master RNG seed.  The same seed and input always produce identical
    /// station and vehicle logs.
    pub seed: u64,

    /// Treat timetable anomalies (zero/negative travel deltas) as fatal
    /// instead of clamping them to one minute.
    pub strict_timetables: bool,

    /// Minutes to load or deload one person on a bus.
    pub bus_minutes_per_person: f64,

    /// Minutes to load or deload one person on a train.
    pub train_minutes_per_person: f64,

    /// Fixed queue-up delay before a group starts walking a leg.
    pub walk_embark_delay: f64,

    /// Bay count for stations whose spec does not override it.
    pub default_bays: u32,
}

impl SimConfig {
    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.env_start)
    }

    /// Wall minute-of-day at which the run ends.
    #[inline]
    pub fn horizon_wall(&self) -> f64 {
        self.env_start as f64 + self.horizon
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            env_start:                0,
            horizon:                  1_440.0,
            seed:                     0,
            strict_timetables:        false,
            bus_minutes_per_person:   0.1,
            train_minutes_per_person: 0.1,
            walk_embark_delay:        1.0,
            default_bays:             1,
        }
    }
}
