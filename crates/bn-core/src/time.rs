//! Simulation time model.
//!
//! # Design
//!
//! Time is a monotonically increasing `Tick` counter advanced once per
//! unpaused frame by the external clock (30–60 Hz).  There is no wall-clock
//! mapping: every delayed effect is expressed as a tick count, and every
//! periodic rule as a [`Cadence`].

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Ticks elapsed from `earlier` to `self`, saturating at zero.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Tracks the current tick of a running scenario.
///
/// `SimClock` is cheap to copy and intentionally holds no heap data.
#[derive(Clone, Debug, Default)]
pub struct SimClock {
    /// The tick about to be processed, advanced by [`SimClock::advance`].
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new() -> Self {
        Self { current_tick: Tick::ZERO }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    #[inline]
    pub fn reset(&mut self) {
        self.current_tick = Tick::ZERO;
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.current_tick)
    }
}

// ── Cadence ───────────────────────────────────────────────────────────────────

/// A periodic gate: a rule fires on every tick divisible by `period`.
///
/// `period` is never below 1, whatever the inputs.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Cadence {
    period: u64,
}

impl Cadence {
    /// Fires on every tick.
    pub const EVERY_TICK: Cadence = Cadence { period: 1 };

    /// `max(1, base − ⌊rate⌋)`.  A higher rate gives a shorter period.
    ///
    /// Non-finite rates are treated as `0`.
    pub fn from_rate(base: i64, rate: f32) -> Self {
        let rate = if rate.is_finite() { rate.floor() as i64 } else { 0 };
        Self::from_raw(base.saturating_sub(rate))
    }

    /// `max(1, base − ⌊population / divisor⌋)`.  A larger population gives a
    /// shorter period.  A zero divisor is treated as `1`.
    pub fn from_population(base: i64, divisor: u32, population: u32) -> Self {
        let steps = i64::from(population / divisor.max(1));
        Self::from_raw(base.saturating_sub(steps))
    }

    fn from_raw(period: i64) -> Self {
        Self { period: period.max(1) as u64 }
    }

    #[inline]
    pub fn period(self) -> u64 {
        self.period
    }

    /// `true` if the rule gated by this cadence runs on `tick`.
    #[inline]
    pub fn is_due(self, tick: Tick) -> bool {
        tick.0 % self.period == 0
    }
}

impl Default for Cadence {
    fn default() -> Self {
        Self::EVERY_TICK
    }
}
