//! Start-time and per-tick configuration.
//!
//! Two records cross the engine boundary:
//!
//! - [`SimConfig`]: fixed when a scenario starts (seed, canvas size, output
//!   cadence).  Typically built in code or loaded from JSON by the
//!   application crate.
//! - [`Controls`]: the live control-panel values, re-applied every tick.
//!   Out-of-range values are clamped by [`Controls::sanitized`], never
//!   rejected.

use crate::{BnError, BnResult};

/// Valid range of the spread-rate control.
pub const SPREAD_RATE_RANGE: (f32, f32) = (0.0, 100.0);

/// Largest accepted target population.  Ten times the swarm-deploy step
/// above the control panel's 500 ceiling.
pub const MAX_TARGET_POPULATION: u32 = 1_000;

/// Valid range of the agent speed multiplier.
pub const SPEED_MULTIPLIER_RANGE: (f32, f32) = (0.5, 5.0);

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Master RNG seed.  The same seed and input sequence always produce
    /// identical results.
    pub seed: u64,

    /// Canvas width in simulation units.
    pub width: f32,

    /// Canvas height in simulation units.
    pub height: f32,

    /// Emit an observer snapshot every N ticks.  `0` disables snapshots.
    pub snapshot_interval_ticks: u64,
}

impl SimConfig {
    /// Reject canvases that cannot hold a scenario.
    pub fn validate(&self) -> BnResult<()> {
        if !(self.width.is_finite() && self.height.is_finite()) {
            return Err(BnError::Config(format!(
                "canvas size must be finite, got {}x{}",
                self.width, self.height
            )));
        }
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(BnError::Config(format!(
                "canvas size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed:                    42,
            width:                   800.0,
            height:                  600.0,
            snapshot_interval_ticks: 0,
        }
    }
}

// ── Controls ──────────────────────────────────────────────────────────────────

/// Per-tick configuration input.
///
/// The controller keeps the latest value and treats it as the single source
/// of truth; there is one writer, so no intermediate buffering is needed.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Controls {
    /// Desired agent population, at most [`MAX_TARGET_POPULATION`].
    pub target_population: u32,

    /// Spread-rate control in [`SPREAD_RATE_RANGE`].  Defaults to `0.05`:
    /// one hunter-killer breach attempt every ~2000 ticks, and the base
    /// cadence in the other scenarios.
    pub spread_rate: f32,

    /// Pointer input severs edges / clears firewalls instead of toggling
    /// status.
    pub severing_mode: bool,

    /// Gates the layout, spread and agent phases.  Interaction still applies.
    pub paused: bool,

    /// Scales patrol-agent speed, in [`SPEED_MULTIPLIER_RANGE`].
    pub speed_multiplier: f32,
}

impl Controls {
    /// Copy with every numeric field clamped into its valid range.  NaN falls
    /// back to the default value of that field.
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        Self {
            target_population: self.target_population.min(MAX_TARGET_POPULATION),
            spread_rate: clamp_or(self.spread_rate, SPREAD_RATE_RANGE, defaults.spread_rate),
            speed_multiplier: clamp_or(
                self.speed_multiplier,
                SPEED_MULTIPLIER_RANGE,
                defaults.speed_multiplier,
            ),
            ..self
        }
    }
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            target_population: 200,
            spread_rate:       0.05,
            severing_mode:     false,
            paused:            false,
            speed_multiplier:  1.0,
        }
    }
}

fn clamp_or(value: f32, (lo, hi): (f32, f32), fallback: f32) -> f32 {
    if value.is_nan() { fallback } else { value.clamp(lo, hi) }
}
