//! `ScenarioController`: owns the running scenario, the RNG, the clock and the
//! latest controls, and drives the tick loop.
//!
//! # Tick
//!
//! ```text
//! if running and not paused:
//!   on_tick_start
//!   ① layout   force-directed relaxation (graph scenarios)
//!   ② spread   cadence-gated contagion / packet launches
//!   ③ agents   movement, state machines, side effects on nodes/cells
//!   ④ commit   pending grid state becomes current
//!   on_tick_end(stats), on_snapshot every N ticks
//!   clock.advance()
//! ```
//!
//! Controls are applied whole or per field between ticks.  Population
//! reconciliation runs whenever the target, spread rate or severing flag is
//! edited, refilling agents that scenario rules have killed.  Pause and speed
//! edits leave the population alone, and so does re-applying identical
//! values.

use tracing::{debug, info};

use bn_core::{Controls, SimClock, SimConfig, SimRng, Tick, Vec2};

use crate::scenario::build_scenario;
use crate::{
    InteractionOutcome, NoopObserver, Scenario, ScenarioKind, ScenarioStats, SimObserver,
    SimResult, Snapshot, TickContext,
};

/// Population added by [`ScenarioController::deploy_swarm`].
pub const SWARM_SIZE: u32 = 50;

pub struct ScenarioController {
    config:   SimConfig,
    clock:    SimClock,
    rng:      SimRng,
    controls: Controls,
    scenario: Option<Box<dyn Scenario>>,
}

impl ScenarioController {
    /// A controller with no running scenario.
    ///
    /// # Errors
    ///
    /// [`SimError::Core`](crate::SimError::Core) if `config` describes a
    /// degenerate canvas.
    pub fn new(config: SimConfig) -> SimResult<Self> {
        config.validate()?;
        Ok(Self {
            rng:      SimRng::new(config.seed),
            config,
            clock:    SimClock::new(),
            controls: Controls::default(),
            scenario: None,
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Tear down any running scenario, then build and start `kind` with a
    /// fresh RNG seeded from the config.
    pub fn start(&mut self, kind: ScenarioKind) -> SimResult<()> {
        self.teardown();
        self.rng = SimRng::new(self.config.seed);
        let scenario = build_scenario(kind, &self.config, &mut self.rng)?;
        self.install(scenario);
        Ok(())
    }

    /// Tear down any running scenario and install a caller-built one.
    pub fn start_with(&mut self, scenario: Box<dyn Scenario>) {
        self.teardown();
        self.rng = SimRng::new(self.config.seed);
        self.install(scenario);
    }

    fn install(&mut self, scenario: Box<dyn Scenario>) {
        info!(
            scenario = %scenario.kind(),
            seed = self.config.seed,
            target_population = self.controls.target_population,
            "scenario started"
        );
        self.clock.reset();
        self.scenario = Some(scenario);
        self.reconcile();
    }

    /// Release the running scenario.  Safe to call repeatedly.
    pub fn teardown(&mut self) {
        self.teardown_with(&mut NoopObserver);
    }

    pub fn teardown_with<O: SimObserver>(&mut self, observer: &mut O) {
        let Some(scenario) = self.scenario.take() else { return };
        let now = self.clock.current_tick;
        info!(scenario = %scenario.kind(), tick = %now, "scenario torn down");
        observer.on_teardown(now);
        self.clock.reset();
    }

    pub fn is_running(&self) -> bool {
        self.scenario.is_some()
    }

    pub fn kind(&self) -> Option<ScenarioKind> {
        self.scenario.as_ref().map(|s| s.kind())
    }

    pub fn scenario(&self) -> Option<&dyn Scenario> {
        self.scenario.as_deref()
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn current_tick(&self) -> Tick {
        self.clock.current_tick
    }

    // ── Controls ──────────────────────────────────────────────────────────

    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    /// Replace the whole control record (clamped), reconciling the
    /// population if the target, rate or severing flag changed.
    pub fn apply_controls(&mut self, controls: Controls) {
        let next = controls.sanitized();
        let edited = population_inputs(&next) != population_inputs(&self.controls);
        self.controls = next;
        if edited {
            self.reconcile();
        }
    }

    pub fn set_target_population(&mut self, target: u32) {
        self.apply_controls(Controls { target_population: target, ..self.controls });
    }

    /// Raise the target population by [`SWARM_SIZE`].
    pub fn deploy_swarm(&mut self) {
        let target = self.controls.target_population.saturating_add(SWARM_SIZE);
        self.set_target_population(target);
    }

    pub fn set_spread_rate(&mut self, rate: f32) {
        self.apply_controls(Controls { spread_rate: rate, ..self.controls });
    }

    pub fn set_severing_mode(&mut self, enabled: bool) {
        self.apply_controls(Controls { severing_mode: enabled, ..self.controls });
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.controls.paused = paused;
    }

    pub fn set_speed_multiplier(&mut self, multiplier: f32) {
        self.apply_controls(Controls { speed_multiplier: multiplier, ..self.controls });
    }

    fn reconcile(&mut self) {
        let target = self.controls.target_population;
        let Some(scenario) = self.scenario.as_mut() else { return };
        let result = scenario.reconcile_population(target, &mut self.rng);
        debug!(
            scenario = %scenario.kind(),
            target,
            spawned = result.spawned,
            removed = result.removed,
            agents = scenario.agent_count(),
            "population reconciled"
        );
    }

    // ── Tick loop ─────────────────────────────────────────────────────────

    /// Advance one tick.  No-op when paused or when nothing is running.
    pub fn tick<O: SimObserver>(&mut self, observer: &mut O) {
        if self.controls.paused {
            return;
        }
        let Some(scenario) = self.scenario.as_mut() else { return };
        let now = self.clock.current_tick;

        observer.on_tick_start(now);

        let mut ctx = TickContext { tick: now, controls: &self.controls, rng: &mut self.rng };
        scenario.layout();
        scenario.spread(&mut ctx);
        scenario.agents(&mut ctx);
        scenario.commit();

        observer.on_tick_end(now, &scenario.stats(now));
        let interval = self.config.snapshot_interval_ticks;
        if interval > 0 && now.0 % interval == 0 {
            observer.on_snapshot(now, &scenario.snapshot(now));
        }

        self.clock.advance();
    }

    /// Advance `n` ticks (paused ticks included; they do nothing).
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) {
        for _ in 0..n {
            self.tick(observer);
        }
    }

    // ── Interaction ───────────────────────────────────────────────────────

    /// Pointer interaction at `p` using the current severing flag.  Applies
    /// even while paused; points outside the scenario bounds are ignored.
    pub fn interact(&mut self, p: Vec2) -> InteractionOutcome {
        let severing = self.controls.severing_mode;
        self.interact_with_mode(p, severing)
    }

    pub fn interact_with_mode(&mut self, p: Vec2, severing: bool) -> InteractionOutcome {
        let Some(scenario) = self.scenario.as_mut() else {
            return InteractionOutcome::Ignored;
        };
        if !scenario.bounds().contains(p) {
            return InteractionOutcome::Ignored;
        }
        let outcome = scenario.interact(p, severing);
        debug!(scenario = %scenario.kind(), point = %p, severing, ?outcome, "interaction");
        outcome
    }

    // ── Observation ───────────────────────────────────────────────────────

    pub fn snapshot(&self) -> Option<Snapshot> {
        self.scenario.as_ref().map(|s| s.snapshot(self.clock.current_tick))
    }

    pub fn stats(&self) -> Option<ScenarioStats> {
        self.scenario.as_ref().map(|s| s.stats(self.clock.current_tick))
    }
}

/// Control fields whose edits trigger population reconciliation.
fn population_inputs(c: &Controls) -> (u32, f32, bool) {
    (c.target_population, c.spread_rate, c.severing_mode)
}
