//! Quarantine: cellular-automaton contagion walled in by wandering agents.

use bn_agent::{Agent, Population, Reconciled, Wanderer, WandererState};
use bn_core::{Bounds, Cadence, SimRng, Tick, Vec2};
use bn_grid::{CellCoord, CellKind, GridWorld};

use crate::interaction::{breach_cell, clear_firewall};
use crate::snapshot::{AgentView, GridView};
use crate::spread::grid_contagion;
use crate::{InteractionOutcome, Scenario, ScenarioKind, ScenarioStats, SimResult, Snapshot, TickContext};

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct QuarantineParams {
    pub cols:                  u32,
    pub rows:                  u32,
    /// Spread cadence is `max(1, cadence_base - floor(rate))`.
    pub cadence_base:          i64,
    pub infection_probability: f64,
    pub max_population:        u32,
}

impl Default for QuarantineParams {
    fn default() -> Self {
        Self {
            cols:                  40,
            rows:                  40,
            cadence_base:          11,
            infection_probability: 0.3,
            max_population:        100,
        }
    }
}

pub struct Quarantine {
    params: QuarantineParams,
    bounds: Bounds,
    grid:   GridWorld,
    agents: Population<Wanderer>,
}

impl Quarantine {
    /// A grid fitted and centred in `bounds` with its centre cell infected.
    pub fn generate(params: QuarantineParams, bounds: Bounds) -> SimResult<Self> {
        let mut grid = GridWorld::fit(params.cols, params.rows, bounds)?;
        let centre = grid.centre();
        grid.set_immediate(centre, CellKind::Infected);
        Ok(Self::from_grid(grid, bounds, params))
    }

    pub fn from_grid(grid: GridWorld, bounds: Bounds, params: QuarantineParams) -> Self {
        Self { params, bounds, grid, agents: Population::new() }
    }

    pub fn grid(&self) -> &GridWorld { &self.grid }
    pub fn grid_mut(&mut self) -> &mut GridWorld { &mut self.grid }
    pub fn agents(&self) -> &Population<Wanderer> { &self.agents }

    /// Place a wanderer directly (tests, custom setups).
    pub fn spawn_at(&mut self, cell: CellCoord) -> bool {
        if self.grid.get(cell).is_none() {
            return false;
        }
        self.agents.spawn(|id| Wanderer::new(id, cell));
        true
    }
}

impl Scenario for Quarantine {
    fn kind(&self) -> ScenarioKind { ScenarioKind::Quarantine }
    fn bounds(&self) -> Bounds { self.bounds }
    fn agent_count(&self) -> usize { self.agents.len() }

    fn reconcile_population(&mut self, target: u32, rng: &mut SimRng) -> Reconciled {
        let target = target.min(self.params.max_population) as usize;
        let (cols, rows) = (self.grid.cols(), self.grid.rows());
        self.agents.reconcile(target, |id| {
            let cell = CellCoord::new(rng.gen_range(0..cols), rng.gen_range(0..rows));
            Some(Wanderer::new(id, cell))
        })
    }

    fn spread(&mut self, ctx: &mut TickContext<'_>) {
        let cadence = Cadence::from_rate(self.params.cadence_base, ctx.controls.spread_rate);
        if cadence.is_due(ctx.tick) {
            grid_contagion(&mut self.grid, self.params.infection_probability, ctx.rng);
        }
    }

    fn agents(&mut self, ctx: &mut TickContext<'_>) {
        let grid = &mut self.grid;
        let rng = &mut *ctx.rng;

        self.agents.retain_mut(|w| {
            let Some(here) = grid.kind(w.cell) else { return false };
            if here == CellKind::Infected {
                return false;
            }

            w.state = WandererState::Wandering;
            if here == CellKind::Safe && grid.touches_infection(w.cell) {
                grid.set_pending(w.cell, CellKind::Firewall);
                w.state = WandererState::Sealing;
            }

            let options: Vec<CellCoord> = grid
                .neighbors4(w.cell)
                .filter(|&n| grid.kind(n) != Some(CellKind::Infected))
                .collect();
            if let Some(&next) = rng.choose(&options) {
                w.cell = next;
            }
            true
        });
    }

    fn commit(&mut self) {
        self.grid.commit();
    }

    fn interact(&mut self, p: Vec2, severing: bool) -> InteractionOutcome {
        if severing {
            let threshold = self.grid.cell_size();
            clear_firewall(&mut self.grid, p, threshold)
        } else {
            breach_cell(&mut self.grid, p)
        }
    }

    fn snapshot(&self, tick: Tick) -> Snapshot {
        Snapshot {
            tick,
            kind:   self.kind(),
            nodes:  Vec::new(),
            edges:  Vec::new(),
            agents: self
                .agents
                .iter()
                .map(|w| AgentView { id: w.id(), pos: self.grid.cell_center(w.cell), state: w.state_tag() })
                .collect(),
            grid:   Some(GridView::of(&self.grid)),
        }
    }

    fn stats(&self, tick: Tick) -> ScenarioStats {
        let counts = self.grid.counts();
        ScenarioStats {
            safe:     counts.safe,
            infected: counts.infected,
            firewall: counts.firewall,
            agents:   self.agents.len(),
            ..ScenarioStats::empty(self.kind(), tick)
        }
    }
}
