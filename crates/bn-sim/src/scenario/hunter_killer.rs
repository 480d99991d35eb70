//! Hunter-killer: patrol agents on a relaxing force-directed graph.
//!
//! Agents walk random edges.  Arriving on an infected node adds pressure;
//! once pressure exceeds the threshold the node starts a fixed recovery
//! countdown and then returns to safe with its pressure cleared.

use bn_agent::{step_toward, Agent, PatrolAgent, Population, Reconciled};
use bn_core::{Bounds, Cadence, SimRng, Tick, Vec2};
use bn_graph::{ForceLayout, Graph, LayoutParams, NodeStatus, TopologyBuilder};

use crate::interaction::{sever_nearest_edge, toggle_nearest_node};
use crate::snapshot::AgentView;
use crate::spread::graph_contagion;
use crate::{InteractionOutcome, Scenario, ScenarioKind, ScenarioStats, SimResult, Snapshot, TickContext};

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HunterKillerParams {
    pub node_count:         usize,
    /// Each node links to `k` nearest others, `k` in `[k_min, k_max]`.
    pub k_min:              usize,
    pub k_max:              usize,
    pub layout:             LayoutParams,
    /// Seed probability per tick is `spread_rate * seed_factor`.
    pub seed_factor:        f64,
    pub edge_probability:   f64,
    pub arrival_radius:     f32,
    pub pressure_threshold: f32,
    pub pressure_decay:     f32,
    pub recovery_ticks:     u32,
    pub node_radius:        f32,
    pub sever_threshold:    f32,
}

impl Default for HunterKillerParams {
    fn default() -> Self {
        Self {
            node_count:         60,
            k_min:              2,
            k_max:              4,
            layout:             LayoutParams::default(),
            seed_factor:        0.01,
            edge_probability:   0.005,
            arrival_radius:     5.0,
            pressure_threshold: 10.0,
            pressure_decay:     0.1,
            recovery_ticks:     60,
            node_radius:        20.0,
            sever_threshold:    10.0,
        }
    }
}

pub struct HunterKiller {
    params: HunterKillerParams,
    bounds: Bounds,
    graph:  Graph,
    layout: ForceLayout,
    agents: Population<PatrolAgent>,
}

impl HunterKiller {
    /// Scatter `node_count` safe nodes over the central 80 % of `bounds` and
    /// wire each to its nearest neighbors.
    pub fn generate(params: HunterKillerParams, bounds: Bounds, rng: &mut SimRng) -> SimResult<Self> {
        let mut b = TopologyBuilder::with_capacity(params.node_count, params.node_count * params.k_max);
        b.scatter(params.node_count, bounds.fraction(0.1, 0.9), NodeStatus::Safe, rng);
        b.connect_nearest(params.k_min, params.k_max, params.layout.rest_length, rng);
        Ok(Self::from_graph(b.build()?, bounds, params))
    }

    /// Wrap a caller-built graph.  No agents until the first reconcile.
    pub fn from_graph(graph: Graph, bounds: Bounds, params: HunterKillerParams) -> Self {
        Self {
            params,
            bounds,
            graph,
            layout: ForceLayout::new(params.layout),
            agents: Population::new(),
        }
    }

    pub fn graph(&self) -> &Graph { &self.graph }
    pub fn graph_mut(&mut self) -> &mut Graph { &mut self.graph }
    pub fn agents(&self) -> &Population<PatrolAgent> { &self.agents }
    pub fn params(&self) -> &HunterKillerParams { &self.params }

    /// Advance live recovery countdowns; finished nodes revert to safe.
    fn tick_recovery(&mut self) {
        for node in self.graph.nodes_mut() {
            let Some(left) = node.recovery else { continue };
            if left <= 1 {
                node.status = NodeStatus::Safe;
                node.pressure = 0.0;
                node.recovery = None;
            } else {
                node.recovery = Some(left - 1);
            }
        }
    }
}

impl Scenario for HunterKiller {
    fn kind(&self) -> ScenarioKind { ScenarioKind::HunterKiller }
    fn bounds(&self) -> Bounds { self.bounds }
    fn agent_count(&self) -> usize { self.agents.len() }

    fn reconcile_population(&mut self, target: u32, rng: &mut SimRng) -> Reconciled {
        let graph = &self.graph;
        self.agents.reconcile(target as usize, |id| {
            let node = &graph.nodes()[rng.index(graph.node_count())?];
            Some(PatrolAgent::new(id, node.id, node.pos))
        })
    }

    fn layout(&mut self) {
        self.layout.step(&mut self.graph, self.bounds);
    }

    fn spread(&mut self, ctx: &mut TickContext<'_>) {
        if !Cadence::EVERY_TICK.is_due(ctx.tick) {
            return;
        }
        let seed = f64::from(ctx.controls.spread_rate) * self.params.seed_factor;
        graph_contagion(&mut self.graph, seed, self.params.edge_probability, ctx.rng);
    }

    fn agents(&mut self, ctx: &mut TickContext<'_>) {
        self.tick_recovery();

        let p = self.params;
        let speed_scale = ctx.controls.speed_multiplier;
        let graph = &mut self.graph;

        for agent in self.agents.iter_mut() {
            if agent.needs_target() {
                let next = match ctx.rng.choose(graph.neighbors(agent.current)) {
                    Some(&n) => Some(n),
                    // Isolated: any node, possibly the current one.
                    None => ctx.rng.index(graph.node_count()).map(|i| graph.nodes()[i].id),
                };
                let Some(next) = next else { continue };
                let infected = graph.node(next).is_some_and(|n| n.status.is_infected());
                agent.assign_target(next, infected);
            }

            let Some(target) = agent.target else { continue };
            let Some(node) = graph.node_mut(target) else {
                agent.drop_target();
                continue;
            };
            if !step_toward(&mut agent.pos, node.pos, agent.speed * speed_scale, p.arrival_radius) {
                continue;
            }

            let infected = node.status.is_infected();
            if agent.arrive(target, node.pos, infected) {
                node.pressure += 1.0;
                if node.pressure > p.pressure_threshold {
                    node.status = NodeStatus::Recovering;
                    node.recovery = Some(p.recovery_ticks);
                }
            } else {
                node.pressure = (node.pressure - p.pressure_decay).max(0.0);
            }
        }
    }

    fn interact(&mut self, p: Vec2, severing: bool) -> InteractionOutcome {
        if severing {
            sever_nearest_edge(&mut self.graph, p, self.params.sever_threshold)
        } else {
            toggle_nearest_node(
                &mut self.graph,
                p,
                self.params.node_radius,
                &[(NodeStatus::Safe, NodeStatus::Infected)],
            )
        }
    }

    fn snapshot(&self, tick: Tick) -> Snapshot {
        let mut snap = Snapshot::of_graph(tick, self.kind(), &self.graph);
        snap.agents = self
            .agents
            .iter()
            .map(|a| AgentView { id: a.id(), pos: a.pos, state: a.state_tag() })
            .collect();
        snap
    }

    fn stats(&self, tick: Tick) -> ScenarioStats {
        ScenarioStats::of_graph(self.kind(), tick, &self.graph, self.agents.len())
    }
}
