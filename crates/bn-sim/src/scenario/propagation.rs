//! Patch propagation: red and blue packets racing across a clustered graph.
//!
//! Red cadence follows the spread rate; blue cadence follows the population
//! control, which here sizes nothing and only speeds up patching.

use bn_agent::{Agent, Packet, Population, Reconciled};
use bn_core::{Bounds, Cadence, NodeId, SimRng, Tick, Vec2};
use bn_graph::{Graph, NodeStatus, TopologyBuilder};

use crate::interaction::{sever_nearest_edge, toggle_nearest_node};
use crate::snapshot::AgentView;
use crate::spread::{deliver, launch_benign, launch_malicious};
use crate::{InteractionOutcome, Scenario, ScenarioKind, ScenarioStats, SimResult, Snapshot, TickContext};

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PropagationParams {
    pub clusters:        usize,
    pub per_cluster:     usize,
    /// Members are offset up to `±cluster_spread` from their cluster centre.
    pub cluster_spread:  f32,
    /// Nodes strictly closer than this are linked.
    pub link_radius:     f32,
    pub red_base:        i64,
    pub blue_base:       i64,
    pub blue_divisor:    u32,
    pub node_radius:     f32,
    pub sever_threshold: f32,
}

impl Default for PropagationParams {
    fn default() -> Self {
        Self {
            clusters:        5,
            per_cluster:     100,
            cluster_spread:  200.0,
            link_radius:     60.0,
            red_base:        15,
            blue_base:       40,
            blue_divisor:    10,
            node_radius:     10.0,
            sever_threshold: 20.0,
        }
    }
}

pub struct Propagation {
    params:     PropagationParams,
    bounds:     Bounds,
    graph:      Graph,
    packets:    Population<Packet>,
    population: u32,
}

impl Propagation {
    /// Clustered vulnerable nodes; the first is seeded red, the last blue.
    pub fn generate(params: PropagationParams, bounds: Bounds, rng: &mut SimRng) -> SimResult<Self> {
        let total = params.clusters * params.per_cluster;
        let mut b = TopologyBuilder::with_capacity(total, total * 4);
        let ids = b.scatter_clusters(
            params.clusters,
            params.per_cluster,
            bounds.fraction(0.1, 0.9),
            params.cluster_spread,
            NodeStatus::Vulnerable,
            rng,
        );
        b.connect_within(params.link_radius, params.link_radius);
        if let (Some(&red), Some(&blue)) = (ids.first(), ids.last()) {
            b.set_status(red, NodeStatus::Infected)?;
            b.set_status(blue, NodeStatus::Patched)?;
        }
        Ok(Self::from_graph(b.build()?, bounds, params))
    }

    /// Wrap a caller-built graph with statuses already seeded.
    pub fn from_graph(graph: Graph, bounds: Bounds, params: PropagationParams) -> Self {
        Self { params, bounds, graph, packets: Population::new(), population: 0 }
    }

    pub fn graph(&self) -> &Graph { &self.graph }
    pub fn graph_mut(&mut self) -> &mut Graph { &mut self.graph }
    pub fn packets(&self) -> &Population<Packet> { &self.packets }

    pub fn red_cadence(&self, rate: f32) -> Cadence {
        Cadence::from_rate(self.params.red_base, rate)
    }

    pub fn blue_cadence(&self) -> Cadence {
        Cadence::from_population(self.params.blue_base, self.params.blue_divisor, self.population)
    }

    /// `true` once no vulnerable node remains.
    pub fn is_settled(&self) -> bool {
        self.graph.count_status(NodeStatus::Vulnerable) == 0
    }

    pub fn status_of(&self, id: NodeId) -> Option<NodeStatus> {
        self.graph.node(id).map(|n| n.status)
    }
}

impl Scenario for Propagation {
    fn kind(&self) -> ScenarioKind { ScenarioKind::Propagation }
    fn bounds(&self) -> Bounds { self.bounds }
    fn agent_count(&self) -> usize { self.packets.len() }

    /// Packets are not population-managed; the target only sets blue cadence.
    fn reconcile_population(&mut self, target: u32, _rng: &mut SimRng) -> Reconciled {
        self.population = target;
        Reconciled::default()
    }

    fn spread(&mut self, ctx: &mut TickContext<'_>) {
        if self.red_cadence(ctx.controls.spread_rate).is_due(ctx.tick) {
            launch_malicious(&self.graph, &mut self.packets, ctx.rng);
        }
        if self.blue_cadence().is_due(ctx.tick) {
            launch_benign(&self.graph, &mut self.packets);
        }
    }

    fn agents(&mut self, _ctx: &mut TickContext<'_>) {
        let graph = &mut self.graph;
        self.packets.retain_mut(|packet| {
            if !packet.advance() {
                return true;
            }
            deliver(graph, packet);
            false
        });
    }

    fn interact(&mut self, p: Vec2, severing: bool) -> InteractionOutcome {
        if severing {
            sever_nearest_edge(&mut self.graph, p, self.params.sever_threshold)
        } else {
            toggle_nearest_node(
                &mut self.graph,
                p,
                self.params.node_radius,
                &[
                    (NodeStatus::Vulnerable, NodeStatus::Infected),
                    // Administrative override.
                    (NodeStatus::Infected, NodeStatus::Patched),
                ],
            )
        }
    }

    fn snapshot(&self, tick: Tick) -> Snapshot {
        let mut snap = Snapshot::of_graph(tick, self.kind(), &self.graph);
        snap.agents = self
            .packets
            .iter()
            .map(|p| AgentView { id: p.id(), pos: p.pos, state: p.state_tag() })
            .collect();
        snap
    }

    fn stats(&self, tick: Tick) -> ScenarioStats {
        ScenarioStats::of_graph(self.kind(), tick, &self.graph, self.packets.len())
    }
}
