//! Read-only observation output: per-tick stats and full snapshots.
//!
//! Views borrow nothing from the scenario; a renderer may keep them across
//! ticks.  With the `serde` feature they serialize (observation only, no
//! deserialization).

use bn_core::{AgentId, NodeId, Tick, Vec2};
use bn_graph::{Graph, NodeStatus};
use bn_grid::{CellKind, GridWorld};

use crate::ScenarioKind;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NodeView {
    pub id:        NodeId,
    pub pos:       Vec2,
    pub status:    NodeStatus,
    /// Rendering cue: accumulated agent pressure.
    pub intensity: f32,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EdgeView {
    pub a:   NodeId,
    pub b:   NodeId,
    /// Either endpoint infected.
    pub hot: bool,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AgentView {
    pub id:    AgentId,
    pub pos:   Vec2,
    pub state: &'static str,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GridView {
    pub cols:      u32,
    pub rows:      u32,
    pub cell_size: f32,
    pub origin:    Vec2,
    /// Current cell types, row-major.
    pub cells:     Vec<CellKind>,
}

impl GridView {
    pub fn of(grid: &GridWorld) -> Self {
        Self {
            cols:      grid.cols(),
            rows:      grid.rows(),
            cell_size: grid.cell_size(),
            origin:    grid.origin(),
            cells:     grid.cells().iter().map(|c| c.current).collect(),
        }
    }

    pub fn kind_at(&self, x: u32, y: u32) -> Option<CellKind> {
        if x >= self.cols || y >= self.rows {
            return None;
        }
        self.cells.get(y as usize * self.cols as usize + x as usize).copied()
    }
}

/// Everything a renderer needs to draw one frame.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Snapshot {
    pub tick:   Tick,
    pub kind:   ScenarioKind,
    pub nodes:  Vec<NodeView>,
    pub edges:  Vec<EdgeView>,
    pub agents: Vec<AgentView>,
    pub grid:   Option<GridView>,
}

impl Snapshot {
    /// Node and edge views of `graph`; agents and grid left empty.
    pub(crate) fn of_graph(tick: Tick, kind: ScenarioKind, graph: &Graph) -> Self {
        let nodes = graph
            .nodes()
            .iter()
            .map(|n| NodeView { id: n.id, pos: n.pos, status: n.status, intensity: n.pressure })
            .collect();
        let edges = graph
            .edges()
            .iter()
            .map(|e| EdgeView { a: e.a, b: e.b, hot: graph.edge_is_hot(e) })
            .collect();
        Self { tick, kind, nodes, edges, agents: Vec::new(), grid: None }
    }
}

/// Per-tick totals.  Counters a scenario does not use stay zero.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ScenarioStats {
    pub kind:       ScenarioKind,
    pub tick:       Tick,
    pub safe:       usize,
    pub infected:   usize,
    pub recovering: usize,
    pub vulnerable: usize,
    pub patched:    usize,
    pub firewall:   usize,
    pub agents:     usize,
    pub edges:      usize,
}

impl ScenarioStats {
    pub fn empty(kind: ScenarioKind, tick: Tick) -> Self {
        Self {
            kind,
            tick,
            safe:       0,
            infected:   0,
            recovering: 0,
            vulnerable: 0,
            patched:    0,
            firewall:   0,
            agents:     0,
            edges:      0,
        }
    }

    /// Node-status totals of `graph`.
    pub(crate) fn of_graph(kind: ScenarioKind, tick: Tick, graph: &Graph, agents: usize) -> Self {
        let mut stats = Self::empty(kind, tick);
        for node in graph.nodes() {
            match node.status {
                NodeStatus::Safe       => stats.safe += 1,
                NodeStatus::Infected   => stats.infected += 1,
                NodeStatus::Recovering => stats.recovering += 1,
                NodeStatus::Vulnerable => stats.vulnerable += 1,
                NodeStatus::Patched    => stats.patched += 1,
            }
        }
        stats.agents = agents;
        stats.edges = graph.edge_count();
        stats
    }
}
