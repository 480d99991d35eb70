//! Graph representation.
//!
//! # Data layout
//!
//! Nodes live in a `Vec<Node>` indexed by `NodeId`; nodes are never removed,
//! so ids stay stable for a scenario's lifetime.  Edges are undirected and
//! live in an unordered `Vec<Edge>`.  A per-node adjacency list mirrors the
//! edge set so neighbor queries do not scan every edge; [`Graph::remove_edge`]
//! updates both atomically.
//!
//! Node state (position, velocity, status, counters) is mutable through
//! [`Graph::nodes_mut`], which hands out a slice: callers can edit nodes but
//! cannot add or drop them behind the adjacency's back.

use bn_core::{NodeId, Vec2};

// ── NodeStatus ────────────────────────────────────────────────────────────────

/// Health status of a node.  Each scenario uses a subset:
///
/// | Scenario      | Statuses                          |
/// |---------------|-----------------------------------|
/// | hunter-killer | `Safe`, `Infected`, `Recovering`  |
/// | propagation   | `Vulnerable`, `Infected`, `Patched` |
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeStatus {
    #[default]
    Safe,
    Infected,
    Recovering,
    Vulnerable,
    Patched,
}

impl NodeStatus {
    #[inline]
    pub fn is_infected(self) -> bool {
        matches!(self, NodeStatus::Infected)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NodeStatus::Safe       => "safe",
            NodeStatus::Infected   => "infected",
            NodeStatus::Recovering => "recovering",
            NodeStatus::Vulnerable => "vulnerable",
            NodeStatus::Patched    => "patched",
        }
    }
}

impl std::fmt::Display for NodeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Node / Edge ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub pos: Vec2,
    pub vel: Vec2,
    pub status: NodeStatus,
    /// Agent pressure accumulated by attacking patrol agents.
    pub pressure: f32,
    /// Ticks left until a recovering node reverts to safe.  `None` when no
    /// recovery is in progress.
    pub recovery: Option<u32>,
}

impl Node {
    pub fn new(id: NodeId, pos: Vec2, status: NodeStatus) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::ZERO,
            status,
            pressure: 0.0,
            recovery: None,
        }
    }
}

/// An undirected edge with a spring rest length.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Edge {
    pub a: NodeId,
    pub b: NodeId,
    pub rest_length: f32,
}

impl Edge {
    #[inline]
    pub fn touches(&self, node: NodeId) -> bool {
        self.a == node || self.b == node
    }

    /// The endpoint opposite `node`, or `None` if `node` is not an endpoint.
    #[inline]
    pub fn other(&self, node: NodeId) -> Option<NodeId> {
        if self.a == node {
            Some(self.b)
        } else if self.b == node {
            Some(self.a)
        } else {
            None
        }
    }

    #[inline]
    pub fn joins(&self, x: NodeId, y: NodeId) -> bool {
        (self.a == x && self.b == y) || (self.a == y && self.b == x)
    }
}

// ── Graph ─────────────────────────────────────────────────────────────────────

/// Undirected graph with per-node simulation state.
///
/// Do not construct directly; use [`TopologyBuilder`](crate::TopologyBuilder).
#[derive(Clone, Debug, Default)]
pub struct Graph {
    pub(crate) nodes: Vec<Node>,
    pub(crate) edges: Vec<Edge>,
    pub(crate) adjacency: Vec<Vec<NodeId>>,
}

impl Graph {
    /// A graph with no nodes or edges.
    pub fn empty() -> Self {
        Self::default()
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // ── Access ────────────────────────────────────────────────────────────

    #[inline]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    #[inline]
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn nodes_mut(&mut self) -> &mut [Node] {
        &mut self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Iterator over all `NodeId`s in ascending order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len() as u32).map(NodeId)
    }

    /// Neighbors of `node`.  Empty for unknown ids.
    #[inline]
    pub fn neighbors(&self, node: NodeId) -> &[NodeId] {
        self.adjacency.get(node.index()).map_or(&[], Vec::as_slice)
    }

    #[inline]
    pub fn degree(&self, node: NodeId) -> usize {
        self.neighbors(node).len()
    }

    pub fn has_edge(&self, a: NodeId, b: NodeId) -> bool {
        self.neighbors(a).contains(&b)
    }

    /// `true` if either endpoint of `edge` is infected.
    pub fn edge_is_hot(&self, edge: &Edge) -> bool {
        let infected = |id: NodeId| self.node(id).is_some_and(|n| n.status.is_infected());
        infected(edge.a) || infected(edge.b)
    }

    pub fn count_status(&self, status: NodeStatus) -> usize {
        self.nodes.iter().filter(|n| n.status == status).count()
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Remove the edge at `index` and its adjacency entries.
    ///
    /// Returns the removed edge, or `None` if `index` is out of range.
    /// Edge order is not preserved.
    pub fn remove_edge(&mut self, index: usize) -> Option<Edge> {
        if index >= self.edges.len() {
            return None;
        }
        let edge = self.edges.swap_remove(index);
        for (from, to) in [(edge.a, edge.b), (edge.b, edge.a)] {
            let Some(list) = self.adjacency.get_mut(from.index()) else { continue };
            if let Some(pos) = list.iter().position(|&n| n == to) {
                list.swap_remove(pos);
            }
        }
        Some(edge)
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// The node nearest `p` among those strictly closer than `radius`.
    pub fn nearest_node_within(&self, p: Vec2, radius: f32) -> Option<NodeId> {
        self.nodes
            .iter()
            .map(|n| (n.id, n.pos.distance(p)))
            .filter(|&(_, d)| d < radius)
            .min_by(|x, y| x.1.total_cmp(&y.1))
            .map(|(id, _)| id)
    }

    /// Index of the edge whose segment passes nearest `p`, among those
    /// strictly closer than `threshold`.
    pub fn nearest_edge_within(&self, p: Vec2, threshold: f32) -> Option<usize> {
        self.edges
            .iter()
            .enumerate()
            .filter_map(|(i, e)| {
                let a = self.node(e.a)?.pos;
                let b = self.node(e.b)?.pos;
                Some((i, p.distance_to_segment(a, b)))
            })
            .filter(|&(_, d)| d < threshold)
            .min_by(|x, y| x.1.total_cmp(&y.1))
            .map(|(i, _)| i)
    }
}
