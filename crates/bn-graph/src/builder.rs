//! Topology construction: spatial scatter plus nearest-neighbor or
//! radius-based wiring.
//!
//! # Spatial index
//!
//! Both wiring strategies bulk-load an R-tree (via `rstar`) over the node
//! positions once, then query it per node:
//!
//! - [`TopologyBuilder::connect_nearest`]: each node links to its `k`
//!   nearest others, `k` drawn uniformly from `[k_min, k_max]`.
//! - [`TopologyBuilder::connect_within`]: every pair closer than a radius is
//!   linked.
//!
//! Undirected duplicates are rejected through an `FxHashSet` keyed on the
//! ordered id pair, so `a–b` and `b–a` collapse to one edge.

use rstar::{PointDistance, RTree, RTreeObject, AABB};
use rustc_hash::FxHashSet;

use bn_core::{BnError, Bounds, NodeId, SimRng, Vec2};

use crate::{Edge, Graph, GraphError, GraphResult, Node, NodeStatus};

// ── R-tree node entry ─────────────────────────────────────────────────────────

/// Entry stored in the R-tree spatial index: a 2-D `[x, y]` point with the
/// associated `NodeId`.
#[derive(Clone)]
struct NodeEntry {
    point: [f32; 2],
    id: NodeId,
}

impl RTreeObject for NodeEntry {
    type Envelope = AABB<[f32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for NodeEntry {
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── TopologyBuilder ───────────────────────────────────────────────────────────

/// Construct a [`Graph`] incrementally, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use bn_core::Vec2;
/// use bn_graph::{NodeStatus, TopologyBuilder};
///
/// let mut b = TopologyBuilder::new();
/// let a = b.add_node(Vec2::new(0.0, 0.0), NodeStatus::Safe);
/// let c = b.add_node(Vec2::new(50.0, 0.0), NodeStatus::Safe);
/// assert!(b.add_edge(a, c, 100.0));
/// assert!(!b.add_edge(c, a, 100.0)); // undirected duplicate
/// let g = b.build().unwrap();
/// assert_eq!(g.edge_count(), 1);
/// ```
pub struct TopologyBuilder {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    seen:  FxHashSet<(u32, u32)>,
}

impl TopologyBuilder {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            seen:  FxHashSet::default(),
        }
    }

    /// Pre-allocate for the expected number of nodes and edges.
    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(nodes),
            edges: Vec::with_capacity(edges),
            seen:  FxHashSet::default(),
        }
    }

    /// Add a node and return its `NodeId` (sequential from 0).
    pub fn add_node(&mut self, pos: Vec2, status: NodeStatus) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node::new(id, pos, status));
        id
    }

    /// Add an undirected edge.  Returns `false` (and adds nothing) for
    /// self-loops and pairs that are already connected.
    ///
    /// Endpoints are validated in [`build`](Self::build).
    pub fn add_edge(&mut self, a: NodeId, b: NodeId, rest_length: f32) -> bool {
        if a == b {
            return false;
        }
        let key = if a < b { (a.0, b.0) } else { (b.0, a.0) };
        if !self.seen.insert(key) {
            return false;
        }
        self.edges.push(Edge { a, b, rest_length });
        true
    }

    pub fn node_pos(&self, id: NodeId) -> GraphResult<Vec2> {
        self.nodes
            .get(id.index())
            .map(|n| n.pos)
            .ok_or(GraphError::Core(BnError::NodeNotFound(id)))
    }

    /// Overwrite the initial status of a node added earlier (seeding).
    pub fn set_status(&mut self, id: NodeId, status: NodeStatus) -> GraphResult<()> {
        let node = self
            .nodes
            .get_mut(id.index())
            .ok_or(GraphError::Core(BnError::NodeNotFound(id)))?;
        node.status = status;
        Ok(())
    }

    pub fn node_count(&self) -> usize { self.nodes.len() }
    pub fn edge_count(&self) -> usize { self.edges.len() }

    // ── Scatter ───────────────────────────────────────────────────────────

    /// Add `count` nodes uniformly distributed over `area`.
    pub fn scatter(
        &mut self,
        count:  usize,
        area:   Bounds,
        status: NodeStatus,
        rng:    &mut SimRng,
    ) -> Vec<NodeId> {
        (0..count)
            .map(|_| {
                let pos = Vec2::new(
                    rng.uniform(area.min.x, area.max.x),
                    rng.uniform(area.min.y, area.max.y),
                );
                self.add_node(pos, status)
            })
            .collect()
    }

    /// Add `clusters × per_cluster` nodes: each cluster centre is drawn
    /// uniformly from `centres`, members are offset by up to `±spread` on each
    /// axis.
    ///
    /// Members may land outside `centres`; only the centre is constrained.
    pub fn scatter_clusters(
        &mut self,
        clusters:    usize,
        per_cluster: usize,
        centres:     Bounds,
        spread:      f32,
        status:      NodeStatus,
        rng:         &mut SimRng,
    ) -> Vec<NodeId> {
        let mut ids = Vec::with_capacity(clusters * per_cluster);
        for _ in 0..clusters {
            let cx = rng.uniform(centres.min.x, centres.max.x);
            let cy = rng.uniform(centres.min.y, centres.max.y);
            for _ in 0..per_cluster {
                let pos = Vec2::new(
                    cx + rng.uniform(-spread, spread),
                    cy + rng.uniform(-spread, spread),
                );
                ids.push(self.add_node(pos, status));
            }
        }
        ids
    }

    // ── Wiring ────────────────────────────────────────────────────────────

    /// Link every node to its `k` nearest neighbors, with `k` drawn per node
    /// from `[k_min, k_max]`.  Returns the number of edges added.
    pub fn connect_nearest(
        &mut self,
        k_min:       usize,
        k_max:       usize,
        rest_length: f32,
        rng:         &mut SimRng,
    ) -> usize {
        let tree = self.spatial_index();
        let k_max = k_max.max(k_min);
        let mut added = 0;
        for i in 0..self.nodes.len() {
            let id = NodeId(i as u32);
            let k = rng.gen_range(k_min..=k_max);
            let nearest: Vec<NodeId> = tree
                .nearest_neighbor_iter(&to_point(self.nodes[i].pos))
                .filter(|e| e.id != id)
                .take(k)
                .map(|e| e.id)
                .collect();
            for other in nearest {
                if self.add_edge(id, other, rest_length) {
                    added += 1;
                }
            }
        }
        added
    }

    /// Link every pair of nodes strictly closer than `radius`.  Returns the
    /// number of edges added.
    pub fn connect_within(&mut self, radius: f32, rest_length: f32) -> usize {
        let tree = self.spatial_index();
        let mut added = 0;
        for i in 0..self.nodes.len() {
            let id = NodeId(i as u32);
            let pos = self.nodes[i].pos;
            let mut close: Vec<NodeId> = tree
                .locate_within_distance(to_point(pos), radius * radius)
                .filter(|e| e.id != id && e.distance_2(&to_point(pos)).sqrt() < radius)
                .map(|e| e.id)
                .collect();
            // R-tree iteration order is structural; sort for a stable edge order.
            close.sort_unstable();
            for other in close {
                if self.add_edge(id, other, rest_length) {
                    added += 1;
                }
            }
        }
        added
    }

    fn spatial_index(&self) -> RTree<NodeEntry> {
        let entries: Vec<NodeEntry> = self
            .nodes
            .iter()
            .map(|n| NodeEntry { point: to_point(n.pos), id: n.id })
            .collect();
        RTree::bulk_load(entries)
    }

    // ── Build ─────────────────────────────────────────────────────────────

    /// Consume the builder and produce a [`Graph`].
    ///
    /// # Errors
    ///
    /// [`GraphError::DanglingEdge`] if an edge names a node that was never
    /// added.
    pub fn build(self) -> GraphResult<Graph> {
        let node_count = self.nodes.len();
        let mut adjacency = vec![Vec::new(); node_count];
        for e in &self.edges {
            if e.a.index() >= node_count || e.b.index() >= node_count {
                return Err(GraphError::DanglingEdge { a: e.a, b: e.b });
            }
            adjacency[e.a.index()].push(e.b);
            adjacency[e.b.index()].push(e.a);
        }
        Ok(Graph {
            nodes: self.nodes,
            edges: self.edges,
            adjacency,
        })
    }
}

impl Default for TopologyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
fn to_point(p: Vec2) -> [f32; 2] {
    [p.x, p.y]
}
