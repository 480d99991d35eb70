//! Contagion rules.
//!
//! | Rule                       | Scenario      | Writes                          |
//! |----------------------------|---------------|---------------------------------|
//! | [`graph_contagion`]        | hunter-killer | node status, in place           |
//! | [`grid_contagion`]         | quarantine    | `Cell::pending` only            |
//! | [`launch_malicious`]       | propagation   | new red packets                 |
//! | [`launch_benign`]          | propagation   | new blue packets                |
//! | [`deliver`]                | propagation   | target node status              |
//!
//! Cadence gating is the caller's job; each function here runs one eligible
//! pass unconditionally.

use bn_agent::{Packet, PacketKind, Population};
use bn_core::{NodeId, SimRng};
use bn_graph::{Graph, NodeStatus};
use bn_grid::{CellKind, GridWorld};

// ── Graph contagion ───────────────────────────────────────────────────────────

/// One hunter-killer infection pass.  Returns the number of newly infected
/// nodes.
///
/// With probability `seed_probability` a random node is picked and, if safe,
/// infected.  Then every edge is visited in order and, in each direction
/// where one endpoint is infected and the other safe, the safe endpoint is
/// infected with probability `edge_probability`.  Edge updates are applied in
/// place, so an infection can travel further along later edges in the same
/// pass.
pub fn graph_contagion(
    graph:            &mut Graph,
    seed_probability: f64,
    edge_probability: f64,
    rng:              &mut SimRng,
) -> usize {
    let mut infected = 0;

    if rng.gen_bool(seed_probability) {
        if let Some(i) = rng.index(graph.node_count()) {
            let node = &mut graph.nodes_mut()[i];
            if node.status == NodeStatus::Safe {
                node.status = NodeStatus::Infected;
                infected += 1;
            }
        }
    }

    for e in 0..graph.edge_count() {
        let edge = graph.edges()[e];
        for (from, to) in [(edge.a, edge.b), (edge.b, edge.a)] {
            if status(graph, from) == Some(NodeStatus::Infected)
                && status(graph, to) == Some(NodeStatus::Safe)
                && rng.gen_bool(edge_probability)
            {
                if let Some(node) = graph.node_mut(to) {
                    node.status = NodeStatus::Infected;
                    infected += 1;
                }
            }
        }
    }
    infected
}

#[inline]
fn status(graph: &Graph, id: NodeId) -> Option<NodeStatus> {
    graph.node(id).map(|n| n.status)
}

// ── Grid contagion ────────────────────────────────────────────────────────────

/// One cellular-automaton pass.  Returns the number of cells newly marked
/// for infection.
///
/// Every currently infected cell tries each safe 4-neighbor with
/// `probability`.  Reads come from `Cell::current`, writes go to
/// `Cell::pending`; nothing is visible until [`GridWorld::commit`].
pub fn grid_contagion(grid: &mut GridWorld, probability: f64, rng: &mut SimRng) -> usize {
    let sources: Vec<_> = grid
        .coords()
        .filter(|&c| grid.kind(c) == Some(CellKind::Infected))
        .collect();

    let mut marked = 0;
    for source in sources {
        let targets: Vec<_> = grid.neighbors4(source).collect();
        for target in targets {
            let Some(cell) = grid.get(target).copied() else { continue };
            if cell.current != CellKind::Safe {
                continue;
            }
            if rng.gen_bool(probability) {
                if cell.pending != CellKind::Infected {
                    marked += 1;
                }
                grid.set_pending(target, CellKind::Infected);
            }
        }
    }
    marked
}

// ── Competitive diffusion ─────────────────────────────────────────────────────

/// Every infected node launches one red packet at a random neighbor, unless
/// that neighbor is already infected.  Returns the number launched.
pub fn launch_malicious(graph: &Graph, packets: &mut Population<Packet>, rng: &mut SimRng) -> usize {
    let mut launched = 0;
    for node in graph.nodes().iter().filter(|n| n.status == NodeStatus::Infected) {
        let Some(&target) = rng.choose(graph.neighbors(node.id)) else { continue };
        let Some(dest) = graph.node(target) else { continue };
        if dest.status == NodeStatus::Infected {
            continue;
        }
        let (source, from, to) = (node.id, node.pos, dest.pos);
        packets.spawn(|id| Packet::launch(id, PacketKind::Malicious, source, from, target, to));
        launched += 1;
    }
    launched
}

/// Every patched node launches a blue packet at each vulnerable neighbor.
/// Returns the number launched.
pub fn launch_benign(graph: &Graph, packets: &mut Population<Packet>) -> usize {
    let mut launched = 0;
    for node in graph.nodes().iter().filter(|n| n.status == NodeStatus::Patched) {
        for &target in graph.neighbors(node.id) {
            let Some(dest) = graph.node(target) else { continue };
            if dest.status != NodeStatus::Vulnerable {
                continue;
            }
            let (source, from, to) = (node.id, node.pos, dest.pos);
            packets.spawn(|id| Packet::launch(id, PacketKind::Benign, source, from, target, to));
            launched += 1;
        }
    }
    launched
}

/// Apply an arrived packet.  Both kinds convert only vulnerable nodes, so
/// patched nodes are immune to red and infected nodes ignore blue.  Returns
/// `true` when the target changed.
pub fn deliver(graph: &mut Graph, packet: &Packet) -> bool {
    let Some(node) = graph.node_mut(packet.target) else { return false };
    if node.status != NodeStatus::Vulnerable {
        return false;
    }
    node.status = match packet.kind {
        PacketKind::Malicious => NodeStatus::Infected,
        PacketKind::Benign    => NodeStatus::Patched,
    };
    true
}
