//! Pointer hit-testing.
//!
//! Each scenario maps a canvas point plus the severing flag onto one of the
//! helpers below.  Every helper is a no-op (returning
//! [`InteractionOutcome::Ignored`]) when nothing qualifies.

use bn_core::{NodeId, Vec2};
use bn_graph::{Graph, NodeStatus};
use bn_grid::{CellCoord, CellKind, GridWorld};

/// What a pointer interaction did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum InteractionOutcome {
    Ignored,
    EdgeSevered { a: NodeId, b: NodeId },
    NodeBreached(NodeId),
    NodePatched(NodeId),
    CellBreached(CellCoord),
    FirewallCleared(CellCoord),
}

impl InteractionOutcome {
    pub fn is_ignored(&self) -> bool {
        matches!(self, InteractionOutcome::Ignored)
    }
}

/// Remove the edge whose segment passes nearest `p`, if closer than
/// `threshold`.
pub fn sever_nearest_edge(graph: &mut Graph, p: Vec2, threshold: f32) -> InteractionOutcome {
    graph
        .nearest_edge_within(p, threshold)
        .and_then(|i| graph.remove_edge(i))
        .map_or(InteractionOutcome::Ignored, |e| InteractionOutcome::EdgeSevered { a: e.a, b: e.b })
}

/// Apply the first matching `(from, to)` status rewrite to the node nearest
/// `p` within `radius`.  Only rewrites to `Infected` or `Patched` apply.
pub fn toggle_nearest_node(
    graph:  &mut Graph,
    p:      Vec2,
    radius: f32,
    rules:  &[(NodeStatus, NodeStatus)],
) -> InteractionOutcome {
    let Some(id) = graph.nearest_node_within(p, radius) else {
        return InteractionOutcome::Ignored;
    };
    let Some(node) = graph.node_mut(id) else {
        return InteractionOutcome::Ignored;
    };
    let Some(&(_, to)) = rules.iter().find(|(from, _)| *from == node.status) else {
        return InteractionOutcome::Ignored;
    };
    let outcome = match to {
        NodeStatus::Infected => InteractionOutcome::NodeBreached(id),
        NodeStatus::Patched  => InteractionOutcome::NodePatched(id),
        _                    => return InteractionOutcome::Ignored,
    };
    node.status = to;
    outcome
}

/// Manually infect the safe cell under `p`.
pub fn breach_cell(grid: &mut GridWorld, p: Vec2) -> InteractionOutcome {
    let Some(c) = grid.cell_at_point(p) else { return InteractionOutcome::Ignored };
    if grid.kind(c) != Some(CellKind::Safe) {
        return InteractionOutcome::Ignored;
    }
    grid.set_immediate(c, CellKind::Infected);
    InteractionOutcome::CellBreached(c)
}

/// Revert the firewall cell nearest `p` to safe, if its centre is closer
/// than `threshold`.
pub fn clear_firewall(grid: &mut GridWorld, p: Vec2, threshold: f32) -> InteractionOutcome {
    let Some(c) = grid.nearest_firewall_within(p, threshold) else {
        return InteractionOutcome::Ignored;
    };
    grid.set_immediate(c, CellKind::Safe);
    InteractionOutcome::FirewallCleared(c)
}
