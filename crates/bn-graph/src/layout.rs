//! Force-directed layout: pairwise repulsion, edge springs, damped
//! unit-timestep integration.
//!
//! # Step order
//!
//! 1. **Repulsion**: every node sums an inverse-square push from each other
//!    node closer than `repulsion_cutoff`.  Forces are computed from a
//!    snapshot of the pre-step positions, so the pass is order-independent
//!    (and runs on Rayon with the `parallel` feature).  The force is added to
//!    the velocity, the velocity is damped, and a component is reversed when
//!    the node sits inside the reflect margin on that axis.
//! 2. **Springs**: each edge pulls (or pushes) its endpoints toward its rest
//!    length: `(len - rest) * spring` along the edge, added to `a`, subtracted
//!    from `b`.
//! 3. **Integrate**: `pos += vel`, then clamp into the bounds inset by
//!    `clamp_margin`.
//!
//! Coincident points use [`COINCIDENT_DISTANCE`](bn_core::geo::COINCIDENT_DISTANCE)
//! instead of zero.  Non-finite velocities are zeroed before integration so a
//! single bad value cannot poison the layout.

use bn_core::{Bounds, Vec2};

use crate::Graph;

// ── LayoutParams ──────────────────────────────────────────────────────────────

/// Tunable constants of the integrator.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutParams {
    pub repulsion:        f32,
    pub repulsion_cutoff: f32,
    pub spring:           f32,
    /// Rest length given to edges created by the topology builder.
    pub rest_length:      f32,
    pub damping:          f32,
    pub reflect_margin:   f32,
    pub clamp_margin:     f32,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            repulsion:        200.0,
            repulsion_cutoff: 200.0,
            spring:           0.1,
            rest_length:      100.0,
            damping:          0.9,
            reflect_margin:   50.0,
            clamp_margin:     20.0,
        }
    }
}

// ── ForceLayout ───────────────────────────────────────────────────────────────

/// Stateless integrator; all state lives in the graph's nodes.
#[derive(Copy, Clone, Debug, Default)]
pub struct ForceLayout {
    pub params: LayoutParams,
}

impl ForceLayout {
    pub fn new(params: LayoutParams) -> Self {
        Self { params }
    }

    /// Advance every node of `graph` by one step inside `bounds`.
    pub fn step(&self, graph: &mut Graph, bounds: Bounds) {
        if graph.is_empty() {
            return;
        }
        let p = self.params;

        // ── Phase 1: repulsion, damping, reflection ───────────────────────
        let positions: Vec<Vec2> = graph.nodes.iter().map(|n| n.pos).collect();
        let forces = repulsion_forces(&positions, p.repulsion, p.repulsion_cutoff);
        let reflect = bounds.inset(p.reflect_margin);

        for (node, force) in graph.nodes.iter_mut().zip(forces) {
            node.vel = (node.vel + force) * p.damping;
            if node.pos.x < reflect.min.x || node.pos.x > reflect.max.x {
                node.vel.x = -node.vel.x;
            }
            if node.pos.y < reflect.min.y || node.pos.y > reflect.max.y {
                node.vel.y = -node.vel.y;
            }
        }

        // ── Phase 2: springs ──────────────────────────────────────────────
        for edge in &graph.edges {
            let (ai, bi) = (edge.a.index(), edge.b.index());
            if ai >= graph.nodes.len() || bi >= graph.nodes.len() || ai == bi {
                continue;
            }
            let delta = graph.nodes[bi].pos - graph.nodes[ai].pos;
            let dist = graph.nodes[ai].pos.distance_or_default(graph.nodes[bi].pos);
            let magnitude = (dist - edge.rest_length) * p.spring;
            let pull = delta * (magnitude / dist);
            graph.nodes[ai].vel += pull;
            graph.nodes[bi].vel -= pull;
        }

        // ── Phase 3: integrate + clamp ────────────────────────────────────
        let clamp = bounds.inset(p.clamp_margin);
        for node in graph.nodes.iter_mut() {
            if !node.vel.is_finite() {
                node.vel = Vec2::ZERO;
            }
            node.pos = clamp.clamp(node.pos + node.vel);
        }
    }
}

/// Net repulsive force on each node from all others within `cutoff`.
fn repulsion_forces(positions: &[Vec2], strength: f32, cutoff: f32) -> Vec<Vec2> {
    #[cfg(not(feature = "parallel"))]
    {
        positions
            .iter()
            .enumerate()
            .map(|(i, &p)| repulsion_on(i, p, positions, strength, cutoff))
            .collect()
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        positions
            .par_iter()
            .enumerate()
            .map(|(i, &p)| repulsion_on(i, p, positions, strength, cutoff))
            .collect()
    }
}

fn repulsion_on(i: usize, p: Vec2, positions: &[Vec2], strength: f32, cutoff: f32) -> Vec2 {
    let mut force = Vec2::ZERO;
    for (j, &q) in positions.iter().enumerate() {
        if i == j {
            continue;
        }
        let away = p - q;
        let dist = q.distance_or_default(p);
        if dist >= cutoff {
            continue;
        }
        let magnitude = strength / (dist * dist);
        force += away * (magnitude / dist);
    }
    force
}
