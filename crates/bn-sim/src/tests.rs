//! Unit and property tests for bn-sim.
//!
//! Scenario phases are driven directly through `TickContext` where a test
//! needs to isolate one phase; controller tests go through the public API.

#[cfg(test)]
mod helpers {
    use bn_core::{Bounds, Controls, NodeId, SimRng, Tick, Vec2};
    use bn_graph::{Graph, NodeStatus, TopologyBuilder};

    use crate::{Scenario, SimObserver, ScenarioStats, Snapshot, TickContext};

    pub fn canvas() -> Bounds {
        Bounds::from_size(800.0, 600.0)
    }

    /// `n` nodes on a horizontal line `gap` apart starting at (100, 100),
    /// consecutive nodes linked.  All `status`.
    pub fn chain(n: usize, gap: f32, status: NodeStatus) -> Graph {
        let mut b = TopologyBuilder::new();
        let ids: Vec<NodeId> = (0..n)
            .map(|i| b.add_node(Vec2::new(100.0 + gap * i as f32, 100.0), status))
            .collect();
        for pair in ids.windows(2) {
            b.add_edge(pair[0], pair[1], gap);
        }
        b.build().unwrap()
    }

    /// Run one phase-complete tick on a bare scenario.
    pub fn step(scenario: &mut dyn Scenario, tick: u64, controls: &Controls, rng: &mut SimRng) {
        let mut ctx = TickContext { tick: Tick(tick), controls, rng };
        scenario.layout();
        scenario.spread(&mut ctx);
        scenario.agents(&mut ctx);
        scenario.commit();
    }

    /// Run only the agents phase.
    pub fn agents_only(scenario: &mut dyn Scenario, controls: &Controls, rng: &mut SimRng) {
        let mut ctx = TickContext { tick: Tick(1), controls, rng };
        scenario.agents(&mut ctx);
    }

    #[derive(Default)]
    pub struct Recorder {
        pub starts:    Vec<Tick>,
        pub ends:      Vec<ScenarioStats>,
        pub snapshots: Vec<Tick>,
        pub teardowns: usize,
    }

    impl SimObserver for Recorder {
        fn on_tick_start(&mut self, tick: Tick) {
            self.starts.push(tick);
        }
        fn on_tick_end(&mut self, _tick: Tick, stats: &ScenarioStats) {
            self.ends.push(*stats);
        }
        fn on_snapshot(&mut self, tick: Tick, _snapshot: &Snapshot) {
            self.snapshots.push(tick);
        }
        fn on_teardown(&mut self, _final_tick: Tick) {
            self.teardowns += 1;
        }
    }
}

// ── Spread rules ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod spread {
    use bn_agent::{Packet, PacketKind, Population};
    use bn_core::{AgentId, NodeId, SimRng, Vec2};
    use bn_graph::NodeStatus;
    use bn_grid::{CellCoord, CellKind, GridWorld};

    use crate::spread::{deliver, graph_contagion, grid_contagion, launch_benign, launch_malicious};

    fn grid40() -> GridWorld {
        let mut g = GridWorld::new(40, 40, 10.0, Vec2::ZERO).unwrap();
        g.set_immediate(CellCoord::new(20, 20), CellKind::Infected);
        g
    }

    #[test]
    fn grid_pass_reads_one_snapshot() {
        let mut g = grid40();
        let mut rng = SimRng::new(1);
        let marked = grid_contagion(&mut g, 1.0, &mut rng);
        assert_eq!(marked, 4);
        // Nothing visible before commit.
        assert_eq!(g.counts().infected, 1);
        g.commit();
        assert_eq!(g.counts().infected, 5);
        // A freshly marked neighbor did not spread further within the pass.
        assert_eq!(g.kind(CellCoord::new(22, 20)), Some(CellKind::Safe));
        assert_eq!(g.kind(CellCoord::new(21, 21)), Some(CellKind::Safe));
    }

    #[test]
    fn centre_seed_single_pass_infects_at_most_four() {
        for seed in 0..64 {
            let mut g = grid40();
            let mut rng = SimRng::new(seed);
            let newly = grid_contagion(&mut g, 0.3, &mut rng);
            assert!(newly <= 4);
            g.commit();
            assert_eq!(g.counts().infected, 1 + newly);
            assert_eq!(g.kind(CellCoord::new(20, 20)), Some(CellKind::Infected));
        }
    }

    #[test]
    fn firewalls_block_grid_spread() {
        let mut g = GridWorld::new(3, 3, 10.0, Vec2::ZERO).unwrap();
        g.set_immediate(CellCoord::new(1, 1), CellKind::Infected);
        for c in [(0, 1), (2, 1), (1, 0), (1, 2)] {
            g.set_immediate(CellCoord::new(c.0, c.1), CellKind::Firewall);
        }
        let mut rng = SimRng::new(2);
        for _ in 0..20 {
            assert_eq!(grid_contagion(&mut g, 1.0, &mut rng), 0);
            g.commit();
        }
        assert_eq!(g.counts().firewall, 4);
        assert_eq!(g.counts().infected, 1);
    }

    #[test]
    fn graph_edges_apply_in_place() {
        let mut g = super::helpers::chain(3, 100.0, NodeStatus::Safe);
        g.node_mut(NodeId(0)).unwrap().status = NodeStatus::Infected;
        let mut rng = SimRng::new(3);
        assert_eq!(graph_contagion(&mut g, 0.0, 1.0, &mut rng), 2);
        assert_eq!(g.count_status(NodeStatus::Infected), 3);
    }

    #[test]
    fn graph_contagion_only_targets_safe() {
        let mut g = super::helpers::chain(3, 100.0, NodeStatus::Safe);
        g.node_mut(NodeId(0)).unwrap().status = NodeStatus::Infected;
        g.node_mut(NodeId(1)).unwrap().status = NodeStatus::Recovering;
        let mut rng = SimRng::new(4);
        assert_eq!(graph_contagion(&mut g, 0.0, 1.0, &mut rng), 0);
        assert_eq!(g.node(NodeId(1)).unwrap().status, NodeStatus::Recovering);
        assert_eq!(g.node(NodeId(2)).unwrap().status, NodeStatus::Safe);
    }

    #[test]
    fn seed_always_lands_on_safe_node() {
        let mut g = super::helpers::chain(1, 100.0, NodeStatus::Safe);
        let mut rng = SimRng::new(5);
        assert_eq!(graph_contagion(&mut g, 1.0, 0.0, &mut rng), 1);
        // Already infected: a second seed does nothing.
        assert_eq!(graph_contagion(&mut g, 1.0, 0.0, &mut rng), 0);
    }

    #[test]
    fn red_skips_infected_targets() {
        let mut g = super::helpers::chain(2, 50.0, NodeStatus::Infected);
        let mut packets = Population::new();
        let mut rng = SimRng::new(6);
        assert_eq!(launch_malicious(&g, &mut packets, &mut rng), 0);

        g.node_mut(NodeId(1)).unwrap().status = NodeStatus::Patched;
        // Patched targets are still launched at; delivery is what fails.
        assert_eq!(launch_malicious(&g, &mut packets, &mut rng), 1);
        assert_eq!(packets.get(0).unwrap().target, NodeId(1));
    }

    #[test]
    fn blue_targets_every_vulnerable_neighbor() {
        // 0 - 1 - 2 with 1 patched, 0 vulnerable, 2 infected.
        let mut g = super::helpers::chain(3, 50.0, NodeStatus::Vulnerable);
        g.node_mut(NodeId(1)).unwrap().status = NodeStatus::Patched;
        g.node_mut(NodeId(2)).unwrap().status = NodeStatus::Infected;
        let mut packets = Population::new();
        assert_eq!(launch_benign(&g, &mut packets), 1);
        let p = packets.get(0).unwrap();
        assert_eq!((p.source, p.target, p.kind), (NodeId(1), NodeId(0), PacketKind::Benign));
    }

    #[test]
    fn delivery_converts_only_vulnerable() {
        let mut g = super::helpers::chain(3, 50.0, NodeStatus::Vulnerable);
        g.node_mut(NodeId(1)).unwrap().status = NodeStatus::Patched;
        g.node_mut(NodeId(2)).unwrap().status = NodeStatus::Infected;
        let packet = |kind, target| Packet::launch(AgentId(0), kind, NodeId(0), Vec2::ZERO, target, Vec2::ZERO);

        assert!(!deliver(&mut g, &packet(PacketKind::Malicious, NodeId(1))));
        assert_eq!(g.node(NodeId(1)).unwrap().status, NodeStatus::Patched);
        assert!(!deliver(&mut g, &packet(PacketKind::Benign, NodeId(2))));
        assert_eq!(g.node(NodeId(2)).unwrap().status, NodeStatus::Infected);
        assert!(deliver(&mut g, &packet(PacketKind::Malicious, NodeId(0))));
        assert_eq!(g.node(NodeId(0)).unwrap().status, NodeStatus::Infected);
        assert!(!deliver(&mut g, &packet(PacketKind::Benign, NodeId(9))));
    }
}

// ── Hunter-killer ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod hunter_killer {
    use bn_agent::PatrolState;
    use bn_core::{Controls, NodeId, SimRng, Vec2};
    use bn_graph::NodeStatus;

    use super::helpers::{agents_only, canvas, chain, step};
    use crate::{HunterKiller, HunterKillerParams, InteractionOutcome, Scenario};

    fn single_node(status: NodeStatus) -> HunterKiller {
        let mut g = chain(1, 0.0, status);
        g.node_mut(NodeId(0)).unwrap().pos = Vec2::new(400.0, 300.0);
        HunterKiller::from_graph(g, canvas(), HunterKillerParams::default())
    }

    #[test]
    fn isolated_node_agent_patrols_forever() {
        let mut hk = single_node(NodeStatus::Safe);
        let mut rng = SimRng::new(1);
        assert_eq!(hk.reconcile_population(1, &mut rng).spawned, 1);
        let controls = Controls::default();
        for _ in 0..500 {
            agents_only(&mut hk, &controls, &mut rng);
            let agent = hk.agents().get(0).unwrap();
            assert_eq!(agent.state, PatrolState::Patrol);
            assert_eq!(agent.current, NodeId(0));
        }
    }

    #[test]
    fn pressure_only_builds_on_infected_nodes() {
        let mut hk = single_node(NodeStatus::Safe);
        let mut rng = SimRng::new(2);
        hk.reconcile_population(3, &mut rng);
        let controls = Controls::default();
        for _ in 0..30 {
            agents_only(&mut hk, &controls, &mut rng);
        }
        assert_eq!(hk.graph().node(NodeId(0)).unwrap().pressure, 0.0);
    }

    #[test]
    fn recovery_cycle_takes_exact_countdown() {
        let mut hk = single_node(NodeStatus::Infected);
        let mut rng = SimRng::new(3);
        hk.reconcile_population(1, &mut rng);
        let controls = Controls::default();
        let node = |hk: &HunterKiller| hk.graph().node(NodeId(0)).unwrap().clone();

        // One attacking arrival per tick: pressure exceeds 10 on the 11th.
        for i in 1..=10 {
            agents_only(&mut hk, &controls, &mut rng);
            assert_eq!(node(&hk).status, NodeStatus::Infected);
            assert_eq!(node(&hk).pressure, i as f32);
            assert_eq!(hk.agents().get(0).unwrap().state, PatrolState::Attack);
        }
        agents_only(&mut hk, &controls, &mut rng);
        assert_eq!(node(&hk).status, NodeStatus::Recovering);
        assert_eq!(node(&hk).recovery, Some(60));

        for _ in 0..59 {
            agents_only(&mut hk, &controls, &mut rng);
            assert_eq!(node(&hk).status, NodeStatus::Recovering);
        }
        agents_only(&mut hk, &controls, &mut rng);
        let done = node(&hk);
        assert_eq!(done.status, NodeStatus::Safe);
        assert_eq!(done.pressure, 0.0);
        assert_eq!(done.recovery, None);
        assert_eq!(hk.agents().get(0).unwrap().state, PatrolState::Patrol);
    }

    #[test]
    fn agents_walk_edges() {
        let g = chain(2, 100.0, NodeStatus::Safe);
        let mut hk = HunterKiller::from_graph(g, canvas(), HunterKillerParams::default());
        let mut rng = SimRng::new(4);
        hk.reconcile_population(1, &mut rng);
        let start = hk.agents().get(0).unwrap().current;
        let controls = Controls::default();
        // 100 units at speed 2: arrival within ~50 ticks.
        for _ in 0..60 {
            agents_only(&mut hk, &controls, &mut rng);
        }
        let agent = hk.agents().get(0).unwrap();
        assert_ne!(agent.current, start);
    }

    #[test]
    fn severing_removes_exactly_one_edge() {
        let g = chain(3, 100.0, NodeStatus::Safe);
        let mut hk = HunterKiller::from_graph(g, canvas(), HunterKillerParams::default());
        assert!(hk.interact(Vec2::new(250.0, 300.0), true).is_ignored());
        assert_eq!(hk.graph().edge_count(), 2);
        let out = hk.interact(Vec2::new(250.0, 108.0), true);
        assert_eq!(out, InteractionOutcome::EdgeSevered { a: NodeId(1), b: NodeId(2) });
        assert_eq!(hk.graph().edge_count(), 1);
        assert!(!hk.graph().has_edge(NodeId(1), NodeId(2)));
    }

    #[test]
    fn click_breaches_safe_node_only() {
        let g = chain(2, 100.0, NodeStatus::Safe);
        let mut hk = HunterKiller::from_graph(g, canvas(), HunterKillerParams::default());
        let p = Vec2::new(110.0, 105.0);
        assert_eq!(hk.interact(p, false), InteractionOutcome::NodeBreached(NodeId(0)));
        assert!(hk.interact(p, false).is_ignored());
        assert!(hk.interact(Vec2::new(150.0, 100.0), false).is_ignored());
    }

    #[test]
    fn generated_layout_stays_in_bounds() {
        let mut rng = SimRng::new(5);
        let mut hk = HunterKiller::generate(HunterKillerParams::default(), canvas(), &mut rng).unwrap();
        assert_eq!(hk.graph().node_count(), 60);
        hk.reconcile_population(50, &mut rng);
        let controls = Controls::default();
        for t in 0..200 {
            step(&mut hk, t, &controls, &mut rng);
        }
        let inner = canvas().inset(20.0);
        assert!(hk.graph().nodes().iter().all(|n| inner.contains(n.pos)));
        assert_eq!(hk.agent_count(), 50);
    }
}

// ── Quarantine ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod quarantine {
    use bn_agent::WandererState;
    use bn_core::{Controls, SimRng, Vec2};
    use bn_grid::{CellCoord, CellKind, GridWorld};

    use super::helpers::{agents_only, canvas, step};
    use crate::{InteractionOutcome, Quarantine, QuarantineParams, Scenario};

    fn small() -> Quarantine {
        let grid = GridWorld::new(5, 5, 10.0, Vec2::ZERO).unwrap();
        Quarantine::from_grid(grid, canvas(), QuarantineParams::default())
    }

    #[test]
    fn wanderer_dies_on_infected_cell() {
        let mut q = small();
        q.grid_mut().set_immediate(CellCoord::new(2, 2), CellKind::Infected);
        assert!(q.spawn_at(CellCoord::new(2, 2)));
        assert!(q.spawn_at(CellCoord::new(0, 0)));
        agents_only(&mut q, &Controls::default(), &mut SimRng::new(1));
        assert_eq!(q.agent_count(), 1);
    }

    #[test]
    fn wanderer_seals_next_to_infection() {
        let mut q = small();
        q.grid_mut().set_immediate(CellCoord::new(2, 2), CellKind::Infected);
        q.spawn_at(CellCoord::new(1, 2));
        agents_only(&mut q, &Controls::default(), &mut SimRng::new(2));

        let w = q.agents().get(0).unwrap().clone();
        assert_eq!(w.state, WandererState::Sealing);
        assert_ne!(w.cell, CellCoord::new(2, 2));
        assert_ne!(w.cell, CellCoord::new(1, 2));
        // Buffered until commit.
        assert_eq!(q.grid().kind(CellCoord::new(1, 2)), Some(CellKind::Safe));
        q.commit();
        assert_eq!(q.grid().kind(CellCoord::new(1, 2)), Some(CellKind::Firewall));
    }

    #[test]
    fn wanderer_far_from_infection_just_wanders() {
        let mut q = small();
        q.spawn_at(CellCoord::new(0, 0));
        agents_only(&mut q, &Controls::default(), &mut SimRng::new(3));
        let w = q.agents().get(0).unwrap();
        assert_eq!(w.state, WandererState::Wandering);
        assert!(w.cell == CellCoord::new(1, 0) || w.cell == CellCoord::new(0, 1));
        q.commit();
        assert_eq!(q.grid().counts().firewall, 0);
    }

    #[test]
    fn firewall_is_never_infected_by_spread() {
        let mut q = small();
        q.grid_mut().set_immediate(CellCoord::new(2, 2), CellKind::Infected);
        q.grid_mut().set_immediate(CellCoord::new(2, 1), CellKind::Firewall);
        let controls = Controls { spread_rate: 100.0, ..Controls::default() };
        let mut rng = SimRng::new(4);
        for t in 0..200 {
            step(&mut q, t, &controls, &mut rng);
        }
        assert_eq!(q.grid().kind(CellCoord::new(2, 1)), Some(CellKind::Firewall));
        assert_eq!(q.grid().counts().infected, 24);
    }

    #[test]
    fn spread_follows_rate_cadence() {
        let params = QuarantineParams { infection_probability: 1.0, ..QuarantineParams::default() };
        let mut q = Quarantine::generate(params, canvas()).unwrap();
        let controls = Controls { spread_rate: 5.0, ..Controls::default() };
        let mut rng = SimRng::new(5);
        // Period max(1, 11 - 5) = 6.
        step(&mut q, 1, &controls, &mut rng);
        assert_eq!(q.grid().counts().infected, 1);
        step(&mut q, 6, &controls, &mut rng);
        assert_eq!(q.grid().counts().infected, 5);
    }

    #[test]
    fn snapshot_carries_grid_and_wanderer_positions() {
        let mut q = small();
        q.grid_mut().set_immediate(CellCoord::new(4, 1), CellKind::Infected);
        q.spawn_at(CellCoord::new(0, 0));
        let snap = q.snapshot(bn_core::Tick(7));
        let grid = snap.grid.expect("grid view");
        assert_eq!(grid.kind_at(4, 1), Some(CellKind::Infected));
        assert_eq!(grid.kind_at(0, 0), Some(CellKind::Safe));
        assert_eq!(grid.kind_at(5, 0), None);
        assert!(snap.nodes.is_empty());
        assert_eq!(snap.agents[0].pos, Vec2::new(5.0, 5.0));
        assert_eq!(snap.agents[0].state, "wandering");
    }

    #[test]
    fn population_capped() {
        let mut q = Quarantine::generate(QuarantineParams::default(), canvas()).unwrap();
        let mut rng = SimRng::new(6);
        q.reconcile_population(500, &mut rng);
        assert_eq!(q.agent_count(), 100);
        q.reconcile_population(30, &mut rng);
        assert_eq!(q.agent_count(), 30);
    }

    #[test]
    fn severing_clears_nearest_firewall() {
        let mut q = small();
        q.grid_mut().set_immediate(CellCoord::new(3, 3), CellKind::Firewall);
        // Cell (3,3) centre is (35,35).
        assert!(q.interact(Vec2::new(5.0, 5.0), true).is_ignored());
        assert_eq!(
            q.interact(Vec2::new(38.0, 31.0), true),
            InteractionOutcome::FirewallCleared(CellCoord::new(3, 3)),
        );
        assert_eq!(q.grid().kind(CellCoord::new(3, 3)), Some(CellKind::Safe));
    }

    #[test]
    fn click_breaches_safe_cell() {
        let mut q = small();
        q.grid_mut().set_immediate(CellCoord::new(0, 1), CellKind::Firewall);
        assert_eq!(
            q.interact(Vec2::new(12.0, 3.0), false),
            InteractionOutcome::CellBreached(CellCoord::new(1, 0)),
        );
        assert!(q.interact(Vec2::new(5.0, 15.0), false).is_ignored());
        assert!(q.interact(Vec2::new(75.0, 15.0), false).is_ignored());
        let cell = q.grid().get(CellCoord::new(1, 0)).unwrap();
        assert_eq!((cell.current, cell.pending), (CellKind::Infected, CellKind::Infected));
    }
}

// ── Propagation ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod propagation {
    use bn_core::{Controls, NodeId, SimRng, Vec2};
    use bn_graph::NodeStatus;

    use super::helpers::{canvas, chain, step};
    use crate::{InteractionOutcome, Propagation, PropagationParams, Scenario};

    /// red ── v ── v ── v ── blue, 50 apart.
    fn red_blue_chain() -> Propagation {
        let mut g = chain(5, 50.0, NodeStatus::Vulnerable);
        g.node_mut(NodeId(0)).unwrap().status = NodeStatus::Infected;
        g.node_mut(NodeId(4)).unwrap().status = NodeStatus::Patched;
        Propagation::from_graph(g, canvas(), PropagationParams::default())
    }

    #[test]
    fn chain_settles_into_infected_or_patched() {
        let mut p = red_blue_chain();
        let mut rng = SimRng::new(1);
        p.reconcile_population(200, &mut rng);
        let controls = Controls::default();
        for t in 0..3_000 {
            step(&mut p, t, &controls, &mut rng);
        }
        assert!(p.is_settled());
        let stats = p.stats(bn_core::Tick(3_000));
        assert_eq!(stats.vulnerable, 0);
        assert_eq!(stats.infected + stats.patched, 5);
        // Seeds never flip.
        assert_eq!(p.status_of(NodeId(0)), Some(NodeStatus::Infected));
        assert_eq!(p.status_of(NodeId(4)), Some(NodeStatus::Patched));
    }

    #[test]
    fn patched_nodes_survive_red_traffic() {
        let mut g = chain(2, 50.0, NodeStatus::Infected);
        g.node_mut(NodeId(1)).unwrap().status = NodeStatus::Patched;
        let mut p = Propagation::from_graph(g, canvas(), PropagationParams::default());
        let controls = Controls { spread_rate: 100.0, ..Controls::default() };
        let mut rng = SimRng::new(2);
        for t in 0..500 {
            step(&mut p, t, &controls, &mut rng);
        }
        assert_eq!(p.status_of(NodeId(1)), Some(NodeStatus::Patched));
    }

    #[test]
    fn blue_cadence_tracks_population() {
        let mut p = red_blue_chain();
        let mut rng = SimRng::new(3);
        p.reconcile_population(0, &mut rng);
        assert_eq!(p.blue_cadence().period(), 40);
        p.reconcile_population(200, &mut rng);
        assert_eq!(p.blue_cadence().period(), 20);
        p.reconcile_population(500, &mut rng);
        assert_eq!(p.blue_cadence().period(), 1);
        assert_eq!(p.agent_count(), 0);
        assert_eq!(p.red_cadence(5.0).period(), 10);
    }

    #[test]
    fn packets_are_removed_on_arrival() {
        let mut p = red_blue_chain();
        let mut rng = SimRng::new(4);
        let controls = Controls { spread_rate: 5.0, ..Controls::default() };
        // Red period 10, blue period 40: tick 0 launches one of each.
        step(&mut p, 0, &controls, &mut rng);
        assert_eq!(p.agent_count(), 2);
        // Second red launch at tick 10; nothing has covered 50 units yet.
        for t in 1..12 {
            step(&mut p, t, &controls, &mut rng);
        }
        assert_eq!(p.agent_count(), 3);
        assert_eq!(p.status_of(NodeId(1)), Some(NodeStatus::Vulnerable));

        // The first red lands on its 13th advance.
        step(&mut p, 12, &controls, &mut rng);
        assert_eq!(p.agent_count(), 2);
        assert_eq!(p.status_of(NodeId(1)), Some(NodeStatus::Infected));

        // Blue (speed 2) lands on its 24th advance.
        for t in 13..24 {
            step(&mut p, t, &controls, &mut rng);
        }
        assert_eq!(p.status_of(NodeId(3)), Some(NodeStatus::Patched));
    }

    #[test]
    fn generated_map_is_seeded() {
        let mut rng = SimRng::new(5);
        let p = Propagation::generate(PropagationParams::default(), canvas(), &mut rng).unwrap();
        let g = p.graph();
        assert_eq!(g.node_count(), 500);
        assert_eq!(p.status_of(NodeId(0)), Some(NodeStatus::Infected));
        assert_eq!(p.status_of(NodeId(499)), Some(NodeStatus::Patched));
        assert_eq!(g.count_status(NodeStatus::Vulnerable), 498);
        assert!(g.edges().iter().all(|e| {
            let (a, b) = (g.node(e.a).unwrap().pos, g.node(e.b).unwrap().pos);
            a.distance(b) < 60.0
        }));
    }

    #[test]
    fn clicks_breach_and_override() {
        let mut p = red_blue_chain();
        assert_eq!(p.interact(Vec2::new(152.0, 103.0), false), InteractionOutcome::NodeBreached(NodeId(1)));
        assert_eq!(p.interact(Vec2::new(152.0, 103.0), false), InteractionOutcome::NodePatched(NodeId(1)));
        assert!(p.interact(Vec2::new(152.0, 103.0), false).is_ignored());
        // Too far from any node (radius 10).
        assert!(p.interact(Vec2::new(125.0, 100.0), false).is_ignored());
    }

    #[test]
    fn severing_picks_single_nearest_edge() {
        let mut p = red_blue_chain();
        // 5 units below the midpoint of edge 1-2; edges 0-1 and 2-3 are 25+ away.
        let out = p.interact(Vec2::new(175.0, 105.0), true);
        assert_eq!(out, InteractionOutcome::EdgeSevered { a: NodeId(1), b: NodeId(2) });
        assert_eq!(p.graph().edge_count(), 3);
        assert!(p.interact(Vec2::new(175.0, 200.0), true).is_ignored());
        assert_eq!(p.graph().edge_count(), 3);
    }
}

// ── Controller ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod controller {
    use bn_core::config::MAX_TARGET_POPULATION;
    use bn_core::{Controls, SimConfig, Vec2};
    use bn_grid::{CellCoord, CellKind, GridWorld};

    use super::helpers::{canvas, Recorder};
    use crate::{
        InteractionOutcome, NoopObserver, Quarantine, QuarantineParams, ScenarioController,
        ScenarioKind, SWARM_SIZE,
    };

    fn running(kind: ScenarioKind) -> ScenarioController {
        let mut ctl = ScenarioController::new(SimConfig::default()).unwrap();
        ctl.start(kind).unwrap();
        ctl
    }

    #[test]
    fn rejects_degenerate_canvas() {
        let config = SimConfig { width: 0.0, ..SimConfig::default() };
        assert!(ScenarioController::new(config).is_err());
    }

    #[test]
    fn starts_every_scenario() {
        for kind in ScenarioKind::ALL {
            let mut ctl = running(kind);
            assert_eq!(ctl.kind(), Some(kind));
            ctl.run_ticks(5, &mut NoopObserver);
            assert_eq!(ctl.current_tick().0, 5);
            assert_eq!(ctl.stats().unwrap().kind, kind);
        }
    }

    #[test]
    fn scenario_names_round_trip() {
        for kind in ScenarioKind::ALL {
            assert_eq!(kind.as_str().parse::<ScenarioKind>().unwrap(), kind);
        }
        assert!("quarantine-2".parse::<ScenarioKind>().is_err());
    }

    #[test]
    fn grow_keeps_prefix_shrink_truncates() {
        let mut ctl = running(ScenarioKind::HunterKiller);
        ctl.set_target_population(10);
        ctl.run_ticks(20, &mut NoopObserver);
        let before = ctl.snapshot().unwrap().agents;
        assert_eq!(before.len(), 10);

        ctl.set_target_population(15);
        let grown = ctl.snapshot().unwrap().agents;
        assert_eq!(grown.len(), 15);
        assert_eq!(&grown[..10], before.as_slice());

        ctl.set_target_population(4);
        let shrunk = ctl.snapshot().unwrap().agents;
        assert_eq!(shrunk.len(), 4);
        assert_eq!(&shrunk[..], &before[..4]);
    }

    #[test]
    fn control_edits_refill_rule_deaths() {
        let mut grid = GridWorld::new(3, 3, 10.0, Vec2::ZERO).unwrap();
        let coords: Vec<CellCoord> = grid.coords().collect();
        for c in coords {
            grid.set_immediate(c, CellKind::Infected);
        }
        let mut ctl = ScenarioController::new(SimConfig::default()).unwrap();
        ctl.set_target_population(20);
        ctl.start_with(Box::new(Quarantine::from_grid(grid, canvas(), QuarantineParams::default())));
        assert_eq!(ctl.stats().unwrap().agents, 20);

        // Every cell is infected, so one tick kills every wanderer.
        ctl.tick(&mut NoopObserver);
        assert_eq!(ctl.stats().unwrap().agents, 0);

        // Identical values, pause and speed edits do not reconcile.
        let unchanged = *ctl.controls();
        ctl.apply_controls(unchanged);
        ctl.set_paused(true);
        ctl.set_paused(false);
        ctl.set_speed_multiplier(2.0);
        assert_eq!(ctl.stats().unwrap().agents, 0);

        ctl.set_spread_rate(7.0);
        assert_eq!(ctl.stats().unwrap().agents, 20);

        ctl.tick(&mut NoopObserver);
        assert_eq!(ctl.stats().unwrap().agents, 0);
        ctl.set_severing_mode(true);
        assert_eq!(ctl.stats().unwrap().agents, 20);

        ctl.set_target_population(7);
        assert_eq!(ctl.stats().unwrap().agents, 7);
    }

    #[test]
    fn oversized_target_is_capped() {
        let mut ctl = running(ScenarioKind::HunterKiller);
        ctl.set_target_population(u32::MAX);
        assert_eq!(ctl.controls().target_population, MAX_TARGET_POPULATION);
        assert_eq!(ctl.stats().unwrap().agents, MAX_TARGET_POPULATION as usize);
        ctl.deploy_swarm();
        assert_eq!(ctl.controls().target_population, MAX_TARGET_POPULATION);
    }

    #[test]
    fn deploy_swarm_adds_fifty() {
        let mut ctl = running(ScenarioKind::HunterKiller);
        let before = ctl.controls().target_population;
        ctl.deploy_swarm();
        assert_eq!(ctl.controls().target_population, before + SWARM_SIZE);
        assert_eq!(ctl.stats().unwrap().agents, (before + SWARM_SIZE) as usize);
    }

    #[test]
    fn controls_are_clamped() {
        let mut ctl = running(ScenarioKind::Propagation);
        ctl.set_spread_rate(500.0);
        assert_eq!(ctl.controls().spread_rate, 100.0);
        ctl.set_spread_rate(f32::NAN);
        assert_eq!(ctl.controls().spread_rate, Controls::default().spread_rate);
        ctl.set_speed_multiplier(0.0);
        assert_eq!(ctl.controls().speed_multiplier, 0.5);
    }

    #[test]
    fn paused_ticks_change_nothing_but_interaction_applies() {
        let mut ctl = running(ScenarioKind::HunterKiller);
        ctl.run_ticks(10, &mut NoopObserver);
        ctl.set_paused(true);
        let frozen = ctl.snapshot().unwrap();
        let mut rec = Recorder::default();
        ctl.run_ticks(25, &mut rec);
        assert_eq!(ctl.snapshot().unwrap(), frozen);
        assert!(rec.starts.is_empty());

        let edge = frozen.edges[0];
        let a = frozen.nodes[edge.a.index()].pos;
        let b = frozen.nodes[edge.b.index()].pos;
        let mid = Vec2::new((a.x + b.x) * 0.5, (a.y + b.y) * 0.5);
        let out = ctl.interact_with_mode(mid, true);
        assert!(matches!(out, InteractionOutcome::EdgeSevered { .. }));
        assert_eq!(ctl.snapshot().unwrap().edges.len(), frozen.edges.len() - 1);
    }

    #[test]
    fn interaction_uses_severing_flag_and_bounds() {
        let mut ctl = running(ScenarioKind::Quarantine);
        assert!(ctl.interact(Vec2::new(-5.0, 10.0)).is_ignored());
        assert!(ctl.interact(Vec2::new(10.0, 900.0)).is_ignored());
        // Default canvas 800x600 fits 15-unit cells from x = 100.
        let p = Vec2::new(107.0, 7.0);
        assert_eq!(ctl.interact(p), InteractionOutcome::CellBreached(CellCoord::new(0, 0)));
        ctl.set_severing_mode(true);
        assert!(ctl.interact(p).is_ignored());
    }

    #[test]
    fn teardown_is_idempotent() {
        let mut ctl = running(ScenarioKind::Quarantine);
        ctl.run_ticks(3, &mut NoopObserver);
        let mut rec = Recorder::default();
        ctl.teardown_with(&mut rec);
        ctl.teardown_with(&mut rec);
        ctl.teardown();
        assert_eq!(rec.teardowns, 1);
        assert!(!ctl.is_running());
        ctl.run_ticks(5, &mut rec);
        assert!(rec.starts.is_empty());
        assert_eq!(ctl.current_tick().0, 0);
        assert!(ctl.snapshot().is_none());
        assert!(ctl.interact(Vec2::new(400.0, 300.0)).is_ignored());

        // Restart after teardown works.
        ctl.start(ScenarioKind::HunterKiller).unwrap();
        assert!(ctl.is_running());
    }

    #[test]
    fn observer_sees_every_tick_and_interval_snapshots() {
        let config = SimConfig { snapshot_interval_ticks: 5, ..SimConfig::default() };
        let mut ctl = ScenarioController::new(config).unwrap();
        ctl.start(ScenarioKind::Propagation).unwrap();
        let mut rec = Recorder::default();
        ctl.run_ticks(12, &mut rec);
        assert_eq!(rec.starts.len(), 12);
        assert_eq!(rec.ends.len(), 12);
        let snaps: Vec<u64> = rec.snapshots.iter().map(|t| t.0).collect();
        assert_eq!(snaps, vec![0, 5, 10]);
        assert_eq!(rec.ends[3].tick.0, 3);
    }

    #[test]
    fn same_seed_same_run() {
        for kind in ScenarioKind::ALL {
            let mut a = running(kind);
            let mut b = running(kind);
            a.run_ticks(40, &mut NoopObserver);
            b.run_ticks(40, &mut NoopObserver);
            assert_eq!(a.snapshot(), b.snapshot(), "{kind} diverged");
        }
    }

    #[test]
    fn restart_reseeds() {
        let mut ctl = running(ScenarioKind::HunterKiller);
        let first = ctl.snapshot().unwrap();
        ctl.run_ticks(30, &mut NoopObserver);
        ctl.start(ScenarioKind::HunterKiller).unwrap();
        assert_eq!(ctl.snapshot().unwrap(), first);
    }
}

// ── Properties ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod properties {
    use bn_core::{Cadence, SimConfig};
    use proptest::prelude::*;

    use crate::{NoopObserver, ScenarioController, ScenarioKind};

    proptest! {
        #[test]
        fn cadence_never_below_one(base in -1_000_i64..1_000, rate in proptest::num::f32::ANY) {
            prop_assert!(Cadence::from_rate(base, rate).period() >= 1);
        }

        #[test]
        fn population_cadence_never_below_one(base in -100_i64..100, divisor in 0_u32..20, pop in any::<u32>()) {
            prop_assert!(Cadence::from_population(base, divisor, pop).period() >= 1);
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn reconcile_hits_target_and_keeps_prefix(
            seed in 0_u64..1_000,
            targets in proptest::collection::vec(0_u32..300, 1..6),
        ) {
            let config = SimConfig { seed, ..SimConfig::default() };
            let mut ctl = ScenarioController::new(config).unwrap();
            ctl.start(ScenarioKind::HunterKiller).unwrap();
            for target in targets {
                let before = ctl.snapshot().unwrap().agents;
                ctl.set_target_population(target);
                let after = ctl.snapshot().unwrap().agents;
                prop_assert_eq!(after.len(), target as usize);
                let kept = before.len().min(after.len());
                prop_assert_eq!(&after[..kept], &before[..kept]);
                ctl.run_ticks(2, &mut NoopObserver);
            }
        }
    }
}
