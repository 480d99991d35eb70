//! Plain data row types written by output backends.

/// Totals for one tick of one scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickStatsRow {
    pub tick:       u64,
    /// Scenario name, e.g. `"hunter-killer"`.
    pub scenario:   &'static str,
    pub safe:       u64,
    pub infected:   u64,
    pub recovering: u64,
    pub vulnerable: u64,
    pub patched:    u64,
    pub firewall:   u64,
    pub agents:     u64,
    pub edges:      u64,
}

/// One graph node at a snapshot tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeSnapshotRow {
    pub tick:     u64,
    pub node_id:  u32,
    pub x:        f32,
    pub y:        f32,
    pub status:   &'static str,
    pub pressure: f32,
}
