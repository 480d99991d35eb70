//! Propagation packets.
//!
//! A packet is launched from a source node toward a target node and flies a
//! straight line to the target's position as captured at launch.  It is
//! removed on arrival, after the scenario applies its conversion.

use bn_core::{AgentId, NodeId, Vec2};

use crate::{step_toward, Agent};

/// Distance below which a packet counts as delivered.
pub const PACKET_ARRIVAL_RADIUS: f32 = 5.0;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PacketKind {
    /// Red: infects vulnerable nodes.
    Malicious,
    /// Blue: patches vulnerable nodes.
    Benign,
}

impl PacketKind {
    /// Canvas units per tick.  Red always outruns blue.
    pub fn speed(self) -> f32 {
        match self {
            PacketKind::Malicious => 4.0,
            PacketKind::Benign    => 2.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PacketKind::Malicious => "malicious",
            PacketKind::Benign    => "benign",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Packet {
    pub id:     AgentId,
    pub kind:   PacketKind,
    pub pos:    Vec2,
    pub source: NodeId,
    pub target: NodeId,
    /// Target position frozen at launch.
    pub dest:   Vec2,
}

impl Packet {
    pub fn launch(id: AgentId, kind: PacketKind, source: NodeId, from: Vec2, target: NodeId, to: Vec2) -> Self {
        Self { id, kind, pos: from, source, target, dest: to }
    }

    /// Advance one tick.  Returns `true` once the packet has arrived.
    pub fn advance(&mut self) -> bool {
        step_toward(&mut self.pos, self.dest, self.kind.speed(), PACKET_ARRIVAL_RADIUS)
    }
}

impl Agent for Packet {
    fn id(&self) -> AgentId { self.id }
    fn state_tag(&self) -> &'static str { self.kind.as_str() }
}
