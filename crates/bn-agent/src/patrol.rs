//! Hunter-killer patrol agents.
//!
//! ```text
//!            target infected            arrive, node infected
//!   Patrol ─────────────────▶ Detect ─────────────────────────▶ Attack
//!     ▲                                                           │
//!     └────────────── arrive, node not infected ──────────────────┘
//! ```
//!
//! Node pressure bookkeeping is done by the scenario; this module only
//! tracks where the agent is, where it is going, and which state it is in.

use bn_core::{AgentId, NodeId, Vec2};

use crate::Agent;

/// Base movement speed in canvas units per tick.
pub const PATROL_SPEED: f32 = 2.0;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PatrolState {
    #[default]
    Patrol,
    Detect,
    Attack,
}

impl PatrolState {
    pub fn as_str(self) -> &'static str {
        match self {
            PatrolState::Patrol => "patrol",
            PatrolState::Detect => "detect",
            PatrolState::Attack => "attack",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PatrolAgent {
    pub id:      AgentId,
    pub pos:     Vec2,
    /// Node last arrived at (or spawned on).
    pub current: NodeId,
    pub target:  Option<NodeId>,
    pub state:   PatrolState,
    pub speed:   f32,
}

impl PatrolAgent {
    /// A patrolling agent parked on `node` at `pos`, with no target.
    pub fn new(id: AgentId, node: NodeId, pos: Vec2) -> Self {
        Self {
            id,
            pos,
            current: node,
            target:  None,
            state:   PatrolState::Patrol,
            speed:   PATROL_SPEED,
        }
    }

    #[inline]
    pub fn needs_target(&self) -> bool {
        self.target.is_none()
    }

    /// Head for `node`.  An infected target puts the agent in `Detect`; a
    /// clean one drops a stale `Detect` back to `Patrol`.  `Attack` persists
    /// until the next arrival.
    pub fn assign_target(&mut self, node: NodeId, infected: bool) {
        self.target = Some(node);
        if infected {
            self.state = PatrolState::Detect;
        } else if self.state == PatrolState::Detect {
            self.state = PatrolState::Patrol;
        }
    }

    /// Forget a target that no longer resolves.
    pub fn drop_target(&mut self) {
        self.target = None;
        if self.state == PatrolState::Detect {
            self.state = PatrolState::Patrol;
        }
    }

    /// Land on `node` at `pos`.  Returns `true` when the agent attacks.
    pub fn arrive(&mut self, node: NodeId, pos: Vec2, infected: bool) -> bool {
        self.current = node;
        self.pos = pos;
        self.target = None;
        self.state = if infected { PatrolState::Attack } else { PatrolState::Patrol };
        infected
    }
}

impl Agent for PatrolAgent {
    fn id(&self) -> AgentId { self.id }
    fn state_tag(&self) -> &'static str { self.state.as_str() }
}
