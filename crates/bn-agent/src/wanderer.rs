//! Quarantine wanderers: one cell per tick random walk.

use bn_core::AgentId;
use bn_grid::CellCoord;

use crate::Agent;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WandererState {
    #[default]
    Wandering,
    /// Laid a firewall this tick.
    Sealing,
}

impl WandererState {
    pub fn as_str(self) -> &'static str {
        match self {
            WandererState::Wandering => "wandering",
            WandererState::Sealing   => "sealing",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Wanderer {
    pub id:    AgentId,
    pub cell:  CellCoord,
    pub state: WandererState,
}

impl Wanderer {
    pub fn new(id: AgentId, cell: CellCoord) -> Self {
        Self { id, cell, state: WandererState::Wandering }
    }
}

impl Agent for Wanderer {
    fn id(&self) -> AgentId { self.id }
    fn state_tag(&self) -> &'static str { self.state.as_str() }
}
