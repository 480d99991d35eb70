//! `Population<A>`: an ordered, resizable agent collection.
//!
//! # Identity
//!
//! Every agent receives an `AgentId` from a per-population counter when it is
//! spawned.  Ids are never reused, so an id stays meaningful after other
//! agents die or the population shrinks.  Slot order is spawn order; shrinking
//! removes from the end, which keeps the surviving prefix untouched.

use bn_core::AgentId;

/// Shape shared by every agent variant.
pub trait Agent {
    fn id(&self) -> AgentId;

    /// Short lowercase label of the agent's state, for views and logs.
    fn state_tag(&self) -> &'static str;
}

/// Result of [`Population::reconcile`].
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct Reconciled {
    pub spawned: usize,
    pub removed: usize,
}

impl Reconciled {
    pub fn is_noop(&self) -> bool {
        self.spawned == 0 && self.removed == 0
    }
}

#[derive(Clone, Debug)]
pub struct Population<A> {
    agents:  Vec<A>,
    next_id: u64,
}

impl<A> Default for Population<A> {
    fn default() -> Self {
        Self { agents: Vec::new(), next_id: 0 }
    }
}

impl<A: Agent> Population<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty population whose first spawn receives `next_id`.
    #[cfg(test)]
    pub(crate) fn with_next_id(next_id: u64) -> Self {
        Self { agents: Vec::new(), next_id }
    }

    pub fn len(&self) -> usize { self.agents.len() }
    pub fn is_empty(&self) -> bool { self.agents.is_empty() }

    pub fn iter(&self) -> std::slice::Iter<'_, A> {
        self.agents.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, A> {
        self.agents.iter_mut()
    }

    pub fn as_slice(&self) -> &[A] {
        &self.agents
    }

    pub fn get(&self, slot: usize) -> Option<&A> {
        self.agents.get(slot)
    }

    pub fn find(&self, id: AgentId) -> Option<&A> {
        self.agents.iter().find(|a| a.id() == id)
    }

    /// Add one agent built by `make` from a fresh id.
    pub fn spawn(&mut self, make: impl FnOnce(AgentId) -> A) -> AgentId {
        let id = self.allocate();
        self.agents.push(make(id));
        id
    }

    /// Resize to `target` agents.
    ///
    /// Growing calls `spawn` once per missing agent and appends the result;
    /// existing agents are not touched.  A `None` from `spawn` (nowhere to
    /// place an agent) stops growth early.  Shrinking truncates from the end.
    pub fn reconcile(
        &mut self,
        target:    usize,
        mut spawn: impl FnMut(AgentId) -> Option<A>,
    ) -> Reconciled {
        let current = self.agents.len();
        if target < current {
            self.agents.truncate(target);
            return Reconciled { spawned: 0, removed: current - target };
        }
        let mut spawned = 0;
        for _ in current..target {
            let id = AgentId(self.next_id);
            let Some(agent) = spawn(id) else { break };
            self.next_id += 1;
            self.agents.push(agent);
            spawned += 1;
        }
        Reconciled { spawned, removed: 0 }
    }

    /// Keep only agents for which `keep` returns `true`, preserving order.
    /// Returns the number removed.
    pub fn retain(&mut self, keep: impl FnMut(&A) -> bool) -> usize {
        let before = self.agents.len();
        self.agents.retain(keep);
        before - self.agents.len()
    }

    /// Like [`retain`](Self::retain), but `step` may also mutate the agents
    /// it keeps.  Agents are visited in slot order.
    pub fn retain_mut(&mut self, step: impl FnMut(&mut A) -> bool) -> usize {
        let before = self.agents.len();
        self.agents.retain_mut(step);
        before - self.agents.len()
    }

    /// Drop every agent.  Ids continue from where they left off.
    pub fn clear(&mut self) {
        self.agents.clear();
    }

    fn allocate(&mut self) -> AgentId {
        let id = AgentId(self.next_id);
        self.next_id += 1;
        id
    }
}
