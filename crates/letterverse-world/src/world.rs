use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use letterverse_blocks::BlockRegistry;

use crate::agent::{Agent, AgentId};
use crate::dimension::DimensionId;
use crate::level::Level;

/// Every loaded level plus the agents moving between them.
pub struct World {
    pub registry: Arc<BlockRegistry>,
    pub levels: HashMap<DimensionId, Level>,
    pub agents: BTreeMap<AgentId, Agent>,
}

impl World {
    /// Create the given dimensions; anything not listed has no level.
    pub fn new(registry: Arc<BlockRegistry>, dimensions: &[DimensionId]) -> Self {
        let levels = dimensions
            .iter()
            .map(|d| (*d, Level::new(*d, Arc::clone(&registry))))
            .collect();
        Self {
            registry,
            levels,
            agents: BTreeMap::new(),
        }
    }

    #[inline]
    pub fn level(&self, dim: DimensionId) -> Option<&Level> {
        self.levels.get(&dim)
    }

    #[inline]
    pub fn level_mut(&mut self, dim: DimensionId) -> Option<&mut Level> {
        self.levels.get_mut(&dim)
    }

    #[inline]
    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(&id)
    }

    #[inline]
    pub fn agent_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        self.agents.get_mut(&id)
    }

    pub fn add_agent(&mut self, agent: Agent) {
        self.agents.insert(agent.id, agent);
    }

    /// Borrow an agent together with the level it currently stands in.
    pub fn agent_and_level_mut(&mut self, id: AgentId) -> Option<(&mut Agent, &mut Level)> {
        let agent = self.agents.get_mut(&id)?;
        let level = self.levels.get_mut(&agent.dimension)?;
        Some((agent, level))
    }

    pub fn agent_ids(&self) -> Vec<AgentId> {
        self.agents.keys().copied().collect()
    }

    /// Level game time, advanced once per server tick.
    pub fn advance_time(&mut self) {
        for level in self.levels.values_mut() {
            level.advance_time();
        }
    }
}
