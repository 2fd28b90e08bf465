use letterverse_world::{AgentId, DimensionId, World};

use crate::config::{RealmConfig, StarterConfig, WandConfig};
use crate::gravity::apply_low_gravity;
use crate::islands::{Island, IslandGenerator};
use crate::starter::{self, Grant};
use crate::wand::{LetterWand, WandUse};

/// Everything the Letterverse adds on top of the portals and words, for one running world.
pub struct RealmService {
    pub cfg: RealmConfig,
    pub starter: StarterConfig,
    islands: IslandGenerator,
    wand: LetterWand,
    pub islands_built: u64,
    pub wand_uses: u64,
}

impl RealmService {
    pub fn new(cfg: RealmConfig, starter: StarterConfig, wand: WandConfig, seed: u64) -> Self {
        let islands = IslandGenerator::new(RealmConfig {
            seed: cfg.seed ^ seed,
            ..cfg.clone()
        });
        let wand = LetterWand::new(starter.wand_item.clone(), wand, seed);
        Self {
            cfg,
            starter,
            islands,
            wand,
            islands_built: 0,
            wand_uses: 0,
        }
    }

    pub fn before_agent_update(&self, world: &mut World, id: AgentId) -> bool {
        world
            .agent_mut(id)
            .is_some_and(|agent| apply_low_gravity(agent, &self.cfg))
    }

    pub fn on_chunk_loaded(&mut self, world: &mut World, dim: DimensionId, cx: i32, cz: i32) -> Vec<Island> {
        let Some(level) = world.level_mut(dim) else {
            return Vec::new();
        };
        let built = self.islands.on_chunk_loaded(level, cx, cz);
        self.islands_built += built.len() as u64;
        built
    }

    pub fn on_login(&self, world: &mut World, id: AgentId) -> Grant {
        match world.agent_and_level_mut(id) {
            Some((agent, level)) => starter::grant_on_login(agent, level, &self.starter),
            None => Grant::Skipped,
        }
    }

    pub fn on_respawn(&self, world: &mut World, id: AgentId, end_conquered: bool) -> Grant {
        match world.agent_and_level_mut(id) {
            Some((agent, level)) => {
                starter::grant_on_respawn(agent, level, &self.starter, end_conquered)
            }
            None => Grant::Skipped,
        }
    }

    pub fn on_wand_used(&mut self, world: &mut World, id: AgentId) -> Option<WandUse> {
        let (agent, level) = world.agent_and_level_mut(id)?;
        let used = self.wand.use_by(agent, level);
        if matches!(used, WandUse::Scattered(_)) {
            self.wand_uses += 1;
        }
        Some(used)
    }
}
