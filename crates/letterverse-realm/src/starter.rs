use letterverse_blocks::ItemStack;
use letterverse_geom::Vec3;
use letterverse_world::{Agent, Level};

use crate::config::StarterConfig;

/// Persistent flag set once the login grant has happened.
pub const RECEIVED_WAND: &str = "received_wand";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Grant {
    Skipped,
    Given,
    /// Inventory was full; the wand lies at the agent's feet.
    Dropped,
}

/// First login only.
pub fn grant_on_login(agent: &mut Agent, level: &mut Level, cfg: &StarterConfig) -> Grant {
    if agent.persistent_flags.contains(RECEIVED_WAND) {
        return Grant::Skipped;
    }
    agent.persistent_flags.insert(RECEIVED_WAND.to_string());
    give(agent, level, &cfg.wand_item)
}

/// Every respawn, except the one that follows leaving the End after its boss.
pub fn grant_on_respawn(
    agent: &mut Agent,
    level: &mut Level,
    cfg: &StarterConfig,
    end_conquered: bool,
) -> Grant {
    if !cfg.grant_on_respawn || end_conquered {
        return Grant::Skipped;
    }
    give(agent, level, &cfg.wand_item)
}

fn give(agent: &mut Agent, level: &mut Level, item: &str) -> Grant {
    let stack = ItemStack::new(item);
    if agent.inventory.add(&stack) {
        log::info!(target: "realm", "gave {} to {}", item, agent.name);
        return Grant::Given;
    }
    level.spawn_item(stack, agent.pos, Vec3::ZERO);
    log::info!(target: "realm", "inventory of {} full, dropped {}", agent.name, item);
    Grant::Dropped
}
