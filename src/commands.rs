use letterverse_portal::{FrameCensus, PortalConfig};
use letterverse_world::{AgentId, World};

pub const TESTPORTAL: &str = "testportal";

const BANNER: &str = "=== PORTAL TEST ===";
const FOOTER: &str = "==================";

/// Report what the portal logic sees at the caller's position.
///
/// Returns 1 when run by an agent, 0 from the console.
pub fn testportal(world: &mut World, agent: Option<AgentId>, cfg: &PortalConfig) -> i32 {
    let Some(id) = agent else {
        log::warn!(target: "portal", "{} must be run by an agent", TESTPORTAL);
        return 0;
    };
    let Some((agent, level)) = world.agent_and_level_mut(id) else {
        return 0;
    };
    let pos = agent.block_pos();
    let in_portal = level.kind_at(pos).is_filler();

    agent.send_message(BANNER);
    agent.send_message(format!("Position: {pos}"));
    agent.send_message(format!("In portal block: {in_portal}"));
    if in_portal {
        let census = FrameCensus::take(level, pos, cfg.census_radius);
        let class = census.classify(cfg.special_marker_threshold);
        agent.send_message(format!("Bookshelves nearby: {}", census.markers));
        agent.send_message(format!("Obsidian nearby: {}", census.native_markers));
        agent.send_message(format!("Portal type: {}", class.label()));
        log::info!(
            target: "portal",
            "portal test at {}: {} bookshelves, {} obsidian = {}",
            pos,
            census.markers,
            census.native_markers,
            class.label()
        );
    } else {
        agent.send_message("Not standing in a portal!");
    }
    agent.send_message(FOOTER);
    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use letterverse_blocks::BlockRegistry;
    use letterverse_geom::Vec3;
    use letterverse_world::{Agent, DimensionId};
    use std::sync::Arc;

    #[test]
    fn console_gets_zero() {
        let mut w = World::new(Arc::new(BlockRegistry::standard()), &[DimensionId::Overworld]);
        assert_eq!(testportal(&mut w, None, &PortalConfig::default()), 0);
    }

    #[test]
    fn outside_a_portal_says_so() {
        let mut w = World::new(Arc::new(BlockRegistry::standard()), &[DimensionId::Overworld]);
        let id = AgentId(9);
        w.add_agent(Agent::new(id, "curious", DimensionId::Overworld, Vec3::new(3.2, 64.0, -1.5)));
        assert_eq!(testportal(&mut w, Some(id), &PortalConfig::default()), 1);
        let inbox = &w.agent(id).unwrap().inbox;
        assert_eq!(
            inbox,
            &vec![
                BANNER.to_string(),
                "Position: (3, 64, -2)".to_string(),
                "In portal block: false".to_string(),
                "Not standing in a portal!".to_string(),
                FOOTER.to_string(),
            ]
        );
    }
}
