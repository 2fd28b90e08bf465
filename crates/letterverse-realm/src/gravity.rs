use letterverse_world::Agent;

use crate::config::RealmConfig;

/// Pre-update physics for agents in the Letterverse: cancel most of gravity,
/// let jump and sneak steer vertically, and never accumulate fall damage.
///
/// Returns false when the agent is elsewhere and nothing changed.
pub fn apply_low_gravity(agent: &mut Agent, cfg: &RealmConfig) -> bool {
    if !agent.dimension.is_letterverse() {
        return false;
    }
    let v = &mut agent.velocity;
    v.y = (v.y + cfg.gravity) * cfg.drag;
    if agent.jumping {
        v.y = cfg.vertical_speed;
    } else if agent.sneaking {
        v.y = -cfg.vertical_speed;
    }
    agent.fall_distance = 0.0;
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use letterverse_geom::Vec3;
    use letterverse_world::{AgentId, DimensionId};

    fn agent(dim: DimensionId) -> Agent {
        let mut a = Agent::new(AgentId(1), "floaty", dim, Vec3::new(0.5, 100.0, 0.5));
        a.velocity = Vec3::new(0.1, -0.5, 0.0);
        a.fall_distance = 7.0;
        a
    }

    #[test]
    fn gravity_is_mostly_cancelled() {
        let mut a = agent(DimensionId::Letterverse);
        assert!(apply_low_gravity(&mut a, &RealmConfig::default()));
        assert!((a.velocity.y - (-0.5 + 0.08) * 0.98).abs() < 1e-6);
        assert_eq!(a.velocity.x, 0.1);
        assert_eq!(a.fall_distance, 0.0);
    }

    #[test]
    fn jump_and_sneak_set_vertical_speed() {
        let cfg = RealmConfig::default();
        let mut a = agent(DimensionId::Letterverse);
        a.jumping = true;
        apply_low_gravity(&mut a, &cfg);
        assert_eq!(a.velocity.y, 0.15);
        a.jumping = false;
        a.sneaking = true;
        apply_low_gravity(&mut a, &cfg);
        assert_eq!(a.velocity.y, -0.15);
    }

    #[test]
    fn other_dimensions_keep_normal_physics() {
        let mut a = agent(DimensionId::Overworld);
        assert!(!apply_low_gravity(&mut a, &RealmConfig::default()));
        assert_eq!(a.velocity.y, -0.5);
        assert_eq!(a.fall_distance, 7.0);
    }
}
