use std::sync::Arc;

use letterverse_blocks::BlockRegistry;
use letterverse_geom::{GridPos, Vec3};
use letterverse_world::{Agent, AgentId, DimensionId, UpdateMode, World};

fn world(dims: &[DimensionId]) -> World {
    World::new(Arc::new(BlockRegistry::standard()), dims)
}

#[test]
fn missing_dimension_has_no_level() {
    let w = world(&[DimensionId::Overworld]);
    assert!(w.level(DimensionId::Overworld).is_some());
    assert!(w.level(DimensionId::Letterverse).is_none());
}

#[test]
fn agent_borrows_its_own_level() {
    let mut w = world(&[DimensionId::Overworld, DimensionId::Letterverse]);
    w.add_agent(Agent::new(
        AgentId(7),
        "kit",
        DimensionId::Letterverse,
        Vec3::new(0.5, 101.0, 0.5),
    ));
    let stone = w.registry.block_by_name("stone").unwrap();
    let (agent, level) = w.agent_and_level_mut(AgentId(7)).unwrap();
    assert_eq!(level.dimension, DimensionId::Letterverse);
    level.set_block(agent.block_pos().above(-1), stone, UpdateMode::Notify);
    assert_eq!(
        w.level(DimensionId::Letterverse).unwrap().block_at(GridPos::new(0, 100, 0)),
        stone
    );
    assert_eq!(
        w.level(DimensionId::Overworld).unwrap().grid().stats().blocks,
        0
    );
}

#[test]
fn time_advances_in_every_level() {
    let mut w = world(&DimensionId::ALL);
    w.advance_time();
    w.advance_time();
    for d in DimensionId::ALL {
        assert_eq!(w.level(d).unwrap().game_time, 2);
    }
}
