#![allow(dead_code)]

use std::sync::Arc;

use letterverse_blocks::{Block, BlockRegistry};
use letterverse_geom::{GridPos, Vec3};
use letterverse_portal::{Facing, Frame, PortalConfig, PortalService};
use letterverse_world::{Agent, AgentId, DimensionId, UpdateMode, World};

pub const ANCHOR: GridPos = GridPos::new(0, 64, 0);

pub fn world(dims: &[DimensionId]) -> World {
    World::new(Arc::new(BlockRegistry::standard()), dims)
}

pub fn block(world: &World, name: &str) -> Block {
    world.registry.block_by_name(name).unwrap()
}

/// Place a block the way a player would: write with neighbour updates, then tell the service.
pub fn place(svc: &mut PortalService, world: &mut World, dim: DimensionId, pos: GridPos, b: Block) {
    world
        .level_mut(dim)
        .unwrap()
        .set_block(pos, b, UpdateMode::Notify);
    svc.on_block_placed(world, dim, pos, b);
}

pub fn break_block(svc: &mut PortalService, world: &mut World, dim: DimensionId, pos: GridPos) {
    let level = world.level_mut(dim).unwrap();
    let prev = level.block_at(pos);
    level.set_block(pos, Block::AIR, UpdateMode::Notify);
    svc.on_block_broken(world, dim, pos, prev);
}

/// Build a full bookshelf frame block by block through the service.
pub fn build_frame(svc: &mut PortalService, world: &mut World, dim: DimensionId, frame: Frame) {
    let shelf = block(world, "bookshelf");
    for p in frame.border() {
        place(svc, world, dim, p, shelf);
    }
}

pub fn lit_overworld_frame() -> (PortalService, World, Frame) {
    let mut svc = PortalService::new(PortalConfig::default());
    let mut w = world(&[DimensionId::Overworld, DimensionId::Letterverse]);
    let frame = Frame::new(ANCHOR, Facing::North);
    build_frame(&mut svc, &mut w, DimensionId::Overworld, frame);
    (svc, w, frame)
}

pub fn spawn_agent(world: &mut World, id: u64, dim: DimensionId, pos: Vec3) -> AgentId {
    let id = AgentId(id);
    world.add_agent(Agent::new(id, format!("agent{}", id.0), dim, pos));
    id
}

/// Advance every level one tick and run the per-level upkeep.
pub fn tick_levels(svc: &mut PortalService, world: &mut World) {
    world.advance_time();
    for dim in DimensionId::ALL {
        svc.tick_level(world, dim);
    }
}
