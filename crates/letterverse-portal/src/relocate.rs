use letterverse_blocks::{Block, BlockRegistry};
use letterverse_geom::{GridPos, Vec3};
use letterverse_world::{AgentId, DimensionId, Level, Sound, UpdateMode, World};

use crate::active::ActiveFrames;
use crate::config::PortalConfig;
use crate::error::PortalError;
use crate::frame::{Facing, Frame};

const PLATFORM_RADIUS: i32 = 3;
const PLATFORM_CORE_RADIUS: f32 = 2.0;
const PLATFORM_HEADROOM: i32 = 3;
const RETURN_FACING: Facing = Facing::North;

/// Where a relocated agent ended up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Arrival {
    pub from: DimensionId,
    pub to: DimensionId,
    pub pos: Vec3,
    /// Set when a landing platform and return frame were built.
    pub return_frame: Option<GridPos>,
}

// Every block an arrival writes, looked up before anything is built.
struct ArrivalBlocks {
    core: Block,
    rim: Block,
    marker: Block,
    portal: Block,
}

impl ArrivalBlocks {
    fn resolve(reg: &BlockRegistry) -> Result<Self, PortalError> {
        Ok(Self {
            core: reg
                .block_by_name("grass_block")
                .ok_or(PortalError::MissingBlock("grass_block"))?,
            rim: reg
                .block_by_name("stone")
                .ok_or(PortalError::MissingBlock("stone"))?,
            marker: reg
                .marker_block()
                .ok_or(PortalError::MissingBlock("marker"))?,
            portal: reg
                .filler_block(RETURN_FACING.axis())
                .ok_or(PortalError::MissingBlock("portal"))?,
        })
    }
}

/// Move an agent through a Letterverse portal: out of the Letterverse to the overworld,
/// from anywhere else into the Letterverse.
///
/// Everything that can fail is checked before the world or the agent is touched.
pub fn relocate(
    world: &mut World,
    frames: &mut ActiveFrames,
    cfg: &PortalConfig,
    id: AgentId,
) -> Result<Arrival, PortalError> {
    let agent = world.agent(id).ok_or(PortalError::UnknownAgent(id))?;
    let from = agent.dimension;
    let (x, z) = (agent.pos.x, agent.pos.z);
    let tile = agent.pos.grid_pos();
    let name = agent.name.clone();
    let altitude = cfg.destination_altitude;

    let (to, pos, return_frame) = if from.is_letterverse() {
        let to = DimensionId::Overworld;
        if world.level(to).is_none() {
            return Err(PortalError::MissingDimension(to));
        }
        log::info!(target: "transit", "moving {} from the Letterverse to the overworld", name);
        (to, Vec3::new(x, altitude as f32, z), None)
    } else {
        let to = DimensionId::Letterverse;
        let registry = world.registry.clone();
        let level = world
            .level_mut(to)
            .ok_or(PortalError::MissingDimension(to))?;
        let blocks = ArrivalBlocks::resolve(&registry)?;

        let spawn = GridPos::new(tile.x, altitude, tile.z);
        build_platform(level, spawn, &blocks);
        let frame = build_return_frame(level, frames, spawn, &blocks);
        log::info!(target: "transit", "moving {} into the Letterverse at {}", name, spawn);
        (
            to,
            Vec3::new(
                spawn.x as f32 + 0.5,
                spawn.y as f32 + 1.0,
                spawn.z as f32 + 0.5,
            ),
            Some(frame.anchor),
        )
    };

    let Some(agent) = world.agent_mut(id) else {
        return Err(PortalError::UnknownAgent(id));
    };
    agent.dimension = to;
    agent.pos = pos;
    agent.velocity = Vec3::ZERO;
    agent.fall_distance = 0.0;
    if let Some(level) = world.level_mut(to) {
        level.play_sound(Sound::Teleport, pos, 1.0, 1.0);
    }
    Ok(Arrival {
        from,
        to,
        pos,
        return_frame,
    })
}

// 7x7 floor one below `center`, grass near the middle and stone around, with headroom cleared.
fn build_platform(level: &mut Level, center: GridPos, blocks: &ArrivalBlocks) {
    for dx in -PLATFORM_RADIUS..=PLATFORM_RADIUS {
        for dz in -PLATFORM_RADIUS..=PLATFORM_RADIUS {
            let floor = center.offset(dx, -1, dz);
            let dist = ((dx * dx + dz * dz) as f32).sqrt();
            let b = if dist < PLATFORM_CORE_RADIUS {
                blocks.core
            } else {
                blocks.rim
            };
            level.set_block(floor, b, UpdateMode::Notify);
            for up in 1..=PLATFORM_HEADROOM {
                level.set_block(floor.above(up), Block::AIR, UpdateMode::Notify);
            }
        }
    }
    log::info!(target: "transit", "created landing platform at {}", center);
}

// Lit bookshelf frame beside the landing spot, so the agent does not arrive inside it.
fn build_return_frame(
    level: &mut Level,
    frames: &mut ActiveFrames,
    center: GridPos,
    blocks: &ArrivalBlocks,
) -> Frame {
    let frame = Frame::new(center.offset(-1, 0, 2), RETURN_FACING);
    frame.build_border_with(level, blocks.marker);
    frame.fill_with(level, blocks.portal);
    frames.insert(level.dimension, frame.anchor);
    log::info!(target: "transit", "created return portal at {}", frame.anchor);
    frame
}
