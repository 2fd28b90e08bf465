use letterverse_blocks::ItemStack;
use letterverse_geom::Vec3;
use serde::Serialize;

pub type EntityId = u64;

/// Ticks before a freshly dropped item can be picked up.
pub const DEFAULT_PICKUP_DELAY: u32 = 10;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ItemEntity {
    pub id: EntityId,
    pub stack: ItemStack,
    pub pos: Vec3,
    pub velocity: Vec3,
    pub pickup_delay: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Sound {
    PortalTrigger,
    Teleport,
    LevelUp,
    EnchantUse,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SoundCue {
    pub sound: Sound,
    pub at: Vec3,
    pub volume: f32,
    pub pitch: f32,
}
