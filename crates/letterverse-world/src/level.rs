use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use letterverse_blocks::{Block, BlockRegistry, ItemStack, TileKind};
use letterverse_geom::{Axis, Direction, GridPos, Vec3};

use crate::dimension::DimensionId;
use crate::entity::{DEFAULT_PICKUP_DELAY, EntityId, ItemEntity, Sound, SoundCue};
use crate::grid::{CHUNK_SIZE, ChunkedGrid};

/// How a block write propagates to its neighbours.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpdateMode {
    /// Neighbours react immediately (engine shape rules run).
    Notify,
    /// Write only; no neighbour reactions.
    Silent,
}

/// One dimension's world state.
pub struct Level {
    pub dimension: DimensionId,
    pub game_time: u64,
    grid: ChunkedGrid,
    reg: Arc<BlockRegistry>,
    pub items: Vec<ItemEntity>,
    pub sounds: Vec<SoundCue>,
    loaded_chunks: HashSet<(i32, i32)>,
    next_entity_id: EntityId,
}

impl Level {
    pub fn new(dimension: DimensionId, reg: Arc<BlockRegistry>) -> Self {
        Self {
            dimension,
            game_time: 0,
            grid: ChunkedGrid::new(),
            reg,
            items: Vec::new(),
            sounds: Vec::new(),
            loaded_chunks: HashSet::new(),
            next_entity_id: 1,
        }
    }

    #[inline]
    pub fn registry(&self) -> &BlockRegistry {
        &self.reg
    }

    #[inline]
    pub fn grid(&self) -> &ChunkedGrid {
        &self.grid
    }

    #[inline]
    pub fn block_at(&self, p: GridPos) -> Block {
        self.grid.get(p)
    }

    #[inline]
    pub fn kind_at(&self, p: GridPos) -> TileKind {
        self.reg.kind_of(self.grid.get(p))
    }

    /// Write a block. Returns whether the tile changed.
    pub fn set_block(&mut self, p: GridPos, b: Block, mode: UpdateMode) -> bool {
        let prev = self.grid.set(p, b);
        if prev == b {
            return false;
        }
        if mode == UpdateMode::Notify {
            self.propagate_shape_updates(p);
        }
        true
    }

    // Engine rule: a lit portal tile only survives while its frame-plane neighbours
    // are portal tiles of the same axis or native frame blocks.
    fn propagate_shape_updates(&mut self, origin: GridPos) {
        let mut queue: VecDeque<GridPos> = Direction::ALL
            .iter()
            .map(|d| origin.relative(*d, 1))
            .collect();
        while let Some(p) = queue.pop_front() {
            let TileKind::Filler(axis) = self.kind_at(p) else {
                continue;
            };
            if self.filler_supported(p, axis) {
                continue;
            }
            self.grid.set(p, Block::AIR);
            log::trace!(target: "level", "{} portal tile at {} collapsed", self.dimension, p);
            queue.extend(Direction::ALL.iter().map(|d| p.relative(*d, 1)));
        }
    }

    fn filler_supported(&self, p: GridPos, axis: Axis) -> bool {
        let plane = match axis {
            Axis::Z => [Direction::North, Direction::South],
            Axis::X | Axis::Y => [Direction::West, Direction::East],
        };
        plane
            .into_iter()
            .chain([Direction::Up, Direction::Down])
            .all(|d| match self.kind_at(p.relative(d, 1)) {
                TileKind::Filler(a) => a == axis,
                TileKind::NativeMarker => true,
                _ => false,
            })
    }

    pub fn spawn_item(&mut self, stack: ItemStack, pos: Vec3, velocity: Vec3) -> EntityId {
        let id = self.next_entity_id;
        self.next_entity_id += 1;
        self.items.push(ItemEntity {
            id,
            stack,
            pos,
            velocity,
            pickup_delay: DEFAULT_PICKUP_DELAY,
        });
        id
    }

    pub fn play_sound(&mut self, sound: Sound, at: Vec3, volume: f32, pitch: f32) {
        self.sounds.push(SoundCue {
            sound,
            at,
            volume,
            pitch,
        });
    }

    /// Record a chunk column as loaded. True the first time only.
    pub fn mark_chunk_loaded(&mut self, cx: i32, cz: i32) -> bool {
        self.loaded_chunks.insert((cx, cz))
    }

    #[inline]
    pub fn chunk_column_of(p: GridPos) -> (i32, i32) {
        (p.x.div_euclid(CHUNK_SIZE), p.z.div_euclid(CHUNK_SIZE))
    }

    pub fn advance_time(&mut self) {
        self.game_time += 1;
        for item in &mut self.items {
            item.pickup_delay = item.pickup_delay.saturating_sub(1);
        }
    }

    pub fn count_items(&self, name: &str) -> u32 {
        self.items
            .iter()
            .filter(|e| e.stack.item == name)
            .map(|e| e.stack.count)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level() -> Level {
        Level::new(DimensionId::Overworld, Arc::new(BlockRegistry::standard()))
    }

    #[test]
    fn notify_write_collapses_unsupported_portal_tiles() {
        let mut lv = level();
        let portal = lv.registry().filler_block(Axis::X).unwrap();
        let a = GridPos::new(0, 10, 0);
        let b = a.above(1);
        lv.set_block(a, portal, UpdateMode::Silent);
        lv.set_block(b, portal, UpdateMode::Silent);
        assert!(lv.kind_at(a).is_filler());

        let stone = lv.registry().block_by_name("stone").unwrap();
        lv.set_block(a.relative(Direction::West, 1), stone, UpdateMode::Notify);
        assert_eq!(lv.kind_at(a), TileKind::Air);
        assert_eq!(lv.kind_at(b), TileKind::Air);
    }

    #[test]
    fn silent_write_leaves_neighbours_alone() {
        let mut lv = level();
        let portal = lv.registry().filler_block(Axis::X).unwrap();
        let a = GridPos::new(0, 10, 0);
        lv.set_block(a, portal, UpdateMode::Silent);
        let stone = lv.registry().block_by_name("stone").unwrap();
        lv.set_block(a.above(1), stone, UpdateMode::Silent);
        assert!(lv.kind_at(a).is_filler());
    }

    #[test]
    fn obsidian_frame_supports_portal_tiles() {
        let mut lv = level();
        let obsidian = lv.registry().block_by_name("obsidian").unwrap();
        let portal = lv.registry().filler_block(Axis::X).unwrap();
        let p = GridPos::new(5, 5, 5);
        for d in [Direction::West, Direction::East, Direction::Up, Direction::Down] {
            lv.set_block(p.relative(d, 1), obsidian, UpdateMode::Silent);
        }
        lv.set_block(p, portal, UpdateMode::Silent);
        let stone = lv.registry().block_by_name("stone").unwrap();
        lv.set_block(p.relative(Direction::North, 1), stone, UpdateMode::Notify);
        assert!(lv.kind_at(p).is_filler());
    }

    #[test]
    fn pickup_delay_counts_down() {
        let mut lv = level();
        lv.spawn_item(ItemStack::new("bone"), Vec3::ZERO, Vec3::ZERO);
        for _ in 0..DEFAULT_PICKUP_DELAY + 3 {
            lv.advance_time();
        }
        assert_eq!(lv.items[0].pickup_delay, 0);
        assert_eq!(lv.game_time, u64::from(DEFAULT_PICKUP_DELAY + 3));
    }
}
