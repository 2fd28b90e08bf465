use letterverse_blocks::{Block, TileKind};
use letterverse_geom::{Axis, Direction, GridPos};
use letterverse_world::{Level, UpdateMode};
use serde::Deserialize;

pub const FRAME_WIDTH: i32 = 4;
pub const FRAME_HEIGHT: i32 = 5;

/// Which way a frame faces; the frame extends to the facing's clockwise side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Facing {
    North,
    East,
}

impl Facing {
    /// Detection tries facings in this order.
    pub const BOTH: [Facing; 2] = [Facing::North, Facing::East];

    #[inline]
    pub fn direction(self) -> Direction {
        match self {
            Facing::North => Direction::North,
            Facing::East => Direction::East,
        }
    }

    /// Direction the frame's width runs along from the anchor.
    #[inline]
    pub fn right(self) -> Direction {
        self.direction().clockwise()
    }

    /// Orientation written into the portal tiles.
    #[inline]
    pub fn axis(self) -> Axis {
        match self {
            Facing::North => Axis::X,
            Facing::East => Axis::Z,
        }
    }
}

/// A frame position: bottom-left corner plus facing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Frame {
    pub anchor: GridPos,
    pub facing: Facing,
}

impl Frame {
    #[inline]
    pub const fn new(anchor: GridPos, facing: Facing) -> Self {
        Self { anchor, facing }
    }

    #[inline]
    fn at(&self, across: i32, up: i32) -> GridPos {
        self.anchor.relative(self.facing.right(), across).above(up)
    }

    /// Border tiles: bottom row, top row, then the inner parts of the left and right columns.
    pub fn border(&self) -> Vec<GridPos> {
        let mut out = Vec::with_capacity((2 * FRAME_WIDTH + 2 * (FRAME_HEIGHT - 2)) as usize);
        out.extend((0..FRAME_WIDTH).map(|i| self.at(i, 0)));
        out.extend((0..FRAME_WIDTH).map(|i| self.at(i, FRAME_HEIGHT - 1)));
        out.extend((1..FRAME_HEIGHT - 1).map(|i| self.at(0, i)));
        out.extend((1..FRAME_HEIGHT - 1).map(|i| self.at(FRAME_WIDTH - 1, i)));
        out
    }

    /// The (W-2) x (H-2) inner rectangle, column by column.
    pub fn interior(&self) -> Vec<GridPos> {
        let mut out = Vec::with_capacity(((FRAME_WIDTH - 2) * (FRAME_HEIGHT - 2)) as usize);
        for x in 1..FRAME_WIDTH - 1 {
            for y in 1..FRAME_HEIGHT - 1 {
                out.push(self.at(x, y));
            }
        }
        out
    }

    /// Complete marker border with an interior of only air or portal tiles.
    pub fn is_valid(&self, level: &Level) -> bool {
        self.border()
            .into_iter()
            .all(|p| level.kind_at(p) == TileKind::Marker)
            && self
                .interior()
                .into_iter()
                .all(|p| matches!(level.kind_at(p), TileKind::Air | TileKind::Filler(_)))
    }

    /// Any interior tile is already lit.
    pub fn is_already_filled(&self, level: &Level) -> bool {
        self.interior()
            .into_iter()
            .any(|p| level.kind_at(p).is_filler())
    }

    pub fn is_fully_lit(&self, level: &Level) -> bool {
        self.interior()
            .into_iter()
            .all(|p| level.kind_at(p).is_filler())
    }

    /// Light every interior tile without neighbour updates. False when no portal block exists.
    pub fn fill(&self, level: &mut Level) -> bool {
        let Some(portal) = level.registry().filler_block(self.facing.axis()) else {
            log::warn!(target: "portal", "cannot light frame at {}: no portal block registered", self.anchor);
            return false;
        };
        self.fill_with(level, portal);
        true
    }

    /// `portal` must be the filler block for this frame's axis.
    pub fn fill_with(&self, level: &mut Level, portal: Block) {
        for p in self.interior() {
            level.set_block(p, portal, UpdateMode::Silent);
        }
        log::info!(
            target: "portal",
            "{} portal lit at {} with axis {:?}",
            level.dimension,
            self.anchor,
            self.facing.axis()
        );
    }

    /// Place marker blocks on every border tile. False when no marker block exists.
    pub fn build_border(&self, level: &mut Level) -> bool {
        let Some(marker) = level.registry().marker_block() else {
            return false;
        };
        self.build_border_with(level, marker);
        true
    }

    pub fn build_border_with(&self, level: &mut Level, marker: Block) {
        for p in self.border() {
            level.set_block(p, marker, UpdateMode::Notify);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use letterverse_blocks::BlockRegistry;
    use letterverse_world::DimensionId;
    use std::sync::Arc;

    fn level() -> Level {
        Level::new(DimensionId::Overworld, Arc::new(BlockRegistry::standard()))
    }

    #[test]
    fn north_frame_runs_east() {
        let f = Frame::new(GridPos::new(0, 64, 0), Facing::North);
        let border = f.border();
        assert_eq!(border.len(), 14);
        assert!(border.contains(&GridPos::new(3, 64, 0)));
        assert!(border.contains(&GridPos::new(3, 68, 0)));
        assert_eq!(
            f.interior(),
            vec![
                GridPos::new(1, 65, 0),
                GridPos::new(1, 66, 0),
                GridPos::new(1, 67, 0),
                GridPos::new(2, 65, 0),
                GridPos::new(2, 66, 0),
                GridPos::new(2, 67, 0),
            ]
        );
    }

    #[test]
    fn east_frame_runs_south() {
        let f = Frame::new(GridPos::new(0, 64, 0), Facing::East);
        assert!(f.border().contains(&GridPos::new(0, 64, 3)));
        assert_eq!(f.interior()[0], GridPos::new(0, 65, 1));
        assert_eq!(f.facing.axis(), Axis::Z);
    }

    #[test]
    fn fill_writes_oriented_portal_tiles() {
        let mut lv = level();
        let f = Frame::new(GridPos::new(10, 64, 10), Facing::East);
        assert!(f.build_border(&mut lv));
        assert!(f.is_valid(&lv));
        assert!(!f.is_already_filled(&lv));
        assert!(f.fill(&mut lv));
        assert!(f.is_already_filled(&lv));
        assert!(f.is_fully_lit(&lv));
        assert_eq!(lv.kind_at(f.interior()[0]), TileKind::Filler(Axis::Z));
        // Lit frames are still valid frames
        assert!(f.is_valid(&lv));
    }

    #[test]
    fn cluttered_interior_is_invalid() {
        let mut lv = level();
        let f = Frame::new(GridPos::new(0, 64, 0), Facing::North);
        f.build_border(&mut lv);
        let stone = lv.registry().block_by_name("stone").unwrap();
        lv.set_block(f.interior()[4], stone, UpdateMode::Notify);
        assert!(!f.is_valid(&lv));
    }
}
