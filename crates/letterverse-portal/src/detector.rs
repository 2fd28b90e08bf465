use letterverse_blocks::{Block, TileKind};
use letterverse_geom::GridPos;
use letterverse_world::{Level, Sound, UpdateMode};

use crate::active::ActiveFrames;
use crate::config::PortalConfig;
use crate::frame::{Facing, Frame};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MaintenanceReport {
    pub checked: usize,
    pub relit: usize,
    pub removed: usize,
}

/// Light `frame` if it is a complete, unlit frame. Registers and announces it.
pub fn try_light(level: &mut Level, frames: &mut ActiveFrames, frame: Frame) -> bool {
    if !frame.is_valid(level) || frame.is_already_filled(level) {
        return false;
    }
    if !frame.fill(level) {
        return false;
    }
    frames.insert(level.dimension, frame.anchor);
    level.play_sound(Sound::PortalTrigger, frame.anchor.center(), 1.0, 1.0);
    log::info!(
        target: "portal",
        "auto-lit portal at {} facing {:?}, tracking for upkeep",
        frame.anchor,
        frame.facing
    );
    true
}

/// Look for a frame completed by the marker just placed at `pos` and light the first one found.
pub fn on_marker_placed(
    level: &mut Level,
    frames: &mut ActiveFrames,
    pos: GridPos,
    cfg: &PortalConfig,
) -> Option<Frame> {
    let (h, v) = (cfg.search_horizontal, cfg.search_vertical);
    for anchor in pos.neighborhood(h, v, h) {
        for facing in Facing::BOTH {
            let frame = Frame::new(anchor, facing);
            if try_light(level, frames, frame) {
                return Some(frame);
            }
        }
    }
    None
}

/// A marker at `pos` was removed: put out nearby portal tiles and forget nearby frames.
///
/// Returns the number of portal tiles cleared.
pub fn on_marker_broken(
    level: &mut Level,
    frames: &mut ActiveFrames,
    pos: GridPos,
    cfg: &PortalConfig,
) -> usize {
    let (h, v) = (cfg.search_horizontal, cfg.search_vertical);
    let mut cleared = 0;
    for p in pos.neighborhood(h, v, h) {
        if level.kind_at(p).is_filler() {
            level.set_block(p, Block::AIR, UpdateMode::Notify);
            cleared += 1;
        }
    }
    let dropped = frames.remove_within(level.dimension, pos, cfg.extinguish_distance);
    if cleared > 0 || !dropped.is_empty() {
        log::info!(
            target: "portal",
            "marker broken at {}: cleared {} portal tiles, dropped {} frames",
            pos,
            cleared,
            dropped.len()
        );
    }
    cleared
}

/// Re-check every active frame of this level. Broken frames are forgotten; intact ones
/// get any missing portal tiles back.
pub fn periodic_maintenance(level: &mut Level, frames: &mut ActiveFrames) -> MaintenanceReport {
    let mut report = MaintenanceReport::default();
    for anchor in frames.anchors(level.dimension) {
        report.checked += 1;
        let intact = Facing::BOTH
            .into_iter()
            .map(|facing| Frame::new(anchor, facing))
            .find(|f| f.is_valid(level));
        match intact {
            Some(frame) => {
                if !frame.is_fully_lit(level) && relight(level, frame) {
                    report.relit += 1;
                }
            }
            None => {
                frames.remove(level.dimension, anchor);
                report.removed += 1;
                log::info!(target: "portal", "frame at {} is broken, no longer maintained", anchor);
            }
        }
    }
    report
}

// Rewrites the whole interior; neither re-registers nor plays the lighting cue.
fn relight(level: &mut Level, frame: Frame) -> bool {
    let Some(portal) = level.registry().filler_block(frame.facing.axis()) else {
        return false;
    };
    for p in frame.interior() {
        if level.kind_at(p) != TileKind::Filler(frame.facing.axis()) {
            level.set_block(p, portal, UpdateMode::Silent);
        }
    }
    log::debug!(target: "portal", "relit frame at {}", frame.anchor);
    true
}
