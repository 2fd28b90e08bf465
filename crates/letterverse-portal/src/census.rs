use letterverse_blocks::TileKind;
use letterverse_geom::GridPos;
use letterverse_world::Level;

use crate::config::PortalConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameClass {
    /// Bookshelf frame: our own transit applies.
    Letterverse,
    /// Anything else is left to the engine's native portal handling.
    Native,
}

impl FrameClass {
    pub fn label(self) -> &'static str {
        match self {
            FrameClass::Letterverse => "LETTERVERSE",
            FrameClass::Native => "NETHER",
        }
    }
}

/// Frame block counts in the cube around a portal tile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameCensus {
    pub markers: u32,
    pub native_markers: u32,
}

impl FrameCensus {
    pub fn take(level: &Level, center: GridPos, radius: i32) -> Self {
        let mut census = FrameCensus::default();
        for p in center.neighborhood(radius, radius, radius) {
            match level.kind_at(p) {
                TileKind::Marker => census.markers += 1,
                TileKind::NativeMarker => census.native_markers += 1,
                _ => {}
            }
        }
        census
    }

    pub fn classify(&self, threshold: u32) -> FrameClass {
        if self.markers >= threshold && self.native_markers == 0 {
            FrameClass::Letterverse
        } else {
            FrameClass::Native
        }
    }
}

/// Census and classification of the frame around `pos` using configured limits.
pub fn classify_at(level: &Level, pos: GridPos, cfg: &PortalConfig) -> (FrameCensus, FrameClass) {
    let census = FrameCensus::take(level, pos, cfg.census_radius);
    (census, census.classify(cfg.special_marker_threshold))
}
