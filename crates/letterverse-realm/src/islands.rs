use std::ops::Range;

use fastnoise_lite::{FastNoiseLite, NoiseType};
use letterverse_blocks::Letter;
use letterverse_geom::GridPos;
use letterverse_world::grid::CHUNK_SIZE;
use letterverse_world::{Level, UpdateMode};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::RealmConfig;

const UPPER_BAND: Range<i32> = 80..120;
const LOWER_BAND: Range<i32> = 60..90;
const MIN_RADIUS: i32 = 3;
const MAX_RADIUS: i32 = 7;

/// One floating island made of a single letter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Island {
    pub center: GridPos,
    pub radius: i32,
    pub letter: Letter,
    pub tiles: usize,
}

/// Scatters letter islands over Letterverse chunks the first time each one loads.
pub struct IslandGenerator {
    cfg: RealmConfig,
    noise: FastNoiseLite,
}

impl IslandGenerator {
    pub fn new(cfg: RealmConfig) -> Self {
        let mut noise = FastNoiseLite::with_seed(cfg.seed as i32);
        noise.set_noise_type(Some(NoiseType::OpenSimplex2));
        noise.set_frequency(Some(cfg.noise_frequency));
        Self { cfg, noise }
    }

    #[inline]
    pub fn chunk_seed(cx: i32, cz: i32) -> u64 {
        (cx as i64)
            .wrapping_mul(341_873_128_712)
            .wrapping_add((cz as i64).wrapping_mul(132_897_987_541)) as u64
    }

    /// Populate a chunk column. Only the Letterverse gets islands, and only on first load.
    pub fn on_chunk_loaded(&self, level: &mut Level, cx: i32, cz: i32) -> Vec<Island> {
        if !level.dimension.is_letterverse() || !level.mark_chunk_loaded(cx, cz) {
            return Vec::new();
        }
        let mut rng = ChaCha8Rng::seed_from_u64(Self::chunk_seed(cx, cz) ^ self.cfg.seed);
        let mut out = Vec::new();
        if rng.gen_bool(self.cfg.island_chance.clamp(0.0, 1.0)) {
            out.extend(self.build(level, &mut rng, cx, cz, UPPER_BAND));
        }
        if rng.gen_bool(self.cfg.second_island_chance.clamp(0.0, 1.0)) {
            out.extend(self.build(level, &mut rng, cx, cz, LOWER_BAND));
        }
        out
    }

    fn build(
        &self,
        level: &mut Level,
        rng: &mut ChaCha8Rng,
        cx: i32,
        cz: i32,
        band: Range<i32>,
    ) -> Option<Island> {
        let letter = Letter::from_index(rng.gen_range(0..Letter::COUNT))?;
        let center = GridPos::new(
            cx * CHUNK_SIZE + rng.gen_range(0..CHUNK_SIZE),
            rng.gen_range(band),
            cz * CHUNK_SIZE + rng.gen_range(0..CHUNK_SIZE),
        );
        let radius = rng.gen_range(MIN_RADIUS..=MAX_RADIUS);
        let Some(block) = level.registry().letter_block(letter) else {
            log::warn!(target: "realm", "no block for letter '{}', island skipped", letter.as_char());
            return None;
        };

        let r = radius as f32;
        let mut tiles = 0;
        for dx in -radius..=radius {
            for dz in -radius..=radius {
                let d = ((dx * dx + dz * dz) as f32).sqrt();
                if d > r {
                    continue;
                }
                let column = center.offset(dx, 0, dz);
                let bump = (self.noise.get_noise_2d(column.x as f32, column.z as f32)
                    * self.cfg.noise_amplitude)
                    .round() as i32;
                let height = ((3.0 - d / r * 2.0) as i32 + bump).max(0);
                let depth = (2.0 - d / r * 1.5) as i32;
                for dy in -depth..=height {
                    level.set_block(column.above(dy), block, UpdateMode::Silent);
                    tiles += 1;
                }
            }
        }
        log::debug!(
            target: "realm",
            "island of '{}' at {} radius {} ({} tiles)",
            letter.as_char(),
            center,
            radius,
            tiles
        );
        Some(Island {
            center,
            radius,
            letter,
            tiles,
        })
    }
}
