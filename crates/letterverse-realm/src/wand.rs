use letterverse_blocks::{ItemStack, Letter};
use letterverse_geom::Vec3;
use letterverse_world::{Agent, EntityId, Level, Sound};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::WandConfig;

const CHEST_HEIGHT: f32 = 1.5;
const SIDE_SPREAD: f32 = 0.25;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WandUse {
    /// Still cooling down; usable again at this game tick.
    Cooling { ready_at: u64 },
    Scattered(Vec<EntityId>),
}

/// Throws a fan of random letter items in front of its user.
pub struct LetterWand {
    pub item: String,
    cfg: WandConfig,
    rng: ChaCha8Rng,
}

impl LetterWand {
    pub fn new(item: impl Into<String>, cfg: WandConfig, seed: u64) -> Self {
        Self {
            item: item.into(),
            cfg,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn use_by(&mut self, agent: &mut Agent, level: &mut Level) -> WandUse {
        let now = level.game_time;
        if agent.on_cooldown(&self.item, now) {
            let ready_at = agent.cooldowns.get(&self.item).copied().unwrap_or(now);
            return WandUse::Cooling { ready_at };
        }

        let origin = agent.pos + Vec3::new(0.0, CHEST_HEIGHT, 0.0);
        let look = Vec3::from_yaw_pitch(agent.yaw, agent.pitch);
        let mut spawned = Vec::with_capacity(self.cfg.letters_per_use as usize);
        for _ in 0..self.cfg.letters_per_use {
            let Some(name) = self.random_letter_item(level) else {
                continue;
            };
            let spread = Vec3::new(
                self.rng.gen_range(-SIDE_SPREAD..SIDE_SPREAD),
                self.rng.gen_range(0.2..0.5),
                self.rng.gen_range(-SIDE_SPREAD..SIDE_SPREAD),
            );
            let velocity = look * self.cfg.throw_speed + spread;
            spawned.push(level.spawn_item(ItemStack::new(name), origin, velocity));
        }
        let pitch = self.rng.gen_range(1.0..1.4);
        level.play_sound(Sound::EnchantUse, agent.pos, 1.0, pitch);
        agent.start_cooldown(&self.item, now, self.cfg.cooldown_ticks);
        log::debug!(
            target: "realm",
            "{} scattered {} letters in {}",
            agent.name,
            spawned.len(),
            level.dimension
        );
        WandUse::Scattered(spawned)
    }

    fn random_letter_item(&mut self, level: &Level) -> Option<String> {
        let letter = Letter::from_index(self.rng.gen_range(0..Letter::COUNT))?;
        let reg = level.registry();
        let block = reg.letter_block(letter)?;
        Some(reg.name_of(block).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use letterverse_blocks::{BlockRegistry, TileKind};
    use letterverse_world::{AgentId, DimensionId};
    use std::sync::Arc;

    fn setup() -> (LetterWand, Agent, Level) {
        let wand = LetterWand::new("letter_wand", WandConfig::default(), 7);
        let agent = Agent::new(AgentId(1), "wordsmith", DimensionId::Letterverse, Vec3::new(0.5, 100.0, 0.5));
        let level = Level::new(DimensionId::Letterverse, Arc::new(BlockRegistry::standard()));
        (wand, agent, level)
    }

    #[test]
    fn one_use_throws_ten_letters_forward_and_up() {
        let (mut wand, mut agent, mut level) = setup();
        let WandUse::Scattered(ids) = wand.use_by(&mut agent, &mut level) else {
            panic!("wand should be ready");
        };
        assert_eq!(ids.len(), 10);
        assert_eq!(level.items.len(), 10);
        let reg = level.registry();
        for item in &level.items {
            let block = reg.block_by_name(&item.stack.item).unwrap();
            assert!(matches!(reg.kind_of(block), TileKind::Letter(_)));
            assert_eq!(item.pos, Vec3::new(0.5, 101.5, 0.5));
            // yaw 0 looks along +Z
            assert!(item.velocity.z > 0.2 && item.velocity.z < 0.8);
            assert!(item.velocity.y >= 0.2 && item.velocity.y < 0.5);
            assert!(item.velocity.x.abs() <= SIDE_SPREAD);
        }
        let cue = level.sounds[0];
        assert_eq!(cue.sound, Sound::EnchantUse);
        assert!((1.0..1.4).contains(&cue.pitch));
    }

    #[test]
    fn cooldown_blocks_reuse_for_twenty_ticks() {
        let (mut wand, mut agent, mut level) = setup();
        wand.use_by(&mut agent, &mut level);
        for _ in 0..19 {
            level.advance_time();
            assert_eq!(wand.use_by(&mut agent, &mut level), WandUse::Cooling { ready_at: 20 });
        }
        level.advance_time();
        assert!(matches!(wand.use_by(&mut agent, &mut level), WandUse::Scattered(_)));
        assert_eq!(level.items.len(), 20);
    }
}
