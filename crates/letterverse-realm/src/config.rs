use serde::Deserialize;

/// Physics and terrain of the Letterverse.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct RealmConfig {
    /// Engine gravity per tick, given back before drag.
    pub gravity: f32,
    pub drag: f32,
    /// Vertical speed while jumping (up) or sneaking (down).
    pub vertical_speed: f32,
    pub island_chance: f64,
    pub second_island_chance: f64,
    /// Mixed into every per-chunk seed.
    pub seed: u64,
    pub noise_frequency: f32,
    /// Most tiles the noise field may add to or take from an island column.
    pub noise_amplitude: f32,
}

impl Default for RealmConfig {
    fn default() -> Self {
        Self {
            gravity: 0.08,
            drag: 0.98,
            vertical_speed: 0.15,
            island_chance: 0.2,
            second_island_chance: 0.1,
            seed: 0,
            noise_frequency: 0.15,
            noise_amplitude: 1.0,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct StarterConfig {
    pub wand_item: String,
    pub grant_on_respawn: bool,
}

impl Default for StarterConfig {
    fn default() -> Self {
        Self {
            wand_item: "letter_wand".to_string(),
            grant_on_respawn: true,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct WandConfig {
    pub letters_per_use: u32,
    pub cooldown_ticks: u64,
    pub throw_speed: f32,
}

impl Default for WandConfig {
    fn default() -> Self {
        Self {
            letters_per_use: 10,
            cooldown_ticks: 20,
            throw_speed: 0.5,
        }
    }
}
