use std::collections::BTreeMap;
use std::error::Error;
use std::fs;
use std::path::Path;

use letterverse_blocks::ItemStack;
use serde::Deserialize;

const STANDARD_REWARDS: &[(&str, &str)] = &[
    ("wood", "oak_wood"),
    ("iron", "iron_ingot"),
    ("gold", "gold_ingot"),
    ("coal", "coal"),
    ("stone", "stone"),
    ("grass", "grass_block"),
    ("sand", "sand"),
    ("dirt", "dirt"),
    ("apple", "apple"),
    ("bread", "bread"),
    ("cake", "cake"),
    ("fish", "cooked_cod"),
    ("egg", "egg"),
    ("bed", "red_bed"),
    ("book", "book"),
    ("bow", "bow"),
    ("axe", "iron_axe"),
    ("sword", "iron_sword"),
    ("star", "nether_star"),
    ("rose", "poppy"),
    ("cookie", "cookie"),
    ("melon", "melon"),
    ("carrot", "carrot"),
    ("potato", "potato"),
    ("pumpkin", "pumpkin"),
    ("cow", "beef"),
    ("pig", "porkchop"),
    ("sheep", "mutton"),
    ("chicken", "chicken"),
    ("cat", "string"),
    ("dog", "bone"),
    ("bat", "phantom_membrane"),
    ("bee", "honeycomb"),
    ("fox", "sweet_berries"),
    ("ice", "ice"),
    ("sun", "glowstone"),
    ("log", "oak_log"),
    ("gem", "diamond"),
];

/// Extra words as they appear in a `[words]` table: word = item name.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct WordsConfig {
    pub entries: BTreeMap<String, String>,
}

impl WordsConfig {
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let text = fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }
}

/// Lowercase word to reward item.
#[derive(Clone, Debug, Default)]
pub struct RewardTable {
    entries: BTreeMap<String, ItemStack>,
}

impl RewardTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn standard() -> Self {
        let mut t = Self::new();
        for (word, item) in STANDARD_REWARDS {
            t.register(word, ItemStack::new(*item));
        }
        t
    }

    /// Add or replace a word. Returns the reward it replaced, if any.
    pub fn register(&mut self, word: &str, reward: ItemStack) -> Option<ItemStack> {
        let key = word.to_lowercase();
        log::debug!(target: "words", "registered word '{}' -> {}", key, reward.item);
        self.entries.insert(key, reward)
    }

    pub fn get(&self, word: &str) -> Option<&ItemStack> {
        self.entries.get(word)
    }

    pub fn merge(&mut self, cfg: &WordsConfig) {
        for (word, item) in &cfg.entries {
            self.register(word, ItemStack::new(item.clone()));
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ItemStack)> {
        self.entries.iter().map(|(w, s)| (w.as_str(), s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_table_has_every_entry() {
        let t = RewardTable::standard();
        assert_eq!(t.len(), STANDARD_REWARDS.len());
        assert_eq!(t.get("cat").map(|s| s.item.as_str()), Some("string"));
        assert_eq!(t.get("gem").map(|s| s.item.as_str()), Some("diamond"));
        assert!(t.get("CAT").is_none());
    }

    #[test]
    fn register_lowercases_and_replaces() {
        let mut t = RewardTable::standard();
        assert!(t.register("Moon", ItemStack::new("end_stone")).is_none());
        assert_eq!(t.get("moon").map(|s| s.item.as_str()), Some("end_stone"));
        let old = t.register("cat", ItemStack::with_count("string", 3));
        assert_eq!(old, Some(ItemStack::new("string")));
        assert_eq!(t.get("cat").map(|s| s.count), Some(3));
    }

    #[test]
    fn words_config_merges_from_toml() {
        let cfg: WordsConfig = toml::from_str("tree = \"oak_sapling\"\nIce = \"packed_ice\"\n").unwrap();
        let mut t = RewardTable::standard();
        t.merge(&cfg);
        assert_eq!(t.get("tree").map(|s| s.item.as_str()), Some("oak_sapling"));
        assert_eq!(t.get("ice").map(|s| s.item.as_str()), Some("packed_ice"));
    }
}
