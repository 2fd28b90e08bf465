use std::fs;
use std::path::{Path, PathBuf};

use letterverse_geom::Vec3;
use letterverse_portal::PortalConfig;
use letterverse_realm::{RealmConfig, StarterConfig, WandConfig};
use letterverse_words::WordsConfig;
use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Server settings, usually from `letterverse.toml`. Every section is optional.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// When false the Letterverse is never created and portal transit has nowhere to go.
    pub letterverse_enabled: bool,
    pub spawn: [f32; 3],
    /// Chunk columns loaded around each agent, as a radius.
    pub view_radius: i32,
    /// Extra ticks simulated after a scenario's last step.
    pub settle_ticks: u64,
    pub portal: PortalConfig,
    pub realm: RealmConfig,
    pub starter: StarterConfig,
    pub wand: WandConfig,
    pub words: WordsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            letterverse_enabled: true,
            spawn: [0.5, 64.0, 0.5],
            view_radius: 1,
            settle_ticks: 40,
            portal: PortalConfig::default(),
            realm: RealmConfig::default(),
            starter: StarterConfig::default(),
            wand: WandConfig::default(),
            words: WordsConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    pub fn spawn_point(&self) -> Vec3 {
        let [x, y, z] = self.spawn;
        Vec3::new(x, y, z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_all_defaults() {
        let cfg = ServerConfig::from_toml_str("").unwrap();
        assert!(cfg.letterverse_enabled);
        assert_eq!(cfg.portal, PortalConfig::default());
        assert_eq!(cfg.wand.letters_per_use, 10);
    }

    #[test]
    fn sections_override_their_fields_only() {
        let cfg = ServerConfig::from_toml_str(
            r#"
letterverse_enabled = false

[portal]
trigger_ticks = 5

[realm]
island_chance = 0.5

[words]
tree = "oak_sapling"
"#,
        )
        .unwrap();
        assert!(!cfg.letterverse_enabled);
        assert_eq!(cfg.portal.trigger_ticks, 5);
        assert_eq!(cfg.portal.maintenance_interval, 20);
        assert_eq!(cfg.realm.island_chance, 0.5);
        assert_eq!(cfg.realm.drag, 0.98);
        assert_eq!(cfg.words.entries.get("tree").map(String::as_str), Some("oak_sapling"));
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = ServerConfig::load_from_path("/nonexistent/letterverse.toml").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/letterverse.toml"));
    }
}
