use std::collections::HashMap;
use std::error::Error;
use std::fs;
use std::path::Path;

use letterverse_geom::Axis;

use super::config::{BlocksConfig, standard_blocks};
use super::types::{Block, BlockId, BlockRole, Letter, TileKind};

#[derive(Clone, Debug)]
pub struct BlockType {
    pub id: BlockId,
    pub name: String,
    pub role: BlockRole,
    pub letter: Option<Letter>,
    pub solid: bool,
}

impl BlockType {
    fn placeholder(id: BlockId) -> Self {
        BlockType {
            id,
            name: String::new(),
            role: BlockRole::Plain,
            letter: None,
            solid: false,
        }
    }
}

/// Block types by id and name, plus the keyed letter lookup.
#[derive(Default, Clone, Debug)]
pub struct BlockRegistry {
    pub blocks: Vec<BlockType>,
    pub by_name: HashMap<String, BlockId>,
    letters: [Option<BlockId>; Letter::COUNT],
    marker: Option<BlockId>,
    filler: Option<BlockId>,
}

impl BlockRegistry {
    pub fn standard() -> Self {
        // The built-in set is well formed; an error here would be a bug in `standard_blocks`.
        Self::from_config(standard_blocks()).unwrap_or_default()
    }

    pub fn load_from_path(blocks_path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let blocks_toml = fs::read_to_string(blocks_path)?;
        Self::from_toml_str(&blocks_toml)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: BlocksConfig = toml::from_str(s)?;
        Self::from_config(cfg)
    }

    pub fn from_config(cfg: BlocksConfig) -> Result<Self, Box<dyn Error>> {
        let mut reg = BlockRegistry::default();
        for def in cfg.blocks.into_iter() {
            let id = def.id.unwrap_or(reg.blocks.len() as u16);
            let role = def.role.unwrap_or_default();
            if reg.by_name.contains_key(&def.name) {
                return Err(format!("duplicate block name '{}'", def.name).into());
            }
            if role == BlockRole::Letter && def.letter.is_none() {
                return Err(format!("letter block '{}' has no letter", def.name).into());
            }
            if let Some(existing) = reg.get(id).filter(|t| !t.name.is_empty()) {
                return Err(format!(
                    "block '{}' reuses id {} of '{}'",
                    def.name, id, existing.name
                )
                .into());
            }
            let ty = BlockType {
                id,
                name: def.name,
                role,
                letter: def.letter.filter(|_| role == BlockRole::Letter),
                solid: def.solid.unwrap_or(role != BlockRole::Air),
            };
            match (role, ty.letter) {
                (BlockRole::Letter, Some(l)) => reg.letters[l.index()] = Some(id),
                (BlockRole::Marker, _) => {
                    reg.marker.get_or_insert(id);
                }
                (BlockRole::Filler, _) => {
                    reg.filler.get_or_insert(id);
                }
                _ => {}
            }
            reg.by_name.insert(ty.name.clone(), id);
            if reg.blocks.len() <= id as usize {
                reg.blocks
                    .resize(id as usize + 1, BlockType::placeholder(id));
            }
            reg.blocks[id as usize] = ty;
        }
        // Placeholder slots keep their own ids
        for (i, ty) in reg.blocks.iter_mut().enumerate() {
            ty.id = i as BlockId;
        }
        Ok(reg)
    }

    #[inline]
    pub fn get(&self, id: BlockId) -> Option<&BlockType> {
        self.blocks.get(id as usize)
    }

    pub fn id_by_name(&self, name: &str) -> Option<BlockId> {
        self.by_name.get(name).copied()
    }

    pub fn block_by_name(&self, name: &str) -> Option<Block> {
        self.id_by_name(name).map(Block::new)
    }

    /// Classify a block. Unknown ids are `Other`.
    pub fn kind_of(&self, b: Block) -> TileKind {
        let Some(ty) = self.get(b.id) else {
            return TileKind::Other;
        };
        match ty.role {
            BlockRole::Air => TileKind::Air,
            BlockRole::Marker => TileKind::Marker,
            BlockRole::Filler => TileKind::Filler(b.axis()),
            BlockRole::NativeMarker => TileKind::NativeMarker,
            BlockRole::Letter => ty.letter.map(TileKind::Letter).unwrap_or(TileKind::Other),
            BlockRole::Plain => TileKind::Other,
        }
    }

    #[inline]
    pub fn letter_of(&self, b: Block) -> Option<Letter> {
        self.kind_of(b).letter()
    }

    pub fn letter_block(&self, letter: Letter) -> Option<Block> {
        self.letters[letter.index()].map(Block::new)
    }

    pub fn marker_block(&self) -> Option<Block> {
        self.marker.map(Block::new)
    }

    pub fn filler_block(&self, axis: Axis) -> Option<Block> {
        self.filler.map(|id| Block::new(id).with_axis(axis))
    }

    pub fn name_of(&self, b: Block) -> &str {
        self.get(b.id).map(|t| t.name.as_str()).unwrap_or("unknown")
    }
}
