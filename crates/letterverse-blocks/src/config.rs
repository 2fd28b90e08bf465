use serde::Deserialize;

use crate::types::{BlockRole, Letter};

// Top-level blocks config file
#[derive(Deserialize, Debug, Default)]
pub struct BlocksConfig {
    pub blocks: Vec<BlockDef>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct BlockDef {
    pub name: String,
    #[serde(default)]
    pub id: Option<u16>,
    #[serde(default)]
    pub role: Option<BlockRole>,
    // Required when role = "letter"
    #[serde(default)]
    pub letter: Option<Letter>,
    #[serde(default)]
    pub solid: Option<bool>,
}

impl BlockDef {
    pub fn named(name: &str, role: BlockRole) -> Self {
        BlockDef {
            name: name.to_string(),
            id: None,
            role: Some(role),
            letter: None,
            solid: None,
        }
    }
}

/// The block set the mod ships with: engine basics, frame blocks, and one tile per letter.
pub fn standard_blocks() -> BlocksConfig {
    let mut blocks = vec![
        BlockDef {
            id: Some(0),
            solid: Some(false),
            ..BlockDef::named("air", BlockRole::Air)
        },
        BlockDef::named("stone", BlockRole::Plain),
        BlockDef::named("grass_block", BlockRole::Plain),
        BlockDef::named("dirt", BlockRole::Plain),
        BlockDef::named("sand", BlockRole::Plain),
        BlockDef::named("bookshelf", BlockRole::Marker),
        BlockDef::named("obsidian", BlockRole::NativeMarker),
        BlockDef {
            solid: Some(false),
            ..BlockDef::named("portal", BlockRole::Filler)
        },
    ];
    for letter in Letter::all() {
        blocks.push(BlockDef {
            letter: Some(letter),
            ..BlockDef::named(&format!("letter_{}", letter.as_char()), BlockRole::Letter)
        });
    }
    BlocksConfig { blocks }
}
