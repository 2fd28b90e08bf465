use letterverse_blocks::config::{BlockDef, BlocksConfig};
use letterverse_blocks::types::BlockRole;
use letterverse_blocks::{BlockRegistry, Letter, TileKind};
use proptest::prelude::*;

#[test]
fn toml_config_assigns_roles_and_letters() {
    let reg = BlockRegistry::from_toml_str(
        r#"
        [[blocks]]
        name = "air"
        id = 0
        role = "air"

        [[blocks]]
        name = "shelf"
        role = "marker"

        [[blocks]]
        name = "rune_x"
        role = "letter"
        letter = "x"
    "#,
    )
    .unwrap();
    let shelf = reg.block_by_name("shelf").unwrap();
    assert_eq!(reg.kind_of(shelf), TileKind::Marker);
    let x = Letter::from_char('x').unwrap();
    let rune = reg.letter_block(x).unwrap();
    assert_eq!(reg.name_of(rune), "rune_x");
    assert!(reg.filler_block(letterverse_geom::Axis::X).is_none());
}

#[test]
fn letter_role_without_letter_is_rejected() {
    let cfg = BlocksConfig {
        blocks: vec![BlockDef::named("mystery", BlockRole::Letter)],
    };
    assert!(BlockRegistry::from_config(cfg).is_err());
}

#[test]
fn duplicate_names_are_rejected() {
    let cfg = BlocksConfig {
        blocks: vec![
            BlockDef::named("stone", BlockRole::Plain),
            BlockDef::named("stone", BlockRole::Plain),
        ],
    };
    assert!(BlockRegistry::from_config(cfg).is_err());
}

#[test]
fn explicit_ids_leave_placeholder_gaps() {
    let cfg = BlocksConfig {
        blocks: vec![BlockDef {
            id: Some(3),
            ..BlockDef::named("far", BlockRole::Plain)
        }],
    };
    let reg = BlockRegistry::from_config(cfg).unwrap();
    assert_eq!(reg.blocks.len(), 4);
    assert_eq!(reg.get(1).map(|t| t.id), Some(1));
    assert_eq!(reg.id_by_name("far"), Some(3));
}

proptest! {
    #[test]
    fn letter_tiles_resolve_only_for_configured_letters(picked in proptest::collection::vec(any::<bool>(), 26)) {
        let mut blocks = vec![BlockDef::named("air", BlockRole::Air)];
        for (i, &on) in picked.iter().enumerate() {
            if on {
                let letter = Letter::from_index(i).unwrap();
                blocks.push(BlockDef {
                    letter: Some(letter),
                    ..BlockDef::named(&format!("glyph_{}", letter.as_char()), BlockRole::Letter)
                });
            }
        }
        let reg = BlockRegistry::from_config(BlocksConfig { blocks }).unwrap();
        for (i, &on) in picked.iter().enumerate() {
            let letter = Letter::from_index(i).unwrap();
            match reg.letter_block(letter) {
                Some(b) => {
                    prop_assert!(on);
                    prop_assert_eq!(reg.kind_of(b), TileKind::Letter(letter));
                    prop_assert_eq!(reg.letter_of(b), Some(letter));
                }
                None => prop_assert!(!on),
            }
        }
    }
}
