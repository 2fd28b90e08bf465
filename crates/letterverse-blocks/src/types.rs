use letterverse_geom::Axis;
use serde::{Deserialize, Serialize};

// Compact voxel representation used at runtime
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default, Debug, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,
    pub state: BlockState,
}

pub type BlockId = u16;
pub type BlockState = u16;

// Filler orientation is packed into the state: 0 = X, 1 = Z
const AXIS_X: BlockState = 0;
const AXIS_Z: BlockState = 1;

impl Block {
    pub const AIR: Block = Block { id: 0, state: 0 };

    #[inline]
    pub const fn new(id: BlockId) -> Self {
        Block { id, state: 0 }
    }

    #[inline]
    pub fn with_axis(self, axis: Axis) -> Self {
        let state = match axis {
            Axis::Z => AXIS_Z,
            Axis::X | Axis::Y => AXIS_X,
        };
        Block { state, ..self }
    }

    #[inline]
    pub fn axis(self) -> Axis {
        if self.state == AXIS_Z { Axis::Z } else { Axis::X }
    }
}

/// One alphabet character, `a` through `z`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(try_from = "char", into = "char")]
pub struct Letter(u8);

impl Letter {
    pub const COUNT: usize = 26;

    pub fn from_char(c: char) -> Option<Letter> {
        let c = c.to_ascii_lowercase();
        c.is_ascii_lowercase().then(|| Letter(c as u8 - b'a'))
    }

    #[inline]
    pub fn from_index(i: usize) -> Option<Letter> {
        (i < Self::COUNT).then(|| Letter(i as u8))
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn as_char(self) -> char {
        (b'a' + self.0) as char
    }

    pub fn all() -> impl Iterator<Item = Letter> {
        (0..Self::COUNT as u8).map(Letter)
    }
}

impl TryFrom<char> for Letter {
    type Error = String;
    fn try_from(c: char) -> Result<Self, Self::Error> {
        Letter::from_char(c).ok_or_else(|| format!("'{c}' is not a letter a-z"))
    }
}

impl From<Letter> for char {
    fn from(l: Letter) -> char {
        l.as_char()
    }
}

/// Role a block type plays for the portal and word logic.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockRole {
    Air,
    /// Frame border of a Letterverse portal (bookshelf).
    Marker,
    /// Lit portal interior.
    Filler,
    /// Frame border of the engine's own portal (obsidian).
    NativeMarker,
    Letter,
    #[default]
    Plain,
}

/// What occupies a tile, derived from the block and the registry.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum TileKind {
    Air,
    Marker,
    Filler(Axis),
    NativeMarker,
    Letter(Letter),
    Other,
}

impl TileKind {
    #[inline]
    pub fn is_filler(self) -> bool {
        matches!(self, TileKind::Filler(_))
    }

    #[inline]
    pub fn letter(self) -> Option<Letter> {
        match self {
            TileKind::Letter(l) => Some(l),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_cover_the_alphabet() {
        let s: String = Letter::all().map(Letter::as_char).collect();
        assert_eq!(s, "abcdefghijklmnopqrstuvwxyz");
        assert_eq!(Letter::from_char('Q').map(Letter::as_char), Some('q'));
        assert!(Letter::from_char('1').is_none());
        assert!(Letter::from_index(26).is_none());
    }

    #[test]
    fn filler_axis_is_packed_in_state() {
        let b = Block::new(7).with_axis(Axis::Z);
        assert_eq!(b.axis(), Axis::Z);
        assert_eq!(b.with_axis(Axis::X).axis(), Axis::X);
        assert_eq!(b.id, 7);
    }
}
