use letterverse_blocks::Block;
use letterverse_geom::GridPos;
use std::collections::HashMap;

pub const CHUNK_SIZE: i32 = 16;

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridStats {
    pub chunk_entries: usize,
    pub blocks: usize,
}

/// Chunk-aware sparse block storage. Anything not stored is air.
#[derive(Default, Clone, Debug)]
pub struct ChunkedGrid {
    // Map per-chunk: key=(cx,cy,cz) -> map of world coords -> Block
    inner: HashMap<(i32, i32, i32), HashMap<GridPos, Block>>,
}

impl ChunkedGrid {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn chunk_key(p: GridPos) -> (i32, i32, i32) {
        (
            p.x.div_euclid(CHUNK_SIZE),
            p.y.div_euclid(CHUNK_SIZE),
            p.z.div_euclid(CHUNK_SIZE),
        )
    }

    pub fn stats(&self) -> GridStats {
        GridStats {
            chunk_entries: self.inner.len(),
            blocks: self.inner.values().map(|m| m.len()).sum(),
        }
    }

    pub fn get(&self, p: GridPos) -> Block {
        self.inner
            .get(&Self::chunk_key(p))
            .and_then(|m| m.get(&p).copied())
            .unwrap_or(Block::AIR)
    }

    /// Store `b` at `p`, returning the previous block.
    pub fn set(&mut self, p: GridPos, b: Block) -> Block {
        let k = Self::chunk_key(p);
        if b == Block::AIR {
            let Some(m) = self.inner.get_mut(&k) else {
                return Block::AIR;
            };
            let prev = m.remove(&p).unwrap_or(Block::AIR);
            if m.is_empty() {
                self.inner.remove(&k);
            }
            return prev;
        }
        self.inner
            .entry(k)
            .or_default()
            .insert(p, b)
            .unwrap_or(Block::AIR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn air_writes_keep_storage_sparse() {
        let mut g = ChunkedGrid::new();
        let p = GridPos::new(-1, 70, 33);
        assert_eq!(g.set(p, Block::new(5)), Block::AIR);
        assert_eq!(g.get(p), Block::new(5));
        assert_eq!(g.stats(), GridStats { chunk_entries: 1, blocks: 1 });
        assert_eq!(g.set(p, Block::AIR), Block::new(5));
        assert_eq!(g.stats(), GridStats::default());
    }

    #[test]
    fn negative_coordinates_land_in_negative_chunks() {
        assert_eq!(ChunkedGrid::chunk_key(GridPos::new(-1, 0, 16)), (-1, 0, 1));
        let mut g = ChunkedGrid::new();
        g.set(GridPos::new(-1, 0, 16), Block::new(2));
        g.set(GridPos::new(0, 0, 16), Block::new(2));
        assert_eq!(g.stats(), GridStats { chunk_entries: 2, blocks: 2 });
        assert_eq!(g.get(GridPos::new(-1, 0, 16)), Block::new(2));
    }
}
