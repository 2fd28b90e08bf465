use std::collections::BTreeSet;

use hashbrown::HashMap;

use letterverse_geom::GridPos;
use letterverse_world::DimensionId;

/// Anchors of the frames currently kept lit, per dimension.
///
/// Runtime cache only: rebuilt by re-detection, never saved.
#[derive(Default, Debug, Clone)]
pub struct ActiveFrames {
    by_dim: HashMap<DimensionId, BTreeSet<GridPos>>,
}

impl ActiveFrames {
    pub fn new() -> Self {
        Self::default()
    }

    /// True if the anchor was not tracked yet.
    pub fn insert(&mut self, dim: DimensionId, anchor: GridPos) -> bool {
        self.by_dim.entry(dim).or_default().insert(anchor)
    }

    pub fn contains(&self, dim: DimensionId, anchor: GridPos) -> bool {
        self.by_dim.get(&dim).is_some_and(|s| s.contains(&anchor))
    }

    pub fn remove(&mut self, dim: DimensionId, anchor: GridPos) -> bool {
        self.by_dim.get_mut(&dim).is_some_and(|s| s.remove(&anchor))
    }

    /// Drop anchors strictly closer than `dist` to `center`. Returns the dropped anchors.
    pub fn remove_within(&mut self, dim: DimensionId, center: GridPos, dist: i64) -> Vec<GridPos> {
        let Some(set) = self.by_dim.get_mut(&dim) else {
            return Vec::new();
        };
        let dropped: Vec<GridPos> = set
            .iter()
            .copied()
            .filter(|a| a.closer_than(center, dist))
            .collect();
        for a in &dropped {
            set.remove(a);
        }
        dropped
    }

    /// Snapshot in ascending position order.
    pub fn anchors(&self, dim: DimensionId) -> Vec<GridPos> {
        self.by_dim
            .get(&dim)
            .map(|s| s.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.by_dim.values().map(|s| s.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.by_dim.clear();
    }
}
