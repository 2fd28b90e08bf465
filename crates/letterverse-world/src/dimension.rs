use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DimensionId {
    Overworld,
    Nether,
    /// The low-gravity realm reached through bookshelf frames.
    Letterverse,
}

impl DimensionId {
    pub const ALL: [DimensionId; 3] = [
        DimensionId::Overworld,
        DimensionId::Nether,
        DimensionId::Letterverse,
    ];

    #[inline]
    pub fn is_letterverse(self) -> bool {
        self == DimensionId::Letterverse
    }

    pub fn name(self) -> &'static str {
        match self {
            DimensionId::Overworld => "overworld",
            DimensionId::Nether => "nether",
            DimensionId::Letterverse => "letterverse",
        }
    }
}

impl std::fmt::Display for DimensionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
