use serde::{Deserialize, Serialize};

/// A named item and a count. Block items share their block's name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    pub item: String,
    #[serde(default = "one")]
    pub count: u32,
}

fn one() -> u32 {
    1
}

impl ItemStack {
    pub fn new(item: impl Into<String>) -> Self {
        ItemStack {
            item: item.into(),
            count: 1,
        }
    }

    pub fn with_count(item: impl Into<String>, count: u32) -> Self {
        ItemStack {
            item: item.into(),
            count,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}
