//! Block, item, and registry crate.
#![forbid(unsafe_code)]

pub mod config;
pub mod item;
pub mod registry;
pub mod types;

// Re-exports for convenience
pub use item::ItemStack;
pub use registry::BlockRegistry;
pub use types::{Block, BlockId, Letter, TileKind};
