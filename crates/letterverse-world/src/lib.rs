//! Levels, agents, and the voxel grid they share.
#![forbid(unsafe_code)]

pub mod agent;
pub mod dimension;
pub mod entity;
pub mod grid;
pub mod level;
pub mod world;

pub use agent::{Agent, AgentId, Inventory};
pub use dimension::DimensionId;
pub use entity::{EntityId, ItemEntity, Sound, SoundCue};
pub use grid::{ChunkedGrid, GridStats};
pub use level::{Level, UpdateMode};
pub use world::World;
