//! The Letterverse dimension itself: its physics, its terrain, and the wand that seeds it.
#![forbid(unsafe_code)]

pub mod config;
pub mod gravity;
pub mod islands;
pub mod service;
pub mod starter;
pub mod wand;

pub use config::{RealmConfig, StarterConfig, WandConfig};
pub use gravity::apply_low_gravity;
pub use islands::{Island, IslandGenerator};
pub use service::RealmService;
pub use starter::{Grant, grant_on_login, grant_on_respawn};
pub use wand::{LetterWand, WandUse};
