//! Headless Letterverse server: bookshelf portals, letter words and the low-gravity realm,
//! wired together on one event bus and driven by scripted scenarios.
#![forbid(unsafe_code)]

pub mod bus;
pub mod commands;
pub mod config;
pub mod event;
pub mod scenario;
pub mod server;

pub use bus::{EventBus, Handler};
pub use config::{ConfigError, ServerConfig};
pub use event::{BlockChange, Event, EventQueue};
pub use scenario::{Scenario, ScenarioError};
pub use server::{Server, Summary};
