//! Bookshelf portal frames: detection, lighting, upkeep, and dimension transit.
#![forbid(unsafe_code)]

pub mod active;
pub mod census;
pub mod config;
pub mod detector;
pub mod error;
pub mod frame;
pub mod gate;
pub mod relocate;
pub mod service;

pub use active::ActiveFrames;
pub use census::{FrameCensus, FrameClass};
pub use config::PortalConfig;
pub use error::PortalError;
pub use frame::{FRAME_HEIGHT, FRAME_WIDTH, Facing, Frame};
pub use gate::{GateOutcome, Observation, TransitGate, TransitState, TravelDecision};
pub use relocate::Arrival;
pub use service::PortalService;
