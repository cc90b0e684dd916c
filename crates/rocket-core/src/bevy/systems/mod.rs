//! Systems for the run.
//!
//! Organized by functionality:
//! - command: Command queue processing and restarts
//! - player: Input capture, host feedback, overlaps and the life-state machine
//! - world: Recycling and teleport
//! - state_sync: Sync ECS state to shared stores for UI

pub mod command;
pub mod player;
pub mod state_sync;
pub mod world;

pub use command::*;
pub use player::*;
pub use state_sync::*;
pub use world::*;
