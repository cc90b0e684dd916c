//! Bevy integration for rocket-run.
//!
//! Schedules the run coordinator as ordered ECS systems on `FixedUpdate`
//! and exchanges overlaps, input and run events with the host as messages.

pub mod events;
pub mod plugin;
pub mod resources;
pub mod state_store;
pub mod systems;

#[cfg(test)]
pub(crate) mod test_utils;

pub use events::*;
pub use plugin::{RocketHeadlessPlugin, RunSet, TICK_DT};
pub use resources::*;
pub use state_store::{RunStore, RunSummary, StateStores};
