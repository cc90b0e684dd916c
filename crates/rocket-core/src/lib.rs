//! Rocket-Run Core Library
//!
//! World streaming, object recycling and the player state machine of an
//! endless side-scroller. Rendering, physics integration and input polling
//! belong to the host.
//!
//! This library provides two modes of operation:
//! - Plain mode: drive a [`Run`] directly, one [`Run::tick`] per frame
//! - Bevy mode: add the headless plugin and feed it messages

#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]

pub mod body;
pub mod coin;
pub mod config;
pub mod hazard;
pub mod player;
pub mod prop;
pub mod run;
pub mod scroll;
pub mod teleport;
pub mod world;

// Bevy integration
pub mod bevy;

pub use body::{Body, BodyShape, Motion};
pub use coin::{CoinField, CoinSlot, CoinState};
pub use config::{
    CoinConfig, ConfigError, HazardConfig, Lead, Lookahead, PlayerConfig, PropConfig, RunConfig,
    TeleportConfig, ViewportConfig,
};
pub use hazard::{Hazard, Segment, SegmentKind};
pub use player::{LifeState, Player, Pose, SubVisual};
pub use prop::{Prop, PropGroup, PropKind, PropSet};
pub use run::{Run, Score, TickReport, TickSignals};
pub use scroll::ScrollFrame;
pub use teleport::{ShiftX, TeleportController};
pub use world::{RecycleReport, World};
