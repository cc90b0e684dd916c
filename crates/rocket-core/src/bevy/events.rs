//! ECS Messages exchanged between the host and the run systems.
//!
//! Note: In Bevy 0.18+, buffered events use Message trait instead of Event.

use bevy::prelude::*;

// ========== Host → Run ==========

/// The physics host saw the player overlap the hazard this tick.
#[derive(Message, Debug, Clone, Default)]
pub struct HazardOverlapEvent;

/// The physics host saw the player overlap an active coin.
#[derive(Message, Debug, Clone)]
pub struct CoinOverlapEvent {
    /// Pool slot of the coin.
    pub slot: usize,
}

/// Integrated player motion written back by the physics host.
#[derive(Message, Debug, Clone)]
pub struct PlayerBodyFeedback {
    /// Feet anchor of the player.
    pub position: Vec2,
    pub velocity: Vec2,
    /// Whether the body rests on the floor.
    pub blocked_down: bool,
}

/// Message to request a fresh run.
#[derive(Message, Debug, Clone, Default)]
pub struct RestartRunEvent {
    /// Seed for the new run; fresh randomness when `None`.
    pub seed: Option<u64>,
}

// ========== Run → Host ==========

/// Message fired when the player is hit and starts dying.
#[derive(Message, Debug, Clone, Default)]
pub struct PlayerKilledEvent;

/// Message fired when a coin is collected.
#[derive(Message, Debug, Clone)]
pub struct CoinCollectedEvent {
    pub slot: usize,
    /// Score after this coin.
    pub score: u32,
}

/// Message fired when the world was shifted back by the teleport modulus.
#[derive(Message, Debug, Clone)]
pub struct WorldTeleportedEvent {
    pub modulus: f32,
    /// Scroll offset after the shift; the camera must jump there.
    pub scroll_offset: f32,
}

/// Message fired once per run when the player comes to a stop.
#[derive(Message, Debug, Clone, Default)]
pub struct RunEndedEvent;
