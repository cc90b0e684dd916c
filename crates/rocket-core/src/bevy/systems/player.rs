//! Player systems: input, host feedback, overlaps, and the life-state machine.

use bevy::prelude::*;

use crate::bevy::{
    CoinCollectedEvent, CoinOverlapEvent, FlightInput, HazardOverlapEvent, PlayerBodyFeedback,
    PlayerKilledEvent, RunEndedEvent, RunRes,
};

/// Samples the flight key. Apps without an input plugin only see external flight.
pub fn capture_flight_input(
    keyboard: Option<Res<ButtonInput<KeyCode>>>,
    mut flight: ResMut<FlightInput>,
) {
    flight.keyboard = keyboard.is_some_and(|keys| keys.pressed(KeyCode::Space));
}

/// Copies the host's integrated motion onto the player.
///
/// Only the latest feedback counts when more than one arrives in a tick.
pub fn apply_body_feedback(
    mut feedback: MessageReader<PlayerBodyFeedback>,
    mut run: ResMut<RunRes>,
) {
    let Some(latest) = feedback.read().last() else {
        return;
    };

    let player = &mut run.run.world_mut().player;
    player.set_position(latest.position);
    player.motion.velocity = latest.velocity;
    player.motion.blocked_down = latest.blocked_down;
}

pub fn resolve_hazard_overlaps(
    mut overlaps: MessageReader<HazardOverlapEvent>,
    mut run: ResMut<RunRes>,
    mut killed: MessageWriter<PlayerKilledEvent>,
) {
    if overlaps.read().count() == 0 {
        return;
    }
    if run.run.kill_player() {
        killed.write(PlayerKilledEvent);
    }
}

pub fn resolve_coin_overlaps(
    mut overlaps: MessageReader<CoinOverlapEvent>,
    mut run: ResMut<RunRes>,
    mut collected: MessageWriter<CoinCollectedEvent>,
) {
    for overlap in overlaps.read() {
        if run.run.collect_coin(overlap.slot) {
            collected.write(CoinCollectedEvent {
                slot: overlap.slot,
                score: run.run.score(),
            });
        }
    }
}

/// Runs the state machine and reports the end of the run exactly once.
pub fn advance_player(
    flight: Res<FlightInput>,
    mut run: ResMut<RunRes>,
    mut ended: MessageWriter<RunEndedEvent>,
) {
    if run.run.advance_player(flight.held()) {
        ended.write(RunEndedEvent);
    }
}
