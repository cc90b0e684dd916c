//! Command processing system.
//!
//! Processes commands pushed by a host outside the ECS.

use bevy::prelude::*;

use crate::bevy::{
    CommandQueue, FlightInput, RestartRunEvent, RunCommand, RunRes, ScrollFrameRes,
};

/// System to process all commands from the external command queue.
///
/// Commands after a Yield are processed in the next frame.
pub fn process_commands(
    command_queue: Res<CommandQueue>,
    mut flight: ResMut<FlightInput>,
    mut restarts: MessageWriter<RestartRunEvent>,
) {
    for command in command_queue.drain_until_yield() {
        match command {
            RunCommand::Restart { seed } => {
                tracing::info!("[command] Restart (seed={:?})", seed);
                restarts.write(RestartRunEvent { seed });
            }
            RunCommand::SetFlight { held } => {
                tracing::debug!("[command] SetFlight: {}", held);
                flight.external = held;
            }
            // Yield is consumed by drain_until_yield(), should not reach here
            RunCommand::Yield => {}
        }
    }
}

/// System to rebuild the run and move the camera back to the start.
pub fn handle_restart(
    mut events: MessageReader<RestartRunEvent>,
    mut run: ResMut<RunRes>,
    mut frame: ResMut<ScrollFrameRes>,
) {
    // Several requests in one frame collapse into the last one.
    let Some(event) = events.read().last() else {
        return;
    };

    match event.seed {
        Some(seed) => run.run.restart_with_seed(seed),
        None => run.run.restart(),
    }
    frame.frame = run.run.initial_frame();
}
