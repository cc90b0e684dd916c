//! ECS Resources for the run.

use std::collections::VecDeque;
use std::sync::Arc;

use bevy::prelude::*;
use parking_lot::Mutex;

use crate::run::Run;
use crate::scroll::ScrollFrame;

/// The run coordinator. Only the run systems mutate it.
#[derive(Resource)]
pub struct RunRes {
    pub run: Run,
}

impl RunRes {
    pub fn new(run: Run) -> Self {
        Self { run }
    }
}

/// Camera scroll and viewport as reported by the host each tick.
///
/// The host writes the offset before `RunSet::Resolve`; the teleport system
/// writes the shifted offset back.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct ScrollFrameRes {
    pub frame: ScrollFrame,
}

impl ScrollFrameRes {
    pub fn new(frame: ScrollFrame) -> Self {
        Self { frame }
    }
}

/// Flight request for the current tick.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct FlightInput {
    /// Space bar, sampled by `capture_flight_input`.
    pub keyboard: bool,
    /// Set through `RunCommand::SetFlight` or directly by a host.
    pub external: bool,
}

impl FlightInput {
    pub fn held(&self) -> bool {
        self.keyboard || self.external
    }
}

/// Commands that an outside host (UI, script, simulator) can send to the app.
#[derive(Debug, Clone, PartialEq)]
pub enum RunCommand {
    /// Throw away the current run and start a new one.
    Restart { seed: Option<u64> },
    /// Hold or release the jetpack.
    SetFlight { held: bool },
    /// Frame boundary marker - commands after this are processed in the next frame.
    Yield,
}

/// Thread-safe command queue.
///
/// This allows a host outside the ECS to push commands that will be
/// processed by Bevy systems on the next frame.
#[derive(Resource, Clone)]
pub struct CommandQueue {
    inner: Arc<Mutex<VecDeque<RunCommand>>>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    /// Push a command to be processed.
    pub fn push(&self, command: RunCommand) {
        self.inner.lock().push_back(command);
    }

    /// Drain commands until Yield or empty.
    ///
    /// Yield itself is consumed but not returned.
    pub fn drain_until_yield(&self) -> Vec<RunCommand> {
        let mut guard = self.inner.lock();
        let mut commands = Vec::new();

        while let Some(cmd) = guard.pop_front() {
            if cmd == RunCommand::Yield {
                tracing::debug!("[command] Yield - deferring remaining commands to next frame");
                break;
            }
            commands.push(cmd);
        }

        commands
    }

    /// Check if there are pending commands.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Clear all pending commands.
    pub fn clear(&self) {
        self.inner.lock().clear();
    }
}

impl Default for CommandQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_stops_at_yield() {
        let queue = CommandQueue::new();
        queue.push(RunCommand::SetFlight { held: true });
        queue.push(RunCommand::Yield);
        queue.push(RunCommand::Restart { seed: None });

        assert_eq!(queue.drain_until_yield(), vec![RunCommand::SetFlight { held: true }]);
        assert!(!queue.is_empty());
        assert_eq!(queue.drain_until_yield(), vec![RunCommand::Restart { seed: None }]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_clones_share_the_queue() {
        let queue = CommandQueue::new();
        let host_side = queue.clone();
        host_side.push(RunCommand::Restart { seed: Some(3) });
        assert_eq!(queue.drain_until_yield(), vec![RunCommand::Restart { seed: Some(3) }]);

        host_side.push(RunCommand::Restart { seed: None });
        queue.clear();
        assert!(host_side.is_empty());
    }

    #[test]
    fn test_flight_input_combines_sources() {
        let mut input = FlightInput::default();
        assert!(!input.held());
        input.external = true;
        assert!(input.held());
        input.external = false;
        input.keyboard = true;
        assert!(input.held());
    }
}
