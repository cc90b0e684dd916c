//! Test utilities for headless Bevy integration tests.
//!
//! Provides `TestApp`, a wrapper around `bevy::app::App` that uses
//! `MinimalPlugins` + `RocketHeadlessPlugin` for testing the run
//! without a rendering or windowing backend.

use bevy::prelude::*;

use crate::bevy::events::*;
use crate::bevy::plugin::{RocketHeadlessPlugin, RunSet};
use crate::bevy::resources::{CommandQueue, RunCommand, RunRes, ScrollFrameRes};
use crate::run::Run;

/// Counts of run messages seen in `FixedUpdate`.
#[derive(Resource, Default, Debug)]
pub(crate) struct MessageTally {
    pub killed: usize,
    pub collected: Vec<CoinCollectedEvent>,
    pub teleported: Vec<WorldTeleportedEvent>,
    pub ended: usize,
}

fn tally_messages(
    mut tally: ResMut<MessageTally>,
    mut killed: MessageReader<PlayerKilledEvent>,
    mut collected: MessageReader<CoinCollectedEvent>,
    mut teleported: MessageReader<WorldTeleportedEvent>,
    mut ended: MessageReader<RunEndedEvent>,
) {
    tally.killed += killed.read().count();
    tally.collected.extend(collected.read().cloned());
    tally.teleported.extend(teleported.read().cloned());
    tally.ended += ended.read().count();
}

/// A headless Bevy app wrapper for testing.
pub(crate) struct TestApp {
    pub app: App,
}

impl TestApp {
    /// Create a new test app with default seed.
    pub fn new() -> Self {
        Self::with_seed(12345)
    }

    /// Create a new test app with a specific RNG seed.
    pub fn with_seed(seed: u64) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(bevy::input::InputPlugin);
        app.add_plugins(RocketHeadlessPlugin::default().with_seed(seed));
        app.init_resource::<MessageTally>();
        app.add_systems(FixedUpdate, tally_messages.after(RunSet::Stream));
        // Pause virtual time so that only explicit steps advance the run.
        app.world_mut().resource_mut::<Time<Virtual>>().pause();
        app.update();
        Self { app }
    }

    /// Run a single frame update.
    pub fn update(&mut self) {
        self.app.update();
    }

    /// Advance the run by exactly `n` fixed ticks.
    ///
    /// Feeds the fixed timestep straight into the accumulator so each
    /// update runs `FixedUpdate` once.
    pub fn step(&mut self, n: usize) {
        let dt = self.app.world().resource::<Time<Fixed>>().timestep();
        for _ in 0..n {
            self.app
                .world_mut()
                .resource_mut::<Time<Fixed>>()
                .accumulate_overstep(dt);
            self.app.update();
        }
    }

    pub fn push_command(&mut self, cmd: RunCommand) {
        self.app.world().resource::<CommandQueue>().push(cmd);
    }

    pub fn write_message<M: Message>(&mut self, message: M) {
        self.app.world_mut().write_message(message);
    }

    pub fn press_flight(&mut self) {
        self.app
            .world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::Space);
    }

    pub fn release_flight(&mut self) {
        self.app
            .world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .release(KeyCode::Space);
    }

    pub fn set_scroll_offset(&mut self, offset: f32) {
        let mut frame = self.app.world_mut().resource_mut::<ScrollFrameRes>();
        frame.frame.offset = offset;
    }

    pub fn scroll_offset(&self) -> f32 {
        self.app.world().resource::<ScrollFrameRes>().frame.offset
    }

    pub fn run(&self) -> &Run {
        &self.app.world().resource::<RunRes>().run
    }

    pub fn run_mut(&mut self) -> Mut<'_, RunRes> {
        self.app.world_mut().resource_mut::<RunRes>()
    }

    pub fn tally(&self) -> &MessageTally {
        self.app.world().resource::<MessageTally>()
    }
}
