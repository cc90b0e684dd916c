//! Bevy plugin for the run.
//!
//! `RocketHeadlessPlugin` carries the run logic only. Rendering, collision
//! detection and body integration are left to the host, which feeds the
//! results in as messages before `RunSet::Resolve`.

use bevy::prelude::*;

use crate::bevy::events::*;
use crate::bevy::resources::*;
use crate::bevy::state_store::StateStores;
use crate::bevy::systems;
use crate::config::{ConfigError, RunConfig};
use crate::run::Run;

/// Fixed simulation step in seconds.
pub const TICK_DT: f32 = 1.0 / 60.0;

/// Phases of one run tick, chained in `FixedUpdate`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum RunSet {
    /// Input, host feedback, hazard and coin overlaps.
    Resolve,
    /// Player state machine.
    Advance,
    /// Recycling, then teleport.
    Stream,
}

/// Headless plugin containing the run logic without rendering or window dependencies.
///
/// Use this plugin with `MinimalPlugins` in tests and simulators.
pub struct RocketHeadlessPlugin {
    config: RunConfig,
    /// Seed for the first run. `None` draws one from the OS.
    pub seed: Option<u64>,
    pub command_queue: Option<CommandQueue>,
    pub state_stores: Option<StateStores>,
}

impl RocketHeadlessPlugin {
    /// Validates `config` up front so that building the app cannot fail.
    pub fn new(config: RunConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            seed: None,
            command_queue: None,
            state_stores: None,
        })
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }
}

impl Default for RocketHeadlessPlugin {
    fn default() -> Self {
        Self {
            config: RunConfig::default(),
            seed: None,
            command_queue: None,
            state_stores: None,
        }
    }
}

impl Plugin for RocketHeadlessPlugin {
    fn build(&self, app: &mut App) {
        // ====================================================================
        // Run
        // ====================================================================
        let config = self.config.clone();
        let run = match self.seed {
            Some(seed) => Run::with_seed(config, seed),
            None => Run::new(config),
        }
        .expect("config is validated by RocketHeadlessPlugin::new");
        let frame = run.initial_frame();

        app.insert_resource(Time::<Fixed>::from_seconds(f64::from(TICK_DT)));

        // ====================================================================
        // Resources
        // ====================================================================
        app.insert_resource(RunRes::new(run))
            .insert_resource(ScrollFrameRes::new(frame))
            .insert_resource(FlightInput::default())
            .insert_resource(self.command_queue.clone().unwrap_or_default())
            .insert_resource(self.state_stores.clone().unwrap_or_default());

        // ====================================================================
        // Messages
        // ====================================================================

        // Host -> run
        app.add_message::<HazardOverlapEvent>()
            .add_message::<CoinOverlapEvent>()
            .add_message::<PlayerBodyFeedback>()
            .add_message::<RestartRunEvent>();

        // Run -> host
        app.add_message::<PlayerKilledEvent>()
            .add_message::<CoinCollectedEvent>()
            .add_message::<WorldTeleportedEvent>()
            .add_message::<RunEndedEvent>();

        // ====================================================================
        // Run tick (FixedUpdate)
        // ====================================================================
        app.configure_sets(
            FixedUpdate,
            (RunSet::Resolve, RunSet::Advance, RunSet::Stream).chain(),
        );

        app.add_systems(
            FixedUpdate,
            (
                systems::capture_flight_input,
                systems::apply_body_feedback,
                systems::resolve_hazard_overlaps,
                systems::resolve_coin_overlaps,
            )
                .chain()
                .in_set(RunSet::Resolve),
        );
        app.add_systems(FixedUpdate, systems::advance_player.in_set(RunSet::Advance));
        app.add_systems(
            FixedUpdate,
            (systems::recycle_world, systems::teleport_world)
                .chain()
                .in_set(RunSet::Stream),
        );

        // Command processing and restarts
        app.add_systems(
            Update,
            (systems::process_commands, systems::handle_restart).chain(),
        );

        // UI state sync
        app.add_systems(PostUpdate, systems::sync_run_store);
    }
}
