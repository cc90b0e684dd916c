//! State synchronization systems.
//!
//! Syncs the run to `StateStores` for UI access.

use bevy::prelude::*;

use crate::bevy::{RunRes, RunSummary, StateStores};

/// Publishes the run summary. The store ignores unchanged summaries.
pub fn sync_run_store(run: Res<RunRes>, state_stores: Res<StateStores>) {
    let run = &run.run;
    state_stores.run.update(RunSummary {
        score: run.score(),
        life: run.life(),
        run_over: run.is_over(),
        teleports: run.teleports(),
        seed: run.seed(),
    });
}
