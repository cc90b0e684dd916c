//! Shared state store for UI access outside the ECS.
//!
//! The store holds a read-only snapshot of the run that a UI can poll
//! without touching the Bevy world.

use std::sync::Arc;

use bevy::prelude::Resource;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::player::LifeState;

/// Run summary for UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RunSummary {
    pub score: u32,
    pub life: LifeState,
    pub run_over: bool,
    pub teleports: u32,
    pub seed: u64,
}

/// Store for the run summary.
#[derive(Debug, Default)]
pub struct RunStore {
    summary: RwLock<RunSummary>,
    version: RwLock<u64>,
}

impl RunStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_summary(&self) -> RunSummary {
        self.summary.read().clone()
    }

    pub fn get_score(&self) -> u32 {
        self.summary.read().score
    }

    pub fn get_version(&self) -> u64 {
        *self.version.read()
    }

    /// Replaces the summary; the version only moves when something changed.
    pub fn update(&self, summary: RunSummary) {
        if *self.summary.read() == summary {
            return;
        }
        *self.summary.write() = summary;
        *self.version.write() += 1;
    }
}

/// All shared stores, cloned into the app and handed to the UI.
#[derive(Resource, Clone)]
pub struct StateStores {
    pub run: Arc<RunStore>,
}

impl StateStores {
    pub fn new() -> Self {
        Self {
            run: Arc::new(RunStore::new()),
        }
    }
}

impl Default for StateStores {
    fn default() -> Self {
        Self::new()
    }
}
