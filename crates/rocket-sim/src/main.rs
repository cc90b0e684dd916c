//! Rocket-Run simulator
//!
//! Runs the headless run plugin against the arcade physics host for a fixed
//! number of ticks and prints one summary per run plus the final scene as JSON.

use std::path::PathBuf;

use anyhow::{Context, Result};
use bevy::prelude::*;
use clap::Parser;
use rocket_core::RunConfig;
use rocket_core::bevy::{
    CommandQueue, RocketHeadlessPlugin, RunCommand, RunRes, RunSummary, ScrollFrameRes,
    StateStores,
};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod host;
mod scene;

use crate::host::{ArcadeHostPlugin, ArcadeTuning};
use crate::scene::SceneSnapshot;

#[derive(Parser)]
#[command(name = "rocket-sim")]
#[command(about = "Headless rocket-run simulator")]
struct Cli {
    /// Run configuration as JSON; built-in defaults when omitted
    #[arg(long)]
    config: Option<PathBuf>,
    /// Fixed ticks to simulate (60 per second)
    #[arg(long, default_value_t = 3600)]
    ticks: u64,
    /// Seed of the first run; later runs use seed + n
    #[arg(long)]
    seed: Option<u64>,
    /// Start a new run after each ending, at most this many times
    #[arg(long, default_value_t = 0)]
    restarts: u32,
    /// Let the player run without steering
    #[arg(long)]
    no_autopilot: bool,
    /// Print the effective configuration and exit
    #[arg(long)]
    dump_config: bool,
}

#[derive(Serialize)]
struct SimReport {
    ticks: u64,
    runs: Vec<RunSummary>,
    /// Scene after the last simulated tick.
    scene: SceneSnapshot,
}

fn load_config(path: Option<&PathBuf>) -> Result<RunConfig> {
    let Some(path) = path else {
        return Ok(RunConfig::default());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    RunConfig::from_json(&json).with_context(|| format!("invalid run config in {}", path.display()))
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;

    if cli.dump_config {
        println!("{}", config.to_json()?);
        return Ok(());
    }

    let command_queue = CommandQueue::new();
    let state_stores = StateStores::new();

    let mut plugin = RocketHeadlessPlugin::new(config).context("invalid run config")?;
    plugin.seed = cli.seed;
    plugin.command_queue = Some(command_queue.clone());
    plugin.state_stores = Some(state_stores.clone());

    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(plugin);
    app.add_plugins(ArcadeHostPlugin {
        tuning: ArcadeTuning {
            autopilot: !cli.no_autopilot,
            ..ArcadeTuning::default()
        },
    });
    // Virtual time stays paused; every loop iteration feeds exactly one fixed tick.
    app.world_mut().resource_mut::<Time<Virtual>>().pause();
    app.update();

    let dt = app.world().resource::<Time<Fixed>>().timestep();
    let mut runs = Vec::new();
    let mut restarts_left = cli.restarts;
    let mut ticks = 0;

    while ticks < cli.ticks {
        app.world_mut()
            .resource_mut::<Time<Fixed>>()
            .accumulate_overstep(dt);
        app.update();
        ticks += 1;

        let summary = state_stores.run.get_summary();
        if !summary.run_over {
            continue;
        }

        tracing::info!(
            "[sim] run {} ended at tick {} with score {}",
            runs.len(),
            ticks,
            summary.score
        );
        runs.push(summary);
        if restarts_left == 0 {
            break;
        }
        restarts_left -= 1;
        let seed = cli.seed.map(|seed| seed.wrapping_add(runs.len() as u64));
        command_queue.push(RunCommand::Restart { seed });
    }

    let last = state_stores.run.get_summary();
    if !last.run_over {
        runs.push(last);
    }

    let scene = SceneSnapshot::capture(
        &app.world().resource::<RunRes>().run,
        app.world().resource::<ScrollFrameRes>().frame.offset,
    );
    let report = SimReport { ticks, runs, scene };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
