//! Per-run coordinator.
//!
//! Owns the world, the score, and the run's randomness, and executes the
//! tick phases in order: overlaps, player, recycling, teleport.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::{ConfigError, RunConfig};
use crate::player::LifeState;
use crate::scroll::ScrollFrame;
use crate::teleport::TeleportController;
use crate::world::{RecycleReport, World};

/// Coins collected during the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Score(u32);

impl Score {
    pub fn value(self) -> u32 {
        self.0
    }

    fn increment(&mut self) {
        self.0 += 1;
    }
}

/// Inputs delivered by the host for one tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickSignals<'a> {
    pub flight_held: bool,
    pub hazard_overlap: bool,
    /// Pool slots the player overlapped this tick.
    pub coin_overlaps: &'a [usize],
}

/// What happened during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TickReport {
    pub killed: bool,
    pub coins_collected: u32,
    pub recycled: RecycleReport,
    /// Scroll frame after a teleport; the host must move its camera to it.
    pub teleported: Option<ScrollFrame>,
    pub run_ended: bool,
}

type RunEndListener = Box<dyn FnOnce() + Send + Sync>;

/// Coordinator for a single run, from spawn until the player stops.
pub struct Run {
    config: RunConfig,
    world: World,
    teleport: TeleportController,
    score: Score,
    rng: ChaCha8Rng,
    seed: u64,
    ticks: u64,
    teleports: u32,
    ended: bool,
    on_end: Option<RunEndListener>,
}

impl Run {
    /// Starts a run with fresh OS-seeded randomness.
    pub fn new(config: RunConfig) -> Result<Self, ConfigError> {
        Self::with_seed(config, rand::rng().random())
    }

    pub fn with_seed(config: RunConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let world = World::from_config(&config, &mut rng);
        tracing::info!(
            "[run] started (seed={}, modulus={}, coins={})",
            seed,
            config.modulus(),
            world.coins.active_count()
        );
        Ok(Self {
            teleport: TeleportController::from_config(&config.teleport),
            config,
            world,
            score: Score::default(),
            rng,
            seed,
            ticks: 0,
            teleports: 0,
            ended: false,
            on_end: None,
        })
    }

    /// Rebuilds the run from scratch with fresh randomness.
    ///
    /// Score, pool, layout and any subscribed listener are discarded.
    pub fn restart(&mut self) {
        self.restart_with_seed(rand::rng().random());
    }

    pub fn restart_with_seed(&mut self, seed: u64) {
        tracing::info!("[run] restart (previous score={})", self.score.value());
        self.rng = ChaCha8Rng::seed_from_u64(seed);
        self.world = World::from_config(&self.config, &mut self.rng);
        self.seed = seed;
        self.score = Score::default();
        self.ticks = 0;
        self.teleports = 0;
        self.ended = false;
        self.on_end = None;
    }

    /// Subscribes the single-fire run-end callback, replacing any previous one.
    pub fn on_run_end<F>(&mut self, listener: F)
    where
        F: FnOnce() + Send + Sync + 'static,
    {
        self.on_end = Some(Box::new(listener));
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn score(&self) -> u32 {
        self.score.value()
    }

    pub fn life(&self) -> LifeState {
        self.world.player.life()
    }

    /// True once the run-end event has fired.
    pub fn is_over(&self) -> bool {
        self.ended
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn teleports(&self) -> u32 {
        self.teleports
    }

    pub fn modulus(&self) -> f32 {
        self.teleport.modulus()
    }

    /// Scroll frame at the start of a run.
    pub fn initial_frame(&self) -> ScrollFrame {
        ScrollFrame::from_viewport(&self.config.viewport, 0.0)
    }

    /// Applies a hazard hit. No effect unless the player is alive.
    pub fn kill_player(&mut self) -> bool {
        self.world.player.kill()
    }

    /// Collects the coin in `slot`. Ignored once the run is over.
    pub fn collect_coin(&mut self, slot: usize) -> bool {
        if self.life() == LifeState::Dead {
            return false;
        }
        if self.world.coins.collect(slot) {
            self.score.increment();
            tracing::debug!("[run] coin {} collected, score={}", slot, self.score.value());
            true
        } else {
            false
        }
    }

    /// Applies this tick's overlaps: the hazard first, then coins in report order.
    ///
    /// Returns whether the player was killed and how many coins scored.
    pub fn resolve_overlaps(
        &mut self,
        hazard_overlap: bool,
        coin_overlaps: &[usize],
    ) -> (bool, u32) {
        let killed = hazard_overlap && self.kill_player();
        let collected = coin_overlaps
            .iter()
            .filter(|&&slot| self.collect_coin(slot))
            .count();
        (killed, u32::try_from(collected).unwrap_or(u32::MAX))
    }

    /// Runs the player state machine. Returns true on the tick the run ends.
    pub fn advance_player(&mut self, flight_held: bool) -> bool {
        self.ticks += 1;
        let entered_dead = self.world.player.tick(flight_held);
        if !entered_dead || self.ended {
            return false;
        }

        self.ended = true;
        tracing::info!("[run] over after {} ticks, score={}", self.ticks, self.score.value());
        if let Some(listener) = self.on_end.take() {
            listener();
        }
        true
    }

    pub fn recycle(&mut self, frame: &ScrollFrame) -> RecycleReport {
        self.world.recycle(frame, &mut self.rng)
    }

    /// Shifts the world back if the scroll offset passed the modulus.
    pub fn teleport(&mut self, frame: &ScrollFrame) -> Option<ScrollFrame> {
        let shifted = self.teleport.apply(&mut self.world, frame, &mut self.rng);
        if shifted.is_some() {
            self.teleports += 1;
        }
        shifted
    }

    /// One full tick in the required order.
    pub fn tick(&mut self, frame: &ScrollFrame, signals: TickSignals<'_>) -> TickReport {
        let mut report = TickReport::default();

        (report.killed, report.coins_collected) =
            self.resolve_overlaps(signals.hazard_overlap, signals.coin_overlaps);
        report.run_ended = self.advance_player(signals.flight_held);
        report.recycled = self.recycle(frame);
        report.teleported = self.teleport(frame);
        report
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    use bevy::math::Vec2;

    use super::*;
    use crate::player::Pose;

    fn run() -> Run {
        Run::with_seed(RunConfig::default(), 99).unwrap()
    }

    fn frame(offset: f32) -> ScrollFrame {
        ScrollFrame::new(offset, 800.0, 640.0)
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = RunConfig::default();
        config.coins.pool_size = 0;
        assert!(matches!(
            Run::with_seed(config, 1),
            Err(ConfigError::EmptyCoinPool)
        ));
    }

    #[test]
    fn test_collect_same_coin_twice_scores_once() {
        let mut run = run();
        let report = run.tick(
            &frame(0.0),
            TickSignals {
                coin_overlaps: &[0, 0],
                ..TickSignals::default()
            },
        );
        assert_eq!(report.coins_collected, 1);

        run.tick(
            &frame(0.0),
            TickSignals {
                coin_overlaps: &[0],
                ..TickSignals::default()
            },
        );
        assert_eq!(run.score(), 1);
    }

    #[test]
    fn test_grounded_idle_tick_runs() {
        let mut run = run();
        run.world_mut().player.motion.blocked_down = true;
        run.tick(&frame(0.0), TickSignals::default());

        let player = &run.world().player;
        assert_eq!(player.pose(), Pose::Run);
        assert!(player.motion.acceleration.y.abs() < f32::EPSILON);
        assert!(!player.jetpack_visible());
    }

    #[test]
    fn test_hazard_overlap_then_repeat() {
        let mut run = run();
        let hit = TickSignals {
            hazard_overlap: true,
            ..TickSignals::default()
        };

        let report = run.tick(&frame(0.0), hit);
        assert!(report.killed);
        assert_eq!(run.life(), LifeState::Dying);
        // One decay tick already applied after the kill.
        assert!((run.world().player.motion.velocity.x - 990.0).abs() < 1e-3);

        let report = run.tick(&frame(0.0), hit);
        assert!(!report.killed);
        assert!((run.world().player.motion.velocity.x - 980.1).abs() < 1e-2);
        assert_eq!(run.world().player.motion.acceleration, Vec2::ZERO);
    }

    #[test]
    fn test_run_end_fires_listener_once() {
        let mut run = run();
        let fired = Arc::new(AtomicU32::new(0));
        let counter = fired.clone();
        run.on_run_end(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        run.kill_player();
        let mut endings = 0;
        for _ in 0..1000 {
            if run.tick(&frame(0.0), TickSignals::default()).run_ended {
                endings += 1;
            }
        }

        assert_eq!(endings, 1);
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert!(run.is_over());
        assert_eq!(run.life(), LifeState::Dead);
    }

    #[test]
    fn test_dead_player_collects_nothing() {
        let mut run = run();
        run.kill_player();
        while !run.advance_player(false) {}

        assert!(!run.collect_coin(0));
        assert_eq!(run.score(), 0);
    }

    #[test]
    fn test_teleport_counts_and_reports_frame() {
        let mut run = run();
        run.world_mut().player.set_position(Vec2::new(2800.0, 610.0));

        let report = run.tick(&frame(2400.0), TickSignals::default());
        let shifted = report.teleported.unwrap();
        assert!((shifted.offset - 20.0).abs() < 1e-3);
        assert_eq!(run.teleports(), 1);
        assert!((run.world().player.position().x - 420.0).abs() < 1e-3);
    }

    #[test]
    fn test_teleport_with_short_host_frame() {
        let mut run = run();
        // Shorter than the configured viewport; the coin re-seed must still place coins.
        let report = run.tick(&ScrollFrame::new(2400.0, 800.0, 150.0), TickSignals::default());

        let shifted = report.teleported.unwrap();
        assert!((shifted.offset - 20.0).abs() < 1e-3);
        assert!(run.world().coins.active_count() >= 1);
        for (_, coin) in run.world().coins.active_slots() {
            assert!((coin.position.y - 75.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_recycle_runs_before_teleport() {
        let mut run = run();
        // Everything is behind this frame; it must be recycled ahead of it first.
        let report = run.tick(&frame(3600.0), TickSignals::default());
        assert_eq!(report.recycled.props_moved, 5);
        assert!(report.recycled.hazard_moved);

        let shifted = report.teleported.unwrap();
        for prop in run.world().props.props() {
            assert!(!shifted.has_passed(prop.x, prop.width));
        }
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut run = run();
        run.collect_coin(0);
        run.kill_player();
        while !run.advance_player(false) {}

        run.restart_with_seed(7);

        assert_eq!(run.score(), 0);
        assert_eq!(run.life(), LifeState::Alive);
        assert!(!run.is_over());
        assert_eq!(run.ticks(), 0);
        assert_eq!(run.seed(), 7);
        assert_eq!(run.world().coins.capacity(), 20);
        assert!(run.world().coins.active_count() >= 1);
    }
}
