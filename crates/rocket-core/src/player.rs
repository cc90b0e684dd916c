//! The rocket-powered mouse and its life-state machine.

use bevy::math::Vec2;
use serde::{Deserialize, Serialize};

use crate::body::{Body, Motion};
use crate::config::{PlayerConfig, ViewportConfig};
use crate::teleport::ShiftX;

/// Coarse player status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LifeState {
    /// Running or flying; reacts to input.
    #[default]
    Alive,
    /// Hit by the hazard, sliding to a stop.
    Dying,
    /// Stopped. Terminal.
    Dead,
}

/// Animation selected for the mouse sprite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pose {
    #[default]
    Run,
    Fly,
    Fall,
    Dead,
}

/// A sprite drawn at a fixed offset from the player anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubVisual {
    pub offset: Vec2,
    pub visible: bool,
}

/// Player aggregate: anchor at the feet, two linked sprites, one body.
#[derive(Debug, Clone)]
pub struct Player {
    position: Vec2,
    pub body: Body,
    pub motion: Motion,
    life: LifeState,
    pose: Pose,
    pub mouse: SubVisual,
    pub flames: SubVisual,
    tuning: PlayerConfig,
}

impl Player {
    /// Spawns the player centered horizontally, just above the floor, already running.
    pub fn new(config: &PlayerConfig, viewport: &ViewportConfig) -> Self {
        let [bw, bh] = config.body_size();
        let [ox, oy] = config.body_offset();
        let [fx, fy] = config.flames_offset;

        let mut player = Self {
            position: Vec2::new(viewport.width * 0.5, viewport.height - config.floor_inset),
            body: Body::rect(Vec2::new(bw, bh), Vec2::new(ox, oy)),
            motion: Motion {
                velocity: Vec2::new(config.run_speed, 0.0),
                ..Motion::default()
            },
            life: LifeState::Alive,
            pose: Pose::Run,
            mouse: SubVisual {
                offset: Vec2::ZERO,
                visible: true,
            },
            flames: SubVisual {
                offset: Vec2::new(fx, fy),
                visible: false,
            },
            tuning: *config,
        };
        player.body.sync_to(player.position);
        player
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Moves the anchor and the body together.
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
        self.body.sync_to(position);
    }

    pub fn life(&self) -> LifeState {
        self.life
    }

    pub fn pose(&self) -> Pose {
        self.pose
    }

    pub fn is_alive(&self) -> bool {
        self.life == LifeState::Alive
    }

    /// World position of the mouse sprite.
    pub fn mouse_position(&self) -> Vec2 {
        self.position + self.mouse.offset
    }

    /// World position of the jetpack flames.
    pub fn flames_position(&self) -> Vec2 {
        self.position + self.flames.offset
    }

    pub fn jetpack_visible(&self) -> bool {
        self.flames.visible
    }

    fn enable_jetpack(&mut self, enabled: bool) {
        self.flames.visible = enabled;
    }

    /// Hazard hit. Only an alive player reacts; returns whether it did.
    pub fn kill(&mut self) -> bool {
        if self.life != LifeState::Alive {
            return false;
        }

        self.life = LifeState::Dying;
        self.pose = Pose::Dead;
        self.motion.acceleration = Vec2::ZERO;
        self.motion.velocity = Vec2::new(self.tuning.kill_push, 0.0);
        self.enable_jetpack(false);
        tracing::info!("[player] killed at x={:.1}", self.position.x);
        true
    }

    /// Advances the state machine by one tick.
    ///
    /// Returns true only on the tick the player enters `Dead`.
    #[must_use]
    pub fn tick(&mut self, flight_held: bool) -> bool {
        match self.life {
            LifeState::Alive => {
                self.steer(flight_held);
                false
            }
            LifeState::Dying => {
                self.motion.velocity.x *= self.tuning.decay;
                if self.motion.velocity.x.abs() <= self.tuning.stop_threshold {
                    self.life = LifeState::Dead;
                    self.motion.velocity = Vec2::ZERO;
                    tracing::info!("[player] stopped at x={:.1}", self.position.x);
                    true
                } else {
                    false
                }
            }
            LifeState::Dead => {
                self.motion.velocity = Vec2::ZERO;
                false
            }
        }
    }

    fn steer(&mut self, flight_held: bool) {
        if flight_held {
            self.motion.acceleration.y = self.tuning.thrust;
            self.enable_jetpack(true);
            self.pose = Pose::Fly;
            return;
        }

        self.motion.acceleration.y = 0.0;
        self.enable_jetpack(false);

        if self.motion.blocked_down {
            self.pose = Pose::Run;
        } else if self.motion.velocity.y > 0.0 {
            self.pose = Pose::Fall;
        }
    }
}

impl ShiftX for Player {
    fn shift_x(&mut self, dx: f32) {
        self.set_position(self.position + Vec2::new(dx, 0.0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> Player {
        Player::new(&PlayerConfig::default(), &ViewportConfig::default())
    }

    #[test]
    fn test_spawn_state() {
        let player = player();
        assert_eq!(player.position(), Vec2::new(400.0, 610.0));
        assert_eq!(player.life(), LifeState::Alive);
        assert_eq!(player.motion.velocity, Vec2::new(200.0, 0.0));
        assert!(!player.jetpack_visible());
        assert!(player.body.is_synced_with(player.position()));
    }

    #[test]
    fn test_sub_visuals_follow_anchor() {
        let mut player = player();
        player.shift_x(-100.0);

        assert_eq!(player.mouse_position(), Vec2::new(300.0, 610.0));
        assert_eq!(player.flames_position(), Vec2::new(237.0, 595.0));
        assert!(player.mouse.visible);
    }

    #[test]
    fn test_grounded_without_input_runs() {
        let mut player = player();
        player.motion.blocked_down = true;
        player.motion.acceleration.y = -600.0;

        assert!(!player.tick(false));
        assert_eq!(player.pose(), Pose::Run);
        assert!(player.motion.acceleration.y.abs() < f32::EPSILON);
        assert!(!player.jetpack_visible());
    }

    #[test]
    fn test_thrust_flies() {
        let mut player = player();
        player.motion.blocked_down = true;

        assert!(!player.tick(true));
        assert_eq!(player.pose(), Pose::Fly);
        assert!((player.motion.acceleration.y + 600.0).abs() < f32::EPSILON);
        assert!(player.jetpack_visible());
    }

    #[test]
    fn test_falling_without_input() {
        let mut player = player();
        player.tick(true);
        player.motion.velocity.y = 40.0;

        player.tick(false);
        assert_eq!(player.pose(), Pose::Fall);
        assert!(!player.jetpack_visible());
    }

    #[test]
    fn test_rising_without_input_keeps_pose() {
        let mut player = player();
        player.tick(true);
        player.motion.velocity.y = -40.0;

        player.tick(false);
        assert_eq!(player.pose(), Pose::Fly);
    }

    #[test]
    fn test_kill_pushes_and_locks_input() {
        let mut player = player();
        player.tick(true);

        assert!(player.kill());
        assert_eq!(player.life(), LifeState::Dying);
        assert_eq!(player.motion.velocity, Vec2::new(1000.0, 0.0));
        assert_eq!(player.motion.acceleration, Vec2::ZERO);
        assert!(!player.jetpack_visible());
        assert_eq!(player.pose(), Pose::Dead);

        // A second hit is ignored.
        player.motion.velocity.x = 700.0;
        assert!(!player.kill());
        assert!((player.motion.velocity.x - 700.0).abs() < f32::EPSILON);

        // Flight input no longer thrusts.
        let _ = player.tick(true);
        assert_eq!(player.motion.acceleration, Vec2::ZERO);
        assert!(!player.jetpack_visible());
    }

    #[test]
    fn test_decay_reaches_dead_once() {
        let mut player = player();
        player.kill();

        let mut previous = player.motion.velocity.x;
        let mut ticks = 0;
        let mut transitions = 0;
        while player.life() == LifeState::Dying {
            if player.tick(false) {
                transitions += 1;
            }
            ticks += 1;
            if player.life() == LifeState::Dying {
                assert!(player.motion.velocity.x < previous);
                previous = player.motion.velocity.x;
            }
            assert!(ticks <= 1000);
        }

        assert_eq!(ticks, 528);
        assert_eq!(transitions, 1);
        assert_eq!(player.motion.velocity, Vec2::ZERO);

        for _ in 0..10 {
            assert!(!player.tick(false));
        }
        assert_eq!(player.life(), LifeState::Dead);
    }

    #[test]
    fn test_dead_forces_zero_velocity() {
        let mut player = player();
        player.kill();
        while !player.tick(false) {}

        player.motion.velocity = Vec2::new(30.0, 12.0);
        let _ = player.tick(false);
        assert_eq!(player.motion.velocity, Vec2::ZERO);
        assert!(!player.kill());
    }
}
